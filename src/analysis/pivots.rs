use crate::config::MIN_CANDLES_FOR_DETECTION;
use crate::domain::candle::Candle;
use crate::models::timeseries::CandleSeries;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PivotKind {
    High,
    Low,
}

/// A local extreme confirmed by the 5-candle fractal pattern: two candles on
/// each side of the pivot, all with a less extreme high (or low).
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    pub index: usize,
    pub kind: PivotKind,
    pub candle: Candle,
}

// Comparison policy: strictly greater / strictly less. A tie with any
// neighbor disqualifies the candidate.
fn is_high_pivot(series: &CandleSeries, i: usize) -> bool {
    let high = series.high_prices[i];
    (i - 2..=i + 2)
        .filter(|&j| j != i)
        .all(|j| high > series.high_prices[j])
}

fn is_low_pivot(series: &CandleSeries, i: usize) -> bool {
    let low = series.low_prices[i];
    (i - 2..=i + 2)
        .filter(|&j| j != i)
        .all(|j| low < series.low_prices[j])
}

/// Lazily scan `series` for fractal pivots, in ascending index order.
///
/// Only indices with a full window on both sides are considered, so a series
/// shorter than five candles yields nothing. A single candle can be both a
/// high and a low pivot when it is simultaneously the window's extreme in
/// both directions; the high pivot is yielded first.
pub fn find_pivots(series: &CandleSeries) -> impl Iterator<Item = Pivot> + '_ {
    let candidates = if series.len() < MIN_CANDLES_FOR_DETECTION {
        2..2
    } else {
        2..series.len() - 2
    };

    candidates.flat_map(move |i| {
        let as_high = is_high_pivot(series, i).then(|| Pivot {
            index: i,
            kind: PivotKind::High,
            candle: series.get_candle(i),
        });
        let as_low = is_low_pivot(series, i).then(|| Pivot {
            index: i,
            kind: PivotKind::Low,
            candle: series.get_candle(i),
        });
        as_high.into_iter().chain(as_low)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timeframe::Timeframe;
    use crate::models::timeseries::SeriesKey;

    // Flat series at `base` with per-candle (high, low) overrides.
    fn series_with_highs_lows(bars: &[(f64, f64)]) -> CandleSeries {
        let mut series = CandleSeries::new(SeriesKey {
            symbol: "TESTUSDT".to_string(),
            timeframe: Timeframe::H1,
        });
        for (i, &(high, low)) in bars.iter().enumerate() {
            let mid = (high + low) / 2.0;
            series.push_candle(&Candle::new(i as i64 * 3_600_000, mid, high, low, mid));
        }
        series
    }

    #[test]
    fn test_short_series_has_no_pivots() {
        for n in 0..MIN_CANDLES_FOR_DETECTION {
            let bars: Vec<(f64, f64)> = (0..n).map(|i| (100.0 + i as f64, 99.0)).collect();
            let series = series_with_highs_lows(&bars);
            assert_eq!(
                find_pivots(&series).count(),
                0,
                "series of {} candles must yield no pivots",
                n
            );
        }
    }

    #[test]
    fn test_planted_high_pivot() {
        let series = series_with_highs_lows(&[
            (101.0, 99.0),
            (102.0, 99.5),
            (105.0, 100.0), // planted high at index 2
            (103.0, 100.0),
            (101.5, 99.0),
        ]);
        let pivots: Vec<Pivot> = find_pivots(&series).collect();
        assert_eq!(pivots.len(), 1);
        assert_eq!(pivots[0].index, 2);
        assert_eq!(pivots[0].kind, PivotKind::High);
        assert_eq!(pivots[0].candle.high_price, 105.0);
    }

    #[test]
    fn test_planted_low_pivot() {
        let series = series_with_highs_lows(&[
            (101.0, 93.0),
            (102.0, 92.0),
            (102.5, 90.0), // planted low at index 2
            (103.0, 91.0),
            (101.5, 94.0),
        ]);
        let pivots: Vec<Pivot> = find_pivots(&series).collect();
        assert_eq!(pivots.len(), 1);
        assert_eq!(pivots[0].kind, PivotKind::Low);
        assert_eq!(pivots[0].candle.low_price, 90.0);
    }

    #[test]
    fn test_tied_extreme_is_not_a_pivot() {
        // Index 2 ties index 3 on the high; neither qualifies.
        let series = series_with_highs_lows(&[
            (101.0, 99.0),
            (102.0, 99.0),
            (105.0, 99.0),
            (105.0, 99.0),
            (101.0, 99.0),
            (100.0, 98.5),
            (100.0, 98.5),
        ]);
        assert!(
            find_pivots(&series).all(|p| p.kind != PivotKind::High),
            "tied highs must not produce a high pivot"
        );
    }

    #[test]
    fn test_candle_can_be_both_pivot_kinds() {
        // Index 2 has both the widest high and the widest low in its window.
        let series = series_with_highs_lows(&[
            (101.0, 99.0),
            (102.0, 98.0),
            (110.0, 90.0),
            (103.0, 97.0),
            (101.5, 99.5),
        ]);
        let kinds: Vec<PivotKind> = find_pivots(&series).map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PivotKind::High, PivotKind::Low]);
    }

    #[test]
    fn test_pivots_ascend_by_index() {
        let series = series_with_highs_lows(&[
            (101.0, 99.0),
            (102.0, 98.0),
            (105.0, 97.0), // high pivot
            (103.0, 98.0),
            (102.0, 96.0),
            (101.0, 90.0), // low pivot
            (102.0, 95.0),
            (103.0, 96.0),
        ]);
        let indices: Vec<usize> = find_pivots(&series).map(|p| p.index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }
}
