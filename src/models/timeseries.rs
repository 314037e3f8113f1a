use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::domain::candle::Candle;
use crate::domain::timeframe::Timeframe;
use crate::error::ZoneScoutError;
use crate::utils::maths_utils::{get_max, get_min};

// ============================================================================
// CandleSeries: Raw time series data for one instrument/timeframe
// ============================================================================

/// Identifies one series: which instrument, at which aggregation period.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct SeriesKey {
    pub symbol: String,
    pub timeframe: Timeframe,
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.symbol, self.timeframe)
    }
}

/// Column-wise OHLC storage. Candles are immutable once loaded; the engine
/// only ever reads them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CandleSeries {
    pub key: SeriesKey,

    // Per-candle columns, all the same length
    pub open_times_ms: Vec<i64>,
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,
}

impl CandleSeries {
    pub fn new(key: SeriesKey) -> Self {
        CandleSeries {
            key,
            open_times_ms: Vec::new(),
            open_prices: Vec::new(),
            high_prices: Vec::new(),
            low_prices: Vec::new(),
            close_prices: Vec::new(),
        }
    }

    pub fn push_candle(&mut self, candle: &Candle) {
        self.open_times_ms.push(candle.open_time_ms);
        self.open_prices.push(candle.open_price);
        self.high_prices.push(candle.high_price);
        self.low_prices.push(candle.low_price);
        self.close_prices.push(candle.close_price);
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.open_times_ms[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
        )
    }

    pub fn len(&self) -> usize {
        self.open_times_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open_times_ms.is_empty()
    }

    /// Close of the most recent candle, if any. Callers treat this as the
    /// working "current price" when no live feed is attached.
    pub fn last_close(&self) -> Option<f64> {
        self.close_prices.last().copied()
    }

    /// Min low / max high across the whole series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        Some((get_min(&self.low_prices), get_max(&self.high_prices)))
    }

    /// Rejects malformed input before any analysis touches it. The engine
    /// must not silently produce zones from corrupted candles.
    ///
    /// Checked per candle: `high >= low`, and `open_time` strictly greater
    /// than the previous candle's.
    pub fn validate(&self) -> Result<(), ZoneScoutError> {
        for idx in 0..self.len() {
            if self.high_prices[idx] < self.low_prices[idx] {
                return Err(ZoneScoutError::InvalidCandle {
                    symbol: self.key.symbol.clone(),
                    index: idx,
                    reason: format!(
                        "high {} below low {}",
                        self.high_prices[idx], self.low_prices[idx]
                    ),
                });
            }
            if idx > 0 && self.open_times_ms[idx] <= self.open_times_ms[idx - 1] {
                return Err(ZoneScoutError::InvalidCandle {
                    symbol: self.key.symbol.clone(),
                    index: idx,
                    reason: format!(
                        "open_time {} not after previous {}",
                        self.open_times_ms[idx],
                        self.open_times_ms[idx - 1]
                    ),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// SeriesCollection: All loaded series, across instruments and timeframes
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct SeriesCollection {
    pub series_data: Vec<CandleSeries>,
}

impl SeriesCollection {
    pub fn find(&self, symbol: &str, timeframe: Timeframe) -> Option<&CandleSeries> {
        self.series_data
            .iter()
            .find(|series| series.key.symbol == symbol && series.key.timeframe == timeframe)
    }

    pub fn unique_symbols(&self) -> Vec<String> {
        // BTreeSet maintains sorted order and ensures uniqueness
        self.series_data
            .iter()
            .map(|series| series.key.symbol.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

pub fn find_matching_series<'a>(
    collection: &'a SeriesCollection,
    symbol: &str,
    timeframe: Timeframe,
) -> Result<&'a CandleSeries> {
    collection.find(symbol, timeframe).ok_or_else(|| {
        anyhow!(
            "No candle series found for symbol {} with timeframe {}",
            symbol,
            timeframe
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_with_rows(rows: &[(i64, f64, f64, f64, f64)]) -> CandleSeries {
        let mut series = CandleSeries::new(SeriesKey {
            symbol: "BTCUSDT".to_string(),
            timeframe: Timeframe::H1,
        });
        for &(ts, open, high, low, close) in rows {
            series.push_candle(&Candle::new(ts, open, high, low, close));
        }
        series
    }

    #[test]
    fn test_validate_accepts_clean_series() {
        let series = series_with_rows(&[
            (0, 100.0, 101.0, 99.0, 100.5),
            (3_600_000, 100.5, 102.0, 100.0, 101.5),
        ]);
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_bar() {
        let series = series_with_rows(&[(0, 100.0, 99.0, 101.0, 100.0)]);
        let err = series.validate().unwrap_err();
        assert!(matches!(err, ZoneScoutError::InvalidCandle { index: 0, .. }));
    }

    #[test]
    fn test_validate_rejects_non_monotonic_open_time() {
        let series = series_with_rows(&[
            (3_600_000, 100.0, 101.0, 99.0, 100.5),
            (3_600_000, 100.5, 102.0, 100.0, 101.5),
        ]);
        let err = series.validate().unwrap_err();
        assert!(matches!(err, ZoneScoutError::InvalidCandle { index: 1, .. }));
    }

    #[test]
    fn test_collection_lookup_by_key() {
        let mut collection = SeriesCollection::default();
        collection.series_data.push(series_with_rows(&[]));

        assert!(collection.find("BTCUSDT", Timeframe::H1).is_some());
        assert!(collection.find("BTCUSDT", Timeframe::H4).is_none());
        assert!(find_matching_series(&collection, "ETHUSDT", Timeframe::H1).is_err());
    }

    #[test]
    fn test_price_range_spans_wicks() {
        let series = series_with_rows(&[
            (0, 100.0, 104.0, 99.0, 100.5),
            (3_600_000, 100.5, 102.0, 97.5, 101.5),
        ]);
        assert_eq!(series.price_range(), Some((97.5, 104.0)));
    }
}
