use crate::analysis::pivots::{Pivot, PivotKind};
use crate::models::timeseries::CandleSeries;
use crate::models::zone::{Zone, ZoneKind, ZoneStatus};

/// Build the candidate zone for one pivot.
///
/// The wick extreme is the outer bound (the rejected price), the body edge
/// nearer the wick is the inner bound, so the zone is a band rather than a
/// single line. A wickless pivot candle produces a degenerate band.
///
/// The inner bound is then pulled toward the outer bound until the band no
/// longer cuts through the bodies of the four window neighbors; a pivot whose
/// neighbors closed right at the extreme ends up with a narrow (possibly
/// degenerate) band instead of one overlapping their bodies.
pub fn build_zone(pivot: &Pivot, series: &CandleSeries) -> Zone {
    let candle = &pivot.candle;

    let (kind, zone_low, zone_high) = match pivot.kind {
        PivotKind::High => {
            let zone_high = candle.high_price;
            let mut zone_low = candle.body_high();
            for neighbor_idx in neighbor_indices(pivot.index, series.len()) {
                let nb_body_high = series.get_candle(neighbor_idx).body_high();
                if nb_body_high > zone_low && nb_body_high < zone_high {
                    zone_low = nb_body_high;
                }
            }
            (ZoneKind::Resistance, zone_low, zone_high)
        }
        PivotKind::Low => {
            let zone_low = candle.low_price;
            let mut zone_high = candle.body_low();
            for neighbor_idx in neighbor_indices(pivot.index, series.len()) {
                let nb_body_low = series.get_candle(neighbor_idx).body_low();
                if nb_body_low < zone_high && nb_body_low > zone_low {
                    zone_high = nb_body_low;
                }
            }
            (ZoneKind::Support, zone_low, zone_high)
        }
    };

    debug_assert!(zone_high >= zone_low);

    Zone {
        kind,
        zone_low,
        zone_high,
        origin_pivot_index: pivot.index,
        origin_time_ms: candle.open_time_ms,
        timeframe: series.key.timeframe,
        status: ZoneStatus::Active,
        strength: 1,
        touches: 0,
    }
}

fn neighbor_indices(pivot_idx: usize, series_len: usize) -> impl Iterator<Item = usize> {
    [
        pivot_idx.wrapping_sub(2),
        pivot_idx.wrapping_sub(1),
        pivot_idx + 1,
        pivot_idx + 2,
    ]
    .into_iter()
    .filter(move |&idx| idx < series_len)
}
