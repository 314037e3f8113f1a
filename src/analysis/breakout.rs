use crate::models::timeseries::CandleSeries;
use crate::models::zone::{Zone, ZoneKind, ZoneStatus};

fn close_breaks(zone: &Zone, close: f64) -> bool {
    match zone.kind {
        ZoneKind::Resistance => close > zone.zone_high,
        ZoneKind::Support => close < zone.zone_low,
    }
}

/// Scan forward from the zone's origin and mark it `Broken` at the first
/// close strictly beyond the outer bound. Status is monotonic: an already
/// broken zone is left alone, and the scan stops at the first violation.
///
/// While the zone is still intact the same pass counts touches: candles
/// after the origin whose range trades into the band.
pub fn evaluate_breakout(zone: &mut Zone, series: &CandleSeries) {
    if zone.status == ZoneStatus::Broken {
        return;
    }

    for idx in (zone.origin_pivot_index + 1)..series.len() {
        let close = series.close_prices[idx];
        if close_breaks(zone, close) {
            zone.status = ZoneStatus::Broken;
            return;
        }
        let overlaps =
            series.low_prices[idx] <= zone.zone_high && series.high_prices[idx] >= zone.zone_low;
        if overlaps {
            zone.touches += 1;
        }
    }
}
