use crate::models::timeseries::CandleSeries;
use crate::models::zone::{Zone, ZoneKind};
use crate::utils::maths_utils::{get_max, get_min};

/// Tighten a zone's inner bound using the closes between its pivot and the
/// latest candle (both inclusive).
///
/// Support: the inner bound becomes the minimum close over the window, i.e.
/// where price has actually respected the level. Resistance mirrors with the
/// maximum close. Two clamps keep the invariant: the new bound never crosses
/// the outer bound (the zone degenerates rather than inverts), and never
/// moves away from it (a window that only traded further out leaves the zone
/// untouched).
///
/// Runs once per zone, before breakout evaluation, over the same window
/// regardless of any later invalidation.
pub fn refine_zone(zone: &mut Zone, series: &CandleSeries) {
    let window = &series.close_prices[zone.origin_pivot_index..];
    if window.is_empty() {
        return;
    }

    match zone.kind {
        ZoneKind::Support => {
            zone.zone_high = get_min(window).clamp(zone.zone_low, zone.zone_high);
        }
        ZoneKind::Resistance => {
            zone.zone_low = get_max(window).clamp(zone.zone_low, zone.zone_high);
        }
    }
}
