use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::breakout::evaluate_breakout;
use crate::analysis::merge::merge_zones;
use crate::analysis::pivots::find_pivots;
use crate::analysis::refine::refine_zone;
use crate::analysis::zone_builder::build_zone;
use crate::config::{MIN_CANDLES_FOR_DETECTION, ZoneConfig};
use crate::error::ZoneScoutError;
use crate::models::timeseries::{CandleSeries, SeriesCollection};
use crate::models::zone::{Zone, ZoneKind};

#[allow(unused_imports)]
use crate::config::{PRINT_DETECTION_FOR_SYMBOL, PRINT_PIPELINE_STAGES};

/// Run the full zone pipeline on one candle series:
/// pivots -> candidate zones -> refinement -> merging -> breakout.
///
/// Fewer than five candles is a normal "no zones" outcome. Malformed candles
/// and bad configuration are rejected before any analysis runs.
///
/// The returned zones are sorted by `zone_low` descending (highest band
/// first), matching how a report lists levels from the top down.
pub fn detect_zones(
    series: &CandleSeries,
    config: &ZoneConfig,
) -> Result<Vec<Zone>, ZoneScoutError> {
    config.validate()?;
    series.validate()?;

    if series.len() < MIN_CANDLES_FOR_DETECTION {
        return Ok(Vec::new());
    }

    let mut zones: Vec<Zone> = find_pivots(series)
        .map(|pivot| {
            let mut zone = build_zone(&pivot, series);
            refine_zone(&mut zone, series);
            zone
        })
        .collect();

    #[cfg(debug_assertions)]
    log_stage(series, "refined candidates", zones.len());

    let threshold_pct = config.threshold_pct_for(series.key.timeframe);
    zones = merge_zones(zones, threshold_pct);

    #[cfg(debug_assertions)]
    log_stage(series, "after merging", zones.len());

    for zone in &mut zones {
        evaluate_breakout(zone, series);
    }
    if config.drop_broken {
        zones.retain(|zone| zone.is_active());
    }

    #[cfg(debug_assertions)]
    log_stage(series, "surviving", zones.len());

    zones.sort_by(|a, b| {
        b.zone_low
            .partial_cmp(&a.zone_low)
            .unwrap_or(Ordering::Equal)
    });
    Ok(zones)
}

#[cfg(debug_assertions)]
fn log_stage(series: &CandleSeries, stage: &str, count: usize) {
    if PRINT_PIPELINE_STAGES
        || (!PRINT_DETECTION_FOR_SYMBOL.is_empty()
            && series.key.symbol == PRINT_DETECTION_FOR_SYMBOL)
    {
        log::info!("{}: {} {} zones", series.key, count, stage);
    }
}

/// Run the pipeline once per configured timeframe and concatenate the
/// results, grouped in the configured timeframe order.
///
/// Each timeframe only reads its own series and builds its own zone set, so
/// the runs fan out in parallel and join at the final concatenation. Zones
/// are never merged across timeframes; the timeframe tag on each zone keeps
/// the groups distinguishable downstream. A timeframe with no series in the
/// collection simply contributes nothing.
pub fn detect_zones_multi(
    collection: &SeriesCollection,
    symbol: &str,
    config: &ZoneConfig,
) -> Result<Vec<Zone>, ZoneScoutError> {
    config.validate()?;

    let per_timeframe: Result<Vec<Vec<Zone>>, ZoneScoutError> = config
        .timeframes
        .par_iter()
        .map(|&timeframe| match collection.find(symbol, timeframe) {
            Some(series) => detect_zones(series, config),
            None => Ok(Vec::new()),
        })
        .collect();

    Ok(per_timeframe?.concat())
}

// ============================================================================
// Nearest-zone selection for reporting
// ============================================================================

/// The handful of zones a report cares about: closest resistance bands at or
/// above the price, closest support bands at or below it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearestZones {
    pub resistance: Vec<Zone>,
    pub support: Vec<Zone>,
}

/// Pick the nearest zones on each side of `current_price`, nearest first.
/// A band containing the price counts on its own side.
pub fn nearest_zones(
    zones: &[Zone],
    current_price: f64,
    max_resistance: usize,
    max_support: usize,
) -> NearestZones {
    let mut resistance: Vec<Zone> = zones
        .iter()
        .filter(|z| z.kind == ZoneKind::Resistance && z.zone_high > current_price)
        .cloned()
        .collect();
    let mut support: Vec<Zone> = zones
        .iter()
        .filter(|z| z.kind == ZoneKind::Support && z.zone_low < current_price)
        .cloned()
        .collect();

    resistance.sort_by(|a, b| a.zone_low.partial_cmp(&b.zone_low).unwrap_or(Ordering::Equal));
    support.sort_by(|a, b| b.zone_high.partial_cmp(&a.zone_high).unwrap_or(Ordering::Equal));

    resistance.truncate(max_resistance);
    support.truncate(max_support);

    NearestZones {
        resistance,
        support,
    }
}
