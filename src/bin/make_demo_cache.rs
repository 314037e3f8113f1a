use anyhow::{Context, Result};

use zone_scout::config::{CANDLE_CACHE_VERSION, DEFAULT_TIMEFRAMES};
use zone_scout::data::cache_file::CacheFile;
use zone_scout::domain::candle::Candle;
use zone_scout::domain::timeframe::Timeframe;
use zone_scout::models::timeseries::{CandleSeries, SeriesCollection, SeriesKey};

const DEMO_SYMBOL: &str = "DEMOUSDT";
const DEMO_CANDLES_PER_SERIES: usize = 480;

// 2025-01-01 00:00 UTC
const DEMO_FIRST_OPEN_TIME_MS: i64 = 1_735_689_600_000;

fn main() -> Result<()> {
    build_demo_cache()
}

fn build_demo_cache() -> Result<()> {
    let mut collection = SeriesCollection::default();
    for (phase, &timeframe) in DEFAULT_TIMEFRAMES.iter().enumerate() {
        let series = synth_series(timeframe, phase as f64);
        series
            .validate()
            .with_context(|| format!("Generated series for {} failed validation", timeframe))?;
        collection.series_data.push(series);
    }

    let cache = CacheFile::new(collection, CANDLE_CACHE_VERSION);
    let output_path = CacheFile::default_cache_path(DEMO_SYMBOL);
    cache.save_to_path(&output_path)?;

    println!(
        "Demo cache written to {:?} with {} series of {} candles.",
        output_path,
        cache.data.series_data.len(),
        DEMO_CANDLES_PER_SERIES
    );
    Ok(())
}

/// Deterministic swingy price path: a slow cycle layered with two faster
/// ones, so every timeframe produces a handful of fractal pivots and at
/// least some zones survive breakout. No RNG, so repeated runs write
/// byte-identical candles.
fn synth_price(i: f64, phase: f64) -> f64 {
    100.0 + 9.0 * (i * 0.050 + phase).sin() + 3.0 * (i * 0.210 + phase * 2.0).sin()
        + 0.8 * (i * 0.970 + phase).sin()
}

fn synth_series(timeframe: Timeframe, phase: f64) -> CandleSeries {
    let mut series = CandleSeries::new(SeriesKey {
        symbol: DEMO_SYMBOL.to_string(),
        timeframe,
    });

    for i in 0..DEMO_CANDLES_PER_SERIES {
        let open = synth_price(i as f64, phase);
        let close = synth_price(i as f64 + 1.0, phase);
        let wick = 0.25 + 0.2 * ((i as f64 * 0.77 + phase).sin().abs());
        let candle = Candle::new(
            DEMO_FIRST_OPEN_TIME_MS + i as i64 * timeframe.interval_ms(),
            open,
            open.max(close) + wick,
            open.min(close) - wick,
            close,
        );
        series.push_candle(&candle);
    }
    series
}
