use anyhow::{Context, Result};
use clap::Parser;

use zone_scout::utils::time_utils::epoch_ms_to_utc;
use zone_scout::{
    CacheFile, Cli, SeriesCollection, Zone, ZoneConfig, ZoneStatus, detect_zones_multi,
    nearest_zones,
};

fn main() -> Result<()> {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Build + validate config before touching any data
    let config = args.to_zone_config()?;

    // D. Load candles
    let cache_path = args
        .cache_path
        .clone()
        .unwrap_or_else(|| CacheFile::default_cache_path(&args.symbol));
    let cache = CacheFile::load_from_path(&cache_path).with_context(|| {
        format!(
            "No candle cache at {:?}. Run `make_demo_cache` first, or point --cache-path at one.",
            cache_path
        )
    })?;
    log::info!(
        "Loaded {} series from {:?} (written {})",
        cache.data.series_data.len(),
        cache_path,
        epoch_ms_to_utc(cache.timestamp_ms)
    );

    // E. Detect zones across the configured timeframes
    let zones = detect_zones_multi(&cache.data, &args.symbol, &config)?;

    // F. Report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&zones)?);
        return Ok(());
    }
    print_report(&cache.data, &args.symbol, &config, &zones);
    Ok(())
}

fn print_report(
    collection: &SeriesCollection,
    symbol: &str,
    config: &ZoneConfig,
    zones: &[Zone],
) {
    println!("Key levels for {}", symbol);

    for &timeframe in &config.timeframes {
        let group: Vec<&Zone> = zones.iter().filter(|z| z.timeframe == timeframe).collect();
        println!("\n[{}] {} zone(s)", timeframe, group.len());
        for zone in group {
            println!("  {}", format_zone_line(zone));
        }
    }

    // Nearest-zone summary against the freshest close we have for the
    // first configured timeframe.
    let current_price = config
        .timeframes
        .first()
        .and_then(|&tf| collection.find(symbol, tf))
        .and_then(|series| series.last_close());
    let Some(current_price) = current_price else {
        return;
    };

    let nearest = nearest_zones(zones, current_price, config.max_resistance, config.max_support);
    println!("\nNearest to current price {:.4}:", current_price);
    for zone in nearest.resistance.iter().rev() {
        println!("  above {:+.2}%  {}", zone.distance_pct(current_price), format_zone_line(zone));
    }
    for zone in &nearest.support {
        println!("  below {:+.2}%  {}", zone.distance_pct(current_price), format_zone_line(zone));
    }
}

fn format_zone_line(zone: &Zone) -> String {
    let status = match zone.status {
        ZoneStatus::Active => "",
        ZoneStatus::Broken => "  [BROKEN]",
    };
    format!(
        "{:<10} {:>12.4} .. {:<12.4} strength {}  touches {}  since {}{}",
        zone.kind.to_string(),
        zone.zone_low,
        zone.zone_high,
        zone.strength,
        zone.touches,
        epoch_ms_to_utc(zone.origin_time_ms),
        status
    )
}
