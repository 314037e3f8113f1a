// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{NearestZones, detect_zones, detect_zones_multi, find_pivots, nearest_zones};
pub use config::ZoneConfig;
pub use data::CacheFile;
pub use domain::{Candle, Timeframe};
pub use error::ZoneScoutError;
pub use models::{CandleSeries, SeriesCollection, SeriesKey, Zone, ZoneKind, ZoneStatus};

// CLI argument parsing
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Instrument symbol to analyse
    #[arg(long, default_value = "DEMOUSDT")]
    pub symbol: String,

    /// Timeframe to analyse; repeat for several (defaults to 1h, 4h, 12h)
    #[arg(long = "timeframe")]
    pub timeframes: Vec<String>,

    /// Merge proximity threshold in percent of price
    #[arg(long)]
    pub threshold_pct: Option<f64>,

    /// Keep broken zones in the output (tagged) instead of dropping them
    #[arg(long, default_value_t = false)]
    pub keep_broken: bool,

    /// Emit the zone list as JSON instead of the text report
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Candle cache file to load (defaults to the per-symbol cache path)
    #[arg(long)]
    pub cache_path: Option<PathBuf>,
}

impl Cli {
    /// Translate CLI flags into an engine configuration, failing fast on
    /// unknown timeframes or a bad threshold before any data is loaded.
    pub fn to_zone_config(&self) -> Result<ZoneConfig, ZoneScoutError> {
        let mut config = ZoneConfig {
            drop_broken: !self.keep_broken,
            ..Default::default()
        };
        if !self.timeframes.is_empty() {
            config.timeframes = self
                .timeframes
                .iter()
                .map(|text| Timeframe::from_str(text))
                .collect::<Result<Vec<_>, _>>()?;
        }
        if let Some(threshold_pct) = self.threshold_pct {
            config.proximity_threshold_pct = threshold_pct;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with(timeframes: &[&str], threshold_pct: Option<f64>) -> Cli {
        Cli {
            symbol: "DEMOUSDT".to_string(),
            timeframes: timeframes.iter().map(|s| s.to_string()).collect(),
            threshold_pct,
            keep_broken: false,
            json: false,
            cache_path: None,
        }
    }

    #[test]
    fn test_default_cli_maps_to_default_config() {
        let config = cli_with(&[], None).to_zone_config().unwrap();
        assert_eq!(config.timeframes, config::DEFAULT_TIMEFRAMES.to_vec());
        assert!(config.drop_broken);
    }

    #[test]
    fn test_unknown_timeframe_fails_fast() {
        let err = cli_with(&["1h", "5h"], None).to_zone_config().unwrap_err();
        assert!(matches!(err, ZoneScoutError::Config(_)));
    }

    #[test]
    fn test_bad_threshold_fails_fast() {
        let err = cli_with(&["1h"], Some(-0.5)).to_zone_config().unwrap_err();
        assert!(matches!(err, ZoneScoutError::Config(_)));
    }
}
