//! Zone detection configuration

use crate::domain::timeframe::Timeframe;
use crate::error::ZoneScoutError;

/// Pivot detection needs two candles either side of the pivot candle, so
/// anything shorter yields no zones (an empty result, never an error).
pub const MIN_CANDLES_FOR_DETECTION: usize = 5;

/// Default proximity threshold for merging, in percent of price.
pub const DEFAULT_PROXIMITY_THRESHOLD_PCT: f64 = 0.5;

/// Timeframes analysed when the caller doesn't pick their own set.
pub const DEFAULT_TIMEFRAMES: [Timeframe; 3] = [Timeframe::H1, Timeframe::H4, Timeframe::H12];

/// How many nearest zones the selection helper keeps per side.
pub const DEFAULT_MAX_RESISTANCE: usize = 3;
pub const DEFAULT_MAX_SUPPORT: usize = 4;

/// Everything a single pipeline invocation needs. Passed explicitly into
/// each run so per-timeframe pipelines stay independent and testable; there
/// is no ambient configuration state.
#[derive(Debug, Clone)]
pub struct ZoneConfig {
    /// Merge proximity threshold as a percent of price (0.5 means 0.5%).
    pub proximity_threshold_pct: f64,
    /// Per-timeframe threshold overrides; unlisted timeframes use the base.
    pub threshold_overrides: Vec<(Timeframe, f64)>,
    /// Timeframes to run the pipeline on.
    pub timeframes: Vec<Timeframe>,
    /// Remove broken zones from the final output (true), or keep them
    /// tagged `Broken` for recently-invalidated-level displays (false).
    pub drop_broken: bool,
    /// Caps for the nearest-zone selection helper.
    pub max_resistance: usize,
    pub max_support: usize,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        ZoneConfig {
            proximity_threshold_pct: DEFAULT_PROXIMITY_THRESHOLD_PCT,
            threshold_overrides: Vec::new(),
            timeframes: DEFAULT_TIMEFRAMES.to_vec(),
            drop_broken: true,
            max_resistance: DEFAULT_MAX_RESISTANCE,
            max_support: DEFAULT_MAX_SUPPORT,
        }
    }
}

impl ZoneConfig {
    /// Effective merge threshold for one timeframe.
    pub fn threshold_pct_for(&self, timeframe: Timeframe) -> f64 {
        self.threshold_overrides
            .iter()
            .find(|(tf, _)| *tf == timeframe)
            .map(|(_, pct)| *pct)
            .unwrap_or(self.proximity_threshold_pct)
    }

    /// Fail fast before any candle is touched.
    pub fn validate(&self) -> Result<(), ZoneScoutError> {
        if self.proximity_threshold_pct <= 0.0 {
            return Err(ZoneScoutError::Config(format!(
                "proximity threshold must be positive, got {}",
                self.proximity_threshold_pct
            )));
        }
        for (tf, pct) in &self.threshold_overrides {
            if *pct <= 0.0 {
                return Err(ZoneScoutError::Config(format!(
                    "threshold override for {} must be positive, got {}",
                    tf, pct
                )));
            }
        }
        if self.timeframes.is_empty() {
            return Err(ZoneScoutError::Config(
                "at least one timeframe is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ZoneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let config = ZoneConfig {
            proximity_threshold_pct: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ZoneScoutError::Config(_))
        ));
    }

    #[test]
    fn test_empty_timeframes_rejected() {
        let config = ZoneConfig {
            timeframes: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_override_lookup() {
        let config = ZoneConfig {
            threshold_overrides: vec![(Timeframe::H12, 1.0)],
            ..Default::default()
        };
        assert_eq!(config.threshold_pct_for(Timeframe::H12), 1.0);
        assert_eq!(
            config.threshold_pct_for(Timeframe::H1),
            DEFAULT_PROXIMITY_THRESHOLD_PCT
        );
    }
}
