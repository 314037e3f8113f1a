use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZoneScoutError;
use crate::utils::TimeUtils;

/// Candle aggregation period. Each timeframe is processed as its own
/// independent series; zones never mix across timeframes.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum Timeframe {
    M15,
    M30,
    H1,
    H2,
    H4,
    H6,
    H8,
    H12,
    D1,
}

impl Timeframe {
    /// Width of one candle in milliseconds.
    pub fn interval_ms(&self) -> i64 {
        match self {
            Timeframe::M15 => TimeUtils::MS_IN_15_MIN,
            Timeframe::M30 => TimeUtils::MS_IN_30_MIN,
            Timeframe::H1 => TimeUtils::MS_IN_H,
            Timeframe::H2 => TimeUtils::MS_IN_2_H,
            Timeframe::H4 => TimeUtils::MS_IN_4_H,
            Timeframe::H6 => TimeUtils::MS_IN_6_H,
            Timeframe::H8 => TimeUtils::MS_IN_8_H,
            Timeframe::H12 => TimeUtils::MS_IN_12_H,
            Timeframe::D1 => TimeUtils::MS_IN_D,
        }
    }

    // Binance-style shorthand, also the accepted parse form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H2 => "2h",
            Timeframe::H4 => "4h",
            Timeframe::H6 => "6h",
            Timeframe::H8 => "8h",
            Timeframe::H12 => "12h",
            Timeframe::D1 => "1d",
        }
    }
}

impl FromStr for Timeframe {
    type Err = ZoneScoutError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "15m" => Ok(Timeframe::M15),
            "30m" => Ok(Timeframe::M30),
            "1h" => Ok(Timeframe::H1),
            "2h" => Ok(Timeframe::H2),
            "4h" => Ok(Timeframe::H4),
            "6h" => Ok(Timeframe::H6),
            "8h" => Ok(Timeframe::H8),
            "12h" => Ok(Timeframe::H12),
            "1d" => Ok(Timeframe::D1),
            other => Err(ZoneScoutError::Config(format!(
                "unsupported timeframe '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_display_round_trip() {
        for tf in Timeframe::iter() {
            let parsed = Timeframe::from_str(tf.as_str()).expect("shorthand should parse");
            assert_eq!(parsed, tf);
        }
    }

    #[test]
    fn test_unknown_timeframe_is_config_error() {
        let err = Timeframe::from_str("7h").unwrap_err();
        assert!(matches!(err, ZoneScoutError::Config(_)));
    }

    #[test]
    fn test_interval_widths_ascend() {
        let widths: Vec<i64> = Timeframe::iter().map(|tf| tf.interval_ms()).collect();
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
    }
}
