/// Errors the engine can reject input with. Anything else (no pivots, all
/// zones broken, short series) is a normal empty outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneScoutError {
    /// Malformed candle data: non-monotonic open times or an inverted bar.
    InvalidCandle {
        symbol: String,
        index: usize,
        reason: String,
    },
    /// Rejected configuration (bad threshold, empty timeframe set, ...).
    Config(String),
}

impl std::fmt::Display for ZoneScoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneScoutError::InvalidCandle {
                symbol,
                index,
                reason,
            } => {
                write!(f, "invalid candle for {} at index {}: {}", symbol, index, reason)
            }
            ZoneScoutError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ZoneScoutError {}
