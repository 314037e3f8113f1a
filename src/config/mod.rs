//! Configuration module for the zone-scout application.

pub mod analysis;
pub mod persistence;

mod debug; // Private; use the re-exports so call sites read crate::config::PRINT_*
pub use debug::{PRINT_DETECTION_FOR_SYMBOL, PRINT_MERGE_EVENTS, PRINT_PIPELINE_STAGES};

// Re-export commonly used items
pub use analysis::{
    DEFAULT_MAX_RESISTANCE, DEFAULT_MAX_SUPPORT, DEFAULT_PROXIMITY_THRESHOLD_PCT,
    DEFAULT_TIMEFRAMES, MIN_CANDLES_FOR_DETECTION, ZoneConfig,
};
pub use persistence::{CANDLE_CACHE_PATH, CANDLE_CACHE_VERSION, candle_cache_filename};
