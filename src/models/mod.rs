pub mod timeseries;
pub mod zone;

pub use timeseries::{CandleSeries, SeriesCollection, SeriesKey, find_matching_series};
pub use zone::{Zone, ZoneKind, ZoneStatus};
