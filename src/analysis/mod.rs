pub mod breakout;
pub mod detector;
pub mod merge;
pub mod pivots;
pub mod refine;
pub mod zone_builder;

pub use breakout::evaluate_breakout;
pub use detector::{NearestZones, detect_zones, detect_zones_multi, nearest_zones};
pub use merge::merge_zones;
pub use pivots::{Pivot, PivotKind, find_pivots};
pub use refine::refine_zone;
pub use zone_builder::build_zone;
