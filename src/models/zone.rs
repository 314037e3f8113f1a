use serde::{Deserialize, Serialize};

use crate::domain::timeframe::Timeframe;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ZoneKind {
    Support,
    Resistance,
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ZoneKind::Support => write!(f, "support"),
            ZoneKind::Resistance => write!(f, "resistance"),
        }
    }
}

/// Status only ever moves Active -> Broken. A broken zone is never
/// re-activated, even when later candles trade back inside it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ZoneStatus {
    Active,
    Broken,
}

/// A price band around a rejected extreme: outer bound at the wick, inner
/// bound at the body edge (possibly tightened later by refinement).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub zone_low: f64,
    pub zone_high: f64,
    /// Index of the pivot candle this zone was built from. After a merge,
    /// the most recent constituent pivot.
    pub origin_pivot_index: usize,
    pub origin_time_ms: i64,
    pub timeframe: Timeframe,
    pub status: ZoneStatus,
    /// How many pivots this zone has absorbed (1 until merged).
    pub strength: u32,
    /// Candles after the origin that traded into the band without closing
    /// beyond the outer bound.
    pub touches: u32,
}

impl Zone {
    pub fn width(&self) -> f64 {
        self.zone_high - self.zone_low
    }

    pub fn midpoint(&self) -> f64 {
        (self.zone_high + self.zone_low) / 2.0
    }

    pub fn is_active(&self) -> bool {
        self.status == ZoneStatus::Active
    }

    /// The bound price must cross to invalidate the zone.
    pub fn outer_bound(&self) -> f64 {
        match self.kind {
            ZoneKind::Support => self.zone_low,
            ZoneKind::Resistance => self.zone_high,
        }
    }

    /// The bound refinement is allowed to move.
    pub fn inner_bound(&self) -> f64 {
        match self.kind {
            ZoneKind::Support => self.zone_high,
            ZoneKind::Resistance => self.zone_low,
        }
    }

    /// Whether `price` sits inside the band, widened by `tolerance_pct` of
    /// the band height on each side.
    pub fn contains_price(&self, price: f64, tolerance_pct: f64) -> bool {
        let margin = self.width() * tolerance_pct;
        (self.zone_low - margin) <= price && price <= (self.zone_high + margin)
    }

    /// Signed percent distance from `price` to the zone's near edge.
    /// Positive means the zone sits above the price.
    pub fn distance_pct(&self, price: f64) -> f64 {
        match self.kind {
            ZoneKind::Resistance => (self.zone_low - price) / price * 100.0,
            ZoneKind::Support => (self.zone_high - price) / price * 100.0,
        }
    }
}
