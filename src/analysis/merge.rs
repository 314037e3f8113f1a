use itertools::Itertools;

use crate::models::zone::Zone;

#[allow(unused_imports)]
use crate::config::PRINT_MERGE_EVENTS;

/// Relative gap between two bands: distance between their closest bounds
/// (zero when they overlap), as a fraction of the wider zone's midpoint.
fn relative_gap(a: &Zone, b: &Zone) -> f64 {
    let gap = (a.zone_low.max(b.zone_low) - a.zone_high.min(b.zone_high)).max(0.0);
    let reference = if a.width() >= b.width() {
        a.midpoint()
    } else {
        b.midpoint()
    };
    gap / reference
}

fn should_merge(a: &Zone, b: &Zone, threshold_fraction: f64) -> bool {
    // Support and resistance represent opposite market structures and are
    // never merged with each other.
    a.kind == b.kind && relative_gap(a, b) < threshold_fraction
}

fn merge_pair(a: &Zone, b: &Zone) -> Zone {
    // Union envelope. The origin pivot follows the fresher confirmation.
    let recent = if a.origin_pivot_index >= b.origin_pivot_index {
        a
    } else {
        b
    };
    Zone {
        kind: a.kind,
        zone_low: a.zone_low.min(b.zone_low),
        zone_high: a.zone_high.max(b.zone_high),
        origin_pivot_index: recent.origin_pivot_index,
        origin_time_ms: recent.origin_time_ms,
        timeframe: a.timeframe,
        status: recent.status,
        strength: a.strength + b.strength,
        touches: a.touches + b.touches,
    }
}

/// Consolidate same-kind zones whose bands sit within `threshold_pct`
/// (percent of price) of each other.
///
/// Repeats pairwise merging until no pair qualifies, so chains collapse
/// transitively: A near B near C becomes one envelope even when A and C are
/// not near each other. Each merge shrinks the set by one, so the loop
/// terminates; the result is a fixed point of the merge step.
pub fn merge_zones(mut zones: Vec<Zone>, threshold_pct: f64) -> Vec<Zone> {
    let threshold_fraction = threshold_pct / 100.0;

    loop {
        let next_pair = zones
            .iter()
            .enumerate()
            .tuple_combinations()
            .find(|&((_, a), (_, b))| should_merge(a, b, threshold_fraction))
            .map(|((i, _), (j, _))| (i, j));

        let Some((i, j)) = next_pair else {
            return zones;
        };

        let absorbed = zones.swap_remove(j);
        let merged = merge_pair(&zones[i], &absorbed);

        #[cfg(debug_assertions)]
        if PRINT_MERGE_EVENTS {
            log::info!(
                "Merged {} zones [{:.4}, {:.4}] + [{:.4}, {:.4}] -> [{:.4}, {:.4}]",
                merged.kind,
                zones[i].zone_low,
                zones[i].zone_high,
                absorbed.zone_low,
                absorbed.zone_high,
                merged.zone_low,
                merged.zone_high,
            );
        }

        zones[i] = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timeframe::Timeframe;
    use crate::models::zone::{ZoneKind, ZoneStatus};

    fn zone(kind: ZoneKind, low: f64, high: f64, pivot_idx: usize) -> Zone {
        Zone {
            kind,
            zone_low: low,
            zone_high: high,
            origin_pivot_index: pivot_idx,
            origin_time_ms: pivot_idx as i64 * 3_600_000,
            timeframe: Timeframe::H1,
            status: ZoneStatus::Active,
            strength: 1,
            touches: 0,
        }
    }

    #[test]
    fn test_well_separated_zones_untouched() {
        let zones = vec![
            zone(ZoneKind::Support, 90.0, 91.0, 5),
            zone(ZoneKind::Support, 80.0, 81.0, 9),
        ];
        let merged = merge_zones(zones, 0.5);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_opposite_kinds_never_merge() {
        let zones = vec![
            zone(ZoneKind::Support, 100.0, 101.0, 5),
            zone(ZoneKind::Resistance, 101.1, 102.0, 9),
        ];
        assert_eq!(merge_zones(zones, 0.5).len(), 2);
    }

    #[test]
    fn test_overlapping_zones_merge_to_envelope() {
        let zones = vec![
            zone(ZoneKind::Support, 90.0, 92.0, 5),
            zone(ZoneKind::Support, 91.0, 93.0, 9),
        ];
        let merged = merge_zones(zones, 0.5);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].zone_low, 90.0);
        assert_eq!(merged[0].zone_high, 93.0);
        assert_eq!(merged[0].origin_pivot_index, 9, "freshest pivot wins");
        assert_eq!(merged[0].strength, 2);
    }

    #[test]
    fn test_chain_collapses_transitively() {
        // A near B, B near C, A not near C: one pass to fixed point still
        // collapses all three.
        let zones = vec![
            zone(ZoneKind::Support, 100.0, 101.0, 5),
            zone(ZoneKind::Support, 101.3, 101.8, 9),
            zone(ZoneKind::Support, 102.1, 102.6, 13),
        ];
        let merged = merge_zones(zones, 0.5);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].zone_low, 100.0);
        assert_eq!(merged[0].zone_high, 102.6);
        assert_eq!(merged[0].strength, 3);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let zones = vec![
            zone(ZoneKind::Support, 100.0, 101.0, 5),
            zone(ZoneKind::Support, 101.3, 101.8, 9),
            zone(ZoneKind::Resistance, 110.0, 111.0, 7),
            zone(ZoneKind::Support, 120.0, 121.0, 11),
        ];
        let once = merge_zones(zones, 0.5);
        let twice = merge_zones(once.clone(), 0.5);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_gap_just_beyond_threshold_does_not_merge() {
        // Wider zone midpoint ~100.5, so 0.5% is ~0.5025. A gap of 0.6 stays
        // separate.
        let zones = vec![
            zone(ZoneKind::Support, 100.0, 101.0, 5),
            zone(ZoneKind::Support, 101.6, 101.9, 9),
        ];
        assert_eq!(merge_zones(zones, 0.5).len(), 2);
    }
}
