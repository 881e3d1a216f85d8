//! Unit tests for eco-incident.

use eco_core::{time::HOUR_MS, ClusterId, GeoPoint, Timestamp};

use crate::{MarkOrigin, MarkStore};

// ── Helpers ───────────────────────────────────────────────────────────────────

const NOW: Timestamp = Timestamp(10 * HOUR_MS);

fn p(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon)
}

/// Store with one tap per `(point, age_ms)` pair, in order.
fn store_of(taps: &[(GeoPoint, u64)]) -> MarkStore {
    let mut store = MarkStore::new();
    for &(point, age) in taps {
        store.push(point, NOW.minus_ms(age), MarkOrigin::Tap, None);
    }
    store
}

/// Three taps within ~250 m of each other near Colombo Fort.
fn tight_group() -> [GeoPoint; 3] {
    [p(6.9000, 79.8600), p(6.9010, 79.8610), p(6.9020, 79.8600)]
}

// ── MarkStore ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;
    use eco_core::MarkId;

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let mut s = MarkStore::new();
        let a = s.push(p(0.0, 0.0), NOW, MarkOrigin::Tap, None);
        let b = s.push(p(0.0, 0.0), NOW, MarkOrigin::Tap, None);
        assert_eq!((a, b), (MarkId(0), MarkId(1)));

        assert!(s.remove(a).is_some());
        assert!(s.remove(a).is_none());
        let c = s.push(p(0.0, 0.0), NOW, MarkOrigin::Tap, None);
        assert_eq!(c, MarkId(2));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn preserves_insertion_order() {
        let s = store_of(&[(p(1.0, 1.0), 0), (p(2.0, 2.0), 0), (p(3.0, 3.0), 0)]);
        let lats: Vec<f64> = s.iter().map(|m| m.point.lat).collect();
        assert_eq!(lats, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn centroids_expire_after_their_cycle() {
        let mut s = MarkStore::new();
        s.push(p(0.0, 0.0), NOW, MarkOrigin::Tap, None);
        let origin = MarkOrigin::Centroid { cluster: ClusterId(0), live_until_cycle: 1 };
        let centroid = s.push(p(0.0, 0.0), NOW, origin, None);

        assert!(s.drop_expired(1).is_empty());
        assert_eq!(s.len(), 2);

        let dropped = s.drop_expired(2);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].id, centroid);
        assert!(s.get(centroid).is_none());
        // Taps never expire by cycle.
        assert_eq!(s.len(), 1);
    }
}

// ── Recency ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod recency {
    use super::*;

    #[test]
    fn window_is_strict() {
        let s = store_of(&[(p(0.0, 0.0), HOUR_MS - 1), (p(0.0, 0.0), HOUR_MS)]);
        let marks = s.as_slice();
        assert!(marks[0].is_recent(NOW, HOUR_MS));
        assert!(!marks[1].is_recent(NOW, HOUR_MS));
    }

    #[test]
    fn future_marks_are_fresh() {
        let mut s = MarkStore::new();
        s.push(p(0.0, 0.0), NOW.plus_ms(5_000), MarkOrigin::Tap, None);
        assert!(s.as_slice()[0].is_recent(NOW, HOUR_MS));
    }
}

// ── Clustering ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clustering {
    use super::*;
    use crate::{find_clusters, ClusterParams, ClusterRadius, IncidentError};

    #[test]
    fn three_close_fresh_taps_form_one_cluster() {
        let [a, b, c] = tight_group();
        let s = store_of(&[(a, 60_000), (b, 30_000), (c, 0)]);
        let clusters = find_clusters(s.as_slice(), NOW, &ClusterParams::default());

        assert_eq!(clusters.len(), 1);
        let cl = &clusters[0];
        assert_eq!(cl.id, ClusterId(0));
        assert_eq!(cl.len(), 3);

        // Members' box padded by 0.002°.
        assert!((cl.bbox.south - 6.898).abs() < 1e-9);
        assert!((cl.bbox.north - 6.904).abs() < 1e-9);
        assert!((cl.bbox.west - 79.858).abs() < 1e-9);
        assert!((cl.bbox.east - 79.863).abs() < 1e-9);
        for point in [a, b, c] {
            assert!(cl.bbox.contains(point));
        }

        assert!((cl.centroid.lat - 6.901).abs() < 1e-9);
        assert!((cl.centroid.lon - 79.860_333_333).abs() < 1e-6);
    }

    #[test]
    fn two_taps_do_not_qualify() {
        let [a, b, _] = tight_group();
        let s = store_of(&[(a, 0), (b, 0)]);
        assert!(find_clusters(s.as_slice(), NOW, &ClusterParams::default()).is_empty());
    }

    #[test]
    fn stale_taps_are_ignored() {
        let [a, b, c] = tight_group();
        // Two of three taps are older than an hour.
        let s = store_of(&[(a, 2 * HOUR_MS), (b, HOUR_MS), (c, 0)]);
        assert!(find_clusters(s.as_slice(), NOW, &ClusterParams::default()).is_empty());
    }

    #[test]
    fn stale_seed_does_not_start_a_cluster() {
        let [a, b, c] = tight_group();
        let s = store_of(&[(a, 2 * HOUR_MS), (b, 0), (c, 0)]);
        let params = ClusterParams { min_members: 2, ..ClusterParams::default() };
        let clusters = find_clusters(s.as_slice(), NOW, &params);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members, vec![s.as_slice()[1].id, s.as_slice()[2].id]);
    }

    #[test]
    fn far_taps_stay_out() {
        let [a, b, c] = tight_group();
        let far = p(6.0535, 80.2210);
        let s = store_of(&[(far, 0), (a, 0), (b, 0), (c, 0)]);
        let clusters = find_clusters(s.as_slice(), NOW, &ClusterParams::default());
        assert_eq!(clusters.len(), 1);
        assert!(!clusters[0].members.contains(&s.as_slice()[0].id));
    }

    #[test]
    fn chain_clusters_around_its_middle() {
        // A–B and B–C are 0.004° apart, A–C is 0.008°.
        let s = store_of(&[(p(6.900, 79.86), 0), (p(6.904, 79.86), 0), (p(6.908, 79.86), 0)]);
        let clusters = find_clusters(s.as_slice(), NOW, &ClusterParams::default());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }

    #[test]
    fn separate_groups_in_store_order() {
        let [a, b, c] = tight_group();
        let shift = |q: GeoPoint| p(q.lat - 0.8, q.lon + 0.3);
        let s = store_of(&[
            (shift(a), 0), (a, 0), (shift(b), 0), (b, 0), (shift(c), 0), (c, 0),
        ]);
        let clusters = find_clusters(s.as_slice(), NOW, &ClusterParams::default());
        assert_eq!(clusters.len(), 2);
        // The shifted group's first tap comes first in the store.
        assert!(clusters[0].bbox.contains(shift(a)));
        assert!(clusters[1].bbox.contains(a));
        assert_eq!(clusters[1].id, ClusterId(1));
    }

    #[test]
    fn metre_radius_uses_great_circle_distance() {
        // 0.001° ≈ 111 m here; the diagonal pair is ≈ 157 m apart.
        let taps = [(p(6.900, 79.860), 0), (p(6.901, 79.860), 0), (p(6.900, 79.861), 0)];
        let s = store_of(&taps);

        let wide = ClusterParams { radius: ClusterRadius::Meters(500.0), ..ClusterParams::default() };
        assert_eq!(find_clusters(s.as_slice(), NOW, &wide).len(), 1);

        let narrow = ClusterParams { radius: ClusterRadius::Meters(100.0), ..ClusterParams::default() };
        assert!(find_clusters(s.as_slice(), NOW, &narrow).is_empty());
    }

    #[test]
    fn validation() {
        assert!(ClusterParams::default().validate().is_ok());

        let bad = ClusterParams { radius: ClusterRadius::Degrees(0.0), ..ClusterParams::default() };
        assert_eq!(bad.validate(), Err(IncidentError::InvalidRadius(0.0)));

        let bad = ClusterParams { bbox_pad_deg: -1.0, ..ClusterParams::default() };
        assert_eq!(bad.validate(), Err(IncidentError::InvalidPadding(-1.0)));

        let bad = ClusterParams { min_members: 0, ..ClusterParams::default() };
        assert_eq!(bad.validate(), Err(IncidentError::ZeroMinMembers));

        let bad = ClusterParams { recency_ms: 0, ..ClusterParams::default() };
        assert_eq!(bad.validate(), Err(IncidentError::ZeroRecency));
    }
}

// ── TapTally ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tally {
    use super::*;
    use crate::TapTally;

    #[test]
    fn counts_per_rounded_coordinate() {
        let mut t = TapTally::new();
        assert_eq!(t.record(p(6.9000001, 79.86)), 1);
        // Same key at six decimals.
        assert_eq!(t.record(p(6.9000004, 79.86)), 2);
        // Different sixth decimal.
        assert_eq!(t.record(p(6.900002, 79.86)), 1);

        assert_eq!(t.len(), 2);
        assert_eq!(t.count(p(6.9, 79.86)), 2);
        assert_eq!(t.max_count(), 2);
        assert!(!t.any_at_least(3));

        t.record(p(6.9, 79.86));
        assert!(t.any_at_least(3));
    }

    #[test]
    fn empty_tally() {
        let t = TapTally::default();
        assert!(t.is_empty());
        assert_eq!(t.count(p(0.0, 0.0)), 0);
        assert!(!t.any_at_least(1));
    }
}
