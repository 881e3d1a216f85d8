//! Unit tests for eco-core primitives.

#[cfg(test)]
mod ids {
    use crate::{MarkId, MarkerId, RequestId};

    #[test]
    fn next_is_sequential() {
        assert_eq!(MarkId(0).next(), MarkId(1));
        assert_eq!(RequestId(41).next(), RequestId(42));
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(MarkerId::default(), MarkerId::INVALID);
        assert!(!MarkerId::default().is_valid());
        assert!(MarkerId(3).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(MarkId(7).to_string(), "MarkId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(6.92708, 79.86124);
        assert!(p.distance_m(p) < 0.01);
        assert_eq!(p.degree_distance(p), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(6.0, 80.0);
        let b = GeoPoint::new(7.0, 80.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn degree_distance_is_flat() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.003, 0.004);
        assert!((a.degree_distance(b) - 0.005).abs() < 1e-12);
    }

    #[test]
    fn centroid_of_triangle() {
        let c = GeoPoint::centroid(&[
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(3.0, 0.0),
            GeoPoint::new(0.0, 3.0),
        ])
        .unwrap();
        assert!((c.lat - 1.0).abs() < 1e-12);
        assert!((c.lon - 1.0).abs() < 1e-12);
        assert!(GeoPoint::centroid(&[]).is_none());
    }
}

#[cfg(test)]
mod bbox {
    use crate::{BoundingBox, GeoPoint};

    #[test]
    fn new_normalises_corners() {
        let b = BoundingBox::new(GeoPoint::new(2.0, 5.0), GeoPoint::new(1.0, 4.0));
        assert_eq!(b.south, 1.0);
        assert_eq!(b.north, 2.0);
        assert_eq!(b.west, 4.0);
        assert_eq!(b.east, 5.0);
    }

    #[test]
    fn from_points_and_padding() {
        let pts = [
            GeoPoint::new(6.900, 79.850),
            GeoPoint::new(6.903, 79.854),
            GeoPoint::new(6.901, 79.852),
        ];
        let b = BoundingBox::from_points(&pts).unwrap().padded(0.002);
        assert!((b.south - 6.898).abs() < 1e-9);
        assert!((b.north - 6.905).abs() < 1e-9);
        assert!((b.west - 79.848).abs() < 1e-9);
        assert!((b.east - 79.856).abs() < 1e-9);
        assert!(pts.iter().all(|p| b.contains(*p)));
    }

    #[test]
    fn from_empty_is_none() {
        let none: [GeoPoint; 0] = [];
        assert!(BoundingBox::from_points(&none).is_none());
    }

    #[test]
    fn edges_are_inclusive() {
        let b = BoundingBox::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0));
        assert!(b.contains(GeoPoint::new(0.0, 1.0)));
        assert!(!b.contains(GeoPoint::new(1.0000001, 0.5)));
        assert_eq!(b.center(), GeoPoint::new(0.5, 0.5));
    }
}

#[cfg(test)]
mod time {
    use crate::Timestamp;
    use crate::time::HOUR_MS;

    #[test]
    fn since_saturates() {
        let t = Timestamp(10_000);
        assert_eq!(t.since(Timestamp(4_000)), 6_000);
        assert_eq!(Timestamp(4_000).since(t), 0);
    }

    #[test]
    fn hour_arithmetic() {
        let now = Timestamp(5 * HOUR_MS);
        assert_eq!(now.minus_ms(2 * HOUR_MS).since(Timestamp::EPOCH), 3 * HOUR_MS);
        assert_eq!(now.plus_ms(HOUR_MS), Timestamp(6 * HOUR_MS));
        assert_eq!(Timestamp(3).minus_ms(10), Timestamp::EPOCH);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(Timestamp::now().0 > 1_577_836_800_000);
    }
}

#[cfg(test)]
mod emissions {
    use crate::estimate_co2_kg;

    #[test]
    fn zero_trip_is_zero() {
        assert_eq!(estimate_co2_kg(0.0, 0.0, 0.0), 0.0);
        assert_eq!(estimate_co2_kg(0.0, 0.0, 250.0), 0.0);
    }

    #[test]
    fn colombo_to_galle() {
        // 120 km at 150 g/km = 18.0 kg, 120 min * 0.1 * 0.05 = 0.6 kg.
        let kg = estimate_co2_kg(120_000.0, 7_200.0, 150.0);
        assert!((kg - 18.6).abs() < 1e-9, "got {kg}");
    }

    #[test]
    fn no_vehicle_counts_idle_only() {
        let kg = estimate_co2_kg(50_000.0, 3_600.0, 0.0);
        assert!((kg - 0.3).abs() < 1e-9);
    }

    #[test]
    fn monotonic_in_distance_and_duration() {
        let factor = 120.0;
        let mut prev = 0.0;
        for step in 0..50 {
            let d = step as f64 * 1_500.0;
            let kg = estimate_co2_kg(d, 600.0, factor);
            assert!(kg >= prev);
            prev = kg;
        }
        let mut prev = 0.0;
        for step in 0..50 {
            let t = step as f64 * 90.0;
            let kg = estimate_co2_kg(10_000.0, t, factor);
            assert!(kg >= prev);
            prev = kg;
        }
    }
}
