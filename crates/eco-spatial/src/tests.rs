//! Unit tests for eco-spatial.
//!
//! Everything here runs offline; HTTP clients are exercised through their
//! body parsers only.

#[cfg(test)]
mod polyline {
    use eco_core::GeoPoint;

    use crate::polyline::{decode, decode_points, encode, Polyline, PolylineHeader};
    use crate::{PolylineError, ThirdDimension};

    /// Reference string and points from the format's published examples.
    const REFERENCE: &str = "BFoz5xJ67i1B1B7PzIhaxL7Y";

    fn reference_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(50.10228, 8.69821),
            GeoPoint::new(50.10201, 8.69567),
            GeoPoint::new(50.10063, 8.69150),
            GeoPoint::new(50.09878, 8.68752),
        ]
    }

    fn assert_close(a: &[GeoPoint], b: &[GeoPoint], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x.lat - y.lat).abs() <= tol, "{x} vs {y}");
            assert!((x.lon - y.lon).abs() <= tol, "{x} vs {y}");
        }
    }

    #[test]
    fn decodes_reference() {
        let line = decode(REFERENCE).unwrap();
        assert_eq!(line.header, PolylineHeader::new(5));
        assert!(line.third.is_empty());
        assert_close(&line.points, &reference_points(), 1e-9);
    }

    #[test]
    fn encodes_reference() {
        let raw = [
            GeoPoint::new(50.1022829, 8.6982122),
            GeoPoint::new(50.1020076, 8.6956695),
            GeoPoint::new(50.1006313, 8.6914960),
            GeoPoint::new(50.0987800, 8.6875156),
        ];
        assert_eq!(encode(&raw, 5).unwrap(), REFERENCE);
    }

    #[test]
    fn round_trip_within_precision() {
        let path = [
            GeoPoint::new(6.927079, 79.861244),
            GeoPoint::new(6.5854, 79.9607),
            GeoPoint::new(-33.868820, 151.209296),
            GeoPoint::new(0.0, 0.0),
        ];
        for precision in [5u8, 6, 7] {
            let encoded = encode(&path, precision).unwrap();
            let decoded = decode_points(&encoded).unwrap();
            let tol = 0.5 * 10f64.powi(-(precision as i32)) + 1e-12;
            assert_close(&decoded, &path, tol);
        }
    }

    #[test]
    fn third_dimension_round_trip() {
        let line = Polyline {
            header: PolylineHeader {
                precision:           5,
                third_dim:           ThirdDimension::Altitude,
                third_dim_precision: 0,
            },
            points: reference_points(),
            third:  vec![10.0, 20.0, 30.0, 40.0],
        };
        let encoded = line.encode().unwrap();
        assert_eq!(encoded, "BlBoz5xJ67i1BU1B7PUzIhaUxL7YU");
        assert_eq!(decode(&encoded).unwrap(), line);
    }

    #[test]
    fn empty_path_is_header_only() {
        let encoded = encode(&[], 5).unwrap();
        assert_eq!(encoded, "BF");
        assert!(decode_points(&encoded).unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            decode("BF!!"),
            Err(PolylineError::InvalidCharacter { ch: '!', offset: 2 })
        ));
        assert!(matches!(decode("CF"), Err(PolylineError::UnsupportedVersion(2))));
        // Latitude present, longitude missing.
        assert!(matches!(decode("BFoz5xJ"), Err(PolylineError::Truncated)));
        // Continuation flag on the last character.
        assert!(matches!(decode("BFo"), Err(PolylineError::Truncated)));
        assert!(matches!(decode(""), Err(PolylineError::Truncated)));
    }

    #[test]
    fn rejects_bad_headers() {
        assert!(matches!(
            encode(&[GeoPoint::new(0.0, 0.0)], 16),
            Err(PolylineError::PrecisionOutOfRange(16))
        ));
        // third_dim code 4 is reserved: header = 4 << 4 | 5 = 69 = "lC".
        assert!(matches!(decode("BlC"), Err(PolylineError::ReservedThirdDimension(4))));
    }

    #[test]
    fn rejects_mismatched_third_dimension() {
        let line = Polyline {
            header: PolylineHeader {
                precision:           5,
                third_dim:           ThirdDimension::Elevation,
                third_dim_precision: 1,
            },
            points: reference_points(),
            third:  vec![1.0],
        };
        assert!(matches!(
            line.encode(),
            Err(PolylineError::ThirdDimensionMismatch { points: 4, values: 1 })
        ));
    }

    #[test]
    fn rejects_non_finite() {
        let result = encode(&[GeoPoint::new(f64::NAN, 0.0)], 5);
        assert!(matches!(result, Err(PolylineError::NonFinite(_))));
    }
}

#[cfg(test)]
mod provider {
    use eco_core::{BoundingBox, GeoPoint};

    use crate::polyline::encode;
    use crate::{path_enters, CandidateRoute, RoutePreference};

    #[test]
    fn path_enters_checks_vertices() {
        let area = BoundingBox::new(GeoPoint::new(1.0, 1.0), GeoPoint::new(2.0, 2.0));
        let through = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.5, 1.5), GeoPoint::new(3.0, 3.0)];
        let around  = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 3.0), GeoPoint::new(3.0, 3.0)];
        assert!(path_enters(&through, &area));
        assert!(!path_enters(&around, &area));
        assert!(!path_enters(&[], &area));
    }

    #[test]
    fn candidate_decodes_its_polyline() {
        let path = [GeoPoint::new(6.9, 79.8), GeoPoint::new(6.5, 80.0)];
        let route = CandidateRoute::new(encode(&path, 5).unwrap(), 50_000.0, 3_000.0);
        assert_eq!(route.points().unwrap().len(), 2);

        let area = BoundingBox::new(GeoPoint::new(6.4, 79.9), GeoPoint::new(6.6, 80.1));
        assert!(route.enters(&area).unwrap());
    }

    #[test]
    fn candidate_with_garbage_polyline_errors() {
        let route = CandidateRoute::new("not a polyline", 1.0, 1.0);
        assert!(route.points().is_err());
    }

    #[test]
    fn preference_from_flag() {
        assert_eq!(RoutePreference::from_prefer_shortest(true), RoutePreference::Shortest);
        assert_eq!(RoutePreference::from_prefer_shortest(false), RoutePreference::Fastest);
    }
}

#[cfg(test)]
mod stub {
    use eco_core::{BoundingBox, GeoPoint};

    use crate::{
        CandidateRoute, Geocoder, RoutePreference, RouteRequest, RoutingProvider, SpatialError,
        StaticGeocoder, StaticRouter,
    };

    fn request(avoid: Option<BoundingBox>, alternatives: u8) -> RouteRequest {
        RouteRequest {
            origin:       GeoPoint::new(6.92708, 79.86124),
            destination:  GeoPoint::new(6.0535, 80.2210),
            avoid,
            preference:   RoutePreference::Fastest,
            alternatives,
        }
    }

    #[test]
    fn geocoder_is_case_insensitive() {
        let g = StaticGeocoder::new().with_place("Colombo, Sri Lanka", GeoPoint::new(6.92708, 79.86124));
        let hits = g.geocode("  colombo, SRI LANKA ").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "Colombo, Sri Lanka");
        assert!(g.geocode("Atlantis").unwrap().is_empty());
        assert_eq!(g.queries().len(), 2);
    }

    #[test]
    fn router_truncates_to_alternatives() {
        let r = StaticRouter::new(vec![
            CandidateRoute::new("a", 1.0, 1.0),
            CandidateRoute::new("b", 2.0, 2.0),
            CandidateRoute::new("c", 3.0, 3.0),
        ]);
        assert_eq!(r.routes(&request(None, 0)).unwrap().len(), 1);
        assert_eq!(r.routes(&request(None, 2)).unwrap().len(), 3);
        assert_eq!(r.requests().len(), 2);
    }

    #[test]
    fn router_switches_list_when_avoiding() {
        let area = BoundingBox::new(GeoPoint::new(6.5, 80.0), GeoPoint::new(6.6, 80.1));
        let r = StaticRouter::new(vec![CandidateRoute::new("direct", 1.0, 1.0)])
            .with_avoiding(vec![CandidateRoute::new("detour", 2.0, 2.0)]);
        assert_eq!(r.routes(&request(None, 2)).unwrap()[0].polyline, "direct");
        assert_eq!(r.routes(&request(Some(area), 2)).unwrap()[0].polyline, "detour");
        assert_eq!(r.requests()[1].avoid, Some(area));
    }

    #[test]
    fn unavailable_router_fails() {
        let r = StaticRouter::unavailable("503 upstream");
        assert!(matches!(r.routes(&request(None, 2)), Err(SpatialError::Provider(m)) if m == "503 upstream"));
    }
}

#[cfg(all(test, feature = "http"))]
mod http {
    use eco_core::{BoundingBox, GeoPoint};

    use crate::http::here::{avoid_bbox, route_params};
    use crate::http::{parse_geocode, parse_routes, parse_search};
    use crate::{RoutePreference, RouteRequest, SpatialError};

    #[test]
    fn parses_here_geocode() {
        let body = r#"{"items":[{"title":"Colombo, Sri Lanka","position":{"lat":6.92708,"lng":79.86124}}]}"#;
        let hits = parse_geocode(body).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, GeoPoint::new(6.92708, 79.86124));
        assert!(parse_geocode(r#"{"items":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn parses_here_routes() {
        let body = r#"{"routes":[
            {"id":"r0","sections":[{"polyline":"BFoz5xJ67i1B1B7PzIhaxL7Y","summary":{"length":120000,"duration":7200}}]},
            {"id":"r1","sections":[]}
        ]}"#;
        let routes = parse_routes(body).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].summary.length_m, 120_000.0);
        assert_eq!(routes[0].summary.duration_s, 7_200.0);
    }

    #[test]
    fn malformed_body_is_provider_error() {
        assert!(matches!(parse_routes("<html>"), Err(SpatialError::Provider(_))));
    }

    #[test]
    fn parses_nominatim_strings() {
        let body = r#"[{"lat":"6.0535","lon":"80.2210","display_name":"Galle, Southern Province"}]"#;
        let hits = parse_search(body).unwrap();
        assert_eq!(hits[0].point, GeoPoint::new(6.0535, 80.2210));
        assert!(parse_search(r#"[{"lat":"north","lon":"1"}]"#).is_err());
    }

    #[test]
    fn avoid_area_is_west_south_east_north() {
        let area = BoundingBox::new(GeoPoint::new(6.1, 80.0), GeoPoint::new(6.2, 80.3));
        assert_eq!(avoid_bbox(&area), "bbox:80.000000,6.100000,80.300000,6.200000");
    }

    #[test]
    fn route_params_shape() {
        let area = BoundingBox::new(GeoPoint::new(6.1, 80.0), GeoPoint::new(6.2, 80.3));
        let request = RouteRequest {
            origin:       GeoPoint::new(6.92708, 79.86124),
            destination:  GeoPoint::new(6.0535, 80.2210),
            avoid:        Some(area),
            preference:   RoutePreference::Shortest,
            alternatives: 2,
        };
        let params = route_params(&request);
        let get = |k: &str| params.iter().find(|(key, _)| *key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("origin"), Some("6.927080,79.861240"));
        assert_eq!(get("routingMode"), Some("short"));
        assert_eq!(get("alternatives"), Some("2"));
        assert!(get("avoid[areas]").is_some());
    }
}
