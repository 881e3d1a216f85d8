//! Offline data for runs without a HERE API key.

use anyhow::Result;

use eco_core::GeoPoint;
use eco_spatial::{polyline, CandidateRoute, StaticGeocoder, StaticRouter};

// ── Places ────────────────────────────────────────────────────────────────────

pub const ORIGIN:      &str = "Colombo, Sri Lanka";
pub const DESTINATION: &str = "Galle, Sri Lanka";

const COLOMBO: GeoPoint = GeoPoint { lat: 6.92708, lon: 79.86124 };
const GALLE:   GeoPoint = GeoPoint { lat: 6.0535,  lon: 80.2210 };

// ── Vehicle CSV ───────────────────────────────────────────────────────────────

pub const VEHICLES_CSV: &str = "\
vehicle_id,vehicle_name,vehicle_type,fuel_type,transmission,engine_capacity_cc,engine_power_ps,co2_emission_g_per_km\n\
axio,Toyota Axio,Sedan,Petrol,CVT,1498,109,139\n\
bmw320d,BMW 320d,Sedan,Diesel,8AT,1995,190,142\n\
prius,Toyota Prius,Hatchback,Electric / Petrol,E-CVT,1798,122,97\n\
vezel,Honda Vezel,SUV,Petrol,CVT,1496,131,151\n\
leaf,Nissan Leaf,Hatchback,Electric,Single Speed,,150,0\n";

// ── Stub providers ────────────────────────────────────────────────────────────

pub fn geocoder() -> StaticGeocoder {
    StaticGeocoder::new()
        .with_place(ORIGIN, COLOMBO)
        .with_place(DESTINATION, GALLE)
}

/// Coastal A2 route normally; the inland Southern Expressway as an
/// alternative when asked to avoid an area.
pub fn router() -> Result<StaticRouter> {
    let coastal = vec![
        COLOMBO,
        GeoPoint::new(6.7106, 79.9074),
        GeoPoint::new(6.5854, 79.9607),
        GeoPoint::new(6.4213, 80.0016),
        GeoPoint::new(6.2357, 80.0537),
        GALLE,
    ];
    let inland = vec![
        COLOMBO,
        GeoPoint::new(6.8412, 79.9654),
        GeoPoint::new(6.6002, 80.1010),
        GeoPoint::new(6.3011, 80.2003),
        GALLE,
    ];

    let coastal = CandidateRoute::new(polyline::encode(&coastal, 5)?, 119_400.0, 10_500.0);
    let inland  = CandidateRoute::new(polyline::encode(&inland, 5)?, 112_300.0, 6_300.0);

    Ok(StaticRouter::new(vec![coastal.clone()]).with_avoiding(vec![coastal, inland]))
}
