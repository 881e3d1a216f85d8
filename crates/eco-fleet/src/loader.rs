//! CSV vehicle loader.
//!
//! # CSV format
//!
//! One row per vehicle, in display order.  Empty cells are allowed for the
//! descriptive columns.
//!
//! ```csv
//! vehicle_id,vehicle_name,vehicle_type,fuel_type,transmission,engine_capacity_cc,engine_power_ps,co2_emission_g_per_km
//! v1,Axio,Sedan,Petrol,CVT,1498,121,139
//! v2,320d,Sedan,Diesel,8AT,1995,150,142
//! v3,Prius,Hatchback,Electric / Petrol,E-CVT,1798,122,97
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{Fleet, FleetError, FleetResult, FuelType, VehicleProfile};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VehicleRecord {
    vehicle_id:            String,
    vehicle_name:          String,
    vehicle_type:          Option<String>,
    fuel_type:             Option<String>,
    transmission:          Option<String>,
    engine_capacity_cc:    Option<u32>,
    engine_power_ps:       Option<u32>,
    co2_emission_g_per_km: f64,
}

impl From<VehicleRecord> for VehicleProfile {
    fn from(r: VehicleRecord) -> Self {
        VehicleProfile {
            id:                 r.vehicle_id,
            name:               r.vehicle_name,
            co2_g_per_km:       r.co2_emission_g_per_km,
            vehicle_type:       non_empty(r.vehicle_type),
            fuel:               r.fuel_type.as_deref().map(FuelType::parse).unwrap_or_default(),
            transmission:       non_empty(r.transmission),
            engine_capacity_cc: r.engine_capacity_cc,
            engine_power_ps:    r.engine_power_ps,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Fleet`] from a CSV file.
pub fn load_vehicles_csv(path: &Path) -> FleetResult<Fleet> {
    let file = std::fs::File::open(path)?;
    load_vehicles_reader(file)
}

/// Like [`load_vehicles_csv`] but accepts any `Read` source.
pub fn load_vehicles_reader<R: Read>(reader: R) -> FleetResult<Fleet> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut fleet = Fleet::new();

    for result in csv_reader.deserialize::<VehicleRecord>() {
        let row = result.map_err(|e| FleetError::Parse(e.to_string()))?;
        fleet.insert(row.into())?;
    }

    Ok(fleet)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}
