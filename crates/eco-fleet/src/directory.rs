//! Read-only vehicle lookup.

use crate::{FleetError, FleetResult, VehicleProfile};

/// Source of vehicle profiles for the planner.
///
/// Implement this over whatever owns vehicles in the host (a REST client,
/// a local cache).  [`Fleet`] is the in-memory default.
pub trait VehicleDirectory {
    /// Look up a vehicle by id.
    fn vehicle(&self, id: &str) -> Option<&VehicleProfile>;

    /// All vehicles in display order.
    fn vehicles(&self) -> &[VehicleProfile];

    /// The vehicle selected when the user has not picked one: the first.
    fn default_vehicle(&self) -> Option<&VehicleProfile> {
        self.vehicles().first()
    }
}

/// An ordered in-memory vehicle list.  Ids are unique.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    vehicles: Vec<VehicleProfile>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, rejecting duplicate ids and negative or
    /// non-finite emission factors.
    pub fn from_vehicles(vehicles: Vec<VehicleProfile>) -> FleetResult<Self> {
        let mut fleet = Fleet { vehicles: Vec::with_capacity(vehicles.len()) };
        for v in vehicles {
            fleet.insert(v)?;
        }
        Ok(fleet)
    }

    /// Append a vehicle.
    pub fn insert(&mut self, vehicle: VehicleProfile) -> FleetResult<()> {
        if !vehicle.co2_g_per_km.is_finite() || vehicle.co2_g_per_km < 0.0 {
            return Err(FleetError::InvalidEmissionFactor {
                id:    vehicle.id,
                value: vehicle.co2_g_per_km,
            });
        }
        if self.vehicle(&vehicle.id).is_some() {
            return Err(FleetError::DuplicateId(vehicle.id));
        }
        self.vehicles.push(vehicle);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl VehicleDirectory for Fleet {
    fn vehicle(&self, id: &str) -> Option<&VehicleProfile> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn vehicles(&self) -> &[VehicleProfile] {
        &self.vehicles
    }
}
