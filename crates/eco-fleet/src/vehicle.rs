//! Vehicle emission profile.

use serde::{Deserialize, Serialize};

/// Fuel or energy source.  Unknown labels are kept verbatim.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    /// Any mixed label such as `"Electric / Petrol"`.
    Hybrid,
    Electric,
    Other(String),
}

impl FuelType {
    /// Parse a free-text label as entered in the vehicle forms.
    pub fn parse(label: &str) -> FuelType {
        let lower = label.trim().to_ascii_lowercase();
        let electric = lower.contains("electric");
        let combustion = lower.contains("petrol")
            || lower.contains("gasoline")
            || lower.contains("diesel");

        if lower.contains("hybrid") || (electric && combustion) {
            FuelType::Hybrid
        } else if electric {
            FuelType::Electric
        } else if lower.contains("diesel") {
            FuelType::Diesel
        } else if lower.contains("petrol") || lower.contains("gasoline") {
            FuelType::Petrol
        } else {
            FuelType::Other(label.trim().to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FuelType::Petrol   => "petrol",
            FuelType::Diesel   => "diesel",
            FuelType::Hybrid   => "hybrid",
            FuelType::Electric => "electric",
            FuelType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle as seen by the planner: a read-only emissions lookup.
///
/// Everything except `co2_g_per_km` is descriptive and only shown to the
/// user.  `transmission` keeps the raw gearbox code (`"CVT"`, `"8AT"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Opaque identifier issued by the vehicle service.
    pub id: String,
    pub name: String,
    /// CO2 emitted per kilometre driven, in grams.
    pub co2_g_per_km: f64,
    pub vehicle_type: Option<String>,
    pub fuel: FuelType,
    pub transmission: Option<String>,
    pub engine_capacity_cc: Option<u32>,
    pub engine_power_ps: Option<u32>,
}

impl VehicleProfile {
    /// Minimal profile: an id, a display name, and an emission factor.
    pub fn new(id: impl Into<String>, name: impl Into<String>, co2_g_per_km: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            co2_g_per_km,
            vehicle_type: None,
            fuel: FuelType::default(),
            transmission: None,
            engine_capacity_cc: None,
            engine_power_ps: None,
        }
    }

    pub fn with_fuel(mut self, fuel: FuelType) -> Self {
        self.fuel = fuel;
        self
    }

    /// Estimated CO2 in kilograms for a trip driven in this vehicle.
    pub fn trip_co2_kg(&self, distance_m: f64, duration_s: f64) -> f64 {
        eco_core::estimate_co2_kg(distance_m, duration_s, self.co2_g_per_km)
    }
}

impl std::fmt::Display for VehicleProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}g/km)", self.name, self.co2_g_per_km)
    }
}
