//! Trip records handed to the host when driving starts.

use serde::Serialize;

/// Summary of a started trip, shaped like the trip service's payload.
///
/// Distance, time, and CO2 are whole numbers, rounded half away from zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    /// `None` when no vehicle is selected.
    pub vehicle_id:     Option<String>,
    pub start_location: String,
    pub destination:    String,
    #[serde(rename = "distance")]
    pub distance_km:    u64,
    #[serde(rename = "time")]
    pub time_min:       u64,
    #[serde(rename = "co2")]
    pub co2_g:          u64,
}

impl TripRecord {
    /// Build from raw route figures.
    pub fn new(
        vehicle_id:     Option<String>,
        start_location: impl Into<String>,
        destination:    impl Into<String>,
        length_m:       f64,
        duration_s:     f64,
        co2_kg:         f64,
    ) -> Self {
        Self {
            vehicle_id,
            start_location: start_location.into(),
            destination:    destination.into(),
            distance_km:    whole(length_m / 1000.0),
            time_min:       whole(duration_s / 60.0),
            co2_g:          whole(co2_kg * 1000.0),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn whole(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 { value.round() as u64 } else { 0 }
}
