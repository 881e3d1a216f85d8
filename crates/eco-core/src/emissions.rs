//! Trip CO2 estimation.
//!
//! ```text
//! driving_kg = distance_km * factor_g_per_km / 1000
//! idle_kg    = duration_min * IDLE_SHARE * IDLE_KG_PER_MIN
//! total      = driving_kg + idle_kg
//! ```
//!
//! The idle term assumes a tenth of every trip is spent stationary with
//! the engine running.

/// Fraction of trip time assumed to be spent idling.
pub const IDLE_SHARE: f64 = 0.1;

/// CO2 emitted per idle minute, in kilograms.
pub const IDLE_KG_PER_MIN: f64 = 0.05;

/// Estimated CO2 in kilograms for a trip of `distance_m` metres taking
/// `duration_s` seconds, given the vehicle's emission factor in g/km.
///
/// Non-decreasing in distance and duration for a non-negative factor.
/// Pass `0.0` when no vehicle is selected to get the idle term only.
///
/// ```
/// let kg = eco_core::estimate_co2_kg(120_000.0, 7_200.0, 150.0);
/// assert!((kg - 18.6).abs() < 1e-9);
/// ```
pub fn estimate_co2_kg(distance_m: f64, duration_s: f64, emission_factor_g_per_km: f64) -> f64 {
    let distance_km = distance_m / 1000.0;
    let kg_per_km   = emission_factor_g_per_km / 1000.0;
    let idle_min    = duration_s / 60.0 * IDLE_SHARE;

    distance_km * kg_per_km + idle_min * IDLE_KG_PER_MIN
}
