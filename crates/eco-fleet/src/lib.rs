//! `eco-fleet` — vehicle emission profiles and their lookup.
//!
//! The planner only ever *reads* vehicles: the emission factor of the
//! selected vehicle drives every CO2 estimate.  Creating and editing
//! vehicles belongs to the surrounding vehicle-management service.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`vehicle`]   | `VehicleProfile`, `FuelType`                               |
//! | [`directory`] | `VehicleDirectory` trait, `Fleet` in-memory directory      |
//! | [`loader`]    | `load_vehicles_csv`, `load_vehicles_reader`                |
//! | [`error`]     | `FleetError`, `FleetResult<T>`                             |

pub mod directory;
pub mod error;
pub mod loader;
pub mod vehicle;


pub use directory::{Fleet, VehicleDirectory};
pub use error::{FleetError, FleetResult};
pub use loader::{load_vehicles_csv, load_vehicles_reader};
pub use vehicle::{FuelType, VehicleProfile};
