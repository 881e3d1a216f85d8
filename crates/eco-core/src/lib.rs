//! `eco-core` — foundational types for the `econav` route planner.
//!
//! This crate is a dependency of every other `eco-*` crate.  It has no
//! `eco-*` dependencies; its only external one is the optional `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `MarkId`, `MarkerId`, `RequestId`, `ClusterId`        |
//! | [`geo`]         | `GeoPoint`, `BoundingBox`, haversine distance         |
//! | [`time`]        | `Timestamp` (Unix milliseconds)                       |
//! | [`emissions`]   | `estimate_co2_kg`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod emissions;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use emissions::estimate_co2_kg;
pub use geo::{BoundingBox, GeoPoint};
pub use ids::{ClusterId, MarkId, MarkerId, RequestId};
pub use time::Timestamp;
