//! `eco-incident` — user-reported traffic incidents.
//!
//! Every map tap becomes an [`IncidentMark`] in a [`MarkStore`].  After each
//! tap the planner runs [`find_clusters`] over the live marks; qualifying
//! clusters yield a padded avoid-area and a centroid.  [`TapTally`] counts
//! repeated taps on the same rounded coordinate, which is what gates a
//! reroute.
//!
//! # Crate layout
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`mark`]    | `IncidentMark`, `MarkOrigin`                         |
//! | [`store`]   | `MarkStore` — ordered working set of live marks      |
//! | [`cluster`] | `ClusterParams`, `ClusterRadius`, `Cluster`, `find_clusters` |
//! | [`tally`]   | `TapTally` — per-coordinate tap counter              |
//! | [`error`]   | `IncidentError`, `IncidentResult<T>`                 |

pub mod cluster;
pub mod error;
pub mod mark;
pub mod store;
pub mod tally;

#[cfg(test)]
mod tests;

pub use cluster::{find_clusters, Cluster, ClusterParams, ClusterRadius};
pub use error::{IncidentError, IncidentResult};
pub use mark::{IncidentMark, MarkOrigin};
pub use store::MarkStore;
pub use tally::TapTally;
