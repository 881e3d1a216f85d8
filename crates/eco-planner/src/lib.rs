//! `eco-planner` — traffic-aware eco route planning.
//!
//! # Handler flow
//!
//! ```text
//! plan_trip(origin, destination)
//!   ① resolve both names through the Geocoder
//!   ② compute_route(..., avoid = None)      → cached as the original
//!
//! on_tap(point, now)
//!   ① record_incident    — mark + marker + eco-points + tap tally
//!   ② recluster          — expire old centroids, find clusters, consume
//!                          members, drop a warning marker per centroid
//!   ③ maybe reroute      — if a spot was tapped reroute_tap_threshold
//!                          times: compute_route(avoid = first bbox,
//!                          shortest) and compare with the original
//! ```
//!
//! Provider and map access go through the `Geocoder`, `RoutingProvider`,
//! and [`MapView`] traits, so the whole flow runs offline against
//! `eco_spatial::stub` and [`RecordingMap`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use eco_planner::{PlannerBuilder, RecordingMap};
//!
//! let mut planner = PlannerBuilder::new(geocoder, router, RecordingMap::new())
//!     .vehicles(fleet)
//!     .build()?;
//! planner.plan_trip("Colombo, Sri Lanka", "Galle, Sri Lanka")?;
//! let outcome = planner.on_tap(point, Timestamp::now())?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod map;
pub mod planner;
pub mod session;
pub mod trip;


pub use builder::PlannerBuilder;
pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use map::{MapView, MarkerKind, NoopMap, Notice, NoticeLevel, RecordingMap, RouteStyle};
pub use planner::{Planner, RerouteOutcome, RouteTicket};
pub use session::{
    EcoLedger, PlannedRoute, RouteKind, SessionEvent, SessionPhase, SessionState, Trip,
};
pub use trip::TripRecord;
