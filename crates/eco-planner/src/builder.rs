//! Fluent builder for constructing a [`Planner`].

use eco_core::RequestId;
use eco_fleet::{Fleet, VehicleDirectory};
use eco_incident::{MarkStore, TapTally};
use eco_spatial::{Geocoder, RoutingProvider};

use crate::map::MapView;
use crate::session::SessionState;
use crate::{Planner, PlannerConfig, PlannerError, PlannerResult};

/// Fluent builder for [`Planner<G, R, M>`].
///
/// # Required inputs
///
/// - `G: Geocoder` — place name lookup
/// - `R: RoutingProvider` — car routing with alternatives
/// - `M: MapView` — the map widget adapter
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                          |
/// |------------------------|----------------------------------|
/// | `.config(c)`           | `PlannerConfig::default()`       |
/// | `.vehicles(d)`         | Empty `Fleet`                    |
/// | `.selected_vehicle(id)`| The directory's first vehicle    |
///
/// # Example
///
/// ```rust,ignore
/// let mut planner = PlannerBuilder::new(geocoder, router, RecordingMap::new())
///     .vehicles(fleet)
///     .build()?;
/// planner.plan_trip("Colombo, Sri Lanka", "Galle, Sri Lanka")?;
/// ```
pub struct PlannerBuilder<G: Geocoder, R: RoutingProvider, M: MapView> {
    geocoder: G,
    router:   R,
    map:      M,
    config:   PlannerConfig,
    vehicles: Option<Box<dyn VehicleDirectory + Send + Sync>>,
    selected: Option<String>,
}

impl<G: Geocoder, R: RoutingProvider, M: MapView> PlannerBuilder<G, R, M> {
    pub fn new(geocoder: G, router: R, map: M) -> Self {
        Self {
            geocoder,
            router,
            map,
            config:   PlannerConfig::default(),
            vehicles: None,
            selected: None,
        }
    }

    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn vehicles(mut self, directory: impl VehicleDirectory + Send + Sync + 'static) -> Self {
        self.vehicles = Some(Box::new(directory));
        self
    }

    /// Pre-select vehicle `id`.  Must exist in the directory.
    pub fn selected_vehicle(mut self, id: impl Into<String>) -> Self {
        self.selected = Some(id.into());
        self
    }

    /// Validate the configuration and vehicle selection and return a
    /// planner in the `Idle` phase.
    pub fn build(self) -> PlannerResult<Planner<G, R, M>> {
        self.config.validate()?;

        let vehicles = self
            .vehicles
            .unwrap_or_else(|| Box::new(Fleet::new()));
        if let Some(id) = &self.selected {
            if vehicles.vehicle(id).is_none() {
                return Err(PlannerError::UnknownVehicle(id.clone()));
            }
        }

        Ok(Planner {
            config:       self.config,
            geocoder:     self.geocoder,
            router:       self.router,
            map:          self.map,
            vehicles,
            selected:     self.selected,
            state:        SessionState::new(),
            marks:        MarkStore::new(),
            tally:        TapTally::new(),
            endpoints:    Vec::new(),
            next_request: RequestId(0),
        })
    }
}
