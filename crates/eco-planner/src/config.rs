//! Planner tuning.
//!
//! Every field has a default, so a JSON file only needs the keys it
//! changes:
//!
//! ```json
//! { "reroute_tap_threshold": 2, "cluster": { "radius": { "Meters": 400.0 } } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use eco_incident::ClusterParams;

use crate::{PlannerError, PlannerResult};

/// Most alternatives a routing request may ask for.
pub const MAX_ALTERNATIVES: u8 = 6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Radius, recency window, size threshold, and bbox padding.
    pub cluster: ClusterParams,

    /// Taps on one rounded coordinate needed before a reroute is tried.
    /// Independent of `cluster.min_members`.
    pub reroute_tap_threshold: u32,

    /// Eco-points credited for every incident tap.
    pub eco_points_per_tap: u64,

    /// Alternatives requested on top of the primary route.
    pub alternatives: u8,

    /// Clustering passes a derived centroid mark survives.
    pub centroid_ttl_cycles: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cluster:               ClusterParams::default(),
            reroute_tap_threshold: 3,
            eco_points_per_tap:    10,
            alternatives:          2,
            centroid_ttl_cycles:   1,
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> PlannerResult<Self> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> PlannerResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> PlannerResult<()> {
        self.cluster.validate()?;
        if self.reroute_tap_threshold == 0 {
            return Err(PlannerError::Config("reroute_tap_threshold must be at least 1".into()));
        }
        if self.alternatives > MAX_ALTERNATIVES {
            return Err(PlannerError::Config(format!(
                "alternatives must be at most {MAX_ALTERNATIVES}, got {}",
                self.alternatives
            )));
        }
        Ok(())
    }
}
