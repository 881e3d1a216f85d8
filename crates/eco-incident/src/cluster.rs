//! Proximity/recency clustering of incident marks.
//!
//! # Algorithm
//!
//! 1. Keep only marks younger than `recency_ms`.
//! 2. Bulk-load them into an R-tree keyed on `[lat, lon]`.
//! 3. Walk the recent marks in store order.  Each one seeds a candidate:
//!    itself plus every other recent mark within `radius`.
//! 4. A candidate with at least `min_members` marks qualifies.  Candidates
//!    with the same member set as an earlier one are skipped, so a tight
//!    group of N taps yields one cluster rather than N.
//!
//! Overlapping clusters with different member sets are all reported; a
//! mark may belong to more than one of them.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use eco_core::{geo::METRES_PER_DEGREE, BoundingBox, ClusterId, GeoPoint, MarkId, Timestamp};
use eco_core::time::HOUR_MS;

use crate::{IncidentError, IncidentMark, IncidentResult};

// ── Parameters ────────────────────────────────────────────────────────────────

/// Neighbourhood radius and the metric it is measured in.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClusterRadius {
    /// Flat Euclidean distance over raw lat/lon degrees.
    Degrees(f64),
    /// Haversine great-circle distance in metres.
    Meters(f64),
}

impl ClusterRadius {
    fn value(self) -> f64 {
        match self {
            ClusterRadius::Degrees(r) | ClusterRadius::Meters(r) => r,
        }
    }

    /// `true` if `a` and `b` are within the radius of each other.
    pub fn contains(self, a: GeoPoint, b: GeoPoint) -> bool {
        match self {
            ClusterRadius::Degrees(r) => a.degree_distance(b) <= r,
            ClusterRadius::Meters(r)  => a.distance_m(b) <= r,
        }
    }
}

impl Default for ClusterRadius {
    fn default() -> Self {
        ClusterRadius::Degrees(0.005)
    }
}

/// Tuning knobs for [`find_clusters`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusterParams {
    pub radius:       ClusterRadius,
    /// Marks at least this old are ignored.
    pub recency_ms:   u64,
    /// Smallest member count that qualifies as a cluster.
    pub min_members:  usize,
    /// Degrees added on every side of the members' bounding box.
    pub bbox_pad_deg: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            radius:       ClusterRadius::default(),
            recency_ms:   HOUR_MS,
            min_members:  3,
            bbox_pad_deg: 0.002,
        }
    }
}

impl ClusterParams {
    pub fn validate(&self) -> IncidentResult<()> {
        let r = self.radius.value();
        if !r.is_finite() || r <= 0.0 {
            return Err(IncidentError::InvalidRadius(r));
        }
        if !self.bbox_pad_deg.is_finite() || self.bbox_pad_deg < 0.0 {
            return Err(IncidentError::InvalidPadding(self.bbox_pad_deg));
        }
        if self.min_members == 0 {
            return Err(IncidentError::ZeroMinMembers);
        }
        if self.recency_ms == 0 {
            return Err(IncidentError::ZeroRecency);
        }
        Ok(())
    }
}

// ── Cluster ───────────────────────────────────────────────────────────────────

/// A qualifying group of incident marks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    pub id:       ClusterId,
    /// Member marks in store order; the seed is not necessarily first.
    pub members:  Vec<MarkId>,
    /// Members' bounding box widened by `bbox_pad_deg`.
    pub bbox:     BoundingBox,
    pub centroid: GeoPoint,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// `[lat, lon]` plus the mark's index into the input slice.
struct MarkEntry {
    point: [f64; 2],
    idx:   usize,
}

impl RTreeObject for MarkEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for MarkEntry {
    /// Squared Euclidean distance in degree space.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Clustering ────────────────────────────────────────────────────────────────

/// Find every qualifying cluster among `marks` at time `now`.
///
/// Clusters are returned in the order of their first seed, so `result[0]`
/// is the cluster whose bounding box a reroute should avoid.
pub fn find_clusters(
    marks:  &[IncidentMark],
    now:    Timestamp,
    params: &ClusterParams,
) -> Vec<Cluster> {
    let recent: Vec<usize> = (0..marks.len())
        .filter(|&i| marks[i].is_recent(now, params.recency_ms))
        .collect();
    if recent.len() < params.min_members {
        return Vec::new();
    }

    let tree = RTree::bulk_load(
        recent
            .iter()
            .map(|&idx| MarkEntry { point: [marks[idx].point.lat, marks[idx].point.lon], idx })
            .collect(),
    );

    let mut seen: Vec<Vec<usize>> = Vec::new();
    let mut clusters = Vec::new();

    for &seed in &recent {
        let mut members = neighbours(&tree, marks[seed].point, params.radius);
        if members.len() < params.min_members {
            continue;
        }
        members.sort_unstable();
        if seen.contains(&members) {
            continue;
        }

        let points: Vec<GeoPoint> = members.iter().map(|&i| marks[i].point).collect();
        let (Some(bbox), Some(centroid)) =
            (BoundingBox::from_points(&points), GeoPoint::centroid(&points))
        else {
            continue;
        };

        let cluster = Cluster {
            id:      ClusterId(clusters.len() as u32),
            members: members.iter().map(|&i| marks[i].id).collect(),
            bbox:    bbox.padded(params.bbox_pad_deg),
            centroid,
        };
        debug!(
            "cluster {} seeded by {}: {} marks, centroid {}",
            cluster.id, marks[seed].id, cluster.len(), cluster.centroid
        );
        clusters.push(cluster);
        seen.push(members);
    }

    clusters
}

/// Indices of every indexed mark within `radius` of `center`, the center's
/// own mark included.
fn neighbours(tree: &RTree<MarkEntry>, center: GeoPoint, radius: ClusterRadius) -> Vec<usize> {
    let query = [center.lat, center.lon];
    let hits: Vec<&MarkEntry> = match radius {
        ClusterRadius::Degrees(r) => {
            // Slightly widened so the exact check below has the final say.
            tree.locate_within_distance(query, r * r * (1.0 + 1e-9)).collect()
        }
        ClusterRadius::Meters(m) => {
            // Loose envelope; great circles bow poleward of the parallel.
            let half_lat = m / METRES_PER_DEGREE;
            let cos_lat  = (center.lat.abs() + half_lat).min(89.9).to_radians().cos();
            let half_lon = 1.05 * m / (METRES_PER_DEGREE * cos_lat);
            let envelope = AABB::from_corners(
                [center.lat - half_lat, center.lon - half_lon],
                [center.lat + half_lat, center.lon + half_lon],
            );
            tree.locate_in_envelope_intersecting(&envelope).collect()
        }
    };

    hits.into_iter()
        .filter(|e| radius.contains(center, GeoPoint::new(e.point[0], e.point[1])))
        .map(|e| e.idx)
        .collect()
}
