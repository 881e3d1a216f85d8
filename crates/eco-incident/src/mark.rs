//! A single incident report.

use eco_core::{ClusterId, GeoPoint, MarkId, MarkerId, Timestamp};

/// Where a mark came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkOrigin {
    /// A user tap on the map.
    Tap,
    /// The centroid of a consumed cluster, re-inserted so the next
    /// evaluation still sees the hotspot.  Dropped once the evaluation
    /// cycle counter passes `live_until_cycle`.
    Centroid {
        cluster:          ClusterId,
        live_until_cycle: u64,
    },
}

/// An incident mark in the working set.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidentMark {
    pub id:     MarkId,
    pub point:  GeoPoint,
    /// When the tap happened (or the centroid was derived).
    pub at:     Timestamp,
    pub origin: MarkOrigin,
    /// Map marker drawn for this mark.  Centroid marks have none of their
    /// own; the warning marker drawn for the cluster is not tied to them.
    pub marker: Option<MarkerId>,
}

impl IncidentMark {
    /// `true` if the mark is strictly younger than `window_ms` at `now`.
    ///
    /// Marks stamped after `now` count as fresh.
    #[inline]
    pub fn is_recent(&self, now: Timestamp, window_ms: u64) -> bool {
        now.since(self.at) < window_ms
    }

    #[inline]
    pub fn is_centroid(&self) -> bool {
        matches!(self.origin, MarkOrigin::Centroid { .. })
    }

    /// `true` for a centroid mark whose lifetime ended before `cycle`.
    pub fn is_expired(&self, cycle: u64) -> bool {
        match self.origin {
            MarkOrigin::Tap => false,
            MarkOrigin::Centroid { live_until_cycle, .. } => cycle > live_until_cycle,
        }
    }
}
