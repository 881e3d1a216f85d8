//! Ordered working set of live incident marks.

use eco_core::{GeoPoint, MarkId, MarkerId, Timestamp};

use crate::{IncidentMark, MarkOrigin};

/// Live marks in insertion order.
///
/// Clustering walks marks in this order, so "first qualifying cluster" is
/// well defined.  Ids are never reused within a store.
#[derive(Debug)]
pub struct MarkStore {
    marks:   Vec<IncidentMark>,
    next_id: MarkId,
}

impl MarkStore {
    pub fn new() -> Self {
        Self { marks: Vec::new(), next_id: MarkId(0) }
    }

    /// Append a mark and return its id.
    pub fn push(
        &mut self,
        point:  GeoPoint,
        at:     Timestamp,
        origin: MarkOrigin,
        marker: Option<MarkerId>,
    ) -> MarkId {
        let id = self.next_id;
        self.next_id = id.next();
        self.marks.push(IncidentMark { id, point, at, origin, marker });
        id
    }

    /// Remove and return the mark with `id`.
    pub fn remove(&mut self, id: MarkId) -> Option<IncidentMark> {
        let idx = self.marks.iter().position(|m| m.id == id)?;
        Some(self.marks.remove(idx))
    }

    /// Remove every centroid mark whose lifetime ended before `cycle`.
    pub fn drop_expired(&mut self, cycle: u64) -> Vec<IncidentMark> {
        let (expired, live): (Vec<_>, Vec<_>) =
            self.marks.drain(..).partition(|m| m.is_expired(cycle));
        self.marks = live;
        expired
    }

    pub fn get(&self, id: MarkId) -> Option<&IncidentMark> {
        self.marks.iter().find(|m| m.id == id)
    }

    pub fn as_slice(&self) -> &[IncidentMark] {
        &self.marks
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncidentMark> + '_ {
        self.marks.iter()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

impl Default for MarkStore {
    fn default() -> Self {
        Self::new()
    }
}
