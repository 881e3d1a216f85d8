//! Per-coordinate tap counter.
//!
//! Coordinates are keyed at 6 decimal places (about 11 cm), so two taps
//! count as "the same spot" only when they agree to that precision.  The
//! tally is never reset by cluster consumption.

use rustc_hash::FxHashMap;

use eco_core::GeoPoint;

const KEY_SCALE: f64 = 1e6;

#[derive(Debug, Default)]
pub struct TapTally {
    counts: FxHashMap<(i64, i64), u32>,
}

impl TapTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(point: GeoPoint) -> (i64, i64) {
        (
            (point.lat * KEY_SCALE).round() as i64,
            (point.lon * KEY_SCALE).round() as i64,
        )
    }

    /// Count one more tap at `point` and return the new total for its key.
    pub fn record(&mut self, point: GeoPoint) -> u32 {
        let count = self.counts.entry(Self::key(point)).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, point: GeoPoint) -> u32 {
        self.counts.get(&Self::key(point)).copied().unwrap_or(0)
    }

    /// Highest count across all keys.
    pub fn max_count(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// `true` if any key has reached `threshold` taps.
    pub fn any_at_least(&self, threshold: u32) -> bool {
        self.max_count() >= threshold
    }

    /// Number of distinct rounded coordinates tapped.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
