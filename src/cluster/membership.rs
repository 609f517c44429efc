//! Fuzzy membership degrees.
//!
//! A point's degree for a cluster is a linear ramp over its neighbour count:
//!
//! ```text
//!            0                          count <= min
//! degree =   (count - min) / (max - min)   min < count < max
//!            1                          count >= max
//! ```
//!
//! Border points inherit the best degree among their core neighbours, so
//! their own count (at most `min`) only ever lands on the flat zero part.

use crate::error::{Error, Result};

/// Membership degree for a point with `count` neighbours.
///
/// Rejects `min_pts_max <= min_pts_min` rather than collapsing the ramp.
pub fn degree(count: usize, min_pts_min: usize, min_pts_max: usize) -> Result<f32> {
    check_thresholds(min_pts_min, min_pts_max)?;
    Ok(ramp(count, min_pts_min, min_pts_max))
}

pub(crate) fn check_thresholds(min_pts_min: usize, min_pts_max: usize) -> Result<()> {
    if min_pts_max <= min_pts_min {
        return Err(Error::InvalidParameter {
            name: "min_pts_max",
            message: "must be strictly greater than min_pts_min",
        });
    }
    Ok(())
}

/// Unchecked ramp; callers have validated `min_pts_min < min_pts_max`.
#[inline]
pub(crate) fn ramp(count: usize, min_pts_min: usize, min_pts_max: usize) -> f32 {
    if count >= min_pts_max {
        1.0
    } else if count > min_pts_min {
        (count - min_pts_min) as f32 / (min_pts_max - min_pts_min) as f32
    } else {
        0.0
    }
}

/// Per-point membership degrees, keyed by cluster id.
///
/// Each point holds a short list of `(cluster, degree)` pairs in the order
/// clusters were discovered. A point absent from a cluster has no entry.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MembershipStore {
    entries: Vec<Vec<(usize, f32)>>,
}

impl MembershipStore {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            entries: vec![Vec::new(); n],
        }
    }

    /// Set the degree of `point` in `cluster`, replacing any earlier value.
    pub(crate) fn set(&mut self, point: usize, cluster: usize, degree: f32) {
        let row = &mut self.entries[point];
        match row.iter_mut().find(|(c, _)| *c == cluster) {
            Some(slot) => slot.1 = degree,
            None => row.push((cluster, degree)),
        }
    }

    /// Degree of `point` in `cluster`, if it belongs to it at all.
    pub fn get(&self, point: usize, cluster: usize) -> Option<f32> {
        self.entries
            .get(point)?
            .iter()
            .find(|(c, _)| *c == cluster)
            .map(|&(_, d)| d)
    }

    /// All `(cluster, degree)` pairs for `point`, ordered by cluster id.
    pub fn of(&self, point: usize) -> &[(usize, f32)] {
        &self.entries[point]
    }

    /// Number of points tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no points are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cluster with the strictly greatest degree for `point`.
    ///
    /// Scans in cluster order starting from the `-1` noise floor, so ties go
    /// to the first discovered cluster. `None` means noise.
    pub fn best(&self, point: usize) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        let mut floor = NOISE_DEGREE;
        for &(cluster, d) in &self.entries[point] {
            if d > floor {
                floor = d;
                best = Some((cluster, d));
            }
        }
        best
    }
}

/// Degree sentinel meaning "not a member of this cluster".
pub(crate) const NOISE_DEGREE: f32 = -1.0;
