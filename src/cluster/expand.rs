//! Growing one fuzzy cluster from a seed core point.
//!
//! The expansion is a flood fill over the core graph: a frontier starts as the
//! seed's neighbourhood, every core point popped from it pushes its own
//! neighbourhood back in, and non-core points are parked in a border set.
//! Only core points are consumed; border points stay available to later
//! clusters. Once the frontier drains, each border point takes the best degree
//! among its core neighbours inside this cluster.
//!
//! The set of cores, the set of borders, and every degree depend only on the
//! distance matrix, so the drain order ([`FrontierOrder`]) never changes the
//! outcome.

use std::collections::VecDeque;

use super::distance::DistanceMatrix;
use super::membership::{self, MembershipStore};
use super::neighborhood::neighbors;
use crate::error::{Error, Result};

/// Order in which the expansion frontier is drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrontierOrder {
    /// Depth-first: most recently discovered candidate first.
    #[default]
    Lifo,
    /// Breadth-first: oldest candidate first.
    Fifo,
}

/// Per-point traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointState {
    /// Neighbourhood never computed.
    Unvisited,
    /// Visited and found too sparse to be core. Can still become a border point.
    Sparse,
    /// Visited core point, owned by exactly one cluster.
    Core,
}

/// Thresholds shared by every expansion of one fit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Density {
    pub eps: f32,
    pub min_pts_min: usize,
    pub min_pts_max: usize,
}

impl Density {
    #[inline]
    pub fn is_core(&self, count: usize) -> bool {
        count > self.min_pts_min
    }

    #[inline]
    pub fn degree(&self, count: usize) -> f32 {
        membership::ramp(count, self.min_pts_min, self.min_pts_max)
    }
}

/// Sizes of a closed cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Expanded {
    pub cores: usize,
    pub borders: usize,
}

/// Mutable state threaded through the expansions of one fit.
pub(crate) struct Expander<'a> {
    pub matrix: &'a DistanceMatrix,
    pub density: Density,
    pub order: FrontierOrder,
    pub states: &'a mut [PointState],
    pub store: &'a mut MembershipStore,
}

impl Expander<'_> {
    /// Grow `cluster` from `seed`, a core point whose neighbourhood is `seed_neighbors`.
    ///
    /// The caller has already marked `seed` as [`PointState::Core`].
    pub fn expand(
        &mut self,
        seed: usize,
        seed_neighbors: Vec<usize>,
        cluster: usize,
    ) -> Result<Expanded> {
        let n = self.matrix.len();
        let mut is_core = vec![false; n];
        let mut is_border = vec![false; n];
        let mut queued = vec![false; n];
        let mut borders: Vec<usize> = Vec::new();
        let mut cores = 1;

        self.store
            .set(seed, cluster, self.density.degree(seed_neighbors.len()));
        is_core[seed] = true;

        for &j in &seed_neighbors {
            queued[j] = true;
        }
        let mut frontier: VecDeque<usize> = seed_neighbors.into();

        while let Some(i) = self.pop(&mut frontier) {
            if self.states[i] == PointState::Core || is_border[i] {
                continue;
            }

            if self.states[i] == PointState::Sparse {
                // Known non-core from an earlier visit.
                is_border[i] = true;
                borders.push(i);
                continue;
            }

            let nbrs = neighbors(self.matrix, i, self.density.eps);
            if self.density.is_core(nbrs.len()) {
                self.states[i] = PointState::Core;
                is_core[i] = true;
                cores += 1;
                self.store.set(i, cluster, self.density.degree(nbrs.len()));
                for j in nbrs {
                    if !queued[j] {
                        queued[j] = true;
                        frontier.push_back(j);
                    }
                }
            } else {
                // Left unvisited: a later cluster may claim it as a border too.
                is_border[i] = true;
                borders.push(i);
            }
        }

        self.close(&borders, &is_core, cluster)?;

        Ok(Expanded {
            cores,
            borders: borders.len(),
        })
    }

    /// Give every border point the best degree among its core neighbours.
    pub fn close(&mut self, borders: &[usize], is_core: &[bool], cluster: usize) -> Result<()> {
        for &b in borders {
            let best = neighbors(self.matrix, b, self.density.eps)
                .into_iter()
                .filter(|&j| is_core[j])
                .filter_map(|j| self.store.get(j, cluster))
                .fold(None, |acc: Option<f32>, d| Some(acc.map_or(d, |a| a.max(d))));

            let degree = best.ok_or(Error::InvariantViolation { point: b, cluster })?;
            self.store.set(b, cluster, degree);
        }
        Ok(())
    }

    #[inline]
    fn pop(&self, frontier: &mut VecDeque<usize>) -> Option<usize> {
        match self.order {
            FrontierOrder::Lifo => frontier.pop_back(),
            FrontierOrder::Fifo => frontier.pop_front(),
        }
    }
}
