//! Fuzzy DBSCAN: density clustering with graded membership.
//!
//! # The Algorithm
//!
//! Classic DBSCAN makes a hard call per point: core, border, or noise. Fuzzy
//! DBSCAN replaces the single `MinPts` threshold with a pair
//! `min_pts_min < min_pts_max` and turns the neighbour count into a degree in
//! \[0, 1\]:
//!
//! - **Core point**: more than `min_pts_min` points within ε (itself included).
//!   Its degree ramps linearly from 0 at `min_pts_min` to 1 at `min_pts_max`.
//! - **Border point**: within ε of a core point but not core itself. Its degree
//!   in a cluster is the best degree among its core neighbours in that cluster.
//! - **Noise point**: not within ε of any core point. Label `-1`.
//!
//! ## Algorithm Steps
//!
//! 1. Build the pairwise [`DistanceMatrix`] once.
//! 2. For each unvisited point P in index order:
//!    - Find neighbours within ε and mark P visited.
//!    - If P is not core, leave it as noise for now (a later cluster may still
//!      claim it as a border point).
//!    - Otherwise open a new cluster and expand it from P.
//! 3. Each point takes the cluster where its degree is strictly greatest; ties
//!    go to the cluster discovered first.
//!
//! A border point can sit in the ε-ball of cores from several clusters and so
//! carry a degree in each of them. Core points belong to exactly one cluster.
//!
//! ## Complexity
//!
//! - **Time**: O(n² · d) for the matrix, O(n²) for the neighbourhood scans.
//! - **Space**: O(n²) for the (half) matrix, O(n) for labels.

use super::distance::DistanceMatrix;
use super::expand::{Density, Expander, FrontierOrder, PointState};
use super::membership::{self, MembershipStore};
use super::neighborhood::neighbors;
use super::traits::Clustering;
use crate::error::{Error, Result};

/// Cluster identifier: `0, 1, ...` in discovery order, or [`NOISE_LABEL`].
pub type ClusterId = i32;

/// Signed label for points that belong to no cluster.
pub const NOISE_LABEL: ClusterId = -1;

/// Unsigned noise label used by [`Clustering::fit_predict`].
pub const NOISE: usize = usize::MAX;

/// Fuzzy DBSCAN clustering algorithm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzyDbscan {
    /// Epsilon: maximum distance for neighborhood (inclusive).
    epsilon: f32,
    /// Neighbour counts at or below this are never core.
    min_pts_min: usize,
    /// Neighbour counts at or above this get full membership.
    min_pts_max: usize,
    /// How the expansion frontier is drained.
    frontier_order: FrontierOrder,
    /// Emit one `info` line per point with its final label.
    log_assignments: bool,
}

impl FuzzyDbscan {
    /// Create a new fuzzy DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors.
    /// * `min_pts_min` - Exclusive lower density bound; a core point needs more
    ///   neighbours than this (the point itself counts).
    /// * `min_pts_max` - Neighbour count from which membership is 1. Must be
    ///   strictly greater than `min_pts_min`.
    pub fn new(epsilon: f32, min_pts_min: usize, min_pts_max: usize) -> Self {
        Self {
            epsilon,
            min_pts_min,
            min_pts_max,
            frontier_order: FrontierOrder::default(),
            log_assignments: false,
        }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the lower density threshold.
    pub fn with_min_pts_min(mut self, min_pts_min: usize) -> Self {
        self.min_pts_min = min_pts_min;
        self
    }

    /// Set the upper density threshold.
    pub fn with_min_pts_max(mut self, min_pts_max: usize) -> Self {
        self.min_pts_max = min_pts_max;
        self
    }

    /// Set the frontier drain order. Results do not depend on it.
    pub fn with_frontier_order(mut self, order: FrontierOrder) -> Self {
        self.frontier_order = order;
        self
    }

    /// Log every point's final label at `info` level after fitting.
    pub fn with_log_assignments(mut self, enabled: bool) -> Self {
        self.log_assignments = enabled;
        self
    }

    /// Epsilon (neighborhood radius).
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Lower density threshold.
    pub fn min_pts_min(&self) -> usize {
        self.min_pts_min
    }

    /// Upper density threshold.
    pub fn min_pts_max(&self) -> usize {
        self.min_pts_max
    }

    /// Check the parameters without touching any data.
    pub fn validate(&self) -> Result<()> {
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be non-negative",
            });
        }
        membership::check_thresholds(self.min_pts_min, self.min_pts_max)
    }

    /// Cluster `data`, keeping every membership degree.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<FuzzyClustering> {
        self.validate()?;
        let matrix = DistanceMatrix::compute(data)?;
        self.run(&matrix)
    }

    /// Cluster from an already computed distance matrix.
    pub fn fit_distances(&self, matrix: &DistanceMatrix) -> Result<FuzzyClustering> {
        self.validate()?;
        if matrix.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.run(matrix)
    }

    fn run(&self, matrix: &DistanceMatrix) -> Result<FuzzyClustering> {
        let n = matrix.len();
        let density = Density {
            eps: self.epsilon,
            min_pts_min: self.min_pts_min,
            min_pts_max: self.min_pts_max,
        };

        let mut states = vec![PointState::Unvisited; n];
        let mut store = MembershipStore::new(n);
        let mut n_clusters = 0;

        for point_idx in 0..n {
            if states[point_idx] != PointState::Unvisited {
                continue;
            }

            let nbrs = neighbors(matrix, point_idx, density.eps);
            if !density.is_core(nbrs.len()) {
                // Noise for now; may still be claimed as a border point.
                states[point_idx] = PointState::Sparse;
                continue;
            }
            states[point_idx] = PointState::Core;

            let cluster = n_clusters;
            n_clusters += 1;
            log::debug!(
                "opening cluster {cluster} at seed {point_idx} ({} neighbours)",
                nbrs.len()
            );

            let mut expander = Expander {
                matrix,
                density,
                order: self.frontier_order,
                states: &mut states,
                store: &mut store,
            };
            let expanded = expander.expand(point_idx, nbrs, cluster)?;
            log::debug!(
                "closed cluster {cluster}: {} core, {} border",
                expanded.cores,
                expanded.borders
            );
        }

        let labels: Vec<ClusterId> = (0..n)
            .map(|p| store.best(p).map_or(NOISE_LABEL, |(c, _)| c as ClusterId))
            .collect();
        let core = states.iter().map(|&s| s == PointState::Core).collect();

        let result = FuzzyClustering {
            labels,
            memberships: store,
            core,
            n_clusters,
        };

        log::info!(
            "fuzzy dbscan: {n} points, {n_clusters} clusters, {} noise",
            result.noise_count()
        );
        if self.log_assignments {
            for (i, label) in result.labels.iter().enumerate() {
                log::info!("point {i}: cluster {label}");
            }
        }

        Ok(result)
    }
}

impl Default for FuzzyDbscan {
    fn default() -> Self {
        Self::new(0.5, 3, 8)
    }
}

/// Outcome of a fuzzy DBSCAN fit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzyClustering {
    labels: Vec<ClusterId>,
    memberships: MembershipStore,
    core: Vec<bool>,
    n_clusters: usize,
}

impl FuzzyClustering {
    /// One label per input point, in input order.
    pub fn labels(&self) -> &[ClusterId] {
        &self.labels
    }

    /// Consume the result, keeping only the labels.
    pub fn into_labels(self) -> Vec<ClusterId> {
        self.labels
    }

    /// Number of clusters discovered.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of points labeled noise.
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE_LABEL).count()
    }

    /// Degree of `point` in `cluster`, or `None` if it is not a member.
    pub fn degree(&self, point: usize, cluster: usize) -> Option<f32> {
        self.memberships.get(point, cluster)
    }

    /// Every `(cluster, degree)` pair recorded for `point`.
    pub fn memberships(&self, point: usize) -> &[(usize, f32)] {
        self.memberships.of(point)
    }

    /// Degree of `point` in its assigned cluster; `None` for noise.
    pub fn best_degree(&self, point: usize) -> Option<f32> {
        self.memberships.best(point).map(|(_, d)| d)
    }

    /// Whether `point` anchored its cluster as a core point.
    pub fn is_core(&self, point: usize) -> bool {
        self.core[point]
    }

    /// The full membership table.
    pub fn membership_store(&self) -> &MembershipStore {
        &self.memberships
    }
}

/// Cluster `data` and return one [`ClusterId`] per point.
pub fn fuzzy_dbscan(
    data: &[Vec<f32>],
    epsilon: f32,
    min_pts_min: usize,
    min_pts_max: usize,
) -> Result<Vec<ClusterId>> {
    FuzzyDbscan::new(epsilon, min_pts_min, min_pts_max)
        .fit(data)
        .map(FuzzyClustering::into_labels)
}

impl Clustering for FuzzyDbscan {
    /// Noise points are labeled [`NOISE`].
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        let fit = self.fit(data)?;
        Ok(fit
            .labels
            .into_iter()
            .map(|l| if l >= 0 { l as usize } else { NOISE })
            .collect())
    }

    /// Fuzzy DBSCAN discovers clusters dynamically, so this returns 0.
    ///
    /// Use [`FuzzyClustering::n_clusters`] after fitting.
    fn n_clusters(&self) -> usize {
        0
    }
}

/// Extended interface with noise as `None`.
pub trait FuzzyDbscanExt {
    /// Fit and predict, returning labels where noise is marked as `None`.
    fn fit_predict_with_noise(&self, data: &[Vec<f32>]) -> Result<Vec<Option<usize>>>;

    /// Check if a label represents noise.
    fn is_noise(label: usize) -> bool {
        label == NOISE
    }
}

impl FuzzyDbscanExt for FuzzyDbscan {
    fn fit_predict_with_noise(&self, data: &[Vec<f32>]) -> Result<Vec<Option<usize>>> {
        let fit = self.fit(data)?;
        Ok(fit
            .labels
            .into_iter()
            .map(|l| usize::try_from(l).ok())
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::needless_range_loop)]
mod tests {
    use super::*;

    fn line(xs: &[f32]) -> Vec<Vec<f32>> {
        xs.iter().map(|&x| vec![x]).collect()
    }

    #[test]
    fn three_on_a_line_and_an_outlier() {
        let data = line(&[0.0, 1.0, 2.0, 10.0]);
        let fit = FuzzyDbscan::new(1.5, 1, 3).fit(&data).unwrap();

        assert_eq!(fit.labels(), &[0, 0, 0, -1]);
        assert_eq!(fit.n_clusters(), 1);
        assert_eq!(fit.noise_count(), 1);

        // Ends see two points, the middle three.
        assert_eq!(fit.degree(0, 0), Some(0.5));
        assert_eq!(fit.degree(1, 0), Some(1.0));
        assert_eq!(fit.degree(2, 0), Some(0.5));
        assert_eq!(fit.degree(3, 0), None);
        assert_eq!(fit.best_degree(3), None);
        assert!(fit.is_core(0) && fit.is_core(1) && fit.is_core(2));
        assert!(!fit.is_core(3));
    }

    #[test]
    fn single_point() {
        let data = vec![vec![3.0, 4.0]];
        assert_eq!(fuzzy_dbscan(&data, 1.0, 1, 2).unwrap(), vec![-1]);
        assert_eq!(fuzzy_dbscan(&data, 1.0, 5, 9).unwrap(), vec![-1]);

        // With min_pts_min = 0 a lone point is its own dense neighbourhood.
        let fit = FuzzyDbscan::new(1.0, 0, 1).fit(&data).unwrap();
        assert_eq!(fit.labels(), &[0]);
        assert_eq!(fit.degree(0, 0), Some(1.0));
    }

    #[test]
    fn two_well_separated_clusters() {
        let mut data = Vec::new();
        for i in 0..5 {
            data.push(vec![i as f32 * 0.1, 0.05 * (i % 2) as f32]);
        }
        for i in 0..5 {
            data.push(vec![100.0 + i as f32 * 0.1, 100.0 - 0.05 * (i % 2) as f32]);
        }

        let fit = FuzzyDbscan::new(1.0, 2, 4).fit(&data).unwrap();
        let labels = fit.labels();

        assert_eq!(fit.n_clusters(), 2);
        assert_eq!(fit.noise_count(), 0);
        for &l in &labels[1..5] {
            assert_eq!(l, labels[0]);
        }
        for &l in &labels[6..10] {
            assert_eq!(l, labels[5]);
        }
        assert_eq!(labels[0], 0);
        assert_eq!(labels[5], 1);
        // Every point sees its whole group of five.
        for p in 0..10 {
            assert_eq!(fit.best_degree(p), Some(1.0));
        }
    }

    #[test]
    fn isolated_point_is_noise() {
        let mut data = line(&[0.0, 0.1, 0.2, 0.3]);
        data.push(vec![50.0]);
        let labels = fuzzy_dbscan(&data, 0.5, 2, 4).unwrap();
        assert_eq!(labels[4], NOISE_LABEL);
        assert!(labels[..4].iter().all(|&l| l == 0));
    }

    #[test]
    fn shared_border_goes_to_stronger_cluster() {
        // Point 3 (x = 0) borders a thin cluster on the right (degree 0.5),
        // discovered first, and a dense one on the left (degree 1).
        let data = line(&[1.0, 1.5, 2.0, 0.0, -2.0, -1.5, -1.5, -1.5, -1.0]);
        let fit = FuzzyDbscan::new(1.0, 3, 5).fit(&data).unwrap();

        assert_eq!(fit.n_clusters(), 2);
        assert_eq!(fit.memberships(3), &[(0, 0.5), (1, 1.0)]);
        assert_eq!(fit.labels(), &[0, 0, 0, 1, 1, 1, 1, 1, 1]);
        assert!(!fit.is_core(3));
    }

    #[test]
    fn shared_border_tie_goes_to_first_cluster() {
        let data = line(&[
            0.0, -2.0, -1.5, -1.5, -1.5, -1.0, 1.0, 1.5, 1.5, 1.5, 2.0,
        ]);
        let fit = FuzzyDbscan::new(1.0, 3, 5).fit(&data).unwrap();

        assert_eq!(fit.n_clusters(), 2);
        assert_eq!(fit.memberships(0), &[(0, 1.0), (1, 1.0)]);
        assert_eq!(fit.labels()[0], 0);
        assert!(fit.labels()[1..6].iter().all(|&l| l == 0));
        assert!(fit.labels()[6..].iter().all(|&l| l == 1));
    }

    #[test]
    fn frontier_order_does_not_matter() {
        let data: Vec<Vec<f32>> = (0..40)
            .map(|i| {
                let t = i as f32;
                vec![(t * 0.37).sin() * 3.0, (t * 0.91).cos() * 3.0]
            })
            .collect();
        for (eps, lo, hi) in [(0.8, 1, 3), (1.2, 2, 6), (0.5, 0, 2)] {
            let lifo = FuzzyDbscan::new(eps, lo, hi)
                .with_frontier_order(FrontierOrder::Lifo)
                .fit(&data)
                .unwrap();
            let fifo = FuzzyDbscan::new(eps, lo, hi)
                .with_frontier_order(FrontierOrder::Fifo)
                .fit(&data)
                .unwrap();
            assert_eq!(lifo, fifo, "eps={eps} lo={lo} hi={hi}");
        }
    }

    #[test]
    fn repeated_fits_are_identical() {
        let data = line(&[0.0, 0.2, 0.4, 3.0, 3.1, 9.0]);
        let model = FuzzyDbscan::new(0.5, 1, 3);
        let a = model.fit(&data).unwrap();
        let b = model.fit(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fit_distances_matches_fit() {
        let data = line(&[0.0, 0.2, 0.4, 3.0, 3.1, 9.0]);
        let model = FuzzyDbscan::new(0.5, 1, 3);
        let matrix = DistanceMatrix::compute(&data).unwrap();
        assert_eq!(model.fit_distances(&matrix).unwrap(), model.fit(&data).unwrap());
    }

    #[test]
    fn zero_epsilon_only_merges_duplicates() {
        let data = line(&[1.0, 1.0, 2.0]);
        let labels = fuzzy_dbscan(&data, 0.0, 1, 2).unwrap();
        assert_eq!(labels, vec![0, 0, -1]);
    }

    #[test]
    fn unsigned_and_optional_labels() {
        let data = line(&[0.0, 1.0, 2.0, 10.0]);
        let model = FuzzyDbscan::new(1.5, 1, 3);

        let labels = model.fit_predict(&data).unwrap();
        assert_eq!(labels, vec![0, 0, 0, NOISE]);
        assert!(FuzzyDbscan::is_noise(labels[3]));
        assert_eq!(model.n_clusters(), 0);

        let labels = model.fit_predict_with_noise(&data).unwrap();
        assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);
    }

    #[test]
    fn logging_assignments_keeps_result() {
        let data = line(&[0.0, 1.0, 2.0, 10.0]);
        let quiet = FuzzyDbscan::new(1.5, 1, 3).fit(&data).unwrap();
        let loud = FuzzyDbscan::new(1.5, 1, 3)
            .with_log_assignments(true)
            .fit(&data)
            .unwrap();
        assert_eq!(quiet, loud);
    }

    #[test]
    fn rejects_bad_parameters() {
        let data = line(&[0.0, 1.0]);

        let err = FuzzyDbscan::new(1.0, 2, 2).fit(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "min_pts_max", .. }));
        assert!(FuzzyDbscan::new(1.0, 3, 2).fit(&data).is_err());

        let err = FuzzyDbscan::new(-0.1, 1, 2).fit(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "epsilon", .. }));
        assert!(FuzzyDbscan::new(f32::NAN, 1, 2).validate().is_err());
    }

    #[test]
    fn parameters_checked_before_data() {
        let empty: Vec<Vec<f32>> = vec![];
        let err = FuzzyDbscan::new(1.0, 2, 2).fit(&empty).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_bad_input() {
        let empty: Vec<Vec<f32>> = vec![];
        assert_eq!(FuzzyDbscan::default().fit(&empty), Err(Error::EmptyInput));

        let ragged = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            FuzzyDbscan::default().fit(&ragged),
            Err(Error::DimensionMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn builder_setters() {
        let model = FuzzyDbscan::default()
            .with_epsilon(2.5)
            .with_min_pts_min(4)
            .with_min_pts_max(7);
        assert_eq!(model.epsilon(), 2.5);
        assert_eq!(model.min_pts_min(), 4);
        assert_eq!(model.min_pts_max(), 7);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn chain_is_one_cluster() {
        let data: Vec<Vec<f32>> = (0..10).map(|i| vec![i as f32 * 0.3, 0.0]).collect();
        let fit = FuzzyDbscan::new(0.5, 1, 3).fit(&data).unwrap();
        assert_eq!(fit.n_clusters(), 1);
        assert!(fit.labels().iter().all(|&l| l == 0));
        // Chain ends have one neighbour less than the interior.
        assert!((fit.degree(0, 0).unwrap() - 0.5).abs() < 1e-6);
        assert!((fit.degree(5, 0).unwrap() - 1.0).abs() < 1e-6);
    }
}
