//! Fuzzy density clustering.
//!
//! ## Hard vs Fuzzy Clustering
//!
//! **Hard clustering** assigns each item to exactly one cluster, or to noise.
//! DBSCAN draws a sharp line: a point with `MinPts` neighbours anchors a
//! cluster, one with `MinPts - 1` does not.
//!
//! **Fuzzy clustering** keeps a degree in \[0, 1\] per point and cluster. Fuzzy
//! DBSCAN softens the density threshold into a ramp between `min_pts_min` and
//! `min_pts_max`, so a point in a thin part of a cluster belongs to it less
//! than one in its dense centre. A crisp labeling is still derived at the end
//! by picking, for each point, the cluster where it is most strongly a member.
//!
//! ## Pipeline
//!
//! 1. [`DistanceMatrix`]: all pairwise Euclidean distances, upper triangle only.
//! 2. [`neighbors`]: the ε-ball of one point, by a linear scan of its row.
//! 3. [`degree`]: neighbour count to membership degree.
//! 4. Cluster expansion: flood fill from a seed core point through the cores
//!    reachable from it; border points take their best core neighbour's degree.
//! 5. [`FuzzyDbscan`]: drives the whole pass and derives the labels.
//!
//! ## Usage
//!
//! ```rust
//! use fuzzy_clump::cluster::{FuzzyDbscan, NOISE_LABEL};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![0.2, 0.0],
//!     vec![10.0, 10.0],
//! ];
//!
//! let fit = FuzzyDbscan::new(0.5, 1, 3).fit(&data).unwrap();
//! assert_eq!(fit.labels()[0], fit.labels()[1]);
//! assert_eq!(fit.labels()[3], NOISE_LABEL);
//! assert_eq!(fit.degree(0, 0), Some(1.0));
//! ```

mod distance;
mod expand;
mod fuzzy_dbscan;
mod membership;
mod neighborhood;
mod traits;
mod util;

pub use distance::DistanceMatrix;
pub use expand::FrontierOrder;
pub use fuzzy_dbscan::{
    fuzzy_dbscan, ClusterId, FuzzyClustering, FuzzyDbscan, FuzzyDbscanExt, NOISE, NOISE_LABEL,
};
pub use membership::{degree, MembershipStore};
pub use neighborhood::neighbors;
pub use traits::Clustering;
