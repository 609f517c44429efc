//! Fuzzy density clustering.
//!
//! `fuzzy_clump` clusters dense vectors with Fuzzy DBSCAN: a DBSCAN variant
//! where each point carries a membership degree in \[0, 1\] for the clusters
//! it belongs to, derived from how crowded its ε-neighbourhood is.
//!
//! The primary public API is under [`cluster`], which provides:
//! - the [`FuzzyDbscan`] estimator and its [`FuzzyClustering`] result
//! - the building blocks: [`DistanceMatrix`], [`neighbors`], [`degree`]
//!
//! Logging goes through the [`log`] facade; install any logger to see it.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    degree, fuzzy_dbscan, neighbors, ClusterId, Clustering, DistanceMatrix, FrontierOrder,
    FuzzyClustering, FuzzyDbscan, FuzzyDbscanExt, MembershipStore, NOISE, NOISE_LABEL,
};
pub use error::{Error, Result};
