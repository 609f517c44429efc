//! Pairwise Euclidean distances stored as a condensed upper triangle.
//!
//! For `n` points only the `n * (n - 1) / 2` entries with `i < j` are kept,
//! row by row. The diagonal is implicitly zero and lookups with `i > j`
//! are transposed, so the matrix is symmetric by construction.

use super::util;
use crate::error::Result;

/// Symmetric pairwise distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    /// Row-major upper triangle, diagonal excluded.
    condensed: Vec<f32>,
}

impl DistanceMatrix {
    /// Compute all pairwise Euclidean distances.
    ///
    /// Fails with [`Error::EmptyInput`](crate::Error::EmptyInput) for an empty
    /// slice and [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// when points disagree on dimensionality.
    pub fn compute(data: &[Vec<f32>]) -> Result<Self> {
        util::validate_points(data)?;
        let n = data.len();
        log::trace!("computing {} pairwise distances for {n} points", n * (n - 1) / 2);

        Ok(Self {
            n,
            condensed: upper_triangle(data),
        })
    }

    /// Number of points the matrix was built from.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false` for a matrix built by [`DistanceMatrix::compute`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.n && j < self.n, "point index out of bounds");
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.condensed[self.offset(i, j)],
            std::cmp::Ordering::Greater => self.condensed[self.offset(j, i)],
        }
    }

    /// Distances from point `i` to every point, in index order.
    pub fn row(&self, i: usize) -> impl Iterator<Item = f32> + '_ {
        (0..self.n).map(move |j| self.get(i, j))
    }

    /// Position of `(i, j)`, `i < j`, inside the condensed buffer.
    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        // Rows 0..i hold (n-1) + (n-2) + ... + (n-i) entries.
        i * (2 * self.n - i - 1) / 2 + (j - i - 1)
    }
}

#[cfg(not(feature = "parallel"))]
fn upper_triangle(data: &[Vec<f32>]) -> Vec<f32> {
    let n = data.len();
    let mut condensed = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            condensed.push(util::squared_euclidean(&data[i], &data[j]).sqrt());
        }
    }
    condensed
}

#[cfg(feature = "parallel")]
fn upper_triangle(data: &[Vec<f32>]) -> Vec<f32> {
    use rayon::prelude::*;

    let n = data.len();
    // Each row writes a disjoint slice; `collect` keeps row order.
    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            ((i + 1)..n).map(move |j| util::squared_euclidean(&data[i], &data[j]).sqrt())
        })
        .collect()
}
