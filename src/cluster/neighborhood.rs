use super::distance::DistanceMatrix;

/// All points within `eps` of `point`, in ascending index order.
///
/// The result always contains `point` itself. Linear scan over one matrix row;
/// nothing is cached between calls.
pub fn neighbors(matrix: &DistanceMatrix, point: usize, eps: f32) -> Vec<usize> {
    matrix
        .row(point)
        .enumerate()
        .filter(|&(_, d)| d <= eps)
        .map(|(j, _)| j)
        .collect()
}
