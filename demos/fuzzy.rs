//! Fuzzy DBSCAN on a small 2D dataset.
//!
//! Run with `RUST_LOG=debug` to see clusters open and close.

use fuzzy_clump::{FuzzyDbscan, NOISE_LABEL};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Two groups joined by a thin bridge, plus an outlier.
    let data: Vec<Vec<f32>> = vec![
        // Dense group A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        vec![0.1, -0.1],
        // Thin tail off A
        vec![0.8, 0.0],
        vec![1.5, 0.0],
        // Dense group B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Outlier
        vec![10.0, -3.0],
    ];

    let (eps, lo, hi) = (0.8, 2, 5);
    let fit = match FuzzyDbscan::new(eps, lo, hi).fit(&data) {
        Ok(fit) => fit,
        Err(error) => {
            log::error!("Error: {error}");
            std::process::exit(1);
        }
    };

    println!("=== Fuzzy DBSCAN (eps={eps}, min_pts_min={lo}, min_pts_max={hi}) ===");
    for (i, &label) in fit.labels().iter().enumerate() {
        let tag = if label == NOISE_LABEL {
            "NOISE".to_string()
        } else {
            let kind = if fit.is_core(i) { "core" } else { "border" };
            format!(
                "cluster {label} ({kind}, degree {:.2})",
                fit.best_degree(i).unwrap_or_default()
            )
        };
        println!("  point {:2} ({:5.1}, {:5.1}) => {}", i, data[i][0], data[i][1], tag);
    }
    println!(
        "{} clusters, {} noise points",
        fit.n_clusters(),
        fit.noise_count()
    );
}
