use std::time::Instant;

use crate::config::Dims;
use crate::matrix::{Matrix, Scalar};

pub fn dur_seconds(start: Instant) -> f64 {
    start.elapsed().as_secs_f64()
}

pub fn gflops(dims: Dims, seconds: f64) -> f64 {
    dims.flops() / seconds / 1E9
}

/// Largest elementwise `|expected - actual| / max(|expected|, 1)`.
///
/// Infinite when the shapes differ.
pub fn max_rel_error<T: Scalar>(expected: &Matrix<T>, actual: &Matrix<T>) -> f64 {
    if expected.height() != actual.height() || expected.width() != actual.width() {
        return f64::INFINITY;
    }
    expected
        .as_slice()
        .iter()
        .zip(actual.as_slice())
        .map(|(&e, &a)| {
            let (e, a) = (e.to_f64(), a.to_f64());
            (e - a).abs() / e.abs().max(1.0)
        })
        .fold(0.0, f64::max)
}

/// The banner every driver prints before it starts.
pub fn print_banner(title: &str, dims: Dims) {
    let rule = "-".repeat(title.len());
    println!("{}", rule);
    println!("{}", title);
    println!("{}", rule);
    println!("matrix dimensions: {}", dims);
}
