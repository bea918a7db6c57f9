use crate::error::{Error, Result};
use crate::matrix::{Matrix, Scalar};

/// A way of computing `C = A * B`.
///
/// Every implementor overwrites `c` completely, so callers don't need to
/// zero it first.
pub trait GemmNode<T: Scalar> {
    fn run(&mut self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<()>;
    fn description(&self) -> String;
}

/// Checks that `a` is `m x k`, `b` is `k x n` and `c` is `m x n`.
pub fn check_conformal<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, c: &Matrix<T>) -> Result<()> {
    if a.width() != b.height() || c.height() != a.height() || c.width() != b.width() {
        return Err(Error::ShapeMismatch {
            op: "gemm",
            expected: format!(
                "a[m][k] b[k][n] c[m][n] with m={} k={} n={}",
                a.height(),
                a.width(),
                b.width()
            ),
            actual: format!(
                "a[{}][{}] b[{}][{}] c[{}][{}]",
                a.height(),
                a.width(),
                b.height(),
                b.width(),
                c.height(),
                c.width()
            ),
        });
    }
    Ok(())
}
