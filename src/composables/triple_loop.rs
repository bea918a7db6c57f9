use crate::composables::{check_conformal, GemmNode};
use crate::error::Result;
use crate::matrix::{Matrix, Scalar};

/// `c_rows = a_rows * b` for a contiguous run of rows.
///
/// `a_rows` holds `r` rows of width `b.height()` and `c_rows` holds `r` rows of
/// width `b.width()`. Every kernel ends up here, so they all sum in the same
/// order.
pub fn multiply_rows<T: Scalar>(a_rows: &[T], b: &Matrix<T>, c_rows: &mut [T]) {
    let k = b.height();
    let n = b.width();
    if n == 0 {
        return;
    }
    if k == 0 {
        c_rows.iter_mut().for_each(|e| *e = T::zero());
        return;
    }
    debug_assert_eq!(a_rows.len() / k, c_rows.len() / n);

    for (a_row, c_row) in a_rows.chunks(k).zip(c_rows.chunks_mut(n)) {
        for (x, c_elem) in c_row.iter_mut().enumerate() {
            let mut sum = T::zero();
            for (z, &a_elem) in a_row.iter().enumerate() {
                sum += a_elem * b.get(z, x);
            }
            *c_elem = sum;
        }
    }
}

/// Single threaded reference multiply.
#[derive(Debug, Default, Clone, Copy)]
pub struct TripleLoop {}

impl TripleLoop {
    pub fn new() -> TripleLoop {
        TripleLoop {}
    }
}

impl<T: Scalar> GemmNode<T> for TripleLoop {
    fn run(&mut self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
        check_conformal(a, b, c)?;
        multiply_rows(a.as_slice(), b, c.as_mut_slice());
        Ok(())
    }
    fn description(&self) -> String {
        "serial".to_string()
    }
}
