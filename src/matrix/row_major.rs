use core::fmt;
use core::ops::Range;

use rand::distributions::{Distribution, Standard};

use crate::error::{Error, Result};
use crate::matrix::Scalar;

/// A dense `h x w` matrix stored row-major in one contiguous buffer.
///
/// Element `(y, x)` lives at `y * w + x`. A run of consecutive rows is
/// therefore a single contiguous slice, which is what lets row blocks be
/// shipped between ranks and written back with one copy.
#[derive(Clone, PartialEq)]
pub struct Matrix<T: Scalar> {
    h: usize,
    w: usize,
    buffer: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Allocates a zero-filled matrix. Fails if the buffer can't be obtained.
    pub fn new(h: usize, w: usize) -> Result<Matrix<T>> {
        let capacity = h
            .checked_mul(w)
            .ok_or(Error::Allocation { rows: h, cols: w })?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation { rows: h, cols: w })?;
        buffer.resize(capacity, T::zero());

        Ok(Matrix { h, w, buffer })
    }

    /// Wraps an existing row-major buffer.
    pub fn from_vec(h: usize, w: usize, buffer: Vec<T>) -> Result<Matrix<T>> {
        if Some(buffer.len()) != h.checked_mul(w) {
            return Err(Error::ShapeMismatch {
                op: "from_vec",
                expected: format!("{} elements for {}x{}", h.saturating_mul(w), h, w),
                actual: format!("{} elements", buffer.len()),
            });
        }
        Ok(Matrix { h, w, buffer })
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.h
    }
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.w
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, y: usize, x: usize) -> T {
        debug_assert!(y < self.h && x < self.w);
        self.buffer[y * self.w + x]
    }
    #[inline(always)]
    pub fn set(&mut self, y: usize, x: usize, alpha: T) {
        debug_assert!(y < self.h && x < self.w);
        self.buffer[y * self.w + x] = alpha;
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer
    }
    pub fn into_vec(self) -> Vec<T> {
        self.buffer
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.buffer[y * self.w..(y + 1) * self.w]
    }

    fn row_span(&self, offset: usize, rows: usize) -> Result<Range<usize>> {
        match offset.checked_add(rows) {
            Some(end) if end <= self.h => Ok(offset * self.w..end * self.w),
            _ => Err(Error::ShapeMismatch {
                op: "row block",
                expected: format!("rows within [0, {})", self.h),
                actual: format!("rows [{}, {}+{})", offset, offset, rows),
            }),
        }
    }

    /// The contiguous slice holding rows `[offset, offset + rows)`.
    pub fn rows(&self, offset: usize, rows: usize) -> Result<&[T]> {
        let span = self.row_span(offset, rows)?;
        Ok(&self.buffer[span])
    }

    /// Copies rows `[offset, offset + rows)` out into their own matrix.
    pub fn copy_rows(&self, offset: usize, rows: usize) -> Result<Matrix<T>> {
        let src = self.rows(offset, rows)?;
        let mut block = Matrix::new(rows, self.w)?;
        block.buffer.copy_from_slice(src);
        Ok(block)
    }

    /// Writes `block` over the rows starting at `offset`.
    pub fn write_rows(&mut self, offset: usize, block: &Matrix<T>) -> Result<()> {
        if block.w != self.w {
            return Err(Error::ShapeMismatch {
                op: "write_rows",
                expected: format!("{} columns", self.w),
                actual: format!("{} columns", block.w),
            });
        }
        let span = self.row_span(offset, block.h)?;
        self.buffer[span].copy_from_slice(&block.buffer);
        Ok(())
    }

    pub fn fill_with<F: FnMut(usize, usize) -> T>(&mut self, mut f: F) {
        let w = self.w;
        for (y, row) in self.buffer.chunks_mut(w.max(1)).enumerate() {
            for (x, elem) in row.iter_mut().enumerate() {
                *elem = f(y, x);
            }
        }
    }

    pub fn fill_zero(&mut self) {
        self.buffer.iter_mut().for_each(|e| *e = T::zero());
    }

    /// `a[y][x] = y + x`, the left operand's synthetic values.
    pub fn fill_index_sum(&mut self) {
        self.fill_with(|y, x| T::from_index(y + x));
    }

    /// `b[y][x] = y * x`, the right operand's synthetic values.
    pub fn fill_index_product(&mut self) {
        self.fill_with(|y, x| T::from_index(y * x));
    }

    pub fn fill_rand(&mut self)
    where
        Standard: Distribution<T>,
    {
        let mut rng = rand::thread_rng();
        self.buffer
            .iter_mut()
            .for_each(|e| *e = Standard.sample(&mut rng));
    }
}

/// One row per line, each element as `%4.1f` followed by a space.
impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.h {
            for elem in self.row(y) {
                write!(f, "{:4.1} ", elem)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Scalar> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("h", &self.h)
            .field("w", &self.w)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_is_contiguous_row_major() {
        let mut m: Matrix<f64> = Matrix::new(3, 4).unwrap();
        m.fill_with(|y, x| (y * 10 + x) as f64);

        assert_eq!(m.len(), 12);
        assert_eq!(m.as_slice()[1 * 4 + 2], 12.0);
        assert_eq!(m.get(2, 3), 23.0);
        assert_eq!(m.row(1), &[10.0, 11.0, 12.0, 13.0]);
    }

    #[test]
    fn new_matrix_is_zeroed() {
        let m: Matrix<f64> = Matrix::new(5, 7).unwrap();
        assert!(m.as_slice().iter().all(|&e| e == 0.0));
    }

    #[test]
    fn oversized_allocation_is_an_error() {
        let err = Matrix::<f64>::new(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, Error::Allocation { .. }));
    }

    #[test]
    fn synthetic_fills_are_deterministic() {
        for _ in 0..2 {
            let mut a: Matrix<f64> = Matrix::new(4, 2).unwrap();
            let mut b: Matrix<f64> = Matrix::new(2, 3).unwrap();
            a.fill_index_sum();
            b.fill_index_product();

            assert_eq!(a.as_slice(), &[0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0]);
            assert_eq!(b.as_slice(), &[0.0, 0.0, 0.0, 0.0, 1.0, 2.0]);
        }
    }

    #[test]
    fn copy_and_write_rows() {
        let mut a: Matrix<f64> = Matrix::new(5, 3).unwrap();
        a.fill_index_sum();

        let block = a.copy_rows(1, 3).unwrap();
        assert_eq!(block.height(), 3);
        assert_eq!(block.row(0), a.row(1));
        assert_eq!(block.row(2), a.row(3));

        let mut c: Matrix<f64> = Matrix::new(5, 3).unwrap();
        c.write_rows(1, &block).unwrap();
        assert_eq!(c.row(0), &[0.0, 0.0, 0.0]);
        assert_eq!(c.row(3), a.row(3));
        assert_eq!(c.row(4), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_row_block_is_allowed() {
        let a: Matrix<f64> = Matrix::new(2, 3).unwrap();
        let block = a.copy_rows(2, 0).unwrap();
        assert!(block.is_empty());
    }

    #[test]
    fn out_of_range_rows_are_rejected() {
        let mut a: Matrix<f64> = Matrix::new(2, 3).unwrap();
        assert!(a.copy_rows(1, 2).is_err());

        let wide: Matrix<f64> = Matrix::new(1, 4).unwrap();
        assert!(a.write_rows(0, &wide).is_err());
    }

    #[test]
    fn display_matches_fixed_width_format() {
        let m = Matrix::from_vec(2, 2, vec![0.0, 1.5, 12.34, 3.0]).unwrap();
        assert_eq!(m.to_string(), " 0.0  1.5 \n12.3  3.0 \n");
    }
}
