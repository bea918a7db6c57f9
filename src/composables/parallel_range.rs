use core::marker::PhantomData;
use core::mem;
use core::ops::Range;
use std::num::NonZeroUsize;

use log::{info, trace};
use scoped_threadpool::Pool;
use typenum::{NonZero, Unsigned, U5};

use crate::composables::triple_loop::multiply_rows;
use crate::composables::{check_conformal, GemmNode};
use crate::config::Dims;
use crate::error::Result;
use crate::matrix::{Matrix, Scalar};

#[inline(always)]
fn chunk_owner(q: usize, n_threads: usize) -> usize {
    q % n_threads
}

/// Rows owned by each thread under a static chunked schedule.
///
/// Rows are cut into contiguous chunks of `chunk` rows (the last one may be
/// short) and chunk `q` belongs to thread `q % n_threads`. The assignment only
/// depends on the three arguments.
pub fn static_schedule(
    n_rows: usize,
    chunk: NonZeroUsize,
    n_threads: NonZeroUsize,
) -> Vec<Vec<Range<usize>>> {
    let (chunk, n_threads) = (chunk.get(), n_threads.get());
    let mut owned: Vec<Vec<Range<usize>>> = vec![Vec::new(); n_threads];
    let mut start = 0;
    let mut q = 0;
    while start < n_rows {
        let end = (start + chunk).min(n_rows);
        owned[chunk_owner(q, n_threads)].push(start..end);
        start = end;
        q += 1;
    }
    owned
}

/// Shared-memory multiply: the row loop is spread over a fixed pool of threads,
/// `Chunk` rows at a time.
///
/// Each phase forks, works on rows it owns exclusively, and joins before the
/// next phase may start. All threads read A and B; only the owner of a row of
/// C writes to it.
pub struct ParallelRows<Chunk: Unsigned + NonZero = U5> {
    n_threads: NonZeroUsize,
    pool: Pool,
    _chunk: PhantomData<Chunk>,
}

impl<Chunk: Unsigned + NonZero> ParallelRows<Chunk> {
    pub fn new(n_threads: NonZeroUsize) -> ParallelRows<Chunk> {
        let pool_size = u32::try_from(n_threads.get()).unwrap_or(u32::MAX);
        ParallelRows {
            n_threads,
            pool: Pool::new(pool_size),
            _chunk: PhantomData,
        }
    }

    pub fn num_threads(&self) -> usize {
        self.n_threads.get()
    }

    pub fn chunk_size(&self) -> usize {
        Chunk::USIZE
    }

    //One fork/join phase. f gets the first row of a chunk and the chunk's rows.
    fn for_each_owned_chunk<T, F>(&mut self, m: &mut Matrix<T>, f: F)
    where
        T: Scalar,
        F: Fn(usize, &mut [T]) + Sync,
    {
        if m.is_empty() {
            return;
        }
        let w = m.width();
        let n_threads = self.num_threads();
        let chunk = NonZeroUsize::new(Chunk::USIZE).unwrap_or(NonZeroUsize::MIN);
        let schedule = static_schedule(m.height(), chunk, self.n_threads);
        let n_chunks: usize = schedule.iter().map(Vec::len).sum();

        //Chunks are consecutive in q, so carve them off the front in that order
        let mut owned: Vec<Vec<(usize, &mut [T])>> = (0..n_threads).map(|_| Vec::new()).collect();
        let mut rest = m.as_mut_slice();
        for q in 0..n_chunks {
            let owner = chunk_owner(q, n_threads);
            let rows = schedule[owner][q / n_threads].clone();
            let (block, tail) = mem::take(&mut rest).split_at_mut(rows.len() * w);
            rest = tail;
            owned[owner].push((rows.start, block));
        }

        let f = &f;
        self.pool.scoped(|scope| {
            for (id, work) in owned.into_iter().enumerate() {
                scope.execute(move || {
                    trace!("job {} owns {} chunks", id, work.len());
                    for (first_row, block) in work {
                        f(first_row, block);
                    }
                });
            }
        });
    }

    /// Phases one and two: `a[i][j] = i + j`, then `b[i][j] = i * j`.
    pub fn init_inputs<T: Scalar>(&mut self, a: &mut Matrix<T>, b: &mut Matrix<T>) {
        let wa = a.width();
        self.for_each_owned_chunk(a, |first_row, block| {
            for (i, row) in block.chunks_mut(wa).enumerate() {
                for (x, elem) in row.iter_mut().enumerate() {
                    *elem = T::from_index(first_row + i + x);
                }
            }
        });

        let wb = b.width();
        self.for_each_owned_chunk(b, |first_row, block| {
            for (i, row) in block.chunks_mut(wb).enumerate() {
                for (x, elem) in row.iter_mut().enumerate() {
                    *elem = T::from_index((first_row + i) * x);
                }
            }
        });
    }

    /// Phase three.
    pub fn zero<T: Scalar>(&mut self, c: &mut Matrix<T>) {
        self.for_each_owned_chunk(c, |_, block| {
            block.iter_mut().for_each(|e| *e = T::zero());
        });
    }

    /// Phase four. Shapes must already be conformal.
    fn multiply<T: Scalar>(&mut self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) {
        let k = a.width();
        let n = c.width();
        let a_buf = a.as_slice();
        self.for_each_owned_chunk(c, |first_row, block| {
            let rows = block.len() / n;
            let a_rows = &a_buf[first_row * k..(first_row + rows) * k];
            multiply_rows(a_rows, b, block);
        });
    }

    /// Allocates A, B and C for `dims` and runs all four phases.
    pub fn run_all<T: Scalar>(&mut self, dims: Dims) -> Result<(Matrix<T>, Matrix<T>, Matrix<T>)> {
        let mut a = Matrix::new(dims.nra, dims.nca)?;
        let mut b = Matrix::new(dims.nca, dims.ncb)?;
        let mut c = Matrix::new(dims.nra, dims.ncb)?;

        info!("initializing matrices on {} threads", self.num_threads());
        self.init_inputs(&mut a, &mut b);
        self.zero(&mut c);

        info!("performing matrix multiply, chunk size {}", Chunk::USIZE);
        self.multiply(&a, &b, &mut c);
        Ok((a, b, c))
    }
}

impl<T: Scalar, Chunk: Unsigned + NonZero> GemmNode<T> for ParallelRows<Chunk> {
    fn run(&mut self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
        check_conformal(a, b, c)?;
        self.zero(c);
        self.multiply(a, b, c);
        Ok(())
    }
    fn description(&self) -> String {
        format!(
            "shared memory, {} threads, chunk {}",
            self.num_threads(),
            Chunk::USIZE
        )
    }
}
