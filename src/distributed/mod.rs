//! Row decomposition of `C = A * B` over ranks that share nothing.
//!
//! Rank [`COORDINATOR`] owns A, B and C. It hands every worker rank a
//! [`WorkUnit`]: a contiguous block of rows of A plus a full copy of B, since
//! each row of C needs every column of B. Workers answer with a
//! [`PartialResult`] carrying the same [`RowRange`] header, which is all the
//! coordinator needs to put the block back in the right place no matter which
//! worker finishes first.

mod coordinator;
mod partition;
mod worker;

pub use self::coordinator::Coordinator;
pub use self::partition::{partition_rows, rows_for_worker, RowRange};
pub use self::worker::{compute, serve};

use crate::matrix::{Matrix, Scalar};

/// Rank of the coordinator. Workers are ranks `1..size`.
pub const COORDINATOR: usize = 0;

/// Coordinator to worker.
#[derive(Debug, Clone)]
pub struct WorkUnit<T: Scalar> {
    pub range: RowRange,
    pub a_block: Matrix<T>,
    pub b: Matrix<T>,
}

/// Worker to coordinator.
#[derive(Debug, Clone)]
pub struct PartialResult<T: Scalar> {
    pub range: RowRange,
    pub c_block: Matrix<T>,
}

/// Everything that travels between ranks. The header and its payload always
/// move together in one message.
#[derive(Debug)]
pub enum Packet<T: Scalar> {
    Work(WorkUnit<T>),
    Result(PartialResult<T>),
}
