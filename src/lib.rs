//! Dense matrix multiplication under three execution models.
//!
//! * [`composables::TripleLoop`] runs the naive triple loop on one thread and
//!   is the reference every other model is checked against.
//! * [`composables::ParallelRows`] hands contiguous chunks of rows to a fixed
//!   pool of threads with a static round-robin schedule.
//! * [`composables::RowPartition`] splits the rows of `A` over worker ranks
//!   that only talk to the coordinator through messages, then stitches the
//!   partial results back together.

pub mod composables;
pub mod config;
pub mod distributed;
pub mod error;
pub mod matrix;
pub mod thread_comm;
pub mod util;

pub use composables::{GemmNode, ParallelRows, RowPartition, TripleLoop};
pub use config::Dims;
pub use error::{Error, Result};
pub use matrix::{Matrix, Scalar};
