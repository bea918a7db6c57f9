mod gemm;
mod parallel_range;
mod row_partition;
mod triple_loop;

pub use self::gemm::{check_conformal, GemmNode};
pub use self::parallel_range::{static_schedule, ParallelRows};
pub use self::row_partition::RowPartition;
pub use self::triple_loop::{multiply_rows, TripleLoop};
