//Public Modules
mod matrix;
mod row_major;

pub use self::matrix::{Scalar, ScalarConstants};
pub use self::row_major::Matrix;
