//! Problem dimensions and the command-line pieces shared by the binaries.

use std::num::NonZeroUsize;

use clap::Args;

use crate::error::{Error, Result};

pub const DEFAULT_NRA: usize = 5000;
pub const DEFAULT_NCA: usize = 1000;
pub const DEFAULT_NCB: usize = 1000;

/// Shape of `C = A * B`: A is `nra x nca`, B is `nca x ncb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub nra: usize,
    pub nca: usize,
    pub ncb: usize,
}

impl Dims {
    pub fn new(nra: usize, nca: usize, ncb: usize) -> Result<Dims> {
        for (name, value) in [("nra", nra), ("nca", nca), ("ncb", ncb)] {
            if value == 0 {
                return Err(Error::InvalidDimension { name, value });
            }
        }
        Ok(Dims { nra, nca, ncb })
    }

    /// Number of floating point operations in the multiply.
    pub fn flops(&self) -> f64 {
        2.0 * (self.nra * self.nca * self.ncb) as f64
    }
}

impl Default for Dims {
    fn default() -> Self {
        Dims {
            nra: DEFAULT_NRA,
            nca: DEFAULT_NCA,
            ncb: DEFAULT_NCB,
        }
    }
}

impl std::fmt::Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "a[{nra}][{nca}] b[{nca}][{ncb}] c[{nra}][{ncb}]",
            nra = self.nra,
            nca = self.nca,
            ncb = self.ncb
        )
    }
}

/// Matrix dimensions and output toggle, flattened into every binary.
#[derive(Debug, Clone, Args)]
pub struct DimArgs {
    /// Number of rows in matrix A.
    #[arg(long, default_value = "5000")]
    pub nra: NonZeroUsize,
    /// Number of columns in matrix A (and rows in matrix B).
    #[arg(long, default_value = "1000")]
    pub nca: NonZeroUsize,
    /// Number of columns in matrix B.
    #[arg(long, default_value = "1000")]
    pub ncb: NonZeroUsize,
    /// Print the result matrix once the multiply finishes. Keep this off for
    /// large dimensions.
    #[arg(long)]
    pub print: bool,
}

impl DimArgs {
    pub fn dims(&self) -> Dims {
        Dims {
            nra: self.nra.get(),
            nca: self.nca.get(),
            ncb: self.ncb.get(),
        }
    }
}
