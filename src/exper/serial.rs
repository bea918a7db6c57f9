use std::time::Instant;

use clap::Parser;
use log::info;

use mmdist::config::DimArgs;
use mmdist::util;
use mmdist::{GemmNode, Matrix, TripleLoop};

/// Single threaded matrix multiply.
#[derive(Parser)]
#[command(name = "mm_serial", version)]
struct Cli {
    #[command(flatten)]
    dims: DimArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let dims = cli.dims.dims();

    util::print_banner("matrix multiply test (serial)", dims);

    println!("-> initializing matrices");
    let mut a: Matrix<f64> = Matrix::new(dims.nra, dims.nca)?;
    let mut b: Matrix<f64> = Matrix::new(dims.nca, dims.ncb)?;
    let mut c: Matrix<f64> = Matrix::new(dims.nra, dims.ncb)?;
    a.fill_index_sum();
    b.fill_index_product();

    println!("-> performing matrix multiply");
    let start = Instant::now();
    TripleLoop::new().run(&a, &b, &mut c)?;
    let secs = util::dur_seconds(start);
    info!("multiply took {:.3}s, {:.3} GFLOP/s", secs, util::gflops(dims, secs));

    if cli.dims.print {
        print!("{}", c);
    }
    println!("-> complete");
    Ok(())
}
