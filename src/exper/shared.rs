use std::num::NonZeroUsize;
use std::time::Instant;

use clap::Parser;
use log::info;
use typenum::U5;

use mmdist::config::DimArgs;
use mmdist::util;
use mmdist::{GemmNode, Matrix, ParallelRows};

/// Shared-memory matrix multiply: rows are dealt out to a thread pool five at
/// a time.
#[derive(Parser)]
#[command(name = "mm_shared", version)]
struct Cli {
    #[command(flatten)]
    dims: DimArgs,
    /// Worker threads. Defaults to the available parallelism.
    #[arg(short, long)]
    threads: Option<NonZeroUsize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let dims = cli.dims.dims();
    let threads = cli
        .threads
        .unwrap_or_else(|| std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN));

    let mut par: ParallelRows<U5> = ParallelRows::new(threads);
    util::print_banner(
        &format!("matrix multiply test (parallel {} threads, shared memory)", par.num_threads()),
        dims,
    );

    println!("-> initializing matrices");
    let mut a: Matrix<f64> = Matrix::new(dims.nra, dims.nca)?;
    let mut b: Matrix<f64> = Matrix::new(dims.nca, dims.ncb)?;
    let mut c: Matrix<f64> = Matrix::new(dims.nra, dims.ncb)?;
    par.init_inputs(&mut a, &mut b);

    //Zeroing C is the third phase and happens inside run
    println!("-> performing matrix multiply");
    let start = Instant::now();
    par.run(&a, &b, &mut c)?;
    let secs = util::dur_seconds(start);
    info!(
        "multiply took {:.3}s, {:.3} GFLOP/s",
        secs,
        util::gflops(dims, secs)
    );

    if cli.dims.print {
        print!("{}", c);
    }
    println!("-> complete");
    Ok(())
}
