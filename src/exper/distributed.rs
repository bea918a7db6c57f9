use std::time::Instant;

use clap::Parser;
use log::info;

use mmdist::config::DimArgs;
use mmdist::util;
use mmdist::{GemmNode, Matrix, RowPartition};

/// Message-passing matrix multiply: rank 0 splits A by rows over the other
/// ranks and gathers their pieces of C.
#[derive(Parser)]
#[command(name = "mm_distributed", version)]
struct Cli {
    #[command(flatten)]
    dims: DimArgs,
    /// Total ranks, coordinator included. At least two.
    #[arg(short = 'n', long, default_value_t = 4)]
    tasks: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let dims = cli.dims.dims();

    //Bail out before anything is allocated
    let mut dist = RowPartition::new(cli.tasks)?;

    util::print_banner(
        &format!("matrix multiply test (parallel {} tasks, message passing)", dist.num_tasks()),
        dims,
    );

    //Inputs are built serially on the coordinator
    println!("-> initializing matrices");
    let mut a: Matrix<f64> = Matrix::new(dims.nra, dims.nca)?;
    let mut b: Matrix<f64> = Matrix::new(dims.nca, dims.ncb)?;
    let mut c: Matrix<f64> = Matrix::new(dims.nra, dims.ncb)?;
    a.fill_index_sum();
    b.fill_index_product();

    println!("-> performing matrix multiply (sending tasks to workers)...");
    let start = Instant::now();
    dist.run(&a, &b, &mut c)?;
    let secs = util::dur_seconds(start);
    println!("-> received results from workers");
    info!(
        "{} workers took {:.3}s, {:.3} GFLOP/s",
        dist.num_workers(),
        secs,
        util::gflops(dims, secs)
    );

    if cli.dims.print {
        print!("{}", c);
    }
    println!("-> complete");
    Ok(())
}
