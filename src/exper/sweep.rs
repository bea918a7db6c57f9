use std::num::NonZeroUsize;
use std::time::Instant;

use clap::Parser;
use log::info;

use mmdist::util;
use mmdist::{Dims, GemmNode, Matrix, ParallelRows, RowPartition, TripleLoop};

/// Times every execution model on square random matrices and checks each one
/// against the serial result.
#[derive(Parser)]
#[command(name = "mm_sweep", version)]
struct Cli {
    /// Square sizes to run.
    #[arg(long, value_delimiter = ',', default_value = "64,128,256,512")]
    sizes: Vec<NonZeroUsize>,
    /// Repetitions per size; the best time is reported.
    #[arg(long, default_value_t = 3)]
    reps: usize,
    /// Threads for the shared-memory model.
    #[arg(long, default_value = "4")]
    threads: NonZeroUsize,
    /// Ranks for the message-passing model, coordinator included.
    #[arg(long, default_value_t = 4)]
    tasks: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut models: Vec<Box<dyn GemmNode<f64>>> = vec![
        Box::new(ParallelRows::<typenum::U5>::new(cli.threads)),
        Box::new(RowPartition::new(cli.tasks)?),
    ];
    let mut oracle = TripleLoop::new();

    print!("size\tserial");
    for model in &models {
        print!("\t{}", model.description());
    }
    println!("\tmax rel err");

    for size in &cli.sizes {
        let size = size.get();
        let dims = Dims::new(size, size, size)?;

        let mut a: Matrix<f64> = Matrix::new(size, size)?;
        let mut b: Matrix<f64> = Matrix::new(size, size)?;
        a.fill_rand();
        b.fill_rand();
        let mut c_ref = Matrix::new(size, size)?;
        let mut c = Matrix::new(size, size)?;

        let mut best = vec![f64::INFINITY; models.len() + 1];
        let mut worst_err: f64 = 0.0;
        for _ in 0..cli.reps.max(1) {
            let start = Instant::now();
            oracle.run(&a, &b, &mut c_ref)?;
            best[0] = best[0].min(util::dur_seconds(start));

            for (i, model) in models.iter_mut().enumerate() {
                let start = Instant::now();
                model.run(&a, &b, &mut c)?;
                best[i + 1] = best[i + 1].min(util::dur_seconds(start));
                worst_err = worst_err.max(util::max_rel_error(&c_ref, &c));
            }
        }
        info!("size {} done", size);

        print!("{}", size);
        for secs in &best {
            print!("\t{:.3}", util::gflops(dims, *secs));
        }
        println!("\t{:e}", worst_err);
    }
    Ok(())
}
