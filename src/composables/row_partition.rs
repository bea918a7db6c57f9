use log::{error, info};
use threadpool::ThreadPool;

use crate::composables::{check_conformal, GemmNode};
use crate::distributed::{serve, Coordinator, Packet};
use crate::error::{Error, Result};
use crate::matrix::{Matrix, Scalar};
use crate::thread_comm::RankComm;

/// Message-passing multiply over `n_tasks` ranks: this thread is the
/// coordinator and the other `n_tasks - 1` ranks run as workers on a pool.
///
/// Each run builds a fresh group; a worker handles exactly one work unit and
/// then leaves the group.
pub struct RowPartition {
    n_tasks: usize,
    pool: ThreadPool,
}

impl RowPartition {
    /// Fails with [`Error::TooFewTasks`] unless there is room for at least one
    /// worker besides the coordinator.
    pub fn new(n_tasks: usize) -> Result<RowPartition> {
        if n_tasks < 2 {
            return Err(Error::TooFewTasks { available: n_tasks });
        }
        let pool = threadpool::Builder::new()
            .num_threads(n_tasks - 1)
            .thread_name("mm-worker".to_string())
            .build();
        Ok(RowPartition { n_tasks, pool })
    }

    pub fn num_tasks(&self) -> usize {
        self.n_tasks
    }
    pub fn num_workers(&self) -> usize {
        self.n_tasks - 1
    }
}

impl<T: Scalar> GemmNode<T> for RowPartition {
    fn run(&mut self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
        check_conformal(a, b, c)?;

        let mut world: Vec<RankComm<Packet<T>>> = RankComm::world(self.n_tasks);
        let root = world.remove(0);
        for comm in world {
            self.pool.execute(move || {
                let rank = comm.rank();
                if let Err(e) = serve(comm) {
                    error!("worker {} failed: {}", rank, e);
                }
            });
        }

        //root is dropped before the join, so a worker that never got its unit
        //sees a disconnect instead of blocking the join
        let outcome = Coordinator::new(root).and_then(|mut coord| coord.run(a, b, c));
        self.pool.join();
        info!("{} workers done", self.num_workers());
        outcome
    }
    fn description(&self) -> String {
        format!("message passing, {} tasks", self.n_tasks)
    }
}
