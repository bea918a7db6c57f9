use log::{debug, info};

use crate::composables::check_conformal;
use crate::distributed::{partition_rows, Packet, RowRange, WorkUnit, COORDINATOR};
use crate::error::{Error, Result};
use crate::matrix::{Matrix, Scalar};
use crate::thread_comm::{RankComm, Source};

/// Rank 0: splits A by rows, ships the pieces out and reassembles C.
pub struct Coordinator<T: Scalar> {
    comm: RankComm<Packet<T>>,
}

impl<T: Scalar> Coordinator<T> {
    /// Fails unless `comm` is rank 0 of a group with at least one worker.
    pub fn new(comm: RankComm<Packet<T>>) -> Result<Coordinator<T>> {
        if comm.size() < 2 {
            return Err(Error::TooFewTasks {
                available: comm.size(),
            });
        }
        if comm.rank() != COORDINATOR {
            return Err(Error::Protocol(format!(
                "rank {} cannot coordinate, only rank {} can",
                comm.rank(),
                COORDINATOR
            )));
        }
        Ok(Coordinator { comm })
    }

    pub fn num_workers(&self) -> usize {
        self.comm.size() - 1
    }

    /// Sends every worker, in rank order, its rows of A and a copy of B.
    /// Returns the ranges handed out; entry `i` went to rank `i + 1`.
    pub fn dispatch(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Vec<RowRange>> {
        let assignments = partition_rows(a.height(), self.num_workers());
        info!(
            "sending {} rows to {} workers ({} each, {} get one more)",
            a.height(),
            self.num_workers(),
            a.height() / self.num_workers(),
            a.height() % self.num_workers()
        );

        for (i, &range) in assignments.iter().enumerate() {
            let dest = i + 1;
            let unit = WorkUnit {
                range,
                a_block: a.copy_rows(range.offset, range.rows)?,
                b: b.clone(),
            };
            self.comm.send(dest, Packet::Work(unit))?;
            debug!("dispatched rows {} to worker {}", range, dest);
        }
        Ok(assignments)
    }

    /// Waits for one partial result per worker, in whatever order they finish,
    /// and writes each block into `c` at its own offset.
    pub fn collect(&mut self, assignments: &[RowRange], c: &mut Matrix<T>) -> Result<()> {
        let mut received = vec![false; assignments.len()];

        for _ in 0..assignments.len() {
            let env = self.comm.recv(Source::Any)?;
            let source = env.source;
            let result = match env.body {
                Packet::Result(result) => result,
                Packet::Work(_) => {
                    return Err(Error::Protocol(format!(
                        "worker {} sent work to the coordinator",
                        source
                    )))
                }
            };

            let slot = source
                .checked_sub(1)
                .filter(|&i| i < assignments.len())
                .ok_or_else(|| Error::Protocol(format!("reply from unknown rank {}", source)))?;
            if received[slot] {
                return Err(Error::Protocol(format!("worker {} replied twice", source)));
            }
            if result.range != assignments[slot] || result.c_block.height() != result.range.rows {
                return Err(Error::Protocol(format!(
                    "worker {} was given rows {} but returned {} with {} rows",
                    source,
                    assignments[slot],
                    result.range,
                    result.c_block.height()
                )));
            }

            c.write_rows(result.range.offset, &result.c_block)?;
            received[slot] = true;
            debug!("received rows {} from worker {}", result.range, source);
        }
        Ok(())
    }

    /// `c = a * b` across all workers.
    pub fn run(&mut self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
        check_conformal(a, b, c)?;
        let assignments = self.dispatch(a, b)?;
        self.collect(&assignments, c)?;
        info!("received results from {} workers", assignments.len());
        Ok(())
    }
}
