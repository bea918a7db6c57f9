use log::debug;

use crate::composables::multiply_rows;
use crate::distributed::{Packet, PartialResult, WorkUnit, COORDINATOR};
use crate::error::{Error, Result};
use crate::matrix::{Matrix, Scalar};
use crate::thread_comm::{RankComm, Source};

/// Multiplies a work unit's rows of A by its copy of B.
pub fn compute<T: Scalar>(unit: &WorkUnit<T>) -> Result<PartialResult<T>> {
    let a = &unit.a_block;
    if a.height() != unit.range.rows || a.width() != unit.b.height() {
        return Err(Error::Protocol(format!(
            "work unit for rows {} carries a {}x{} block of A and a {}x{} B",
            unit.range,
            a.height(),
            a.width(),
            unit.b.height(),
            unit.b.width()
        )));
    }

    let mut c_block = Matrix::new(unit.range.rows, unit.b.width())?;
    multiply_rows(a.as_slice(), &unit.b, c_block.as_mut_slice());
    Ok(PartialResult {
        range: unit.range,
        c_block,
    })
}

/// Worker side of the exchange: one work unit in, one partial result out.
pub fn serve<T: Scalar>(mut comm: RankComm<Packet<T>>) -> Result<()> {
    let rank = comm.rank();
    let unit = match comm.recv(Source::Rank(COORDINATOR))?.body {
        Packet::Work(unit) => unit,
        Packet::Result(_) => {
            return Err(Error::Protocol(format!(
                "worker {} was sent a partial result instead of work",
                rank
            )))
        }
    };
    debug!("worker {} received rows {}", rank, unit.range);

    let result = compute(&unit)?;
    comm.send(COORDINATOR, Packet::Result(result))?;
    debug!("worker {} returned rows {}", rank, unit.range);
    Ok(())
}
