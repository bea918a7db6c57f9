use core::fmt;
use core::ops::Range;

/// A contiguous run of `rows` rows starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowRange {
    pub offset: usize,
    pub rows: usize,
}

impl RowRange {
    pub fn new(offset: usize, rows: usize) -> RowRange {
        RowRange { offset, rows }
    }
    pub fn end(&self) -> usize {
        self.offset + self.rows
    }
    pub fn as_range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.offset, self.end())
    }
}

/// Rows given to worker `w` (1-indexed) out of `numworkers`.
///
/// Everyone gets `nra / numworkers`; the first `nra % numworkers` workers get
/// one extra. `None` unless `1 <= w <= numworkers`.
pub fn rows_for_worker(nra: usize, numworkers: usize, w: usize) -> Option<usize> {
    if w == 0 || w > numworkers {
        return None;
    }
    let averow = nra / numworkers;
    let extra = nra % numworkers;
    Some(if w <= extra { averow + 1 } else { averow })
}

/// The row range of every worker, in rank order: entry `i` belongs to worker
/// rank `i + 1`. Ranges are laid end to end from row 0 and cover `[0, nra)`.
/// Empty when there are no workers.
pub fn partition_rows(nra: usize, numworkers: usize) -> Vec<RowRange> {
    let mut offset = 0;
    (1..=numworkers)
        .filter_map(|w| rows_for_worker(nra, numworkers, w))
        .map(|rows| {
            let range = RowRange::new(offset, rows);
            offset += rows;
            range
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uneven_split_gives_extras_to_first_workers() {
        let ranges = partition_rows(4, 3);
        assert_eq!(
            ranges,
            vec![RowRange::new(0, 2), RowRange::new(2, 1), RowRange::new(3, 1)]
        );
    }

    #[test]
    fn reference_problem_split() {
        let ranges = partition_rows(5000, 3);
        assert_eq!(ranges[0], RowRange::new(0, 1667));
        assert_eq!(ranges[1], RowRange::new(1667, 1667));
        assert_eq!(ranges[2], RowRange::new(3334, 1666));
    }

    #[test]
    fn ranges_tile_all_rows_exactly() {
        for nra in 0..80 {
            for numworkers in 1..17 {
                let ranges = partition_rows(nra, numworkers);
                assert_eq!(ranges.len(), numworkers);

                let mut next = 0;
                for r in &ranges {
                    assert_eq!(r.offset, next, "gap or overlap at {}", r);
                    next = r.end();
                }
                assert_eq!(next, nra);
                assert_eq!(ranges.iter().map(|r| r.rows).sum::<usize>(), nra);
            }
        }
    }

    #[test]
    fn load_is_balanced_within_one_row() {
        for nra in 0..80 {
            for numworkers in 1..17 {
                let rows: Vec<usize> = partition_rows(nra, numworkers).iter().map(|r| r.rows).collect();
                let max = rows.iter().max().unwrap();
                let min = rows.iter().min().unwrap();
                assert!(max - min <= 1, "nra={} workers={} rows={:?}", nra, numworkers, rows);
            }
        }
    }

    #[test]
    fn partition_is_reproducible() {
        assert_eq!(partition_rows(1234, 7), partition_rows(1234, 7));
    }

    #[test]
    fn more_workers_than_rows() {
        let ranges = partition_rows(2, 4);
        assert_eq!(ranges[0], RowRange::new(0, 1));
        assert_eq!(ranges[1], RowRange::new(1, 1));
        assert_eq!(ranges[2], RowRange::new(2, 0));
        assert_eq!(ranges[3], RowRange::new(2, 0));
    }

    #[test]
    fn no_workers_means_no_ranges() {
        assert!(partition_rows(10, 0).is_empty());
        assert_eq!(rows_for_worker(10, 0, 1), None);
    }

    #[test]
    fn worker_index_outside_the_group_has_no_rows() {
        assert_eq!(rows_for_worker(10, 3, 0), None);
        assert_eq!(rows_for_worker(10, 3, 4), None);
        assert_eq!(rows_for_worker(10, 3, 1), Some(4));
        assert_eq!(rows_for_worker(10, 3, 3), Some(3));
    }
}
