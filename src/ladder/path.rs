//! Recorded traversal paths
//!
//! A path is the ordered list of lattice pieces a walker touches on its way
//! down: the vertical stub above each row, the rung it crosses (if any), and
//! the vertical stub into the next row.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lattice::Lattice;
use super::simulate::{Step, check_column, step_at};
use crate::error::Result;

/// One unit of lattice traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Travelling down `column` at `row` (rows run `0..=lattice.rows()`)
    Vertical { row: usize, column: usize },
    /// Crossing the rung between `column` and `column + 1` at `row`
    Horizontal { row: usize, column: usize },
}

impl PathSegment {
    pub fn row(&self) -> usize {
        match *self {
            PathSegment::Vertical { row, .. } | PathSegment::Horizontal { row, .. } => row,
        }
    }

    pub fn column(&self) -> usize {
        match *self {
            PathSegment::Vertical { column, .. } | PathSegment::Horizontal { column, .. } => column,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, PathSegment::Vertical { .. })
    }
}

/// Host-facing identifier: `v-<row>-<col>` or `h-<row>-<col>`
impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Vertical { row, column } => write!(f, "v-{row}-{column}"),
            PathSegment::Horizontal { row, column } => write!(f, "h-{row}-{column}"),
        }
    }
}

/// Record every segment `start_column` touches on its way down.
///
/// Shares its per-row decision with [`super::simulate::simulate`], so the
/// column of the last segment is always the simulated end column.
pub fn build_path(lattice: &Lattice, start_column: usize) -> Result<Vec<PathSegment>> {
    check_column(lattice, start_column)?;

    let mut col = start_column;
    let mut path = Vec::with_capacity(2 * lattice.rows() + 1);
    path.push(PathSegment::Vertical { row: 0, column: col });

    for row in 0..lattice.rows() {
        match step_at(lattice, row, col) {
            Step::Left => {
                path.push(PathSegment::Horizontal { row, column: col - 1 });
                col -= 1;
            }
            Step::Right => {
                path.push(PathSegment::Horizontal { row, column: col });
                col += 1;
            }
            Step::Stay => {}
        }
        path.push(PathSegment::Vertical {
            row: row + 1,
            column: col,
        });
    }

    Ok(path)
}

/// End column implied by a recorded path (the column of its last vertical piece)
pub fn path_end_column(path: &[PathSegment]) -> Option<usize> {
    path.iter().rev().find(|s| s.is_vertical()).map(|s| s.column())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::simulate::simulate;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_straight_path() {
        let lattice = Lattice::empty(3, 2).unwrap();
        let path = build_path(&lattice, 1).unwrap();
        assert_eq!(
            path,
            vec![
                PathSegment::Vertical { row: 0, column: 1 },
                PathSegment::Vertical { row: 1, column: 1 },
                PathSegment::Vertical { row: 2, column: 1 },
            ]
        );
    }

    #[test]
    fn test_path_through_rung() {
        let lattice = Lattice::from_rows(2, vec![vec![true]]).unwrap();
        let path = build_path(&lattice, 1).unwrap();
        assert_eq!(
            path,
            vec![
                PathSegment::Vertical { row: 0, column: 1 },
                PathSegment::Horizontal { row: 0, column: 0 },
                PathSegment::Vertical { row: 1, column: 0 },
            ]
        );
        assert_eq!(path_end_column(&path), Some(0));
    }

    #[test]
    fn test_segment_identifiers() {
        assert_eq!(PathSegment::Vertical { row: 0, column: 3 }.to_string(), "v-0-3");
        assert_eq!(PathSegment::Horizontal { row: 11, column: 2 }.to_string(), "h-11-2");
    }

    #[test]
    fn test_out_of_range_start() {
        let lattice = Lattice::empty(2, 1).unwrap();
        assert!(build_path(&lattice, 2).is_err());
    }

    #[test]
    fn test_path_length_counts_rungs() {
        let lattice = Lattice::from_rows(3, vec![vec![true, false], vec![false, true]]).unwrap();
        let path = build_path(&lattice, 0).unwrap();
        // 1 leading + 2 rows * (rung + vertical)
        assert_eq!(path.len(), 5);
        assert_eq!(path_end_column(&path), Some(2));
    }

    proptest! {
        #[test]
        fn prop_path_agrees_with_simulation(
            seed in any::<u64>(),
            columns in 2usize..12,
            rows in 1usize..20,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let lattice = Lattice::generate(columns, rows, &mut rng).unwrap();
            for start in 0..columns {
                let path = build_path(&lattice, start).unwrap();
                let end = simulate(&lattice, start).unwrap();
                prop_assert_eq!(path_end_column(&path), Some(end));
                let top = PathSegment::Vertical { row: 0, column: start };
                prop_assert_eq!(path.first().copied(), Some(top));
                prop_assert_eq!(path.last().map(|s| s.row()), Some(rows));
            }
        }
    }
}
