//! Path simulation: which end column does a start column reach

use serde::{Deserialize, Serialize};

use super::lattice::Lattice;
use crate::error::{LadderError, Result};

/// One start column and the end column it reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerMapping {
    pub start_column: usize,
    pub end_column: usize,
}

/// Move taken at a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Left,
    Right,
    Stay,
}

/// Decide the move at `row` for a walker on `col`.
///
/// The left rung is checked before the right one. A valid lattice never has
/// both, so the order only matters for relaxed lattices.
#[inline]
pub(crate) fn step_at(lattice: &Lattice, row: usize, col: usize) -> Step {
    if col > 0 && lattice.has_rung(row, col - 1) {
        Step::Left
    } else if col + 1 < lattice.columns() && lattice.has_rung(row, col) {
        Step::Right
    } else {
        Step::Stay
    }
}

/// Trace `start_column` down the ladder and return its end column
pub fn simulate(lattice: &Lattice, start_column: usize) -> Result<usize> {
    check_column(lattice, start_column)?;
    Ok(trace(lattice, start_column))
}

/// Run [`simulate`] for every start column, in column order
pub fn mapping(lattice: &Lattice) -> Vec<WinnerMapping> {
    (0..lattice.columns())
        .map(|start_column| WinnerMapping {
            start_column,
            end_column: trace(lattice, start_column),
        })
        .collect()
}

fn trace(lattice: &Lattice, start_column: usize) -> usize {
    let mut col = start_column;
    for row in 0..lattice.rows() {
        match step_at(lattice, row, col) {
            Step::Left => col -= 1,
            Step::Right => col += 1,
            Step::Stay => {}
        }
    }
    col
}

pub(crate) fn check_column(lattice: &Lattice, column: usize) -> Result<()> {
    if column >= lattice.columns() {
        return Err(LadderError::ColumnOutOfRange {
            column,
            columns: lattice.columns(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::resolve::is_permutation;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_empty_lattice_is_identity() {
        let lattice = Lattice::empty(4, 12).unwrap();
        for col in 0..4 {
            assert_eq!(simulate(&lattice, col).unwrap(), col);
        }
    }

    #[test]
    fn test_single_rung_swaps_two_columns() {
        let lattice = Lattice::from_rows(2, vec![vec![true]]).unwrap();
        assert_eq!(simulate(&lattice, 0).unwrap(), 1);
        assert_eq!(simulate(&lattice, 1).unwrap(), 0);
    }

    #[test]
    fn test_rungs_in_successive_rows() {
        // Column 0 goes right at row 0, then right again at row 1
        let lattice = Lattice::from_rows(3, vec![vec![true, false], vec![false, true]]).unwrap();
        assert_eq!(simulate(&lattice, 0).unwrap(), 2);
        assert_eq!(simulate(&lattice, 1).unwrap(), 0);
        assert_eq!(simulate(&lattice, 2).unwrap(), 1);
    }

    #[test]
    fn test_left_rung_wins_on_relaxed_lattice() {
        // Column 1 has rungs on both sides; it must go left
        let lattice = Lattice::from_rows(3, vec![vec![true, true]]).unwrap();
        assert_eq!(simulate(&lattice, 1).unwrap(), 0);
    }

    #[test]
    fn test_out_of_range_start() {
        let lattice = Lattice::empty(3, 1).unwrap();
        assert_eq!(
            simulate(&lattice, 3),
            Err(LadderError::ColumnOutOfRange {
                column: 3,
                columns: 3
            })
        );
    }

    #[test]
    fn test_mapping_matches_simulate() {
        let lattice = Lattice::generate(7, 12, &mut Pcg32::seed_from_u64(3)).unwrap();
        for m in mapping(&lattice) {
            assert_eq!(simulate(&lattice, m.start_column).unwrap(), m.end_column);
        }
    }

    proptest! {
        #[test]
        fn prop_valid_lattice_mapping_is_permutation(
            seed in any::<u64>(),
            columns in 2usize..16,
            rows in 1usize..24,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let lattice = Lattice::generate(columns, rows, &mut rng).unwrap();
            let map = mapping(&lattice);
            prop_assert_eq!(map.len(), columns);
            prop_assert!(is_permutation(&map));
        }
    }
}
