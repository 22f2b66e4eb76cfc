//! Rung lattice for a ladder
//!
//! A lattice has `rows` rows of `columns - 1` rung slots. Slot `(r, c)` set
//! means a rung joins column `c` and column `c + 1` at row `r`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LadderError, Result};

/// Immutable rung grid for one participant set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LatticeRows")]
pub struct Lattice {
    columns: usize,
    rungs: Vec<Vec<bool>>,
}

/// Unchecked wire form; deserialized lattices go through [`Lattice::from_rows`]
#[derive(Deserialize)]
struct LatticeRows {
    columns: usize,
    rungs: Vec<Vec<bool>>,
}

impl TryFrom<LatticeRows> for Lattice {
    type Error = LadderError;

    fn try_from(raw: LatticeRows) -> Result<Self> {
        Self::from_rows(raw.columns, raw.rungs)
    }
}

impl Lattice {
    /// Generate a random lattice.
    ///
    /// Each row is filled left to right: a slot gets a rung with probability
    /// one half, unless the slot to its left already has one, in which case it
    /// is forced empty. Looking one slot back is enough, so no backtracking.
    pub fn generate<R: Rng>(columns: usize, rows: usize, rng: &mut R) -> Result<Self> {
        if columns < 2 || rows < 1 {
            return Err(LadderError::InvalidConfiguration {
                participants: columns,
                rows,
            });
        }

        let slots = columns - 1;
        let rungs = (0..rows)
            .map(|_| {
                let mut row: Vec<bool> = Vec::with_capacity(slots);
                for col in 0..slots {
                    if col > 0 && row[col - 1] {
                        row.push(false);
                    } else {
                        row.push(rng.random_bool(0.5));
                    }
                }
                row
            })
            .collect();

        Ok(Self { columns, rungs })
    }

    /// Build a lattice from explicit rows.
    ///
    /// Only the shape is checked (every row has `columns - 1` slots), so
    /// relaxed lattices with adjacent rungs can be represented; use
    /// [`Lattice::is_valid`] to test the adjacency rule.
    pub fn from_rows(columns: usize, rungs: Vec<Vec<bool>>) -> Result<Self> {
        if columns < 2 || rungs.is_empty() {
            return Err(LadderError::InvalidConfiguration {
                participants: columns,
                rows: rungs.len(),
            });
        }
        if let Some(bad) = rungs.iter().find(|row| row.len() != columns - 1) {
            return Err(LadderError::InvalidConfiguration {
                participants: bad.len() + 1,
                rows: rungs.len(),
            });
        }
        Ok(Self { columns, rungs })
    }

    /// Lattice with no rungs at all (every column maps to itself)
    pub fn empty(columns: usize, rows: usize) -> Result<Self> {
        Self::from_rows(columns, vec![vec![false; columns.saturating_sub(1)]; rows])
    }

    /// Number of vertical lines (participants)
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rungs.len()
    }

    /// Whether a rung joins `col` and `col + 1` at `row` (false when out of range)
    #[inline]
    pub fn has_rung(&self, row: usize, col: usize) -> bool {
        self.rungs
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Raw rung rows, top to bottom
    pub fn rung_rows(&self) -> &[Vec<bool>] {
        &self.rungs
    }

    /// True when no row has two adjacent rungs
    pub fn is_valid(&self) -> bool {
        self.rungs
            .iter()
            .all(|row| row.windows(2).all(|pair| !(pair[0] && pair[1])))
    }

    /// Total number of rungs (for logging)
    pub fn rung_count(&self) -> usize {
        self.rungs.iter().flatten().filter(|&&r| r).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generate_dimensions() {
        let mut rng = Pcg32::seed_from_u64(7);
        let lattice = Lattice::generate(5, 12, &mut rng).unwrap();
        assert_eq!(lattice.columns(), 5);
        assert_eq!(lattice.rows(), 12);
        assert!(lattice.rung_rows().iter().all(|row| row.len() == 4));
    }

    #[test]
    fn test_generate_rejects_too_few_columns() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(
            Lattice::generate(1, 12, &mut rng),
            Err(LadderError::InvalidConfiguration {
                participants: 1,
                rows: 12
            })
        );
        assert!(Lattice::generate(0, 12, &mut rng).is_err());
        assert!(Lattice::generate(3, 0, &mut rng).is_err());
    }

    #[test]
    fn test_generate_is_reproducible() {
        let a = Lattice::generate(6, 12, &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = Lattice::generate(6, 12, &mut Pcg32::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_rows_shape_check() {
        assert!(Lattice::from_rows(3, vec![vec![true, false]]).is_ok());
        assert!(Lattice::from_rows(3, vec![vec![true]]).is_err());
        assert!(Lattice::from_rows(3, vec![]).is_err());
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let long_row = r#"{"columns":2,"rungs":[[false,true]]}"#;
        assert!(serde_json::from_str::<Lattice>(long_row).is_err());
        assert!(serde_json::from_str::<Lattice>(r#"{"columns":1,"rungs":[[]]}"#).is_err());

        let lattice = Lattice::from_rows(3, vec![vec![true, false], vec![false, true]]).unwrap();
        let json = serde_json::to_string(&lattice).unwrap();
        assert_eq!(serde_json::from_str::<Lattice>(&json).unwrap(), lattice);
    }

    #[test]
    fn test_relaxed_lattice_is_representable_but_invalid() {
        let lattice = Lattice::from_rows(3, vec![vec![true, true]]).unwrap();
        assert!(!lattice.is_valid());
        assert_eq!(lattice.rung_count(), 2);
    }

    #[test]
    fn test_has_rung_out_of_range() {
        let lattice = Lattice::from_rows(2, vec![vec![true]]).unwrap();
        assert!(lattice.has_rung(0, 0));
        assert!(!lattice.has_rung(0, 1));
        assert!(!lattice.has_rung(5, 0));
    }

    proptest! {
        #[test]
        fn prop_generated_lattice_has_no_adjacent_rungs(
            seed in any::<u64>(),
            columns in 2usize..16,
            rows in 1usize..24,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let lattice = Lattice::generate(columns, rows, &mut rng).unwrap();
            prop_assert!(lattice.is_valid());
            prop_assert_eq!(lattice.rows(), rows);
        }
    }
}
