//! Inverse lookup from winning end columns to start columns

use super::simulate::WinnerMapping;
use crate::error::{LadderError, Result};

/// Find the start column that reaches each winning end column.
///
/// Output order follows `winning_end_columns`. Fails with
/// [`LadderError::NoMatchFound`] when an end column is reached by zero or
/// several start columns, which only happens if the mapping is not a bijection.
pub fn resolve(mapping: &[WinnerMapping], winning_end_columns: &[usize]) -> Result<Vec<usize>> {
    winning_end_columns
        .iter()
        .map(|&end_column| {
            let mut hits = mapping.iter().filter(|m| m.end_column == end_column);
            match (hits.next(), hits.next()) {
                (Some(m), None) => Ok(m.start_column),
                _ => Err(LadderError::NoMatchFound { end_column }),
            }
        })
        .collect()
}

/// True when every end column in `0..mapping.len()` is reached exactly once
pub fn is_permutation(mapping: &[WinnerMapping]) -> bool {
    let mut seen = vec![false; mapping.len()];
    for m in mapping {
        match seen.get_mut(m.end_column) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::lattice::Lattice;
    use crate::ladder::simulate::mapping;

    fn pairs(ends: &[usize]) -> Vec<WinnerMapping> {
        ends.iter()
            .enumerate()
            .map(|(start_column, &end_column)| WinnerMapping {
                start_column,
                end_column,
            })
            .collect()
    }

    #[test]
    fn test_identity_mapping_resolves_to_same_column() {
        let lattice = Lattice::empty(4, 12).unwrap();
        let map = mapping(&lattice);
        assert_eq!(resolve(&map, &[2]).unwrap(), vec![2]);
    }

    #[test]
    fn test_output_follows_winning_order() {
        let map = pairs(&[2, 0, 3, 1]);
        assert_eq!(resolve(&map, &[3, 0]).unwrap(), vec![2, 1]);
        assert_eq!(resolve(&map, &[0, 3]).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_missing_end_column() {
        let map = pairs(&[0, 0, 2]);
        assert_eq!(
            resolve(&map, &[1]),
            Err(LadderError::NoMatchFound { end_column: 1 })
        );
    }

    #[test]
    fn test_duplicate_end_column() {
        let map = pairs(&[0, 0, 2]);
        assert_eq!(
            resolve(&map, &[0]),
            Err(LadderError::NoMatchFound { end_column: 0 })
        );
        assert_eq!(resolve(&map, &[2]).unwrap(), vec![2]);
    }

    #[test]
    fn test_relaxed_lattice_breaks_bijection() {
        let lattice = Lattice::from_rows(3, vec![vec![true, true]]).unwrap();
        let map = mapping(&lattice);
        assert!(!is_permutation(&map));
        assert!(resolve(&map, &[2]).is_err());
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&pairs(&[1, 2, 0])));
        assert!(!is_permutation(&pairs(&[1, 1, 0])));
        assert!(!is_permutation(&pairs(&[0, 3, 1])));
        assert!(is_permutation(&[]));
    }
}
