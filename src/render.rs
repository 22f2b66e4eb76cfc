//! Plain-text ladder picture for terminal hosts
//!
//! Layout per ladder row: a rung line (junctions + rungs) followed by the
//! vertical stubs leading into the next row. Highlighted pieces are drawn
//! with `#` (verticals) and `=` (rungs).

use crate::ladder::{Lattice, PathSegment, RevealState};

/// Characters per column
const CELL: usize = 7;
const CENTER: usize = CELL / 2;

fn x(column: usize) -> usize {
    column * CELL + CENTER
}

fn centered(label: &str) -> String {
    let label: String = label.chars().take(CELL - 1).collect();
    format!("{label:^width$}", width = CELL)
}

fn vertical_line(columns: usize, row: usize, reveal: &RevealState) -> String {
    let mut line = vec![' '; columns * CELL];
    for column in 0..columns {
        let lit = reveal.contains(&PathSegment::Vertical { row, column });
        line[x(column)] = if lit { '#' } else { '|' };
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

fn rung_line(lattice: &Lattice, row: usize, reveal: &RevealState) -> String {
    let columns = lattice.columns();
    let mut line = vec![' '; columns * CELL];
    for column in 0..columns {
        let lit = reveal.contains(&PathSegment::Vertical { row, column })
            || reveal.contains(&PathSegment::Vertical {
                row: row + 1,
                column,
            });
        line[x(column)] = if lit { '#' } else { '|' };

        if column + 1 < columns && lattice.has_rung(row, column) {
            let ch = if reveal.contains(&PathSegment::Horizontal { row, column }) {
                '='
            } else {
                '-'
            };
            for slot in &mut line[x(column) + 1..x(column + 1)] {
                *slot = ch;
            }
        }
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

/// Draw the ladder with names on top and, when given, win/lose marks below
pub fn render_ladder(
    lattice: &Lattice,
    names: &[String],
    reveal: &RevealState,
    outcome: Option<&[bool]>,
) -> String {
    let columns = lattice.columns();
    let mut lines = Vec::with_capacity(2 * lattice.rows() + 3);

    let header: String = (0..columns)
        .map(|c| centered(names.get(c).map(String::as_str).unwrap_or("?")))
        .collect();
    lines.push(header.trim_end().to_string());

    lines.push(vertical_line(columns, 0, reveal));
    for row in 0..lattice.rows() {
        lines.push(rung_line(lattice, row, reveal));
        lines.push(vertical_line(columns, row + 1, reveal));
    }

    if let Some(outcome) = outcome {
        let footer: String = outcome
            .iter()
            .map(|&win| centered(if win { "WIN" } else { "-" }))
            .collect();
        lines.push(footer.trim_end().to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::build_path;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_plain_ladder() {
        let lattice = Lattice::from_rows(2, vec![vec![true]]).unwrap();
        let text = render_ladder(&lattice, &names(&["A", "B"]), &RevealState::new(), None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "   A      B");
        assert_eq!(lines[1], "   |      |");
        assert_eq!(lines[2], "   |------|");
        assert_eq!(lines[3], "   |      |");
    }

    #[test]
    fn test_render_highlighted_path_and_outcome() {
        let lattice = Lattice::from_rows(2, vec![vec![true]]).unwrap();
        let reveal: RevealState = build_path(&lattice, 0).unwrap().into_iter().collect();
        let text = render_ladder(
            &lattice,
            &names(&["A", "B"]),
            &reveal,
            Some(&[false, true][..]),
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "   #      |");
        assert_eq!(lines[2], "   #======#");
        assert_eq!(lines[3], "   |      #");
        assert_eq!(lines[4], "   -     WIN");
    }
}
