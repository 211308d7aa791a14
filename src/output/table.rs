//! Aligned plain-text columns

use crate::error::{NearbyError, Result};

/// Column separator between cells
const SEPARATOR: &str = "  ";

/// Render rows as left-justified columns.
///
/// The first row is the header and fixes the column count. Each column is
/// padded to its widest cell, except the last cell of each row, so lines
/// carry no trailing whitespace. Rows are joined with `\n` and the result
/// has no trailing newline.
///
/// Rows are expected to have as many cells as the header. A shorter row is
/// rendered with the cells it has; cells past the header's width are dropped.
pub fn render_columns<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<String> {
    let header = rows.first().ok_or(NearbyError::EmptyInput)?;
    let column_count = header.len();

    let mut widths = vec![0usize; column_count];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.as_ref().chars().count());
        }
    }

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let cells = row.len().min(column_count);
            row.iter()
                .take(cells)
                .zip(&widths)
                .enumerate()
                .map(|(index, (cell, &width))| {
                    let cell = cell.as_ref();
                    if index + 1 == cells {
                        cell.to_string()
                    } else {
                        format!("{cell:<width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join(SEPARATOR)
        })
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_columns() {
        let input = vec![
            vec!["NAMESPACE", "NAME", "READY"],
            vec!["default", "foo-bar-abc123", "1/3"],
            vec!["production", "baz-bat-db-def456", "2/2"],
        ];
        let want = "\
NAMESPACE   NAME               READY
default     foo-bar-abc123     1/3
production  baz-bat-db-def456  2/2";
        assert_eq!(render_columns(&input).unwrap(), want);
    }

    #[test]
    fn test_render_empty_input_fails() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            render_columns(&rows),
            Err(NearbyError::EmptyInput)
        ));
    }

    #[test]
    fn test_render_header_only() {
        let rows = vec![vec!["NAME", "STATUS"]];
        assert_eq!(render_columns(&rows).unwrap(), "NAME  STATUS");
    }

    #[test]
    fn test_last_column_is_never_padded() {
        let rows = vec![vec!["A", "LONG-HEADER"], vec!["bb", "x"]];
        let out = render_columns(&rows).unwrap();
        for line in out.lines() {
            assert_eq!(line, line.trim_end(), "trailing whitespace in {line:?}");
        }
        assert_eq!(out, "A   LONG-HEADER\nbb  x");
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        let rows = vec![vec!["NAME", "ZONE"], vec!["nœud", "a"]];
        assert_eq!(render_columns(&rows).unwrap(), "NAME  ZONE\nnœud  a");
    }

    #[test]
    fn test_ragged_rows_do_not_panic() {
        let rows = vec![
            vec!["NAME", "STATUS", "AGE"],
            vec!["short"],
            vec!["long-row", "Ready", "5m", "extra"],
        ];
        let out = render_columns(&rows).unwrap();
        assert_eq!(
            out,
            "NAME      STATUS  AGE\nshort\nlong-row  Ready   5m"
        );
    }
}
