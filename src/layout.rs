//! Table and column layout for terminal output.
//!
//! Everything here is a pure function of display widths, measured with
//! `unicode-width` so wide glyphs (CJK, emoji) take two columns.

use unicode_width::UnicodeWidthStr;

/// Terminals wrap rather than truncate, so a grid may slightly exceed the
/// reported width.
pub const DEFAULT_WIDTH_FACTOR: f32 = 1.1;

/// Returns the number of terminal columns `s` occupies.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Scales the terminal's column count into the width available to a grid.
pub fn available_width(terminal_columns: u16, factor: f32) -> usize {
    (f32::from(terminal_columns) * factor) as usize
}

/// Computes the width of each table column.
///
/// Rows may be ragged; the result has one entry per column of the widest row.
pub fn column_widths<S: AsRef<str>>(table: &[Vec<S>]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            let width = display_width(cell.as_ref());
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }
    widths
}

/// Formats a table, first row being the headers.
///
/// Every cell except the last in its row is padded to its column width plus
/// `margin`. Each row ends with a newline.
pub fn format_table<S: AsRef<str>>(table: &[Vec<S>], margin: usize) -> String {
    let widths = column_widths(table);
    let mut out = String::new();

    for row in table {
        for (i, cell) in row.iter().enumerate() {
            let cell = cell.as_ref();
            out.push_str(cell);
            if i + 1 != row.len() {
                pad(&mut out, widths[i] - display_width(cell) + margin);
            }
        }
        out.push('\n');
    }

    out
}

/// Chooses a grid shape for `cells` items of at most `max_len` columns each.
///
/// Returns `(columns, rows)`. There is always at least one column.
pub fn grid_size(width: usize, margin: usize, max_len: usize, cells: usize) -> (usize, usize) {
    let per_column = max_len + margin;
    let columns = if per_column == 0 {
        1
    } else {
        ((width + margin) / per_column).max(1)
    };
    (columns, cells.div_ceil(columns))
}

/// Maps a visual grid position to a source index.
///
/// The grid is filled column-major: reading down a column yields items in
/// their original order before moving right.
pub fn grid_index(column: usize, row: usize, rows: usize) -> usize {
    row + rows * column
}

/// Formats `cells` into as many columns as fit in `width`.
///
/// Falls back to one item per line when only one column fits.
pub fn format_columns<S: AsRef<str>>(cells: &[S], margin: usize, width: usize) -> String {
    let widths: Vec<usize> = cells.iter().map(|c| display_width(c.as_ref())).collect();
    let max_len = widths.iter().copied().max().unwrap_or(0);
    let (columns, rows) = grid_size(width, margin, max_len, cells.len());

    let mut out = String::new();

    if columns == 1 {
        for cell in cells {
            out.push_str(cell.as_ref());
            out.push('\n');
        }
        return out;
    }

    for row in 0..rows {
        for column in 0..columns {
            let index = grid_index(column, row, rows);
            let (cell, cell_width) = match cells.get(index) {
                Some(cell) => (cell.as_ref(), widths[index]),
                None => ("", 0),
            };
            out.push_str(cell);
            if column + 1 == columns {
                out.push('\n');
            } else {
                pad(&mut out, max_len - cell_width + margin);
            }
        }
    }

    out
}

fn pad(out: &mut String, spaces: usize) {
    out.extend(std::iter::repeat(' ').take(spaces));
}
