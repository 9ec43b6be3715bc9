//! Parser for delimiter-separated grid files.
//!
//! One row per line. Each delimiter closes a cell, so consecutive delimiters
//! denote empty cells and a single trailing delimiter adds nothing. Rows are
//! padded to the widest row.

use crate::error::{Result, SheetError};
use sheetcalc_engine::engine::{CellType, Grid};
use std::fs;
use std::path::Path;

/// Parse a grid file
pub fn parse_sheet(path: &Path, delimiter: char) -> Result<Grid> {
    let content = fs::read_to_string(path).map_err(|source| SheetError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_sheet_content(&content, delimiter)?;
    log::info!(
        "loaded {} ({} rows x {} columns)",
        path.display(),
        grid.height(),
        grid.width()
    );
    Ok(grid)
}

/// Parse grid content from a string
pub fn parse_sheet_content(content: &str, delimiter: char) -> Result<Grid> {
    let mut rows = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let mut row = Vec::new();
        for (col_idx, field) in split_row(line, delimiter).into_iter().enumerate() {
            let cell = CellType::from_input(field).ok_or_else(|| SheetError::Parse {
                line: line_idx + 1,
                column: col_idx + 1,
                message: format!(
                    "Expected a plain integer, a formula or nothing, found {:?}",
                    field
                ),
            })?;
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(Grid::from_rows(rows))
}

/// Split a line into raw cell texts.
pub(crate) fn split_row(line: &str, delimiter: char) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(delimiter).collect();
    if fields.last() == Some(&"") {
        fields.pop();
    }
    fields
}
