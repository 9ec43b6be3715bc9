//! Writer for delimiter-separated grid files

use crate::error::{Result, SheetError};
use sheetcalc_engine::engine::{CellType, Grid};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Write a Grid to a file
pub fn write_sheet(path: &Path, grid: &Grid, delimiter: char) -> Result<()> {
    let content = write_sheet_content(grid, delimiter);
    fs::write(path, content).map_err(|source| SheetError::File {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} ({} rows)", path.display(), grid.height());
    Ok(())
}

/// Write a Grid to any writer (e.g. stdout)
pub fn write_sheet_to<W: Write>(mut out: W, grid: &Grid, delimiter: char) -> io::Result<()> {
    out.write_all(write_sheet_content(grid, delimiter).as_bytes())?;
    out.flush()
}

/// Render a Grid, one newline-terminated line per row.
///
/// An empty cell is written as the delimiter itself; any other cell is
/// followed by the delimiter unless it ends the row. Parsing the result gives
/// back the same cells.
pub fn write_sheet_content(grid: &Grid, delimiter: char) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        let last = row.len().saturating_sub(1);
        for (col, cell) in row.iter().enumerate() {
            match cell {
                CellType::Empty => out.push(delimiter),
                _ => {
                    out.push_str(&cell.to_string());
                    if col != last {
                        out.push(delimiter);
                    }
                }
            }
        }
        out.push('\n');
    }
    out
}
