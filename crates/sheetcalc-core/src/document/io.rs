use super::Document;
use crate::config::Config;
use crate::error::Result;
use crate::storage::{parse_sheet, parse_sheet_content, write_sheet, write_sheet_content, write_sheet_to};
use std::io::Write;
use std::path::Path;

impl Document {
    /// Load a grid file using the config's delimiter.
    pub fn load(path: &Path, config: &Config) -> Result<Self> {
        let mut doc = Document::new(config);
        doc.grid = parse_sheet(path, doc.delimiter)?;
        Ok(doc)
    }

    /// Build a document from in-memory grid text.
    pub fn from_content(content: &str, config: &Config) -> Result<Self> {
        let mut doc = Document::new(config);
        doc.grid = parse_sheet_content(content, doc.delimiter)?;
        Ok(doc)
    }

    /// Save the grid to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_sheet(path, &self.grid, self.delimiter)
    }

    /// Write the grid to any writer.
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        write_sheet_to(out, &self.grid, self.delimiter)?;
        Ok(())
    }

    /// Render the grid as text.
    pub fn to_content(&self) -> String {
        write_sheet_content(&self.grid, self.delimiter)
    }
}
