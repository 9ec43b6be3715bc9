use crate::config::Config;
use crate::error::Result;
use sheetcalc_engine::engine::{EvalStats, Grid, evaluate_grid};

/// A loaded grid together with the settings used to read, evaluate and write it.
#[derive(Debug, Clone)]
pub struct Document {
    /// The spreadsheet grid
    pub grid: Grid,
    /// Cell delimiter used for reading and writing
    pub delimiter: char,
    /// Recursion bound for formula evaluation
    pub max_depth: usize,
}

impl Document {
    /// Create an empty document with the given settings.
    pub fn new(config: &Config) -> Self {
        Document {
            grid: Grid::default(),
            delimiter: config.delimiter,
            max_depth: config.max_depth,
        }
    }

    /// Reduce every formula in the grid to its value or sentinel.
    pub fn evaluate(&mut self) -> Result<EvalStats> {
        let stats = evaluate_grid(&mut self.grid, self.max_depth)?;
        log::info!(
            "evaluated {} formulas ({} #NAN, {} #ERROR)",
            stats.formulas,
            stats.nan,
            stats.errors
        );
        Ok(stats)
    }
}
