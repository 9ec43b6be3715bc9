//! sheetcalc_engine - Integer formula engine for delimited grids.

pub mod engine;

pub use engine::{EngineError, Result};
