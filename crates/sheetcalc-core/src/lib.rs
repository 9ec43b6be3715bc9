//! sheetcalc-core - Document model, configuration + delimited storage.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::Config;
pub use document::Document;
pub use error::{Result, SheetError};

pub use sheetcalc_engine::engine::{CellRef, CellType, EvalStats, Grid};
