//! Run configuration.
//!
//! Defaults, overridden by a TOML file, overridden by command-line flags.
//! The file is either given explicitly or looked up as `config.toml` in the
//! platform config directory.

use directories::ProjectDirs;
use serde::Deserialize;
use sheetcalc_engine::engine::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, Operator};
use std::path::{Path, PathBuf};

use crate::error::{Result, SheetError};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

pub const DEFAULT_INPUT: &str = "spreadsheet.txt";
pub const DEFAULT_OUTPUT: &str = "output.txt";
pub const DEFAULT_DELIMITER: char = '\t';

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Grid file to read.
    pub input: PathBuf,
    /// Grid file to write; `-` means stdout.
    pub output: PathBuf,
    /// Character separating cells within a row.
    pub delimiter: char,
    /// Longest chain of formula cells a reference may pass through.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: DEFAULT_DELIMITER,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Resolve the config file: an explicit path must exist, the user config
    /// file is optional. Falls back to defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            return Config::load(path);
        }
        match user_config_path() {
            Some(path) if path.exists() => Config::load(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Config> {
        let file_err = |source: std::io::Error| SheetError::File {
            path: path.to_path_buf(),
            source,
        };
        let meta = std::fs::metadata(path).map_err(file_err)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(SheetError::Config(format!(
                "refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            )));
        }
        let content = std::fs::read_to_string(path).map_err(file_err)?;
        let config: Config = toml::from_str(&content).map_err(|source| SheetError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| SheetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the reader or tokenizer could not tell apart from cell content.
    pub fn validate(&self) -> Result<()> {
        let d = self.delimiter;
        if d == '=' || d == '#' || d == '\n' || d == '\r' || d.is_ascii_alphanumeric() {
            return Err(SheetError::Config(format!(
                "delimiter {:?} would be read as cell content",
                d
            )));
        }
        if Operator::from_char(d).is_some() {
            return Err(SheetError::Config(format!(
                "delimiter {:?} is a formula operator",
                d
            )));
        }
        if !(1..=MAX_DEPTH_LIMIT).contains(&self.max_depth) {
            return Err(SheetError::Config(format!(
                "max_depth must be between 1 and {}, got {}",
                MAX_DEPTH_LIMIT, self.max_depth
            )));
        }
        Ok(())
    }

    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

/// Parse a delimiter given on the command line: a single character, or
/// `\t` / `tab` for a tab.
pub fn parse_delimiter(text: &str) -> Result<char> {
    if matches!(text, "\\t" | "tab") {
        return Ok('\t');
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(SheetError::Config(format!(
            "delimiter must be a single character, got {:?}",
            text
        ))),
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetcalc")?;
    Some(proj.config_dir().join("config.toml"))
}
