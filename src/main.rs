//! Sheetcalc - evaluate the formulas in a delimited grid file

mod logger;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sheetcalc_core::config::{Config, parse_delimiter};
use sheetcalc_core::Document;

#[derive(Parser, Debug)]
#[command(name = "sheetcalc", version, about = "Evaluate integer formulas in a delimited grid file")]
struct Cli {
    /// Grid file to read [default: spreadsheet.txt]
    input: Option<PathBuf>,

    /// File to write the evaluated grid to, or `-` for stdout [default: output.txt]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Cell delimiter: a single character, or `\t` for tab [default: tab]
    #[arg(short, long, value_name = "CHAR")]
    delimiter: Option<String>,

    /// Longest chain of formula cells a reference may pass through (1 to 1024) [default: 512]
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Config file (TOML) [default: config.toml in the user config dir, if present]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command-line flags over the config file.
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::discover(self.config.as_deref())?;
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(delimiter) = &self.delimiter {
            config.delimiter = parse_delimiter(delimiter)?;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    log::debug!("{:?}", config);

    let mut doc = Document::load(&config.input, &config).context("failed to load grid")?;
    doc.evaluate().context("evaluation aborted")?;

    if config.writes_to_stdout() {
        doc.write_to(std::io::stdout().lock())
            .context("failed to write grid")?;
    } else {
        doc.save(&config.output).context("failed to write grid")?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
