use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod edit;
mod info;
mod slice;
mod validate;

mod config;

/// mztab-edit - Edit, renumber and slice mzTab documents
#[derive(Parser)]
#[command(name = "mztab-edit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// `key=v1,v2,...` from the command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub key: String,
    pub values: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show counts, attribute keys and table shapes of an mzTab file
    Info {
        /// Input mzTab file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the overview as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check cross-references and report problems a save would hit
    Validate {
        /// Input mzTab file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply edits and write a renumbered document
    Edit {
        /// Input mzTab file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output mzTab file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Set a sample attribute or assay field (KEY=VALUE, repeatable)
        #[arg(long, value_name = "KEY=VALUE", value_parser = parse_assignment)]
        update: Vec<(String, String)>,

        /// Null abundance columns of matching samples (KEY=V1,V2, repeatable)
        #[arg(long, value_name = "KEY=V1,V2", value_parser = parse_selection)]
        nullify: Vec<Selection>,

        /// Remove matching samples and their assays (KEY=V1,V2, repeatable)
        #[arg(long, value_name = "KEY=V1,V2", value_parser = parse_selection)]
        delete: Vec<Selection>,

        /// Load format settings and edits from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Write one renumbered document per value of a sample attribute
    Slice {
        /// Input mzTab file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Sample attribute to slice on (falls back to [slice].key in the config)
        #[arg(short, long)]
        key: Option<String>,

        /// Base path for the slice files (defaults to INPUT)
        #[arg(short, long, value_name = "BASE")]
        output: Option<PathBuf>,

        /// Load format settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn parse_assignment(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}

fn parse_selection(arg: &str) -> std::result::Result<Selection, String> {
    let (key, values) = parse_assignment(arg)?;
    let values: Vec<String> = values
        .split(',')
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();
    if values.is_empty() {
        return Err(format!("expected KEY=V1,V2, got '{}'", arg));
    }
    Ok(Selection { key, values })
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { file, json } => info::run(file, json),
        Commands::Validate { file, json } => validate::run(file, json),
        Commands::Edit {
            input,
            output,
            update,
            nullify,
            delete,
            config,
        } => edit::run(input, output, update, nullify, delete, config),
        Commands::Slice {
            input,
            key,
            output,
            config,
        } => slice::run(input, key, output, config),
    }
}
