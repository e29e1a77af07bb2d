//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Build nested trees from flat parent-referencing records and render them
#[derive(Parser, Debug)]
#[command(name = "treeable")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .treeable.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render records as nested HTML lists
    Render(BuildArgs),

    /// Show records as a tree
    Show(BuildArgs),

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Input file and tree building options
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Records file (.json or .toml)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Identifier field
    #[arg(long)]
    pub id: Option<String>,

    /// Parent field
    #[arg(long)]
    pub parent: Option<String>,

    /// Children field
    #[arg(long)]
    pub children: Option<String>,

    /// Field used as item text
    #[arg(long)]
    pub label: Option<String>,

    /// Sort records by this field before building
    #[arg(long)]
    pub sort: Option<String>,

    /// Mark this record and all its ancestors active
    #[arg(long)]
    pub active: Option<String>,

    /// Keep at most this many levels
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a commented config template
    Template,
}
