use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "José O. Sotero Esteva, Lyxaira M. Glass Rivera",
    version,
    about = "granules - Read NAMD/CHARMM input files (.pdb, .psf, .prm, .xsc) and find rings in their bond graph.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load input files and print the size of every table read from them.
    Info(InfoArgs),
    /// Find rings of a given size and print them as polygons.
    Rings(RingsArgs),
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Input files (1 to 4), dispatched by extension.
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

/// Arguments for the `rings` subcommand.
#[derive(Args, Debug)]
pub struct RingsArgs {
    /// Input files (1 to 4), dispatched by extension.
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Number of atoms per ring. Overrides `ring-size` from the config file.
    #[arg(short = 'n', long, value_name = "SIZE")]
    pub ring_size: Option<usize>,

    /// Path to a ring analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Count rings as adjacent only when they share a bond.
    #[arg(long)]
    pub shared_edge: bool,

    /// Print the adjacency network between rings.
    #[arg(long)]
    pub network: bool,
}
