use crate::utils::parser;
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
    author = "Tony Kan",
    version,
    about = "rfdiff - Submit truncated protein structures to an RFdiffusion generation service and save the generated backbone.",
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
    /// Fetch the reference structure if needed, submit it and save the generated structure.
    Generate(GenerateArgs),
    /// Download the reference structure into the working directory.
    Fetch(FetchArgs),
    /// Summarize the ATOM records that would be submitted, without contacting any server.
    Inspect(InspectArgs),
}

/// Options shared by every subcommand that works with the local structure file.
#[derive(Args, Debug, Clone, Default)]
pub struct StructureArgs {
    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Identifier of the reference structure (e.g., '1R42').
    #[arg(long, value_name = "ID")]
    pub pdb_id: Option<String>,

    /// Directory in which the structure file is stored.
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Maximum number of ATOM records to keep.
    #[arg(long = "max-atoms", value_name = "INT")]
    pub max_atom_records: Option<usize>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub structure: StructureArgs,

    /// Path for the generated structure file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Service Overrides ---
    /// Override the generation service endpoint URL.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds. Requests wait indefinitely when unset.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Fail on non-success HTTP status codes instead of attempting to parse the body.
    #[arg(long)]
    pub check_status: bool,

    // --- Generation Overrides ---
    /// Override the contig specification (e.g., 'A20-60/0 50-100').
    #[arg(long, value_name = "SPEC")]
    pub contigs: Option<String>,

    /// Hotspot residue; repeat to give several (e.g., --hotspot A50 --hotspot A51).
    #[arg(long = "hotspot", value_name = "RES", value_parser = parser::parse_residue_id)]
    pub hotspots: Vec<String>,

    /// Override the number of diffusion steps.
    #[arg(long, value_name = "INT")]
    pub diffusion_steps: Option<u32>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S generation.diffusion-steps=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `fetch` subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub structure: StructureArgs,

    /// Download again and overwrite the local file even if it exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub structure: StructureArgs,

    /// Inspect this file instead of the reference structure in the working directory.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}
