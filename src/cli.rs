use std::path::PathBuf;

use clap::{Parser, Subcommand};
use distpack::ArchiveFormat;

/// Distpack - distribution archive assembler
#[derive(Parser, Debug)]
#[command(name = "distpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble distribution archives
    Pack {
        /// Path to the distpack manifest
        #[arg(short, long, default_value = "distpack.toml")]
        manifest: PathBuf,

        /// Override the manifest's output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Archive formats to emit (zip, tar, tar-gz)
        #[arg(short, long, value_delimiter = ',')]
        format: Option<Vec<ArchiveFormat>>,

        /// Dry run - stage entries, write nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Render the version file without packing
    Stamp {
        /// Path to the distpack manifest
        #[arg(short, long, default_value = "distpack.toml")]
        manifest: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the manifest and its referenced inputs
    Check {
        /// Path to the distpack manifest
        #[arg(short, long, default_value = "distpack.toml")]
        manifest: PathBuf,
    },

    /// Show version information including supported formats
    Version,
}
