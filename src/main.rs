//! Distpack CLI - distribution archive assembler
//!
//! Usage: distpack <COMMAND>
//!
//! Commands:
//!   pack     Assemble distribution archives
//!   stamp    Render the version file without packing
//!   check    Validate the manifest and its referenced inputs
//!   version  Show version information

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use distpack::ArchiveFormat;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            manifest,
            output_dir,
            format,
            dry_run,
        } => commands::pack::run(&commands::pack::PackOptions {
            manifest,
            output_dir,
            formats: format,
            dry_run,
            json: cli.json,
            verbose: cli.verbose,
        }),
        Commands::Stamp { manifest, output } => {
            commands::stamp::run(&commands::stamp::StampOptions {
                manifest,
                output,
                json: cli.json,
            })
        }
        Commands::Check { manifest } => commands::check::run(&commands::check::CheckOptions {
            manifest,
            json: cli.json,
        }),
        Commands::Version => {
            cmd_version(cli.json);
            Ok(())
        }
    }
}

fn cmd_version(json: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        let formats: Vec<String> = ArchiveFormat::ALL.iter().map(|f| f.to_string()).collect();
        println!(
            "{}",
            serde_json::json!({
                "name": "distpack",
                "version": version,
                "formats": formats,
            })
        );
    } else {
        println!("distpack v{version}");
        println!("Formats:");
        for format in ArchiveFormat::ALL {
            println!("  - {:<8} .{}", format.to_string(), format.extension());
        }
    }
}
