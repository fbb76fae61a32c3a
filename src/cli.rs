use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cabinet - compare and single-object deploy companion for NetSuite SDF projects
#[derive(Parser, Debug)]
#[command(name = "cabinet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v shows the SuiteCloud CLI output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Diff a local file against its NetSuite File Cabinet copy
    Compare {
        /// File below src/FileCabinet to compare
        file: PathBuf,

        /// Keep the downloaded File Cabinet copy on disk
        #[arg(long)]
        keep: bool,
    },

    /// Deploy a single SDF object via a temporarily narrowed deploy.xml
    DeployObject {
        /// Object file below src/Objects to deploy
        file: PathBuf,

        /// Stage and show the scoped manifest without deploying
        #[arg(long)]
        dry_run: bool,
    },

    /// Show version information
    Version,
}
