use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

/// List every file in a Google Drive account with its full folder path.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "drivelist")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the file list and write one path record per file
    List {
        /// Configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Result file (csv format), replaced if it exists
        #[arg(short, long)]
        out: PathBuf,

        /// Additional field to append to each record. Repeat for more
        /// columns; see `drivelist fields` for the list.
        #[arg(short = 'a', long = "additional-field")]
        fields: Vec<String>,
    },

    /// Write an example configuration file
    Init {
        #[arg(default_value = "drivelist.yaml")]
        config: PathBuf,
    },

    /// Print the field names accepted by `list -a`
    Fields,
}

fn main() -> Result<()> {
    diagnostics::init_diagnostics();

    match Cli::parse().command {
        Commands::List {
            config,
            out,
            fields,
        } => commands::list_command(&config, &out, fields),

        Commands::Init { config } => commands::init_command(&config),

        Commands::Fields => commands::fields_command(),
    }
}
