//! Drippy CLI
//!
//! Static site generator for Markdown pages and Liquid-style templates.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use drippy::cmd;

/// Command-line interface for Drippy.
#[derive(Parser)]
#[command(name = "drippy", version, about = "A small static site generator")]
struct Cli {
    /// Project root containing drippy.json
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the site
    Build {
        /// Minify generated HTML
        #[arg(long)]
        minify: bool,
    },
    /// Create an example project
    New {
        /// Directory for the new project
        #[arg(default_value = cmd::new::DEFAULT_DIR)]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    drippy::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { minify } => {
            cmd::build::run(&cli.root, minify)?;
        }
        Commands::New { dir } => {
            cmd::new::run(&cli.root.join(dir))?;
        }
    }

    Ok(())
}
