use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "apilens",
    version,
    about = "Extract a typed API model from TypeScript and component sources"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a package and write the serialized library model
    Generate {
        /// Package root to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Configuration file (default: apilens.toml under PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory, relative to PATH
        #[arg(long)]
        out: Option<String>,

        /// Fail when a declaration name is declared in more than one module
        #[arg(long)]
        strict: bool,

        /// Skip the typed-accessor wrapper
        #[arg(long)]
        no_wrapper: bool,
    },

    /// Analyze without writing anything and report diagnostics
    Check {
        /// Package root to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Configuration file (default: apilens.toml under PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fail when a declaration name is declared in more than one module
        #[arg(long)]
        strict: bool,
    },

    /// Regenerate on file changes, debounced; unchanged output is not rewritten
    Watch {
        /// Package root to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Configuration file (default: apilens.toml under PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory, relative to PATH
        #[arg(long)]
        out: Option<String>,
    },
}
