use anyhow::Result;
use clap::Parser;

use apilens::cli::{run_check, run_generate, run_watch, Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Generate {
            path,
            config,
            out,
            strict,
            no_wrapper,
        } => run_generate(&path, config, out, strict, no_wrapper),
        Command::Check {
            path,
            config,
            strict,
        } => run_check(&path, config, strict),
        Command::Watch { path, config, out } => run_watch(&path, config, out),
    }
}
