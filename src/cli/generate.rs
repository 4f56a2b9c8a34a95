use anyhow::Result;
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::emit;
use crate::link::ensure_no_duplicates;

static ANALYZING: Emoji<'_, '_> = Emoji("🔎 ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

pub fn run_generate(
    path: &Path,
    config_path: Option<PathBuf>,
    out: Option<String>,
    strict: bool,
    no_wrapper: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(p) => Config::load(&p)?,
        None => Config::discover(path)?,
    };
    if let Some(out) = out {
        config.out_dir = out;
    }
    if no_wrapper {
        config.emit_wrapper = false;
    }
    if strict {
        config.strict_duplicates = true;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("{}Analyzing {}...", ANALYZING, path.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = super::run_pipeline(path, &config);
    pb.finish_and_clear();
    let (model, ctx) = result?;

    if config.strict_duplicates {
        ensure_no_duplicates(&model)?;
    }

    let artifacts = emit::generate(&model, config.emit_wrapper);
    let out_dir = path.join(&config.out_dir);
    std::fs::create_dir_all(&out_dir)?;
    std::fs::write(out_dir.join("library.json"), &artifacts.serialized)?;
    if let Some(wrapper) = &artifacts.wrapper {
        std::fs::write(out_dir.join("library.ts"), wrapper)?;
    }

    let declarations: usize = model.modules.iter().map(|m| m.declarations.len()).sum();
    println!("\n{}Library model written to {}\n", SUCCESS, out_dir.display());
    println!("  Package:       {} {}", style(&model.name).green(), model.version);
    println!("  Modules:       {}", style(model.modules.len()).cyan());
    println!("  Declarations:  {}", style(declarations).cyan());

    if ctx.warning_count() > 0 {
        println!("\n{}Warnings ({}):", WARNING, ctx.warning_count());
        for diagnostic in ctx.diagnostics().iter().take(10) {
            match &diagnostic.file {
                Some(file) => println!("  - {}: {}", file, style(&diagnostic.message).yellow()),
                None => println!("  - {}", style(&diagnostic.message).yellow()),
            }
        }
        if ctx.diagnostics().len() > 10 {
            println!("  ... and {} more", ctx.diagnostics().len() - 10);
        }
    }

    Ok(())
}
