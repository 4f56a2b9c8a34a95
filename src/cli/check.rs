use anyhow::Result;
use console::{style, Emoji};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::context::Severity;
use crate::link::find_duplicates;

static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

/// Run the pipeline without writing anything; report diagnostics and
/// duplicate declaration names.
pub fn run_check(path: &Path, config_path: Option<PathBuf>, strict: bool) -> Result<()> {
    let config = match config_path {
        Some(p) => Config::load(&p)?,
        None => Config::discover(path)?,
    };

    let (model, ctx) = super::run_pipeline(path, &config)?;

    for diagnostic in ctx.diagnostics() {
        let label = match diagnostic.severity {
            Severity::Warning => style("warning").yellow(),
            Severity::Error => style("error").red(),
        };
        match &diagnostic.file {
            Some(file) => println!("{}: {}: {}", label, file, diagnostic.message),
            None => println!("{}: {}", label, diagnostic.message),
        }
    }

    let duplicates = find_duplicates(&model);
    if !duplicates.is_empty() {
        println!("\n{}Duplicate declaration names:", WARNING);
        for (name, entries) in &duplicates {
            let modules: Vec<&str> = entries.iter().map(|e| e.module.as_str()).collect();
            println!("  {} in {}", style(name).bold(), modules.join(", "));
        }
        if strict || config.strict_duplicates {
            anyhow::bail!("{} duplicate declaration name(s) found", duplicates.len());
        }
    }

    if !ctx.is_ok() {
        anyhow::bail!("analysis reported errors");
    }

    let declarations: usize = model.modules.iter().map(|m| m.declarations.len()).sum();
    println!(
        "\n{}{} modules, {} declarations, {} warning(s)",
        SUCCESS,
        model.modules.len(),
        declarations,
        ctx.warning_count()
    );
    Ok(())
}
