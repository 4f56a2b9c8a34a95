use anyhow::Result;
use console::{style, Emoji};
use notify_debouncer_mini::notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use crate::config::Config;
use crate::emit;

static WATCHING: Emoji<'_, '_> = Emoji("👀 ", "");
static UPDATED: Emoji<'_, '_> = Emoji("✅ ", "");
static ERROR: Emoji<'_, '_> = Emoji("❌ ", "");

/// Regenerate on debounced file events. When the freshly serialized model
/// is byte-identical to the previous output, nothing is rewritten and no
/// update is announced, so downstream reloads are suppressed.
pub fn run_watch(path: &Path, config_path: Option<PathBuf>, out: Option<String>) -> Result<()> {
    let mut config = match config_path {
        Some(p) => Config::load(&p)?,
        None => Config::discover(path)?,
    };
    if let Some(out) = out {
        config.out_dir = out;
    }

    let out_dir = path.join(&config.out_dir);
    let mut last_fingerprint = regenerate(path, &config, &out_dir)?;
    println!("{}Initial model written to {}", UPDATED, out_dir.display());

    let (tx, rx) = mpsc::channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), tx)?;
    let options = super::resolve_options(path, &config);
    for dir in &options.source_dirs {
        let dir = Path::new(dir);
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
        }
    }

    println!("{}Watching {} for changes...", WATCHING, path.display());

    for result in rx {
        match result {
            Ok(_events) => match regenerate(path, &config, &out_dir) {
                Ok(fingerprint) => {
                    if fingerprint == last_fingerprint {
                        println!("  {}", style("output unchanged; reload suppressed").dim());
                    } else {
                        println!("{}Model updated", UPDATED);
                        last_fingerprint = fingerprint;
                    }
                }
                Err(e) => println!("{}{}", ERROR, style(e).red()),
            },
            Err(e) => println!("{}watch error: {}", ERROR, style(e).red()),
        }
    }

    Ok(())
}

/// One regeneration pass. Returns the fingerprint of the serialized model,
/// writing the artifacts only when the output actually changed on disk.
fn regenerate(path: &Path, config: &Config, out_dir: &Path) -> Result<String> {
    let (model, _ctx) = super::run_pipeline(path, config)?;
    let artifacts = emit::generate(&model, config.emit_wrapper);
    let fingerprint = fingerprint(&artifacts.serialized);

    let target = out_dir.join("library.json");
    let unchanged = std::fs::read_to_string(&target)
        .map(|existing| existing == artifacts.serialized)
        .unwrap_or(false);
    if !unchanged {
        std::fs::create_dir_all(out_dir)?;
        std::fs::write(&target, &artifacts.serialized)?;
        if let Some(wrapper) = &artifacts.wrapper {
            std::fs::write(out_dir.join("library.ts"), wrapper)?;
        }
    }

    Ok(fingerprint)
}

fn fingerprint(content: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stable_for_identical_output() {
        let a = fingerprint("{\n\t\"name\": \"pkg\"\n}\n");
        let b = fingerprint("{\n\t\"name\": \"pkg\"\n}\n");
        let c = fingerprint("{\n\t\"name\": \"other\"\n}\n");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }
}
