use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::Parser;

use keyremap::cli::{CliArgs, InputSource, RunConfig, RunMode};
use keyremap::config::RemapConfig;
use keyremap::keymap::{load_rules, parse_keybindings_json, render};

fn main() -> Result<()> {
    keyremap::tracing::init();

    let args = CliArgs::parse();
    let config = args
        .into_config(RemapConfig::load())
        .map_err(anyhow::Error::msg)?;

    run(config)
}

fn run(config: RunConfig) -> Result<()> {
    let rules = load_rules(config.rules.as_deref()).context("Failed to load rules")?;

    let (input, output) = match config.mode {
        RunMode::PrintRules => {
            let yaml = serde_yaml::to_string(&rules.to_config())?;
            print!("{}", yaml);
            return Ok(());
        }
        RunMode::Remap { input, output } => (input, output),
    };

    let text = match &input {
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read default keybindings from stdin")?;
            text
        }
        InputSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
    };

    let bindings = parse_keybindings_json(&text, config.skip_unknown_keys)
        .context("Failed to parse default keybindings")?;
    tracing::info!("Read {} default bindings", bindings.len());

    let remapped = keyremap::remap(&bindings, &rules)?;
    if config.show_stats {
        eprintln!("{}", remapped.stats());
    }

    let document = render(&remapped.into_bindings(), config.format)?;
    match output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
