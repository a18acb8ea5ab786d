use crate::output::print_json;
use crate::ConverterArgs;
use clap::Subcommand;
use resume_core::config::WarnLevel;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration (file values plus overrides)
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(
    root: &Path,
    overrides: &ConverterArgs,
    subcmd: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, overrides, json),
        ConfigSubcommand::Validate => validate(root, overrides, json),
    }
}

fn show(root: &Path, overrides: &ConverterArgs, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root, overrides)?;
    if json {
        return print_json(&config);
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}

fn validate(root: &Path, overrides: &ConverterArgs, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root, overrides)?;
    let warnings = config.validate(root);

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
