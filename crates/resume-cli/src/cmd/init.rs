use crate::output::print_json;
use crate::ConverterArgs;
use anyhow::Context;
use resume_core::config::Config;
use resume_core::converter::ConverterInvoker;
use resume_core::init::{self, ConverterStatus};
use resume_core::paths;
use std::path::Path;

pub fn run(root: &Path, overrides: &ConverterArgs, json: bool) -> anyhow::Result<()> {
    // Overrides pick the converter to probe; they are never written to disk.
    let file_config = Config::load(root).context("failed to load .mdresume/config.yaml")?;
    let config = super::load_config(root, overrides)?;
    let invoker = ConverterInvoker::from_config(&config, root);
    let report = init::init(root, &file_config, &invoker)
        .with_context(|| format!("failed to initialize {}", root.display()))?;

    if json {
        return print_json(&report);
    }

    println!("Initializing workspace in: {}", root.display());
    for dir in &report.created {
        println!("  created: {dir}");
    }
    for dir in &report.existing {
        println!("  exists:  {dir}");
    }
    if report.config_created {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    println!();
    match &report.converter {
        ConverterStatus::Available { name, version } => {
            println!("Converter ready: {name} {version}");
        }
        ConverterStatus::Missing { name, reason } => {
            println!("Converter not usable: {name}");
            println!("  {reason}");
        }
    }
    Ok(())
}
