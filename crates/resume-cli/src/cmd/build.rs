use crate::output::{print_json, print_table, print_warning};
use crate::ConverterArgs;
use anyhow::Context;
use resume_core::build::BuildOrchestrator;
use resume_core::config::Config;
use resume_core::converter::ConverterInvoker;
use resume_core::types::{self, Format};
use std::path::{Path, PathBuf};

pub fn run(
    root: &Path,
    overrides: &ConverterArgs,
    file: &Path,
    pdf: bool,
    company: Option<&str>,
    open: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root, overrides)?;
    let source = absolute(file);
    build_and_report(root, &config, &source, &types::formats(pdf), company, open, json)
}

/// Relative sources are taken relative to the current directory, not the
/// workspace root, the way a shell user expects.
fn absolute(file: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(file))
        .unwrap_or_else(|_| file.to_path_buf())
}

/// Build `source` and print the result. Shared with `new --build`, which
/// passes the scaffolded company through instead of re-deriving it.
pub fn build_and_report(
    root: &Path,
    config: &Config,
    source: &Path,
    formats: &[Format],
    company: Option<&str>,
    open: bool,
    json: bool,
) -> anyhow::Result<()> {
    let invoker = ConverterInvoker::from_config(config, root);
    let orchestrator = BuildOrchestrator::new(root, config, &invoker);

    if !json {
        println!("Building {} ...", source.display());
    }
    let outcome = orchestrator
        .build(source, formats, company)
        .context("build failed")?;

    for warning in &outcome.warnings {
        print_warning(warning);
    }

    if json {
        print_json(&outcome)?;
    } else {
        let rows: Vec<Vec<String>> = outcome
            .outcomes
            .iter()
            .map(|o| {
                let status = if o.exit_succeeded { "ok" } else { "failed" };
                let output = o
                    .output
                    .strip_prefix(root)
                    .unwrap_or(&o.output)
                    .display()
                    .to_string();
                vec![o.format.to_string(), status.to_string(), output]
            })
            .collect();
        print_table(&["FORMAT", "STATUS", "OUTPUT"], &rows);
        println!("Document built successfully for {}", outcome.company);
    }

    if open {
        reveal(&outcome.build_directory);
    }
    Ok(())
}

/// Open a folder in the OS file manager. Failure to launch is only a warning.
pub fn reveal(dir: &Path) {
    if let Err(e) = open::that(dir) {
        print_warning(&format!("could not open {}: {e}", dir.display()));
    }
}
