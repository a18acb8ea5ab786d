use crate::output::print_json;
use anyhow::Context;
use resume_core::{build, naming};
use std::path::Path;

pub fn run(
    root: &Path,
    file: Option<&Path>,
    company: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let company = match (company, file) {
        (Some(c), _) => naming::sanitize(c.trim()),
        (None, Some(f)) => naming::company_key(f),
        (None, None) => anyhow::bail!("pass a markdown file or --company"),
    };

    let dir = build::build_folder(root, &company)
        .with_context(|| format!("nothing to open for '{company}'"))?;

    if json {
        print_json(&serde_json::json!({
            "company": company,
            "build_directory": dir,
        }))?;
    } else {
        println!("Opening {} ...", dir.display());
    }
    super::build::reveal(&dir);
    Ok(())
}
