use crate::clipboard::{StdinClipboard, SystemClipboard};
use crate::output::{print_json, print_warning};
use crate::prompt::{ask, TerminalPrompter};
use crate::ConverterArgs;
use clap::{Args, Subcommand};
use resume_core::scaffold::{Clipboard, DocumentScaffolder, ScaffoldOutcome};
use resume_core::types::{self, ContentSource, DocumentKind, Format};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum NewSubcommand {
    /// Create a tailored resume in resumes/tailored/
    Resume {
        #[command(flatten)]
        args: NewArgs,

        /// Position qualifier, e.g. 'senior' or 'staff'
        #[arg(long)]
        position: Option<String>,
    },

    /// Create a tailored cover letter in cover-letters/tailored/
    Cover {
        #[command(flatten)]
        args: NewArgs,
    },
}

#[derive(Args)]
pub struct NewArgs {
    /// Company name, e.g. 'google' or 'Acme Corp'
    #[arg(long)]
    company: Option<String>,

    /// Initial content: clipboard, editor or empty
    #[arg(long, value_name = "SOURCE")]
    source: Option<ContentSource>,

    /// Read the initial content from stdin instead of the clipboard
    #[arg(long, conflicts_with = "source")]
    stdin: bool,

    /// Overwrite an existing document without asking
    #[arg(long)]
    force: bool,

    /// Build right after creating: docx, or pdf for DOCX + PDF
    #[arg(long, value_name = "FORMAT")]
    build: Option<Format>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    overrides: &ConverterArgs,
    subcmd: NewSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let (kind, args, position) = match subcmd {
        NewSubcommand::Resume { args, position } => (DocumentKind::Resume, args, position),
        NewSubcommand::Cover { args } => (DocumentKind::CoverLetter, args, None),
    };

    let source = if args.stdin {
        Some(ContentSource::Clipboard)
    } else {
        args.source
    };
    let mut prompter = TerminalPrompter::new(args.company, position, source, args.force);
    let mut clipboard: Box<dyn Clipboard> = if args.stdin {
        Box::new(StdinClipboard)
    } else {
        Box::new(SystemClipboard)
    };

    let outcome =
        DocumentScaffolder::new(root).scaffold(kind, &mut prompter, clipboard.as_mut())?;

    let (request, path, source, line_count) = match outcome {
        ScaffoldOutcome::Created {
            request,
            path,
            source,
            line_count,
        } => (request, path, source, line_count),
        ScaffoldOutcome::Cancelled { at } => {
            if json {
                print_json(&serde_json::json!({ "cancelled": at }))?;
            } else {
                println!("Cancelled.");
            }
            return Ok(());
        }
    };

    if json {
        print_json(&serde_json::json!({
            "kind": request.kind,
            "path": path.full_path,
            "source": source,
            "line_count": line_count,
        }))?;
    } else {
        match line_count {
            Some(n) => println!("Created: {} ({n} lines from clipboard)", path.filename),
            None => println!("Created: {}", path.filename),
        }
    }

    if source == ContentSource::Editor {
        if let Err(e) = open::that(&path.full_path) {
            print_warning(&format!("could not open {}: {e}", path.full_path.display()));
        }
    }

    let build = match args.build {
        Some(format) => Some(format),
        None if prompter.is_interactive() && !json => ask_build()?,
        None => None,
    };

    if let Some(format) = build {
        let config = super::load_config(root, overrides)?;
        super::build::build_and_report(
            root,
            &config,
            &path.full_path,
            &types::formats(format == Format::Pdf),
            Some(&request.company),
            false,
            json,
        )?;
    }

    Ok(())
}

fn ask_build() -> anyhow::Result<Option<Format>> {
    let answer = ask("Document created! Build it now? [d]ocx, docx + [p]df, [N]ot now: ")?;
    Ok(match answer.as_deref().map(str::trim) {
        Some("d") | Some("docx") => Some(Format::Docx),
        Some("p") | Some("pdf") => Some(Format::Pdf),
        _ => None,
    })
}
