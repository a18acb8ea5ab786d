mod clipboard;
mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Args, Parser, Subcommand};
use cmd::{config::ConfigSubcommand, new::NewSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mdresume",
    about = "Tailored markdown resumes and cover letters, built to DOCX/PDF with pandoc",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .mdresume/, resumes/ or .git/)
    #[arg(long, global = true, env = "MDRESUME_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(flatten)]
    converter: ConverterArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the converter settings in .mdresume/config.yaml.
#[derive(Args, Debug, Default)]
pub struct ConverterArgs {
    /// Path to the pandoc binary
    #[arg(long, global = true, env = "MDRESUME_PANDOC", value_name = "PATH")]
    pub pandoc: Option<String>,

    /// Build script to use instead of pandoc (takes precedence over --pandoc)
    #[arg(long, global = true, env = "MDRESUME_SCRIPT", value_name = "PATH")]
    pub script: Option<String>,

    /// Kill the converter after this many seconds (0 = wait forever)
    #[arg(long, global = true, env = "MDRESUME_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the workspace folders and a default config
    Init,

    /// Create a new tailored document
    New {
        #[command(subcommand)]
        subcommand: NewSubcommand,
    },

    /// Build a markdown document to DOCX (and optionally PDF)
    Build {
        /// Markdown source file
        file: PathBuf,

        /// Also build a PDF (failures are reported as warnings)
        #[arg(long)]
        pdf: bool,

        /// Company for the build folder (default: first segment of the file name)
        #[arg(long)]
        company: Option<String>,

        /// Reveal the build folder afterwards
        #[arg(long)]
        open: bool,
    },

    /// Reveal the build folder for a document or company
    Open {
        /// Markdown source file whose build folder to open
        #[arg(required_unless_present = "company")]
        file: Option<PathBuf>,

        /// Company build folder to open
        #[arg(long, conflicts_with = "file")]
        company: Option<String>,
    },

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let overrides = &cli.converter;

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, overrides, cli.json),
        Commands::New { subcommand } => cmd::new::run(&root, overrides, subcommand, cli.json),
        Commands::Build {
            file,
            pdf,
            company,
            open,
        } => cmd::build::run(&root, overrides, &file, pdf, company.as_deref(), open, cli.json),
        Commands::Open { file, company } => {
            cmd::open::run(&root, file.as_deref(), company.as_deref(), cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, overrides, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
