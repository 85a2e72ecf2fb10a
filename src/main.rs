//! docstring-md: generate Markdown API documentation from Python docstrings.
//!
//! Two ways of supplying units:
//!
//! - **scan mode**: `docstring-md -t Title --description Text src/ tools/*.py`
//! - **tree mode**: `docstring-md -t Title --description Text --tree units.json`
//!
//! Defaults come from `.dsm.cfg` in the working directory; flags override them.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use docstring_md::collect;
use docstring_md::model::DocumentedUnit;
use docstring_md::render::{self, RenderOutput};
use docstring_md::settings::{Settings, CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const INDEX_FILE: &str = "index.md";

#[derive(Parser)]
#[command(
    name = "docstring-md",
    version,
    about = "Generate Markdown API documentation from Python docstrings"
)]
struct Cli {
    /// Source files, directories or glob patterns. Defaults to the configured directory.
    inputs: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Document title
    #[arg(short = 't', long)]
    title: Option<String>,

    /// Text placed under the title
    #[arg(long)]
    description: Option<String>,

    /// Write everything into a single document
    #[arg(short = 's', long, conflicts_with = "multi")]
    single: bool,

    /// Write one document per module plus an index
    #[arg(long)]
    multi: bool,

    /// Append each unit's source code
    #[arg(short = 'c', long)]
    show_source: bool,

    /// Link headers to their source files
    #[arg(long)]
    source_links: bool,

    /// Read units from a JSON tree instead of scanning sources
    #[arg(long, conflicts_with = "inputs")]
    tree: Option<PathBuf>,

    /// Footer date (YYYY-MM-DD), today if omitted
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Save the effective settings back to the configuration file
    #[arg(long)]
    save: bool,

    /// Print documents to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load(&cli.config)?;
    apply_overrides(&mut settings, &cli);
    if cli.save {
        settings.save(&cli.config)?;
    }

    let generated_on = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let config = settings.render_configuration(generated_on)?;

    let tree = load_units(&cli, &settings)?;
    if tree.is_empty() {
        tracing::warn!("no modules found");
    }

    let output = render::render(&tree, &config).context("cannot render documentation tree")?;
    for warning in &output.warnings {
        tracing::warn!("{}", warning);
    }

    if cli.stdout {
        print_output(&output);
        return Ok(());
    }

    for path in write_output(&output, &settings)? {
        tracing::info!("wrote {}", path.display());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "docstring_md=debug" } else { "docstring_md=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Flags given on the command line win over the configuration file.
fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(ref title) = cli.title {
        settings.title = Some(title.clone());
    }
    if let Some(ref description) = cli.description {
        settings.description = Some(description.clone());
    }
    if let Some(ref output) = cli.output {
        settings.destination = output.to_string_lossy().into_owned();
    }
    if cli.single {
        settings.single_doc_mode = true;
    }
    if cli.multi {
        settings.single_doc_mode = false;
    }
    if cli.show_source {
        settings.show_source = true;
    }
    if cli.source_links {
        settings.show_source_links = true;
    }
}

fn load_units(cli: &Cli, settings: &Settings) -> Result<Vec<DocumentedUnit>> {
    if let Some(ref path) = cli.tree {
        return collect::tree::load(path);
    }
    let inputs = if cli.inputs.is_empty() {
        vec![settings.directory.clone()]
    } else {
        cli.inputs.clone()
    };
    collect::collect(&inputs, &settings.excluded_files)
}

/// File name a rendered body is written to.
fn document_file_name(name: &str, settings: &Settings) -> String {
    if settings.single_doc_mode {
        settings.single_doc_name.clone()
    } else {
        format!("{}.md", name)
    }
}

fn write_output(output: &RenderOutput, settings: &Settings) -> Result<Vec<PathBuf>> {
    let dir = Path::new(&settings.destination);
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let mut documents: Vec<(String, &str)> = output
        .bodies
        .iter()
        .map(|(name, text)| (document_file_name(name, settings), text.as_str()))
        .collect();
    if !output.index.is_empty() {
        if documents.iter().any(|(file, _)| file == INDEX_FILE) {
            tracing::warn!("module `index` is overwritten by the index document");
        }
        documents.push((INDEX_FILE.to_string(), output.index.as_str()));
    }

    let mut written = Vec::with_capacity(documents.len());
    for (file, text) in documents {
        let path = dir.join(file);
        fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn print_output(output: &RenderOutput) {
    for (_, text) in &output.bodies {
        print!("{}", text);
    }
    if !output.index.is_empty() {
        print!("{}", output.index);
    }
}
