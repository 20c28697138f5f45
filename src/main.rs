use clap::Parser;
use slidewright::render::{DEFAULT_CONTINUATION_SUFFIX, RenderOptions, render_file};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Render a YAML slide deck into a PDF with a theme.
#[derive(Debug, Parser)]
#[command(name = "slidewright", version)]
struct Cli {
    /// Slide deck to render
    input: PathBuf,

    /// Theme directory containing info.yaml and its fonts
    theme_dir: PathBuf,

    /// PDF file to write
    output: PathBuf,

    /// Resolve relative image paths against this directory
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Skip the title page even when the deck has metadata
    #[arg(long)]
    no_title_page: bool,

    /// Suffix for slide titles on overflow pages
    #[arg(long, default_value = DEFAULT_CONTINUATION_SUFFIX)]
    continuation: String,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut options = RenderOptions::new()
        .with_title_page(!cli.no_title_page)
        .with_continuation_suffix(cli.continuation);
    if let Some(dir) = cli.base_dir {
        options = options.with_base_dir(dir);
    }

    match render_file(&cli.input, &cli.theme_dir, &cli.output, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("slidewright: {}", e);
            ExitCode::FAILURE
        },
    }
}
