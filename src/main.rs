use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use courtchart::auth::SessionStore;
use courtchart::dispatch::{dispatch, renderer_for};
use courtchart::tracker::QuerySession;
use courtchart::transport::{ClientConfig, HttpTransport};
use courtchart::{normalize_str, OutputFormat, Outcome, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "courtchart")]
#[command(about = "Turn basketball analysis results into chart specs and images", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a result envelope and print the chart spec as JSON
    Normalize {
        /// Envelope file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Normalize a result envelope and render it to a file
    Render {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Ask the query service a question, then print or render the answer
    Ask {
        question: String,
        /// Query service base URL (defaults to COURTCHART_ENDPOINT)
        #[arg(long)]
        endpoint: Option<String>,
        /// Directory holding the signed-in session
        #[arg(long)]
        session_dir: Option<PathBuf>,
        /// Render to this file instead of printing JSON
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    #[arg(long, value_enum, default_value = "png")]
    format: Format,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Png,
    Svg,
    Csv,
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        let format = match self.format {
            Format::Png => OutputFormat::Png,
            Format::Svg => OutputFormat::Svg,
            Format::Csv => OutputFormat::Csv,
        };
        RenderOptions {
            width: self.width,
            height: self.height,
            format,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Normalize { input } => {
            let outcome = read_outcome(input.as_deref())?;
            print_json(&outcome)
        }
        Command::Render {
            input,
            output,
            render,
        } => {
            let outcome = read_outcome(input.as_deref())?;
            write_rendered(&outcome, &render.options(), &output)
        }
        Command::Ask {
            question,
            endpoint,
            session_dir,
            output,
            render,
        } => {
            let mut config = ClientConfig::from_env();
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }

            let session = match session_dir {
                Some(dir) => SessionStore::new(dir)
                    .load()
                    .context("Failed to load session")?,
                None => None,
            };

            let transport =
                HttpTransport::new(config, session).context("Failed to set up query client")?;
            let mut query = QuerySession::new(transport);
            let outcome = query
                .ask(&question)
                .with_context(|| format!("Query failed: {}", question))?;

            match output {
                Some(path) => write_rendered(&outcome, &render.options(), &path),
                None => print_json(&outcome),
            }
        }
    }
}

fn read_outcome(input: Option<&Path>) -> Result<Outcome> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read result from stdin")?;
            buffer
        }
    };

    let outcome = normalize_str(&raw).context("Failed to normalize result")?;
    Ok(outcome)
}

fn print_json(outcome: &Outcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("Failed to serialize chart spec")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn write_rendered(outcome: &Outcome, options: &RenderOptions, path: &Path) -> Result<()> {
    let renderer = renderer_for(options);
    let bytes = dispatch(outcome, renderer.as_ref()).context("Failed to render chart")?;
    fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote chart");
    Ok(())
}
