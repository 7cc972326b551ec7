//! labdown - Render codelab node trees to lab markdown

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use labdown::nodes::Node;
use labdown::{Dialect, RenderOptions, render};

#[derive(Parser)]
#[command(name = "labdown")]
#[command(version, about = "Render codelab documents to lab markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    labdown lab.json lab.md              Render to Qwiklabs markdown
    labdown -f md -e web lab.json        Render web-only content as codelab markdown
    cat lab.json | labdown -             Read the document from stdin")]
struct Cli {
    /// JSON file holding an array of nodes, or `-` for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    /// Output dialect
    #[arg(short, long, value_enum, default_value_t = Dialect::Qwiklabs)]
    format: Dialect,

    /// Active environment; nodes tagged for other environments are skipped
    #[arg(short, long)]
    env: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> labdown::Result<()> {
    let nodes = read_nodes(&cli.input)?;
    debug!(input = %cli.input, roots = nodes.len(), "loaded document");

    let mut options = RenderOptions::new(cli.format);
    if let Some(env) = &cli.env {
        options = options.with_env(env);
    }

    match &cli.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            render(&mut out, &options, &nodes)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            render(&mut out, &options, &nodes)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn read_nodes(input: &str) -> labdown::Result<Vec<Node>> {
    let mut json = String::new();
    if input == "-" {
        io::stdin().read_to_string(&mut json)?;
    } else {
        File::open(input)?.read_to_string(&mut json)?;
    }
    Ok(serde_json::from_str(&json)?)
}
