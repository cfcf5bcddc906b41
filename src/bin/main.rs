//! JSON-LD to N-Triples CLI
//!
//! Command-line tool that parses a JSON-LD file and writes its triples as
//! N-Triples.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use jsonld_stream::{parse_to_writer, JsonLdError, ParseOptions, ParseStats};

#[derive(Parser)]
#[command(name = "jsonld-stream")]
#[command(about = "Convert a JSON-LD document to N-Triples")]
#[command(version)]
struct Cli {
    /// JSON-LD file to parse
    input: PathBuf,

    /// Base IRI for resolving relative @id values
    #[arg(short, long)]
    base: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum nesting of node objects
    #[arg(long, default_value_t = ParseOptions::default().max_depth)]
    max_depth: usize,
}

fn run(cli: Cli) -> Result<ParseStats, JsonLdError> {
    if !cli.input.exists() {
        return Err(JsonLdError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File {} does not exist", cli.input.display()),
        )));
    }

    let options = ParseOptions {
        base: cli.base,
        max_depth: cli.max_depth,
    };
    let reader = BufReader::new(File::open(&cli.input)?);

    match cli.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(&path)?);
            let stats = parse_to_writer(reader, writer, &options)?;
            tracing::info!(path = %path.display(), "wrote triples");
            Ok(stats)
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            let stats = parse_to_writer(reader, &mut lock, &options)?;
            lock.flush()?;
            Ok(stats)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(stats) => {
            tracing::info!(
                triples = stats.triples,
                blank_labels = stats.blank_labels,
                "parsed document"
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
