//! Patricia Lookup CLI
//!
//! Loads a CSV dataset into a dictionary keyed on one column, then answers
//! one query per input line. Each query writes a summary line to stdout and
//! a detail block to the output file.
//!
//! # Usage
//!
//! ```bash
//! # Stage 1: linear scan baseline
//! patricia-lookup 1 dataset.csv output.txt < queries.txt
//!
//! # Stage 2: Patricia trie with nearest-match fallback
//! patricia-lookup 2 dataset.csv output.txt < queries.txt
//!
//! # Key on another column, by name or zero-based index:
//! patricia-lookup 2 dataset.csv output.txt --key-field ROAD_NAME < queries.txt
//!
//! # Logging is controlled via RUST_LOG (tracing-subscriber EnvFilter):
//! RUST_LOG=patricia_lookup=debug patricia-lookup 2 dataset.csv output.txt < queries.txt
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use patricia_lookup::csv::{self, Reader};
use patricia_lookup::render;
use patricia_lookup::{
    address_field_index, load, Dictionary, Error, PatriciaDict, ScanDict, Schema,
    ADDRESS_FIELD_COUNT,
};
use tracing::{info, warn};

/// Which dictionary answers the queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Linear scan over every record
    #[value(name = "1", alias = "scan")]
    Scan,
    /// Patricia trie with nearest-match fallback
    #[value(name = "2", alias = "patricia")]
    Patricia,
}

/// Exact and nearest-match lookup over a CSV dataset
#[derive(Parser, Debug)]
#[command(name = "patricia-lookup")]
#[command(about = "Look up dataset records by one key column")]
struct Args {
    /// Dictionary to build: 1 (linear scan) or 2 (Patricia trie)
    #[arg(value_enum)]
    stage: Stage,

    /// CSV dataset with a header row
    input: PathBuf,

    /// File that receives the detailed records for every query
    output: PathBuf,

    /// Key column, as a header name or a zero-based index
    #[arg(long, default_value = "EZI_ADD", env = "PATRICIA_KEY_FIELD")]
    key_field: String,

    /// Read queries from this file instead of stdin
    #[arg(long)]
    queries: Option<PathBuf>,
}

/// Resolves `--key-field` against the dataset header, then the address layout.
fn resolve_key_field(spec: &str, headers: &[String]) -> Result<usize, Error> {
    if let Ok(index) = spec.parse::<usize>() {
        return Ok(index);
    }
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(spec))
        .or_else(|| address_field_index(spec))
        .ok_or_else(|| Error::UnknownField(spec.to_string()))
}

fn run<D: Dictionary>(
    dict: &mut D,
    reader: Reader<BufReader<File>>,
    headers: &[String],
    queries: Box<dyn BufRead>,
    output: &mut impl Write,
) -> Result<()> {
    let started = Instant::now();
    let loaded = load(dict, reader.records(*dict.schema())).context("loading dataset")?;
    info!(records = loaded, elapsed = ?started.elapsed(), "dataset loaded");

    let stdout = io::stdout();
    let mut summary = stdout.lock();
    let mut answered = 0usize;
    let started = Instant::now();

    for line in queries.lines() {
        let line = line.context("reading queries")?;
        let query = csv::trim_line_end(&line);
        let result = dict.lookup(query);
        render::render(&result, headers, &mut summary, output).context("writing results")?;
        answered += 1;
    }

    output.flush().context("flushing output")?;
    info!(queries = answered, elapsed = ?started.elapsed(), "queries answered");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,patricia_lookup=info".into()),
        )
        .init();

    let args = Args::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("opening dataset {}", args.input.display()))?;
    let reader = Reader::new(BufReader::new(input))
        .with_context(|| format!("reading header of {}", args.input.display()))?;
    let headers = reader.headers().to_vec();
    if headers.len() != ADDRESS_FIELD_COUNT {
        warn!(
            fields = headers.len(),
            expected = ADDRESS_FIELD_COUNT,
            "dataset is not in the address layout"
        );
    }

    let key_field = resolve_key_field(&args.key_field, &headers)?;
    let schema = Schema::new(headers.len(), key_field)?;
    info!(key_field, column = %headers[key_field], stage = ?args.stage, "building dictionary");

    let output = File::create(&args.output)
        .with_context(|| format!("creating output {}", args.output.display()))?;
    let mut output = BufWriter::new(output);

    let queries: Box<dyn BufRead> = match &args.queries {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening queries {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    match args.stage {
        Stage::Scan => {
            let mut dict = ScanDict::new(schema);
            run(&mut dict, reader, &headers, queries, &mut output)?;
        }
        Stage::Patricia => {
            let mut dict = PatriciaDict::new(schema);
            run(&mut dict, reader, &headers, queries, &mut output)?;
            info!(
                keys = dict.key_count(),
                height = dict.height(),
                "trie shape"
            );
            let freed = dict.teardown();
            info!(
                branches = freed.branches,
                leaves = freed.leaves,
                records = freed.records,
                stem_bytes = freed.stem_bytes,
                "dictionary released"
            );
        }
    }

    Ok(())
}
