//! CLI tool to run a file of records through the processing manager.
//!
//! Usage:
//!   flow-run <input.data>
//!   flow-run <input.data> -o <output.data>
//!   flow-run <input.data> --chain
//!
//! Each non-empty input line is one record: lines that parse as a JSON
//! object become structured mappings, everything else stays text. By
//! default every record is dispatched through `Manager::run`; with
//! `--chain` the whole batch is threaded through the structured ->
//! analysis -> storage chain instead and the chain report is printed.
//!
//! Trace verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use recordflow::{Adapter, Manager, Processor, records_from_str};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flow-run", about = "Run records through routed pipelines")]
struct Args {
    /// Input data file, one record per line
    input: PathBuf,

    /// Optional output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Thread the batch through the structured -> analysis -> storage
    /// chain instead of per-record dispatch
    #[arg(long)]
    chain: bool,

    /// Delimiter character for delimited-text records
    #[arg(long, default_value_t = ',')]
    delimiter: char,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    let input_text = match fs::read_to_string(&args.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading input file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let records = records_from_str(&input_text);
    let record_count = records.len();
    let manager = Manager::with_delimiter(args.delimiter);

    let output = if args.chain {
        let structured = Adapter::structured();
        let analysis = Adapter::analysis();
        let storage = Adapter::storage();
        let units: [&dyn Processor; 3] = [&structured, &analysis, &storage];

        match manager.run_chain(&units, records) {
            Ok(report) => match serde_json::to_string_pretty(&report) {
                Ok(rendered) => rendered,
                Err(e) => {
                    eprintln!("Error rendering chain report: {e}");
                    process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Chain aborted: {e}");
                process::exit(1);
            }
        }
    } else {
        records
            .into_iter()
            .map(|record| manager.run(record).to_string())
            .collect::<Vec<_>>()
            .join("\n")
    };

    if let Some(out_path) = &args.output {
        if let Err(e) = fs::write(out_path, &output) {
            eprintln!("Error writing output file '{}': {}", out_path.display(), e);
            process::exit(1);
        }
        eprintln!("Processed {} records, output: {}", record_count, out_path.display());
    } else {
        if let Err(e) = io::stdout().write_all(output.as_bytes()) {
            eprintln!("Error writing output: {e}");
            process::exit(1);
        }
        if !output.is_empty() && !output.ends_with('\n') {
            println!();
        }
        eprintln!("Processed {record_count} records");
    }
}
