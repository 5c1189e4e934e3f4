//! envelope-decode - inspect a delivery envelope from the command line.
//!
//! Reads one JSON payload from a file (or stdin), reports which envelope
//! shape it has and prints the decoded inner body as pretty JSON.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lambda_envelope::{Config, Decoder};

/// Decode a queue, pub/sub or event-bus envelope.
#[derive(Parser, Debug)]
#[command(name = "envelope-decode")]
#[command(about = "Detect the envelope shape of a payload and print its inner body")]
struct Args {
    /// Payload file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Only print the detected envelope kind
    #[arg(long)]
    classify: bool,

    /// JSON configuration file
    #[arg(short, long, env = "ENVELOPE_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "decode failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if std::env::var(lambda_envelope::observability::LOG_FORMAT_ENV).is_ok() {
        lambda_envelope::observability::init_tracing();
    } else {
        lambda_envelope::observability::init_tracing_with(&config.observability);
    }

    let raw = read_input(args.input.as_ref())?;
    let decoder = Decoder::new(config.decoder);

    if args.classify {
        println!("{}", decoder.classify(&raw)?);
        return Ok(());
    }

    let decoded = decoder.decode::<serde_json::Value>(&raw)?;
    println!("kind: {}", decoded.kind);
    match decoded.message {
        Some(body) => println!("{}", serde_json::to_string_pretty(&body)?),
        None => println!("null"),
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read(p),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
