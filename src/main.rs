use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fakenews_classifier::{Inference, Pipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Classify news text as FAKE or REAL
#[derive(Parser, Debug)]
#[command(name = "fakenews-detect", version, about)]
struct Cli {
    /// Model artifact (.json or .cbor)
    #[arg(short, long, env = "FAKENEWS_MODEL")]
    model: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// News text; read from stdin when omitted
    text: Vec<String>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fakenews_classifier=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fakenews_classifier=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_document(text: &[String]) -> anyhow::Result<String> {
    if !text.is_empty() {
        return Ok(text.join(" "));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read news text from stdin")?;
    Ok(buf)
}

fn print_human(inference: &Inference) {
    if inference.label.eq_ignore_ascii_case("FAKE") {
        println!("Verdict: FAKE / HOAX");
    } else {
        println!("Verdict: {}", inference.label);
    }
    println!("Confidence Score: {:.2}%", inference.confidence);
    for class in &inference.distribution {
        println!("  {:<12} {:.4}", class.label, class.probability);
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let document = read_document(&cli.text)?;
    if document.trim().is_empty() {
        eprintln!("warning: no news text given, nothing to analyze");
        return Ok(ExitCode::from(2));
    }

    let pipeline = Pipeline::load(&cli.model)
        .with_context(|| format!("failed to load model from {}", cli.model.display()))?;
    let inference = pipeline.infer(&document);
    if inference.is_degenerate() {
        tracing::warn!("no known terms in the text, verdict rests on the model bias alone");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&inference)?);
    } else {
        print_human(&inference);
    }
    Ok(ExitCode::SUCCESS)
}
