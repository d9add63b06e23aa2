use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cvsift_core::{CvPipeline, Locale};

#[derive(Parser)]
#[command(
    name = "cvsift",
    about = "Extract structured records from résumé text",
    version
)]
struct Cli {
    /// Path to a plain-text résumé (already decoded from PDF/DOCX)
    input: PathBuf,

    /// Content language (en|hu); detected from the text when omitted
    #[arg(short, long)]
    lang: Option<String>,

    /// Write the JSON record to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the raw section blocks instead of the extracted record
    #[arg(long)]
    sections: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let locale = match &cli.lang {
        Some(tag) => tag.parse::<Locale>()?,
        None => Locale::detect(&text),
    };
    info!(input = %cli.input.display(), locale = %locale, "parsing résumé");

    let pipeline = CvPipeline::new()?;

    let json = if cli.sections {
        serde_json::to_string_pretty(&pipeline.segment(&text, locale))?
    } else {
        serde_json::to_string_pretty(&pipeline.parse(&text, locale))?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(output = %path.display(), "record written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
