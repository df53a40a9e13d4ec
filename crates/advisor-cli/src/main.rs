use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use advisor_core::{
    render_report, report_path, run_analysis, validate_upload, Advisor, AnalysisResult,
    GeminiClient, LlmClient, LlmSettings, NoopClient, OutputFormat, PlainTextExtractor,
    TextExtractor,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "advisor",
    author,
    version,
    about = "Document analysis CLI: extracts requirements and diagrams from uploaded project documents"
)]
struct Cli {
    /// Directory where generated reports are written
    #[arg(
        long = "reports-dir",
        value_name = "DIR",
        default_value = "./reports",
        global = true
    )]
    reports_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a document and write a report keyed by its filename
    Analyze {
        /// Document to analyze (txt, pdf, docx or xlsx)
        file: PathBuf,
        /// Emit the report as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// List previously generated reports, most recent first
    ListReports {
        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { file, json } => analyze(&cli.reports_dir, &file, json).await?,
        Commands::ListReports { json } => list_reports(&cli.reports_dir, json)?,
    }
    Ok(())
}

async fn analyze(reports_dir: &Path, file: &Path, json: bool) -> Result<()> {
    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .context("input path has no usable file name")?
        .to_string();
    let bytes =
        fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let extension = validate_upload(&filename, &bytes)?;
    let text = PlainTextExtractor.extract(&bytes, &extension)?;

    let settings = LlmSettings::from_env()?;
    let result = match settings.provider.as_str() {
        "noop" => run_with(NoopClient, &text).await?,
        _ => run_with(GeminiClient::new(&settings)?, &text).await?,
    };

    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let rendered = render_report(&result, format)?;

    fs::create_dir_all(reports_dir)
        .with_context(|| format!("failed to create {}", reports_dir.display()))?;
    let path = report_path(reports_dir, &filename, format);
    fs::write(&path, &rendered)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    tracing::info!(report = %path.display(), "report written");

    println!("{rendered}");
    Ok(())
}

async fn run_with<C: LlmClient + 'static>(client: C, text: &str) -> Result<AnalysisResult> {
    let advisor = Advisor::new(Arc::new(client))?;
    Ok(run_analysis(&advisor, text).await?)
}

fn list_reports(reports_dir: &Path, json: bool) -> Result<()> {
    let mut entries: Vec<(String, SystemTime)> = Vec::new();
    if reports_dir.exists() {
        let listing = fs::read_dir(reports_dir)
            .with_context(|| format!("failed to list {}", reports_dir.display()))?;
        for entry in listing {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            entries.push((entry.file_name().to_string_lossy().into_owned(), modified));
        }
    }
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if json {
        let listing: Vec<_> = entries
            .iter()
            .map(|(filename, modified)| {
                serde_json::json!({
                    "filename": filename,
                    "generated_at": humantime::format_rfc3339_seconds(*modified).to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No reports generated yet.");
        return Ok(());
    }
    for (filename, modified) in entries {
        println!(
            "{}  {}",
            humantime::format_rfc3339_seconds(modified),
            filename
        );
    }
    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tokio=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
