use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use furhat_export_core::{
    ConversionReport, ExportError, ExportOptions, FontSet, export_all, find_dialog_logs,
};

#[derive(Parser)]
#[command(name = "furhat-export")]
#[command(about = "Convert Furhat dialog logs into PDF transcripts and Excel sheets")]
struct Cli {
    /// Directory searched recursively for dialog.json files. Defaults to ~/.furhat/logs
    root: Option<PathBuf>,

    /// TrueType font for the PDF. Defaults to DejaVuSans.ttf in the working directory, else Helvetica.
    #[arg(long)]
    font: Option<PathBuf>,

    /// TrueType font for the PDF title. Defaults to --font.
    #[arg(long, requires = "font")]
    bold_font: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn default_log_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".furhat")
        .join("logs")
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

fn create_progress(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

/// Status lines printed for one converted (or rejected) log
fn status_lines(log: &Path, result: &furhat_export_core::Result<ConversionReport>) -> Vec<String> {
    match result {
        Ok(report) => {
            let mut lines = vec![
                format!(
                    "{} {} {}",
                    style("✓").green().bold(),
                    style(report.pdf_path.display()).cyan(),
                    style(format!(
                        "({} rows, {} speakers, {} incomplete, {} responses skipped)",
                        report.rows,
                        report.speakers.len(),
                        report.skipped.missing_fields,
                        report.skipped.responses
                    ))
                    .dim()
                ),
                format!(
                    "{} {}",
                    style("✓").green().bold(),
                    style(report.xlsx_path.display()).cyan()
                ),
            ];
            if report.unencodable_text {
                lines.push(format!(
                    "{} {}",
                    style("!").yellow().bold(),
                    style("some characters are missing from the PDF, use --font with a Unicode font")
                        .yellow()
                ));
            }
            lines
        }
        Err(e @ ExportError::InsufficientData { .. }) => {
            vec![format!("{} {}", style("-").yellow().bold(), style(e).dim())]
        }
        Err(e) => vec![format!(
            "{} {} {}",
            style("✗").red().bold(),
            style(log.display()).dim(),
            e
        )],
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = cli.root.unwrap_or_else(default_log_root);
    if !root.is_dir() {
        bail!("log directory {} does not exist", root.display());
    }

    let fonts = match &cli.font {
        Some(font) => FontSet::load(font, cli.bold_font.as_deref())?,
        None => FontSet::discover(&std::env::current_dir()?)?,
    };
    let options = ExportOptions { fonts };

    println!(
        "\n{}  {}\n",
        style("furhat-export").cyan().bold(),
        style("Dialog Converter").dim()
    );

    let logs = find_dialog_logs(&root);
    tracing::debug!(root = %root.display(), count = logs.len(), "Found dialog logs");
    if logs.is_empty() {
        println!(
            "{} No dialog.json files found in {}",
            style("!").yellow().bold(),
            style(root.display()).dim()
        );
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());

    let total_start = Instant::now();
    let progress = create_progress(logs.len())?;

    let summary = export_all(&logs, &options, |log, result| {
        // println on a hidden bar is a no-op, so suspend it and print directly
        progress.suspend(|| {
            for line in status_lines(log, result) {
                println!("{line}");
            }
        });
        progress.inc(1);
    });

    progress.finish_and_clear();

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{} {} converted, {} skipped {}",
        style("Done:").dim(),
        style(summary.converted).green().bold(),
        style(summary.failed).yellow(),
        style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
    );

    Ok(())
}
