//! Turns a directory of Locust load-test results into comparison charts and an
//! HTML report.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use weather_dashboard::{logging, report};

#[derive(Parser)]
#[command(name = "perf-report")]
#[command(about = "Analyze Locust test results and generate reports")]
struct Cli {
    /// Directory containing one subdirectory per test scenario
    #[arg(long = "results_dir")]
    results_dir: PathBuf,

    /// Output directory for charts and the HTML report
    #[arg(long, default_value = "report")]
    output: PathBuf,

    /// TrueType font used for chart text
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let options = report::ReportOptions { font_path: cli.font };
    match report::generate(&cli.results_dir, &cli.output, &options) {
        Ok(outcome) => {
            if !outcome.chart_text {
                tracing::warn!("charts were rendered without text; pass --font to label them");
            }
            tracing::info!(
                scenarios = outcome.scenarios.len(),
                report = %outcome.html.display(),
                "report complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "report generation failed");
            ExitCode::FAILURE
        }
    }
}
