// Offline load-test report: Locust result directories in, PNG charts and one
// HTML page out.

pub mod charts;
pub mod fonts;
pub mod html;
pub mod loader;
pub mod metadata;
pub mod resources;
pub mod scenario;
pub mod severity;
pub mod summary;

use std::path::{Path, PathBuf};

use charts::ChartOptions;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("results directory '{}' does not exist", .0.display())]
    MissingResultsDir(PathBuf),
    #[error("no test results found in '{}'", .0.display())]
    NoScenarios(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// TrueType font for chart text; system locations are tried when unset.
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub scenarios: Vec<String>,
    pub charts: Vec<PathBuf>,
    pub html: PathBuf,
    /// False when no font was available and charts carry no text.
    pub chart_text: bool,
}

/// Loads every scenario under `results_dir` and writes the charts and the HTML
/// report into `output_dir`. Nothing is written when the results directory is
/// missing or holds no usable scenario.
#[tracing::instrument(skip(options), fields(results = %results_dir.display(), output = %output_dir.display()))]
pub fn generate(results_dir: &Path, output_dir: &Path, options: &ReportOptions) -> anyhow::Result<ReportOutcome> {
    if !results_dir.is_dir() {
        return Err(ReportError::MissingResultsDir(results_dir.to_path_buf()).into());
    }

    let scenarios = loader::load_scenarios(results_dir)?;
    if scenarios.is_empty() {
        return Err(ReportError::NoScenarios(results_dir.to_path_buf()).into());
    }
    let names: Vec<String> = scenarios.iter().map(|s| s.name.clone()).collect();
    tracing::info!(count = names.len(), scenarios = %names.join(", "), "scenarios loaded");

    std::fs::create_dir_all(output_dir)?;

    let chart_text = fonts::ensure_font(options.font_path.as_deref());
    let comparisons = summary::compare(&scenarios);
    let charts = charts::render_all(&comparisons, output_dir, ChartOptions { text: chart_text })?;

    let summaries: Vec<_> = scenarios.iter().map(summary::summarize).collect();
    let document = html::render_html(&summaries, &scenarios, chrono::Local::now());
    let html_path = output_dir.join(html::REPORT_FILE);
    std::fs::write(&html_path, document)?;
    tracing::info!(report = %html_path.display(), "HTML report written");

    Ok(ReportOutcome {
        scenarios: names,
        charts,
        html: html_path,
        chart_text,
    })
}
