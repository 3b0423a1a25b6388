// Standalone HTML report linking the chart PNGs written next to it.

use chrono::{DateTime, Local};
use std::fmt::Write;

use super::charts::{
    ENDPOINT_CHART, ERROR_RATE_CHART, RESOURCE_CHART, RESPONSE_TIME_CHART, THROUGHPUT_CHART,
};
use super::scenario::ScenarioResult;
use super::severity::{error_rate_severity, median_severity, p95_severity};
use super::summary::ScenarioSummary;

pub const REPORT_FILE: &str = "performance_report.html";

const CHARTS: [(&str, &str); 5] = [
    ("Response Time Comparison", RESPONSE_TIME_CHART),
    ("Throughput Comparison", THROUGHPUT_CHART),
    ("Error Rate Comparison", ERROR_RATE_CHART),
    ("Endpoint Response Time Comparison", ENDPOINT_CHART),
    ("Resource Usage Comparison", RESOURCE_CHART),
];

const STYLE: &str = r#"
  body { font-family: Arial, sans-serif; line-height: 1.6; margin: 0; padding: 20px; color: #333; }
  h1, h2, h3 { color: #2c3e50; }
  h1 { border-bottom: 2px solid #3498db; padding-bottom: 10px; }
  h2 { border-bottom: 1px solid #bdc3c7; padding-bottom: 5px; margin-top: 30px; }
  table { border-collapse: collapse; width: 100%; margin: 20px 0; }
  th, td { text-align: left; padding: 12px; }
  th { background-color: #3498db; color: white; }
  tr:nth-child(even) { background-color: #f2f2f2; }
  img { max-width: 100%; height: auto; margin: 20px 0; border: 1px solid #ddd; }
  .summary-card { background-color: #f8f9fa; border-left: 4px solid #3498db; padding: 15px; margin-bottom: 20px; }
  .good { color: green; }
  .warning { color: orange; }
  .critical { color: red; }
"#;

const FINDINGS: &str = r#"<h2>Performance Analysis and Recommendations</h2>
<div class="summary-card">
  <h3>Key Findings</h3>
  <ul>
    <li>Compare the baseline scenario against heavier load profiles to see where latency starts to climb.</li>
    <li>The <code>/history</code> and <code>/temperature-trend</code> endpoints do the most work per request and usually dominate the tail.</li>
    <li>Error rates above 1% are flagged; anything at or above 2% needs investigation before release.</li>
  </ul>
  <h3>Recommendations</h3>
  <ul>
    <li>Cache the <code>/history</code> response between collector runs.</li>
    <li>Serve trend images through signed URLs with a long client cache lifetime.</li>
    <li>Watch store query latency; it is the only shared resource between requests.</li>
  </ul>
</div>
"#;

/// The whole document. `summaries` and `scenarios` are parallel and in report order.
pub fn render_html(
    summaries: &[ScenarioSummary],
    scenarios: &[ScenarioResult],
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Weather Dashboard Performance Test Results</title>
<style>{STYLE}</style>
</head>
<body>
<h1>Weather Dashboard Performance Test Results</h1>
<p>Generated on {generated}</p>
<div class="summary-card">
  <h3>Executive Summary</h3>
  <p>Performance test results for the weather dashboard API across {count} load scenario(s).</p>
</div>
"#,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
        count = scenarios.len(),
    );

    out.push_str(&scenario_table(summaries, scenarios));

    out.push_str("<h2>Performance Graphs</h2>\n");
    for (title, file) in CHARTS {
        let _ = writeln!(out, "<h3>{title}</h3>\n<img src=\"{file}\" alt=\"{title}\">");
    }

    out.push_str(&endpoint_table(scenarios));
    out.push_str(FINDINGS);
    out.push_str("</body>\n</html>\n");
    out
}

fn scenario_table(summaries: &[ScenarioSummary], scenarios: &[ScenarioResult]) -> String {
    let mut out = String::from(
        "<h2>Test Scenarios</h2>\n<table>\n<tr><th>Scenario</th><th>Users</th><th>Spawn Rate</th>\
         <th>Duration</th><th>Request Rate</th><th>Avg Response Time</th><th>Error Rate</th>\
         <th>Peak Users</th><th>Peak RPS</th></tr>\n",
    );
    for (summary, scenario) in summaries.iter().zip(scenarios) {
        let meta = &scenario.metadata;
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2} req/s</td><td>{:.2} ms</td>\
             <td class=\"{}\">{:.2}%</td><td>{}</td><td>{}</td></tr>",
            html_escape(&summary.name),
            html_escape(&meta.users),
            html_escape(&meta.spawn_rate),
            html_escape(&meta.duration),
            summary.requests_per_sec,
            summary.avg_response_ms,
            error_rate_severity(summary.error_rate).css_class(),
            summary.error_rate,
            summary.peak_users.map_or_else(|| "N/A".to_string(), |u| format!("{u:.0}")),
            summary.peak_requests_per_sec.map_or_else(|| "N/A".to_string(), |r| format!("{r:.2}")),
        );
    }
    out.push_str("</table>\n");
    out
}

fn endpoint_table(scenarios: &[ScenarioResult]) -> String {
    let mut out = String::from(
        "<h2>Endpoint Performance</h2>\n<table>\n<tr><th>Endpoint</th><th>Scenario</th><th>Requests</th>\
         <th>Failures</th><th>Median (ms)</th><th>95% (ms)</th><th>RPS</th></tr>\n",
    );
    for scenario in scenarios {
        for row in scenario.endpoint_rows() {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td>\
                 <td class=\"{}\">{}</td><td>{:.2}</td></tr>",
                html_escape(&row.name),
                html_escape(&scenario.name),
                row.request_count,
                row.failure_count,
                median_severity(row.median_ms).css_class(),
                row.median_ms,
                p95_severity(row.p95_ms).css_class(),
                row.p95_ms,
                row.requests_per_sec,
            );
        }
    }
    out.push_str("</table>\n");
    out
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_markup() {
        assert_eq!(html_escape("<a href=\"x\">A & B</a>"), "&lt;a href=&quot;x&quot;&gt;A &amp; B&lt;/a&gt;");
    }

    #[test]
    fn html_escape_plain_text_unchanged() {
        assert_eq!(html_escape("baseline_run"), "baseline_run");
    }
}
