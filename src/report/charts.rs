// The five comparison charts, drawn as grouped bar charts into PNG files.
//
// With `text: false` nothing that needs a font is drawn (caption, axis labels,
// legend, category names), so charts still render on font-less hosts.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

use super::fonts::FONT_FAMILY;
use super::severity::{self, Severity};
use super::summary::{Comparisons, EndpointMatrix, ResourcePoint, ResponseTimePoint, ScenarioValue};

pub const RESPONSE_TIME_CHART: &str = "response_time_comparison.png";
pub const THROUGHPUT_CHART: &str = "throughput_comparison.png";
pub const ERROR_RATE_CHART: &str = "error_rate_comparison.png";
pub const ENDPOINT_CHART: &str = "endpoint_response_comparison.png";
pub const RESOURCE_CHART: &str = "resource_usage_comparison.png";

/// In the order they appear in the report.
pub const CHART_FILES: [&str; 5] = [
    RESPONSE_TIME_CHART,
    THROUGHPUT_CHART,
    ERROR_RATE_CHART,
    ENDPOINT_CHART,
    RESOURCE_CHART,
];

const CHART_SIZE: (u32, u32) = (1200, 800);
const WIDE_CHART_SIZE: (u32, u32) = (1400, 1000);
const GROUP_WIDTH: f64 = 0.8;
const CATEGORY_LABEL_AREA: u32 = 60;

const ROYAL_BLUE: RGBColor = RGBColor(65, 105, 225);
const FIREBRICK: RGBColor = RGBColor(178, 34, 34);
const SEA_GREEN: RGBColor = RGBColor(46, 139, 87);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const GOOD_GREEN: RGBColor = RGBColor(0, 128, 0);
const PALETTE: [RGBColor; 8] = [
    ROYAL_BLUE,
    ORANGE,
    SEA_GREEN,
    FIREBRICK,
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Draw captions, axis labels and legends. Requires a registered font.
    pub text: bool,
}

/// Axis label for a millisecond value: `1.5s` from 1000 ms up, `850ms` below.
pub fn format_ms(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.1}s", ms / 1000.0)
    } else {
        format!("{}ms", ms.trunc() as i64)
    }
}

/// Renders all five charts into `out_dir` and returns their paths.
pub fn render_all(cmp: &Comparisons, out_dir: &Path, opts: ChartOptions) -> anyhow::Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = CHART_FILES.iter().map(|f| out_dir.join(f)).collect();
    render_response_times(&cmp.response_times, &paths[0], opts)?;
    render_throughput(&cmp.throughput, &paths[1], opts)?;
    render_error_rates(&cmp.error_rates, &paths[2], opts)?;
    render_endpoints(&cmp.endpoints, &paths[3], opts)?;
    render_resources(&cmp.resources, &paths[4], opts)?;
    tracing::info!(count = paths.len(), dir = %out_dir.display(), "charts written");
    Ok(paths)
}

pub fn render_response_times(points: &[ResponseTimePoint], path: &Path, opts: ChartOptions) -> anyhow::Result<()> {
    let chart = BarChart {
        caption: "Response Time Comparison",
        y_desc: "Response Time",
        categories: points.iter().map(|p| p.scenario.clone()).collect(),
        series: vec![
            Series::uniform("Median", points.iter().map(|p| p.mean_median_ms).collect(), ROYAL_BLUE),
            Series::uniform("95th Percentile", points.iter().map(|p| p.mean_p95_ms).collect(), FIREBRICK),
        ],
        reference_lines: vec![
            ReferenceLine { value: 1000.0, color: ORANGE, label: "1s Threshold" },
            ReferenceLine { value: 3000.0, color: RED, label: "3s Threshold" },
        ],
        y_format: format_ms,
    };
    render_single(&chart, path, CHART_SIZE, opts)
}

pub fn render_throughput(values: &[ScenarioValue], path: &Path, opts: ChartOptions) -> anyhow::Result<()> {
    let chart = BarChart {
        caption: "Throughput Comparison",
        y_desc: "Requests per Second",
        categories: values.iter().map(|v| v.scenario.clone()).collect(),
        series: vec![Series::uniform("Throughput", values.iter().map(|v| v.value).collect(), SEA_GREEN)],
        reference_lines: vec![ReferenceLine { value: 100.0, color: RED, label: "100 RPS Target" }],
        y_format: |v| format!("{v:.0}"),
    };
    render_single(&chart, path, CHART_SIZE, opts)
}

pub fn render_error_rates(values: &[ScenarioValue], path: &Path, opts: ChartOptions) -> anyhow::Result<()> {
    let chart = BarChart {
        caption: "Error Rate Comparison",
        y_desc: "Error Rate (%)",
        categories: values.iter().map(|v| v.scenario.clone()).collect(),
        series: vec![Series {
            label: "Error Rate".into(),
            values: values.iter().map(|v| v.value).collect(),
            fill: Fill::BySeverity,
        }],
        reference_lines: vec![ReferenceLine { value: 1.0, color: ORANGE, label: "1% Threshold" }],
        y_format: |v| format!("{v:.1}%"),
    };
    render_single(&chart, path, CHART_SIZE, opts)
}

pub fn render_endpoints(matrix: &EndpointMatrix, path: &Path, opts: ChartOptions) -> anyhow::Result<()> {
    let series = matrix
        .scenarios
        .iter()
        .zip(&matrix.medians)
        .enumerate()
        .map(|(i, (scenario, medians))| Series::uniform(scenario, medians.clone(), PALETTE[i % PALETTE.len()]))
        .collect();
    let chart = BarChart {
        caption: "Endpoint Response Time by Scenario",
        y_desc: "Median Response Time",
        categories: matrix.endpoints.clone(),
        series,
        reference_lines: Vec::new(),
        y_format: format_ms,
    };
    render_single(&chart, path, WIDE_CHART_SIZE, opts)
}

/// CPU and memory side by side, each panel on its own scale.
pub fn render_resources(points: &[ResourcePoint], path: &Path, opts: ChartOptions) -> anyhow::Result<()> {
    let categories: Vec<String> = points.iter().map(|p| p.scenario.clone()).collect();
    let cpu = BarChart {
        caption: "CPU Usage by Scenario",
        y_desc: "CPU Cores",
        categories: categories.clone(),
        series: vec![Series::uniform("CPU Cores", points.iter().map(|p| p.cpu_cores).collect(), ROYAL_BLUE)],
        reference_lines: Vec::new(),
        y_format: |v| format!("{v:.2}"),
    };
    let memory = BarChart {
        caption: "Memory Usage by Scenario",
        y_desc: "Memory (MB)",
        categories,
        series: vec![Series::uniform("Memory (MB)", points.iter().map(|p| p.memory_mb).collect(), SEA_GREEN)],
        reference_lines: Vec::new(),
        y_format: |v| format!("{v:.0}"),
    };

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let (left, right) = root.split_horizontally((CHART_SIZE.0 / 2) as i32);
    draw_bar_chart(&left, &cpu, opts)?;
    draw_bar_chart(&right, &memory, opts)?;
    root.present().map_err(draw_err)?;
    Ok(())
}

struct BarChart<'a> {
    caption: &'a str,
    y_desc: &'a str,
    categories: Vec<String>,
    series: Vec<Series>,
    reference_lines: Vec<ReferenceLine>,
    y_format: fn(f64) -> String,
}

impl BarChart<'_> {
    fn y_max(&self) -> f64 {
        let highest = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .chain(self.reference_lines.iter().map(|l| l.value))
            .fold(0.0, f64::max);
        if highest > 0.0 { highest * 1.2 } else { 1.0 }
    }
}

struct Series {
    label: String,
    /// One value per category.
    values: Vec<f64>,
    fill: Fill,
}

impl Series {
    fn uniform(label: impl Into<String>, values: Vec<f64>, color: RGBColor) -> Self {
        Self {
            label: label.into(),
            values,
            fill: Fill::Uniform(color),
        }
    }
}

enum Fill {
    Uniform(RGBColor),
    /// Error-rate colouring: green, orange, red.
    BySeverity,
}

impl Fill {
    fn color_for(&self, value: f64) -> RGBColor {
        match self {
            Fill::Uniform(c) => *c,
            Fill::BySeverity => match severity::error_rate_severity(value) {
                Severity::Good => GOOD_GREEN,
                Severity::Warning => ORANGE,
                Severity::Critical => RED,
            },
        }
    }

    fn legend_color(&self) -> RGBColor {
        match self {
            Fill::Uniform(c) => *c,
            Fill::BySeverity => GOOD_GREEN,
        }
    }
}

struct ReferenceLine {
    value: f64,
    color: RGBColor,
    label: &'static str,
}

fn render_single(chart: &BarChart<'_>, path: &Path, size: (u32, u32), opts: ChartOptions) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    draw_bar_chart(&root, chart, opts)?;
    root.present().map_err(draw_err)?;
    tracing::debug!(chart = %path.display(), "chart rendered");
    Ok(())
}

fn draw_bar_chart(area: &DrawingArea<BitMapBackend<'_>, Shift>, def: &BarChart<'_>, opts: ChartOptions) -> anyhow::Result<()> {
    let n = def.categories.len().max(1) as f64;

    let mut builder = ChartBuilder::on(area);
    builder.margin(20);
    if opts.text {
        builder
            .caption(def.caption, (FONT_FAMILY, 28))
            .x_label_area_size(CATEGORY_LABEL_AREA)
            .y_label_area_size(80);
    }
    let mut chart = builder
        .build_cartesian_2d(0f64..n, 0f64..def.y_max())
        .map_err(draw_err)?;

    if opts.text {
        let y_format = def.y_format;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc(def.y_desc)
            .y_label_formatter(&move |v: &f64| y_format(*v))
            .draw()
            .map_err(draw_err)?;
    }

    let bar_width = GROUP_WIDTH / def.series.len().max(1) as f64;
    let group_pad = (1.0 - GROUP_WIDTH) / 2.0;
    let with_legend = opts.text && (def.series.len() > 1 || !def.reference_lines.is_empty());

    for (s_idx, series) in def.series.iter().enumerate() {
        let bars = series.values.iter().enumerate().map(|(i, &v)| {
            let x0 = i as f64 + group_pad + s_idx as f64 * bar_width;
            Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], series.fill.color_for(v).filled())
        });
        let anno = chart.draw_series(bars).map_err(draw_err)?;
        if with_legend {
            let color = series.fill.legend_color();
            anno.label(series.label.clone())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }
    }

    for line in &def.reference_lines {
        let color = line.color;
        let anno = chart
            .draw_series(LineSeries::new([(0.0, line.value), (n, line.value)], color.stroke_width(2)))
            .map_err(draw_err)?;
        if with_legend {
            anno.label(line.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
    }

    if opts.text {
        // Category names under each bar group, in the area's own pixel space.
        let style = TextStyle::from((FONT_FAMILY, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
        let (base_x, base_y) = area.get_base_pixel();
        for (i, label) in def.categories.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(i as f64 + 0.5, 0.0));
            area.draw(&Text::new(label.clone(), (x - base_x, y - base_y + 8), style.clone()))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("chart drawing failed: {e}")
}
