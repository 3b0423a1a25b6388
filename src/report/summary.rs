// Per-scenario totals and the five cross-scenario comparisons.
// The aggregated row never contributes; all figures come from endpoint rows.

use std::collections::BTreeSet;

use super::scenario::ScenarioResult;
use crate::aggregation::mean_f64;

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSummary {
    pub name: String,
    pub total_requests: u64,
    pub total_failures: u64,
    pub avg_response_ms: f64,
    pub requests_per_sec: f64,
    /// Percent, 0 when there were no requests.
    pub error_rate: f64,
    pub peak_users: Option<f64>,
    pub peak_requests_per_sec: Option<f64>,
}

pub fn error_rate(failures: u64, requests: u64) -> f64 {
    if requests == 0 {
        return 0.0;
    }
    failures as f64 / requests as f64 * 100.0
}

pub fn summarize(scenario: &ScenarioResult) -> ScenarioSummary {
    let rows: Vec<_> = scenario.endpoint_rows().collect();
    let total_requests: u64 = rows.iter().map(|r| r.request_count).sum();
    let total_failures: u64 = rows.iter().map(|r| r.failure_count).sum();
    let averages: Vec<f64> = rows.iter().map(|r| r.average_ms).collect();

    let peak = |f: fn(&super::scenario::HistorySample) -> f64| {
        scenario
            .history
            .as_ref()
            .filter(|h| !h.is_empty())
            .map(|h| h.iter().map(f).fold(0.0, f64::max))
    };

    ScenarioSummary {
        name: scenario.name.clone(),
        total_requests,
        total_failures,
        avg_response_ms: mean_f64(&averages),
        requests_per_sec: rows.iter().map(|r| r.requests_per_sec).sum(),
        error_rate: error_rate(total_failures, total_requests),
        peak_users: peak(|s| s.user_count),
        peak_requests_per_sec: peak(|s| s.requests_per_sec),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTimePoint {
    pub scenario: String,
    pub mean_median_ms: f64,
    pub mean_p95_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioValue {
    pub scenario: String,
    pub value: f64,
}

/// Median response time per endpoint and scenario; 0 where a scenario lacks the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointMatrix {
    /// Sorted.
    pub endpoints: Vec<String>,
    pub scenarios: Vec<String>,
    /// `medians[scenario][endpoint]`.
    pub medians: Vec<Vec<f64>>,
}

impl EndpointMatrix {
    pub fn get(&self, scenario: &str, endpoint: &str) -> Option<f64> {
        let s = self.scenarios.iter().position(|n| n == scenario)?;
        let e = self.endpoints.iter().position(|n| n == endpoint)?;
        Some(self.medians[s][e])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePoint {
    pub scenario: String,
    pub cpu_cores: f64,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparisons {
    pub response_times: Vec<ResponseTimePoint>,
    pub throughput: Vec<ScenarioValue>,
    pub error_rates: Vec<ScenarioValue>,
    pub endpoints: EndpointMatrix,
    pub resources: Vec<ResourcePoint>,
}

pub fn compare(scenarios: &[ScenarioResult]) -> Comparisons {
    let summaries: Vec<ScenarioSummary> = scenarios.iter().map(summarize).collect();

    let response_times = scenarios
        .iter()
        .map(|s| {
            let medians: Vec<f64> = s.endpoint_rows().map(|r| r.median_ms).collect();
            let p95s: Vec<f64> = s.endpoint_rows().map(|r| r.p95_ms).collect();
            ResponseTimePoint {
                scenario: s.name.clone(),
                mean_median_ms: mean_f64(&medians),
                mean_p95_ms: mean_f64(&p95s),
            }
        })
        .collect();

    let throughput = summaries
        .iter()
        .map(|s| ScenarioValue {
            scenario: s.name.clone(),
            value: s.requests_per_sec,
        })
        .collect();

    let error_rates = summaries
        .iter()
        .map(|s| ScenarioValue {
            scenario: s.name.clone(),
            value: s.error_rate,
        })
        .collect();

    let resources = scenarios
        .iter()
        .map(|s| {
            let cpu: Vec<f64> = s.resources.iter().map(|r| r.cpu_cores).collect();
            let mem: Vec<f64> = s.resources.iter().map(|r| r.memory_mb).collect();
            ResourcePoint {
                scenario: s.name.clone(),
                cpu_cores: mean_f64(&cpu),
                memory_mb: mean_f64(&mem),
            }
        })
        .collect();

    Comparisons {
        response_times,
        throughput,
        error_rates,
        endpoints: endpoint_matrix(scenarios),
        resources,
    }
}

pub fn endpoint_matrix(scenarios: &[ScenarioResult]) -> EndpointMatrix {
    let endpoints: Vec<String> = scenarios
        .iter()
        .flat_map(|s| s.endpoint_rows().map(|r| r.name.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let medians = scenarios
        .iter()
        .map(|s| {
            endpoints
                .iter()
                .map(|endpoint| {
                    // First row wins when an endpoint appears under several request types.
                    s.endpoint_rows()
                        .find(|r| &r.name == endpoint)
                        .map(|r| r.median_ms)
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    EndpointMatrix {
        endpoints,
        scenarios: scenarios.iter().map(|s| s.name.clone()).collect(),
        medians,
    }
}
