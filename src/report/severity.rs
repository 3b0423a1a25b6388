// Threshold-based severity for report cells. Each boundary belongs to the worse
// side: 1.0 % error rate is a warning, 2.0 % is critical.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Good,
    Warning,
    Critical,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Good => "good",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    fn classify(value: f64, warning_at: f64, critical_at: f64) -> Self {
        if value < warning_at {
            Severity::Good
        } else if value < critical_at {
            Severity::Warning
        } else {
            Severity::Critical
        }
    }
}

pub const ERROR_RATE_WARNING_PCT: f64 = 1.0;
pub const ERROR_RATE_CRITICAL_PCT: f64 = 2.0;
pub const MEDIAN_WARNING_MS: f64 = 200.0;
pub const MEDIAN_CRITICAL_MS: f64 = 1000.0;
pub const P95_WARNING_MS: f64 = 500.0;
pub const P95_CRITICAL_MS: f64 = 3000.0;

pub fn error_rate_severity(percent: f64) -> Severity {
    Severity::classify(percent, ERROR_RATE_WARNING_PCT, ERROR_RATE_CRITICAL_PCT)
}

pub fn median_severity(ms: f64) -> Severity {
    Severity::classify(ms, MEDIAN_WARNING_MS, MEDIAN_CRITICAL_MS)
}

pub fn p95_severity(ms: f64) -> Severity {
    Severity::classify(ms, P95_WARNING_MS, P95_CRITICAL_MS)
}
