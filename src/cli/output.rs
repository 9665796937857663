//! Output formatting helpers for CLI commands

use crate::health::{Condition, ProbeOutcome};
use colored::Colorize;
use serde::Serialize;

/// View model for a probe verdict
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub url: String,
    pub healthy: bool,
    pub status: Option<u16>,
    pub latency_ms: Option<u64>,
    pub failed_conditions: Vec<Condition>,
    pub error: Option<String>,
}

impl ProbeReport {
    pub fn new(url: &str, outcome: &ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Responded {
                status,
                latency_ms,
                failed,
            } => Self {
                url: url.to_string(),
                healthy: outcome.is_healthy(),
                status: Some(*status),
                latency_ms: Some(*latency_ms),
                failed_conditions: failed.clone(),
                error: None,
            },
            ProbeOutcome::Unreachable { error } => Self {
                url: url.to_string(),
                healthy: false,
                status: None,
                latency_ms: None,
                failed_conditions: Vec::new(),
                error: Some(error.to_string()),
            },
        }
    }
}

/// Format a report as a single human-readable line
pub fn format_report_pretty(report: &ProbeReport) -> String {
    let verdict = if report.healthy {
        format!("{} {}", "✓".green(), "healthy".green())
    } else {
        format!("{} {}", "✗".red(), "unhealthy".red())
    };

    let mut line = format!("{} {}", verdict, report.url);

    if let (Some(status), Some(latency_ms)) = (report.status, report.latency_ms) {
        line.push_str(&format!(" (status {}, {}ms)", status, latency_ms));
    }
    if !report.failed_conditions.is_empty() {
        let failed: Vec<_> = report
            .failed_conditions
            .iter()
            .map(Condition::to_string)
            .collect();
        line.push_str(&format!(" - failed: {}", failed.join(", ")));
    }
    if let Some(ref error) = report.error {
        line.push_str(&format!(" - {}", error));
    }

    line
}

/// Format a report as JSON
pub fn format_report_json(report: &ProbeReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
