//! Rendering of PageSpeed responses into the plain-text report returned to clients.

use crate::models::{AnalysisRequest, AnalysisResponse, Audit, OrderedMap};

/// Audits shown under "Key Metrics", in display order
pub const KEY_METRICS: [&str; 6] = [
    "first-contentful-paint",
    "largest-contentful-paint",
    "total-blocking-time",
    "cumulative-layout-shift",
    "speed-index",
    "interactive",
];

const NOT_AVAILABLE: &str = "N/A";
const METRICS_HEADING: &str = "--- Key Metrics ---";
const OPPORTUNITIES_HEADING: &str = "--- Opportunities for Improvement ---";
const NO_METRICS: &str = "No performance metrics available";
const NO_AUDITS: &str = "No opportunities available";
const NO_OPPORTUNITIES: &str = "No improvement opportunities found";

/// Text returned when the PageSpeed call produced no usable response
pub fn failure_message(url: &str) -> String {
    format!("Failed to retrieve Lighthouse data for {}", url)
}

/// Render `response` for `request`. Missing fields become placeholders.
pub fn format_report(response: &AnalysisResponse, request: &AnalysisRequest) -> String {
    if let Some(error) = &response.error {
        return format!(
            "Error: {}",
            error.message.as_deref().unwrap_or("Unknown error")
        );
    }

    let audits = response.audits();

    [
        format!(
            "Lighthouse {} Report for {}",
            request.category(),
            request.url()
        ),
        format!("Strategy: {}", request.strategy()),
        format!(
            "Score: {}",
            format_score(response.category_score(*request.category()))
        ),
        String::new(),
        METRICS_HEADING.to_string(),
        key_metrics(audits),
        String::new(),
        OPPORTUNITIES_HEADING.to_string(),
        opportunities(audits),
    ]
    .join("\n")
}

/// `0.873` renders as `87/100`; halves round away from zero
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{}/100", (score * 100.0).round() as i64),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn key_metrics(audits: Option<&OrderedMap<Audit>>) -> String {
    let lines: Vec<String> = audits
        .map(|audits| {
            KEY_METRICS
                .iter()
                .filter_map(|&id| audits.get(id).map(|audit| (id, audit)))
                .map(|(id, audit)| {
                    format!(
                        "{}: {}",
                        audit.title.as_deref().unwrap_or(id),
                        audit.display_value.as_deref().unwrap_or(NOT_AVAILABLE)
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    if lines.is_empty() {
        NO_METRICS.to_string()
    } else {
        lines.join("\n")
    }
}

fn opportunities(audits: Option<&OrderedMap<Audit>>) -> String {
    let Some(audits) = audits.filter(|audits| !audits.is_empty()) else {
        return NO_AUDITS.to_string();
    };

    let lines: Vec<String> = audits
        .iter()
        .filter(|(_, audit)| audit.has_savings())
        .map(|(id, audit)| {
            let title = audit.title.as_deref().unwrap_or(id);
            match audit.display_value.as_deref() {
                Some(value) => format!("{} ({})", title, value),
                None => title.to_string(),
            }
        })
        .collect();

    if lines.is_empty() {
        NO_OPPORTUNITIES.to_string()
    } else {
        lines.join("\n")
    }
}
