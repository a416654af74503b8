//! Rendering of validation reports for the terminal and for tooling

use colored::Colorize;
use serde::Serialize;

use crate::config::Profile;
use crate::validation::{Finding, ValidationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Plain-text report with INFO, WARNINGS and ERRORS sections and a summary line
pub fn render_text(report: &ValidationReport, show_info: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "VALIDATION RESULTS".bold()));
    out.push_str(&format!("{}\n", "=".repeat(30)));

    if show_info && !report.info.is_empty() {
        push_section(&mut out, "INFO", &report.info, &"✓".green().to_string());
    }
    if !report.warnings.is_empty() {
        let heading = "WARNINGS".yellow().to_string();
        push_section(&mut out, &heading, &report.warnings, &"!".yellow().to_string());
    }
    if !report.errors.is_empty() {
        let heading = "ERRORS".red().to_string();
        push_section(&mut out, &heading, &report.errors, &"✗".red().to_string());
    }

    out.push_str(&format!("\nSUMMARY: {}\n", report.summary()));
    let verdict = if report.passed() {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    };
    out.push_str(&format!("RESULT: {verdict}\n"));
    out
}

fn push_section(out: &mut String, heading: &str, findings: &[Finding], marker: &str) {
    out.push_str(&format!("\n{heading} ({}):\n", findings.len()));
    for finding in findings {
        out.push_str(&format!("   {marker} {}\n", finding.message));
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    valid: bool,
    profile: Profile,
    summary: JsonSummary,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    info: usize,
}

/// Machine-readable report for tooling that consumes validation results
pub fn render_json(report: &ValidationReport, profile: Profile) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        valid: report.passed(),
        profile,
        summary: JsonSummary {
            errors: report.error_count(),
            warnings: report.warning_count(),
            info: report.info_count(),
        },
        report,
    })
}
