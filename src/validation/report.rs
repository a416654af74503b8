use serde::Serialize;

use super::finding::{Finding, Findings, Severity};
use crate::graph::LoadError;

/// Aggregated outcome of one validation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,

    /// Load failure that stopped the run, kept for diagnostic rendering
    #[serde(skip)]
    pub fatal: Option<LoadError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for a run that could not load the package
    pub fn from_load_error(error: LoadError) -> Self {
        let mut findings = Findings::new("loader");
        findings.error(error.to_string());

        let mut report = Self::new();
        report.merge(findings);
        report.fatal = Some(error);
        report
    }

    /// Append a check's findings, keeping emission order within each bucket
    pub fn merge(&mut self, findings: Findings) {
        for finding in findings.into_vec() {
            match finding.severity {
                Severity::Error => self.errors.push(finding),
                Severity::Warning => self.warnings.push(finding),
                Severity::Info => self.info.push(finding),
            }
        }
    }

    /// True when no errors were found
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn info_count(&self) -> usize {
        self.info.len()
    }

    /// Every finding, errors first, then warnings, then info
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} errors, {} warnings, {} info",
            self.error_count(),
            self.warning_count(),
            self.info_count()
        )
    }
}
