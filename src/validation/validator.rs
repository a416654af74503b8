use std::path::Path;
use tracing::{debug, info, warn};

use super::checks::{Check, CheckContext, all_checks, conformance_ids, is_profile_conformance};
use super::finding::{Findings, Severity};
use super::report::ValidationReport;
use crate::config::{Profile, ValidatorConfig};
use crate::graph::{Package, PackageLoader};

/// Runs every applicable rule check over one package
pub struct Validator {
    config: ValidatorConfig,
    checks: Vec<Box<dyn Check>>,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            checks: all_checks(),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Load a crate directory or metadata file and validate it.
    ///
    /// A package that cannot be loaded yields a report with that single error.
    pub fn validate_path(&self, path: &Path) -> ValidationReport {
        match PackageLoader::load(path) {
            Ok(package) => self.validate_package(&package),
            Err(e) => {
                warn!("Failed to load {path:?}: {e}");
                ValidationReport::from_load_error(e)
            }
        }
    }

    pub fn validate_package(&self, package: &Package) -> ValidationReport {
        let profile = self.resolve_profile(package);
        let ctx = CheckContext {
            package,
            config: &self.config,
            profile,
        };

        let mut report = ValidationReport::new();

        let mut overview = Findings::new("loader");
        overview.info(format!("Validating RO-Crate: {}", package.dir.display()));
        overview.info("Successfully loaded RO-Crate");
        overview.info(format!("Profile: {profile}"));
        overview.info(format!("Total entities: {}", package.graph.len()));
        report.merge(overview);

        for check in &self.checks {
            if !check.applies(&ctx) {
                debug!("Skipping {} check", check.name());
                continue;
            }

            debug!("Running {} check...", check.name());
            let mut findings = Findings::new(check.name());
            check.run(&ctx, &mut findings);
            debug!(
                "  {} check: {} errors, {} warnings, {} info",
                check.name(),
                findings.count(Severity::Error),
                findings.count(Severity::Warning),
                findings.count(Severity::Info)
            );
            report.merge(findings);
        }

        if report.passed() {
            info!("✓ Validation passed: {}", report.summary());
        } else {
            info!("✗ Validation failed: {}", report.summary());
        }

        report
    }

    /// `Auto` becomes `Ldac` when any entity declares domain profile conformance
    fn resolve_profile(&self, package: &Package) -> Profile {
        match self.config.profile {
            Profile::Auto => {
                let marker = &self.config.domain.conformance_marker;
                let conforms = package
                    .graph
                    .entities()
                    .iter()
                    .any(|entity| conformance_ids(entity).any(|id| is_profile_conformance(id, marker)));
                if conforms { Profile::Ldac } else { Profile::Base }
            }
            profile => profile,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}
