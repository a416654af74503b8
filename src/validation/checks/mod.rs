//! Rule checks run by the validator, one per concern

mod context;
mod domain;
mod files;
mod profile;
mod references;
mod structure;

use once_cell::sync::Lazy;
use regex::Regex;

pub use context::ContextCheck;
pub use domain::DomainCheck;
pub use files::FileCheck;
pub use profile::ProfileCheck;
pub use references::ReferenceCheck;
pub use structure::StructureCheck;

use super::finding::Findings;
use crate::config::{Profile, ValidatorConfig};
use crate::graph::{Entity, Package, PropertyValue};

/// Everything a check may read. Checks never see each other's findings.
pub struct CheckContext<'a> {
    pub package: &'a Package,
    pub config: &'a ValidatorConfig,
    /// Resolved profile, never `Auto`
    pub profile: Profile,
}

/// Trait for rule check implementations
pub trait Check: Send + Sync {
    /// Name of the check (e.g., "structure", "references")
    fn name(&self) -> &'static str;

    /// Whether the check runs for this package and configuration
    fn applies(&self, _ctx: &CheckContext<'_>) -> bool {
        true
    }

    /// Inspect the package and record findings. Must not panic on malformed input.
    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Findings);
}

/// The full pipeline, in execution order
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(StructureCheck),
        Box::new(ContextCheck),
        Box::new(ProfileCheck),
        Box::new(ReferenceCheck),
        Box::new(DomainCheck),
        Box::new(FileCheck),
    ]
}

static URI_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid URI scheme pattern"));

/// True for identifiers starting with a URI scheme such as `http:` or `arcp:`
pub fn is_absolute_uri(id: &str) -> bool {
    URI_SCHEME.is_match(id)
}

/// Identifiers of the entity's conformsTo references
pub fn conformance_ids(entity: &Entity) -> impl Iterator<Item = &str> {
    entity
        .get("conformsTo")
        .map(PropertyValue::items)
        .unwrap_or_default()
        .iter()
        .filter_map(PropertyValue::as_reference)
}

/// Whether a conformsTo identifier names the domain profile
pub fn is_profile_conformance(id: &str, marker: &str) -> bool {
    id.contains(marker) && id.contains("profile")
}
