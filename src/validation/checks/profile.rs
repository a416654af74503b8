use super::{Check, CheckContext, conformance_ids, is_profile_conformance};
use crate::config::Profile;
use crate::validation::finding::Findings;

/// Looks for a conformsTo reference naming the domain profile
pub struct ProfileCheck;

impl Check for ProfileCheck {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn applies(&self, ctx: &CheckContext<'_>) -> bool {
        ctx.profile == Profile::Ldac
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Findings) {
        let marker = &ctx.config.domain.conformance_marker;

        // First match is enough
        for entity in ctx.package.graph.entities() {
            if let Some(id) = conformance_ids(entity).find(|id| is_profile_conformance(id, marker))
            {
                findings.info(format!("LDAC profile conformance: {id}"));
                return;
            }
        }

        findings.warning("No LDAC profile conformance found");
    }
}
