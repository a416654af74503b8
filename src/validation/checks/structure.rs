use serde_json::Value;
use tracing::debug;

use super::{Check, CheckContext};
use crate::defaults::{METADATA_DESCRIPTOR_ID, ROOT_DATASET_ID};
use crate::graph::{Entity, PropertyValue};
use crate::validation::finding::Findings;
use crate::validation::schemas::entity_shape_violations;

const REQUIRED_TOP_LEVEL: [&str; 2] = ["@context", "@graph"];
const RECOMMENDED_ROOT_PROPERTIES: [&str; 2] = ["name", "description"];

/// Top-level fields, entity shapes, the metadata descriptor and the root dataset
pub struct StructureCheck;

impl Check for StructureCheck {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Findings) {
        let document = &ctx.package.document;
        let graph = &ctx.package.graph;

        Self::check_top_level(document, findings);

        if let Some(entities) = document.get("@graph") {
            match entities.as_array() {
                Some(items) => {
                    if items.len() < 2 {
                        findings.warning(
                            "@graph should contain at least 2 entities (metadata descriptor and root dataset)",
                        );
                    }
                    Self::check_entity_shapes(entities, findings);
                }
                None => findings.error("@graph must be an array"),
            }
        }

        match graph.descriptor() {
            Some(descriptor) => Self::check_descriptor(descriptor, findings),
            None => findings.error(format!(
                "Missing metadata descriptor entity ({METADATA_DESCRIPTOR_ID})"
            )),
        }

        match graph.root_entity() {
            Some(root) => Self::check_root(root, findings),
            None => findings.error(format!("Missing root dataset entity ('{ROOT_DATASET_ID}')")),
        }
    }
}

impl StructureCheck {
    fn check_top_level(document: &Value, findings: &mut Findings) {
        let missing: Vec<&str> = REQUIRED_TOP_LEVEL
            .into_iter()
            .filter(|prop| document.get(prop).is_none())
            .collect();

        if missing.is_empty() {
            findings.info("All required top-level properties present");
        }
        for prop in missing {
            findings.error(format!("Missing required top-level property: {prop}"));
        }
    }

    fn check_entity_shapes(entities: &Value, findings: &mut Findings) {
        match entity_shape_violations(entities) {
            Ok(violations) => {
                for violation in violations {
                    findings.error(format!(
                        "Invalid entity at /@graph{}: {}",
                        violation.instance_path, violation.message
                    ));
                }
            }
            Err(e) => {
                debug!("Entity shape validation unavailable: {e:#}");
                findings.warning(format!("Could not check entity shapes: {e}"));
            }
        }
    }

    fn check_descriptor(descriptor: &Entity, findings: &mut Findings) {
        if !descriptor.has_type("CreativeWork") {
            findings.warning("Metadata descriptor should have @type 'CreativeWork'");
        }

        if descriptor
            .get("conformsTo")
            .is_none_or(PropertyValue::is_blank)
        {
            findings.warning("Metadata descriptor should have 'conformsTo' property");
        }

        let about = descriptor.get("about").and_then(PropertyValue::as_reference);
        if about != Some(ROOT_DATASET_ID) {
            findings.warning(format!(
                "Metadata descriptor 'about' should reference root dataset ('{ROOT_DATASET_ID}')"
            ));
        }
    }

    fn check_root(root: &Entity, findings: &mut Findings) {
        findings.info(format!("Root dataset ID: {}", root.id));

        if !root.has_type("Dataset") {
            findings.warning("Root dataset should have @type including 'Dataset'");
        }

        for prop in RECOMMENDED_ROOT_PROPERTIES {
            match root.get(prop) {
                Some(value) if !value.is_blank() => {
                    findings.info(format!("Root dataset {prop}: {}", value.display()));
                }
                _ => findings.warning(format!("Root dataset missing recommended property: {prop}")),
            }
        }
    }
}
