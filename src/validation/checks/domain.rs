use tracing::debug;

use super::{Check, CheckContext};
use crate::config::{DomainConfig, Profile};
use crate::graph::{Entity, Graph, PropertyValue};
use crate::validation::finding::Findings;

/// Language-archive metadata: subject languages, tool-specific files and publisher
pub struct DomainCheck;

impl Check for DomainCheck {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn applies(&self, ctx: &CheckContext<'_>) -> bool {
        ctx.profile == Profile::Ldac
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Findings) {
        let graph = &ctx.package.graph;
        let domain = &ctx.config.domain;

        if let Some(root) = graph.root_entity() {
            Self::check_subject_languages(graph, root, domain, findings);
        }

        Self::collect_tool_files(graph, domain, findings);

        // Without a root dataset the structure check already reports an error
        if let Some(root) = graph.root_entity() {
            Self::check_publisher(root, domain, findings);
        }
    }
}

impl DomainCheck {
    fn check_subject_languages(
        graph: &Graph,
        root: &Entity,
        domain: &DomainConfig,
        findings: &mut Findings,
    ) {
        let references = match root.get(&domain.subject_language_property) {
            Some(value) if !value.is_blank() => value.items(),
            _ => {
                findings.warning("No subject languages specified");
                return;
            }
        };

        findings.info(format!("Subject languages found: {}", references.len()));

        let mut languages = Vec::new();
        for reference in references {
            let Some(token) = reference.as_reference().or_else(|| reference.as_str()) else {
                continue;
            };
            // Unresolved entries are reported by the reference check
            let Some(language) = graph.dereference(token) else {
                debug!("Skipping unresolved subject language {token}");
                continue;
            };
            languages.push(format!(
                "{} ({})",
                text_or_default(language, "code", "unknown"),
                text_or_default(language, "name", "unknown")
            ));
        }

        if !languages.is_empty() {
            findings.info(format!("Languages: {}", languages.join(", ")));
        }
    }

    fn collect_tool_files(graph: &Graph, domain: &DomainConfig, findings: &mut Findings) {
        let tool_files: Vec<(&str, &str, String)> = graph
            .entities()
            .iter()
            .filter_map(|entity| {
                let format = entity
                    .get("encodingFormat")?
                    .items()
                    .iter()
                    .filter_map(PropertyValue::as_str)
                    .find(|format| format.contains(domain.tool_marker.as_str()))?;
                Some((
                    entity.id.as_str(),
                    format,
                    text_or_default(entity, "name", "unnamed"),
                ))
            })
            .collect();

        if tool_files.is_empty() {
            return;
        }

        findings.info(format!(
            "{} files found: {}",
            domain.tool_label,
            tool_files.len()
        ));
        for (id, format, name) in tool_files {
            findings.info(format!("{} file: {name} ({format}) [{id}]", domain.tool_label));
        }
    }

    fn check_publisher(root: &Entity, domain: &DomainConfig, findings: &mut Findings) {
        match root.get("publisher") {
            Some(PropertyValue::Reference(id)) if id.contains(domain.tool_marker.as_str()) => {
                findings.info(format!("{} publisher: {id}", domain.tool_label));
            }
            Some(PropertyValue::Reference(id)) => findings.info(format!("Publisher: {id}")),
            Some(value) if !value.is_blank() && !is_false_or_zero(value) => {
                findings.info(format!("Publisher: {}", value.display()));
            }
            _ => findings.warning("No publisher information"),
        }
    }
}

fn is_false_or_zero(value: &PropertyValue) -> bool {
    match value {
        PropertyValue::Bool(b) => !b,
        PropertyValue::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Non-blank property rendered as text, or the fallback
fn text_or_default(entity: &Entity, property: &str, fallback: &str) -> String {
    entity
        .get(property)
        .filter(|value| !value.is_blank())
        .map(PropertyValue::display)
        .unwrap_or_else(|| fallback.to_string())
}
