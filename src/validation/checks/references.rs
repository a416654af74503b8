use std::collections::HashSet;
use tracing::debug;

use super::{Check, CheckContext, is_absolute_uri};
use crate::graph::{Graph, PropertyValue};
use crate::validation::finding::Findings;

/// Confirms every internal reference resolves to an entity in the graph
pub struct ReferenceCheck;

impl Check for ReferenceCheck {
    fn name(&self) -> &'static str {
        "references"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Findings) {
        let graph = &ctx.package.graph;
        let split_malformed = ctx.config.split_malformed_references;
        let mut checked = 0usize;

        for entity in graph.entities() {
            // One finding per (entity, token) pair
            let mut reported: HashSet<&str> = HashSet::new();

            for (_, value) in &entity.properties {
                for token in reference_tokens(value) {
                    if is_absolute_uri(token) {
                        continue;
                    }
                    checked += 1;

                    let Some(problem) = resolve(graph, token, split_malformed) else {
                        continue;
                    };
                    if reported.insert(token) {
                        findings.error(format!("{problem}: {} -> {token}", entity.id));
                    }
                }
            }
        }

        debug!("Checked {checked} internal references");
    }
}

/// Why a token failed to resolve, or None when it resolves
fn resolve(graph: &Graph, token: &str, split_malformed: bool) -> Option<&'static str> {
    if graph.dereference(token).is_some() {
        return None;
    }

    if split_malformed && is_malformed(token) {
        Some("Malformed internal reference")
    } else {
        Some("Broken internal reference")
    }
}

/// Unresolved tokens that are not well-formed identifiers
fn is_malformed(token: &str) -> bool {
    token.trim().is_empty() || token.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Candidate reference tokens carried by one property value.
///
/// `{"@id": ...}` objects yield their identifier, and plain strings starting
/// with `#` are treated as bare references, both directly and inside sequences.
pub fn reference_tokens(value: &PropertyValue) -> Vec<&str> {
    value
        .items()
        .iter()
        .filter_map(|item| match item {
            PropertyValue::Reference(id) => Some(id.as_str()),
            PropertyValue::String(s) if s.starts_with('#') => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Profile, ValidatorConfig};
    use crate::graph::{Package, PackageLoader};
    use crate::validation::finding::Severity;
    use serde_json::{Value, json};
    use std::path::PathBuf;

    fn run_with(document: Value, config: ValidatorConfig) -> Vec<String> {
        let package = Package {
            dir: PathBuf::from("."),
            metadata_path: PathBuf::from("ro-crate-metadata.json"),
            graph: PackageLoader::build_graph(&document),
            document,
        };
        let ctx = CheckContext {
            package: &package,
            config: &config,
            profile: Profile::Base,
        };
        let mut findings = Findings::new("references");
        ReferenceCheck.run(&ctx, &mut findings);
        assert!(findings.iter().all(|f| f.severity == Severity::Error));
        findings.iter().map(|f| f.message.clone()).collect()
    }

    fn run(document: Value) -> Vec<String> {
        run_with(document, ValidatorConfig::default())
    }

    #[test]
    fn test_reference_tokens_shapes() {
        let single = PropertyValue::from_json(&json!({"@id": "#a"}));
        let bare = PropertyValue::from_json(&json!("#b"));
        let plain = PropertyValue::from_json(&json!("just text"));
        let mixed = PropertyValue::from_json(&json!([{"@id": "#c"}, "#d", "text", 3]));

        assert_eq!(reference_tokens(&single), vec!["#a"]);
        assert_eq!(reference_tokens(&bare), vec!["#b"]);
        assert!(reference_tokens(&plain).is_empty());
        assert_eq!(reference_tokens(&mixed), vec!["#c", "#d"]);
    }

    #[test]
    fn test_resolved_references_emit_nothing() {
        let errors = run(json!({"@graph": [
            {"@id": "ro-crate-metadata.json", "about": {"@id": "./"}},
            {"@id": "./", "hasPart": [{"@id": "data.txt"}, {"@id": "./audio.wav"}],
             "author": "#person", "self": {"@id": "./"}},
            {"@id": "./data.txt"},
            {"@id": "audio.wav"},
            {"@id": "#person"}
        ]}));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_one_error_per_entity_and_token() {
        let errors = run(json!({"@graph": [
            {"@id": "./", "subjectLanguages": ["#lang1"], "inLanguage": {"@id": "#lang1"},
             "hasPart": [{"@id": "missing.txt"}]},
            {"@id": "#other", "about": "#lang1"}
        ]}));

        assert_eq!(
            errors,
            vec![
                "Broken internal reference: ./ -> #lang1".to_string(),
                "Broken internal reference: ./ -> missing.txt".to_string(),
                "Broken internal reference: #other -> #lang1".to_string(),
            ]
        );
    }

    #[test]
    fn test_absolute_uris_are_exempt() {
        let errors = run(json!({"@graph": [
            {"@id": "./", "license": {"@id": "http://example.org/x"},
             "publisher": {"@id": "https://lameta.org"},
             "identifier": [{"@id": "arcp://name,corpus/item"}]}
        ]}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_malformed_tokens_unified_by_default() {
        let document = json!({"@graph": [
            {"@id": "./", "a": {"@id": ""}, "b": {"@id": "has space"}}
        ]});

        let errors = run(document.clone());
        assert_eq!(
            errors,
            vec![
                "Broken internal reference: ./ -> ".to_string(),
                "Broken internal reference: ./ -> has space".to_string(),
            ]
        );

        let config = ValidatorConfig {
            split_malformed_references: true,
            ..ValidatorConfig::default()
        };
        let errors = run_with(document, config);
        assert!(errors.iter().all(|e| e.starts_with("Malformed internal reference")));
    }

    #[test]
    fn test_existing_ids_with_spaces_resolve() {
        let document = json!({"@graph": [
            {"@id": "./", "hasPart": [{"@id": "my file.wav"}]},
            {"@id": "my file.wav", "@type": "File"}
        ]});

        assert!(run(document.clone()).is_empty());

        let config = ValidatorConfig {
            split_malformed_references: true,
            ..ValidatorConfig::default()
        };
        assert!(run_with(document, config).is_empty());
    }

    #[test]
    fn test_non_string_id_is_broken() {
        let errors = run(json!({"@graph": [{"@id": "./", "a": {"@id": 7}}]}));
        assert_eq!(errors, vec!["Broken internal reference: ./ -> 7".to_string()]);
    }
}
