use serde_json::Value;

use super::{Check, CheckContext};
use crate::config::MatchMode;
use crate::validation::finding::Findings;

/// Compares the @context declaration with the profile's expected identifiers.
/// Mismatches are advisory only.
pub struct ContextCheck;

impl Check for ContextCheck {
    fn name(&self) -> &'static str {
        "context"
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Findings) {
        // A missing @context is a structural error reported elsewhere
        let Some(context) = ctx.package.document.get("@context") else {
            return;
        };

        let tokens = match normalize_context(context) {
            Some(tokens) => tokens,
            None => {
                findings.warning("@context should be a string or an array of contexts");
                Vec::new()
            }
        };

        for requirement in ctx.config.expected_contexts(ctx.profile) {
            let found = tokens.iter().any(|token| requirement.is_satisfied_by(token));
            match (found, requirement.mode) {
                (true, _) => findings.info(format!("Found context: {}", requirement.id)),
                (false, MatchMode::Exact) => {
                    findings.warning(format!("Missing expected context: {}", requirement.id));
                }
                (false, MatchMode::Substring) => findings.warning(format!(
                    "@context should reference a context matching '{}'",
                    requirement.id
                )),
            }
        }
    }
}

/// Flatten a @context value into string tokens.
///
/// Inline objects contribute `@vocab: <vocab>` when they declare a vocabulary.
/// Returns None for shapes that are neither strings, objects nor arrays.
pub fn normalize_context(context: &Value) -> Option<Vec<String>> {
    match context {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Object(_) => Some(vocab_token(context).into_iter().collect()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(_) => vocab_token(item),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

fn vocab_token(object: &Value) -> Option<String> {
    object
        .get("@vocab")
        .and_then(Value::as_str)
        .map(|vocab| format!("@vocab: {vocab}"))
}
