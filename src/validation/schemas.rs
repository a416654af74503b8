use anyhow::{Context, Result};
use serde_json::Value;

// Use JSON Schema draft-07 for validation (stable and well-tested)
use jsonschema::draft7 as schema_draft;

// Embed schemas at compile time
const ENTITY_LIST_SCHEMA: &str = include_str!("../../schemas/v1/entity-list-schema.json");

pub fn get_entity_list_schema() -> Result<Value, serde_json::Error> {
    serde_json::from_str(ENTITY_LIST_SCHEMA)
}

/// One schema violation, located by JSON pointer below `@graph`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeViolation {
    pub instance_path: String,
    pub message: String,
}

/// Validate the raw `@graph` array against the entity list schema
pub fn entity_shape_violations(graph: &Value) -> Result<Vec<ShapeViolation>> {
    let schema = get_entity_list_schema().context("Failed to parse entity list schema")?;
    let validator = schema_draft::options()
        .build(&schema)
        .context("Failed to compile entity list schema")?;

    Ok(validator
        .iter_errors(graph)
        .map(|error| ShapeViolation {
            instance_path: error.instance_path.to_string(),
            message: error.to_string(),
        })
        .collect())
}
