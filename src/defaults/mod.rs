use crate::config::ContextRequirement;
use once_cell::sync::Lazy;
use serde::Deserialize;

/// File name of the metadata document inside a crate directory
pub const METADATA_FILE_NAME: &str = "ro-crate-metadata.json";

/// Identifier of the entity describing the metadata document itself
pub const METADATA_DESCRIPTOR_ID: &str = "ro-crate-metadata.json";

/// Identifier of the root dataset
pub const ROOT_DATASET_ID: &str = "./";

pub const DEFAULT_CONFORMANCE_MARKER: &str = "language-data-commons";
pub const DEFAULT_TOOL_MARKER: &str = "lameta";
pub const DEFAULT_TOOL_LABEL: &str = "Lameta";
pub const DEFAULT_SUBJECT_LANGUAGE_PROPERTY: &str = "subjectLanguages";

// Embed the built-in profile definitions at compile time
const PROFILES_YAML: &str = include_str!("profiles.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDefinition {
    pub contexts: Vec<ContextRequirement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinProfiles {
    pub base: ProfileDefinition,
    pub ldac: ProfileDefinition,
}

// Parse the built-in profiles once at startup
pub static BUILTIN_PROFILES: Lazy<BuiltinProfiles> = Lazy::new(|| {
    serde_yaml::from_str(PROFILES_YAML)
        .expect("Failed to parse built-in profile definitions - this is a bug")
});
