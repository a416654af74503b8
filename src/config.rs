//! Validator configuration, loaded from YAML and layered over built-in profiles

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::defaults::{
    BUILTIN_PROFILES, DEFAULT_CONFORMANCE_MARKER, DEFAULT_SUBJECT_LANGUAGE_PROPERTY,
    DEFAULT_TOOL_LABEL, DEFAULT_TOOL_MARKER,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Which rule set applies on top of the base packaging rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Base,
    Ldac,
    /// Ldac when the crate declares conformance to the domain profile, Base otherwise
    Auto,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Base => write!(f, "base"),
            Profile::Ldac => write!(f, "ldac"),
            Profile::Auto => write!(f, "auto"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Exact,
    Substring,
}

/// One context identifier the @context declaration is expected to carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRequirement {
    pub id: String,
    #[serde(default)]
    pub mode: MatchMode,
}

impl ContextRequirement {
    pub fn exact(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode: MatchMode::Exact,
        }
    }

    pub fn substring(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode: MatchMode::Substring,
        }
    }

    pub fn is_satisfied_by(&self, token: &str) -> bool {
        match self.mode {
            MatchMode::Exact => token == self.id,
            MatchMode::Substring => token.contains(&self.id),
        }
    }
}

/// Markers used by the domain profile checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainConfig {
    /// Substring a conformsTo identifier must carry (alongside "profile")
    pub conformance_marker: String,
    /// Substring identifying files and publishers produced by the archiving tool
    pub tool_marker: String,
    /// Display name of the archiving tool in findings
    pub tool_label: String,
    /// Root property listing the subject languages
    pub subject_language_property: String,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            conformance_marker: DEFAULT_CONFORMANCE_MARKER.to_string(),
            tool_marker: DEFAULT_TOOL_MARKER.to_string(),
            tool_label: DEFAULT_TOOL_LABEL.to_string(),
            subject_language_property: DEFAULT_SUBJECT_LANGUAGE_PROPERTY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    pub profile: Profile,

    /// Overrides the profile's expected contexts when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Vec<ContextRequirement>>,

    pub domain: DomainConfig,

    /// Confirm local data entities exist below the crate directory
    pub check_files: bool,

    /// Report malformed reference tokens separately from missing targets
    pub split_malformed_references: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Base,
            contexts: None,
            domain: DomainConfig::default(),
            check_files: true,
            split_malformed_references: false,
        }
    }
}

impl ValidatorConfig {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Context requirements for a resolved profile
    pub fn expected_contexts(&self, profile: Profile) -> Vec<ContextRequirement> {
        if let Some(contexts) = &self.contexts {
            return contexts.clone();
        }

        match profile {
            Profile::Ldac => BUILTIN_PROFILES.ldac.contexts.clone(),
            Profile::Base | Profile::Auto => BUILTIN_PROFILES.base.contexts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ValidatorConfig::from_yaml("").unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert!(config.check_files);
    }

    #[test]
    fn test_partial_domain_override() {
        let config = ValidatorConfig::from_yaml(
            r#"
profile: ldac
domain:
  tool_marker: elan
"#,
        )
        .unwrap();

        assert_eq!(config.profile, Profile::Ldac);
        assert_eq!(config.domain.tool_marker, "elan");
        assert_eq!(config.domain.conformance_marker, "language-data-commons");
    }

    #[test]
    fn test_context_override() {
        let config = ValidatorConfig::from_yaml(
            r#"
contexts:
  - id: https://example.org/context
  - id: example.org
    mode: substring
"#,
        )
        .unwrap();

        let contexts = config.expected_contexts(Profile::Ldac);
        assert_eq!(
            contexts,
            vec![
                ContextRequirement::exact("https://example.org/context"),
                ContextRequirement::substring("example.org"),
            ]
        );
    }

    #[test]
    fn test_profile_contexts() {
        let config = ValidatorConfig::default();
        assert_eq!(config.expected_contexts(Profile::Base).len(), 1);
        assert_eq!(config.expected_contexts(Profile::Ldac).len(), 3);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = ValidatorConfig::from_yaml("profiel: ldac\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_requirement_matching() {
        assert!(ContextRequirement::substring("w3id.org/ro/crate")
            .is_satisfied_by("https://w3id.org/ro/crate/1.1/context"));
        assert!(!ContextRequirement::exact("https://w3id.org/ldac/context")
            .is_satisfied_by("https://w3id.org/ldac/context/"));
    }
}
