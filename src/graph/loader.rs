use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::{Entity, Graph, Package};
use crate::defaults::METADATA_FILE_NAME;
use crate::error_utils::{create_named_source, span_for_position};

/// Failures that prevent a graph from being built at all
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum LoadError {
    #[error("Path does not exist: {0}")]
    #[diagnostic(code(rocrate::path_not_found))]
    PathNotFound(String),

    #[error("Invalid path: {0}. Must be a directory or JSON file")]
    #[diagnostic(
        code(rocrate::invalid_path),
        help("Pass the crate directory or its ro-crate-metadata.json file")
    )]
    InvalidPath(String),

    #[error("No metadata document found: expected ro-crate-metadata.json in {0}")]
    #[diagnostic(code(rocrate::missing_metadata))]
    MissingMetadata(String),

    #[error("Failed to read {path}: {reason}")]
    #[diagnostic(code(rocrate::unreadable))]
    Unreadable { path: String, reason: String },

    #[error("Invalid JSON in metadata file: {reason}")]
    #[diagnostic(code(rocrate::malformed))]
    Malformed {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },

    #[error("Metadata document must be a JSON object, found {0}")]
    #[diagnostic(
        code(rocrate::not_an_object),
        help("The top level of ro-crate-metadata.json holds @context and @graph")
    )]
    NotAnObject(&'static str),
}

/// Loads a package from a crate directory or a metadata file path
pub struct PackageLoader;

impl PackageLoader {
    pub fn load(path: &Path) -> Result<Package, LoadError> {
        let (dir, metadata_path) = Self::resolve(path)?;
        debug!("Loading metadata document {metadata_path:?}");

        let content = std::fs::read_to_string(&metadata_path).map_err(|e| {
            LoadError::Unreadable {
                path: metadata_path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let document = Self::parse(&metadata_path, content)?;
        let graph = Self::build_graph(&document);
        debug!("Loaded {} entities", graph.len());

        Ok(Package {
            dir,
            metadata_path,
            document,
            graph,
        })
    }

    /// Work out the package directory and the metadata document path
    fn resolve(path: &Path) -> Result<(PathBuf, PathBuf), LoadError> {
        if !path.exists() {
            return Err(LoadError::PathNotFound(path.display().to_string()));
        }

        if path.is_dir() {
            let metadata_path = path.join(METADATA_FILE_NAME);
            if !metadata_path.is_file() {
                return Err(LoadError::MissingMetadata(path.display().to_string()));
            }
            return Ok((path.to_path_buf(), metadata_path));
        }

        let is_metadata_file = path.file_name().is_some_and(|n| n == METADATA_FILE_NAME)
            || path.extension().is_some_and(|ext| ext == "json");
        if !is_metadata_file {
            return Err(LoadError::InvalidPath(path.display().to_string()));
        }

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((dir, path.to_path_buf()))
    }

    fn parse(metadata_path: &Path, content: String) -> Result<Value, LoadError> {
        let document: Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                let span = span_for_position(&content, e.line(), e.column());
                return Err(LoadError::Malformed {
                    src: create_named_source(metadata_path, content),
                    span,
                    reason: e.to_string(),
                });
            }
        };

        match &document {
            Value::Object(_) => Ok(document),
            Value::Array(_) => Err(LoadError::NotAnObject("an array")),
            Value::String(_) => Err(LoadError::NotAnObject("a string")),
            Value::Number(_) => Err(LoadError::NotAnObject("a number")),
            Value::Bool(_) => Err(LoadError::NotAnObject("a boolean")),
            Value::Null => Err(LoadError::NotAnObject("null")),
        }
    }

    /// Materialize entities from `@graph`. Elements without a string `@id`
    /// are left for the structural checks to report.
    pub fn build_graph(document: &Value) -> Graph {
        let Some(items) = document.get("@graph").and_then(Value::as_array) else {
            return Graph::default();
        };

        let entities = items
            .iter()
            .filter_map(|item| {
                let object = item.as_object()?;
                let id = object.get("@id")?.as_str()?;
                Some(Entity::from_json(id.to_string(), object))
            })
            .collect();

        Graph::new(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
  "@context": "https://w3id.org/ro/crate/1.1/context",
  "@graph": [
    {"@id": "ro-crate-metadata.json", "@type": "CreativeWork", "about": {"@id": "./"}},
    {"@id": "./", "@type": "Dataset", "name": "Example"}
  ]
}"#;

    #[test]
    fn test_load_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(METADATA_FILE_NAME), MINIMAL).unwrap();

        let package = PackageLoader::load(temp_dir.path()).unwrap();
        assert_eq!(package.dir, temp_dir.path());
        assert_eq!(package.graph.len(), 2);
        assert!(package.graph.root_entity().is_some());
    }

    #[test]
    fn test_load_from_metadata_file() {
        let temp_dir = TempDir::new().unwrap();
        let metadata_path = temp_dir.path().join(METADATA_FILE_NAME);
        fs::write(&metadata_path, MINIMAL).unwrap();

        let package = PackageLoader::load(&metadata_path).unwrap();
        assert_eq!(package.dir, temp_dir.path());
        assert_eq!(package.metadata_path, metadata_path);
    }

    #[test]
    fn test_missing_metadata_document() {
        let temp_dir = TempDir::new().unwrap();
        let result = PackageLoader::load(temp_dir.path());
        assert!(matches!(result, Err(LoadError::MissingMetadata(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("No metadata document found")
        );
    }

    #[test]
    fn test_nonexistent_path() {
        let result = PackageLoader::load(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(LoadError::PathNotFound(_))));
    }

    #[test]
    fn test_non_json_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let result = PackageLoader::load(&path);
        assert!(matches!(result, Err(LoadError::InvalidPath(_))));
    }

    #[test]
    fn test_malformed_json_carries_span() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(METADATA_FILE_NAME), "{\n  \"@graph\": [,]\n}").unwrap();

        match PackageLoader::load(temp_dir.path()) {
            Err(LoadError::Malformed { span, .. }) => assert!(span.offset() > 0),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(METADATA_FILE_NAME), "[]").unwrap();

        let result = PackageLoader::load(temp_dir.path());
        assert!(matches!(result, Err(LoadError::NotAnObject("an array"))));
    }

    #[test]
    fn test_entities_without_id_are_skipped() {
        let document = serde_json::json!({
            "@graph": [{"@type": "Thing"}, "stray", {"@id": "./", "@type": "Dataset"}]
        });
        let graph = PackageLoader::build_graph(&document);
        assert_eq!(graph.len(), 1);
    }
}
