//! In-memory model of an RO-Crate metadata graph

mod entity;
mod loader;

use std::collections::HashMap;
use std::path::PathBuf;

pub use entity::{Entity, PropertyValue};
pub use loader::{LoadError, PackageLoader};

use crate::defaults::{METADATA_DESCRIPTOR_ID, ROOT_DATASET_ID};

/// The addressable collection of entities loaded from one metadata document
#[derive(Debug, Clone, Default)]
pub struct Graph {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl Graph {
    pub fn new(entities: Vec<Entity>) -> Self {
        let mut index = HashMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            // First occurrence wins for duplicated identifiers
            index.entry(entity.id.clone()).or_insert(position);
        }
        Self { entities, index }
    }

    /// Entities in load order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Resolve an identifier to an entity.
    ///
    /// Exact identifiers are tried first, then the canonical relative-path
    /// form, so `./data.txt` and `data.txt` name the same entity.
    pub fn dereference(&self, id: &str) -> Option<&Entity> {
        if let Some(&position) = self.index.get(id) {
            return self.entities.get(position);
        }

        let canonical = canonical_id(id);
        if canonical != id {
            if let Some(&position) = self.index.get(canonical) {
                return self.entities.get(position);
            }
        }

        let dotted = format!("./{canonical}");
        if canonical != ROOT_DATASET_ID && dotted != id {
            if let Some(&position) = self.index.get(&dotted) {
                return self.entities.get(position);
            }
        }

        None
    }

    pub fn root_entity(&self) -> Option<&Entity> {
        self.index
            .get(ROOT_DATASET_ID)
            .and_then(|&position| self.entities.get(position))
    }

    pub fn descriptor(&self) -> Option<&Entity> {
        self.index
            .get(METADATA_DESCRIPTOR_ID)
            .and_then(|&position| self.entities.get(position))
    }
}

/// Strip leading `./` segments from relative identifiers. `./` itself is kept.
fn canonical_id(id: &str) -> &str {
    let mut current = id;
    while let Some(rest) = current.strip_prefix("./") {
        if rest.is_empty() {
            return ROOT_DATASET_ID;
        }
        current = rest;
    }
    current
}

/// A loaded package: its location on disk, the raw document and the graph
#[derive(Debug, Clone)]
pub struct Package {
    /// Directory holding the metadata document and payload files
    pub dir: PathBuf,
    pub metadata_path: PathBuf,
    /// Raw top-level document before graph construction
    pub document: serde_json::Value,
    pub graph: Graph,
}
