use percent_encoding::percent_decode_str;
use std::path::PathBuf;
use tracing::debug;

use super::{Check, CheckContext, is_absolute_uri};
use crate::defaults::ROOT_DATASET_ID;
use crate::validation::finding::Findings;

/// Confirms local data entities exist on disk below the crate directory.
/// Missing payload files are warnings: the metadata can still be valid.
pub struct FileCheck;

impl Check for FileCheck {
    fn name(&self) -> &'static str {
        "files"
    }

    fn applies(&self, ctx: &CheckContext<'_>) -> bool {
        ctx.config.check_files
    }

    fn run(&self, ctx: &CheckContext<'_>, findings: &mut Findings) {
        let base = &ctx.package.dir;
        let mut present = 0usize;

        for entity in ctx.package.graph.entities() {
            if entity.id == ROOT_DATASET_ID {
                continue;
            }

            let is_file = entity.has_type("File");
            let is_dir = entity.has_type("Dataset");
            if !is_file && !is_dir {
                continue;
            }

            let Some(relative) = local_path(&entity.id) else {
                continue;
            };

            let path = base.join(relative);
            let found = match (is_file, is_dir) {
                (true, false) => path.is_file(),
                (false, true) => path.is_dir(),
                _ => path.exists(),
            };

            if found {
                present += 1;
            } else {
                findings.warning(format!("Referenced file not found: {}", entity.id));
            }
        }

        debug!("{present} data entities present under {base:?}");
    }
}

/// Relative filesystem path for a data entity identifier, or None when the
/// identifier is external, a fragment, or escapes the crate directory.
/// Identifiers are URI references, so each segment is percent-decoded.
fn local_path(id: &str) -> Option<PathBuf> {
    if id.is_empty() || id.starts_with('#') || id.starts_with('/') || is_absolute_uri(id) {
        return None;
    }

    let mut relative = id;
    while let Some(rest) = relative.strip_prefix("./") {
        relative = rest;
    }
    let relative = relative.trim_end_matches('/');
    if relative.is_empty() {
        return None;
    }

    let mut path = PathBuf::new();
    for segment in relative.split('/') {
        let decoded = percent_decode_str(segment).decode_utf8_lossy();
        if decoded == ".." || decoded.contains('/') {
            return None;
        }
        path.push(&*decoded);
    }
    Some(path)
}
