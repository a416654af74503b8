//! Shared error utilities

use miette::{NamedSource, SourceSpan};
use std::path::Path;

/// Toggle this to add spaces for iTerm2 clickability
const ADD_SPACES_FOR_ITERM: bool = true;

/// Format a file path for error display
///
/// Paths below the current directory are shown relative to it. When
/// ADD_SPACES_FOR_ITERM is true, a space is added before the path to make it
/// clickable in iTerm2.
pub fn format_error_path(path: &Path) -> String {
    let display_path = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf());
    let path_str = display_path.display().to_string();

    if ADD_SPACES_FOR_ITERM {
        format!(" {path_str}")
    } else {
        path_str
    }
}

/// Create a NamedSource with proper formatting for error display
pub fn create_named_source(path: &Path, content: String) -> NamedSource<String> {
    let formatted_path = format_error_path(path);
    NamedSource::new(formatted_path, content)
}

/// Build a one-character span from a 1-based line and column
pub fn span_for_position(source: &str, line: usize, column: usize) -> SourceSpan {
    let line_start = line_to_offset(source, line.saturating_sub(1));
    let offset = (line_start + column.saturating_sub(1)).min(source.len());
    let length = usize::from(offset < source.len());
    SourceSpan::new(offset.into(), length)
}

/// Calculate byte offset from a 0-based line number
fn line_to_offset(source: &str, target_line: usize) -> usize {
    let mut current_line = 0;

    for (idx, ch) in source.char_indices() {
        if current_line == target_line {
            return idx;
        }

        if ch == '\n' {
            current_line += 1;
        }
    }

    // If we didn't find the line, return the end of the source
    source.len()
}
