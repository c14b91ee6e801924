//! Nesting exclusions
//!
//! Projects include every source file under their root by glob. A project
//! rooted inside another project's root must be removed from the outer
//! project, otherwise both compile the same files.

use super::path_utils::{SEPARATOR, is_nested, paths_equal};
use super::project_graph::ProjectGraph;

/// Glob suffix matching everything below a folder
pub const RECURSIVE_GLOB: &str = "**/*";

/// Exclusion globs, relative to node `index`'s root, for every project nested inside it
pub fn nesting_exclusions(graph: &ProjectGraph<'_>, index: usize) -> Vec<String> {
    let node = graph.node(index);
    let root = node.root_folder.as_str();
    if root.is_empty() {
        return Vec::new();
    }

    graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(other_index, _)| *other_index != index)
        .map(|(_, other)| other.root_folder.as_str())
        .filter(|other_root| !other_root.is_empty() && !paths_equal(root, other_root))
        .filter(|other_root| is_nested(root, other_root))
        .map(|other_root| {
            let relative = other_root[root.len()..].trim_start_matches(SEPARATOR);
            format!("{}{}{}", relative, SEPARATOR, RECURSIVE_GLOB)
        })
        .collect()
}
