//! Reference resolution
//!
//! A declared reference whose bare name matches a project in the graph becomes
//! a project reference. Anything else stays a binary reference to the declared
//! path.

use std::collections::HashSet;

use log::debug;

use super::path_utils::{file_name, relative_path};
use super::project_graph::ProjectGraph;

const BINARY_EXTENSIONS: [&str; 2] = [".dll", ".exe"];

/// What a stored external reference path is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathBase {
    /// Relative to the referencing project's root folder
    ProjectRoot,
    /// Kept exactly as declared, absolute or not
    AsDeclared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    pub name: String,
    pub file_name: String,
    pub guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    pub name: String,
    pub path: String,
    pub base: PathBase,
    /// Copy the binary to the output folder, always false for generated projects
    pub copy_local: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceEdge {
    Project(ProjectReference),
    External(ExternalReference),
}

/// File name of a reference with any binary extension removed.
///
/// Only binary extensions are stripped so dotted assembly names such as
/// `Unity.Mathematics` survive intact.
pub fn bare_name(reference: &str) -> &str {
    let name = file_name(reference);
    for extension in BINARY_EXTENSIONS {
        if name.len() > extension.len() {
            let split = name.len() - extension.len();
            if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(extension) {
                return &name[..split];
            }
        }
    }
    name
}

/// Partition the references of node `index` into project and external edges
pub fn resolve_references(graph: &ProjectGraph<'_>, index: usize) -> Vec<ReferenceEdge> {
    let node = graph.node(index);
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for reference in &node.unit.references {
        let name = bare_name(reference);
        if name == node.name() {
            debug!("Ignoring self reference in {}", node.name());
            continue;
        }
        if !seen.insert(name) {
            continue;
        }

        if let Some(target) = graph.find(name) {
            edges.push(ReferenceEdge::Project(ProjectReference {
                name: target.name().to_string(),
                file_name: target.file_name.clone(),
                guid: target.guid.clone(),
            }));
            continue;
        }

        let (path, base) = match relative_path(&node.root_folder, reference) {
            Some(relative) => (relative, PathBase::ProjectRoot),
            None => (reference.clone(), PathBase::AsDeclared),
        };
        edges.push(ReferenceEdge::External(ExternalReference {
            name: name.to_string(),
            path,
            base,
            copy_local: false,
        }));
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project_gen::options::GenerationOptions;
    use crate::test_utils::{unit, with_references};

    #[test]
    fn test_bare_name() {
        assert_eq!(bare_name("Newtonsoft.Json.dll"), "Newtonsoft.Json");
        assert_eq!(bare_name("/proj/Library/ScriptAssemblies/Game.Core.DLL"), "Game.Core");
        assert_eq!(bare_name("Unity.Mathematics"), "Unity.Mathematics");
        assert_eq!(bare_name("OtherUnit"), "OtherUnit");
        assert_eq!(bare_name(".dll"), ".dll");
    }

    #[test]
    fn test_reference_partition() {
        let units = vec![
            with_references(
                unit("Game", &["/proj/Assets/Game/Game.cs"]),
                &["Newtonsoft.Json.dll", "OtherUnit"],
            ),
            unit("OtherUnit", &["/proj/Assets/Other/Other.cs"]),
        ];
        let graph = ProjectGraph::build(&units, "/proj/Assets", &GenerationOptions::default());
        let edges = &graph.node(0).references;

        assert_eq!(edges.len(), 2);
        assert_eq!(
            edges[0],
            ReferenceEdge::External(ExternalReference {
                name: "Newtonsoft.Json".to_string(),
                path: "Newtonsoft.Json.dll".to_string(),
                base: PathBase::AsDeclared,
                copy_local: false,
            })
        );
        match &edges[1] {
            ReferenceEdge::Project(project) => {
                assert_eq!(project.name, "OtherUnit");
                assert_eq!(project.file_name, "OtherUnit.csproj");
            }
            other => panic!("expected project reference, got {:?}", other),
        }
    }

    #[test]
    fn test_excluded_unit_falls_back_to_binary_reference() {
        let units = vec![
            with_references(
                unit("Game", &["/proj/Assets/Game/Game.cs"]),
                &["/proj/Library/ScriptAssemblies/Vendor.dll"],
            ),
            unit("Vendor", &["/proj/Packages/Vendor/Vendor.cs"]),
        ];
        let graph = ProjectGraph::build(&units, "/proj/Assets", &GenerationOptions::default());
        let edges = &graph.node(0).references;

        assert_eq!(edges.len(), 1);
        match &edges[0] {
            ReferenceEdge::External(external) => {
                assert_eq!(external.name, "Vendor");
                assert!(!external.copy_local);
                if cfg!(unix) {
                    assert_eq!(external.path, "../../Library/ScriptAssemblies/Vendor.dll");
                    assert_eq!(external.base, PathBase::ProjectRoot);
                }
            }
            other => panic!("expected external reference, got {:?}", other),
        }
    }

    #[test]
    fn test_self_and_duplicate_references_are_dropped() {
        let units = vec![with_references(
            unit("Game", &["/proj/Assets/Game/Game.cs"]),
            &["Game.dll", "System.Xml.dll", "System.Xml"],
        )];
        let graph = ProjectGraph::build(&units, "/proj/Assets", &GenerationOptions::default());
        assert_eq!(graph.node(0).references.len(), 1);
    }
}
