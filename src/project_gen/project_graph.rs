//! Project graph construction
//!
//! Turns the ordered unit list into project nodes. Each node gets a root
//! source folder, a GUID and a descriptor file name. Units that cannot be
//! placed are recorded as exclusions and contribute nothing else to the pass.

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

use super::assembly_unit::AssemblyUnit;
use super::identity::project_guid;
use super::nesting::nesting_exclusions;
use super::options::GenerationOptions;
use super::path_utils::{common_ancestor, infer_common_root, is_nested, parent_folder};
use super::references::{ReferenceEdge, resolve_references};

/// Extension of generated project descriptors
pub const PROJECT_EXTENSION: &str = "csproj";

/// Why a unit did not become a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludeReason {
    /// No definition file and no source files to infer a root from
    NoSourceFiles,
    /// Source files share no common folder
    NoSourceRoot,
    /// Root lies outside the source tree and external units are not included
    OutsideSourceTree,
    /// An earlier unit already claimed the name
    DuplicateName,
}

impl fmt::Display for ExcludeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExcludeReason::NoSourceFiles => "no definition file and no source files",
            ExcludeReason::NoSourceRoot => "source files have no common root folder",
            ExcludeReason::OutsideSourceTree => "root folder is outside the source tree",
            ExcludeReason::DuplicateName => "duplicate assembly name",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedUnit {
    pub name: String,
    pub reason: ExcludeReason,
}

/// A unit that made it into the graph
#[derive(Debug, Clone)]
pub struct ProjectNode<'a> {
    pub unit: &'a AssemblyUnit,
    /// Absolute root source folder, resolved once
    pub root_folder: String,
    pub guid: String,
    /// Descriptor file name, e.g. `Game.Runtime.csproj`
    pub file_name: String,
    /// Root folder lies outside the source tree
    pub is_external: bool,
    pub references: Vec<ReferenceEdge>,
    /// Globs relative to `root_folder` for nested projects
    pub exclusions: Vec<String>,
}

impl ProjectNode<'_> {
    pub fn name(&self) -> &str {
        &self.unit.name
    }
}

/// All projects of one generation pass, in input order
#[derive(Debug, Default)]
pub struct ProjectGraph<'a> {
    nodes: Vec<ProjectNode<'a>>,
    by_name: HashMap<&'a str, usize>,
    excluded: Vec<ExcludedUnit>,
}

impl<'a> ProjectGraph<'a> {
    /// Build the graph and annotate every node with references and nesting exclusions
    pub fn build(units: &'a [AssemblyUnit], source_tree: &str, options: &GenerationOptions) -> Self {
        let mut graph = ProjectGraph::default();

        for unit in units {
            if graph.by_name.contains_key(unit.name.as_str()) {
                graph.exclude(unit, ExcludeReason::DuplicateName);
                continue;
            }

            match resolve_root(unit, source_tree, options) {
                Ok((root_folder, is_external)) => {
                    debug!("Project {} rooted at {}", unit.name, root_folder);
                    graph.by_name.insert(unit.name.as_str(), graph.nodes.len());
                    graph.nodes.push(ProjectNode {
                        unit,
                        root_folder,
                        guid: project_guid(&unit.name),
                        file_name: format!("{}.{}", unit.name, PROJECT_EXTENSION),
                        is_external,
                        references: Vec::new(),
                        exclusions: Vec::new(),
                    });
                }
                Err(reason) => graph.exclude(unit, reason),
            }
        }

        graph.annotate();
        graph
    }

    fn exclude(&mut self, unit: &AssemblyUnit, reason: ExcludeReason) {
        warn!("Skipping assembly {}: {}", unit.name, reason);
        self.excluded.push(ExcludedUnit {
            name: unit.name.clone(),
            reason,
        });
    }

    fn annotate(&mut self) {
        let references: Vec<_> = (0..self.nodes.len())
            .map(|index| resolve_references(self, index))
            .collect();
        let exclusions: Vec<_> = (0..self.nodes.len())
            .map(|index| nesting_exclusions(self, index))
            .collect();

        for ((node, references), exclusions) in self.nodes.iter_mut().zip(references).zip(exclusions) {
            node.references = references;
            node.exclusions = exclusions;
        }
    }

    pub fn nodes(&self) -> &[ProjectNode<'a>] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &ProjectNode<'a> {
        &self.nodes[index]
    }

    /// Look up a project by exact assembly name
    pub fn find(&self, name: &str) -> Option<&ProjectNode<'a>> {
        self.by_name.get(name).map(|&index| &self.nodes[index])
    }

    pub fn excluded(&self) -> &[ExcludedUnit] {
        &self.excluded
    }
}

/// Root folder of a unit and whether it lies outside the source tree
fn resolve_root(
    unit: &AssemblyUnit,
    source_tree: &str,
    options: &GenerationOptions,
) -> Result<(String, bool), ExcludeReason> {
    let Some(definition_file) = unit.definition_file.as_deref() else {
        if unit.source_files.is_empty() {
            return Err(ExcludeReason::NoSourceFiles);
        }
        if let Some(root) = infer_common_root(&unit.source_files, source_tree) {
            return Ok((root, false));
        }
        // only a definition file can place a unit outside the source tree
        return Err(match common_ancestor(&unit.source_files) {
            Some(_) => ExcludeReason::OutsideSourceTree,
            None => ExcludeReason::NoSourceRoot,
        });
    };

    let root = parent_folder(definition_file);
    if root.is_empty() {
        return Err(ExcludeReason::NoSourceRoot);
    }
    if is_nested(source_tree, root) {
        return Ok((root.to_string(), false));
    }
    if options.include_external_units {
        return Ok((root.to_string(), true));
    }
    Err(ExcludeReason::OutsideSourceTree)
}
