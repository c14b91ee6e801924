//! Assembly units as supplied by the host build system
//!
//! The host hands over a JSON manifest, an array of units in the order the
//! solution should list them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{GenError, GenResult, IoContext, JsonContext};
use super::path_utils::normalize;

/// Compiler settings copied verbatim into the project descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    /// C# language version, e.g. "9.0" or "latest"
    pub language_version: String,
    pub allow_unsafe_code: bool,
    /// Preprocessor defines
    pub defines: Vec<String>,
    /// Roslyn analyzer dll paths
    pub analyzers: Vec<String>,
}

/// One compilable grouping of source files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssemblyUnit {
    /// Assembly name without extension, unique within a manifest
    pub name: String,
    /// Path to the .asmdef file, if the unit has one
    pub definition_file: Option<String>,
    /// Absolute source file paths
    pub source_files: Vec<String>,
    /// Other assemblies or precompiled binaries this unit references
    pub references: Vec<String>,
    pub compiler_options: CompilerOptions,
    pub root_namespace: String,
}

impl AssemblyUnit {
    /// Normalize every path field in place
    pub fn normalize_paths(&mut self) {
        self.definition_file = self.definition_file.as_deref().map(normalize);
        for file in &mut self.source_files {
            *file = normalize(file);
        }
        for reference in &mut self.references {
            *reference = normalize(reference);
        }
        for analyzer in &mut self.compiler_options.analyzers {
            *analyzer = normalize(analyzer);
        }
    }
}

/// Parse a unit manifest from JSON text
pub fn parse_manifest(content: &str) -> GenResult<Vec<AssemblyUnit>> {
    let mut units: Vec<AssemblyUnit> =
        serde_json::from_str(content).with_json_context("Failed to parse unit manifest")?;

    for (index, unit) in units.iter_mut().enumerate() {
        if unit.name.trim().is_empty() {
            return Err(GenError::InvalidManifest {
                message: format!("unit at index {} has an empty name", index),
            });
        }
        unit.normalize_paths();
    }

    Ok(units)
}

/// Read and parse a unit manifest file
pub fn load_manifest(path: &Path) -> GenResult<Vec<AssemblyUnit>> {
    let content =
        std::fs::read_to_string(path).with_io_context("Failed to read unit manifest", path)?;
    parse_manifest(&content)
}
