//! Test utilities shared across the codebase

use std::fs;
use std::path::{Path, PathBuf};

use crate::project_gen::assembly_unit::AssemblyUnit;
use crate::project_gen::path_utils::normalize;

/// Unit without a definition file, root inferred from `files`
pub fn unit(name: &str, files: &[&str]) -> AssemblyUnit {
    let mut unit = AssemblyUnit {
        name: name.to_string(),
        source_files: files.iter().map(|f| f.to_string()).collect(),
        root_namespace: name.to_string(),
        ..AssemblyUnit::default()
    };
    unit.compiler_options.language_version = "9.0".to_string();
    unit.normalize_paths();
    unit
}

/// Unit with an explicit .asmdef path
pub fn unit_with_definition(name: &str, definition_file: &str, files: &[&str]) -> AssemblyUnit {
    let mut unit = unit(name, files);
    unit.definition_file = Some(normalize(definition_file));
    unit
}

pub fn with_references(mut unit: AssemblyUnit, references: &[&str]) -> AssemblyUnit {
    unit.references = references.iter().map(|r| normalize(r)).collect();
    unit
}

/// Join lines with CRLF, including a trailing one
pub fn crlf(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{}\r\n", line)).collect()
}

/// Create an empty Unity project layout under `parent` and return its root
pub fn create_unity_project(parent: &Path, name: &str) -> PathBuf {
    let root = parent.join(name);
    fs::create_dir_all(root.join("Assets")).expect("Failed to create Assets directory");
    root
}

/// Absolute normalized path of `relative` inside `root`
pub fn source_path(root: &Path, relative: &str) -> String {
    normalize(&root.join(relative).to_string_lossy())
}
