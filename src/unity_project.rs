//! Unity project layout and version detection.
//!
//! This module knows where a Unity project keeps its first-party sources and
//! where the generated solution belongs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::project_gen::error::{GenError, GenResult, IoContext};
use crate::project_gen::path_utils::normalize;

const ASSETS_DIR: &str = "Assets";
const DEFAULT_SOLUTION_NAME: &str = "UnityProject";

/// A Unity project on disk.
#[derive(Debug, Clone)]
pub struct UnityProject {
    root: PathBuf,
}

impl UnityProject {
    /// Creates a UnityProject for the specified project path without checking it.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Opens an existing project directory, resolving it to an absolute path.
    ///
    /// # Errors
    ///
    /// `GenError::InvalidProjectRoot` if the path is not a directory.
    pub fn open(root: &Path) -> GenResult<Self> {
        if !root.is_dir() {
            return Err(GenError::InvalidProjectRoot {
                path: root.to_path_buf(),
            });
        }
        let root = std::path::absolute(root).with_io_context("Failed to resolve project root", root)?;
        Ok(Self { root })
    }

    /// Returns the project path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    /// The primary source tree as a normalized path string
    pub fn source_tree(&self) -> String {
        normalize(&self.assets_dir().to_string_lossy())
    }

    /// Solution file stem, the name of the project folder
    pub fn solution_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_SOLUTION_NAME.to_string())
    }

    /// Detects the Unity editor version from `ProjectSettings/ProjectVersion.txt`.
    ///
    /// # Returns
    ///
    /// The version string (e.g., "6000.0.51f1"), or `None` if the file is
    /// missing or has no `m_EditorVersion` entry.
    pub fn detect_unity_version(&self) -> Option<String> {
        let version_file = self.root.join("ProjectSettings").join("ProjectVersion.txt");
        let content = fs::read_to_string(version_file).ok()?;
        content.lines().find_map(|line| {
            line.strip_prefix("m_EditorVersion:")
                .map(|version| version.trim().to_string())
                .filter(|version| !version.is_empty())
        })
    }
}
