//! Generation options supplied once per invocation

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{GenResult, IoContext, JsonContext};
use super::path_utils::normalize;

/// Visual Studio project type GUID for C# projects
pub const CSHARP_PROJECT_TYPE_GUID: &str = "{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}";

const DEFAULT_TARGET_FRAMEWORK_VERSION: &str = "v4.7.1";
const DEFAULT_WARNING_LEVEL: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Generate projects for units outside `Assets` that have a definition file
    pub include_external_units: bool,
    /// Analyzers added to every project after the unit's own analyzers
    pub extra_analyzers: Vec<String>,
    /// Project type GUID written into the solution
    pub project_type_guid: String,
    /// Project capabilities removed from every project
    pub suppressed_capabilities: Vec<String>,
    pub target_framework_version: String,
    pub warning_level: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_external_units: false,
            extra_analyzers: Vec::new(),
            project_type_guid: CSHARP_PROJECT_TYPE_GUID.to_string(),
            suppressed_capabilities: Vec::new(),
            target_framework_version: DEFAULT_TARGET_FRAMEWORK_VERSION.to_string(),
            warning_level: DEFAULT_WARNING_LEVEL,
        }
    }
}

impl GenerationOptions {
    /// Parse options from JSON, missing fields take their defaults
    pub fn from_json(content: &str) -> GenResult<Self> {
        let mut options: GenerationOptions =
            serde_json::from_str(content).with_json_context("Failed to parse generation options")?;
        for analyzer in &mut options.extra_analyzers {
            *analyzer = normalize(analyzer);
        }
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn load(path: &Path) -> GenResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_io_context("Failed to read generation options", path)?;
        Self::from_json(&content)
    }
}
