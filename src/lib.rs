//! Unity Project Generator Library
//! 
//! This library generates Visual Studio solution and project files for Unity
//! projects from the assembly units reported by the Unity build pipeline.

pub mod project_gen;
pub mod unity_project;
pub mod dir_changed;
pub mod editor_discovery;
pub mod logging;
#[cfg(test)]
pub mod test_utils;
