//! Visual Studio project generation
//!
//! This module turns the assembly units of a Unity project into one solution
//! file and one project file per assembly, so any C# IDE can open the project.
//!
//! A pass runs leaf-first:
//! 1. `project_graph` places each unit under a root folder and assigns it a GUID
//! 2. `references` and `nesting` annotate the nodes
//! 3. `csproj` and `sln` render the descriptors in memory
//! 4. `file_writer` writes only what changed, `garbage_collector` removes the rest

pub mod assembly_unit;
pub mod csproj;
pub mod error;
pub mod file_writer;
pub mod garbage_collector;
pub mod generator;
pub mod identity;
pub mod nesting;
pub mod options;
pub mod path_utils;
pub mod project_graph;
pub mod references;
pub mod sln;

pub use assembly_unit::{AssemblyUnit, CompilerOptions};
pub use error::{GenError, GenResult};
pub use generator::{GenerationReport, ProjectGenerator};
pub use options::GenerationOptions;
