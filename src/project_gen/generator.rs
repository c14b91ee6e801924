//! Project generation engine
//!
//! One pass builds the graph, renders every descriptor in memory, and only
//! then touches the disk. Stale descriptors are collected only after every
//! write succeeded, so a failed pass leaves the previous file set in place.

use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info};

use super::assembly_unit::AssemblyUnit;
use super::csproj::{ProjectContext, render_project};
use super::error::GenResult;
use super::file_writer::{FileWriter, WriteOutcome};
use super::garbage_collector::{GarbageCollection, collect_garbage};
use super::options::GenerationOptions;
use super::path_utils::normalize;
use super::project_graph::{ExcludedUnit, PROJECT_EXTENSION, ProjectGraph};
use super::sln::{SOLUTION_EXTENSION, render_solution};
use crate::unity_project::UnityProject;

/// What one generation pass did
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Generated projects in solution order
    pub projects: Vec<String>,
    pub excluded: Vec<ExcludedUnit>,
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub collected: GarbageCollection,
}

struct Document {
    path: PathBuf,
    content: String,
}

/// Generates the solution and project descriptors of one Unity project.
///
/// Holds no state between passes beyond its configuration and reusable buffers,
/// so independent generators never observe each other.
#[derive(Debug)]
pub struct ProjectGenerator {
    output_dir: PathBuf,
    source_tree: String,
    solution_name: String,
    options: GenerationOptions,
    writer: FileWriter,
}

impl ProjectGenerator {
    pub fn new(project: &UnityProject, options: GenerationOptions) -> Self {
        Self {
            output_dir: project.root().to_path_buf(),
            source_tree: project.source_tree(),
            solution_name: project.solution_name(),
            options,
            writer: FileWriter::new(),
        }
    }

    pub fn solution_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.{}", self.solution_name, SOLUTION_EXTENSION))
    }

    /// Regenerate every descriptor for `units` and delete descriptors no longer produced
    pub fn generate_project_files(&mut self, units: &[AssemblyUnit]) -> GenResult<GenerationReport> {
        let start_time = Instant::now();

        let graph = ProjectGraph::build(units, &self.source_tree, &self.options);
        let documents = self.render(&graph);

        let mut report = GenerationReport {
            projects: graph.nodes().iter().map(|node| node.name().to_string()).collect(),
            excluded: graph.excluded().to_vec(),
            ..GenerationReport::default()
        };

        let mut keep = Vec::with_capacity(documents.len());
        for document in documents {
            match self.writer.write_if_changed(&document.path, document.content.as_bytes())? {
                WriteOutcome::Written => {
                    debug!("Wrote {}", document.path.display());
                    report.written.push(document.path.clone());
                }
                WriteOutcome::Unchanged => {
                    debug!("Unchanged {}", document.path.display());
                    report.unchanged.push(document.path.clone());
                }
            }
            keep.push(document.path);
        }

        report.collected = collect_garbage(&self.output_dir, &[PROJECT_EXTENSION, SOLUTION_EXTENSION], &keep)?;

        info!(
            "Project generation completed in {:.2}ms ({} projects, {} excluded, {} written, {} unchanged, {} deleted)",
            start_time.elapsed().as_secs_f64() * 1000.0,
            report.projects.len(),
            report.excluded.len(),
            report.written.len(),
            report.unchanged.len(),
            report.collected.deleted.len()
        );

        Ok(report)
    }

    fn render(&self, graph: &ProjectGraph<'_>) -> Vec<Document> {
        let project_dir = normalize(&self.output_dir.to_string_lossy());
        let context = ProjectContext {
            project_dir: &project_dir,
            options: &self.options,
        };

        let mut documents = Vec::with_capacity(graph.nodes().len() + 1);
        for node in graph.nodes() {
            let mut content = String::new();
            render_project(node, &context, &mut content);
            documents.push(Document {
                path: self.output_dir.join(&node.file_name),
                content,
            });
        }

        let mut content = String::new();
        render_solution(graph.nodes(), &self.options, &mut content);
        documents.push(Document {
            path: self.solution_path(),
            content,
        });

        documents
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
