//! Project descriptor (.csproj) rendering
//!
//! Output must be byte-stable across runs: no timestamps, no hash-map
//! iteration, every list in declaration order.

use std::borrow::Cow;
use std::path::Path;

use quick_xml::escape::escape;

use super::options::GenerationOptions;
use super::path_utils::{SEPARATOR, lexical_join, relative_path};
use super::project_graph::ProjectNode;
use super::references::{ExternalReference, PathBase, ReferenceEdge};

/// Line ending used by both descriptor formats
pub const NEWLINE: &str = "\r\n";

const SOURCE_GLOB: &str = "**/*.cs";
const INTERMEDIATE_OUTPUT_PATH: &str = "Temp/obj/$(Configuration)/$(MSBuildProjectName)";
const OUTPUT_PATH: &str = "Temp/bin";

/// Where descriptors live and how they are configured
#[derive(Debug, Clone, Copy)]
pub struct ProjectContext<'a> {
    /// Directory the descriptors are written to
    pub project_dir: &'a str,
    pub options: &'a GenerationOptions,
}

struct Configuration {
    name: &'static str,
    debug_type: &'static str,
    optimize: bool,
}

const CONFIGURATIONS: [Configuration; 2] = [
    Configuration { name: "Debug", debug_type: "full", optimize: false },
    Configuration { name: "Release", debug_type: "pdbonly", optimize: true },
];

fn line(out: &mut String, indent: usize, text: &str) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push_str(NEWLINE);
}

fn xml_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Node root expressed from the descriptor directory, absolute when that is impossible
fn descriptor_relative_root<'n>(node: &'n ProjectNode<'_>, context: &ProjectContext<'_>) -> Cow<'n, str> {
    match relative_path(context.project_dir, &node.root_folder) {
        Some(relative) => Cow::Owned(relative),
        None => Cow::Borrowed(node.root_folder.as_str()),
    }
}

fn under_root(root: &str, relative: &str) -> String {
    if root.is_empty() {
        relative.to_string()
    } else {
        format!("{}{}{}", root, SEPARATOR, relative)
    }
}

fn hint_path(root: &str, reference: &ExternalReference) -> String {
    match reference.base {
        PathBase::AsDeclared => reference.path.clone(),
        PathBase::ProjectRoot if Path::new(root).is_absolute() => under_root(root, &reference.path),
        PathBase::ProjectRoot => lexical_join(root, &reference.path),
    }
}

/// Unit analyzers followed by the extra analyzers, first occurrence wins
fn analyzers<'n>(node: &'n ProjectNode<'_>, options: &'n GenerationOptions) -> Vec<&'n str> {
    let mut result: Vec<&str> = Vec::new();
    let all = node.unit.compiler_options.analyzers.iter().chain(options.extra_analyzers.iter());
    for analyzer in all {
        if !result.contains(&analyzer.as_str()) {
            result.push(analyzer);
        }
    }
    result
}

/// Render the descriptor of `node` into `out`
pub fn render_project(node: &ProjectNode<'_>, context: &ProjectContext<'_>, out: &mut String) {
    let unit = node.unit;
    let options = context.options;
    let compiler = &unit.compiler_options;
    let root = descriptor_relative_root(node, context);

    line(out, 0, r#"<?xml version="1.0" encoding="utf-8"?>"#);
    line(
        out,
        0,
        r#"<Project ToolsVersion="4.0" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">"#,
    );

    line(out, 1, "<PropertyGroup>");
    line(out, 2, &format!("<LangVersion>{}</LangVersion>", escape(compiler.language_version.as_str())));
    line(out, 2, &format!("<BaseIntermediateOutputPath>{}</BaseIntermediateOutputPath>", INTERMEDIATE_OUTPUT_PATH));
    line(out, 2, "<IntermediateOutputPath>$(BaseIntermediateOutputPath)</IntermediateOutputPath>");
    line(out, 1, "</PropertyGroup>");

    line(out, 1, "<PropertyGroup>");
    line(out, 2, r#"<Configuration Condition=" '$(Configuration)' == '' ">Debug</Configuration>"#);
    line(out, 2, r#"<Platform Condition=" '$(Platform)' == '' ">AnyCPU</Platform>"#);
    line(out, 2, &format!("<ProjectGuid>{}</ProjectGuid>", node.guid));
    line(out, 2, "<OutputType>Library</OutputType>");
    line(out, 2, &format!("<AssemblyName>{}</AssemblyName>", escape(unit.name.as_str())));
    line(out, 2, &format!("<RootNamespace>{}</RootNamespace>", escape(unit.root_namespace.as_str())));
    line(
        out,
        2,
        &format!("<TargetFrameworkVersion>{}</TargetFrameworkVersion>", escape(options.target_framework_version.as_str())),
    );
    line(out, 2, "<FileAlignment>512</FileAlignment>");
    line(out, 2, &format!("<AllowUnsafeBlocks>{}</AllowUnsafeBlocks>", xml_bool(compiler.allow_unsafe_code)));
    line(out, 1, "</PropertyGroup>");

    let defines = compiler.defines.join(";");
    for configuration in &CONFIGURATIONS {
        line(
            out,
            1,
            &format!(
                r#"<PropertyGroup Condition=" '$(Configuration)|$(Platform)' == '{}|AnyCPU' ">"#,
                configuration.name
            ),
        );
        line(out, 2, "<DebugSymbols>true</DebugSymbols>");
        line(out, 2, &format!("<DebugType>{}</DebugType>", configuration.debug_type));
        line(out, 2, &format!("<Optimize>{}</Optimize>", xml_bool(configuration.optimize)));
        line(out, 2, &format!("<OutputPath>{}/{}/</OutputPath>", OUTPUT_PATH, configuration.name));
        line(out, 2, &format!("<DefineConstants>{}</DefineConstants>", escape(defines.as_str())));
        line(out, 2, "<ErrorReport>prompt</ErrorReport>");
        line(out, 2, &format!("<WarningLevel>{}</WarningLevel>", options.warning_level));
        line(out, 1, "</PropertyGroup>");
    }

    let analyzers = analyzers(node, options);
    if !analyzers.is_empty() {
        line(out, 1, "<ItemGroup>");
        for analyzer in analyzers {
            line(out, 2, &format!(r#"<Analyzer Include="{}" />"#, escape(analyzer)));
        }
        line(out, 1, "</ItemGroup>");
    }

    line(out, 1, "<ItemGroup>");
    line(out, 2, &format!(r#"<Compile Include="{}" />"#, escape(under_root(&root, SOURCE_GLOB).as_str())));
    for exclusion in &node.exclusions {
        line(out, 2, &format!(r#"<Compile Remove="{}" />"#, escape(under_root(&root, exclusion).as_str())));
    }
    line(out, 1, "</ItemGroup>");

    let externals: Vec<&ExternalReference> = node
        .references
        .iter()
        .filter_map(|edge| match edge {
            ReferenceEdge::External(external) => Some(external),
            ReferenceEdge::Project(_) => None,
        })
        .collect();
    if !externals.is_empty() {
        line(out, 1, "<ItemGroup>");
        for external in externals {
            line(out, 2, &format!(r#"<Reference Include="{}">"#, escape(external.name.as_str())));
            line(out, 3, &format!("<HintPath>{}</HintPath>", escape(hint_path(&root, external).as_str())));
            line(out, 3, &format!("<Private>{}</Private>", if external.copy_local { "True" } else { "False" }));
            line(out, 2, "</Reference>");
        }
        line(out, 1, "</ItemGroup>");
    }

    let mut projects = node
        .references
        .iter()
        .filter_map(|edge| match edge {
            ReferenceEdge::Project(project) => Some(project),
            ReferenceEdge::External(_) => None,
        })
        .peekable();
    if projects.peek().is_some() {
        line(out, 1, "<ItemGroup>");
        for project in projects {
            // descriptors share one directory, so the file name is the relative path
            line(out, 2, &format!(r#"<ProjectReference Include="{}">"#, escape(project.file_name.as_str())));
            line(out, 3, &format!("<Project>{}</Project>", project.guid));
            line(out, 3, &format!("<Name>{}</Name>", escape(project.name.as_str())));
            line(out, 2, "</ProjectReference>");
        }
        line(out, 1, "</ItemGroup>");
    }

    if !options.suppressed_capabilities.is_empty() {
        line(out, 1, "<ItemGroup>");
        for capability in &options.suppressed_capabilities {
            line(out, 2, &format!(r#"<ProjectCapability Remove="{}" />"#, escape(capability.as_str())));
        }
        line(out, 1, "</ItemGroup>");
    }

    line(out, 1, r#"<Import Project="$(MSBuildToolsPath)\Microsoft.CSharp.targets" />"#);
    out.push_str("</Project>");
    out.push_str(NEWLINE);
}

#[cfg(test)]
#[path = "csproj_tests.rs"]
mod tests;
