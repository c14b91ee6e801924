//! Solution descriptor (.sln) rendering

use super::csproj::NEWLINE;
use super::options::GenerationOptions;
use super::project_graph::ProjectNode;

/// Extension of the generated solution descriptor
pub const SOLUTION_EXTENSION: &str = "sln";

const HEADER: [&str; 2] = ["Microsoft Visual Studio Solution File, Format Version 11.00", "# Visual Studio 2010"];
const CONFIGURATIONS: [&str; 2] = ["Debug|Any CPU", "Release|Any CPU"];

fn line(out: &mut String, indent: usize, text: &str) {
    for _ in 0..indent {
        out.push('\t');
    }
    out.push_str(text);
    out.push_str(NEWLINE);
}

/// Render a solution listing `nodes` in the given order
pub fn render_solution(nodes: &[ProjectNode<'_>], options: &GenerationOptions, out: &mut String) {
    for header in HEADER {
        line(out, 0, header);
    }

    for node in nodes {
        line(
            out,
            0,
            &format!(
                r#"Project("{}") = "{}", "{}", "{}""#,
                options.project_type_guid,
                node.name(),
                node.file_name,
                node.guid
            ),
        );
        line(out, 0, "EndProject");
    }

    line(out, 0, "Global");

    line(out, 1, "GlobalSection(SolutionConfigurationPlatforms) = preSolution");
    for configuration in CONFIGURATIONS {
        line(out, 2, &format!("{} = {}", configuration, configuration));
    }
    line(out, 1, "EndGlobalSection");

    line(out, 1, "GlobalSection(ProjectConfigurationPlatforms) = postSolution");
    for node in nodes {
        for configuration in CONFIGURATIONS {
            line(out, 2, &format!("{}.{}.ActiveCfg = {}", node.guid, configuration, configuration));
            line(out, 2, &format!("{}.{}.Build.0 = {}", node.guid, configuration, configuration));
        }
    }
    line(out, 1, "EndGlobalSection");

    line(out, 1, "GlobalSection(SolutionProperties) = preSolution");
    line(out, 2, "HideSolutionNode = FALSE");
    line(out, 1, "EndGlobalSection");

    line(out, 0, "EndGlobal");
}
