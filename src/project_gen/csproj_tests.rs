use super::*;
use crate::project_gen::identity::project_guid;
use crate::project_gen::project_graph::ProjectGraph;
use crate::test_utils::{crlf, unit, unit_with_definition, with_references};

fn render(graph: &ProjectGraph<'_>, name: &str, options: &GenerationOptions) -> String {
    let context = ProjectContext { project_dir: "/proj", options };
    let mut out = String::new();
    render_project(graph.find(name).unwrap(), &context, &mut out);
    out
}

#[cfg(unix)]
#[test]
fn test_minimal_project_layout() {
    let mut game = unit_with_definition("Game", "/proj/Assets/Game/Game.asmdef", &["/proj/Assets/Game/Player.cs"]);
    game.root_namespace = "Game".to_string();
    game.compiler_options.language_version = "9.0".to_string();
    game.compiler_options.defines = vec!["UNITY_EDITOR".to_string(), "DEBUG".to_string()];
    let units = vec![game];
    let options = GenerationOptions::default();
    let graph = ProjectGraph::build(&units, "/proj/Assets", &options);

    let guid = project_guid("Game");
    let project_guid_line = format!("    <ProjectGuid>{}</ProjectGuid>", guid);
    let expected = crlf(&[
        r#"<?xml version="1.0" encoding="utf-8"?>"#,
        r#"<Project ToolsVersion="4.0" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">"#,
        "  <PropertyGroup>",
        "    <LangVersion>9.0</LangVersion>",
        "    <BaseIntermediateOutputPath>Temp/obj/$(Configuration)/$(MSBuildProjectName)</BaseIntermediateOutputPath>",
        "    <IntermediateOutputPath>$(BaseIntermediateOutputPath)</IntermediateOutputPath>",
        "  </PropertyGroup>",
        "  <PropertyGroup>",
        r#"    <Configuration Condition=" '$(Configuration)' == '' ">Debug</Configuration>"#,
        r#"    <Platform Condition=" '$(Platform)' == '' ">AnyCPU</Platform>"#,
        &project_guid_line,
        "    <OutputType>Library</OutputType>",
        "    <AssemblyName>Game</AssemblyName>",
        "    <RootNamespace>Game</RootNamespace>",
        "    <TargetFrameworkVersion>v4.7.1</TargetFrameworkVersion>",
        "    <FileAlignment>512</FileAlignment>",
        "    <AllowUnsafeBlocks>false</AllowUnsafeBlocks>",
        "  </PropertyGroup>",
        r#"  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">"#,
        "    <DebugSymbols>true</DebugSymbols>",
        "    <DebugType>full</DebugType>",
        "    <Optimize>false</Optimize>",
        "    <OutputPath>Temp/bin/Debug/</OutputPath>",
        "    <DefineConstants>UNITY_EDITOR;DEBUG</DefineConstants>",
        "    <ErrorReport>prompt</ErrorReport>",
        "    <WarningLevel>4</WarningLevel>",
        "  </PropertyGroup>",
        r#"  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Release|AnyCPU' ">"#,
        "    <DebugSymbols>true</DebugSymbols>",
        "    <DebugType>pdbonly</DebugType>",
        "    <Optimize>true</Optimize>",
        "    <OutputPath>Temp/bin/Release/</OutputPath>",
        "    <DefineConstants>UNITY_EDITOR;DEBUG</DefineConstants>",
        "    <ErrorReport>prompt</ErrorReport>",
        "    <WarningLevel>4</WarningLevel>",
        "  </PropertyGroup>",
        "  <ItemGroup>",
        r#"    <Compile Include="Assets/Game/**/*.cs" />"#,
        "  </ItemGroup>",
        r#"  <Import Project="$(MSBuildToolsPath)\Microsoft.CSharp.targets" />"#,
        "</Project>",
    ]);

    assert_eq!(render(&graph, "Game", &options), expected);
}

#[cfg(unix)]
#[test]
fn test_nested_project_gets_remove_entry() {
    let units = vec![
        unit_with_definition("Lib", "/proj/Assets/Lib/Lib.asmdef", &[]),
        unit_with_definition("Lib.Tests", "/proj/Assets/Lib/Tests/Lib.Tests.asmdef", &[]),
    ];
    let options = GenerationOptions::default();
    let graph = ProjectGraph::build(&units, "/proj/Assets", &options);

    let text = render(&graph, "Lib", &options);
    assert!(text.contains("    <Compile Include=\"Assets/Lib/**/*.cs\" />\r\n    <Compile Remove=\"Assets/Lib/Tests/**/*\" />\r\n"));

    let nested = render(&graph, "Lib.Tests", &options);
    assert!(!nested.contains("Compile Remove"));
}

#[cfg(unix)]
#[test]
fn test_reference_item_groups() {
    let units = vec![
        with_references(
            unit("Game", &["/proj/Assets/Game/Player.cs"]),
            &[
                "/proj/Assets/Plugins/Newtonsoft.Json.dll",
                "Core",
                "/opt/unity/Managed/UnityEngine.dll",
            ],
        ),
        unit("Core", &["/proj/Assets/Core/Core.cs"]),
    ];
    let options = GenerationOptions::default();
    let graph = ProjectGraph::build(&units, "/proj/Assets", &options);
    let text = render(&graph, "Game", &options);

    let expected_references = crlf(&[
        "  <ItemGroup>",
        r#"    <Reference Include="Newtonsoft.Json">"#,
        "      <HintPath>Assets/Plugins/Newtonsoft.Json.dll</HintPath>",
        "      <Private>False</Private>",
        "    </Reference>",
        r#"    <Reference Include="UnityEngine">"#,
        "      <HintPath>../opt/unity/Managed/UnityEngine.dll</HintPath>",
        "      <Private>False</Private>",
        "    </Reference>",
        "  </ItemGroup>",
    ]);
    let expected_projects = crlf(&[
        "  <ItemGroup>",
        r#"    <ProjectReference Include="Core.csproj">"#,
        &format!("      <Project>{}</Project>", project_guid("Core")),
        "      <Name>Core</Name>",
        "    </ProjectReference>",
        "  </ItemGroup>",
    ]);
    assert!(text.contains(&expected_references), "{}", text);
    assert!(text.contains(&expected_projects), "{}", text);
}

#[test]
fn test_analyzers_are_merged_without_duplicates() {
    let mut game = unit_with_definition("Game", "/proj/Assets/Game/Game.asmdef", &[]);
    game.compiler_options.analyzers = vec!["/a/Unit.dll".to_string(), "/a/Shared.dll".to_string()];
    let units = vec![game];
    let options = GenerationOptions {
        extra_analyzers: vec!["/a/Shared.dll".to_string(), "/a/Extra.dll".to_string()],
        ..GenerationOptions::default()
    };
    let graph = ProjectGraph::build(&units, "/proj/Assets", &options);
    let text = render(&graph, "Game", &options);

    let expected = crlf(&[
        "  <ItemGroup>",
        r#"    <Analyzer Include="/a/Unit.dll" />"#,
        r#"    <Analyzer Include="/a/Shared.dll" />"#,
        r#"    <Analyzer Include="/a/Extra.dll" />"#,
        "  </ItemGroup>",
    ]);
    assert!(text.contains(&expected), "{}", text);
}

#[test]
fn test_suppressed_capabilities_and_escaping() {
    let mut game = unit_with_definition("Game", "/proj/Assets/Game/Game.asmdef", &[]);
    game.compiler_options.allow_unsafe_code = true;
    game.compiler_options.defines = vec!["A&B".to_string()];
    let units = vec![game];
    let options = GenerationOptions {
        suppressed_capabilities: vec!["LaunchProfiles".to_string()],
        ..GenerationOptions::default()
    };
    let graph = ProjectGraph::build(&units, "/proj/Assets", &options);
    let text = render(&graph, "Game", &options);

    assert!(text.contains("<AllowUnsafeBlocks>true</AllowUnsafeBlocks>"));
    assert!(text.contains("<DefineConstants>A&amp;B</DefineConstants>"));
    assert!(text.contains("  <ItemGroup>\r\n    <ProjectCapability Remove=\"LaunchProfiles\" />\r\n  </ItemGroup>\r\n"));
    assert!(!text.contains("<Analyzer"));
    assert!(!text.contains("<Reference"));
}

#[test]
fn test_rendering_is_deterministic() {
    let units = vec![
        with_references(unit("Game", &["/proj/Assets/Game/A.cs"]), &["Core", "System.Data.dll"]),
        unit("Core", &["/proj/Assets/Core/C.cs"]),
    ];
    let options = GenerationOptions::default();
    let first = render(&ProjectGraph::build(&units, "/proj/Assets", &options), "Game", &options);
    let second = render(&ProjectGraph::build(&units, "/proj/Assets", &options), "Game", &options);
    assert_eq!(first, second);
}
