use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, error, info};

use unity_project_gen::dir_changed::DirChanged;
use unity_project_gen::editor_discovery::EditorDiscovery;
use unity_project_gen::logging;
use unity_project_gen::project_gen::assembly_unit::load_manifest;
use unity_project_gen::project_gen::{GenerationOptions, GenerationReport, ProjectGenerator};
use unity_project_gen::unity_project::UnityProject;

// How often watch mode checks for manifest changes
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(500);
// Hosts often write the manifest in several steps, wait for them to finish
const WATCH_SETTLE_DELAY: Duration = Duration::from_millis(200);

#[derive(Parser)]
#[command(name = "unity_project_gen", version, about = "Generate Visual Studio solution and project files for a Unity project")]
struct Cli {
    /// Path to the Unity project root
    project_path: PathBuf,

    /// Write the log here instead of local app data
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug messages
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one generation pass
    Generate(GenerateArgs),
    /// Run a pass, then regenerate whenever the unit manifest changes
    Watch(GenerateArgs),
    /// List installed code editors
    Editors,
}

#[derive(Args)]
struct GenerateArgs {
    /// JSON manifest of assembly units
    #[arg(long)]
    units: PathBuf,

    /// JSON file with generation options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also generate projects for units outside Assets that have a definition file
    #[arg(long)]
    include_external: bool,
}

impl GenerateArgs {
    fn options(&self) -> Result<GenerationOptions> {
        let mut options = match &self.config {
            Some(path) => GenerationOptions::load(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => GenerationOptions::default(),
        };
        if self.include_external {
            options.include_external_units = true;
        }
        Ok(options)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = logging::init_logger(cli.log_file.clone(), level) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    info!("Unity project generator starting for {}", cli.project_path.display());

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let project = UnityProject::open(&cli.project_path)?;
    match project.detect_unity_version() {
        Some(version) => info!("Detected Unity version: {}", version),
        None => info!("Unity version not found in ProjectSettings"),
    }

    match cli.command {
        Command::Generate(args) => {
            let mut generator = ProjectGenerator::new(&project, args.options()?);
            let report = run_pass(&mut generator, &args.units)?;
            if !report.collected.failed.is_empty() {
                return Err(anyhow!(
                    "{} stale project files could not be deleted",
                    report.collected.failed.len()
                ));
            }
            Ok(())
        }
        Command::Watch(args) => watch(&project, &args).await,
        Command::Editors => {
            let mut discovery = EditorDiscovery::new();
            let installations = discovery.installations().await;
            if installations.is_empty() {
                println!("No editors found");
            }
            for installation in installations {
                println!("{}: {}", installation.kind.display_name(), installation.path.display());
            }
            Ok(())
        }
    }
}

fn run_pass(generator: &mut ProjectGenerator, units_path: &Path) -> Result<GenerationReport> {
    let units = load_manifest(units_path)
        .with_context(|| format!("Failed to load unit manifest {}", units_path.display()))?;
    let report = generator
        .generate_project_files(&units)
        .context("Project generation failed")?;

    for excluded in &report.excluded {
        println!("skipped {}: {}", excluded.name, excluded.reason);
    }
    for path in &report.collected.deleted {
        println!("deleted {}", path.display());
    }
    for (path, e) in &report.collected.failed {
        println!("could not delete {}: {}", path.display(), e);
    }
    println!(
        "{} projects, {} files written, {} unchanged -> {}",
        report.projects.len(),
        report.written.len(),
        report.unchanged.len(),
        generator.solution_path().display()
    );

    Ok(report)
}

async fn watch(project: &UnityProject, args: &GenerateArgs) -> Result<()> {
    let mut generator = ProjectGenerator::new(project, args.options()?);
    run_pass(&mut generator, &args.units)?;

    let units_path = std::path::absolute(&args.units).context("Failed to resolve manifest path")?;
    let directory = units_path
        .parent()
        .ok_or_else(|| anyhow!("Manifest path has no parent directory"))?;
    let file_name = units_path.file_name().and_then(|s| s.to_str());

    let dir_changed = DirChanged::new(directory, file_name).context("Failed to watch manifest directory")?;
    let mut last_run_timestamp = dir_changed.last_change_timestamp();
    info!("Watching {} for changes", units_path.display());

    let mut interval = tokio::time::interval(WATCH_POLL_INTERVAL);
    loop {
        interval.tick().await;

        if dir_changed.last_change_timestamp() <= last_run_timestamp {
            continue;
        }
        tokio::time::sleep(WATCH_SETTLE_DELAY).await;
        last_run_timestamp = dir_changed.last_change_timestamp();

        info!("Unit manifest changed, regenerating");
        // a bad manifest should not end the watch
        if let Err(e) = run_pass(&mut generator, &units_path) {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
        }
    }
}
