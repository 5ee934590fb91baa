use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use watchy_dev::boundary::BoundaryWarning;
use watchy_dev::cli::{self, Project, ReleaseWorkflowArgs};
use watchy_dev::domain::BumpKind;
use watchy_dev::git::{Git2Repository, Vcs};
use watchy_dev::release::PlanFailure;
use watchy_dev::toolchain::{BuildTool, FIRMWARE_ARTIFACT};
use watchy_dev::{scaffold, simulator, ui};

/// Environment variable holding the tracing filter, e.g. `WATCHY_DEV_LOG=debug`
const LOG_ENV: &str = "WATCHY_DEV_LOG";

#[derive(clap::Parser)]
#[command(
    name = "watchy-dev",
    version,
    about = "Development helper for Watchy watch-face firmware"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Project root (defaults to the current directory)")]
    root: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Show debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current version and uncommitted changes
    Status,

    /// Bump the version in VERSION.md and README.md
    Bump {
        #[arg(default_value = "patch", help = "major, minor or patch")]
        kind: BumpKind,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },

    /// Bump the version, then commit and tag the release
    Release {
        #[arg(default_value = "patch", help = "major, minor or patch")]
        kind: BumpKind,

        #[arg(help = "Extra text for the release commit message")]
        message: Option<String>,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,

        #[arg(short, long, help = "Skip confirmation prompts")]
        yes: bool,
    },

    /// Open the browser simulator
    Simulator,

    /// Run the firmware test suite
    Test,

    /// Compile the firmware
    Compile,

    /// List example watch faces
    Examples,

    /// Create a new watch face from the template
    New { name: String },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let Some(command) = args.command else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    debug!(root = %root.display(), "project root");

    // Load configuration
    let project = match Project::load(&root, args.config.as_deref()) {
        Ok(project) => project,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    match command {
        Commands::Status => status(&project),
        Commands::Bump { kind, dry_run } => bump(&project, kind, dry_run),
        Commands::Release {
            kind,
            message,
            dry_run,
            yes,
        } => release(&project, kind, message, dry_run, yes),
        Commands::Simulator => open_simulator(&project),
        Commands::Test => run_tool(&project, ToolCommand::Test),
        Commands::Compile => run_tool(&project, ToolCommand::Compile),
        Commands::Examples => list_examples(&project),
        Commands::New { name } => new_watchface(&project, &name),
    }
}

/// Open the repository at `root`, turning failure into a warning
fn open_repository(root: &Path) -> Option<Git2Repository> {
    match Git2Repository::open(root) {
        Ok(repo) => Some(repo),
        Err(e) => {
            ui::display_boundary_warning(&BoundaryWarning::VcsUnavailable {
                reason: e.to_string(),
            });
            None
        }
    }
}

fn status(project: &Project) -> Result<()> {
    let repo = open_repository(&project.paths.root);
    let summary = match cli::run_status(project, repo.as_ref().map(|r| r as &dyn Vcs)) {
        Ok(summary) => summary,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    for warning in &summary.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_status_report(&summary.root, &summary.report, &summary.changed_files);
    Ok(())
}

fn bump(project: &Project, kind: BumpKind, dry_run: bool) -> Result<()> {
    let args = ReleaseWorkflowArgs {
        kind,
        message: None,
        record_in_vcs: false,
        dry_run,
    };

    let result = match cli::run_release_workflow(project, &args, None) {
        Ok(result) => result,
        Err(e) => exit_with_workflow_error(e),
    };

    for warning in &result.prepared.warnings {
        ui::display_boundary_warning(warning);
    }
    let record = &result.prepared.outcome.record;
    ui::display_version_change(record);

    if result.executed {
        ui::display_success(&format!("Version bumped to {}", record.new));
    } else {
        ui::display_plan(&result.prepared.plan);
    }
    Ok(())
}

fn release(
    project: &Project,
    kind: BumpKind,
    message: Option<String>,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let args = ReleaseWorkflowArgs {
        kind,
        message,
        record_in_vcs: true,
        dry_run,
    };

    // Compute everything first so the user confirms exactly what will run
    let prepared = match cli::prepare_release(project, &args) {
        Ok(prepared) => prepared,
        Err(e) => exit_with_workflow_error(e),
    };

    for warning in &prepared.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_version_change(&prepared.outcome.record);

    if dry_run {
        ui::display_plan(&prepared.plan);
        return Ok(());
    }

    let repo = match Git2Repository::open(&project.paths.root) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    if !yes
        && !ui::confirm_action(&format!(
            "Create release {}?",
            prepared.outcome.record.tag_name
        ))?
    {
        println!("Release cancelled by user.");
        return Ok(());
    }

    ui::display_status(&format!(
        "Creating release {}",
        prepared.outcome.record.tag_name
    ));
    if let Err(failure) = prepared.plan.execute(Some(&repo as &dyn Vcs)) {
        ui::display_plan_failure(&failure);
        std::process::exit(1);
    }

    ui::display_release_summary(&prepared.outcome.record);
    Ok(())
}

fn exit_with_workflow_error(err: anyhow::Error) -> ! {
    match err.downcast_ref::<PlanFailure>() {
        Some(failure) => ui::display_plan_failure(failure),
        None => ui::display_error(&format!("{:#}", err)),
    }
    std::process::exit(1);
}

fn open_simulator(project: &Project) -> Result<()> {
    match simulator::open_simulator(&project.paths.simulator) {
        Ok(url) => {
            ui::display_success(&format!("Simulator opened: {}", url));
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

enum ToolCommand {
    Test,
    Compile,
}

fn run_tool(project: &Project, command: ToolCommand) -> Result<()> {
    let tool = BuildTool::new(
        project.config.toolchain.build_program.clone(),
        &project.paths.root,
    );

    let result = match command {
        ToolCommand::Test => {
            ui::display_status(&format!("Running tests with {}...", tool.program()));
            tool.run_tests()
        }
        ToolCommand::Compile => {
            ui::display_status(&format!("Compiling firmware with {}...", tool.program()));
            tool.compile()
        }
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    print!("{}", output.stdout);
    match command {
        ToolCommand::Test => ui::display_success("All tests passed"),
        ToolCommand::Compile => {
            ui::display_success("Compilation succeeded");
            println!(
                "  Firmware: {}",
                project.paths.root.join(FIRMWARE_ARTIFACT).display()
            );
        }
    }
    Ok(())
}

fn list_examples(project: &Project) -> Result<()> {
    match scaffold::list_examples(&project.paths.examples_dir) {
        Ok(names) => {
            ui::display_examples(&names);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!(
                "Failed to read {}: {}",
                project.paths.examples_dir.display(),
                e
            ));
            std::process::exit(1);
        }
    }
}

fn new_watchface(project: &Project, name: &str) -> Result<()> {
    match scaffold::create_watchface(&project.paths.examples_dir, name) {
        Ok(path) => {
            ui::display_success(&format!("Watch face created: {}", path.display()));
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
