//! Workflow orchestration behind the CLI subcommands
//!
//! Reads the project documents, runs the pure release computations, and
//! executes the resulting plan. Keeps argument parsing and printing in main.rs
//! and the version rules in `release`, so workflows can be driven
//! programmatically without clap.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::config::{self, Config, ProjectPaths};
use crate::domain::{BumpKind, Changelog};
use crate::git::Vcs;
use crate::release::{self, ReleaseOutcome, ReleasePlan, ReleaseSettings, StatusReport};

/// Configuration plus resolved paths for one project root
#[derive(Debug, Clone)]
pub struct Project {
    pub config: Config,
    pub paths: ProjectPaths,
}

impl Project {
    /// Load the configuration for `root` (see [config::load_config]) and resolve
    /// every project path against it.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = config::load_config(config_path, root).context("Error loading config")?;
        let paths = config.resolve(root);
        Ok(Project { config, paths })
    }
}

/// Current contents of both version documents
#[derive(Debug, Clone, PartialEq)]
pub struct Documents {
    pub changelog: String,
    /// `None` when the secondary document does not exist
    pub secondary: Option<String>,
    pub warnings: Vec<BoundaryWarning>,
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Read the changelog and secondary document. A missing changelog reads as
/// empty; a missing secondary document reads as `None`. Both produce warnings
/// rather than errors.
pub fn read_documents(project: &Project) -> Result<Documents> {
    let paths = &project.paths;
    let mut warnings = Vec::new();

    let changelog = read_optional(&paths.changelog)?.unwrap_or_default();
    if Changelog::parse(&changelog).latest_version().is_none() {
        warnings.push(BoundaryWarning::NoVersionHistory {
            changelog: paths.changelog.clone(),
        });
    }

    let secondary = read_optional(&paths.readme)?;
    match &secondary {
        None => warnings.push(BoundaryWarning::SecondaryMissing {
            path: paths.readme.clone(),
        }),
        Some(text) => {
            let labels = project.config.labels.field_labels();
            for field in release::missing_labels(text, &labels) {
                warnings.push(BoundaryWarning::LabelMissing {
                    path: paths.readme.clone(),
                    field,
                    label: labels.label(field).to_string(),
                });
            }
        }
    }

    Ok(Documents {
        changelog,
        secondary,
        warnings,
    })
}

/// Arguments for the bump and release workflows
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    pub kind: BumpKind,

    /// Appended to the release commit message
    pub message: Option<String>,

    /// Stage, commit and tag after writing the documents
    pub record_in_vcs: bool,

    /// Preview mode - compute the plan but do not run it
    pub dry_run: bool,
}

/// A computed release ready to run
#[derive(Debug, Clone)]
pub struct PreparedRelease {
    pub outcome: ReleaseOutcome,
    pub plan: ReleasePlan,
    pub warnings: Vec<BoundaryWarning>,
}

/// Read the documents and compute the release and its plan. Nothing is
/// written.
pub fn prepare_release(project: &Project, args: &ReleaseWorkflowArgs) -> Result<PreparedRelease> {
    let documents = read_documents(project)?;
    let settings = ReleaseSettings::from_config(&project.config)?;

    let outcome = release::create_release(
        &documents.changelog,
        documents.secondary.as_deref(),
        args.kind,
        args.message.as_deref(),
        &settings,
    )?;
    let plan = ReleasePlan::new(&project.paths, &outcome, args.record_in_vcs);
    debug!(steps = plan.steps().len(), "prepared release plan");

    Ok(PreparedRelease {
        outcome,
        plan,
        warnings: documents.warnings,
    })
}

/// Result of a bump or release workflow
#[derive(Debug, Clone)]
pub struct WorkflowResult {
    pub prepared: PreparedRelease,

    /// Whether the plan was executed (false for dry runs)
    pub executed: bool,
}

/// Bump or release workflow
///
/// 1. Read changelog and secondary document
/// 2. Compute the new version, both mutated documents, commit message and tag
/// 3. Build the ordered plan of writes and version-control calls
/// 4. Unless this is a dry run, execute the plan
///
/// A failing step surfaces as a [release::PlanFailure] inside the returned
/// error; steps that completed before it are not undone.
pub fn run_release_workflow(
    project: &Project,
    args: &ReleaseWorkflowArgs,
    vcs: Option<&dyn Vcs>,
) -> Result<WorkflowResult> {
    let prepared = prepare_release(project, args)?;

    if !args.dry_run {
        prepared.plan.execute(vcs)?;
    }

    Ok(WorkflowResult {
        prepared,
        executed: !args.dry_run,
    })
}

/// Everything the `status` command shows
#[derive(Debug, Clone)]
pub struct StatusSummary {
    pub root: PathBuf,
    pub report: StatusReport,
    pub changed_files: Vec<String>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Current version plus the working-tree state, if version control is
/// available.
pub fn run_status(project: &Project, vcs: Option<&dyn Vcs>) -> Result<StatusSummary> {
    let documents = read_documents(project)?;
    let mut warnings: Vec<BoundaryWarning> = documents
        .warnings
        .into_iter()
        .filter(|w| matches!(w, BoundaryWarning::NoVersionHistory { .. }))
        .collect();

    let changed_files = match vcs.map(|vcs| vcs.changed_files()) {
        Some(Ok(files)) => Some(files),
        Some(Err(e)) => {
            warnings.push(BoundaryWarning::VcsUnavailable {
                reason: e.to_string(),
            });
            None
        }
        None => None,
    };

    let report = release::status(
        &documents.changelog,
        changed_files.as_ref().map(|files| !files.is_empty()),
    );

    Ok(StatusSummary {
        root: project.paths.root.clone(),
        report,
        changed_files: changed_files.unwrap_or_default(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldKind, SemanticVersion};
    use crate::git::{MockRepository, VcsCall};
    use crate::release::PlanFailure;
    use tempfile::TempDir;

    fn project(dir: &TempDir) -> Project {
        Project::load(dir.path(), None).unwrap()
    }

    fn release_args(kind: BumpKind, record_in_vcs: bool) -> ReleaseWorkflowArgs {
        ReleaseWorkflowArgs {
            kind,
            message: None,
            record_in_vcs,
            dry_run: false,
        }
    }

    #[test]
    fn test_read_documents_missing_files_warn() {
        let dir = TempDir::new().unwrap();
        let documents = read_documents(&project(&dir)).unwrap();
        assert_eq!(documents.changelog, "");
        assert_eq!(documents.secondary, None);
        assert_eq!(documents.warnings.len(), 2);
    }

    #[test]
    fn test_read_documents_reports_missing_label() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("VERSION.md"), "## [1.0.0]\n").unwrap();
        fs::write(dir.path().join("README.md"), "**Version** : 1.0.0\n").unwrap();

        let documents = read_documents(&project(&dir)).unwrap();
        assert!(matches!(
            documents.warnings.as_slice(),
            [BoundaryWarning::LabelMissing {
                field: FieldKind::Updated,
                ..
            }]
        ));
    }

    #[test]
    fn test_bump_workflow_writes_documents_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("VERSION.md"), "## [1.0.0] - 2024-01-01\nInitial.\n").unwrap();
        fs::write(dir.path().join("README.md"), "**Version** : 1.0.0\n").unwrap();

        let project = project(&dir);
        let result =
            run_release_workflow(&project, &release_args(BumpKind::Minor, false), None).unwrap();

        assert!(result.executed);
        assert_eq!(result.prepared.outcome.record.new, SemanticVersion::new(1, 1, 0));
        let changelog = fs::read_to_string(&project.paths.changelog).unwrap();
        assert!(changelog.starts_with("## [1.1.0] - "));
        assert!(changelog.ends_with("## [1.0.0] - 2024-01-01\nInitial.\n"));
        assert_eq!(
            fs::read_to_string(&project.paths.readme).unwrap(),
            "**Version** : 1.1.0\n"
        );
    }

    #[test]
    fn test_bump_workflow_creates_missing_changelog() {
        let dir = TempDir::new().unwrap();
        let project = project(&dir);
        run_release_workflow(&project, &release_args(BumpKind::Patch, false), None).unwrap();

        let changelog = fs::read_to_string(&project.paths.changelog).unwrap();
        assert!(changelog.starts_with("## [0.0.1] - "));
        assert!(!project.paths.readme.exists());
    }

    #[test]
    fn test_release_workflow_records_in_vcs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("VERSION.md"), "## [2.3.4]\n").unwrap();
        let repo = MockRepository::new();

        let args = ReleaseWorkflowArgs {
            message: Some("New face".to_string()),
            ..release_args(BumpKind::Major, true)
        };
        run_release_workflow(&project(&dir), &args, Some(&repo)).unwrap();

        assert_eq!(
            repo.calls(),
            vec![
                VcsCall::StageAll,
                VcsCall::Commit("release: v3.0.0 - New face".to_string()),
                VcsCall::Tag("v3.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("VERSION.md"), "## [1.0.0]\n").unwrap();
        let repo = MockRepository::new();

        let args = ReleaseWorkflowArgs {
            dry_run: true,
            ..release_args(BumpKind::Patch, true)
        };
        let result = run_release_workflow(&project(&dir), &args, Some(&repo)).unwrap();

        assert!(!result.executed);
        assert_eq!(result.prepared.plan.steps().len(), 4);
        assert!(repo.calls().is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("VERSION.md")).unwrap(),
            "## [1.0.0]\n"
        );
    }

    #[test]
    fn test_release_failure_exposes_plan_failure() {
        let dir = TempDir::new().unwrap();
        let repo = MockRepository::new().failing_after(2);

        let err = run_release_workflow(&project(&dir), &release_args(BumpKind::Patch, true), Some(&repo))
            .unwrap_err();
        let failure = err.downcast_ref::<PlanFailure>().unwrap();
        assert_eq!(failure.completed.len(), 3);
        assert!(dir.path().join("VERSION.md").exists());
    }

    #[test]
    fn test_overflowing_bump_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let changelog = "## [18446744073709551615.0.0] - 2024-01-01\n";
        fs::write(dir.path().join("VERSION.md"), changelog).unwrap();
        let repo = MockRepository::new();

        let result =
            run_release_workflow(&project(&dir), &release_args(BumpKind::Major, true), Some(&repo));

        assert!(result.is_err());
        assert!(repo.calls().is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("VERSION.md")).unwrap(),
            changelog
        );
    }

    #[test]
    fn test_status_reports_dirty_tree() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("VERSION.md"), "## [0.4.2]\n").unwrap();
        let repo = MockRepository::new().with_changes(&["src/main.cpp"]);

        let summary = run_status(&project(&dir), Some(&repo)).unwrap();
        assert_eq!(summary.report.version, SemanticVersion::new(0, 4, 2));
        assert_eq!(summary.report.dirty, Some(true));
        assert_eq!(summary.changed_files, vec!["src/main.cpp".to_string()]);
        assert!(summary.warnings.is_empty());
    }

    #[test]
    fn test_status_without_vcs() {
        let dir = TempDir::new().unwrap();
        let summary = run_status(&project(&dir), None).unwrap();
        assert_eq!(summary.report.version, SemanticVersion::ZERO);
        assert_eq!(summary.report.dirty, None);
    }
}
