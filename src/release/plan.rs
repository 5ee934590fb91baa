//! Ordered side effects of a release, computed before any of them run.
//!
//! A plan is the list of document writes followed (for a release) by the
//! stage, commit and tag calls. Steps run in order and stop at the first
//! failure. Completed steps are not undone: a failure after the documents are
//! written leaves them modified but unrecorded in version control, and the
//! returned [PlanFailure] says exactly how far the plan got.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, instrument};

use super::ReleaseOutcome;
use crate::config::ProjectPaths;
use crate::error::{DevError, Result};
use crate::git::Vcs;

/// One side effect of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStep {
    WriteFile { path: PathBuf, contents: String },
    StageAll,
    Commit { message: String },
    Tag { name: String },
}

impl fmt::Display for PlannedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannedStep::WriteFile { path, .. } => write!(f, "write {}", path.display()),
            PlannedStep::StageAll => write!(f, "stage all changes"),
            PlannedStep::Commit { message } => write!(f, "commit \"{}\"", message),
            PlannedStep::Tag { name } => write!(f, "tag {}", name),
        }
    }
}

/// A release plan stopped partway
#[derive(Error, Debug)]
#[error("{failed} failed: {source}")]
pub struct PlanFailure {
    /// Steps that finished before the failure, in order
    pub completed: Vec<PlannedStep>,
    pub failed: PlannedStep,
    pub source: DevError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    steps: Vec<PlannedStep>,
}

impl ReleasePlan {
    /// Plan the writes for `outcome`, followed by stage/commit/tag when
    /// `record_in_vcs` is set. The changelog is always written (it is created
    /// if it did not exist); the secondary document only when there is one.
    pub fn new(paths: &ProjectPaths, outcome: &ReleaseOutcome, record_in_vcs: bool) -> Self {
        let mut steps = vec![PlannedStep::WriteFile {
            path: paths.changelog.clone(),
            contents: outcome.changelog.clone(),
        }];

        if let Some(secondary) = &outcome.secondary {
            steps.push(PlannedStep::WriteFile {
                path: paths.readme.clone(),
                contents: secondary.clone(),
            });
        }

        if record_in_vcs {
            steps.push(PlannedStep::StageAll);
            steps.push(PlannedStep::Commit {
                message: outcome.record.commit_message.clone(),
            });
            steps.push(PlannedStep::Tag {
                name: outcome.record.tag_name.clone(),
            });
        }

        ReleasePlan { steps }
    }

    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Run every step in order.
    ///
    /// `vcs` may be `None` only for plans without version-control steps.
    #[instrument(skip_all, fields(steps = self.steps.len()))]
    pub fn execute(&self, vcs: Option<&dyn Vcs>) -> std::result::Result<(), PlanFailure> {
        let mut completed = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            if let Err(source) = run_step(step, vcs) {
                return Err(PlanFailure {
                    completed,
                    failed: step.clone(),
                    source,
                });
            }
            info!(%step, "completed");
            completed.push(step.clone());
        }

        Ok(())
    }
}

fn run_step(step: &PlannedStep, vcs: Option<&dyn Vcs>) -> Result<()> {
    if let PlannedStep::WriteFile { path, contents } = step {
        fs::write(path, contents)?;
        return Ok(());
    }

    let vcs = vcs.ok_or_else(|| DevError::release("no version-control repository available"))?;
    match step {
        PlannedStep::StageAll => vcs.stage_all()?,
        PlannedStep::Commit { message } => {
            vcs.commit(message)?;
        }
        PlannedStep::Tag { name } => vcs.create_tag(name)?,
        PlannedStep::WriteFile { .. } => {}
    }
    Ok(())
}
