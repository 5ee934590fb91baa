//! Release orchestration: version transitions applied to both documents.
//!
//! Everything here is a pure function of the document texts it is given plus
//! a calendar date. Reading and writing the documents, and recording the
//! release in version control, happen in [plan] once the whole result is
//! known.

pub mod plan;

pub use plan::{PlanFailure, PlannedStep, ReleasePlan};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{BumpKind, FieldKind, FieldLabels, SecondaryDocument, SemanticVersion, TagPattern};
use crate::error::Result;
use crate::version_store::{self, DATE_FORMAT};

/// Result of one release computation. Not persisted; version control is the
/// only durable record besides the documents themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    pub previous: SemanticVersion,
    pub new: SemanticVersion,
    pub kind: BumpKind,
    pub commit_message: String,
    pub tag_name: String,
}

/// A computed release: the record plus both mutated documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub record: ReleaseRecord,
    pub changelog: String,
    /// `None` when there is no secondary document to update
    pub secondary: Option<String>,
}

/// Label and naming settings a release needs, taken from [Config]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSettings {
    pub labels: FieldLabels,
    pub tag_pattern: TagPattern,
}

impl ReleaseSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(ReleaseSettings {
            labels: config.labels.field_labels(),
            tag_pattern: config.release.tag_pattern()?,
        })
    }
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        ReleaseSettings {
            labels: crate::config::LabelsConfig::default().field_labels(),
            tag_pattern: TagPattern::default(),
        }
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Bumps the changelog's current version and prepends a dated entry.
///
/// Returns the new version and the full mutated changelog text. Uses
/// [today]; see [bump_at] for a fixed date.
pub fn bump(changelog_text: &str, kind: BumpKind) -> Result<(SemanticVersion, String)> {
    bump_at(changelog_text, kind, today())
}

/// [bump] with an explicit entry date
pub fn bump_at(
    changelog_text: &str,
    kind: BumpKind,
    date: NaiveDate,
) -> Result<(SemanticVersion, String)> {
    let previous = version_store::current_version(changelog_text);
    let new = previous.bump(kind)?;
    let entry = version_store::render_entry(&new, kind, &previous, date);

    debug!(%previous, %new, %kind, "bumped version");
    Ok((new, version_store::insert_entry(changelog_text, &entry)))
}

/// Rewrites the version and last-updated fields of the secondary document.
///
/// Labels that do not appear are skipped; nothing is ever inserted. Applying
/// this twice with the same inputs gives the same text as applying it once.
pub fn sync_secondary(
    secondary_text: &str,
    new_version: &SemanticVersion,
    date: NaiveDate,
    labels: &FieldLabels,
) -> String {
    let mut document = SecondaryDocument::parse(secondary_text, labels);
    let versions = document.set(FieldKind::Version, &new_version.to_string());
    let dates = document.set(FieldKind::Updated, &date.format(DATE_FORMAT).to_string());
    debug!(versions, dates, "synced secondary document fields");
    document.to_string()
}

/// Fields whose label does not appear in the secondary document
pub fn missing_labels(secondary_text: &str, labels: &FieldLabels) -> Vec<FieldKind> {
    let document = SecondaryDocument::parse(secondary_text, labels);
    [FieldKind::Version, FieldKind::Updated]
        .into_iter()
        .filter(|kind| !document.has_field(*kind))
        .collect()
}

/// Commit message for a release: `release: <tag>`, with ` - <message>`
/// appended when a non-blank message is given.
pub fn commit_message(tag_name: &str, message: Option<&str>) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => format!("release: {} - {}", tag_name, message),
        None => format!("release: {}", tag_name),
    }
}

/// Computes a full release using today's date; see [create_release_at].
pub fn create_release(
    changelog_text: &str,
    secondary_text: Option<&str>,
    kind: BumpKind,
    message: Option<&str>,
    settings: &ReleaseSettings,
) -> Result<ReleaseOutcome> {
    create_release_at(changelog_text, secondary_text, kind, message, settings, today())
}

/// Bumps the changelog, syncs the secondary document, and names the release
/// commit and tag. Nothing is written; see [ReleasePlan] for that.
pub fn create_release_at(
    changelog_text: &str,
    secondary_text: Option<&str>,
    kind: BumpKind,
    message: Option<&str>,
    settings: &ReleaseSettings,
    date: NaiveDate,
) -> Result<ReleaseOutcome> {
    let previous = version_store::current_version(changelog_text);
    let (new, changelog) = bump_at(changelog_text, kind, date)?;
    let secondary = secondary_text.map(|text| sync_secondary(text, &new, date, &settings.labels));

    let tag_name = settings.tag_pattern.format(&new);
    let record = ReleaseRecord {
        previous,
        new,
        kind,
        commit_message: commit_message(&tag_name, message),
        tag_name,
    };

    info!(previous = %record.previous, new = %record.new, tag = %record.tag_name, "computed release");
    Ok(ReleaseOutcome {
        record,
        changelog,
        secondary,
    })
}

/// Informational project state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub version: SemanticVersion,
    /// `None` when version control could not be queried
    pub dirty: Option<bool>,
}

pub fn status(changelog_text: &str, vcs_dirty: Option<bool>) -> StatusReport {
    StatusReport {
        version: version_store::current_version(changelog_text),
        dirty: vcs_dirty,
    }
}
