//! The changelog as the single source of truth for the project version.
//!
//! There is no separate manifest: the current version is whatever the first
//! `## [X.Y.Z]` heading of the changelog says, and a release is recorded by
//! prepending a new entry.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{BumpKind, Changelog, SemanticVersion};

/// Calendar date format used in entry headings and labelled fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the version of the first entry heading, top to bottom.
///
/// Documents without any entry heading (including empty or malformed ones)
/// have no history and start at `0.0.0`.
///
/// # Example
/// ```
/// use watchy_dev::version_store::current_version;
/// use watchy_dev::domain::SemanticVersion;
///
/// let text = "# Versions\n\n## [1.4.2] - 2024-05-01\n- fixes\n";
/// assert_eq!(current_version(text), SemanticVersion::new(1, 4, 2));
/// assert_eq!(current_version("nothing yet"), SemanticVersion::ZERO);
/// ```
pub fn current_version(document_text: &str) -> SemanticVersion {
    let version = Changelog::parse(document_text).latest_version();
    debug!(?version, "read version from changelog");
    version.unwrap_or(SemanticVersion::ZERO)
}

/// Renders a self-contained changelog entry for a release.
///
/// The heading is `## [<new>] - <date>` so later parses recognize it; the
/// block ends with a `---` separator and a blank line.
pub fn render_entry(
    new_version: &SemanticVersion,
    bump_kind: BumpKind,
    previous_version: &SemanticVersion,
    date: NaiveDate,
) -> String {
    let date = date.format(DATE_FORMAT).to_string();
    format!(
        "## [{new}] - {date}\n\
         \n\
         ### Release {new}\n\
         **{description}**\n\
         \n\
         ### Changes\n\
         - Version bumped from {previous} to {new}\n\
         \n\
         ### Technical details\n\
         - **Previous version** : {previous}\n\
         - **New version** : {new}\n\
         - **Bump kind** : {kind}\n\
         - **Date** : {date}\n\
         \n\
         ---\n\
         \n",
        new = new_version,
        previous = previous_version,
        description = bump_kind.description(),
        kind = bump_kind,
        date = date,
    )
}

/// Inserts `entry_block` immediately before the first entry heading, or at the
/// end of the document when it has none. All other characters are preserved.
pub fn insert_entry(document_text: &str, entry_block: &str) -> String {
    let mut changelog = Changelog::parse(document_text);
    changelog.insert_block(entry_block);
    changelog.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_version_uses_first_heading() {
        let text = "## [2.0.0]\n## [3.0.0]\n## [1.0.0]\n";
        assert_eq!(current_version(text), SemanticVersion::new(2, 0, 0));
    }

    #[test]
    fn test_current_version_ignores_content_after_heading() {
        let text = "## [1.2.9] - whatever\n## not a heading [9.9.9]\n\0garbage";
        assert_eq!(current_version(text), SemanticVersion::new(1, 2, 9));
    }

    #[test]
    fn test_current_version_defaults_to_zero() {
        for text in ["", "# Changelog\n", "## [Unreleased]\n", "## 1.0.0\n"] {
            assert_eq!(current_version(text), SemanticVersion::ZERO);
        }
    }

    #[test]
    fn test_render_entry_heading_is_recognized() {
        let entry = render_entry(
            &SemanticVersion::new(1, 1, 0),
            BumpKind::Minor,
            &SemanticVersion::new(1, 0, 0),
            date(2024, 6, 1),
        );
        assert!(entry.starts_with("## [1.1.0] - 2024-06-01\n"));
        assert!(entry.ends_with("---\n\n"));
        assert!(entry.contains("**Previous version** : 1.0.0"));
        assert!(entry.contains("**Bump kind** : minor"));
        assert!(entry.contains(BumpKind::Minor.description()));
        assert_eq!(current_version(&entry), SemanticVersion::new(1, 1, 0));
    }

    #[test]
    fn test_render_entry_has_single_heading() {
        let entry = render_entry(
            &SemanticVersion::new(2, 0, 0),
            BumpKind::Major,
            &SemanticVersion::new(1, 9, 3),
            date(2025, 1, 31),
        );
        assert_eq!(Changelog::parse(&entry).entries().len(), 1);
    }

    #[test]
    fn test_insert_entry_preserves_tail_exactly() {
        let original = "# Versions\n\n## [1.0.0] - 2024-01-01\nInitial.\n";
        let block = "## [1.0.1] - 2024-02-01\nfix\n\n---\n\n";
        let updated = insert_entry(original, block);

        let at = original.find("## [").unwrap();
        assert_eq!(&updated[..at], &original[..at]);
        assert_eq!(&updated[at..at + block.len()], block);
        assert_eq!(&updated[at + block.len()..], &original[at..]);

        let restored = updated.replacen(block, "", 1);
        assert_eq!(restored, original);
    }

    #[test]
    fn test_insert_entry_without_history_appends() {
        let original = "# Versions\n\nNothing released yet.\n";
        let block = "## [0.0.1] - 2024-02-01\n---\n\n";
        assert_eq!(insert_entry(original, block), format!("{}{}", original, block));
    }
}
