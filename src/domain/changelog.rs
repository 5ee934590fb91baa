//! Lossless model of a changelog document.
//!
//! A changelog is a preamble followed by entries. Each entry starts at a line
//! of the form `## [X.Y.Z]` (anything may follow the closing bracket) and runs
//! until the next entry heading or the end of the document. Headings and bodies
//! are kept verbatim, so rendering a parsed changelog reproduces the input
//! byte for byte.
//!
//! A heading whose numbers do not fit a version component still starts an
//! entry, but that entry carries no version. When it is the first entry the
//! document has no readable history.

use regex::Regex;
use std::fmt;

use super::version::SemanticVersion;

const HEADING_PATTERN: &str = r"^## \[([0-9]+\.[0-9]+\.[0-9]+)\]";

/// One version section of the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// `None` when a component of the heading overflows
    pub version: Option<SemanticVersion>,
    /// The heading line, including its line terminator if present
    pub heading: String,
    /// Everything between this heading and the next one
    pub body: String,
}

/// Parsed changelog document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    preamble: String,
    entries: Vec<ChangelogEntry>,
}

impl Changelog {
    /// Split a document into preamble and entries. Never fails: text that
    /// contains no recognizable heading is all preamble.
    pub fn parse(text: &str) -> Self {
        let pattern = Regex::new(HEADING_PATTERN).ok();
        let mut changelog = Changelog::default();

        for line in text.split_inclusive('\n') {
            let heading = pattern
                .as_ref()
                .and_then(|re| re.captures(line))
                .and_then(|caps| caps.get(1));

            match heading {
                Some(m) => changelog.entries.push(ChangelogEntry {
                    version: SemanticVersion::parse(m.as_str()).ok(),
                    heading: line.to_string(),
                    body: String::new(),
                }),
                None => match changelog.entries.last_mut() {
                    Some(entry) => entry.body.push_str(line),
                    None => changelog.preamble.push_str(line),
                },
            }
        }

        changelog
    }

    /// Text before the first entry heading
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Entries in document order (newest first by convention)
    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.entries
    }

    /// Version of the first entry heading. `None` when there are no entries
    /// or the first heading's version cannot be represented.
    pub fn latest_version(&self) -> Option<SemanticVersion> {
        self.entries.first().and_then(|entry| entry.version)
    }

    /// Splice `block` in front of the first entry, or at the end of the
    /// document when there are no entries yet.
    ///
    /// The only characters added besides `block` itself are a leading newline
    /// when appending to a document whose last line is unterminated, and a
    /// trailing newline when `block` is unterminated but entries follow it.
    pub fn insert_block(&mut self, block: &str) {
        let mut block = block.to_string();
        if self.entries.is_empty() && !self.preamble.is_empty() && !self.preamble.ends_with('\n')
        {
            block.insert(0, '\n');
        }
        if !self.entries.is_empty() && !block.is_empty() && !block.ends_with('\n') {
            block.push('\n');
        }

        let inserted = Changelog::parse(&block);
        self.preamble.push_str(&inserted.preamble);
        self.entries.splice(0..0, inserted.entries);
    }
}

impl fmt::Display for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preamble)?;
        for entry in &self.entries {
            f.write_str(&entry.heading)?;
            f.write_str(&entry.body)?;
        }
        Ok(())
    }
}
