//! Labelled fields embedded in a free-form companion document (the README).
//!
//! A field is a fixed label such as `**Version** : ` followed by a value. The
//! value is the run of characters directly after the label made of ASCII
//! letters, digits, `.`, `-` and `+`, minus any trailing `.`, `-` or `+` so a
//! sentence-final period stays outside the value. All text outside field
//! values is kept verbatim.

use std::fmt;

/// Which embedded field a label introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Version,
    Updated,
}

/// The label prefixes that identify each field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabels {
    pub version: String,
    pub updated: String,
}

impl FieldLabels {
    pub fn new(version: impl Into<String>, updated: impl Into<String>) -> Self {
        FieldLabels {
            version: version.into(),
            updated: updated.into(),
        }
    }

    pub fn label(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Version => &self.version,
            FieldKind::Updated => &self.updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field {
        kind: FieldKind,
        label: String,
        value: String,
    },
}

/// Parsed companion document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryDocument {
    segments: Vec<Segment>,
}

fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+')
}

impl SecondaryDocument {
    pub fn parse(text: &str, labels: &FieldLabels) -> Self {
        let candidates: Vec<(FieldKind, &str)> = [FieldKind::Version, FieldKind::Updated]
            .into_iter()
            .map(|kind| (kind, labels.label(kind)))
            .filter(|(_, label)| !label.is_empty())
            .collect();

        let mut segments = Vec::new();
        let mut pos = 0;

        loop {
            // Earliest label occurrence wins; on a tie the longer label wins.
            let next = candidates
                .iter()
                .filter_map(|(kind, label)| {
                    text[pos..]
                        .find(*label)
                        .map(|offset| (pos + offset, *kind, *label))
                })
                .min_by_key(|(start, _, label)| (*start, std::cmp::Reverse(label.len())));

            let Some((start, kind, label)) = next else {
                break;
            };

            if start > pos {
                segments.push(Segment::Text(text[pos..start].to_string()));
            }

            let value_start = start + label.len();
            let value_len = text[value_start..]
                .find(|c: char| !is_value_char(c))
                .unwrap_or(text.len() - value_start);
            let value = text[value_start..value_start + value_len]
                .trim_end_matches(|c: char| matches!(c, '.' | '-' | '+'));
            let value_end = value_start + value.len();

            segments.push(Segment::Field {
                kind,
                label: label.to_string(),
                value: value.to_string(),
            });
            pos = value_end;
        }

        if pos < text.len() {
            segments.push(Segment::Text(text[pos..].to_string()));
        }

        SecondaryDocument { segments }
    }

    /// Current values of every occurrence of a field, in document order
    pub fn values(&self, kind: FieldKind) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Field { kind: k, value, .. } if *k == kind => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_field(&self, kind: FieldKind) -> bool {
        !self.values(kind).is_empty()
    }

    /// Replace the value of every occurrence of `kind`. Returns how many
    /// occurrences were found; zero means the document is unchanged.
    pub fn set(&mut self, kind: FieldKind, new_value: &str) -> usize {
        let mut count = 0;
        for segment in &mut self.segments {
            if let Segment::Field {
                kind: k, value, ..
            } = segment
            {
                if *k == kind {
                    *value = new_value.to_string();
                    count += 1;
                }
            }
        }
        count
    }
}

impl fmt::Display for SecondaryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => f.write_str(text)?,
                Segment::Field { label, value, .. } => {
                    f.write_str(label)?;
                    f.write_str(value)?;
                }
            }
        }
        Ok(())
    }
}
