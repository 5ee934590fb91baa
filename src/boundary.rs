use std::fmt;
use std::path::PathBuf;

use crate::domain::FieldKind;

/// Non-fatal conditions met while reading or updating the project documents.
/// These are reported to the user as warnings; the operation continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The changelog is missing or has no version heading; history starts at 0.0.0
    NoVersionHistory { changelog: PathBuf },
    /// The secondary document does not exist and is left alone
    SecondaryMissing { path: PathBuf },
    /// A labelled field is absent from the secondary document and is not inserted
    LabelMissing {
        path: PathBuf,
        field: FieldKind,
        label: String,
    },
    /// Version control could not be opened or queried
    VcsUnavailable { reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionHistory { changelog } => write!(
                f,
                "No version history in {}; starting from 0.0.0",
                changelog.display()
            ),
            BoundaryWarning::SecondaryMissing { path } => {
                write!(f, "{} not found; skipping field sync", path.display())
            }
            BoundaryWarning::LabelMissing { path, field, label } => {
                let name = match field {
                    FieldKind::Version => "version",
                    FieldKind::Updated => "last-updated",
                };
                write!(
                    f,
                    "No {} field ('{}') in {}; left unchanged",
                    name,
                    label.trim_end(),
                    path.display()
                )
            }
            BoundaryWarning::VcsUnavailable { reason } => {
                write!(f, "Version control unavailable: {}", reason)
            }
        }
    }
}
