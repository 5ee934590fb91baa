//! Domain logic - pure document and version rules independent of disk, git or tools

pub mod changelog;
pub mod secondary;
pub mod tag;
pub mod version;

pub use changelog::{Changelog, ChangelogEntry};
pub use secondary::{FieldKind, FieldLabels, SecondaryDocument};
pub use tag::TagPattern;
pub use version::{BumpKind, SemanticVersion};
