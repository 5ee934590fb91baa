//! Version-control operations abstraction layer
//!
//! Releases are recorded in version control with three separate calls: stage
//! everything, commit, then tag. The [Vcs] trait abstracts those calls (plus the
//! working-tree status used by `status`) so the release workflow can run
//! against a real repository or a mock.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording implementation for testing
//!
//! ```rust
//! # use watchy_dev::git::Vcs;
//! # fn example<V: Vcs>(vcs: &V) -> watchy_dev::Result<()> {
//! vcs.stage_all()?;
//! vcs.commit("release: v1.1.0")?;
//! vcs.create_tag("v1.1.0")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{MockRepository, VcsCall};
pub use repository::Git2Repository;

use crate::error::Result;

/// Common version-control trait for abstraction
///
/// Each method is one blocking call; there is no atomicity across calls. A
/// failure after `stage_all` leaves the index staged, and a failure after
/// `commit` leaves an untagged release commit.
pub trait Vcs {
    /// Stage every change in the working tree, including new and deleted files
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged changes on the current branch
    ///
    /// # Returns
    /// * `Ok(String)` - Hash of the new commit
    fn commit(&self, message: &str) -> Result<String>;

    /// Create a lightweight tag at HEAD
    ///
    /// Fails if a tag with the same name already exists.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Paths with uncommitted changes (modified, staged, untracked or deleted)
    fn changed_files(&self) -> Result<Vec<String>>;

    /// Whether the working tree has uncommitted changes
    fn is_dirty(&self) -> Result<bool> {
        Ok(!self.changed_files()?.is_empty())
    }
}
