use crate::error::{DevError, Result};
use git2::{ErrorCode, IndexAddOption, ObjectType, Repository as Git2Repo, StatusOptions};
use std::path::Path;
use tracing::{debug, instrument};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Vcs for Git2Repository {
    #[instrument(skip(self))]
    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;

        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        // add_all does not see deletions
        index.update_all(["*"], None)?;
        index.write()?;

        debug!(entries = index.len(), "staged working tree");
        Ok(())
    }

    #[instrument(skip(self))]
    fn commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;

        let signature = self.repo.signature().map_err(|e| {
            DevError::release(format!(
                "Cannot determine commit author (set user.name and user.email): {}",
                e
            ))
        })?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        debug!(%oid, "created commit");
        Ok(oid.to_string())
    }

    #[instrument(skip(self))]
    fn create_tag(&self, name: &str) -> Result<()> {
        let target = self
            .repo
            .head()
            .and_then(|head| head.peel(ObjectType::Commit))
            .map_err(|e| DevError::release(format!("Cannot resolve HEAD for tag: {}", e)))?;

        self.repo
            .tag_lightweight(name, &target, false)
            .map_err(|e| DevError::release(format!("Cannot create tag '{}': {}", name, e)))?;

        debug!(tag = name, "created tag");
        Ok(())
    }

    fn changed_files(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .filter_map(|entry| entry.path().map(|p| p.to_string()))
            .collect())
    }
}
