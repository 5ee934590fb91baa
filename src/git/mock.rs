use crate::error::{DevError, Result};
use crate::git::Vcs;
use std::cell::RefCell;

/// A call received by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    StageAll,
    Commit(String),
    Tag(String),
}

/// Mock repository for testing without actual git operations
///
/// Records every call in order. A failure can be injected after a given
/// number of successful calls to exercise partial releases.
#[derive(Debug, Default)]
pub struct MockRepository {
    calls: RefCell<Vec<VcsCall>>,
    changed: Vec<String>,
    fail_after: Option<usize>,
}

impl MockRepository {
    /// Create a new clean mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Report these paths as uncommitted changes
    pub fn with_changes(mut self, paths: &[&str]) -> Self {
        self.changed = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Let `successful` calls through, then fail every call after that
    pub fn failing_after(mut self, successful: usize) -> Self {
        self.fail_after = Some(successful);
        self
    }

    /// Calls that succeeded, in order
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: VcsCall) -> Result<()> {
        let mut calls = self.calls.borrow_mut();
        if self.fail_after.is_some_and(|limit| calls.len() >= limit) {
            return Err(DevError::release(format!("mock failure on {:?}", call)));
        }
        calls.push(call);
        Ok(())
    }
}

impl Vcs for MockRepository {
    fn stage_all(&self) -> Result<()> {
        self.record(VcsCall::StageAll)
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.record(VcsCall::Commit(message.to_string()))?;
        Ok(format!("{:040x}", self.calls.borrow().len()))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(VcsCall::Tag(name.to_string()))
    }

    fn changed_files(&self) -> Result<Vec<String>> {
        Ok(self.changed.clone())
    }
}
