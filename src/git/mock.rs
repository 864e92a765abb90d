use crate::error::{ReleaseTagError, Result};
use crate::git::RepositoryPort;
use std::sync::Mutex;

/// Mutating call recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryCall {
    SetPushUrl { remote: String, url: String },
    CreateTag { name: String },
    PushTag { remote: String, name: String },
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    latest_tag: Option<String>,
    commit_message: String,
    fail_on_push: bool,
    calls: Mutex<Vec<RepositoryCall>>,
}

impl MockRepository {
    /// Create a new mock repository with no tags and an empty commit message
    pub fn new() -> Self {
        MockRepository {
            latest_tag: None,
            commit_message: String::new(),
            fail_on_push: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latest_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_tag = Some(tag.into());
        self
    }

    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    /// Make `push_tag` fail like a rejected push
    pub fn failing_push(mut self) -> Self {
        self.fail_on_push = true;
        self
    }

    /// Calls recorded so far, in order
    pub fn calls(&self) -> Vec<RepositoryCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Names of tags pushed so far
    pub fn pushed_tags(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RepositoryCall::PushTag { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RepositoryCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryPort for MockRepository {
    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }

    fn last_commit_message(&self) -> Result<String> {
        Ok(self.commit_message.clone())
    }

    fn set_push_url(&self, remote: &str, url: &str) -> Result<()> {
        self.record(RepositoryCall::SetPushUrl {
            remote: remote.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(RepositoryCall::CreateTag {
            name: name.to_string(),
        });
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        if self.fail_on_push {
            return Err(ReleaseTagError::publish(format!(
                "Failed to push tag '{}': rejected",
                name
            )));
        }
        self.record(RepositoryCall::PushTag {
            remote: remote.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }
}
