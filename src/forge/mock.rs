use std::cell::Cell;
use std::collections::HashMap;

use crate::error::{ReleaseTagError, Result};
use crate::forge::ForgePort;

/// In-memory forge for testing label resolution without network access
#[derive(Default)]
pub struct MockForge {
    merge_requests: HashMap<u64, Vec<String>>,
    fail_auth: bool,
    calls: Cell<usize>,
}

impl MockForge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register merge request `iid` with the given labels
    pub fn with_labels(mut self, iid: u64, labels: &[&str]) -> Self {
        self.merge_requests
            .insert(iid, labels.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Reject every request like an invalid private token
    pub fn failing_auth(mut self) -> Self {
        self.fail_auth = true;
        self
    }

    /// Number of label lookups made so far
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

impl ForgePort for MockForge {
    fn merge_request_labels(&self, iid: u64) -> Result<Vec<String>> {
        self.calls.set(self.calls.get() + 1);

        if self.fail_auth {
            return Err(ReleaseTagError::resolver("Authentication rejected (401 Unauthorized)"));
        }

        self.merge_requests
            .get(&iid)
            .cloned()
            .ok_or_else(|| ReleaseTagError::resolver(format!("Not found: merge request !{}", iid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_forge_counts_calls() {
        let forge = MockForge::new().with_labels(1, &["bump-rc"]);
        assert_eq!(forge.merge_request_labels(1).unwrap(), vec!["bump-rc".to_string()]);
        assert!(forge.merge_request_labels(2).is_err());
        assert_eq!(forge.call_count(), 2);
    }

    #[test]
    fn test_mock_forge_failing_auth() {
        let forge = MockForge::new().with_labels(1, &["bump-rc"]).failing_auth();
        assert!(forge.merge_request_labels(1).is_err());
    }
}
