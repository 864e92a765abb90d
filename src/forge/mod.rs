//! Merge request label resolution
//!
//! A commit message is scanned for a merge request reference, and the forge
//! is asked for that merge request's labels through [ForgePort].

pub mod gitlab;
pub mod mock;
pub mod reference;

pub use gitlab::GitLabClient;
pub use mock::MockForge;
pub use reference::{extract_reference, MergeRequestRef};

use std::collections::BTreeSet;

use crate::error::Result;

/// Forge API surface needed to read merge request labels.
pub trait ForgePort {
    /// Labels of merge request `iid` in the configured project.
    ///
    /// Authentication failures and unknown merge requests are errors.
    fn merge_request_labels(&self, iid: u64) -> Result<Vec<String>>;
}

impl<F: ForgePort + ?Sized> ForgePort for &F {
    fn merge_request_labels(&self, iid: u64) -> Result<Vec<String>> {
        (**self).merge_request_labels(iid)
    }
}

/// Turns an optional merge request reference into a label set.
pub struct LabelResolver<F> {
    forge: F,
}

impl<F: ForgePort> LabelResolver<F> {
    pub fn new(forge: F) -> Self {
        LabelResolver { forge }
    }

    /// Labels for `reference`; the empty set, without a forge call, when absent.
    pub fn fetch_labels(&self, reference: Option<&MergeRequestRef>) -> Result<BTreeSet<String>> {
        let Some(reference) = reference else {
            tracing::debug!("commit does not reference a merge request");
            return Ok(BTreeSet::new());
        };

        tracing::debug!(reference = %reference, "fetching merge request labels");
        let labels = self.forge.merge_request_labels(reference.iid)?;
        Ok(labels.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseTagError;

    #[test]
    fn test_absent_reference_skips_forge() {
        let forge = MockForge::new();
        let resolver = LabelResolver::new(&forge);
        let labels = resolver.fetch_labels(None).unwrap();
        assert!(labels.is_empty());
        assert_eq!(forge.call_count(), 0);
    }

    fn reference(iid: u64) -> MergeRequestRef {
        MergeRequestRef {
            iid,
            project: "group/app".to_string(),
        }
    }

    #[test]
    fn test_fetch_labels_collects_set() {
        let forge = MockForge::new().with_labels(42, &["bump-minor", "backend"]);
        let resolver = LabelResolver::new(&forge);
        let labels = resolver.fetch_labels(Some(&reference(42))).unwrap();
        assert!(labels.contains("bump-minor"));
        assert_eq!(labels.len(), 2);
        assert_eq!(forge.call_count(), 1);
    }

    #[test]
    fn test_unknown_merge_request_is_an_error() {
        let forge = MockForge::new();
        let resolver = LabelResolver::new(&forge);
        let err = resolver.fetch_labels(Some(&reference(9))).unwrap_err();
        assert!(matches!(err, ReleaseTagError::Resolver(_)));
    }
}
