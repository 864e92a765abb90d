//! Git operations abstraction layer
//!
//! The [RepositoryPort] trait covers everything release-tagger needs from
//! version control:
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for tests
//!
//! ```rust
//! # use release_tagger::git::RepositoryPort;
//! # fn example<R: RepositoryPort>(repo: &R) -> release_tagger::Result<()> {
//! match repo.latest_tag()? {
//!     Some(tag) => println!("latest tag: {}", tag),
//!     None => println!("no tags yet"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{MockRepository, RepositoryCall};
pub use repository::Git2Repository;

use crate::error::Result;

/// Version control operations used to read the release state and publish tags.
///
/// Read operations map failures to [crate::error::ReleaseTagError::Repository];
/// write operations map them to [crate::error::ReleaseTagError::Publish].
pub trait RepositoryPort {
    /// Most recent tag reachable from HEAD.
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The nearest tag name
    /// * `Ok(None)` - If the repository has no tags reachable from HEAD
    /// * `Err` - Any other repository failure
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Full message of the HEAD commit.
    fn last_commit_message(&self) -> Result<String>;

    /// Set the push URL of `remote`, leaving its fetch URL alone.
    fn set_push_url(&self, remote: &str, url: &str) -> Result<()>;

    /// Create a lightweight tag at HEAD.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push a single tag to `remote`.
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}

impl<R: RepositoryPort + ?Sized> RepositoryPort for &R {
    fn latest_tag(&self) -> Result<Option<String>> {
        (**self).latest_tag()
    }

    fn last_commit_message(&self) -> Result<String> {
        (**self).last_commit_message()
    }

    fn set_push_url(&self, remote: &str, url: &str) -> Result<()> {
        (**self).set_push_url(remote, url)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        (**self).create_tag(name)
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        (**self).push_tag(remote, name)
    }
}
