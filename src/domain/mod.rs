//! Domain logic - pure version rules independent of git and the forge

pub mod bump;
pub mod version;

pub use bump::{compute_next_version, BumpAction, BumpOutcome, BumpRules};
pub use semver::Version;
