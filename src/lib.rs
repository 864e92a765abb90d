pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod forge;
pub mod git;
pub mod logging;
pub mod publish;
pub mod ui;
pub mod workflow;

pub use error::{ReleaseTagError, Result};
