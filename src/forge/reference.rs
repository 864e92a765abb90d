use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::OnceLock;

use crate::error::{ReleaseTagError, Result};

/// Merge request mentioned in a commit message as `<namespace>/<project>!<iid>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequestRef {
    /// Project-scoped merge request number
    pub iid: u64,
    /// Text preceding the `!`, e.g. `group/app`
    pub project: String,
}

impl fmt::Display for MergeRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.project, self.iid)
    }
}

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"(\S*/\S*)!([0-9]+)")
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .expect("static regex is valid")
    })
}

/// Find the first merge request reference in a commit message.
///
/// GitLab merge commits carry a `See merge request group/app!42` trailer.
/// A reference whose number does not fit a merge request id is an error,
/// not an absent reference.
pub fn extract_reference(commit_message: &str) -> Result<Option<MergeRequestRef>> {
    let Some(captures) = reference_regex().captures(commit_message) else {
        return Ok(None);
    };
    let project = captures.get(1).map_or("", |m| m.as_str()).to_string();
    let digits = captures.get(2).map_or("", |m| m.as_str());

    let iid = digits.parse::<u64>().map_err(|e| {
        ReleaseTagError::resolver(format!(
            "Invalid merge request id in '{}!{}': {}",
            project, digits, e
        ))
    })?;

    Ok(Some(MergeRequestRef { iid, project }))
}
