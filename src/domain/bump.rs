//! Label-driven version bump decision table
//!
//! Rules are evaluated in order and are not exclusive:
//!
//! 1. major label -> major bump
//! 2. else minor label -> minor bump
//! 3. else patch label -> patch bump
//! 4. else finalize label -> strip pre-release and build
//! 5. else -> build bump
//! 6. then, if the rc label is present without the finalize label,
//!    pre-release bump followed by a build bump on top of the result so far
//!
//! Rule 5 is not gated on any label, so a commit with no recognized labels
//! still gets a fresh `+build.N`.

use semver::Version;
use std::collections::BTreeSet;
use std::fmt;

use crate::config::{LabelsConfig, VersioningConfig};
use crate::domain::version;
use crate::error::Result;

/// One decision-table step that contributed to the new version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpAction {
    Major,
    Minor,
    Patch,
    FinalizeRc,
    Build,
    Rc,
}

impl fmt::Display for BumpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpAction::Major => "Bump major",
            BumpAction::Minor => "Bump minor",
            BumpAction::Patch => "Bump patch",
            BumpAction::FinalizeRc => "Finalize rc",
            BumpAction::Build => "Bump build",
            BumpAction::Rc => "Bump rc",
        };
        f.write_str(name)
    }
}

/// Result of applying the decision table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    pub version: Version,
    pub actions: Vec<BumpAction>,
}

/// Label names and seed tokens the decision table works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpRules {
    pub major_label: String,
    pub minor_label: String,
    pub patch_label: String,
    pub finalize_rc_label: String,
    pub rc_label: String,
    pub prerelease_token: String,
    pub build_token: String,
}

impl Default for BumpRules {
    fn default() -> Self {
        BumpRules::from_config(&LabelsConfig::default(), &VersioningConfig::default())
    }
}

impl BumpRules {
    pub fn from_config(labels: &LabelsConfig, versioning: &VersioningConfig) -> Self {
        BumpRules {
            major_label: labels.major.clone(),
            minor_label: labels.minor.clone(),
            patch_label: labels.patch.clone(),
            finalize_rc_label: labels.finalize_rc.clone(),
            rc_label: labels.rc.clone(),
            prerelease_token: versioning.prerelease_token.clone(),
            build_token: versioning.build_token.clone(),
        }
    }

    /// Run the decision table over `labels` starting from `current`.
    pub fn apply(&self, current: &Version, labels: &BTreeSet<String>) -> Result<BumpOutcome> {
        let (action, mut next) = if labels.contains(&self.major_label) {
            (BumpAction::Major, version::bump_major(current)?)
        } else if labels.contains(&self.minor_label) {
            (BumpAction::Minor, version::bump_minor(current)?)
        } else if labels.contains(&self.patch_label) {
            (BumpAction::Patch, version::bump_patch(current)?)
        } else if labels.contains(&self.finalize_rc_label) {
            (BumpAction::FinalizeRc, version::finalize(current))
        } else {
            (
                BumpAction::Build,
                version::bump_build(current, &self.build_token)?,
            )
        };
        let mut actions = vec![action];

        if labels.contains(&self.rc_label) && !labels.contains(&self.finalize_rc_label) {
            actions.push(BumpAction::Rc);
            let pre = version::bump_prerelease(&next, &self.prerelease_token)?;
            next = version::bump_build(&pre, &self.build_token)?;
        }

        Ok(BumpOutcome {
            version: next,
            actions,
        })
    }
}

/// Compute the next version using the default label names.
pub fn compute_next_version(current: &Version, labels: &BTreeSet<String>) -> Result<Version> {
    BumpRules::default()
        .apply(current, labels)
        .map(|outcome| outcome.version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn labels(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_major_resets_lower_components() {
        let next = compute_next_version(&v("1.2.3-rc.1+4"), &labels(&["bump-major"])).unwrap();
        assert_eq!(next, v("2.0.0"));
    }

    #[test]
    fn test_minor() {
        let next = compute_next_version(&v("1.2.3"), &labels(&["bump-minor"])).unwrap();
        assert_eq!(next, v("1.3.0"));
    }

    #[test]
    fn test_patch() {
        let next = compute_next_version(&v("1.2.3-rc.2"), &labels(&["bump-patch"])).unwrap();
        assert_eq!(next, v("1.2.4"));
    }

    #[test]
    fn test_major_wins_over_minor_and_patch() {
        let outcome = BumpRules::default()
            .apply(&v("1.2.3"), &labels(&["bump-patch", "bump-minor", "bump-major"]))
            .unwrap();
        assert_eq!(outcome.version, v("2.0.0"));
        assert_eq!(outcome.actions, vec![BumpAction::Major]);
    }

    #[test]
    fn test_major_at_u64_max_is_an_error() {
        let current = Version::new(u64::MAX, 0, 0);
        let err = compute_next_version(&current, &labels(&["bump-major"])).unwrap_err();
        assert!(matches!(err, crate::error::ReleaseTagError::Version(_)));
    }

    #[test]
    fn test_finalize_rc() {
        let next = compute_next_version(&v("2.0.0-rc.1+5"), &labels(&["finalize-rc"])).unwrap();
        assert_eq!(next, v("2.0.0"));
    }

    #[test]
    fn test_finalize_rc_is_idempotent() {
        let set = labels(&["finalize-rc"]);
        let once = compute_next_version(&v("3.1.0-rc.7"), &set).unwrap();
        let twice = compute_next_version(&once, &set).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_labels_still_bumps_build() {
        let outcome = BumpRules::default()
            .apply(&v("1.2.3-rc.1"), &BTreeSet::new())
            .unwrap();
        assert_eq!(outcome.version, v("1.2.3-rc.1+build.1"));
        assert_eq!(outcome.actions, vec![BumpAction::Build]);
    }

    #[test]
    fn test_unrelated_labels_bump_build() {
        let next = compute_next_version(&v("2.0.0-rc.1+5"), &labels(&["documentation"])).unwrap();
        assert_eq!(next, v("2.0.0-rc.1+6"));
    }

    #[test]
    fn test_rc_alone_runs_build_then_rc() {
        let outcome = BumpRules::default()
            .apply(&v("1.2.3-rc.1"), &labels(&["bump-rc"]))
            .unwrap();
        assert_eq!(outcome.version, v("1.2.3-rc.2+build.1"));
        assert_eq!(outcome.actions, vec![BumpAction::Build, BumpAction::Rc]);
    }

    #[test]
    fn test_rc_after_minor() {
        let next =
            compute_next_version(&v("1.2.3-rc.4"), &labels(&["bump-minor", "bump-rc"])).unwrap();
        assert_eq!(next, v("1.3.0-rc.1+build.1"));
    }

    #[test]
    fn test_rc_suppressed_by_finalize() {
        let outcome = BumpRules::default()
            .apply(&v("1.2.3-rc.4"), &labels(&["bump-rc", "finalize-rc"]))
            .unwrap();
        assert_eq!(outcome.version, v("1.2.3"));
        assert_eq!(outcome.actions, vec![BumpAction::FinalizeRc]);
    }

    #[test]
    fn test_custom_label_names() {
        let rules = BumpRules {
            minor_label: "semver:minor".to_string(),
            ..BumpRules::default()
        };
        let outcome = rules.apply(&v("0.4.1"), &labels(&["semver:minor"])).unwrap();
        assert_eq!(outcome.version, v("0.5.0"));

        let outcome = rules.apply(&v("0.4.1"), &labels(&["bump-minor"])).unwrap();
        assert_eq!(outcome.actions, vec![BumpAction::Build]);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(BumpAction::FinalizeRc.to_string(), "Finalize rc");
        assert_eq!(BumpAction::Build.to_string(), "Bump build");
    }
}
