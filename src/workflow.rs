//! Release workflow orchestration
//!
//! Ties the repository, the forge, the bump rules and the publisher together.
//! Everything external comes in through [RepositoryPort] and [ForgePort], so
//! the whole flow runs against in-memory fakes in tests.

use semver::Version;
use std::collections::BTreeSet;

use crate::config::Config;
use crate::domain::version::{is_finalized, parse_tag};
use crate::domain::{BumpAction, BumpRules};
use crate::env::CiEnvironment;
use crate::error::{ReleaseTagError, Result};
use crate::forge::{extract_reference, ForgePort, LabelResolver};
use crate::git::RepositoryPort;
use crate::publish::TagPublisher;
use crate::ui;

/// Settings for one release run, resolved from config and CLI flags
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSettings {
    pub remote: String,
    pub initial_version: Version,
    pub skip_finalized: bool,
    pub rules: BumpRules,
    pub dry_run: bool,
}

impl ReleaseSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let initial_version = Version::parse(&config.versioning.initial_version).map_err(|e| {
            ReleaseTagError::config_file(format!(
                "Invalid initial_version '{}': {}",
                config.versioning.initial_version, e
            ))
        })?;

        Ok(ReleaseSettings {
            remote: config.remote.name.clone(),
            initial_version,
            skip_finalized: config.versioning.skip_finalized,
            rules: BumpRules::from_config(&config.labels, &config.versioning),
            dry_run: false,
        })
    }
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        ReleaseSettings {
            remote: "origin".to_string(),
            initial_version: Version::new(1, 0, 0),
            skip_finalized: true,
            rules: BumpRules::default(),
            dry_run: false,
        }
    }
}

/// The version decided for this run and how it was reached
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    /// Latest tag before this run, `None` for a repository without tags
    pub previous_tag: Option<String>,
    pub labels: BTreeSet<String>,
    pub actions: Vec<BumpAction>,
    pub version: Version,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// The latest tag is already a final release; nothing was done
    AlreadyReleased { tag: String },
    /// The plan was computed but not published (dry run)
    Planned(ReleasePlan),
    /// The tag was created and pushed
    Published(ReleasePlan),
}

/// Decide the next version without touching the repository.
///
/// Returns [ReleaseOutcome::AlreadyReleased] or [ReleaseOutcome::Planned].
pub fn plan_release<R, F>(
    repo: &R,
    forge: &F,
    settings: &ReleaseSettings,
) -> Result<ReleaseOutcome>
where
    R: RepositoryPort,
    F: ForgePort,
{
    let Some(tag) = repo.latest_tag()? else {
        tracing::info!(
            version = %settings.initial_version,
            "no tags found, starting at initial version"
        );
        return Ok(ReleaseOutcome::Planned(ReleasePlan {
            previous_tag: None,
            labels: BTreeSet::new(),
            actions: Vec::new(),
            version: settings.initial_version.clone(),
        }));
    };

    if settings.skip_finalized && is_finalized(&tag) {
        ui::display_skip(&tag);
        return Ok(ReleaseOutcome::AlreadyReleased { tag });
    }

    let current = parse_tag(&tag)?;
    let message = repo.last_commit_message()?;
    let reference = extract_reference(&message)?;
    ui::display_merge_request(reference.as_ref());

    let labels = LabelResolver::new(forge).fetch_labels(reference.as_ref())?;
    ui::display_labels(&labels);

    let outcome = settings.rules.apply(&current, &labels)?;
    ui::display_actions(&outcome.actions);

    Ok(ReleaseOutcome::Planned(ReleasePlan {
        previous_tag: Some(tag),
        labels,
        actions: outcome.actions,
        version: outcome.version,
    }))
}

/// Run the full release: plan, then tag and push unless this is a dry run.
pub fn run_release<R, F>(
    repo: &R,
    forge: &F,
    env: &CiEnvironment,
    settings: &ReleaseSettings,
) -> Result<ReleaseOutcome>
where
    R: RepositoryPort,
    F: ForgePort,
{
    let plan = match plan_release(repo, forge, settings)? {
        ReleaseOutcome::Planned(plan) => plan,
        other => return Ok(other),
    };

    ui::display_current_version(plan.previous_tag.as_deref());

    if settings.dry_run {
        ui::display_planned_version(&plan.version);
        return Ok(ReleaseOutcome::Planned(plan));
    }

    let publisher = TagPublisher::new(
        repo,
        settings.remote.clone(),
        env.repository_url.clone(),
        env.credentials().clone(),
    );
    publisher.publish(&plan.version)?;
    ui::display_new_version(&plan.version);

    Ok(ReleaseOutcome::Published(plan))
}
