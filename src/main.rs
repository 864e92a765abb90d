use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

use release_tagger::config;
use release_tagger::env::CiEnvironment;
use release_tagger::forge::GitLabClient;
use release_tagger::git::Git2Repository;
use release_tagger::logging;
use release_tagger::ui;
use release_tagger::workflow::{run_release, ReleaseOutcome, ReleaseSettings};

#[derive(clap::Parser)]
#[command(
    name = "release-tagger",
    about = "Tag the current commit with a version derived from merge request labels"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Path inside the git repository to tag")]
    repo: String,

    #[arg(long, help = "Compute the next version without creating or pushing a tag")]
    dry_run: bool,

    #[arg(long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("release-tagger {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let env = CiEnvironment::from_process_env(&config.credentials)?;

    let mut settings = ReleaseSettings::from_config(&config)?;
    settings.dry_run = args.dry_run;

    let repo = Git2Repository::open(&args.repo)?;

    let forge = GitLabClient::new(
        env.forge_host(),
        env.project_id.clone(),
        env.private_token(),
        Duration::from_secs(config.forge.timeout_secs),
    )?;

    match run_release(&repo, &forge, &env, &settings)? {
        ReleaseOutcome::AlreadyReleased { tag } => {
            tracing::info!(tag = %tag, "latest tag is final, nothing to do");
        }
        ReleaseOutcome::Planned(plan) => {
            tracing::info!(version = %plan.version, "dry run finished");
        }
        ReleaseOutcome::Published(plan) => {
            tracing::info!(version = %plan.version, "release tagged");
        }
    }

    Ok(())
}
