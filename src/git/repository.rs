use crate::error::{ReleaseTagError, Result};
use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Repository as Git2Repo};
use percent_encoding::percent_decode_str;
use std::cell::Cell;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            ReleaseTagError::repository(format!(
                "Not in a git repository ({}): {}",
                path.display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    fn head_commit(&self) -> std::result::Result<git2::Commit<'_>, git2::Error> {
        self.repo.head()?.peel_to_commit()
    }
}

impl super::RepositoryPort for Git2Repository {
    fn latest_tag(&self) -> Result<Option<String>> {
        let mut describe_opts = DescribeOptions::new();
        describe_opts.describe_tags();

        let describe = match self.repo.describe(&describe_opts) {
            Ok(describe) => describe,
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!("no tags reachable from HEAD: {}", e);
                return Ok(None);
            }
            Err(e) => {
                return Err(ReleaseTagError::repository(format!(
                    "Cannot describe HEAD: {}",
                    e
                )))
            }
        };

        // Abbreviation 0 prints the bare tag, like `git describe --abbrev=0`
        let mut format_opts = DescribeFormatOptions::new();
        format_opts.abbreviated_size(0);

        let tag = describe
            .format(Some(&format_opts))
            .map_err(|e| ReleaseTagError::repository(format!("Cannot format tag: {}", e)))?;

        Ok(Some(tag.trim().to_string()))
    }

    fn last_commit_message(&self) -> Result<String> {
        let commit = self
            .head_commit()
            .map_err(|e| ReleaseTagError::repository(format!("Cannot read HEAD commit: {}", e)))?;

        Ok(String::from_utf8_lossy(commit.message_bytes()).into_owned())
    }

    fn set_push_url(&self, remote: &str, url: &str) -> Result<()> {
        self.repo.find_remote(remote).map_err(|e| {
            ReleaseTagError::publish(format!("Cannot find remote '{}': {}", remote, e))
        })?;

        self.repo
            .remote_set_pushurl(remote, Some(url))
            .map_err(|e| {
                ReleaseTagError::publish(format!(
                    "Cannot set push URL of remote '{}': {}",
                    remote, e
                ))
            })?;

        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self
            .head_commit()
            .map_err(|e| ReleaseTagError::publish(format!("Cannot read HEAD commit: {}", e)))?;

        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| ReleaseTagError::publish(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_tag(&self, remote_name: &str, name: &str) -> Result<()> {
        // Looked up after set_push_url so the fresh push URL is used
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            ReleaseTagError::publish(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let attempts = Cell::new(0u8);
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|url, username_from_url, allowed_types| {
            attempts.set(attempts.get() + 1);
            if attempts.get() > 1 {
                return Err(git2::Error::from_str("credentials rejected by remote"));
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Some((username, password)) = credentials_from_url(url) {
                    return git2::Cred::userpass_plaintext(&username, &password);
                }
            }

            if let Some(username) = username_from_url {
                if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                    return git2::Cred::ssh_key_from_agent(username);
                }
            }

            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        tracing::debug!(remote = remote_name, refspec = %refspec, "pushing tag");

        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseTagError::publish(format!("Network error during push: {}", e))
                } else {
                    ReleaseTagError::publish(format!("Failed to push tag '{}': {}", name, e))
                }
            })
    }
}

/// Decoded `user:password` from the userinfo of a URL, if both are present.
fn credentials_from_url(url: &str) -> Option<(String, String)> {
    let parsed = url::Url::parse(url).ok()?;
    let password = parsed.password()?;
    if parsed.username().is_empty() {
        return None;
    }

    let username = percent_decode_str(parsed.username())
        .decode_utf8_lossy()
        .into_owned();
    let password = percent_decode_str(password).decode_utf8_lossy().into_owned();
    Some((username, password))
}
