//! Semantic version parsing and increments
//!
//! Pre-release and build counters bump the last number found in the
//! identifier, seeded from `<token>.0` when the identifier is empty.

use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::sync::OnceLock;

use crate::error::{ReleaseTagError, Result};

/// Parse a version from a tag string (e.g., "v1.2.3-rc.1" -> 1.2.3-rc.1)
pub fn parse_tag(tag: &str) -> Result<Version> {
    let clean_tag = tag.trim().trim_start_matches('v').trim_start_matches('V');

    Version::parse(clean_tag).map_err(|e| {
        ReleaseTagError::version(format!("Invalid version tag '{}': {}", tag, e))
    })
}

/// Whether a tag names a final release.
///
/// Only tags with a `-` segment are considered unfinished; everything else has
/// already been released and is left alone.
pub fn is_finalized(tag: &str) -> bool {
    !tag.contains('-')
}

pub fn bump_major(version: &Version) -> Result<Version> {
    let major = increment_component(version.major, "major", version)?;
    Ok(Version::new(major, 0, 0))
}

pub fn bump_minor(version: &Version) -> Result<Version> {
    let minor = increment_component(version.minor, "minor", version)?;
    Ok(Version::new(version.major, minor, 0))
}

pub fn bump_patch(version: &Version) -> Result<Version> {
    let patch = increment_component(version.patch, "patch", version)?;
    Ok(Version::new(version.major, version.minor, patch))
}

fn increment_component(value: u64, name: &str, version: &Version) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        ReleaseTagError::version(format!("Cannot bump {} of {}: out of range", name, version))
    })
}

/// Strip pre-release and build metadata. A no-op on a final version.
pub fn finalize(version: &Version) -> Version {
    Version::new(version.major, version.minor, version.patch)
}

/// Increment the pre-release counter, clearing build metadata.
///
/// `1.2.3` -> `1.2.3-rc.1`, `1.2.3-rc.1+7` -> `1.2.3-rc.2`
pub fn bump_prerelease(version: &Version, token: &str) -> Result<Version> {
    let seed = seed_or(version.pre.as_str(), token);
    let pre = Prerelease::new(&increment_last_number(&seed))?;

    let mut next = version.clone();
    next.pre = pre;
    next.build = BuildMetadata::EMPTY;
    Ok(next)
}

/// Increment the build counter, keeping any pre-release.
///
/// `1.2.3` -> `1.2.3+build.1`, `2.0.0-rc.1+5` -> `2.0.0-rc.1+6`
pub fn bump_build(version: &Version, token: &str) -> Result<Version> {
    let seed = seed_or(version.build.as_str(), token);
    let build = BuildMetadata::new(&increment_last_number(&seed))?;

    let mut next = version.clone();
    next.build = build;
    Ok(next)
}

fn seed_or(identifier: &str, token: &str) -> String {
    if identifier.is_empty() {
        format!("{}.0", token)
    } else {
        identifier.to_string()
    }
}

fn last_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9]+)([^0-9]*)$").expect("static regex is valid"))
}

/// Increment the last run of digits in `identifier`.
///
/// Identifiers without digits are returned unchanged.
pub fn increment_last_number(identifier: &str) -> String {
    let Some(captures) = last_number_regex().captures(identifier) else {
        return identifier.to_string();
    };
    let Some(digits) = captures.get(1) else {
        return identifier.to_string();
    };

    format!(
        "{}{}{}",
        &identifier[..digits.start()],
        increment_decimal(digits.as_str()),
        &identifier[digits.end()..]
    )
}

/// Add one to a decimal string of arbitrary length, keeping its zero padding.
///
/// `007` -> `008`, `099` -> `100`, `999` -> `1000`
fn increment_decimal(digits: &str) -> String {
    let mut bytes: Vec<u8> = digits.bytes().collect();

    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }

    String::from_utf8(bytes).unwrap_or_default()
}
