//! Operator-facing output.
//!
//! These lines are for people reading CI job logs, not for machines.

use console::style;
use semver::Version;
use std::collections::BTreeSet;

use crate::domain::BumpAction;
use crate::forge::MergeRequestRef;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_merge_request(reference: Option<&MergeRequestRef>) {
    match reference {
        Some(reference) => display_status(&format!("Merge request {}", reference)),
        None => display_status("No merge request referenced by the last commit"),
    }
}

pub fn display_labels(labels: &BTreeSet<String>) {
    let joined = labels.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
    println!("MR Labels [{}]", joined);
}

pub fn display_actions(actions: &[BumpAction]) {
    for action in actions {
        println!("{}", action);
    }
}

pub fn display_skip(tag: &str) {
    display_status(&format!("Skip already tagged commits {}", style(tag).cyan()));
}

pub fn display_current_version(tag: Option<&str>) {
    println!("Current version {}", tag.unwrap_or("(none)"));
}

pub fn display_new_version(version: &Version) {
    display_success(&format!("New version {}", style(version).green().bold()));
}

pub fn display_planned_version(version: &Version) {
    display_status(&format!(
        "Dry run: would tag and push {}",
        style(version).green().bold()
    ));
}
