//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here only print; nothing is read from the user.

use std::path::Path;

use console::style;

use crate::boundary::BoundaryWarning;
use crate::release::{PlanFailure, ReleasePlan, ReleaseRecord, StatusReport};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the project status: root, current version, and uncommitted changes.
///
/// # Arguments
/// * `root` - Project root directory
/// * `report` - Version and dirty flag
/// * `changed_files` - Paths reported by version control (shown when dirty)
pub fn display_status_report(root: &Path, report: &StatusReport, changed_files: &[String]) {
    println!("{}", style("Project status").bold());
    println!("  Directory:       {}", root.display());
    println!(
        "  Current version: {}",
        style(report.version.to_string()).green()
    );

    let changes = match report.dirty {
        Some(true) => style("yes").yellow(),
        Some(false) => style("no").green(),
        None => style("unknown").dim(),
    };
    println!("  Uncommitted:     {}", changes);

    if !changed_files.is_empty() {
        println!("\n{}", style("Changed files:").underlined());
        for path in changed_files {
            println!("  {}", path);
        }
    }
}

/// Display the version transition of a bump or release.
pub fn display_version_change(record: &ReleaseRecord) {
    println!("\n{}", style(format!("{} release", record.kind)).bold());
    println!("  From: {}", style(record.previous.to_string()).red());
    println!("  To:   {}", style(record.new.to_string()).green());
}

/// Display the commit and tag recorded for a release.
pub fn display_release_summary(record: &ReleaseRecord) {
    println!(
        "\n{} Release {} created",
        style("✓").green(),
        style(&record.tag_name).bold()
    );
    println!("  Commit: {}", record.commit_message);
    println!("  Tag:    {}", style(&record.tag_name).cyan());
}

/// Numbered list of the steps of a plan, one per line.
pub fn format_plan(plan: &ReleasePlan) -> String {
    let mut out = format!("{}\n", style("Dry run, nothing will be changed:").bold());
    for (i, step) in plan.steps().iter().enumerate() {
        out.push_str(&format!("  Step {}: {}\n", i + 1, step));
    }
    out
}

/// Display the steps of a plan without running them.
pub fn display_plan(plan: &ReleasePlan) {
    print!("\n{}", format_plan(plan));
}

/// What a partially executed plan left behind, below the error line.
pub fn format_plan_failure(failure: &PlanFailure) -> String {
    if failure.completed.is_empty() {
        return "  Nothing was changed.\n".to_string();
    }
    let mut out = String::from("  Already done (not rolled back):\n");
    for step in &failure.completed {
        out.push_str(&format!("    {} {}\n", style("✓").green(), step));
    }
    out
}

/// Display what a partially executed plan left behind.
pub fn display_plan_failure(failure: &PlanFailure) {
    display_error(&failure.to_string());
    eprint!("{}", format_plan_failure(failure));
}

/// Display the available example watch faces.
pub fn display_examples(names: &[String]) {
    if names.is_empty() {
        println!("No examples found");
        return;
    }
    println!("{}", style("Available examples:").bold());
    for name in names {
        println!("  - {}", name);
    }
}
