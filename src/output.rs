//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every adopter is shown
//! by positional index and name, grouped the way the page groups them, with
//! size and adoption status as the detail. Site files (config, assets) are
//! listed last as context.
//!
//! # Output Format
//!
//! ## Load
//!
//! ```text
//! Product companies
//! 001 Globex (size 120000, full)
//!     Sources: 2
//! 002 Initech (size 5000, not planned)
//!
//! OSS projects
//! 001 Typelevel Cats (size 800, partial)
//!
//! Unverified
//!     9 entries
//!
//! Config
//!     config.toml
//!     static/
//!
//! Last updated: 2025-06-01
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!     001 Product companies (3 adopters)
//!     002 OSS projects (2 adopters)
//!
//! Generated 6 adopters in 3 categories, 9 unverified
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O beyond checking which optional site files exist.

use crate::config::CONFIG_FILE;
use crate::load::Manifest;
use crate::render::group_by_category;
use crate::types::Adopter;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an adopter line: positional index, name, size and status.
///
/// ```text
/// 001 Globex (size 120000, full)
/// 003 Hooli (size 800)
/// ```
fn adopter_line(index: usize, adopter: &Adopter) -> String {
    match adopter.scala3_adoption_status {
        Some(status) => format!(
            "{} {} (size {}, {})",
            format_index(index),
            adopter.name,
            adopter.size,
            status.as_str()
        ),
        None => format!(
            "{} {} (size {})",
            format_index(index),
            adopter.name,
            adopter.size
        ),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Stage 1: Load output
// ============================================================================

/// Format load stage output showing the validated listing.
pub fn format_load_output(manifest: &Manifest, site_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (category, group) in group_by_category(&manifest.content.adopters) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(category.heading().to_string());
        for (i, adopter) in group.iter().enumerate() {
            lines.push(adopter_line(i + 1, adopter));
            if !adopter.sources.is_empty() {
                lines.push(format!("{}Sources: {}", indent(1), adopter.sources.len()));
            }
        }
    }

    if !manifest.unverified.is_empty() {
        lines.push(String::new());
        lines.push("Unverified".to_string());
        lines.push(format!(
            "{}{}",
            indent(1),
            plural(manifest.unverified.len(), "entry", "entries")
        ));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if site_root.join(CONFIG_FILE).exists() {
        lines.push(format!("{}{}", indent(1), CONFIG_FILE));
    }
    if site_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), manifest.config.assets_dir));
    }

    lines.push(String::new());
    lines.push(format!("Last updated: {}", manifest.content.last_updated));

    lines
}

/// Print load output to stdout.
pub fn print_load_output(manifest: &Manifest, site_root: &Path) {
    for line in format_load_output(manifest, site_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing the rendered sections.
pub fn format_generate_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Home \u{2192} index.html".to_string()];

    let groups = group_by_category(&manifest.content.adopters);
    for (i, (category, group)) in groups.iter().enumerate() {
        lines.push(format!(
            "{}{} {} ({})",
            indent(1),
            format_index(i + 1),
            category.heading(),
            plural(group.len(), "adopter", "adopters")
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}, {} unverified",
        plural(manifest.content.adopters.len(), "adopter", "adopters"),
        plural(groups.len(), "category", "categories"),
        manifest.unverified.len()
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest) {
    for line in format_generate_output(manifest) {
        println!("{}", line);
    }
}
