//! Markdown report rendering
//!
//! `MarkdownReport` turns a `ScanResult` into the project document: header,
//! statistics, the tree, a file-type summary and an icon legend. Rendering
//! is pure; only `write_report` touches the filesystem.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::stats::FileTypeSummary;
use crate::tree::{ScanEntry, ScanResult, format_size};

use super::config::{ReportConfig, TIMESTAMP_FORMAT};
use super::icons::{DEFAULT_ICON, DIRECTORY_ICON, ICON_GROUPS, group_index, icon_for};

/// Renders scan results as Markdown.
pub struct MarkdownReport {
    config: ReportConfig,
}

impl MarkdownReport {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Render the complete document.
    pub fn render(&self, result: &ScanResult) -> String {
        let mut output = String::new();
        self.render_header(result, &mut output);
        self.render_statistics(result, &mut output);

        output.push_str("```text\n");
        output.push_str(&self.render_tree(result));
        output.push_str("```\n\n");

        self.render_file_types(result, &mut output);
        self.render_legend(result, &mut output);
        output
    }

    fn render_header(&self, result: &ScanResult, output: &mut String) {
        output.push_str(&format!("# Project Directory: {}\n\n", result.root_name()));
        output.push_str(&format!(
            "Directory structure generated on {}\n\n",
            self.config.generated_at.format(TIMESTAMP_FORMAT)
        ));
    }

    fn render_statistics(&self, result: &ScanResult, output: &mut String) {
        let totals = &result.totals;
        output.push_str(&format!("* Total files: {}\n", totals.file_count));
        output.push_str(&format!("* Total directories: {}\n", totals.dir_count));
        output.push_str(&format!(
            "* Total size: {}\n",
            format_size(totals.total_size_bytes)
        ));
        output.push_str(&format!("* Ignored items: {}\n\n", totals.ignored_count));
    }

    /// Render only the tree lines, one per entry plus the root line.
    pub fn render_tree(&self, result: &ScanResult) -> String {
        let mut output = format!("{} {}/\n", DIRECTORY_ICON, result.root_name());
        let last_flags = last_sibling_flags(&result.entries);

        // ancestors[i] is true when the ancestor at depth i + 1 was the last of its siblings
        let mut ancestors: Vec<bool> = Vec::new();
        for (index, entry) in result.entries.iter().enumerate() {
            let is_last = last_flags[index];
            ancestors.truncate(entry.depth.saturating_sub(1));

            for &ancestor_last in &ancestors {
                output.push_str(if ancestor_last { "    " } else { "│   " });
            }
            output.push_str(if is_last { "└── " } else { "├── " });

            if entry.is_dir {
                output.push_str(&format!("{} {}/", DIRECTORY_ICON, entry.name));
                let nested = result.descendant_count(index);
                if nested > self.config.large_dir_threshold {
                    output.push_str(&format!(" ({} items)", nested));
                }
            } else {
                output.push_str(&self.file_line(entry));
            }
            output.push('\n');

            ancestors.push(is_last);
        }
        output
    }

    fn file_line(&self, entry: &ScanEntry) -> String {
        let modified = entry
            .modified_at
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "{} {} ({}, {})",
            icon_for(entry.extension.as_deref()),
            entry.name,
            format_size(entry.size_bytes),
            modified
        )
    }

    fn render_file_types(&self, result: &ScanResult, output: &mut String) {
        let summary =
            FileTypeSummary::from_histogram(&result.extension_histogram, self.config.top_extensions);
        if summary.is_empty() {
            return;
        }

        output.push_str("## File Type Summary\n\n");
        for (ext, count) in &summary.top {
            let noun = if *count == 1 { "file" } else { "files" };
            output.push_str(&format!("* `{}`: {} {}\n", ext, count, noun));
        }
        if summary.remaining > 0 {
            output.push_str(&format!(
                "* ... and {} more file types\n",
                summary.remaining
            ));
        }
        output.push('\n');
    }

    fn render_legend(&self, result: &ScanResult, output: &mut String) {
        output.push_str("## Icon Legend\n\n");
        output.push_str(&format!("{} - Directory\n", DIRECTORY_ICON));

        let mut used_groups = BTreeSet::new();
        let mut default_used = false;
        for entry in result.entries.iter().filter(|e| !e.is_dir) {
            match group_index(entry.extension.as_deref()) {
                Some(i) => {
                    used_groups.insert(i);
                }
                None => default_used = true,
            }
        }

        for i in used_groups {
            let group = &ICON_GROUPS[i];
            let extensions: Vec<&str> = group
                .extensions
                .iter()
                .copied()
                .filter(|ext| result.extension_histogram.contains_key(*ext))
                .collect();
            output.push_str(&format!(
                "{} - {} ({})",
                group.icon,
                group.label,
                extensions.join(", ")
            ));
            // One line per glyph
            if default_used && group.icon == DEFAULT_ICON {
                output.push_str(" and other files");
                default_used = false;
            }
            output.push('\n');
        }
        if default_used {
            output.push_str(&format!("{} - Other files\n", DEFAULT_ICON));
        }
    }
}

/// For each entry, whether no later sibling follows it.
fn last_sibling_flags(entries: &[ScanEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    // sibling_after[d] is true once an entry at depth d has been seen further down
    let mut sibling_after: Vec<bool> = Vec::new();

    for (index, entry) in entries.iter().enumerate().rev() {
        let depth = entry.depth;
        if sibling_after.len() <= depth {
            sibling_after.resize(depth + 1, false);
        }
        flags[index] = !sibling_after[depth];
        sibling_after[depth] = true;
        // Deeper entries seen so far belong to this entry's subtree or a later sibling's
        sibling_after.truncate(depth + 1);
    }
    flags
}

/// Write the rendered document, replacing any previous one.
pub fn write_report(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)
}
