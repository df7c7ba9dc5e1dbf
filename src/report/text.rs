//! Plain-text listings: the console summary and the legacy per-category file.

use crate::types::{AuditCategory, AuditSets};

/// Counts block printed at the end of a run.
pub fn render_summary(username: &str, sets: &AuditSets) -> String {
    let title = format!("Audit for @{username}");
    let mut out = format!("{title}\n{}\n", "=".repeat(title.chars().count()));

    let rows = sets.summary_rows();
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (label, count) in rows {
        out.push_str(&format!("{label:<width$} : {count}\n"));
    }
    out
}

/// Legacy numbered listing, one block per derived category.
pub fn render_legacy_listing(username: &str, sets: &AuditSets) -> String {
    let mut out = format!("{username}\n{}\n\n", "=".repeat(username.chars().count()));
    for category in AuditCategory::ALL {
        let names = sets.category(category);
        out.push_str(&format!("{} ({}):\n", category.label(), names.len()));
        for (i, name) in names.iter().enumerate() {
            out.push_str(&format!("  {:>3}. {name}\n", i + 1));
        }
        out.push('\n');
    }
    out
}
