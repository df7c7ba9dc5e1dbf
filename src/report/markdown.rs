//! Markdown audit report.

use chrono::{DateTime, Utc};

use super::RecordLookup;
use crate::types::{AuditCategory, AuditSets};

/// Render a padded Markdown table; the first row is the header.
pub fn markdown_table(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };
    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|r| r.get(col).map_or(0, |c| c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let fmt_row = |row: &[String]| -> String {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{:<w$}", row.get(i).map_or("", String::as_str), w = *w))
            .collect();
        format!("| {} |\n", cells.join(" | "))
    };

    let mut out = fmt_row(header.as_slice());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("| {} |\n", rule.join(" | ")));
    for row in &rows[1..] {
        out.push_str(&fmt_row(row.as_slice()));
    }
    out
}

fn mark(flag: bool, symbol: &str) -> String {
    if flag {
        symbol.to_string()
    } else {
        String::new()
    }
}

fn people_rows(names: &[String], lookup: &RecordLookup<'_>) -> Vec<Vec<String>> {
    let mut rows = vec![["#", "Username", "Full name", "Verified", "Private"]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()];
    for (i, name) in names.iter().enumerate() {
        let record = lookup.get(name);
        rows.push(vec![
            (i + 1).to_string(),
            name.clone(),
            record.map(|r| r.full_name.clone()).unwrap_or_default(),
            mark(record.is_some_and(|r| r.is_verified), "✅"),
            mark(record.is_some_and(|r| r.is_private), "🔒"),
        ]);
    }
    rows
}

/// Full report: title, summary table, then one table per derived category.
pub fn render_markdown(
    username: &str,
    sets: &AuditSets,
    lookup: &RecordLookup<'_>,
    generated: DateTime<Utc>,
) -> String {
    let mut out = format!(
        "# Instagram audit for **{username}**\n\n_Generated: {}_\n\n",
        generated.format("%Y-%m-%d %H:%M:%SZ")
    );

    let mut summary = vec![vec!["Metric".to_string(), "Count".to_string()]];
    summary.extend(
        sets.summary_rows()
            .into_iter()
            .map(|(label, n)| vec![label.to_string(), n.to_string()]),
    );
    out.push_str("## Summary\n\n");
    out.push_str(&markdown_table(&summary));
    out.push_str("\n\n");

    for category in AuditCategory::ALL {
        let names = sets.category(category);
        out.push_str(&format!("## {} ({})\n\n", category.label(), names.len()));
        out.push_str(&markdown_table(&people_rows(names, lookup)));
        out.push('\n');
    }
    out
}
