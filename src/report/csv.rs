//! Person-record CSV tables.

use crate::types::PersonRecord;

pub const CSV_COLUMNS: [&str; 6] = [
    "username",
    "full_name",
    "is_verified",
    "is_private",
    "pk",
    "profile_pic_url",
];

const LINE_END: &str = "\r\n";

/// Quote a field only when it holds a delimiter, a quote or a line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let row: Vec<String> = fields.into_iter().map(escape_field).collect();
    out.push_str(&row.join(","));
    out.push_str(LINE_END);
}

/// Render records as CSV with a header row. An empty record set renders as
/// an empty document, without a header.
pub fn render_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a PersonRecord>,
{
    let mut records = records.into_iter().peekable();
    let mut out = String::new();
    if records.peek().is_none() {
        return out;
    }

    push_row(&mut out, CSV_COLUMNS);
    for r in records {
        push_row(
            &mut out,
            [
                r.username.as_str(),
                r.full_name.as_str(),
                flag(r.is_verified),
                flag(r.is_private),
                r.id.as_deref().unwrap_or(""),
                r.profile_pic_url.as_str(),
            ],
        );
    }
    out
}
