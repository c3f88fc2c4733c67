use crate::report::model::Row;

/// Render rows as a comma-separated table with a header line.
///
/// Fields are not escaped: a comma inside a value shifts the columns.
pub fn render_text<R: Row>(rows: &[R]) -> String {
    let mut out = String::new();
    out.push_str(&R::HEADER.join(","));
    out.push('\n');
    for row in rows {
        out.push_str(&row.fields().join(","));
        out.push('\n');
    }
    out
}

/// Render rows as a pretty-printed JSON array.
pub fn render_json<R: Row>(rows: &[R]) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(rows)?;
    out.push('\n');
    Ok(out)
}
