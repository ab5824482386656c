//! HTML table preview
//!
//! Bootstrap-classed markup, meant to be embedded in a page. Every cell is
//! escaped; logger column names and cells come from the uploaded file.

use super::export::{derived_cells, DERIVED_COLUMNS};
use crate::logic::analysis::Analysis;

/// Escape text for HTML element and attribute content
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the first `limit` evaluated rows as a `<table>`
pub fn render_table(analysis: &Analysis, limit: usize) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"table table-dark table-striped table-sm\">\n<thead><tr>");

    for column in analysis.columns() {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    for column in DERIVED_COLUMNS {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in analysis.evaluation.rows.iter().take(limit) {
        if row.qualified {
            html.push_str("<tr>");
        } else {
            html.push_str(&format!(
                "<tr class=\"table-danger\" title=\"{}\">",
                row.flags.breaches().join(", ")
            ));
        }

        if let Some(cells) = analysis.table.rows.get(row.sample.row_index) {
            for cell in cells {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
        }
        for cell in derived_cells(row) {
            html.push_str(&format!("<td>{}</td>", cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Lambda 1"), "Lambda 1");
    }
}
