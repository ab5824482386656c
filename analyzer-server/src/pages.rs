//! HTML pages
//!
//! One Bootstrap page: headline, upload form, optional result block.

use boat_analyzer_core::logic::report::{escape_html, render_table};
use boat_analyzer_core::Analysis;

use crate::handlers::analyses::download_url;

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Boat Analyzer</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
</head>
<body class="p-4 bg-dark text-light">
<div class="container">
"#;

const UPLOAD_FORM: &str = r#"<form method="post" action="/upload" enctype="multipart/form-data">
<div class="row mb-2">
  <div class="col"><input class="form-control" type="date" name="date_depart" required></div>
  <div class="col"><input class="form-control" type="time" name="heure_depart" required></div>
  <div class="col"><input class="form-control" name="numero" placeholder="Vessel number" required></div>
</div>
<div class="row mb-2">
  <div class="col-md-4">
    <input class="form-control" type="number" step="0.1" name="ambient_temp" placeholder="Ambient temperature (°C)" required>
  </div>
</div>
<input class="form-control mb-2" type="file" name="file" required>
<button class="btn btn-primary">Analyse</button>
</form>
"#;

const PAGE_TAIL: &str = "</div>\n</body>\n</html>\n";

fn page(headline: &str, body: &str) -> String {
    format!(
        "{}<h1 class=\"text-center mb-4\">{}</h1>\n{}{}{}",
        PAGE_HEAD,
        escape_html(headline),
        UPLOAD_FORM,
        body,
        PAGE_TAIL
    )
}

pub fn index() -> String {
    page("Boat Analyzer – ready", "")
}

pub fn result(analysis: &Analysis, preview_rows: usize) -> String {
    let stats = analysis.stats();
    let mut body = String::from("<hr>\n");

    body.push_str(&format!(
        "<p>Vessel <strong>{}</strong> · departure {} · ambient {:.1} °C</p>\n",
        escape_html(&analysis.metadata.vessel_id),
        analysis.metadata.departure().format("%Y-%m-%d %H:%M"),
        analysis.metadata.ambient_temp,
    ));
    body.push_str(&format!(
        "<p>{} of {} row(s) evaluated, {} dropped, {} raw violation(s). \
         <a class=\"link-light\" href=\"{}\">Download annotated CSV</a></p>\n",
        stats.samples_evaluated,
        stats.rows_read,
        stats.rows_dropped,
        stats.raw_violations,
        download_url(analysis.id),
    ));
    if let Some(first) = analysis.evaluation.first_violation() {
        body.push_str(&format!(
            "<p class=\"text-danger\">Sustained breach confirmed at {:.2} s after {:.2} s: {}</p>\n",
            first.sample.elapsed_time,
            first.accumulated,
            first.flags.breaches().join(", "),
        ));
    }
    body.push_str("<div class=\"table-responsive\">");
    body.push_str(&render_table(analysis, preview_rows));
    body.push_str("</div>\n");

    page(&analysis.verdict().headline(), &body)
}

pub fn error(message: &str) -> String {
    let body = format!(
        "<hr>\n<div class=\"alert alert-danger\"><pre class=\"mb-0\">{}</pre></div>\n",
        escape_html(message)
    );
    page("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_has_form_fields() {
        let html = index();
        for field in ["date_depart", "heure_depart", "numero", "ambient_temp", "name=\"file\""] {
            assert!(html.contains(field), "missing {field}");
        }
        assert!(html.contains("Boat Analyzer – ready"));
    }

    #[test]
    fn test_result_page_names_first_breach() {
        use boat_analyzer_core::{analyze_csv, ColumnSchema, EnvelopeConfig, RunMetadata};
        use chrono::{NaiveDate, NaiveTime};

        let file = "\
Section Time,TPS (Main),Lambda,Fuel Pressure,IAT,ECT
9.8,99,0.86,340,30,30
10.0,99,0.95,340,30,30
10.2,99,0.95,340,30,30
10.6,99,0.95,340,30,30
";
        let meta = RunMetadata::new(
            NaiveDate::from_ymd_opt(2024, 7, 14).unwrap(),
            NaiveTime::from_hms_opt(14, 5, 0).unwrap(),
            "17",
            20.0,
        );
        let analysis = analyze_csv(
            file.as_bytes(),
            0,
            meta,
            &ColumnSchema::default(),
            &EnvelopeConfig::default(),
        )
        .unwrap();

        let html = result(&analysis, 60);
        assert!(html.contains("DISQUALIFIED – violation from 10.60 s"));
        assert!(html.contains("confirmed at 10.60 s after 0.80 s: mixture"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error("missing required column(s): <ECT>");
        assert!(html.contains("&lt;ECT&gt;"));
        assert!(!html.contains("<ECT>"));
    }
}
