//! Logger CSV reader
//!
//! Logger exports open with a block of preamble lines (session info, units)
//! before the real header. Those are skipped blindly by count.

use serde::Serialize;

use crate::error::{AnalyzerError, AnalyzerResult};

/// Untyped table: header names + string cells, row order preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows.into_iter().map(|row| fit_width(row, width)).collect();
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse logger CSV text, skipping `preamble_lines` lines before the header
pub fn read_csv(text: &str, preamble_lines: usize) -> AnalyzerResult<RawTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines().enumerate().skip(preamble_lines);

    let header_line = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((idx, line)) => break (idx + 1, line),
            None => {
                return Err(AnalyzerError::Csv {
                    line: preamble_lines + 1,
                    message: format!(
                        "no header row after {} preamble line(s)",
                        preamble_lines
                    ),
                })
            }
        }
    };

    let headers: Vec<String> = split_record(header_line.1, header_line.0)?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(AnalyzerError::Csv {
            line: header_line.0,
            message: "header row is empty".to_string(),
        });
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(split_record(line, idx + 1)?);
    }

    log::debug!(
        "Read CSV: {} column(s), {} data row(s)",
        headers.len(),
        rows.len()
    );
    Ok(RawTable::new(headers, rows))
}

/// Split one CSV record. Quoted fields may hold commas and doubled quotes.
fn split_record(line: &str, line_no: usize) -> AnalyzerResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ('"', false) if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            (',', false) => fields.push(std::mem::take(&mut field)),
            (c, _) => field.push(c),
        }
    }

    if in_quotes {
        return Err(AnalyzerError::Csv {
            line: line_no,
            message: "unterminated quoted field".to_string(),
        });
    }

    fields.push(field);
    Ok(fields)
}

fn fit_width(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_preamble_and_reads_header() {
        let text = "Session: 12\nUnits: metric\nA,B\n1,2\n3,4\n";
        let table = read_csv(text, 2).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 0), Some("3"));
    }

    #[test]
    fn test_quoted_fields_keep_commas_and_quotes() {
        let table = read_csv("name,note\n\"a,b\",\"say \"\"hi\"\"\"\n", 0).unwrap();
        assert_eq!(table.cell(0, 0), Some("a,b"));
        assert_eq!(table.cell(0, 1), Some("say \"hi\""));
    }

    #[test]
    fn test_short_rows_are_padded_and_long_rows_truncated() {
        let table = read_csv("A,B,C\n1\n1,2,3,4\n", 0).unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_header_names_are_trimmed_and_bom_stripped() {
        let table = read_csv("\u{feff} TPS (Main) , IAT\n1,2\n", 0).unwrap();
        assert_eq!(table.column_index("TPS (Main)"), Some(0));
        assert_eq!(table.column_index("IAT"), Some(1));
    }

    #[test]
    fn test_input_shorter_than_preamble_fails() {
        let err = read_csv("only\ntwo\n", 19).unwrap_err();
        assert!(matches!(err, AnalyzerError::Csv { line: 20, .. }));
    }

    #[test]
    fn test_unterminated_quote_fails_with_line_number() {
        let err = read_csv("A\n\"open\n", 0).unwrap_err();
        assert!(matches!(err, AnalyzerError::Csv { line: 2, .. }));
    }
}
