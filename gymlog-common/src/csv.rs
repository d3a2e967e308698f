//! Portable CSV codec for exercise logs
//!
//! Export always writes the fixed 5-column header plus one row per record.
//! Import accepts the 4-column (no set number) or 5-column layout,
//! positionally, with an optional header row. A header row is recognized by
//! its first cell ("Exercise", case-insensitive) and must then match the
//! expected column names exactly, so a file with columns in the wrong order
//! is rejected instead of silently mis-labeled.
//!
//! Every imported row passes the same validation as a form submission
//! (`records::build_record`), and all rows are validated before the caller
//! appends anything, so a malformed file never leaves partial state behind.

use crate::records::{self, SetRecord};
use crate::{Error, Result};

/// Column header of the portable format
pub const EXPORT_HEADER: [&str; 5] = ["Exercise", "Date", "Reps", "Weight", "Set Number"];

/// Filename used for the download artifact
pub const EXPORT_FILENAME: &str = "exercise_log.csv";

/// Serialize records to delimited text with the fixed header row
pub fn to_portable_text(records: &[SetRecord]) -> String {
    let mut out = String::new();
    out.push_str(&header_line());
    out.push('\n');
    for record in records {
        out.push_str(&format_row(record));
        out.push('\n');
    }
    out
}

/// The fixed header row, without trailing newline
pub fn header_line() -> String {
    EXPORT_HEADER.join(",")
}

/// One data row, without trailing newline
pub fn format_row(record: &SetRecord) -> String {
    format!(
        "{},{},{},{},{}",
        format_field(&record.exercise),
        record.date.format(records::DATE_FORMAT),
        record.reps,
        record.weight,
        record.set_number
    )
}

/// Parse delimited text into records
///
/// Accepts an optional header row and 4- or 5-column data rows (a 4-column
/// row defaults set number to 1). Returns `Error::CsvParse` naming the first
/// offending line; an input with a valid header and no data rows parses to
/// an empty vec, a completely empty input is rejected.
pub fn parse_portable_text(input: &str) -> Result<Vec<SetRecord>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        rows.push((line_no, split_row(line, line_no)?));
    }

    if rows.is_empty() {
        return Err(Error::CsvParse {
            line: 1,
            message: "no rows found".to_string(),
        });
    }

    // Header detection and enforcement
    if rows[0].1.first().map(|c| c.trim().eq_ignore_ascii_case("Exercise")) == Some(true) {
        let (line, header) = rows.remove(0);
        check_header(&header, line)?;
    }

    let mut records = Vec::with_capacity(rows.len());
    for (line, fields) in rows {
        records.push(parse_row(&fields, line)?);
    }
    Ok(records)
}

fn check_header(cells: &[String], line: usize) -> Result<()> {
    let expected: &[&str] = match cells.len() {
        4 => &EXPORT_HEADER[..4],
        5 => &EXPORT_HEADER,
        n => {
            return Err(Error::CsvParse {
                line,
                message: format!("header has {} columns, expected 4 or 5", n),
            })
        }
    };
    for (cell, want) in cells.iter().zip(expected) {
        if !cell.trim().eq_ignore_ascii_case(want) {
            return Err(Error::CsvParse {
                line,
                message: format!("unexpected header column '{}', expected '{}'", cell.trim(), want),
            });
        }
    }
    Ok(())
}

fn parse_row(fields: &[String], line: usize) -> Result<SetRecord> {
    if fields.len() != 4 && fields.len() != 5 {
        return Err(Error::CsvParse {
            line,
            message: format!("row has {} columns, expected 4 or 5", fields.len()),
        });
    }

    let reps: i64 = fields[2].trim().parse().map_err(|_| Error::CsvParse {
        line,
        message: format!("reps '{}' is not an integer", fields[2].trim()),
    })?;
    let weight: f64 = fields[3].trim().parse().map_err(|_| Error::CsvParse {
        line,
        message: format!("weight '{}' is not a number", fields[3].trim()),
    })?;
    let set_number: i64 = match fields.get(4) {
        Some(cell) => cell.trim().parse().map_err(|_| Error::CsvParse {
            line,
            message: format!("set number '{}' is not an integer", cell.trim()),
        })?,
        None => 1,
    };

    records::build_record(&fields[0], &fields[1], reps, weight, set_number).map_err(|e| {
        let message = match e {
            Error::InvalidInput(m) => m,
            other => other.to_string(),
        };
        Error::CsvParse { line, message }
    })
}

/// Split one line into fields, honoring double-quoted cells
///
/// Inside quotes a doubled quote is a literal quote character.
fn split_row(line: &str, line_no: usize) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => {
                    fields.push(std::mem::take(&mut field));
                }
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(Error::CsvParse {
            line: line_no,
            message: "unterminated quoted field".to_string(),
        });
    }
    fields.push(field);
    Ok(fields)
}

/// Quote a field when it contains a delimiter, quote, or newline
fn format_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
