//! Row codec for the session log file.
//!
//! Columns are fixed: `date,task,work_min`. Only the task column can carry
//! separators, so it is the only one that is ever quoted.

use std::borrow::Cow;

use chrono::NaiveDate;

use crate::session::SessionRecord;

pub(crate) const HEADER: [&str; 3] = ["date", "task", "work_min"];
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// One physical record of the file with the line it started on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Result of splitting a file into rows.
///
/// `unterminated` holds the starting line of a quoted field that never
/// closed; everything from that line on is lost to `rows`.
#[derive(Debug, Default)]
pub(crate) struct Rows {
    pub rows: Vec<Row>,
    pub unterminated: Option<usize>,
}

pub(crate) fn header_line() -> String {
    format!("{}\n", HEADER.join(","))
}

pub(crate) fn encode_row(record: &SessionRecord) -> String {
    format!(
        "{},{},{}\n",
        record.date.format(DATE_FORMAT),
        quote(&record.task),
        record.work_minutes
    )
}

fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub(crate) fn split_rows(text: &str) -> Rows {
    let mut out = Rows::default();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                push_row(&mut out.rows, row_line, std::mem::take(&mut fields));
                line += 1;
                row_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        out.unterminated = Some(row_line);
        return out;
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_row(&mut out.rows, row_line, fields);
    }
    out
}

// Blank lines carry no record.
fn push_row(rows: &mut Vec<Row>, line: usize, fields: Vec<String>) {
    if fields.len() == 1 && fields[0].trim().is_empty() {
        return;
    }
    rows.push(Row { line, fields });
}

pub(crate) fn is_header(row: &Row) -> bool {
    row.fields.len() == HEADER.len()
        && row
            .fields
            .iter()
            .zip(HEADER)
            .all(|(field, name)| field.trim_start_matches('\u{feff}').trim() == name)
}

pub(crate) fn decode_row(row: &Row) -> Result<SessionRecord, String> {
    let [date, task, work_min] = row.fields.as_slice() else {
        return Err(format!(
            "expected {} columns, found {}",
            HEADER.len(),
            row.fields.len()
        ));
    };

    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date '{date}'"))?;
    if task.trim().is_empty() {
        return Err("task is empty".to_string());
    }
    let work_minutes = work_min
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| format!("work_min must be a positive integer, got '{work_min}'"))?;

    Ok(SessionRecord {
        date,
        task: task.clone(),
        work_minutes,
    })
}
