// src/readers/entryparser.rs

//! Parse [`RawLine`]s into [`LogEntry`]s.
//!
//! A line matching the entry header,
//! `[<yyyy-MM-dd HH:mm:ss.ffff> | <level>] <component> - <message>`,
//! starts a new `LogEntry`. Any other line is a continuation line of the
//! most recent `LogEntry` of the same file.
//!
//! [`RawLine`]: crate::data::entry::RawLine
//! [`LogEntry`]: crate::data::entry::LogEntry

use crate::common::FPath;
use crate::data::datetime::{datetime_parse_entry_header, DateTimeL, TzInterpretation};
use crate::data::entry::{Entries, FPathP, LogEntry, RawLine};
use crate::readers::linereader::read_files;

use std::io::{Error, ErrorKind, Result};
use std::sync::Arc;

use ::lazy_static::lazy_static;
use ::regex::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// The entry header. Captures timestamp, level, component, and message.
pub const RP_ENTRY_HEADER: &str =
    r"^\[(\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}.\d{4})\s\|\s+(\w+)\]\s([\w.\[\]`]+)\s-\s(.*)$";

lazy_static! {
    // `Regex::new` runs at run-time, create this once on-demand
    static ref ENTRY_HEADER_REGEX: Regex = Regex::new(RP_ENTRY_HEADER).unwrap();
}

/// Error message of a continuation line with no prior entry in its file.
pub const ERR_NO_PRIOR_ENTRY: &str = "line is not an entry header and there is no prior entry";

fn error_at(
    line: &RawLine,
    message: String,
) -> Error {
    Error::new(ErrorKind::InvalidData, format!("{}:{}: {}", line.path, line.line_num, message))
}

/// Does `text` match the entry header?
pub fn is_entry_header(text: &str) -> bool {
    ENTRY_HEADER_REGEX.is_match(text)
}

/// Text of capture group `index`, or empty text.
fn group<'a>(
    captures: &Captures<'a>,
    index: usize,
) -> &'a str {
    captures.get(index).map_or("", |m| m.as_str())
}

/// Create a `LogEntry` from a header line.
fn entry_from_captures(
    line: &RawLine,
    captures: &Captures,
    tz: TzInterpretation,
) -> Result<LogEntry> {
    let dt_str: &str = group(captures, 1);
    let dt: DateTimeL = match datetime_parse_entry_header(dt_str, tz) {
        Some(val) => val,
        None => {
            return Err(error_at(line, format!("invalid timestamp {:?} for {} time", dt_str, tz)));
        }
    };

    Ok(LogEntry::new(
        Arc::clone(&line.path),
        line.line_num,
        dt,
        String::from(group(captures, 2)),
        String::from(group(captures, 3)),
        String::from(group(captures, 4)),
    ))
}

/// Parse `lines` into [`Entries`], in the same order.
///
/// `lines` may come from several files, file after file. A continuation
/// line is never attached to an entry of a different file.
///
/// Fails with [`ErrorKind::InvalidData`] on a continuation line before the
/// first header of its file, or on a timestamp that is invalid for `tz`.
pub fn parse_entries(
    lines: &[RawLine],
    tz: TzInterpretation,
) -> Result<Entries> {
    defn!("({} lines, {:?})", lines.len(), tz);
    let mut entries: Entries = Entries::new();
    // the file of the most recent entry
    let mut path_last: Option<&FPathP> = None;
    for line in lines.iter() {
        if let Some(captures) = ENTRY_HEADER_REGEX.captures(line.text.as_str()) {
            let entry = entry_from_captures(line, &captures, tz)?;
            defo!("entry {} at {}:{}", entries.len(), line.path, line.line_num);
            entries.push(entry);
            path_last = Some(&line.path);
            continue;
        }
        let same_file: bool = match path_last {
            Some(path) => Arc::ptr_eq(path, &line.path) || path == &line.path,
            None => false,
        };
        match entries.last_mut() {
            Some(entry) if same_file => entry.push_extra_line(line.text.clone()),
            _ => {
                defx!("continuation line at {}:{} has no entry", line.path, line.line_num);
                return Err(error_at(line, String::from(ERR_NO_PRIOR_ENTRY)));
            }
        }
    }
    defx!("{} entries", entries.len());

    Ok(entries)
}

/// Read and parse every file in `paths`.
pub fn parse_files(
    paths: &[FPath],
    tz: TzInterpretation,
) -> Result<Entries> {
    let lines = read_files(paths)?;

    parse_entries(&lines, tz)
}
