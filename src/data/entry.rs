// src/data/entry.rs

//! Implements a [`LogEntry`] struct and the [`RawLine`] struct it is
//! parsed from.
//!
//! [`LogEntry`]: crate::data::entry::LogEntry
//! [`RawLine`]: crate::data::entry::RawLine

use crate::common::{Count, EntryIndex, FPath, LineNum, NLc};
use crate::data::datetime::DateTimeL;

use std::fmt;
use std::sync::Arc;

use ::once_cell::unsync::OnceCell;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ, deñ};

/// Thread-safe [Atomic Reference Counting Pointer] to a file path shared by
/// every line and entry from that file.
///
/// [Atomic Reference Counting Pointer]: std::sync::Arc
pub type FPathP = Arc<FPath>;

// -------
// RawLine

/// One line of text read from a log file, without the line ending.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawLine {
    /// file the line was read from
    pub path: FPathP,
    /// 1-based line number within `path`
    pub line_num: LineNum,
    /// the text
    pub text: String,
}

pub type RawLines = Vec<RawLine>;

impl RawLine {
    pub fn new(
        path: FPathP,
        line_num: LineNum,
        text: String,
    ) -> RawLine {
        RawLine {
            path,
            line_num,
            text,
        }
    }
}

// --------
// LogEntry

/// The arena of all parsed [`LogEntry`], in parse order
/// (by file, then by line number).
///
/// Other entries are referred to by [`EntryIndex`] into this arena.
///
/// [`EntryIndex`]: crate::common::EntryIndex
pub type Entries = Vec<LogEntry>;

/// A `LogEntry` is one header line of the interceptor log,
/// `[<timestamp> | <level>] <component> - <message>`,
/// and the zero or more continuation lines that follow it.
///
/// The continuation lines are only appended during parsing.
///
/// A `LogEntry` may be linked to one later "payload" entry that holds the
/// serialized details of the same message. That link is set at most once,
/// only by [`associate_payloads`].
///
/// [`associate_payloads`]: crate::readers::associator::associate_payloads
#[derive(Clone)]
pub struct LogEntry {
    /// file of the header line
    path: FPathP,
    /// line number of the header line
    line_num: LineNum,
    dt: DateTimeL,
    /// severity level token, e.g. `INFO`, `warn`
    level: String,
    /// the originating namespace or module, e.g. `Foo.Bar`
    component: String,
    /// remainder of the header line after the `" - "`
    message: String,
    /// continuation lines, in order
    extra_lines: Vec<String>,
    /// the payload entry of this entry
    payload: OnceCell<EntryIndex>,
    /// the entry that claimed this entry as its payload
    payload_of: OnceCell<EntryIndex>,
}

impl fmt::Debug for LogEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("path", &self.path)
            .field("line_num", &self.line_num)
            .field("dt", &self.dt)
            .field("level", &self.level)
            .field("component", &self.component)
            .field("message", &self.message)
            .field("extra_lines.len", &self.extra_lines.len())
            .field("payload", &self.payload.get())
            .field("payload_of", &self.payload_of.get())
            .finish()
    }
}

impl LogEntry {
    /// Create a `LogEntry` with no continuation lines and no payload.
    pub fn new(
        path: FPathP,
        line_num: LineNum,
        dt: DateTimeL,
        level: String,
        component: String,
        message: String,
    ) -> LogEntry {
        LogEntry {
            path,
            line_num,
            dt,
            level,
            component,
            message,
            extra_lines: Vec::new(),
            payload: OnceCell::new(),
            payload_of: OnceCell::new(),
        }
    }

    /// Append a continuation line. Only the parser appends.
    pub(crate) fn push_extra_line(
        &mut self,
        line: String,
    ) {
        self.extra_lines.push(line);
        deñ!("LogEntry.push_extra_line(), self.extra_lines.len() is now {}", self.extra_lines.len());
    }

    pub fn path(&self) -> &FPath {
        self.path.as_ref()
    }

    pub fn line_num(&self) -> LineNum {
        self.line_num
    }

    pub fn dt(&self) -> &DateTimeL {
        &self.dt
    }

    pub fn level(&self) -> &str {
        self.level.as_str()
    }

    pub fn component(&self) -> &str {
        self.component.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn extra_lines(&self) -> &[String] {
        self.extra_lines.as_slice()
    }

    pub fn count_extra_lines(&self) -> Count {
        self.extra_lines.len() as Count
    }

    pub fn has_extra_lines(&self) -> bool {
        !self.extra_lines.is_empty()
    }

    /// The continuation lines joined by newlines, as one searchable text.
    pub fn extra_lines_text(&self) -> String {
        let mut buf: String = String::with_capacity(
            self.extra_lines.iter().map(|l| l.len() + 1).sum()
        );
        for (i, line) in self.extra_lines.iter().enumerate() {
            if i != 0 {
                buf.push(NLc);
            }
            buf.push_str(line);
        }

        buf
    }

    /// The message text followed by every continuation line.
    pub fn content(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.message.as_str()).chain(self.extra_lines.iter().map(String::as_str))
    }

    /// Case-insensitive comparison of the level token.
    pub fn level_is(
        &self,
        level: &str,
    ) -> bool {
        self.level.eq_ignore_ascii_case(level)
    }

    /// The payload entry of this entry, if one was associated.
    pub fn payload(&self) -> Option<EntryIndex> {
        self.payload.get().copied()
    }

    /// The entry that claimed this entry as its payload, if any.
    pub fn payload_of(&self) -> Option<EntryIndex> {
        self.payload_of.get().copied()
    }

    /// Has this entry been claimed as the payload of another entry?
    pub fn is_claimed(&self) -> bool {
        self.payload_of.get().is_some()
    }

    /// Set the payload of this entry. Returns `Err(index)` if a payload was
    /// already set.
    pub(crate) fn set_payload(
        &self,
        index: EntryIndex,
    ) -> Result<(), EntryIndex> {
        self.payload.set(index)
    }

    /// Mark this entry as claimed by `owner`. Returns `Err(owner)` if it was
    /// already claimed.
    pub(crate) fn set_payload_of(
        &self,
        owner: EntryIndex,
    ) -> Result<(), EntryIndex> {
        self.payload_of.set(owner)
    }
}
