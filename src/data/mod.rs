// src/data/mod.rs

//! The `data` module is data containers for [`RawLine`]s and
//! [`LogEntry`]s.
//!
//! ## Definitions of data
//!
//! ### RawLine
//!
//! A "raw line" is one line of text from a log file that:
//!
//! * begins after a prior line or the beginning of a file.
//! * ends with a newline character `'\n'` or the end of a file.
//!
//! The line ending is not kept. A "raw line" knows its file and its 1-based
//! line number in that file.
//!
//! #### LogEntry
//!
//! A "log entry" is a sequence of "raw lines" that:
//!
//! * have an entry header on the first line,
//!   `[<timestamp> | <level>] <component> - <message>`.
//! * have zero or more following lines that are not entry headers, the
//!   "continuation lines".
//!
//! A "log entry" is represented by a [`LogEntry`] and found by
//! [`parse_entries`].
//!
//! A `LogEntry` that announces a message sent to or received from another
//! system is an "envelope" entry. A later `LogEntry` whose message is
//! `<Name> message details:` carries the serialized fields of that message in
//! its continuation lines; it is the "payload" entry of the envelope.
//!
//! [`RawLine`]: crate::data::entry::RawLine
//! [`LogEntry`]: crate::data::entry::LogEntry
//! [`parse_entries`]: crate::readers::entryparser::parse_entries

pub mod datetime;
pub mod entry;
