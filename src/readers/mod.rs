// src/readers/mod.rs

//! "Readers" for _imflowlib_.
//!
//! ## Overview of readers
//!
//! * [`process_paths`] expands user paths and wildcards to files.
//! * [`read_lines`] reads a file into [`RawLine`s].
//! * [`parse_entries`] parses `RawLine`s into [`LogEntry`s].
//! * [`associate_payloads`] links each message `LogEntry` to its payload
//!   `LogEntry`.
//!
//! Also see [_Definitions of data_].
//!
//! _These are not rust "Readers"; these do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`RawLine`s]: crate::data::entry::RawLine
//! [`LogEntry`s]: crate::data::entry::LogEntry
//! [`process_paths`]: crate::readers::filepreprocessor::process_paths
//! [`read_lines`]: crate::readers::linereader::read_lines
//! [`parse_entries`]: crate::readers::entryparser::parse_entries
//! [`associate_payloads`]: crate::readers::associator::associate_payloads

pub mod associator;
pub mod entryparser;
pub mod filepreprocessor;
pub mod helpers;
pub mod linereader;
