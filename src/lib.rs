// src/lib.rs

//! _imflowlib_ reconstructs the message flow recorded in an interceptor log
//! and lays it out as a three-lane diagram.
//!
//! The pipeline, each stage over the whole sequence of entries:
//!
//! 1. [`parse_entries`]: raw lines to [`LogEntry`]s.
//! 2. [`classify_entries`]: a [`Classification`] of each entry using a
//!    [`RuleCatalog`].
//! 3. [`associate_payloads`]: link message entries to their payload entries.
//! 4. [`render_flow`]: filter, order, annotate, and lay out the diagram.
//!
//! [`parse_entries`]: crate::readers::entryparser::parse_entries
//! [`LogEntry`]: crate::data::entry::LogEntry
//! [`classify_entries`]: crate::rules::classify::classify_entries
//! [`Classification`]: crate::rules::classify::Classification
//! [`RuleCatalog`]: crate::rules::catalog::RuleCatalog
//! [`associate_payloads`]: crate::readers::associator::associate_payloads
//! [`render_flow`]: crate::printer::flow::render_flow

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
pub mod rules;
#[cfg(test)]
pub mod tests;
