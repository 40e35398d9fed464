// src/printer/mod.rs

//! The `printer` module is for laying out the flow diagram
//! ([`render_flow`]) and printing it ([`PrinterFlow`]) with text effects
//! (color).
//!
//! [`render_flow`]: crate::printer::flow::render_flow
//! [`PrinterFlow`]: crate::printer::printers::PrinterFlow

pub mod flow;
pub mod printers;
