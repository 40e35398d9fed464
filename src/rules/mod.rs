// src/rules/mod.rs

//! The `rules` module is the immutable catalogs of patterns that give
//! meaning to [`LogEntry`]s.
//!
//! * A [`RuleCatalog`] holds the ordered [`ClassificationRule`]s and word
//!   lists. It is created once and passed by reference.
//! * [`classify`] uses a `RuleCatalog` to derive a [`Classification`] of an
//!   entry's message text.
//! * An [`AnnotationRegistry`] holds the per-message-type
//!   [`AnnotationRule`]s that summarize a payload entry.
//!
//! [`LogEntry`]: crate::data::entry::LogEntry
//! [`RuleCatalog`]: crate::rules::catalog::RuleCatalog
//! [`ClassificationRule`]: crate::rules::catalog::ClassificationRule
//! [`classify`]: crate::rules::classify::classify
//! [`Classification`]: crate::rules::classify::Classification
//! [`AnnotationRegistry`]: crate::rules::annotation::AnnotationRegistry
//! [`AnnotationRule`]: crate::rules::annotation::AnnotationRule

pub mod annotation;
pub mod catalog;
pub mod classify;
