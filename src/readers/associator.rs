// src/readers/associator.rs

//! Link an "envelope" [`LogEntry`] to its later "payload" `LogEntry`.
//!
//! The first entry logs that a message was sent or received, the payload
//! entry, `<Name> message details:`, logs the message's serialized fields.
//! They are linked by message-type name.
//!
//! [`LogEntry`]: crate::data::entry::LogEntry

use crate::common::{Count, EntryIndex};
use crate::debug::printers::de_err;
use crate::data::entry::{Entries, LogEntry};
use crate::rules::catalog::{strip_switch_name_suffix, RuleCatalog};
use crate::rules::classify::{Classification, Classifications};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Does the captured `payload_name` of a payload-details entry match the
/// message of `owner`?
///
/// For a switch message the `payload_name` has the
/// [`SWITCH_NAME_SUFFIX`] removed before comparing.
///
/// [`SWITCH_NAME_SUFFIX`]: crate::rules::catalog::SWITCH_NAME_SUFFIX
pub fn payload_name_matches(
    payload_name: &str,
    owner: &Classification,
) -> bool {
    let name: &str = match owner.payload_key() {
        Some(val) => val,
        None => return false,
    };
    let payload_name: &str = match owner.is_switch_message() {
        true => strip_switch_name_suffix(payload_name),
        false => payload_name,
    };

    payload_name.eq_ignore_ascii_case(name)
}

/// Is `candidate` a payload-details entry for the message of `owner`?
pub fn is_payload_for(
    candidate: &LogEntry,
    owner: &Classification,
    catalog: &RuleCatalog,
) -> bool {
    match catalog.payload_details_name(candidate.message()) {
        Some(payload_name) => payload_name_matches(payload_name, owner),
        None => false,
    }
}

/// Find and link the payload of every message entry in `entries`.
///
/// Entries are visited in order. For each message entry the following
/// [`RuleCatalog::payload_lookahead`] entries are searched, skipping any
/// entry already claimed as a payload. The first matching entry becomes
/// the payload and is claimed.
///
/// An entry that already has a payload is left as-is, so calling this
/// twice links nothing new.
///
/// `classes` must be the [`Classifications`] of `entries`.
///
/// Returns the count of payloads linked.
pub fn associate_payloads(
    entries: &Entries,
    classes: &Classifications,
    catalog: &RuleCatalog,
) -> Count {
    defn!("({} entries, lookahead {})", entries.len(), catalog.payload_lookahead());
    debug_assert_eq!(entries.len(), classes.len(), "entries and classes differ in length");
    let lookahead: usize = catalog.payload_lookahead();
    // each entry's payload-details name is matched once, not once per owner
    let payload_names: Vec<Option<&str>> = entries
        .iter()
        .map(|entry| catalog.payload_details_name(entry.message()))
        .collect();
    let mut count: Count = 0;
    for (index, (entry, class)) in entries.iter().zip(classes.iter()).enumerate() {
        if class.payload_key().is_none() || entry.payload().is_some() {
            continue;
        }
        let end: usize = entries.len().min(index.saturating_add(lookahead).saturating_add(1));
        let found: Option<EntryIndex> = (index + 1..end).find(|&at| {
            match payload_names[at] {
                Some(payload_name) => !entries[at].is_claimed() && payload_name_matches(payload_name, class),
                None => false,
            }
        });
        let at: EntryIndex = match found {
            Some(val) => val,
            None => continue,
        };
        // `is_claimed` was checked so neither link is already set
        if entries[at].set_payload_of(index).is_err() || entry.set_payload(at).is_err() {
            de_err!("payload link of entry {} or entry {} was already set", index, at);
            continue;
        }
        defo!("entry {} payload is entry {}", index, at);
        count += 1;
    }
    defx!("linked {} payloads", count);

    count
}

/// The annotation of the entry at `index`, from its payload.
///
/// Returns `None` if the entry is not a message, has no payload, or its
/// annotation rule produced nothing.
pub fn annotation_of(
    entries: &Entries,
    classes: &Classifications,
    index: EntryIndex,
    catalog: &RuleCatalog,
) -> Option<String> {
    let name: &str = classes.get(index)?.payload_key()?;
    let payload: &LogEntry = entries.get(entries.get(index)?.payload()?)?;

    catalog.annotations().annotate(name, payload)
}
