// src/tests/common.rs

//! Shared data and helpers for tests.

#![allow(dead_code)]

use crate::common::FPath;
use crate::data::datetime::TzInterpretation;
use crate::data::entry::{Entries, FPathP, RawLines};
use crate::readers::associator::associate_payloads;
use crate::readers::entryparser::parse_entries;
use crate::readers::linereader::read_lines_from;
use crate::rules::catalog::{RuleCatalog, RuleCatalogOptions};
use crate::rules::classify::{classify_entries, Classifications};

pub const FPATH_A: &str = "/var/log/interceptor/a.log";
pub const FPATH_B: &str = "/var/log/interceptor/b.log";

/// A log of one outgoing call.
pub const LOG_CALL: &str = "\
[2024-01-05 10:00:00.0000 | INFO] Foo.Bar - Interceptor version: 4.2.0
[2024-01-05 10:00:01.0000 | INFO] Foo.Bar - Sending <RequestMakeCall> message to <TServer>
[2024-01-05 10:00:01.0500 | INFO] Foo.Bar - Passing through message to CoreBus
[2024-01-05 10:00:01.1000 | INFO] Foo.Bar - <RequestMakeCall> message details:
{
  \"WTW_DNIS\": \"5551234567\",
}
[2024-01-05 10:00:02.0000 | INFO] Foo.Bar - Received Genesys message: EventRingingData
[2024-01-05 10:00:02.0100 | INFO] Foo.Bar - <EventRinging> message details:
  \"Call.OtherDN\": \"8005550199\",
[2024-01-05 10:00:03.0000 | INFO] Foo.Bar - Sending <CallStartedMessage> message to <CoreBus>
[2024-01-05 10:00:03.5000 | WARN] Foo.Bar - setting name 'Interceptor' is invalid
[2024-01-05 10:00:04.0000 | INFO] Foo.Bar - Received <ParticipantChangedMessage> message from <SSC>
[2024-01-05 10:00:04.0010 | INFO] Foo.Bar - <ParticipantChangedMessage> message details:
  \"Uri\": \"sip:1234@example.com\"
  \"State\": \"Connected\",
[2024-01-05 10:00:05.0000 | ERROR] Foo.Bar - Lost connection to T-Server
";

/// One header line of `level` at `time` on 2024-01-05.
pub fn header(
    time: &str,
    level: &str,
    message: &str,
) -> String {
    format!("[2024-01-05 {} | {}] Foo.Bar - {}", time, level, message)
}

/// `text` as the `RawLines` of a file at `path`.
pub fn raw_lines(
    path: &str,
    text: &str,
) -> RawLines {
    read_lines_from(FPathP::new(FPath::from(path)), text.as_bytes()).unwrap()
}

/// The default `RuleCatalog`.
pub fn catalog_default() -> RuleCatalog {
    RuleCatalog::new(RuleCatalogOptions::default()).unwrap()
}

/// A `RuleCatalog` with payload lookahead `lookahead`.
pub fn catalog_lookahead(lookahead: usize) -> RuleCatalog {
    RuleCatalog::new(RuleCatalogOptions {
        payload_lookahead: lookahead,
        ..RuleCatalogOptions::default()
    })
    .unwrap()
}

/// Parse the `(path, text)` files as UTC.
pub fn parse_files_text(files: &[(&str, &str)]) -> Entries {
    let mut lines: RawLines = RawLines::new();
    for (path, text) in files.iter() {
        lines.extend(raw_lines(path, text));
    }
    parse_entries(&lines, TzInterpretation::Utc).unwrap()
}

/// Parse, classify, and associate the `(path, text)` files.
pub fn process_files_text(
    files: &[(&str, &str)],
    catalog: &RuleCatalog,
) -> (Entries, Classifications) {
    let entries: Entries = parse_files_text(files);
    let classes: Classifications = classify_entries(&entries, catalog);
    associate_payloads(&entries, &classes, catalog);

    (entries, classes)
}

/// Parse, classify, and associate one file `text` at `FPATH_A`.
pub fn process_text(
    text: &str,
    catalog: &RuleCatalog,
) -> (Entries, Classifications) {
    process_files_text(&[(FPATH_A, text)], catalog)
}
