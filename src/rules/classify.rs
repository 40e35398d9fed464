// src/rules/classify.rs

//! Classify a [`LogEntry`] by remote system, direction, severity, and
//! "special info" status.
//!
//! Only the primary message text of an entry is classified; continuation
//! lines are never classified.
//!
//! [`LogEntry`]: crate::data::entry::LogEntry

use crate::data::entry::{Entries, LogEntry};
use crate::rules::catalog::{
    Direction,
    Remote,
    RuleCatalog,
    RuleCategory,
};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Severity of an entry, from its level token (case-insensitive).
/// Level tokens are an open set; unknown tokens are [`Severity::Other`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Info,
    Other,
}

impl Severity {
    pub fn from_level(level: &str) -> Severity {
        if level.eq_ignore_ascii_case("fatal") {
            Severity::Fatal
        } else if level.eq_ignore_ascii_case("error") {
            Severity::Error
        } else if level.eq_ignore_ascii_case("warn") || level.eq_ignore_ascii_case("warning") {
            Severity::Warning
        } else if level.eq_ignore_ascii_case("info") {
            Severity::Info
        } else {
            Severity::Other
        }
    }
}

/// The classification of one [`LogEntry`], computed once by [`classify`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Classification {
    /// remote system of a message entry
    pub remote: Option<Remote>,
    /// direction of a message entry
    pub direction: Option<Direction>,
    /// message-type name of a message entry, or the call name of a TIM
    /// service request
    pub name: Option<String>,
    pub severity: Severity,
    /// a warning whose text is known noise
    pub ignored_warning: bool,
    /// display text of a special info entry
    pub special_info: Option<String>,
    /// matched an ignored-info rule
    pub ignored_info: bool,
    /// a switch message in the emphasized list
    pub emphasized: bool,
}

/// One [`Classification`] per entry of an [`Entries`], same order.
///
/// [`Entries`]: crate::data::entry::Entries
pub type Classifications = Vec<Classification>;

/// Classify the message text of `entry`.
pub fn classify(
    entry: &LogEntry,
    catalog: &RuleCatalog,
) -> Classification {
    let text: &str = entry.message();
    let (remote, direction, name) = match catalog.find_message(text) {
        Some((RuleCategory::SentTo(remote), name)) => (Some(remote), Some(Direction::Sent), Some(String::from(name))),
        Some((RuleCategory::ReceivedFrom(remote), name)) => {
            (Some(remote), Some(Direction::Received), Some(String::from(name)))
        }
        Some((_, _)) | None => (None, None, None),
    };
    let severity = Severity::from_level(entry.level());
    let ignored_warning: bool = severity == Severity::Warning && catalog.is_ignored_warning(text);
    let emphasized: bool = match (remote, name.as_ref()) {
        (Some(Remote::Switch), Some(name_)) => catalog.is_emphasized_switch_message(name_),
        _ => false,
    };

    Classification {
        remote,
        direction,
        name,
        severity,
        ignored_warning,
        special_info: catalog.special_info_text(text).map(String::from),
        ignored_info: catalog.is_ignored_info(text),
        emphasized,
    }
}

/// Classify every entry of `entries`.
pub fn classify_entries(
    entries: &Entries,
    catalog: &RuleCatalog,
) -> Classifications {
    defn!("({} entries)", entries.len());
    let classes: Classifications = entries
        .iter()
        .map(|entry| classify(entry, catalog))
        .collect();
    defx!("{} messages", classes.iter().filter(|c| c.is_message()).count());

    classes
}

impl Classification {
    /// Sent to or received from any remote system.
    pub fn is_message(&self) -> bool {
        self.remote.is_some()
    }

    pub fn is_sent(&self) -> bool {
        self.direction == Some(Direction::Sent)
    }

    pub fn is_received(&self) -> bool {
        self.direction == Some(Direction::Received)
    }

    pub fn is_switch_message(&self) -> bool {
        self.remote == Some(Remote::Switch)
    }

    pub fn is_softphone_message(&self) -> bool {
        self.remote == Some(Remote::Softphone)
    }

    /// A bus message or a TIM service request; both are drawn in the bus
    /// lane.
    pub fn is_bus_lane_message(&self) -> bool {
        matches!(self.remote, Some(Remote::Bus) | Some(Remote::TimService))
    }

    pub fn is_tim_service_request(&self) -> bool {
        self.remote == Some(Remote::TimService)
    }

    /// The message-type name to match against payload-details entries.
    /// TIM service requests have no payloads.
    pub fn payload_key(&self) -> Option<&str> {
        match self.remote {
            Some(Remote::Switch) | Some(Remote::Bus) | Some(Remote::Softphone) => self.name.as_deref(),
            Some(Remote::TimService) | None => None,
        }
    }

    /// The message-type name if this is a switch message.
    pub fn switch_message_name(&self) -> Option<&str> {
        match self.remote {
            Some(Remote::Switch) => self.name.as_deref(),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// A warning that is not known noise.
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning && !self.ignored_warning
    }

    /// Level is error, fatal, or warning, including known noise warnings.
    pub fn is_severe_level(&self) -> bool {
        matches!(self.severity, Severity::Fatal | Severity::Error | Severity::Warning)
    }

    pub fn is_special_info(&self) -> bool {
        self.special_info.is_some()
    }

    pub fn is_ignored_info(&self) -> bool {
        self.ignored_info
    }

    /// Info level, not a message, and not ignored.
    pub fn is_non_message_info(&self) -> bool {
        self.severity == Severity::Info && !self.is_message() && !self.ignored_info
    }

    pub fn is_emphasized(&self) -> bool {
        self.emphasized
    }
}
