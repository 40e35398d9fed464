// src/rules/annotation.rs

//! Per-message-type annotation rules.
//!
//! An [`AnnotationRule`] mines the continuation lines of a payload
//! [`LogEntry`] for field values with an ordered list of regular
//! expressions, then a projection function combines the captured values into
//! a short string, e.g. `(555-123-4567)`.
//!
//! Rules are kept in an [`AnnotationRegistry`] keyed by message-type name
//! (case-insensitive).
//!
//! [`LogEntry`]: crate::data::entry::LogEntry

use crate::data::entry::LogEntry;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::collections::HashMap;
use std::fmt;

use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Regular expression pattern, passed to [`regex::Regex::new`].
///
/// [`regex::Regex::new`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html#method.new
pub type RegexPattern = str;

/// The captured values of the extractors of one rule, in extractor order.
/// An extractor that did not match is `None`.
pub type CapturedValues<'a> = [Option<&'a str>];

/// Combines [`CapturedValues`] into the annotation text.
pub type AnnotationProjection = for<'a, 'b> fn(&'a CapturedValues<'b>) -> String;

/// Static description of an [`AnnotationRule`]:
/// (message-type name, extractor patterns, projection).
///
/// Each extractor pattern must have one capture group.
pub type AnnotationRuleData = (&'static str, &'static [&'static RegexPattern], AnnotationProjection);

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// formatting helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Format exactly ten ASCII digits as `NNN-NNN-NNNN`.
/// Blank text becomes empty text. Any other text is returned unchanged.
pub fn format_phone_number(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    if text.len() == 10 && text.bytes().all(|b| b.is_ascii_digit()) {
        return format!("{}-{}-{}", &text[..3], &text[3..6], &text[6..]);
    }

    String::from(text)
}

/// Format an optional `label: value` segment, e.g. `, IsTwoStep: true`.
/// An absent or blank value becomes empty text.
pub fn format_with_header(
    text: Option<&str>,
    header: &str,
) -> String {
    match text {
        Some(value) if !value.trim().is_empty() => format!("{}{}", header, value),
        _ => String::new(),
    }
}

/// The captured value at `index`, if any.
#[inline(always)]
pub fn captured<'a>(
    values: &CapturedValues<'a>,
    index: usize,
) -> Option<&'a str> {
    values.get(index).copied().flatten()
}

/// The captured value at `index`, or empty text when absent.
#[inline(always)]
pub fn captured_or_empty<'a>(
    values: &CapturedValues<'a>,
    index: usize,
) -> &'a str {
    captured(values, index).unwrap_or("")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// projections
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn project_phone(values: &CapturedValues<'_>) -> String {
    format!("({})", format_phone_number(captured_or_empty(values, 0)))
}

fn project_value(values: &CapturedValues<'_>) -> String {
    format!("({})", captured_or_empty(values, 0))
}

fn project_uri_state(values: &CapturedValues<'_>) -> String {
    format!("({}/{})", captured_or_empty(values, 0), captured_or_empty(values, 1))
}

fn project_disposition(values: &CapturedValues<'_>) -> String {
    format!("(DispositionId: {})", captured_or_empty(values, 0))
}

fn project_invite_internal(values: &CapturedValues<'_>) -> String {
    format!(
        "({}{})",
        captured_or_empty(values, 0),
        format_with_header(captured(values, 1), ", IsTwoStep: "),
    )
}

fn project_add_external(values: &CapturedValues<'_>) -> String {
    format!(
        "({}{})",
        format_phone_number(captured_or_empty(values, 0)),
        format_with_header(captured(values, 1), ", IsTwoStep: "),
    )
}

fn project_transfer_to_employee(values: &CapturedValues<'_>) -> String {
    format!(
        "(DesiredRoleId: {}{}{})",
        captured_or_empty(values, 0),
        format_with_header(captured(values, 1), ", IsWarmTransfer: "),
        format_with_header(captured(values, 2), ", IsTwoStep: "),
    )
}

fn project_error(values: &CapturedValues<'_>) -> String {
    format!("({} — {})", captured_or_empty(values, 0), captured_or_empty(values, 1))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// rule table
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const RP_AVAILABILITY: &RegexPattern = r#""Availability":\s"([^"]+)","#;
const RP_IS_TWO_STEP: &RegexPattern = r#""IsTwoStep":\s([^,]+),"#;

pub const ANNOTATION_RULE_DATAS_LEN: usize = 12;

/// The annotation rules of the interceptor deployment.
pub const ANNOTATION_RULE_DATAS: [AnnotationRuleData; ANNOTATION_RULE_DATAS_LEN] = [
    ("RequestMakeCall", &[r#""WTW_DNIS":\s"([^"]+)","#], project_phone),
    ("EventRinging", &[r#"\.OtherDN":\s"([^"]+)","#], project_phone),
    ("EmployeePresenceChangingMessage", &[RP_AVAILABILITY], project_value),
    ("EmployeePresenceChangedMessage", &[RP_AVAILABILITY], project_value),
    ("EventReleased", &[r#"\.ConnID":\s"([^"]+)","#], project_value),
    (
        "ParticipantChangedMessage",
        &[r#""Uri":\s"([^"]*)""#, r#""State":\s"([^"]*)","#],
        project_uri_state,
    ),
    ("DispositionCallMessage", &[r#""DispositionId":\s(\d+),"#], project_disposition),
    (
        "InviteInternalParticipantMessage",
        &[r#""InvitedSipAddress":\s"([^"]+)","#, RP_IS_TWO_STEP],
        project_invite_internal,
    ),
    (
        "AddExternalParticipantMessage",
        &[r#""PhoneNumber":\s"([^"]+)""#, RP_IS_TWO_STEP],
        project_add_external,
    ),
    (
        "TransferCallToEmployeeMessage",
        &[r#""DesiredRoleId":\s([^,]+),"#, r#""IsWarmTransfer":\s([^,]+),"#, RP_IS_TWO_STEP],
        project_transfer_to_employee,
    ),
    ("TserverReconnectionStatusChangedMessage", &[r#""Status":\s"([^"]+)""#], project_value),
    (
        "EventError",
        &[r#"\.ErrorCode":\s(\d+),"#, r#"\.ErrorMessage":\s"([^"]*)","#],
        project_error,
    ),
];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// AnnotationRule
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Ordered extractors and a projection for one message type.
pub struct AnnotationRule {
    extractors: Vec<Regex>,
    projection: AnnotationProjection,
}

impl fmt::Debug for AnnotationRule {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("AnnotationRule")
            .field("extractors", &self.extractors.iter().map(Regex::as_str).collect::<Vec<&str>>())
            .finish()
    }
}

impl AnnotationRule {
    /// Compile the `patterns` into extractors.
    pub fn new(
        patterns: &[&RegexPattern],
        projection: AnnotationProjection,
    ) -> Result<AnnotationRule, regex::Error> {
        let mut extractors: Vec<Regex> = Vec::with_capacity(patterns.len());
        for pattern in patterns.iter() {
            extractors.push(Regex::new(pattern)?);
        }

        Ok(AnnotationRule {
            extractors,
            projection,
        })
    }

    pub fn count_extractors(&self) -> usize {
        self.extractors.len()
    }

    /// Run every extractor over `text` and project the captured values.
    ///
    /// Returns `None` if no extractor captured a value, or the projection
    /// is blank.
    pub fn annotate_text(
        &self,
        text: &str,
    ) -> Option<String> {
        defn!("({:?})", str_to_String_noraw(text));
        let values: Vec<Option<&str>> = self
            .extractors
            .iter()
            .map(|regex| {
                regex
                    .captures(text)
                    .and_then(|captures| captures.get(1))
                    .map(|match_| match_.as_str())
            })
            .collect();
        defo!("values {:?}", values);
        if values.iter().all(Option::is_none) {
            defx!("no extractor matched, return None");
            return None;
        }
        let annotation: String = (self.projection)(values.as_slice());
        if annotation.trim().is_empty() {
            defx!("projection is blank, return None");
            return None;
        }
        defx!("return {:?}", annotation);

        Some(annotation)
    }

    /// Run [`annotate_text`] over `lines` joined by newlines.
    ///
    /// [`annotate_text`]: AnnotationRule::annotate_text
    pub fn annotate_lines(
        &self,
        lines: &[String],
    ) -> Option<String> {
        self.annotate_text(lines.join("\n").as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// AnnotationRegistry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`AnnotationRule`]s keyed by lowercase message-type name.
#[derive(Debug, Default)]
pub struct AnnotationRegistry {
    rules: HashMap<String, AnnotationRule>,
}

impl AnnotationRegistry {
    /// Create a registry from [`AnnotationRuleData`]s.
    pub fn from_datas(datas: &[AnnotationRuleData]) -> Result<AnnotationRegistry, regex::Error> {
        let mut registry = AnnotationRegistry {
            rules: HashMap::with_capacity(datas.len()),
        };
        for (name, patterns, projection) in datas.iter() {
            registry.insert(name, AnnotationRule::new(patterns, *projection)?);
        }

        Ok(registry)
    }

    /// Add or replace the rule for `name`.
    pub fn insert(
        &mut self,
        name: &str,
        rule: AnnotationRule,
    ) {
        self.rules.insert(name.to_lowercase(), rule);
    }

    /// The rule for `name`, case-insensitive.
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&AnnotationRule> {
        self.rules.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The annotation for a message named `name` from its `payload`
    /// entry.
    ///
    /// Returns `None` if the payload has no continuation lines, there is no
    /// rule for `name`, or the rule produced nothing.
    pub fn annotate(
        &self,
        name: &str,
        payload: &LogEntry,
    ) -> Option<String> {
        if !payload.has_extra_lines() {
            defñ!("payload has no extra lines, return None");
            return None;
        }
        let rule = match self.get(name) {
            Some(rule) => rule,
            None => {
                defñ!("no rule for {:?}, return None", name);
                return None;
            }
        };

        rule.annotate_text(payload.extra_lines_text().as_str())
    }
}
