// src/rules/catalog.rs

//! The [`RuleCatalog`]: every pattern and word list used to classify the
//! message text of a [`LogEntry`].
//!
//! A `RuleCatalog` is created once at startup and passed by reference to
//! each component. It is never changed after creation.
//!
//! The patterns are an ordered list of [`ClassificationRule`]s, each a
//! (pattern, capture index, [`RuleCategory`]) tuple. The relevant
//! constants are [`DIRECTION_RULE_DATAS`], [`SPECIAL_INFO_PATTERNS`], and
//! [`IGNORED_INFO_PATTERNS`].
//!
//! [`LogEntry`]: crate::data::entry::LogEntry

use crate::rules::annotation::{
    AnnotationRegistry,
    RegexPattern,
    ANNOTATION_RULE_DATAS,
};

use std::fmt;

use ::regex::{Regex, RegexBuilder};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// categories
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The remote systems the interceptor exchanges messages with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Remote {
    /// the telephony switch (Genesys T-Server)
    Switch,
    /// the internal service bus (CoreBus)
    Bus,
    /// the softphone control service (SSC)
    Softphone,
    /// the TIM service, only ever sent to
    TimService,
}

impl fmt::Display for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remote::Switch => write!(f, "switch"),
            Remote::Bus => write!(f, "bus"),
            Remote::Softphone => write!(f, "softphone"),
            Remote::TimService => write!(f, "TIM service"),
        }
    }
}

/// Direction of a message, from the point of view of the interceptor.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Sent,
    Received,
}

/// What a matching [`ClassificationRule`] says about an entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RuleCategory {
    /// message sent to the remote, capture is the message-type name
    SentTo(Remote),
    /// message received from the remote, capture is the message-type name
    ReceivedFrom(Remote),
    /// `<Name> message details:`, capture is the message-type name
    PayloadDetails,
    /// operationally interesting event, capture is the display text
    SpecialInfo,
    /// info noise, never shown
    IgnoredInfo,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// rule tables
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Static description of a [`ClassificationRule`]:
/// (pattern, capture index, category).
pub type ClassificationRuleData = (&'static RegexPattern, usize, RuleCategory);

pub const RP_SENT_TO_SWITCH: &RegexPattern = r"Sending\s<([\w.]+)>\smessage\sto\s<TServer>";
pub const RP_RECEIVED_FROM_SWITCH: &RegexPattern = r"^Received\sGenesys\smessage:\s+(\S+)";
pub const RP_SENT_TO_BUS: &RegexPattern = r"Sending\s<([\w.]+)>\smessage\sto\s<CoreBus>";
pub const RP_RECEIVED_FROM_BUS: &RegexPattern = r"^Received\s<([\w.]+)>\smessage\sfrom\s<lq\.tcp://[^>]+>";
pub const RP_SENT_TO_SOFTPHONE: &RegexPattern = r"Sending\s<([\w.]+)>\smessage\sto\s<SSC>";
pub const RP_RECEIVED_FROM_SOFTPHONE: &RegexPattern = r"^Received\s<([\w.]+)>\smessage\sfrom\s<SSC>";
pub const RP_SENT_TO_TIM_SERVICE: &RegexPattern = r"Sending\s<([\w/]+)>\srequest\sto\s<TIM\sservice>";
pub const RP_PAYLOAD_DETAILS: &RegexPattern = r"^<([\w.]+)>\smessage\sdetails:";

pub const DIRECTION_RULE_DATAS_LEN: usize = 7;

/// The message direction rules, in precedence order.
pub const DIRECTION_RULE_DATAS: [ClassificationRuleData; DIRECTION_RULE_DATAS_LEN] = [
    (RP_SENT_TO_SWITCH, 1, RuleCategory::SentTo(Remote::Switch)),
    (RP_RECEIVED_FROM_SWITCH, 1, RuleCategory::ReceivedFrom(Remote::Switch)),
    (RP_SENT_TO_BUS, 1, RuleCategory::SentTo(Remote::Bus)),
    (RP_RECEIVED_FROM_BUS, 1, RuleCategory::ReceivedFrom(Remote::Bus)),
    (RP_SENT_TO_SOFTPHONE, 1, RuleCategory::SentTo(Remote::Softphone)),
    (RP_RECEIVED_FROM_SOFTPHONE, 1, RuleCategory::ReceivedFrom(Remote::Softphone)),
    (RP_SENT_TO_TIM_SERVICE, 1, RuleCategory::SentTo(Remote::TimService)),
];

pub const SPECIAL_INFO_PATTERNS_LEN: usize = 24;

/// Special info patterns, in precedence order. Capture group 1 is the
/// displayed text.
pub const SPECIAL_INFO_PATTERNS: [&RegexPattern; SPECIAL_INFO_PATTERNS_LEN] = [
    r"^(\(for\sWTWCallId\s=\s\d+,\sConnID\s=\s[\da-f]+\))$",
    r"^(\(Initialize\soutbound\scall\sfor\sWTWCallId\s=\s\d+,\sConnID\s=\s[\da-f]+\))$",
    r"^(Unregistering\sCall\s\([\da-f]+\))\sas\slistener\sfor\sAcceptOfferMessage\.\.\.$",
    r"^(Adding\sparticipant\s'[^']*',\slist\sis\snow\s\[[^\]]+\])",
    r"^(Removing\sparticipant\s'[^']*',\slist\sis\snow\s\[[^\]]*\])",
    r"^(Setting\sparticipants\sfrom\sattached\sdata,\slist\sis\snow\s\[[^\]]+\])",
    r"^(Created\sconsultation\scall\sobject\s\([\da-f]+\))$",
    r"^(Waiting\sfor\sEventAttachedDataChanged\shaving\sdifferent\sRTargetAgentSelected,\sfound\schange\sfrom\s'.*'\sto\s'.*'.)$",
    r"^(Interceptor\sversion:\s+.*)$",
    r"^(Registering\sGenesys\saddress\s\(.+\))\.\.\.$",
    r"^(Retrieving\suser-specific\ssettings\s\(for\s'[^']*'\))\.\.\.",
    r"^(Using\sLocal\sURI\s\(lq.tcp://[^/]*/interceptor\))",
    r"^(Channel\s\w+\son\s\w+\sendpoint\s\([^)]*\))",
    r"^(Set\senvironment\sspecific\sskill:\ss\.Env\.\w+)",
    r"^(Setting\sAgentSipUri\sto:\s.+)$",
    r"^(Setting\sAgentEmployeeId\sto:\s\d+)",
    r"^(Unfinished\scall\sfile\sfound\s-\sattempting\sto\srecreate\scall\sobjects.)",
    r"^(Genesys\sreports\sno\sunfinished\scalls)",
    r"^(Unfinished\scall\s[\da-f]+\srecreated)",
    r"^(Swapping\sheld\scalls\sActive:\s[\da-f]+\sHeld:\s[\da-f]+)",
    r"^(Deferring\sremoval\sof\sparticipant\s\(DN=[^)]+\)\suntil\scall\sinvitation\saccepted)",
    r"^(Connection\sID\schanged\sfrom\s[\da-f]+\sto\s[\da-f]+)",
    r"^(Assign\snew\sCallEndpointNumber\s\([^)]+\)\sfrom\sparticipant\sserialization\sfor\s[^/]*/.*)$",
    r"^(>>>.*)$",
];

pub const IGNORED_INFO_PATTERNS: [&RegexPattern; 1] = [
    r"Passing through message to",
];

/// Warning texts that are known noise (exact text, case-insensitive).
pub const IGNORED_WARNINGS_DEFAULT: [&str; 1] = [
    "setting name 'Interceptor' is invalid",
];

/// Switch messages drawn with emphasis; these begin a call.
pub const EMPHASIZED_SWITCH_MESSAGES_DEFAULT: [&str; 2] = [
    "RequestMakeCall",
    "EventRinging",
];

/// Switch messages that are keep-alive traffic.
pub const HEARTBEAT_MESSAGES_DEFAULT: [&str; 2] = [
    "RequestQueryServer",
    "EventServerInfo",
];

/// Default count of subsequent entries searched for a payload.
pub const PAYLOAD_LOOKAHEAD_DEFAULT: usize = 2000;

/// Suffix stripped from switch message-type names, e.g. the payload of
/// `EventRinging` may be logged as `EventRingingData`.
pub const SWITCH_NAME_SUFFIX: &str = "data";

/// Remove a trailing [`SWITCH_NAME_SUFFIX`] (case-insensitive) from `name`.
pub fn strip_switch_name_suffix(name: &str) -> &str {
    let suffix_len: usize = SWITCH_NAME_SUFFIX.len();
    if name.len() < suffix_len {
        return name;
    }
    let at: usize = name.len() - suffix_len;
    if !name.is_char_boundary(at) {
        return name;
    }
    if name[at..].eq_ignore_ascii_case(SWITCH_NAME_SUFFIX) {
        return &name[..at];
    }

    name
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ClassificationRule
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A compiled pattern, the capture group of interest, and the category a
/// match implies.
#[derive(Clone, Debug)]
pub struct ClassificationRule {
    regex: Regex,
    capture_index: usize,
    category: RuleCategory,
}

impl ClassificationRule {
    /// Compile `pattern` case-insensitive.
    pub fn new(
        pattern: &RegexPattern,
        capture_index: usize,
        category: RuleCategory,
    ) -> Result<ClassificationRule, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()?;

        Ok(ClassificationRule {
            regex,
            capture_index,
            category,
        })
    }

    pub fn category(&self) -> RuleCategory {
        self.category
    }

    pub fn capture_index(&self) -> usize {
        self.capture_index
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(
        &self,
        text: &str,
    ) -> bool {
        self.regex.is_match(text)
    }

    /// The text of capture group `capture_index`, if `text` matches.
    pub fn capture<'a>(
        &self,
        text: &'a str,
    ) -> Option<&'a str> {
        self.regex
            .captures(text)
            .and_then(|captures| captures.get(self.capture_index))
            .map(|match_| match_.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RuleCatalog
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Caller overrides of the word lists and bounds of a [`RuleCatalog`].
/// A `None` list uses the default list.
#[derive(Clone, Debug)]
pub struct RuleCatalogOptions {
    pub ignored_warnings: Option<Vec<String>>,
    pub emphasized_switch_messages: Option<Vec<String>>,
    pub heartbeat_messages: Option<Vec<String>>,
    pub payload_lookahead: usize,
}

impl Default for RuleCatalogOptions {
    fn default() -> Self {
        RuleCatalogOptions {
            ignored_warnings: None,
            emphasized_switch_messages: None,
            heartbeat_messages: None,
            payload_lookahead: PAYLOAD_LOOKAHEAD_DEFAULT,
        }
    }
}

fn to_strings(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| String::from(*s)).collect()
}

/// Immutable catalog of every classification rule, word list, and
/// annotation rule.
#[derive(Debug)]
pub struct RuleCatalog {
    /// direction rules in precedence order, then the payload-details rule,
    /// then special info rules in precedence order, then ignored-info rules
    rules: Vec<ClassificationRule>,
    ignored_warnings: Vec<String>,
    emphasized_switch_messages: Vec<String>,
    heartbeat_messages: Vec<String>,
    payload_lookahead: usize,
    annotations: AnnotationRegistry,
}

impl RuleCatalog {
    /// Create the catalog of the interceptor deployment with caller
    /// overrides from `options`.
    pub fn new(options: RuleCatalogOptions) -> Result<RuleCatalog, regex::Error> {
        defn!("({:?})", options);
        let mut rules: Vec<ClassificationRule> = Vec::with_capacity(
            DIRECTION_RULE_DATAS_LEN + 1 + SPECIAL_INFO_PATTERNS_LEN + IGNORED_INFO_PATTERNS.len()
        );
        for (pattern, capture_index, category) in DIRECTION_RULE_DATAS.iter() {
            rules.push(ClassificationRule::new(pattern, *capture_index, *category)?);
        }
        rules.push(ClassificationRule::new(RP_PAYLOAD_DETAILS, 1, RuleCategory::PayloadDetails)?);
        for pattern in SPECIAL_INFO_PATTERNS.iter() {
            rules.push(ClassificationRule::new(pattern, 1, RuleCategory::SpecialInfo)?);
        }
        for pattern in IGNORED_INFO_PATTERNS.iter() {
            rules.push(ClassificationRule::new(pattern, 0, RuleCategory::IgnoredInfo)?);
        }
        let annotations = AnnotationRegistry::from_datas(&ANNOTATION_RULE_DATAS)?;
        let catalog = RuleCatalog {
            rules,
            ignored_warnings: options
                .ignored_warnings
                .unwrap_or_else(|| to_strings(&IGNORED_WARNINGS_DEFAULT)),
            emphasized_switch_messages: options
                .emphasized_switch_messages
                .unwrap_or_else(|| to_strings(&EMPHASIZED_SWITCH_MESSAGES_DEFAULT)),
            heartbeat_messages: options
                .heartbeat_messages
                .unwrap_or_else(|| to_strings(&HEARTBEAT_MESSAGES_DEFAULT)),
            payload_lookahead: options.payload_lookahead,
            annotations,
        };
        defx!("{} rules, {} annotation rules", catalog.rules.len(), catalog.annotations.len());

        Ok(catalog)
    }

    /// Every rule in catalog order.
    pub fn rules(&self) -> &[ClassificationRule] {
        self.rules.as_slice()
    }

    /// Rules of one kind, in catalog order.
    fn rules_where<'a>(
        &'a self,
        f: impl Fn(RuleCategory) -> bool + 'a,
    ) -> impl Iterator<Item = &'a ClassificationRule> + 'a {
        self.rules.iter().filter(move |rule| f(rule.category()))
    }

    /// The first direction rule matching `text`, and its captured
    /// message-type name.
    ///
    /// A switch message-type name has [`SWITCH_NAME_SUFFIX`] removed.
    pub fn find_message<'a>(
        &self,
        text: &'a str,
    ) -> Option<(RuleCategory, &'a str)> {
        for rule in self.rules_where(|c| matches!(c, RuleCategory::SentTo(_) | RuleCategory::ReceivedFrom(_))) {
            if let Some(name) = rule.capture(text) {
                let name = match rule.category() {
                    RuleCategory::SentTo(Remote::Switch) | RuleCategory::ReceivedFrom(Remote::Switch) => {
                        strip_switch_name_suffix(name)
                    }
                    _ => name,
                };
                return Some((rule.category(), name));
            }
        }

        None
    }

    /// The message-type name of a payload-details entry message `text`,
    /// as captured (no suffix removed).
    pub fn payload_details_name<'a>(
        &self,
        text: &'a str,
    ) -> Option<&'a str> {
        self.rules_where(|c| c == RuleCategory::PayloadDetails)
            .find_map(|rule| rule.capture(text))
    }

    /// Does `text` match any special info rule?
    pub fn is_special_info(
        &self,
        text: &str,
    ) -> bool {
        self.rules_where(|c| c == RuleCategory::SpecialInfo)
            .any(|rule| rule.is_match(text))
    }

    /// The display text of the first special info rule matching `text`.
    pub fn special_info_text<'a>(
        &self,
        text: &'a str,
    ) -> Option<&'a str> {
        let rule = self
            .rules_where(|c| c == RuleCategory::SpecialInfo)
            .find(|rule| rule.is_match(text))?;

        rule.capture(text)
    }

    pub fn is_ignored_info(
        &self,
        text: &str,
    ) -> bool {
        self.rules_where(|c| c == RuleCategory::IgnoredInfo)
            .any(|rule| rule.is_match(text))
    }

    /// Is `text` exactly (case-insensitive) a known noise warning?
    pub fn is_ignored_warning(
        &self,
        text: &str,
    ) -> bool {
        self.ignored_warnings
            .iter()
            .any(|w| w.eq_ignore_ascii_case(text))
    }

    pub fn is_emphasized_switch_message(
        &self,
        name: &str,
    ) -> bool {
        self.emphasized_switch_messages
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn is_heartbeat_message(
        &self,
        name: &str,
    ) -> bool {
        self.heartbeat_messages
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn heartbeat_messages(&self) -> &[String] {
        self.heartbeat_messages.as_slice()
    }

    /// Count of subsequent entries searched for a payload.
    pub fn payload_lookahead(&self) -> usize {
        self.payload_lookahead
    }

    pub fn annotations(&self) -> &AnnotationRegistry {
        &self.annotations
    }
}
