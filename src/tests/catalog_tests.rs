// src/tests/catalog_tests.rs

//! tests for `src/rules/catalog.rs`

#![allow(non_snake_case)]

use crate::rules::catalog::{
    strip_switch_name_suffix,
    ClassificationRule,
    Remote,
    RuleCatalog,
    RuleCatalogOptions,
    RuleCategory,
    DIRECTION_RULE_DATAS_LEN,
    IGNORED_INFO_PATTERNS,
    PAYLOAD_LOOKAHEAD_DEFAULT,
    SPECIAL_INFO_PATTERNS_LEN,
};
use crate::tests::common::catalog_default;

use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("EventRingingData", "EventRinging")]
#[test_case("EventRingingDATA", "EventRinging"; "case-insensitive")]
#[test_case("EventRinging", "EventRinging"; "no suffix")]
#[test_case("Data", ""; "only suffix")]
#[test_case("ata", "ata"; "shorter than suffix")]
#[test_case("", "")]
#[test_case("Daten", "Daten")]
#[test_case("Eventédata", "Eventé"; "multibyte")]
fn test_strip_switch_name_suffix(
    name: &str,
    expect: &str,
) {
    assert_eq!(strip_switch_name_suffix(name), expect);
}

#[test]
fn test_ClassificationRule() {
    let rule = ClassificationRule::new(r"^Hello\s(\w+)", 1, RuleCategory::SpecialInfo).unwrap();
    assert_eq!(rule.category(), RuleCategory::SpecialInfo);
    assert_eq!(rule.capture_index(), 1);
    assert!(rule.is_match("HELLO world"));
    assert_eq!(rule.capture("hello World"), Some("World"));
    assert_eq!(rule.capture("goodbye"), None);
}

#[test]
fn test_ClassificationRule_bad_pattern() {
    assert!(ClassificationRule::new(r"(unclosed", 1, RuleCategory::SpecialInfo).is_err());
}

#[test]
fn test_RuleCatalog_rules_order() {
    let catalog = catalog_default();
    let rules = catalog.rules();
    assert_eq!(rules.len(), DIRECTION_RULE_DATAS_LEN + 1 + SPECIAL_INFO_PATTERNS_LEN + IGNORED_INFO_PATTERNS.len());
    assert_eq!(rules[0].category(), RuleCategory::SentTo(Remote::Switch));
    assert_eq!(rules[DIRECTION_RULE_DATAS_LEN].category(), RuleCategory::PayloadDetails);
    assert_eq!(rules[DIRECTION_RULE_DATAS_LEN + 1].category(), RuleCategory::SpecialInfo);
    assert_eq!(rules[rules.len() - 1].category(), RuleCategory::IgnoredInfo);
    assert_eq!(catalog.payload_lookahead(), PAYLOAD_LOOKAHEAD_DEFAULT);
    assert!(!catalog.annotations().is_empty());
}

#[test_case(
    "Sending <RequestMakeCall> message to <TServer>",
    Some((RuleCategory::SentTo(Remote::Switch), "RequestMakeCall"))
)]
#[test_case(
    "Received Genesys message: EventRingingData",
    Some((RuleCategory::ReceivedFrom(Remote::Switch), "EventRinging"));
    "switch suffix stripped"
)]
#[test_case(
    "received genesys message:   EventEstablished",
    Some((RuleCategory::ReceivedFrom(Remote::Switch), "EventEstablished"));
    "case-insensitive"
)]
#[test_case(
    "Sending <CallStartedMessage> message to <CoreBus>",
    Some((RuleCategory::SentTo(Remote::Bus), "CallStartedMessage"))
)]
#[test_case(
    "Received <Acme.AcceptOfferMessage> message from <lq.tcp://host01:5000/bus>",
    Some((RuleCategory::ReceivedFrom(Remote::Bus), "Acme.AcceptOfferMessage"))
)]
#[test_case(
    "Sending <MuteMessage> message to <SSC>",
    Some((RuleCategory::SentTo(Remote::Softphone), "MuteMessage"))
)]
#[test_case(
    "Received <ParticipantChangedMessage> message from <SSC>",
    Some((RuleCategory::ReceivedFrom(Remote::Softphone), "ParticipantChangedMessage"))
)]
#[test_case(
    "Sending <calls/start> request to <TIM service>",
    Some((RuleCategory::SentTo(Remote::TimService), "calls/start"))
)]
#[test_case(
    "Sending <SomeData> message to <TServer>",
    Some((RuleCategory::SentTo(Remote::Switch), "Some"));
    "sent switch suffix stripped"
)]
#[test_case("Before Received Genesys message: EventRinging", None; "received is anchored")]
#[test_case("<RequestMakeCall> message details:", None; "payload details")]
#[test_case("Passing through message to CoreBus", None)]
fn test_RuleCatalog_find_message(
    text: &str,
    expect: Option<(RuleCategory, &str)>,
) {
    let catalog = catalog_default();
    assert_eq!(catalog.find_message(text), expect);
}

#[test_case("<RequestMakeCall> message details:", Some("RequestMakeCall"))]
#[test_case("<EventRingingData> message details: more", Some("EventRingingData"); "suffix kept")]
#[test_case("Sending <RequestMakeCall> message to <TServer>", None)]
#[test_case(" <RequestMakeCall> message details:", None; "anchored")]
fn test_RuleCatalog_payload_details_name(
    text: &str,
    expect: Option<&str>,
) {
    let catalog = catalog_default();
    assert_eq!(catalog.payload_details_name(text), expect);
}

#[test_case("Interceptor version: 4.2.0", Some("Interceptor version: 4.2.0"))]
#[test_case(
    "Unregistering Call (0a1b) as listener for AcceptOfferMessage...",
    Some("Unregistering Call (0a1b)");
    "capture is a prefix"
)]
#[test_case(
    "Registering Genesys address (5001)...",
    Some("Registering Genesys address (5001)")
)]
#[test_case(
    "Adding participant 'bob', list is now [bob, alice]",
    Some("Adding participant 'bob', list is now [bob, alice]")
)]
#[test_case(
    "Removing participant 'bob', list is now []",
    Some("Removing participant 'bob', list is now []")
)]
#[test_case("Genesys reports no unfinished calls", Some("Genesys reports no unfinished calls"))]
#[test_case(">>> operator note", Some(">>> operator note"))]
#[test_case("Setting AgentEmployeeId to: 12345", Some("Setting AgentEmployeeId to: 12345"))]
#[test_case("hello there", None)]
#[test_case("(for WTWCallId = 12, ConnID = 00zz)", None; "conn id not hex")]
fn test_RuleCatalog_special_info_text(
    text: &str,
    expect: Option<&str>,
) {
    let catalog = catalog_default();
    assert_eq!(catalog.special_info_text(text), expect);
    assert_eq!(catalog.is_special_info(text), expect.is_some());
}

#[test_case("Passing through message to CoreBus", true)]
#[test_case("passing THROUGH message to SSC", true; "case-insensitive")]
#[test_case("Passing message", false)]
fn test_RuleCatalog_is_ignored_info(
    text: &str,
    expect: bool,
) {
    assert_eq!(catalog_default().is_ignored_info(text), expect);
}

#[test_case("setting name 'Interceptor' is invalid", true)]
#[test_case("SETTING NAME 'INTERCEPTOR' IS INVALID", true; "case-insensitive")]
#[test_case("setting name 'Interceptor' is invalid!", false; "exact text")]
fn test_RuleCatalog_is_ignored_warning(
    text: &str,
    expect: bool,
) {
    assert_eq!(catalog_default().is_ignored_warning(text), expect);
}

#[test]
fn test_RuleCatalog_defaults() {
    let catalog = catalog_default();
    assert!(catalog.is_emphasized_switch_message("RequestMakeCall"));
    assert!(catalog.is_emphasized_switch_message("eventringing"));
    assert!(!catalog.is_emphasized_switch_message("EventEstablished"));
    assert!(catalog.is_heartbeat_message("RequestQueryServer"));
    assert!(catalog.is_heartbeat_message("EVENTSERVERINFO"));
    assert!(!catalog.is_heartbeat_message("EventRinging"));
    assert_eq!(catalog.heartbeat_messages().len(), 2);
}

#[test]
fn test_RuleCatalog_options_override() {
    let catalog = RuleCatalog::new(RuleCatalogOptions {
        ignored_warnings: Some(vec![String::from("disk is full")]),
        emphasized_switch_messages: Some(vec![String::from("EventEstablished")]),
        heartbeat_messages: Some(vec![]),
        payload_lookahead: 5,
    })
    .unwrap();
    assert!(catalog.is_ignored_warning("Disk is full"));
    assert!(!catalog.is_ignored_warning("setting name 'Interceptor' is invalid"));
    assert!(catalog.is_emphasized_switch_message("EventEstablished"));
    assert!(!catalog.is_emphasized_switch_message("RequestMakeCall"));
    assert!(!catalog.is_heartbeat_message("RequestQueryServer"));
    assert_eq!(catalog.payload_lookahead(), 5);
}

#[test]
fn test_Remote_display() {
    assert_eq!(Remote::Switch.to_string(), "switch");
    assert_eq!(Remote::TimService.to_string(), "TIM service");
}
