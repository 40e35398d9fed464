// src/bin/imflow.rs

//! Driver program _imflow_ drives the [_imflowlib_].
//!
//! Processes user-passed command-line arguments.
//! Then expands the paths and wildcards passed to a list of files, reads and
//! parses every file into [`LogEntry`]s, classifies each entry, links
//! message entries to their payload entries, and prints the flow diagram to
//! the console or to a file.
//!
//! Any error reading or parsing a file stops the program before anything
//! is printed.
//!
//! [_imflowlib_]: imflowlib
//! [`LogEntry`]: imflowlib::data::entry::LogEntry

#![allow(non_camel_case_types)]

use std::process::ExitCode;

use ::anyhow::Context;
use ::clap::{
    Parser,
    ValueEnum,
};
use ::const_format::concatcp;

use ::imflowlib::common::{Count, FPath, FPaths};
use ::imflowlib::data::datetime::TzInterpretation;
use ::imflowlib::data::entry::Entries;
use ::imflowlib::debug::printers::{e_err, e_wrn};
use ::imflowlib::printer::flow::{render_flow, FlowLines, FlowOptions};
use ::imflowlib::printer::printers::{ColorChoice, PrinterFlow};
use ::imflowlib::readers::associator::associate_payloads;
use ::imflowlib::readers::entryparser::parse_files;
use ::imflowlib::readers::filepreprocessor::process_paths;
use ::imflowlib::rules::catalog::{RuleCatalog, RuleCatalogOptions, PAYLOAD_LOOKAHEAD_DEFAULT};
use ::imflowlib::rules::classify::{classify_entries, Classifications};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ, stack::stack_offset_set};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

#[cfg(debug_assertions)]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "\nDEBUG BUILD";
#[cfg(not(debug_assertions))]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "";

/// `--help` _afterword_ message.
const CLI_HELP_AFTER: &str = concatcp!(
    "\
Each PATH is a log file or a wildcard pattern using \"*\" or \"?\".
Files are read in the order given; files matched by one wildcard are read in
sorted order.

Timestamps in the log have no timezone. They are read as UTC unless
option --local is passed.

Each message sent to or received from the switch (Genesys), the softphone
service (SSC), or the bus (CoreBus/TIM) is drawn in its lane. A message with
a known payload is followed by a line summarizing that payload.
",
    CLI_HELP_AFTER_NOTE_DEBUG,
);

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "imflow",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(interceptor message flow)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of log files, or wildcard patterns.
    #[clap(
        required = true,
        verbatim_doc_comment,
    )]
    paths: Vec<String>,

    /// Write the flow to this file instead of the console.
    /// The file is replaced. It is written without colors.
    #[clap(
        short = 'o',
        long = "output-file",
        verbatim_doc_comment,
    )]
    output_file: Option<String>,

    /// Do not print entries of level error, fatal, or warning.
    #[clap(
        long = "ignore-errors",
        verbatim_doc_comment,
    )]
    ignore_errors: bool,

    /// Do not print the payload summary line beneath messages.
    #[clap(
        long = "no-annotations",
        verbatim_doc_comment,
    )]
    no_annotations: bool,

    /// Print switch heartbeat messages.
    #[clap(
        long = "include-heartbeat",
        verbatim_doc_comment,
    )]
    include_heartbeat: bool,

    /// Read log timestamps as local time instead of UTC.
    #[clap(
        short = 'l',
        long = "local",
        verbatim_doc_comment,
    )]
    local: bool,

    /// Highlight messages with this name. May be passed more than once, or
    /// as a comma-separated list.
    #[clap(
        short = 'm',
        long = "match",
        value_name = "NAME",
        value_delimiter = ',',
        verbatim_doc_comment,
    )]
    matches: Vec<String>,

    /// Also print info entries that are not messages.
    #[clap(
        long = "show-all-info",
        verbatim_doc_comment,
    )]
    show_all_info: bool,

    /// Switch message name treated as a heartbeat. May be passed more than
    /// once. Replaces the default heartbeat names.
    #[clap(
        long = "heartbeat",
        value_name = "NAME",
        verbatim_doc_comment,
    )]
    heartbeats: Vec<String>,

    /// Count of entries after a message entry searched for its payload.
    #[clap(
        long = "lookahead",
        value_name = "N",
        value_parser = cli_parse_lookahead,
        default_value_t = PAYLOAD_LOOKAHEAD_DEFAULT,
        verbatim_doc_comment,
    )]
    lookahead: usize,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,
}

/// `clap` argument parser for `--lookahead`; a number greater than zero.
fn cli_parse_lookahead(lookahead: &str) -> std::result::Result<usize, String> {
    let value: usize = match lookahead.parse::<usize>() {
        Ok(val) => val,
        Err(err) => return Err(format!("Unable to parse a number for --lookahead {:?} {}", lookahead, err)),
    };
    if value == 0 {
        return Err(String::from("--lookahead must be greater than 0"));
    }

    Ok(value)
}

/// Settings of one run, processed from [`CLI_Args`].
#[derive(Debug)]
struct RunSettings {
    paths: FPaths,
    output_file: Option<FPath>,
    tz: TzInterpretation,
    color_choice: ColorChoice,
    catalog_options: RuleCatalogOptions,
    flow_options: FlowOptions,
}

fn cli_process_args(args: CLI_Args) -> RunSettings {
    defn!("{:?}", args);

    // map `CLI_Color_Choice` to `ColorChoice`
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    let tz: TzInterpretation = match args.local {
        true => TzInterpretation::Local,
        false => TzInterpretation::Utc,
    };
    let heartbeats: Vec<String> = args
        .heartbeats
        .into_iter()
        .filter(|h| !h.trim().is_empty())
        .collect();
    let catalog_options = RuleCatalogOptions {
        heartbeat_messages: match heartbeats.is_empty() {
            true => None,
            false => Some(heartbeats),
        },
        payload_lookahead: args.lookahead,
        ..RuleCatalogOptions::default()
    };
    let highlights: Vec<String> = args
        .matches
        .iter()
        .map(|m| String::from(m.trim()))
        .filter(|m| !m.is_empty())
        .collect();
    if args.include_heartbeat && catalog_options.heartbeat_messages.is_some() {
        e_wrn!("--heartbeat names are not used when --include-heartbeat is passed");
    }
    let flow_options = FlowOptions {
        ignore_errors: args.ignore_errors,
        suppress_annotations: args.no_annotations,
        include_heartbeat: args.include_heartbeat,
        show_all_info: args.show_all_info,
        highlights,
    };
    let output_file: Option<FPath> = args
        .output_file
        .filter(|o| !o.trim().is_empty());

    let settings = RunSettings {
        paths: args.paths,
        output_file,
        tz,
        color_choice,
        catalog_options,
        flow_options,
    };
    defx!("{:?}", settings);

    settings
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// processing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Read, parse, classify, associate, render, and print.
fn run(settings: RunSettings) -> anyhow::Result<()> {
    defn!();
    let fpaths: FPaths = process_paths(&settings.paths).context("failed to find input files")?;
    defo!("fpaths {:?}", fpaths);
    let catalog = RuleCatalog::new(settings.catalog_options).context("failed to create the rule catalog")?;
    let entries: Entries = parse_files(&fpaths, settings.tz).context("failed to parse the log")?;
    let classes: Classifications = classify_entries(&entries, &catalog);
    let _count: Count = associate_payloads(&entries, &classes, &catalog);
    defo!("associated {} payloads", _count);
    let lines: FlowLines = render_flow(&entries, &classes, &catalog, &settings.flow_options, fpaths.len());

    let mut printer = match settings.output_file.as_ref() {
        Some(path) => PrinterFlow::new_file(path).context("failed to create the output file")?,
        None => PrinterFlow::new_stdout(settings.color_choice),
    };
    printer
        .print_lines(&lines)
        .context("failed to write the flow")?;
    printer
        .finish()
        .context("failed to write the flow")?;
    defx!("printed {} lines", printer.count_lines());

    Ok(())
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let settings = cli_process_args(CLI_Args::parse());
    let exitcode = match run(settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            e_err!("{:#}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    use ::test_case::test_case;

    #[test_case("1", Some(1))]
    #[test_case("2000", Some(2000))]
    #[test_case("0", None)]
    #[test_case("-1", None)]
    #[test_case("BAD_LOOKAHEAD_VALUE", None)]
    #[test_case("", None)]
    fn test_cli_parse_lookahead(
        lookahead: &str,
        expect_: Option<usize>,
    ) {
        match expect_ {
            Some(val_exp) => assert_eq!(cli_parse_lookahead(lookahead), Ok(val_exp)),
            None => assert!(cli_parse_lookahead(lookahead).is_err()),
        }
    }

    fn parse(args: &[&str]) -> RunSettings {
        let mut argv: Vec<&str> = vec!["imflow"];
        argv.extend_from_slice(args);
        cli_process_args(CLI_Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_cli_defaults() {
        let settings = parse(&["a.log"]);
        assert_eq!(settings.paths, vec![String::from("a.log")]);
        assert_eq!(settings.output_file, None);
        assert_eq!(settings.tz, TzInterpretation::Utc);
        assert_eq!(settings.color_choice, ColorChoice::Auto);
        assert_eq!(settings.catalog_options.heartbeat_messages, None);
        assert_eq!(settings.catalog_options.payload_lookahead, PAYLOAD_LOOKAHEAD_DEFAULT);
        assert_eq!(settings.flow_options, FlowOptions::default());
    }

    #[test]
    fn test_cli_options() {
        let settings = parse(&[
            "-o", "out.txt",
            "--ignore-errors",
            "--no-annotations",
            "--local",
            "-m", "EventRinging,RequestMakeCall",
            "--match", "EventReleased",
            "--show-all-info",
            "--heartbeat", "Ping",
            "--lookahead", "10",
            "--color", "never",
            "a.log", "b*.log",
        ]);
        assert_eq!(settings.paths, vec![String::from("a.log"), String::from("b*.log")]);
        assert_eq!(settings.output_file, Some(String::from("out.txt")));
        assert_eq!(settings.tz, TzInterpretation::Local);
        assert_eq!(settings.color_choice, ColorChoice::Never);
        assert_eq!(settings.catalog_options.heartbeat_messages, Some(vec![String::from("Ping")]));
        assert_eq!(settings.catalog_options.payload_lookahead, 10);
        assert!(settings.flow_options.ignore_errors);
        assert!(settings.flow_options.suppress_annotations);
        assert!(!settings.flow_options.include_heartbeat);
        assert!(settings.flow_options.show_all_info);
        assert_eq!(
            settings.flow_options.highlights,
            vec![
                String::from("EventRinging"),
                String::from("RequestMakeCall"),
                String::from("EventReleased"),
            ]
        );
    }

    #[test]
    fn test_cli_no_paths_is_error() {
        assert!(CLI_Args::try_parse_from(["imflow"]).is_err());
    }

    #[test]
    fn test_cli_lookahead_zero_is_error() {
        assert!(CLI_Args::try_parse_from(["imflow", "--lookahead", "0", "a.log"]).is_err());
    }
}
