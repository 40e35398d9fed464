// src/printer/flow.rs

//! Lay out classified [`LogEntry`]s as a three-lane flow diagram.
//!
//! ```text
//! Line #  Date                   Genesys     (Interceptor)  SSC        CoreBus/TIM
//! ==================================================================================
//! 1       10:00:00.0000 +00:00   RequestMakeCall <==   | |
//!                                (555-123-4567)
//! 5       10:00:00.2000 +00:00              | |   ==> CallStartedMessage
//! ```
//!
//! The left lane is the switch (Genesys), the middle column is the
//! interceptor, the right lanes are the softphone service (SSC) then the
//! bus (CoreBus) and TIM service requests.
//!
//! [`render_flow`] returns styled [`FlowLine`]s. Writing them is left to a
//! [`PrinterFlow`].
//!
//! [`LogEntry`]: crate::data::entry::LogEntry
//! [`PrinterFlow`]: crate::printer::printers::PrinterFlow

use crate::common::{EntryIndex, LineNum};
use crate::data::datetime::{datetime_to_flow_string, DATETIME_FLOW_WIDTH};
use crate::data::entry::{Entries, LogEntry};
use crate::readers::associator::annotation_of;
use crate::readers::helpers::basename;
use crate::rules::catalog::RuleCatalog;
use crate::rules::classify::{Classification, Classifications};

use std::fmt;

#[allow(unused_imports)]
use ::const_format::assertcp;
#[allow(unused_imports)]
use ::more_asserts::debug_assert_ge;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::unicode_width::UnicodeWidthStr;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// layout constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Minimum width of the "Line #" column.
pub const LINE_NUM_WIDTH_MIN: usize = 7;
/// Minimum width of the switch lane.
pub const SWITCH_WIDTH_MIN: usize = 10;
/// Minimum width of the softphone lane.
pub const SOFTPHONE_WIDTH_MIN: usize = 10;
/// Minimum width of the bus and TIM lane.
pub const BUS_WIDTH_MIN: usize = 13;
/// Width of the interceptor column; the width of every arrow.
pub const INTERCEPTOR_WIDTH: usize = 17;

/// Separates the line number from the date.
const SEP_LINE_NUM: &str = " ";
/// Separates the date from the lanes.
const SEP_DATE: &str = "   ";

pub const ARROW_SWITCH_RECEIVED: &str = "  ==>  | |       ";
pub const ARROW_SWITCH_SENT: &str = " <==   | |       ";
pub const ARROW_REMOTE_SENT: &str = "       | |   ==> ";
pub const ARROW_REMOTE_RECEIVED: &str = "       | |  <==  ";

pub const HEADER_LINE_NUM: &str = "Line #";
pub const HEADER_DATE: &str = "Date";
pub const HEADER_SWITCH: &str = "Genesys";
pub const HEADER_INTERCEPTOR: &str = "  (Interceptor)  ";
pub const HEADER_SOFTPHONE: &str = "SSC";
pub const HEADER_BUS: &str = " CoreBus/TIM";

pub const RULE_CHAR: char = '=';
pub const BANNER_CHAR: char = '-';

assertcp!(ARROW_SWITCH_RECEIVED.len() == INTERCEPTOR_WIDTH);
assertcp!(ARROW_SWITCH_SENT.len() == INTERCEPTOR_WIDTH);
assertcp!(ARROW_REMOTE_SENT.len() == INTERCEPTOR_WIDTH);
assertcp!(ARROW_REMOTE_RECEIVED.len() == INTERCEPTOR_WIDTH);
assertcp!(HEADER_INTERCEPTOR.len() == INTERCEPTOR_WIDTH);

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FlowOptions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Display options of [`render_flow`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FlowOptions {
    /// drop entries of level error, fatal, or warning
    pub ignore_errors: bool,
    /// do not print annotation lines
    pub suppress_annotations: bool,
    /// keep switch heartbeat messages
    pub include_heartbeat: bool,
    /// also print info entries that are not messages
    pub show_all_info: bool,
    /// message names to highlight, case-insensitive
    pub highlights: Vec<String>,
}

impl FlowOptions {
    pub fn is_highlighted(
        &self,
        name: &str,
    ) -> bool {
        self.highlights
            .iter()
            .any(|h| h.eq_ignore_ascii_case(name))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FlowLine
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// How a [`FlowSegment`] is shown. Only a console shows styles.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FlowStyle {
    #[default]
    Plain,
    /// error or fatal entry
    Error,
    /// warning entry
    Warning,
    /// special info entry
    SpecialInfo,
    /// emphasized switch message name
    Emphasized,
    /// message name matched by [`FlowOptions::highlights`]
    Highlighted,
}

/// A run of text with one style.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlowSegment {
    pub text: String,
    pub style: FlowStyle,
}

/// One line of the diagram, without line ending.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FlowLine {
    segments: Vec<FlowSegment>,
}

pub type FlowLines = Vec<FlowLine>;

impl FlowLine {
    pub fn new() -> FlowLine {
        FlowLine::default()
    }

    /// Append `text` in `style`. Empty text is not kept. Text of the same
    /// style as the last segment is merged into it.
    pub fn push(
        &mut self,
        text: &str,
        style: FlowStyle,
    ) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.segments.push(FlowSegment {
                text: String::from(text),
                style,
            }),
        }
    }

    pub fn push_plain(
        &mut self,
        text: &str,
    ) {
        self.push(text, FlowStyle::Plain);
    }

    pub fn segments(&self) -> &[FlowSegment] {
        self.segments.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Does any segment have `style`?
    pub fn has_style(
        &self,
        style: FlowStyle,
    ) -> bool {
        self.segments
            .iter()
            .any(|s| s.style == style)
    }

    /// The text of every segment, without styles.
    pub fn to_plain_string(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect()
    }
}

impl fmt::Display for FlowLine {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        for segment in self.segments.iter() {
            f.write_str(segment.text.as_str())?;
        }
        Ok(())
    }
}

/// Pad `text` with spaces to display width `width`.
pub fn pad_right(
    text: &str,
    width: usize,
) -> String {
    let text_width: usize = UnicodeWidthStr::width(text);
    let mut s: String = String::with_capacity(text.len() + width.saturating_sub(text_width));
    s.push_str(text);
    for _ in text_width..width {
        s.push(' ');
    }

    s
}

fn spaces(count: usize) -> String {
    " ".repeat(count)
}

/// `text` surrounded by single spaces and centered in `BANNER_CHAR` to
/// `width`.
pub fn banner(
    text: &str,
    width: usize,
) -> String {
    let label: String = format!(" {} ", text);
    let label_width: usize = UnicodeWidthStr::width(label.as_str());
    let fill: usize = width.saturating_sub(label_width);
    let left: usize = fill / 2;
    let right: usize = fill - left;
    let mut s: String = String::with_capacity(label.len() + fill);
    s.extend(std::iter::repeat(BANNER_CHAR).take(left));
    s.push_str(label.as_str());
    s.extend(std::iter::repeat(BANNER_CHAR).take(right));

    s
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// lanes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The lane a message entry is drawn in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lane {
    Switch,
    Softphone,
    Bus,
}

impl Lane {
    pub fn of(class: &Classification) -> Option<Lane> {
        if class.is_switch_message() {
            Some(Lane::Switch)
        } else if class.is_softphone_message() {
            Some(Lane::Softphone)
        } else if class.is_bus_lane_message() {
            Some(Lane::Bus)
        } else {
            None
        }
    }
}

/// The name drawn in the lane of a message entry. A TIM service request is
/// drawn as `<call>`.
pub fn lane_name(class: &Classification) -> Option<String> {
    let name: &str = class.name.as_deref()?;
    match class.is_tim_service_request() {
        true => Some(format!("<{}>", name)),
        false => Some(String::from(name)),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FlowLayout
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Column widths of one diagram, computed once from the selected entries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FlowLayout {
    pub line_num_width: usize,
    pub date_width: usize,
    pub switch_width: usize,
    pub softphone_width: usize,
    pub bus_width: usize,
}

impl Default for FlowLayout {
    fn default() -> Self {
        FlowLayout {
            line_num_width: LINE_NUM_WIDTH_MIN,
            date_width: DATETIME_FLOW_WIDTH,
            switch_width: SWITCH_WIDTH_MIN,
            softphone_width: SOFTPHONE_WIDTH_MIN,
            bus_width: BUS_WIDTH_MIN,
        }
    }
}

fn digits(value: LineNum) -> usize {
    value.to_string().len()
}

impl FlowLayout {
    /// Widest line number and widest lane name of each lane over the
    /// `selected` entries, each at least its minimum.
    pub fn new(
        entries: &Entries,
        classes: &Classifications,
        selected: &[EntryIndex],
    ) -> FlowLayout {
        let mut layout = FlowLayout::default();
        for &index in selected.iter() {
            layout.line_num_width = layout
                .line_num_width
                .max(digits(entries[index].line_num()));
            let class: &Classification = &classes[index];
            let (lane, name) = match (Lane::of(class), lane_name(class)) {
                (Some(lane), Some(name)) => (lane, name),
                _ => continue,
            };
            let width: usize = UnicodeWidthStr::width(name.as_str());
            match lane {
                Lane::Switch => layout.switch_width = layout.switch_width.max(width),
                Lane::Softphone => layout.softphone_width = layout.softphone_width.max(width),
                Lane::Bus => layout.bus_width = layout.bus_width.max(width),
            }
        }
        defñ!("{:?}", layout);

        layout
    }

    /// Width of the line number and date columns with their separators.
    pub fn prefix_width(&self) -> usize {
        self.line_num_width + SEP_LINE_NUM.len() + self.date_width + SEP_DATE.len()
    }

    /// Column where a lane's name begins.
    pub fn lane_column(
        &self,
        lane: Lane,
    ) -> usize {
        match lane {
            Lane::Switch => self.prefix_width(),
            Lane::Softphone => self.prefix_width() + self.switch_width + INTERCEPTOR_WIDTH,
            Lane::Bus => self.prefix_width() + self.switch_width + INTERCEPTOR_WIDTH + self.softphone_width + 1,
        }
    }

    /// Width of the whole diagram.
    pub fn total_width(&self) -> usize {
        self.lane_column(Lane::Bus) + self.bus_width + 1
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// selection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Is the entry of `class` drawn in the diagram?
pub fn is_selected(
    class: &Classification,
    catalog: &RuleCatalog,
    options: &FlowOptions,
) -> bool {
    if options.ignore_errors && class.is_severe_level() {
        return false;
    }
    if !options.include_heartbeat {
        if let Some(name) = class.switch_message_name() {
            if catalog.is_heartbeat_message(name) {
                return false;
            }
        }
    }

    class.is_message()
        || class.is_special_info()
        || class.is_error()
        || class.is_fatal()
        || class.is_warning()
        || (options.show_all_info && class.is_non_message_info())
}

/// The indexes of the entries drawn in the diagram, ordered by timestamp
/// then by parse order.
pub fn select_entries(
    entries: &Entries,
    classes: &Classifications,
    catalog: &RuleCatalog,
    options: &FlowOptions,
) -> Vec<EntryIndex> {
    defn!("({} entries)", entries.len());
    let mut selected: Vec<EntryIndex> = classes
        .iter()
        .enumerate()
        .filter(|(_, class)| is_selected(class, catalog, options))
        .map(|(index, _)| index)
        .collect();
    // stable sort keeps parse order for equal timestamps
    selected.sort_by_key(|&index| *entries[index].dt());
    defx!("selected {} entries", selected.len());

    selected
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// rendering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The header row and the rule beneath it.
pub fn render_header(layout: &FlowLayout) -> FlowLines {
    let mut header = FlowLine::new();
    header.push_plain(pad_right(HEADER_LINE_NUM, layout.line_num_width + SEP_LINE_NUM.len()).as_str());
    header.push_plain(pad_right(HEADER_DATE, layout.date_width + SEP_DATE.len()).as_str());
    header.push_plain(pad_right(HEADER_SWITCH, layout.switch_width).as_str());
    header.push_plain(HEADER_INTERCEPTOR);
    header.push_plain(pad_right(HEADER_SOFTPHONE, layout.softphone_width).as_str());
    header.push_plain(HEADER_BUS);

    let mut rule = FlowLine::new();
    let rule_text: String = std::iter::repeat(RULE_CHAR)
        .take(layout.total_width())
        .collect();
    rule.push_plain(rule_text.as_str());

    vec![header, rule]
}

/// The style of a message name.
fn name_style(
    class: &Classification,
    options: &FlowOptions,
) -> FlowStyle {
    match class.name.as_deref() {
        Some(name) if options.is_highlighted(name) => FlowStyle::Highlighted,
        _ if class.is_emphasized() => FlowStyle::Emphasized,
        _ => FlowStyle::Plain,
    }
}

/// The lines of one entry: the entry line and maybe an annotation line.
///
/// Branches in priority order: error or fatal, warning, special info,
/// non-message info, switch message, softphone message, bus or TIM message.
/// Returns no lines for an entry that none of them draws.
pub fn render_entry(
    index: EntryIndex,
    entries: &Entries,
    classes: &Classifications,
    catalog: &RuleCatalog,
    options: &FlowOptions,
    layout: &FlowLayout,
) -> FlowLines {
    let entry: &LogEntry = &entries[index];
    let class: &Classification = &classes[index];
    let mut line = FlowLine::new();
    line.push_plain(pad_right(entry.line_num().to_string().as_str(), layout.line_num_width).as_str());
    line.push_plain(SEP_LINE_NUM);
    line.push_plain(pad_right(datetime_to_flow_string(entry.dt()).as_str(), layout.date_width).as_str());
    line.push_plain(SEP_DATE);

    if class.is_fatal() {
        line.push(format!("FATAL: {}", entry.message()).as_str(), FlowStyle::Error);
        return vec![line];
    }
    if class.is_error() {
        line.push(format!("ERROR: {}", entry.message()).as_str(), FlowStyle::Error);
        return vec![line];
    }
    if class.is_warning() {
        line.push(format!("WARN: {}", entry.message()).as_str(), FlowStyle::Warning);
        return vec![line];
    }
    if let Some(text) = class.special_info.as_deref() {
        line.push(format!("INFO: {}", text).as_str(), FlowStyle::SpecialInfo);
        return vec![line];
    }
    if options.show_all_info && class.is_non_message_info() {
        line.push_plain(format!("INFO: {}", entry.message()).as_str());
        return vec![line];
    }

    let (lane, name) = match (Lane::of(class), lane_name(class)) {
        (Some(lane), Some(name)) => (lane, name),
        _ => {
            defñ!("entry {} is not drawn", index);
            return FlowLines::new();
        }
    };
    let style: FlowStyle = name_style(class, options);
    match lane {
        Lane::Switch => {
            line.push(pad_right(name.as_str(), layout.switch_width).as_str(), style);
            line.push_plain(match class.is_received() {
                true => ARROW_SWITCH_RECEIVED,
                false => ARROW_SWITCH_SENT,
            });
        }
        Lane::Softphone | Lane::Bus => {
            line.push_plain(spaces(layout.switch_width).as_str());
            line.push_plain(match class.is_sent() {
                true => ARROW_REMOTE_SENT,
                false => ARROW_REMOTE_RECEIVED,
            });
            if lane == Lane::Bus {
                line.push_plain(spaces(layout.softphone_width + 1).as_str());
            }
            line.push(name.as_str(), style);
        }
    }

    let mut lines: FlowLines = vec![line];
    if !options.suppress_annotations {
        if let Some(annotation) = annotation_of(entries, classes, index, catalog) {
            let mut line_annotation = FlowLine::new();
            line_annotation.push_plain(spaces(layout.lane_column(lane)).as_str());
            line_annotation.push_plain(annotation.as_str());
            lines.push(line_annotation);
        }
    }

    lines
}

/// Render the flow diagram of `entries`.
///
/// `classes` must be the [`Classifications`] of `entries` and payloads
/// should already be associated. `count_files` is the count of input files;
/// if more than one then a file banner is drawn before the first entry and
/// wherever the file changes.
pub fn render_flow(
    entries: &Entries,
    classes: &Classifications,
    catalog: &RuleCatalog,
    options: &FlowOptions,
    count_files: usize,
) -> FlowLines {
    defn!("({} entries, {:?}, count_files {})", entries.len(), options, count_files);
    debug_assert_eq!(entries.len(), classes.len(), "entries and classes differ in length");
    let selected: Vec<EntryIndex> = select_entries(entries, classes, catalog, options);
    let layout = FlowLayout::new(entries, classes, &selected);
    let mut lines: FlowLines = render_header(&layout);
    let mut path_last: Option<&str> = None;
    for &index in selected.iter() {
        let entry: &LogEntry = &entries[index];
        if count_files > 1 && path_last != Some(entry.path().as_str()) {
            let mut line_banner = FlowLine::new();
            line_banner.push_plain(banner(basename(entry.path()).as_str(), layout.total_width()).as_str());
            lines.push(line_banner);
        }
        path_last = Some(entry.path().as_str());
        lines.extend(render_entry(index, entries, classes, catalog, options, &layout));
    }
    debug_assert_ge!(lines.len(), 2);
    defx!("{} lines", lines.len());

    lines
}
