// src/printer/printers.rs

//! Specialized printer struct [`PrinterFlow`] for printing [`FlowLine`s]
//! to a console, in color, or to a file.
//!
//! [`FlowLine`s]: crate::printer::flow::FlowLine

use crate::common::{Count, FPath, FileOpenOptions};
use crate::debug::printers::de_err;
use crate::printer::flow::{FlowLine, FlowStyle};

use std::fs::File;
use std::io::{
    BufWriter,
    Error,
    Result,
    Write, // for `flush`
};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for error and fatal entries.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_ERROR: Color = Color::Red;

/// [`Color`] for warning entries.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_WARNING: Color = Color::Yellow;

/// [`Color`] for special info entries.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_SPECIAL_INFO: Color = Color::Cyan;

/// [`Color`] for emphasized switch message names.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_EMPHASIZED: Color = Color::Magenta;

/// [`Color`] for highlighted message names.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_HIGHLIGHTED: Color = Color::Green;

/// The [`ColorSpec`] of a [`FlowStyle`]. [`FlowStyle::Plain`] is the
/// terminal default.
///
/// [`ColorSpec`]: https://docs.rs/termcolor/1.4.1/termcolor/struct.ColorSpec.html
pub fn color_spec_of(style: FlowStyle) -> ColorSpec {
    let color: Option<Color> = match style {
        FlowStyle::Plain => None,
        FlowStyle::Error => Some(COLOR_ERROR),
        FlowStyle::Warning => Some(COLOR_WARNING),
        FlowStyle::SpecialInfo => Some(COLOR_SPECIAL_INFO),
        FlowStyle::Emphasized => Some(COLOR_EMPHASIZED),
        FlowStyle::Highlighted => Some(COLOR_HIGHLIGHTED),
    };
    let mut color_spec = ColorSpec::new();
    color_spec.set_fg(color);

    color_spec
}

/// Macro that sets output color, only changed if needed.
///
/// Unnecessary changes to `set_color` may cause errant formatting bytes to
/// print to the terminal.
macro_rules! setcolor_or_return {
    ($out:expr, $color_spec:expr, $color_spec_last:expr) => {
        if $color_spec != $color_spec_last {
            let result = match $color_spec.is_none() {
                true => $out.reset(),
                false => $out.set_color(&$color_spec),
            };
            if let Err(err) = result {
                de_err!("{}.set_color({:?}) returned error {}", stringify!($out), $color_spec, err);
                return Err(err);
            };
            $color_spec_last = $color_spec.clone();
        }
    };
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterFlow
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A console sink or a file sink.
pub type PrinterFlowSink = Box<dyn WriteColor>;

/// A printer of [`FlowLine`]s to one output sink.
///
/// The sink is owned by the `PrinterFlow`. It is flushed by
/// [`PrinterFlow::finish`], and flushed again on drop so that every exit
/// path leaves the sink complete.
pub struct PrinterFlow<W: WriteColor> {
    out: W,
    /// last value passed to `self.out.set_color()`
    ///
    /// used by macro `setcolor_or_return`
    color_spec_last: ColorSpec,
    /// count of lines printed
    count_lines: Count,
    /// count of bytes printed, not including color codes
    count_bytes: Count,
}

impl PrinterFlow<PrinterFlowSink> {
    /// A `PrinterFlow` to stdout, in color per `color_choice`.
    pub fn new_stdout(color_choice: ColorChoice) -> PrinterFlow<PrinterFlowSink> {
        defñ!("({:?})", color_choice);
        PrinterFlow::new(Box::new(StandardStream::stdout(color_choice)))
    }

    /// A `PrinterFlow` to a new file at `path`, replacing any existing file.
    /// Files are never written with color codes.
    pub fn new_file(path: &FPath) -> Result<PrinterFlow<PrinterFlowSink>> {
        defn!("({:?})", path);
        let file: File = match FileOpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
        {
            Ok(val) => val,
            Err(err) => {
                defx!("open error {}", err);
                return Err(Error::new(err.kind(), format!("{}: {}", path, err)));
            }
        };
        defx!();

        Ok(PrinterFlow::new(Box::new(NoColor::new(BufWriter::new(file)))))
    }
}

impl<W: WriteColor> PrinterFlow<W> {
    /// Create a new `PrinterFlow` that owns `out`.
    pub fn new(out: W) -> PrinterFlow<W> {
        PrinterFlow {
            out,
            color_spec_last: ColorSpec::new(),
            count_lines: 0,
            count_bytes: 0,
        }
    }

    pub fn count_lines(&self) -> Count {
        self.count_lines
    }

    pub fn count_bytes(&self) -> Count {
        self.count_bytes
    }

    /// Reference to the owned sink.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Print one `FlowLine` and a newline. Each segment is printed in the
    /// color of its [`FlowStyle`]; the newline is printed in no color.
    pub fn print_line(
        &mut self,
        line: &FlowLine,
    ) -> Result<()> {
        for segment in line.segments().iter() {
            let color_spec: ColorSpec = color_spec_of(segment.style);
            setcolor_or_return!(self.out, color_spec, self.color_spec_last);
            if let Err(err) = self.out.write_all(segment.text.as_bytes()) {
                de_err!("write_all (len {}) error {}", segment.text.len(), err);
                return Err(err);
            }
            self.count_bytes += segment.text.len() as Count;
        }
        let color_spec_plain = ColorSpec::new();
        setcolor_or_return!(self.out, color_spec_plain, self.color_spec_last);
        self.out.write_all(b"\n")?;
        self.count_bytes += 1;
        self.count_lines += 1;

        Ok(())
    }

    /// Print every `FlowLine` of `lines`.
    pub fn print_lines(
        &mut self,
        lines: &[FlowLine],
    ) -> Result<()> {
        defn!("({} lines)", lines.len());
        for line in lines.iter() {
            self.print_line(line)?;
        }
        defx!();

        Ok(())
    }

    /// Reset the color and flush the sink.
    pub fn finish(&mut self) -> Result<()> {
        defñ!("count_lines {}", self.count_lines);
        self.out.reset()?;
        self.color_spec_last = ColorSpec::new();

        self.out.flush()
    }
}

impl<W: WriteColor> Drop for PrinterFlow<W> {
    fn drop(&mut self) {
        if let Err(_err) = self.finish() {
            // XXX: this will print when stdout is truncated, like when piping
            //      to `head`, e.g. `imflow file.log | head`
            //          Broken pipe (os error 32)
            de_err!("PrinterFlow::drop finish() error {}", _err);
        }
    }
}
