// src/readers/linereader.rs

//! Read a file into [`RawLine`]s.
//!
//! [`RawLine`]: crate::data::entry::RawLine

use crate::common::{FPath, FileOpenOptions, LineNum, CRc, NLc};
use crate::data::entry::{FPathP, RawLine, RawLines};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::io::{BufRead, BufReader, Error, Read, Result};
use std::sync::Arc;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Read every line of `reader` as a `RawLine` of `path`.
///
/// Line numbers start at 1. The line ending, `"\n"` or `"\r\n"`, is
/// removed. Bytes that are not valid UTF-8 are replaced with
/// `U+FFFD REPLACEMENT CHARACTER`.
pub fn read_lines_from<R: Read>(
    path: FPathP,
    reader: R,
) -> Result<RawLines> {
    defn!("({:?})", path);
    let mut bufreader = BufReader::new(reader);
    let mut lines: RawLines = RawLines::new();
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    let mut line_num: LineNum = 0;
    loop {
        buf.clear();
        if bufreader.read_until(NLc as u8, &mut buf)? == 0 {
            break;
        }
        line_num += 1;
        let mut text: String = String::from_utf8_lossy(&buf).into_owned();
        if text.ends_with(NLc) {
            text.pop();
            if text.ends_with(CRc) {
                text.pop();
            }
        }
        defo!("line {} {:?}", line_num, str_to_String_noraw(text.as_str()));
        lines.push(RawLine::new(Arc::clone(&path), line_num, text));
    }
    defx!("read {} lines", lines.len());

    Ok(lines)
}

/// Read every line of the file at `path`.
pub fn read_lines(path: &FPath) -> Result<RawLines> {
    defñ!("({:?})", path);
    let file = match FileOpenOptions::new()
        .read(true)
        .open(path)
    {
        Ok(val) => val,
        Err(err) => {
            return Err(Error::new(err.kind(), format!("{}: {}", path, err)));
        }
    };

    read_lines_from(FPathP::new(path.clone()), file)
}

/// Read every line of every file in `paths`, file after file.
pub fn read_files(paths: &[FPath]) -> Result<RawLines> {
    let mut lines: RawLines = RawLines::new();
    for path in paths.iter() {
        lines.extend(read_lines(path)?);
    }

    Ok(lines)
}
