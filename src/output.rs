//! Result serialization.
//!
//! Results are written in the `java.util.Properties` text format so files
//! produced by earlier ConvertUUID releases and by this tool are
//! interchangeable: a comment header, a timestamp line, then one
//! `username=identifier` pair per line.

use crate::engine::DispatchReport;
use crate::error::{Error, Result};
use crate::model::Identifier;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::io::Write;

pub const DEFAULT_COMMENT: &str = "Generated by ConvertUUID";

/// Write `entries` to `sink` with the current time in the header.
pub fn write_properties<W: Write>(
    entries: &[(String, Identifier)],
    sink: W,
    comment: &str,
) -> Result<()> {
    write_properties_at(entries, sink, comment, Utc::now())
}

/// Same as [`write_properties`] with an explicit header timestamp.
pub fn write_properties_at<W: Write>(
    entries: &[(String, Identifier)],
    mut sink: W,
    comment: &str,
    timestamp: DateTime<Utc>,
) -> Result<()> {
    let mut text = String::new();
    for line in comment.lines() {
        let _ = writeln!(text, "#{}", escape(line, Position::Comment));
    }
    let _ = writeln!(text, "#{}", timestamp.format("%a %b %d %H:%M:%S UTC %Y"));
    for (username, id) in entries {
        let _ = writeln!(
            text,
            "{}={}",
            escape(username, Position::Key),
            escape(id.as_str(), Position::Value)
        );
    }

    sink.write_all(text.as_bytes()).map_err(Error::Output)?;
    sink.flush().map_err(Error::Output)
}

/// Write one `username<TAB>reason` line per unresolved username.
///
/// Backslash, tab, and line breaks inside either field are backslash-escaped
/// so every line splits on its single unescaped tab.
pub fn write_unresolved<W: Write>(report: &DispatchReport, mut sink: W) -> Result<()> {
    for skipped in &report.unresolved {
        writeln!(
            sink,
            "{}\t{}",
            escape_field(&skipped.username),
            escape_field(&skipped.reason.to_string())
        )
        .map_err(Error::Output)?;
    }
    sink.flush().map_err(Error::Output)
}

fn escape_field(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Key,
    Value,
    Comment,
}

/// Properties escaping. Non-ASCII is written as UTF-16 `\uXXXX` units.
fn escape(raw: &str, position: Position) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, c) in raw.chars().enumerate() {
        match c {
            _ if position == Position::Comment && (' '..='~').contains(&c) => out.push(c),
            ' ' if position == Position::Key || i == 0 => out.push_str("\\ "),
            ' ' => out.push(' '),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            '!'..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
        }
    }
    out
}
