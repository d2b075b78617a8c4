//! Rendering a [`CrashReport`] as text.
//!
//! Every renderer treats a report without frames as "nothing to render" and
//! produces no output at all for it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::builder::generate_crash_report;
use crate::report::CrashReport;
use crate::truncation::DEFAULT_MAX_FRAMES;

mod text;
mod xml;

pub use text::PlainText;
pub use xml::Xml;

impl CrashReport {
    /// Write the fixed-column plain text report to `f`.
    pub fn print_text<T: Write>(&self, f: &mut T) -> io::Result<()> {
        write!(f, "{}", PlainText(self))
    }

    /// Write the XML report to `f`.
    pub fn print_xml<T: Write>(&self, f: &mut T) -> io::Result<()> {
        write!(f, "{}", Xml(self))
    }

    /// Write the report as a JSON object to `f`.
    pub fn print_json<T: Write>(&self, f: &mut T, pretty: bool) -> Result<(), serde_json::Error> {
        if self.is_empty() {
            return Ok(());
        }
        if pretty {
            serde_json::to_writer_pretty(f, self)
        } else {
            serde_json::to_writer(f, self)
        }
    }
}

/// The plain text rendering of `report`.
pub fn plain_text(report: &CrashReport) -> String {
    PlainText(report).to_string()
}

/// The XML rendering of `report`.
pub fn xml(report: &CrashReport) -> String {
    Xml(report).to_string()
}

/// The JSON rendering of `report`.
pub fn json(report: &CrashReport, pretty: bool) -> Result<String, serde_json::Error> {
    if report.is_empty() {
        Ok(String::new())
    } else if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

/// Process the dump at `dump_path` and render its report as plain text.
///
/// Returns an empty string if there is no report.
pub fn plain_text_from_dump(dump_path: &Path, symbol_paths: &[PathBuf]) -> String {
    plain_text(&generate_crash_report(
        dump_path,
        symbol_paths,
        DEFAULT_MAX_FRAMES,
    ))
}

/// Process the dump at `dump_path` and render its report as XML.
///
/// Returns an empty string if there is no report.
pub fn xml_from_dump(dump_path: &Path, symbol_paths: &[PathBuf]) -> String {
    xml(&generate_crash_report(
        dump_path,
        symbol_paths,
        DEFAULT_MAX_FRAMES,
    ))
}
