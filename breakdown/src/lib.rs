//! A library for turning minidump files into small, bounded crash reports.
//!
//! The [minidump](https://crates.io/crates/minidump) and
//! [minidump-processor](https://crates.io/crates/minidump-processor) crates do the
//! heavy lifting of parsing the dump, walking the stacks and symbolicating frames.
//! This crate takes the crashing thread out of that analysis, keeps a bounded
//! number of its frames (see [`TruncationPolicy`]) and produces a [`CrashReport`],
//! which can then be rendered as plain text, XML or JSON.
//!
//! If you provide directories containing Breakpad-format .sym files, the frames
//! will include function and source line information. Otherwise only the module
//! of each frame is known.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! let symbols = vec![PathBuf::from("symbols")];
//! let report = breakdown::generate_crash_report(Path::new("crash.dmp"), &symbols, 10);
//! if report.is_empty() {
//!     eprintln!("no crash found");
//! } else {
//!     print!("{}", breakdown::plain_text(&report));
//! }
//! ```
//!
//! The analysis step sits behind the [`DumpAnalyzer`] trait, so the report logic
//! can be driven by anything that produces a [`DumpAnalysis`].

mod analyzer;
mod builder;
mod processor;
mod render;
mod report;
mod truncation;

pub use analyzer::*;
pub use builder::*;
pub use processor::*;
pub use render::*;
pub use report::*;
pub use truncation::*;
