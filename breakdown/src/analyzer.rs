//! The seam between report building and dump analysis.
//!
//! Building a report only needs a handful of facts about a processed dump: did
//! it crash, which thread asked for the dump, what system wrote it, and the
//! symbolicated frames of each thread. [`DumpAnalyzer`] provides those facts as
//! a [`DumpAnalysis`]. [`MinidumpAnalyzer`][crate::MinidumpAnalyzer] is the
//! implementation backed by minidump-processor; tests can substitute their own.

use std::path::{Path, PathBuf};

use minidump_processor::ProcessError;

/// Processes a dump file and reports what happened in it.
pub trait DumpAnalyzer {
    /// Process the dump at `dump_path`.
    ///
    /// `symbol_paths` are directories searched in order for symbol files. If
    /// empty, frames are only attributed to modules.
    fn analyze(
        &self,
        dump_path: &Path,
        symbol_paths: &[PathBuf],
    ) -> Result<DumpAnalysis, AnalysisError>;
}

/// The result of successfully processing a dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpAnalysis {
    /// `true` if the dump was written in response to a crash.
    pub crashed: bool,
    /// Index into `threads` of the thread that requested the dump.
    pub requesting_thread: Option<usize>,
    /// Operating system name, e.g. `Linux` or `Windows NT`.
    pub os: String,
    /// Operating system version, possibly empty.
    pub os_version: String,
    /// Why the process crashed, e.g. `SIGSEGV /SEGV_MAPERR`.
    pub crash_reason: String,
    /// The frames of each thread, innermost first.
    pub threads: Vec<Vec<AnalyzedFrame>>,
}

impl DumpAnalysis {
    /// The frames of the requesting thread, if it is known.
    pub fn requesting_stack(&self) -> Option<&[AnalyzedFrame]> {
        self.requesting_thread
            .and_then(|idx| self.threads.get(idx))
            .map(Vec::as_slice)
    }
}

/// A single symbolicated stack frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedFrame {
    /// The module containing the instruction pointer, if any.
    pub module: Option<AnalyzedModule>,
    pub function_name: Option<String>,
    pub source: Option<SourceLocation>,
}

/// A loaded module a frame was attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedModule {
    /// Full path of the module's code file as recorded in the dump.
    pub code_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file path as recorded in the symbol file.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
}

/// An error encountered while analyzing a dump.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Error reading dump: {0}")]
    Read(#[from] minidump::Error),
    #[error("Error processing dump: {0}")]
    Process(#[from] ProcessError),
    #[error("Could not start the processing runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl AnalysisError {
    /// Returns just the name of the error, as a more human-friendly version of
    /// an error-code for error logging.
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisError::Read(_) => "ReadError",
            AnalysisError::Process(_) => "ProcessError",
            AnalysisError::Runtime(_) => "RuntimeError",
        }
    }
}
