//! The crash report model.

use serde::Serialize;

/// One stack frame retained in a [`CrashReport`].
///
/// A frame only ever makes it into a report if the analyzer could attribute it
/// to a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrashFrame {
    /// File name (no directories) of the module that owns the instruction pointer.
    pub module: String,
    /// Function name, or empty if it could not be resolved.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub function: String,
    /// Source file name (no directories), or empty without line information.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    /// 1-based source line. Only meaningful when `source` is set.
    #[serde(skip_serializing_if = "is_zero")]
    pub line: u32,
}

fn is_zero(line: &u32) -> bool {
    *line == 0
}

impl CrashFrame {
    /// `true` if this frame has source file and line information.
    pub fn has_source(&self) -> bool {
        !self.source.is_empty()
    }
}

/// The report for the crashing thread of a single minidump.
///
/// A report without frames means "no report": the dump could not be
/// processed, it didn't record a crash, or the crashing thread is unknown.
/// Renderers produce empty output for such a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrashReport {
    /// `"<os> <os_version>"` of the machine that wrote the dump.
    pub platform: String,
    /// The crash reason, e.g. `SIGSEGV /SEGV_MAPERR`.
    #[serde(rename = "type")]
    pub crash_type: String,
    /// Frames of the crashing thread, crashing frame first.
    pub frames: Vec<CrashFrame>,
}

impl CrashReport {
    /// `true` if there is nothing to report.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
