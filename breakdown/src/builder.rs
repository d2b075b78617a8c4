//! Building a [`CrashReport`] out of a dump analysis.

use std::path::{Path, PathBuf};

use minidump_common::utils::basename;
use tracing::{debug, trace, warn};

use crate::analyzer::{AnalysisError, AnalyzedFrame, DumpAnalysis, DumpAnalyzer};
use crate::processor::MinidumpAnalyzer;
use crate::report::{CrashFrame, CrashReport};
use crate::truncation::{TruncationPolicy, DEFAULT_MAX_FRAMES};

/// Options that control how much of the crashing stack ends up in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Upper bound on the number of stack frames considered.
    pub max_frames: usize,
    /// How deep stacks are cut down.
    pub truncation: TruncationPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            max_frames: DEFAULT_MAX_FRAMES,
            truncation: TruncationPolicy::default(),
        }
    }
}

impl ReportOptions {
    /// The default options with a different frame limit.
    pub fn with_max_frames(max_frames: usize) -> Self {
        ReportOptions {
            max_frames,
            ..Default::default()
        }
    }
}

/// What came of trying to build a report.
///
/// Callers that only care about "report or nothing" should use
/// [`into_report`][ReportOutcome::into_report], which maps every failure to an
/// empty [`CrashReport`].
#[derive(Debug)]
pub enum ReportOutcome {
    /// The dump could not be analyzed.
    Failed(AnalysisError),
    /// The dump wasn't written because of a crash.
    NotACrash,
    /// The dump crashed, but the crashing thread is unknown.
    NoRequestingThread,
    Report(CrashReport),
}

impl ReportOutcome {
    /// Collapse this outcome into a report, empty unless a report was built.
    pub fn into_report(self) -> CrashReport {
        match self {
            ReportOutcome::Report(report) => report,
            _ => CrashReport::default(),
        }
    }

    /// Returns just the name of the outcome, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ReportOutcome::Failed(_) => "Failed",
            ReportOutcome::NotACrash => "NotACrash",
            ReportOutcome::NoRequestingThread => "NoRequestingThread",
            ReportOutcome::Report(_) => "Report",
        }
    }
}

/// Build a report from an already analyzed dump.
pub fn report_from_analysis(analysis: &DumpAnalysis, options: &ReportOptions) -> ReportOutcome {
    if !analysis.crashed {
        return ReportOutcome::NotACrash;
    }
    let Some(stack) = analysis.requesting_stack() else {
        return ReportOutcome::NoRequestingThread;
    };

    let frame_count = stack.len().min(options.max_frames);
    let policy = &options.truncation;
    let frames = policy
        .retained(frame_count)
        .filter_map(|idx| {
            let frame = crash_frame(&stack[idx]);
            if frame.is_none() {
                trace!("dropping frame {idx}: no module name");
            }
            frame
        })
        .collect::<Vec<_>>();

    if frame_count > policy.last_head_frame() + 1 {
        trace!(
            "kept {} of {} frames (head ends at {}, tail starts at {})",
            frames.len(),
            frame_count,
            policy.last_head_frame(),
            policy.first_tail_frame(frame_count)
        );
    }

    ReportOutcome::Report(CrashReport {
        platform: platform(analysis),
        crash_type: analysis.crash_reason.clone(),
        frames,
    })
}

fn platform(analysis: &DumpAnalysis) -> String {
    if analysis.os_version.is_empty() {
        analysis.os.clone()
    } else {
        format!("{} {}", analysis.os, analysis.os_version)
    }
}

fn crash_frame(frame: &AnalyzedFrame) -> Option<CrashFrame> {
    let module = basename(&frame.module.as_ref()?.code_file);
    if module.is_empty() {
        return None;
    }
    let mut result = CrashFrame {
        module: module.to_string(),
        ..Default::default()
    };
    if let Some(function) = frame.function_name.as_deref() {
        result.function = function.to_string();
    }
    if let Some(source) = frame.source.as_ref().filter(|s| !s.file.is_empty()) {
        result.source = basename(&source.file).to_string();
        result.line = source.line;
    }
    Some(result)
}

/// Analyze the dump at `dump_path` with `analyzer` and build a report from it.
pub fn analyze_dump<A: DumpAnalyzer + ?Sized>(
    analyzer: &A,
    dump_path: &Path,
    symbol_paths: &[PathBuf],
    options: &ReportOptions,
) -> ReportOutcome {
    let outcome = match analyzer.analyze(dump_path, symbol_paths) {
        Ok(analysis) => report_from_analysis(&analysis, options),
        Err(err) => {
            warn!("{} - {}: {}", err.name(), dump_path.display(), err);
            ReportOutcome::Failed(err)
        }
    };
    debug!("{}: {}", dump_path.display(), outcome.name());
    outcome
}

/// Build a report for the crashing thread of the dump at `dump_path`.
///
/// At most `max_frames` frames of the crashing thread are considered. Any
/// failure, or a dump without a crash, produces an empty report.
pub fn build_report<A: DumpAnalyzer + ?Sized>(
    analyzer: &A,
    dump_path: &Path,
    symbol_paths: &[PathBuf],
    max_frames: usize,
) -> CrashReport {
    analyze_dump(
        analyzer,
        dump_path,
        symbol_paths,
        &ReportOptions::with_max_frames(max_frames),
    )
    .into_report()
}

/// Like [`build_report`], using a [`MinidumpAnalyzer`].
pub fn generate_crash_report(
    dump_path: &Path,
    symbol_paths: &[PathBuf],
    max_frames: usize,
) -> CrashReport {
    build_report(&MinidumpAnalyzer::new(), dump_path, symbol_paths, max_frames)
}
