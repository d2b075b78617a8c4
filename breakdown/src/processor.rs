use std::path::{Path, PathBuf};

use minidump::{Minidump, Module};
use minidump_processor::ProcessState;
use minidump_unwind::{simple_symbol_supplier, MultiSymbolProvider, StackFrame, Symbolizer};
use tracing::debug;

use crate::analyzer::{
    AnalysisError, AnalyzedFrame, AnalyzedModule, DumpAnalysis, DumpAnalyzer, SourceLocation,
};

/// A [`DumpAnalyzer`] that reads minidumps and walks their stacks with
/// minidump-processor, looking up Breakpad symbol files on disk.
///
/// Nothing is kept between calls: the mapped dump, the symbolizer and the
/// runtime used to drive the processor all live for a single `analyze`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinidumpAnalyzer;

impl MinidumpAnalyzer {
    pub fn new() -> MinidumpAnalyzer {
        MinidumpAnalyzer
    }
}

impl DumpAnalyzer for MinidumpAnalyzer {
    fn analyze(
        &self,
        dump_path: &Path,
        symbol_paths: &[PathBuf],
    ) -> Result<DumpAnalysis, AnalysisError> {
        debug!("reading minidump {}", dump_path.display());
        let dump = Minidump::read_path(dump_path)?;

        let mut provider = MultiSymbolProvider::new();
        if !symbol_paths.is_empty() {
            provider.add(Box::new(Symbolizer::new(simple_symbol_supplier(
                symbol_paths.to_vec(),
            ))));
        }

        // The processor is async, but we have nothing else to do while it runs.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let state = runtime.block_on(minidump_processor::process_minidump(&dump, &provider))?;

        Ok(analysis_from_state(&state))
    }
}

fn analysis_from_state(state: &ProcessState) -> DumpAnalysis {
    let system_info = &state.system_info;
    DumpAnalysis {
        crashed: state.crashed(),
        requesting_thread: state.requesting_thread,
        os: system_info.os.long_name().to_string(),
        os_version: system_info.os_version.clone().unwrap_or_default(),
        crash_reason: state
            .exception_info
            .as_ref()
            .map(|info| info.reason.to_string())
            .unwrap_or_default(),
        threads: state
            .threads
            .iter()
            .map(|stack| stack.frames.iter().map(analyzed_frame).collect())
            .collect(),
    }
}

fn analyzed_frame(frame: &StackFrame) -> AnalyzedFrame {
    AnalyzedFrame {
        module: frame.module.as_ref().map(|module| AnalyzedModule {
            code_file: module.code_file().into_owned(),
        }),
        function_name: frame.function_name.clone(),
        source: frame
            .source_file_name
            .as_ref()
            .map(|file| SourceLocation {
                file: file.clone(),
                line: frame.source_line.unwrap_or(0),
            }),
    }
}
