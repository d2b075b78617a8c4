use std::fs::File;
use std::io::Write;
use std::ops::Deref;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use breakdown::{
    analyze_dump, json, plain_text, xml, MinidumpAnalyzer, ReportOptions, DEFAULT_MAX_FRAMES,
};
use clap::{ArgGroup, Parser, ValueEnum};
use log::{error, info};
use simplelog::{
    ColorChoice, ConfigBuilder, Level, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

const USAGE: &str = "breakdown <SYMBOLS_STORAGE> <CRASH_DUMP>";

/// Prints a short report of the crashing thread of a minidump.
///
/// Only the first frames of the crashing thread are shown, with function and
/// source line information for modules that have Breakpad symbols in
/// SYMBOLS_STORAGE.
#[derive(Debug, Parser)]
#[command(version, override_usage = USAGE)]
#[command(group(ArgGroup::new("format").args(["xml", "json"])))]
struct Args {
    /// Directory containing Breakpad symbol files.
    symbols_storage: PathBuf,

    /// The minidump file to analyze.
    crash_dump: PathBuf,

    /// Emit an XML report instead of plain text.
    #[arg(long)]
    xml: bool,

    /// Emit a JSON report instead of plain text.
    #[arg(long)]
    json: bool,

    /// Pretty-print --json output.
    #[arg(long, requires = "json")]
    pretty: bool,

    /// The maximum number of frames of the crashing thread to include.
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    max_frames: usize,

    /// Where to write the report to (if unspecified, stdout is used).
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Where to write logs to (if unspecified, stderr is used).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Set the logging level.
    #[arg(long, value_enum, default_value_t = Verbosity::Error)]
    verbose: Verbosity,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Verbosity {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<Verbosity> for LevelFilter {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Off => LevelFilter::Off,
            Verbosity::Error => LevelFilter::Error,
            Verbosity::Warn => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let verbosity = LevelFilter::from(args.verbose);
    let mut config = ConfigBuilder::new();
    config
        .set_location_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off);

    if let Some(log_path) = &args.log_file {
        let log_file = File::create(log_path)
            .with_context(|| format!("while creating log file {}", log_path.display()))?;
        let _ = WriteLogger::init(verbosity, config.build(), log_file);
    } else {
        let _ = TermLogger::init(
            verbosity,
            config.set_level_color(Level::Trace, None).build(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );
    }

    // Send panics to the logger too.
    panic::set_hook(Box::new(|panic_info| {
        let (filename, line) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line()))
            .unwrap_or(("<unknown>", 0));
        let cause = panic_info
            .payload()
            .downcast_ref::<String>()
            .map(String::deref)
            .unwrap_or_else(|| {
                panic_info
                    .payload()
                    .downcast_ref::<&str>()
                    .copied()
                    .unwrap_or("<cause unknown>")
            });
        error!("Panic - A panic occurred at {filename}:{line}: {cause}");
    }));

    Ok(())
}

fn render(args: &Args) -> anyhow::Result<String> {
    let options = ReportOptions::with_max_frames(args.max_frames);
    let symbol_paths = [args.symbols_storage.clone()];
    let outcome = analyze_dump(
        &MinidumpAnalyzer::new(),
        &args.crash_dump,
        &symbol_paths,
        &options,
    );
    info!("{}: {}", args.crash_dump.display(), outcome.name());

    let report = outcome.into_report();
    let out = if args.xml {
        xml(&report)
    } else if args.json {
        json(&report, args.pretty).context("while serializing report")?
    } else {
        plain_text(&report)
    };
    Ok(out)
}

fn try_main(args: &Args) -> anyhow::Result<bool> {
    init_logging(args)?;

    let out = render(args)?;
    if out.is_empty() {
        return Ok(false);
    }

    match &args.output_file {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("while creating output file {}", path.display()))?;
            writeln!(file, "{out}").context("while writing report")?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{out}").context("while writing report")?;
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match try_main(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            println!("Usage: {USAGE}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
