use std::fmt;

use crate::report::{CrashFrame, CrashReport};

/// Width of the field labels, including the label itself.
///
/// Tools parse this output by column, so this must not change.
const LABEL_WIDTH: usize = 9;

/// Displays a [`CrashReport`] as fixed-column plain text:
///
/// ```text
/// OS       : Linux 5.10
/// TYPE     : SIGSEGV
///
/// MODULE   : app
/// FUNCTION : main
/// SOURCE   : main.c:7
///
/// ```
///
/// `FUNCTION` and `SOURCE` only appear for frames that have them, and every
/// frame is followed by a blank line.
pub struct PlainText<'a>(pub &'a CrashReport);

fn field(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{label:<width$}: {value}", width = LABEL_WIDTH)
}

fn print_frame(f: &mut fmt::Formatter<'_>, frame: &CrashFrame) -> fmt::Result {
    field(f, "MODULE", &frame.module)?;
    if !frame.function.is_empty() {
        field(f, "FUNCTION", &frame.function)?;
    }
    if frame.has_source() {
        field(f, "SOURCE", format_args!("{}:{}", frame.source, frame.line))?;
    }
    writeln!(f)
}

impl fmt::Display for PlainText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        if report.is_empty() {
            return Ok(());
        }

        field(f, "OS", &report.platform)?;
        field(f, "TYPE", &report.crash_type)?;
        writeln!(f)?;

        for frame in report.frames.iter().filter(|frame| !frame.module.is_empty()) {
            print_frame(f, frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: &CrashReport) -> String {
        PlainText(report).to_string()
    }

    fn module(name: &str) -> CrashFrame {
        CrashFrame {
            module: String::from(name),
            ..Default::default()
        }
    }

    fn report(frames: Vec<CrashFrame>) -> CrashReport {
        CrashReport {
            platform: String::from("Linux 5.10"),
            crash_type: String::from("SIGSEGV"),
            frames,
        }
    }

    #[test]
    fn test_header() {
        let out = render(&report(vec![module("app")]));
        assert!(out.starts_with("OS       : Linux 5.10\nTYPE     : SIGSEGV\n\n"));
    }

    #[test]
    fn test_module_only_frame() {
        let out = render(&report(vec![module("libfoo.so")]));
        assert_eq!(
            out,
            "OS       : Linux 5.10\nTYPE     : SIGSEGV\n\nMODULE   : libfoo.so\n\n"
        );
    }

    #[test]
    fn test_full_frames() {
        let out = render(&report(vec![
            CrashFrame {
                module: String::from("app"),
                function: String::from("crash(int)"),
                source: String::from("main.cpp"),
                line: 42,
            },
            CrashFrame {
                module: String::from("libQt5Core.so.5"),
                function: String::from("QObject::event(QEvent*)"),
                ..Default::default()
            },
            module("libc.so.6"),
        ]));
        assert_eq!(
            out,
            "OS       : Linux 5.10\n\
             TYPE     : SIGSEGV\n\
             \n\
             MODULE   : app\n\
             FUNCTION : crash(int)\n\
             SOURCE   : main.cpp:42\n\
             \n\
             MODULE   : libQt5Core.so.5\n\
             FUNCTION : QObject::event(QEvent*)\n\
             \n\
             MODULE   : libc.so.6\n\
             \n"
        );
    }

    #[test]
    fn test_frames_without_module_are_skipped() {
        let out = render(&report(vec![module(""), module("libc.so.6")]));
        assert_eq!(
            out,
            "OS       : Linux 5.10\nTYPE     : SIGSEGV\n\nMODULE   : libc.so.6\n\n"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(render(&report(vec![])), "");
    }
}
