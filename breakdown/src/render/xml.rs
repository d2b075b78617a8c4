use std::fmt;

use crate::report::{CrashFrame, CrashReport};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Displays a [`CrashReport`] as an XML document.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <root>
///   <platform>Linux 5.10</platform>
///   <type>SIGSEGV</type>
///   <item>
///     <module>app</module>
///     <function><![CDATA[main]]></function>
///     <source>main.c</source>
///     <line>7</line>
///   </item>
/// </root>
/// ```
///
/// Only function names are wrapped in CDATA; the other values are written
/// as-is and must not contain markup characters. There is no newline after
/// the closing `</root>`.
pub struct Xml<'a>(pub &'a CrashReport);

fn element(
    f: &mut fmt::Formatter<'_>,
    depth: usize,
    name: &str,
    text: impl fmt::Display,
) -> fmt::Result {
    writeln!(f, "{:indent$}<{name}>{text}</{name}>", "", indent = depth * 2)
}

/// Text in a CDATA section. A `]]>` in the text is split across two sections.
struct Cdata<'a>(&'a str);

impl fmt::Display for Cdata<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<![CDATA[")?;
        f.write_str(&self.0.replace("]]>", "]]]]><![CDATA[>"))?;
        f.write_str("]]>")
    }
}

fn print_item(f: &mut fmt::Formatter<'_>, frame: &CrashFrame) -> fmt::Result {
    writeln!(f, "  <item>")?;
    element(f, 2, "module", &frame.module)?;
    if !frame.function.is_empty() {
        element(f, 2, "function", Cdata(&frame.function))?;
    }
    if frame.has_source() {
        element(f, 2, "source", &frame.source)?;
        element(f, 2, "line", frame.line)?;
    }
    writeln!(f, "  </item>")
}

impl fmt::Display for Xml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        if report.is_empty() {
            return Ok(());
        }

        writeln!(f, "{}", DECLARATION)?;
        writeln!(f, "<root>")?;
        element(f, 1, "platform", &report.platform)?;
        element(f, 1, "type", &report.crash_type)?;
        for frame in report.frames.iter().filter(|frame| !frame.module.is_empty()) {
            print_item(f, frame)?;
        }
        write!(f, "</root>")
    }
}
