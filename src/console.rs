//! Tagged status lines for the terminal. Nothing here holds global state; callers pick the sink.

use std::io::{self, IsTerminal, Write};

use crossterm::style::Stylize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Error,
    Success,
    Failure,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Info => "[i]",
            Tone::Error => "[!]",
            Tone::Success => "[✓]",
            Tone::Failure => "[x]",
        }
    }
}

pub fn format_line(tone: Tone, msg: &str, colored: bool) -> String {
    let line = format!("{} {msg}", tone.tag());
    if !colored {
        return line;
    }
    match tone {
        Tone::Info => line.blue().to_string(),
        Tone::Error => line.red().to_string(),
        Tone::Success => line.green().to_string(),
        Tone::Failure => line.yellow().to_string(),
    }
}

pub fn write_line(out: &mut impl Write, tone: Tone, msg: &str, colored: bool) -> io::Result<()> {
    writeln!(out, "{}", format_line(tone, msg, colored))
}

pub fn prompt_marker(colored: bool) -> String {
    if colored {
        format!("{} ", ">".cyan())
    } else {
        "> ".to_string()
    }
}

/// Color only when the stream is a terminal; piped or redirected output stays plain.
pub fn use_color(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

pub fn info(msg: &str) {
    let out = io::stdout();
    let colored = use_color(&out);
    let _ = write_line(&mut out.lock(), Tone::Info, msg, colored);
}

pub fn success(msg: &str) {
    let out = io::stdout();
    let colored = use_color(&out);
    let _ = write_line(&mut out.lock(), Tone::Success, msg, colored);
}

pub fn error(msg: &str) {
    let err = io::stderr();
    let colored = use_color(&err);
    let _ = write_line(&mut err.lock(), Tone::Error, msg, colored);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_tagged() {
        assert_eq!(format_line(Tone::Error, "boom", false), "[!] boom");
        let mut buf = Vec::new();
        write_line(&mut buf, Tone::Success, "saved", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[✓] saved\n");
    }

    #[test]
    fn files_get_plain_output() {
        let file = tempfile::tempfile().unwrap();
        assert!(!use_color(&file));
    }

    #[test]
    fn colored_lines_keep_the_message() {
        let line = format_line(Tone::Info, "hi", true);
        assert!(line.contains("[i] hi"));
    }
}
