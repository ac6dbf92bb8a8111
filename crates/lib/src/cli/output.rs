use core::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::cli::Report;

pub(crate) struct Output<O> {
    out: O,
    kind: OutputKind,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputKind {
    Json,
    Normal,
}

impl<O> Output<O>
where
    O: Write,
{
    pub(crate) fn new(out: O, kind: OutputKind) -> Self {
        Self { out, kind }
    }

    pub(crate) fn info(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Info, m)
    }

    pub(crate) fn error(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Error, m)
    }

    /// Write the answer to a puzzle as `<label>=<value>`.
    pub(crate) fn answer(&mut self, label: &str, value: impl fmt::Display) -> io::Result<()> {
        match &self.kind {
            OutputKind::Json => {
                self.json(&Line {
                    ty: LineType::Answer,
                    data: Answer {
                        label,
                        value: DisplayString(value),
                    },
                })?;
            }
            OutputKind::Normal => {
                writeln!(self.out, "{label}={value}")?;
            }
        }

        Ok(())
    }

    pub(crate) fn report(&mut self, report: &Report) -> io::Result<()> {
        match &self.kind {
            OutputKind::Json => {
                self.json(&Line {
                    ty: LineType::Report,
                    data: report,
                })?;
            }
            OutputKind::Normal => {
                writeln!(self.out, "{report}")?;
            }
        }

        Ok(())
    }

    fn message(&mut self, kind: MessageKind, m: impl fmt::Display) -> io::Result<()> {
        match &self.kind {
            OutputKind::Json => {
                self.json(&Line {
                    ty: LineType::Message,
                    data: Message {
                        kind,
                        output: DisplayString(m),
                    },
                })?;
            }
            OutputKind::Normal => {
                writeln!(self.out, "{kind}: {m}")?;
            }
        }

        Ok(())
    }

    fn json<T>(&mut self, m: &T) -> io::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer(&mut self.out, m)?;
        writeln!(self.out)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct Line<T> {
    #[serde(rename = "type")]
    ty: LineType,
    data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
enum LineType {
    Answer,
    Message,
    Report,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
enum MessageKind {
    Info,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Info => write!(f, "info"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

#[derive(Serialize)]
#[serde(bound(serialize = "T: fmt::Display"))]
struct Message<T> {
    kind: MessageKind,
    output: DisplayString<T>,
}

#[derive(Serialize)]
#[serde(bound(serialize = "T: fmt::Display"))]
struct Answer<'a, T> {
    label: &'a str,
    value: DisplayString<T>,
}

/// Serializes anything displayable as a string.
struct DisplayString<T>(T);

impl<T> Serialize for DisplayString<T>
where
    T: fmt::Display,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Output, OutputKind};
    use crate::cli::Report;

    fn render(kind: OutputKind, f: impl FnOnce(&mut Output<&mut Vec<u8>>)) -> String {
        let mut buf = Vec::new();
        f(&mut Output::new(&mut buf, kind));
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_answer() {
        let normal = render(OutputKind::Normal, |o| o.answer("tot", 42u64).unwrap());
        assert_eq!(normal, "tot=42\n");

        let json = render(OutputKind::Json, |o| o.answer("tot", 42u64).unwrap());
        assert_eq!(
            json,
            "{\"type\":\"answer\",\"data\":{\"label\":\"tot\",\"value\":\"42\"}}\n"
        );
    }

    #[test]
    fn test_message_and_report() {
        let json = render(OutputKind::Json, |o| o.error("bad input").unwrap());
        assert_eq!(
            json,
            "{\"type\":\"message\",\"data\":{\"kind\":\"error\",\"output\":\"bad input\"}}\n"
        );

        let report = Report {
            count: 1,
            ..Report::default()
        };

        let json = render(OutputKind::Json, |o| o.report(&report).unwrap());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "report");
        assert_eq!(value["data"]["count"], 1);

        let normal = render(OutputKind::Normal, |o| o.info("warming up").unwrap());
        assert_eq!(normal, "info: warming up\n");
    }
}
