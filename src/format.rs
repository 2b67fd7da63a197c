use std::fmt;
use std::str::FromStr;

use colored::Colorize;
#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::render::{Highlight, END_MARKER};

/// Presentation target for rendered differences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    /// Markers removed, no decoration
    Plain,
    /// ANSI colours for a terminal.
    ///
    /// Whether codes are emitted follows `colored`'s detection of the current
    /// stdout and the `NO_COLOR` / `CLICOLOR_FORCE` variables. Call
    /// `colored::control::set_override(true)` to always emit them, e.g. when
    /// the text goes to a log file or an HTTP body.
    #[default]
    Console,
    /// HTML spans and `<br />` line breaks
    Web,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Console => write!(f, "console"),
            Self::Web => write!(f, "web"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "none" => Ok(Self::Plain),
            "console" => Ok(Self::Console),
            "web" | "html" => Ok(Self::Web),
            other => Err(Error::invalid_format("output format", other)),
        }
    }
}

/// Replace the highlight markers left by [`render`](crate::render::render) with
/// decoration for `format`.
///
/// A start marker without a matching end highlights up to the end of the text;
/// a stray end marker is dropped. [`OutputFormat::Console`] colours only when
/// `colored` decides colour is enabled, otherwise the output equals the plain one.
#[must_use]
pub fn format_markers(text: &str, format: OutputFormat) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some((start, highlight)) = next_start(rest) {
        push_plain(&mut output, &rest[..start], format);

        let body_start = start + highlight.start_marker().len();
        let body = &rest[body_start..];
        let (segment, next) = match body.find(END_MARKER) {
            Some(end) => (&body[..end], &body[end + END_MARKER.len()..]),
            None => (body, ""),
        };

        push_highlighted(&mut output, segment, highlight, format);
        rest = next;
    }
    push_plain(&mut output, rest, format);

    if format == OutputFormat::Web {
        output.replace('\n', "<br />")
    } else {
        output
    }
}

/// Earliest start marker in `text` and the side it belongs to
fn next_start(text: &str) -> Option<(usize, Highlight)> {
    Highlight::ALL
        .iter()
        .filter_map(|&highlight| text.find(highlight.start_marker()).map(|pos| (pos, highlight)))
        .min_by_key(|(pos, _)| *pos)
}

fn push_plain(output: &mut String, text: &str, format: OutputFormat) {
    let text = text.replace(END_MARKER, "");
    match format {
        OutputFormat::Web => output.push_str(&escape_html(&text)),
        OutputFormat::Plain | OutputFormat::Console => output.push_str(&text),
    }
}

fn push_highlighted(output: &mut String, segment: &str, highlight: Highlight, format: OutputFormat) {
    match format {
        OutputFormat::Plain => output.push_str(segment),
        OutputFormat::Console => {
            let styled = match highlight {
                Highlight::Current => segment.black().on_bright_green(),
                Highlight::Previous => segment.black().on_bright_red(),
            };
            output.push_str(&styled.to_string());
        }
        OutputFormat::Web => {
            let (class, background) = match highlight {
                Highlight::Current => ("green", "darkgreen"),
                Highlight::Previous => ("red", "darkred"),
            };
            output.push_str(&format!(
                "<span class=\"{class} traceroute-{class}\" style=\"background-color: {background}; color:white\">{}</span>",
                escape_html(segment)
            ));
        }
    }
}

/// Escape text for HTML output
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
