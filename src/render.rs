//! Line-level highlighting of two raw captures.
//!
//! Works on the raw text rather than on the parsed tree so the output keeps the
//! exact spacing of the route-trace tool. Highlighted lines are wrapped in
//! abstract markers which [`format_markers`](crate::format::format_markers)
//! later turns into plain text, terminal colours or HTML.

use std::fmt;

use crate::diff::ChangeSet;
use crate::types::Capture;

/// Closes a highlighted line
pub const END_MARKER: &str = "{% END_COLOR %}";

/// Which capture a highlighted line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Line from the newer capture
    Current,
    /// Line from the older capture
    Previous,
}

impl Highlight {
    pub(crate) const ALL: [Self; 2] = [Self::Current, Self::Previous];

    /// Marker that opens a highlighted line
    #[must_use]
    pub const fn start_marker(self) -> &'static str {
        match self {
            Self::Current => "{% START_COLOR_GREEN %}",
            Self::Previous => "{% START_COLOR_RED %}",
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.start_marker())
    }
}

/// Wrap every line whose leading hop index is flagged in `changes`.
///
/// Lines without a leading integer (headers, banners, continuation lines) pass
/// through untouched. Line endings are kept as found, markers go before them;
/// a last line without a terminator gets a `\n`.
#[must_use]
pub fn annotate(text: &str, changes: &ChangeSet, highlight: Highlight) -> String {
    let mut output = String::with_capacity(text.len());

    for chunk in text.split_inclusive('\n') {
        let line = chunk.trim_end_matches(['\n', '\r']);
        let terminator = match &chunk[line.len()..] {
            "" => "\n",
            ending => ending,
        };

        let flagged = line
            .split_whitespace()
            .next()
            .and_then(|field| field.parse::<u32>().ok())
            .is_some_and(|index| changes.contains(index));

        if flagged {
            output.push_str(highlight.start_marker());
            output.push_str(line);
            output.push_str(END_MARKER);
        } else {
            output.push_str(line);
        }
        output.push_str(terminator);
    }

    output
}

/// Render both captures one after the other, current first, each under its timestamp
#[must_use]
pub fn render(current: &Capture, previous: &Capture, changes: &ChangeSet) -> String {
    format!(
        "Traceroute recorded at {}:\n{}Traceroute recorded at {}:\n{}",
        current.recorded_at,
        annotate(&current.raw, changes, Highlight::Current),
        previous.recorded_at,
        annotate(&previous.raw, changes, Highlight::Previous),
    )
}
