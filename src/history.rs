//! Persist-or-skip policy for a stream of captures of one target.

use std::fmt;

use log::{debug, error, info};

use crate::config::AnalysisConfig;
use crate::diff::{analyze, Analysis, ChangeSet};
use crate::format::format_markers;
use crate::render::render;
use crate::types::Capture;

/// Shown in a summary when the two newest captures cannot both be parsed
pub const INCOMPARABLE_NOTICE: &str = "Cannot compare the two newest traceroutes.\n";

/// What to do with a freshly taken capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistDecision {
    /// No earlier capture exists for the target
    FirstCapture,
    /// The route-trace command exited with a non-zero code
    ProbeFailed { exit_code: i32 },
    /// One of the two captures could not be parsed
    Incomparable,
    /// The route changed or got slower
    Changed(ChangeSet),
    /// Same route, no regression
    Unchanged,
}

impl PersistDecision {
    /// Returns true if the capture has to be stored
    #[must_use]
    pub const fn should_persist(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl fmt::Display for PersistDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstCapture => write!(f, "first capture"),
            Self::ProbeFailed { exit_code } => write!(f, "probe failed with exit code {exit_code}"),
            Self::Incomparable => write!(f, "captures cannot be compared"),
            Self::Changed(changes) => write!(
                f,
                "changed hops {:?}, regressed hops {:?}",
                changes.changed, changes.regressed
            ),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Decide whether `current` must be stored, given the last stored capture of
/// the same target.
///
/// A failed probe is always kept so the failure shows up in the history.
#[must_use]
pub fn decide(
    target: &str,
    current: &Capture,
    previous: Option<&Capture>,
    config: &AnalysisConfig,
) -> PersistDecision {
    if !current.succeeded() {
        error!(
            "Traceroute for target \"{target}\" failed with exit code {}",
            current.exit_code
        );
        return PersistDecision::ProbeFailed {
            exit_code: current.exit_code,
        };
    }

    let Some(previous) = previous else {
        info!("Created traceroute for target \"{target}\"");
        return PersistDecision::FirstCapture;
    };

    match analyze(&current.raw, &previous.raw, config.rtt_detection_threshold) {
        Analysis::Incomparable => {
            info!("Keeping traceroute for target \"{target}\" since it cannot be compared");
            PersistDecision::Incomparable
        }
        Analysis::Compared(changes) if !changes.is_empty() => {
            info!("Updating traceroute for target \"{target}\"");
            PersistDecision::Changed(changes)
        }
        Analysis::Compared(_) => {
            debug!("Current traceroute is identical to previous one for target \"{target}\"");
            PersistDecision::Unchanged
        }
    }
}

/// Human readable history of one target, newest capture first.
///
/// The two newest captures are shown as a highlighted difference, older ones
/// verbatim. If the newest pair cannot be compared, [`INCOMPARABLE_NOTICE`]
/// precedes both captures, which are then shown without highlights. Output is
/// decorated according to `config.output_format`.
#[must_use]
pub fn summarize(captures: &[Capture], config: &AnalysisConfig) -> String {
    let mut output = match captures.len() {
        0 => return "No traceroute entries.\n".to_string(),
        1 => "Target has 1 traceroute entry.\n".to_string(),
        n => format!("Target has {n} traceroute entries.\n"),
    };

    match captures {
        [current, previous, older @ ..] => {
            match analyze(&current.raw, &previous.raw, config.rtt_detection_threshold) {
                Analysis::Compared(changes) => {
                    output.push_str(&render(current, previous, &changes));
                }
                Analysis::Incomparable => {
                    output.push_str(INCOMPARABLE_NOTICE);
                    output.push_str(&current.to_string());
                    output.push_str(&previous.to_string());
                }
            }
            for capture in older {
                output.push_str(&capture.to_string());
            }
        }
        [only] => output.push_str(&only.to_string()),
        [] => {}
    }

    format_markers(&output, config.output_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use chrono::{TimeZone, Utc};

    const ROUTE_A: &str = "example.com (93.184.216.34)\n 1  gw (10.0.0.1)  1.0 ms\n 2  isp (10.1.0.1)  5.0 ms";
    const ROUTE_B: &str = "example.com (93.184.216.34)\n 1  gw (10.0.0.1)  1.0 ms\n 2  isp (10.2.0.1)  5.0 ms";

    fn capture(exit_code: i32, raw: &str, hour: u32) -> Capture {
        Capture::with_timestamp(
            exit_code,
            raw,
            Utc.with_ymd_and_hms(2026, 10, 16, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_first_capture_is_kept() {
        let decision = decide("t", &capture(0, ROUTE_A, 1), None, &AnalysisConfig::default());
        assert_eq!(decision, PersistDecision::FirstCapture);
        assert!(decision.should_persist());
    }

    #[test]
    fn test_failed_probe_is_kept() {
        let previous = capture(0, ROUTE_A, 1);
        let decision = decide("t", &capture(2, ROUTE_A, 2), Some(&previous), &AnalysisConfig::default());
        assert_eq!(decision, PersistDecision::ProbeFailed { exit_code: 2 });
        assert!(decision.should_persist());
    }

    #[test]
    fn test_unchanged_is_skipped() {
        let previous = capture(0, ROUTE_A, 1);
        let decision = decide("t", &capture(0, ROUTE_A, 2), Some(&previous), &AnalysisConfig::default());
        assert_eq!(decision, PersistDecision::Unchanged);
        assert!(!decision.should_persist());
    }

    #[test]
    fn test_route_change_is_kept() {
        let previous = capture(0, ROUTE_A, 1);
        let decision = decide("t", &capture(0, ROUTE_B, 2), Some(&previous), &AnalysisConfig::default());
        match decision {
            PersistDecision::Changed(changes) => assert!(changes.changed.contains(&2)),
            other => panic!("unexpected decision: {other}"),
        }
    }

    #[test]
    fn test_unparseable_previous_is_kept() {
        let previous = capture(0, "traceroute: command not found", 1);
        let decision = decide("t", &capture(0, ROUTE_A, 2), Some(&previous), &AnalysisConfig::default());
        assert_eq!(decision, PersistDecision::Incomparable);
        assert!(decision.should_persist());
    }

    #[test]
    fn test_summarize() {
        let config = AnalysisConfig::builder()
            .output_format(OutputFormat::Plain)
            .build();
        assert_eq!(summarize(&[], &config), "No traceroute entries.\n");

        let captures = [capture(0, ROUTE_B, 3), capture(0, ROUTE_A, 2), capture(0, ROUTE_A, 1)];
        let output = summarize(&captures, &config);

        assert!(output.starts_with("Target has 3 traceroute entries.\nTraceroute recorded at 2026-10-16 03:00:00 UTC:\n"));
        assert!(output.contains("Traceroute recorded at 2026-10-16 02:00:00 UTC:\n"));
        assert!(output.ends_with("Traceroute recorded at 2026-10-16 01:00:00 UTC:\nexample.com (93.184.216.34)\n 1  gw (10.0.0.1)  1.0 ms\n 2  isp (10.1.0.1)  5.0 ms\n"));
        assert!(!output.contains("{%"));
    }

    #[test]
    fn test_summarize_highlights_newest_pair() {
        let config = AnalysisConfig::builder()
            .output_format(OutputFormat::Web)
            .build();
        let captures = [capture(0, ROUTE_B, 2), capture(0, ROUTE_A, 1)];
        let output = summarize(&captures, &config);

        assert!(output.contains("traceroute-green\" style=\"background-color: darkgreen; color:white\"> 2  isp (10.2.0.1)  5.0 ms</span>"));
        assert!(output.contains("traceroute-red\" style=\"background-color: darkred; color:white\"> 2  isp (10.1.0.1)  5.0 ms</span>"));
    }

    #[test]
    fn test_summarize_flags_incomparable_pair() {
        let config = AnalysisConfig::builder()
            .output_format(OutputFormat::Plain)
            .build();
        let bad = "example.com (93.184.216.34)\n 1  gw (10.0.0.9)  1.o ms";
        let captures = [capture(0, bad, 2), capture(0, ROUTE_A, 1)];
        let output = summarize(&captures, &config);

        assert!(output.starts_with(&format!(
            "Target has 2 traceroute entries.\n{INCOMPARABLE_NOTICE}Traceroute recorded at 2026-10-16 02:00:00 UTC:\n"
        )));
        assert!(output.contains(" 1  gw (10.0.0.9)  1.o ms\n"));
        assert!(output.ends_with(" 2  isp (10.1.0.1)  5.0 ms\n"));

        let comparable = summarize(&[capture(0, ROUTE_B, 2), capture(0, ROUTE_A, 1)], &config);
        assert!(!comparable.contains(INCOMPARABLE_NOTICE));
    }

    #[test]
    fn test_summarize_console_colours() {
        colored::control::set_override(true);
        let config = AnalysisConfig::builder()
            .output_format(OutputFormat::Console)
            .build();
        let output = summarize(&[capture(0, ROUTE_B, 2), capture(0, ROUTE_A, 1)], &config);

        assert!(output.contains("\u{1b}["));
        assert!(!output.contains("{%"));
    }
}
