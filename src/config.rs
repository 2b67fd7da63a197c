use std::fmt;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;

/// Tunables for comparing captures and presenting the result.
///
/// Everything the analysis needs is passed in explicitly; nothing is read from
/// process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct AnalysisConfig {
    /// Minimum round-trip time increase in milliseconds that flags a hop as
    /// regressed. 0 disables regression detection.
    pub rtt_detection_threshold: u32,
    /// Presentation target for rendered differences
    pub output_format: OutputFormat,
}

impl AnalysisConfig {
    /// Create a builder for configuring the analysis
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Returns true if latency regressions are looked for
    #[must_use]
    pub const fn detects_regressions(&self) -> bool {
        self.rtt_detection_threshold != 0
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rtt_detection_threshold: 0,
            output_format: OutputFormat::Console,
        }
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Configuration:")?;
        if self.detects_regressions() {
            writeln!(f, "  RTT detection threshold: {} ms", self.rtt_detection_threshold)?;
        } else {
            writeln!(f, "  RTT detection threshold: disabled")?;
        }
        writeln!(f, "  Output format: {}", self.output_format)
    }
}

/// Builder for [`AnalysisConfig`]
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Set the round-trip time increase, in milliseconds, that counts as a regression
    #[must_use]
    pub const fn rtt_detection_threshold(mut self, threshold_ms: u32) -> Self {
        self.config.rtt_detection_threshold = threshold_ms;
        self
    }

    /// Set the presentation target
    #[must_use]
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Build the configuration
    #[must_use]
    pub const fn build(self) -> AnalysisConfig {
        self.config
    }
}
