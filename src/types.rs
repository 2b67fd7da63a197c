use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// A raw route-trace capture as handed over by the probe runner
///
/// Only the raw text is meant to be stored; parsed trees and change-sets are
/// derived from it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Capture {
    /// Output of the route-trace command, verbatim
    pub raw: String,
    /// When the capture was taken
    pub recorded_at: DateTime<Utc>,
    /// Exit code of the route-trace command
    pub exit_code: i32,
}

impl Capture {
    /// Create a capture recorded now
    #[must_use]
    pub fn new(exit_code: i32, raw: impl Into<String>) -> Self {
        Self::with_timestamp(exit_code, raw, Utc::now())
    }

    /// Create a capture with an explicit timestamp
    #[must_use]
    pub fn with_timestamp(exit_code: i32, raw: impl Into<String>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            raw: raw.into(),
            recorded_at,
            exit_code,
        }
    }

    /// Returns true if the route-trace command exited successfully
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

impl fmt::Display for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traceroute recorded at {}:", self.recorded_at)?;
        writeln!(f, "{}", self.raw.trim_end())
    }
}

/// A parsed traceroute capture: the destination plus every hop in encounter order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Traceroute {
    /// Destination name as printed in the header (may be empty)
    pub dest_name: String,
    /// Destination address as printed in the header
    pub dest_address: IpAddr,
    /// Hops in the order they appear in the text. Indices are kept as printed,
    /// so gaps and repeats survive.
    pub hops: Vec<Hop>,
}

impl Traceroute {
    /// Create an empty traceroute for a destination
    #[must_use]
    pub fn new(dest_name: impl Into<String>, dest_address: IpAddr) -> Self {
        Self {
            dest_name: dest_name.into(),
            dest_address,
            hops: Vec::new(),
        }
    }

    /// Hop at a zero-based position in encounter order (not the printed hop index)
    #[must_use]
    pub fn hop_at(&self, position: usize) -> Option<&Hop> {
        self.hops.get(position)
    }

    /// Number of hops
    #[must_use]
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Returns true if no hop line was recognized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub(crate) fn push_hop(&mut self, hop: Hop) {
        self.hops.push(hop);
    }

    pub(crate) fn last_hop_mut(&mut self) -> Option<&mut Hop> {
        self.hops.last_mut()
    }
}

/// One intermediate point on the traced path
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Hop {
    /// Hop index as printed by the route-trace tool, starting at 1
    pub index: u32,
    /// Probe samples for this hop
    pub probes: Vec<Probe>,
}

impl Hop {
    /// Create a hop without probes
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self {
            index,
            probes: Vec::new(),
        }
    }

    /// First probe of the hop, the one used for route comparison
    #[must_use]
    pub fn first_probe(&self) -> Option<&Probe> {
        self.probes.first()
    }

    /// Append a probe.
    ///
    /// Route-trace tools print the responder once and then only the timings of
    /// the following probes, so a probe without an address takes name and
    /// address from the probe before it.
    pub fn push_probe(&mut self, mut probe: Probe) {
        if probe.address.is_none() {
            if let Some(last) = self.probes.last() {
                probe.address = last.address;
                probe.name.clone_from(&last.name);
            }
        }
        self.probes.push(probe);
    }
}

/// One measurement sample of a hop
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Probe {
    /// Resolved responder name (absent on address-only output)
    pub name: Option<String>,
    /// Responder address
    pub address: Option<IpAddr>,
    /// Autonomous system number
    pub asn: Option<u32>,
    /// Round-trip time in milliseconds, `None` when the probe timed out
    pub rtt: Option<f64>,
    /// Annotation such as `!H`, `!N` or `!X`
    pub annotation: Option<String>,
}

impl Probe {
    /// Returns true if the probe got no answer
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        self.rtt.is_none()
    }
}

impl fmt::Display for Traceroute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traceroute for {} ({})", self.dest_name, self.dest_address)?;
        writeln!(f)?;
        for hop in &self.hops {
            write!(f, "{hop}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3} ", self.index)?;
        if self.probes.is_empty() {
            return writeln!(f);
        }
        for (n, probe) in self.probes.iter().enumerate() {
            if n > 0 {
                write!(f, "    ")?;
            }
            writeln!(f, "{probe}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rtt {
            None => write!(f, "*")?,
            Some(rtt) => {
                if let Some(asn) = self.asn {
                    write!(f, "[AS{asn}] ")?;
                }
                match (&self.name, self.address) {
                    (Some(name), Some(address)) if *name != address.to_string() => {
                        write!(f, "{name} ({address}) ")?;
                    }
                    (_, Some(address)) => write!(f, "{address} ")?,
                    (Some(name), None) => write!(f, "{name} ")?,
                    (None, None) => {}
                }
                write!(f, "{rtt:.3} ms")?;
            }
        }
        if let Some(annotation) = &self.annotation {
            write!(f, " {annotation}")?;
        }
        Ok(())
    }
}
