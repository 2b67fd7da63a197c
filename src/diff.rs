//! Comparison of two parsed captures.
//!
//! Two independent signals are produced per hop position: a route change (the
//! first probe answered from a different address, or the hop exists on one side
//! only) and a latency regression (the first probe got slower by more than the
//! threshold, or stopped answering).

use std::collections::BTreeSet;
use std::net::IpAddr;

use log::{debug, warn};
#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::parser::parse;
use crate::types::{Hop, Traceroute};

/// Hop indices flagged by a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct ChangeSet {
    /// Hops whose responding address differs, or that exist on one side only
    pub changed: BTreeSet<u32>,
    /// Hops whose round-trip time got worse
    pub regressed: BTreeSet<u32>,
}

impl ChangeSet {
    /// Returns true if neither a route change nor a regression was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.regressed.is_empty()
    }

    /// Returns true if the hop index is flagged by either signal
    #[must_use]
    pub fn contains(&self, index: u32) -> bool {
        self.changed.contains(&index) || self.regressed.contains(&index)
    }
}

/// Outcome of comparing two raw captures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Both captures parsed and were compared
    Compared(ChangeSet),
    /// At least one capture could not be parsed
    Incomparable,
}

impl Analysis {
    /// Whether the current capture must be kept.
    ///
    /// An incomparable pair always counts as a change so that no capture is
    /// dropped when the output dialect is not understood.
    #[must_use]
    pub fn requires_persist(&self) -> bool {
        match self {
            Self::Compared(changes) => !changes.is_empty(),
            Self::Incomparable => true,
        }
    }

    /// The change-set, if the captures could be compared
    #[must_use]
    pub const fn changes(&self) -> Option<&ChangeSet> {
        match self {
            Self::Compared(changes) => Some(changes),
            Self::Incomparable => None,
        }
    }
}

/// Compare two parsed captures.
///
/// Positions are walked in encounter order up to the longer of both hop lists.
/// A `threshold_ms` of 0 disables regression detection.
#[must_use]
pub fn diff(current: &Traceroute, previous: &Traceroute, threshold_ms: u32) -> ChangeSet {
    let mut changes = ChangeSet::default();
    let max_hops = current.len().max(previous.len());

    for position in 0..max_hops {
        let current_hop = current.hop_at(position);
        let previous_hop = previous.hop_at(position);

        match (current_hop, previous_hop) {
            (Some(cur), Some(prev)) => {
                if first_address(cur) != first_address(prev) {
                    changes.changed.insert(cur.index);
                }
            }
            (Some(hop), None) | (None, Some(hop)) => {
                changes.changed.insert(hop.index);
            }
            (None, None) => {}
        }

        if threshold_ms != 0 {
            if let (Some(cur), Some(prev)) = (current_hop, previous_hop) {
                if is_regression(cur, prev, threshold_ms) {
                    changes.regressed.insert(cur.index);
                }
            }
        }
    }

    debug!(
        "Compared traceroutes to {}: {} changed, {} regressed",
        current.dest_name,
        changes.changed.len(),
        changes.regressed.len()
    );

    changes
}

/// Parse both raw captures and compare them.
///
/// Never fails: a capture that does not parse yields [`Analysis::Incomparable`].
#[must_use]
pub fn analyze(current_raw: &str, previous_raw: &str, threshold_ms: u32) -> Analysis {
    let current = match parse(current_raw) {
        Ok(trace) => trace,
        Err(e) => {
            warn!("Cannot parse current traceroute: {e}");
            return Analysis::Incomparable;
        }
    };

    let previous = match parse(previous_raw) {
        Ok(trace) => trace,
        Err(e) => {
            warn!("Cannot parse previous traceroute: {e}");
            return Analysis::Incomparable;
        }
    };

    Analysis::Compared(diff(&current, &previous, threshold_ms))
}

fn first_address(hop: &Hop) -> Option<IpAddr> {
    hop.first_probe().and_then(|probe| probe.address)
}

/// Timeout after an answer always regresses; otherwise the slowdown must exceed the threshold
fn is_regression(current: &Hop, previous: &Hop, threshold_ms: u32) -> bool {
    let (Some(cur), Some(prev)) = (current.first_probe(), previous.first_probe()) else {
        return false;
    };

    match (cur.rtt, prev.rtt) {
        (None, Some(_)) => true,
        (Some(cur_rtt), Some(prev_rtt)) => cur_rtt > prev_rtt + f64::from(threshold_ms),
        _ => false,
    }
}
