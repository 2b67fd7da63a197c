//! Parser for raw `traceroute` / `tracert` output.
//!
//! Two dialects are understood:
//! - Unix `traceroute`, which prints a resolved name followed by the address in
//!   parentheses and one or more `<rtt> ms` samples per line
//! - Windows `tracert`, which prints the timings first and then either a bare
//!   address or a name followed by the address in brackets
//!
//! Lines that fit neither the header nor the hop grammar are skipped, so banners
//! such as `over a maximum of 30 hops:` or `Trace complete.` are harmless.

use std::net::IpAddr;
use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::types::{Hop, Probe, Traceroute};

/// Timeout marker printed in place of a round-trip time
pub const TIMEOUT_MARKER: &str = "*";

/// Unit token that follows every round-trip time
const RTT_UNIT: &str = "ms";

mod patterns {
    use super::{Lazy, Regex};

    /// `<name> (<address>)` or `<name> [<address>]`
    pub static NAME_ADDRESS: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(\S+)\s+[(\[]([0-9a-fA-F.:]+)[)\]]").expect("Invalid name/address regex")
    });

    /// Optional hop index followed by the rest of the line
    pub static HOP: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*(\d+)?\s+(.+)$").expect("Invalid hop regex"));

    pub static ASN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\[AS(\d+)\]").expect("Invalid ASN regex"));

    pub static DECIMAL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("Invalid decimal regex"));
}

/// A timing sample found on a hop line, before responder details are attached
#[derive(Debug, Clone, PartialEq)]
struct Sample {
    rtt: Option<f64>,
    annotation: Option<String>,
}

/// Parse raw route-trace output into a [`Traceroute`].
///
/// # Errors
/// Returns [`ParseError::InvalidHeader`] if the first non-empty line names no
/// destination address, and [`ParseError::InvalidProbeToken`] if any value in
/// front of an `ms` unit is not a decimal. No partial tree is returned.
pub fn parse(raw: &str) -> Result<Traceroute, ParseError> {
    let mut lines = raw.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().unwrap_or_default();
    let (dest_name, dest_address) =
        find_name_address(header).ok_or_else(|| ParseError::invalid_header(header))?;

    let mut traceroute = Traceroute::new(dest_name, dest_address);

    for line in lines {
        let Some(captures) = patterns::HOP.captures(line) else {
            continue;
        };
        let remainder = captures.get(2).map_or("", |m| m.as_str());

        if let Some(index) = captures.get(1) {
            let Ok(index) = index.as_str().parse::<u32>() else {
                debug!("Skipping line with out of range hop index: '{line}'");
                continue;
            };
            traceroute.push_hop(Hop::new(index));
        }

        let Some(hop) = traceroute.last_hop_mut() else {
            debug!("Skipping continuation line before any hop: '{line}'");
            continue;
        };

        let asn = find_asn(remainder);
        let (name, address) = match find_name_address(remainder) {
            Some((name, address)) => (Some(name.to_string()), Some(address)),
            None => {
                let address = find_bare_address(remainder);
                (address.map(|a| a.to_string()), address)
            }
        };

        for sample in scan_samples(remainder, line)? {
            hop.push_probe(Probe {
                name: name.clone(),
                address,
                asn,
                rtt: sample.rtt,
                annotation: sample.annotation,
            });
        }
    }

    debug!(
        "Parsed traceroute to {} ({}) with {} hops",
        traceroute.dest_name,
        traceroute.dest_address,
        traceroute.len()
    );

    Ok(traceroute)
}

impl FromStr for Traceroute {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// First `<name> (<address>)` pair whose address is a valid IPv4/IPv6 literal
fn find_name_address(text: &str) -> Option<(&str, IpAddr)> {
    patterns::NAME_ADDRESS.captures_iter(text).find_map(|captures| {
        let name = captures.get(1)?.as_str();
        let address = captures.get(2)?.as_str().parse().ok()?;
        Some((name, address))
    })
}

/// First whitespace separated token that is an address on its own (`tracert -d` style)
fn find_bare_address(text: &str) -> Option<IpAddr> {
    text.split_whitespace().find_map(|token| {
        token
            .trim_matches(|c| matches!(c, '(' | ')' | '[' | ']'))
            .parse()
            .ok()
    })
}

fn find_asn(text: &str) -> Option<u32> {
    let digits = patterns::ASN.captures(text)?.get(1)?.as_str();
    match digits.parse() {
        Ok(asn) => Some(asn),
        Err(_) => {
            debug!("Ignoring out of range ASN 'AS{digits}'");
            None
        }
    }
}

/// Walk the tokens of a hop line and collect every timing sample.
///
/// A sample is either the `*` timeout marker or a value followed by the `ms`
/// unit (`12.3 ms`, or `<1 ms` on Windows). An annotation directly after a
/// sample belongs to it.
fn scan_samples(remainder: &str, line: &str) -> Result<Vec<Sample>, ParseError> {
    let tokens: Vec<&str> = remainder.split_whitespace().collect();
    let mut samples = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];

        let rtt = if token == TIMEOUT_MARKER {
            i += 1;
            None
        } else if tokens.get(i + 1).is_some_and(|next| *next == RTT_UNIT) {
            i += 2;
            Some(parse_rtt(token).ok_or_else(|| ParseError::invalid_probe_token(token, line))?)
        } else if let Some(rtt) = token.strip_suffix(RTT_UNIT).and_then(parse_rtt) {
            i += 1;
            Some(rtt)
        } else {
            i += 1;
            continue;
        };

        let annotation = match tokens.get(i) {
            Some(next) if next.starts_with('!') => {
                i += 1;
                Some((*next).to_string())
            }
            _ => None,
        };

        samples.push(Sample { rtt, annotation });
    }

    Ok(samples)
}

/// Decimal milliseconds; `tracert` prints sub-millisecond answers as `<1`
fn parse_rtt(token: &str) -> Option<f64> {
    let value = token.strip_prefix('<').unwrap_or(token);
    if !patterns::DECIMAL.is_match(value) {
        return None;
    }
    value.parse().ok()
}
