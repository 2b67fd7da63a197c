#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Traceroute History
//!
//! Turns raw route-trace output into structured data and tells whether a new
//! capture differs meaningfully from the last stored one.
//!
//! This crate provides pure, synchronous transforms:
//! - Parsing of Unix `traceroute` and Windows `tracert` output
//! - Route change detection (a hop answers from a different address)
//! - Latency regression detection with a tunable threshold
//! - Line-level highlighting of two captures for console or HTML display
//! - The persist-or-skip decision for a monitoring pipeline
//!
//! Running the probe, storing captures and scheduling are left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use traceroute_history::{diff, parse};
//!
//! let previous = parse("example.com (93.184.216.34)\n 1  gw (10.0.0.1)  1.2 ms")?;
//! let current = parse("example.com (93.184.216.34)\n 1  gw (10.0.0.2)  1.3 ms")?;
//!
//! let changes = diff(&current, &previous, 0);
//! assert!(changes.changed.contains(&1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `serde-support` - Enable serialization support for all data structures

mod error;
mod types;

pub mod config;
pub mod diff;
pub mod format;
pub mod history;
pub mod parser;
pub mod render;

// Re-export core types
pub use error::{Error, ParseError, Result};
pub use types::{Capture, Hop, Probe, Traceroute};

// Parsing and comparison
pub use diff::{analyze, diff, Analysis, ChangeSet};
pub use parser::parse;

// Presentation
pub use format::{format_markers, OutputFormat};
pub use render::{annotate, render, Highlight};

// Pipeline policy and tunables
pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use history::{decide, summarize, PersistDecision, INCOMPARABLE_NOTICE};
