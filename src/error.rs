use thiserror::Error;

/// Errors raised while turning raw traceroute output into a [`Traceroute`](crate::Traceroute).
///
/// Both variants are fatal for the whole capture: the parser never hands back a
/// partially built tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The first line carries no `<name> (<address>)` or `<name> [<address>]` destination
    #[error("Invalid traceroute header: '{line}'")]
    InvalidHeader { line: String },

    /// A value in front of the `ms` unit is neither a decimal nor the `*` timeout marker
    #[error("Expected probe RTT or '*', got '{token}' in line '{line}'")]
    InvalidProbeToken { token: String, line: String },
}

impl ParseError {
    /// Create a new invalid header error
    pub fn invalid_header(line: impl Into<String>) -> Self {
        Self::InvalidHeader { line: line.into() }
    }

    /// Create a new invalid probe token error
    pub fn invalid_probe_token(token: impl Into<String>, line: impl Into<String>) -> Self {
        Self::InvalidProbeToken {
            token: token.into(),
            line: line.into(),
        }
    }
}

/// The error type for traceroute history operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to parse a traceroute capture
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid data format encountered
    #[error("Invalid data format in {0}: {1}")]
    InvalidFormat(String, String),
}

impl Error {
    /// Create a new invalid format error
    pub fn invalid_format(source: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidFormat(source.into(), details.into())
    }
}

/// A specialized `Result` type for traceroute history operations.
pub type Result<T> = std::result::Result<T, Error>;
