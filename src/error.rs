//! Error taxonomy for this crate.
//!
//! Most of the graph-path algebra does not return `Result` at all: a
//! violated precondition (a malformed `cutBack`/`cutFront` budget, a
//! junction mismatch in `reroute`/`+=`, a `uniqueExtendBack` that lost
//! uniqueness) is a caller bug, and is reported through `debug_assert!`
//! call sites scattered through `path.rs` — they compile away in
//! `--release` and abort the process in debug/test builds. `extend` and
//! `pop_back` instead fold "bad input" into the path itself by
//! invalidating it; callers are expected to check `GraphPath::is_valid`.
//!
//! The one boundary in this crate that is genuinely fallible and
//! `Result`-returning is the textual line-format round trip
//! (`GraphPath::parse`) and crate configuration (`KmerLen::new`); both
//! report through `ParseError` below, in the same plain,
//! derive-free `std::error::Error` style this workspace's own I/O
//! boundaries use (e.g. `cooperative::io`, which returns
//! `Result<_, Box<dyn Error>>`).

use std::fmt;

/// Failure modes of [`crate::sequence::Sequence::from_str`] and
/// [`crate::path::GraphPath::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character outside `{A,C,G,T,a,c,g,t}` appeared where a nucleotide
    /// was expected.
    BadNucleotide(char),
    /// An integer field (a trim, a vertex id, a segment length) did not
    /// parse.
    BadInteger(String),
    /// The line had fewer fields than the format requires.
    Truncated,
    /// A vertex id referenced in the line is not known to the graph the
    /// caller supplied.
    UnknownVertex(u64),
    /// The vertex at this point of the walk has no outgoing edge starting
    /// with the given nucleotide.
    UnknownEdge { vertex: u64, nucl: char },
    /// A segment's `size/truncSize` field does not match the edge's actual
    /// truncated length.
    SegmentOutOfRange { expected: usize, found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadNucleotide(c) => write!(f, "'{}' is not a valid nucleotide", c),
            ParseError::BadInteger(s) => write!(f, "'{}' is not a valid integer", s),
            ParseError::Truncated => write!(f, "line ended before the format was satisfied"),
            ParseError::UnknownVertex(id) => write!(f, "no vertex with id {}", id),
            ParseError::UnknownEdge { vertex, nucl } => {
                write!(f, "vertex {} has no outgoing edge starting with '{}'", vertex, nucl)
            }
            ParseError::SegmentOutOfRange { expected, found } => {
                write!(f, "segment length {} does not match edge truncated length {}", found, expected)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Failure modes of [`crate::config::KmerLen::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// k must be odd so a k-mer and its reverse complement never coincide
    /// pointwise in a way that breaks strand-pairing.
    Even(usize),
    Zero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Even(k) => write!(f, "k must be odd, got {}", k),
            ConfigError::Zero => write!(f, "k must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
