//! Graph-path algebra for a strand-symmetric de Bruijn graph.
//!
//! `datastr::graph` holds the arena (`Graph`, `VertexId`, `EdgeId`),
//! `datastr::segment` the sub-edge range type `Segment`, and `path` the
//! `GraphPath` walk type built on top of both. `sequence` is the leaf
//! nucleotide-string type everything else bottoms out on.

pub mod config;
pub mod datastr;
pub mod error;
pub mod io;
pub mod path;
pub mod report;
pub mod sequence;

pub use config::KmerLen;
pub use datastr::graph::{EdgeId, EdgeMarker, Graph, VertexId};
pub use datastr::segment::Segment;
pub use error::{ConfigError, ParseError};
pub use path::GraphPath;
pub use sequence::{Nucl, Sequence, SequenceBuilder};
