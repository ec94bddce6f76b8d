//! JSON persistence for the external collaborator state (`EdgeMarker`) the
//! arena carries, in the `Result<_, Box<dyn Error>>` style this workspace's
//! own loader code uses.

use std::error::Error;

use crate::datastr::graph::EdgeMarker;

/// Serializes a full marker vector (one entry per edge, `EdgeId::id()`
/// order) as JSON.
pub fn dump_markers(markers: &[EdgeMarker]) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string(markers)?)
}

/// Inverse of [`dump_markers`].
pub fn load_markers(json: &str) -> Result<Vec<EdgeMarker>, Box<dyn Error>> {
    Ok(serde_json::from_str(json)?)
}
