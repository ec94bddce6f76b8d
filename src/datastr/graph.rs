//! Strand-paired graph primitives (layer L1): `Vertex` and `Edge`, held in
//! an arena that keeps each object's reverse-complement twin co-located.
//!
//! Naive pointer-pair ownership of strand twins produces a cyclic object
//! graph; instead `Graph` owns two flat pools and every `VertexId`/`EdgeId`
//! carries the index of its twin. `GraphPath` (see `crate::path`) never
//! owns a `Vertex`/`Edge`, it borrows the `Graph` arena and stores ids.

use std::fmt;

use crate::config::KmerLen;
use crate::sequence::Sequence;

/// Opaque handle to a vertex in a [`Graph`] arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u32);

impl VertexId {
    pub fn id(self) -> u32 {
        self.0
    }
}

/// Opaque handle to an edge in a [`Graph`] arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u32);

impl EdgeId {
    pub fn id(self) -> u32 {
        self.0
    }
}

/// A small fixed tag an edge can be marked with by the error-correction and
/// repeat-resolution stages. The path algebra itself never inspects this;
/// it is carried purely so those external collaborators can stash results
/// on the same arena the paths already reference. `Serialize`/`Deserialize`
/// let `crate::io` persist a marking pass's output as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum EdgeMarker {
    #[default]
    Common,
    Unique,
    Correct,
    Incorrect,
}

struct VertexData {
    seq: Sequence,
    rc: VertexId,
    outgoing: Vec<EdgeId>,
    in_deg: usize,
}

struct EdgeData {
    start: VertexId,
    finish: VertexId,
    trunc_seq: Sequence,
    rc: EdgeId,
    coverage: f64,
    marker: EdgeMarker,
}

/// Owning arena for a strand-symmetric de Bruijn graph.
///
/// Construction (`add_vertex`, `add_edge`) is the only mutating surface;
/// everything the path algebra does is read-only against a `&Graph`
/// borrow, matching the concurrency model in which graph restructuring and
/// path manipulation are distinct, never-concurrent phases.
pub struct Graph {
    k: KmerLen,
    vertices: Vec<VertexData>,
    edges: Vec<EdgeData>,
}

impl Graph {
    pub fn new(k: KmerLen) -> Graph {
        Graph {
            k,
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn k(&self) -> KmerLen {
        self.k
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Every edge's current marker, indexed by `EdgeId::id()` — the shape
    /// `crate::io::dump_markers` persists.
    pub fn all_markers(&self) -> Vec<EdgeMarker> {
        self.edges.iter().map(|e| e.marker).collect()
    }

    /// Adds a vertex together with its reverse-complement twin (unless
    /// `seq` is a palindrome, in which case the vertex is its own twin).
    /// `seq` must have length `k`.
    pub fn add_vertex(&mut self, seq: Sequence) -> VertexId {
        debug_assert_eq!(seq.size(), self.k.get());
        let rc_seq = seq.rc();
        if rc_seq == seq {
            let id = VertexId(self.vertices.len() as u32);
            self.vertices.push(VertexData {
                seq,
                rc: id,
                outgoing: Vec::new(),
                in_deg: 0,
            });
            debug_assert_eq!(self.vertex_rc(self.vertex_rc(id)), id);
            return id;
        }
        let id = VertexId(self.vertices.len() as u32);
        let rc_id = VertexId(self.vertices.len() as u32 + 1);
        self.vertices.push(VertexData {
            seq,
            rc: rc_id,
            outgoing: Vec::new(),
            in_deg: 0,
        });
        self.vertices.push(VertexData {
            seq: rc_seq,
            rc: id,
            outgoing: Vec::new(),
            in_deg: 0,
        });
        debug_assert_eq!(self.vertex_rc(self.vertex_rc(id)), id);
        debug_assert_eq!(self.vertex_rc(self.vertex_rc(rc_id)), rc_id);
        id
    }

    /// Adds an edge `start --trunc_seq--> finish` together with its
    /// reverse-complement twin `finish.rc() --rc(trunc_seq)--> start.rc()`.
    /// Asserts that no existing outgoing edge of `start` already starts
    /// with the same nucleotide (the "distinct first nucleotides"
    /// invariant of `Vertex`), unless `trunc_seq` is empty (a degenerate
    /// edge has no first nucleotide to collide on).
    pub fn add_edge(&mut self, start: VertexId, finish: VertexId, trunc_seq: Sequence, coverage: f64) -> EdgeId {
        if let Some(c) = trunc_seq.first() {
            debug_assert!(self.get_outgoing(start, c).is_none(), "duplicate outgoing nucleotide at vertex");
        }
        let start_rc = self.vertex_rc(start);
        let finish_rc = self.vertex_rc(finish);
        let rc_trunc_seq = trunc_seq.rc();

        let id = EdgeId(self.edges.len() as u32);
        let rc_id = EdgeId(self.edges.len() as u32 + 1);
        self.edges.push(EdgeData {
            start,
            finish,
            trunc_seq,
            rc: rc_id,
            coverage,
            marker: EdgeMarker::default(),
        });
        self.edges.push(EdgeData {
            start: finish_rc,
            finish: start_rc,
            trunc_seq: rc_trunc_seq,
            rc: id,
            coverage,
            marker: EdgeMarker::default(),
        });

        self.vertices[start.0 as usize].outgoing.push(id);
        self.vertices[finish.0 as usize].in_deg += 1;
        self.vertices[finish_rc.0 as usize].outgoing.push(rc_id);
        self.vertices[start_rc.0 as usize].in_deg += 1;

        debug_assert_eq!(self.edge_rc(self.edge_rc(id)), id);
        debug_assert_eq!(self.edge_rc(self.edge_rc(rc_id)), rc_id);
        debug_assert_eq!(self.edge_start(self.edge_rc(id)), self.vertex_rc(self.edge_finish(id)));
        debug_assert_eq!(self.edge_finish(self.edge_rc(id)), self.vertex_rc(self.edge_start(id)));
        id
    }

    pub fn mark_edge(&mut self, e: EdgeId, marker: EdgeMarker) {
        self.edges[e.0 as usize].marker = marker;
    }

    pub fn set_coverage(&mut self, e: EdgeId, coverage: f64) {
        self.edges[e.0 as usize].coverage = coverage;
    }

    // -- vertex queries --------------------------------------------------

    pub fn vertex_seq(&self, v: VertexId) -> &Sequence {
        &self.vertices[v.0 as usize].seq
    }

    pub fn vertex_size(&self, v: VertexId) -> usize {
        self.vertex_seq(v).size()
    }

    pub fn vertex_rc(&self, v: VertexId) -> VertexId {
        self.vertices[v.0 as usize].rc
    }

    pub fn out_deg(&self, v: VertexId) -> usize {
        self.vertices[v.0 as usize].outgoing.len()
    }

    pub fn in_deg(&self, v: VertexId) -> usize {
        self.vertices[v.0 as usize].in_deg
    }

    pub fn is_junction(&self, v: VertexId) -> bool {
        self.out_deg(v) != 1 || self.in_deg(v) != 1
    }

    pub fn has_outgoing(&self, v: VertexId, c: u8) -> bool {
        self.get_outgoing(v, c).is_some()
    }

    pub fn get_outgoing(&self, v: VertexId, c: u8) -> Option<EdgeId> {
        self.vertices[v.0 as usize]
            .outgoing
            .iter()
            .copied()
            .find(|&e| self.edge_trunc_seq(e).first() == Some(c))
    }

    /// An arbitrary outgoing edge, or `None` if `out_deg(v) == 0`.
    pub fn front(&self, v: VertexId) -> Option<EdgeId> {
        self.vertices[v.0 as usize].outgoing.first().copied()
    }

    pub fn outgoing(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.vertices[v.0 as usize].outgoing.iter().copied()
    }

    // -- edge queries ------------------------------------------------------

    pub fn edge_start(&self, e: EdgeId) -> VertexId {
        self.edges[e.0 as usize].start
    }

    pub fn edge_finish(&self, e: EdgeId) -> VertexId {
        self.edges[e.0 as usize].finish
    }

    pub fn edge_trunc_seq(&self, e: EdgeId) -> &Sequence {
        &self.edges[e.0 as usize].trunc_seq
    }

    pub fn edge_trunc_size(&self, e: EdgeId) -> usize {
        self.edge_trunc_seq(e).size()
    }

    /// The full label: the start vertex's k-mer followed by the truncated
    /// label, total length `k + truncSize()`.
    pub fn edge_seq(&self, e: EdgeId) -> Sequence {
        self.vertex_seq(self.edge_start(e)).concat(self.edge_trunc_seq(e))
    }

    pub fn edge_rc(&self, e: EdgeId) -> EdgeId {
        self.edges[e.0 as usize].rc
    }

    pub fn edge_coverage(&self, e: EdgeId) -> f64 {
        self.edges[e.0 as usize].coverage
    }

    pub fn edge_marker(&self, e: EdgeId) -> EdgeMarker {
        self.edges[e.0 as usize].marker
    }

    /// A short nucleotide-or-empty label used by the string renderings in
    /// `crate::path`: the first truncated nucleotide, or nothing for a
    /// degenerate edge.
    pub fn edge_nucl_label(&self, e: EdgeId) -> String {
        match self.edge_trunc_seq(e).first() {
            Some(c) => crate::sequence::Sequence::new(vec![c]).to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[cfg(test)]
pub(crate) mod testgraph {
    //! A small, hand-built toy graph shared by this crate's unit and
    //! integration tests, the same way this workspace's own
    //! `tests/integration_tests.rs` hand-builds a small weighted digraph
    //! for its Dijkstra tests.
    use super::*;

    /// `v0 --AATT--> v1 --CCGG--> v2`, a straight unbranching path with two
    /// four-nucleotide truncated edge labels, plus their reverse-complement
    /// twins. k = 3.
    pub fn linear_graph() -> (Graph, VertexId, EdgeId, EdgeId) {
        let k = KmerLen::new(3).unwrap();
        let mut g = Graph::new(k);
        let v0 = g.add_vertex("AAA".parse().unwrap());
        let v1 = g.add_vertex("ATT".parse().unwrap());
        let v2 = g.add_vertex("CGG".parse().unwrap());
        let e1 = g.add_edge(v0, v1, "AATT".parse().unwrap(), 10.0);
        let e2 = g.add_edge(v1, v2, "CCGG".parse().unwrap(), 10.0);
        (g, v0, e1, e2)
    }

    /// `v0` has out-degree 3, with outgoing edges labelled `A`, `C`, `G`.
    pub fn branching_graph() -> (Graph, VertexId, [EdgeId; 3]) {
        let k = KmerLen::new(3).unwrap();
        let mut g = Graph::new(k);
        let v0 = g.add_vertex("AAA".parse().unwrap());
        let va = g.add_vertex("AAA".parse().unwrap());
        let vc = g.add_vertex("AAC".parse().unwrap());
        let vg = g.add_vertex("AAG".parse().unwrap());
        let ea = g.add_edge(v0, va, "A".parse().unwrap(), 1.0);
        let ec = g.add_edge(v0, vc, "C".parse().unwrap(), 1.0);
        let eg = g.add_edge(v0, vg, "G".parse().unwrap(), 1.0);
        (g, v0, [ea, ec, eg])
    }

    /// `v0 --(empty)--> v1 --AC--> v2`: a degenerate zero-truncated-label
    /// edge followed by a normal one, for pinning `cutBack`/`cutFront`'s
    /// zero-size-edge skip.
    pub fn degenerate_graph() -> (Graph, VertexId, EdgeId, EdgeId) {
        let k = KmerLen::new(3).unwrap();
        let mut g = Graph::new(k);
        let v0 = g.add_vertex("AAA".parse().unwrap());
        let v1 = g.add_vertex("AAA".parse().unwrap());
        let v2 = g.add_vertex("AAC".parse().unwrap());
        let e1 = g.add_edge(v0, v1, Sequence::empty(), 1.0);
        let e2 = g.add_edge(v1, v2, "C".parse().unwrap(), 1.0);
        (g, v0, e1, e2)
    }

    /// A bulge: two parallel edges `v0 --AA--> v1` and `v0 --CC--> v1`, same
    /// `truncSize` (2) and the same ordered vertex pair, distinguishable only
    /// by their first nucleotide.
    pub fn bulge_graph() -> (Graph, VertexId, VertexId, EdgeId, EdgeId) {
        let k = KmerLen::new(3).unwrap();
        let mut g = Graph::new(k);
        let v0 = g.add_vertex("AAA".parse().unwrap());
        let v1 = g.add_vertex("ATG".parse().unwrap());
        let e_a = g.add_edge(v0, v1, "AA".parse().unwrap(), 1.0);
        let e_c = g.add_edge(v0, v1, "CC".parse().unwrap(), 1.0);
        (g, v0, v1, e_a, e_c)
    }
}

#[cfg(test)]
mod tests {
    use super::testgraph::*;
    use super::*;

    #[test]
    fn rc_pairing_is_consistent() {
        let (g, v0, e1, _e2) = linear_graph();
        assert_eq!(g.vertex_rc(g.vertex_rc(v0)), v0);
        assert_eq!(g.edge_rc(g.edge_rc(e1)), e1);
        assert_eq!(g.edge_start(g.edge_rc(e1)), g.vertex_rc(g.edge_finish(e1)));
        assert_eq!(g.edge_trunc_seq(g.edge_rc(e1)), &g.edge_trunc_seq(e1).rc());
    }

    #[test]
    fn junction_detection() {
        let (g, v0, _) = branching_graph();
        assert!(g.is_junction(v0));
        let (g, v0, e1, _) = linear_graph();
        assert!(!g.is_junction(g.edge_finish(e1)));
        assert!(g.is_junction(v0) == (g.in_deg(v0) != 1 || g.out_deg(v0) != 1));
    }

    #[test]
    fn get_outgoing_by_first_nucleotide() {
        let (g, v0, edges) = branching_graph();
        assert_eq!(g.get_outgoing(v0, 0), Some(edges[0]));
        assert_eq!(g.get_outgoing(v0, 1), Some(edges[1]));
        assert_eq!(g.get_outgoing(v0, 2), Some(edges[2]));
        assert_eq!(g.get_outgoing(v0, 3), None);
    }

    #[test]
    fn degenerate_edge_has_no_nucl_label() {
        let (g, _v0, e1, _e2) = degenerate_graph();
        assert_eq!(g.edge_trunc_size(e1), 0);
        assert_eq!(g.edge_nucl_label(e1), "");
    }
}
