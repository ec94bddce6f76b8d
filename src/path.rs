//! `GraphPath` (layer L3): an ordered walk through a strand-symmetric de
//! Bruijn graph, with fractional trim counters allowing the walk to begin
//! and end in the middle of an edge's label.
//!
//! A `GraphPath` never owns the `Vertex`/`Edge` data it cites; it borrows
//! a [`Graph`] arena and stores [`VertexId`]/[`EdgeId`] handles into it,
//! the same shape as the `NodeId`/`EdgeId` handles this workspace already
//! uses elsewhere for borrowed-graph traversal. An *invalid* path
//! (`start == None`) is a first-class value, not an error: mutators that
//! hit unrecoverable input (`extend` on a missing nucleotide, `pop_back`
//! stripping the only edge under a nonzero left trim) transition to it
//! silently, and callers check `is_valid()`.
//!
//! Precondition violations (overlong trims, junction mismatches in `+=`
//! and `reroute`, loss of uniqueness in `unique_extend_back`) are instead
//! `debug_assert!`s: the caller has a bug, and in debug/test builds the
//! process aborts; in `--release` the checks compile away.

use std::fmt;

use rand::Rng;

use crate::datastr::graph::{EdgeId, Graph, VertexId};
use crate::datastr::segment::Segment;
use crate::error::ParseError;
use crate::sequence::{char_to_nucl, Nucl, Sequence, SequenceBuilder};

/// A type that can be folded onto the end of a [`GraphPath`] by
/// [`GraphPath::from_appendable`] — either a whole edge or an arbitrary
/// sub-edge [`Segment`] of one.
pub trait Appendable {
    fn append_to(self, path: &mut GraphPath<'_>);
}

impl Appendable for EdgeId {
    fn append_to(self, path: &mut GraphPath<'_>) {
        path.append_edge(self);
    }
}

impl Appendable for Segment {
    fn append_to(self, path: &mut GraphPath<'_>) {
        path.append_segment(self);
    }
}

/// A walk `v0 -> e1 -> v1 -> ... -> en -> vn` plus two trim counters, or
/// the distinguished invalid value.
#[derive(Clone)]
pub struct GraphPath<'g> {
    graph: &'g Graph,
    start: Option<VertexId>,
    edges: Vec<EdgeId>,
    cut_left: usize,
    cut_right: usize,
}

impl<'g> PartialEq for GraphPath<'g> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph)
            && self.start == other.start
            && self.edges == other.edges
            && self.cut_left == other.cut_left
            && self.cut_right == other.cut_right
    }
}
impl<'g> Eq for GraphPath<'g> {}

// ---------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------

impl<'g> GraphPath<'g> {
    /// The distinguished invalid path.
    pub fn invalid(graph: &'g Graph) -> Self {
        GraphPath {
            graph,
            start: None,
            edges: Vec::new(),
            cut_left: 0,
            cut_right: 0,
        }
    }

    /// The zero-edge path sitting exactly at `v`.
    pub fn from_vertex(graph: &'g Graph, v: VertexId) -> Self {
        GraphPath {
            graph,
            start: Some(v),
            edges: Vec::new(),
            cut_left: 0,
            cut_right: 0,
        }
    }

    /// The zero-edge path representing the slice `v.getSeq()[cut_left ..
    /// size - cut_right]`.
    pub fn from_vertex_trimmed(graph: &'g Graph, v: VertexId, cut_left: usize, cut_right: usize) -> Self {
        debug_assert!(cut_left + cut_right <= graph.vertex_size(v));
        GraphPath {
            graph,
            start: Some(v),
            edges: Vec::new(),
            cut_left,
            cut_right,
        }
    }

    /// General constructor: all invariants are checked (in debug/test
    /// builds) before the value is returned.
    pub fn from_parts(graph: &'g Graph, start: VertexId, edges: Vec<EdgeId>, cut_left: usize, cut_right: usize) -> Self {
        if let Some(&first) = edges.first() {
            debug_assert_eq!(graph.edge_start(first), start);
            debug_assert!(cut_left <= graph.edge_trunc_size(first));
            debug_assert!(cut_right <= graph.edge_trunc_size(*edges.last().unwrap()));
            debug_assert!(edges.windows(2).all(|w| graph.edge_finish(w[0]) == graph.edge_start(w[1])));
        } else {
            debug_assert!(cut_left + cut_right <= graph.vertex_size(start));
        }
        GraphPath {
            graph,
            start: Some(start),
            edges,
            cut_left,
            cut_right,
        }
    }

    pub fn from_edge(graph: &'g Graph, e: EdgeId) -> Self {
        GraphPath {
            graph,
            start: Some(graph.edge_start(e)),
            edges: vec![e],
            cut_left: 0,
            cut_right: 0,
        }
    }

    pub fn from_segment(graph: &'g Graph, seg: Segment) -> Self {
        GraphPath {
            graph,
            start: Some(graph.edge_start(seg.edge)),
            cut_left: seg.left,
            cut_right: graph.edge_trunc_size(seg.edge) - seg.right,
            edges: vec![seg.edge],
        }
    }

    /// Builds a path by repeatedly appending items (edges or segments);
    /// `start` is taken from the first item appended.
    pub fn from_appendable<T: Appendable>(graph: &'g Graph, items: impl IntoIterator<Item = T>) -> Self {
        let mut res = GraphPath::invalid(graph);
        for item in items {
            item.append_to(&mut res);
        }
        res
    }

    /// The maximal forward linear extension starting from `start_edge`:
    /// append the unique outgoing edge at each non-junction vertex, until
    /// the next vertex is a junction, a cycle back to `start_edge`'s start,
    /// or its reverse-complement twin (a strand collision).
    pub fn walk_forward(graph: &'g Graph, start_edge: EdgeId) -> Self {
        let mut res = GraphPath::from_edge(graph, start_edge);
        let start_v = graph.edge_start(start_edge);
        let start_v_rc = graph.vertex_rc(start_v);
        loop {
            let next = res.finish();
            if next == start_v || next == start_v_rc || graph.is_junction(next) {
                break;
            }
            let e = graph.front(next).expect("a non-junction vertex has an outgoing edge");
            res.append_edge(e);
        }
        crate::report::trace(format!("WalkForward extended to length {}", res.len()));
        res
    }
}

// ---------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------

impl<'g> GraphPath<'g> {
    pub fn is_valid(&self) -> bool {
        self.start.is_some()
    }

    pub fn invalidate(&mut self) {
        self.start = None;
        self.edges.clear();
        self.cut_left = 0;
        self.cut_right = 0;
    }

    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> VertexId {
        self.start.expect("start() called on an invalid path")
    }

    pub fn get_vertex(&self, i: usize) -> VertexId {
        debug_assert!(i <= self.size());
        if i == 0 {
            self.start()
        } else {
            self.graph.edge_finish(self.edges[i - 1])
        }
    }

    pub fn get_edge(&self, i: usize) -> EdgeId {
        self.edges[i]
    }

    pub fn front_edge(&self) -> EdgeId {
        self.edges[0]
    }

    pub fn back_edge(&self) -> EdgeId {
        *self.edges.last().expect("back_edge() called on an empty path")
    }

    pub fn finish(&self) -> VertexId {
        if self.edges.is_empty() {
            self.start()
        } else {
            self.graph.edge_finish(self.back_edge())
        }
    }

    /// Linear scan from `pos`; `usize::MAX` if `edge` does not occur.
    pub fn find_edge(&self, edge: EdgeId, pos: usize) -> usize {
        let mut pos = pos;
        while pos < self.size() && self.edges[pos] != edge {
            pos += 1;
        }
        if pos == self.size() {
            usize::MAX
        } else {
            pos
        }
    }

    /// Linear scan from `pos`; `usize::MAX` if `v` does not occur.
    pub fn find_vertex(&self, v: VertexId, pos: usize) -> usize {
        let mut pos = pos;
        while pos <= self.size() && self.get_vertex(pos) != v {
            pos += 1;
        }
        if pos > self.size() {
            usize::MAX
        } else {
            pos
        }
    }

    /// Minimum coverage over the path's edges; `+inf` for an empty path.
    pub fn min_coverage(&self) -> f64 {
        self.edges.iter().map(|&e| self.graph.edge_coverage(e)).fold(f64::INFINITY, f64::min)
    }

    pub fn left_skip(&self) -> usize {
        self.cut_left
    }

    pub fn right_skip(&self) -> usize {
        self.cut_right
    }

    pub fn end_closed(&self) -> bool {
        self.is_valid() && self.right_skip() == 0
    }

    pub fn start_closed(&self) -> bool {
        self.is_valid() && self.left_skip() == 0
    }

    /// The nucleotide at `back().right - 1` in the last edge's (full,
    /// unsliced) truncated label.
    pub fn last_nucl(&self) -> Nucl {
        let seg = self.back();
        self.graph.edge_trunc_seq(seg.edge).at(seg.right - 1)
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        let n = if self.is_valid() { self.size() + 1 } else { 0 };
        (0..n).map(move |i| self.get_vertex(i))
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    /// Segment `i`: `left = cut_left` on the first edge, `right =
    /// truncSize - cut_right` on the last, full range on interior edges
    /// (a single-edge path combines both endpoints).
    pub fn segment_at(&self, i: usize) -> Segment {
        let edge = self.edges[i];
        let left = if i == 0 { self.cut_left } else { 0 };
        let right = if i == self.size() - 1 {
            self.graph.edge_trunc_size(edge) - self.cut_right
        } else {
            self.graph.edge_trunc_size(edge)
        };
        Segment { edge, left, right }
    }

    /// One [`Segment`] per edge, in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.size()).map(move |i| self.segment_at(i))
    }

    pub fn front(&self) -> Segment {
        self.segment_at(0)
    }

    pub fn back(&self) -> Segment {
        self.segment_at(self.size() - 1)
    }

    const DEFAULT_TRUNC_SUBSEQ_LEN: usize = 10_000_000;

    pub fn trunc_subseq_to_end(&self, start_position: usize) -> Sequence {
        self.trunc_subseq(start_position, Self::DEFAULT_TRUNC_SUBSEQ_LEN)
    }

    /// Up to `n` nucleotides of `trunc_seq()`, starting at segment index
    /// `start_position`.
    pub fn trunc_subseq(&self, start_position: usize, n: usize) -> Sequence {
        let mut sb = SequenceBuilder::new();
        let mut remaining = n;
        for i in start_position..self.size() {
            if remaining == 0 {
                break;
            }
            let seg = self.segment_at(i);
            if seg.size() >= remaining {
                sb.append(seg.shrink_right_to_len(remaining).trunc_seq(self.graph));
                break;
            } else {
                sb.append(seg.trunc_seq(self.graph));
                remaining -= seg.size();
            }
        }
        sb.build()
    }
}

// ---------------------------------------------------------------------
// Mutation & algebra
// ---------------------------------------------------------------------

impl<'g> GraphPath<'g> {
    pub fn append_path(&mut self, other: &GraphPath<'g>) {
        if other.size() == 0 {
            return;
        }
        if !self.is_valid() {
            *self = other.clone();
            return;
        }
        debug_assert_eq!(self.finish(), other.get_vertex(0));
        for seg in other.segments() {
            self.append_segment(seg);
        }
    }

    pub fn append_segment(&mut self, seg: Segment) {
        if !self.is_valid() {
            *self = GraphPath::from_segment(self.graph, seg);
            return;
        }
        if self.cut_right == 0 {
            debug_assert!(seg.left == 0 && self.finish() == self.graph.edge_start(seg.edge));
            self.edges.push(seg.edge);
            self.cut_right = self.graph.edge_trunc_size(seg.edge) - seg.right;
        } else {
            debug_assert!(seg.edge == self.back_edge() && seg.left == self.graph.edge_trunc_size(seg.edge) - self.cut_right);
            self.cut_right = self.graph.edge_trunc_size(seg.edge) - seg.right;
        }
    }

    pub fn append_edge(&mut self, e: EdgeId) {
        self.append_segment(Segment::whole(self.graph, e));
    }

    /// Removes the last edge (if any) and zeros `cut_right`; invalidates
    /// the path if doing so leaves it empty with a nonzero left trim.
    pub fn pop_back(&mut self) {
        self.edges.pop();
        self.cut_right = 0;
        if self.edges.is_empty() && self.cut_left > 0 {
            self.invalidate();
        }
    }

    /// Removes the last `n` edges. `cut_right` is zeroed only if `n > 0`
    /// (matching the intended semantics: a trim counter is only zeroed
    /// when an edge was actually popped — see DESIGN.md for the
    /// source behavior this resolves an ambiguity in).
    pub fn pop_back_n(&mut self, n: usize) {
        debug_assert!(n <= self.edges.len());
        let new_len = self.edges.len() - n;
        self.edges.truncate(new_len);
        if n > 0 {
            self.cut_right = 0;
        }
        if self.edges.is_empty() && self.cut_left != 0 {
            self.invalidate();
        }
    }

    pub fn sub_path(&self, from: usize, to: usize) -> GraphPath<'g> {
        if from == to {
            if (from == 0 && self.left_skip() > 0) || (to == self.size() && self.right_skip() > 0) {
                return GraphPath::invalid(self.graph);
            }
            return GraphPath::from_vertex(self.graph, self.get_vertex(from));
        }
        let edges = self.edges[from..to].to_vec();
        let cut_left = if from == 0 { self.left_skip() } else { 0 };
        let cut_right = if to == self.size() { self.right_skip() } else { 0 };
        GraphPath::from_parts(self.graph, self.get_vertex(from), edges, cut_left, cut_right)
    }

    pub fn sub_path_from(&self, from: usize) -> GraphPath<'g> {
        self.sub_path(from, self.size())
    }

    /// Removes `l` nucleotides from the tail, preserving `len() - l`.
    /// Degenerate (zero-truncated-label) edges are skipped without
    /// consuming budget.
    pub fn cut_back(&mut self, l: usize) -> &mut Self {
        debug_assert!(l <= self.len());
        let expected = self.len() - l;
        let mut l = l + self.cut_right;
        self.cut_right = 0;
        let mut cur_cut = 0usize;
        let mut cut = 0usize;
        while cur_cut < self.size() && l >= self.graph.edge_trunc_size(self.edges[self.size() - 1 - cur_cut]) {
            let e = self.edges[self.size() - 1 - cur_cut];
            if self.graph.edge_trunc_size(e) == 0 {
                cur_cut += 1;
            } else {
                l -= self.graph.edge_trunc_size(e);
                cur_cut += 1;
                cut = cur_cut;
            }
        }
        if cut == self.size() {
            let start = self.start();
            let left = self.left_skip();
            *self = GraphPath::from_vertex_trimmed(self.graph, start, left, l);
        } else {
            let new_len = self.edges.len() - cut;
            self.edges.truncate(new_len);
            self.cut_right = l;
        }
        debug_assert_eq!(self.len(), expected);
        self
    }

    /// Symmetric head-side operation. `edge.rc().truncSize() ==
    /// edge.truncSize()` always (reverse-complementing preserves length),
    /// so the per-edge budget is the same as `cut_back`'s.
    pub fn cut_front(&mut self, l: usize) -> &mut Self {
        debug_assert!(l <= self.len());
        let expected = self.len() - l;
        let mut l = l + self.cut_left;
        self.cut_left = 0;
        let mut cur_cut = 0usize;
        let mut cut = 0usize;
        while cur_cut < self.size() && l >= self.graph.edge_trunc_size(self.edges[cur_cut]) {
            let e = self.edges[cur_cut];
            if self.graph.edge_trunc_size(e) == 0 {
                cur_cut += 1;
            } else {
                l -= self.graph.edge_trunc_size(e);
                cur_cut += 1;
                cut = cur_cut;
            }
        }
        if cut == self.size() {
            let finish = self.finish();
            let right = self.right_skip();
            *self = GraphPath::from_vertex_trimmed(self.graph, finish, l, right);
        } else {
            self.edges.drain(0..cut);
            self.start = Some(self.graph.edge_start(self.edges[0]));
            self.cut_left = l;
        }
        debug_assert_eq!(self.len(), expected);
        self
    }

    /// Extends the path by `l` nucleotides along the unique forward
    /// continuation, failing (precondition violation) if uniqueness is
    /// lost along the way.
    pub fn unique_extend_back(&mut self, mut l: usize) -> &mut Self {
        if self.cut_right != 0 {
            let tmp = l.min(self.cut_right);
            l -= tmp;
            self.cut_right -= tmp;
        }
        while l > 0 {
            debug_assert_eq!(self.graph.out_deg(self.finish()), 1, "uniqueExtendBack requires a unique forward continuation");
            let e = self.graph.front(self.finish()).expect("out_deg == 1 implies an outgoing edge");
            let tmp = self.graph.edge_trunc_size(e).min(l);
            self.append_edge(e);
            self.cut_back(self.graph.edge_trunc_size(e) - tmp);
            l -= tmp;
        }
        self
    }

    pub fn unique_extend_front(&mut self, l: usize) -> &mut Self {
        let mut rced = self.rc();
        rced.unique_extend_back(l);
        *self = rced.rc();
        self
    }

    /// Consumes one nucleotide of `cut_right`: an already-partially
    /// traversed last edge is advanced by one.
    pub fn add_step(&mut self) -> &mut Self {
        debug_assert!(self.cut_right > 0);
        self.cut_right -= 1;
        self
    }

    /// Appends the single-nucleotide segment `(edge, 0, 1)`.
    pub fn add_step_edge(&mut self, edge: EdgeId) -> &mut Self {
        self.append_segment(Segment::new(self.graph, edge, 0, 1));
        self
    }

    /// Walks `seq` nucleotide by nucleotide from the current end,
    /// invalidating the path on the first mismatch or missing edge.
    pub fn extend(&mut self, seq: &Sequence) -> &mut Self {
        debug_assert!(self.is_valid());
        for i in 0..seq.size() {
            let c = seq.at(i);
            if self.end_closed() {
                let v = self.finish();
                match self.graph.get_outgoing(v, c) {
                    Some(e) => {
                        self.add_step_edge(e);
                    }
                    None => {
                        self.invalidate();
                        return self;
                    }
                }
            } else {
                let seg = self.back();
                if self.graph.edge_trunc_seq(seg.edge).at(seg.right) == c {
                    self.add_step();
                } else {
                    self.invalidate();
                    return self;
                }
            }
        }
        self
    }

    /// All one-nucleotide extensions: the single in-edge advance if
    /// partway through an edge, otherwise one path per outgoing edge of
    /// `finish()`.
    pub fn all_steps(&self) -> Vec<GraphPath<'g>> {
        if self.size() != 0 && self.cut_right > 0 {
            let mut copy = self.clone();
            copy.add_step();
            return vec![copy];
        }
        let end = self.finish();
        self.graph
            .outgoing(end)
            .map(|e| {
                let mut copy = self.clone();
                copy.add_step_edge(e);
                copy
            })
            .collect()
    }

    /// One uniformly random one-nucleotide continuation, for heuristics
    /// (repeat resolution, error correction) that want a single sampled
    /// extension rather than the full `all_steps()` fan-out.
    pub fn random_step(&self, rng: &mut impl rand::Rng) -> Option<GraphPath<'g>> {
        let steps = self.all_steps();
        if steps.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..steps.len());
        Some(steps.into_iter().nth(idx).unwrap())
    }

    /// Breadth-first enumeration of every path reachable by exactly `L`
    /// one-nucleotide steps, including `self` as the first element and
    /// every intermediate depth.
    pub fn all_extensions(&self, len: usize) -> Vec<GraphPath<'g>> {
        let mut res = vec![self.clone()];
        let mut left = 0usize;
        let mut right = 1usize;
        for _ in 0..len {
            for i in left..right {
                let tmp = res[i].all_steps();
                res.extend(tmp);
            }
            left = right;
            right = res.len();
        }
        crate::report::trace(format!("allExtensions({}) produced {} paths", len, res.len()));
        res
    }

    /// Replaces `subPath(left, right)` with `rerouting`, which must agree
    /// with `self` at both junctions.
    pub fn reroute(&self, left: usize, right: usize, rerouting: &GraphPath<'g>) -> GraphPath<'g> {
        debug_assert!(left == 0 || self.get_vertex(left) == rerouting.start());
        debug_assert!(right == self.size() || self.get_vertex(right) == rerouting.finish());
        let mut res = GraphPath::invalid(self.graph);
        res.append_path(&self.sub_path(0, left));
        res.append_path(rerouting);
        res.append_path(&self.sub_path(right, self.size()));
        res
    }

    /// The reverse-complement path: `start = finish().rc()`, edges
    /// reversed and each mapped through `rc()`, trims swapped.
    pub fn rc(&self) -> GraphPath<'g> {
        if !self.is_valid() {
            return GraphPath::invalid(self.graph);
        }
        let new_start = self.graph.vertex_rc(self.finish());
        if self.is_empty() {
            return GraphPath::from_vertex_trimmed(self.graph, new_start, self.right_skip(), self.left_skip());
        }
        let edges: Vec<EdgeId> = self.edges.iter().rev().map(|&e| self.graph.edge_rc(e)).collect();
        GraphPath::from_parts(self.graph, new_start, edges, self.right_skip(), self.left_skip())
    }
}

// ---------------------------------------------------------------------
// Operator sugar
// ---------------------------------------------------------------------

impl<'g> std::ops::AddAssign<&GraphPath<'g>> for GraphPath<'g> {
    fn add_assign(&mut self, other: &GraphPath<'g>) {
        self.append_path(other);
    }
}
impl<'g> std::ops::AddAssign<Segment> for GraphPath<'g> {
    fn add_assign(&mut self, seg: Segment) {
        self.append_segment(seg);
    }
}
impl<'g> std::ops::AddAssign<EdgeId> for GraphPath<'g> {
    fn add_assign(&mut self, e: EdgeId) {
        self.append_edge(e);
    }
}
impl<'g> std::ops::Add<&GraphPath<'g>> for GraphPath<'g> {
    type Output = GraphPath<'g>;
    fn add(mut self, other: &GraphPath<'g>) -> GraphPath<'g> {
        self += other;
        self
    }
}
impl<'g> std::ops::Add<Segment> for GraphPath<'g> {
    type Output = GraphPath<'g>;
    fn add(mut self, seg: Segment) -> GraphPath<'g> {
        self += seg;
        self
    }
}
impl<'g> std::ops::Add<EdgeId> for GraphPath<'g> {
    type Output = GraphPath<'g>;
    fn add(mut self, e: EdgeId) -> GraphPath<'g> {
        self += e;
        self
    }
}

// ---------------------------------------------------------------------
// Sequence projection
// ---------------------------------------------------------------------

impl<'g> GraphPath<'g> {
    pub fn trunc_len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let total: usize = self.edges.iter().map(|&e| self.graph.edge_trunc_size(e)).sum();
        total - self.cut_left - self.cut_right
    }

    pub fn len(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        self.graph.vertex_size(self.start()) + self.trunc_len()
    }

    /// Reconstructs the full nucleotide sequence of length `len()`.
    pub fn seq(&self) -> Sequence {
        if !self.is_valid() {
            return Sequence::empty();
        }
        if self.is_empty() {
            let s = self.graph.vertex_seq(self.start());
            return s.subseq(self.left_skip(), s.size() - self.right_skip());
        }
        let full = self.graph.edge_seq(self.front_edge());
        if self.size() == 1 {
            return full.subseq(self.left_skip(), full.size() - self.right_skip());
        }
        let mut sb = SequenceBuilder::new();
        sb.append(full.subseq(self.left_skip(), full.size()));
        for &e in &self.edges[1..self.size() - 1] {
            sb.append(self.graph.edge_trunc_seq(e).clone());
        }
        let last_trunc = self.graph.edge_trunc_seq(self.back_edge());
        sb.append(last_trunc.subseq(0, last_trunc.size() - self.right_skip()));
        sb.build()
    }

    /// The concatenation of all segment truncated labels (skips the
    /// initial vertex k-mer).
    pub fn trunc_seq(&self) -> Sequence {
        let mut sb = SequenceBuilder::new();
        for seg in self.segments() {
            sb.append(seg.trunc_seq(self.graph));
        }
        sb.build()
    }
}

// ---------------------------------------------------------------------
// String renderings (logging only)
// ---------------------------------------------------------------------

impl<'g> GraphPath<'g> {
    fn render(&self, show_coverage: bool) -> String {
        if !self.is_valid() {
            return String::new();
        }
        let mut parts = vec![self.left_skip().to_string(), self.start().id().to_string()];
        for seg in self.segments() {
            let mut part = format!(
                "{}/{}{}",
                seg.size(),
                self.graph.edge_trunc_size(seg.edge),
                self.graph.edge_nucl_label(seg.edge)
            );
            if show_coverage {
                part.push_str(&format!("({})", self.graph.edge_coverage(seg.edge)));
            }
            parts.push(part);
            parts.push(self.graph.edge_finish(seg.edge).id().to_string());
        }
        parts.push(self.right_skip().to_string());
        parts.join(" ")
    }

    /// Coverage-annotated rendering (`covStr`).
    pub fn coverage_string(&self, show_coverage: bool) -> String {
        self.render(show_coverage)
    }

    /// Length-annotated rendering (`lenStr`): every vertex/edge tagged
    /// with its size.
    pub fn length_string(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }
        let mut s = format!("{} [{}({})", self.left_skip(), self.start().id(), self.graph.vertex_size(self.start()));
        for &e in &self.edges {
            s += &format!(
                " -> {}({}) -> {}({})",
                self.graph.edge_nucl_label(e),
                self.graph.vertex_size(self.graph.edge_start(e)) + self.graph.edge_trunc_size(e),
                self.graph.edge_finish(e).id(),
                self.graph.vertex_size(self.graph.edge_finish(e))
            );
        }
        s += &format!("] {}", self.right_skip());
        s
    }
}

impl<'g> fmt::Display for GraphPath<'g> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

impl<'g> fmt::Debug for GraphPath<'g> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphPath({})", self)
    }
}

// ---------------------------------------------------------------------
// Line-format round trip (the read half of the §6 alignment format)
// ---------------------------------------------------------------------

impl<'g> GraphPath<'g> {
    /// Parses the bare `str()` rendering: `cut_left vertex_id ( size/
    /// truncSize edgeLabel finish_id )+ cut_right`. `vertex_by_id` resolves
    /// the textual vertex ids against whatever id scheme the caller's
    /// graph construction used; this crate owns no file I/O of its own.
    pub fn parse(graph: &'g Graph, line: &str, vertex_by_id: impl Fn(u64) -> Option<VertexId>) -> Result<GraphPath<'g>, ParseError> {
        let toks: Vec<&str> = line.split_whitespace().collect();
        if toks.len() < 3 {
            return Err(ParseError::Truncated);
        }
        let cut_left = parse_usize(toks[0])?;
        let start_id = parse_u64(toks[1])?;
        let cut_right = parse_usize(toks[toks.len() - 1])?;
        let middle = &toks[2..toks.len() - 1];
        if middle.len() % 2 != 0 {
            return Err(ParseError::Truncated);
        }
        let start = vertex_by_id(start_id).ok_or(ParseError::UnknownVertex(start_id))?;

        let mut cur = start;
        let mut edges = Vec::with_capacity(middle.len() / 2);
        for pair in middle.chunks(2) {
            let (size, trunc_size, label) = parse_segment_desc(pair[0])?;
            let finish_id = parse_u64(pair[1])?;
            let finish = vertex_by_id(finish_id).ok_or(ParseError::UnknownVertex(finish_id))?;

            // A vertex's outgoing edges have distinct first truncated
            // nucleotides (the graph's defining invariant), so the label is
            // the discriminator — not `trunc_size`, which a bulge (two
            // parallel same-length edges between the same vertex pair)
            // shares across both arms.
            let edge = match label {
                Some(ch) => {
                    let nucl = char_to_nucl(ch).map_err(|_| ParseError::UnknownEdge { vertex: cur.id() as u64, nucl: ch })?;
                    graph
                        .get_outgoing(cur, nucl)
                        .ok_or(ParseError::UnknownEdge { vertex: cur.id() as u64, nucl: ch })?
                }
                // A degenerate edge (truncSize 0) has no first nucleotide to
                // look up by; fall back to matching on `finish`.
                None => graph
                    .outgoing(cur)
                    .find(|&e| graph.edge_trunc_size(e) == 0 && graph.edge_finish(e) == finish)
                    .ok_or(ParseError::UnknownEdge { vertex: cur.id() as u64, nucl: '-' })?,
            };
            if graph.edge_finish(edge) != finish {
                return Err(ParseError::UnknownEdge {
                    vertex: cur.id() as u64,
                    nucl: label.unwrap_or('-'),
                });
            }
            if graph.edge_trunc_size(edge) != trunc_size {
                return Err(ParseError::SegmentOutOfRange {
                    expected: graph.edge_trunc_size(edge),
                    found: trunc_size,
                });
            }
            if size > trunc_size {
                return Err(ParseError::SegmentOutOfRange { expected: trunc_size, found: size });
            }
            edges.push(edge);
            cur = finish;
        }

        if edges.is_empty() {
            let bound = graph.vertex_size(start);
            if cut_left + cut_right > bound {
                return Err(ParseError::SegmentOutOfRange { expected: bound, found: cut_left + cut_right });
            }
        } else {
            let first_trunc = graph.edge_trunc_size(edges[0]);
            if cut_left > first_trunc {
                return Err(ParseError::SegmentOutOfRange { expected: first_trunc, found: cut_left });
            }
            let last_trunc = graph.edge_trunc_size(*edges.last().unwrap());
            if cut_right > last_trunc {
                return Err(ParseError::SegmentOutOfRange { expected: last_trunc, found: cut_right });
            }
        }
        Ok(GraphPath::from_parts(graph, start, edges, cut_left, cut_right))
    }
}

fn parse_usize(tok: &str) -> Result<usize, ParseError> {
    tok.parse().map_err(|_| ParseError::BadInteger(tok.to_string()))
}

fn parse_u64(tok: &str) -> Result<u64, ParseError> {
    tok.parse().map_err(|_| ParseError::BadInteger(tok.to_string()))
}

/// Parses a `size/truncSizeLABEL` segment descriptor, e.g. `"3/4A"` or the
/// degenerate `"0/0"`.
fn parse_segment_desc(s: &str) -> Result<(usize, usize, Option<char>), ParseError> {
    let (size_str, rest) = s.split_once('/').ok_or(ParseError::Truncated)?;
    let size = parse_usize(size_str)?;
    let digit_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let (trunc_str, label) = rest.split_at(digit_end);
    let trunc_size = parse_usize(trunc_str)?;
    Ok((size, trunc_size, label.chars().next()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastr::graph::testgraph::*;

    #[test]
    fn s1_trim_and_restore() {
        let (g, v0, e1, e2) = linear_graph();
        let mut p = GraphPath::from_parts(&g, v0, vec![e1, e2], 0, 0);
        assert_eq!(p.len(), g.vertex_size(v0) + 8);
        assert_eq!(p.trunc_seq().to_string(), "AATTCCGG");

        p.cut_back(3);
        assert_eq!(p.trunc_seq().to_string(), "AATTC");
        assert_eq!(p.right_skip(), 3);

        p += Segment::new(&g, e2, 1, 4);
        assert_eq!(p.trunc_seq().to_string(), "AATTCCGG");
    }

    #[test]
    fn s2_rc_involution() {
        let (g, v0, e1, e2) = linear_graph();
        let p = GraphPath::from_parts(&g, v0, vec![e1, e2], 0, 0);
        assert_eq!(p.rc().seq(), p.seq().rc());
        assert_eq!(p.rc().rc(), p);
    }

    #[test]
    fn s3_unique_extend_back() {
        let (g, v0, _e1, _e2) = linear_graph();
        let mut p = GraphPath::from_vertex(&g, v0);
        p.unique_extend_back(5);
        assert_eq!(p.len(), g.vertex_size(v0) + 5);
    }

    #[test]
    fn s4_extend_mismatch_invalidates() {
        let (g, v0, edges) = branching_graph();
        let mut p = GraphPath::from_vertex(&g, v0);
        let seq = Sequence::new(vec![3u8]);
        let _ = edges;
        p.extend(&seq);
        assert!(!p.is_valid());
    }

    #[test]
    fn s5_reroute_identity() {
        let (g, v0, e1, e2) = linear_graph();
        let p = GraphPath::from_parts(&g, v0, vec![e1, e2], 0, 0);
        for i in 0..=p.size() {
            for j in i..=p.size() {
                let sub = p.sub_path(i, j);
                assert_eq!(p.reroute(i, j, &sub), p);
            }
        }
    }

    #[test]
    fn s6_all_steps_branching() {
        let (g, v0, edges) = branching_graph();
        let p = GraphPath::from_vertex(&g, v0);
        let steps = p.all_steps();
        assert_eq!(steps.len(), 3);
        for step in &steps {
            assert_eq!(step.len(), p.len() + 1);
        }
        let mut seen: Vec<EdgeId> = steps.iter().map(|s| s.back_edge()).collect();
        seen.sort_by_key(|e| e.id());
        let mut expected = edges.to_vec();
        expected.sort_by_key(|e| e.id());
        assert_eq!(seen, expected);
    }

    #[test]
    fn degenerate_edges_are_skipped_without_consuming_budget() {
        let (g, v0, e1, e2) = degenerate_graph();
        let mut p = GraphPath::from_parts(&g, v0, vec![e1, e2], 0, 0);
        assert_eq!(p.trunc_len(), 1);
        p.cut_back(1);
        assert_eq!(p.len(), g.vertex_size(v0));
        assert!(p.is_valid());
    }

    #[test]
    fn sub_path_zero_length_orphaned_trim_invalidates() {
        let (g, v0, e1, _e2) = linear_graph();
        let mut p = GraphPath::from_parts(&g, v0, vec![e1], 0, 0);
        p.cut_front(1);
        assert_eq!(p.sub_path(0, 0).is_valid(), false);
    }

    #[test]
    fn pop_back_under_left_trim_invalidates() {
        let (g, v0, e1, _e2) = linear_graph();
        let mut p = GraphPath::from_parts(&g, v0, vec![e1], 1, 0);
        p.pop_back();
        assert!(!p.is_valid());
    }

    #[test]
    fn all_extensions_zero_is_identity_and_monotonic() {
        let (g, v0, _edges) = branching_graph();
        let p = GraphPath::from_vertex(&g, v0);
        let ext0 = p.all_extensions(0);
        assert_eq!(ext0, vec![p.clone()]);
        let ext1 = p.all_extensions(1);
        let ext2 = p.all_extensions(2);
        assert!(ext1.len() >= ext0.len());
        assert!(ext2.len() >= ext1.len());
    }

    #[test]
    fn seq_len_and_trunc_len_agree_with_invariants() {
        let (g, v0, e1, e2) = linear_graph();
        let p = GraphPath::from_parts(&g, v0, vec![e1, e2], 1, 1);
        assert_eq!(p.seq().size(), p.len());
        assert_eq!(p.trunc_seq().size(), p.trunc_len());
        assert_eq!(p.len(), g.vertex_size(v0) + p.trunc_len());
    }

    #[test]
    fn cut_back_then_cut_front_preserve_len() {
        let (g, v0, e1, e2) = linear_graph();
        let p = GraphPath::from_parts(&g, v0, vec![e1, e2], 0, 0);
        let total = p.len();
        for l in 0..=total {
            let mut q = p.clone();
            q.cut_back(l);
            assert_eq!(q.len(), total - l);
        }
        for l in 0..=total {
            let mut q = p.clone();
            q.cut_front(l);
            assert_eq!(q.len(), total - l);
        }
    }

    #[test]
    fn append_then_seq_concatenates_at_matching_endpoint() {
        let (g, v0, e1, e2) = linear_graph();
        let p = GraphPath::from_edge(&g, e1);
        let q = GraphPath::from_edge(&g, e2);
        let joined = p.clone() + &q;
        assert_eq!(joined.seq(), p.seq().concat(&q.seq().suffix(q.len() - g.vertex_size(v0))));
    }

    #[test]
    fn parse_round_trips_str() {
        let (g, v0, e1, e2) = linear_graph();
        let p = GraphPath::from_parts(&g, v0, vec![e1, e2], 1, 1);
        let rendered = p.to_string();
        let ids = [v0, g.edge_finish(e1), g.edge_finish(e2)];
        let parsed = GraphPath::parse(&g, &rendered, |id| ids.iter().find(|v| v.id() as u64 == id).copied()).unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn parse_disambiguates_a_bulge_by_label_not_trunc_size() {
        let (g, v0, v1, e_a, e_c) = bulge_graph();
        let ids = [v0, v1];
        let lookup = |id: u64| ids.iter().find(|v| v.id() as u64 == id).copied();

        let p_a = GraphPath::from_edge(&g, e_a);
        let parsed_a = GraphPath::parse(&g, &p_a.to_string(), lookup).unwrap();
        assert_eq!(parsed_a.back_edge(), e_a);

        let p_c = GraphPath::from_edge(&g, e_c);
        let parsed_c = GraphPath::parse(&g, &p_c.to_string(), lookup).unwrap();
        assert_eq!(parsed_c.back_edge(), e_c);
    }

    #[test]
    fn random_step_always_extends_by_one_nucleotide_or_returns_none() {
        use rand::SeedableRng;

        let (g, v0, _edges) = branching_graph();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let p = GraphPath::from_vertex(&g, v0);
        let next = p.random_step(&mut rng).expect("v0 has outgoing edges");
        assert_eq!(next.len(), p.len() + 1);

        let (g2, v0b, _e1, _e2) = linear_graph();
        let mut at_sink = GraphPath::from_vertex(&g2, v0b);
        at_sink.unique_extend_back(8);
        // the sink vertex of the linear graph has no outgoing edges
        assert_eq!(at_sink.random_step(&mut rng), None);
    }

    #[test]
    fn walk_forward_stops_at_junction() {
        let (g, _v0, e1, e2) = linear_graph();
        let p = GraphPath::walk_forward(&g, e1);
        assert_eq!(p.back_edge(), e2);
        assert_eq!(p.size(), 2);
    }
}
