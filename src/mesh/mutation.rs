//! Structural mutation: edge insertion with adjacency splicing, face
//! insertion and removal, element removal, boundary repair.
//!
//! All operations keep the invariants described in [the module
//! docs][super]. Violated preconditions (malformed chains, non-manifold
//! insertions, dead handles) are caller errors and panic; callers that cannot
//! guarantee their input (format importers in particular) should use
//! [`Mesh::can_add_face`] first.

use smallvec::SmallVec;

use crate::handle::{
    VertexHandle, FaceHandle, EdgeHandle, HalfEdgeHandle,
};
use super::Mesh;


pub(crate) const NON_MANIFOLD_EDGE_ERR: &str =
    "new face would add a non-manifold edge (half-edge already carries a face)";
pub(crate) const NON_MANIFOLD_VERTEX_ERR: &str =
    "new face would add a non-manifold vertex (no free half-edge in rotation)";
pub(crate) const FULLY_CONNECTED_ERR: &str =
    "vertex is already fully connected (no free incident slot to splice into)";

/// Scratch storage for face loops. Most faces are small, so this normally
/// stays on the stack.
pub(crate) type FaceLoop<T> = SmallVec<[T; 8]>;

impl Mesh {
    // =======================================================================
    // ===== Free-slot search
    // =======================================================================

    /// Walks the incoming half-edges of a vertex, starting at `start` and
    /// stopping before reaching `end`, and returns the first free one.
    ///
    /// `start` and `end` must both point to the same vertex. When `start ==
    /// end`, the whole rotation is searched.
    pub(crate) fn find_free_incoming_between(
        &self,
        start: HalfEdgeHandle,
        end: HalfEdgeHandle,
    ) -> Option<HalfEdgeHandle> {
        let mut hh = start;
        loop {
            if self.is_free(hh) {
                return Some(hh);
            }
            hh = self.next_of(hh).opposite();
            if hh == end {
                return None;
            }
        }
    }

    /// Returns a free incoming half-edge of `vh`, or `None` if the vertex is
    /// fully connected. The vertex must not be isolated.
    pub(crate) fn find_free_incoming(&self, vh: VertexHandle) -> Option<HalfEdgeHandle> {
        let start = self.outgoing_cell_of(vh)
            .expect("searched for free slot at isolated vertex")
            .opposite();
        self.find_free_incoming_between(start, start)
    }

    // =======================================================================
    // ===== Edge insertion
    // =======================================================================

    /// Returns the half-edge pointing from `from` to `to`, inserting the edge
    /// if it does not exist yet.
    ///
    /// A new half-edge pair is spliced into each endpoint's rotation at a
    /// free (face-less) slot. Panics if an endpoint has incident edges but no
    /// free slot ("vertex already fully connected") or if `from == to`.
    pub fn add_or_get_halfedge(
        &mut self,
        from: VertexHandle,
        to: VertexHandle,
    ) -> HalfEdgeHandle {
        self.check_vertex(from);
        self.check_vertex(to);
        assert!(from != to, "cannot add a loop edge at {:?}", from);

        if let Some(hh) = self.find_outgoing(from, |hh| self.target_of(hh) == to) {
            return hh;
        }

        // Find splice points before allocating, so a failed precondition
        // leaves the mesh untouched.
        let from_in = match self.outgoing_cell_of(from) {
            None => None,
            Some(_) => Some(self.find_free_incoming(from).expect(FULLY_CONNECTED_ERR)),
        };
        let to_in = match self.outgoing_cell_of(to) {
            None => None,
            Some(_) => Some(self.find_free_incoming(to).expect(FULLY_CONNECTED_ERR)),
        };

        let h_from_to = self.alloc_edge(from, to);
        let h_to_from = h_from_to.opposite();

        // Start with a self-connected pair; splicing below rewires as needed.
        self.connect(h_from_to, h_to_from);
        self.connect(h_to_from, h_from_to);

        match from_in {
            None => self.set_outgoing(from, Some(h_from_to)),
            Some(from_in) => {
                let from_out = self.next_of(from_in);
                self.connect(from_in, h_from_to);
                self.connect(h_to_from, from_out);
            }
        }

        match to_in {
            None => self.set_outgoing(to, Some(h_to_from)),
            Some(to_in) => {
                let to_out = self.next_of(to_in);
                self.connect(to_in, h_to_from);
                self.connect(h_from_to, to_out);
            }
        }

        h_from_to
    }

    /// Returns the edge connecting the two vertices, inserting it if absent.
    /// See [`Mesh::add_or_get_halfedge`].
    pub fn add_or_get_edge(&mut self, a: VertexHandle, b: VertexHandle) -> EdgeHandle {
        self.add_or_get_halfedge(a, b).edge()
    }

    // =======================================================================
    // ===== Adjacency splicing
    // =======================================================================

    /// Rewires rings so that `next(h_in) == h_out`, without allocating.
    ///
    /// `h_in` must point to the vertex `h_out` points away from. If the two
    /// are not already consecutive, a free half-edge between `h_out`'s twin
    /// and `h_in` in the shared vertex's rotation takes over the sub-chain
    /// that currently follows `h_in`; rotation order away from the affected
    /// slots is preserved. Returns `false` when no such free half-edge
    /// exists, which means making them adjacent would need a non-manifold
    /// vertex.
    pub fn make_adjacent(&mut self, h_in: HalfEdgeHandle, h_out: HalfEdgeHandle) -> bool {
        self.check_halfedge(h_in);
        self.check_halfedge(h_out);
        debug_assert_eq!(
            self.target_of(h_in),
            self.target_of(h_out.opposite()),
            "make_adjacent: half-edges do not share a vertex",
        );

        if self.next_of(h_in) == h_out {
            return true;
        }

        let h_b = self.next_of(h_in);
        let h_d = self.prev_of(h_out);

        // A free incoming half-edge between `h_out`'s twin and `h_in`; its
        // chain slot receives the dangling sub-chains. This range never
        // yields `h_in` or `h_d`, so the three relinks below hit three
        // distinct chain slots.
        let h_g = match self.find_free_incoming_between(h_out.opposite(), h_in) {
            Some(h_g) => h_g,
            None => return false,
        };
        let h_h = self.next_of(h_g);

        self.connect(h_in, h_out);
        self.connect(h_g, h_b);
        self.connect(h_d, h_h);

        true
    }

    // =======================================================================
    // ===== Face insertion
    // =======================================================================

    /// Whether [`Mesh::add_face`] can insert a face over the given vertices
    /// without violating manifoldness.
    ///
    /// This checks the documented preconditions: at least 3 live vertices,
    /// every vertex on the boundary (or isolated), and every already-existing
    /// connecting half-edge free.
    pub fn can_add_face(&self, vertices: &[VertexHandle]) -> bool {
        if vertices.len() < 3 {
            return false;
        }

        for &vh in vertices {
            if !self.contains_vertex(vh) || !self.is_boundary_vertex(vh) {
                return false;
            }
        }

        for (i, &from) in vertices.iter().enumerate() {
            let to = vertices[(i + 1) % vertices.len()];
            if from == to {
                return false;
            }
            if let Some(hh) = self.find_outgoing(from, |hh| self.target_of(hh) == to) {
                if !self.is_free(hh) {
                    return false;
                }
            }
        }

        true
    }

    /// Adds a face over the given vertices, in counter-clockwise order,
    /// inserting missing edges along the way.
    ///
    /// Panics on non-manifold insertion (a connecting half-edge already
    /// carries a face, or splicing fails at a vertex). Use
    /// [`Mesh::can_add_face`] to test first.
    pub fn add_face(&mut self, vertices: &[VertexHandle]) -> FaceHandle {
        assert!(vertices.len() >= 3, "faces must have at least 3 vertices");

        let mut halfedges = FaceLoop::<HalfEdgeHandle>::new();
        for (i, &from) in vertices.iter().enumerate() {
            let to = vertices[(i + 1) % vertices.len()];
            halfedges.push(self.add_or_get_halfedge(from, to));
        }

        self.add_face_halfedges(&halfedges)
    }

    /// Adds a face over an existing closed chain of free half-edges
    /// (`to_vertex(h[i]) == from_vertex(h[i + 1])`, cyclically).
    ///
    /// Panics if the chain is malformed, if any half-edge already carries a
    /// face, or if splicing fails at a vertex (non-manifold insertion).
    pub fn add_face_halfedges(&mut self, halfedges: &[HalfEdgeHandle]) -> FaceHandle {
        assert!(halfedges.len() >= 3, "faces must have at least 3 half-edges");
        for &hh in halfedges {
            self.check_halfedge(hh);
        }

        // Validate the whole chain before allocating anything, so a rejected
        // insertion leaves no dangling face slot behind.
        for (i, &h0) in halfedges.iter().enumerate() {
            let h1 = halfedges[(i + 1) % halfedges.len()];

            assert_eq!(
                self.target_of(h0),
                self.target_of(h1.opposite()),
                "add_face: half-edges do not form a closed chain",
            );
            assert!(self.is_free(h0), "{}", NON_MANIFOLD_EDGE_ERR);
        }

        let fh = self.alloc_face(halfedges[0]);

        for (i, &h0) in halfedges.iter().enumerate() {
            let h1 = halfedges[(i + 1) % halfedges.len()];
            assert!(self.make_adjacent(h0, h1), "{}", NON_MANIFOLD_VERTEX_ERR);
            self.set_face(h0, Some(fh));
        }

        // Repair the boundary-first references of everything we touched.
        for &hh in halfedges {
            self.fix_boundary_state_of_vertex(self.target_of(hh));
            if let Some(opp_face) = self.face_cell_of(hh.opposite()) {
                self.fix_boundary_state_of_face(opp_face);
            }
        }
        self.fix_boundary_state_of_face(fh);

        fh
    }

    // =======================================================================
    // ===== Removal
    // =======================================================================

    /// Removes the face, turning its ring into boundary half-edges. Vertices
    /// and edges stay.
    pub fn remove_face(&mut self, fh: FaceHandle) {
        self.check_face(fh);

        let start = self.halfedge_cell_of(fh);
        let mut hh = start;
        loop {
            debug_assert_eq!(self.face_cell_of(hh), Some(fh));
            self.set_face(hh, None);

            // `hh` is free now, so pointing its source vertex at it satisfies
            // the boundary-first invariant directly.
            self.set_outgoing(self.target_of(hh.opposite()), Some(hh));

            // Same for the face on the other side of the edge: its ring
            // half-edge `opposite(hh)` now has a free twin.
            if let Some(opp_face) = self.face_cell_of(hh.opposite()) {
                self.set_face_halfedge(opp_face, hh.opposite());
            }

            hh = self.next_of(hh);
            if hh == start {
                break;
            }
        }

        self.mark_face_removed(fh);
    }

    /// Removes the edge and both incident faces (if any). Endpoint vertices
    /// stay; an endpoint whose last edge this was becomes isolated.
    pub fn remove_edge(&mut self, eh: EdgeHandle) {
        self.check_edge(eh);

        let [ha, hb] = eh.halfedges();
        if let Some(fa) = self.face_cell_of(ha) {
            self.remove_face(fa);
        }
        if let Some(fb) = self.face_cell_of(hb) {
            self.remove_face(fb);
        }

        let va = self.target_of(hb); // source of `ha`
        let vb = self.target_of(ha);

        let ha_prev = self.prev_of(ha);
        let ha_next = self.next_of(ha);
        let hb_prev = self.prev_of(hb);
        let hb_next = self.next_of(hb);

        // Unhook the endpoints' outgoing references from the dying pair.
        if self.outgoing_cell_of(vb) == Some(hb) {
            let replacement = if ha_next == hb { None } else { Some(ha_next) };
            self.set_outgoing(vb, replacement);
        }
        if self.outgoing_cell_of(va) == Some(ha) {
            let replacement = if hb_next == ha { None } else { Some(hb_next) };
            self.set_outgoing(va, replacement);
        }

        // Bridge the boundary rings over the gap at both endpoints.
        self.connect(ha_prev, hb_next);
        self.connect(hb_prev, ha_next);

        self.mark_edge_removed(eh);
    }

    /// Removes the vertex and, cascading, every incident edge and face.
    pub fn remove_vertex(&mut self, vh: VertexHandle) {
        self.check_vertex(vh);

        while let Some(out) = self.outgoing_cell_of(vh) {
            self.remove_edge(out.edge());
        }

        self.mark_vertex_removed(vh);
    }

    // =======================================================================
    // ===== Boundary repair
    // =======================================================================

    /// Re-establishes the boundary-first reference of a vertex: rotates from
    /// its current outgoing half-edge and stores the first free one found.
    /// Leaves the reference unchanged if no outgoing half-edge is free.
    pub(crate) fn fix_boundary_state_of_vertex(&mut self, vh: VertexHandle) {
        if let Some(free) = self.find_outgoing(vh, |hh| self.is_free(hh)) {
            self.set_outgoing(vh, Some(free));
        }
    }

    /// Re-establishes the boundary-first reference of a face: walks its ring
    /// and stores the first half-edge with a free twin. Leaves the reference
    /// unchanged if no ring half-edge has one.
    pub(crate) fn fix_boundary_state_of_face(&mut self, fh: FaceHandle) {
        let start = self.halfedge_cell_of(fh);
        let mut hh = start;
        loop {
            if self.is_free(hh.opposite()) {
                self.set_face_halfedge(fh, hh);
                return;
            }
            hh = self.next_of(hh);
            if hh == start {
                return;
            }
        }
    }
}
