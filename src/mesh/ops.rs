//! Splitting, collapsing and rotating operations.
//!
//! Each operation documents which attribute categories survive it. "Survive"
//! means the element keeps its index and therefore its attribute slot;
//! recreated elements get fresh slots filled with the attribute's default
//! value.

use crate::handle::{
    VertexHandle, FaceHandle, EdgeHandle, HalfEdgeHandle,
};
use super::Mesh;
use super::mutation::FaceLoop;


impl Mesh {
    // =======================================================================
    // ===== Splits
    // =======================================================================

    /// Splits the half-edge's edge by inserting a new vertex into it and
    /// returns that vertex.
    ///
    /// The edge `from → to` becomes `from → v` (keeping the half-edge pair of
    /// `hh`) plus a new edge `v → to`. Both adjacent face rings grow by one
    /// half-edge; faces are neither destroyed nor created.
    ///
    /// Attributes: all vertex, face, edge and half-edge attributes survive;
    /// the new vertex and the new edge/half-edge pair get default values.
    pub fn split_halfedge(&mut self, hh: HalfEdgeHandle) -> VertexHandle {
        self.check_halfedge(hh);

        let h0 = hh;
        let h1 = h0.opposite();
        let v0 = self.target_of(h0);
        let f0 = self.face_cell_of(h0);
        let f1 = self.face_cell_of(h1);
        let h0_next = self.next_of(h0);
        let h1_prev = self.prev_of(h1);

        let v = self.add_vertex();

        // New pair between `v` and the old target: `h2: v → v0` in the ring
        // of `f0`, its twin `h3: v0 → v` in the ring of `f1`.
        let h2 = self.alloc_edge(v, v0);
        let h3 = h2.opposite();

        self.set_target(h0, v);
        self.set_face(h2, f0);
        self.set_face(h3, f1);

        if h0_next == h1 {
            // Dangling edge: the ring is just the pair itself.
            self.connect(h0, h2);
            self.connect(h2, h3);
            self.connect(h3, h1);
        } else {
            self.connect(h0, h2);
            self.connect(h2, h0_next);
            self.connect(h1_prev, h3);
            self.connect(h3, h1);
        }

        // `h1` now starts at `v`, so `v0` may not reference it anymore; its
        // replacement from this edge is `h3`, which has the same face state.
        if self.outgoing_cell_of(v0) == Some(h1) {
            self.set_outgoing(v0, Some(h3));
        }

        // Boundary-first choice for the new vertex.
        let outgoing = if f0.is_none() {
            h2
        } else if f1.is_none() {
            h1
        } else {
            h2
        };
        self.set_outgoing(v, Some(outgoing));

        v
    }

    /// Splits the edge by inserting a new vertex into it. See
    /// [`Mesh::split_halfedge`].
    pub fn split_edge(&mut self, eh: EdgeHandle) -> VertexHandle {
        self.check_edge(eh);
        self.split_halfedge(eh.lower_half())
    }

    /// Splits the face into a triangle fan around a new vertex and returns
    /// that vertex.
    ///
    /// The face is removed and one triangle per ring edge is inserted, each
    /// connecting a ring edge to the new vertex.
    ///
    /// Attributes: vertex and edge/half-edge attributes of the ring survive;
    /// the face's attribute slot does not (the face is destroyed, the fan
    /// triangles are new faces); spoke edges and the new vertex get default
    /// values.
    pub fn split_face(&mut self, fh: FaceHandle) -> VertexHandle {
        self.check_face(fh);

        let mut ring = FaceLoop::<VertexHandle>::new();
        let start = self.halfedge_cell_of(fh);
        let mut hh = start;
        loop {
            ring.push(self.target_of(hh));
            hh = self.next_of(hh);
            if hh == start {
                break;
            }
        }

        self.remove_face(fh);
        let v = self.add_vertex();

        for (i, &a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            self.add_face(&[a, b, v]);
        }

        v
    }

    // =======================================================================
    // ===== Collapses
    // =======================================================================

    /// Collapses the half-edge: its source vertex is removed and every face
    /// around it is reconnected to the target vertex. Returns the target
    /// vertex.
    ///
    /// One-ring faces that would degenerate (fewer than 3 distinct corners,
    /// i.e. the two faces adjacent to the collapsed edge) vanish.
    ///
    /// Attributes: the target vertex keeps its attribute slot, the source
    /// vertex's slot dies. The one-ring faces and their edges/half-edges are
    /// destroyed and recreated, so their attribute values are reset.
    pub fn collapse_halfedge(&mut self, hh: HalfEdgeHandle) -> VertexHandle {
        self.check_halfedge(hh);

        let v_to = self.target_of(hh);
        let v_from = self.target_of(hh.opposite());

        // Record the one-ring faces of `v_from` as vertex loops with `v_from`
        // replaced by `v_to`; each face around the vertex shows up exactly
        // once in the rotation.
        let mut loops: FaceLoop<FaceLoop<VertexHandle>> = FaceLoop::new();
        let mut seen = FaceLoop::<FaceHandle>::new();
        self.rotate_around(v_from, |out| {
            if let Some(fh) = self.face_cell_of(out) {
                if !seen.contains(&fh) {
                    seen.push(fh);

                    let mut ring = FaceLoop::<VertexHandle>::new();
                    let start = self.halfedge_cell_of(fh);
                    let mut cur = start;
                    loop {
                        let corner = self.target_of(cur);
                        ring.push(if corner == v_from { v_to } else { corner });
                        cur = self.next_of(cur);
                        if cur == start {
                            break;
                        }
                    }
                    loops.push(ring);
                }
            }
            false
        });

        self.remove_vertex(v_from);

        for ring in &loops {
            // Drop adjacent duplicate corners introduced by the substitution.
            let mut deduped = FaceLoop::<VertexHandle>::new();
            for &corner in ring.iter() {
                if deduped.last() != Some(&corner) {
                    deduped.push(corner);
                }
            }
            while deduped.len() > 1 && deduped.first() == deduped.last() {
                deduped.pop();
            }

            if deduped.len() >= 3 {
                self.add_face(&deduped);
            }
        }

        v_to
    }

    /// Collapses the edge into its target vertex (the target of its lower
    /// half-edge). See [`Mesh::collapse_halfedge`].
    pub fn collapse_edge(&mut self, eh: EdgeHandle) -> VertexHandle {
        self.check_edge(eh);
        self.collapse_halfedge(eh.lower_half())
    }

    // =======================================================================
    // ===== Rotations
    // =======================================================================

    /// Rotates the edge forward: both endpoints move one ring position along
    /// `next`. For triangle faces this is the classic edge flip.
    ///
    /// Preconditions: the edge is interior (both faces exist) and both
    /// endpoints have valence > 2.
    ///
    /// Attributes: everything survives; no element is created or destroyed,
    /// and the edge and its half-edges keep their slots while spanning
    /// different vertices afterwards.
    pub fn rotate_edge_next(&mut self, eh: EdgeHandle) {
        self.check_edge(eh);
        let [h0, h1] = eh.halfedges();
        assert!(
            !self.is_free(h0) && !self.is_free(h1),
            "cannot rotate a boundary edge",
        );
        debug_assert!(self.valence(self.target_of(h0)) > 2);
        debug_assert!(self.valence(self.target_of(h1)) > 2);

        let f0 = self.face_cell_of(h0).unwrap();
        let f1 = self.face_cell_of(h1).unwrap();

        let h0_next = self.next_of(h0);
        let h0_prev = self.prev_of(h0);
        let h1_next = self.next_of(h1);
        let h1_prev = self.prev_of(h1);
        let h0_next_next = self.next_of(h0_next);
        let h1_next_next = self.next_of(h1_next);

        // The old endpoints lose this edge from their rotation.
        let v0 = self.target_of(h0);
        let v1 = self.target_of(h1);
        if self.outgoing_cell_of(v0) == Some(h1) {
            self.set_outgoing(v0, Some(h0_next));
        }
        if self.outgoing_cell_of(v1) == Some(h0) {
            self.set_outgoing(v1, Some(h1_next));
        }

        // `h0_next` leaves the ring of `f0`, `h1_next` the ring of `f1`.
        if self.halfedge_cell_of(f0) == h0_next {
            self.set_face_halfedge(f0, h0);
        }
        if self.halfedge_cell_of(f1) == h1_next {
            self.set_face_halfedge(f1, h1);
        }

        self.set_target(h0, self.target_of(h0_next));
        self.set_target(h1, self.target_of(h1_next));

        self.set_face(h0_next, Some(f1));
        self.set_face(h1_next, Some(f0));

        self.connect(h0_prev, h1_next);
        self.connect(h1_next, h0);
        self.connect(h0, h0_next_next);

        self.connect(h1_prev, h0_next);
        self.connect(h0_next, h1);
        self.connect(h1, h1_next_next);

        self.fix_boundary_state_of_face(f0);
        self.fix_boundary_state_of_face(f1);
        self.fix_boundary_state_of_vertex(self.target_of(h0));
        self.fix_boundary_state_of_vertex(self.target_of(h1));
    }

    /// Rotates the edge backward: the inverse of [`Mesh::rotate_edge_next`].
    /// Same preconditions and attribute contract.
    pub fn rotate_edge_prev(&mut self, eh: EdgeHandle) {
        self.check_edge(eh);
        let [h0, h1] = eh.halfedges();
        assert!(
            !self.is_free(h0) && !self.is_free(h1),
            "cannot rotate a boundary edge",
        );
        debug_assert!(self.valence(self.target_of(h0)) > 2);
        debug_assert!(self.valence(self.target_of(h1)) > 2);

        let f0 = self.face_cell_of(h0).unwrap();
        let f1 = self.face_cell_of(h1).unwrap();

        let h0_next = self.next_of(h0);
        let h0_prev = self.prev_of(h0);
        let h1_next = self.next_of(h1);
        let h1_prev = self.prev_of(h1);
        let h0_prev_prev = self.prev_of(h0_prev);
        let h1_prev_prev = self.prev_of(h1_prev);

        let v0 = self.target_of(h0);
        let v1 = self.target_of(h1);
        if self.outgoing_cell_of(v0) == Some(h1) {
            self.set_outgoing(v0, Some(h0_next));
        }
        if self.outgoing_cell_of(v1) == Some(h0) {
            self.set_outgoing(v1, Some(h1_next));
        }

        // `h0_prev` leaves the ring of `f0`, `h1_prev` the ring of `f1`.
        if self.halfedge_cell_of(f0) == h0_prev {
            self.set_face_halfedge(f0, h0);
        }
        if self.halfedge_cell_of(f1) == h1_prev {
            self.set_face_halfedge(f1, h1);
        }

        self.set_target(h0, self.target_of(h1_prev_prev));
        self.set_target(h1, self.target_of(h0_prev_prev));

        self.set_face(h0_prev, Some(f1));
        self.set_face(h1_prev, Some(f0));

        self.connect(h0_prev_prev, h0);
        self.connect(h0, h1_prev);
        self.connect(h1_prev, h0_next);

        self.connect(h1_prev_prev, h1);
        self.connect(h1, h0_prev);
        self.connect(h0_prev, h1_next);

        self.fix_boundary_state_of_face(f0);
        self.fix_boundary_state_of_face(f1);
        self.fix_boundary_state_of_vertex(self.target_of(h0));
        self.fix_boundary_state_of_vertex(self.target_of(h1));
    }

    /// Rotates only the tip of the half-edge forward: its target moves one
    /// ring position along `next`, while its source stays.
    ///
    /// Preconditions: neither `hh` nor its twin is a boundary half-edge, and
    /// the ring of `hh` has degree > 3 (it shrinks by one half-edge).
    ///
    /// Attributes: everything survives.
    pub fn rotate_halfedge_next(&mut self, hh: HalfEdgeHandle) {
        self.check_halfedge(hh);
        let opp = hh.opposite();
        assert!(
            !self.is_free(hh) && !self.is_free(opp),
            "cannot rotate a boundary half-edge",
        );

        let v_tip = self.target_of(hh);

        let f0 = self.face_cell_of(hh).unwrap();
        let f1 = self.face_cell_of(opp).unwrap();
        assert!(
            self.degree(f0) > 3,
            "cannot rotate a half-edge whose ring is a triangle",
        );

        let h_next = self.next_of(hh);
        let h_next_next = self.next_of(h_next);
        let opp_prev = self.prev_of(opp);

        if self.outgoing_cell_of(v_tip) == Some(opp) {
            self.set_outgoing(v_tip, Some(h_next));
        }
        if self.halfedge_cell_of(f0) == h_next {
            self.set_face_halfedge(f0, hh);
        }

        // `h_next` moves from the ring of `f0` into the ring of `f1`.
        self.set_target(hh, self.target_of(h_next));
        self.set_face(h_next, Some(f1));

        self.connect(hh, h_next_next);
        self.connect(opp_prev, h_next);
        self.connect(h_next, opp);

        self.fix_boundary_state_of_face(f0);
        self.fix_boundary_state_of_face(f1);
        self.fix_boundary_state_of_vertex(v_tip);
    }

    /// Rotates only the tip of the half-edge backward: its target moves one
    /// ring position against `next`, while its source stays. The inverse of
    /// [`Mesh::rotate_halfedge_next`].
    ///
    /// Preconditions: neither `hh` nor its twin is a boundary half-edge, and
    /// the ring of the twin has degree > 3 (it shrinks by one half-edge).
    ///
    /// Attributes: everything survives.
    pub fn rotate_halfedge_prev(&mut self, hh: HalfEdgeHandle) {
        self.check_halfedge(hh);
        let opp = hh.opposite();
        assert!(
            !self.is_free(hh) && !self.is_free(opp),
            "cannot rotate a boundary half-edge",
        );

        let v_tip = self.target_of(hh);

        let f0 = self.face_cell_of(hh).unwrap();
        let f1 = self.face_cell_of(opp).unwrap();
        assert!(
            self.degree(f1) > 3,
            "cannot rotate a half-edge whose twin ring is a triangle",
        );

        let g = self.prev_of(opp);
        let g_prev = self.prev_of(g);
        let h_next = self.next_of(hh);

        // The old tip loses its outgoing `opp`; `g` keeps pointing at it, so
        // its twin is a valid replacement.
        if self.outgoing_cell_of(v_tip) == Some(opp) {
            self.set_outgoing(v_tip, Some(g.opposite()));
        }
        if self.halfedge_cell_of(f1) == g {
            self.set_face_halfedge(f1, opp);
        }

        // `g` moves from the ring of `f1` into the ring of `f0`.
        self.set_target(hh, self.target_of(g_prev));
        self.set_face(g, Some(f0));

        self.connect(hh, g);
        self.connect(g, h_next);
        self.connect(g_prev, opp);

        self.fix_boundary_state_of_face(f0);
        self.fix_boundary_state_of_face(f1);
        self.fix_boundary_state_of_vertex(v_tip);
    }
}
