//! Compaction and index permutation.
//!
//! Both families of operations move elements to new indices and therefore
//! have to rewrite every cross reference in the connectivity arrays and
//! notify all registered attribute buffers.

use log::debug;

use crate::handle::{hsize, Handle, VertexHandle, FaceHandle, HalfEdgeHandle};
use super::Mesh;


impl Mesh {
    // =======================================================================
    // ===== Compaction
    // =======================================================================

    /// Reclaims all tombstoned slots by moving live elements down to the
    /// lowest free indices, preserving their relative order.
    ///
    /// All handles obtained before this call are invalidated. Registered
    /// attribute buffers are remapped accordingly, so attribute values follow
    /// their elements. No-op if the mesh [is already compact][Mesh::is_compact].
    pub fn compactify(&mut self) {
        if self.compact {
            return;
        }

        debug!(
            "compacting mesh ({} of {} vertex, {} of {} face, {} of {} \
                half-edge slots live)",
            self.size_vertices(), self.size_all_vertices(),
            self.size_faces(), self.size_all_faces(),
            self.size_halfedges(), self.size_all_halfedges(),
        );

        let v_new_to_old = live_slots(&self.v_outgoing, |c| !c.is_tomb());
        let f_new_to_old = live_slots(&self.f_halfedge, |c| !c.is_tomb());
        let h_new_to_old = live_slots(&self.h_target, |c| !c.is_tomb());

        // The two half-edges of an edge are tombstoned together, so live
        // pairs stay adjacent and even-aligned after moving down.
        debug_assert!(h_new_to_old.len() % 2 == 0);
        let e_new_to_old: Vec<hsize> = h_new_to_old
            .iter()
            .step_by(2)
            .map(|&old| old / 2)
            .collect();

        let v_old_to_new = invert_mapping(&v_new_to_old, self.v_outgoing.len());
        let f_old_to_new = invert_mapping(&f_new_to_old, self.f_halfedge.len());
        let h_old_to_new = invert_mapping(&h_new_to_old, self.h_target.len());

        move_down(&mut self.v_outgoing, &v_new_to_old);
        move_down(&mut self.f_halfedge, &f_new_to_old);
        move_down(&mut self.h_target, &h_new_to_old);
        move_down(&mut self.h_face, &h_new_to_old);
        move_down(&mut self.h_next, &h_new_to_old);
        move_down(&mut self.h_prev, &h_new_to_old);

        for cell in &mut self.v_outgoing {
            *cell = cell.map_valid(|h| HalfEdgeHandle::new(h_old_to_new[h.to_usize()]));
        }
        for cell in &mut self.f_halfedge {
            *cell = cell.map_valid(|h| HalfEdgeHandle::new(h_old_to_new[h.to_usize()]));
        }
        for cell in &mut self.h_target {
            *cell = cell.map_valid(|v| VertexHandle::new(v_old_to_new[v.to_usize()]));
        }
        for cell in &mut self.h_face {
            *cell = cell.map_valid(|f| FaceHandle::new(f_old_to_new[f.to_usize()]));
        }
        for cell in &mut self.h_next {
            *cell = cell.map_valid(|h| HalfEdgeHandle::new(h_old_to_new[h.to_usize()]));
        }
        for cell in &mut self.h_prev {
            *cell = cell.map_valid(|h| HalfEdgeHandle::new(h_old_to_new[h.to_usize()]));
        }

        self.vertex_attrs.notify_remap(&v_new_to_old);
        self.vertex_attrs.notify_resize(self.v_outgoing.len());
        self.face_attrs.notify_remap(&f_new_to_old);
        self.face_attrs.notify_resize(self.f_halfedge.len());
        self.halfedge_attrs.notify_remap(&h_new_to_old);
        self.halfedge_attrs.notify_resize(self.h_target.len());
        self.edge_attrs.notify_remap(&e_new_to_old);
        self.edge_attrs.notify_resize(self.h_target.len() / 2);

        self.removed_vertices = 0;
        self.removed_faces = 0;
        self.removed_halfedges = 0;
        self.compact = true;
    }

    // =======================================================================
    // ===== Permutation
    // =======================================================================

    /// Reorders all vertices: the vertex at index `i` moves to index `p[i]`.
    ///
    /// `p` has to be a permutation of `0..size_vertices()` and the mesh has to
    /// be compact, otherwise this panics. Registered vertex attributes are
    /// reordered along.
    pub fn permute_vertices(&mut self, p: &[hsize]) {
        self.check_permutation(p, self.size_all_vertices());

        let ts = transpositions_of(p);
        for &(a, b) in &ts {
            self.v_outgoing.swap(a as usize, b as usize);
        }
        for cell in &mut self.h_target {
            *cell = cell.map_valid(|v| VertexHandle::new(p[v.to_usize()]));
        }

        self.vertex_attrs.notify_transpositions(&ts);
    }

    /// Reorders all faces: the face at index `i` moves to index `p[i]`. Same
    /// requirements as [`Mesh::permute_vertices`].
    pub fn permute_faces(&mut self, p: &[hsize]) {
        self.check_permutation(p, self.size_all_faces());

        let ts = transpositions_of(p);
        for &(a, b) in &ts {
            self.f_halfedge.swap(a as usize, b as usize);
        }
        for cell in &mut self.h_face {
            *cell = cell.map_valid(|f| FaceHandle::new(p[f.to_usize()]));
        }

        self.face_attrs.notify_transpositions(&ts);
    }

    /// Reorders all edges: the edge at index `i` moves to index `p[i]`. Both
    /// half-edges of an edge move together and keep their order within the
    /// pair. Same requirements as [`Mesh::permute_vertices`]; registered edge
    /// *and* half-edge attributes are reordered along.
    pub fn permute_edges(&mut self, p: &[hsize]) {
        self.check_permutation(p, self.size_all_edges());

        // The induced half-edge permutation.
        let mut hp = vec![0; p.len() * 2];
        for (i, &new) in p.iter().enumerate() {
            hp[2 * i] = 2 * new;
            hp[2 * i + 1] = 2 * new + 1;
        }

        let ts = transpositions_of(p);
        let mut h_ts = Vec::with_capacity(ts.len() * 2);
        for &(a, b) in &ts {
            h_ts.push((2 * a, 2 * b));
            h_ts.push((2 * a + 1, 2 * b + 1));
        }

        for &(a, b) in &h_ts {
            self.h_target.swap(a as usize, b as usize);
            self.h_face.swap(a as usize, b as usize);
            self.h_next.swap(a as usize, b as usize);
            self.h_prev.swap(a as usize, b as usize);
        }
        for cell in &mut self.v_outgoing {
            *cell = cell.map_valid(|h| HalfEdgeHandle::new(hp[h.to_usize()]));
        }
        for cell in &mut self.f_halfedge {
            *cell = cell.map_valid(|h| HalfEdgeHandle::new(hp[h.to_usize()]));
        }
        for cell in &mut self.h_next {
            *cell = cell.map_valid(|h| HalfEdgeHandle::new(hp[h.to_usize()]));
        }
        for cell in &mut self.h_prev {
            *cell = cell.map_valid(|h| HalfEdgeHandle::new(hp[h.to_usize()]));
        }

        self.edge_attrs.notify_transpositions(&ts);
        self.halfedge_attrs.notify_transpositions(&h_ts);
    }

    fn check_permutation(&self, p: &[hsize], len: hsize) {
        if !self.compact {
            panic!("mesh must be compact before permuting (call `compactify`)");
        }
        if !is_valid_permutation(p, len) {
            panic!("the given mapping is not a permutation of 0..{}", len);
        }
    }
}

/// Indices of all slots satisfying `live`, in increasing order.
fn live_slots<T>(slots: &[T], live: impl Fn(&T) -> bool) -> Vec<hsize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, c)| live(c))
        .map(|(i, _)| i as hsize)
        .collect()
}

/// Inverts a new→old index list into an old→new lookup table. Slots without
/// a new position keep a garbage value; they are never looked up since no
/// live cell references a tombstoned slot.
fn invert_mapping(new_to_old: &[hsize], old_len: usize) -> Vec<hsize> {
    let mut old_to_new = vec![hsize::max_value(); old_len];
    for (new, &old) in new_to_old.iter().enumerate() {
        old_to_new[old as usize] = new as hsize;
    }
    old_to_new
}

/// Moves the values listed in `new_to_old` to the front (in order) and drops
/// the rest.
fn move_down<T: Copy>(slots: &mut Vec<T>, new_to_old: &[hsize]) {
    for (new, &old) in new_to_old.iter().enumerate() {
        slots[new] = slots[old as usize];
    }
    slots.truncate(new_to_old.len());
}

/// Decomposes the permutation `p` (mapping index `i` to `p[i]`) into a
/// sequence of transpositions which, applied in order via swaps, realizes it.
pub(crate) fn transpositions_of(p: &[hsize]) -> Vec<(hsize, hsize)> {
    let mut p = p.to_vec();
    let mut ts = Vec::new();
    for i in 0..p.len() {
        loop {
            let j = p[i] as usize;
            if j == i {
                break;
            }
            ts.push((i as hsize, j as hsize));
            p.swap(i, j);
        }
    }
    ts
}

/// Whether `p` maps `0..len` bijectively onto itself.
pub(crate) fn is_valid_permutation(p: &[hsize], len: hsize) -> bool {
    if p.len() != len as usize {
        return false;
    }
    let mut seen = vec![false; p.len()];
    for &target in p {
        if target >= len || seen[target as usize] {
            return false;
        }
        seen[target as usize] = true;
    }
    true
}
