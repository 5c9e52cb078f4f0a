//! The half-edge mesh itself: connectivity storage and read access.
//!
//! # Storage layout
//!
//! The connectivity relation is stored in parallel arrays, one slot per
//! element instance:
//!
//! - per vertex: one outgoing half-edge (or "isolated"),
//! - per face: one half-edge of its ring,
//! - per half-edge: target vertex, face (or "boundary"), next and previous
//!   half-edge in its ring.
//!
//! The twin half-edges of one edge are stored next to one another at indices
//! `2e` and `2e + 1`, so edges need no storage of their own; the pairing
//! arithmetic lives on [`HalfEdgeHandle`] and [`EdgeHandle`].
//!
//! Removing an element tombstones its slot in place. Indices stay stable
//! until [`Mesh::compactify`] reclaims tombstoned slots.
//!
//! # Invariants
//!
//! After every public operation:
//!
//! - `next` and `prev` are mutual inverses on live half-edges; the cycle
//!   reachable via `next` is a face ring (if the half-edges carry a face) or
//!   a boundary ring (if they don't).
//! - A vertex's stored outgoing half-edge is a boundary (face-less) one
//!   whenever the vertex has any boundary outgoing half-edge, so
//!   [`Mesh::is_boundary_vertex`] is O(1).
//! - A face's stored half-edge has a boundary twin whenever any ring
//!   half-edge does, so [`Mesh::is_boundary_face`] is O(1).

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::attr::{self, Attr, ElementKind, Registry};
use crate::handle::{
    hsize, Cell, Handle, VertexHandle, FaceHandle, EdgeHandle, HalfEdgeHandle,
};

mod compact;
mod mutation;
mod ops;
#[cfg(test)]
pub(crate) mod tests;


/// A polygon mesh: vertices, faces, edges and half-edges plus their adjacency
/// relation.
///
/// Faces can have arbitrary degree ≥ 3. The structure is mutable under
/// insertion, removal, splitting, collapsing and rotation while keeping the
/// module-level invariants; registered [attribute buffers][crate::attr] are
/// kept synchronized through all of it.
pub struct Mesh {
    /// Per vertex: outgoing half-edge. "None" = isolated.
    v_outgoing: Vec<Cell<HalfEdgeHandle>>,
    /// Per face: one half-edge of its ring.
    f_halfedge: Vec<Cell<HalfEdgeHandle>>,
    /// Per half-edge: target vertex. This cell also carries the tombstone
    /// marker for removed half-edges (both twins are tombstoned together).
    h_target: Vec<Cell<VertexHandle>>,
    /// Per half-edge: adjacent face. "None" = boundary half-edge.
    h_face: Vec<Cell<FaceHandle>>,
    /// Per half-edge: next half-edge in its ring.
    h_next: Vec<Cell<HalfEdgeHandle>>,
    /// Per half-edge: previous half-edge in its ring.
    h_prev: Vec<Cell<HalfEdgeHandle>>,

    removed_vertices: hsize,
    removed_faces: hsize,
    removed_halfedges: hsize,
    compact: bool,

    pub(crate) vertex_attrs: Rc<Registry>,
    pub(crate) face_attrs: Rc<Registry>,
    pub(crate) edge_attrs: Rc<Registry>,
    pub(crate) halfedge_attrs: Rc<Registry>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            v_outgoing: Vec::new(),
            f_halfedge: Vec::new(),
            h_target: Vec::new(),
            h_face: Vec::new(),
            h_next: Vec::new(),
            h_prev: Vec::new(),
            removed_vertices: 0,
            removed_faces: 0,
            removed_halfedges: 0,
            compact: true,
            vertex_attrs: Registry::new(),
            face_attrs: Registry::new(),
            edge_attrs: Registry::new(),
            halfedge_attrs: Registry::new(),
        }
    }

    // =======================================================================
    // ===== Sizes & liveness
    // =======================================================================

    /// Number of live vertices.
    pub fn size_vertices(&self) -> hsize {
        self.size_all_vertices() - self.removed_vertices
    }

    /// Number of live faces.
    pub fn size_faces(&self) -> hsize {
        self.size_all_faces() - self.removed_faces
    }

    /// Number of live edges.
    pub fn size_edges(&self) -> hsize {
        self.size_all_edges() - self.removed_halfedges / 2
    }

    /// Number of live half-edges.
    pub fn size_halfedges(&self) -> hsize {
        self.size_all_halfedges() - self.removed_halfedges
    }

    /// Number of vertex slots, including tombstoned ones.
    pub fn size_all_vertices(&self) -> hsize {
        self.v_outgoing.len() as hsize
    }

    /// Number of face slots, including tombstoned ones.
    pub fn size_all_faces(&self) -> hsize {
        self.f_halfedge.len() as hsize
    }

    /// Number of edge slots, including tombstoned ones.
    pub fn size_all_edges(&self) -> hsize {
        self.size_all_halfedges() / 2
    }

    /// Number of half-edge slots, including tombstoned ones.
    pub fn size_all_halfedges(&self) -> hsize {
        self.h_target.len() as hsize
    }

    /// Whether the mesh has no tombstoned slots, i.e. all indices are dense.
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Whether `vh` refers to a live (in range and not tombstoned) vertex.
    pub fn contains_vertex(&self, vh: VertexHandle) -> bool {
        self.v_outgoing.get(vh.to_usize()).map_or(false, |c| !c.is_tomb())
    }

    /// Whether `fh` refers to a live face.
    pub fn contains_face(&self, fh: FaceHandle) -> bool {
        self.f_halfedge.get(fh.to_usize()).map_or(false, |c| !c.is_tomb())
    }

    /// Whether `eh` refers to a live edge.
    pub fn contains_edge(&self, eh: EdgeHandle) -> bool {
        self.contains_halfedge(eh.lower_half())
    }

    /// Whether `hh` refers to a live half-edge.
    pub fn contains_halfedge(&self, hh: HalfEdgeHandle) -> bool {
        self.h_target.get(hh.to_usize()).map_or(false, |c| !c.is_tomb())
    }

    // =======================================================================
    // ===== Contract checks
    // =======================================================================
    //
    // Passing a dead or out of range handle to a mesh operation is a caller
    // error and fails fast.

    pub(crate) fn check_vertex(&self, vh: VertexHandle) {
        if !self.contains_vertex(vh) {
            panic!("{:?} does not refer to a live vertex of this mesh", vh);
        }
    }

    pub(crate) fn check_face(&self, fh: FaceHandle) {
        if !self.contains_face(fh) {
            panic!("{:?} does not refer to a live face of this mesh", fh);
        }
    }

    pub(crate) fn check_edge(&self, eh: EdgeHandle) {
        if !self.contains_edge(eh) {
            panic!("{:?} does not refer to a live edge of this mesh", eh);
        }
    }

    pub(crate) fn check_halfedge(&self, hh: HalfEdgeHandle) {
        if !self.contains_halfedge(hh) {
            panic!("{:?} does not refer to a live half-edge of this mesh", hh);
        }
    }

    // =======================================================================
    // ===== Raw slot access (no liveness checks)
    // =======================================================================

    #[inline(always)]
    pub(crate) fn target_of(&self, hh: HalfEdgeHandle) -> VertexHandle {
        self.h_target[hh.to_usize()].unwrap()
    }

    #[inline(always)]
    pub(crate) fn next_of(&self, hh: HalfEdgeHandle) -> HalfEdgeHandle {
        self.h_next[hh.to_usize()].unwrap()
    }

    #[inline(always)]
    pub(crate) fn prev_of(&self, hh: HalfEdgeHandle) -> HalfEdgeHandle {
        self.h_prev[hh.to_usize()].unwrap()
    }

    #[inline(always)]
    pub(crate) fn face_cell_of(&self, hh: HalfEdgeHandle) -> Option<FaceHandle> {
        self.h_face[hh.to_usize()].to_option()
    }

    #[inline(always)]
    pub(crate) fn outgoing_cell_of(&self, vh: VertexHandle) -> Option<HalfEdgeHandle> {
        self.v_outgoing[vh.to_usize()].to_option()
    }

    #[inline(always)]
    pub(crate) fn halfedge_cell_of(&self, fh: FaceHandle) -> HalfEdgeHandle {
        self.f_halfedge[fh.to_usize()].unwrap()
    }

    #[inline(always)]
    pub(crate) fn set_target(&mut self, hh: HalfEdgeHandle, vh: VertexHandle) {
        self.h_target[hh.to_usize()] = Cell::some(vh);
    }

    #[inline(always)]
    pub(crate) fn set_face(&mut self, hh: HalfEdgeHandle, fh: Option<FaceHandle>) {
        self.h_face[hh.to_usize()] = fh.into();
    }

    #[inline(always)]
    pub(crate) fn set_outgoing(&mut self, vh: VertexHandle, hh: Option<HalfEdgeHandle>) {
        self.v_outgoing[vh.to_usize()] = hh.into();
    }

    #[inline(always)]
    pub(crate) fn set_face_halfedge(&mut self, fh: FaceHandle, hh: HalfEdgeHandle) {
        self.f_halfedge[fh.to_usize()] = Cell::some(hh);
    }

    /// Makes `a` and `b` consecutive: `next(a) = b` and `prev(b) = a`. The
    /// two links always have to be set together.
    #[inline(always)]
    pub(crate) fn connect(&mut self, a: HalfEdgeHandle, b: HalfEdgeHandle) {
        self.h_next[a.to_usize()] = Cell::some(b);
        self.h_prev[b.to_usize()] = Cell::some(a);
    }

    /// Whether the half-edge carries no face. Free half-edges are where new
    /// faces can be inserted.
    #[inline(always)]
    pub(crate) fn is_free(&self, hh: HalfEdgeHandle) -> bool {
        self.h_face[hh.to_usize()].is_none()
    }

    // =======================================================================
    // ===== Read access
    // =======================================================================

    /// The vertex this half-edge points to.
    pub fn to_vertex(&self, hh: HalfEdgeHandle) -> VertexHandle {
        self.check_halfedge(hh);
        self.target_of(hh)
    }

    /// The vertex this half-edge points away from.
    pub fn from_vertex(&self, hh: HalfEdgeHandle) -> VertexHandle {
        self.check_halfedge(hh);
        self.target_of(hh.opposite())
    }

    /// The next half-edge in this half-edge's (face or boundary) ring.
    pub fn next(&self, hh: HalfEdgeHandle) -> HalfEdgeHandle {
        self.check_halfedge(hh);
        self.next_of(hh)
    }

    /// The previous half-edge in this half-edge's ring.
    pub fn prev(&self, hh: HalfEdgeHandle) -> HalfEdgeHandle {
        self.check_halfedge(hh);
        self.prev_of(hh)
    }

    /// The face this half-edge belongs to, or `None` for boundary half-edges.
    pub fn face_of(&self, hh: HalfEdgeHandle) -> Option<FaceHandle> {
        self.check_halfedge(hh);
        self.face_cell_of(hh)
    }

    /// One half-edge of the face's ring.
    pub fn halfedge_of(&self, fh: FaceHandle) -> HalfEdgeHandle {
        self.check_face(fh);
        self.halfedge_cell_of(fh)
    }

    /// One outgoing half-edge of the vertex, or `None` if it is isolated.
    ///
    /// If the vertex has any boundary outgoing half-edge, the returned one is
    /// a boundary half-edge.
    pub fn outgoing_halfedge(&self, vh: VertexHandle) -> Option<HalfEdgeHandle> {
        self.check_vertex(vh);
        self.outgoing_cell_of(vh)
    }

    /// Whether the vertex has no incident edges.
    pub fn is_isolated(&self, vh: VertexHandle) -> bool {
        self.check_vertex(vh);
        self.v_outgoing[vh.to_usize()].is_none()
    }

    /// Whether the half-edge carries no face.
    pub fn is_boundary_halfedge(&self, hh: HalfEdgeHandle) -> bool {
        self.check_halfedge(hh);
        self.is_free(hh)
    }

    /// Whether either half of the edge carries no face.
    pub fn is_boundary_edge(&self, eh: EdgeHandle) -> bool {
        self.check_edge(eh);
        let [ha, hb] = eh.halfedges();
        self.is_free(ha) || self.is_free(hb)
    }

    /// Whether the vertex is isolated or has a boundary outgoing half-edge.
    /// O(1) thanks to the boundary-first reference invariant.
    pub fn is_boundary_vertex(&self, vh: VertexHandle) -> bool {
        self.check_vertex(vh);
        match self.outgoing_cell_of(vh) {
            None => true,
            Some(out) => self.is_free(out),
        }
    }

    /// Whether any half-edge of the face's ring has a boundary twin. O(1)
    /// thanks to the boundary-first reference invariant.
    pub fn is_boundary_face(&self, fh: FaceHandle) -> bool {
        self.check_face(fh);
        self.is_free(self.halfedge_cell_of(fh).opposite())
    }

    /// Searches the half-edge pointing from `from` to `to` by rotating around
    /// `from`. `None` if the two vertices are not connected.
    pub fn halfedge_between(
        &self,
        from: VertexHandle,
        to: VertexHandle,
    ) -> Option<HalfEdgeHandle> {
        self.check_vertex(from);
        self.check_vertex(to);
        self.find_outgoing(from, |hh| self.target_of(hh) == to)
    }

    /// Searches the edge connecting the two vertices.
    pub fn edge_between(&self, a: VertexHandle, b: VertexHandle) -> Option<EdgeHandle> {
        self.halfedge_between(a, b).map(|hh| hh.edge())
    }

    /// Number of edges incident to the vertex.
    pub fn valence(&self, vh: VertexHandle) -> hsize {
        self.check_vertex(vh);
        let mut count = 0;
        self.rotate_around(vh, |_| {
            count += 1;
            false
        });
        count
    }

    /// Number of half-edges (= vertices) of the face's ring.
    pub fn degree(&self, fh: FaceHandle) -> hsize {
        self.check_face(fh);
        let start = self.halfedge_cell_of(fh);
        let mut count = 1;
        let mut hh = self.next_of(start);
        while hh != start {
            count += 1;
            hh = self.next_of(hh);
        }
        count
    }

    /// Visits all outgoing half-edges of `vh` in rotation order (`h ↦
    /// opposite(next(h))`), stopping early when `visit` returns `true`.
    #[inline(always)]
    pub(crate) fn rotate_around(
        &self,
        vh: VertexHandle,
        mut visit: impl FnMut(HalfEdgeHandle) -> bool,
    ) {
        if let Some(start) = self.outgoing_cell_of(vh) {
            let mut hh = start;
            loop {
                if visit(hh) {
                    return;
                }
                hh = self.next_of(hh.opposite());
                if hh == start {
                    return;
                }
            }
        }
    }

    /// Finds the first outgoing half-edge of `vh` satisfying `pred`.
    pub(crate) fn find_outgoing(
        &self,
        vh: VertexHandle,
        mut pred: impl FnMut(HalfEdgeHandle) -> bool,
    ) -> Option<HalfEdgeHandle> {
        let mut found = None;
        self.rotate_around(vh, |hh| {
            if pred(hh) {
                found = Some(hh);
                true
            } else {
                false
            }
        });
        found
    }

    // =======================================================================
    // ===== Allocation
    // =======================================================================

    /// Adds a new isolated vertex and returns its handle.
    pub fn add_vertex(&mut self) -> VertexHandle {
        let vh = VertexHandle::from_usize(self.v_outgoing.len());
        self.v_outgoing.push(Cell::none());
        self.vertex_attrs.notify_resize(self.v_outgoing.len());
        vh
    }

    /// Appends a face slot referring to `hh`. Attributes are notified before
    /// the handle is handed out.
    pub(crate) fn alloc_face(&mut self, hh: HalfEdgeHandle) -> FaceHandle {
        let fh = FaceHandle::from_usize(self.f_halfedge.len());
        self.f_halfedge.push(Cell::some(hh));
        self.face_attrs.notify_resize(self.f_halfedge.len());
        fh
    }

    /// Appends an edge (= two half-edge slots) from `from` to `to` with no
    /// face and dangling `next`/`prev` links. The caller has to connect the
    /// links before the operation returns. Returns the half-edge pointing to
    /// `to`.
    pub(crate) fn alloc_edge(
        &mut self,
        from: VertexHandle,
        to: VertexHandle,
    ) -> HalfEdgeHandle {
        let hh = HalfEdgeHandle::from_usize(self.h_target.len());
        self.h_target.push(Cell::some(to));
        self.h_target.push(Cell::some(from));
        for _ in 0..2 {
            self.h_face.push(Cell::none());
            self.h_next.push(Cell::none());
            self.h_prev.push(Cell::none());
        }

        self.halfedge_attrs.notify_resize(self.h_target.len());
        self.edge_attrs.notify_resize(self.h_target.len() / 2);
        hh
    }

    // =======================================================================
    // ===== Attribute creation
    // =======================================================================

    /// Creates a vertex attribute buffer filled with (and defaulting to)
    /// `default`, registered with this mesh.
    pub fn create_vertex_attr<T: Clone + 'static>(&self, default: T) -> Attr<attr::Vertex, T> {
        Attr::new(self, default)
    }

    /// Creates a face attribute buffer. See [`Mesh::create_vertex_attr`].
    pub fn create_face_attr<T: Clone + 'static>(&self, default: T) -> Attr<attr::Face, T> {
        Attr::new(self, default)
    }

    /// Creates an edge attribute buffer. See [`Mesh::create_vertex_attr`].
    pub fn create_edge_attr<T: Clone + 'static>(&self, default: T) -> Attr<attr::Edge, T> {
        Attr::new(self, default)
    }

    /// Creates a half-edge attribute buffer. See [`Mesh::create_vertex_attr`].
    pub fn create_halfedge_attr<T: Clone + 'static>(
        &self,
        default: T,
    ) -> Attr<attr::HalfEdge, T> {
        Attr::new(self, default)
    }

    // =======================================================================
    // ===== Whole-mesh operations
    // =======================================================================

    /// Removes everything from the mesh. All element slots are tombstoned and
    /// immediately compacted, so all sizes are 0 afterwards and registered
    /// attributes are emptied.
    pub fn clear(&mut self) {
        debug!(
            "clearing mesh ({} vertices, {} faces, {} edges)",
            self.size_vertices(),
            self.size_faces(),
            self.size_edges(),
        );

        for cell in &mut self.v_outgoing {
            *cell = Cell::tomb();
        }
        for cell in &mut self.f_halfedge {
            *cell = Cell::tomb();
        }
        for cell in &mut self.h_target {
            *cell = Cell::tomb();
        }
        self.removed_vertices = self.size_all_vertices();
        self.removed_faces = self.size_all_faces();
        self.removed_halfedges = self.size_all_halfedges();
        self.compact = self.v_outgoing.is_empty()
            && self.f_halfedge.is_empty()
            && self.h_target.is_empty();

        self.compactify();
    }

    /// Overwrites this mesh with a copy of `other`'s connectivity.
    ///
    /// This mesh's own registered attributes stay registered and are resized
    /// to the new element counts (keeping values where slots persist,
    /// default-filling new slots); `other`'s attributes are unaffected.
    pub fn copy_from(&mut self, other: &Mesh) {
        self.v_outgoing = other.v_outgoing.clone();
        self.f_halfedge = other.f_halfedge.clone();
        self.h_target = other.h_target.clone();
        self.h_face = other.h_face.clone();
        self.h_next = other.h_next.clone();
        self.h_prev = other.h_prev.clone();
        self.removed_vertices = other.removed_vertices;
        self.removed_faces = other.removed_faces;
        self.removed_halfedges = other.removed_halfedges;
        self.compact = other.compact;

        self.vertex_attrs.notify_resize(self.v_outgoing.len());
        self.face_attrs.notify_resize(self.f_halfedge.len());
        self.halfedge_attrs.notify_resize(self.h_target.len());
        self.edge_attrs.notify_resize(self.h_target.len() / 2);
    }

    pub(crate) fn mark_face_removed(&mut self, fh: FaceHandle) {
        self.f_halfedge[fh.to_usize()] = Cell::tomb();
        self.removed_faces += 1;
        self.compact = false;
    }

    pub(crate) fn mark_edge_removed(&mut self, eh: EdgeHandle) {
        for hh in eh.halfedges().iter() {
            let i = hh.to_usize();
            self.h_target[i] = Cell::tomb();
            self.h_face[i] = Cell::tomb();
            self.h_next[i] = Cell::tomb();
            self.h_prev[i] = Cell::tomb();
        }
        self.removed_halfedges += 2;
        self.compact = false;
    }

    pub(crate) fn mark_vertex_removed(&mut self, vh: VertexHandle) {
        self.v_outgoing[vh.to_usize()] = Cell::tomb();
        self.removed_vertices += 1;
        self.compact = false;
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// The clone starts with empty attribute registries: attribute buffers stay
/// bound to the mesh they were created on. Use [`Mesh::copy_from`] to reuse a
/// mesh together with its attributes.
impl Clone for Mesh {
    fn clone(&self) -> Self {
        Self {
            v_outgoing: self.v_outgoing.clone(),
            f_halfedge: self.f_halfedge.clone(),
            h_target: self.h_target.clone(),
            h_face: self.h_face.clone(),
            h_next: self.h_next.clone(),
            h_prev: self.h_prev.clone(),
            removed_vertices: self.removed_vertices,
            removed_faces: self.removed_faces,
            removed_halfedges: self.removed_halfedges,
            compact: self.compact,
            vertex_attrs: Registry::new(),
            face_attrs: Registry::new(),
            edge_attrs: Registry::new(),
            halfedge_attrs: Registry::new(),
        }
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("vertices", &self.v_outgoing)
            .field("faces", &self.f_halfedge)
            .field("halfedge_targets", &self.h_target)
            .field("halfedge_faces", &self.h_face)
            .field("halfedge_next", &self.h_next)
            .field("halfedge_prev", &self.h_prev)
            .finish()
    }
}


// ===========================================================================
// ===== Handle iterators
// ===========================================================================

/// An iterator over handles of one element kind, in increasing index order.
///
/// Returned by [`Mesh::vertices`], [`Mesh::all_vertices`] and their siblings
/// for the other element kinds.
#[derive(Clone)]
pub struct Handles<'a, K: ElementKind> {
    mesh: &'a Mesh,
    current: hsize,
    end: hsize,
    live_only: bool,
    _kind: std::marker::PhantomData<K>,
}

impl<'a, K: ElementKind> Handles<'a, K> {
    fn new(mesh: &'a Mesh, live_only: bool) -> Self {
        Self {
            mesh,
            current: 0,
            end: K::size_all(mesh),
            live_only,
            _kind: std::marker::PhantomData,
        }
    }
}

impl<K: ElementKind> Iterator for Handles<'_, K>
where
    Mesh: ContainsHandle<K::Handle>,
{
    type Item = K::Handle;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current < self.end {
            let handle = K::Handle::new(self.current);
            self.current += 1;
            if !self.live_only || self.mesh.contains_handle(handle) {
                return Some(handle);
            }
        }
        None
    }
}

impl<K: ElementKind> fmt::Debug for Handles<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handles({}..{})", self.current, self.end)
    }
}

/// Liveness query dispatched by handle type, backing [`Handles`].
pub trait ContainsHandle<H: Handle> {
    fn contains_handle(&self, handle: H) -> bool;
}

macro_rules! impl_handle_iters {
    ($kind:ty, $handle:ident, $contains:ident, $live:ident, $all:ident,
     $live_doc:expr, $all_doc:expr) => {
        impl ContainsHandle<$handle> for Mesh {
            fn contains_handle(&self, handle: $handle) -> bool {
                self.$contains(handle)
            }
        }

        impl Mesh {
            #[doc = $live_doc]
            pub fn $live(&self) -> Handles<'_, $kind> {
                Handles::new(self, true)
            }

            #[doc = $all_doc]
            pub fn $all(&self) -> Handles<'_, $kind> {
                Handles::new(self, false)
            }
        }
    }
}

impl_handle_iters!(
    attr::Vertex, VertexHandle, contains_vertex, vertices, all_vertices,
    "Iterates over the handles of all live vertices.",
    "Iterates over all vertex slots, including tombstoned ones."
);
impl_handle_iters!(
    attr::Face, FaceHandle, contains_face, faces, all_faces,
    "Iterates over the handles of all live faces.",
    "Iterates over all face slots, including tombstoned ones."
);
impl_handle_iters!(
    attr::Edge, EdgeHandle, contains_edge, edges, all_edges,
    "Iterates over the handles of all live edges.",
    "Iterates over all edge slots, including tombstoned ones."
);
impl_handle_iters!(
    attr::HalfEdge, HalfEdgeHandle, contains_halfedge, halfedges, all_halfedges,
    "Iterates over the handles of all live half-edges.",
    "Iterates over all half-edge slots, including tombstoned ones."
);
