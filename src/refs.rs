//! Element references: a handle paired with its mesh, for ergonomic
//! navigation.
//!
//! Obtained via [`Mesh::vertex`], [`Mesh::face`], [`Mesh::edge`] and
//! [`Mesh::halfedge`]. All navigation methods of the handle-based API are
//! mirrored here without having to pass the mesh around.

use crate::handle::{
    hsize, VertexHandle, FaceHandle, EdgeHandle, HalfEdgeHandle,
};
use crate::mesh::Mesh;


impl Mesh {
    /// Returns a reference to the given live vertex.
    pub fn vertex(&self, handle: VertexHandle) -> VertexRef<'_> {
        self.check_vertex(handle);
        VertexRef { mesh: self, handle }
    }

    /// Returns a reference to the given live face.
    pub fn face(&self, handle: FaceHandle) -> FaceRef<'_> {
        self.check_face(handle);
        FaceRef { mesh: self, handle }
    }

    /// Returns a reference to the given live edge.
    pub fn edge(&self, handle: EdgeHandle) -> EdgeRef<'_> {
        self.check_edge(handle);
        EdgeRef { mesh: self, handle }
    }

    /// Returns a reference to the given live half-edge.
    pub fn halfedge(&self, handle: HalfEdgeHandle) -> HalfEdgeRef<'_> {
        self.check_halfedge(handle);
        HalfEdgeRef { mesh: self, handle }
    }
}


/// A vertex plus the mesh it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct VertexRef<'a> {
    mesh: &'a Mesh,
    handle: VertexHandle,
}

impl<'a> VertexRef<'a> {
    pub fn handle(&self) -> VertexHandle {
        self.handle
    }

    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    /// Whether this vertex has no incident edges.
    pub fn is_isolated(&self) -> bool {
        self.mesh.is_isolated(self.handle)
    }

    /// Whether this vertex lies on a boundary (or is isolated).
    pub fn is_boundary(&self) -> bool {
        self.mesh.is_boundary_vertex(self.handle)
    }

    /// Number of incident edges.
    pub fn valence(&self) -> hsize {
        self.mesh.valence(self.handle)
    }

    /// One outgoing half-edge, or `None` if the vertex is isolated.
    pub fn outgoing(&self) -> Option<HalfEdgeRef<'a>> {
        self.mesh
            .outgoing_halfedge(self.handle)
            .map(|handle| HalfEdgeRef { mesh: self.mesh, handle })
    }

    /// Iterates over all outgoing half-edges, in rotation order.
    pub fn outgoing_halfedges(&self) -> VertexCirculator<'a> {
        match self.mesh.outgoing_halfedge(self.handle) {
            None => VertexCirculator::Empty,
            Some(start) => VertexCirculator::NonEmpty {
                mesh: self.mesh,
                current: start,
                start,
            },
        }
    }

    /// Iterates over all neighbor vertices, in rotation order.
    pub fn adjacent_vertices(&self) -> impl Iterator<Item = VertexRef<'a>> {
        let mesh = self.mesh;
        self.outgoing_halfedges().map(move |he| VertexRef {
            mesh,
            handle: mesh.to_vertex(he.handle),
        })
    }

    /// Iterates over all adjacent faces, in rotation order. Boundary gaps
    /// are skipped, so a face lying on both sides of a gap shows up twice.
    pub fn adjacent_faces(&self) -> impl Iterator<Item = FaceRef<'a>> {
        let mesh = self.mesh;
        self.outgoing_halfedges().filter_map(move |he| {
            mesh.face_of(he.handle).map(|handle| FaceRef { mesh, handle })
        })
    }
}


/// A face plus the mesh it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct FaceRef<'a> {
    mesh: &'a Mesh,
    handle: FaceHandle,
}

impl<'a> FaceRef<'a> {
    pub fn handle(&self) -> FaceHandle {
        self.handle
    }

    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    /// Whether any edge of this face lies on a boundary.
    pub fn is_boundary(&self) -> bool {
        self.mesh.is_boundary_face(self.handle)
    }

    /// Number of vertices (= edges) of this face.
    pub fn degree(&self) -> hsize {
        self.mesh.degree(self.handle)
    }

    /// One half-edge of this face's ring.
    pub fn halfedge(&self) -> HalfEdgeRef<'a> {
        HalfEdgeRef {
            mesh: self.mesh,
            handle: self.mesh.halfedge_of(self.handle),
        }
    }

    /// Iterates over the half-edges of this face's ring, in ring order.
    pub fn halfedges(&self) -> FaceCirculator<'a> {
        let start = self.mesh.halfedge_of(self.handle);
        FaceCirculator {
            mesh: self.mesh,
            current: Some(start),
            start,
        }
    }

    /// Iterates over the vertices of this face, in ring order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexRef<'a>> {
        let mesh = self.mesh;
        self.halfedges().map(move |he| VertexRef {
            mesh,
            handle: mesh.to_vertex(he.handle),
        })
    }

    /// Iterates over the faces sharing an edge with this face, in ring order.
    /// Boundary edges contribute nothing.
    pub fn adjacent_faces(&self) -> impl Iterator<Item = FaceRef<'a>> {
        let mesh = self.mesh;
        self.halfedges().filter_map(move |he| {
            mesh.face_of(he.handle.opposite())
                .map(|handle| FaceRef { mesh, handle })
        })
    }
}


/// An edge plus the mesh it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct EdgeRef<'a> {
    mesh: &'a Mesh,
    handle: EdgeHandle,
}

impl<'a> EdgeRef<'a> {
    pub fn handle(&self) -> EdgeHandle {
        self.handle
    }

    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    /// Whether either side of this edge has no face.
    pub fn is_boundary(&self) -> bool {
        self.mesh.is_boundary_edge(self.handle)
    }

    /// Both half-edges of this edge.
    pub fn halfedges(&self) -> [HalfEdgeRef<'a>; 2] {
        let [a, b] = self.handle.halfedges();
        [
            HalfEdgeRef { mesh: self.mesh, handle: a },
            HalfEdgeRef { mesh: self.mesh, handle: b },
        ]
    }

    /// The two endpoint vertices.
    pub fn endpoints(&self) -> [VertexRef<'a>; 2] {
        let lower = self.handle.lower_half();
        [
            VertexRef { mesh: self.mesh, handle: self.mesh.to_vertex(lower) },
            VertexRef {
                mesh: self.mesh,
                handle: self.mesh.to_vertex(lower.opposite()),
            },
        ]
    }
}


/// A half-edge plus the mesh it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct HalfEdgeRef<'a> {
    mesh: &'a Mesh,
    handle: HalfEdgeHandle,
}

impl<'a> HalfEdgeRef<'a> {
    pub fn handle(&self) -> HalfEdgeHandle {
        self.handle
    }

    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    /// The vertex this half-edge points to.
    pub fn to(&self) -> VertexRef<'a> {
        VertexRef {
            mesh: self.mesh,
            handle: self.mesh.to_vertex(self.handle),
        }
    }

    /// The vertex this half-edge points away from.
    pub fn from(&self) -> VertexRef<'a> {
        VertexRef {
            mesh: self.mesh,
            handle: self.mesh.from_vertex(self.handle),
        }
    }

    /// This half-edge's twin.
    pub fn opposite(&self) -> HalfEdgeRef<'a> {
        HalfEdgeRef { mesh: self.mesh, handle: self.handle.opposite() }
    }

    /// The next half-edge in this half-edge's ring.
    pub fn next(&self) -> HalfEdgeRef<'a> {
        HalfEdgeRef { mesh: self.mesh, handle: self.mesh.next(self.handle) }
    }

    /// The previous half-edge in this half-edge's ring.
    pub fn prev(&self) -> HalfEdgeRef<'a> {
        HalfEdgeRef { mesh: self.mesh, handle: self.mesh.prev(self.handle) }
    }

    /// The face this half-edge belongs to, or `None` on the boundary.
    pub fn face(&self) -> Option<FaceRef<'a>> {
        self.mesh
            .face_of(self.handle)
            .map(|handle| FaceRef { mesh: self.mesh, handle })
    }

    /// The full edge this half-edge belongs to.
    pub fn edge(&self) -> EdgeRef<'a> {
        EdgeRef { mesh: self.mesh, handle: self.handle.edge() }
    }

    /// Whether this half-edge carries no face.
    pub fn is_boundary(&self) -> bool {
        self.mesh.is_boundary_halfedge(self.handle)
    }
}


// ===========================================================================
// ===== Circulators
// ===========================================================================

/// Iterator over the outgoing half-edges of one vertex, in rotation order.
#[derive(Clone, Debug)]
pub enum VertexCirculator<'a> {
    Empty,
    NonEmpty {
        mesh: &'a Mesh,
        current: HalfEdgeHandle,
        start: HalfEdgeHandle,
    },
}

impl<'a> Iterator for VertexCirculator<'a> {
    type Item = HalfEdgeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            VertexCirculator::Empty => None,
            VertexCirculator::NonEmpty { mesh, current, start } => {
                let out = HalfEdgeRef { mesh: *mesh, handle: *current };
                let next = mesh.next(current.opposite());
                if next == *start {
                    *self = VertexCirculator::Empty;
                } else {
                    *current = next;
                }
                Some(out)
            }
        }
    }
}

/// Iterator over the half-edges of one face's ring, in ring order.
#[derive(Clone, Debug)]
pub struct FaceCirculator<'a> {
    mesh: &'a Mesh,
    current: Option<HalfEdgeHandle>,
    start: HalfEdgeHandle,
}

impl<'a> Iterator for FaceCirculator<'a> {
    type Item = HalfEdgeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        let out = HalfEdgeRef { mesh: self.mesh, handle: current };
        let next = self.mesh.next(current);
        self.current = if next == self.start { None } else { Some(next) };
        Some(out)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Mesh, [VertexHandle; 3], FaceHandle) {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex();
        let b = mesh.add_vertex();
        let c = mesh.add_vertex();
        let f = mesh.add_face(&[a, b, c]);
        (mesh, [a, b, c], f)
    }

    #[test]
    fn navigation() {
        let (mesh, [a, b, _], f) = triangle();

        let ab = mesh.halfedge(mesh.halfedge_between(a, b).unwrap());
        assert_eq!(ab.from().handle(), a);
        assert_eq!(ab.to().handle(), b);
        assert_eq!(ab.face().unwrap().handle(), f);
        assert!(ab.opposite().is_boundary());
        assert_eq!(ab.next().next().next().handle(), ab.handle());
        assert_eq!(ab.prev().next().handle(), ab.handle());
        assert_eq!(ab.edge().endpoints()[0].mesh() as *const Mesh, &mesh as *const Mesh);
    }

    #[test]
    fn face_ring() {
        let (mesh, vs, f) = triangle();
        let face = mesh.face(f);

        assert_eq!(face.degree(), 3);
        assert!(face.is_boundary());
        assert_eq!(face.halfedges().count(), 3);

        let mut ring: Vec<_> = face.vertices().map(|v| v.handle()).collect();
        // The ring starts at an arbitrary corner; rotate to a fixed one.
        let pos = ring.iter().position(|&v| v == vs[0]).unwrap();
        ring.rotate_left(pos);
        assert_eq!(ring, vs);
    }

    #[test]
    fn vertex_circulators() {
        let (mesh, [a, b, c], f) = triangle();

        let vertex = mesh.vertex(a);
        assert_eq!(vertex.valence(), 2);
        assert_eq!(vertex.outgoing_halfedges().count(), 2);

        let neighbors: std::collections::BTreeSet<_> =
            vertex.adjacent_vertices().map(|v| v.handle()).collect();
        assert_eq!(neighbors, vec![b, c].into_iter().collect());

        let faces: Vec<_> = vertex.adjacent_faces().map(|f| f.handle()).collect();
        assert_eq!(faces, vec![f]);

        let mut lonely = Mesh::new();
        let v = lonely.add_vertex();
        assert_eq!(lonely.vertex(v).outgoing_halfedges().count(), 0);
        assert!(lonely.vertex(v).outgoing().is_none());
    }
}
