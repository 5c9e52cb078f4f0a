//! Geometric properties derived from a vertex position attribute.
//!
//! The mesh itself stores connectivity only; positions live in a
//! [`VertexAttr`] owned by the caller. The functions here combine both to
//! compute lengths, centroids, areas and normals. Faces of degree > 3 are
//! handled by fanning, which is exact for planar convex polygons.

use cgmath::{BaseFloat, Point3, Vector3, EuclideanSpace, InnerSpace, Zero};
use num_traits::cast;

use crate::attr::VertexAttr;
use crate::handle::{VertexHandle, FaceHandle, EdgeHandle};
use crate::mesh::Mesh;


/// Types usable as a 3D position, generic over the scalar.
///
/// Implemented for `cgmath::Point3<S>` and `[S; 3]`, so position buffers can
/// use either representation.
pub trait Pos3Like: Copy {
    type Scalar: BaseFloat;

    fn x(&self) -> Self::Scalar;
    fn y(&self) -> Self::Scalar;
    fn z(&self) -> Self::Scalar;

    fn to_point3(&self) -> Point3<Self::Scalar> {
        Point3::new(self.x(), self.y(), self.z())
    }
}

impl<S: BaseFloat> Pos3Like for Point3<S> {
    type Scalar = S;

    fn x(&self) -> S { self.x }
    fn y(&self) -> S { self.y }
    fn z(&self) -> S { self.z }
}

impl<S: BaseFloat> Pos3Like for [S; 3] {
    type Scalar = S;

    fn x(&self) -> S { self[0] }
    fn y(&self) -> S { self[1] }
    fn z(&self) -> S { self[2] }
}


/// Length of the edge.
pub fn edge_length<P: Pos3Like>(
    mesh: &Mesh,
    positions: &VertexAttr<P>,
    eh: EdgeHandle,
) -> P::Scalar {
    let [a, b] = mesh.edge(eh).endpoints();
    let pa = positions.get(a.handle()).to_point3();
    let pb = positions.get(b.handle()).to_point3();
    (pb - pa).magnitude()
}

/// Arithmetic mean of the face's corner positions.
pub fn face_centroid<P: Pos3Like>(
    mesh: &Mesh,
    positions: &VertexAttr<P>,
    fh: FaceHandle,
) -> Point3<P::Scalar> {
    let mut sum = Vector3::zero();
    let mut count = 0;
    for v in mesh.face(fh).vertices() {
        sum += positions.get(v.handle()).to_point3().to_vec();
        count += 1;
    }

    let n = scalar_from_count::<P::Scalar>(count);
    Point3::from_vec(sum / n)
}

/// Twice the vector area of the face: the sum of cross products of a triangle
/// fan from its first corner. For planar faces this is orthogonal to the face
/// plane with magnitude `2 * area`.
fn vector_area2<P: Pos3Like>(
    mesh: &Mesh,
    positions: &VertexAttr<P>,
    fh: FaceHandle,
) -> Vector3<P::Scalar> {
    let mut corners = mesh.face(fh).vertices();
    // Faces always have at least 3 corners.
    let first = corners.next().map(|v| positions.get(v.handle()).to_point3());
    let anchor = match first {
        Some(p) => p,
        None => return Vector3::zero(),
    };

    let mut sum = Vector3::zero();
    let mut prev: Option<Point3<P::Scalar>> = None;
    for v in corners {
        let p = positions.get(v.handle()).to_point3();
        if let Some(q) = prev {
            sum += (q - anchor).cross(p - anchor);
        }
        prev = Some(p);
    }
    sum
}

/// Area of the (planar) face.
pub fn face_area<P: Pos3Like>(
    mesh: &Mesh,
    positions: &VertexAttr<P>,
    fh: FaceHandle,
) -> P::Scalar {
    let two = scalar_from_count::<P::Scalar>(2);
    vector_area2(mesh, positions, fh).magnitude() / two
}

/// Unit normal of the (planar) face, oriented by its ring direction.
pub fn face_normal<P: Pos3Like>(
    mesh: &Mesh,
    positions: &VertexAttr<P>,
    fh: FaceHandle,
) -> Vector3<P::Scalar> {
    vector_area2(mesh, positions, fh).normalize()
}

/// Arithmetic mean of the positions of the vertex's neighbors, or `None` for
/// isolated vertices. The basis of Laplacian smoothing.
pub fn vertex_centroid<P: Pos3Like>(
    mesh: &Mesh,
    positions: &VertexAttr<P>,
    vh: VertexHandle,
) -> Option<Point3<P::Scalar>> {
    let mut sum = Vector3::zero();
    let mut count = 0;
    for v in mesh.vertex(vh).adjacent_vertices() {
        sum += positions.get(v.handle()).to_point3().to_vec();
        count += 1;
    }

    if count == 0 {
        None
    } else {
        let n = scalar_from_count::<P::Scalar>(count);
        Some(Point3::from_vec(sum / n))
    }
}

// Counts in this module are tiny, the cast to float never fails.
fn scalar_from_count<S: BaseFloat>(count: usize) -> S {
    match cast(count) {
        Some(n) => n,
        None => panic!("element count not representable as scalar"),
    }
}


#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cgmath::{Point3, Vector3};

    use crate::handle::Handle;
    use crate::mesh::Mesh;
    use super::*;

    fn triangle() -> (Mesh, VertexAttr<Point3<f32>>, FaceHandle) {
        let mut mesh = Mesh::new();
        let va = mesh.add_vertex();
        let vb = mesh.add_vertex();
        let vc = mesh.add_vertex();
        let positions = mesh.create_vertex_attr(Point3::new(0.0f32, 0.0, 0.0));
        positions.set(va, Point3::new(0.0, 0.0, 0.0));
        positions.set(vb, Point3::new(2.0, 0.0, 0.0));
        positions.set(vc, Point3::new(0.0, 2.0, 0.0));
        let f = mesh.add_face(&[va, vb, vc]);
        (mesh, positions, f)
    }

    #[test]
    fn triangle_properties() {
        let (mesh, positions, f) = triangle();

        assert_relative_eq!(face_area(&mesh, &positions, f), 2.0);
        assert_relative_eq!(
            face_normal(&mesh, &positions, f),
            Vector3::new(0.0, 0.0, 1.0),
        );
        let centroid = face_centroid(&mesh, &positions, f);
        assert_relative_eq!(centroid, Point3::new(2.0 / 3.0, 2.0 / 3.0, 0.0));
    }

    #[test]
    fn edge_lengths() {
        let (mesh, positions, _) = triangle();

        let a = VertexHandle::new(0);
        let b = VertexHandle::new(1);
        let c = VertexHandle::new(2);
        let ab = mesh.edge_between(a, b).unwrap();
        let bc = mesh.edge_between(b, c).unwrap();
        assert_relative_eq!(edge_length(&mesh, &positions, ab), 2.0);
        assert_relative_eq!(edge_length(&mesh, &positions, bc), 8.0f32.sqrt());
    }

    #[test]
    fn centroid_of_neighbors() {
        let (mesh, positions, _) = triangle();

        let a = VertexHandle::new(0);
        let centroid = vertex_centroid(&mesh, &positions, a).unwrap();
        assert_relative_eq!(centroid, Point3::new(1.0, 1.0, 0.0));

        let mut mesh = Mesh::new();
        let lone = mesh.add_vertex();
        let positions = mesh.create_vertex_attr(Point3::new(0.0f32, 0.0, 0.0));
        assert_eq!(vertex_centroid(&mesh, &positions, lone), None);
    }
}
