//! Scenario tests for the connectivity structure.
//!
//! Most tests build a small mesh, poke at it and then run
//! [`check_invariants`], which verifies the structural invariants the module
//! docs promise: twin pairing, `next`/`prev` inversion, ring consistency,
//! rotation completeness and the boundary-first references.

use std::collections::{BTreeMap, BTreeSet};

use crate::handle::{Handle, VertexHandle, FaceHandle, HalfEdgeHandle};
use super::Mesh;


/// Checks every structural invariant of the mesh, panicking on violation.
pub(crate) fn check_invariants(mesh: &Mesh) {
    // ----- Half-edge level checks ------------------------------------------
    for hh in mesh.halfedges() {
        assert!(
            mesh.contains_halfedge(hh.opposite()),
            "{:?} is live but its twin is not", hh,
        );
        assert!(mesh.contains_vertex(mesh.to_vertex(hh)));

        let next = mesh.next(hh);
        let prev = mesh.prev(hh);
        assert!(mesh.contains_halfedge(next));
        assert!(mesh.contains_halfedge(prev));
        assert_eq!(mesh.prev(next), hh, "next/prev not inverse at {:?}", hh);
        assert_eq!(mesh.next(prev), hh, "prev/next not inverse at {:?}", hh);

        // Consecutive ring half-edges chain through a shared vertex and
        // belong to the same face (or both to the boundary).
        assert_eq!(mesh.from_vertex(next), mesh.to_vertex(hh));
        assert_eq!(mesh.face_of(next), mesh.face_of(hh));
    }

    // ----- Face rings ------------------------------------------------------
    for fh in mesh.faces() {
        let start = mesh.halfedge_of(fh);
        assert_eq!(mesh.face_of(start), Some(fh));

        let mut ring = Vec::new();
        let mut hh = start;
        loop {
            ring.push(hh);
            assert!(
                ring.len() <= mesh.size_halfedges() as usize,
                "ring of {:?} does not close", fh,
            );
            hh = mesh.next(hh);
            if hh == start {
                break;
            }
        }

        assert!(ring.len() >= 3, "{:?} has degree < 3", fh);
        assert_eq!(ring.len() as u32, mesh.degree(fh));

        let has_boundary_edge = ring
            .iter()
            .any(|&hh| mesh.is_boundary_halfedge(hh.opposite()));
        assert_eq!(mesh.is_boundary_face(fh), has_boundary_edge);
        if has_boundary_edge {
            // Boundary-first: the stored ring half-edge has a free twin.
            assert!(mesh.is_boundary_halfedge(start.opposite()));
        }
    }

    // ----- Vertex rotations ------------------------------------------------
    let mut outgoing_of: BTreeMap<VertexHandle, BTreeSet<HalfEdgeHandle>> =
        BTreeMap::new();
    for hh in mesh.halfedges() {
        outgoing_of.entry(mesh.from_vertex(hh)).or_default().insert(hh);
    }

    for vh in mesh.vertices() {
        let expected = outgoing_of.remove(&vh).unwrap_or_default();
        assert_eq!(
            mesh.is_isolated(vh),
            expected.is_empty(),
            "isolation state of {:?} is wrong", vh,
        );

        let mut visited = BTreeSet::new();
        if let Some(start) = mesh.outgoing_halfedge(vh) {
            let mut hh = start;
            loop {
                assert_eq!(mesh.from_vertex(hh), vh);
                assert!(visited.insert(hh), "rotation of {:?} revisits {:?}", vh, hh);
                assert!(visited.len() <= expected.len());
                hh = mesh.next(hh.opposite());
                if hh == start {
                    break;
                }
            }
        }
        assert_eq!(
            visited, expected,
            "rotation of {:?} misses outgoing half-edges", vh,
        );

        let has_free = expected.iter().any(|&hh| mesh.is_boundary_halfedge(hh));
        assert_eq!(mesh.is_boundary_vertex(vh), has_free || expected.is_empty());
        if has_free {
            // Boundary-first: the stored outgoing half-edge is free.
            let out = mesh.outgoing_halfedge(vh).unwrap();
            assert!(mesh.is_boundary_halfedge(out));
        }
    }
    assert!(
        outgoing_of.is_empty(),
        "live half-edges start at dead vertices: {:?}", outgoing_of,
    );
}

fn vertices(mesh: &mut Mesh, count: usize) -> Vec<VertexHandle> {
    (0..count).map(|_| mesh.add_vertex()).collect()
}

/// A tetrahedron with all four faces, oriented consistently.
///
///          d
///        / | \
///       /  |  \
///      a --|-- c
///        \ | /
///          b
fn tetrahedron() -> (Mesh, Vec<VertexHandle>, Vec<FaceHandle>) {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 4);
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);
    let faces = vec![
        mesh.add_face(&[a, c, b]),
        mesh.add_face(&[a, b, d]),
        mesh.add_face(&[b, c, d]),
        mesh.add_face(&[a, d, c]),
    ];
    (mesh, vs, faces)
}

/// Two triangles sharing the edge `b -- c`:
///
///      a ----- b
///       \     / \
///        \   /   \
///         \ /     \
///          c ----- d
fn triangle_strip() -> (Mesh, Vec<VertexHandle>, Vec<FaceHandle>) {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 4);
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);
    let faces = vec![
        mesh.add_face(&[a, b, c]),
        mesh.add_face(&[d, c, b]),
    ];
    (mesh, vs, faces)
}


// ===========================================================================
// ===== Building up
// ===========================================================================

#[test]
fn empty_mesh() {
    let mesh = Mesh::new();
    assert_eq!(mesh.size_vertices(), 0);
    assert_eq!(mesh.size_faces(), 0);
    assert_eq!(mesh.size_edges(), 0);
    assert_eq!(mesh.size_halfedges(), 0);
    assert!(mesh.is_compact());
    assert_eq!(mesh.vertices().count(), 0);
    check_invariants(&mesh);
}

#[test]
fn isolated_vertices() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 3);

    assert_eq!(mesh.size_vertices(), 3);
    for &vh in &vs {
        assert!(mesh.contains_vertex(vh));
        assert!(mesh.is_isolated(vh));
        assert!(mesh.is_boundary_vertex(vh));
        assert_eq!(mesh.valence(vh), 0);
    }
    check_invariants(&mesh);
}

#[test]
fn single_edge() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 2);
    let (a, b) = (vs[0], vs[1]);

    let eh = mesh.add_or_get_edge(a, b);
    assert_eq!(mesh.size_edges(), 1);
    assert_eq!(mesh.size_halfedges(), 2);

    // Adding again is a no-op.
    assert_eq!(mesh.add_or_get_edge(a, b), eh);
    assert_eq!(mesh.add_or_get_edge(b, a), eh);
    assert_eq!(mesh.size_edges(), 1);

    let ab = mesh.halfedge_between(a, b).unwrap();
    let ba = mesh.halfedge_between(b, a).unwrap();
    assert_eq!(ab.opposite(), ba);
    assert_eq!(ab.edge(), eh);
    assert_eq!(mesh.to_vertex(ab), b);
    assert_eq!(mesh.from_vertex(ab), a);

    assert!(!mesh.is_isolated(a));
    assert_eq!(mesh.valence(a), 1);
    assert_eq!(mesh.valence(b), 1);
    assert!(mesh.is_boundary_edge(eh));
    check_invariants(&mesh);
}

#[test]
fn single_quad() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 4);

    let fh = mesh.add_face(&vs);

    assert_eq!(mesh.size_vertices(), 4);
    assert_eq!(mesh.size_faces(), 1);
    assert_eq!(mesh.size_edges(), 4);
    assert_eq!(mesh.size_halfedges(), 8);
    assert_eq!(mesh.degree(fh), 4);
    assert!(mesh.is_boundary_face(fh));

    for (i, &vh) in vs.iter().enumerate() {
        assert_eq!(mesh.valence(vh), 2);
        assert!(mesh.is_boundary_vertex(vh));
        let next = vs[(i + 1) % 4];
        let hh = mesh.halfedge_between(vh, next).unwrap();
        assert_eq!(mesh.face_of(hh), Some(fh));
        assert!(mesh.is_boundary_halfedge(hh.opposite()));
    }
    check_invariants(&mesh);
}

#[test]
fn triangle_strip_connectivity() {
    let (mesh, vs, faces) = triangle_strip();
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);

    assert_eq!(mesh.size_faces(), 2);
    assert_eq!(mesh.size_edges(), 5);

    let shared = mesh.edge_between(b, c).unwrap();
    assert!(!mesh.is_boundary_edge(shared));
    assert!(mesh.edge_between(a, d).is_none());

    assert_eq!(mesh.valence(a), 2);
    assert_eq!(mesh.valence(b), 3);
    assert_eq!(mesh.valence(c), 3);
    assert_eq!(mesh.valence(d), 2);

    // The half-edge b -> c belongs to the first face, its twin to the second.
    let bc = mesh.halfedge_between(b, c).unwrap();
    assert_eq!(mesh.face_of(bc), Some(faces[0]));
    assert_eq!(mesh.face_of(bc.opposite()), Some(faces[1]));
    check_invariants(&mesh);
}

#[test]
fn closed_tetrahedron() {
    let (mesh, vs, faces) = tetrahedron();

    assert_eq!(mesh.size_vertices(), 4);
    assert_eq!(mesh.size_faces(), 4);
    assert_eq!(mesh.size_edges(), 6);
    assert_eq!(mesh.size_halfedges(), 12);

    // A closed mesh has no boundary anywhere.
    for &vh in &vs {
        assert!(!mesh.is_boundary_vertex(vh));
        assert_eq!(mesh.valence(vh), 3);
    }
    for &fh in &faces {
        assert!(!mesh.is_boundary_face(fh));
        assert_eq!(mesh.degree(fh), 3);
    }
    for eh in mesh.edges() {
        assert!(!mesh.is_boundary_edge(eh));
    }
    check_invariants(&mesh);
}

#[test]
fn add_face_over_existing_edges() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 3);

    // Insert all edges first; the face has to reuse them.
    mesh.add_or_get_edge(vs[0], vs[1]);
    mesh.add_or_get_edge(vs[1], vs[2]);
    mesh.add_or_get_edge(vs[2], vs[0]);
    assert_eq!(mesh.size_edges(), 3);

    let fh = mesh.add_face(&vs);
    assert_eq!(mesh.size_edges(), 3);
    assert_eq!(mesh.degree(fh), 3);
    check_invariants(&mesh);
}

#[test]
fn add_face_at_shared_vertex_only() {
    // Two triangles touching in a single vertex. The rotation of that vertex
    // has two separate face fans, which splicing has to keep navigable.
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 5);
    let (a, b, c, d, e) = (vs[0], vs[1], vs[2], vs[3], vs[4]);

    mesh.add_face(&[a, b, c]);
    mesh.add_face(&[a, d, e]);

    assert_eq!(mesh.size_faces(), 2);
    assert_eq!(mesh.valence(a), 4);
    assert!(mesh.is_boundary_vertex(a));
    check_invariants(&mesh);
}

#[test]
fn refill_removed_face_hole() {
    // Filling the hole of a removed quad with a triangle fan reuses the
    // boundary ring half-edges one by one. Each insertion splices into the
    // ring at both shared vertices, so the ring has to stay closed after
    // every step.
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 4);
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);
    let quad = mesh.add_face(&[a, b, c, d]);
    mesh.remove_face(quad);
    check_invariants(&mesh);

    let v = mesh.add_vertex();
    mesh.add_face(&[a, b, v]);
    check_invariants(&mesh);
    mesh.add_face(&[b, c, v]);
    check_invariants(&mesh);
    mesh.add_face(&[c, d, v]);
    check_invariants(&mesh);
    mesh.add_face(&[d, a, v]);
    check_invariants(&mesh);

    assert_eq!(mesh.size_faces(), 4);
    assert_eq!(mesh.valence(v), 4);
    assert!(!mesh.is_boundary_vertex(v));
    for &vh in &vs {
        assert_eq!(mesh.valence(vh), 3);
    }
}

// ===========================================================================
// ===== Rejected insertions
// ===========================================================================

#[test]
fn can_add_face_basics() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 3);

    assert!(!mesh.can_add_face(&[]));
    assert!(!mesh.can_add_face(&vs[..2]));
    assert!(!mesh.can_add_face(&[vs[0], vs[0], vs[1]]));
    assert!(!mesh.can_add_face(&[vs[0], vs[1], VertexHandle::new(77)]));
    assert!(mesh.can_add_face(&vs));

    mesh.add_face(&vs);
    assert!(!mesh.can_add_face(&vs));
}

#[test]
#[should_panic(expected = "non-manifold edge")]
fn reject_third_face_on_edge() {
    let (mut mesh, vs, _) = triangle_strip();
    let (b, c) = (vs[1], vs[2]);
    let e = vertices(&mut mesh, 1)[0];

    // Both half-edges of b -- c already carry a face.
    assert!(!mesh.can_add_face(&[b, c, e]));
    mesh.add_face(&[b, c, e]);
}

#[test]
fn rejected_face_leaves_no_dangling_slot() {
    let (mut mesh, vs, _) = triangle_strip();
    let (b, c) = (vs[1], vs[2]);
    let e = mesh.add_vertex();

    // Build the chain by hand; `b -> c` already carries a face, so the
    // insertion has to be rejected without allocating a face slot.
    let bc = mesh.halfedge_between(b, c).unwrap();
    let ce = mesh.add_or_get_halfedge(c, e);
    let eb = mesh.add_or_get_halfedge(e, b);

    let attempt = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        mesh.add_face_halfedges(&[bc, ce, eb]);
    }));

    assert!(attempt.is_err());
    assert_eq!(mesh.size_faces(), 2);
    assert_eq!(mesh.size_all_faces(), 2);
    check_invariants(&mesh);
}

#[test]
#[should_panic(expected = "fully connected")]
fn reject_edge_at_interior_vertex() {
    // A fan closing around a center vertex leaves no free slot there.
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 4);
    let center = mesh.add_vertex();
    for (i, &vh) in vs.iter().enumerate() {
        let next = vs[(i + 1) % vs.len()];
        mesh.add_face(&[vh, next, center]);
    }
    assert!(!mesh.is_boundary_vertex(center));
    check_invariants(&mesh);

    let lone = mesh.add_vertex();
    mesh.add_or_get_edge(center, lone);
}

#[test]
#[should_panic(expected = "does not refer to a live vertex")]
fn reject_dead_handle() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 3);
    mesh.remove_vertex(vs[0]);
    mesh.add_or_get_edge(vs[0], vs[1]);
}

// ===========================================================================
// ===== Removal
// ===========================================================================

#[test]
fn remove_face_keeps_edges() {
    let (mut mesh, vs, faces) = triangle_strip();
    let (b, c) = (vs[1], vs[2]);

    mesh.remove_face(faces[0]);

    assert_eq!(mesh.size_faces(), 1);
    assert_eq!(mesh.size_edges(), 5);
    assert!(!mesh.contains_face(faces[0]));
    assert!(mesh.contains_face(faces[1]));
    assert!(!mesh.is_compact());

    // The shared edge is a boundary edge now.
    let shared = mesh.edge_between(b, c).unwrap();
    assert!(mesh.is_boundary_edge(shared));
    assert!(mesh.is_boundary_face(faces[1]));
    check_invariants(&mesh);
}

#[test]
fn remove_edge_removes_incident_faces() {
    let (mut mesh, vs, _) = triangle_strip();
    let (b, c) = (vs[1], vs[2]);

    let shared = mesh.edge_between(b, c).unwrap();
    mesh.remove_edge(shared);

    // Both faces die with the edge, the outer edges stay.
    assert_eq!(mesh.size_faces(), 0);
    assert_eq!(mesh.size_edges(), 4);
    assert_eq!(mesh.size_vertices(), 4);
    assert!(mesh.edge_between(b, c).is_none());
    check_invariants(&mesh);
}

#[test]
fn remove_last_edge_isolates_vertices() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 2);
    let eh = mesh.add_or_get_edge(vs[0], vs[1]);

    mesh.remove_edge(eh);

    assert_eq!(mesh.size_edges(), 0);
    assert!(mesh.is_isolated(vs[0]));
    assert!(mesh.is_isolated(vs[1]));
    check_invariants(&mesh);
}

#[test]
fn remove_vertex_cascades() {
    let (mut mesh, vs, faces) = tetrahedron();
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);

    mesh.remove_vertex(d);

    // Everything touching `d` is gone, the bottom triangle remains.
    assert_eq!(mesh.size_vertices(), 3);
    assert_eq!(mesh.size_faces(), 1);
    assert_eq!(mesh.size_edges(), 3);
    assert!(mesh.contains_face(faces[0]));
    assert!(!mesh.contains_vertex(d));
    for &vh in &[a, b, c] {
        assert!(mesh.is_boundary_vertex(vh));
        assert_eq!(mesh.valence(vh), 2);
    }
    check_invariants(&mesh);
}

// ===========================================================================
// ===== Splitting
// ===========================================================================

#[test]
fn split_halfedge_of_triangle() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 3);
    let fh = mesh.add_face(&vs);
    let ab = mesh.halfedge_between(vs[0], vs[1]).unwrap();

    let v = mesh.split_halfedge(ab);

    assert_eq!(mesh.size_vertices(), 4);
    assert_eq!(mesh.size_edges(), 4);
    assert_eq!(mesh.size_faces(), 1);
    assert_eq!(mesh.degree(fh), 4);
    assert_eq!(mesh.valence(v), 2);
    assert!(mesh.is_boundary_vertex(v));
    assert!(mesh.edge_between(vs[0], v).is_some());
    assert!(mesh.edge_between(v, vs[1]).is_some());
    assert!(mesh.edge_between(vs[0], vs[1]).is_none());
    check_invariants(&mesh);
}

#[test]
fn split_interior_edge() {
    let (mut mesh, vs, faces) = triangle_strip();
    let (b, c) = (vs[1], vs[2]);
    let shared = mesh.edge_between(b, c).unwrap();

    let v = mesh.split_edge(shared);

    // Both adjacent triangles become quads, nothing is destroyed.
    assert_eq!(mesh.size_faces(), 2);
    assert_eq!(mesh.size_vertices(), 5);
    assert_eq!(mesh.size_edges(), 6);
    assert_eq!(mesh.degree(faces[0]), 4);
    assert_eq!(mesh.degree(faces[1]), 4);
    assert_eq!(mesh.valence(v), 2);
    assert!(!mesh.is_boundary_vertex(v));
    check_invariants(&mesh);
}

#[test]
fn split_dangling_edge() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 2);
    let eh = mesh.add_or_get_edge(vs[0], vs[1]);

    let v = mesh.split_edge(eh);

    assert_eq!(mesh.size_edges(), 2);
    assert_eq!(mesh.valence(v), 2);
    assert!(mesh.edge_between(vs[0], vs[1]).is_none());
    check_invariants(&mesh);
}

#[test]
fn split_face_into_fan() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 4);
    let fh = mesh.add_face(&vs);

    let center = mesh.split_face(fh);

    assert_eq!(mesh.size_vertices(), 5);
    assert_eq!(mesh.size_faces(), 4);
    assert_eq!(mesh.size_edges(), 8);
    assert_eq!(mesh.valence(center), 4);
    assert!(!mesh.is_boundary_vertex(center));
    for fh in mesh.faces() {
        assert_eq!(mesh.degree(fh), 3);
    }
    for &vh in &vs {
        assert!(mesh.edge_between(vh, center).is_some());
    }
    check_invariants(&mesh);
}

// ===========================================================================
// ===== Collapsing
// ===========================================================================

#[test]
fn collapse_boundary_halfedge() {
    let (mut mesh, vs, _) = triangle_strip();
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);
    let ab = mesh.halfedge_between(a, b).unwrap();

    let kept = mesh.collapse_halfedge(ab);

    // `a` merges into `b`; its triangle degenerates and vanishes.
    assert_eq!(kept, b);
    assert!(!mesh.contains_vertex(a));
    assert_eq!(mesh.size_vertices(), 3);
    assert_eq!(mesh.size_faces(), 1);
    assert_eq!(mesh.size_edges(), 3);
    assert!(mesh.edge_between(b, c).is_some());
    assert!(mesh.edge_between(b, d).is_some());
    assert!(mesh.edge_between(c, d).is_some());
    check_invariants(&mesh);
}

#[test]
fn collapse_interior_edge() {
    // A quad strip of three faces; collapsing the interior edge merges the
    // middle column away and keeps the outer faces.
    //
    //      a --- b --- c --- d
    //      |     |     |     |
    //      e --- f --- g --- h
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 8);
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);
    let (e, f, g, h) = (vs[4], vs[5], vs[6], vs[7]);
    mesh.add_face(&[a, e, f, b]);
    mesh.add_face(&[b, f, g, c]);
    mesh.add_face(&[c, g, h, d]);

    let bf = mesh.halfedge_between(b, f).unwrap();
    let kept = mesh.collapse_halfedge(bf);

    assert_eq!(kept, f);
    assert!(!mesh.contains_vertex(b));
    assert_eq!(mesh.size_vertices(), 7);
    assert_eq!(mesh.size_faces(), 3);
    // The middle quads turned into triangles over `f`.
    assert!(mesh.edge_between(a, f).is_some());
    assert!(mesh.edge_between(f, c).is_some());
    check_invariants(&mesh);
}

// ===========================================================================
// ===== Rotating
// ===========================================================================

#[test]
fn rotate_edge_flips_diagonal() {
    let (mut mesh, vs, faces) = triangle_strip();
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);
    let shared = mesh.edge_between(b, c).unwrap();

    mesh.rotate_edge_next(shared);

    // The diagonal now connects the two opposite corners.
    assert!(mesh.edge_between(b, c).is_none());
    assert!(mesh.edge_between(a, d).is_some());
    assert_eq!(mesh.size_faces(), 2);
    assert_eq!(mesh.degree(faces[0]), 3);
    assert_eq!(mesh.degree(faces[1]), 3);
    assert_eq!(mesh.valence(a), 3);
    assert_eq!(mesh.valence(d), 3);
    assert_eq!(mesh.valence(b), 2);
    assert_eq!(mesh.valence(c), 2);
    check_invariants(&mesh);

    // Rotating backward undoes the flip.
    mesh.rotate_edge_prev(shared);
    assert!(mesh.edge_between(b, c).is_some());
    assert!(mesh.edge_between(a, d).is_none());
    assert_eq!(mesh.valence(b), 3);
    assert_eq!(mesh.valence(c), 3);
    check_invariants(&mesh);
}

#[test]
fn rotate_edge_in_closed_mesh() {
    let (mut mesh, vs, _) = tetrahedron();
    let (a, b, c, d) = (vs[0], vs[1], vs[2], vs[3]);

    // Flipping a -- b yields a second edge between c and d. Multi-edges are
    // representable, so the structure has to stay consistent.
    let ab = mesh.edge_between(a, b).unwrap();
    mesh.rotate_edge_next(ab);

    assert!(mesh.edge_between(a, b).is_none());
    assert_eq!(mesh.size_faces(), 4);
    assert_eq!(mesh.size_edges(), 6);
    assert_eq!(mesh.valence(a), 2);
    assert_eq!(mesh.valence(b), 2);
    check_invariants(&mesh);
}

#[test]
#[should_panic(expected = "boundary edge")]
fn reject_rotating_boundary_edge() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 3);
    mesh.add_face(&vs);
    let ab = mesh.edge_between(vs[0], vs[1]).unwrap();
    mesh.rotate_edge_next(ab);
}

#[test]
fn rotate_halfedge_tip() {
    // A quad and a triangle sharing the edge a -- b. Rotating the tip of
    // a -> b moves the shared edge to a -- c: the quad shrinks to a triangle
    // and the triangle grows to a quad.
    //
    //        e
    //       / \
    //      a---b
    //      |   |
    //      d---c
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 5);
    let (a, b, c, d, e) = (vs[0], vs[1], vs[2], vs[3], vs[4]);
    let quad = mesh.add_face(&[a, b, c, d]);
    let tri = mesh.add_face(&[b, a, e]);

    let ab = mesh.halfedge_between(a, b).unwrap();
    mesh.rotate_halfedge_next(ab);

    assert!(mesh.edge_between(a, b).is_none());
    assert!(mesh.edge_between(a, c).is_some());
    assert_eq!(mesh.degree(quad), 3);
    assert_eq!(mesh.degree(tri), 4);
    assert_eq!(mesh.size_faces(), 2);
    assert_eq!(mesh.size_edges(), 6);
    assert_eq!(mesh.valence(b), 2);
    assert_eq!(mesh.valence(a), 3);
    check_invariants(&mesh);

    // Rotating the tail backward undoes it.
    mesh.rotate_halfedge_prev(ab);
    assert!(mesh.edge_between(a, b).is_some());
    assert!(mesh.edge_between(a, c).is_none());
    assert_eq!(mesh.degree(quad), 4);
    assert_eq!(mesh.degree(tri), 3);
    check_invariants(&mesh);
}

// ===========================================================================
// ===== Compaction & permutation
// ===========================================================================

#[test]
fn compactify_after_removal() {
    let (mut mesh, vs, _) = tetrahedron();
    mesh.remove_vertex(vs[3]);
    assert!(!mesh.is_compact());

    mesh.compactify();

    assert!(mesh.is_compact());
    assert_eq!(mesh.size_vertices(), 3);
    assert_eq!(mesh.size_faces(), 1);
    assert_eq!(mesh.size_edges(), 3);
    assert_eq!(mesh.size_all_vertices(), 3);
    assert_eq!(mesh.size_all_faces(), 1);
    assert_eq!(mesh.size_all_edges(), 3);
    check_invariants(&mesh);

    // A second call is a no-op.
    mesh.compactify();
    assert_eq!(mesh.size_vertices(), 3);
    check_invariants(&mesh);
}

#[test]
fn compactify_preserves_order() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 5);
    let ids = mesh.create_vertex_attr(u32::max_value());
    for &vh in &vs {
        ids.set(vh, vh.idx());
    }

    mesh.remove_vertex(vs[1]);
    mesh.remove_vertex(vs[3]);
    mesh.compactify();

    // Live vertices slide down but keep their relative order, and the
    // attribute values travel with them.
    assert_eq!(ids.to_vec(), vec![0, 2, 4]);
}

#[test]
fn attributes_follow_compaction() {
    let (mut mesh, vs, _) = tetrahedron();

    // Tag every element with its original index.
    let v_ids = mesh.create_vertex_attr(u32::max_value());
    let f_ids = mesh.create_face_attr(u32::max_value());
    let e_ids = mesh.create_edge_attr(u32::max_value());
    let h_ids = mesh.create_halfedge_attr(u32::max_value());
    for vh in mesh.vertices() {
        v_ids.set(vh, vh.idx());
    }
    for fh in mesh.faces() {
        f_ids.set(fh, fh.idx());
    }
    for eh in mesh.edges() {
        e_ids.set(eh, eh.idx());
    }
    for hh in mesh.halfedges() {
        h_ids.set(hh, hh.idx());
    }

    // Remember who is connected to whom, by tag.
    let mut old_valences = BTreeMap::new();
    for vh in mesh.vertices() {
        old_valences.insert(v_ids.get(vh), mesh.valence(vh));
    }

    mesh.remove_vertex(vs[0]);
    mesh.compactify();
    check_invariants(&mesh);

    assert_eq!(v_ids.len(), 3);
    assert_eq!(f_ids.len(), 1);
    assert_eq!(e_ids.len(), 3);
    assert_eq!(h_ids.len(), 6);

    // Each surviving vertex kept its tag; its valence dropped by exactly one
    // (it lost the connection to the removed vertex).
    for vh in mesh.vertices() {
        let tag = v_ids.get(vh);
        assert_ne!(tag, 0, "removed vertex tag must not survive");
        assert_eq!(mesh.valence(vh), old_valences[&tag] - 1);
    }

    // Half-edge tags still pair up to their edge tags.
    for eh in mesh.edges() {
        let [ha, hb] = eh.halfedges();
        assert_eq!(h_ids.get(ha) / 2, e_ids.get(eh));
        assert_eq!(h_ids.get(hb) / 2, e_ids.get(eh));
    }
}

#[test]
fn permute_vertices_moves_attributes() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 3);
    mesh.add_or_get_edge(vs[0], vs[1]);

    let ids = mesh.create_vertex_attr(u32::max_value());
    for &vh in &vs {
        ids.set(vh, vh.idx());
    }

    // Vertex i moves to slot p[i].
    mesh.permute_vertices(&[2, 0, 1]);

    assert_eq!(ids.to_vec(), vec![1, 2, 0]);
    let moved_a = VertexHandle::new(2);
    let moved_b = VertexHandle::new(0);
    assert!(mesh.edge_between(moved_a, moved_b).is_some());
    check_invariants(&mesh);
}

#[test]
fn permute_faces_and_edges() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 4);
    mesh.add_face(&[vs[0], vs[1], vs[2]]);
    mesh.add_face(&[vs[3], vs[2], vs[1]]);

    let f_ids = mesh.create_face_attr(u32::max_value());
    for fh in mesh.faces() {
        f_ids.set(fh, fh.idx());
    }
    mesh.permute_faces(&[1, 0]);
    assert_eq!(f_ids.to_vec(), vec![1, 0]);
    check_invariants(&mesh);

    let e_ids = mesh.create_edge_attr(u32::max_value());
    let h_ids = mesh.create_halfedge_attr(u32::max_value());
    for eh in mesh.edges() {
        e_ids.set(eh, eh.idx());
    }
    for hh in mesh.halfedges() {
        h_ids.set(hh, hh.idx());
    }
    mesh.permute_edges(&[4, 3, 2, 1, 0]);
    assert_eq!(e_ids.to_vec(), vec![4, 3, 2, 1, 0]);
    check_invariants(&mesh);

    // Half-edges moved along with their edges, twins staying adjacent.
    for eh in mesh.edges() {
        let [ha, hb] = eh.halfedges();
        assert_eq!(h_ids.get(ha) / 2, e_ids.get(eh));
        assert_eq!(h_ids.get(hb) / 2, e_ids.get(eh));
    }
}

#[test]
#[should_panic(expected = "not a permutation")]
fn reject_invalid_permutation() {
    let mut mesh = Mesh::new();
    vertices(&mut mesh, 3);
    mesh.permute_vertices(&[0, 0, 1]);
}

#[test]
#[should_panic(expected = "must be compact")]
fn reject_permuting_non_compact_mesh() {
    let mut mesh = Mesh::new();
    let vs = vertices(&mut mesh, 3);
    mesh.remove_vertex(vs[0]);
    mesh.permute_vertices(&[1, 0]);
}

// ===========================================================================
// ===== Whole-mesh operations
// ===========================================================================

#[test]
fn clear_empties_everything() {
    let (mut mesh, _, _) = tetrahedron();
    let ids = mesh.create_vertex_attr(0u32);

    mesh.clear();

    assert_eq!(mesh.size_vertices(), 0);
    assert_eq!(mesh.size_faces(), 0);
    assert_eq!(mesh.size_edges(), 0);
    assert!(mesh.is_compact());
    assert_eq!(ids.len(), 0);
    check_invariants(&mesh);

    // The mesh is usable afterwards.
    let vs = vertices(&mut mesh, 3);
    mesh.add_face(&vs);
    assert_eq!(ids.len(), 3);
    check_invariants(&mesh);
}

#[test]
fn copy_from_adopts_connectivity() {
    let (src, _, _) = tetrahedron();

    let mut dst = Mesh::new();
    vertices(&mut dst, 2);
    let ids = dst.create_vertex_attr(7u32);

    dst.copy_from(&src);

    assert_eq!(dst.size_vertices(), 4);
    assert_eq!(dst.size_faces(), 4);
    assert_eq!(dst.size_edges(), 6);
    // The destination's own attribute was resized, new slots get the default.
    assert_eq!(ids.len(), 4);
    assert_eq!(ids.get(VertexHandle::new(3)), 7);
    check_invariants(&dst);
}

#[test]
fn clone_detaches_attributes() {
    let (mesh, _, _) = tetrahedron();
    let ids = mesh.create_vertex_attr(0u32);

    let mut copy = mesh.clone();
    check_invariants(&copy);
    copy.add_vertex();

    // The original's attribute is not registered with the clone.
    assert_eq!(copy.size_vertices(), 5);
    assert_eq!(ids.len(), 4);
}

#[test]
fn handle_iterators_skip_tombstones() {
    let (mut mesh, vs, _) = tetrahedron();
    mesh.remove_vertex(vs[1]);

    assert_eq!(mesh.vertices().count(), 3);
    assert_eq!(mesh.all_vertices().count(), 4);
    assert!(mesh.vertices().all(|vh| vh != vs[1]));
    assert_eq!(mesh.faces().count(), 1);
    assert_eq!(mesh.all_faces().count(), 4);
    assert_eq!(mesh.edges().count(), 3);
    assert_eq!(mesh.all_edges().count(), 6);
}
