//! An in-memory half-edge data structure for polygon meshes.
//!
//! The central type is [`Mesh`]: pure connectivity (which vertices, edges and
//! faces exist and how they touch), stored in index-based parallel arrays.
//! Everything else (positions, normals, colors, any per-element data) lives
//! in [attribute buffers][attr] owned by the caller and kept in sync with the
//! mesh automatically.
//!
//! # Quick start
//!
//! ```
//! use hemesh::{Mesh, props};
//! use cgmath::Point3;
//!
//! let mut mesh = Mesh::new();
//! let positions = mesh.create_vertex_attr(Point3::new(0.0f32, 0.0, 0.0));
//!
//! let a = mesh.add_vertex();
//! let b = mesh.add_vertex();
//! let c = mesh.add_vertex();
//! positions.set(a, Point3::new(0.0, 0.0, 0.0));
//! positions.set(b, Point3::new(1.0, 0.0, 0.0));
//! positions.set(c, Point3::new(0.0, 1.0, 0.0));
//!
//! let f = mesh.add_face(&[a, b, c]);
//! assert_eq!(mesh.degree(f), 3);
//! assert_eq!(props::face_area(&mesh, &positions, f), 0.5);
//! ```
//!
//! # Structure
//!
//! - [`handle`]: typed indices for vertices, faces, edges and half-edges.
//! - [`Mesh`]: connectivity storage, queries, mutation ([`Mesh::add_face`],
//!   [`Mesh::remove_edge`], splits, collapses, rotations), compaction and
//!   permutation.
//! - [`attr`]: externally owned per-element data buffers that follow the
//!   mesh through element creation, removal, compaction and permutation.
//! - [`refs`]: handle + mesh packaged together for fluent navigation.
//! - [`props`]: geometric helpers (lengths, areas, normals, centroids) on
//!   top of a position attribute.
//! - [`io`] (feature `io`, enabled by default): ASCII OFF import and export.
//!
//! # Handles and element lifetime
//!
//! Elements are referred to by [handles][handle::Handle]: thin typed indices.
//! Removing an element leaves a tombstone, so all other handles stay valid;
//! [`Mesh::compactify`] reclaims tombstoned slots and is the only operation
//! (besides the explicit `permute_*` family) that invalidates handles.

pub mod attr;
pub mod handle;
mod mesh;
pub mod props;
pub mod refs;

#[cfg(feature = "io")]
pub mod io;

pub use crate::attr::{Attr, VertexAttr, FaceAttr, EdgeAttr, HalfEdgeAttr};
pub use crate::handle::{
    hsize, Handle, VertexHandle, FaceHandle, EdgeHandle, HalfEdgeHandle,
};
pub use crate::mesh::{ContainsHandle, Handles, Mesh};
