//! Typed per-element attribute buffers, kept in sync with their mesh.
//!
//! An attribute stores one value per element slot of one element kind (e.g.
//! one `f32` per vertex). Buffers are created from a mesh via
//! [`Mesh::create_vertex_attr`] and friends, are owned by their creator, and
//! register themselves with the mesh: whenever the mesh grows, compacts or
//! permutes its element arrays, every registered buffer is resized, gathered
//! or transposed in lockstep, so that attribute slot `i` always describes the
//! element currently at index `i`.
//!
//! The registry holds only weak links. Dropping a buffer expires its link,
//! which is pruned on the next notification walk; deregistration therefore
//! needs no explicit call and is safe across early returns.
//!
//! There is no borrow relation between a mesh and its buffers: they share no
//! lifetime, and a buffer remains usable (but stale) if the mesh is dropped
//! first. Keeping them consistent is only guaranteed while the originating
//! mesh is the one being mutated.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::handle::{
    hsize, Handle, VertexHandle, FaceHandle, EdgeHandle, HalfEdgeHandle,
};
use crate::mesh::Mesh;


pub(crate) mod sealed {
    use std::rc::Rc;

    use crate::handle::hsize;
    use crate::mesh::Mesh;

    use super::Registry;

    /// Crate-internal half of [`ElementKind`][super::ElementKind]. These
    /// methods mention crate-private types, so they live behind the seal.
    pub trait Sealed {
        /// Number of element slots (live and tombstoned) of this kind.
        fn size_all(mesh: &Mesh) -> hsize;

        /// The attribute registry of this kind.
        fn registry(mesh: &Mesh) -> &Rc<Registry>;
    }
}


// ===========================================================================
// ===== Element kinds
// ===========================================================================

/// One of the four element kinds of a mesh. Implemented by the marker types
/// [`Vertex`], [`Face`], [`Edge`] and [`HalfEdge`]; sealed, so these four are
/// the only implementations.
pub trait ElementKind: sealed::Sealed + 'static {
    /// The handle type referring to elements of this kind.
    type Handle: Handle;
}

macro_rules! make_element_kind {
    ($(#[$attr:meta])* $name:ident, $handle:ident, $size_all:ident, $registry:ident) => {
        $(#[$attr])*
        #[allow(missing_debug_implementations)]
        pub enum $name {}

        impl sealed::Sealed for $name {
            fn size_all(mesh: &Mesh) -> hsize {
                mesh.$size_all()
            }

            fn registry(mesh: &Mesh) -> &Rc<Registry> {
                &mesh.$registry
            }
        }

        impl ElementKind for $name {
            type Handle = $handle;
        }
    }
}

make_element_kind!(
    /// Marker type for the vertex element kind.
    Vertex, VertexHandle, size_all_vertices, vertex_attrs
);
make_element_kind!(
    /// Marker type for the face element kind.
    Face, FaceHandle, size_all_faces, face_attrs
);
make_element_kind!(
    /// Marker type for the edge element kind.
    Edge, EdgeHandle, size_all_edges, edge_attrs
);
make_element_kind!(
    /// Marker type for the half-edge element kind.
    HalfEdge, HalfEdgeHandle, size_all_halfedges, halfedge_attrs
);


// ===========================================================================
// ===== Registry
// ===========================================================================

/// Type-erased interface through which the mesh notifies attribute buffers.
pub(crate) trait RawAttr {
    /// Resizes the buffer to `new_len` entries, filling new slots with the
    /// buffer's default value.
    fn resize(&self, new_len: usize);

    /// Gathers entries according to `new_to_old`: afterwards, entry `i` holds
    /// the value previously stored at `new_to_old[i]`.
    fn remap(&self, new_to_old: &[hsize]);

    /// Swaps the entry pairs listed in `ts`, mirroring the transpositions
    /// applied to the connectivity arrays.
    fn transpose(&self, ts: &[(hsize, hsize)]);
}

/// The list of attribute buffers registered for one element kind of one mesh.
pub(crate) struct Registry {
    members: RefCell<Vec<Weak<dyn RawAttr>>>,
}

impl Registry {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            members: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn register(&self, member: Weak<dyn RawAttr>) {
        self.members.borrow_mut().push(member);
    }

    /// Walks all live members, pruning expired ones along the way.
    fn for_each(&self, mut f: impl FnMut(&dyn RawAttr)) {
        self.members.borrow_mut().retain(|weak| {
            match weak.upgrade() {
                Some(member) => {
                    f(&*member);
                    true
                }
                None => false,
            }
        });
    }

    pub(crate) fn notify_resize(&self, new_len: usize) {
        self.for_each(|attr| attr.resize(new_len));
    }

    pub(crate) fn notify_remap(&self, new_to_old: &[hsize]) {
        self.for_each(|attr| attr.remap(new_to_old));
    }

    pub(crate) fn notify_transpositions(&self, ts: &[(hsize, hsize)]) {
        self.for_each(|attr| attr.transpose(ts));
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.members.borrow_mut().retain(|weak| weak.upgrade().is_some());
        self.members.borrow().len()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Registry({} members)", self.members.borrow().len())
    }
}


// ===========================================================================
// ===== Attribute buffers
// ===========================================================================

struct AttrData<T> {
    values: RefCell<Vec<T>>,
    default: T,
}

impl<T: Clone + 'static> RawAttr for AttrData<T> {
    fn resize(&self, new_len: usize) {
        self.values.borrow_mut().resize(new_len, self.default.clone());
    }

    fn remap(&self, new_to_old: &[hsize]) {
        let mut values = self.values.borrow_mut();
        for (new, &old) in new_to_old.iter().enumerate() {
            values[new] = values[old as usize].clone();
        }
    }

    fn transpose(&self, ts: &[(hsize, hsize)]) {
        let mut values = self.values.borrow_mut();
        for &(a, b) in ts {
            values.swap(a as usize, b as usize);
        }
    }
}

/// A typed attribute buffer: one `T` per element slot of kind `K`.
///
/// Created via [`Mesh::create_vertex_attr`] and its siblings. The buffer is
/// monomorphic for its lifetime: its value type and default value are fixed at
/// creation. Cloning the buffer clones the data and registers the copy with
/// the same mesh.
pub struct Attr<K: ElementKind, T: Clone + 'static> {
    data: Rc<AttrData<T>>,
    registry: Rc<Registry>,
    _kind: PhantomData<K>,
}

/// An attribute buffer storing one `T` per vertex.
pub type VertexAttr<T> = Attr<Vertex, T>;
/// An attribute buffer storing one `T` per face.
pub type FaceAttr<T> = Attr<Face, T>;
/// An attribute buffer storing one `T` per edge.
pub type EdgeAttr<T> = Attr<Edge, T>;
/// An attribute buffer storing one `T` per half-edge.
pub type HalfEdgeAttr<T> = Attr<HalfEdge, T>;

impl<K: ElementKind, T: Clone + 'static> Attr<K, T> {
    pub(crate) fn new(mesh: &Mesh, default: T) -> Self {
        let len = K::size_all(mesh) as usize;
        let data = Rc::new(AttrData {
            values: RefCell::new(vec![default.clone(); len]),
            default,
        });
        let registry = K::registry(mesh).clone();
        let weak = Rc::downgrade(&data);
        registry.register(weak);

        Self {
            data,
            registry,
            _kind: PhantomData,
        }
    }

    /// Number of entries, which always equals the number of element slots
    /// (live and tombstoned) of the originating mesh.
    pub fn len(&self) -> usize {
        self.data.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value new slots are filled with.
    pub fn default_value(&self) -> T {
        self.data.default.clone()
    }

    /// Returns the value stored for `handle`.
    ///
    /// Panics if the handle's index is out of bounds.
    pub fn get(&self, handle: K::Handle) -> T {
        self.data.values.borrow()[handle.to_usize()].clone()
    }

    /// Overwrites the value stored for `handle`.
    pub fn set(&self, handle: K::Handle, value: T) {
        self.data.values.borrow_mut()[handle.to_usize()] = value;
    }

    /// Applies `f` to the value stored for `handle` in place.
    pub fn update(&self, handle: K::Handle, f: impl FnOnce(&mut T)) {
        f(&mut self.data.values.borrow_mut()[handle.to_usize()]);
    }

    /// Overwrites every entry with `value`.
    pub fn fill(&self, value: T) {
        for slot in self.data.values.borrow_mut().iter_mut() {
            *slot = value.clone();
        }
    }

    /// Copies all entries into a plain vector, in index order.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.values.borrow().clone()
    }
}

impl<K: ElementKind, T: Clone + 'static> Clone for Attr<K, T> {
    fn clone(&self) -> Self {
        let data = Rc::new(AttrData {
            values: RefCell::new(self.data.values.borrow().clone()),
            default: self.data.default.clone(),
        });
        let weak = Rc::downgrade(&data);
        self.registry.register(weak);

        Self {
            data,
            registry: self.registry.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ElementKind, T: Clone + fmt::Debug + 'static> fmt::Debug for Attr<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.data.values.borrow().iter()).finish()
    }
}
