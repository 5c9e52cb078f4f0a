//! Typed indices ("handles") for the four mesh element kinds.
//!
//! All elements of a mesh are referred to via handles: thin wrappers around an
//! integer index. The handle types are distinct so that a face index cannot be
//! confused with a vertex index.

use std::fmt;
use std::marker::PhantomData;


/// The integer type used for handle indices.
///
/// 32 bit are enough for all but the most extreme meshes, and halving the
/// index size halves the memory consumption of the connectivity arrays.
#[allow(non_camel_case_types)]
pub type hsize = u32;


/// Types that can be used to refer to some data, i.e. mesh elements.
pub trait Handle: Copy + fmt::Debug + Eq + Ord + std::hash::Hash {
    /// Creates a new handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Returns the index of the current handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle from an `usize`.
    ///
    /// If `raw` cannot be represented by `hsize`, this function panics.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(raw <= hsize::max_value() as usize, "handle index out of range");
        Self::new(raw as hsize)
    }

    /// Helper method to get the index as an `usize`.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!($short, "{}"), self.0)
            }
        }
    }
}

make_handle_type!{
    /// A handle referring to a vertex.
    VertexHandle = "V";
}
make_handle_type!{
    /// A handle referring to a face.
    FaceHandle = "F";
}
make_handle_type!{
    /// A handle referring to a full edge (an unordered pair of opposite
    /// half-edges).
    EdgeHandle = "E";
}
make_handle_type!{
    /// A handle referring to a half-edge (one directed traversal of an edge).
    HalfEdgeHandle = "H";
}

// The half-edges of one edge are always stored next to one another, starting
// at an even index: the half-edges of edge `e` are `2e` and `2e + 1`. This is
// an invariant of the data structure and these methods are the only places
// performing the index arithmetic.
impl HalfEdgeHandle {
    /// Returns the handle of this half-edge's twin (the half-edge of the same
    /// edge pointing in the opposite direction).
    #[inline(always)]
    pub fn opposite(self) -> HalfEdgeHandle {
        HalfEdgeHandle(self.0 ^ 1)
    }

    /// Returns the full edge this half-edge belongs to.
    #[inline(always)]
    pub fn edge(self) -> EdgeHandle {
        EdgeHandle(self.0 >> 1)
    }

    /// Whether this half-edge is the lower (even-index) half of its edge.
    #[inline(always)]
    pub fn is_lower_half(self) -> bool {
        self.0 & 1 == 0
    }
}

impl EdgeHandle {
    /// Returns the half-edge of this edge with the lower index value.
    #[inline(always)]
    pub fn lower_half(self) -> HalfEdgeHandle {
        HalfEdgeHandle(self.0 * 2)
    }

    /// Returns both half-edges of this edge.
    #[inline(always)]
    pub fn halfedges(self) -> [HalfEdgeHandle; 2] {
        [HalfEdgeHandle(self.0 * 2), HalfEdgeHandle(self.0 * 2 + 1)]
    }
}


// ===========================================================================
// ===== `Cell`: tri-state storage slot for cross references
// ===========================================================================

/// Sentinel index for "no element" (e.g. an isolated vertex has no outgoing
/// half-edge, a boundary half-edge has no face).
const NONE: hsize = hsize::max_value();

/// Sentinel index marking a tombstoned (removed but not yet compacted) slot.
/// Distinct from [`NONE`] so that "absent" and "removed" can be told apart in
/// O(1).
const TOMB: hsize = hsize::max_value() - 1;

/// A storage cell inside the connectivity arrays, holding either a valid
/// handle, "none", or a tombstone marker.
///
/// This is a plain `hsize` with two reserved sentinel values, so the arrays
/// stay dense and copyable.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cell<H: Handle> {
    raw: hsize,
    _marker: PhantomData<H>,
}

impl<H: Handle> Cell<H> {
    #[inline(always)]
    pub(crate) fn some(h: H) -> Self {
        debug_assert!(h.idx() < TOMB, "handle index collides with sentinel");
        Self { raw: h.idx(), _marker: PhantomData }
    }

    #[inline(always)]
    pub(crate) fn none() -> Self {
        Self { raw: NONE, _marker: PhantomData }
    }

    #[inline(always)]
    pub(crate) fn tomb() -> Self {
        Self { raw: TOMB, _marker: PhantomData }
    }

    #[inline(always)]
    pub(crate) fn is_some(&self) -> bool {
        self.raw < TOMB
    }

    #[inline(always)]
    pub(crate) fn is_none(&self) -> bool {
        self.raw == NONE
    }

    #[inline(always)]
    pub(crate) fn is_tomb(&self) -> bool {
        self.raw == TOMB
    }

    #[inline(always)]
    pub(crate) fn to_option(self) -> Option<H> {
        if self.is_some() {
            Some(H::new(self.raw))
        } else {
            None
        }
    }

    /// Returns the stored handle. Panics when the cell is "none" or a
    /// tombstone; that would mean a dangling cross reference, which is an
    /// internal invariant violation.
    #[inline(always)]
    pub(crate) fn unwrap(self) -> H {
        match self.to_option() {
            Some(h) => h,
            None => panic!("internal error: dangling cross reference in connectivity array"),
        }
    }

    /// Applies `f` to the stored handle, leaving "none" and tombstone cells
    /// untouched. Used when rewriting cross references during compaction and
    /// permutation.
    #[inline(always)]
    pub(crate) fn map_valid(self, f: impl FnOnce(H) -> H) -> Self {
        if self.is_some() {
            Self::some(f(H::new(self.raw)))
        } else {
            self
        }
    }
}

impl<H: Handle> From<Option<H>> for Cell<H> {
    fn from(opt: Option<H>) -> Self {
        match opt {
            Some(h) => Cell::some(h),
            None => Cell::none(),
        }
    }
}

impl<H: Handle> fmt::Debug for Cell<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_tomb() {
            write!(f, "x")
        } else if self.is_none() {
            write!(f, "-")
        } else {
            H::new(self.raw).fmt(f)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfedge_pairing() {
        let h0 = HalfEdgeHandle::new(0);
        let h1 = HalfEdgeHandle::new(1);
        assert_eq!(h0.opposite(), h1);
        assert_eq!(h1.opposite(), h0);
        assert_eq!(h0.edge(), EdgeHandle::new(0));
        assert_eq!(h1.edge(), EdgeHandle::new(0));

        let e = EdgeHandle::new(3);
        assert_eq!(e.lower_half(), HalfEdgeHandle::new(6));
        assert_eq!(e.halfedges(), [HalfEdgeHandle::new(6), HalfEdgeHandle::new(7)]);
        assert!(e.lower_half().is_lower_half());
        assert!(!e.lower_half().opposite().is_lower_half());
    }

    #[test]
    fn cell_states() {
        let some = Cell::some(VertexHandle::new(3));
        let none = Cell::<VertexHandle>::none();
        let tomb = Cell::<VertexHandle>::tomb();

        assert!(some.is_some() && !some.is_none() && !some.is_tomb());
        assert!(!none.is_some() && none.is_none() && !none.is_tomb());
        assert!(!tomb.is_some() && !tomb.is_none() && tomb.is_tomb());

        assert_eq!(some.to_option(), Some(VertexHandle::new(3)));
        assert_eq!(none.to_option(), None);
        assert_eq!(tomb.to_option(), None);

        let mapped = some.map_valid(|v| VertexHandle::new(v.idx() + 1));
        assert_eq!(mapped.to_option(), Some(VertexHandle::new(4)));
        assert!(none.map_valid(|v| v).is_none());
        assert!(tomb.map_valid(|v| v).is_tomb());
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", VertexHandle::new(7)), "V7");
        assert_eq!(format!("{:?}", FaceHandle::new(2)), "F2");
        assert_eq!(format!("{:?}", EdgeHandle::new(0)), "E0");
        assert_eq!(format!("{:?}", HalfEdgeHandle::new(5)), "H5");
    }
}
