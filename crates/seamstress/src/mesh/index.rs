//! Index types for mesh elements.
//!
//! Every element of a [`UvMesh`](super::UvMesh) is addressed by a small
//! `u32` newtype. The ids double as the structural identity of an element:
//! two ids compare equal exactly when they name the same element, and the
//! raw value is stable for the lifetime of the mesh.

use std::fmt;

/// A vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A full (undirected) edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId(u32);

/// A loop (face corner) index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct LoopId(u32);

/// A face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(u32);

macro_rules! impl_index_type {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Create an index from a raw position.
            ///
            /// # Panics
            /// Panics in debug builds if the value does not fit in 32 bits.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize, "index {} too large", index);
                Self(index as u32)
            }

            /// Position of the element in its mesh array.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Raw value, used when hashing element identity.
            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> usize {
                id.index()
            }
        }
    };
}

impl_index_type!(VertexId, "v");
impl_index_type!(EdgeId, "e");
impl_index_type!(LoopId, "l");
impl_index_type!(FaceId, "f");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_index() {
        let v = VertexId::new(42);
        assert_eq!(v.index(), 42);
        assert_eq!(v.raw(), 42);
        assert_eq!(usize::from(v), 42);
    }

    #[test]
    fn debug_has_prefix() {
        assert_eq!(format!("{:?}", EdgeId::new(3)), "e3");
        assert_eq!(format!("{:?}", LoopId::new(7)), "l7");
        assert_eq!(format!("{}", FaceId::new(1)), "1");
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(VertexId::new(1) < VertexId::new(2));
        assert_eq!(EdgeId::new(5), EdgeId::new(5));
    }
}
