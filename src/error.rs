use std::fmt;

/// Errors returned by the operations of an [`Octree`](crate::Octree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OctreeError {
    /// The bounding box of the element is not fully contained by the region it was placed in.
    #[error("bounding box is not fully contained by the region")]
    OutOfRegion,
    /// The element is not stored in the tree.
    #[error("element is not stored in the tree")]
    NotFound,
    /// The [`OctreeConfig`](crate::OctreeConfig) was rejected.
    #[error("invalid octree configuration: {0}")]
    InvalidConfig(&'static str),
}

/// An element handed back to the caller after an operation that took ownership of it failed.
///
/// ```
/// # use loose_octree::prelude::*;
/// # use glam::Vec3;
/// let mut octree = Octree::new(Aabb::new(Vec3::ZERO, Vec3::ONE));
/// let outside = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));
///
/// let rejected = octree.insert(outside).unwrap_err();
///
/// assert_eq!(rejected.error(), OctreeError::OutOfRegion);
/// assert_eq!(rejected.into_inner(), outside);
/// ```
#[derive(Clone, PartialEq)]
pub struct Rejected<E> {
    element: E,
    error: OctreeError,
}

impl<E> Rejected<E> {
    pub(crate) fn new(element: E, error: OctreeError) -> Self {
        Self { element, error }
    }

    /// The reason the element was rejected.
    #[inline]
    pub fn error(&self) -> OctreeError {
        self.error
    }

    /// Returns a reference to the rejected element.
    #[inline]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Gives back ownership of the rejected element.
    #[inline]
    pub fn into_inner(self) -> E {
        self.element
    }
}

impl<E> From<Rejected<E>> for OctreeError {
    #[inline]
    fn from(rejected: Rejected<E>) -> Self {
        rejected.error
    }
}

impl<E> fmt::Debug for Rejected<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<E> fmt::Display for Rejected<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element rejected: {}", self.error)
    }
}

impl<E> std::error::Error for Rejected<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
