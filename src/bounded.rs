use std::{rc::Rc, sync::Arc};

use crate::{aabb::Aabb, vector::InternalVector};

/// Trait to describe an object stored in an [`Octree`](crate::Octree) which consists of a
/// [bounding box](Bounded::bounding_box).
///
/// #### Deriving:
///
/// Used when the type has a field named `bounding_box` (or `aabb`):
///
/// ```
/// # use loose_octree::prelude::*;
/// # use glam::Vec3;
/// #
/// #[derive(Bounded)]
/// struct Body {
///     id: u32,
///     bounding_box: Aabb<Vec3>,
/// //  ...
/// }
/// ```
/// #### Manual implementation:
///
/// Used when the type cannot directly provide a bounding box.
///
/// ```
/// # use loose_octree::prelude::*;
/// # use glam::Vec3;
/// #
/// struct Sphere {
///     center: Vec3,
///     radius: f32,
/// //  ...
/// }
///
/// impl Bounded for Sphere {
///     type Vector = Vec3;
///
///     fn bounding_box(&self) -> Aabb<Vec3> {
///         Aabb::from_center_half_extents(self.center, Vec3::splat(self.radius))
///     }
/// }
/// ```
///
/// An [`Aabb`] is its own bounding box, and tuples of an [`Aabb`] and any payload use the box of
/// their first element.
///
/// ```
/// # use loose_octree::prelude::*;
/// # use glam::Vec3;
/// let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
/// let tagged = (aabb, "crate");
///
/// assert_eq!(tagged.bounding_box(), aabb);
/// ```
///
/// The octree matches stored elements with [`PartialEq`]. Types that are
/// [relocated](crate::Octree::relocate) must compare equal independently of their bounding box,
/// e.g. by comparing an identifier.
pub trait Bounded {
    /// Type of the corners of the [bounding box](Bounded::bounding_box).
    type Vector: InternalVector;

    /// The axis-aligned bounding box of the object.
    fn bounding_box(&self) -> Aabb<Self::Vector>;
}

impl<V> Bounded for Aabb<V>
where
    V: InternalVector,
{
    type Vector = V;

    #[inline]
    fn bounding_box(&self) -> Aabb<V> {
        *self
    }
}

impl<V, D> Bounded for (Aabb<V>, D)
where
    V: InternalVector,
{
    type Vector = V;

    #[inline]
    fn bounding_box(&self) -> Aabb<V> {
        self.0
    }
}

macro_rules! impl_bounded_pointer {
    ($($p: ty),*) => {$(
        impl<B> Bounded for $p
        where
            B: Bounded + ?Sized,
        {
            type Vector = B::Vector;

            #[inline]
            fn bounding_box(&self) -> Aabb<Self::Vector> {
                (**self).bounding_box()
            }
        }
    )*};
}

impl_bounded_pointer!(&B, &mut B, Box<B>, Rc<B>, Arc<B>);
