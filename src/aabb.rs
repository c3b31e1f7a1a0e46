use crate::vector::{IntoInternalVector, InternalVector, Scalar};

/// An axis-aligned bounding box defined by its minimum and maximum corners.
///
/// The corners are expected to satisfy `min[i] <= max[i]` on every axis. This is only checked in
/// debug builds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<V> {
    /// Minimum corner of the box.
    pub min: V,
    /// Maximum corner of the box.
    pub max: V,
}

#[allow(clippy::needless_range_loop)]
impl<V> Aabb<V>
where
    V: InternalVector,
{
    /// Creates a new [`Aabb`] with the given min and max corners.
    #[inline]
    pub fn new(min: V, max: V) -> Self {
        debug_assert!(min.all_le(max), "invalid Aabb: min {min:?} > max {max:?}");
        Self { min, max }
    }

    /// Creates a new [`Aabb`] from arbitrary vectors convertible into `V`.
    ///
    /// ```
    /// # use loose_octree::Aabb;
    /// # use glam::{Vec3, Vec3A};
    /// let aabb = Aabb::<Vec3A>::from_vectors(Vec3::ZERO, Vec3::ONE);
    ///
    /// assert_eq!(aabb.max, Vec3A::ONE);
    /// ```
    #[inline]
    pub fn from_vectors<T>(min: T, max: T) -> Self
    where
        T: IntoInternalVector<[V::Scalar; 3], InternalVector = V>,
    {
        Self::new(min.into_internal(), max.into_internal())
    }

    /// Creates a new [`Aabb`] centered at `center` that extends by `half_extents` on each side.
    #[inline]
    pub fn from_center_half_extents(center: V, half_extents: V) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Center of the [`Aabb`].
    #[inline]
    pub fn center(&self) -> V {
        let min = self.min.to_array();
        let max = self.max.to_array();
        let mut r = min;
        for i in 0..3 {
            r[i] = min[i].midpoint(max[i]);
        }
        V::from_array(r)
    }

    /// Size of the [`Aabb`].
    #[inline]
    pub fn size(&self) -> V {
        self.max - self.min
    }

    /// Returns true if both boxes overlap on all three axes.
    ///
    /// Boxes that only touch along a face, an edge or a corner do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.all_lt(other.max) && other.min.all_lt(self.max)
    }

    /// Returns true if `other` overlaps this box and lies entirely within it.
    #[inline]
    pub fn fully_contains(&self, other: &Self) -> bool {
        self.overlaps(other) && self.min.all_le(other.min) && other.max.all_le(self.max)
    }

    /// Returns true if the point lies inside the box or on its boundary.
    #[inline]
    pub fn contains_point(&self, point: V) -> bool {
        self.min.all_le(point) && point.all_le(self.max)
    }

    /// Returns the region shared by both boxes, if any.
    ///
    /// The result can be flat (zero extent along an axis) when the boxes only touch.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = self.min.max_by_component(other.min);
        let max = self.max.min_by_component(other.max);
        min.all_le(max).then_some(Self { min, max })
    }

    /// Returns the smallest box containing both boxes.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min_by_component(other.min),
            max: self.max.max_by_component(other.max),
        }
    }

    /// Cuts the [`Aabb`] at its center into 8 octants.
    ///
    /// Octant `i` spans the upper half of axis `j` if bit `j` of `i` is set, the lower half
    /// otherwise.
    #[inline]
    pub fn octants(&self) -> [Self; 8] {
        let min = self.min.to_array();
        let max = self.max.to_array();
        let center = self.center().to_array();

        std::array::from_fn(|i| {
            let mut corner_min = min;
            let mut corner_max = center;
            for j in 0..3 {
                if i & (1 << j) != 0 {
                    corner_min[j] = center[j];
                    corner_max[j] = max[j];
                }
            }
            Self::new(V::from_array(corner_min), V::from_array(corner_max))
        })
    }

    /// Cuts the [`Aabb`] into 8 octants expanded toward each other around the center.
    ///
    /// Each octant is moved outward by `overlap` times the distance from its corners to the
    /// center: its minimum by `overlap * (center - max)` and its maximum by
    /// `overlap * (center - min)`. Adjacent octants therefore share a margin of
    /// `overlap * size` around the center planes, while staying inside this box.
    #[inline]
    pub fn loose_octants(&self, overlap: V::Scalar) -> [Self; 8] {
        let center = self.center();
        self.octants().map(|octant| Self {
            min: octant.min + (center - octant.max) * overlap,
            max: octant.max + (center - octant.min) * overlap,
        })
    }
}
