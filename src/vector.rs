use std::{
    fmt::Debug,
    ops::{Add, Mul, Sub},
};

/// Arbitrary vectors that can be converted from and into the array of a given [`InternalVector`].
pub trait IntoInternalVector<A> {
    /// Internal representation of a vector.
    type InternalVector;

    /// Converts the arbitrary vector into its internal representation.
    fn into_internal(self) -> Self::InternalVector;

    /// Converts the internal representation into the arbitrary vector.
    fn from_internal(vector: Self::InternalVector) -> Self;
}

/// Scalar types that compose [`InternalVector`] objects.
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// Converts a `f64` into the scalar, rounding if needed.
    fn from_f64(value: f64) -> Self;

    /// Midpoint between two scalars.
    fn midpoint(self, rhs: Self) -> Self;
}

/// Three dimensional vectors the octree computes with.
///
/// Implemented for [`glam::Vec3`], [`glam::Vec3A`] and [`glam::DVec3`], and for the `ultraviolet`
/// 3D vectors with the `ultraviolet` feature.
pub trait InternalVector:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Self::Scalar, Output = Self>
{
    /// The scalar type of the vector.
    type Scalar: Scalar;

    /// Creates a vector from an array of its components.
    fn from_array(array: [Self::Scalar; 3]) -> Self;

    /// Returns the components of the vector as an array.
    fn to_array(self) -> [Self::Scalar; 3];

    /// Creates a vector with all components set to the given value.
    fn splat(value: Self::Scalar) -> Self;

    /// Componentwise minimum.
    fn min_by_component(self, rhs: Self) -> Self;

    /// Componentwise maximum.
    fn max_by_component(self, rhs: Self) -> Self;

    /// Returns true if every component is strictly lower than its counterpart in `rhs`.
    fn all_lt(self, rhs: Self) -> bool;

    /// Returns true if every component is lower than or equal to its counterpart in `rhs`.
    fn all_le(self, rhs: Self) -> bool;
}

macro_rules! scalar {
    ($s: ty) => {
        impl Scalar for $s {
            #[inline]
            fn from_f64(value: f64) -> $s {
                value as $s
            }

            #[inline]
            fn midpoint(self, rhs: Self) -> $s {
                (self + rhs) / 2.0
            }
        }
    };
}

scalar!(f32);
scalar!(f64);

macro_rules! glam_vector {
    ($s: ty, $($t: ty),*) => {$(
        impl InternalVector for $t {
            type Scalar = $s;

            #[inline]
            fn from_array(array: [$s; 3]) -> Self {
                <$t>::from_array(array)
            }

            #[inline]
            fn to_array(self) -> [$s; 3] {
                <$t>::to_array(&self)
            }

            #[inline]
            fn splat(value: $s) -> Self {
                <$t>::splat(value)
            }

            #[inline]
            fn min_by_component(self, rhs: Self) -> Self {
                self.min(rhs)
            }

            #[inline]
            fn max_by_component(self, rhs: Self) -> Self {
                self.max(rhs)
            }

            #[inline]
            fn all_lt(self, rhs: Self) -> bool {
                self.cmplt(rhs).all()
            }

            #[inline]
            fn all_le(self, rhs: Self) -> bool {
                self.cmple(rhs).all()
            }
        }
    )*};
}

glam_vector!(f32, glam::Vec3, glam::Vec3A);
glam_vector!(f64, glam::DVec3);

#[cfg(feature = "ultraviolet")]
macro_rules! ultraviolet_vector {
    ($s: ty, $t: ty) => {
        impl InternalVector for $t {
            type Scalar = $s;

            #[inline]
            fn from_array([x, y, z]: [$s; 3]) -> Self {
                <$t>::new(x, y, z)
            }

            #[inline]
            fn to_array(self) -> [$s; 3] {
                [self.x, self.y, self.z]
            }

            #[inline]
            fn splat(value: $s) -> Self {
                <$t>::new(value, value, value)
            }

            #[inline]
            fn min_by_component(self, rhs: Self) -> Self {
                <$t>::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
            }

            #[inline]
            fn max_by_component(self, rhs: Self) -> Self {
                <$t>::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
            }

            #[inline]
            fn all_lt(self, rhs: Self) -> bool {
                self.x < rhs.x && self.y < rhs.y && self.z < rhs.z
            }

            #[inline]
            fn all_le(self, rhs: Self) -> bool {
                self.x <= rhs.x && self.y <= rhs.y && self.z <= rhs.z
            }
        }
    };
}

#[cfg(feature = "ultraviolet")]
ultraviolet_vector!(f32, ultraviolet::Vec3);
#[cfg(feature = "ultraviolet")]
ultraviolet_vector!(f64, ultraviolet::DVec3);

macro_rules! into_internal_vector {
    ($s: ty, $t: ty) => {
        impl<V> IntoInternalVector<[$s; 3]> for V
        where
            V: Into<[$s; 3]> + From<[$s; 3]>,
        {
            type InternalVector = $t;

            #[inline]
            fn into_internal(self) -> Self::InternalVector {
                <$t as InternalVector>::from_array(self.into())
            }

            #[inline]
            fn from_internal(vector: Self::InternalVector) -> V {
                Self::from(InternalVector::to_array(vector))
            }
        }
    };
}

into_internal_vector!(f32, glam::Vec3A);
into_internal_vector!(f64, glam::DVec3);

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, Vec3, Vec3A};

    #[test]
    fn componentwise_comparisons() {
        let a = Vec3::new(0.0, 1.0, 2.0);
        let b = Vec3::new(1.0, 2.0, 2.0);

        assert!(a.all_le(b));
        assert!(!a.all_lt(b));
        assert!(a.all_lt(b + Vec3::splat(0.5)));
        assert!(!b.all_le(a));
    }

    #[test]
    fn componentwise_min_max() {
        let a = DVec3::new(0.0, 5.0, -2.0);
        let b = DVec3::new(1.0, 2.0, -3.0);

        assert_eq!(a.min_by_component(b), DVec3::new(0.0, 2.0, -3.0));
        assert_eq!(a.max_by_component(b), DVec3::new(1.0, 5.0, -2.0));
    }

    #[test]
    fn arbitrary_vectors_round_trip_through_internal() {
        let internal: Vec3A = IntoInternalVector::<[f32; 3]>::into_internal([1.0_f32, 2.0, 3.0]);
        assert_eq!(internal, Vec3A::new(1.0, 2.0, 3.0));

        let back = <Vec3 as IntoInternalVector<[f32; 3]>>::from_internal(internal);
        assert_eq!(back, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn scalar_conversions() {
        assert_eq!(f32::from_f64(0.1), 0.1_f32);
        assert_eq!(Scalar::midpoint(-1.0_f64, 3.0), 1.0);
    }
}
