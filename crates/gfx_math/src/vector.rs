//! Vectors.

use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A 3-dimensional vector of double-precision components.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[f64; 3]", from = "[f64; 3]")
)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector3 {
    inner: glam::DVec3,
}

/// A 4-dimensional vector of double-precision components.
///
/// The columns of a [`Matrix4`](crate::matrix::Matrix4) are stored as
/// values of this type.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[f64; 4]", from = "[f64; 4]")
)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector4 {
    inner: glam::DVec4,
}

impl Vector3 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self::wrap(glam::DVec3::new(x, y, z))
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::wrap(glam::DVec3::ZERO)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub const fn same(value: f64) -> Self {
        Self::wrap(glam::DVec3::splat(value))
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::wrap(glam::DVec3::X)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::wrap(glam::DVec3::Y)
    }

    /// The z-axis unit vector.
    #[inline]
    pub const fn unit_z() -> Self {
        Self::wrap(glam::DVec3::Z)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.inner.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.inner.y
    }

    /// The z-component.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.inner.z
    }

    /// A mutable reference to the x-component.
    #[inline]
    pub const fn x_mut(&mut self) -> &mut f64 {
        &mut self.inner.x
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub const fn y_mut(&mut self) -> &mut f64 {
        &mut self.inner.y
    }

    /// A mutable reference to the z-component.
    #[inline]
    pub const fn z_mut(&mut self) -> &mut f64 {
        &mut self.inner.z
    }

    /// Converts the vector to 4D by appending the given w-component.
    #[inline]
    pub const fn extended(&self, w: f64) -> Vector4 {
        Vector4::new(self.x(), self.y(), self.z(), w)
    }

    /// Computes the normalized version of the vector. A zero vector gives
    /// non-finite components.
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::wrap(self.inner / self.inner.length())
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.length()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.inner.length_squared()
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(other.inner)
    }

    /// Computes the cross product of this vector with another.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::wrap(self.inner.cross(other.inner))
    }

    /// Returns a vector with the given closure applied to each component.
    #[inline]
    pub fn mapped(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(f(self.x()), f(self.y()), f(self.z()))
    }

    #[inline]
    pub(crate) const fn wrap(inner: glam::DVec3) -> Self {
        Self { inner }
    }
}

impl From<[f64; 3]> for Vector3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    #[inline]
    fn from(vector: Vector3) -> Self {
        [vector.x(), vector.y(), vector.z()]
    }
}

impl_binop!(Add, add, Vector3, Vector3, Vector3, |a, b| {
    Vector3::wrap(a.inner + b.inner)
});

impl_binop!(Sub, sub, Vector3, Vector3, Vector3, |a, b| {
    Vector3::wrap(a.inner - b.inner)
});

impl_binop!(Mul, mul, Vector3, f64, Vector3, |a, b| {
    Vector3::wrap(a.inner * *b)
});

impl_binop!(Mul, mul, f64, Vector3, Vector3, |a, b| {
    Vector3::wrap(b.inner * *a)
});

impl_binop!(Div, div, Vector3, f64, Vector3, |a, b| {
    Vector3::wrap(a.inner / *b)
});

impl_binop_assign!(AddAssign, add_assign, Vector3, Vector3, |a, b| {
    a.inner += b.inner;
});

impl_binop_assign!(SubAssign, sub_assign, Vector3, Vector3, |a, b| {
    a.inner -= b.inner;
});

impl_binop_assign!(MulAssign, mul_assign, Vector3, f64, |a, b| {
    a.inner *= *b;
});

impl_binop_assign!(DivAssign, div_assign, Vector3, f64, |a, b| {
    a.inner /= *b;
});

impl_unary_op!(Neg, neg, Vector3, Vector3, |val| {
    Vector3::wrap(-val.inner)
});

impl Index<usize> for Vector3 {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.inner[index]
    }
}

impl_abs_diff_eq!(Vector3, |a, b, epsilon| {
    approx::AbsDiffEq::abs_diff_eq(&a.x(), &b.x(), epsilon)
        && approx::AbsDiffEq::abs_diff_eq(&a.y(), &b.y(), epsilon)
        && approx::AbsDiffEq::abs_diff_eq(&a.z(), &b.z(), epsilon)
});

impl_relative_eq!(Vector3, |a, b, epsilon, max_relative| {
    approx::RelativeEq::relative_eq(&a.x(), &b.x(), epsilon, max_relative)
        && approx::RelativeEq::relative_eq(&a.y(), &b.y(), epsilon, max_relative)
        && approx::RelativeEq::relative_eq(&a.z(), &b.z(), epsilon, max_relative)
});

impl fmt::Debug for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector3")
            .field("x", &self.inner.x)
            .field("y", &self.inner.y)
            .field("z", &self.inner.z)
            .finish()
    }
}

impl Vector4 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::wrap(glam::DVec4::new(x, y, z, w))
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::wrap(glam::DVec4::ZERO)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub const fn same(value: f64) -> Self {
        Self::wrap(glam::DVec4::splat(value))
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::wrap(glam::DVec4::X)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::wrap(glam::DVec4::Y)
    }

    /// The z-axis unit vector.
    #[inline]
    pub const fn unit_z() -> Self {
        Self::wrap(glam::DVec4::Z)
    }

    /// The w-axis unit vector.
    #[inline]
    pub const fn unit_w() -> Self {
        Self::wrap(glam::DVec4::W)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.inner.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.inner.y
    }

    /// The z-component.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.inner.z
    }

    /// The w-component.
    #[inline]
    pub const fn w(&self) -> f64 {
        self.inner.w
    }

    /// A mutable reference to the x-component.
    #[inline]
    pub const fn x_mut(&mut self) -> &mut f64 {
        &mut self.inner.x
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub const fn y_mut(&mut self) -> &mut f64 {
        &mut self.inner.y
    }

    /// A mutable reference to the z-component.
    #[inline]
    pub const fn z_mut(&mut self) -> &mut f64 {
        &mut self.inner.z
    }

    /// A mutable reference to the w-component.
    #[inline]
    pub const fn w_mut(&mut self) -> &mut f64 {
        &mut self.inner.w
    }

    /// The 3D vector containing the x-, y- and z-components of this vector.
    /// The w-component is discarded.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Computes the normalized version of the vector. A zero vector gives
    /// non-finite components.
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::wrap(self.inner / self.inner.length())
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.length()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.inner.length_squared()
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(other.inner)
    }

    /// Returns a vector with the given closure applied to each component.
    #[inline]
    pub fn mapped(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(f(self.x()), f(self.y()), f(self.z()), f(self.w()))
    }

    #[inline]
    pub(crate) const fn wrap(inner: glam::DVec4) -> Self {
        Self { inner }
    }
}

impl From<[f64; 4]> for Vector4 {
    #[inline]
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl From<Vector4> for [f64; 4] {
    #[inline]
    fn from(vector: Vector4) -> Self {
        [vector.x(), vector.y(), vector.z(), vector.w()]
    }
}

impl_binop!(Add, add, Vector4, Vector4, Vector4, |a, b| {
    Vector4::wrap(a.inner + b.inner)
});

impl_binop!(Sub, sub, Vector4, Vector4, Vector4, |a, b| {
    Vector4::wrap(a.inner - b.inner)
});

impl_binop!(Mul, mul, Vector4, f64, Vector4, |a, b| {
    Vector4::wrap(a.inner * *b)
});

impl_binop!(Mul, mul, f64, Vector4, Vector4, |a, b| {
    Vector4::wrap(b.inner * *a)
});

impl_binop!(Div, div, Vector4, f64, Vector4, |a, b| {
    Vector4::wrap(a.inner / *b)
});

impl_binop_assign!(AddAssign, add_assign, Vector4, Vector4, |a, b| {
    a.inner += b.inner;
});

impl_binop_assign!(SubAssign, sub_assign, Vector4, Vector4, |a, b| {
    a.inner -= b.inner;
});

impl_binop_assign!(MulAssign, mul_assign, Vector4, f64, |a, b| {
    a.inner *= *b;
});

impl_binop_assign!(DivAssign, div_assign, Vector4, f64, |a, b| {
    a.inner /= *b;
});

impl_unary_op!(Neg, neg, Vector4, Vector4, |val| {
    Vector4::wrap(-val.inner)
});

impl Index<usize> for Vector4 {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl IndexMut<usize> for Vector4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.inner[index]
    }
}

impl_abs_diff_eq!(Vector4, |a, b, epsilon| {
    approx::AbsDiffEq::abs_diff_eq(&a.x(), &b.x(), epsilon)
        && approx::AbsDiffEq::abs_diff_eq(&a.y(), &b.y(), epsilon)
        && approx::AbsDiffEq::abs_diff_eq(&a.z(), &b.z(), epsilon)
        && approx::AbsDiffEq::abs_diff_eq(&a.w(), &b.w(), epsilon)
});

impl_relative_eq!(Vector4, |a, b, epsilon, max_relative| {
    approx::RelativeEq::relative_eq(&a.x(), &b.x(), epsilon, max_relative)
        && approx::RelativeEq::relative_eq(&a.y(), &b.y(), epsilon, max_relative)
        && approx::RelativeEq::relative_eq(&a.z(), &b.z(), epsilon, max_relative)
        && approx::RelativeEq::relative_eq(&a.w(), &b.w(), epsilon, max_relative)
});

impl fmt::Debug for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector4")
            .field("x", &self.inner.x)
            .field("y", &self.inner.y)
            .field("z", &self.inner.z)
            .field("w", &self.inner.w)
            .finish()
    }
}
