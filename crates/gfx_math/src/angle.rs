//! Angle units.
//!
//! All trigonometry in this crate is done in radians. Operations taking an
//! angle accept any [`Angle`], so a degree value has to be wrapped in
//! [`Degrees`] to be converted rather than being silently misread.

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::{
    cmp::Ordering,
    f64::consts::{FRAC_1_PI, PI},
    ops::{Add, Div, Mul, Sub},
};

/// Represents an angle.
pub trait Angle: Copy {
    /// Creates a zero angle.
    fn zero() -> Self;

    /// Returns the angle as degrees.
    fn as_degrees(self) -> Degrees;

    /// Returns the angle as radians.
    fn as_radians(self) -> Radians;

    /// Returns the value of the angle in degrees.
    fn degrees(self) -> f64;

    /// Returns the value of the angle in radians.
    fn radians(self) -> f64;
}

/// An angle in degrees.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Degrees(pub f64);

/// An angle in radians.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Radians(pub f64);

impl Angle for Degrees {
    fn zero() -> Self {
        Self(0.0)
    }

    fn as_degrees(self) -> Degrees {
        self
    }

    fn as_radians(self) -> Radians {
        Radians::from(self)
    }

    fn degrees(self) -> f64 {
        self.0
    }

    fn radians(self) -> f64 {
        degrees_to_radians(self.0)
    }
}

impl Angle for Radians {
    fn zero() -> Self {
        Self(0.0)
    }

    fn as_degrees(self) -> Degrees {
        Degrees::from(self)
    }

    fn as_radians(self) -> Radians {
        self
    }

    fn degrees(self) -> f64 {
        radians_to_degrees(self.0)
    }

    fn radians(self) -> f64 {
        self.0
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Self(radians_to_degrees(rad.0))
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Self(degrees_to_radians(deg.0))
    }
}

macro_rules! impl_angle_arithmetic {
    ($t:ident, $other:ident, $value:ident) => {
        impl Add for $t {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Add<$other> for $t {
            type Output = Self;
            fn add(self, rhs: $other) -> Self {
                Self(self.0 + rhs.$value())
            }
        }

        impl Sub for $t {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Sub<$other> for $t {
            type Output = Self;
            fn sub(self, rhs: $other) -> Self {
                Self(self.0 - rhs.$value())
            }
        }

        impl Mul<f64> for $t {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $t {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl PartialEq<$other> for $t {
            fn eq(&self, rhs: &$other) -> bool {
                self.0 == rhs.$value()
            }
        }

        impl PartialOrd<$other> for $t {
            fn partial_cmp(&self, rhs: &$other) -> Option<Ordering> {
                self.0.partial_cmp(&rhs.$value())
            }
        }

        impl AbsDiffEq for $t {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                f64::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                self.0.abs_diff_eq(&other.0, epsilon)
            }
        }

        impl RelativeEq for $t {
            fn default_max_relative() -> f64 {
                f64::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
                self.0.relative_eq(&other.0, epsilon, max_relative)
            }
        }
    };
}

impl_angle_arithmetic!(Degrees, Radians, degrees);
impl_angle_arithmetic!(Radians, Degrees, radians);

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 * FRAC_1_PI)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}
