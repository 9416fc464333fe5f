//! Double-precision 4x4 matrices for transforming points and directions in 3D
//! rendering.
//!
//! Matrices are column-major, indexed as `m[col][row]`, and follow the
//! OpenGL conventions for projections: right-handed view space looking down
//! the negative z-axis and clip space coordinates in `[-1, 1]`.

#[macro_use]
mod macros;

pub mod angle;
pub mod chain;
#[cfg(feature = "ron")]
pub mod io;
pub mod matrix;
pub mod projection;
pub mod vector;

pub use angle::{Angle, Degrees, Radians};
pub use chain::{ChainAngle, TransformChain, TransformStep};
pub use matrix::Matrix4;
pub use vector::{Vector3, Vector4};
