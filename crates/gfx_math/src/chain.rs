//! Declarative chains of transform steps.
//!
//! A [`TransformChain`] describes a transform as an ordered list of
//! [`TransformStep`]s, which makes it possible to specify view and projection
//! setups in configuration files rather than in code.

use crate::{
    angle::{Angle, Degrees, Radians},
    matrix::Matrix4,
    vector::{Vector3, Vector4},
};

/// An angle in a transform step, stored in the unit it was specified in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChainAngle {
    Radians(f64),
    Degrees(f64),
}

/// A single operation in a [`TransformChain`].
///
/// Steps that construct a matrix (translations, scalings, rotations and the
/// projection and view matrices) multiply the running matrix from the right
/// by the constructed matrix, so the last step is the first to act on a
/// transformed vector. [`TransformStep::Identity`] resets the running matrix,
/// and the remaining steps replace it with the result of the operation on it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum TransformStep {
    /// Resets the running matrix to the identity, discarding all earlier
    /// steps.
    Identity,
    /// Composes with a translation.
    Translate(Vector3),
    /// Translates in place along the running matrix' local axes.
    TranslateInPlace(Vector3),
    /// Multiplies every element by the given factor.
    Scale(f64),
    /// Scales the first three columns by the respective factors.
    ScaleAnisotropic(Vector3),
    /// Composes with a rotation about an arbitrary axis.
    Rotate { axis: Vector3, angle: ChainAngle },
    RotateX(ChainAngle),
    RotateY(ChainAngle),
    RotateZ(ChainAngle),
    Transpose,
    Invert,
    Orthonormalize,
    /// Composes with a general perspective projection.
    Frustum {
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    },
    /// Composes with an orthographic projection.
    Ortho {
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    },
    /// Composes with a symmetric perspective projection.
    Perspective {
        vertical_field_of_view: ChainAngle,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    },
    /// Composes with a view matrix.
    LookAt {
        eye: Vector3,
        center: Vector3,
        up: Vector3,
    },
}

/// An ordered list of [`TransformStep`]s evaluating to a single [`Matrix4`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformChain {
    steps: Vec<TransformStep>,
}

impl Angle for ChainAngle {
    fn zero() -> Self {
        Self::Radians(0.0)
    }

    fn as_degrees(self) -> Degrees {
        match self {
            Self::Radians(value) => Radians(value).as_degrees(),
            Self::Degrees(value) => Degrees(value),
        }
    }

    fn as_radians(self) -> Radians {
        match self {
            Self::Radians(value) => Radians(value),
            Self::Degrees(value) => Degrees(value).as_radians(),
        }
    }

    fn degrees(self) -> f64 {
        self.as_degrees().0
    }

    fn radians(self) -> f64 {
        self.as_radians().0
    }
}

impl From<Radians> for ChainAngle {
    fn from(angle: Radians) -> Self {
        Self::Radians(angle.0)
    }
}

impl From<Degrees> for ChainAngle {
    fn from(angle: Degrees) -> Self {
        Self::Degrees(angle.0)
    }
}

impl TransformStep {
    /// Applies this step to the given running matrix and returns the result.
    pub fn apply(&self, matrix: &Matrix4) -> Matrix4 {
        match self {
            Self::Identity => Matrix4::identity(),
            Self::Translate(translation) => matrix * Matrix4::translation(translation),
            Self::TranslateInPlace(translation) => {
                let mut matrix = *matrix;
                matrix.translate_in_place(translation);
                matrix
            }
            Self::Scale(scaling) => matrix.scaled(*scaling),
            Self::ScaleAnisotropic(scaling) => {
                matrix.scaled_anisotropic(scaling.x(), scaling.y(), scaling.z())
            }
            Self::Rotate { axis, angle } => matrix.rotated(axis, *angle),
            Self::RotateX(angle) => matrix.rotated_x(*angle),
            Self::RotateY(angle) => matrix.rotated_y(*angle),
            Self::RotateZ(angle) => matrix.rotated_z(*angle),
            Self::Transpose => matrix.transposed(),
            Self::Invert => matrix.inverted(),
            Self::Orthonormalize => matrix.orthonormalized(),
            &Self::Frustum {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => matrix * Matrix4::frustum(left, right, bottom, top, near, far),
            &Self::Ortho {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => matrix * Matrix4::orthographic(left, right, bottom, top, near, far),
            &Self::Perspective {
                vertical_field_of_view,
                aspect_ratio,
                near,
                far,
            } => matrix * Matrix4::perspective(vertical_field_of_view, aspect_ratio, near, far),
            Self::LookAt { eye, center, up } => matrix * Matrix4::look_at(eye, center, up),
        }
    }
}

impl TransformChain {
    /// Creates a chain performing the given steps in order.
    pub fn new(steps: Vec<TransformStep>) -> Self {
        Self { steps }
    }

    /// A small chain translating by `(1, 2, 3)` and then rotating 90 degrees
    /// about the z-axis, used as a template for chain files.
    pub fn example() -> Self {
        Self::new(vec![
            TransformStep::Translate(Vector3::new(1.0, 2.0, 3.0)),
            TransformStep::RotateZ(ChainAngle::Degrees(90.0)),
        ])
    }

    /// The steps of the chain, in the order they are performed.
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Appends a step to the end of the chain.
    pub fn push(&mut self, step: TransformStep) {
        self.steps.push(step);
    }

    /// Performs all steps in order, starting from the identity matrix, and
    /// returns the resulting matrix.
    pub fn evaluate(&self) -> Matrix4 {
        log::trace!("Evaluating transform chain with {} steps", self.steps.len());
        self.steps
            .iter()
            .fold(Matrix4::identity(), |matrix, step| step.apply(&matrix))
    }

    /// Evaluates the chain and applies the resulting matrix to the given
    /// vector.
    pub fn apply_to(&self, vector: &Vector4) -> Vector4 {
        self.evaluate() * vector
    }
}

#[cfg(feature = "ron")]
impl TransformChain {
    /// Reads a chain from the RON file at the given path.
    pub fn from_ron_file(file_path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        crate::io::parse_ron_file(file_path)
    }

    /// Writes the chain as a RON file at the given path, creating any missing
    /// parent directories.
    pub fn write_ron_file(
        &self,
        output_file_path: impl AsRef<std::path::Path>,
    ) -> anyhow::Result<()> {
        crate::io::write_ron_file(self, output_file_path)
    }
}

impl FromIterator<TransformStep> for TransformChain {
    fn from_iter<I: IntoIterator<Item = TransformStep>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<TransformStep> for TransformChain {
    fn extend<I: IntoIterator<Item = TransformStep>>(&mut self, iter: I) {
        self.steps.extend(iter);
    }
}
