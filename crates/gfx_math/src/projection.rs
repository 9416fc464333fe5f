//! Projection and view matrices.
//!
//! All constructors follow the OpenGL convention: a right-handed view space
//! with the camera looking down the negative z-axis, mapped to a clip space
//! whose normalized device coordinates span `[-1, 1]` along every axis.

use crate::{
    angle::Angle,
    matrix::Matrix4,
    vector::{Vector3, Vector4},
};

impl Matrix4 {
    /// Creates a perspective projection for the view frustum bounded by the
    /// given planes. `left`, `right`, `bottom` and `top` describe the window
    /// on the near plane. `near` and `far` are positive distances along the
    /// viewing direction.
    ///
    /// Degenerate bounds (`left == right`, `bottom == top` or
    /// `near == far`) give non-finite elements.
    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        Self::from_columns(
            Vector4::new(2.0 * near / width, 0.0, 0.0, 0.0),
            Vector4::new(0.0, 2.0 * near / height, 0.0, 0.0),
            Vector4::new(
                (right + left) / width,
                (top + bottom) / height,
                -(far + near) / depth,
                -1.0,
            ),
            Vector4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
        )
    }

    /// Creates an orthographic projection mapping the given axis-aligned box
    /// of view space to the clip space cube. `near` and `far` are distances
    /// along the viewing direction.
    ///
    /// Degenerate bounds give non-finite elements.
    pub fn orthographic(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        Self::from_columns(
            Vector4::new(2.0 / width, 0.0, 0.0, 0.0),
            Vector4::new(0.0, 2.0 / height, 0.0, 0.0),
            Vector4::new(0.0, 0.0, -2.0 / depth, 0.0),
            Vector4::new(
                -(right + left) / width,
                -(top + bottom) / height,
                -(far + near) / depth,
                1.0,
            ),
        )
    }

    /// Creates a symmetric perspective projection with the given vertical
    /// field of view and width-to-height aspect ratio.
    ///
    /// The field of view is used in radians: pass `Radians(x)` for a value
    /// already in radians, while a [`Degrees`](crate::angle::Degrees) value is
    /// converted to radians explicitly through [`Angle::radians`].
    ///
    /// # Warning
    /// A zero field of view, a zero aspect ratio or `near == far` gives
    /// non-finite elements.
    pub fn perspective<A: Angle>(
        vertical_field_of_view: A,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let a = 1.0 / (0.5 * vertical_field_of_view.radians()).tan();
        let depth = far - near;

        Self::from_columns(
            Vector4::new(a / aspect_ratio, 0.0, 0.0, 0.0),
            Vector4::new(0.0, a, 0.0, 0.0),
            Vector4::new(0.0, 0.0, -((far + near) / depth), -1.0),
            Vector4::new(0.0, 0.0, -((2.0 * far * near) / depth), 0.0),
        )
    }

    /// Creates a view matrix for a camera at `eye` looking towards `center`,
    /// with `up` indicating the upward direction.
    ///
    /// The camera looks down its local negative z-axis, and the eye position
    /// ends up at the origin of view space. `up` does not have to be
    /// orthogonal to the viewing direction, but it must not be parallel to
    /// it, nor may `eye` coincide with `center`. Either case gives non-finite
    /// elements.
    pub fn look_at(eye: &Vector3, center: &Vector3, up: &Vector3) -> Self {
        let forward = (center - eye).normalized();
        let side = forward.cross(up).normalized();
        let camera_up = side.cross(&forward);

        let mut view = Self::from_columns(
            Vector4::new(side.x(), camera_up.x(), -forward.x(), 0.0),
            Vector4::new(side.y(), camera_up.y(), -forward.y(), 0.0),
            Vector4::new(side.z(), camera_up.z(), -forward.z(), 0.0),
            Vector4::unit_w(),
        );
        view.translate_in_place(&(-eye));
        view
    }
}
