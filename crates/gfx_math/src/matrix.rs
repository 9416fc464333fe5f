//! Matrices.

use crate::{
    angle::Angle,
    vector::{Vector3, Vector4},
};
use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// Rotation axes with a norm not exceeding this value are treated as
/// degenerate, in which case rotation leaves the matrix unchanged.
pub const MIN_ROTATION_AXIS_NORM: f64 = 1e-4;

/// A 4x4 matrix of double-precision elements, stored as four columns.
///
/// Indexing follows the column-major convention throughout: `m[col][row]`.
/// The 16 elements are laid out contiguously in column-major order, which is
/// the layout [`Self::as_column_major_array`] exposes to rendering code.
///
/// Operations that both read and write the same matrix compute their result
/// into a temporary before assigning it, so `m *= m` and similar
/// self-referencing compositions are always well-defined.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Matrix4 {
    columns: [Vector4; 4],
}

impl Matrix4 {
    /// Creates the identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_columns(
            Vector4::unit_x(),
            Vector4::unit_y(),
            Vector4::unit_z(),
            Vector4::unit_w(),
        )
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::from_columns(
            Vector4::zeros(),
            Vector4::zeros(),
            Vector4::zeros(),
            Vector4::zeros(),
        )
    }

    /// Creates a diagonal matrix with the given vector as the diagonal.
    #[inline]
    pub const fn from_diagonal(diagonal: &Vector4) -> Self {
        let mut m = Self::zeros();
        *m.columns[0].x_mut() = diagonal.x();
        *m.columns[1].y_mut() = diagonal.y();
        *m.columns[2].z_mut() = diagonal.z();
        *m.columns[3].w_mut() = diagonal.w();
        m
    }

    /// Creates a matrix with the given columns.
    #[inline]
    pub const fn from_columns(
        column_0: Vector4,
        column_1: Vector4,
        column_2: Vector4,
        column_3: Vector4,
    ) -> Self {
        Self {
            columns: [column_0, column_1, column_2, column_3],
        }
    }

    /// Creates a matrix from 16 elements in column-major order.
    #[inline]
    pub fn from_column_major_array(elements: [f64; 16]) -> Self {
        bytemuck::cast(elements)
    }

    /// Creates the matrix with the top-left 3x3 block set to the outer
    /// product of `a` and `b` (`m[i][j] = a[i] * b[j]`) and every other
    /// element zero.
    pub(crate) fn from_outer_product(a: &Vector3, b: &Vector3) -> Self {
        let mut m = Self::zeros();
        for i in 0..3 {
            for j in 0..3 {
                m.columns[i][j] = a[i] * b[j];
            }
        }
        m
    }

    /// Creates a translation matrix: the identity with the given translation
    /// in rows 0-2 of column 3.
    #[inline]
    pub fn translation(translation: &Vector3) -> Self {
        let mut m = Self::identity();
        m.columns[3] = translation.extended(1.0);
        m
    }

    /// Resets this matrix to the identity.
    #[inline]
    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    /// Overwrites this matrix with the elements of `source`.
    #[inline]
    pub fn copy_from(&mut self, source: &Self) {
        self.columns = source.columns;
    }

    /// The column with the given index.
    ///
    /// # Panics
    /// If `index` is 4 or larger.
    #[inline]
    pub fn column(&self, index: usize) -> &Vector4 {
        &self.columns[index]
    }

    /// Sets the column with the given index.
    ///
    /// # Panics
    /// If `index` is 4 or larger.
    #[inline]
    pub fn set_column(&mut self, index: usize, column: Vector4) {
        self.columns[index] = column;
    }

    /// Gathers the row with the given index from the four columns.
    ///
    /// # Panics
    /// If `index` is 4 or larger.
    #[inline]
    pub fn row(&self, index: usize) -> Vector4 {
        Vector4::new(
            self.columns[0][index],
            self.columns[1][index],
            self.columns[2][index],
            self.columns[3][index],
        )
    }

    /// Returns the element at the given row and column.
    ///
    /// # Panics
    /// If the indices are outside the matrix.
    #[inline]
    pub fn element(&self, row: usize, column: usize) -> f64 {
        self.columns[column][row]
    }

    /// Returns a mutable reference to the element at the given row and
    /// column.
    ///
    /// # Panics
    /// If the indices are outside the matrix.
    #[inline]
    pub fn element_mut(&mut self, row: usize, column: usize) -> &mut f64 {
        &mut self.columns[column][row]
    }

    /// Returns the transpose of this matrix.
    pub fn transposed(&self) -> Self {
        Self::from_columns(self.row(0), self.row(1), self.row(2), self.row(3))
    }

    /// Transposes this matrix in place.
    #[inline]
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// Returns this matrix with every element multiplied by `scaling`.
    #[inline]
    pub fn scaled(&self, scaling: f64) -> Self {
        self.mapped_columns(|column| column * scaling)
    }

    /// Returns this matrix with its first three columns multiplied by `sx`,
    /// `sy` and `sz` respectively. The fourth column, which holds the
    /// translation of an affine transform, is kept as is.
    pub fn scaled_anisotropic(&self, sx: f64, sy: f64, sz: f64) -> Self {
        Self::from_columns(
            self.columns[0] * sx,
            self.columns[1] * sy,
            self.columns[2] * sz,
            self.columns[3],
        )
    }

    /// Scales the first three columns of this matrix in place. See
    /// [`Self::scaled_anisotropic`].
    #[inline]
    pub fn scale_anisotropic(&mut self, sx: f64, sy: f64, sz: f64) {
        *self = self.scaled_anisotropic(sx, sy, sz);
    }

    /// Computes the matrix product `self * other`, so that applying the
    /// result to a vector applies `other` first and `self` second.
    pub fn mul_matrix(&self, other: &Self) -> Self {
        let a = &self.columns;
        let b = &other.columns;

        let mut product = Self::zeros();
        for (c, column) in product.columns.iter_mut().enumerate() {
            for r in 0..4 {
                column[r] = (0..4).fold(0.0, |sum, k| sum + a[k][r] * b[c][k]);
            }
        }
        product
    }

    /// Applies this matrix to the given 4D vector.
    pub fn mul_vector(&self, vector: &Vector4) -> Vector4 {
        let mut result = Vector4::zeros();
        for j in 0..4 {
            result[j] = (0..4).fold(0.0, |sum, i| sum + self.columns[i][j] * vector[i]);
        }
        result
    }

    /// Composes this matrix with a translation expressed in the matrix' own
    /// local frame, without resetting the rest of the matrix.
    ///
    /// Each element of column 3 is incremented by the dot product of the
    /// corresponding row with `(x, y, z, 0)`, which is equivalent to
    /// `*self = *self * Matrix4::translation(translation)`.
    pub fn translate_in_place(&mut self, translation: &Vector3) {
        let translation = translation.extended(0.0);
        for i in 0..4 {
            let row = self.row(i);
            self.columns[3][i] += row.dot(&translation);
        }
    }

    /// Returns this matrix multiplied from the right by the rotation about the
    /// given axis by the given angle, computed with Rodrigues' rotation
    /// formula. The axis does not have to be normalized.
    ///
    /// Unless the norm of the axis exceeds [`MIN_ROTATION_AXIS_NORM`], no
    /// rotation is applied and an unchanged copy of this matrix is returned.
    /// This includes axes with a NaN norm.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn rotated<A: Angle>(&self, axis: &Vector3, angle: A) -> Self {
        let axis_norm = axis.norm();
        if !(axis_norm > MIN_ROTATION_AXIS_NORM) {
            log::trace!("Skipping rotation about degenerate axis {axis:?} (norm {axis_norm:e})");
            return *self;
        }

        let (sin, cos) = angle.radians().sin_cos();
        let u = axis.normalized();

        let outer = Self::from_outer_product(&u, &u);

        let skew = Self::from_columns(
            Vector4::new(0.0, u.z(), -u.y(), 0.0),
            Vector4::new(-u.z(), 0.0, u.x(), 0.0),
            Vector4::new(u.y(), -u.x(), 0.0, 0.0),
            Vector4::zeros(),
        )
        .scaled(sin);

        let complement = (Self::identity() - outer).scaled(cos);

        let mut rotation = outer + complement + skew;
        rotation.columns[3][3] = 1.0;

        self.mul_matrix(&rotation)
    }

    /// Rotates this matrix in place. See [`Self::rotated`].
    #[inline]
    pub fn rotate<A: Angle>(&mut self, axis: &Vector3, angle: A) {
        *self = self.rotated(axis, angle);
    }

    /// Returns this matrix multiplied from the right by the rotation about
    /// the x-axis by the given angle.
    pub fn rotated_x<A: Angle>(&self, angle: A) -> Self {
        let (s, c) = angle.radians().sin_cos();
        self.mul_matrix(&Self::from_columns(
            Vector4::unit_x(),
            Vector4::new(0.0, c, s, 0.0),
            Vector4::new(0.0, -s, c, 0.0),
            Vector4::unit_w(),
        ))
    }

    /// Returns this matrix multiplied from the right by the rotation about
    /// the y-axis by the given angle.
    pub fn rotated_y<A: Angle>(&self, angle: A) -> Self {
        let (s, c) = angle.radians().sin_cos();
        self.mul_matrix(&Self::from_columns(
            Vector4::new(c, 0.0, -s, 0.0),
            Vector4::unit_y(),
            Vector4::new(s, 0.0, c, 0.0),
            Vector4::unit_w(),
        ))
    }

    /// Returns this matrix multiplied from the right by the rotation about
    /// the z-axis by the given angle.
    pub fn rotated_z<A: Angle>(&self, angle: A) -> Self {
        let (s, c) = angle.radians().sin_cos();
        self.mul_matrix(&Self::from_columns(
            Vector4::new(c, s, 0.0, 0.0),
            Vector4::new(-s, c, 0.0, 0.0),
            Vector4::unit_z(),
            Vector4::unit_w(),
        ))
    }

    #[inline]
    pub fn rotate_x<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_x(angle);
    }

    #[inline]
    pub fn rotate_y<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_y(angle);
    }

    #[inline]
    pub fn rotate_z<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_z(angle);
    }

    /// Computes the determinant of this matrix.
    pub fn determinant(&self) -> f64 {
        let (s, c) = self.two_by_two_minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Returns the inverse of this matrix, computed analytically by cofactor
    /// expansion.
    ///
    /// The matrix is assumed to be invertible. No check is made: if the
    /// determinant is zero the result will be non-finite.
    pub fn inverted(&self) -> Self {
        let a = &self.columns;
        let (s, c) = self.two_by_two_minors();

        let inverse_determinant = 1.0
            / (s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1]
                + s[5] * c[0]);

        let column_0 = Vector4::new(
            a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3],
            -a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3],
            a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3],
            -a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3],
        );
        let column_1 = Vector4::new(
            -a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1],
            a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1],
            -a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1],
            a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1],
        );
        let column_2 = Vector4::new(
            a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0],
            -a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0],
            a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0],
            -a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0],
        );
        let column_3 = Vector4::new(
            -a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0],
            a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0],
            -a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0],
            a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0],
        );

        Self::from_columns(column_0, column_1, column_2, column_3).scaled(inverse_determinant)
    }

    /// Inverts this matrix in place. See [`Self::inverted`].
    #[inline]
    pub fn invert(&mut self) {
        *self = self.inverted();
    }

    /// Returns this matrix with the xyz-parts of its first three columns made
    /// orthonormal by Gram-Schmidt.
    ///
    /// The columns are processed in the order 2, 1, 0: column 2 keeps its
    /// direction, column 1 is made orthogonal to column 2 and column 0 is made
    /// orthogonal to both. The w-components, as well as column 3, are left
    /// untouched.
    pub fn orthonormalized(&self) -> Self {
        let mut m = *self;

        let z = m.columns[2].xyz().normalized();
        m.set_column_xyz(2, &z);

        let y = m.columns[1].xyz();
        let y = y - z * y.dot(&z);
        m.set_column_xyz(1, &y);

        let y = m.columns[1].xyz().normalized();
        m.set_column_xyz(1, &y);

        let x = m.columns[0].xyz();
        let x = x - z * x.dot(&z);
        m.set_column_xyz(0, &x);

        let x = m.columns[0].xyz();
        let x = (x - y * x.dot(&y)).normalized();
        m.set_column_xyz(0, &x);

        m
    }

    /// Orthonormalizes this matrix in place. See [`Self::orthonormalized`].
    #[inline]
    pub fn orthonormalize(&mut self) {
        *self = self.orthonormalized();
    }

    /// The 16 elements in column-major order, without copying.
    #[inline]
    pub fn as_column_major_array(&self) -> &[f64; 16] {
        bytemuck::cast_ref(self)
    }

    /// The 16 elements in row-major order.
    #[inline]
    pub fn to_row_major_array(&self) -> [f64; 16] {
        *self.transposed().as_column_major_array()
    }

    /// The 16 elements in column-major order, converted to single precision
    /// for pipelines that expect `f32` data.
    #[inline]
    pub fn to_column_major_f32(&self) -> [f32; 16] {
        self.as_column_major_array().map(|element| element as f32)
    }

    /// Returns a matrix with the given closure applied to each element.
    #[inline]
    pub fn mapped(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        self.mapped_columns(|column| column.mapped(&mut f))
    }

    #[inline]
    fn mapped_columns(&self, f: impl FnMut(Vector4) -> Vector4) -> Self {
        Self {
            columns: self.columns.map(f),
        }
    }

    fn set_column_xyz(&mut self, index: usize, xyz: &Vector3) {
        let column = &mut self.columns[index];
        *column.x_mut() = xyz.x();
        *column.y_mut() = xyz.y();
        *column.z_mut() = xyz.z();
    }

    /// The six 2x2 minors of the first two columns and the six of the last
    /// two columns, shared by the determinant and the inverse.
    fn two_by_two_minors(&self) -> ([f64; 6], [f64; 6]) {
        let a = &self.columns;
        let s = [
            a[0][0] * a[1][1] - a[1][0] * a[0][1],
            a[0][0] * a[1][2] - a[1][0] * a[0][2],
            a[0][0] * a[1][3] - a[1][0] * a[0][3],
            a[0][1] * a[1][2] - a[1][1] * a[0][2],
            a[0][1] * a[1][3] - a[1][1] * a[0][3],
            a[0][2] * a[1][3] - a[1][2] * a[0][3],
        ];
        let c = [
            a[2][0] * a[3][1] - a[3][0] * a[2][1],
            a[2][0] * a[3][2] - a[3][0] * a[2][2],
            a[2][0] * a[3][3] - a[3][0] * a[2][3],
            a[2][1] * a[3][2] - a[3][1] * a[2][2],
            a[2][1] * a[3][3] - a[3][1] * a[2][3],
            a[2][2] * a[3][3] - a[3][2] * a[2][3],
        ];
        (s, c)
    }
}

impl Index<usize> for Matrix4 {
    type Output = Vector4;

    #[inline]
    fn index(&self, column: usize) -> &Self::Output {
        &self.columns[column]
    }
}

impl IndexMut<usize> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, column: usize) -> &mut Self::Output {
        &mut self.columns[column]
    }
}

impl_binop!(Add, add, Matrix4, Matrix4, Matrix4, |a, b| {
    Matrix4::from_columns(
        a.columns[0] + b.columns[0],
        a.columns[1] + b.columns[1],
        a.columns[2] + b.columns[2],
        a.columns[3] + b.columns[3],
    )
});

impl_binop!(Sub, sub, Matrix4, Matrix4, Matrix4, |a, b| {
    Matrix4::from_columns(
        a.columns[0] - b.columns[0],
        a.columns[1] - b.columns[1],
        a.columns[2] - b.columns[2],
        a.columns[3] - b.columns[3],
    )
});

impl_binop!(Mul, mul, Matrix4, Matrix4, Matrix4, |a, b| {
    a.mul_matrix(b)
});

impl_binop!(Mul, mul, Matrix4, Vector4, Vector4, |a, b| {
    a.mul_vector(b)
});

impl_binop!(Mul, mul, Matrix4, f64, Matrix4, |a, b| { a.scaled(*b) });

impl_binop!(Mul, mul, f64, Matrix4, Matrix4, |a, b| { b.scaled(*a) });

impl_binop_assign!(AddAssign, add_assign, Matrix4, Matrix4, |a, b| {
    *a = *a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Matrix4, Matrix4, |a, b| {
    *a = *a - b;
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4, Matrix4, |a, b| {
    *a = a.mul_matrix(b);
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4, f64, |a, b| {
    *a = a.scaled(*b);
});

impl_unary_op!(Neg, neg, Matrix4, Matrix4, |val| {
    val.mapped_columns(|column| -column)
});

impl_abs_diff_eq!(Matrix4, |a, b, epsilon| {
    a.columns
        .iter()
        .zip(&b.columns)
        .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
});

impl_relative_eq!(Matrix4, |a, b, epsilon, max_relative| {
    a.columns
        .iter()
        .zip(&b.columns)
        .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
});

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(6);
        for i in 0..4 {
            let row = self.row(i);
            writeln!(
                f,
                "[{:>w$.p$}, {:>w$.p$}, {:>w$.p$}, {:>w$.p$}]",
                row.x(),
                row.y(),
                row.z(),
                row.w(),
                w = precision + 6,
                p = precision,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use crate::angle::{Degrees, Radians};
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPSILON: f64 = 1e-12;

    fn test_matrix() -> Matrix4 {
        Matrix4::from_column_major_array([
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ])
    }

    fn invertible_test_matrix() -> Matrix4 {
        Matrix4::from_column_major_array([
            2.0, 0.5, -1.0, 0.0, //
            1.0, 3.0, 0.25, 0.0, //
            0.0, -2.0, 4.0, 0.5, //
            1.5, 2.5, -3.5, 1.0,
        ])
    }

    prop_compose! {
        fn matrix_strategy(max_element: f64)(
            elements in prop::array::uniform16(-max_element..max_element)
        ) -> Matrix4 {
            Matrix4::from_column_major_array(elements)
        }
    }

    prop_compose! {
        fn diagonally_dominant_matrix_strategy()(
            matrix in matrix_strategy(1.0)
        ) -> Matrix4 {
            matrix + Matrix4::identity().scaled(5.0)
        }
    }

    prop_compose! {
        fn axis_strategy()(
            x in -1.0..1.0,
            y in -1.0..1.0,
            z in -1.0..1.0,
        ) -> Vector3 {
            Vector3::new(x, y, z) + Vector3::same(0.01)
        }
    }

    #[test]
    fn creating_matrix4_identity_gives_identity_matrix() {
        let identity = Matrix4::identity();
        for column in 0..4 {
            for row in 0..4 {
                let expected = if row == column { 1.0 } else { 0.0 };
                assert_eq!(identity[column][row], expected);
            }
        }
    }

    #[test]
    fn setting_matrix4_to_identity_overwrites_all_elements() {
        let mut matrix = test_matrix();
        matrix.set_identity();
        assert_eq!(matrix, Matrix4::identity());
    }

    #[test]
    fn creating_matrix4_from_diagonal_works() {
        let matrix = Matrix4::from_diagonal(&Vector4::new(2.0, 3.0, 4.0, 5.0));
        assert_eq!(matrix.element(0, 0), 2.0);
        assert_eq!(matrix.element(1, 1), 3.0);
        assert_eq!(matrix.element(2, 2), 4.0);
        assert_eq!(matrix.element(3, 3), 5.0);
        assert_eq!(matrix.element(0, 1), 0.0);
        assert_eq!(matrix.element(3, 2), 0.0);
    }

    #[test]
    fn creating_matrix4_from_column_major_array_fills_columns_first() {
        let matrix = test_matrix();
        assert_eq!(*matrix.column(0), Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(*matrix.column(3), Vector4::new(13.0, 14.0, 15.0, 16.0));
        assert_eq!(matrix[1][2], 7.0);
        assert_eq!(matrix.element(2, 1), 7.0);
    }

    #[test]
    fn copying_matrix4_from_source_overwrites_all_elements() {
        let source = test_matrix();
        let mut matrix = Matrix4::identity();
        matrix.copy_from(&source);
        assert_eq!(matrix, source);
    }

    #[test]
    fn extracting_matrix4_row_gathers_across_columns() {
        let matrix = test_matrix();
        assert_eq!(matrix.row(0), Vector4::new(1.0, 5.0, 9.0, 13.0));
        assert_eq!(matrix.row(3), Vector4::new(4.0, 8.0, 12.0, 16.0));
    }

    #[test]
    fn setting_matrix4_columns_and_elements_works() {
        let mut matrix = Matrix4::zeros();
        matrix.set_column(2, Vector4::new(1.0, 2.0, 3.0, 4.0));
        *matrix.element_mut(0, 3) = 9.0;
        matrix[1][1] = -1.0;

        assert_eq!(*matrix.column(2), Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(matrix[3][0], 9.0);
        assert_eq!(matrix.element(1, 1), -1.0);
    }

    #[test]
    fn transposing_matrix4_swaps_rows_and_columns() {
        let matrix = test_matrix();
        let transposed = matrix.transposed();
        for c in 0..4 {
            for r in 0..4 {
                assert_eq!(transposed[c][r], matrix[r][c]);
            }
        }
    }

    #[test]
    fn transposing_matrix4_in_place_works() {
        let mut matrix = test_matrix();
        matrix.transpose();
        assert_eq!(matrix, test_matrix().transposed());
    }

    #[test]
    fn matrix4_arithmetic_operations_work() {
        let a = test_matrix();
        let b = Matrix4::identity();

        let sum = a + b;
        assert_eq!(sum[0][0], 2.0);
        assert_eq!(sum[0][1], 2.0);

        assert_eq!(&sum - &b, a);
        assert_eq!(a * 2.0, a.mapped(|element| element * 2.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, a.scaled(-1.0));

        let mut c = a;
        c += b;
        c -= a;
        c *= 3.0;
        assert_eq!(c, Matrix4::from_diagonal(&Vector4::same(3.0)));
    }

    #[test]
    fn anisotropic_scaling_keeps_translation_column() {
        let matrix = test_matrix();
        let scaled = matrix.scaled_anisotropic(2.0, 3.0, 4.0);

        assert_eq!(*scaled.column(0), matrix.column(0) * 2.0);
        assert_eq!(*scaled.column(1), matrix.column(1) * 3.0);
        assert_eq!(*scaled.column(2), matrix.column(2) * 4.0);
        assert_eq!(scaled.column(3), matrix.column(3));

        let mut in_place = matrix;
        in_place.scale_anisotropic(2.0, 3.0, 4.0);
        assert_eq!(in_place, scaled);
    }

    #[test]
    fn multiplying_matrix4_follows_column_convention() {
        let a = test_matrix();
        let b = invertible_test_matrix();
        let product = a * b;

        for c in 0..4 {
            for r in 0..4 {
                let expected: f64 = (0..4).map(|k| a[k][r] * b[c][k]).sum();
                assert_abs_diff_eq!(product[c][r], expected, epsilon = EPSILON);
            }
        }
    }

    #[test]
    fn multiplying_translation_and_scaling_applies_scaling_first() {
        let translation = Matrix4::translation(&Vector3::new(1.0, 2.0, 3.0));
        let scaling = Matrix4::from_diagonal(&Vector4::new(2.0, 2.0, 2.0, 1.0));

        let point = Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!((translation * scaling) * point, Vector4::new(3.0, 4.0, 5.0, 1.0));
        assert_eq!((scaling * translation) * point, Vector4::new(4.0, 6.0, 8.0, 1.0));
    }

    #[test]
    fn multiplying_matrix4_by_itself_in_place_uses_original_operands() {
        let original = invertible_test_matrix();
        let mut matrix = original;
        matrix *= matrix;
        assert_eq!(matrix, original.mul_matrix(&original));

        let other = test_matrix();
        let mut left = original;
        left *= other;
        assert_eq!(left, original * other);
    }

    #[test]
    fn multiplying_matrix4_with_vector_works() {
        let matrix = test_matrix();
        let vector = Vector4::new(1.0, 0.0, -1.0, 2.0);
        let expected = matrix.column(0) - matrix.column(2) + matrix.column(3) * 2.0;
        assert_eq!(matrix * vector, expected);
        assert_eq!(matrix.mul_vector(&vector), expected);
    }

    #[test]
    fn creating_translation_matrix_sets_translation_column() {
        let matrix = Matrix4::translation(&Vector3::new(1.0, -2.0, 3.0));
        assert_eq!(*matrix.column(3), Vector4::new(1.0, -2.0, 3.0, 1.0));
        assert_eq!(*matrix.column(0), Vector4::unit_x());
        assert_eq!(*matrix.column(1), Vector4::unit_y());
        assert_eq!(*matrix.column(2), Vector4::unit_z());
    }

    #[test]
    fn translating_identity_in_place_gives_translation_matrix() {
        let mut matrix = Matrix4::identity();
        matrix.translate_in_place(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(matrix, Matrix4::translation(&Vector3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn translating_in_place_moves_along_local_axes() {
        let mut matrix = Matrix4::identity().rotated_z(Radians(FRAC_PI_2));
        matrix.translate_in_place(&Vector3::new(1.0, 0.0, 0.0));

        assert_abs_diff_eq!(
            *matrix.column(3),
            Vector4::new(0.0, 1.0, 0.0, 1.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn translating_in_place_equals_multiplying_with_translation() {
        let mut matrix = invertible_test_matrix();
        let translation = Vector3::new(-0.5, 2.0, 1.5);
        let expected = matrix * Matrix4::translation(&translation);
        matrix.translate_in_place(&translation);
        assert_abs_diff_eq!(matrix, expected, epsilon = EPSILON);
    }

    #[test]
    fn outer_product_fills_only_upper_left_block() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        let matrix = Matrix4::from_outer_product(&a, &b);

        for i in 0..4 {
            for j in 0..4 {
                let expected = if i < 3 && j < 3 { a[i] * b[j] } else { 0.0 };
                assert_eq!(matrix[i][j], expected);
            }
        }
    }

    #[test]
    fn rotating_about_zero_axis_returns_unchanged_matrix() {
        let matrix = test_matrix();
        for angle in [0.0, 0.3, FRAC_PI_2, PI, -7.0] {
            assert_eq!(matrix.rotated(&Vector3::zeros(), Radians(angle)), matrix);
        }
    }

    #[test]
    fn rotating_about_axis_at_degeneracy_threshold_returns_unchanged_matrix() {
        let matrix = test_matrix();
        let tiny_axis = Vector3::new(MIN_ROTATION_AXIS_NORM, 0.0, 0.0);
        assert_eq!(matrix.rotated(&tiny_axis, Radians(1.0)), matrix);

        let mut in_place = matrix;
        in_place.rotate(&Vector3::new(0.0, 5e-5, 5e-5), Radians(1.0));
        assert_eq!(in_place, matrix);
    }

    #[test]
    fn rotating_about_nan_axis_returns_unchanged_matrix() {
        let matrix = Matrix4::translation(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            matrix.rotated(&Vector3::new(f64::NAN, 0.0, 0.0), Radians(0.5)),
            matrix
        );

        let mut in_place = invertible_test_matrix();
        in_place.rotate(&Vector3::new(0.0, f64::NAN, 1.0), Degrees(30.0));
        assert_eq!(in_place, invertible_test_matrix());
    }

    #[test]
    fn rotating_about_axis_just_above_threshold_rotates() {
        let matrix = Matrix4::identity();
        let axis = Vector3::new(0.0, 0.0, 2.0 * MIN_ROTATION_AXIS_NORM);
        assert_abs_diff_eq!(
            matrix.rotated(&axis, Radians(FRAC_PI_2)),
            matrix.rotated_z(Radians(FRAC_PI_2)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn general_rotation_matches_axis_aligned_rotations() {
        let matrix = invertible_test_matrix();
        for angle in [0.0, FRAC_PI_4, FRAC_PI_2, PI] {
            let angle = Radians(angle);
            assert_abs_diff_eq!(
                matrix.rotated(&Vector3::unit_x(), angle),
                matrix.rotated_x(angle),
                epsilon = EPSILON
            );
            assert_abs_diff_eq!(
                matrix.rotated(&Vector3::unit_y(), angle),
                matrix.rotated_y(angle),
                epsilon = EPSILON
            );
            assert_abs_diff_eq!(
                matrix.rotated(&Vector3::unit_z(), angle),
                matrix.rotated_z(angle),
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn rotation_axis_length_does_not_matter() {
        let matrix = invertible_test_matrix();
        let axis = Vector3::new(1.0, -2.0, 0.5);
        assert_abs_diff_eq!(
            matrix.rotated(&axis, Radians(0.7)),
            matrix.rotated(&(axis * 40.0), Radians(0.7)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn rotating_by_degrees_matches_rotating_by_radians() {
        let matrix = invertible_test_matrix();
        let axis = Vector3::new(0.3, 0.4, -1.0);
        assert_abs_diff_eq!(
            matrix.rotated(&axis, Degrees(90.0)),
            matrix.rotated(&axis, Radians(FRAC_PI_2)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn rotating_about_axes_in_place_works() {
        let matrix = invertible_test_matrix();
        let mut rotated = matrix;
        rotated.rotate_x(Radians(0.1));
        rotated.rotate_y(Radians(0.2));
        rotated.rotate_z(Radians(0.3));

        let expected = matrix
            .rotated_x(Radians(0.1))
            .rotated_y(Radians(0.2))
            .rotated_z(Radians(0.3));
        assert_eq!(rotated, expected);
    }

    #[test]
    fn rotating_unit_vectors_about_z_is_counterclockwise() {
        let rotation = Matrix4::identity().rotated_z(Radians(FRAC_PI_2));
        assert_abs_diff_eq!(
            rotation * Vector4::unit_x(),
            Vector4::unit_y(),
            epsilon = EPSILON
        );
        let rotation = Matrix4::identity().rotated_x(Radians(FRAC_PI_2));
        assert_abs_diff_eq!(
            rotation * Vector4::unit_y(),
            Vector4::unit_z(),
            epsilon = EPSILON
        );
        let rotation = Matrix4::identity().rotated_y(Radians(FRAC_PI_2));
        assert_abs_diff_eq!(
            rotation * Vector4::unit_z(),
            Vector4::unit_x(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn inverting_identity_gives_identity() {
        assert_eq!(Matrix4::identity().inverted(), Matrix4::identity());
    }

    #[test]
    fn inverting_matrix4_gives_inverse() {
        let matrix = invertible_test_matrix();
        let inverse = matrix.inverted();
        assert_abs_diff_eq!(inverse * matrix, Matrix4::identity(), epsilon = 1e-9);
        assert_abs_diff_eq!(matrix * inverse, Matrix4::identity(), epsilon = 1e-9);

        let mut in_place = matrix;
        in_place.invert();
        assert_eq!(in_place, inverse);
    }

    #[test]
    fn inverting_singular_matrix4_gives_non_finite_elements() {
        let singular = test_matrix();
        assert_eq!(singular.determinant(), 0.0);
        let inverse = singular.inverted();
        assert!(
            inverse
                .as_column_major_array()
                .iter()
                .any(|element| !element.is_finite())
        );
    }

    #[test]
    fn computing_determinant_works() {
        assert_eq!(Matrix4::identity().determinant(), 1.0);
        assert_eq!(
            Matrix4::from_diagonal(&Vector4::new(2.0, 3.0, 4.0, 5.0)).determinant(),
            120.0
        );
        assert_eq!(
            Matrix4::translation(&Vector3::new(4.0, 5.0, 6.0)).determinant(),
            1.0
        );
    }

    #[test]
    fn orthonormalizing_skewed_basis_gives_orthonormal_columns() {
        let matrix = Matrix4::from_columns(
            Vector4::new(1.0, 0.2, 0.1, 0.0),
            Vector4::new(0.3, 2.0, -0.4, 0.0),
            Vector4::new(0.0, 0.5, 3.0, 0.0),
            Vector4::new(7.0, 8.0, 9.0, 1.0),
        );
        let orthonormalized = matrix.orthonormalized();

        let x = orthonormalized.column(0).xyz();
        let y = orthonormalized.column(1).xyz();
        let z = orthonormalized.column(2).xyz();

        assert_abs_diff_eq!(x.norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(y.norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(z.norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(x.dot(&y), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(x.dot(&z), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(y.dot(&z), 0.0, epsilon = EPSILON);

        assert_eq!(orthonormalized.column(3), matrix.column(3));
    }

    #[test]
    fn orthonormalizing_keeps_direction_of_third_column() {
        let matrix = Matrix4::from_columns(
            Vector4::new(1.0, 1.0, 0.0, 0.0),
            Vector4::new(0.0, 1.0, 1.0, 0.0),
            Vector4::new(0.0, 0.0, 2.0, 0.0),
            Vector4::unit_w(),
        );
        let orthonormalized = matrix.orthonormalized();

        assert_abs_diff_eq!(
            orthonormalized.column(2).xyz(),
            Vector3::unit_z(),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            orthonormalized.column(1).xyz(),
            Vector3::unit_y(),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            orthonormalized.column(0).xyz(),
            Vector3::unit_x(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn orthonormalizing_depends_on_processing_order() {
        let matrix = Matrix4::from_columns(
            Vector4::new(1.0, 0.0, 0.0, 0.0),
            Vector4::new(1.0, 1.0, 0.0, 0.0),
            Vector4::new(0.0, 0.0, 1.0, 0.0),
            Vector4::unit_w(),
        );
        let orthonormalized = matrix.orthonormalized();

        // Column 1 takes precedence over column 0
        assert_abs_diff_eq!(
            orthonormalized.column(1).xyz(),
            Vector3::new(1.0, 1.0, 0.0).normalized(),
            epsilon = EPSILON
        );
        assert_abs_diff_ne!(
            orthonormalized.column(0).xyz(),
            Vector3::unit_x(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn orthonormalizing_in_place_works() {
        let matrix = invertible_test_matrix();
        let mut in_place = matrix;
        in_place.orthonormalize();
        assert_eq!(in_place, matrix.orthonormalized());
    }

    #[test]
    fn column_major_array_matches_indexing_convention() {
        let matrix = invertible_test_matrix();
        let elements = matrix.as_column_major_array();
        for c in 0..4 {
            for r in 0..4 {
                assert_eq!(elements[4 * c + r], matrix[c][r]);
            }
        }
        assert_eq!(Matrix4::from_column_major_array(*elements), matrix);
    }

    #[test]
    fn row_major_array_is_transpose_of_column_major_array() {
        let matrix = test_matrix();
        let elements = matrix.to_row_major_array();
        assert_eq!(&elements[0..4], &[1.0, 5.0, 9.0, 13.0]);
        assert_eq!(&elements[12..16], &[4.0, 8.0, 12.0, 16.0]);
    }

    #[test]
    fn converting_to_f32_keeps_column_major_order() {
        let matrix = test_matrix();
        let elements = matrix.to_column_major_f32();
        assert_eq!(elements[0], 1.0_f32);
        assert_eq!(elements[4], 5.0_f32);
        assert_eq!(elements[15], 16.0_f32);
    }

    #[test]
    fn displaying_matrix4_prints_rows() {
        let text = format!("{:.1}", Matrix4::translation(&Vector3::new(1.0, 2.0, 3.0)));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].replace(' ', ""), "[1.0,0.0,0.0,1.0]");
        assert_eq!(lines[3].replace(' ', ""), "[0.0,0.0,0.0,1.0]");
    }

    proptest! {
        #[test]
        fn multiplying_with_identity_gives_same_matrix(matrix in matrix_strategy(1e3)) {
            prop_assert_eq!(Matrix4::identity() * matrix, matrix);
            prop_assert_eq!(matrix * Matrix4::identity(), matrix);
        }
    }

    proptest! {
        #[test]
        fn transposing_twice_gives_same_matrix(matrix in matrix_strategy(1e3)) {
            prop_assert_eq!(matrix.transposed().transposed(), matrix);
        }
    }

    proptest! {
        #[test]
        fn inverse_times_matrix_gives_identity(matrix in diagonally_dominant_matrix_strategy()) {
            let product = matrix.inverted() * matrix;
            prop_assert!(approx::abs_diff_eq!(product, Matrix4::identity(), epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn determinant_of_product_is_product_of_determinants(
            a in diagonally_dominant_matrix_strategy(),
            b in diagonally_dominant_matrix_strategy(),
        ) {
            let expected = a.determinant() * b.determinant();
            prop_assert!(approx::relative_eq!(
                (a * b).determinant(),
                expected,
                max_relative = 1e-10
            ));
        }
    }

    proptest! {
        #[test]
        fn orthonormalizing_rotation_leaves_it_unchanged(
            axis in axis_strategy(),
            angle in -PI..PI,
        ) {
            let rotation = Matrix4::identity().rotated(&axis, Radians(angle));
            prop_assert!(approx::abs_diff_eq!(
                rotation.orthonormalized(),
                rotation,
                epsilon = 1e-12
            ));
        }
    }

    proptest! {
        #[test]
        fn orthonormalizing_is_idempotent(matrix in diagonally_dominant_matrix_strategy()) {
            let once = matrix.orthonormalized();
            prop_assert!(approx::abs_diff_eq!(once.orthonormalized(), once, epsilon = 1e-12));
        }
    }

    proptest! {
        #[test]
        fn rotation_keeps_axis_fixed_and_preserves_lengths(
            axis in axis_strategy(),
            angle in -PI..PI,
        ) {
            let rotation = Matrix4::identity().rotated(&axis, Radians(angle));

            let rotated_axis = rotation * axis.extended(0.0);
            prop_assert!(approx::abs_diff_eq!(rotated_axis.xyz(), axis, epsilon = 1e-12));

            let vector = Vector4::new(0.3, -1.2, 2.0, 0.0);
            prop_assert!(approx::abs_diff_eq!(
                (rotation * vector).norm(),
                vector.norm(),
                epsilon = 1e-12
            ));
            prop_assert!(approx::abs_diff_eq!(rotation.determinant(), 1.0, epsilon = 1e-12));
        }
    }
}
