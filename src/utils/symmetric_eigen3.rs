use crate::math::{Matrix, Real, Vector};

/// Maximum number of QL sweeps performed for each eigenvalue.
pub const MAX_QL_ITERATIONS: usize = 32;

/// Eigen-decomposition of a 3x3 symmetric matrix.
///
/// The matrix is first reduced to a tridiagonal form with a single Householder
/// reflection, then diagonalized with the implicit-shift QL algorithm. Eigenvalues are
/// sorted in decreasing order, so the eigenvector associated with the smallest
/// eigenvalue is always the last column of [`SymmetricEigen3::eigenvectors`].
///
/// The solver never loops more than [`MAX_QL_ITERATIONS`] times per eigenvalue and
/// always terminates with a finite orthonormal frame for finite input. A zero matrix
/// yields the identity frame with zero eigenvalues.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SymmetricEigen3 {
    /// The eigenvectors, stored column-wise. This is always a proper rotation matrix.
    pub eigenvectors: Matrix<Real>,
    /// The eigenvalues, sorted in decreasing order.
    pub eigenvalues: Vector<Real>,
    /// Did every QL sweep converge before reaching the iteration cap?
    pub converged: bool,
}

impl SymmetricEigen3 {
    /// Computes the eigen-decomposition of the symmetric matrix `m`.
    ///
    /// Only the upper triangle of `m` is read.
    pub fn new(m: &Matrix<Real>) -> Self {
        // Work on a matrix with entries in [-1, 1] so tiny covariances don't underflow.
        let scale = m.upper_triangle().amax();
        let scale = if scale.is_normal() { scale } else { 1.0 };

        let (mut q, mut diag, mut subd) = tridiagonalize(&(m / scale));
        let converged = ql_iterations(&mut q, &mut diag, &mut subd);
        sort_decreasing(&mut q, &mut diag);

        // Flip the first axis if needed so the frame is right-handed.
        if q.determinant() < 0.0 {
            for row in 0..3 {
                q[(row, 0)] = -q[(row, 0)];
            }
        }

        Self {
            eigenvectors: q,
            eigenvalues: Vector::new(diag[0], diag[1], diag[2]) * scale,
            converged,
        }
    }

    /// The eigenvector associated to the smallest eigenvalue.
    pub fn smallest_eigenvector(&self) -> Vector<Real> {
        self.eigenvectors.column(2).into_owned()
    }

    /// The eigenvector associated to the largest eigenvalue.
    pub fn largest_eigenvector(&self) -> Vector<Real> {
        self.eigenvectors.column(0).into_owned()
    }
}

fn tridiagonalize(m: &Matrix<Real>) -> (Matrix<Real>, [Real; 3], [Real; 3]) {
    let m00 = m[(0, 0)];
    let mut m01 = m[(0, 1)];
    let mut m02 = m[(0, 2)];
    let m11 = m[(1, 1)];
    let m12 = m[(1, 2)];
    let m22 = m[(2, 2)];

    let largest = m01.abs().max(m02.abs());
    let length = if largest > 0.0 {
        let (u, v) = (m01 / largest, m02 / largest);
        largest * (u * u + v * v).sqrt()
    } else {
        0.0
    };

    if m02 != 0.0 && length.is_normal() {
        let inv_length = 1.0 / length;
        m01 *= inv_length;
        m02 *= inv_length;
        let q = 2.0 * m01 * m12 + m02 * (m22 - m11);

        let diag = [m00, m11 + m02 * q, m22 - m02 * q];
        let subd = [length, m12 - m01 * q, 0.0];
        #[rustfmt::skip]
        let householder = Matrix::new(
            1.0, 0.0, 0.0,
            0.0, m01, m02,
            0.0, m02, -m01,
        );

        (householder, diag, subd)
    } else {
        (Matrix::identity(), [m00, m11, m22], [m01, m12, 0.0])
    }
}

fn ql_iterations(q: &mut Matrix<Real>, diag: &mut [Real; 3], subd: &mut [Real; 3]) -> bool {
    for i0 in 0..3 {
        let mut sweeps = 0;

        loop {
            // Find the first negligible off-diagonal element at or after `i0`.
            let mut i2 = i0;
            while i2 < 2 {
                let tmp = diag[i2].abs() + diag[i2 + 1].abs();
                if subd[i2].abs() + tmp == tmp {
                    break;
                }
                i2 += 1;
            }

            if i2 == i0 {
                break;
            }

            if sweeps == MAX_QL_ITERATIONS {
                return false;
            }
            sweeps += 1;

            let mut g = (diag[i0 + 1] - diag[i0]) / (2.0 * subd[i0]);
            let mut r = (g * g + 1.0).sqrt();
            g = if g < 0.0 {
                diag[i2] - diag[i0] + subd[i0] / (g - r)
            } else {
                diag[i2] - diag[i0] + subd[i0] / (g + r)
            };

            let mut sin: Real = 1.0;
            let mut cos: Real = 1.0;
            let mut p: Real = 0.0;

            for i3 in (i0..i2).rev() {
                let f = sin * subd[i3];
                let b = cos * subd[i3];

                if f.abs() >= g.abs() {
                    cos = g / f;
                    r = (cos * cos + 1.0).sqrt();
                    subd[i3 + 1] = f * r;
                    sin = 1.0 / r;
                    cos *= sin;
                } else {
                    sin = f / g;
                    r = (sin * sin + 1.0).sqrt();
                    subd[i3 + 1] = g * r;
                    cos = 1.0 / r;
                    sin *= cos;
                }

                g = diag[i3 + 1] - p;
                r = (diag[i3] - g) * sin + 2.0 * b * cos;
                p = sin * r;
                diag[i3 + 1] = g + p;
                g = cos * r - b;

                for row in 0..3 {
                    let f = q[(row, i3 + 1)];
                    q[(row, i3 + 1)] = sin * q[(row, i3)] + cos * f;
                    q[(row, i3)] = cos * q[(row, i3)] - sin * f;
                }
            }

            diag[i0] -= p;
            subd[i0] = g;
            subd[i2] = 0.0;
        }
    }

    true
}

fn sort_decreasing(q: &mut Matrix<Real>, diag: &mut [Real; 3]) {
    for i0 in 0..2 {
        let mut imax = i0;
        for i1 in i0 + 1..3 {
            if diag[i1] > diag[imax] {
                imax = i1;
            }
        }

        if imax != i0 {
            diag.swap(i0, imax);
            q.swap_columns(i0, imax);
        }
    }
}
