// src/operations/library.rs

//! Matrices of the gate set. Pure functions, no error paths.

use super::Matrix2;
use num_complex::Complex;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;

/// `1/√2 * [[1, 1], [1, -1]]`
pub fn hadamard() -> Matrix2 {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

/// `[[0, 1], [1, 0]]`, the target action of CNOT.
pub fn pauli_x() -> Matrix2 {
    [
        [Complex::zero(), Complex::one()],
        [Complex::one(), Complex::zero()],
    ]
}

/// Y rotation by `theta` radians:
/// `[[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]`
pub fn rotation_y(theta: f64) -> Matrix2 {
    let (sin_a, cos_a) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos_a, 0.0), Complex::new(-sin_a, 0.0)],
        [Complex::new(sin_a, 0.0), Complex::new(cos_a, 0.0)],
    ]
}

/// Conjugate transpose of `m`.
pub fn adjoint(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

/// Matrix product `a * b`.
pub fn multiply(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[Complex::zero(); 2]; 2];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, cell) in out_row.iter_mut().enumerate() {
            *cell = a[row][0] * b[0][col] + a[row][1] * b[1][col];
        }
    }
    out
}

/// True when `m * m†` equals the identity within `tolerance`.
pub fn is_unitary(m: &Matrix2, tolerance: f64) -> bool {
    let product = multiply(m, &adjoint(m));
    (0..2).all(|row| {
        (0..2).all(|col| {
            let expected = if row == col { Complex::one() } else { Complex::zero() };
            (product[row][col] - expected).norm() <= tolerance
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TEST_TOLERANCE: f64 = 1e-12;

    fn approx_eq(a: &Matrix2, b: &Matrix2) -> bool {
        (0..2).all(|r| (0..2).all(|c| (a[r][c] - b[r][c]).norm() < TEST_TOLERANCE))
    }

    #[test]
    fn library_matrices_are_unitary() {
        assert!(is_unitary(&hadamard(), TEST_TOLERANCE));
        assert!(is_unitary(&pauli_x(), TEST_TOLERANCE));
        for theta in [-7.0, -PI, 0.0, 0.3, PI / 8.0, 2.5 * PI, 100.0] {
            assert!(is_unitary(&rotation_y(theta), TEST_TOLERANCE), "RY({}) not unitary", theta);
        }
    }

    #[test]
    fn hadamard_is_self_inverse() {
        let identity = [[Complex::one(), Complex::zero()], [Complex::zero(), Complex::one()]];
        assert!(approx_eq(&multiply(&hadamard(), &hadamard()), &identity));
    }

    #[test]
    fn rotation_y_is_four_pi_periodic() {
        for theta in [-1.3, 0.0, 0.7, 3.0] {
            assert!(approx_eq(&rotation_y(theta), &rotation_y(theta + 4.0 * PI)));
            assert!(approx_eq(&rotation_y(theta), &rotation_y(theta - 4.0 * PI)));
        }
    }

    #[test]
    fn rotation_y_composes_additively() {
        let (a, b) = (0.4, -1.1);
        assert!(approx_eq(&multiply(&rotation_y(a), &rotation_y(b)), &rotation_y(a + b)));
    }

    #[test]
    fn rotation_y_by_pi_maps_zero_to_one() {
        let m = rotation_y(PI);
        assert!((m[1][0] - Complex::one()).norm() < TEST_TOLERANCE);
        assert!(m[0][0].norm() < TEST_TOLERANCE);
    }
}
