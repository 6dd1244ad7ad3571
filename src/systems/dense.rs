//! Dense matrix kernel for the kriging systems.
//!
//! Matrices are flat row-major slices with explicit `(rows, cols)` passed
//! alongside. Dimensions are the caller's responsibility.

use crate::error::{KrigeError, Result};

/// `m x n` transpose of an `n x m` matrix.
pub fn transpose(x: &[f64], n: usize, m: usize) -> Vec<f64> {
    let mut z = vec![0.0; m * n];
    for i in 0..n {
        for j in 0..m {
            z[j * n + i] = x[i * m + j];
        }
    }
    z
}

/// Naive product of an `n x m` matrix with an `m x p` matrix.
pub fn multiply(x: &[f64], y: &[f64], n: usize, m: usize, p: usize) -> Vec<f64> {
    let mut z = vec![0.0; n * p];
    for i in 0..n {
        for j in 0..p {
            let mut acc = 0.0;
            for k in 0..m {
                acc += x[i * m + k] * y[k * p + j];
            }
            z[i * p + j] = acc;
        }
    }
    z
}

/// Elementwise sum of two `n x m` matrices.
pub fn add(x: &[f64], y: &[f64], n: usize, m: usize) -> Vec<f64> {
    let mut z = vec![0.0; n * m];
    for i in 0..n * m {
        z[i] = x[i] + y[i];
    }
    z
}

/// `n x n` matrix with `c` on the diagonal.
pub fn diag(c: f64, n: usize) -> Vec<f64> {
    let mut z = vec![0.0; n * n];
    for i in 0..n {
        z[i * n + i] = c;
    }
    z
}

/// In-place lower-triangular Cholesky decomposition.
///
/// Returns `false` the first time a diagonal pivot is non-positive (the
/// matrix is not positive-definite); `x` is left partially decomposed and
/// must not be used.
pub fn cholesky(x: &mut [f64], n: usize) -> bool {
    let mut p = vec![0.0; n];
    for i in 0..n {
        p[i] = x[i * n + i];
    }

    for i in 0..n {
        for j in 0..i {
            p[i] -= x[i * n + j] * x[i * n + j];
        }
        if p[i] <= 0.0 {
            return false;
        }
        p[i] = p[i].sqrt();
        for j in i + 1..n {
            for k in 0..i {
                x[j * n + i] -= x[j * n + k] * x[i * n + k];
            }
            x[j * n + i] /= p[i];
        }
    }

    for i in 0..n {
        x[i * n + i] = p[i];
    }
    true
}

/// In-place inversion of a matrix already decomposed by [`cholesky`].
///
/// Must only be called after a successful decomposition.
pub fn cholesky_inverse(x: &mut [f64], n: usize) {
    // invert the triangular factor
    for i in 0..n {
        x[i * n + i] = 1.0 / x[i * n + i];
        for j in i + 1..n {
            let mut sum = 0.0;
            for k in i..j {
                sum -= x[j * n + k] * x[k * n + i];
            }
            x[j * n + i] = sum / x[j * n + j];
        }
    }

    for i in 0..n {
        for j in i + 1..n {
            x[i * n + j] = 0.0;
        }
    }

    // multiply the inverted factor by its transpose
    for i in 0..n {
        x[i * n + i] *= x[i * n + i];
        for k in i + 1..n {
            x[i * n + i] += x[k * n + i] * x[k * n + i];
        }
        for j in i + 1..n {
            for k in j..n {
                x[i * n + j] += x[k * n + i] * x[k * n + j];
            }
        }
    }

    for i in 0..n {
        for j in 0..i {
            x[i * n + j] = x[j * n + i];
        }
    }
}

/// In-place inversion by Gauss-Jordan elimination with partial pivoting.
///
/// The pivot search scans for the largest-magnitude entry over the rows and
/// columns not yet reduced. Returns `false` on an exactly-zero pivot.
pub fn gauss_jordan_inverse(x: &mut [f64], n: usize) -> bool {
    let mut index_r = vec![0usize; n];
    let mut index_c = vec![0usize; n];
    let mut ipiv = vec![0usize; n];

    for i in 0..n {
        let mut big = 0.0;
        let mut irow = 0;
        let mut icol = 0;
        for j in 0..n {
            if ipiv[j] != 1 {
                for k in 0..n {
                    if ipiv[k] == 0 && x[j * n + k].abs() >= big {
                        big = x[j * n + k].abs();
                        irow = j;
                        icol = k;
                    }
                }
            }
        }
        ipiv[icol] += 1;

        if irow != icol {
            for l in 0..n {
                x.swap(irow * n + l, icol * n + l);
            }
        }
        index_r[i] = irow;
        index_c[i] = icol;

        if x[icol * n + icol] == 0.0 {
            return false;
        }

        let pivinv = 1.0 / x[icol * n + icol];
        x[icol * n + icol] = 1.0;
        for l in 0..n {
            x[icol * n + l] *= pivinv;
        }

        for ll in 0..n {
            if ll != icol {
                let dum = x[ll * n + icol];
                x[ll * n + icol] = 0.0;
                for l in 0..n {
                    x[ll * n + l] -= x[icol * n + l] * dum;
                }
            }
        }
    }

    // undo the column permutations accumulated by the row swaps
    for l in (0..n).rev() {
        if index_r[l] != index_c[l] {
            for k in 0..n {
                x.swap(k * n + index_r[l], k * n + index_c[l]);
            }
        }
    }
    true
}

/// Invert a symmetric `n x n` matrix in place.
///
/// Cholesky is attempted first; if the matrix is not positive-definite the
/// decomposition destroys its input, so elimination reruns on an untouched
/// copy.
pub fn invert_symmetric(x: &mut [f64], n: usize) -> Result<()> {
    let pristine = x.to_vec();
    if cholesky(x, n) {
        cholesky_inverse(x, n);
        return Ok(());
    }

    x.copy_from_slice(&pristine);
    if gauss_jordan_inverse(x, n) {
        Ok(())
    } else {
        Err(KrigeError::SingularMatrix { n })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spd_3x3() -> Vec<f64> {
        vec![4.0, 1.0, 2.0, 1.0, 5.0, 3.0, 2.0, 3.0, 6.0]
    }

    fn identity_residual(a: &[f64], a_inv: &[f64], n: usize) -> f64 {
        let prod = multiply(a, a_inv, n, n, n);
        let mut worst: f64 = 0.0;
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                worst = worst.max((prod[i * n + j] - expected).abs());
            }
        }
        worst
    }

    #[test]
    fn transpose_reindexes() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let xt = transpose(&x, 2, 3);
        assert_eq!(xt, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn multiply_matches_hand_computed() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![5.0, 6.0, 7.0, 8.0];
        let z = multiply(&x, &y, 2, 2, 2);
        assert_eq!(z, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn diag_and_add() {
        let z = add(&diag(2.0, 2), &diag(0.5, 2), 2, 2);
        assert_eq!(z, vec![2.5, 0.0, 0.0, 2.5]);
    }

    #[test]
    fn cholesky_inverse_round_trip() {
        let a = spd_3x3();
        let mut inv = a.clone();
        assert!(cholesky(&mut inv, 3));
        cholesky_inverse(&mut inv, 3);
        assert!(identity_residual(&a, &inv, 3) < 1e-12);
    }

    #[test]
    fn gauss_jordan_round_trip() {
        let a = spd_3x3();
        let mut inv = a.clone();
        assert!(gauss_jordan_inverse(&mut inv, 3));
        assert!(identity_residual(&a, &inv, 3) < 1e-12);
    }

    #[test]
    fn cholesky_and_gauss_jordan_agree_on_spd() {
        let a = spd_3x3();

        let mut chol_inv = a.clone();
        assert!(cholesky(&mut chol_inv, 3));
        cholesky_inverse(&mut chol_inv, 3);

        let mut gj_inv = a.clone();
        assert!(gauss_jordan_inverse(&mut gj_inv, 3));

        for (c, g) in chol_inv.iter().zip(gj_inv.iter()) {
            assert_relative_eq!(*c, *g, max_relative = 1e-12);
        }
    }

    #[test]
    fn cholesky_rejects_indefinite() {
        // negative diagonal entry, clearly not positive-definite
        let mut a = vec![-1.0, 0.0, 0.0, 2.0];
        assert!(!cholesky(&mut a, 2));
    }

    #[test]
    fn invert_symmetric_falls_back_to_elimination() {
        // symmetric and invertible but indefinite, so cholesky must fail
        let a = vec![0.0, 1.0, 1.0, 0.0];
        let mut inv = a.clone();
        invert_symmetric(&mut inv, 2).unwrap();
        assert!(identity_residual(&a, &inv, 2) < 1e-12);
    }

    #[test]
    fn invert_symmetric_reports_singular() {
        let mut a = vec![1.0, 2.0, 2.0, 4.0];
        assert_eq!(
            invert_symmetric(&mut a, 2),
            Err(KrigeError::SingularMatrix { n: 2 })
        );
    }
}
