// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use nalgebra::{DMatrix, DVector};

/// Assembles square or rectangular blocks along the diagonal of a zero matrix.
pub fn block_diag(blocks: &[DMatrix<f64>]) -> DMatrix<f64> {
    let rows = blocks.iter().map(|b| b.nrows()).sum();
    let cols = blocks.iter().map(|b| b.ncols()).sum();
    let mut out = DMatrix::zeros(rows, cols);

    let (mut r, mut c) = (0usize, 0usize);
    for block in blocks {
        out.view_mut((r, c), block.shape()).copy_from(block);
        r += block.nrows();
        c += block.ncols();
    }
    out
}

/// Square diagonal matrix with `values` on the diagonal.
pub fn diag(values: &[f64]) -> DMatrix<f64> {
    DMatrix::from_diagonal(&DVector::from_column_slice(values))
}

pub fn eye(n: usize) -> DMatrix<f64> {
    DMatrix::identity(n, n)
}

/// Inverse of a square matrix. Singular input yields a NaN-filled result so that
/// the failure surfaces as non-finite filter output.
pub(crate) fn invert(m: &DMatrix<f64>) -> DMatrix<f64> {
    if m.shape() == (1, 1) {
        return DMatrix::from_element(1, 1, 1.0 / m[(0, 0)]);
    }
    m.clone()
        .try_inverse()
        .unwrap_or_else(|| DMatrix::from_element(m.nrows(), m.ncols(), f64::NAN))
}
