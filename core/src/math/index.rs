//! Linear and 2-D grid addressing shared by the sampling mask and the FITS
//! adapter.
//!
//! Grids are addressed row-major: `index = row * cols + col`. Callers that
//! store column-major data (the FITS adapter) swap the roles of the axes
//! instead of re-deriving the arithmetic.

use crate::prelude::{PrepError, PrepResult};

/// Converts a `(row, col)` pair of a `rows x cols` grid to a linear offset.
///
/// Bounds are the caller's responsibility and only checked in debug builds.
pub fn linear_index(row: usize, col: usize, rows: usize, cols: usize) -> usize {
    debug_assert!(row < rows, "row {} out of {}", row, rows);
    debug_assert!(col < cols, "col {} out of {}", col, cols);
    row * cols + col
}

/// Inverse of [`linear_index`]: returns `(row, col)` for a linear offset.
pub fn to_row_col(index: usize, cols: usize, rows: usize) -> (usize, usize) {
    debug_assert!(cols > 0, "grid has no columns");
    debug_assert!(index < rows * cols, "index {} out of {}x{}", index, rows, cols);
    let col = index % cols;
    let row = (index - col) / cols;
    (row, col)
}

/// `x mod y` wrapped circularly for negative `x`, truncated to an integer.
///
/// The remainder takes the sign of `x` before wrapping, so `wrap_mod(-1.0, 5.0)`
/// is `4`. A zero or non-finite modulus is a domain error.
pub fn wrap_mod(x: f64, y: f64) -> PrepResult<i64> {
    if y == 0.0 || !y.is_finite() {
        return Err(PrepError::Domain(format!("invalid wrap modulus {}", y)));
    }
    if !x.is_finite() {
        return Err(PrepError::Domain(format!("cannot wrap non-finite value {}", x)));
    }
    let mut r = x % y;
    if r < 0.0 {
        r += y;
    }
    // -tiny + y rounds up to y
    if r >= y && y > 0.0 {
        r = 0.0;
    }
    Ok(r as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_round_trips_through_linear_index() {
        for &(rows, cols) in &[(1usize, 1usize), (2, 3), (3, 2), (5, 7), (16, 16)] {
            for row in 0..rows {
                for col in 0..cols {
                    let index = linear_index(row, col, rows, cols);
                    assert!(index < rows * cols);
                    assert_eq!(to_row_col(index, cols, rows), (row, col));
                }
            }
        }
    }

    #[test]
    fn linear_index_is_row_major() {
        assert_eq!(linear_index(0, 0, 2, 3), 0);
        assert_eq!(linear_index(0, 2, 2, 3), 2);
        assert_eq!(linear_index(1, 0, 2, 3), 3);
        assert_eq!(linear_index(1, 2, 2, 3), 5);
    }

    #[test]
    fn wrap_mod_wraps_negative_values() {
        assert_eq!(wrap_mod(-1.0, 5.0).unwrap(), 4);
        assert_eq!(wrap_mod(7.0, 5.0).unwrap(), 2);
        assert_eq!(wrap_mod(5.0, 5.0).unwrap(), 0);
        assert_eq!(wrap_mod(-5.0, 5.0).unwrap(), 0);
        assert_eq!(wrap_mod(-6.0, 5.0).unwrap(), 4);
    }

    #[test]
    fn wrap_mod_truncates_fractions() {
        assert_eq!(wrap_mod(2.7, 5.0).unwrap(), 2);
        assert_eq!(wrap_mod(-0.5, 5.0).unwrap(), 4);
    }

    #[test]
    fn wrap_mod_stays_in_range() {
        let mut x = -40.0;
        while x < 40.0 {
            let r = wrap_mod(x, 8.0).unwrap();
            assert!((0..8).contains(&r), "wrap_mod({}, 8) = {}", x, r);
            x += 0.37;
        }
        assert_eq!(wrap_mod(-1e-18, 8.0).unwrap(), 0);
    }

    #[test]
    fn wrap_mod_rejects_zero_modulus() {
        assert!(matches!(wrap_mod(3.0, 0.0), Err(PrepError::Domain(_))));
        assert!(matches!(wrap_mod(f64::NAN, 4.0), Err(PrepError::Domain(_))));
    }
}
