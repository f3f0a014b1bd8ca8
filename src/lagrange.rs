use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use crate::error::{Result, ShamirError};
use crate::field::PrimeField;
use crate::share::Share;

/// The Lagrange basis polynomial for `points[j]`, evaluated at x = 0:
///
/// ```text
/// l_j(0) = ∏_{m ≠ j} (0 - x_m) / (x_j - x_m)   (mod p)
/// ```
///
/// Fails with [`ShamirError::NoInverseExists`] if the denominator vanishes,
/// i.e. when another point shares `points[j]`'s x-coordinate mod p.
pub fn lagrange_basis_at_zero(j: usize, points: &[BigUint], field: &PrimeField) -> Result<BigUint> {
    let xj = &points[j];
    let mut num = BigUint::one();
    let mut den = BigUint::one();

    for (m, xm) in points.iter().enumerate() {
        if m == j {
            continue;
        }
        num = field.mul(&num, &field.neg(xm));
        den = field.mul(&den, &field.sub(xj, xm));
    }

    let den_inv = field.inverse(&den)?;
    Ok(field.mul(&num, &den_inv))
}

/// Performs a Lagrange interpolation in the field at the origin for the
/// polynomial through `(points[i], values[i])`. The result is the polynomial's
/// constant coefficient.
///
/// `points` and `values` are parallel slices and must have the same length.
pub fn lagrange_interpolation_at_zero(
    points: &[BigUint],
    values: &[BigUint],
    field: &PrimeField,
) -> Result<BigUint> {
    assert_eq!(points.len(), values.len());

    let mut acc = BigUint::zero();
    for (j, yj) in values.iter().enumerate() {
        let basis = lagrange_basis_at_zero(j, points, field)?;
        let term = field.mul(&field.reduce(yj), &basis);
        acc = field.add(&acc, &term);
    }
    Ok(acc)
}

/// Recovers the secret from the first `threshold` of `shares`, in the order
/// given. Any `threshold` distinct shares of the same polynomial give the same
/// result.
///
/// Fails with [`ShamirError::MissingShare`] when fewer than `threshold` shares
/// are supplied and with [`ShamirError::NoInverseExists`] when two of the used
/// shares have the same x-coordinate.
pub fn reconstruct(shares: &[Share], threshold: usize, field: &PrimeField) -> Result<BigUint> {
    if shares.len() < threshold {
        return Err(ShamirError::MissingShare {
            threshold,
            found: shares.len(),
        });
    }

    let active = &shares[..threshold];
    debug!(
        threshold,
        supplied = shares.len(),
        modulus_bits = field.modulus().bits(),
        "reconstructing secret"
    );

    let (points, values): (Vec<BigUint>, Vec<BigUint>) = active
        .iter()
        .map(|s| (s.x.clone(), s.y.clone()))
        .unzip();

    let secret = lagrange_interpolation_at_zero(&points, &values, field);
    if let Err(ref e) = secret {
        debug!(error = %e, "interpolation failed");
    }
    secret
}
