use std::mem;

use lazy_static::lazy_static;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{Num, One, Signed, Zero};

use crate::error::{InputError, Result, ShamirError};

/// Decimal form of the modulus used when none is configured.
pub const DEFAULT_PRIME_DECIMAL: &str =
    "208351617316091241234326746312124448251235562226470491514186331217050270460481";

lazy_static! {
    pub static ref DEFAULT_PRIME: BigUint = BigUint::from_str_radix(DEFAULT_PRIME_DECIMAL, 10)
        .expect("DEFAULT_PRIME_DECIMAL is a decimal literal");
}

/// Computes `a^-1 mod m` with the Extended Euclidean Algorithm.
///
/// The result lies in `[0, m)`. For `m == 1` every residue collapses to `0`,
/// which is returned as the inverse. Fails with [`ShamirError::NoInverseExists`]
/// when `gcd(a, m) != 1` (or `m == 0`).
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(ShamirError::NoInverseExists);
    }
    if m.is_one() {
        return Ok(BigUint::zero());
    }

    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut r0 = BigInt::from_biguint(Sign::Plus, a % m);
    let mut r1 = modulus.clone();
    let (mut x0, mut x1) = (BigInt::zero(), BigInt::one());

    while r0 > BigInt::one() {
        if r1.is_zero() {
            // gcd(a, m) == r0 > 1
            return Err(ShamirError::NoInverseExists);
        }
        let (q, r) = r0.div_rem(&r1);
        r0 = mem::replace(&mut r1, r);
        let next = &x1 - &q * &x0;
        x1 = mem::replace(&mut x0, next);
    }

    if !r0.is_one() {
        return Err(ShamirError::NoInverseExists);
    }
    if x1.is_negative() {
        x1 += &modulus;
    }
    x1.to_biguint().ok_or(ShamirError::NoInverseExists)
}

/// Integers modulo a caller-supplied prime.
///
/// Primality of the modulus is not checked; a composite modulus gives
/// meaningless results (or `NoInverseExists` on a non-coprime denominator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    pub fn new(modulus: BigUint) -> Result<Self, InputError> {
        if modulus.is_zero() {
            return Err(InputError::InvalidModulus("modulus must be positive".into()));
        }
        Ok(PrimeField { modulus })
    }

    pub fn from_decimal(modulus: &str) -> Result<Self, InputError> {
        let parsed = BigUint::from_str_radix(modulus.trim(), 10)
            .map_err(|e| InputError::InvalidModulus(format!("{modulus:?}: {e}")))?;
        Self::new(parsed)
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// `a - b` in the field; the subtrahend is reduced first so the
    /// intermediate never goes negative.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (self.reduce(a) + &self.modulus - self.reduce(b)) % &self.modulus
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        (&self.modulus - self.reduce(a)) % &self.modulus
    }

    pub fn inverse(&self, a: &BigUint) -> Result<BigUint> {
        mod_inverse(a, &self.modulus)
    }
}

impl Default for PrimeField {
    fn default() -> Self {
        PrimeField {
            modulus: DEFAULT_PRIME.clone(),
        }
    }
}
