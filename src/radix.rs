use std::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use crate::error::{InputError, Result, ShamirError};

/// A positional numeral base in `2..=36`, digits `0-9` then `a-z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Radix(u32);

impl Radix {
    pub const BINARY: Radix = Radix(2);
    pub const DECIMAL: Radix = Radix(10);
    pub const HEX: Radix = Radix(16);

    pub const MIN: u32 = 2;
    pub const MAX: u32 = 36;

    pub fn new(base: u32) -> Result<Self, InputError> {
        if (Self::MIN..=Self::MAX).contains(&base) {
            Ok(Radix(base))
        } else {
            Err(InputError::UnsupportedBase(base))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decodes `value` as a non-negative integer written in `radix`, most
/// significant digit first. Letters are case-insensitive and the empty string
/// decodes to zero. No reduction modulo any field is performed.
pub fn decode(value: &str, radix: Radix) -> Result<BigUint> {
    let base = BigUint::from(radix.get());
    value.chars().try_fold(BigUint::zero(), |acc, ch| {
        let digit = digit_value(ch, radix)?;
        Ok(acc * &base + digit)
    })
}

fn digit_value(ch: char, radix: Radix) -> Result<u32> {
    // Anything outside 0-9/a-z has no value in any base up to 36.
    match ch.to_digit(Radix::MAX) {
        Some(d) if d < radix.get() => Ok(d),
        _ => Err(ShamirError::InvalidDigit {
            digit: ch,
            base: radix.get(),
        }),
    }
}

/// Renders `value` in `radix` using lowercase digits. Zero renders as `"0"`.
pub fn encode(value: &BigUint, radix: Radix) -> String {
    if value.is_zero() {
        return "0".to_owned();
    }

    let base = BigUint::from(radix.get());
    let mut digits = Vec::new();
    let mut rest = value.clone();
    while !rest.is_zero() {
        let (q, r) = rest.div_rem(&base);
        let d = r.iter_u32_digits().next().unwrap_or(0);
        digits.push(std::char::from_digit(d, radix.get()).unwrap_or('0'));
        rest = q;
    }
    digits.iter().rev().collect()
}
