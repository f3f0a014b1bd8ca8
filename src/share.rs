use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::radix::{decode, Radix};

/// One point `(x, y)` on the sharing polynomial. `x` is the share identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub x: BigUint,
    pub y: BigUint,
}

impl Share {
    pub fn new(x: impl Into<BigUint>, y: impl Into<BigUint>) -> Self {
        Share {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Builds a share whose `y` is given as a string in `radix`.
    pub fn from_encoded(x: impl Into<BigUint>, value: &str, radix: Radix) -> Result<Self> {
        Ok(Share {
            x: x.into(),
            y: decode(value, radix)?,
        })
    }
}

impl<X: Into<BigUint>, Y: Into<BigUint>> From<(X, Y)> for Share {
    fn from((x, y): (X, Y)) -> Self {
        Share::new(x, y)
    }
}
