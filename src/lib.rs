pub mod config;
pub mod error;
pub mod field;
pub mod input;
pub mod lagrange;
pub mod radix;
pub mod share;

pub use config::*;
pub use error::*;
pub use field::*;
pub use input::*;
pub use lagrange::*;
pub use radix::*;
pub use share::*;
