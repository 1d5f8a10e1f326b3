#![doc = include_str!("../README.md")]

mod check_digit;
mod code;
mod error;
pub mod generator;
mod mutex;
#[cfg(feature = "serde")]
mod serde;
pub mod store;

pub use crate::check_digit::*;
pub use crate::code::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::store::*;
