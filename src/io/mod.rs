//! Input/output helpers.
//!
//! - format-specific decoding into raw rows (`decode`)
//! - raw row → canonical record normalization (`normalize`)

pub mod decode;
pub mod normalize;

pub use decode::*;
pub use normalize::*;
