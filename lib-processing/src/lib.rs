#![cfg_attr(not(test), no_std)]

pub mod error;
pub use error::*;

pub mod utils;
pub use utils::*;

pub mod sensor_fusion;
pub use sensor_fusion::*;

/// Complementary filter weight of the gyroscope estimate, the compass gets the remainder.
///
pub const DEFAULT_ALPHA: f32 = 0.98;

#[cfg(test)]
pub mod tests;
