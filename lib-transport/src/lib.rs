#![cfg_attr(not(test), no_std)]

pub mod error;
pub use error::*;

pub mod payload;
pub use payload::*;

pub mod frame;
pub use frame::*;

/// Little-endian helpers shared by the payload and frame codecs.
mod bytes;
