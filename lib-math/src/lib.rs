#![cfg_attr(not(test), no_std)]

pub mod euler_angles;
pub use euler_angles::*;

pub mod vector;
pub use vector::*;

pub mod quaternion;
pub use quaternion::*;

#[cfg(test)]
mod tests;

pub const RAD_TO_DEG: f32 = 57.29578;
