use transport::ImuPayload;

pub mod noise;
pub use noise::*;

pub mod generator;
pub use generator::*;

pub mod simulator;
pub use simulator::*;

pub mod replay;
pub use replay::*;

/// Produces the payloads a publisher sends, one per call.
///
pub trait DataSource {
    fn next_payload(&mut self) -> ImuPayload;
}

/// Milliseconds as carried by the wire format, wrapping around after `u32::MAX`.
///
#[inline]
pub(crate) fn wrapping_millis(seconds: f64) -> u32 {
    (seconds * 1000.0) as u64 as u32
}
