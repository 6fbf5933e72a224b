use std::{path::PathBuf, time::Duration};

use processing::{NumericError, DEFAULT_ALPHA};
use crate::StreamError;

/// How long a sender's stream may wait for a missing payload before the rest is flushed.
///
pub const DEFAULT_STALL_TIMEOUT: Duration = Duration::from_millis(100);

pub const DEFAULT_FREQUENCY_HZ: u32 = 100;

pub const DEFAULT_SENDER_ID: u8 = 0;

#[derive(Debug, Clone)]
pub struct ConsumerConfig
{
    /// Filesystem path the consumer binds its datagram socket to.
    pub socket_path: PathBuf,

    /// Upper bound on the latency a lost payload adds, also the receive timeout.
    pub stall_timeout: Duration,

    /// Weight of the gyroscope estimate in the fusion filter.
    pub alpha: f32,
}

impl ConsumerConfig
{
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        ConsumerConfig {
            socket_path: socket_path.into(),
            stall_timeout: DEFAULT_STALL_TIMEOUT,
            alpha: DEFAULT_ALPHA,
        }
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.stall_timeout.is_zero() {
            return Err(StreamError::Config("stall timeout must be above zero".to_string()));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(StreamError::Numeric(NumericError::InvalidBlendWeight(self.alpha)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PublisherConfig
{
    /// Filesystem path of the consumer's socket.
    pub socket_path: PathBuf,

    pub sender_id: u8,

    pub frequency_hz: u32,

    /// Stop after sending this many frames, run until interrupted if `None`.
    pub count: Option<u64>,

    /// Sequence number of the first frame.
    pub start_seq: u32,
}

impl PublisherConfig
{
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        PublisherConfig {
            socket_path: socket_path.into(),
            sender_id: DEFAULT_SENDER_ID,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            count: None,
            start_seq: 0,
        }
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.frequency_hz == 0 {
            return Err(StreamError::Config("frequency must be above zero".to_string()));
        }
        Ok(())
    }
}
