//! Streaming of IMU payloads from publishers to a consumer over a Unix datagram socket.
//!
//! A `Publisher` pulls payloads from a `DataSource` and sends them at a fixed rate, a `Consumer`
//! receives them, puts every sender's payloads back in order with a `RemoteSensor` and hands the
//! fused orientation to an `OrientationSink`.

pub mod error;
pub use error::*;

pub mod config;
pub use config::*;

pub mod sink;
pub use sink::*;

pub mod source;
pub use source::*;

pub mod remote_sensor;
pub use remote_sensor::*;

pub mod consumer;
pub use consumer::*;

pub mod publisher;
pub use publisher::*;
