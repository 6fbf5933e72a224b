use math::Vector;
use crate::{bytes::*, FormatError};

/// Size in bytes of an encoded `ImuPayload`.
///
pub const PAYLOAD_SIZE: usize = 48;

/// Size in bytes of one encoded `Reading`: three `f32` axes followed by a `u32` timestamp.
///
const READING_SIZE: usize = 16;

/// A single 3-axis sensor sample together with the time it was taken.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading
{
    pub value: Vector,

    /// In milliseconds; wraps around after `u32::MAX`.
    pub timestamp: u32,
}

impl Reading
{
    pub const fn new(value: Vector, timestamp: u32) -> Self {
        Reading { value, timestamp }
    }

    fn write(&self, buf: &mut [u8], offset: usize) {
        write_f32(buf, offset, self.value.x);
        write_f32(buf, offset + 4, self.value.y);
        write_f32(buf, offset + 8, self.value.z);
        write_u32(buf, offset + 12, self.timestamp);
    }

    fn read(buf: &[u8], offset: usize) -> Self {
        Reading {
            value: Vector::new(
                read_f32(buf, offset),
                read_f32(buf, offset + 4),
                read_f32(buf, offset + 8),
            ),
            timestamp: read_u32(buf, offset + 12),
        }
    }
}

/// One accelerometer, gyroscope and magnetometer sample as sent over the wire.
///
/// Encoded little-endian with fixed offsets:
///
/// ```text
/// +-------------+----------+------------+---------+-----------+--------+
/// | accel 3xf32 | accel_ts | gyro 3xf32 | gyro_ts | mag 3xf32 | mag_ts |
/// +-------------+----------+------------+---------+-----------+--------+
/// 0             12         16           28        32          44       48
/// ```
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuPayload
{
    /// In m/s^2.
    pub accel: Reading,

    /// In rad/s.
    pub gyro: Reading,

    /// Magnetic field in any unit, only its direction is used.
    pub mag: Reading,
}

impl ImuPayload
{
    pub const fn new(accel: Reading, gyro: Reading, mag: Reading) -> Self {
        ImuPayload { accel, gyro, mag }
    }

    pub fn encode(&self) -> [u8; PAYLOAD_SIZE] {
        encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        decode(bytes)
    }
}

/// Serialize a payload into its fixed size little-endian representation.
///
pub fn encode(payload: &ImuPayload) -> [u8; PAYLOAD_SIZE] {
    let mut buf = [0u8; PAYLOAD_SIZE];
    payload.accel.write(&mut buf, 0);
    payload.gyro.write(&mut buf, READING_SIZE);
    payload.mag.write(&mut buf, 2 * READING_SIZE);
    buf
}

/// Parse a payload body, the input must be exactly `PAYLOAD_SIZE` bytes long.
///
pub fn decode(bytes: &[u8]) -> Result<ImuPayload, FormatError> {
    if bytes.len() != PAYLOAD_SIZE {
        return Err(FormatError::PayloadLength(bytes.len()));
    }
    Ok(ImuPayload {
        accel: Reading::read(bytes, 0),
        gyro: Reading::read(bytes, READING_SIZE),
        mag: Reading::read(bytes, 2 * READING_SIZE),
    })
}
