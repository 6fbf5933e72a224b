use crate::{bytes::*, FormatError, ImuPayload, PAYLOAD_SIZE};

/// Sender id and sequence number preceding the body of every frame.
///
pub const HEADER_SIZE: usize = 5;

/// Size in bytes of every datagram on the wire.
///
pub const FRAME_SIZE: usize = HEADER_SIZE + PAYLOAD_SIZE;

/// One datagram as it travels between publisher and consumer.
///
/// ```text
/// +----+---------+------+
/// | id | seq_num | body |
/// +----+---------+------+
/// 0    1         5      53
/// ```
///
/// `id` identifies the sender, `seq_num` is a little-endian `u32` that wraps around and `body` is
/// an encoded `ImuPayload`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame
{
    pub sender_id: u8,
    pub seq: u32,
    pub body: [u8; PAYLOAD_SIZE],
}

impl Frame
{
    pub fn new(sender_id: u8, seq: u32, payload: &ImuPayload) -> Self {
        Frame { sender_id, seq, body: payload.encode() }
    }

    /// Decode the body of the frame.
    ///
    pub fn payload(&self) -> Result<ImuPayload, FormatError> {
        ImuPayload::decode(&self.body)
    }

    pub fn to_bytes(&self) -> [u8; FRAME_SIZE] {
        frame(self.sender_id, self.seq, &self.body)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        unframe(bytes)
    }
}

/// Assemble a frame from its parts.
///
pub fn frame(sender_id: u8, seq: u32, body: &[u8; PAYLOAD_SIZE]) -> [u8; FRAME_SIZE] {
    let mut buf = [0u8; FRAME_SIZE];
    buf[0] = sender_id;
    write_u32(&mut buf, 1, seq);
    buf[HEADER_SIZE..].copy_from_slice(body);
    buf
}

/// Split a datagram into its parts, the input must be exactly `FRAME_SIZE` bytes long.
///
pub fn unframe(bytes: &[u8]) -> Result<Frame, FormatError> {
    if bytes.len() != FRAME_SIZE {
        return Err(FormatError::FrameLength(bytes.len()));
    }
    let mut body = [0u8; PAYLOAD_SIZE];
    body.copy_from_slice(&bytes[HEADER_SIZE..]);
    Ok(Frame {
        sender_id: bytes[0],
        seq: read_u32(bytes, 1),
        body,
    })
}
