use core::{error::Error, fmt};

/// A datagram or payload body that does not have the fixed size of the wire format.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError
{
    /// Payload body of the given length, expected `PAYLOAD_SIZE`.
    PayloadLength(usize),
    /// Frame of the given length, expected `FRAME_SIZE`.
    FrameLength(usize),
}

impl Error for FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PayloadLength(len) => write!(
                f, "invalid payload length: got {} bytes, expected {}", len, crate::PAYLOAD_SIZE
            ),
            Self::FrameLength(len) => write!(
                f, "invalid frame length: got {} bytes, expected {}", len, crate::FRAME_SIZE
            ),
        }
    }
}
