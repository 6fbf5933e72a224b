use core::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError
{
    /// The accelerometer reading has no direction (zero length or not finite).
    DegenerateAccel,
    /// The magnetometer reading has no direction perpendicular to gravity.
    DegenerateMag,
    /// The gyroscope reading contains NaN or infinite values.
    NonFiniteGyro,
    /// The blend weight lies outside of the open interval (0, 1).
    InvalidBlendWeight(f32),
}

impl Error for NumericError {}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DegenerateAccel => write!(f, "accelerometer reading has no usable direction"),
            Self::DegenerateMag => write!(f, "magnetometer reading is zero or parallel to gravity"),
            Self::NonFiniteGyro => write!(f, "gyroscope reading is not finite"),
            Self::InvalidBlendWeight(alpha) => write!(f, "blend weight {} not in (0, 1)", alpha),
        }
    }
}
