use math::*;
use transport::ImuPayload;
use cfg_if::cfg_if;
use crate::*;

/// Estimates the orientation of a single device from its stream of IMU payloads.
///
/// Integrating the gyroscope gives a smooth estimate that drifts over time, the accelerometer
/// and magnetometer give a noisy estimate that does not drift. Every update blends the two with a
/// complementary filter, leaning towards the gyroscope by `alpha`.
///
pub struct SensorFusion
{
    /// Complementary filter mixing factor, the weight of the gyroscope estimate.
    pub alpha: f32,

    /// The current orientation of the device.
    pub orientation: Quaternion,

    /// The previously processed payload, its readings drive the next update.
    pub previous: Option<ImuPayload>,

    /// Orientation according only to integrating gyroscope, ignoring the compass.
    #[cfg(feature = "debug")]
    pub gyro_orientation: Quaternion,

    /// Orientation according only to the tilt compensated compass, ignoring the gyroscope.
    #[cfg(feature = "debug")]
    pub compass_orientation: Quaternion,
}

impl SensorFusion {

    #[inline]
    pub fn new() -> Self {
        SensorFusion {
            alpha: DEFAULT_ALPHA,
            orientation: Quaternion::identity(),
            previous: None,
            #[cfg(feature = "debug")]
            gyro_orientation: Quaternion::identity(),
            #[cfg(feature = "debug")]
            compass_orientation: Quaternion::identity(),
        }
    }

    pub fn with_alpha(alpha: f32) -> Result<Self, NumericError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(NumericError::InvalidBlendWeight(alpha));
        }
        let mut fusion = Self::new();
        fusion.alpha = alpha;
        Ok(fusion)
    }

    /// Forget the payload history and go back to the identity orientation.
    ///
    pub fn reset(&mut self) {
        *self = SensorFusion { alpha: self.alpha, ..Self::new() };
    }

    /// Process the next payload and return the new orientation.
    ///
    /// The readings of the previous payload are applied over the time between the two payloads.
    /// When those readings are unusable the orientation is left untouched and an error returned,
    /// the new payload is still remembered for the next update.
    ///
    pub fn update(&mut self, payload: &ImuPayload) -> Result<Quaternion, NumericError>
    {
        // Skip the first packet since there is nothing to integrate over yet.
        let Some(previous) = self.previous.replace(*payload) else {
            return Ok(self.orientation);
        };

        let delta_t = delta_seconds(previous.gyro.timestamp, payload.gyro.timestamp);

        let q_compass = compass_orientation(&previous.accel.value, &previous.mag.value)?;

        if !previous.gyro.value.is_finite() {
            return Err(NumericError::NonFiniteGyro);
        }

        // How much has the rotation changed according to the gyroscope?
        let q_gyro_delta = Quaternion::from_rotation_vector(&(previous.gyro.value * delta_t));

        // Add the change to the current orientation to get the new orientation according to the
        // gyroscope.
        let q_gyro = q_gyro_delta * self.orientation;

        cfg_if!{ if #[cfg(feature = "debug")] {
            self.gyro_orientation = q_gyro;
            self.compass_orientation = q_compass;
        }}

        self.orientation = complementary_filter(&q_compass, &q_gyro, self.alpha);
        Ok(self.orientation)
    }
}

impl Default for SensorFusion {
    fn default() -> Self {
        Self::new()
    }
}
