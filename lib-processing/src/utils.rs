use math::*;
use crate::*;

/// Blends two orientations using a complementary filter, `alpha` is the weight of the gyroscope
/// estimate.
///
pub fn complementary_filter(q_compass: &Quaternion, q_gyro: &Quaternion, alpha: f32) -> Quaternion {
    Quaternion::slerp(q_compass, q_gyro, alpha)
        .normalize() // Ensure the resulting quaternion is a unit quaternion
}

/// Computes the device orientation from the direction of gravity measured by the accelerometer
/// and the direction of the magnetic field measured by the magnetometer, i.e. a tilt compensated
/// compass. Like any accelerometer based estimate it is only accurate while the device is not
/// accelerating, but unlike the gyroscope it does not drift.
///
/// The accelerometer measures the reaction to gravity, so up is the opposite of the reading.
///
pub fn compass_orientation(accel: &Vector, mag: &Vector) -> Result<Quaternion, NumericError>
{
    let up = -accel.try_normalize().ok_or(NumericError::DegenerateAccel)?;

    // Only the part of the magnetic field perpendicular to gravity tells us the heading.
    let right = mag.cross(&up).try_normalize().ok_or(NumericError::DegenerateMag)?;
    let forward = right.cross(&up).normalize();

    Ok(Quaternion::from_basis(&right, &up, &forward))
}

/// In seconds; time between two gyroscope timestamps given in milliseconds. A timestamp that went
/// backwards, also when the millisecond counter wrapped, counts as no time at all.
///
pub fn delta_seconds(previous_ms: u32, current_ms: u32) -> f32 {
    let delta_ms = current_ms as i64 - previous_ms as i64;
    if delta_ms < 0 {
        log::debug!("gyro timestamp went backwards: {} -> {}", previous_ms, current_ms);
        return 0.0;
    }
    delta_ms as f32 / 1000.0
}
