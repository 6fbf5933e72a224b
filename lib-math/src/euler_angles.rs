use crate::*;

/// Yaw (Z), pitch (Y) and roll (X) in radians, applied in that order.
///
/// Only meant for showing an orientation to a human, all filtering is done on quaternions.
///
#[derive(Debug, Clone, Copy)]
pub struct EulerAngles
{
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl EulerAngles
{
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        EulerAngles { yaw, pitch, roll }
    }

    pub fn to_degrees(&self) -> EulerAngles {
        EulerAngles::new(self.yaw * RAD_TO_DEG, self.pitch * RAD_TO_DEG, self.roll * RAD_TO_DEG)
    }

    pub fn approx_eq(&self, other: &Self, tol: f32) -> bool {
        libm::fabsf(self.yaw - other.yaw) <= tol
            && libm::fabsf(self.pitch - other.pitch) <= tol
            && libm::fabsf(self.roll - other.roll) <= tol
    }

    /// Angles of a unit quaternion. At +/-90 degrees pitch yaw and roll describe the same axis,
    /// there all of the rotation is reported as roll.
    ///
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let sin_pitch = (2.0 * (q.w * q.y - q.z * q.x)).clamp(-1.0, 1.0);
        let pitch = libm::asinf(sin_pitch);

        if libm::fabsf(sin_pitch) >= 0.999999 {
            let roll = libm::atan2f(
                2.0 * (q.w * q.x - q.y * q.z),
                1.0 - 2.0 * (q.x * q.x + q.z * q.z),
            );
            return EulerAngles::new(0.0, pitch, roll);
        }

        let roll = libm::atan2f(2.0 * (q.w * q.x + q.y * q.z), 1.0 - 2.0 * (q.x * q.x + q.y * q.y));
        let yaw = libm::atan2f(2.0 * (q.w * q.z + q.x * q.y), 1.0 - 2.0 * (q.y * q.y + q.z * q.z));
        EulerAngles::new(yaw, pitch, roll)
    }

    pub fn to_quaternion(&self) -> Quaternion {
        let (sy, cy) = (libm::sinf(self.yaw * 0.5), libm::cosf(self.yaw * 0.5));
        let (sp, cp) = (libm::sinf(self.pitch * 0.5), libm::cosf(self.pitch * 0.5));
        let (sr, cr) = (libm::sinf(self.roll * 0.5), libm::cosf(self.roll * 0.5));

        Quaternion::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
    }
}

impl From<&Quaternion> for EulerAngles {
    fn from(q: &Quaternion) -> Self {
        EulerAngles::from_quaternion(q)
    }
}

impl From<Quaternion> for EulerAngles {
    fn from(q: Quaternion) -> Self {
        EulerAngles::from_quaternion(&q)
    }
}

impl From<&EulerAngles> for Quaternion {
    fn from(angles: &EulerAngles) -> Self {
        angles.to_quaternion()
    }
}

impl From<EulerAngles> for Quaternion {
    fn from(angles: EulerAngles) -> Self {
        angles.to_quaternion()
    }
}
