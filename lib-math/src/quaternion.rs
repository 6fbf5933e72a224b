use core::ops::{Add, Div, Mul, Neg};
use crate::*;

/// Above this dot product two unit quaternions are treated as parallel by `slerp`, which then
/// falls back to a normalized linear interpolation.
///
const SLERP_PARALLEL_THRESHOLD: f32 = 0.9995;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion
{
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}

impl Quaternion
{
    /// Create a new quaternion with the given values.
    ///
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Quaternion { w, x, y, z }
    }

    /// Returns the identity quaternion (no rotation)
    ///
    pub const fn identity() -> Self {
        Quaternion {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Constructs a quaternion from a scalar (w) and a vector (x, y, z)
    ///
    pub fn from_parts(w: f32, vector: Vector) -> Self {
        Quaternion {
            w,
            x: vector.x,
            y: vector.y,
            z: vector.z,
        }
    }

    /// Rotation of `|v|` radians around the axis `v`. A zero vector gives exactly the identity.
    ///
    pub fn from_rotation_vector(v: &Vector) -> Self {
        let angle = v.magnitude();
        if !(angle > f32::EPSILON) {
            return Quaternion::identity();
        }
        let half_angle = angle / 2.0;
        let axis = v / angle;
        Quaternion::from_parts(libm::cosf(half_angle), axis * libm::sinf(half_angle))
    }

    /// Rotation that maps the device X, Y and Z axes onto `right`, `up` and `forward`, i.e. the
    /// quaternion of the rotation matrix whose columns are the three given axes. The axes are
    /// expected to be orthonormal and right handed (`right x up = forward`).
    ///
    pub fn from_basis(right: &Vector, up: &Vector, forward: &Vector) -> Self {
        let (m00, m01, m02) = (right.x, up.x, forward.x);
        let (m10, m11, m12) = (right.y, up.y, forward.y);
        let (m20, m21, m22) = (right.z, up.z, forward.z);

        // Shepperd's method, pick the largest diagonal term to keep the division well conditioned.
        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = libm::sqrtf(trace + 1.0) * 2.0;
            Quaternion::new(0.25 * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
        } else if m00 > m11 && m00 > m22 {
            let s = libm::sqrtf(1.0 + m00 - m11 - m22) * 2.0;
            Quaternion::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = libm::sqrtf(1.0 + m11 - m00 - m22) * 2.0;
            Quaternion::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
        } else {
            let s = libm::sqrtf(1.0 + m22 - m00 - m11) * 2.0;
            Quaternion::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
        };
        q.normalize()
    }

    /// Get the magnitude of the quaternion.
    ///
    #[inline]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.dot(self))
    }

    /// Normalize the quaternion to make it a unit quaternion.
    ///
    pub fn normalize(&self) -> Quaternion {
        let magnitude_2 = self.dot(self);
        // Cannot normalize a quaternion with zero magnitude.
        if magnitude_2 == 0.0 {
            return *self;
        }
        *self / libm::sqrtf(magnitude_2)
    }

    /// Compute the conjugate of the quaternion.
    ///
    pub fn conjugate(&self) -> Self {
        Quaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Four dimensional dot product, for unit quaternions this is the cosine of half the angle
    /// between the two orientations.
    ///
    #[inline]
    pub fn dot(&self, other: &Quaternion) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn rotate(&self, vector: &Vector) -> Vector {
        // Convert the vector into a quaternion with w = 0
        let vector_quat = Quaternion::new(0.0, vector.x, vector.y, vector.z);

        // Rotate the vector using q * v * q^-1
        let rotated_quat = self * vector_quat * self.conjugate();

        Vector {
            x: rotated_quat.x,
            y: rotated_quat.y,
            z: rotated_quat.z,
        }
    }

    /// Spherical linear interpolation from `from` (at `t = 0`) to `to` (at `t = 1`) along the
    /// shortest arc.
    ///
    pub fn slerp(from: &Quaternion, to: &Quaternion, t: f32) -> Quaternion {
        let mut to = *to;
        let mut cos_theta = from.dot(&to);

        // q and -q describe the same rotation, flip one to take the short way around.
        if cos_theta < 0.0 {
            to = -to;
            cos_theta = -cos_theta;
        }

        if cos_theta > SLERP_PARALLEL_THRESHOLD {
            return (*from * (1.0 - t) + to * t).normalize();
        }

        let theta_0 = libm::acosf(cos_theta);
        let sin_theta_0 = libm::sinf(theta_0);
        let theta = theta_0 * t;

        let s0 = libm::sinf(theta_0 - theta) / sin_theta_0;
        let s1 = libm::sinf(theta) / sin_theta_0;

        (*from * s0 + to * s1).normalize()
    }

    /// Approximate equality check with a given tolerance.
    ///
    pub fn approx_eq(&self, other: &Quaternion, tol: f32) -> bool {
        libm::fabsf(self.x - other.x) <= tol
            && libm::fabsf(self.y - other.y) <= tol
            && libm::fabsf(self.z - other.z) <= tol
            && libm::fabsf(self.w - other.w) <= tol
    }

    /// Same as `approx_eq` but also accepts `-other`, which encodes the same rotation.
    ///
    pub fn same_rotation(&self, other: &Quaternion, tol: f32) -> bool {
        self.approx_eq(other, tol) || self.approx_eq(&-*other, tol)
    }

    /// Quaternion multiplication.
    ///
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }
}

impl Mul<Quaternion> for &Quaternion {
    type Output = Quaternion;
    fn mul(self, other: Quaternion) -> Self::Output {
        self.multiply(&other)
    }
}
impl Mul<&Quaternion> for &Quaternion {
    type Output = Quaternion;
    fn mul(self, other: &Quaternion) -> Self::Output {
        self.multiply(other)
    }
}
impl Mul<Quaternion> for Quaternion {
    type Output = Quaternion;
    fn mul(self, other: Quaternion) -> Self::Output {
        self.multiply(&other)
    }
}
impl Mul<&Quaternion> for Quaternion {
    type Output = Quaternion;
    fn mul(self, other: &Quaternion) -> Self::Output {
        self.multiply(other)
    }
}

impl Add for Quaternion
{
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Quaternion {
            w: self.w + other.w,
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Neg for Quaternion
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        Quaternion {
            w: -self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Div<f32> for Quaternion
{
    type Output = Self;

    fn div(self, other: f32) -> Self::Output {
        Quaternion {
            w: self.w / other,
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

impl Mul<f32> for Quaternion
{
    type Output = Self;

    fn mul(self, other: f32) -> Self::Output {
        Quaternion {
            w: self.w * other,
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}
