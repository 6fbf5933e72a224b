use core::ops::{Add, Div, Mul, Neg};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector
{
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector
{
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector { x, y, z }
    }

    /// Returns a zero vector.
    ///
    pub const fn zero() -> Self {
        Vector { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Calculate the length/magnitude of the vector. Large components are scaled down before
    /// squaring, so any vector with finite components has a finite length.
    ///
    pub fn magnitude(&self) -> f32 {
        let scale = libm::fabsf(self.x).max(libm::fabsf(self.y)).max(libm::fabsf(self.z));
        if scale == 0.0 || scale.is_infinite() {
            return scale;
        }
        let (x, y, z) = (self.x / scale, self.y / scale, self.z / scale);
        scale * libm::sqrtf(x * x + y * y + z * z)
    }

    /// Normalize the vector, a vector without a usable direction normalizes to the zero vector.
    ///
    pub fn normalize(&self) -> Vector {
        self.try_normalize().unwrap_or(Vector::zero())
    }

    /// Normalize the vector or return `None` when it has no direction, i.e. when its length is
    /// (almost) zero or any of its components is not finite.
    ///
    pub fn try_normalize(&self) -> Option<Vector> {
        let len = self.magnitude();
        if !len.is_finite() || len <= f32::EPSILON {
            return None;
        }
        Some(self / len)
    }

    /// Are all three components finite numbers?
    ///
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Take the dot product of two vectors.
    ///
    pub fn dot(&self, other: &Vector) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Get the cross product of two vectors.
    ///
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Approximate equality check with a given tolerance.
    pub fn approx_eq(&self, other: &Vector, tol: f32) -> bool {
        libm::fabsf(self.x - other.x) <= tol
            && libm::fabsf(self.y - other.y) <= tol
            && libm::fabsf(self.z - other.z) <= tol
    }
}

impl Add for Vector
{
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Neg for Vector
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        Vector {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Div<f32> for Vector
{
    type Output = Self;

    fn div(self, other: f32) -> Self::Output {
        Vector {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

impl Div<f32> for &Vector
{
    type Output = Vector;

    fn div(self, other: f32) -> Self::Output {
        Vector {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

impl Mul<f32> for Vector
{
    type Output = Self;

    fn mul(self, other: f32) -> Self::Output {
        Vector {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}
