use core::f32::consts::PI;

use math::{Quaternion, Vector};
use transport::{ImuPayload, Reading};
use crate::{source::wrapping_millis, DataSource, NoiseGenerator};

/// Gravity in world space, in m/s^2.
const GRAVITY: Vector = Vector::new(0.0, -9.81, 0.0);

/// Earth's magnetic field in world space, in mGauss.
const MAGNETIC_FIELD: Vector = Vector::new(0.0, 400.0, -200.0);

#[derive(Debug, Clone, Copy)]
pub struct SimulatorSettings
{
    /// In rad/s; limit of the angular velocity around every axis.
    pub max_angular_vel: f32,

    /// In m/s^2.
    pub accel_noise: f32,

    /// In rad/s.
    pub gyro_noise: f32,

    /// In mGauss.
    pub mag_noise: f32,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        SimulatorSettings {
            max_angular_vel: PI / 4.0,
            accel_noise: 0.05,
            gyro_noise: 0.01,
            mag_noise: 10.0,
        }
    }
}

/// Simulates a device tumbling around randomly. Random angular accelerations are integrated into
/// a smooth angular velocity, which in turn is integrated into the orientation; the readings are
/// gravity and the magnetic field seen from that orientation, plus sensor noise.
///
pub struct ImuSimulator {
    settings: SimulatorSettings,
    noise: NoiseGenerator,

    /// In seconds; simulated time between two payloads.
    time_step: f32,

    /// Amount of payloads generated so far.
    steps: u64,

    orientation: Quaternion,
    angular_vel: Vector,
}

impl ImuSimulator {
    pub fn new(time_step: f32, settings: SimulatorSettings, seed: u64) -> Self {
        ImuSimulator {
            settings,
            noise: NoiseGenerator::new(seed),
            time_step,
            steps: 0,
            orientation: Quaternion::identity(),
            angular_vel: Vector::zero(),
        }
    }

    /// The simulated orientation the latest payload was generated from.
    ///
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    fn step_rotation(&mut self) -> Quaternion {
        let max_vel = self.settings.max_angular_vel;

        // Random angular acceleration rather than random velocity keeps the motion smooth.
        let angular_accel = self.noise.gaussian_vector(max_vel * 10.0);
        let vel = self.angular_vel + angular_accel * self.time_step;
        self.angular_vel = Vector::new(
            vel.x.clamp(-max_vel, max_vel),
            vel.y.clamp(-max_vel, max_vel),
            vel.z.clamp(-max_vel, max_vel),
        );

        Quaternion::from_rotation_vector(&(self.angular_vel * self.time_step))
    }
}

impl DataSource for ImuSimulator {
    fn next_payload(&mut self) -> ImuPayload {
        let rotation = self.step_rotation();
        self.orientation = (rotation * self.orientation).normalize();
        self.steps += 1;

        let accel = self.orientation.rotate(&GRAVITY) + self.noise.gaussian_vector(self.settings.accel_noise);
        let gyro = self.angular_vel + self.noise.gaussian_vector(self.settings.gyro_noise);
        let mag = self.orientation.rotate(&MAGNETIC_FIELD) + self.noise.gaussian_vector(self.settings.mag_noise);

        let time = wrapping_millis(self.steps as f64 * self.time_step as f64);
        ImuPayload::new(
            Reading::new(accel, time),
            Reading::new(gyro, time),
            Reading::new(mag, time),
        )
    }
}
