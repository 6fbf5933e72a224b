use std::time::Instant;

use math::Vector;
use transport::{ImuPayload, Reading};
use crate::{source::wrapping_millis, DataSource, NoiseGenerator};

const GRAVITY: f32 = 9.81;

/// Generates random, physically meaningless readings: an accelerometer vector of gravity's
/// magnitude pointing anywhere, and gyroscope and magnetometer noise scaled by the time step.
/// All three readings carry the time since the generator was created.
///
pub struct ImuGenerator {
    start: Instant,
    delta_time: f32,
    noise: NoiseGenerator,
}

impl ImuGenerator {
    pub fn new(delta_time: f32, seed: u64) -> Self {
        ImuGenerator {
            start: Instant::now(),
            delta_time,
            noise: NoiseGenerator::new(seed),
        }
    }

    fn random_accel(&mut self) -> Vector {
        loop {
            if let Some(direction) = self.noise.gaussian_vector(1.0).try_normalize() {
                return direction * GRAVITY;
            }
        }
    }
}

impl DataSource for ImuGenerator {
    fn next_payload(&mut self) -> ImuPayload {
        let time = wrapping_millis(self.start.elapsed().as_secs_f64());

        let accel = self.random_accel();
        let gyro = self.noise.gaussian_vector(180.0 * self.delta_time);
        let mag = self.noise.gaussian_vector(self.delta_time);

        ImuPayload::new(
            Reading::new(accel, time),
            Reading::new(gyro, time),
            Reading::new(mag, time),
        )
    }
}
