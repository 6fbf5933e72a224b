use core::f32::consts::PI;
use transport::{ImuPayload, Reading};
use crate::*;
use math::*;

/// Gravity as measured by a device at rest in its reference orientation.
const REST_ACCEL: Vector = Vector::new(0.0, -9.81, 0.0);

/// Earth's magnetic field as measured by a device in its reference orientation.
const REST_MAG: Vector = Vector::new(0.0, 400.0, -200.0);

fn payload(accel: Vector, gyro: Vector, mag: Vector, time_ms: u32) -> ImuPayload {
    ImuPayload::new(
        Reading::new(accel, time_ms),
        Reading::new(gyro, time_ms),
        Reading::new(mag, time_ms),
    )
}

fn assert_unit(q: &Quaternion) {
    assert!(libm::fabsf(q.magnitude() - 1.0) < 1e-5, "|{:?}| = {}", q, q.magnitude());
}

#[test]
pub fn first_payload_leaves_orientation_unchanged() {
    let mut fusion = SensorFusion::new();
    let first = payload(Vector::new(3.0, -2.0, 1.0), Vector::new(1.0, 1.0, 1.0), REST_MAG, 10);

    let orientation = fusion.update(&first).unwrap();

    assert_eq!(orientation, Quaternion::identity());
    assert_eq!(fusion.previous, Some(first));
}

/// A device at rest in its reference orientation should stay at the identity orientation.
///
#[test]
pub fn no_movement_unchanged() {
    let mut fusion = SensorFusion::new();
    for i in 0..50 {
        let orientation = fusion
            .update(&payload(REST_ACCEL, Vector::zero(), REST_MAG, i * 10))
            .unwrap();
        assert!(orientation.same_rotation(&Quaternion::identity(), 1e-5), "{:?}", orientation);
    }
}

#[test]
pub fn compass_of_reference_orientation_is_identity() {
    let q = compass_orientation(&REST_ACCEL, &REST_MAG).unwrap();
    assert!(q.same_rotation(&Quaternion::identity(), 1e-6), "{:?}", q);
}

/// With a zero gyroscope reading the gyroscope delta is the identity rotation, so the update
/// reduces to blending the compass with the current orientation.
///
#[test]
pub fn zero_gyro_blends_compass_with_current_orientation() {
    let accel = Vector::new(1.0, -9.0, 2.0);
    let mag = Vector::new(100.0, 300.0, -250.0);
    let reading = payload(accel, Vector::zero(), mag, 500);

    let mut fusion = SensorFusion::new();
    let current = Quaternion::from(EulerAngles::new(0.4, -0.3, 0.2));
    fusion.orientation = current;

    fusion.update(&reading).unwrap();
    let orientation = fusion.update(&reading).unwrap();

    let compass = compass_orientation(&accel, &mag).unwrap();
    let expected = Quaternion::slerp(&compass, &current, DEFAULT_ALPHA);
    assert!(orientation.approx_eq(&expected, 1e-5), "{:?} != {:?}", orientation, expected);
    assert_unit(&orientation);
}

#[test]
pub fn gyro_rotation_is_integrated_over_time() {
    let mut fusion = SensorFusion::new();
    let spin = Vector::new(0.0, 1.0, 0.0); // 1 rad/s around the up axis

    fusion.update(&payload(REST_ACCEL, spin, REST_MAG, 1000)).unwrap();
    let orientation = fusion.update(&payload(REST_ACCEL, spin, REST_MAG, 1100)).unwrap();

    // The gyroscope says 0.1 rad, the compass says 0 rad.
    let expected = Quaternion::from_rotation_vector(&Vector::new(0.0, 0.1 * DEFAULT_ALPHA, 0.0));
    assert!(orientation.approx_eq(&expected, 1e-4), "{:?} != {:?}", orientation, expected);
}

#[test]
pub fn backwards_timestamp_counts_as_no_time() {
    assert_eq!(delta_seconds(u32::MAX - 5, 10), 0.0);
    assert_eq!(delta_seconds(2000, 1999), 0.0);
    assert_eq!(delta_seconds(1000, 1250), 0.25);

    let mut fusion = SensorFusion::new();
    let spin = Vector::new(0.0, 0.0, 5.0);
    fusion.update(&payload(REST_ACCEL, spin, REST_MAG, u32::MAX - 5)).unwrap();
    let orientation = fusion.update(&payload(REST_ACCEL, spin, REST_MAG, 10)).unwrap();

    assert!(orientation.same_rotation(&Quaternion::identity(), 1e-5), "{:?}", orientation);
}

#[test]
pub fn zero_accel_is_rejected_and_orientation_kept() {
    let mut fusion = SensorFusion::new();
    fusion.update(&payload(Vector::zero(), Vector::zero(), REST_MAG, 0)).unwrap();

    let result = fusion.update(&payload(REST_ACCEL, Vector::zero(), REST_MAG, 10));
    assert_eq!(result, Err(NumericError::DegenerateAccel));
    assert_eq!(fusion.orientation, Quaternion::identity());

    // The rejected update still moved the history forward.
    assert!(fusion.update(&payload(REST_ACCEL, Vector::zero(), REST_MAG, 20)).is_ok());
}

#[test]
pub fn mag_parallel_to_gravity_is_rejected() {
    let mut fusion = SensorFusion::new();
    let mag = Vector::new(0.0, 50.0, 0.0);
    fusion.update(&payload(REST_ACCEL, Vector::zero(), mag, 0)).unwrap();

    let result = fusion.update(&payload(REST_ACCEL, Vector::zero(), mag, 10));
    assert_eq!(result, Err(NumericError::DegenerateMag));
    assert_eq!(
        compass_orientation(&REST_ACCEL, &Vector::zero()),
        Err(NumericError::DegenerateMag)
    );
}

#[test]
pub fn non_finite_gyro_is_rejected() {
    let mut fusion = SensorFusion::new();
    let gyro = Vector::new(f32::NAN, 0.0, 0.0);
    fusion.update(&payload(REST_ACCEL, gyro, REST_MAG, 0)).unwrap();

    let result = fusion.update(&payload(REST_ACCEL, Vector::zero(), REST_MAG, 10));
    assert_eq!(result, Err(NumericError::NonFiniteGyro));
    assert_eq!(fusion.orientation, Quaternion::identity());
}

#[test]
pub fn blend_weight_must_lie_between_zero_and_one() {
    assert!(SensorFusion::with_alpha(0.5).is_ok());
    assert_eq!(SensorFusion::with_alpha(1.0).err(), Some(NumericError::InvalidBlendWeight(1.0)));
    assert!(SensorFusion::with_alpha(0.0).is_err());
    assert!(SensorFusion::with_alpha(f32::NAN).is_err());
}

#[test]
pub fn orientation_stays_normalized_under_motion() {
    let mut fusion = SensorFusion::with_alpha(0.9).unwrap();
    let mut device = Quaternion::identity();
    let rate = Vector::new(0.3, -PI / 4.0, 0.7);

    for i in 0..200u32 {
        let delta = Quaternion::from_rotation_vector(&(rate * 0.01));
        device = (delta * device).normalize();

        let reading = payload(device.rotate(&REST_ACCEL), rate, device.rotate(&REST_MAG), i * 10);
        let orientation = fusion.update(&reading).unwrap();
        assert_unit(&orientation);
    }
}

#[test]
pub fn reset_returns_to_identity() {
    let mut fusion = SensorFusion::with_alpha(0.7).unwrap();
    fusion.orientation = Quaternion::from(EulerAngles::new(1.0, 0.0, 0.0));
    fusion.previous = Some(payload(REST_ACCEL, Vector::zero(), REST_MAG, 0));

    fusion.reset();

    assert_eq!(fusion.orientation, Quaternion::identity());
    assert_eq!(fusion.previous, None);
    assert_eq!(fusion.alpha, 0.7);
}

#[test]
pub fn compass_handles_huge_readings() {
    let q = compass_orientation(&(REST_ACCEL * 1e36), &(REST_MAG * 1e30)).unwrap();
    assert!(q.same_rotation(&Quaternion::identity(), 1e-5), "{:?}", q);
}
