use crate::*;

#[test]
fn test_cross_product_orthogonal_vectors() {
    let v1 = Vector { x: 1.0, y: 0.0, z: 0.0 };
    let v2 = Vector { x: 0.0, y: 1.0, z: 0.0 };
    let result = v1.cross(&v2);
    let expected = Vector { x: 0.0, y: 0.0, z: 1.0 };
    assert!(result.approx_eq(&expected, 1e-6));
}

#[test]
fn test_cross_product_parallel_vectors() {
    let v1 = Vector { x: 1.0, y: 2.0, z: 3.0 };
    let v2 = Vector { x: 2.0, y: 4.0, z: 6.0 };
    let result = v1.cross(&v2);
    let expected = Vector { x: 0.0, y: 0.0, z: 0.0 };
    assert!(result.approx_eq(&expected, 1e-6));
}

#[test]
fn test_cross_product_arbitrary_vectors() {
    let v1 = Vector { x: 3.0, y: -3.0, z: 1.0 };
    let v2 = Vector { x: 4.0, y: 9.0, z: 2.0 };
    let result = v1.cross(&v2);
    let expected = Vector { x: -15.0, y: -2.0, z: 39.0 };
    assert!(result.approx_eq(&expected, 1e-6));
}

#[test]
fn test_normalize_zero_vector() {
    assert_eq!(Vector::zero().try_normalize(), None);
    assert_eq!(Vector::zero().normalize(), Vector::zero());
}

#[test]
fn test_normalize_non_finite_vector() {
    assert_eq!(Vector::new(f32::NAN, 1.0, 0.0).try_normalize(), None);
    assert_eq!(Vector::new(f32::INFINITY, 0.0, 0.0).try_normalize(), None);
}

#[test]
fn test_normalize_unit_length() {
    let v = Vector::new(3.0, -4.0, 12.0).normalize();
    assert!((v.magnitude() - 1.0).abs() < 1e-6);
    assert!(v.approx_eq(&Vector::new(3.0 / 13.0, -4.0 / 13.0, 12.0 / 13.0), 1e-6));
}

#[test]
fn test_magnitude_of_huge_vector_is_finite() {
    let v = Vector::new(3e30, -4e30, 0.0);
    let len = v.magnitude();
    assert!(len.is_finite());
    assert!((len / 5e30 - 1.0).abs() < 1e-6);

    let n = Vector::new(1e20, 0.0, 0.0).try_normalize();
    assert_eq!(n, Some(Vector::new(1.0, 0.0, 0.0)));
}

#[test]
fn test_magnitude_of_non_finite_vector() {
    assert!(Vector::new(f32::NAN, 1.0, 0.0).magnitude().is_nan());
    assert_eq!(Vector::new(0.0, f32::NEG_INFINITY, 1.0).magnitude(), f32::INFINITY);
    assert_eq!(Vector::zero().magnitude(), 0.0);
}
