use super::hybrid::*;
use super::weights::*;
use crate::error::DiffError;
use crate::field::Field;
use ndarray::array;

#[test]
fn test_binomial() {
    assert_eq!(binomial(4, 2), 6.0);
    assert_eq!(binomial(6, 0), 1.0);
    assert_eq!(binomial(6, 6), 1.0);
    assert_eq!(binomial(3, 5), 0.0);
}

#[test]
fn test_binomial_large_orders() {
    // Pascal's rule holds past the range of exact integer products
    for (n, k) in [(130, 65), (200, 37), (300, 150)] {
        let lhs = binomial(n, k);
        let rhs = binomial(n - 1, k - 1) + binomial(n - 1, k);
        assert!(lhs.is_finite());
        assert!(((lhs - rhs) / lhs).abs() < 1e-12, "C({}, {})", n, k);
        assert_eq!(binomial(n, k), binomial(n, n - k));
    }
    assert!(one_sided_weights(130).iter().all(|w| w.is_finite()));
}

#[test]
fn test_one_sided_weights() {
    assert_eq!(one_sided_weights(1), vec![1.0]);
    assert_eq!(one_sided_weights(2), vec![2.0, -1.0]);
    assert_eq!(one_sided_weights(3), vec![3.0, -3.0, 1.0]);
    for order in 1..6 {
        let sum: f64 = one_sided_weights(order).iter().sum();
        assert_eq!(sum, 1.0);
    }
}

#[test]
fn test_centered_weights() {
    assert_eq!(centered_weights(2).unwrap(), vec![1.0]);
    let w4 = centered_weights(4).unwrap();
    assert!((w4[0] - 4.0 / 3.0).abs() < 1e-15);
    assert!((w4[1] + 1.0 / 3.0).abs() < 1e-15);
    let w6 = centered_weights(6).unwrap();
    assert!((w6[0] - 1.5).abs() < 1e-15);
    assert!((w6[1] + 0.6).abs() < 1e-15);
    assert!((w6[2] - 0.1).abs() < 1e-15);
    assert!(matches!(centered_weights(3), Err(DiffError::InvalidOrder { order: 3, .. })));
    assert!(centered_weights(0).is_err());
}

#[test]
fn test_hybrid_pressure() {
    let pk = array![0.0, 5000.0, 2000.0, 0.0];
    let bk = array![0.0, 0.0, 0.5, 1.0];
    let coord = HybridCoord::new(pk, bk, Field::scalar(1e5)).unwrap();
    assert_eq!(coord.nlev(), 3);

    let phalf = coord.phalf().unwrap();
    assert_eq!(phalf.data().iter().copied().collect::<Vec<_>>(), vec![0.0, 5000.0, 52000.0, 1e5]);

    let pfull = coord.pfull("pfull", &array![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(pfull.dims(), &["pfull".to_string()]);
    assert_eq!(pfull.data().iter().copied().collect::<Vec<_>>(), vec![2500.0, 28500.0, 76000.0]);
}

#[test]
fn test_hybrid_coefficient_errors() {
    let ps = Field::scalar(1e5);
    assert!(matches!(
        HybridCoord::new(array![0.0, 1.0], array![0.0], ps.clone()),
        Err(DiffError::InvalidCoefficients { expected: 2, found: 1 })
    ));
    let coord = HybridCoord::new(array![0.0, 1.0], array![0.0, 1.0], ps).unwrap();
    assert!(matches!(
        coord.pfull("pfull", &array![1.0, 2.0]),
        Err(DiffError::InvalidCoefficients { expected: 3, found: 2 })
    ));
}
