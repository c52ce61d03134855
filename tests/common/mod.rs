#![allow(dead_code)]

use indiff::config::{LAT_STR, LON_STR, PFULL_STR};
use indiff::Field;
use ndarray::{array, Array, Array1, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn lon() -> Array1<f64> {
    Array::range(0.0, 360.0, 15.0)
}

pub fn lat() -> Array1<f64> {
    Array::range(-81.0, 82.0, 18.0)
}

/// GFDL-style interface coefficients, top of model first
pub fn pk() -> Array1<f64> {
    array![0.0, 2000.0, 5000.0, 8000.0, 9000.0, 8000.0, 5000.0, 2000.0, 0.0]
}

pub fn bk() -> Array1<f64> {
    array![0.0, 0.0, 0.02, 0.08, 0.2, 0.38, 0.6, 0.82, 1.0]
}

/// Full-level reference pressures (hPa)
pub fn pfull() -> Array1<f64> {
    array![10.0, 45.0, 115.0, 225.0, 375.0, 555.0, 745.0, 920.0]
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(20240917)
}

fn random_data(rng: &mut StdRng, shape: &[usize]) -> ndarray::ArrayD<f64> {
    Array::from_shape_fn(IxDyn(shape), |_| rng.random::<f64>())
}

/// Random values on (pfull, lat, lon)
pub fn random_3d(rng: &mut StdRng) -> Field {
    let (pfull, lat, lon) = (pfull(), lat(), lon());
    let data = random_data(rng, &[pfull.len(), lat.len(), lon.len()]);
    Field::new(data, &[PFULL_STR, LAT_STR, LON_STR], vec![pfull, lat, lon]).unwrap()
}

/// Random surface pressure around 1000 hPa on (lat, lon)
pub fn random_ps(rng: &mut StdRng) -> Field {
    let (lat, lon) = (lat(), lon());
    let data = random_data(rng, &[lat.len(), lon.len()]);
    Field::new(data, &[LAT_STR, LON_STR], vec![lat, lon])
        .unwrap()
        .mapv(|v| v * 1e3 + 1e5)
}

/// `slope * x` along `dim` plus a smooth function of the other coordinates
pub fn linear_3d(dim: &str, slope: f64) -> Field {
    let names = [PFULL_STR, LAT_STR, LON_STR];
    let coords = vec![pfull(), lat(), lon()];
    let shape: Vec<usize> = coords.iter().map(|c| c.len()).collect();
    let data = Array::from_shape_fn(IxDyn(&shape), |idx| {
        names
            .iter()
            .enumerate()
            .map(|(ax, name)| {
                let x = coords[ax][idx[ax]];
                if *name == dim {
                    slope * x
                } else {
                    (0.1 * x).sin()
                }
            })
            .sum()
    });
    Field::new(data, &names, coords).unwrap()
}

pub fn random_1d(rng: &mut StdRng, dim: &str, coord: Array1<f64>) -> Field {
    let data = Array::from_shape_fn(coord.len(), |_| rng.random::<f64>());
    Field::from_1d(data, dim, coord).unwrap()
}

/// Values as a flat vector in logical order
pub fn values(field: &Field) -> Vec<f64> {
    field.data().iter().copied().collect()
}

pub fn assert_all_zeros(field: &Field) {
    assert!(
        field.data().iter().all(|v| *v == 0.0),
        "expected all zeros, got {:?}",
        values(field)
    );
}

pub fn assert_all_close(field: &Field, expected: f64, tol: f64) {
    for v in field.data().iter() {
        assert!((v - expected).abs() < tol, "{} != {}", v, expected);
    }
}
