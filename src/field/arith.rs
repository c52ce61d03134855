//! Elementwise arithmetic between fields, broadcast by dimension name.
//!
//! The result carries the dimensions of the left operand in their order,
//! followed by any dimensions found only on the right. Dimensions present on
//! both sides must have identical coordinates.

use super::Field;
use crate::error::{DiffError, Result};
use crate::parallel::zip_map;
use ndarray::{Array1, ArrayViewD, Axis, IxDyn};
use std::ops::{Add, Div, Mul, Neg, Sub};

impl Field {
    /// Combine two fields elementwise after aligning them by dimension name
    pub fn zip_with<F>(&self, other: &Field, f: F) -> Result<Field>
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        let mut dims = self.dims.clone();
        let mut coords = self.coords.clone();
        for (dim, coord) in other.dims.iter().zip(&other.coords) {
            match self.dims.iter().position(|d| d == dim) {
                Some(ax) if self.coords[ax] != *coord => {
                    return Err(DiffError::CoordinateMismatch { dim: dim.clone() });
                }
                Some(_) => {}
                None => {
                    dims.push(dim.clone());
                    coords.push(coord.clone());
                }
            }
        }
        let shape: Vec<usize> = coords.iter().map(Array1::len).collect();

        let lhs = self.aligned_view(&dims);
        let rhs = other.aligned_view(&dims);
        let mismatch = |found: &[usize]| DiffError::ShapeMismatch {
            expected: shape.clone(),
            found: found.to_vec(),
        };
        let lhs = lhs
            .broadcast(IxDyn(&shape))
            .ok_or_else(|| mismatch(self.shape()))?;
        let rhs = rhs
            .broadcast(IxDyn(&shape))
            .ok_or_else(|| mismatch(other.shape()))?;

        let data = zip_map(&lhs, &rhs, f);
        Ok(Field { data, dims, coords })
    }

    /// View of the data with axes permuted into `dims` order and length-one
    /// axes inserted for the dimensions this field lacks
    fn aligned_view(&self, dims: &[String]) -> ArrayViewD<'_, f64> {
        let order: Vec<usize> = dims
            .iter()
            .filter_map(|d| self.dims.iter().position(|x| x == d))
            .collect();
        let mut view = self.data.view().permuted_axes(order);
        for (i, dim) in dims.iter().enumerate() {
            if !self.has_dim(dim) {
                view.insert_axis_inplace(Axis(i));
            }
        }
        view
    }
}

macro_rules! impl_field_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&Field> for &Field {
            type Output = Result<Field>;

            fn $method(self, rhs: &Field) -> Result<Field> {
                self.zip_with(rhs, |a, b| a $op b)
            }
        }

        impl $trait<f64> for &Field {
            type Output = Field;

            fn $method(self, rhs: f64) -> Field {
                self.mapv(|a| a $op rhs)
            }
        }

        impl $trait<f64> for Field {
            type Output = Field;

            fn $method(self, rhs: f64) -> Field {
                (&self).$method(rhs)
            }
        }
    };
}

impl_field_op!(Add, add, +);
impl_field_op!(Sub, sub, -);
impl_field_op!(Mul, mul, *);
impl_field_op!(Div, div, /);

impl Neg for &Field {
    type Output = Field;

    fn neg(self) -> Field {
        self.mapv(|a| -a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn grid() -> Field {
        let data = Array2::from_shape_fn((2, 3), |(i, j)| (10 * i + j) as f64);
        Field::new(
            data.into_dyn(),
            &["lat", "lon"],
            vec![array![-45.0, 45.0], array![0.0, 120.0, 240.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_broadcast_by_name() {
        let f = grid();
        let lat = f.coord_field("lat").unwrap();
        let out = (&f + &lat).unwrap();
        assert_eq!(out.dims(), f.dims());
        assert_eq!(out.data()[[1, 2]], 12.0 + 45.0);
        assert_eq!(out.data()[[0, 0]], -45.0);
    }

    #[test]
    fn test_right_only_dims_are_appended() {
        let lon = grid().coord_field("lon").unwrap();
        let lat = grid().coord_field("lat").unwrap();
        let out = (&lon * &lat).unwrap();
        assert_eq!(out.dims(), &["lon".to_string(), "lat".to_string()]);
        assert_eq!(out.shape(), &[3, 2]);
        assert_eq!(out.data()[[2, 0]], 240.0 * -45.0);
    }

    #[test]
    fn test_transposed_operand_aligns() {
        let f = grid();
        let data = f.data().clone().reversed_axes();
        let t = Field::new(
            data,
            &["lon", "lat"],
            vec![f.coord("lon").unwrap().clone(), f.coord("lat").unwrap().clone()],
        )
        .unwrap();
        let diff = (&f - &t).unwrap();
        assert!(diff.data().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_coordinate_mismatch() {
        let f = grid();
        let other = f.with_coord("lon", array![0.0, 90.0, 180.0]).unwrap();
        assert!(matches!(
            &f + &other,
            Err(DiffError::CoordinateMismatch { .. })
        ));
    }

    #[test]
    fn test_scalar_field_broadcasts() {
        let f = grid();
        let out = (&f * &Field::scalar(2.0)).unwrap();
        assert!(out.identical(&(&f * 2.0)));
    }
}
