//! Labeled N-dimensional fields.
//!
//! A [`Field`] is an `ArrayD<f64>` whose axes carry names and an ordered
//! coordinate array each. It offers the handful of labeled-array capabilities
//! the differencing code needs: lookup by dimension name, positional slicing,
//! concatenation along a named dimension, elementwise arithmetic broadcast by
//! dimension name (see [`arith`]) and exact structural comparison.

pub mod arith;
pub mod utils;

pub use utils::*;

use crate::error::{DiffError, Result};
use ndarray::{s, Array1, ArrayD, ArrayViewD, Axis, IxDyn, Slice};
use std::ops::Range;

/// Field on a structured grid with named dimensions and coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    data: ArrayD<f64>,
    dims: Vec<String>,
    coords: Vec<Array1<f64>>,
}

impl Field {
    /// Create a field, checking that names are unique and coordinates fit the shape
    pub fn new<S: AsRef<str>>(
        data: ArrayD<f64>,
        dims: &[S],
        coords: Vec<Array1<f64>>,
    ) -> Result<Self> {
        let dims: Vec<String> = dims.iter().map(|d| d.as_ref().to_string()).collect();
        if dims.len() != data.ndim() || coords.len() != data.ndim() {
            return Err(DiffError::ShapeMismatch {
                expected: data.shape().to_vec(),
                found: coords.iter().map(|c| c.len()).collect(),
            });
        }
        for (i, dim) in dims.iter().enumerate() {
            if dims[..i].contains(dim) {
                return Err(DiffError::DuplicateDimension(dim.clone()));
            }
        }
        let found: Vec<usize> = coords.iter().map(|c| c.len()).collect();
        if found != data.shape() {
            return Err(DiffError::ShapeMismatch {
                expected: data.shape().to_vec(),
                found,
            });
        }
        Ok(Self { data, dims, coords })
    }

    /// One-dimensional field
    pub fn from_1d(values: Array1<f64>, dim: &str, coord: Array1<f64>) -> Result<Self> {
        Self::new(values.into_dyn(), &[dim], vec![coord])
    }

    /// Field holding a coordinate as its own values
    pub fn from_coord(dim: &str, coord: Array1<f64>) -> Self {
        Self {
            data: coord.clone().into_dyn(),
            dims: vec![dim.to_string()],
            coords: vec![coord],
        }
    }

    /// Zero-dimensional field
    pub fn scalar(value: f64) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(&[]), value),
            dims: Vec::new(),
            coords: Vec::new(),
        }
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_dim(&self, dim: &str) -> bool {
        self.dims.iter().any(|d| d == dim)
    }

    /// Axis index of a named dimension
    pub fn axis(&self, dim: &str) -> Result<usize> {
        self.dims
            .iter()
            .position(|d| d == dim)
            .ok_or_else(|| DiffError::DimensionNotFound {
                dim: dim.to_string(),
                dims: self.dims.clone(),
            })
    }

    pub fn len_of(&self, dim: &str) -> Result<usize> {
        Ok(self.data.len_of(Axis(self.axis(dim)?)))
    }

    pub fn coord(&self, dim: &str) -> Result<&Array1<f64>> {
        Ok(&self.coords[self.axis(dim)?])
    }

    /// The coordinate along `dim` as a one-dimensional field
    pub fn coord_field(&self, dim: &str) -> Result<Field> {
        Ok(Self::from_coord(dim, self.coord(dim)?.clone()))
    }

    /// Resolve the dimension to operate on.
    ///
    /// An explicit name must exist in the field. Without one, a
    /// one-dimensional field yields its sole dimension.
    pub fn resolve_dim(&self, dim: Option<&str>) -> Result<String> {
        match dim {
            Some(d) if self.has_dim(d) => Ok(d.to_string()),
            Some(d) => Err(DiffError::DimensionNotFound {
                dim: d.to_string(),
                dims: self.dims.clone(),
            }),
            None if self.dims.len() == 1 => Ok(self.dims[0].clone()),
            None => Err(DiffError::AmbiguousDimension {
                dims: self.dims.clone(),
            }),
        }
    }

    /// Same dims and coords with new values
    pub fn with_data(&self, data: ArrayD<f64>) -> Result<Field> {
        if data.shape() != self.shape() {
            return Err(DiffError::ShapeMismatch {
                expected: self.shape().to_vec(),
                found: data.shape().to_vec(),
            });
        }
        Ok(Self {
            data,
            dims: self.dims.clone(),
            coords: self.coords.clone(),
        })
    }

    /// Replace the coordinate along `dim`
    pub fn with_coord(&self, dim: &str, coord: Array1<f64>) -> Result<Field> {
        let ax = self.axis(dim)?;
        if coord.len() != self.data.len_of(Axis(ax)) {
            return Err(DiffError::ShapeMismatch {
                expected: vec![self.data.len_of(Axis(ax))],
                found: vec![coord.len()],
            });
        }
        let mut out = self.clone();
        out.coords[ax] = coord;
        Ok(out)
    }

    pub fn full_like(&self, value: f64) -> Field {
        Self {
            data: ArrayD::from_elem(self.data.raw_dim(), value),
            dims: self.dims.clone(),
            coords: self.coords.clone(),
        }
    }

    pub fn zeros_like(&self) -> Field {
        self.full_like(0.0)
    }

    pub fn ones_like(&self) -> Field {
        self.full_like(1.0)
    }

    /// Apply a function to every value, keeping the labels
    pub fn mapv<F: Fn(f64) -> f64>(&self, f: F) -> Field {
        Self {
            data: self.data.mapv(f),
            dims: self.dims.clone(),
            coords: self.coords.clone(),
        }
    }

    /// Positional slice along `dim`
    pub fn slice_range(&self, dim: &str, range: Range<usize>) -> Result<Field> {
        let ax = self.axis(dim)?;
        let len = self.data.len_of(Axis(ax));
        if range.start > range.end || range.end > len {
            return Err(DiffError::insufficient(dim, len, range.end));
        }
        let slice = Slice::from(range.clone());
        let mut coords = self.coords.clone();
        coords[ax] = self.coords[ax].slice_axis(Axis(0), slice).to_owned();
        Ok(Self {
            data: self.data.slice_axis(Axis(ax), slice).to_owned(),
            dims: self.dims.clone(),
            coords,
        })
    }

    /// Positional slice with Python-style bounds: negative values count from
    /// the end and out-of-range bounds are clipped.
    pub fn isel(&self, dim: &str, start: isize, end: Option<isize>) -> Result<Field> {
        let len = self.len_of(dim)?;
        let range = py_range(len, start, end);
        self.slice_range(dim, range)
    }

    /// Concatenate fields along `dim` in the given order.
    ///
    /// All pieces must share dimension names, order and the coordinates of
    /// every other dimension.
    pub fn concat(pieces: &[&Field], dim: &str) -> Result<Field> {
        let first = match pieces.first() {
            Some(f) => *f,
            None => {
                return Err(DiffError::insufficient(dim, 0, 1));
            }
        };
        let ax = first.axis(dim)?;
        for piece in &pieces[1..] {
            if piece.dims != first.dims {
                return Err(DiffError::DimensionNotFound {
                    dim: dim.to_string(),
                    dims: piece.dims.clone(),
                });
            }
            for (i, name) in first.dims.iter().enumerate() {
                if i != ax && piece.coords[i] != first.coords[i] {
                    return Err(DiffError::CoordinateMismatch { dim: name.clone() });
                }
            }
        }
        let views: Vec<ArrayViewD<'_, f64>> = pieces.iter().map(|p| p.data.view()).collect();
        let data = ndarray::concatenate(Axis(ax), &views).map_err(|_| {
            DiffError::ShapeMismatch {
                expected: first.shape().to_vec(),
                found: pieces.iter().map(|p| p.len_of_axis(ax)).collect(),
            }
        })?;
        let coord_views: Vec<_> = pieces.iter().map(|p| p.coords[ax].view()).collect();
        let coord = ndarray::concatenate(Axis(0), &coord_views).map_err(|_| {
            DiffError::CoordinateMismatch {
                dim: dim.to_string(),
            }
        })?;
        let mut coords = first.coords.clone();
        coords[ax] = coord;
        Ok(Self {
            data,
            dims: first.dims.clone(),
            coords,
        })
    }

    fn len_of_axis(&self, ax: usize) -> usize {
        self.data.len_of(Axis(ax))
    }

    /// Restrict this field to the coordinates `other` carries on each shared
    /// dimension. Those coordinates must form a contiguous run of this
    /// field's own.
    pub fn subset_like(&self, other: &Field) -> Result<Field> {
        let mut out = self.clone();
        for (dim, coord) in other.dims.iter().zip(&other.coords) {
            if out.has_dim(dim) {
                out = out.restrict_to(dim, coord)?;
            }
        }
        Ok(out)
    }

    /// Restrict both fields to their common extent. On each shared dimension
    /// the shorter coordinate must be a contiguous run of the longer one.
    pub fn overlap(&self, other: &Field) -> Result<(Field, Field)> {
        let mut left = self.clone();
        let mut right = other.clone();
        for (dim, coord) in other.dims.iter().zip(&other.coords) {
            let Ok(ax) = left.axis(dim) else {
                continue;
            };
            if left.coords[ax].len() > coord.len() {
                left = left.restrict_to(dim, coord)?;
            } else {
                let own = left.coords[ax].clone();
                right = right.restrict_to(dim, &own)?;
            }
        }
        Ok((left, right))
    }

    fn restrict_to(&self, dim: &str, coord: &Array1<f64>) -> Result<Field> {
        let own = self.coord(dim)?;
        if own == coord {
            return Ok(self.clone());
        }
        let n = coord.len();
        let start = (0..(own.len() + 1).saturating_sub(n))
            .find(|&i| own.slice(s![i..i + n]) == *coord)
            .ok_or_else(|| DiffError::CoordinateMismatch {
                dim: dim.to_string(),
            })?;
        self.slice_range(dim, start..start + n)
    }

    /// Same dimension names in the same order with identical coordinates
    pub fn coords_identical(&self, other: &Field) -> bool {
        self.dims == other.dims && self.coords == other.coords
    }

    /// Exact structural equality; NaNs in matching positions compare equal
    pub fn identical(&self, other: &Field) -> bool {
        self.coords_identical(other)
            && self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }

    /// Same labels and every value within `tol`
    pub fn all_close(&self, other: &Field, tol: f64) -> bool {
        self.coords_identical(other)
            && self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

/// Convert Python-style slice bounds into a clipped index range
pub fn py_range(len: usize, start: isize, end: Option<isize>) -> Range<usize> {
    let clip = |i: isize| -> usize {
        if i < 0 {
            (len as isize + i).max(0) as usize
        } else {
            (i as usize).min(len)
        }
    };
    let lo = clip(start);
    let hi = end.map(clip).unwrap_or(len);
    lo..hi.max(lo)
}
