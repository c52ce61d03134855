//! Raw finite differences along a named dimension.
//!
//! A forward difference at spacing `s` is `a[i+s] - a[i]` labelled with the
//! lower coordinate `x[i]`; a backward difference is the same quantity
//! labelled with the upper coordinate `x[i+s]`. Both shrink the dimension by
//! `s` samples.

use crate::config::FillEdge;
use crate::error::{DiffError, Result};
use crate::field::{wraparound, Field};

fn check_extent(field: &Field, dim: &str, spacing: usize) -> Result<usize> {
    if spacing < 1 {
        return Err(DiffError::InvalidSpacing { spacing });
    }
    let len = field.len_of(dim)?;
    if len <= spacing {
        return Err(DiffError::insufficient(dim, len, spacing + 1));
    }
    Ok(len)
}

/// Forward difference, labelled with the lower coordinate of each pair
pub fn fwd_diff(field: &Field, dim: &str, spacing: usize) -> Result<Field> {
    let len = check_extent(field, dim, spacing)?;
    let lower = field.slice_range(dim, 0..len - spacing)?;
    let upper = field.slice_range(dim, spacing..len)?;
    let upper = upper.with_coord(dim, lower.coord(dim)?.clone())?;
    &upper - &lower
}

/// Backward difference, labelled with the upper coordinate of each pair
pub fn bwd_diff(field: &Field, dim: &str, spacing: usize) -> Result<Field> {
    let len = check_extent(field, dim, spacing)?;
    let lower = field.slice_range(dim, 0..len - spacing)?;
    let upper = field.slice_range(dim, spacing..len)?;
    let lower = lower.with_coord(dim, upper.coord(dim)?.clone())?;
    &upper - &lower
}

/// Centered difference at spacing `s`: the sum of the forward difference
/// starting at each point and the backward difference ending at it, labelled
/// with the centre coordinates `x[s..L-s]`.
///
/// Filled edges are one-sided differences at spacing `s` over the first or
/// last `2s` samples, so a filled result keeps the input's extent.
pub fn cen_diff(field: &Field, dim: &str, spacing: usize, fill_edge: FillEdge) -> Result<Field> {
    let len = check_extent(field, dim, spacing)?;
    if len <= 2 * spacing {
        return Err(DiffError::insufficient(dim, len, 2 * spacing + 1));
    }
    let left = field.slice_range(dim, 0..len - spacing)?;
    let right = field.slice_range(dim, spacing..len)?;
    let interior = (&fwd_diff(&right, dim, spacing)? + &bwd_diff(&left, dim, spacing)?)?;
    if !fill_edge.any() {
        return Ok(interior);
    }

    let mut pieces = Vec::with_capacity(3);
    if fill_edge.left() {
        pieces.push(fwd_diff(&field.slice_range(dim, 0..2 * spacing)?, dim, spacing)?);
    }
    pieces.push(interior);
    if fill_edge.right() {
        let edge = field.slice_range(dim, len - 2 * spacing..len)?;
        pieces.push(bwd_diff(&edge, dim, spacing)?);
    }
    let refs: Vec<&Field> = pieces.iter().collect();
    Field::concat(&refs, dim)
}

/// Direction of a one-sided stencil.
///
/// The derivative engines are generic over this trait; [`Forward`] and
/// [`Backward`] are its only implementors.
pub trait OneSided: Send + Sync + 'static {
    /// The opposite direction, used to fill the edge this one cannot reach
    type Reverse: OneSided;

    const NAME: &'static str;

    fn diff(field: &Field, dim: &str, spacing: usize) -> Result<Field>;

    /// The `n` samples at the edge lacking support
    fn edge_slice(field: &Field, dim: &str, n: usize) -> Result<Field>;

    /// Attach an edge patch to the side it was computed for
    fn concat(interior: &Field, edge: &Field, dim: &str) -> Result<Field>;

    /// Keep the `target` samples shared by stencils of every spacing
    fn trim_to(field: &Field, dim: &str, target: usize) -> Result<Field>;

    /// Samples appended on the right and prepended on the left when
    /// wrapping `n` samples around
    fn wrap_extent(n: usize) -> (usize, usize);

    /// Periodically extend the side lacking support by `n` samples
    fn wrap(field: &Field, dim: &str, circumference: f64, n: usize) -> Result<Field> {
        let (left_to_right, right_to_left) = Self::wrap_extent(n);
        wraparound(field, dim, circumference, left_to_right, right_to_left)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Forward;

#[derive(Debug, Clone, Copy, Default)]
pub struct Backward;

impl OneSided for Forward {
    type Reverse = Backward;

    const NAME: &'static str = "forward";

    fn diff(field: &Field, dim: &str, spacing: usize) -> Result<Field> {
        fwd_diff(field, dim, spacing)
    }

    fn edge_slice(field: &Field, dim: &str, n: usize) -> Result<Field> {
        let len = field.len_of(dim)?;
        if n > len {
            return Err(DiffError::insufficient(dim, len, n));
        }
        field.slice_range(dim, len - n..len)
    }

    fn concat(interior: &Field, edge: &Field, dim: &str) -> Result<Field> {
        Field::concat(&[interior, edge], dim)
    }

    fn trim_to(field: &Field, dim: &str, target: usize) -> Result<Field> {
        field.slice_range(dim, 0..target)
    }

    fn wrap_extent(n: usize) -> (usize, usize) {
        (n, 0)
    }
}

impl OneSided for Backward {
    type Reverse = Forward;

    const NAME: &'static str = "backward";

    fn diff(field: &Field, dim: &str, spacing: usize) -> Result<Field> {
        bwd_diff(field, dim, spacing)
    }

    fn edge_slice(field: &Field, dim: &str, n: usize) -> Result<Field> {
        let len = field.len_of(dim)?;
        if n > len {
            return Err(DiffError::insufficient(dim, len, n));
        }
        field.slice_range(dim, 0..n)
    }

    fn concat(interior: &Field, edge: &Field, dim: &str) -> Result<Field> {
        Field::concat(&[edge, interior], dim)
    }

    fn trim_to(field: &Field, dim: &str, target: usize) -> Result<Field> {
        let len = field.len_of(dim)?;
        if target > len {
            return Err(DiffError::insufficient(dim, len, target));
        }
        field.slice_range(dim, len - target..len)
    }

    fn wrap_extent(n: usize) -> (usize, usize) {
        (0, n)
    }
}

fn coord_or_own(arr: &Field, dim: &str, coord: Option<&Field>) -> Result<Field> {
    match coord {
        Some(c) => Ok(c.clone()),
        None => arr.coord_field(dim),
    }
}

/// First-order forward derivative `fwd_diff(arr) / fwd_diff(coord)`
pub fn fwd_diff_deriv(arr: &Field, dim: &str, coord: Option<&Field>) -> Result<Field> {
    let coord = coord_or_own(arr, dim, coord)?;
    &fwd_diff(arr, dim, 1)? / &fwd_diff(&coord, dim, 1)?
}

/// First-order backward derivative `bwd_diff(arr) / bwd_diff(coord)`
pub fn bwd_diff_deriv(arr: &Field, dim: &str, coord: Option<&Field>) -> Result<Field> {
    let coord = coord_or_own(arr, dim, coord)?;
    &bwd_diff(arr, dim, 1)? / &bwd_diff(&coord, dim, 1)?
}

/// Second-order centered derivative, optionally with one-sided edges
pub fn cen_diff_deriv(
    arr: &Field,
    dim: &str,
    coord: Option<&Field>,
    fill_edge: FillEdge,
) -> Result<Field> {
    let coord = coord_or_own(arr, dim, coord)?;
    &cen_diff(arr, dim, 1, fill_edge)? / &cen_diff(&coord, dim, 1, fill_edge)?
}

/// Non-negative and negative parts of a flow. Missing (NaN) values stay
/// NaN in both parts.
pub fn split_flow(flow: &Field) -> (Field, Field) {
    let flow_pos = flow.mapv(|v| if v.is_nan() || v >= 0.0 { v } else { 0.0 });
    let flow_neg = flow.mapv(|v| if v.is_nan() || v < 0.0 { v } else { 0.0 });
    (flow_pos, flow_neg)
}

/// First-order upwind advection `flow * d(arr)/d(dim)` on the interior
/// points `x[1..L-1]`, where both one-sided stencils are available.
pub fn upwind_advection(arr: &Field, flow: &Field, dim: &str) -> Result<Field> {
    let len = check_extent(arr, dim, 2)?;
    let bwd = bwd_diff_deriv(arr, dim, None)?.slice_range(dim, 0..len - 2)?;
    let fwd = fwd_diff_deriv(arr, dim, None)?.slice_range(dim, 1..len - 1)?;
    let flow = if flow.has_dim(dim) {
        flow.slice_range(dim, 1..len - 1)?
    } else {
        flow.clone()
    };
    let (flow_pos, flow_neg) = split_flow(&flow);
    &(&bwd * &flow_pos)? + &(&fwd * &flow_neg)?
}
