use super::Field;
use crate::error::{DiffError, Result};
use ndarray::Array1;

/// Extend a field periodically along `dim`.
///
/// The first `left_to_right` samples are appended on the right with their
/// coordinates shifted by `+circumference`, and the last `right_to_left`
/// samples are prepended on the left shifted by `-circumference`.
pub fn wraparound(
    field: &Field,
    dim: &str,
    circumference: f64,
    left_to_right: usize,
    right_to_left: usize,
) -> Result<Field> {
    let len = field.len_of(dim)?;
    let needed = left_to_right.max(right_to_left);
    if needed > len {
        return Err(DiffError::insufficient(dim, len, needed));
    }

    let mut pieces = Vec::with_capacity(3);
    if right_to_left > 0 {
        let edge = field.slice_range(dim, len - right_to_left..len)?;
        let shifted = edge.coord(dim)?.mapv(|c| c - circumference);
        pieces.push(edge.with_coord(dim, shifted)?);
    }
    pieces.push(field.clone());
    if left_to_right > 0 {
        let edge = field.slice_range(dim, 0..left_to_right)?;
        let shifted = edge.coord(dim)?.mapv(|c| c + circumference);
        pieces.push(edge.with_coord(dim, shifted)?);
    }

    let refs: Vec<&Field> = pieces.iter().collect();
    Field::concat(&refs, dim)
}

/// [`wraparound`] for a field whose values are themselves positions along
/// `dim`: the wrapped values move by the circumference with their labels.
pub fn wraparound_coord(
    coord: &Field,
    dim: &str,
    circumference: f64,
    left_to_right: usize,
    right_to_left: usize,
) -> Result<Field> {
    let len = coord.len_of(dim)?;
    let wrapped = wraparound(coord, dim, circumference, left_to_right, right_to_left)?;
    let shift = Array1::from_shape_fn(wrapped.len_of(dim)?, |i| {
        if i < right_to_left {
            -circumference
        } else if i >= right_to_left + len {
            circumference
        } else {
            0.0
        }
    });
    let shift = Field::from_1d(shift, dim, wrapped.coord(dim)?.clone())?;
    &wrapped + &shift
}
