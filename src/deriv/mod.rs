//! Order-accurate derivative engines and their coordinate-aware wrappers.

pub mod centered;
pub mod eta;
pub mod lat;
pub mod lon;
pub mod onesided;
pub mod sphere;

pub use centered::*;
pub use eta::*;
pub use lat::*;
pub use lon::*;
pub use onesided::*;
pub use sphere::*;

use crate::config::{DerivConfig, FillEdge};
use crate::error::{DiffError, Result};
use crate::field::Field;

/// A derivative along one dimension of a field.
///
/// Implemented by the forward, backward and centered engines; the
/// coordinate-aware derivatives are generic over it.
pub trait DerivEngine: Sized + Send + Sync {
    /// Build an engine. `dim` may be omitted for one-dimensional fields and
    /// `coord` defaults to the field's own coordinate along `dim`.
    fn new(arr: &Field, dim: Option<&str>, coord: Option<&Field>, config: DerivConfig)
        -> Result<Self>;

    fn deriv(&self) -> Result<Field>;

    fn arr(&self) -> &Field;

    fn dim(&self) -> &str;

    fn coord(&self) -> &Field;

    fn config(&self) -> &DerivConfig;

    /// Samples appended on the right and prepended on the left when cyclic
    fn wrap_extent(config: &DerivConfig) -> (usize, usize);

    /// Effective edge policy; cyclic derivatives have no edges to fill
    fn fill_edge(&self) -> FillEdge {
        if self.config().cyclic {
            FillEdge::None
        } else {
            self.config().fill_edge
        }
    }

    fn cyclic(&self) -> bool {
        self.config().cyclic
    }
}

/// Resolve the target dimension and coordinate of an engine
pub(crate) fn prep_dim(
    arr: &Field,
    dim: Option<&str>,
    coord: Option<&Field>,
) -> Result<(String, Field)> {
    let dim = arr.resolve_dim(dim)?;
    let coord = match coord {
        Some(c) => {
            let own = arr.coord(&dim)?;
            if c.coord(&dim)? != own {
                return Err(DiffError::CoordinateMismatch { dim });
            }
            c.clone()
        }
        None => arr.coord_field(&dim)?,
    };
    Ok((dim, coord))
}

/// Weighted sum of fields sharing their labels
pub(crate) fn weighted_sum(terms: Vec<(Field, f64)>) -> Result<Field> {
    let mut acc: Option<Field> = None;
    for (field, weight) in terms {
        let term = field * weight;
        acc = Some(match acc {
            None => term,
            Some(sum) => (&sum + &term)?,
        });
    }
    acc.ok_or_else(|| DiffError::InvalidOrder {
        order: 0,
        reason: "no stencil terms".to_string(),
    })
}
