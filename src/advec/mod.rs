//! Upwind advection.
//!
//! The advection of a field by a flow is `flow * df/dx`, where the
//! derivative is taken with the backward stencil where the flow is
//! non-negative and with the forward stencil where it is negative.

pub mod phys;

pub use phys::*;

use crate::config::FillEdge;
use crate::diff::split_flow;
use crate::error::{DiffError, Result};
use crate::field::Field;
use log::trace;

/// Backward and forward derivatives feeding an upwind combination
pub trait UpwindDerivs {
    /// Extra input the derivatives need, such as latitudes or an operator
    type Args: ?Sized;

    fn bwd(&self, args: &Self::Args) -> Result<Field>;

    fn fwd(&self, args: &Self::Args) -> Result<Field>;

    fn dim(&self) -> &str;

    /// Samples at each edge lacking support for one of the stencils
    fn n_edge(&self) -> usize;

    fn fill_edge(&self) -> FillEdge;

    fn cyclic(&self) -> bool;
}

/// Upwind combination of a pair of one-sided derivatives
#[derive(Debug, Clone)]
pub struct Upwind<U: UpwindDerivs> {
    flow: Field,
    derivs: U,
}

impl<U: UpwindDerivs> Upwind<U> {
    pub fn from_derivs(flow: &Field, derivs: U) -> Self {
        Self {
            flow: flow.clone(),
            derivs,
        }
    }

    pub fn flow(&self) -> &Field {
        &self.flow
    }

    pub fn derivs(&self) -> &U {
        &self.derivs
    }

    /// `flow⁺ * bwd + flow⁻ * fwd`.
    ///
    /// On a non-periodic dimension with filled edges the backward result
    /// takes the forward values in its leading cells and vice versa, so each
    /// edge is differenced away from the boundary whatever the flow sign.
    /// Without filling, the result covers only the points where both
    /// stencils exist.
    pub fn advec_with(&self, args: &U::Args) -> Result<Field> {
        let dim = self.derivs.dim();
        let n = self.derivs.n_edge();
        let mut bwd = self.derivs.bwd(args)?;
        let mut fwd = self.derivs.fwd(args)?;
        let mut flow = self.flow.clone();

        if !self.derivs.cyclic() {
            if self.derivs.fill_edge().any() {
                (bwd, fwd) = swap_edges(&bwd, &fwd, dim, n)?;
            } else {
                let len = bwd.len_of(dim)?;
                if len < n {
                    return Err(DiffError::insufficient(dim, len, n));
                }
                bwd = bwd.slice_range(dim, 0..len - n)?;
                fwd = fwd.slice_range(dim, n..len)?;
                if flow.has_dim(dim) {
                    let full = flow.len_of(dim)?;
                    flow = flow.slice_range(dim, n..full - n)?;
                }
            }
        }

        let (flow_pos, flow_neg) = split_flow(&flow);
        &(&bwd * &flow_pos)? + &(&fwd * &flow_neg)?
    }
}

/// Replace the leading `n` cells of `bwd` with those of `fwd` and the
/// trailing `n` cells of `fwd` with those of `bwd`
pub fn swap_edges(bwd: &Field, fwd: &Field, dim: &str, n: usize) -> Result<(Field, Field)> {
    let len = bwd.len_of(dim)?;
    if len < n {
        return Err(DiffError::insufficient(dim, len, n));
    }
    trace!("swapping {} edge cells along '{}'", n, dim);
    let bwd_new = Field::concat(
        &[&fwd.slice_range(dim, 0..n)?, &bwd.slice_range(dim, n..len)?],
        dim,
    )?;
    let fwd_new = Field::concat(
        &[&fwd.slice_range(dim, 0..len - n)?, &bwd.slice_range(dim, len - n..len)?],
        dim,
    )?;
    Ok((bwd_new, fwd_new))
}
