use super::{prep_dim, weighted_sum, BwdDeriv, DerivEngine, FwdDeriv};
use crate::config::{DerivConfig, FillEdge};
use crate::diff::cen_diff;
use crate::error::{DiffError, Result};
use crate::field::{wraparound, wraparound_coord, Field};
use crate::math::centered_weights;
use log::{debug, trace};

/// Centered derivative of even order `2m`.
///
/// The interior combines the centered quotients at spacings `s..=m*s`.
/// Edges, where the widest stencil does not fit, are either dropped (`m*s`
/// samples at each end), filled with one-sided derivatives of order `m`, or
/// supplied by wrapping around a cyclic dimension.
#[derive(Debug, Clone)]
pub struct CenDeriv {
    arr: Field,
    dim: String,
    coord: Field,
    config: DerivConfig,
    fwd_edge: Option<FwdDeriv>,
    bwd_edge: Option<BwdDeriv>,
}

impl CenDeriv {
    pub fn new(
        arr: &Field,
        dim: Option<&str>,
        coord: Option<&Field>,
        config: DerivConfig,
    ) -> Result<Self> {
        config.validate()?;
        centered_weights(config.order)?;
        let (dim, coord) = prep_dim(arr, dim, coord)?;
        let len = arr.len_of(&dim)?;
        let n = Self::half_reach(&config);
        let required = if config.cyclic { n } else { 2 * n + 1 };
        if len < required {
            return Err(DiffError::insufficient(&dim, len, required));
        }

        // One-sided engines of half the order over the edge patches
        let edge_config = config
            .clone()
            .with_order(config.order / 2)
            .with_fill_edge(FillEdge::None)
            .with_cyclic(false);
        let filling = !config.cyclic;
        let fwd_edge = if filling && config.fill_edge.left() {
            let arr = arr.slice_range(&dim, 0..2 * n)?;
            let coord = coord.slice_range(&dim, 0..2 * n)?;
            Some(FwdDeriv::new(&arr, Some(&dim), Some(&coord), edge_config.clone())?)
        } else {
            None
        };
        let bwd_edge = if filling && config.fill_edge.right() {
            let arr = arr.slice_range(&dim, len - 2 * n..len)?;
            let coord = coord.slice_range(&dim, len - 2 * n..len)?;
            Some(BwdDeriv::new(&arr, Some(&dim), Some(&coord), edge_config)?)
        } else {
            None
        };

        debug!(
            "centered derivative along '{}': order {}, spacing {}, fill {:?}, cyclic {}",
            dim, config.order, config.spacing, config.fill_edge, config.cyclic
        );
        Ok(Self {
            arr: arr.clone(),
            dim,
            coord,
            config,
            fwd_edge,
            bwd_edge,
        })
    }

    /// Samples the widest stencil reaches on either side
    fn half_reach(config: &DerivConfig) -> usize {
        config.order / 2 * config.spacing
    }

    fn deriv_no_fill(&self, arr: &Field, coord: &Field) -> Result<Field> {
        let dim = self.dim.as_str();
        let n = Self::half_reach(&self.config);
        let len = arr.len_of(dim)?;
        let weights = centered_weights(self.config.order)?;
        let mut terms = Vec::with_capacity(weights.len());
        for (k, weight) in (1..).zip(weights) {
            let spacing = k * self.config.spacing;
            let num = cen_diff(arr, dim, spacing, FillEdge::None)?;
            let den = cen_diff(coord, dim, spacing, FillEdge::None)?;
            let quotient = (&num / &den)?;
            let start = n - spacing;
            terms.push((quotient.slice_range(dim, start..start + len - 2 * n)?, weight));
        }
        weighted_sum(terms)
    }

    pub fn deriv(&self) -> Result<Field> {
        let n = Self::half_reach(&self.config);
        if self.config.cyclic {
            let circumference = self.config.circumference;
            let arr = wraparound(&self.arr, &self.dim, circumference, n, n)?;
            let coord = wraparound_coord(&self.coord, &self.dim, circumference, n, n)?;
            return self.deriv_no_fill(&arr, &coord);
        }

        let interior = self.deriv_no_fill(&self.arr, &self.coord)?;
        let mut pieces = Vec::with_capacity(3);
        if let Some(engine) = &self.fwd_edge {
            trace!("filling left edge of '{}'", self.dim);
            pieces.push(engine.deriv()?);
        }
        pieces.push(interior);
        if let Some(engine) = &self.bwd_edge {
            trace!("filling right edge of '{}'", self.dim);
            pieces.push(engine.deriv()?);
        }
        if pieces.len() == 1 {
            return Ok(pieces.remove(0));
        }
        let refs: Vec<&Field> = pieces.iter().collect();
        Field::concat(&refs, &self.dim)
    }
}

impl DerivEngine for CenDeriv {
    fn new(
        arr: &Field,
        dim: Option<&str>,
        coord: Option<&Field>,
        config: DerivConfig,
    ) -> Result<Self> {
        Self::new(arr, dim, coord, config)
    }

    fn deriv(&self) -> Result<Field> {
        self.deriv()
    }

    fn arr(&self) -> &Field {
        &self.arr
    }

    fn dim(&self) -> &str {
        &self.dim
    }

    fn coord(&self) -> &Field {
        &self.coord
    }

    fn config(&self) -> &DerivConfig {
        &self.config
    }

    fn wrap_extent(config: &DerivConfig) -> (usize, usize) {
        let n = Self::half_reach(config);
        (n, n)
    }
}
