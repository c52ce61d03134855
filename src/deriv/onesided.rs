use super::{prep_dim, weighted_sum, DerivEngine};
use crate::config::{DerivConfig, FillEdge};
use crate::diff::{Backward, Forward, OneSided};
use crate::error::{DiffError, Result};
use crate::field::{wraparound_coord, Field};
use crate::math::one_sided_weights;
use log::{debug, trace};
use std::marker::PhantomData;

/// One-sided derivative of arbitrary order.
///
/// The single-spacing quotients `diff(arr, k*s) / diff(coord, k*s)` for
/// `k = 1..=order` are trimmed to their common support and combined with
/// the weights of [`one_sided_weights`]. The trailing (forward) or leading
/// (backward) `order * spacing` samples lack support; they are either
/// dropped, filled with the reverse-direction stencil, or supplied by
/// wrapping the field around when the dimension is cyclic.
#[derive(Debug, Clone)]
pub struct OneSidedDeriv<D: OneSided> {
    arr: Field,
    dim: String,
    coord: Field,
    config: DerivConfig,
    _direction: PhantomData<D>,
}

pub type FwdDeriv = OneSidedDeriv<Forward>;
pub type BwdDeriv = OneSidedDeriv<Backward>;

impl<D: OneSided> OneSidedDeriv<D> {
    pub fn new(
        arr: &Field,
        dim: Option<&str>,
        coord: Option<&Field>,
        config: DerivConfig,
    ) -> Result<Self> {
        config.validate()?;
        let (dim, coord) = prep_dim(arr, dim, coord)?;
        let len = arr.len_of(&dim)?;
        let n = config.reach();
        let required = if config.cyclic {
            n.max(1)
        } else if config.fill_edge.any() {
            (2 * n).max(n + 1)
        } else {
            n + 1
        };
        if len < required {
            return Err(DiffError::insufficient(&dim, len, required));
        }
        debug!(
            "{} derivative along '{}': order {}, spacing {}, fill {:?}, cyclic {}",
            D::NAME,
            dim,
            config.order,
            config.spacing,
            config.fill_edge,
            config.cyclic
        );
        Ok(Self {
            arr: arr.clone(),
            dim,
            coord,
            config,
            _direction: PhantomData,
        })
    }

    /// Derivative without any edge handling; the result is shorter than
    /// `arr` by `order * spacing`
    fn deriv_no_fill(&self, arr: &Field, coord: &Field) -> Result<Field> {
        let dim = self.dim.as_str();
        let target = arr.len_of(dim)? - self.config.reach();
        let mut terms = Vec::with_capacity(self.config.order);
        for (k, weight) in (1..=self.config.order).zip(one_sided_weights(self.config.order)) {
            let spacing = k * self.config.spacing;
            let quotient = (&D::diff(arr, dim, spacing)? / &D::diff(coord, dim, spacing)?)?;
            terms.push((D::trim_to(&quotient, dim, target)?, weight));
        }
        weighted_sum(terms)
    }

    /// The `2 * order * spacing` samples at the unsupported edge
    pub fn slice_edge(&self) -> Result<Field> {
        D::edge_slice(&self.arr, &self.dim, 2 * self.config.reach())
    }

    /// Derivative at the unsupported edge from the reverse-direction stencil
    pub fn edge_deriv_rev(&self) -> Result<Field> {
        let n = 2 * self.config.reach();
        let arr = D::edge_slice(&self.arr, &self.dim, n)?;
        let coord = D::edge_slice(&self.coord, &self.dim, n)?;
        let config = self
            .config
            .clone()
            .with_fill_edge(FillEdge::None)
            .with_cyclic(false);
        trace!("filling {} edge of '{}' with {} samples", D::NAME, self.dim, n);
        OneSidedDeriv::<D::Reverse>::new(&arr, Some(&self.dim), Some(&coord), config)?.deriv()
    }

    /// Join an interior derivative with its edge patch
    pub fn concat(&self, interior: &Field, edge: &Field) -> Result<Field> {
        D::concat(interior, edge, &self.dim)
    }

    pub fn deriv(&self) -> Result<Field> {
        if self.config.cyclic {
            let (left_to_right, right_to_left) = Self::wrap_extent(&self.config);
            let circumference = self.config.circumference;
            let arr = D::wrap(&self.arr, &self.dim, circumference, self.config.reach())?;
            let coord = wraparound_coord(
                &self.coord,
                &self.dim,
                circumference,
                left_to_right,
                right_to_left,
            )?;
            return self.deriv_no_fill(&arr, &coord);
        }
        let interior = self.deriv_no_fill(&self.arr, &self.coord)?;
        if !self.config.fill_edge.any() {
            return Ok(interior);
        }
        self.concat(&interior, &self.edge_deriv_rev()?)
    }
}

impl<D: OneSided> DerivEngine for OneSidedDeriv<D> {
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
        D::wrap_extent(config.reach())
    }
}
