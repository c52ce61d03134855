use super::{BwdDeriv, CenDeriv, DerivEngine, FwdDeriv};
use crate::config::{DerivConfig, PFULL_STR};
use crate::error::Result;
use crate::field::Field;
use crate::math::HybridCoord;
use ndarray::Array1;

/// Vertical derivative on hybrid sigma-pressure levels.
///
/// Differences are taken along the full-level dimension and divided by its
/// coordinate; the level pressures reconstructed from `pk`, `bk` and `ps`
/// are available through [`EtaDeriv::pressure`].
#[derive(Debug, Clone)]
pub struct EtaDeriv<E: DerivEngine> {
    engine: E,
    hybrid: HybridCoord,
}

pub type EtaFwdDeriv = EtaDeriv<FwdDeriv>;
pub type EtaBwdDeriv = EtaDeriv<BwdDeriv>;
pub type EtaCenDeriv = EtaDeriv<CenDeriv>;

impl<E: DerivEngine> EtaDeriv<E> {
    pub fn new(
        arr: &Field,
        pk: &Array1<f64>,
        bk: &Array1<f64>,
        ps: &Field,
        config: DerivConfig,
    ) -> Result<Self> {
        Self::with_dim(arr, pk, bk, ps, None, None, config)
    }

    pub fn with_dim(
        arr: &Field,
        pk: &Array1<f64>,
        bk: &Array1<f64>,
        ps: &Field,
        dim: Option<&str>,
        coord: Option<&Field>,
        config: DerivConfig,
    ) -> Result<Self> {
        let engine = E::new(arr, Some(dim.unwrap_or(PFULL_STR)), coord, config)?;
        let hybrid = HybridCoord::new(pk.clone(), bk.clone(), ps.clone())?;
        hybrid.check_levels(arr.len_of(engine.dim())?)?;
        Ok(Self { engine, hybrid })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn arr(&self) -> &Field {
        self.engine.arr()
    }

    pub fn dim(&self) -> &str {
        self.engine.dim()
    }

    pub fn hybrid(&self) -> &HybridCoord {
        &self.hybrid
    }

    pub fn deriv(&self) -> Result<Field> {
        self.engine.deriv()
    }

    /// Pressure at the full levels of the field
    pub fn pressure(&self) -> Result<Field> {
        self.hybrid.pfull(self.dim(), self.arr().coord(self.dim())?)
    }

    /// Vertical derivative of the full-level pressure
    pub fn dp_deta(&self) -> Result<Field> {
        let pressure = self.pressure()?;
        E::new(
            &pressure,
            Some(self.dim()),
            Some(self.engine.coord()),
            self.engine.config().clone(),
        )?
        .deriv()
    }
}
