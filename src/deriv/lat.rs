use super::{BwdDeriv, CenDeriv, DerivEngine, FwdDeriv};
use crate::config::{Constants, DerivConfig, LAT_STR};
use crate::error::{DiffError, Result};
use crate::field::Field;
use log::warn;
use std::str::FromStr;

/// Form of the meridional derivative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatOper {
    /// `d/dlat[rad] / R`
    Grad,
    /// `d(cos(lat) f)/dlat[rad] / (R cos(lat))`, the meridional part of a
    /// divergence
    Divg,
}

impl FromStr for LatOper {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grad" => Ok(LatOper::Grad),
            "divg" => Ok(LatOper::Divg),
            other => Err(DiffError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// Meridional derivative on the sphere. Latitude is never cyclic.
#[derive(Debug, Clone)]
pub struct LatDeriv<E: DerivEngine> {
    engine: E,
    constants: Constants,
}

pub type LatFwdDeriv = LatDeriv<FwdDeriv>;
pub type LatBwdDeriv = LatDeriv<BwdDeriv>;
pub type LatCenDeriv = LatDeriv<CenDeriv>;

impl<E: DerivEngine> LatDeriv<E> {
    pub fn new(arr: &Field) -> Result<Self> {
        Self::with_config(arr, None, None, DerivConfig::default())
    }

    pub fn with_config(
        arr: &Field,
        dim: Option<&str>,
        coord: Option<&Field>,
        config: DerivConfig,
    ) -> Result<Self> {
        let config = if config.cyclic {
            warn!("latitude is not periodic; ignoring cyclic = true");
            config.with_cyclic(false)
        } else {
            config
        };
        let engine = E::new(arr, Some(dim.unwrap_or(LAT_STR)), coord, config)?;
        Ok(Self {
            engine,
            constants: Constants::default(),
        })
    }

    pub fn with_constants(mut self, constants: Constants) -> Self {
        self.constants = constants;
        self
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

    /// cos(lat) along this derivative's dimension, for latitudes in degrees
    fn cos_lat(&self, field: &Field) -> Result<Field> {
        let deg_to_rad = self.constants.deg_to_rad;
        Ok(field.coord_field(self.dim())?.mapv(|l| (l * deg_to_rad).cos()))
    }

    pub fn deriv(&self, oper: LatOper) -> Result<Field> {
        let deg_to_rad = self.constants.deg_to_rad;
        let radius = self.constants.earth_radius;
        match oper {
            LatOper::Grad => Ok(self.engine.deriv()? / (deg_to_rad * radius)),
            LatOper::Divg => {
                let arr = self.engine.arr();
                let weighted = (arr * &self.cos_lat(arr)?)?;
                let engine = E::new(
                    &weighted,
                    Some(self.dim()),
                    Some(self.engine.coord()),
                    self.engine.config().clone(),
                )?;
                let dfdlat = engine.deriv()? / deg_to_rad;
                let metric = self.cos_lat(&dfdlat)? * radius;
                &dfdlat / &metric
            }
        }
    }
}
