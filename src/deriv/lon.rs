use super::{BwdDeriv, CenDeriv, DerivEngine, FwdDeriv};
use crate::config::{Constants, DerivConfig, LON_STR};
use crate::error::Result;
use crate::field::{wraparound, Field};

/// Zonal derivative on the sphere.
///
/// Longitude is cyclic by default, with the wrapped samples shifted by a
/// full 360 degrees.
#[derive(Debug, Clone)]
pub struct LonDeriv<E: DerivEngine> {
    engine: E,
    constants: Constants,
}

pub type LonFwdDeriv = LonDeriv<FwdDeriv>;
pub type LonBwdDeriv = LonDeriv<BwdDeriv>;
pub type LonCenDeriv = LonDeriv<CenDeriv>;

impl<E: DerivEngine> LonDeriv<E> {
    pub fn default_config() -> DerivConfig {
        DerivConfig::default()
            .with_cyclic(true)
            .with_circumference(Constants::default().lon_circumference)
    }

    pub fn new(arr: &Field) -> Result<Self> {
        Self::with_config(arr, None, None, Self::default_config())
    }

    pub fn with_config(
        arr: &Field,
        dim: Option<&str>,
        coord: Option<&Field>,
        config: DerivConfig,
    ) -> Result<Self> {
        let engine = E::new(arr, Some(dim.unwrap_or(LON_STR)), coord, config)?;
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

    /// Derivative with respect to longitude in degrees
    pub fn raw(&self) -> Result<Field> {
        self.engine.deriv()
    }

    /// Zonal derivative in physical units: `d/dlon[rad] / (R cos(lat))`.
    ///
    /// `lat` is either a scalar latitude or a field of latitudes broadcast
    /// by dimension name, in degrees.
    pub fn deriv(&self, lat: &Field) -> Result<Field> {
        let deg_to_rad = self.constants.deg_to_rad;
        let radius = self.constants.earth_radius;
        let per_radian = self.raw()? / deg_to_rad;
        let metric = lat.mapv(|l| radius * (l * deg_to_rad).cos());
        &per_radian / &metric
    }

    /// The periodic extension applied before differencing; the field itself
    /// when the engine is not cyclic
    pub fn wrap(&self, field: &Field) -> Result<Field> {
        let config = self.engine.config();
        if !config.cyclic {
            return Ok(field.clone());
        }
        let (left_to_right, right_to_left) = E::wrap_extent(config);
        wraparound(
            field,
            self.dim(),
            config.circumference,
            left_to_right,
            right_to_left,
        )
    }
}
