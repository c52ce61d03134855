//! Upwind advection along longitude, latitude and hybrid levels, and its
//! composition on the sphere.

use super::{Upwind, UpwindDerivs};
use crate::config::{DerivConfig, FillEdge, SphereConfig, LAT_STR, LON_STR};
use crate::deriv::{
    BwdDeriv, DerivEngine, EtaDeriv, FwdDeriv, LatDeriv, LatOper, LonDeriv, SphereEtaDeriv,
};
use crate::error::Result;
use crate::field::Field;
use ndarray::Array1;

/// Backward and forward zonal derivatives
#[derive(Debug, Clone)]
pub struct LonDerivs {
    bwd: LonDeriv<BwdDeriv>,
    fwd: LonDeriv<FwdDeriv>,
}

impl UpwindDerivs for LonDerivs {
    type Args = Field;

    fn bwd(&self, lat: &Field) -> Result<Field> {
        self.bwd.deriv(lat)
    }

    fn fwd(&self, lat: &Field) -> Result<Field> {
        self.fwd.deriv(lat)
    }

    fn dim(&self) -> &str {
        self.bwd.dim()
    }

    fn n_edge(&self) -> usize {
        self.bwd.engine().config().reach()
    }

    fn fill_edge(&self) -> FillEdge {
        self.bwd.engine().fill_edge()
    }

    fn cyclic(&self) -> bool {
        self.bwd.engine().cyclic()
    }
}

pub type LonUpwind = Upwind<LonDerivs>;

impl Upwind<LonDerivs> {
    /// Zonal upwind advection, cyclic unless `config` says otherwise
    pub fn new(flow: &Field, arr: &Field, config: DerivConfig) -> Result<Self> {
        let derivs = LonDerivs {
            bwd: LonDeriv::with_config(arr, None, None, config.clone())?,
            fwd: LonDeriv::with_config(arr, None, None, config)?,
        };
        Ok(Self::from_derivs(flow, derivs))
    }

    pub fn default_config() -> DerivConfig {
        LonDeriv::<BwdDeriv>::default_config()
    }

    pub fn advec(&self, lat: &Field) -> Result<Field> {
        self.advec_with(lat)
    }
}

/// Backward and forward meridional derivatives
#[derive(Debug, Clone)]
pub struct LatDerivs {
    bwd: LatDeriv<BwdDeriv>,
    fwd: LatDeriv<FwdDeriv>,
}

impl UpwindDerivs for LatDerivs {
    type Args = LatOper;

    fn bwd(&self, oper: &LatOper) -> Result<Field> {
        self.bwd.deriv(*oper)
    }

    fn fwd(&self, oper: &LatOper) -> Result<Field> {
        self.fwd.deriv(*oper)
    }

    fn dim(&self) -> &str {
        self.bwd.dim()
    }

    fn n_edge(&self) -> usize {
        self.bwd.engine().config().reach()
    }

    fn fill_edge(&self) -> FillEdge {
        self.bwd.engine().fill_edge()
    }

    fn cyclic(&self) -> bool {
        false
    }
}

pub type LatUpwind = Upwind<LatDerivs>;

impl Upwind<LatDerivs> {
    pub fn new(flow: &Field, arr: &Field, config: DerivConfig) -> Result<Self> {
        let derivs = LatDerivs {
            bwd: LatDeriv::with_config(arr, None, None, config.clone())?,
            fwd: LatDeriv::with_config(arr, None, None, config)?,
        };
        Ok(Self::from_derivs(flow, derivs))
    }

    pub fn advec(&self, oper: LatOper) -> Result<Field> {
        self.advec_with(&oper)
    }
}

/// Backward and forward derivatives along hybrid levels
#[derive(Debug, Clone)]
pub struct EtaDerivs {
    bwd: EtaDeriv<BwdDeriv>,
    fwd: EtaDeriv<FwdDeriv>,
}

impl UpwindDerivs for EtaDerivs {
    type Args = ();

    fn bwd(&self, _: &()) -> Result<Field> {
        self.bwd.deriv()
    }

    fn fwd(&self, _: &()) -> Result<Field> {
        self.fwd.deriv()
    }

    fn dim(&self) -> &str {
        self.bwd.dim()
    }

    fn n_edge(&self) -> usize {
        self.bwd.engine().config().reach()
    }

    fn fill_edge(&self) -> FillEdge {
        self.bwd.engine().fill_edge()
    }

    fn cyclic(&self) -> bool {
        self.bwd.engine().cyclic()
    }
}

pub type EtaUpwind = Upwind<EtaDerivs>;

impl Upwind<EtaDerivs> {
    pub fn new(
        flow: &Field,
        arr: &Field,
        pk: &Array1<f64>,
        bk: &Array1<f64>,
        ps: &Field,
        config: DerivConfig,
    ) -> Result<Self> {
        let derivs = EtaDerivs {
            bwd: EtaDeriv::new(arr, pk, bk, ps, config.clone())?,
            fwd: EtaDeriv::new(arr, pk, bk, ps, config)?,
        };
        Ok(Self::from_derivs(flow, derivs))
    }

    pub fn advec(&self) -> Result<Field> {
        self.advec_with(&())
    }
}

/// Backward and forward constant-pressure derivatives along one horizontal
/// dimension
#[derive(Debug, Clone)]
pub struct ConstPDerivs {
    bwd: SphereEtaDeriv<BwdDeriv>,
    fwd: SphereEtaDeriv<FwdDeriv>,
    dim: &'static str,
}

impl ConstPDerivs {
    fn new(
        arr: &Field,
        pk: &Array1<f64>,
        bk: &Array1<f64>,
        ps: &Field,
        config: SphereConfig,
        dim: &'static str,
    ) -> Result<Self> {
        Ok(Self {
            bwd: SphereEtaDeriv::new(arr, pk, bk, ps, config.clone())?,
            fwd: SphereEtaDeriv::new(arr, pk, bk, ps, config)?,
            dim,
        })
    }

    fn along<E: DerivEngine>(&self, deriv: &SphereEtaDeriv<E>) -> Result<Field> {
        if self.dim == LON_STR {
            deriv.d_dx_const_p()
        } else {
            deriv.d_dy_const_p(LatOper::Grad)
        }
    }
}

impl UpwindDerivs for ConstPDerivs {
    type Args = ();

    fn bwd(&self, _: &()) -> Result<Field> {
        self.along(&self.bwd)
    }

    fn fwd(&self, _: &()) -> Result<Field> {
        self.along(&self.fwd)
    }

    fn dim(&self) -> &str {
        self.dim
    }

    fn n_edge(&self) -> usize {
        let config = self.bwd.config();
        config.order * config.spacing
    }

    fn fill_edge(&self) -> FillEdge {
        let config = self.bwd.config();
        match self.dim {
            LON_STR if config.cyclic_lon => FillEdge::None,
            LON_STR => config.fill_edge_lon,
            _ => config.fill_edge_lat,
        }
    }

    fn cyclic(&self) -> bool {
        self.dim == LON_STR && self.bwd.config().cyclic_lon
    }
}

/// Zonal upwind advection on constant-pressure surfaces
pub struct LonUpwindConstP;

/// Meridional upwind advection on constant-pressure surfaces
pub struct LatUpwindConstP;

impl LonUpwindConstP {
    pub fn new(
        flow: &Field,
        arr: &Field,
        pk: &Array1<f64>,
        bk: &Array1<f64>,
        ps: &Field,
        config: SphereConfig,
    ) -> Result<Upwind<ConstPDerivs>> {
        let derivs = ConstPDerivs::new(arr, pk, bk, ps, config, LON_STR)?;
        Ok(Upwind::from_derivs(flow, derivs))
    }
}

impl LatUpwindConstP {
    pub fn new(
        flow: &Field,
        arr: &Field,
        pk: &Array1<f64>,
        bk: &Array1<f64>,
        ps: &Field,
        config: SphereConfig,
    ) -> Result<Upwind<ConstPDerivs>> {
        let derivs = ConstPDerivs::new(arr, pk, bk, ps, config, LAT_STR)?;
        Ok(Upwind::from_derivs(flow, derivs))
    }
}

impl Upwind<ConstPDerivs> {
    pub fn advec(&self) -> Result<Field> {
        self.advec_with(&())
    }
}

/// Horizontal upwind advection on the sphere
#[derive(Debug, Clone)]
pub struct SphereUpwind {
    arr: Field,
    config: SphereConfig,
}

impl SphereUpwind {
    pub fn new(arr: &Field, config: SphereConfig) -> Result<Self> {
        config.validate()?;
        arr.axis(LON_STR)?;
        arr.axis(LAT_STR)?;
        Ok(Self {
            arr: arr.clone(),
            config,
        })
    }

    pub fn arr(&self) -> &Field {
        &self.arr
    }

    pub fn advec_x(&self, u: &Field) -> Result<Field> {
        let lat = self.arr.coord_field(LAT_STR)?;
        LonUpwind::new(u, &self.arr, self.config.lon_config())?.advec(&lat)
    }

    pub fn advec_y(&self, v: &Field) -> Result<Field> {
        LatUpwind::new(v, &self.arr, self.config.lat_config())?.advec(LatOper::Grad)
    }

    pub fn advec(&self, u: &Field, v: &Field) -> Result<Field> {
        let (x, y) = self.advec_x(u)?.overlap(&self.advec_y(v)?)?;
        &x + &y
    }
}

/// Three-dimensional upwind advection of a field on hybrid levels, with
/// the horizontal terms taken on constant-pressure surfaces
#[derive(Debug, Clone)]
pub struct SphereEtaUpwind {
    arr: Field,
    pk: Array1<f64>,
    bk: Array1<f64>,
    ps: Field,
    config: SphereConfig,
}

impl SphereEtaUpwind {
    pub fn new(
        arr: &Field,
        pk: &Array1<f64>,
        bk: &Array1<f64>,
        ps: &Field,
        config: SphereConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            arr: arr.clone(),
            pk: pk.clone(),
            bk: bk.clone(),
            ps: ps.clone(),
            config,
        })
    }

    pub fn arr(&self) -> &Field {
        &self.arr
    }

    pub fn advec_x_const_p(&self, u: &Field) -> Result<Field> {
        LonUpwindConstP::new(u, &self.arr, &self.pk, &self.bk, &self.ps, self.config.clone())?
            .advec()
    }

    pub fn advec_y_const_p(&self, v: &Field) -> Result<Field> {
        LatUpwindConstP::new(v, &self.arr, &self.pk, &self.bk, &self.ps, self.config.clone())?
            .advec()
    }

    pub fn advec_horiz_const_p(&self, u: &Field, v: &Field) -> Result<Field> {
        let (x, y) = self.advec_x_const_p(u)?.overlap(&self.advec_y_const_p(v)?)?;
        &x + &y
    }

    /// Vertical advection by the pressure velocity
    pub fn advec_z(&self, omega: &Field) -> Result<Field> {
        EtaUpwind::new(omega, &self.arr, &self.pk, &self.bk, &self.ps, self.config.vert_config())?
            .advec()
    }

    pub fn advec_p(&self, omega: &Field) -> Result<Field> {
        self.advec_z(omega)
    }

    /// Sum of the horizontal and vertical terms over the points where both
    /// are defined
    pub fn advec_3d(&self, u: &Field, v: &Field, omega: &Field) -> Result<Field> {
        let (horiz, vert) = self.advec_horiz_const_p(u, v)?.overlap(&self.advec_p(omega)?)?;
        &horiz + &vert
    }
}
