use super::{BwdDeriv, CenDeriv, DerivEngine, FwdDeriv, LatDeriv, LatOper, LonDeriv};
use crate::config::{Constants, DerivConfig, FillEdge, SphereConfig, LAT_STR, LON_STR, PFULL_STR};
use crate::error::Result;
use crate::field::Field;
use crate::math::HybridCoord;
use log::debug;
use ndarray::Array1;
use std::marker::PhantomData;

/// Horizontal derivatives on the sphere
#[derive(Debug, Clone)]
pub struct SphereDeriv<E: DerivEngine> {
    arr: Field,
    config: SphereConfig,
    constants: Constants,
    _engine: PhantomData<E>,
}

pub type SphereFwdDeriv = SphereDeriv<FwdDeriv>;
pub type SphereBwdDeriv = SphereDeriv<BwdDeriv>;
pub type SphereCenDeriv = SphereDeriv<CenDeriv>;

impl<E: DerivEngine> SphereDeriv<E> {
    pub fn new(arr: &Field, config: SphereConfig) -> Result<Self> {
        config.validate()?;
        arr.axis(LON_STR)?;
        arr.axis(LAT_STR)?;
        Ok(Self {
            arr: arr.clone(),
            config,
            constants: Constants::default(),
            _engine: PhantomData,
        })
    }

    pub fn with_constants(mut self, constants: Constants) -> Self {
        self.constants = constants;
        self
    }

    pub fn arr(&self) -> &Field {
        &self.arr
    }

    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    /// Zonal derivative at the field's own latitudes
    pub fn d_dx(&self) -> Result<Field> {
        let lon = LonDeriv::<E>::with_config(&self.arr, None, None, self.config.lon_config())?
            .with_constants(self.constants.clone());
        lon.deriv(&self.arr.coord_field(LAT_STR)?)
    }

    pub fn d_dy(&self, oper: LatOper) -> Result<Field> {
        LatDeriv::<E>::with_config(&self.arr, None, None, self.config.lat_config())?
            .with_constants(self.constants.clone())
            .deriv(oper)
    }

    /// Horizontal divergence-form gradient `d_dx + d_dy(Divg)`
    pub fn horiz_grad(&self) -> Result<Field> {
        &self.d_dx()? + &self.d_dy(LatOper::Divg)?
    }
}

/// Horizontal derivatives of a field on hybrid levels, with the chain-rule
/// transform to constant-pressure surfaces:
///
/// `d/dx|p = d/dx|eta - (dp/dx|eta / dp/deta) * d/deta`
///
/// The meridional correction always uses the gradient form of `dp/dy`. The
/// vertical derivatives use a centered stencil with filled edges, so the
/// forward and backward variants differ only horizontally.
#[derive(Debug, Clone)]
pub struct SphereEtaDeriv<E: DerivEngine> {
    sphere: SphereDeriv<E>,
    hybrid: HybridCoord,
    pressure: Field,
}

pub type SphereEtaFwdDeriv = SphereEtaDeriv<FwdDeriv>;
pub type SphereEtaBwdDeriv = SphereEtaDeriv<BwdDeriv>;
pub type SphereEtaCenDeriv = SphereEtaDeriv<CenDeriv>;

impl<E: DerivEngine> SphereEtaDeriv<E> {
    pub fn new(
        arr: &Field,
        pk: &Array1<f64>,
        bk: &Array1<f64>,
        ps: &Field,
        config: SphereConfig,
    ) -> Result<Self> {
        let sphere = SphereDeriv::new(arr, config)?;
        let hybrid = HybridCoord::new(pk.clone(), bk.clone(), ps.clone())?;
        // Broadcast onto the field's grid so scalar surface pressure works too
        let pfull = hybrid.pfull(PFULL_STR, arr.coord(PFULL_STR)?)?;
        let pressure = (&arr.zeros_like() + &pfull)?;
        debug!(
            "constant-pressure derivatives on {} levels, order {}",
            hybrid.nlev(),
            sphere.config().order
        );
        Ok(Self {
            sphere,
            hybrid,
            pressure,
        })
    }

    pub fn arr(&self) -> &Field {
        self.sphere.arr()
    }

    pub fn config(&self) -> &SphereConfig {
        self.sphere.config()
    }

    pub fn hybrid(&self) -> &HybridCoord {
        &self.hybrid
    }

    /// Full-level pressure
    pub fn pressure(&self) -> &Field {
        &self.pressure
    }

    pub fn d_dx(&self) -> Result<Field> {
        self.sphere.d_dx()
    }

    pub fn d_dy(&self, oper: LatOper) -> Result<Field> {
        self.sphere.d_dy(oper)
    }

    pub fn horiz_grad(&self) -> Result<Field> {
        self.sphere.horiz_grad()
    }

    fn vertical_config(&self) -> DerivConfig {
        let order = self.config().order;
        DerivConfig::default()
            .with_order(order + order % 2)
            .with_spacing(self.config().spacing)
            .with_fill_edge(FillEdge::Both)
    }

    fn d_deta(&self, field: &Field) -> Result<Field> {
        CenDeriv::new(field, Some(PFULL_STR), None, self.vertical_config())?.deriv()
    }

    fn pressure_sphere(&self) -> Result<SphereDeriv<E>> {
        SphereDeriv::new(&self.pressure, self.config().clone())
    }

    /// `dfd - (dpd / dp/deta) * df/deta`, restricted to the points `dfd`
    /// covers
    fn const_p(&self, dfd: &Field, dpd: &Field) -> Result<Field> {
        let dp_deta = self.d_deta(&self.pressure)?.subset_like(dfd)?;
        let df_deta = self.d_deta(self.arr())?.subset_like(dfd)?;
        let slope = (dpd / &dp_deta)?;
        dfd - &(&slope * &df_deta)?
    }

    pub fn d_dx_const_p(&self) -> Result<Field> {
        let dfdx = self.d_dx()?;
        let dpdx = self.pressure_sphere()?.d_dx()?;
        self.const_p(&dfdx, &dpdx)
    }

    pub fn d_dy_const_p(&self, oper: LatOper) -> Result<Field> {
        let dfdy = self.d_dy(oper)?;
        let dpdy = self.pressure_sphere()?.d_dy(LatOper::Grad)?;
        self.const_p(&dfdy, &dpdy)
    }

    pub fn horiz_grad_const_p(&self) -> Result<Field> {
        &self.d_dx_const_p()? + &self.d_dy_const_p(LatOper::Divg)?
    }
}
