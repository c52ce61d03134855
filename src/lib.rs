pub mod advec;
pub mod benchmark;
pub mod check;
pub mod config;
pub mod deriv;
pub mod diff;
pub mod error;
pub mod field;
pub mod grid;
pub mod logging;
pub mod math;
pub mod parallel;

pub use advec::{
    EtaUpwind, LatUpwind, LatUpwindConstP, LonUpwind, LonUpwindConstP, SphereEtaUpwind,
    SphereUpwind, Upwind, UpwindDerivs,
};
pub use config::{Constants, DerivConfig, FillEdge, SphereConfig};
pub use deriv::*;
pub use error::{DiffError, Result};
pub use field::{wraparound, Field};
