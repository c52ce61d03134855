//! Numerical self-checks run by the `check` command.

use crate::advec::{LonUpwindConstP, SphereEtaUpwind};
use crate::config::{DerivConfig, FillEdge, SphereConfig, LON_STR};
use crate::deriv::{
    BwdDeriv, CenDeriv, FwdDeriv, LatOper, LonDeriv, LonFwdDeriv, SphereBwdDeriv,
    SphereEtaBwdDeriv,
};
use crate::error::Result;
use crate::field::{wraparound_coord, Field};
use crate::grid::SyntheticGrid;
use log::debug;
use ndarray::Array;

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

type Check = fn(&SyntheticGrid, f64) -> Result<(bool, String)>;

const CHECKS: &[(&str, Check)] = &[
    ("linear field gives exact slope", check_linear),
    ("constant field gives zero", check_constant),
    ("cyclic ramp seam", check_ramp),
    ("cyclic equals explicit wraparound", check_wrap),
    ("uniform ps const-p equals plain", check_uniform_ps),
    ("unity flow equals backward const-p", check_unity_flow),
    ("zero flow gives zero advection", check_zero_flow),
];

/// Run every check; an error inside a check counts as a failure
pub fn run_checks(grid: &SyntheticGrid, tol: f64) -> Vec<CheckOutcome> {
    CHECKS
        .iter()
        .map(|(name, check)| {
            let (passed, detail) = match check(grid, tol) {
                Ok(outcome) => outcome,
                Err(e) => (false, e.to_string()),
            };
            debug!("check '{}': {} ({})", name, passed, detail);
            CheckOutcome {
                name,
                passed,
                detail,
            }
        })
        .collect()
}

fn max_abs_diff(a: &Field, b: &Field) -> Result<f64> {
    Ok((a - b)?.data().iter().fold(0.0, |m, v| m.max(v.abs())))
}

fn check_linear(grid: &SyntheticGrid, tol: f64) -> Result<(bool, String)> {
    let arr = grid.field(|lon, _, _| 3.0 * lon - 2.0)?;
    let slope = arr.full_like(3.0);
    let mut worst: f64 = 0.0;
    for order in [1, 2, 3] {
        for fill in [FillEdge::None, FillEdge::Both] {
            let config = DerivConfig::default().with_order(order).with_fill_edge(fill);
            let fwd = FwdDeriv::new(&arr, Some(LON_STR), None, config.clone())?.deriv()?;
            let bwd = BwdDeriv::new(&arr, Some(LON_STR), None, config.clone())?.deriv()?;
            worst = worst
                .max(max_abs_diff(&fwd, &slope.subset_like(&fwd)?)?)
                .max(max_abs_diff(&bwd, &slope.subset_like(&bwd)?)?);
        }
    }
    for order in [2, 4] {
        let config = DerivConfig::default().with_order(order);
        let cen = CenDeriv::new(&arr, Some(LON_STR), None, config)?.deriv()?;
        worst = worst.max(max_abs_diff(&cen, &slope)?);
    }
    Ok((worst < tol, format!("max error {:.3e}", worst)))
}

fn check_constant(grid: &SyntheticGrid, _tol: f64) -> Result<(bool, String)> {
    let ones = grid.field(|_, _, _| 1.0)?;
    let ps = grid.surface(|lon, _| 1e5 + 100.0 * lon.to_radians().sin())?;
    let (pk, bk) = (grid.pk(), grid.bk());
    let deriv = SphereEtaBwdDeriv::new(&ones, &pk, &bk, &ps, SphereConfig::default())?;
    let upwind = SphereEtaUpwind::new(&ones, &pk, &bk, &ps, SphereConfig::default())?;
    let flow = ones.full_like(2.0);
    let results = [
        deriv.d_dx()?,
        deriv.d_dy(LatOper::Grad)?,
        deriv.d_dx_const_p()?,
        upwind.advec_3d(&flow, &flow, &flow)?,
    ];
    let all_zero = results
        .iter()
        .all(|r| r.data().iter().all(|v| *v == 0.0));
    Ok((all_zero, String::new()))
}

fn check_ramp(_grid: &SyntheticGrid, tol: f64) -> Result<(bool, String)> {
    let lon = Array::range(0.0, 360.0, 45.0);
    let arr = Field::from_1d(Array::range(0.0, 8.0, 1.0), LON_STR, lon)?;
    let config = LonFwdDeriv::default_config().with_order(1);
    let raw = LonFwdDeriv::with_config(&arr, None, None, config)?.raw()?;
    let values: Vec<f64> = raw.data().iter().copied().collect();
    let expected: Vec<f64> = (0..8)
        .map(|i| if i == 7 { -7.0 / 45.0 } else { 1.0 / 45.0 })
        .collect();
    let passed = values.len() == 8
        && values
            .iter()
            .zip(&expected)
            .all(|(v, e)| (v - e).abs() < tol);
    Ok((passed, format!("{:?}", values)))
}

fn check_wrap(grid: &SyntheticGrid, _tol: f64) -> Result<(bool, String)> {
    let arr = grid.field(|lon, lat, k| (lon.to_radians() * 2.0).sin() * lat + k as f64)?;
    let mut passed = true;
    for order in [1, 2] {
        let config = LonDeriv::<FwdDeriv>::default_config().with_order(order);
        let cyclic = LonDeriv::<FwdDeriv>::with_config(&arr, None, None, config.clone())?;
        let wrapped = cyclic.wrap(&arr)?;
        let explicit = FwdDeriv::new(
            &wrapped,
            Some(LON_STR),
            Some(&wraparound_coord(
                &arr.coord_field(LON_STR)?,
                LON_STR,
                config.circumference,
                order,
                0,
            )?),
            config.with_cyclic(false).with_fill_edge(FillEdge::None),
        )?
        .deriv()?;
        passed &= cyclic.raw()?.identical(&explicit);
    }
    Ok((passed, String::new()))
}

fn check_uniform_ps(grid: &SyntheticGrid, _tol: f64) -> Result<(bool, String)> {
    let arr = grid.field(|lon, lat, k| {
        lon.to_radians().cos() * lat.to_radians().sin() * (k + 1) as f64
    })?;
    let ps = grid.surface(|_, _| 1e5)?;
    let config = SphereConfig::default().with_order(1);
    let eta = SphereEtaBwdDeriv::new(&arr, &grid.pk(), &grid.bk(), &ps, config.clone())?;
    let plain = SphereBwdDeriv::new(&arr, config)?;
    let passed = eta.d_dx_const_p()?.identical(&plain.d_dx()?)
        && eta.horiz_grad_const_p()?.identical(&plain.horiz_grad()?);
    Ok((passed, String::new()))
}

fn check_unity_flow(grid: &SyntheticGrid, _tol: f64) -> Result<(bool, String)> {
    let arr = grid.field(|lon, lat, k| (lon + lat).to_radians().sin() + k as f64)?;
    let ps = grid.surface(|lon, lat| 1e5 + 300.0 * (lon - lat).to_radians().cos())?;
    let (pk, bk) = (grid.pk(), grid.bk());
    let ones = arr.ones_like();
    let mut passed = true;
    for (cyclic, fill) in [(true, false), (false, true)] {
        let config = SphereConfig::default()
            .with_order(1)
            .with_cyclic_lon(cyclic)
            .with_fill_edge_lon(fill);
        let advec = LonUpwindConstP::new(&ones, &arr, &pk, &bk, &ps, config.clone())?.advec()?;
        let bwd = SphereEtaBwdDeriv::new(&arr, &pk, &bk, &ps, config)?.d_dx_const_p()?;
        passed &= advec.identical(&bwd);
    }
    Ok((passed, String::new()))
}

fn check_zero_flow(grid: &SyntheticGrid, _tol: f64) -> Result<(bool, String)> {
    let arr = grid.field(|lon, lat, k| lon * lat + k as f64)?;
    let ps = grid.surface(|_, lat| 1e5 + 10.0 * lat)?;
    let zeros = arr.zeros_like();
    let upwind = SphereEtaUpwind::new(&arr, &grid.pk(), &grid.bk(), &ps, SphereConfig::default())?;
    let advec = upwind.advec_3d(&zeros, &zeros, &zeros)?;
    Ok((advec.data().iter().all(|v| *v == 0.0), String::new()))
}
