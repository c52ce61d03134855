mod common;

use common::*;
use indiff::advec::swap_edges;
use indiff::config::{DerivConfig, FillEdge, SphereConfig, LAT_STR, LON_STR, PFULL_STR};
use indiff::{
    EtaUpwind, Field, LatBwdDeriv, LatFwdDeriv, LatOper, LatUpwind, LatUpwindConstP,
    LonBwdDeriv, LonFwdDeriv, LonUpwind, LonUpwindConstP, SphereEtaBwdDeriv, SphereEtaUpwind,
    SphereUpwind, UpwindDerivs,
};
use ndarray::s;

/// Flow of mixed sign on the same grid as [`random_3d`]
fn random_flow() -> Field {
    let mut rng = rng();
    random_3d(&mut rng).mapv(|v| 20.0 * v - 10.0)
}

#[test]
fn test_unity_flow_equals_backward_const_p() {
    let mut rng = rng();
    let arr = random_3d(&mut rng);
    let ps = random_ps(&mut rng);
    let ones = arr.ones_like();
    for (cyclic, fill) in [(true, false), (false, true)] {
        let config = SphereConfig::default()
            .with_order(1)
            .with_cyclic_lon(cyclic)
            .with_fill_edge_lon(fill)
            .with_fill_edge_lat(fill);
        let bwd = SphereEtaBwdDeriv::new(&arr, &pk(), &bk(), &ps, config.clone()).unwrap();

        let advec = LonUpwindConstP::new(&ones, &arr, &pk(), &bk(), &ps, config.clone())
            .unwrap()
            .advec()
            .unwrap();
        assert!(advec.identical(&bwd.d_dx_const_p().unwrap()));

        if fill {
            let advec = LatUpwindConstP::new(&ones, &arr, &pk(), &bk(), &ps, config)
                .unwrap()
                .advec()
                .unwrap();
            assert!(advec.identical(&bwd.d_dy_const_p(LatOper::Grad).unwrap()));
        }
    }
}

#[test]
fn test_negative_unity_flow_equals_forward() {
    let arr = random_3d(&mut rng());
    let lat = arr.coord_field(LAT_STR).unwrap();
    let config = LonUpwind::default_config().with_order(2);
    let advec = LonUpwind::new(&arr.full_like(-1.0), &arr, config.clone())
        .unwrap()
        .advec(&lat)
        .unwrap();
    let fwd = LonFwdDeriv::with_config(&arr, None, None, config)
        .unwrap()
        .deriv(&lat)
        .unwrap();
    assert!(advec.identical(&-&fwd));
}

#[test]
fn test_zero_flow_gives_zero() {
    let mut rng = rng();
    let arr = random_3d(&mut rng);
    let ps = random_ps(&mut rng);
    let zeros = arr.zeros_like();
    for order in [1, 2] {
        let config = SphereConfig::default().with_order(order);
        let upwind = SphereEtaUpwind::new(&arr, &pk(), &bk(), &ps, config.clone()).unwrap();
        let advec = upwind.advec_3d(&zeros, &zeros, &zeros).unwrap();
        assert!(advec.coords_identical(&arr));
        assert_all_zeros(&advec);

        let upwind = SphereUpwind::new(&arr, config).unwrap();
        assert_all_zeros(&upwind.advec(&zeros, &zeros).unwrap());
    }
}

#[test]
fn test_linear_field_advected_at_flow_speed() {
    let mut rng = rng();
    let ps = random_ps(&mut rng);
    let arr = linear_3d(PFULL_STR, 2.0);
    let flow = random_flow();
    for order in [1, 2, 3] {
        let config = DerivConfig::default().with_order(order);
        let advec = EtaUpwind::new(&flow, &arr, &pk(), &bk(), &ps, config)
            .unwrap()
            .advec()
            .unwrap();
        assert!(advec.all_close(&(&flow * 2.0), 1e-8), "order {}", order);
    }
}

#[test]
fn test_upwind_picks_stencil_by_flow_sign() {
    let arr = random_3d(&mut rng());
    let flow = random_flow();
    let config = DerivConfig::default().with_order(1);
    let advec = LatUpwind::new(&flow, &arr, config.clone())
        .unwrap()
        .advec(LatOper::Grad)
        .unwrap();
    let bwd = LatBwdDeriv::with_config(&arr, None, None, config.clone())
        .unwrap()
        .deriv(LatOper::Grad)
        .unwrap();
    let fwd = LatFwdDeriv::with_config(&arr, None, None, config)
        .unwrap()
        .deriv(LatOper::Grad)
        .unwrap();
    let (bwd, fwd) = swap_edges(&bwd, &fwd, LAT_STR, 1).unwrap();
    for (idx, v) in advec.data().indexed_iter() {
        let u = flow.data()[&idx];
        let d = if u >= 0.0 { bwd.data()[&idx] } else { fwd.data()[&idx] };
        assert!((v - u * d).abs() <= 1e-12 * (u * d).abs(), "{:?}", idx);
    }

    // Edges are differenced away from the boundary whatever the flow sign
    let first = bwd.isel(LAT_STR, 0, Some(1)).unwrap();
    let fwd_first = fwd.isel(LAT_STR, 0, Some(1)).unwrap();
    assert!(first.identical(&fwd_first));
}

#[test]
fn test_truncated_without_fill() {
    let arr = random_3d(&mut rng());
    let lat = arr.coord_field(LAT_STR).unwrap();
    let flow = random_flow();
    let config = LonUpwind::default_config()
        .with_cyclic(false)
        .with_fill_edge(FillEdge::None);
    let upwind = LonUpwind::new(&flow, &arr, config.clone()).unwrap();
    assert_eq!(upwind.derivs().n_edge(), 2);
    assert!(!upwind.derivs().cyclic());
    assert_eq!(upwind.derivs().dim(), LON_STR);
    let advec = upwind.advec(&lat).unwrap();
    assert_eq!(advec.len_of(LON_STR).unwrap(), 20);
    assert_eq!(advec.coord(LON_STR).unwrap()[0], 30.0);
    assert_eq!(advec.coord(LON_STR).unwrap()[19], 315.0);

    // With positive flow the result is the backward derivative on those points
    let ones = arr.ones_like();
    let advec = LonUpwind::new(&ones, &arr, config.clone())
        .unwrap()
        .advec(&lat)
        .unwrap();
    let bwd = LonBwdDeriv::with_config(&arr, None, None, config)
        .unwrap()
        .deriv(&lat)
        .unwrap();
    assert!(advec.identical(&bwd.isel(LON_STR, 0, Some(-2)).unwrap()));
}

#[test]
fn test_sphere_upwind_composition() {
    let mut rng = rng();
    let arr = random_3d(&mut rng);
    let ps = random_ps(&mut rng);
    let u = random_flow();
    let v = u.mapv(|x| -0.5 * x);
    let omega = u.mapv(|x| 1e-3 * x);
    let config = SphereConfig::default();

    let sphere = SphereUpwind::new(&arr, config.clone()).unwrap();
    let sum = (&sphere.advec_x(&u).unwrap() + &sphere.advec_y(&v).unwrap()).unwrap();
    assert!(sphere.advec(&u, &v).unwrap().identical(&sum));

    let eta = SphereEtaUpwind::new(&arr, &pk(), &bk(), &ps, config).unwrap();
    let horiz = eta.advec_horiz_const_p(&u, &v).unwrap();
    let x = eta.advec_x_const_p(&u).unwrap();
    let y = eta.advec_y_const_p(&v).unwrap();
    let expected = (&x + &y).unwrap();
    assert!(horiz.identical(&expected));
    assert!(eta.advec_p(&omega).unwrap().identical(&eta.advec_z(&omega).unwrap()));
    let total = eta.advec_3d(&u, &v, &omega).unwrap();
    assert!(total.identical(&(&horiz + &eta.advec_z(&omega).unwrap()).unwrap()));
    assert!(total.coords_identical(&arr));
}

#[test]
fn test_unfilled_vertical_advection() {
    let mut rng = rng();
    let arr = random_3d(&mut rng);
    let ps = random_ps(&mut rng);
    let u = random_flow();
    let omega = u.mapv(|x| 1e-3 * x);
    let config = SphereConfig::default().with_fill_edge_vert(false);
    let eta = SphereEtaUpwind::new(&arr, &pk(), &bk(), &ps, config).unwrap();

    let vert = eta.advec_z(&omega).unwrap();
    assert_eq!(vert.len_of(PFULL_STR).unwrap(), 4);
    assert_eq!(vert.coord(PFULL_STR).unwrap(), &pfull().slice(s![2..6]).to_owned());

    let total = eta.advec_3d(&u, &u, &omega).unwrap();
    let horiz = eta.advec_horiz_const_p(&u, &u).unwrap().subset_like(&vert).unwrap();
    assert!(total.identical(&(&horiz + &vert).unwrap()));
    assert_eq!(total.coord(LON_STR).unwrap(), &lon());
}

#[test]
fn test_unfilled_horizontal_sum_overlaps() {
    let arr = random_3d(&mut rng());
    let u = random_flow();
    let config = SphereConfig::default()
        .with_order(1)
        .with_cyclic_lon(false)
        .with_fill_edge_lon(false);
    let sphere = SphereUpwind::new(&arr, config).unwrap();
    let x = sphere.advec_x(&u).unwrap();
    let y = sphere.advec_y(&u).unwrap();
    let total = sphere.advec(&u, &u).unwrap();
    assert_eq!(total.len_of(LON_STR).unwrap(), 22);
    assert_eq!(total.len_of(LAT_STR).unwrap(), 10);
    assert!(total.identical(&(&x + &y.subset_like(&x).unwrap()).unwrap()));
}

#[test]
fn test_missing_flow_gives_missing_advection() {
    let arr = random_3d(&mut rng());
    let flow = arr.full_like(f64::NAN);
    let lat = arr.coord_field(LAT_STR).unwrap();
    let lon_advec = LonUpwind::new(&flow, &arr, LonUpwind::default_config())
        .unwrap()
        .advec(&lat)
        .unwrap();
    assert!(lon_advec.data().iter().all(|v| v.is_nan()));
    let lat_advec = LatUpwind::new(&flow, &arr, DerivConfig::default().with_fill_edge(FillEdge::Both))
        .unwrap()
        .advec(LatOper::Grad)
        .unwrap();
    assert!(lat_advec.data().iter().all(|v| v.is_nan()));
}

#[test]
fn test_uniform_ps_const_p_advection_equals_plain() {
    let arr = random_3d(&mut rng());
    let ps = random_ps(&mut rng()).full_like(1e5);
    let u = random_flow();
    let config = SphereConfig::default().with_order(1);
    let plain = SphereUpwind::new(&arr, config.clone()).unwrap();
    let eta = SphereEtaUpwind::new(&arr, &pk(), &bk(), &ps, config).unwrap();
    assert!(eta
        .advec_x_const_p(&u)
        .unwrap()
        .identical(&plain.advec_x(&u).unwrap()));
    assert!(eta
        .advec_y_const_p(&u)
        .unwrap()
        .identical(&plain.advec_y(&u).unwrap()));
}

#[test]
fn test_surface_flow_broadcasts() {
    let mut rng = rng();
    let arr = random_3d(&mut rng);
    let u = random_ps(&mut rng).mapv(|p| p - 1e5 - 500.0);
    let lat = arr.coord_field(LAT_STR).unwrap();
    let upwind = LonUpwind::new(&u, &arr, LonUpwind::default_config()).unwrap();
    assert!(upwind.flow().identical(&u));
    let advec = upwind.advec(&lat).unwrap();
    assert!(advec.coords_identical(&arr));
    assert_eq!(advec.dims(), &[PFULL_STR, LAT_STR, LON_STR]);
}
