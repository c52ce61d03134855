use crate::config::{LAT_STR, LON_STR, PFULL_STR};
use crate::error::Result;
use crate::field::Field;
use ndarray::{Array, Array1, Array3, IxDyn};

/// Regular global lon/lat grid on hybrid levels, used by the diagnostic
/// checks and the benchmark
#[derive(Debug, Clone)]
pub struct SyntheticGrid {
    pub nlon: usize,
    pub nlat: usize,
    pub nlev: usize,
}

impl Default for SyntheticGrid {
    fn default() -> Self {
        Self {
            nlon: 64,
            nlat: 32,
            nlev: 20,
        }
    }
}

impl SyntheticGrid {
    pub fn new(nlon: usize, nlat: usize, nlev: usize) -> Self {
        Self { nlon, nlat, nlev }
    }

    /// Longitudes from 0 with uniform spacing, excluding 360
    pub fn lon(&self) -> Array1<f64> {
        let dlon = 360.0 / self.nlon as f64;
        Array::from_shape_fn(self.nlon, |i| i as f64 * dlon)
    }

    /// Cell-centre latitudes between the poles
    pub fn lat(&self) -> Array1<f64> {
        let dlat = 180.0 / self.nlat as f64;
        Array::from_shape_fn(self.nlat, |j| -90.0 + (j as f64 + 0.5) * dlat)
    }

    /// Interface coefficients running from the model top (`p = 0`) to the
    /// surface (`p = ps`)
    pub fn pk(&self) -> Array1<f64> {
        Array::from_shape_fn(self.nlev + 1, |k| {
            let sigma = k as f64 / self.nlev as f64;
            2e4 * sigma * (1.0 - sigma)
        })
    }

    pub fn bk(&self) -> Array1<f64> {
        Array::from_shape_fn(self.nlev + 1, |k| {
            let sigma = k as f64 / self.nlev as f64;
            sigma * sigma
        })
    }

    /// Reference full-level pressures (hPa) at a surface pressure of 1000 hPa
    pub fn pfull(&self) -> Array1<f64> {
        let (pk, bk) = (self.pk(), self.bk());
        Array::from_shape_fn(self.nlev, |k| {
            0.5 * (pk[k] + bk[k] * 1e5 + pk[k + 1] + bk[k + 1] * 1e5) / 100.0
        })
    }

    /// Three-dimensional field `f(lon, lat, level)` on (pfull, lat, lon)
    pub fn field<F>(&self, f: F) -> Result<Field>
    where
        F: Fn(f64, f64, usize) -> f64,
    {
        let (lon, lat) = (self.lon(), self.lat());
        let data = Array3::from_shape_fn((self.nlev, self.nlat, self.nlon), |(k, j, i)| {
            f(lon[i], lat[j], k)
        });
        Field::new(
            data.into_dyn(),
            &[PFULL_STR, LAT_STR, LON_STR],
            vec![self.pfull(), lat, lon],
        )
    }

    /// Surface pressure `f(lon, lat)` on (lat, lon)
    pub fn surface<F>(&self, f: F) -> Result<Field>
    where
        F: Fn(f64, f64) -> f64,
    {
        let (lon, lat) = (self.lon(), self.lat());
        let data = Array::from_shape_fn(IxDyn(&[self.nlat, self.nlon]), |idx| {
            f(lon[idx[1]], lat[idx[0]])
        });
        Field::new(data, &[LAT_STR, LON_STR], vec![lat, lon])
    }

    pub fn points(&self) -> usize {
        self.nlon * self.nlat * self.nlev
    }
}
