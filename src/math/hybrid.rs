use crate::config::PHALF_STR;
use crate::error::{DiffError, Result};
use crate::field::Field;
use ndarray::{s, Array, Array1};

/// Hybrid sigma-pressure vertical coordinate.
///
/// Interface pressures are `pk + bk * ps`; each full level sits at the mean
/// of its two bounding interfaces.
#[derive(Debug, Clone)]
pub struct HybridCoord {
    pk: Array1<f64>,
    bk: Array1<f64>,
    ps: Field,
}

impl HybridCoord {
    pub fn new(pk: Array1<f64>, bk: Array1<f64>, ps: Field) -> Result<Self> {
        if pk.len() != bk.len() {
            return Err(DiffError::InvalidCoefficients {
                expected: pk.len(),
                found: bk.len(),
            });
        }
        if pk.len() < 2 {
            return Err(DiffError::InvalidCoefficients {
                expected: 2,
                found: pk.len(),
            });
        }
        Ok(Self { pk, bk, ps })
    }

    pub fn pk(&self) -> &Array1<f64> {
        &self.pk
    }

    pub fn bk(&self) -> &Array1<f64> {
        &self.bk
    }

    pub fn ps(&self) -> &Field {
        &self.ps
    }

    /// Number of full levels
    pub fn nlev(&self) -> usize {
        self.pk.len() - 1
    }

    pub fn check_levels(&self, nlev: usize) -> Result<()> {
        if self.pk.len() != nlev + 1 {
            return Err(DiffError::InvalidCoefficients {
                expected: nlev + 1,
                found: self.pk.len(),
            });
        }
        Ok(())
    }

    /// Interface pressure, indexed by interface number along `phalf`
    pub fn phalf(&self) -> Result<Field> {
        let index = Array::range(0.0, self.pk.len() as f64, 1.0);
        let pk = Field::from_1d(self.pk.clone(), PHALF_STR, index.clone())?;
        let bk = Field::from_1d(self.bk.clone(), PHALF_STR, index)?;
        &pk + &(&bk * &self.ps)?
    }

    /// Full-level pressure along `dim`, labelled with the given level
    /// coordinate
    pub fn pfull(&self, dim: &str, pfull: &Array1<f64>) -> Result<Field> {
        self.check_levels(pfull.len())?;
        let n = self.nlev();
        let interface = |lo: usize| -> Result<Field> {
            let pk = Field::from_1d(self.pk.slice(s![lo..lo + n]).to_owned(), dim, pfull.clone())?;
            let bk = Field::from_1d(self.bk.slice(s![lo..lo + n]).to_owned(), dim, pfull.clone())?;
            &pk + &(&bk * &self.ps)?
        };
        let sum = (&interface(0)? + &interface(1)?)?;
        Ok(sum * 0.5)
    }
}
