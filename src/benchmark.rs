use crate::config::SphereConfig;
use crate::deriv::SphereEtaBwdDeriv;
use crate::advec::SphereEtaUpwind;
use crate::field::Field;
use crate::grid::SyntheticGrid;
use crate::parallel::with_threads;
use log::info;
use std::time::{Duration, Instant};

/// Benchmark results for a specific thread count
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub thread_count: usize,
    /// Mean wall time of one constant-pressure zonal derivative
    pub deriv_duration: Duration,
    /// Mean wall time of one full three-dimensional advection
    pub advec_duration: Duration,
    pub points_per_second: f64,
}

/// Complete benchmark suite results
#[derive(Debug, Clone)]
pub struct BenchmarkSuite {
    pub results: Vec<BenchmarkResult>,
    pub grid: SyntheticGrid,
    pub repeats: usize,
}

struct Inputs {
    arr: Field,
    ps: Field,
    u: Field,
    v: Field,
    omega: Field,
}

impl Inputs {
    fn build(grid: &SyntheticGrid) -> Result<Self, String> {
        let err = |e: crate::error::DiffError| e.to_string();
        Ok(Self {
            arr: grid
                .field(|lon, lat, k| (lon.to_radians()).sin() * lat.to_radians().cos() + k as f64)
                .map_err(err)?,
            ps: grid
                .surface(|lon, lat| 1e5 + 500.0 * (2.0 * lon.to_radians()).cos() * lat.to_radians().cos())
                .map_err(err)?,
            u: grid.field(|_, lat, _| 10.0 * lat.to_radians().cos()).map_err(err)?,
            v: grid.field(|lon, _, _| 5.0 * lon.to_radians().sin()).map_err(err)?,
            omega: grid.field(|lon, lat, _| 0.1 * (lon + lat).to_radians().sin()).map_err(err)?,
        })
    }
}

impl BenchmarkSuite {
    /// Time the constant-pressure derivative and the 3-D advection on a
    /// synthetic grid for each thread count
    pub fn run_suite(
        grid: &SyntheticGrid,
        thread_counts: &[usize],
        repeats: usize,
    ) -> Result<Self, String> {
        let repeats = repeats.max(1);
        let inputs = Inputs::build(grid)?;
        let (pk, bk) = (grid.pk(), grid.bk());

        info!(
            "benchmark on {}x{}x{} grid, {} repeats, threads {:?}",
            grid.nlon, grid.nlat, grid.nlev, repeats, thread_counts
        );

        let mut results = Vec::new();
        for &thread_count in thread_counts {
            let timed = with_threads(thread_count, || -> Result<(Duration, Duration), String> {
                let config = SphereConfig::default();
                let deriv = SphereEtaBwdDeriv::new(&inputs.arr, &pk, &bk, &inputs.ps, config.clone())
                    .map_err(|e| e.to_string())?;
                let start = Instant::now();
                for _ in 0..repeats {
                    deriv.d_dx_const_p().map_err(|e| e.to_string())?;
                }
                let deriv_duration = start.elapsed() / repeats as u32;

                let upwind = SphereEtaUpwind::new(&inputs.arr, &pk, &bk, &inputs.ps, config)
                    .map_err(|e| e.to_string())?;
                let start = Instant::now();
                for _ in 0..repeats {
                    upwind
                        .advec_3d(&inputs.u, &inputs.v, &inputs.omega)
                        .map_err(|e| e.to_string())?;
                }
                Ok((deriv_duration, start.elapsed() / repeats as u32))
            })??;

            let (deriv_duration, advec_duration) = timed;
            let points_per_second = grid.points() as f64 / advec_duration.as_secs_f64().max(1e-12);
            info!(
                "{} threads: d_dx_const_p {:.3} ms, advec_3d {:.3} ms",
                thread_count,
                deriv_duration.as_secs_f64() * 1e3,
                advec_duration.as_secs_f64() * 1e3
            );
            results.push(BenchmarkResult {
                thread_count,
                deriv_duration,
                advec_duration,
                points_per_second,
            });
        }

        Ok(BenchmarkSuite {
            results,
            grid: grid.clone(),
            repeats,
        })
    }

    /// Plain-text summary table
    pub fn report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== indiff Benchmark Report ===\n\n");
        report.push_str(&format!(
            "Grid: {} lon x {} lat x {} levels, {} repeats\n\n",
            self.grid.nlon, self.grid.nlat, self.grid.nlev, self.repeats
        ));
        report.push_str("Threads | d_dx_const_p (ms) | advec_3d (ms) | Points/sec | Speedup\n");
        report.push_str("--------|-------------------|---------------|------------|--------\n");

        let baseline = self
            .results
            .first()
            .map(|r| r.advec_duration.as_secs_f64())
            .unwrap_or(1.0);
        for result in &self.results {
            let speedup = baseline / result.advec_duration.as_secs_f64().max(1e-12);
            report.push_str(&format!(
                "{:7} | {:17.3} | {:13.3} | {:10.0} | {:6.2}x\n",
                result.thread_count,
                result.deriv_duration.as_secs_f64() * 1e3,
                result.advec_duration.as_secs_f64() * 1e3,
                result.points_per_second,
                speedup
            ));
        }

        if let Some(optimal) = self.find_optimal_thread_count() {
            report.push_str(&format!("\nOptimal thread count: {}\n", optimal));
        }
        report
    }

    /// Find the optimal thread count based on the advection timing
    pub fn find_optimal_thread_count(&self) -> Option<usize> {
        self.results
            .iter()
            .min_by_key(|result| result.advec_duration)
            .map(|result| result.thread_count)
    }

    /// Parallel efficiency (percent) of a thread count relative to the first run
    pub fn get_scaling_efficiency(&self, thread_count: usize) -> Option<f64> {
        let baseline = self.results.first()?;
        let target = self
            .results
            .iter()
            .find(|r| r.thread_count == thread_count)?;

        let speedup =
            baseline.advec_duration.as_secs_f64() / target.advec_duration.as_secs_f64();
        Some(speedup * baseline.thread_count as f64 / thread_count as f64 * 100.0)
    }
}
