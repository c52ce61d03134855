use ndarray::{ArrayD, ArrayViewD, Zip};

/// Below this many elements the kernels run sequentially
pub const PAR_MIN_LEN: usize = 4096;

/// Elementwise binary kernel over two views of identical shape.
///
/// Large arrays are split across the current rayon pool with
/// `Zip::par_map_collect`; each output element depends on its two inputs
/// only, so the result does not depend on the thread count.
pub fn zip_map<F>(a: &ArrayViewD<'_, f64>, b: &ArrayViewD<'_, f64>, f: F) -> ArrayD<f64>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    let zip = Zip::from(a).and(b);
    if a.len() < PAR_MIN_LEN {
        zip.map_collect(|&x, &y| f(x, y))
    } else {
        zip.par_map_collect(|&x, &y| f(x, y))
    }
}

/// Run `op` inside a dedicated rayon pool with `num_threads` workers
pub fn with_threads<T, F>(num_threads: usize, op: F) -> Result<T, String>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| format!("Failed to create thread pool: {}", e))?;

    Ok(pool.install(op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    #[test]
    fn test_zip_map_matches_sequential() {
        let n = PAR_MIN_LEN * 2;
        let a = Array::from_shape_fn(IxDyn(&[n]), |i| i[0] as f64);
        let b = Array::from_shape_fn(IxDyn(&[n]), |i| 2.0 * i[0] as f64 + 1.0);
        let out = zip_map(&a.view(), &b.view(), |x, y| y - x);
        for (i, v) in out.iter().enumerate() {
            assert_eq!(*v, i as f64 + 1.0);
        }
    }

    #[test]
    fn test_with_threads_runs_in_pool() {
        let n = with_threads(2, rayon::current_num_threads).unwrap();
        assert_eq!(n, 2);
    }
}
