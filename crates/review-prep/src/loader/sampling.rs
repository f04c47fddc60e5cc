//! Fixed-seed uniform row sampling.

use crate::error::Result;
use polars::prelude::*;
use rand::prelude::*;

/// Draw a uniform random sample of exactly `n` rows.
///
/// The RNG is seeded with `seed` so that the same input produces the same
/// sample on every call. When `n` is not smaller than the row count the
/// frame is returned unchanged.
pub(crate) fn sample_rows(df: &DataFrame, n: usize, seed: u64) -> Result<DataFrame> {
    let height = df.height();
    if n >= height {
        return Ok(df.clone());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let indices: Vec<usize> = (0..height).collect();
    let chosen: Vec<IdxSize> = indices
        .choose_multiple(&mut rng, n)
        .map(|&i| i as IdxSize)
        .collect();

    let idx = IdxCa::from_vec("idx".into(), chosen);
    Ok(df.take(&idx)?)
}
