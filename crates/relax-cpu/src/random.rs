//! Random fields for benchmark inputs

use rand::prelude::*;
use rand_distr::Uniform;
use relax_core::{Field, RelaxError, Result};
use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Reseed the generator used by [`random_field`] on this thread.
pub fn seed(s: u64) {
    RNG.with(|rng| {
        *rng.borrow_mut() = SmallRng::seed_from_u64(s);
    });
}

/// A `side x side` field of values uniform in `[0, 1)`.
pub fn random_field(side: usize) -> Result<Field> {
    let dist =
        Uniform::new(0.0, 1.0).map_err(|e| RelaxError::InvalidArgument(e.to_string()))?;
    let values: Vec<f64> = RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        (0..side * side).map(|_| dist.sample(&mut *rng)).collect()
    });
    Field::from_vec(side, values)
}
