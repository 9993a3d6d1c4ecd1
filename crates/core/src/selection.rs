//! Uniform choice of the next lot for live bidding.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Pick one item uniformly at random, or `None` when `pool` is empty.
///
/// Takes the RNG as a parameter so tests can use a seeded generator.
pub fn pick_uniform<'a, T, R>(pool: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    pool.choose(rng)
}

/// [`pick_uniform`] with the thread-local RNG.
pub fn pick_random<T>(pool: &[T]) -> Option<&T> {
    pick_uniform(pool, &mut rand::rng())
}
