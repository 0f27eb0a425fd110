use rand::seq::SliceRandom;

/// Returns the elements of `items` in uniformly random order, leaving the
/// input untouched. Backed by the thread-local generator; not suitable
/// for anything security-sensitive.
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(&mut rand::rng());
    out
}
