/// Apply `f` to every item with its index and gather results in input order.
///
/// With the `rayon` feature the items are processed in parallel; the output
/// order is still the input order. When several items fail, which error is
/// returned is unspecified under `rayon` and is the first one otherwise.
pub fn map_indexed<T, U, E, F>(items: &[T], f: F) -> Result<Vec<U>, E>
where
    T: Sync,
    U: Send,
    E: Send,
    F: Fn(usize, &T) -> Result<U, E> + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .enumerate()
            .map(|(index, item)| f(index, item))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| f(index, item))
            .collect()
    }
}
