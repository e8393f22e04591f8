//! Parallel decoding of independent value trees.
//!
//! Readers hold no mutable state, so one reader can decode many trees at
//! once. Each tree is read from the root location and gets its own result.

use rayon::prelude::*;
use tracing::debug;

use crate::env::ReaderEnv;
use crate::error::ErrorBuilder;
use crate::location::Location;
use crate::reader::Reader;
use crate::result::ReadResult;
use crate::value::Value;

/// Decodes every value with `reader` on the rayon thread pool.
///
/// Results are returned in the order of `values`.
///
/// # Example
///
/// ```rust
/// use autopsy::batch::read_all;
/// use autopsy::reader::primitive::number;
/// use autopsy::{Reader, ReaderEnv, StandardErrors, Value};
///
/// let reader: Reader<u8, StandardErrors> = number();
/// let values: Vec<Value> = vec![1u64.into(), 2u64.into(), 300u64.into()];
///
/// let results = read_all(&reader, &ReaderEnv::new(StandardErrors), &(), &values);
/// assert_eq!(results[0].value(), Some(&1));
/// assert!(results[2].is_failure());
/// ```
pub fn read_all<T, EB, CTX>(
    reader: &Reader<T, EB, CTX>,
    env: &ReaderEnv<EB>,
    context: &CTX,
    values: &[Value],
) -> Vec<ReadResult<T, EB::Error>>
where
    T: Send + 'static,
    EB: ErrorBuilder + Sync + 'static,
    CTX: Sync + 'static,
{
    let results: Vec<_> = values
        .par_iter()
        .map(|value| reader.read(env, context, &Location::root(), value))
        .collect();
    debug!(
        total = results.len(),
        failed = results.iter().filter(|result| result.is_failure()).count(),
        "batch decoded"
    );
    results
}

impl<T, EB, CTX> Reader<T, EB, CTX>
where
    T: Send + 'static,
    EB: ErrorBuilder + Sync + 'static,
    CTX: Sync + 'static,
{
    /// Decodes `values` in parallel. See [`read_all`].
    pub fn read_batch(
        &self,
        env: &ReaderEnv<EB>,
        context: &CTX,
        values: &[Value],
    ) -> Vec<ReadResult<T, EB::Error>> {
        read_all(self, env, context, values)
    }
}
