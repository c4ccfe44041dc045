use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::{Accessor, Domain, Scalar, ScalarKind};
use crate::error::{ChartError, ChartResult};

/// Returns `(min, max)` of `accessor` over `dataset`.
///
/// Undefined and non-finite values are skipped. Fails with
/// `EmptyDataset` for an empty slice and `AccessorType` when nothing
/// comparable remains or value kinds are mixed.
pub fn extent<T, A>(dataset: &[T], accessor: &A) -> ChartResult<Domain>
where
    A: Accessor<T> + ?Sized,
{
    let (kind, values) = comparable_values(dataset, accessor)?;
    let min = values.iter().copied().map(OrderedFloat).min();
    let max = values.iter().copied().map(OrderedFloat).max();
    match (min, max) {
        (Some(min), Some(max)) => Domain::from_f64(kind, min.0, max.0),
        _ => Err(accessor_type_error(accessor.name())),
    }
}

/// Arithmetic mean of the comparable accessor values.
///
/// Temporal values average their epoch milliseconds. Computed as a running
/// mean, so large finite inputs never overflow to infinity.
pub fn mean<T, A>(dataset: &[T], accessor: &A) -> ChartResult<Scalar>
where
    A: Accessor<T> + ?Sized,
{
    let (kind, values) = comparable_values(dataset, accessor)?;
    let mean = values
        .iter()
        .enumerate()
        .fold(0.0, |mean: f64, (index, value)| {
            let n = (index + 1) as f64;
            mean - mean / n + value / n
        });
    Scalar::from_f64(kind, mean)
}

/// Largest `f(item)` over `items`, ignoring non-finite results.
pub fn max_by<I, F>(items: &[I], f: F) -> Option<f64>
where
    F: Fn(&I) -> f64,
{
    items
        .iter()
        .map(f)
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .max()
        .map(|value| value.0)
}

fn comparable_values<T, A>(dataset: &[T], accessor: &A) -> ChartResult<(ScalarKind, Vec<f64>)>
where
    A: Accessor<T> + ?Sized,
{
    if dataset.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    let mut kind = None;
    let mut values = Vec::with_capacity(dataset.len());
    let mut skipped = 0_usize;
    for record in dataset {
        let Some(value) = accessor.extract(record).filter(|v| v.is_comparable()) else {
            skipped += 1;
            continue;
        };
        match kind {
            None => kind = Some(value.kind()),
            Some(expected) if expected != value.kind() => {
                return Err(accessor_type_error(accessor.name()));
            }
            Some(_) => {}
        }
        values.push(value.as_f64());
    }

    if skipped > 0 {
        trace!(
            accessor = accessor.name(),
            skipped,
            kept = values.len(),
            "skipped undefined accessor values"
        );
    }

    match kind {
        Some(kind) => Ok((kind, values)),
        None => Err(accessor_type_error(accessor.name())),
    }
}

pub(crate) fn accessor_type_error(accessor: &str) -> ChartError {
    ChartError::AccessorType {
        accessor: accessor.to_owned(),
    }
}
