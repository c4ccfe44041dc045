use tracing::trace;

use crate::core::extent::accessor_type_error;
use crate::core::{Accessor, Domain, ScalarKind};
use crate::error::{ChartError, ChartResult};

/// One histogram bucket.
///
/// Covers `[lower_bound, upper_bound)`; the last bin of a partition also
/// includes its upper bound.
#[derive(Debug, PartialEq)]
pub struct Bin<'a, T> {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub members: Vec<&'a T>,
}

impl<T> Bin<'_, T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Splits `domain` into `threshold_count` equal-width bins and assigns each
/// record by its accessor value.
///
/// Bins come back in ascending order, empty ones included. Records that are
/// undefined, non-finite or outside the domain are dropped.
pub fn make_bins<'a, T, A>(
    dataset: &'a [T],
    accessor: &A,
    domain: Domain,
    threshold_count: usize,
) -> ChartResult<Vec<Bin<'a, T>>>
where
    A: Accessor<T> + ?Sized,
{
    if threshold_count < 1 {
        return Err(ChartError::InvalidThresholdCount {
            count: threshold_count,
        });
    }
    if domain.kind() != ScalarKind::Number {
        return Err(accessor_type_error(accessor.name()));
    }

    let edges = bin_edges(domain, threshold_count);
    let mut bins: Vec<Bin<'a, T>> = edges
        .windows(2)
        .map(|pair| Bin {
            lower_bound: pair[0],
            upper_bound: pair[1],
            members: Vec::new(),
        })
        .collect();

    let mut dropped = 0_usize;
    for record in dataset {
        let Some(value) = accessor.extract(record) else {
            dropped += 1;
            continue;
        };
        let Some(value) = value.as_number() else {
            return Err(accessor_type_error(accessor.name()));
        };
        if !value.is_finite() || !domain.contains(value) {
            dropped += 1;
            continue;
        }
        let index = bin_index(&edges, value);
        bins[index].members.push(record);
    }

    trace!(
        accessor = accessor.name(),
        bins = bins.len(),
        dropped,
        counts = ?bins.iter().map(Bin::len).collect::<Vec<_>>(),
        "binned dataset"
    );

    Ok(bins)
}

/// `count + 1` ascending edges; the last edge is exactly `domain.max`.
fn bin_edges(domain: Domain, count: usize) -> Vec<f64> {
    let (min, max) = domain.bounds();
    let mut edges: Vec<f64> = (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            min * (1.0 - t) + max * t
        })
        .collect();
    edges.push(max);
    edges
}

/// Index of the bin holding `value`, which lies within the edges.
fn bin_index(edges: &[f64], value: f64) -> usize {
    let last = edges.len() - 2;
    let (min, max) = (edges[0], edges[edges.len() - 1]);
    let span = max - min;
    if span <= 0.0 {
        return 0;
    }

    let estimate = ((value - min) / span * (last + 1) as f64).floor();
    let mut index = if estimate <= 0.0 {
        0
    } else {
        (estimate as usize).min(last)
    };
    // Correct rounding drift at the edges.
    while index > 0 && value < edges[index] {
        index -= 1;
    }
    while index < last && value >= edges[index + 1] {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::{bin_edges, bin_index};
    use crate::core::Domain;

    #[test]
    fn edges_end_exactly_on_the_domain_max() {
        let domain = Domain::numeric(0.1, 0.7).expect("domain");
        let edges = bin_edges(domain, 3);
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], 0.1);
        assert_eq!(edges[3], 0.7);
    }

    #[test]
    fn edges_stay_finite_near_the_float_limits() {
        let domain = Domain::numeric(-8e307, 8e307).expect("domain");
        let edges = bin_edges(domain, 4);
        assert_eq!(edges.len(), 5);
        assert!(edges.iter().all(|edge| edge.is_finite()));
        assert!(edges.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!((edges[0], edges[2], edges[4]), (-8e307, 0.0, 8e307));
    }

    #[test]
    fn values_on_an_inner_edge_go_to_the_upper_bin() {
        let edges = [0.0, 0.1, 0.2, 0.30000000000000004];
        assert_eq!(bin_index(&edges, 0.1), 1);
        assert_eq!(bin_index(&edges, 0.2), 2);
        assert_eq!(bin_index(&edges, 0.30000000000000004), 2);
    }
}
