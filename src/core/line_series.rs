use serde::{Deserialize, Serialize};

use crate::core::{Accessor, Scale, ScalarKind};

/// One vertex of a projected polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineVertex {
    pub x: f64,
    pub y: f64,
}

/// Horizontal band from a reference value down to the bottom of the
/// bounded area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBand {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Projects records into polyline vertices in dataset order.
///
/// The dataset is expected to be sorted along x already; records with an
/// undefined coordinate are skipped.
pub fn project_line_vertices<T, X, Y>(
    dataset: &[T],
    x_accessor: &X,
    y_accessor: &Y,
    x_scale: Scale,
    y_scale: Scale,
) -> Vec<LineVertex>
where
    X: Accessor<T> + ?Sized,
    Y: Accessor<T> + ?Sized,
{
    dataset
        .iter()
        .filter_map(|record| {
            let x = x_accessor.extract(record).filter(|v| v.is_comparable())?;
            let y = y_accessor.extract(record).filter(|v| v.is_comparable())?;
            Some(LineVertex {
                x: x_scale.apply(x),
                y: y_scale.apply(y),
            })
        })
        .collect()
}

/// Band below `reference_value` when the y domain straddles it
/// (`min < reference_value <= max`), otherwise `None`.
#[must_use]
pub fn project_reference_band(
    y_scale: Scale,
    reference_value: f64,
    bounded_width: f64,
    bounded_height: f64,
) -> Option<ReferenceBand> {
    let domain = y_scale.domain();
    if domain.kind() != ScalarKind::Number || !reference_value.is_finite() {
        return None;
    }
    let (min, max) = domain.bounds();
    if !(min < reference_value && reference_value <= max) {
        return None;
    }

    let y = y_scale.apply_f64(reference_value);
    let height = (bounded_height - y).max(0.0);
    if height <= 0.0 {
        return None;
    }
    Some(ReferenceBand {
        x: 0.0,
        y,
        width: bounded_width,
        height,
    })
}
