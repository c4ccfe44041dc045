use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Accessor, Scale};

/// Projected scatter mark in bounded-area pixels.
///
/// `color_position` is the color accessor value mapped into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color_position: Option<f64>,
}

/// Color channel of a scatter projection: accessor plus a `(0, 1)` scale.
pub struct ColorEncoding<'a, T> {
    pub accessor: &'a dyn Accessor<T>,
    pub scale: Scale,
}

/// Projects every record with defined x and y, keeping dataset order.
pub fn project_scatter_points<T, X, Y>(
    dataset: &[T],
    x_accessor: &X,
    y_accessor: &Y,
    x_scale: Scale,
    y_scale: Scale,
    color: Option<&ColorEncoding<'_, T>>,
) -> Vec<ScatterPoint>
where
    X: Accessor<T> + ?Sized,
    Y: Accessor<T> + ?Sized,
{
    let mut points = Vec::with_capacity(dataset.len());
    for record in dataset {
        let x = x_accessor.extract(record).filter(|v| v.is_comparable());
        let y = y_accessor.extract(record).filter(|v| v.is_comparable());
        let (Some(x), Some(y)) = (x, y) else {
            continue;
        };

        let color_position = color.and_then(|encoding| {
            encoding
                .accessor
                .extract(record)
                .filter(|v| v.is_comparable())
                .map(|v| encoding.scale.apply(v))
        });

        points.push(ScatterPoint {
            x: x_scale.apply(x),
            y: y_scale.apply(y),
            color_position,
        });
    }

    let dropped = dataset.len() - points.len();
    if dropped > 0 {
        warn!(
            dropped,
            x = x_accessor.name(),
            y = y_accessor.name(),
            "dropping scatter records with undefined coordinates"
        );
    }

    points
}
