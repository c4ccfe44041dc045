use serde::{Deserialize, Serialize};

use crate::core::extent::max_by;
use crate::core::{Bin, Domain, PixelRange, Scale};
use crate::error::{ChartError, ChartResult};

/// Deterministic bar geometry for one histogram bin, relative to the
/// bounded area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Midpoint of the bin's full pixel span, padding included.
    pub center_x: f64,
    pub count: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Count axis for a histogram: `(0, max bin count)` mapped bottom-up over
/// `bounded_height`, niced.
pub fn histogram_count_scale<T>(bins: &[Bin<'_, T>], bounded_height: f64) -> ChartResult<Scale> {
    let max_count = max_by(bins, |bin| bin.len() as f64).unwrap_or(0.0);
    // An all-empty histogram still needs a proper axis.
    let top = if max_count > 0.0 { max_count } else { 1.0 };
    Scale::new(
        Domain::numeric(0.0, top)?,
        PixelRange::new(bounded_height, 0.0)?,
        true,
    )
}

/// Projects bins into bars.
///
/// `x = x_scale(lower)`, `width = x_scale(upper) - x_scale(lower) - padding`
/// and `height = bounded_height - y_scale(count)`, both clamped to `>= 0`.
pub fn project_histogram_bars<T>(
    bins: &[Bin<'_, T>],
    x_scale: Scale,
    y_scale: Scale,
    bounded_height: f64,
    bar_padding: f64,
) -> ChartResult<Vec<HistogramBar>> {
    if !bar_padding.is_finite() || bar_padding < 0.0 {
        return Err(ChartError::InvalidData(
            "histogram bar padding must be finite and >= 0".to_owned(),
        ));
    }

    let bars = bins
        .iter()
        .map(|bin| {
            let count = bin.len();
            let left = x_scale.apply_f64(bin.lower_bound);
            let right = x_scale.apply_f64(bin.upper_bound);
            let y = y_scale.apply_f64(count as f64);
            HistogramBar {
                x: left,
                y,
                width: (right - left - bar_padding).max(0.0),
                height: (bounded_height - y).max(0.0),
                center_x: (left + right) * 0.5,
                count,
                lower_bound: bin.lower_bound,
                upper_bound: bin.upper_bound,
            }
        })
        .collect();

    Ok(bars)
}
