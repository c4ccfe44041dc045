mod frame;
mod null_renderer;
mod primitives;

pub use frame::ChartGeometry;
pub use null_renderer::NullRenderer;
pub use primitives::{Axis, Color, Primitive, TextAnchor};

use crate::error::ChartResult;

/// Drawing backend fed with finished chart geometry.
///
/// Coordinates in `ChartGeometry` are already in bounded-area pixels; a
/// backend only translates by the margins and picks visual styling.
pub trait Renderer {
    fn render(&mut self, geometry: &ChartGeometry) -> ChartResult<()>;
}
