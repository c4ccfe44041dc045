use crate::error::ChartResult;
use crate::render::{ChartGeometry, Primitive, Renderer};

/// Headless renderer that draws nothing.
///
/// Every primitive is validated and counted per kind, which lets tests check
/// a geometry build end to end without a drawing surface.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_bar_count: usize,
    pub last_point_count: usize,
    pub last_vertex_count: usize,
    pub last_tick_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, geometry: &ChartGeometry) -> ChartResult<()> {
        geometry.validate()?;

        let mut bars = 0;
        let mut points = 0;
        let mut vertices = 0;
        let mut ticks = 0;
        for primitive in &geometry.primitives {
            match primitive {
                Primitive::Bar { .. } => bars += 1,
                Primitive::Point { .. } => points += 1,
                Primitive::PathVertex { .. } => vertices += 1,
                Primitive::Tick { .. } => ticks += 1,
                Primitive::Rule { .. } | Primitive::Label { .. } => {}
            }
        }

        self.frames_rendered += 1;
        self.last_bar_count = bars;
        self.last_point_count = points;
        self.last_vertex_count = vertices;
        self.last_tick_count = ticks;
        Ok(())
    }
}
