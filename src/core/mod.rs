pub mod accessor;
pub mod binner;
pub mod extent;
pub mod histogram_series;
pub mod line_series;
pub mod primitives;
pub mod scale;
pub mod scatter_series;
pub(crate) mod ticks;
pub mod types;

pub use accessor::{Accessor, FieldAccessor, JsonFieldAccessor};
pub use binner::{Bin, make_bins};
pub use extent::{extent, max_by, mean};
pub use histogram_series::{HistogramBar, histogram_count_scale, project_histogram_bars};
pub use line_series::{LineVertex, ReferenceBand, project_line_vertices, project_reference_band};
pub use scale::{NICE_TICK_COUNT, Scale, ScaleKind, TickFormat};
pub use scatter_series::{ColorEncoding, ScatterPoint, project_scatter_points};
pub use types::{
    BoundedArea, CanvasSize, ChartType, Domain, Margins, PixelRange, Scalar, ScalarKind,
};
