mod chart_geometry;
mod config;

pub use chart_geometry::{ChartAccessors, build_chart_geometry};
pub use config::{AxisConfig, ChartConfig, ColorRamp, HistogramConfig, LineConfig};
