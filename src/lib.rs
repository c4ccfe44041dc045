//! chart-geometry: dataset to pixel-space primitives for 2-D charts.
//!
//! The crate computes everything a drawing backend needs for histogram,
//! scatter and line charts (extents, nice scales, ticks, histogram bins and
//! the final primitive list) and leaves the drawing itself to a `Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartAccessors, ChartConfig, build_chart_geometry};
pub use error::{ChartError, ChartResult};
pub use render::{ChartGeometry, NullRenderer, Renderer};
