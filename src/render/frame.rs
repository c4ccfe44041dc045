use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{BoundedArea, CanvasSize, ChartType, Scale};
use crate::error::{ChartError, ChartResult};
use crate::render::{Axis, Primitive};

/// Backend-agnostic geometry for one chart draw pass.
///
/// Primitive coordinates are relative to `bounds`; a renderer translates them
/// by `bounds.offset_x`/`bounds.offset_y` onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub chart_type: ChartType,
    pub canvas: CanvasSize,
    pub bounds: BoundedArea,
    pub primitives: Vec<Primitive>,
    pub x_scale: Scale,
    pub y_scale: Scale,
    #[serde(default)]
    pub color_scale: Option<Scale>,
    /// Accessor names and axis titles, in insertion order for stable snapshots.
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
}

impl ChartGeometry {
    /// Tick primitives of one axis as `(position, label)`.
    pub fn ticks(&self, axis: Axis) -> impl Iterator<Item = (f64, &str)> + '_ {
        self.primitives.iter().filter_map(move |primitive| match primitive {
            Primitive::Tick {
                axis: tick_axis,
                position,
                label,
                ..
            } if *tick_axis == axis => Some((*position, label.as_str())),
            _ => None,
        })
    }

    /// Bars as `(x, y, width, height)`, including reference bands.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Bar {
                x,
                y,
                width,
                height,
            } => Some((*x, *y, *width, *height)),
            _ => None,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.primitives
            .iter()
            .filter(|primitive| matches!(primitive, Primitive::Point { .. }))
    }

    /// Polyline vertices in draw order.
    #[must_use]
    pub fn path(&self) -> Vec<(f64, f64)> {
        self.primitives
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::PathVertex { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !(self.bounds.width > 0.0 && self.bounds.height > 0.0) {
            return Err(ChartError::DegenerateCanvas {
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        for primitive in &self.primitives {
            primitive.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart geometry: {e}"))
        })
    }

    /// Loads a geometry exported by [`Self::to_json_pretty`] and validates it.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let geometry: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart geometry json: {e}"))
        })?;
        geometry.validate()?;
        Ok(geometry)
    }
}
