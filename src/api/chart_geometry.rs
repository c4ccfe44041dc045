use indexmap::IndexMap;
use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::core::{
    Accessor, BoundedArea, ChartType, ColorEncoding, Margins, PixelRange, Scale, extent,
    histogram_count_scale, make_bins, mean, project_histogram_bars, project_line_vertices,
    project_reference_band, project_scatter_points,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Axis, ChartGeometry, Primitive, TextAnchor};

use super::{AxisConfig, ChartConfig};

/// Count labels sit this far above their bar.
const COUNT_LABEL_OFFSET_PX: f64 = 5.0;
/// The mean rule starts above the bounded area to leave room for its label.
const MEAN_RULE_TOP_PX: f64 = -15.0;
/// Axis titles are inset from the outer canvas edge by this much.
const AXIS_TITLE_INSET_PX: f64 = 10.0;

/// Accessors feeding one geometry build.
///
/// `y` is required for scatter and line charts and ignored by histograms,
/// whose y axis is the bin count. `color` is only read by scatter charts.
pub struct ChartAccessors<'a, T> {
    pub x: &'a dyn Accessor<T>,
    pub y: Option<&'a dyn Accessor<T>>,
    pub color: Option<&'a dyn Accessor<T>>,
}

impl<'a, T> ChartAccessors<'a, T> {
    pub fn new(x: &'a dyn Accessor<T>) -> Self {
        Self {
            x,
            y: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_y(mut self, y: &'a dyn Accessor<T>) -> Self {
        self.y = Some(y);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: &'a dyn Accessor<T>) -> Self {
        self.color = Some(color);
        self
    }

    fn required_y(&self) -> ChartResult<&'a dyn Accessor<T>> {
        self.y.ok_or(ChartError::MissingAccessor { axis: "y" })
    }
}

/// Turns `dataset` into an ordered primitive list for `config.chart_type`.
///
/// Data marks come first, then x ticks, y ticks and axis titles. Any failure
/// aborts the build; no partial geometry is returned.
pub fn build_chart_geometry<T>(
    dataset: &[T],
    accessors: &ChartAccessors<'_, T>,
    config: &ChartConfig,
) -> ChartResult<ChartGeometry> {
    debug!(
        chart_type = ?config.chart_type,
        records = dataset.len(),
        "build chart geometry"
    );

    let bounds = config.canvas.bounded(config.margins)?;
    let x_scale = Scale::new(
        extent(dataset, accessors.x)?,
        PixelRange::new(0.0, bounds.width)?,
        true,
    )?;

    let mut primitives = Vec::new();
    let mut metadata = IndexMap::new();
    metadata.insert("x_accessor".to_owned(), accessors.x.name().to_owned());

    let (y_scale, color_scale) = match config.chart_type {
        ChartType::Histogram => {
            let y_scale =
                push_histogram(&mut primitives, dataset, accessors, config, x_scale, bounds)?;
            (y_scale, None)
        }
        ChartType::Scatter => {
            let y = accessors.required_y()?;
            metadata.insert("y_accessor".to_owned(), y.name().to_owned());
            let y_scale = value_y_scale(dataset, y, bounds)?;
            let color_scale = match accessors.color {
                Some(color) => {
                    metadata.insert("color_accessor".to_owned(), color.name().to_owned());
                    Some(Scale::new(
                        extent(dataset, color)?,
                        PixelRange::new(0.0, 1.0)?,
                        false,
                    )?)
                }
                None => None,
            };
            push_scatter(
                &mut primitives,
                dataset,
                accessors,
                config,
                (x_scale, y_scale, color_scale),
            )?;
            (y_scale, color_scale)
        }
        ChartType::Line => {
            let y = accessors.required_y()?;
            metadata.insert("y_accessor".to_owned(), y.name().to_owned());
            let y_scale = value_y_scale(dataset, y, bounds)?;
            push_line(
                &mut primitives,
                dataset,
                accessors.x,
                y,
                config,
                x_scale,
                y_scale,
                bounds,
            );
            (y_scale, None)
        }
    };

    push_ticks(&mut primitives, Axis::X, x_scale, &config.x_axis);
    push_ticks(&mut primitives, Axis::Y, y_scale, &config.y_axis);
    push_axis_titles(&mut primitives, &mut metadata, config, bounds);

    let geometry = ChartGeometry {
        chart_type: config.chart_type,
        canvas: config.canvas,
        bounds,
        primitives,
        x_scale,
        y_scale,
        color_scale,
        metadata,
    };

    debug!(
        chart_type = ?geometry.chart_type,
        primitives = geometry.primitives.len(),
        "chart geometry built"
    );
    Ok(geometry)
}

fn value_y_scale<T>(
    dataset: &[T],
    accessor: &dyn Accessor<T>,
    bounds: BoundedArea,
) -> ChartResult<Scale> {
    Scale::new(
        extent(dataset, accessor)?,
        PixelRange::new(bounds.height, 0.0)?,
        true,
    )
}

fn push_histogram<T>(
    primitives: &mut Vec<Primitive>,
    dataset: &[T],
    accessors: &ChartAccessors<'_, T>,
    config: &ChartConfig,
    x_scale: Scale,
    bounds: BoundedArea,
) -> ChartResult<Scale> {
    let settings = config.histogram;
    let bins = make_bins(
        dataset,
        accessors.x,
        x_scale.domain(),
        settings.threshold_count,
    )?;
    let y_scale = histogram_count_scale(&bins, bounds.height)?;
    let bars = project_histogram_bars(
        &bins,
        x_scale,
        y_scale,
        bounds.height,
        settings.bar_padding,
    )?;

    primitives.reserve(bars.len() * 2 + 1);
    for bar in bars {
        let mut marks: SmallVec<[Primitive; 2]> = smallvec![Primitive::Bar {
            x: bar.x,
            y: bar.y,
            width: bar.width,
            height: bar.height,
        }];
        if settings.show_counts && bar.count > 0 {
            marks.push(Primitive::Label {
                x: bar.center_x,
                y: bar.y - COUNT_LABEL_OFFSET_PX,
                text: bar.count.to_string(),
                anchor: TextAnchor::Middle,
            });
        }
        primitives.extend(marks);
    }

    if settings.show_mean {
        let x = x_scale.apply(mean(dataset, accessors.x)?);
        primitives.push(Primitive::Rule {
            x1: x,
            y1: MEAN_RULE_TOP_PX,
            x2: x,
            y2: bounds.height,
            label: Some("mean".to_owned()),
        });
    }

    Ok(y_scale)
}

fn push_scatter<T>(
    primitives: &mut Vec<Primitive>,
    dataset: &[T],
    accessors: &ChartAccessors<'_, T>,
    config: &ChartConfig,
    (x_scale, y_scale, color_scale): (Scale, Scale, Option<Scale>),
) -> ChartResult<()> {
    let y = accessors.required_y()?;
    let encoding = match (accessors.color, color_scale) {
        (Some(accessor), Some(scale)) => Some(ColorEncoding { accessor, scale }),
        _ => None,
    };

    let points = project_scatter_points(
        dataset,
        accessors.x,
        y,
        x_scale,
        y_scale,
        encoding.as_ref(),
    );
    let ramp = config.color_ramp;
    primitives.extend(points.into_iter().map(|point| Primitive::Point {
        x: point.x,
        y: point.y,
        color: point.color_position.map(|position| ramp.at(position)),
    }));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn push_line<T>(
    primitives: &mut Vec<Primitive>,
    dataset: &[T],
    x: &dyn Accessor<T>,
    y: &dyn Accessor<T>,
    config: &ChartConfig,
    x_scale: Scale,
    y_scale: Scale,
    bounds: BoundedArea,
) {
    let band = config.line.reference_value.and_then(|value| {
        project_reference_band(y_scale, value, bounds.width, bounds.height)
    });
    if let Some(band) = band {
        primitives.push(Primitive::Bar {
            x: band.x,
            y: band.y,
            width: band.width,
            height: band.height,
        });
    }

    let vertices = project_line_vertices(dataset, x, y, x_scale, y_scale);
    primitives.extend(
        vertices
            .into_iter()
            .map(|vertex| Primitive::PathVertex {
                x: vertex.x,
                y: vertex.y,
            }),
    );
}

fn push_ticks(primitives: &mut Vec<Primitive>, axis: Axis, scale: Scale, axis_config: &AxisConfig) {
    let count = axis_config.tick_count;
    let format = scale.tick_format(count);
    primitives.extend(scale.ticks(count).into_iter().map(|value| Primitive::Tick {
        axis,
        position: scale.apply(value),
        value,
        label: format.format(value),
    }));
}

fn push_axis_titles(
    primitives: &mut Vec<Primitive>,
    metadata: &mut IndexMap<String, String>,
    config: &ChartConfig,
    bounds: BoundedArea,
) {
    let Margins { bottom, left, .. } = config.margins;

    if let Some(title) = config.x_axis.title.as_ref().filter(|t| !t.is_empty()) {
        metadata.insert("x_title".to_owned(), title.clone());
        primitives.push(Primitive::Label {
            x: bounds.width * 0.5,
            y: bounds.height + bottom - AXIS_TITLE_INSET_PX,
            text: title.clone(),
            anchor: TextAnchor::Middle,
        });
    }

    // Rendered rotated by backends; the anchor is the centre of the text run.
    if let Some(title) = config.y_axis.title.as_ref().filter(|t| !t.is_empty()) {
        metadata.insert("y_title".to_owned(), title.clone());
        primitives.push(Primitive::Label {
            x: -left + AXIS_TITLE_INSET_PX,
            y: bounds.height * 0.5,
            text: title.clone(),
            anchor: TextAnchor::Middle,
        });
    }
}
