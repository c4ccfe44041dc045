use serde::{Deserialize, Serialize};

use crate::core::{CanvasSize, ChartType, Margins};
use crate::render::Color;

/// Public chart build configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Every field except `chart_type`
/// and `canvas` falls back to a default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub canvas: CanvasSize,
    #[serde(default = "default_margins")]
    pub margins: Margins,
    #[serde(default)]
    pub x_axis: AxisConfig,
    #[serde(default)]
    pub y_axis: AxisConfig,
    #[serde(default)]
    pub histogram: HistogramConfig,
    #[serde(default)]
    pub line: LineConfig,
    #[serde(default)]
    pub color_ramp: ColorRamp,
}

impl ChartConfig {
    /// Creates a config with default margins, axes and per-chart settings.
    #[must_use]
    pub fn new(chart_type: ChartType, canvas: CanvasSize) -> Self {
        Self {
            chart_type,
            canvas,
            margins: default_margins(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            histogram: HistogramConfig::default(),
            line: LineConfig::default(),
            color_ramp: ColorRamp::default(),
        }
    }

    /// Humidity distribution: 600×360 canvas, 12 bins, mean marker.
    #[must_use]
    pub fn humidity_histogram() -> Self {
        Self::new(ChartType::Histogram, CanvasSize::new(600.0, 600.0 * 0.6))
            .with_margins(Margins::new(30.0, 10.0, 50.0, 50.0))
            .with_x_axis(AxisConfig::default().with_title("Humidity"))
    }

    /// Dew point against humidity on a square canvas, colored by cloud cover.
    #[must_use]
    pub fn dew_point_scatter(width: f64) -> Self {
        Self::new(ChartType::Scatter, CanvasSize::new(width, width))
            .with_margins(Margins::new(10.0, 10.0, 50.0, 50.0))
            .with_x_axis(AxisConfig::default().with_title("Dew Point (°F)"))
            .with_y_axis(
                AxisConfig::default()
                    .with_tick_count(4)
                    .with_title("Relative humidity"),
            )
    }

    /// Daily maximum temperature over time with a band below freezing.
    #[must_use]
    pub fn max_temperature_line(width: f64) -> Self {
        Self::new(ChartType::Line, CanvasSize::new(width, 400.0))
            .with_margins(Margins::new(15.0, 15.0, 40.0, 60.0))
            .with_line(LineConfig {
                reference_value: Some(FREEZING_FAHRENHEIT),
            })
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    #[must_use]
    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = canvas;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use]
    pub fn with_histogram(mut self, histogram: HistogramConfig) -> Self {
        self.histogram = histogram;
        self
    }

    /// Sets the number of equal-width histogram bins.
    #[must_use]
    pub fn with_threshold_count(mut self, threshold_count: usize) -> Self {
        self.histogram.threshold_count = threshold_count;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LineConfig) -> Self {
        self.line = line;
        self
    }

    /// Sets or clears the line chart reference band value.
    #[must_use]
    pub fn with_reference_value(mut self, reference_value: Option<f64>) -> Self {
        self.line.reference_value = reference_value;
        self
    }

    #[must_use]
    pub fn with_color_ramp(mut self, color_ramp: ColorRamp) -> Self {
        self.color_ramp = color_ramp;
        self
    }
}

/// Tick density and optional title of one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            tick_count: default_tick_count(),
            title: None,
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    #[serde(default = "default_threshold_count")]
    pub threshold_count: usize,
    /// Horizontal gap subtracted from every bar width.
    #[serde(default = "default_bar_padding")]
    pub bar_padding: f64,
    #[serde(default = "default_true")]
    pub show_counts: bool,
    #[serde(default = "default_true")]
    pub show_mean: bool,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            threshold_count: default_threshold_count(),
            bar_padding: default_bar_padding(),
            show_counts: true,
            show_mean: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    /// Value the reference band is drawn below; `None` disables the band.
    #[serde(default = "default_reference_value")]
    pub reference_value: Option<f64>,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            reference_value: default_reference_value(),
        }
    }
}

/// Two-stop color interpolation for scatter color encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    #[serde(default = "default_ramp_start")]
    pub start: Color,
    #[serde(default = "default_ramp_end")]
    pub end: Color,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            start: default_ramp_start(),
            end: default_ramp_end(),
        }
    }
}

impl ColorRamp {
    #[must_use]
    pub fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }

    /// Color at `position` in `[0, 1]`; out-of-range positions are clamped.
    #[must_use]
    pub fn at(self, position: f64) -> Color {
        self.start.lerp(self.end, position)
    }
}

const FREEZING_FAHRENHEIT: f64 = 32.0;

fn default_margins() -> Margins {
    Margins::new(10.0, 10.0, 50.0, 50.0)
}

fn default_tick_count() -> usize {
    10
}

fn default_threshold_count() -> usize {
    12
}

fn default_bar_padding() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_reference_value() -> Option<f64> {
    Some(FREEZING_FAHRENHEIT)
}

fn default_ramp_start() -> Color {
    Color::SKY_BLUE
}

fn default_ramp_end() -> Color {
    Color::DARK_SLATE_GREY
}
