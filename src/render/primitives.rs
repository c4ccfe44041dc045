use serde::{Deserialize, Serialize};

use crate::core::Scalar;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const SKY_BLUE: Self = Self::rgb8(135, 206, 235);
    pub const DARK_SLATE_GREY: Self = Self::rgb8(47, 79, 79);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(red as f64 / 255.0, green as f64 / 255.0, blue as f64 / 255.0)
    }

    /// Channel-wise interpolation; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Axis a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// Horizontal text alignment relative to the label anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// One draw instruction in bounded-area pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Point {
        x: f64,
        y: f64,
        color: Option<Color>,
    },
    Bar {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Consecutive vertices form one polyline.
    PathVertex { x: f64, y: f64 },
    Tick {
        axis: Axis,
        position: f64,
        value: Scalar,
        label: String,
    },
    /// Straight marker line, e.g. the histogram mean.
    Rule {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        label: Option<String>,
    },
    Label {
        x: f64,
        y: f64,
        text: String,
        anchor: TextAnchor,
    },
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Point { x, y, color } => {
                finite("point", &[*x, *y])?;
                color.map_or(Ok(()), Color::validate)
            }
            Self::Bar {
                x,
                y,
                width,
                height,
            } => {
                finite("bar", &[*x, *y, *width, *height])?;
                if *width < 0.0 || *height < 0.0 {
                    return Err(ChartError::InvalidData(
                        "bar width and height must be >= 0".to_owned(),
                    ));
                }
                Ok(())
            }
            Self::PathVertex { x, y } => finite("path vertex", &[*x, *y]),
            Self::Tick {
                position, label, ..
            } => {
                finite("tick", &[*position])?;
                non_empty("tick label", label)
            }
            Self::Rule { x1, y1, x2, y2, .. } => finite("rule", &[*x1, *y1, *x2, *y2]),
            Self::Label { x, y, text, .. } => {
                finite("label", &[*x, *y])?;
                non_empty("label text", text)
            }
        }
    }
}

fn finite(kind: &str, values: &[f64]) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{kind} coordinates must be finite"
        )))
    }
}

fn non_empty(kind: &str, text: &str) -> ChartResult<()> {
    if text.is_empty() {
        return Err(ChartError::InvalidData(format!("{kind} must not be empty")));
    }
    Ok(())
}
