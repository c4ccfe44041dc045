use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::error::{ChartError, ChartResult};

/// Whether a scalar is a plain number or a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Number,
    Time,
}

/// A value produced by an accessor.
///
/// Temporal values take part in arithmetic as milliseconds since the Unix
/// epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Scalar {
    Number(f64),
    Time(DateTime<Utc>),
}

impl Scalar {
    #[must_use]
    pub fn kind(self) -> ScalarKind {
        match self {
            Self::Number(_) => ScalarKind::Number,
            Self::Time(_) => ScalarKind::Time,
        }
    }

    /// Numeric position of the value: the number itself, or epoch millis.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Time(time) => datetime_to_unix_millis(time),
        }
    }

    pub fn from_f64(kind: ScalarKind, value: f64) -> ChartResult<Self> {
        match kind {
            ScalarKind::Number => Ok(Self::Number(value)),
            ScalarKind::Time => unix_millis_to_datetime(value).map(Self::Time),
        }
    }

    #[must_use]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Time(_) => None,
        }
    }

    #[must_use]
    pub fn as_time(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Number(_) => None,
            Self::Time(time) => Some(time),
        }
    }

    /// `NaN` and infinities cannot be ordered against other values.
    #[must_use]
    pub fn is_comparable(self) -> bool {
        match self {
            Self::Number(value) => value.is_finite(),
            Self::Time(_) => true,
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left.partial_cmp(right),
            (Self::Time(left), Self::Time(right)) => left.partial_cmp(right),
            _ => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

/// Ordered `(min, max)` input interval of a scale.
///
/// Deserialization goes through [`Domain::new`], so loaded domains hold the
/// same guarantees as constructed ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DomainBounds")]
pub struct Domain {
    min: Scalar,
    max: Scalar,
}

#[derive(Deserialize)]
struct DomainBounds {
    min: Scalar,
    max: Scalar,
}

impl TryFrom<DomainBounds> for Domain {
    type Error = ChartError;

    fn try_from(bounds: DomainBounds) -> ChartResult<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl Domain {
    pub fn new(min: Scalar, max: Scalar) -> ChartResult<Self> {
        if min.kind() != max.kind() {
            return Err(ChartError::InvalidData(
                "domain bounds must share the same scalar kind".to_owned(),
            ));
        }
        if !min.is_comparable() || !max.is_comparable() {
            return Err(ChartError::InvalidData(
                "domain bounds must be finite".to_owned(),
            ));
        }
        if min.as_f64() > max.as_f64() {
            return Err(ChartError::InvalidData(
                "domain min must be <= domain max".to_owned(),
            ));
        }
        // Bounds like (-1e308, 1e308) are finite but their span is not.
        if !(max.as_f64() - min.as_f64()).is_finite() {
            return Err(ChartError::InvalidData(
                "domain span must be finite".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn numeric(min: f64, max: f64) -> ChartResult<Self> {
        Self::new(Scalar::Number(min), Scalar::Number(max))
    }

    pub fn temporal(min: DateTime<Utc>, max: DateTime<Utc>) -> ChartResult<Self> {
        Self::new(Scalar::Time(min), Scalar::Time(max))
    }

    pub(crate) fn from_f64(kind: ScalarKind, min: f64, max: f64) -> ChartResult<Self> {
        Self::new(Scalar::from_f64(kind, min)?, Scalar::from_f64(kind, max)?)
    }

    #[must_use]
    pub fn min(self) -> Scalar {
        self.min
    }

    #[must_use]
    pub fn max(self) -> Scalar {
        self.max
    }

    #[must_use]
    pub fn kind(self) -> ScalarKind {
        self.min.kind()
    }

    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.min.as_f64(), self.max.as_f64())
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max.as_f64() - self.min.as_f64()
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.span() == 0.0
    }

    /// Closed-interval membership on the numeric position.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (min, max) = self.bounds();
        value >= min && value <= max
    }
}

/// Output pixel interval of a scale. `low > high` flips the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub low: f64,
    pub high: f64,
}

impl PixelRange {
    pub fn new(low: f64, high: f64) -> ChartResult<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ChartError::InvalidData(
                "pixel range must be finite".to_owned(),
            ));
        }
        Ok(Self { low, high })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.high - self.low
    }

    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.low + self.high) * 0.5
    }

    #[must_use]
    pub fn is_inverted(self) -> bool {
        self.low > self.high
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.low.min(self.high)
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.low.max(self.high)
    }
}

/// Full drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Drawing region left inside `margins`.
    pub fn bounded(self, margins: Margins) -> ChartResult<BoundedArea> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(ChartError::InvalidData(
                "canvas size must be finite".to_owned(),
            ));
        }
        margins.validate()?;

        let width = self.width - margins.left - margins.right;
        let height = self.height - margins.top - margins.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::DegenerateCanvas { width, height });
        }

        Ok(BoundedArea {
            offset_x: margins.left,
            offset_y: margins.top,
            width,
            height,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    fn validate(self) -> ChartResult<()> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Drawing region inside the margins.
///
/// Primitive coordinates are relative to its top-left corner; `offset_*`
/// locates that corner on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedArea {
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Chart family a geometry build dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    /// Equal-width bins of the x accessor, bar height = member count.
    Histogram,
    /// One point per record, optionally colored.
    Scatter,
    /// One polyline through the records in dataset order.
    Line,
}
