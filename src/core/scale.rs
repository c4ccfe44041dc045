use serde::{Deserialize, Serialize};

use crate::core::primitives::format_decimal;
use crate::core::ticks::{
    calendar_ticks, format_calendar_tick, linear_ticks, nice_calendar, nice_linear,
    step_precision, tick_step,
};
use crate::core::{Domain, PixelRange, Scalar, ScalarKind};
use crate::error::ChartResult;

/// Tick count used when rounding a domain to nice bounds.
pub const NICE_TICK_COUNT: usize = 10;

/// Interpolation family of a scale, derived from its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    /// Numeric domain, 1/2/5 × 10ⁿ ticks.
    #[default]
    Linear,
    /// Time domain interpolated on epoch milliseconds, calendar ticks.
    Temporal,
}

impl From<ScalarKind> for ScaleKind {
    fn from(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Number => Self::Linear,
            ScalarKind::Time => Self::Temporal,
        }
    }
}

/// Immutable domain-to-pixel mapping.
///
/// `apply(domain.min) == range.low` and `apply(domain.max) == range.high`.
/// A degenerate domain (`min == max`) maps every value to the range midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    kind: ScaleKind,
    domain: Domain,
    range: PixelRange,
    nice: bool,
    #[serde(default)]
    clamp: bool,
}

impl Scale {
    /// Builds a scale, widening the domain to nice bounds when `nice` is set.
    pub fn new(domain: Domain, range: PixelRange, nice: bool) -> ChartResult<Self> {
        let kind = ScaleKind::from(domain.kind());
        let domain = if nice && !domain.is_degenerate() {
            nice_domain(domain)?
        } else {
            domain
        };

        Ok(Self {
            kind,
            domain,
            range,
            nice,
            clamp: false,
        })
    }

    /// Plain linear scale without nice rounding.
    pub fn linear(domain_min: f64, domain_max: f64, range_low: f64, range_high: f64) -> ChartResult<Self> {
        Self::new(
            Domain::numeric(domain_min, domain_max)?,
            PixelRange::new(range_low, range_high)?,
            false,
        )
    }

    /// Clamped variant: inputs outside the domain map to the nearest range
    /// endpoint instead of extrapolating.
    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> PixelRange {
        self.range
    }

    #[must_use]
    pub fn is_nice(self) -> bool {
        self.nice
    }

    #[must_use]
    pub fn is_clamped(self) -> bool {
        self.clamp
    }

    #[must_use]
    pub fn apply(self, value: Scalar) -> f64 {
        self.apply_f64(value.as_f64())
    }

    /// Maps a raw numeric position (epoch millis for temporal scales).
    #[must_use]
    pub fn apply_f64(self, value: f64) -> f64 {
        let (d0, d1) = self.domain.bounds();
        let span = d1 - d0;
        if span == 0.0 {
            return self.range.midpoint();
        }
        let mut t = (value - d0) / span;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.range.low + t * self.range.span()
    }

    /// Inverse of `apply`. A degenerate domain inverts to its minimum.
    pub fn invert(self, pixel: f64) -> ChartResult<Scalar> {
        Scalar::from_f64(self.domain.kind(), self.invert_f64(pixel))
    }

    #[must_use]
    pub fn invert_f64(self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain.bounds();
        let range_span = self.range.span();
        if d1 == d0 || range_span == 0.0 {
            return d0;
        }
        let mut t = (pixel - self.range.low) / range_span;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        d0 + t * (d1 - d0)
    }

    /// Human-friendly tick values inside the domain, about `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<Scalar> {
        match (self.domain.min(), self.domain.max()) {
            (Scalar::Time(start), Scalar::Time(stop)) => calendar_ticks(start, stop, count)
                .into_iter()
                .map(Scalar::Time)
                .collect(),
            (start, stop) => linear_ticks(start.as_f64(), stop.as_f64(), count)
                .into_iter()
                .map(Scalar::Number)
                .collect(),
        }
    }

    /// Label format matching `ticks(count)`.
    #[must_use]
    pub fn tick_format(self, count: usize) -> TickFormat {
        match self.kind {
            ScaleKind::Temporal => TickFormat::Calendar,
            ScaleKind::Linear => {
                let (d0, d1) = self.domain.bounds();
                TickFormat::Decimal {
                    precision: step_precision(tick_step(d0, d1, count)),
                }
            }
        }
    }
}

fn nice_domain(domain: Domain) -> ChartResult<Domain> {
    match (domain.min(), domain.max()) {
        (Scalar::Time(start), Scalar::Time(stop)) => {
            let (lo, hi) = nice_calendar(start, stop, NICE_TICK_COUNT);
            Domain::temporal(lo, hi)
        }
        (start, stop) => {
            let (lo, hi) = nice_linear(start.as_f64(), stop.as_f64(), NICE_TICK_COUNT);
            Domain::numeric(lo, hi)
        }
    }
}

/// How tick values turn into label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickFormat {
    /// Fixed decimal precision derived from the tick step, with comma
    /// thousands separators.
    Decimal { precision: u32 },
    /// Coarsest calendar boundary the tick sits on (`2018`, `March`, `Mar 04`, ...).
    Calendar,
}

impl TickFormat {
    #[must_use]
    pub fn format(self, value: Scalar) -> String {
        match (self, value) {
            (_, Scalar::Time(time)) => format_calendar_tick(time),
            (Self::Decimal { precision }, Scalar::Number(number)) => {
                format_decimal(number, precision)
            }
            (Self::Calendar, Scalar::Number(number)) => format_decimal(number, 0),
        }
    }
}
