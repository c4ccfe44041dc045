//! Step-sequence utilities behind "nice" domains and tick values.
//!
//! Linear steps follow the 1/2/5 × 10ⁿ sequence. Temporal steps walk a fixed
//! ladder of calendar intervals in UTC and fall back to whole years.

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, Timelike, Utc};

const E10: f64 = 7.071_067_811_865_475_5; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

const MAX_TICKS: usize = 10_000;
const NICE_ITERATIONS: usize = 10;

/// Tick step for roughly `count` ticks over `[start, stop]`.
///
/// Returns `0.0` when no step exists (empty or non-finite span).
pub(crate) fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = raw.log10().floor();
    let base = 10_f64.powf(power);
    let error = raw / base;
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Fractional digits needed to print multiples of `step` exactly.
pub(crate) fn step_precision(step: f64) -> u32 {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).clamp(0.0, 20.0) as u32
}

/// Integer multiples of `step` for values below one are computed as
/// `index / inverse` so decimal steps stay exact.
#[derive(Debug, Clone, Copy)]
enum StepUnit {
    Multiply(f64),
    Divide(f64),
}

impl StepUnit {
    fn of(step: f64) -> Self {
        if step >= 1.0 {
            Self::Multiply(step)
        } else {
            Self::Divide((1.0 / step).round())
        }
    }

    fn index(self, value: f64) -> f64 {
        match self {
            Self::Multiply(step) => value / step,
            Self::Divide(inverse) => value * inverse,
        }
    }

    fn value(self, index: f64) -> f64 {
        match self {
            Self::Multiply(step) => index * step,
            Self::Divide(inverse) => index / inverse,
        }
    }
}

/// Ascending 1/2/5 × 10ⁿ tick values inside `[start, stop]`.
pub(crate) fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop {
        (start, stop)
    } else {
        (stop, start)
    };
    let step = tick_step(lo, hi, count);
    if step == 0.0 {
        return Vec::new();
    }

    let unit = StepUnit::of(step);
    let mut first = unit.index(lo).round();
    if unit.value(first) < lo {
        first += 1.0;
    }
    let mut last = unit.index(hi).round();
    if unit.value(last) > hi {
        last -= 1.0;
    }
    if last < first {
        return Vec::new();
    }

    let n = ((last - first) as usize).min(MAX_TICKS);
    (0..=n).map(|i| unit.value(first + i as f64)).collect()
}

/// Expands `[start, stop]` outward to multiples of the tick step, repeating
/// until the step stops changing.
pub(crate) fn nice_linear(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let (mut lo, mut hi) = (start, stop);
    let mut previous_step = None;
    for _ in 0..NICE_ITERATIONS {
        let step = tick_step(lo, hi, count);
        if step == 0.0 || previous_step == Some(step) {
            break;
        }
        let unit = StepUnit::of(step);
        lo = unit.value(unit.index(lo).floor());
        hi = unit.value(unit.index(hi).ceil());
        previous_step = Some(step);
    }
    (lo, hi)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CalendarUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl CalendarUnit {
    fn approx_millis(self) -> f64 {
        const SECOND: f64 = 1_000.0;
        match self {
            Self::Second => SECOND,
            Self::Minute => 60.0 * SECOND,
            Self::Hour => 3_600.0 * SECOND,
            Self::Day => 86_400.0 * SECOND,
            Self::Week => 7.0 * 86_400.0 * SECOND,
            Self::Month => 30.0 * 86_400.0 * SECOND,
            Self::Year => 365.0 * 86_400.0 * SECOND,
        }
    }
}

/// One rung of the calendar step ladder, e.g. "every 3 months".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CalendarInterval {
    pub(crate) unit: CalendarUnit,
    pub(crate) step: u32,
}

const fn every(unit: CalendarUnit, step: u32) -> CalendarInterval {
    CalendarInterval { unit, step }
}

const CALENDAR_LADDER: [CalendarInterval; 17] = [
    every(CalendarUnit::Second, 1),
    every(CalendarUnit::Second, 5),
    every(CalendarUnit::Second, 15),
    every(CalendarUnit::Second, 30),
    every(CalendarUnit::Minute, 1),
    every(CalendarUnit::Minute, 5),
    every(CalendarUnit::Minute, 15),
    every(CalendarUnit::Minute, 30),
    every(CalendarUnit::Hour, 1),
    every(CalendarUnit::Hour, 3),
    every(CalendarUnit::Hour, 6),
    every(CalendarUnit::Hour, 12),
    every(CalendarUnit::Day, 1),
    every(CalendarUnit::Day, 2),
    every(CalendarUnit::Week, 1),
    every(CalendarUnit::Month, 1),
    every(CalendarUnit::Month, 3),
];

impl CalendarInterval {
    fn approx_millis(self) -> f64 {
        self.unit.approx_millis() * f64::from(self.step)
    }

    /// Picks the ladder rung whose duration is closest to `span / count`.
    pub(crate) fn for_span(start: DateTime<Utc>, stop: DateTime<Utc>, count: usize) -> Self {
        let span = (stop - start).num_milliseconds().unsigned_abs() as f64;
        let target = span / count.max(1) as f64;

        let index = CALENDAR_LADDER.partition_point(|interval| interval.approx_millis() <= target);
        if index == 0 {
            return CALENDAR_LADDER[0];
        }
        if index == CALENDAR_LADDER.len() {
            let year = CalendarUnit::Year.approx_millis();
            let years = tick_step(0.0, span / year, count).max(1.0);
            return every(CalendarUnit::Year, years.min(f64::from(u32::MAX)) as u32);
        }

        let below = CALENDAR_LADDER[index - 1];
        let above = CALENDAR_LADDER[index];
        if target / below.approx_millis() < above.approx_millis() / target {
            below
        } else {
            above
        }
    }

    /// Latest interval boundary at or before `time`.
    pub(crate) fn floor(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let step = i64::from(self.step);
        match self.unit {
            CalendarUnit::Second | CalendarUnit::Minute | CalendarUnit::Hour => {
                let width = (self.unit.approx_millis() as i64) * step;
                let millis = time.timestamp_millis();
                DateTime::<Utc>::from_timestamp_millis(millis - millis.rem_euclid(width))
            }
            CalendarUnit::Day => {
                let day0 = i64::from(time.day0());
                let midnight = start_of_day(time.date_naive())?;
                midnight.checked_sub_signed(TimeDelta::days(day0 % step))
            }
            CalendarUnit::Week => {
                let back = i64::from(time.weekday().num_days_from_sunday());
                start_of_day(time.date_naive())?.checked_sub_signed(TimeDelta::days(back))
            }
            CalendarUnit::Month => {
                let month0 = time.month0() - time.month0() % self.step;
                start_of_day(NaiveDate::from_ymd_opt(time.year(), month0 + 1, 1)?)
            }
            CalendarUnit::Year => {
                let step = i32::try_from(self.step).unwrap_or(i32::MAX);
                let year = time.year() - time.year().rem_euclid(step);
                start_of_day(NaiveDate::from_ymd_opt(year, 1, 1)?)
            }
        }
    }

    /// Earliest interval boundary at or after `time`.
    pub(crate) fn ceil(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let floored = self.floor(time)?;
        if floored == time {
            Some(floored)
        } else {
            self.next(floored)
        }
    }

    /// Boundary following `time`, which must itself be a boundary.
    pub(crate) fn next(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let step = i64::from(self.step);
        let advanced = match self.unit {
            CalendarUnit::Second => time.checked_add_signed(TimeDelta::seconds(step)),
            CalendarUnit::Minute => time.checked_add_signed(TimeDelta::minutes(step)),
            CalendarUnit::Hour => time.checked_add_signed(TimeDelta::hours(step)),
            CalendarUnit::Day => time.checked_add_signed(TimeDelta::days(step)),
            CalendarUnit::Week => time.checked_add_signed(TimeDelta::weeks(step)),
            CalendarUnit::Month => time.checked_add_months(Months::new(self.step)),
            CalendarUnit::Year => time.checked_add_months(Months::new(self.step.saturating_mul(12))),
        }?;
        // Day steps restart at the first of each month.
        self.floor(advanced)
    }
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// Ascending calendar-aligned tick times inside `[start, stop]`.
pub(crate) fn calendar_ticks(
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
    count: usize,
) -> Vec<DateTime<Utc>> {
    if count == 0 {
        return Vec::new();
    }
    let (lo, hi) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    let interval = CalendarInterval::for_span(lo, hi, count);

    let mut ticks = Vec::new();
    let mut cursor = interval.ceil(lo);
    while let Some(time) = cursor {
        if time > hi || ticks.len() >= MAX_TICKS {
            break;
        }
        ticks.push(time);
        cursor = interval.next(time);
    }
    ticks
}

/// Widens `[start, stop]` to the enclosing calendar boundaries.
pub(crate) fn nice_calendar(
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
    count: usize,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let interval = CalendarInterval::for_span(start, stop, count);
    let lo = interval.floor(start).unwrap_or(start);
    let hi = interval.ceil(stop).unwrap_or(stop);
    (lo, hi)
}

/// Label for a temporal tick, chosen by the coarsest boundary it sits on.
pub(crate) fn format_calendar_tick(time: DateTime<Utc>) -> String {
    let pattern = if time.nanosecond() != 0 {
        ".%3f"
    } else if time.second() != 0 {
        ":%S"
    } else if time.minute() != 0 {
        "%I:%M"
    } else if time.hour() != 0 {
        "%I %p"
    } else if time.day() != 1 {
        if time.weekday().num_days_from_sunday() != 0 {
            "%a %d"
        } else {
            "%b %d"
        }
    } else if time.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    time.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::{
        CalendarInterval, CalendarUnit, calendar_ticks, format_calendar_tick, linear_ticks,
        nice_calendar, nice_linear, step_precision, tick_step,
    };

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().expect("valid date")
    }

    #[test]
    fn tick_step_follows_one_two_five_sequence() {
        assert_eq!(tick_step(0.0, 10.0, 10), 1.0);
        assert_eq!(tick_step(0.0, 100.0, 10), 10.0);
        assert_eq!(tick_step(0.0, 1.0, 4), 0.2);
        assert_eq!(tick_step(0.0, 47.0, 10), 5.0);
        assert_eq!(tick_step(3.0, 3.0, 10), 0.0);
    }

    #[test]
    fn linear_ticks_use_exact_decimal_multiples() {
        let ticks = linear_ticks(0.0, 1.0, 5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn linear_ticks_stay_inside_the_domain() {
        let ticks = linear_ticks(0.27, 0.96, 10);
        assert_eq!(ticks.first().copied(), Some(0.3));
        assert_eq!(ticks.last().copied(), Some(0.95));
    }

    #[test]
    fn nice_linear_rounds_outward() {
        assert_eq!(nice_linear(0.27, 0.96, 10), (0.2, 1.0));
        assert_eq!(nice_linear(3.0, 97.0, 10), (0.0, 100.0));
        assert_eq!(nice_linear(-7.0, 12.0, 10), (-8.0, 12.0));
    }

    #[test]
    fn precision_tracks_step_magnitude() {
        assert_eq!(step_precision(5.0), 0);
        assert_eq!(step_precision(0.5), 1);
        assert_eq!(step_precision(0.02), 2);
    }

    #[test]
    fn calendar_interval_prefers_months_for_a_year_of_days() {
        let interval = CalendarInterval::for_span(utc(2018, 1, 1), utc(2018, 12, 31), 10);
        assert_eq!(interval.unit, CalendarUnit::Month);
        assert_eq!(interval.step, 1);
    }

    #[test]
    fn calendar_ticks_land_on_month_starts() {
        let ticks = calendar_ticks(utc(2018, 1, 15), utc(2018, 6, 20), 5);
        assert_eq!(
            ticks,
            vec![utc(2018, 2, 1), utc(2018, 3, 1), utc(2018, 4, 1), utc(2018, 5, 1), utc(2018, 6, 1)]
        );
    }

    #[test]
    fn two_day_ticks_restart_each_month() {
        let interval = CalendarInterval {
            unit: CalendarUnit::Day,
            step: 2,
        };
        assert_eq!(interval.next(utc(2018, 1, 31)), Some(utc(2018, 2, 1)));
        assert_eq!(interval.floor(utc(2018, 1, 4)), Some(utc(2018, 1, 3)));
    }

    #[test]
    fn nice_calendar_widens_to_boundaries() {
        let (lo, hi) = nice_calendar(utc(2018, 1, 15), utc(2018, 12, 20), 10);
        assert_eq!(lo, utc(2018, 1, 1));
        assert_eq!(hi, utc(2019, 1, 1));
    }

    #[test]
    fn calendar_labels_pick_the_coarsest_boundary() {
        assert_eq!(format_calendar_tick(utc(2018, 1, 1)), "2018");
        assert_eq!(format_calendar_tick(utc(2018, 3, 1)), "March");
        assert_eq!(format_calendar_tick(utc(2018, 3, 4)), "Mar 04");
        assert_eq!(format_calendar_tick(utc(2018, 3, 5)), "Mon 05");
        let noon = Utc
            .with_ymd_and_hms(2018, 3, 5, 12, 0, 0)
            .single()
            .expect("valid time");
        assert_eq!(format_calendar_tick(noon), "12 PM");
    }
}
