use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> ChartResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(ChartError::InvalidData(
            "temporal value must be finite".to_owned(),
        ));
    }
    let rounded = millis.round();
    if rounded > (i64::MAX as f64) || rounded < (i64::MIN as f64) {
        return Err(ChartError::InvalidData(format!(
            "temporal value {millis} is out of range"
        )));
    }
    DateTime::<Utc>::from_timestamp_millis(rounded as i64).ok_or_else(|| {
        ChartError::InvalidData(format!("temporal value {millis} is out of range"))
    })
}

/// Parses a `YYYY-MM-DD` calendar date as midnight UTC.
pub fn parse_calendar_date(input: &str) -> ChartResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        ChartError::InvalidData(format!("invalid calendar date `{input}`: {e}"))
    })?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ChartError::InvalidData(format!("invalid calendar date `{input}`")))
}

/// Formats `value` with exactly `precision` fractional digits and comma
/// thousands separators, e.g. `1,000.0` for precision 1.
///
/// Goes through `Decimal` so values like `0.1 + 0.2` print as `0.3`.
#[must_use]
pub fn format_decimal(value: f64, precision: u32) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let fixed = match Decimal::from_f64(value) {
        Some(decimal) => {
            let mut rounded = decimal.round_dp(precision);
            rounded.rescale(precision);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        // Outside the `Decimal` range.
        None => format!("{value:.prec$}", prec = precision as usize),
    };
    group_thousands(&fixed)
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(fixed.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
