use std::fmt;

use serde_json::Value;

use crate::core::Scalar;
use crate::core::primitives::parse_calendar_date;

/// Projection of a dataset record onto a scalar.
///
/// Implementations must be deterministic and side-effect free. `None` marks
/// the value as undefined for that record.
pub trait Accessor<T: ?Sized> {
    fn extract(&self, record: &T) -> Option<Scalar>;

    /// Name used in logs and error messages.
    fn name(&self) -> &str {
        "value"
    }
}

impl<T: ?Sized, F> Accessor<T> for F
where
    F: Fn(&T) -> Option<Scalar>,
{
    fn extract(&self, record: &T) -> Option<Scalar> {
        self(record)
    }
}

/// Closure accessor carrying the field name it projects.
pub struct FieldAccessor<F> {
    name: String,
    extract: F,
}

impl<F> FieldAccessor<F> {
    pub fn new(name: impl Into<String>, extract: F) -> Self {
        Self {
            name: name.into(),
            extract,
        }
    }
}

impl<F> fmt::Debug for FieldAccessor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized, F> Accessor<T> for FieldAccessor<F>
where
    F: Fn(&T) -> Option<Scalar>,
{
    fn extract(&self, record: &T) -> Option<Scalar> {
        (self.extract)(record)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Reads one field of a JSON object record.
///
/// Numbers become `Scalar::Number`. Strings in `YYYY-MM-DD` form become
/// `Scalar::Time` at midnight UTC. Anything else is undefined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFieldAccessor {
    field: String,
}

impl JsonFieldAccessor {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Accessor<Value> for JsonFieldAccessor {
    fn extract(&self, record: &Value) -> Option<Scalar> {
        match record.get(&self.field)? {
            Value::Number(number) => number.as_f64().map(Scalar::Number),
            Value::String(text) => parse_calendar_date(text).ok().map(Scalar::Time),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Accessor, FieldAccessor, JsonFieldAccessor};
    use crate::core::{Scalar, ScalarKind};

    #[test]
    fn json_accessor_reads_numbers_and_dates() {
        let record = json!({"humidity": 0.81, "date": "2018-01-01", "summary": "Rain"});

        let humidity = JsonFieldAccessor::new("humidity");
        assert_eq!(humidity.extract(&record), Some(Scalar::Number(0.81)));

        let date = JsonFieldAccessor::new("date");
        let value = date.extract(&record).expect("date value");
        assert_eq!(value.kind(), ScalarKind::Time);

        assert_eq!(JsonFieldAccessor::new("summary").extract(&record), None);
        assert_eq!(JsonFieldAccessor::new("missing").extract(&record), None);
    }

    #[test]
    fn field_accessor_reports_its_name() {
        let accessor = FieldAccessor::new("h", |value: &f64| Some(Scalar::Number(*value)));
        assert_eq!(accessor.name(), "h");
        assert_eq!(accessor.extract(&3.0), Some(Scalar::Number(3.0)));
    }
}
