use approx::assert_relative_eq;
use chart_geometry::ChartError;
use chart_geometry::core::{
    Accessor, FieldAccessor, JsonFieldAccessor, Scalar, ScalarKind, extent, mean,
    primitives::parse_calendar_date,
};
use serde_json::json;

#[derive(Debug, Clone, Copy)]
struct Reading {
    humidity: Option<f64>,
}

fn readings(values: &[Option<f64>]) -> Vec<Reading> {
    values
        .iter()
        .map(|humidity| Reading {
            humidity: *humidity,
        })
        .collect()
}

fn humidity() -> impl Accessor<Reading> {
    FieldAccessor::new("humidity", |r: &Reading| r.humidity.map(Scalar::Number))
}

#[test]
fn extent_returns_min_and_max() {
    let data = readings(&[Some(0.61), Some(0.35), Some(0.93), Some(0.5)]);
    let domain = extent(&data, &humidity()).expect("extent");

    assert_eq!(domain.min(), Scalar::Number(0.35));
    assert_eq!(domain.max(), Scalar::Number(0.93));
    assert_eq!(domain.kind(), ScalarKind::Number);
}

#[test]
fn extent_skips_undefined_and_non_finite_values() {
    let data = readings(&[None, Some(f64::NAN), Some(4.0), Some(f64::INFINITY), Some(-2.0)]);
    let domain = extent(&data, &humidity()).expect("extent");

    assert_eq!(domain.bounds(), (-2.0, 4.0));
}

#[test]
fn extent_of_single_value_is_degenerate() {
    let data = readings(&[Some(7.0)]);
    let domain = extent(&data, &humidity()).expect("extent");

    assert!(domain.is_degenerate());
}

#[test]
fn extent_rejects_empty_dataset() {
    let err = extent(&[] as &[Reading], &humidity()).expect_err("empty must fail");
    assert!(matches!(err, ChartError::EmptyDataset));
}

#[test]
fn extent_rejects_dataset_without_comparable_values() {
    let data = readings(&[None, Some(f64::NAN)]);
    let err = extent(&data, &humidity()).expect_err("must fail");

    match err {
        ChartError::AccessorType { accessor } => assert_eq!(accessor, "humidity"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn extent_rejects_mixed_scalar_kinds() {
    let records = vec![json!({"v": 3.0}), json!({"v": "2018-01-01"})];
    let err = extent(&records, &JsonFieldAccessor::new("v")).expect_err("must fail");

    assert!(matches!(err, ChartError::AccessorType { .. }));
}

#[test]
fn extent_over_json_dates_is_temporal() {
    let records = vec![
        json!({"date": "2018-03-02"}),
        json!({"date": "2018-01-01"}),
        json!({"date": "2018-12-31"}),
    ];
    let domain = extent(&records, &JsonFieldAccessor::new("date")).expect("extent");

    assert_eq!(domain.kind(), ScalarKind::Time);
    assert_eq!(
        domain.min(),
        Scalar::Time(parse_calendar_date("2018-01-01").expect("date"))
    );
    assert_eq!(
        domain.max(),
        Scalar::Time(parse_calendar_date("2018-12-31").expect("date"))
    );
}

#[test]
fn closures_work_as_accessors() {
    let values = [3.0_f64, 9.0, 6.0];
    let accessor = |v: &f64| Some(Scalar::Number(*v));
    let domain = extent(&values, &accessor).expect("extent");

    assert_eq!(domain.bounds(), (3.0, 9.0));
}

#[test]
fn mean_averages_defined_values() {
    let data = readings(&[Some(10.0), None, Some(20.0), Some(30.0), Some(90.0)]);
    let value = mean(&data, &humidity()).expect("mean");

    assert_eq!(value, Scalar::Number(37.5));
}

#[test]
fn mean_of_large_finite_values_stays_finite() {
    let data = readings(&[Some(1e308), Some(1.5e308)]);
    let value = mean(&data, &humidity()).expect("mean");

    let Scalar::Number(value) = value else {
        panic!("expected a number, got {value:?}");
    };
    assert_relative_eq!(value, 1.25e308, max_relative = 1e-12);

    let data = readings(&[Some(-1e308), Some(1e308)]);
    assert_eq!(mean(&data, &humidity()).expect("mean"), Scalar::Number(0.0));
}

#[test]
fn extent_rejects_a_span_that_overflows() {
    let data = readings(&[Some(-1e308), Some(1e308)]);
    let err = extent(&data, &humidity()).expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn mean_of_dates_is_a_date() {
    let records = vec![json!({"date": "2018-01-01"}), json!({"date": "2018-01-03"})];
    let value = mean(&records, &JsonFieldAccessor::new("date")).expect("mean");

    assert_eq!(
        value,
        Scalar::Time(parse_calendar_date("2018-01-02").expect("date"))
    );
}
