use chart_geometry::ChartError;
use chart_geometry::core::{Domain, FieldAccessor, Scalar, make_bins};
use chrono::{TimeZone, Utc};

#[derive(Debug, PartialEq)]
struct Row {
    h: f64,
}

fn rows(values: &[f64]) -> Vec<Row> {
    values.iter().map(|h| Row { h: *h }).collect()
}

fn h() -> FieldAccessor<impl Fn(&Row) -> Option<Scalar>> {
    FieldAccessor::new("h", |row: &Row| Some(Scalar::Number(row.h)))
}

#[test]
fn two_bins_split_at_the_midpoint() {
    let data = rows(&[10.0, 20.0, 30.0, 90.0]);
    let domain = Domain::numeric(10.0, 90.0).expect("domain");

    let bins = make_bins(&data, &h(), domain, 2).expect("bins");

    assert_eq!(bins.len(), 2);
    assert_eq!((bins[0].lower_bound, bins[0].upper_bound), (10.0, 50.0));
    assert_eq!((bins[1].lower_bound, bins[1].upper_bound), (50.0, 90.0));

    let first: Vec<f64> = bins[0].members.iter().map(|row| row.h).collect();
    let second: Vec<f64> = bins[1].members.iter().map(|row| row.h).collect();
    assert_eq!(first, vec![10.0, 20.0, 30.0]);
    assert_eq!(second, vec![90.0]);
}

#[test]
fn empty_bins_are_kept_in_order() {
    let data = rows(&[0.5, 9.5]);
    let domain = Domain::numeric(0.0, 10.0).expect("domain");

    let bins = make_bins(&data, &h(), domain, 5).expect("bins");

    let counts: Vec<usize> = bins.iter().map(|bin| bin.len()).collect();
    assert_eq!(counts, vec![1, 0, 0, 0, 1]);
    assert!(bins.windows(2).all(|w| w[0].upper_bound == w[1].lower_bound));
}

#[test]
fn values_outside_the_domain_are_dropped() {
    let data = rows(&[-1.0, 0.0, 5.0, 10.0, 11.0, f64::NAN]);
    let domain = Domain::numeric(0.0, 10.0).expect("domain");

    let bins = make_bins(&data, &h(), domain, 2).expect("bins");

    let total: usize = bins.iter().map(|bin| bin.len()).sum();
    assert_eq!(total, 3);
    // The domain maximum belongs to the last bin.
    assert_eq!(bins[1].members.last().map(|row| row.h), Some(10.0));
}

#[test]
fn degenerate_domain_puts_everything_in_the_first_bin() {
    let data = rows(&[5.0, 5.0, 7.0]);
    let domain = Domain::numeric(5.0, 5.0).expect("domain");

    let bins = make_bins(&data, &h(), domain, 3).expect("bins");

    assert_eq!(bins.len(), 3);
    assert_eq!(bins[0].len(), 2);
    assert!(bins.iter().all(|bin| bin.width() == 0.0));
}

#[test]
fn zero_threshold_count_is_rejected() {
    let data = rows(&[1.0]);
    let domain = Domain::numeric(0.0, 1.0).expect("domain");

    let err = make_bins(&data, &h(), domain, 0).expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidThresholdCount { count: 0 }));
}

#[test]
fn temporal_domains_are_rejected() {
    let data = rows(&[1.0]);
    let start = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).single().expect("date");
    let end = Utc.with_ymd_and_hms(2018, 2, 1, 0, 0, 0).single().expect("date");
    let domain = Domain::temporal(start, end).expect("domain");

    let err = make_bins(&data, &h(), domain, 4).expect_err("must fail");
    assert!(matches!(err, ChartError::AccessorType { .. }));
}
