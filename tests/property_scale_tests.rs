use chart_geometry::core::Scale;
use proptest::prelude::*;

proptest! {
    #[test]
    fn scale_maps_domain_endpoints_to_range_endpoints(
        domain_min in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        range_low in -5_000.0f64..5_000.0,
        range_high in -5_000.0f64..5_000.0
    ) {
        let domain_max = domain_min + domain_span;
        let scale = Scale::linear(domain_min, domain_max, range_low, range_high)
            .expect("valid scale");

        prop_assert_eq!(scale.apply_f64(domain_min), range_low);
        prop_assert!((scale.apply_f64(domain_max) - range_high).abs() <= 1e-9);
    }

    #[test]
    fn invert_undoes_apply(
        domain_min in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_max = domain_min + domain_span;
        let value = domain_min + value_factor * domain_span;
        let scale = Scale::linear(domain_min, domain_max, 0.0, 2048.0).expect("valid scale");

        let px = scale.apply_f64(value);
        let recovered = scale.invert_f64(px);

        prop_assert!((recovered - value).abs() <= 1e-7);
    }

    #[test]
    fn ticks_stay_inside_the_domain_in_ascending_order(
        domain_min in -10_000.0f64..10_000.0,
        domain_span in 0.01f64..10_000.0,
        count in 1usize..20
    ) {
        let domain_max = domain_min + domain_span;
        let scale = Scale::linear(domain_min, domain_max, 0.0, 1.0).expect("valid scale");

        let ticks: Vec<f64> = scale.ticks(count).into_iter().map(|tick| tick.as_f64()).collect();
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(ticks.iter().all(|tick| *tick >= domain_min && *tick <= domain_max));
    }
}
