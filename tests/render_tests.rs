use chart_geometry::api::{ChartAccessors, ChartConfig, build_chart_geometry};
use chart_geometry::core::{FieldAccessor, Scalar};
use chart_geometry::render::{
    Axis, ChartGeometry, Color, NullRenderer, Primitive, Renderer, TextAnchor,
};

fn histogram() -> ChartGeometry {
    let values = [0.31_f64, 0.44, 0.47, 0.52, 0.68, 0.71, 0.9];
    let accessor = FieldAccessor::new("humidity", |v: &f64| Some(Scalar::Number(*v)));
    let accessors = ChartAccessors::new(&accessor);
    build_chart_geometry(&values, &accessors, &ChartConfig::humidity_histogram())
        .expect("geometry")
}

#[test]
fn null_renderer_records_primitive_counts() {
    let geometry = histogram();
    let mut renderer = NullRenderer::default();

    renderer.render(&geometry).expect("render");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_bar_count, 12);
    assert_eq!(renderer.last_point_count, 0);
    assert_eq!(renderer.last_vertex_count, 0);
    let ticks = geometry.ticks(Axis::X).count() + geometry.ticks(Axis::Y).count();
    assert_eq!(renderer.last_tick_count, ticks);
}

#[test]
fn null_renderer_rejects_negative_bar_sizes() {
    let mut geometry = histogram();
    geometry.primitives.push(Primitive::Bar {
        x: 0.0,
        y: 0.0,
        width: -1.0,
        height: 10.0,
    });
    let mut renderer = NullRenderer::default();

    let err = renderer.render(&geometry).expect_err("must reject");
    assert!(format!("{err}").contains("bar width and height"));
    assert_eq!(renderer.frames_rendered, 0);
}

#[test]
fn null_renderer_rejects_non_finite_points_and_bad_colors() {
    let mut renderer = NullRenderer::default();

    let mut geometry = histogram();
    geometry.primitives.push(Primitive::Point {
        x: f64::NAN,
        y: 0.0,
        color: None,
    });
    assert!(renderer.render(&geometry).is_err());

    let mut geometry = histogram();
    geometry.primitives.push(Primitive::Point {
        x: 1.0,
        y: 1.0,
        color: Some(Color::rgb(1.5, 0.0, 0.0)),
    });
    assert!(renderer.render(&geometry).is_err());
}

#[test]
fn null_renderer_rejects_empty_labels() {
    let mut geometry = histogram();
    geometry.primitives.push(Primitive::Label {
        x: 0.0,
        y: 0.0,
        text: String::new(),
        anchor: TextAnchor::Start,
    });

    let mut renderer = NullRenderer::default();
    assert!(renderer.render(&geometry).is_err());
}
