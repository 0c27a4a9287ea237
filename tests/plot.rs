use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use plotspace::api::{CanvasRenderingContext2D, Paint};
use plotspace::backends::recording::{DrawOp, PathCommand, RecordingCanvas};
use plotspace::{Host, Plot, PlotConfig, PlotError, PointerEvent, StyleOverride};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn host() -> Host<RecordingCanvas> {
    Host::new().with_container("plot")
}

fn unit_config() -> PlotConfig {
    PlotConfig::new("plot")
        .with_pixels(500.0, 500.0)
        .with_x_range(0.0, 10.0)
        .with_y_range(0.0, 10.0)
}

#[test]
fn point_at_plot_centre_hits_pixel_centre() {
    init_logging();
    let mut host = host();
    let mut plot = Plot::create(&unit_config(), &mut host).unwrap();
    assert_eq!(host.mounted("plot"), Some(1));
    assert_eq!(plot.width(), 10.0);
    assert_eq!(plot.height(), 10.0);

    plot.draw_point(5.0, 5.0, None).unwrap();
    let ops = plot.into_surface().into_ops();
    let Some(DrawOp::FillPath { path, state }) = ops.last() else {
        panic!("expected a filled path");
    };
    let PathCommand::Arc { x, y, .. } = path[0] else {
        panic!("expected an arc");
    };
    assert_eq!(state.to_device(x, y), (250.0, 250.0));
}

#[test]
fn path_geometry_is_checked_before_drawing() {
    init_logging();
    let mut host = host();
    let mut plot = Plot::create(&unit_config(), &mut host).unwrap();
    assert!(matches!(plot.draw_path(&[], None), Err(PlotError::EmptyGeometry)));
    plot.draw_path(&[(0.0, 0.0)], None).unwrap();
    plot.draw_path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], None)
        .unwrap();
    plot.draw_curve(&[(0.0, 0.0)], None).unwrap();
}

#[test]
fn degenerate_bounds_are_rejected() {
    init_logging();
    let config = PlotConfig::new("plot")
        .with_pixels(100.0, 100.0)
        .with_x_range(0.0, 0.0)
        .with_y_range(0.0, 1.0);
    let mut host = host();
    match Plot::create(&config, &mut host) {
        Err(PlotError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(host.mounted("plot"), Some(0));
}

#[test]
fn missing_parameters_are_named() {
    let config = PlotConfig::new("plot").with_pixels(100.0, 100.0);
    match Plot::create(&config, &mut host()) {
        Err(PlotError::MissingParameter(name)) => assert_eq!(name, "minX"),
        other => panic!("unexpected result: {other:?}"),
    }

    let config = PlotConfig {
        container: None,
        ..unit_config()
    };
    match Plot::create(&config, &mut host()) {
        Err(PlotError::MissingParameter(name)) => assert_eq!(name, "container"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn unknown_container_is_rejected() {
    let config = PlotConfig {
        container: Some("elsewhere".into()),
        ..unit_config()
    };
    match Plot::create(&config, &mut host()) {
        Err(PlotError::InvalidContainer(id)) => assert_eq!(id, "elsewhere"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn background_stack_underflows_after_initial_snapshot() {
    let mut plot = Plot::create(&unit_config(), &mut host()).unwrap();
    plot.push_background().unwrap();
    assert_eq!(plot.background_depth(), 2);
    plot.pop_background().unwrap();
    plot.pop_background().unwrap();
    assert!(matches!(plot.pop_background(), Err(PlotError::EmptyStack)));
}

#[test]
fn pointer_move_at_bottom_left_reports_plot_minimum() {
    let config = PlotConfig::new("plot")
        .with_pixels(300.0, 200.0)
        .with_x_range(-3.0, 3.0)
        .with_y_range(10.0, 20.0);
    let mut plot = Plot::create(&config, &mut host()).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    plot.on_pointer_move(move |x, y| sink.borrow_mut().push((x, y)));
    let left = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&left);
    plot.on_pointer_leave(move || *flag.borrow_mut() = true);

    assert!(plot.dispatch_pointer(PointerEvent::Move {
        offset_x: 0.0,
        offset_y: 200.0,
    }));
    assert!(!plot.dispatch_pointer(PointerEvent::Down {
        offset_x: 0.0,
        offset_y: 0.0,
    }));
    assert!(plot.dispatch_pointer(PointerEvent::Leave));
    assert_eq!(*seen.borrow(), vec![(-3.0, 10.0)]);
    assert!(*left.borrow());
}

#[test]
fn configured_defaults_apply_to_every_primitive() {
    let config = unit_config()
        .with_draw_color("steelblue")
        .with_line_width(0.5);
    let mut plot = Plot::create(&config, &mut host()).unwrap();
    plot.draw_line(0.0, 0.0, 10.0, 10.0, None).unwrap();
    plot.draw_arrow_head(10.0, 10.0, FRAC_PI_2, None, None).unwrap();
    plot.draw_rect(1.0, 1.0, 2.0, 2.0, Some(&StyleOverride::new().color("red")))
        .unwrap();

    let ops = plot.surface().ops();
    let strokes: Vec<_> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::StrokePath { state, .. } => Some(state),
            _ => None,
        })
        .collect();
    assert_eq!(strokes.len(), 2);
    for state in strokes {
        assert_eq!(state.line_width, 0.5);
        assert_eq!(state.stroke_style, Paint::from("steelblue"));
    }
    match ops.last() {
        Some(DrawOp::FillRect { state, .. }) => assert_eq!(state.fill_style, Paint::from("red")),
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn plot_config_deserializes_from_json() {
    let config: PlotConfig = serde_json::from_str(
        r##"{
            "container": "plot",
            "pixelWidth": 640.7,
            "pixelHeight": 480,
            "minX": -1, "maxX": 1,
            "minY": 0, "maxY": 2,
            "backgroundColor": "#eee"
        }"##,
    )
    .unwrap();
    let plot = Plot::create(&config, &mut host()).unwrap();
    assert_eq!(plot.surface().size(), (640, 480));
}

#[test]
fn press_and_release_report_plot_coordinates() {
    let mut plot = Plot::create(&unit_config(), &mut host()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let downs = Rc::clone(&seen);
    plot.on_pointer_down(move |x, y| downs.borrow_mut().push((x, y)));
    let ups = Rc::clone(&seen);
    plot.on_pointer_up(move |x, y| ups.borrow_mut().push((x, y)));

    assert!(plot.dispatch_pointer(PointerEvent::Down {
        offset_x: 250.0,
        offset_y: 250.0,
    }));
    assert!(plot.dispatch_pointer(PointerEvent::Up {
        offset_x: 500.0,
        offset_y: 0.0,
    }));
    assert_eq!(*seen.borrow(), vec![(5.0, 5.0), (10.0, 10.0)]);
}
