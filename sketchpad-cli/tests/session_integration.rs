//! Session Integration Tests
//!
//! Replays scripts end to end:
//! - Outputs written to the configured directory
//! - Toolbar steps affect only later gestures
//! - Invalid steps surface as errors

use sketchpad_cli::{parse_script, run, Session, SessionConfig, Step};
use sketchpad_core::{Drawable, Point, PointerEvent, Thickness};

/// Config writing into `dir` without loading system fonts.
fn config_in(dir: &std::path::Path) -> SessionConfig {
    SessionConfig {
        size: 64.0,
        scale: 2.0,
        out_dir: dir.to_path_buf(),
        system_fonts: false,
        ..SessionConfig::default()
    }
}

const STROKE_THEN_STICKER: &str = r#"[
    {"pointer": {"phase": "enter", "x": 10, "y": 10}},
    {"pointer": {"phase": "down", "x": 10, "y": 10}},
    {"pointer": {"phase": "move", "x": 20, "y": 10}},
    {"pointer": {"phase": "move", "x": 20, "y": 20}},
    {"pointer": {"phase": "up", "x": 20, "y": 20}},
    {"tool": {"sticker": "🦆"}},
    {"pointer": {"phase": "down", "x": 40, "y": 40}},
    {"pointer": {"phase": "up", "x": 40, "y": 40}},
    {"pointer": {"phase": "leave", "x": 70, "y": 70}}
]"#;

// ==========================================================================
// Outputs
// ==========================================================================

#[test]
fn test_run_writes_final_export_and_live_frame() {
    let dir = tempfile::tempdir().expect("tempdir");
    let steps = parse_script(STROKE_THEN_STICKER).expect("script");

    let report = run(
        SessionConfig {
            live_frame: true,
            ..config_in(dir.path())
        },
        &steps,
    )
    .expect("run");

    assert_eq!(report.committed, 2);
    assert_eq!(report.redo, 0);
    assert!(report.repaints > 0);
    assert_eq!(
        report.outputs,
        vec![dir.path().join("sketch.png"), dir.path().join("live.png")]
    );

    for path in &report.outputs {
        let bytes = std::fs::read(path).expect("output exists");
        assert_eq!(&bytes[0..4], &[137, 80, 78, 71]);
    }
}

#[test]
fn test_mid_script_exports_are_numbered() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut steps = parse_script(STROKE_THEN_STICKER).expect("script");
    steps.push(Step::Export { scale: 1.0 });
    steps.push(Step::Undo);
    steps.push(Step::Export { scale: 3.0 });

    let report = run(config_in(dir.path()), &steps).expect("run");
    assert_eq!(report.committed, 1);
    assert_eq!(report.redo, 1);
    assert_eq!(
        report.outputs,
        vec![
            dir.path().join("export-1.png"),
            dir.path().join("export-2.png"),
            dir.path().join("sketch.png"),
        ]
    );
}

#[test]
fn test_invalid_export_scale_fails_step() {
    let dir = tempfile::tempdir().expect("tempdir");
    let steps = vec![Step::Export { scale: 0.0 }];
    let err = run(config_in(dir.path()), &steps).expect_err("zero scale");
    assert!(err.to_string().contains("step 0"));
}

// ==========================================================================
// Toolbar steps
// ==========================================================================

#[test]
fn test_toolbar_changes_apply_to_next_gesture() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = Session::new(config_in(dir.path()));
    let steps = parse_script(
        r##"[
            {"pointer": {"phase": "down", "x": 1, "y": 1}},
            {"pointer": {"phase": "move", "x": 2, "y": 2}},
            {"pointer": {"phase": "up", "x": 2, "y": 2}},
            "cycle_thickness",
            "cycle_thickness",
            {"color": "#00ff00"},
            {"pointer": {"phase": "down", "x": 3, "y": 3}},
            {"pointer": {"phase": "move", "x": 4, "y": 4}},
            {"pointer": {"phase": "up", "x": 4, "y": 4}}
        ]"##,
    )
    .expect("script");
    for step in &steps {
        session.apply(step).expect("step");
    }

    assert_eq!(session.tools().thickness, Thickness::Thick);
    let committed = session.canvas().store().committed();
    let (Drawable::Stroke(first), Drawable::Stroke(second)) = (&committed[0], &committed[1])
    else {
        panic!("expected two strokes");
    };
    assert!((first.width - 2.0).abs() < f32::EPSILON);
    assert_eq!(first.color.to_string(), "#000000");
    assert!((second.width - 10.0).abs() < f32::EPSILON);
    assert_eq!(second.color.to_string(), "#00ff00");
}

#[test]
fn test_custom_sticker_is_registered_and_selected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = Session::new(config_in(dir.path()));
    session
        .apply(&Step::CustomSticker(" yay ".to_string()))
        .expect("custom sticker");
    session
        .apply(&Step::Pointer(PointerEvent::down(5.0, 5.0)))
        .expect("down");
    session
        .apply(&Step::Pointer(PointerEvent::moved(8.0, 8.0)))
        .expect("move");

    assert!(session.canvas().palette().contains("yay"));
    let Drawable::Sticker(sticker) = &session.canvas().store().committed()[0] else {
        panic!("expected sticker");
    };
    assert_eq!(sticker.glyph, "yay");
    assert_eq!(sticker.location, Point::new(8.0, 8.0));
}

#[test]
fn test_unknown_sticker_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = Session::new(config_in(dir.path()));
    let steps = parse_script(r#"[{"tool": {"sticker": "🦖"}}]"#).expect("script");
    assert!(session.apply(&steps[0]).is_err());
    assert!(session
        .apply(&Step::CustomSticker("   ".to_string()))
        .is_err());
}
