use std::fs;
use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use camtrack_camera_core::{
    Camera, CameraConfig, CameraDocument, CameraError, Channel, EvalOptions, ExtraData,
};
use camtrack_curve_core::{Curve, Interpolation};
use camtrack_math_core::{Mat4, RotationOrder, TransformOrder, Vec2, Vec3};
use camtrack_test_fixtures::cameras;
use serde_json::json;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("camtrack-{}-{name}", std::process::id()))
}

fn shot() -> Camera {
    Camera::load(cameras::path("shot010").unwrap()).unwrap()
}

#[test]
fn fixture_global_block() {
    let camera = shot();
    assert_eq!(camera.name, "shot010");
    assert_eq!(camera.app, "nuke");
    assert_eq!(camera.plate, "A001_C002");
    assert_eq!(camera.unit, "cm");
    assert_eq!(camera.fps, 24.0);
    assert_eq!(camera.ccd, [23.76, 12.84]);
    assert_eq!(camera.duration(), 99);
    assert_eq!(camera.transform_order, TransformOrder::Srt);
    assert_eq!(camera.rotation_order, RotationOrder::Xyz);
    assert_eq!(camera.extra.get("artist"), Some(&json!("kim")));
    assert_eq!(camera.curve(Channel::X).method(), Interpolation::Linear);
    assert!(camera.curve(Channel::Sx).is_empty());
}

#[test]
fn srt_pose_from_fixture() {
    let key = shot().eval(1051.0, &EvalOptions::default()).unwrap();
    assert_abs_diff_eq!(key.translate, Vec3::new(50.0, 5.0, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(key.rotate, Vec3::new(0.0, 0.0, 45.0), epsilon = 1e-9);
    assert_eq!(key.scale, Vec3::one());
    assert_abs_diff_eq!(key.focal, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(key.focus, 250.0, epsilon = 1e-9);
    assert_abs_diff_eq!(key.fstop, 2.8, epsilon = 1e-9);
    assert_abs_diff_eq!(key.far, 10000.0, epsilon = 1e-9);
    assert_eq!(key.pan, Vec2::zero());
    assert_eq!(key.zoom, Vec2::new(1.0, 1.0));

    let expected = Mat4::compose(
        key.translate,
        key.rotate,
        key.scale,
        TransformOrder::Srt,
        RotationOrder::Xyz,
    );
    assert_abs_diff_eq!(key.matrix, expected, epsilon = 1e-12);
}

#[test]
fn lens_channels_extrapolate_past_their_keys() {
    let camera = shot();
    let key = camera.eval(1026.0, &EvalOptions::default()).unwrap();
    assert_abs_diff_eq!(key.focal, 42.5, epsilon = 1e-9);
    let key = camera.eval(1061.0, &EvalOptions::default()).unwrap();
    assert_abs_diff_eq!(key.focal, 53.0, epsilon = 1e-9);
}

#[test]
fn matrix_mode_agrees_with_srt_mode_on_translation() {
    let camera = shot();
    let options = EvalOptions::default().with_matrix().with_unit("mm");
    let key = camera.eval(1051.0, &options).unwrap();
    assert_abs_diff_eq!(key.translate, Vec3::new(500.0, 50.0, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(key.rotate, Vec3::zero(), epsilon = 1e-9);
    assert_abs_diff_eq!(key.scale, Vec3::one(), epsilon = 1e-9);

    let srt = camera
        .eval(1051.0, &EvalOptions::default().with_unit("mm"))
        .unwrap();
    assert_abs_diff_eq!(srt.translate, key.translate, epsilon = 1e-9);
}

#[test]
fn config_drives_units_and_mode() {
    let camera = shot();
    let config = CameraConfig {
        units: vec!["cm".into(), "m".into()],
        use_matrix: true,
    };
    config.validate().unwrap();
    let options = config.eval_options().with_unit("m");
    let key = camera.eval_with_config(1051.0, &options, &config).unwrap();
    assert_abs_diff_eq!(key.translate, Vec3::new(5.0, 0.5, 0.0), epsilon = 1e-9);

    assert!(matches!(
        camera.eval_with_config(1051.0, &EvalOptions::default().with_unit("mm"), &config),
        Err(CameraError::UnknownUnit { .. })
    ));
}

#[test]
fn file_round_trip_preserves_every_curve() {
    let camera = shot();
    let path = temp_path("round_trip.cam");
    camera.save(&path).unwrap();
    let loaded = Camera::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(loaded, camera);

    let names: Vec<String> = loaded.curves().map(|(name, _)| name).collect();
    assert_eq!(names.len(), 34);
    assert_eq!(names[0], "x");
    assert_eq!(names[33], "a33");
}

#[test]
fn save_with_merges_extra_keys() {
    let mut camera = shot();
    let path = temp_path("save_with.cam");
    let mut extra = ExtraData::new();
    extra.insert("department".into(), json!("layout"));
    extra.insert("fps".into(), json!(48));
    camera.save_with(&path, extra).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(raw["global"]["department"], json!("layout"));
    assert_eq!(raw["global"]["artist"], json!("kim"));
    assert_eq!(raw["global"]["fps"], json!(24.0));
    assert!(camera.extra.get("fps").is_none());
}

#[test]
fn only_cam_suffix_is_supported() {
    let camera = Camera::new();
    for name in ["shot.bcam", "shot.curve"] {
        let path = temp_path(name);
        let err = camera.save(&path).unwrap_err();
        assert!(matches!(err, CameraError::UnsupportedExtension { .. }));
        assert!(!path.exists());
        assert!(Camera::load(&path).is_err());
    }
}

#[test]
fn fixture_document_deserializes_directly() {
    let document: CameraDocument = cameras::load("shot010").unwrap();
    assert_eq!(document.channels.len(), 34);
    assert_eq!(document.global.name, "shot010");

    let camera = Camera::from_document(document);
    let focal: &Curve = camera.channel("focal").unwrap();
    assert_eq!(focal.len(), 2);
    assert_eq!(camera.channel("a03").unwrap().eval(1101.0), Some(100.0));
}

#[test]
fn nan_time_is_a_typed_error() {
    let err = shot().eval(f64::NAN, &EvalOptions::default()).unwrap_err();
    assert!(matches!(err, CameraError::InvalidTime { .. }));
    assert!(shot().eval(1051.0, &EvalOptions::default()).is_ok());
}
