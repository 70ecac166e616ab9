use std::f32::consts::PI;
use std::fs;

use pecwave::{
    config, export,
    layout::{compose, Layout},
    sampler::{sample, DisplayMode},
    scene::{Controls, Scene},
    settings,
    wave::{derive_wavenumbers, WaveParameters},
};

// Tolerance for comparing field values
const TOL: f32 = 1e-4;

#[test]
fn scenario_a_oblique_45_total_vanishes_on_conductor() {
    let wn = derive_wavenumbers(45.0, 80.0);
    assert!((wn.kx - 0.0555).abs() < 1e-4);
    assert!((wn.kz - 0.0555).abs() < 1e-4);
    assert!((wn.kx - wn.kz).abs() < 1e-6);

    let params = WaveParameters::new(45.0, 0.05);
    for x in 0..420 {
        let value = sample(x as f32, 0.0, 0, DisplayMode::Total, &params);
        assert!(value.abs() < TOL, "x = {}: {}", x, value);
    }
}

#[test]
fn scenario_b_normal_incidence_is_independent_of_x() {
    let params = WaveParameters::new(0.0, 0.05);
    let kz = params.wavenumbers().kz;
    for t in [0, 7, 31, 250] {
        let omega_t = params.phase(t);
        for z in [0.0, 13.0, 120.0, 399.0] {
            let expected = (omega_t - kz * z).cos();
            for x in [0.0, 50.0, 211.0, 419.0] {
                let value = sample(x, z, t, DisplayMode::Incident, &params);
                assert!((value - expected).abs() < TOL, "t {} x {} z {}", t, x, z);
            }
        }
    }
}

#[test]
fn scenario_c_grazing_reflection_is_nearly_independent_of_z() {
    let params = WaveParameters::new(89.0, 0.05);
    let wn = params.wavenumbers();
    let t = 19;
    let omega_t = params.phase(t);
    for x in [0.0, 90.0, 333.0] {
        let expected = -(omega_t - wn.kx * x).cos();
        for z in [0.0, 5.0, 10.0, 20.0] {
            let value = sample(x, z, t, DisplayMode::Reflected, &params);
            // the residual z dependence is bounded by kz z
            assert!(
                (value - expected).abs() <= wn.kz * z + TOL,
                "x {} z {}: {} vs {}",
                x,
                z,
                value,
                expected
            );
        }
    }
}

#[test]
fn total_nodes_hold_for_all_times() {
    let params = WaveParameters::new(30.0, 0.13);
    let kz = params.wavenumbers().kz;
    for n in 0..4 {
        let z = n as f32 * PI / kz;
        for t in 0..40 {
            let value = sample(17.0, z, t, DisplayMode::Total, &params);
            assert!(value.abs() < 1e-3, "n {} t {}: {}", n, t, value);
        }
    }
}

#[test]
fn paused_scene_renders_identical_surfaces() {
    let mut settings = settings::load_default_config().unwrap();
    settings.running = false;
    let mut scene = Scene::from_settings(&settings);
    let first = scene.tick().cloned().unwrap();
    for _ in 0..3 {
        let again = scene.tick().cloned().unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn running_scene_time_is_monotonic() {
    let mut scene = Scene::new(Controls::default(), Layout::default());
    let mut previous = scene.clock().time();
    for _ in 0..10 {
        let time = scene.tick().map(|f| f.time).unwrap();
        assert_eq!(time, previous + 1);
        previous = time;
    }
}

#[test]
fn teardown_stops_rendering() {
    let mut scene = Scene::new(Controls::default(), Layout::default());
    scene.tick();
    scene.teardown();
    assert!(scene.tick().is_none());
    assert!(scene.clock().is_torn_down());
}

#[test]
fn composed_page_layout() {
    let layout = Layout::default();
    let mut scene = Scene::new(Controls::default(), layout);
    let frames = scene.tick().unwrap();
    let page = compose(frames, &layout);
    assert_eq!((page.width(), page.height()), (580, 480));
    // main surface starts right of the standing plot
    assert_eq!(page.pixel(80, 0), frames.main.buffer.pixel(0, 0));
    assert_eq!(page.pixel(0, 0), frames.standing.buffer.pixel(0, 0));
    assert_eq!(page.pixel(80, 400), frames.traveling.buffer.pixel(0, 0));
}

#[test]
fn headless_export_writes_frames_and_settings() {
    let dir = std::env::temp_dir().join(format!("pecwave-export-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let mut settings = settings::load_default_config().unwrap();
    settings.frames = 3;
    settings.mode = DisplayMode::Reflected;
    settings.export = Some(dir.clone());

    let summary = export::export(&settings, &dir).unwrap();
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.directory, dir);

    for index in 1..=3 {
        let path = export::frame_path(&dir, index);
        let image = image::open(&path).unwrap();
        assert_eq!((image.width(), image.height()), (580, 480));
    }
    assert!(!export::frame_path(&dir, 4).exists());

    // captions are part of the exported pixels; the main surface sits at x = 80
    let page = image::open(export::frame_path(&dir, 1)).unwrap().to_rgb8();
    let differs = |xs: std::ops::Range<u32>, ys: std::ops::RangeInclusive<u32>, color: [u8; 3]| {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|&(x, _)| !(539..=541).contains(&x))
            .filter(|&(x, y)| page.get_pixel(x, y).0 != color)
            .count()
    };
    assert!(differs(510..570, 5..=25, config::PANEL_BACKGROUND) > 20);
    assert!(differs(90..230, 388..=399, config::PEC_STRIP) > 50);

    let snapshot = fs::read_to_string(dir.join("settings.toml")).unwrap();
    let parsed: settings::Settings = toml::from_str(&snapshot).unwrap();
    assert_eq!(parsed, settings);

    fs::remove_dir_all(&dir).unwrap();
}
