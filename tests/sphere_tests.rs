// Host-side tests for the composed particle sphere.

use glam::Vec3;
use sphere_core::{Camera, MagneticSphere, SphereConfig, SphereInputs};

fn camera() -> Camera {
    Camera::looking_at_origin(260.0, 1.0, 45.0_f32.to_radians())
}

fn config(total: f32) -> SphereConfig {
    SphereConfig {
        total_points: total,
        ..SphereConfig::default()
    }
}

fn control(hollow_factor: f32) -> SphereInputs {
    SphereInputs {
        enable_magnet: true,
        hollow_factor,
        dialog_mode: false,
    }
}

#[test]
fn untouched_sphere_keeps_base_radius() {
    let cfg = config(4.0);
    let mut s = MagneticSphere::new(&cfg, 1);
    assert_eq!(s.point_count(), 2);
    assert_eq!(s.base_radius(), 60.0);

    let mut time = 0.0;
    for _ in 0..100 {
        s.update(time, control(0.0), &camera(), &cfg);
        time += 0.016;
    }
    assert_eq!(s.positions().len(), 2);
    for p in s.positions() {
        assert!((p.length() - 60.0).abs() < 1e-3);
    }
}

#[test]
fn far_pointer_leaves_sphere_alone() {
    let cfg = config(4.0);
    let mut s = MagneticSphere::new(&cfg, 1);
    s.set_pointer_ndc(5.0, 5.0);
    let mut time = 0.0;
    for _ in 0..100 {
        s.update(time, control(0.0), &camera(), &cfg);
        time += 0.016;
    }
    assert!(!s.magnet().is_active());
    for p in s.positions() {
        assert!((p.length() - 60.0).abs() < 1e-3);
    }
}

#[test]
fn pointer_over_sphere_raises_spikes() {
    let cfg = config(2000.0);
    let mut s = MagneticSphere::new(&cfg, 3);
    s.set_pointer_ndc(0.0, 0.0);
    let mut time = 0.0;
    let mut tallest = 0.0_f32;
    for frame in 0..240 {
        s.update(time, control(0.0), &camera(), &cfg);
        time += 0.016;
        if frame >= 200 {
            let max = s.positions().iter().map(|p| p.length()).fold(0.0, f32::max);
            tallest = tallest.max(max);
        }
    }
    assert!(s.magnet().is_active());
    assert!(tallest > 62.0);
    // nothing is pulled inward
    for p in s.positions() {
        assert!(p.length() >= 60.0 - 1e-3);
    }
}

#[test]
fn hollow_pushes_front_points_away() {
    let cfg = config(2000.0);
    let mut s = MagneticSphere::new(&cfg, 3);
    let inputs = SphereInputs {
        enable_magnet: false,
        hollow_factor: 1.0,
        dialog_mode: false,
    };
    s.update(0.0, inputs, &camera(), &cfg);
    let max = s.positions().iter().map(|p| p.length()).fold(0.0, f32::max);
    assert!(max > 200.0);
    for p in s.positions() {
        assert!(p.length() >= 60.0 - 1e-3);
    }
}

#[test]
fn dialog_parks_centre_points_on_ring() {
    let cfg = config(2000.0);
    let mut s = MagneticSphere::new(&cfg, 3);
    let inputs = SphereInputs {
        enable_magnet: false,
        hollow_factor: 1.0,
        dialog_mode: true,
    };
    s.update(0.0, inputs, &camera(), &cfg);

    let inner = cfg.dialog_ring_inner_angle;
    let mut parked = 0;
    for (dir, pos) in s.field().directions().iter().zip(s.positions()) {
        if dir.angle_between(Vec3::Z) < inner - 1e-3 {
            assert!((pos.length() - 60.0).abs() < 1e-3);
            assert!((pos.normalize().angle_between(Vec3::Z) - inner).abs() < 1e-3);
            parked += 1;
        }
    }
    assert!(parked > 0);
}

#[test]
fn dialog_ignores_hollow_push() {
    let cfg = config(2000.0);
    let mut s = MagneticSphere::new(&cfg, 3);
    let inputs = SphereInputs {
        enable_magnet: false,
        hollow_factor: 1.0,
        dialog_mode: true,
    };
    // spikes spawned at construction are mid-life by now
    s.update(0.8, inputs, &camera(), &cfg);
    let max = s.positions().iter().map(|p| p.length()).fold(0.0, f32::max);
    // only ring spikes, bounded by the dialog spike height
    assert!(max > 61.0);
    assert!(max <= 60.0 + cfg.dialog_spike_max_height + 1e-3);
}

#[test]
fn radius_is_fixed_at_construction() {
    let mut cfg = config(100.0);
    let mut s = MagneticSphere::new(&cfg, 9);
    cfg.sphere_radius = 10.0;
    cfg.total_points = 10.0;
    s.update(0.0, control(0.0), &camera(), &cfg);
    assert_eq!(s.base_radius(), 60.0);
    assert_eq!(s.positions().len(), 50);
}
