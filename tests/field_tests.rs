// Host-side tests for the magnet, hollow and dialog fields.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sphere_core::dialog::{DialogField, DialogPoint};
use sphere_core::hollow::HollowFrame;
use sphere_core::magnet::{pointer_direction, proximity, MagnetField};
use sphere_core::spikes::{Spike, SpikePool, SubSpike};
use sphere_core::{ray_sphere, Camera, SphereConfig};

const RADIUS: f32 = 60.0;

fn camera() -> Camera {
    Camera::looking_at_origin(260.0, 1.0, 45.0_f32.to_radians())
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn ray_hits_sphere_front_face() {
    let t = ray_sphere(Vec3::new(0.0, 0.0, 260.0), -Vec3::Z, RADIUS).unwrap();
    assert!((t - 200.0).abs() < 1e-3);
    assert!(ray_sphere(Vec3::new(100.0, 0.0, 260.0), -Vec3::Z, RADIUS).is_none());
}

#[test]
fn projected_radius_matches_perspective() {
    let r = camera().projected_radius_ndc(RADIUS);
    let expected = RADIUS / (260.0 * (22.5_f32).to_radians().tan());
    assert!((r - expected).abs() < 1e-3);
    assert!(camera().forward().distance(-Vec3::Z) < 1e-6);
}

#[test]
fn gpu_projection_uses_zero_to_one_depth() {
    let cam = camera();
    let gl = cam.projection_matrix();
    let gpu = cam.gpu_projection_matrix();

    let near = Vec3::new(0.0, 0.0, -cam.znear);
    let far = Vec3::new(0.0, 0.0, -cam.zfar);
    assert!((gl.project_point3(near).z + 1.0).abs() < 1e-3);
    assert!(gpu.project_point3(near).z.abs() < 1e-3);
    assert!((gpu.project_point3(far).z - 1.0).abs() < 1e-3);

    // same frustum: only depth differs
    let p = Vec3::new(10.0, -5.0, -200.0);
    let (a, b) = (gl.project_point3(p), gpu.project_point3(p));
    assert!((a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5);
    assert!(b.z > 0.0 && b.z < 1.0);
}

#[test]
fn proximity_falloff() {
    let radius_ndc = 0.3;
    let extra = 1.8;
    assert_eq!(proximity(Vec2::ZERO, radius_ndc, extra), 1.0);
    assert_eq!(proximity(Vec2::new(0.29, 0.0), radius_ndc, extra), 1.0);
    assert_eq!(proximity(Vec2::new(0.85, 0.0), radius_ndc, extra), 0.0);
    assert_eq!(proximity(Vec2::new(2.0, 2.0), radius_ndc, extra), 0.0);

    let mut prev = 0.0;
    for i in (30..84).rev() {
        let p = proximity(Vec2::new(i as f32 / 100.0, 0.0), radius_ndc, extra);
        assert!(p >= prev);
        assert!((0.0..=1.0).contains(&p));
        prev = p;
    }
}

#[test]
fn proximity_with_zero_extra_does_not_divide_by_zero() {
    let p = proximity(Vec2::new(0.1, 0.0), 0.3, 0.0);
    assert!(p.is_finite());
    assert_eq!(proximity(Vec2::new(0.5, 0.0), 0.3, 0.0), 0.0);
}

#[test]
fn pointer_at_centre_points_at_viewer() {
    let d = pointer_direction(&camera(), Vec2::ZERO, RADIUS);
    assert!(d.distance(Vec3::Z) < 1e-4);
}

#[test]
fn pointer_off_silhouette_falls_back_to_closest_point() {
    let d = pointer_direction(&camera(), Vec2::new(0.99, 0.99), RADIUS);
    assert!((d.length() - 1.0).abs() < 1e-4);
    assert!(d.z >= 0.0);
    assert!(d.x > 0.0 && d.y > 0.0);
}

#[test]
fn magnet_dormant_without_pointer() {
    let cfg = SphereConfig::default();
    let mut r = rng();
    let mut m = MagnetField::new(&cfg, &mut r);
    for i in 0..30 {
        m.update(i as f32 * 0.016, None, true, &camera(), RADIUS, &cfg, &mut r);
    }
    assert!(!m.is_active());
    assert_eq!(m.intensity(), 0.0);
    assert!(m.frame_spikes(0.5).is_empty());
}

#[test]
fn magnet_activates_and_follows_pointer() {
    let cfg = SphereConfig::default();
    let mut r = rng();
    let mut m = MagnetField::new(&cfg, &mut r);
    let p = Vec2::new(0.2, 0.1);
    let mut time = 0.0;
    for _ in 0..200 {
        m.update(time, Some(p), true, &camera(), RADIUS, &cfg, &mut r);
        time += 0.016;
    }
    assert!(m.is_active());
    assert!(m.intensity() > 0.9);
    let target = pointer_direction(&camera(), p, RADIUS);
    assert!(m.raw_direction().distance(target) < 1e-4);
    assert!(m.visual_direction().distance(target) < 1e-2);
    assert_eq!(m.frame_spikes(time).len(), 6);

    // disabling eases the intensity back down
    for _ in 0..200 {
        m.update(time, Some(p), false, &camera(), RADIUS, &cfg, &mut r);
        time += 0.016;
    }
    assert!(!m.is_active());
    assert!(m.intensity() < 1e-3);
}

#[test]
fn magnet_release_eases_to_zero() {
    let cfg = SphereConfig::default();
    let mut r = rng();
    let mut m = MagnetField::new(&cfg, &mut r);
    for i in 0..100 {
        m.update(i as f32 * 0.016, Some(Vec2::ZERO), true, &camera(), RADIUS, &cfg, &mut r);
    }
    let before = m.intensity();
    m.release(&cfg);
    assert!(!m.is_active());
    assert!(m.intensity() < before);
    assert!(m.frame_spikes(2.0).is_empty());
}

#[test]
fn magnet_displacement_is_local() {
    let cfg = SphereConfig::default();
    let mut r = rng();
    let mut m = MagnetField::new(&cfg, &mut r);
    let mut time = 0.0;
    for _ in 0..200 {
        m.update(time, Some(Vec2::ZERO), true, &camera(), RADIUS, &cfg, &mut r);
        time += 0.016;
    }
    let spikes = m.frame_spikes(time);
    // a point at the rim is outside the area cone around the viewer axis
    assert_eq!(m.displacement(Vec3::X, 0.3, &spikes, time, &cfg), 0.0);
    assert_eq!(m.displacement(Vec3::Z, 0.3, &[], time, &cfg), 0.0);
    // on a spike axis the offset is positive while the spike is alive
    let live = spikes.iter().find(|s| s.envelope > 0.2).unwrap();
    assert!(m.displacement(live.dir, 0.3, &spikes, time, &cfg) > 0.0);
}

#[test]
fn sub_spike_directions_stay_in_front() {
    let mut r = rng();
    for _ in 0..200 {
        let s = SubSpike::spawn(&mut r, 0.0, 0.9);
        assert!(s.alpha <= 0.9 * 0.7);
        assert!(s.life >= 0.9 && s.life <= 1.8);
        let d = s.direction(Vec3::new(1.0, 0.0, 0.05));
        assert!(d.z >= 0.0);
        assert!((d.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn pool_respawns_in_place() {
    let mut r = rng();
    let mut pool = SpikePool::new();
    pool.fill(4, || SubSpike::spawn(&mut r, 0.0, 0.9));
    assert_eq!(pool.len(), 4);
    assert_eq!(pool.respawn_expired(0.5, || SubSpike::spawn(&mut r, 0.5, 0.9)), 0);
    let n = pool.respawn_expired(5.0, || SubSpike::spawn(&mut r, 5.0, 0.9));
    assert_eq!(n, 4);
    assert_eq!(pool.len(), 4);
    assert!(pool.iter().all(|s| s.start_time() == 5.0));
}

#[test]
fn hollow_off_in_dialog_or_when_weak() {
    let cfg = SphereConfig::default();
    assert!(HollowFrame::new(&camera(), RADIUS, 1.0, true, &cfg).is_none());
    assert!(HollowFrame::new(&camera(), RADIUS, 0.0, false, &cfg).is_none());
    assert!(HollowFrame::new(&camera(), RADIUS, 0.0005, false, &cfg).is_none());
}

#[test]
fn hollow_pushes_centre_hardest() {
    let cfg = SphereConfig::default();
    let h = HollowFrame::new(&camera(), RADIUS, 1.0, false, &cfg).unwrap();
    let centre = h.offset(Vec3::new(0.0, 0.0, RADIUS));
    assert!((centre - cfg.hollow_max_push).abs() < 1e-3);

    let rim = h.offset(Vec3::new(RADIUS, 0.0, 0.0));
    assert!(rim > 0.0 && rim < centre);

    let half = HollowFrame::new(&camera(), RADIUS, 0.5, false, &cfg).unwrap();
    assert!((half.offset(Vec3::new(0.0, 0.0, RADIUS)) - centre * 0.5).abs() < 1e-3);
}

#[test]
fn dialog_pool_tracks_configured_count() {
    let mut cfg = SphereConfig::default();
    let mut r = rng();
    let mut d = DialogField::new(&cfg, &mut r);
    assert_eq!(d.spikes().len(), 32);

    for i in 0..500 {
        d.maintain(i as f32 * 0.05, &cfg, &mut r);
        assert_eq!(d.spikes().len(), 32);
    }

    cfg.dialog_num_spikes = 8.0;
    d.maintain(30.0, &cfg, &mut r);
    assert_eq!(d.spikes().len(), 8);

    cfg.dialog_num_spikes = 0.0;
    d.maintain(31.0, &cfg, &mut r);
    assert_eq!(d.spikes().len(), 1);
}

#[test]
fn dialog_centre_points_sit_on_inner_ring() {
    let cfg = SphereConfig::default();
    let mut r = rng();
    let d = DialogField::new(&cfg, &mut r);
    let frame = d.frame(1.0, 0.0);
    assert!(!frame.refilling);

    let inner = cfg.dialog_ring_inner_angle;
    let dir = Vec3::new(0.03, 0.02, 1.0).normalize();
    match d.displace(&frame, dir, 0.0, RADIUS, 0.0, &cfg) {
        DialogPoint::Anchored(pos) => {
            assert!((pos.length() - RADIUS).abs() < 1e-3);
            let angle = pos.normalize().angle_between(Vec3::Z);
            assert!((angle - inner).abs() < 1e-3);
            // same azimuth as the original direction
            assert!((pos.y / pos.x - dir.y / dir.x).abs() < 1e-3);
        }
        other => panic!("expected anchored point, got {:?}", other),
    }
}

#[test]
fn dialog_points_outside_ring_stay_put() {
    let cfg = SphereConfig::default();
    let mut r = rng();
    let d = DialogField::new(&cfg, &mut r);
    let frame = d.frame(1.0, 0.3);
    assert_eq!(
        d.displace(&frame, Vec3::X, 0.0, RADIUS, 0.3, &cfg),
        DialogPoint::Radial(0.0)
    );
}

#[test]
fn zero_inner_angle_has_no_centre_region() {
    let mut cfg = SphereConfig::default();
    cfg.dialog_ring_inner_angle = 0.0;
    let mut r = rng();
    let d = DialogField::new(&cfg, &mut r);
    let frame = d.frame(1.0, 0.0);
    assert!(matches!(
        d.displace(&frame, Vec3::Z, 0.0, RADIUS, 0.0, &cfg),
        DialogPoint::Radial(_)
    ));
}

#[test]
fn refill_returns_centre_outside_in() {
    let cfg = SphereConfig::default();
    let mut r = rng();
    let mut d = DialogField::new(&cfg, &mut r);
    d.finish_frame(1.0, true);

    let frame = d.frame(0.5, 1.0);
    assert!(frame.refilling);
    assert!((frame.refill_progress - 0.5).abs() < 1e-6);
    assert_eq!(frame.spike_fade, 0.0);

    let inner = cfg.dialog_ring_inner_angle;
    // the very centre is still parked on the ring
    let centre = Vec3::new(1e-3, 0.0, 1.0).normalize();
    match d.displace(&frame, centre, 0.0, RADIUS, 1.0, &cfg) {
        DialogPoint::Anchored(pos) => {
            assert!((pos.normalize().angle_between(Vec3::Z) - inner).abs() < 1e-3)
        }
        other => panic!("expected anchored point, got {:?}", other),
    }
    // a point by the ring edge is already home
    let edge_angle = inner * 0.99;
    let edge = Vec3::new(edge_angle.sin(), 0.0, edge_angle.cos());
    match d.displace(&frame, edge, 0.0, RADIUS, 1.0, &cfg) {
        DialogPoint::Anchored(pos) => assert!(pos.distance(edge * RADIUS) < 1e-3),
        other => panic!("expected anchored point, got {:?}", other),
    }
    // ring spikes have faded out
    let ring_angle = (inner + cfg.dialog_ring_outer_angle) * 0.5;
    let ring = Vec3::new(ring_angle.sin(), 0.0, ring_angle.cos());
    assert_eq!(
        d.displace(&frame, ring, 0.0, RADIUS, 1.0, &cfg),
        DialogPoint::Radial(0.0)
    );
}

#[test]
fn leaving_dialog_resets_refill_detection() {
    let cfg = SphereConfig::default();
    let mut r = rng();
    let mut d = DialogField::new(&cfg, &mut r);
    d.finish_frame(1.0, true);
    d.finish_frame(0.8, false);
    assert!(!d.frame(0.5, 0.0).refilling);
}

/// Seeded field whose pool was respawned at `at` with a spike well inside the
/// ring band. Returns the spike's direction too.
fn field_with_ring_spike(cfg: &SphereConfig, at: f32) -> (DialogField, Vec3) {
    let lo = cfg.dialog_ring_inner_angle + 0.1;
    let hi = cfg.dialog_ring_outer_angle - 0.1;
    for seed in 0..512 {
        let mut r = StdRng::seed_from_u64(seed);
        let mut d = DialogField::new(cfg, &mut r);
        d.maintain(at, cfg, &mut r);
        let found = d
            .spikes()
            .iter()
            .map(|s| s.dir)
            .find(|dir| (lo..hi).contains(&dir.angle_between(Vec3::Z)));
        if let Some(dir) = found {
            return (d, dir);
        }
    }
    panic!("no seed produced a ring spike");
}

fn radial(p: DialogPoint) -> f32 {
    match p {
        DialogPoint::Radial(h) => h,
        other => panic!("expected radial offset, got {:?}", other),
    }
}

#[test]
fn ring_spike_height_follows_envelope_and_ring_weight() {
    let mut cfg = SphereConfig::default();
    cfg.dialog_num_spikes = 1.0;
    cfg.dialog_noise_amount = 0.0;
    let (d, dir) = field_with_ring_spike(&cfg, 10.0);
    let spike = *d.spikes().iter().next().unwrap();
    assert_eq!(spike.start_time, 10.0);

    let t = 10.8;
    let frame = d.frame(1.0, t);
    assert!(!frame.refilling);
    assert_eq!(frame.spike_fade, 1.0);

    let envelope = spike.envelope(t);
    assert!(envelope > 0.2);
    let inner = cfg.dialog_ring_inner_angle;
    let outer = cfg.dialog_ring_outer_angle;
    let ring_t = (dir.angle_between(Vec3::Z) - inner) / (outer - inner);
    let ring_weight = (ring_t * std::f32::consts::PI).sin();
    let height = cfg.dialog_spike_min_height
        + (cfg.dialog_spike_max_height - cfg.dialog_spike_min_height) * envelope * ring_weight;

    let offset = radial(d.displace(&frame, dir, 0.4, RADIUS, t, &cfg));
    let expected = height * envelope;
    assert!((offset - expected).abs() < expected * 0.02, "{} vs {}", offset, expected);
    assert!(offset > cfg.dialog_spike_min_height * envelope);
    assert!(offset <= cfg.dialog_spike_max_height);

    // half intensity lowers the height but keeps the floor
    let half = d.frame(0.5, t);
    let lower = radial(d.displace(&half, dir, 0.4, RADIUS, t, &cfg));
    assert!(lower < offset);
    assert!(lower > cfg.dialog_spike_min_height * envelope);
}

#[test]
fn ring_spikes_lift_points_in_the_band() {
    let cfg = SphereConfig::default();
    let (d, dir) = field_with_ring_spike(&cfg, 10.0);
    assert!(d.spikes().iter().all(|s| s.start_time == 10.0));

    let t = 10.8;
    let frame = d.frame(1.0, t);
    let own = d
        .spikes()
        .iter()
        .find(|s| s.dir == dir)
        .map(|s| s.envelope(t))
        .unwrap();
    let floor_mix = 1.0 - cfg.dialog_noise_amount;
    for phase in [0.0, 1.3, 4.0] {
        let offset = radial(d.displace(&frame, dir, phase, RADIUS, t, &cfg));
        // the strongest spike wins, so never less than this one alone
        assert!(offset >= cfg.dialog_spike_min_height * floor_mix * own * 0.95);
        assert!(offset > 0.0);
        assert!(offset <= cfg.dialog_spike_max_height);
    }
}

#[test]
fn ring_edges_carry_no_offset() {
    let cfg = SphereConfig::default();
    let (d, dir) = field_with_ring_spike(&cfg, 10.0);
    let frame = d.frame(1.0, 10.8);

    let azimuth = dir.y.atan2(dir.x);
    let at = |angle: f32| {
        Vec3::new(
            angle.sin() * azimuth.cos(),
            angle.sin() * azimuth.sin(),
            angle.cos(),
        )
    };
    let inner_edge = at(cfg.dialog_ring_inner_angle + 1e-4);
    let outer_edge = at(cfg.dialog_ring_outer_angle);
    assert_eq!(radial(d.displace(&frame, inner_edge, 0.0, RADIUS, 10.8, &cfg)), 0.0);
    assert_eq!(radial(d.displace(&frame, outer_edge, 0.0, RADIUS, 10.8, &cfg)), 0.0);

    // between them the same azimuth is lifted
    assert!(radial(d.displace(&frame, dir, 0.0, RADIUS, 10.8, &cfg)) > 0.0);
}

#[test]
fn ring_spikes_fade_early_in_a_refill() {
    let cfg = SphereConfig::default();
    let (mut d, dir) = field_with_ring_spike(&cfg, 10.0);
    let t = 10.8;

    let steady = d.frame(0.95, t);
    assert!(!steady.refilling);
    let full = radial(d.displace(&steady, dir, 0.0, RADIUS, t, &cfg));

    d.finish_frame(1.0, true);
    let refill = d.frame(0.95, t);
    assert!(refill.refilling);
    assert!((refill.refill_progress - 0.05).abs() < 1e-5);
    assert!(refill.spike_fade > 0.0 && refill.spike_fade < 1.0);
    assert!((refill.spike_fade - 0.811).abs() < 1e-3);

    let faded = radial(d.displace(&refill, dir, 0.0, RADIUS, t, &cfg));
    assert!(full > 0.0);
    assert!((faded - full * refill.spike_fade).abs() < 1e-3);
}
