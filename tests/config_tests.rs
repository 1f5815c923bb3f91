// Host-side tests for the designer config and its panel metadata.

use sphere_core::{SphereConfig, PARAM_SECTIONS};

#[test]
fn defaults_match_designer_values() {
    let c = SphereConfig::default();
    assert_eq!(c.sphere_radius, 60.0);
    assert_eq!(c.point_budget(), 200_000);
    assert_eq!(c.sub_spike_count(), 6);
    assert_eq!(c.dialog_spike_count(), 32);
    assert_eq!(c.prompt_transition_duration_ms, 700.0);
    assert_eq!(c.hollow_duration_ms, 10_500.0);
    assert_eq!(c.dialog_min_total_ms(), 3800.0);
    assert!(c.dialog_ring_inner_angle < c.dialog_ring_outer_angle);
}

#[test]
fn get_and_set_by_name() {
    let mut c = SphereConfig::default();
    assert_eq!(c.get("hollow_max_push"), Some(260.0));
    assert!(c.set("hollow_max_push", 120.0));
    assert_eq!(c.hollow_max_push, 120.0);
    assert_eq!(c.get("hollow_max_push"), Some(120.0));

    assert_eq!(c.get("not_a_param"), None);
    assert!(!c.set("not_a_param", 1.0));
    assert_eq!(c, {
        let mut d = SphereConfig::default();
        d.hollow_max_push = 120.0;
        d
    });
}

#[test]
fn every_key_round_trips() {
    let mut c = SphereConfig::default();
    for (i, key) in SphereConfig::KEYS.iter().enumerate() {
        assert!(c.get(key).is_some(), "{} missing", key);
        assert!(c.set(key, i as f32 + 0.5));
        assert_eq!(c.get(key), Some(i as f32 + 0.5));
    }
}

#[test]
fn panel_params_are_valid_keys() {
    let defaults = SphereConfig::default();
    let mut seen = std::collections::HashSet::new();
    for section in PARAM_SECTIONS {
        assert!(!section.title.is_empty());
        for p in section.params {
            assert!(SphereConfig::KEYS.contains(&p.key), "{} is not a config key", p.key);
            assert!(p.min < p.max, "{} has an empty range", p.key);
            assert!(p.step > 0.0);
            assert!(seen.insert(p.key), "{} listed twice", p.key);
            assert!(defaults.get(p.key).is_some());
        }
    }
}

#[test]
fn degenerate_counts_are_clamped() {
    let mut c = SphereConfig::default();
    c.total_points = -5.0;
    assert_eq!(c.point_budget(), 0);
    c.total_points = f32::NAN;
    assert_eq!(c.point_budget(), 0);
    c.num_sub_spikes = -2.0;
    assert_eq!(c.sub_spike_count(), 0);
    c.dialog_num_spikes = 0.4;
    assert_eq!(c.dialog_spike_count(), 1);
    c.dialog_num_spikes = 12.9;
    assert_eq!(c.dialog_spike_count(), 12);
}

#[test]
fn minimum_envelope_follows_edits() {
    let mut c = SphereConfig::default();
    c.dialog_in_duration_ms = 100.0;
    c.dialog_out_duration_ms = 200.0;
    c.dialog_min_hold_ms = 500.0;
    assert_eq!(c.dialog_min_total_ms(), 800.0);
}
