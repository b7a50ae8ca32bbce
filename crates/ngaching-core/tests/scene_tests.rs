// Host-side tests for per-frame blending and the scene context.

use ngaching_core::*;

fn small_config() -> SceneConfig {
    SceneConfig {
        particle_count: 300,
        ornament_count: 30,
        gift_count: 12,
        photo_count: 10,
        ..SceneConfig::default()
    }
}

fn state(progress: f32) -> AnimationState {
    AnimationState {
        progress,
        ..AnimationState::default()
    }
}

#[test]
fn ease_out_is_monotonic_with_fixed_ends() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    let mut prev = 0.0;
    for i in 0..=1000 {
        let t = ease_out_cubic(i as f32 / 1000.0);
        assert!(t >= prev, "ease-out decreased at step {i}");
        prev = t;
    }
}

#[test]
fn formed_blend_lands_on_targets() {
    let layouts = Layouts::generate(&small_config(), 11);
    let mut blender = Blender::new(&layouts);
    let out = blender.blend(&layouts, &state(1.0), 3.7);
    assert_eq!(out.eased_progress, 1.0);

    for (o, target) in out.foliage.iter().zip(&layouts.foliage.target) {
        // only the sideways sway remains
        assert!((o.position.x - target.x).abs() <= FOLIAGE_SWAY_AMPLITUDE + 1e-4);
        assert!((o.position.y - target.y).abs() < 1e-4);
        assert!((o.position.z - target.z).abs() < 1e-4);
    }
    for (o, target) in out.ornaments.iter().zip(&layouts.ornaments.target) {
        assert!((o.position - *target).length() < 1e-4);
    }
    for (o, target) in out.gifts.iter().zip(&layouts.gifts.target) {
        assert!((o.position - *target).length() < 1e-4);
    }
    for (o, target) in out.photos.iter().zip(&layouts.photos.target) {
        assert!((o.position - *target).length() < 1e-4);
    }
}

#[test]
fn scattered_blend_sits_at_chaos_positions() {
    let layouts = Layouts::generate(&small_config(), 12);
    let mut blender = Blender::new(&layouts);
    let out = blender.blend(&layouts, &state(0.0), 1.3);
    assert_eq!(out.eased_progress, 0.0);

    for (o, chaos) in out.foliage.iter().zip(&layouts.foliage.chaos) {
        assert!((o.position - *chaos).length() < 1e-4);
    }
    for (o, chaos) in out.ornaments.iter().zip(&layouts.ornaments.chaos) {
        // wobble only moves vertically
        assert!((o.position.x - chaos.x).abs() < 1e-4);
        assert!((o.position.y - chaos.y).abs() <= ORNAMENT_WOBBLE_AMPLITUDE + 1e-4);
    }
    for (o, chaos) in out.gifts.iter().zip(&layouts.gifts.chaos) {
        assert!((o.position - *chaos).length() < 1e-4);
    }
    for (o, chaos) in out.photos.iter().zip(&layouts.photos.chaos) {
        assert!((o.position - *chaos).length() < 1e-4);
    }
}

#[test]
fn formed_photos_show_their_front_outward() {
    let layouts = Layouts::generate(&small_config(), 13);
    let mut blender = Blender::new(&layouts);
    let out = blender.blend(&layouts, &state(0.95), 0.0);
    for o in &out.photos {
        let outward = glam::Vec3::new(o.position.x, 0.0, o.position.z).normalize();
        let front = o.rotation * glam::Vec3::Z;
        assert!(front.dot(outward) > 0.999, "front={front:?} outward={outward:?}");
        // the card stays upright
        assert!((o.rotation * glam::Vec3::Y - glam::Vec3::Y).length() < 1e-5);
    }
}

#[test]
fn ornaments_grow_and_turn_with_eased_progress() {
    let layouts = Layouts::generate(&small_config(), 16);
    let mut blender = Blender::new(&layouts);

    let out = blender.blend(&layouts, &state(0.0), 4.0);
    for (o, base) in out.ornaments.iter().zip(&layouts.ornaments.scale) {
        assert!((o.scale - 0.5 * base).abs() < 1e-6);
        assert!(o.rotation.abs_diff_eq(glam::Quat::IDENTITY, 1e-6));
    }

    // ease_out_cubic(0.5) = 0.875
    let t = 0.875;
    let out = blender.blend(&layouts, &state(0.5), 4.0);
    let expected = glam::Quat::from_euler(
        glam::EulerRot::XYZ,
        t * std::f32::consts::TAU,
        t * std::f32::consts::PI,
        0.0,
    );
    for (o, base) in out.ornaments.iter().zip(&layouts.ornaments.scale) {
        assert!((o.scale - base * (0.5 + 0.5 * t)).abs() < 1e-5);
        assert!(o.rotation.abs_diff_eq(expected, 1e-5));
    }

    let out = blender.blend(&layouts, &state(1.0), 4.0);
    for (o, base) in out.ornaments.iter().zip(&layouts.ornaments.scale) {
        assert!((o.scale - base).abs() < 1e-6);
    }
}

#[test]
fn ornaments_wobble_by_index_only_while_mostly_scattered() {
    let layouts = Layouts::generate(&small_config(), 17);
    let mut blender = Blender::new(&layouts);
    let time = 1.75;

    let out = blender.blend(&layouts, &state(0.0), time);
    for (i, (o, chaos)) in out.ornaments.iter().zip(&layouts.ornaments.chaos).enumerate() {
        let wobble = (time + i as f32).sin() * ORNAMENT_WOBBLE_AMPLITUDE;
        assert!((o.position.y - (chaos.y + wobble)).abs() < 1e-5, "ornament {i}");
    }

    // at exactly the wobble threshold the ornaments are still
    let t = ease_out_cubic(ORNAMENT_WOBBLE_BELOW);
    let out = blender.blend(&layouts, &state(ORNAMENT_WOBBLE_BELOW), time);
    for ((o, chaos), target) in out
        .ornaments
        .iter()
        .zip(&layouts.ornaments.chaos)
        .zip(&layouts.ornaments.target)
    {
        assert!((o.position - chaos.lerp(*target, t)).length() < 1e-5);
    }
}

#[test]
fn gifts_spin_about_the_vertical_axis_offset_by_index() {
    let layouts = Layouts::generate(&small_config(), 18);
    let mut blender = Blender::new(&layouts);
    let time = 2.5;
    let out = blender.blend(&layouts, &state(0.3), time);
    for (i, (o, base)) in out.gifts.iter().zip(&layouts.gifts.scale).enumerate() {
        let angle = time * GIFT_SPIN_RATE + i as f32;
        // a yaw leaves +Y alone and turns +X by the angle
        assert!((o.rotation * glam::Vec3::Y - glam::Vec3::Y).length() < 1e-5);
        let x = o.rotation * glam::Vec3::X;
        assert!((x - glam::Vec3::new(angle.cos(), 0.0, -angle.sin())).length() < 1e-5);
        assert_eq!(o.scale, *base);
    }
}

#[test]
fn foliage_sways_and_shimmers_between_emerald_and_gold() {
    let layouts = Layouts::generate(&small_config(), 19);
    let mut blender = Blender::new(&layouts);
    let time = 0.8;
    let out = blender.blend(&layouts, &state(1.0), time);
    let foliage = &layouts.foliage;
    for (i, (o, shade)) in out.foliage.iter().zip(&out.foliage_shade).enumerate() {
        let target = foliage.target[i];
        assert_eq!(foliage.color[i], palette::EMERALD);

        let sway = (time * FOLIAGE_SWAY_FREQ + target.y).sin() * FOLIAGE_SWAY_AMPLITUDE;
        assert!((o.position.x - (target.x + sway)).abs() < 1e-4, "sway {i}");
        assert_eq!(o.scale, foliage.scale[i]);

        let shimmer =
            (time * FOLIAGE_SHIMMER_FREQ + foliage.phase[i] * FOLIAGE_SHIMMER_PHASE_SCALE).sin()
                * 0.5
                + 0.5;
        let light = (target.y / 20.0 + 0.5).clamp(0.4, 1.0);
        let expected = palette::scale(
            palette::mix(palette::EMERALD, palette::GOLD, shimmer * FOLIAGE_HIGHLIGHT_MIX),
            light,
        );
        for c in 0..3 {
            assert!((shade[c] - expected[c]).abs() < 1e-4, "shade {i}: {shade:?} != {expected:?}");
        }
    }
}

#[test]
fn scattered_photos_tumble_over_time() {
    let layouts = Layouts::generate(&small_config(), 14);
    let mut blender = Blender::new(&layouts);
    let early: Vec<_> = blender
        .blend(&layouts, &state(0.2), 0.0)
        .photos
        .iter()
        .map(|o| o.rotation)
        .collect();
    assert!(early.iter().all(|q| q.abs_diff_eq(glam::Quat::IDENTITY, 1e-6)));
    let later = blender.blend(&layouts, &state(0.2), 10.0);
    for (o, spin) in later.photos.iter().zip(&layouts.photos.spin) {
        if *spin > 0.01 {
            assert!(!o.rotation.abs_diff_eq(glam::Quat::IDENTITY, 1e-3));
        }
    }
}

#[test]
fn blending_is_stateless_between_frames() {
    let layouts = Layouts::generate(&small_config(), 15);
    let mut a = Blender::new(&layouts);
    let mut b = Blender::new(&layouts);
    for p in [1.0, 0.3, 0.0, 0.8] {
        a.blend(&layouts, &state(p), 2.0);
    }
    let last_a = a.blend(&layouts, &state(0.5), 2.0).clone();
    let last_b = b.blend(&layouts, &state(0.5), 2.0);
    assert_eq!(last_a.foliage, last_b.foliage);
    assert_eq!(last_a.photos, last_b.photos);
}

#[test]
fn scene_starts_formed_and_blessed() {
    let mut scene = Scene::new(small_config(), 21).expect("valid config");
    let frame = scene.tick(0.0);
    assert_eq!(frame.state.mode, Mode::Formed);
    assert_eq!(frame.state.progress, 1.0);
    assert!(frame.show_blessing());
    assert!(!frame.show_chaos_hint());
    assert_eq!(frame.eased_progress(), 1.0);
}

#[test]
fn ui_gates_follow_progress() {
    let mut scene = Scene::new(small_config(), 22).expect("valid config");
    scene.push_motion(MotionSignal::new(0.6, 0.0));
    for _ in 0..3 {
        scene.tick(0.0);
    }
    // 0.85: no blessing, no hint yet
    let frame = scene.frame();
    assert!(!frame.show_blessing());
    assert!(!frame.show_chaos_hint());

    for _ in 0..8 {
        scene.tick(0.0);
    }
    // 0.45
    let frame = scene.frame();
    assert!(frame.show_chaos_hint());
    assert!(!frame.show_blessing());
    let eased = frame.eased_progress();
    assert!((eased - ease_out_cubic(frame.state.progress)).abs() < 1e-6);
}

#[test]
fn simulated_chaos_scatters_and_release_restores() {
    let mut scene = Scene::new(small_config(), 23).expect("valid config");
    scene.set_simulated_chaos(true);
    for _ in 0..30 {
        scene.tick(0.0);
    }
    assert_eq!(scene.frame().state.progress, 0.0);
    assert_eq!(scene.frame().state.mode, Mode::Chaos);

    scene.set_simulated_chaos(false);
    for _ in 0..60 {
        scene.tick(0.0);
    }
    let frame = scene.frame();
    assert_eq!(frame.state.mode, Mode::Formed);
    assert_eq!(frame.state.progress, 1.0);
    assert!(frame.show_blessing());
}

#[test]
fn motion_centroid_orbits_the_camera() {
    let mut scene = Scene::new(small_config(), 24).expect("valid config");
    let start = scene.rig().position();
    scene.push_motion(MotionSignal::new(0.0, 0.9));
    for _ in 0..50 {
        scene.tick(0.0);
    }
    let frame = scene.frame();
    assert!(frame.state.rotation > 0.0);
    assert!(frame.camera_position.x > start.x);
    assert_eq!(frame.camera_position, scene.rig().position());
}

#[test]
fn batches_cover_every_population_in_order() {
    let mut scene = Scene::new(small_config(), 25).expect("valid config");
    let frame = scene.tick(0.5);
    let kinds: Vec<_> = frame.batches().iter().map(|(p, _)| p.kind).collect();
    assert_eq!(kinds, PopulationKind::ALL.to_vec());
    for (pop, transforms) in frame.batches() {
        assert_eq!(pop.len(), transforms.len());
    }
}

#[test]
fn invalid_config_fails_scene_creation() {
    let config = SceneConfig {
        tree_radius: -1.0,
        ..small_config()
    };
    assert!(Scene::new(config, 0).is_err());
}
