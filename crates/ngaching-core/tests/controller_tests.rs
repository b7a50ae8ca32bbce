// Host-side tests for the mode/progress controller.

use ngaching_core::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn signal(score: f32) -> MotionSignal {
    MotionSignal::new(score, 0.0)
}

#[test]
fn score_above_trigger_scatters_the_tree() {
    assert_eq!(next_mode(0.3, TRIGGER_CHAOS_THRESHOLD), Mode::Chaos);
    assert_eq!(next_mode(0.1, TRIGGER_CHAOS_THRESHOLD), Mode::Formed);
    // the trigger must be strictly exceeded
    assert_eq!(next_mode(0.25, TRIGGER_CHAOS_THRESHOLD), Mode::Formed);
}

#[test]
fn scripted_scenario_matches_expected_modes_and_progress() {
    let mut ctl = Controller::new();
    let scores = [0.0, 0.0, 0.4, 0.4, 0.0, 0.0];
    let modes = [
        Mode::Formed,
        Mode::Formed,
        Mode::Chaos,
        Mode::Chaos,
        Mode::Formed,
        Mode::Formed,
    ];
    let progress = [1.0, 1.0, 0.95, 0.90, 0.92, 0.94];
    for (i, score) in scores.iter().enumerate() {
        let state = ctl.advance(signal(*score));
        assert_eq!(state.mode, modes[i], "mode at tick {i}");
        assert!(
            close(state.progress, progress[i]),
            "progress at tick {i}: {} != {}",
            state.progress,
            progress[i]
        );
    }
    assert_eq!(ctl.ticks(), 6);
}

#[test]
fn chaos_collapses_faster_than_form_restores() {
    let mut ctl = Controller::new();
    for _ in 0..10 {
        ctl.advance(signal(1.0));
    }
    assert!(close(ctl.state().progress, 0.5));

    let mut ctl = Controller::new().with_state(AnimationState {
        mode: Mode::Chaos,
        progress: 0.0,
        rotation: 0.0,
    });
    for _ in 0..25 {
        ctl.advance(signal(0.0));
    }
    assert!(close(ctl.state().progress, 0.5));
}

#[test]
fn progress_stays_in_unit_range_under_arbitrary_runs() {
    // Deterministic pseudo-random scores
    let mut x: u32 = 0x1234_5678;
    let mut ctl = Controller::new();
    for _ in 0..5000 {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        let score = (x % 1000) as f32 / 1000.0;
        let state = ctl.advance(signal(score));
        assert!((0.0..=1.0).contains(&state.progress));
    }
    for _ in 0..100 {
        assert!(ctl.advance(signal(1.0)).progress >= 0.0);
    }
    assert_eq!(ctl.state().progress, 0.0);
    for _ in 0..100 {
        assert!(ctl.advance(signal(0.0)).progress <= 1.0);
    }
    assert_eq!(ctl.state().progress, 1.0);
}

#[test]
fn signal_is_cached_between_samples() {
    let mut ctl = Controller::new();
    ctl.push_signal(signal(0.9));
    ctl.tick();
    let after_one = ctl.state().progress;
    ctl.tick();
    assert_eq!(ctl.state().mode, Mode::Chaos);
    assert!(ctl.state().progress < after_one);
}

#[test]
fn dead_zone_suppresses_rotation() {
    let mut ctl = Controller::new();
    for cx in [-0.2, -0.1, 0.0, 0.15, 0.2] {
        for _ in 0..20 {
            ctl.advance(MotionSignal::new(0.0, cx));
        }
    }
    assert_eq!(ctl.rotation_target(), 0.0);
    assert_eq!(ctl.state().rotation, 0.0);
}

#[test]
fn constant_center_grows_target_linearly() {
    let mut ctl = Controller::new();
    for n in 1..=40 {
        ctl.advance(MotionSignal::new(0.0, 0.5));
        assert!(close(ctl.rotation_target(), 0.025 * n as f32));
    }
    let mut ctl = Controller::new();
    ctl.advance(MotionSignal::new(0.0, -0.5));
    assert!(close(ctl.rotation_target(), -0.025));
}

#[test]
fn rotation_tracks_target_without_overshoot() {
    let mut ctl = Controller::new();
    let mut prev = ctl.state().rotation;
    // a steady centroid ramps the target for 100 ticks, then it holds
    for tick in 0..300 {
        let signal = if tick < 100 {
            MotionSignal::new(0.0, 0.5)
        } else {
            MotionSignal::default()
        };
        let state = ctl.advance(signal);
        let gap = ctl.rotation_target() - prev;
        let step = state.rotation - prev;
        assert!(gap >= 0.0, "target fell behind at tick {tick}");
        assert!(
            (step - gap * ROTATION_SMOOTHING).abs() < 1e-5,
            "tick {tick}: step {step} for gap {gap}"
        );
        assert!(
            state.rotation <= ctl.rotation_target() + 1e-6,
            "overshoot at tick {tick}"
        );
        prev = state.rotation;
    }
    assert!((ctl.rotation_target() - 2.5).abs() < 1e-4);
    assert!((ctl.rotation_target() - prev).abs() < 1e-3);
}

#[test]
fn params_are_readable_but_fixed_after_construction() {
    let params = ControllerParams {
        trigger_threshold: 0.4,
        ..ControllerParams::default()
    };
    let mut ctl = Controller::with_params(params);
    assert_eq!(ctl.params().trigger_threshold, 0.4);
    // 0.3 would scatter with the default trigger
    assert_eq!(ctl.advance(signal(0.3)).mode, Mode::Formed);
    assert_eq!(ctl.params().chaos_rate, CHAOS_RATE_PER_TICK);
}

#[test]
fn simulated_chaos_overrides_a_still_signal() {
    let mut ctl = Controller::new();
    ctl.set_simulated_chaos(true);
    let state = ctl.advance(signal(0.0));
    assert_eq!(state.mode, Mode::Chaos);
    assert!(close(state.progress, 0.95));

    ctl.set_simulated_chaos(false);
    assert_eq!(ctl.advance(signal(0.0)).mode, Mode::Formed);
}

#[test]
fn with_state_clamps_progress() {
    let ctl = Controller::new().with_state(AnimationState {
        mode: Mode::Formed,
        progress: 3.0,
        rotation: 1.5,
    });
    assert_eq!(ctl.state().progress, 1.0);
    assert_eq!(ctl.rotation_target(), 1.5);
}

#[test]
fn smoothing_moves_a_fixed_fraction() {
    assert!(close(smooth_toward(0.0, 1.0, 0.1), 0.1));
    assert!(close(smooth_toward(2.0, 2.0, 0.1), 2.0));
    assert!(close(integrate_progress(0.01, Mode::Chaos, 0.05, 0.02), 0.0));
    assert!(close(integrate_progress(0.99, Mode::Formed, 0.05, 0.02), 1.0));
    assert_eq!(accumulate_rotation(1.0, 0.3, 0.2, 0.05), 1.0 + 0.3 * 0.05);
}
