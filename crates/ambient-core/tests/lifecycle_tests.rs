// Host-side integration tests for mount, frame loop and teardown.

use ambient_core::testing::{DrawCall, ManualHost};
use ambient_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn discrete(count: usize) -> FieldConfig {
    FieldConfig {
        count,
        motion: MotionMode::Discrete,
        ..FieldConfig::default()
    }
}

fn mounted(config: FieldConfig, host: ManualHost, seed: u64) -> Lifecycle<ManualHost> {
    let mut lc = Lifecycle::new(host);
    let outcome = lc.mount(config, &mut StdRng::seed_from_u64(seed));
    assert_eq!(outcome, MountOutcome::Running);
    lc
}

#[test]
fn three_particles_drawn_at_scaled_positions_after_resize() {
    let mut lc = mounted(discrete(3), ManualHost::default(), 1234);
    let surface = lc.host().surface.clone();
    assert_eq!(surface.backing(), (0, 0));

    lc.on_event(HostEvent::Resize(Viewport::new(800.0, 600.0, 1.0)));
    lc.frame();

    let ranges = ParticleRanges::default();
    let particles: Vec<Particle> = lc.store().unwrap().iter().cloned().collect();
    let discs = surface.discs();
    assert_eq!(discs.len(), 3);
    for (disc, p) in discs.iter().zip(&particles) {
        assert_eq!(disc.x, p.position.x as f64 * 800.0);
        assert_eq!(disc.y, p.position.y as f64 * 600.0);
        assert_eq!(disc.radius, p.radius as f64);
        assert_eq!(disc.alpha, p.opacity as f64);
        assert_eq!(disc.fill, "#ffffff");
        assert!(ranges.radius.contains(&p.radius));
        assert!(ranges.opacity.contains(&p.opacity));
    }
    assert_eq!(surface.backing(), (800, 600));
    assert_eq!(surface.current_alpha(), 1.0);

    // same seed, same field
    let again = mounted(discrete(3), ManualHost::default(), 1234);
    assert_eq!(again.store().unwrap().positions(), lc.store().unwrap().positions());
}

#[test]
fn mount_draws_once_and_schedules_next_frame() {
    let host = ManualHost::with_viewport(Viewport::new(320.0, 240.0, 2.0));
    let lc = mounted(discrete(4), host, 7);
    let host = lc.host();
    assert_eq!(host.surface.backing(), (640, 480));
    assert_eq!(host.surface.effective_scale(), 2.0);
    assert_eq!(host.surface.discs().len(), 4);
    assert!(host.is_listening());
    assert!(host.pending_frame().is_some());
    assert_eq!(lc.ticks(), 1);
}

#[test]
fn each_frame_reschedules_itself() {
    let mut lc = mounted(discrete(2), ManualHost::default(), 3);
    for _ in 0..5 {
        lc.frame();
    }
    assert_eq!(lc.ticks(), 6);
    assert_eq!(lc.host().requested.len(), 6);
    assert!(lc.has_pending_frame());
}

#[test]
fn no_work_after_unmount() {
    let mut lc = mounted(discrete(5), ManualHost::default(), 11);
    lc.frame();
    lc.unmount();

    let surface = lc.host().surface.clone();
    surface.clear_log();
    lc.on_event(HostEvent::Scroll(400.0));
    lc.on_event(HostEvent::Resize(Viewport::new(1024.0, 768.0, 2.0)));
    lc.frame();
    lc.frame();

    assert!(surface.calls().is_empty());
    assert_eq!(lc.phase(), Phase::TornDown);
    assert_eq!(lc.host().pending_frame(), None);
    assert!(!lc.host().is_listening());
    assert_eq!(lc.host().cancelled.len(), 1);
    assert!(lc.store().is_none());
}

#[test]
fn unmount_is_idempotent() {
    let mut lc = mounted(discrete(1), ManualHost::default(), 2);
    lc.unmount();
    lc.unmount();
    assert_eq!(lc.host().detach_count, 1);
    assert_eq!(lc.host().cancelled.len(), 1);

    let mut never = Lifecycle::new(ManualHost::default());
    never.unmount();
    assert_eq!(never.host().detach_count, 0);
    assert_eq!(never.phase(), Phase::Idle);
}

#[test]
fn missing_surface_leaves_field_inert() {
    let mut host = ManualHost::default();
    host.surface_available = false;
    let mut lc = Lifecycle::new(host);
    let outcome = lc.mount(discrete(3), &mut StdRng::seed_from_u64(0));
    assert_eq!(outcome, MountOutcome::Inert);
    assert_eq!(lc.phase(), Phase::Inert);

    lc.on_event(HostEvent::Scroll(10.0));
    lc.frame();
    assert!(lc.host().requested.is_empty());
    assert_eq!(lc.host().attach_count, 0);
    assert!(lc.host().surface.calls().is_empty());
    lc.unmount();
    assert_eq!(lc.host().detach_count, 0);
}

#[test]
fn invalid_config_leaves_field_inert() {
    let mut config = FieldConfig::default();
    config.ranges.radius = 2.0..1.0;
    let mut lc = Lifecycle::new(ManualHost::default());
    assert_eq!(
        lc.mount(config, &mut StdRng::seed_from_u64(0)),
        MountOutcome::Inert
    );
    assert!(lc.host().surface.calls().is_empty());
}

#[test]
fn zero_particles_still_runs_and_clears() {
    let mut lc = mounted(discrete(0), ManualHost::default(), 5);
    for _ in 0..3 {
        lc.frame();
    }
    let calls = lc.host().surface.calls();
    let clears = calls
        .iter()
        .filter(|c| matches!(c, DrawCall::Clear(..)))
        .count();
    assert_eq!(clears, 4);
    assert!(lc.host().surface.discs().is_empty());
    assert!(lc.is_running());
}

#[test]
fn remount_builds_fresh_particles_and_rewires() {
    let mut lc = mounted(discrete(3), ManualHost::default(), 21);
    let first_pending = lc.host().requested[0];
    let before = lc.store().unwrap().positions();

    let config = FieldConfig {
        count: 5,
        color: Color::parse_hex("#ff0000").unwrap(),
        ..discrete(0)
    };
    let outcome = lc.remount(config, &mut StdRng::seed_from_u64(22));
    assert_eq!(outcome, MountOutcome::Running);

    let store = lc.store().unwrap();
    assert_eq!(store.len(), 5);
    assert_ne!(store.positions()[..3], before[..]);
    assert!(lc.host().cancelled.contains(&first_pending));
    assert_eq!(lc.host().attach_count, 2);
    assert_eq!(lc.host().detach_count, 1);
    assert!(lc.host().pending_frame().is_some());
    assert_eq!(lc.ticks(), 1);
    assert!(lc.host().surface.discs().iter().all(|d| d.fill == "#ff0000"));
}

#[test]
fn mount_starts_from_current_scroll_offset() {
    let mut host = ManualHost::with_viewport(Viewport::new(800.0, 600.0, 1.0));
    host.scroll_offset = 500.0;
    let mut lc = mounted(discrete(4), host, 8);
    let before = lc.store().unwrap().positions();
    assert_eq!(lc.scroll_signal().unwrap().last_offset, 500.0);
    lc.on_event(HostEvent::Scroll(500.0));
    lc.frame();
    assert_eq!(lc.store().unwrap().positions(), before);
}

#[test]
fn resize_applies_before_scroll_within_a_tick() {
    let mut lc = mounted(discrete(6), ManualHost::default(), 13);
    let before: Vec<Particle> = lc.store().unwrap().iter().cloned().collect();

    lc.on_event(HostEvent::Scroll(60.0));
    lc.on_event(HostEvent::Resize(Viewport::new(800.0, 600.0, 1.0)));
    lc.frame();

    // displacement normalized by the new height: 60 / 600
    for (p0, p1) in before.iter().zip(lc.store().unwrap().iter()) {
        let expect_y = wrap_unit(p0.position.y + 0.1 * p0.scroll_sensitivity);
        let expect_x = wrap_unit(p0.position.x + 0.1 * p0.x_parallax);
        assert!((p1.position.y - expect_y).abs() < 1e-6);
        assert!((p1.position.x - expect_x).abs() < 1e-6);
    }
    assert_eq!(lc.scroll_signal().unwrap().accumulated_delta, 0.0);
}

#[test]
fn resize_does_not_move_particles() {
    let fall = FieldConfig::default();
    let mut resized = mounted(fall.clone(), ManualHost::default(), 99);
    let mut plain = mounted(fall, ManualHost::default(), 99);

    resized.on_event(HostEvent::Resize(Viewport::new(1280.0, 720.0, 2.0)));
    resized.on_event(HostEvent::Resize(Viewport::new(640.0, 480.0, 3.0)));
    resized.frame();
    plain.frame();

    assert_eq!(
        resized.store().unwrap().positions(),
        plain.store().unwrap().positions()
    );
    let surface = &resized.host().surface;
    assert_eq!(surface.backing(), (1920, 1440));
    assert_eq!(surface.effective_scale(), 3.0);
}
