use glam::Vec3;
use scene_core::constants::{
    HOVER_SCALE, OIL_FILL_MAX, OIL_FILL_START, PARTICLE_MAX, REACTOR_EMISSIVE_BASE,
    REACTOR_EMISSIVE_SPAN, SCREEN_EMISSIVE_IDLE,
};
use scene_core::equipment::EquipmentModel;
use scene_core::layout::EquipmentId;

fn model(id: EquipmentId) -> EquipmentModel {
    EquipmentModel::new(id, Vec3::ZERO)
}

fn run(m: &mut EquipmentModel, seconds: f32) -> f32 {
    let dt = 1.0 / 60.0;
    let steps = (seconds / dt) as usize;
    let mut elapsed = 0.0;
    for _ in 0..steps {
        elapsed += dt;
        m.update(dt, elapsed);
    }
    elapsed
}

#[test]
fn inactive_reactor_has_exactly_zero_emissive() {
    let mut reactor = model(EquipmentId::Reactor);
    run(&mut reactor, 2.0);
    assert_eq!(reactor.emissive_intensity(), 0.0);
}

#[test]
fn running_reactor_emissive_oscillates_within_its_band() {
    let mut reactor = model(EquipmentId::Reactor);
    reactor.click();
    let dt = 1.0 / 60.0;
    let mut elapsed = 0.0;
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for _ in 0..240 {
        elapsed += dt;
        reactor.update(dt, elapsed);
        lo = lo.min(reactor.emissive_intensity());
        hi = hi.max(reactor.emissive_intensity());
    }
    assert!(lo >= REACTOR_EMISSIVE_BASE - REACTOR_EMISSIVE_SPAN - 1e-4);
    assert!(hi <= REACTOR_EMISSIVE_BASE + REACTOR_EMISSIVE_SPAN + 1e-4);
    // Four seconds covers more than one full period, so both halves show up.
    assert!(lo < REACTOR_EMISSIVE_BASE);
    assert!(hi > REACTOR_EMISSIVE_BASE);
}

#[test]
fn second_click_stops_the_reactor_glow() {
    let mut reactor = model(EquipmentId::Reactor);
    reactor.click();
    run(&mut reactor, 1.0);
    assert!(reactor.emissive_intensity() > 0.0);
    reactor.click();
    run(&mut reactor, 0.1);
    assert_eq!(reactor.emissive_intensity(), 0.0);
}

#[test]
fn hover_scale_approaches_target_without_overshoot() {
    let mut tank = model(EquipmentId::FeedTank);
    tank.pointer_enter();
    let mut prev = tank.scale();
    let dt = 1.0 / 60.0;
    for i in 0..120 {
        tank.update(dt, i as f32 * dt);
        assert!(tank.scale() >= prev - 1e-6);
        assert!(tank.scale() <= HOVER_SCALE + 1e-6);
        prev = tank.scale();
    }
    assert!((tank.scale() - HOVER_SCALE).abs() < 1e-3);

    tank.pointer_leave();
    run(&mut tank, 2.0);
    assert!((tank.scale() - 1.0).abs() < 1e-3);
}

#[test]
fn oil_tank_fills_while_running_and_caps() {
    let mut tank = model(EquipmentId::OilTank);
    assert_eq!(tank.fill_level(), OIL_FILL_START);

    run(&mut tank, 2.0);
    assert_eq!(tank.fill_level(), OIL_FILL_START, "must not fill while idle");

    tank.click();
    run(&mut tank, 2.0);
    let partial = tank.fill_level();
    assert!(partial > OIL_FILL_START && partial < OIL_FILL_MAX);

    run(&mut tank, 30.0);
    assert!((tank.fill_level() - OIL_FILL_MAX).abs() < 1e-5);
}

#[test]
fn gas_tank_particles_spawn_only_while_running_and_stay_bounded() {
    let mut tank = model(EquipmentId::GasTank);
    run(&mut tank, 1.0);
    assert!(tank.particles().is_empty());

    tank.click();
    run(&mut tank, 10.0);
    assert!(!tank.particles().is_empty());
    assert!(tank.particles().len() <= PARTICLE_MAX);
    for p in tank.particles() {
        assert!(p.alpha() >= 0.0 && p.alpha() <= 1.0);
    }

    // Stop: existing marks age out, nothing new appears.
    tank.click();
    run(&mut tank, 2.0);
    assert!(tank.particles().is_empty());
}

#[test]
fn control_panel_screen_glows_dimly_when_idle() {
    let mut panel = model(EquipmentId::ControlPanel);
    run(&mut panel, 1.0);
    assert_eq!(panel.emissive_intensity(), SCREEN_EMISSIVE_IDLE);

    panel.click();
    run(&mut panel, 1.0);
    assert!(panel.emissive_intensity() > SCREEN_EMISSIVE_IDLE);
}

#[test]
fn pick_sphere_is_centered_on_the_unit_position() {
    let at = Vec3::new(-6.0, 0.0, -2.0);
    for id in EquipmentId::ALL {
        let (center, radius) = EquipmentModel::new(id, at).pick_sphere();
        assert_eq!(center, at);
        assert!(radius > 1.0 && radius < 2.0);
    }
}

#[test]
fn separation_tank_liquid_bobs_only_while_running() {
    let mut tank = model(EquipmentId::SeparationTank);
    run(&mut tank, 1.0);
    assert_eq!(tank.liquid_bob(), 0.0);

    tank.click();
    let elapsed = run(&mut tank, 1.0);
    assert!(elapsed > 0.0);
    assert!(tank.liquid_bob() != 0.0);
}
