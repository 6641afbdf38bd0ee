use glam::Vec3;
use scene_core::interaction::CursorHint;
use scene_core::layout::EquipmentId;
use scene_core::scene::Scene;

#[test]
fn compose_builds_the_complete_plant() {
    let scene = Scene::compose().unwrap();
    assert_eq!(scene.models.len(), 7);
    assert_eq!(scene.pipes.runs.len(), 6);
    assert_eq!(scene.flows.arrows.len(), 5);
    assert_eq!(scene.flows.captions.len(), 2);
}

#[test]
fn picking_hits_the_unit_in_front_of_the_ray() {
    let scene = Scene::compose().unwrap();
    // Straight down the z axis at the reactor.
    let hit = scene.pick(Vec3::new(-2.0, 0.0, 10.0), Vec3::NEG_Z);
    assert_eq!(hit, Some(EquipmentId::Reactor));
    // Off into empty space.
    let miss = scene.pick(Vec3::new(0.0, 50.0, 10.0), Vec3::NEG_Z);
    assert_eq!(miss, None);
}

#[test]
fn picking_prefers_the_nearer_of_overlapping_units() {
    let scene = Scene::compose().unwrap();
    // Separation tank (6,0,0) and oil tank (8,0,0) from the left: the ray
    // along +x crosses both spheres, the separation tank first.
    let hit = scene.pick(Vec3::new(4.0, 0.0, 0.0), Vec3::X);
    assert_eq!(hit, Some(EquipmentId::SeparationTank));
}

#[test]
fn pointer_move_hovers_exactly_one_unit_and_sets_the_cursor() {
    let mut scene = Scene::compose().unwrap();
    let cursor = scene.pointer_move(Some(EquipmentId::Condenser));
    assert_eq!(cursor, CursorHint::Pointer);
    assert_eq!(cursor.css_value(), "pointer");
    let hovered: Vec<_> = scene
        .models
        .iter()
        .filter(|m| m.state.hovered)
        .map(|m| m.id)
        .collect();
    assert_eq!(hovered, [EquipmentId::Condenser]);

    // Moving to another unit swaps the hover atomically.
    scene.pointer_move(Some(EquipmentId::GasTank));
    let hovered: Vec<_> = scene
        .models
        .iter()
        .filter(|m| m.state.hovered)
        .map(|m| m.id)
        .collect();
    assert_eq!(hovered, [EquipmentId::GasTank]);

    // Leaving restores the cursor.
    let cursor = scene.pointer_move(None);
    assert_eq!(cursor, CursorHint::Default);
    assert_eq!(cursor.css_value(), "auto");
    assert!(scene.models.iter().all(|m| !m.state.hovered));
}

#[test]
fn click_toggles_only_the_hit_unit() {
    let mut scene = Scene::compose().unwrap();
    let info = scene.click(Some(EquipmentId::Reactor)).unwrap();
    assert_eq!(info.name, "Reaktor Pirolisis");
    for m in &scene.models {
        assert_eq!(m.state.active, m.id == EquipmentId::Reactor);
    }

    // Second click on the same unit switches it back off.
    scene.click(Some(EquipmentId::Reactor));
    assert!(scene.models.iter().all(|m| !m.state.active));
}

#[test]
fn click_misses_change_nothing() {
    let mut scene = Scene::compose().unwrap();
    scene.click(Some(EquipmentId::OilTank));
    assert_eq!(scene.click(None), None);
    assert_eq!(scene.selection.selected(), Some(EquipmentId::OilTank));
    let active: Vec<_> = scene
        .models
        .iter()
        .filter(|m| m.state.active)
        .map(|m| m.id)
        .collect();
    assert_eq!(active, [EquipmentId::OilTank]);
}

#[test]
fn selection_slot_keeps_the_last_clicked_unit() {
    let mut scene = Scene::compose().unwrap();
    scene.click(Some(EquipmentId::OilTank));
    scene.click(Some(EquipmentId::FeedTank));
    assert_eq!(scene.selection.selected(), Some(EquipmentId::FeedTank));

    // Toggling a unit off still leaves it selected; the slot is never
    // cleared.
    scene.click(Some(EquipmentId::FeedTank));
    assert_eq!(scene.selection.selected(), Some(EquipmentId::FeedTank));
}

#[test]
fn labels_cover_the_four_captioned_units() {
    let scene = Scene::compose().unwrap();
    let labels = scene.equipment_labels();
    let texts: Vec<_> = labels.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        texts,
        ["Feed Tank", "Reactor", "Condenser", "Separation Tank"]
    );
    for (_, pos) in labels {
        assert_eq!(pos.y, 1.5);
    }
}

#[test]
fn update_breathes_the_group_and_ticks_every_unit() {
    let mut scene = Scene::compose().unwrap();
    scene.click(Some(EquipmentId::Reactor));
    let mut elapsed = 0.0;
    let dt = 1.0 / 60.0;
    for _ in 0..120 {
        elapsed += dt;
        scene.update(dt, elapsed);
    }
    assert!(scene.breathe_y().abs() <= 0.05 + 1e-6);
    assert!(scene.breathe_y() != 0.0);
    let reactor = scene.model(EquipmentId::Reactor).unwrap();
    assert!(reactor.emissive_intensity() > 0.0);
}
