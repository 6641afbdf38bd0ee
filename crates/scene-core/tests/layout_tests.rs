use glam::Vec3;
use scene_core::flow::FlowPlan;
use scene_core::layout::{EquipmentId, LayoutError, LayoutRegistry};
use scene_core::piping::PipeNetwork;
use scene_core::scene::Scene;

#[test]
fn standard_registry_covers_every_unit() {
    let registry = LayoutRegistry::standard();
    assert_eq!(registry.len(), EquipmentId::ALL.len());
    for id in EquipmentId::ALL {
        assert!(registry.position(id).is_some(), "{id:?} missing");
    }
}

#[test]
fn standard_positions_match_the_plant_arrangement() {
    let registry = LayoutRegistry::standard();
    assert_eq!(
        registry.position(EquipmentId::FeedTank),
        Some(Vec3::new(-6.0, 0.0, -2.0))
    );
    assert_eq!(
        registry.position(EquipmentId::Reactor),
        Some(Vec3::new(-2.0, 0.0, 0.0))
    );
    assert_eq!(
        registry.position(EquipmentId::OilTank),
        Some(Vec3::new(8.0, 0.0, 0.0))
    );
    assert_eq!(
        registry.position(EquipmentId::ControlPanel),
        Some(Vec3::new(-7.0, 0.0, 4.0))
    );
}

#[test]
fn connection_tables_resolve_against_the_standard_layout() {
    let registry = LayoutRegistry::standard();
    for id in PipeNetwork::referenced_ids().chain(FlowPlan::referenced_ids()) {
        assert!(registry.require(id).is_ok());
    }
}

#[test]
fn require_reports_the_missing_id() {
    let registry = LayoutRegistry::with_positions([(EquipmentId::Reactor, Vec3::ZERO)]);
    assert_eq!(registry.require(EquipmentId::Reactor), Ok(Vec3::ZERO));
    assert_eq!(
        registry.require(EquipmentId::GasTank),
        Err(LayoutError::UnknownEquipment(EquipmentId::GasTank))
    );
}

#[test]
fn compose_fails_fast_when_a_referenced_unit_is_unregistered() {
    // Everything except the gas tank, which both tables reference.
    let registry = LayoutRegistry::with_positions(
        EquipmentId::ALL
            .iter()
            .filter(|&&id| id != EquipmentId::GasTank)
            .map(|&id| (id, Vec3::ZERO)),
    );
    assert_eq!(
        Scene::compose_with(registry).err(),
        Some(LayoutError::UnknownEquipment(EquipmentId::GasTank))
    );
}

#[test]
fn labels_are_distinct_and_nonempty() {
    let mut seen = Vec::new();
    for id in EquipmentId::ALL {
        let label = id.label();
        assert!(!label.is_empty());
        assert!(!seen.contains(&label));
        seen.push(label);
    }
}
