use glam::{Mat4, Vec3};
use scene_core::geometry::{build_equipment, floor_mesh, flow_lines, pipe_mesh, Mesh};
use scene_core::layout::{EquipmentId, LayoutRegistry};
use scene_core::flow::FlowPlan;
use scene_core::piping::PipeNetwork;

fn assert_well_formed(mesh: &Mesh) {
    assert!(!mesh.vertices.is_empty());
    assert_eq!(mesh.indices.len() % 3, 0);
    let n = mesh.vertices.len() as u32;
    for &i in &mesh.indices {
        assert!(i < n, "index {i} out of range {n}");
    }
    for v in &mesh.vertices {
        for c in v.position {
            assert!(c.is_finite());
        }
        // Normals come out of the builders unit-length, or exactly zero for
        // the degenerate case.
        let len = Vec3::from(v.normal).length();
        assert!(
            (len - 1.0).abs() < 1e-4 || len == 0.0,
            "normal length {len}"
        );
    }
}

#[test]
fn every_unit_produces_a_well_formed_body() {
    for id in EquipmentId::ALL {
        let set = build_equipment(id);
        assert_well_formed(&set.body);
        for part in [&set.coils, &set.screen, &set.liquid, &set.level_marker, &set.particle] {
            if let Some(mesh) = part {
                assert_well_formed(mesh);
            }
        }
    }
}

#[test]
fn optional_parts_match_each_unit_kind() {
    let has = |id: EquipmentId| build_equipment(id);
    assert!(has(EquipmentId::Reactor).coils.is_some());
    assert!(has(EquipmentId::ControlPanel).screen.is_some());
    assert!(has(EquipmentId::OilTank).liquid.is_some());
    assert!(has(EquipmentId::OilTank).level_marker.is_some());
    assert!(has(EquipmentId::SeparationTank).liquid.is_some());
    assert!(has(EquipmentId::Condenser).particle.is_some());
    assert!(has(EquipmentId::GasTank).particle.is_some());

    let feed = has(EquipmentId::FeedTank);
    assert!(feed.coils.is_none());
    assert!(feed.screen.is_none());
    assert!(feed.liquid.is_none());
}

#[test]
fn primitives_respect_their_transforms() {
    let mut mesh = Mesh::new();
    mesh.push_sphere(Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)), 1.0, 16, [1.0; 4]);
    for v in &mesh.vertices {
        let p = Vec3::from(v.position);
        assert!((p.distance(Vec3::new(5.0, 0.0, 0.0)) - 1.0).abs() < 1e-4);
    }
}

#[test]
fn tube_follows_its_polyline() {
    let points = vec![
        Vec3::ZERO,
        Vec3::new(1.0, 0.5, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
    ];
    let mut mesh = Mesh::new();
    mesh.push_tube(&points, 0.15, 8, [1.0; 4]);
    assert_well_formed(&mesh);
    // One ring of sides+1 vertices per path point.
    assert_eq!(mesh.vertices.len(), points.len() * 9);
    // Every vertex sits on a ring of the tube radius around some path point.
    for v in &mesh.vertices {
        let p = Vec3::from(v.position);
        let closest = points
            .iter()
            .map(|c| p.distance(*c))
            .fold(f32::INFINITY, f32::min);
        assert!(closest < 0.15 + 1e-4);
    }
}

#[test]
fn degenerate_tube_is_empty() {
    let mut mesh = Mesh::new();
    mesh.push_tube(&[Vec3::ZERO], 0.15, 8, [1.0; 4]);
    assert!(mesh.vertices.is_empty());
    assert!(mesh.indices.is_empty());
}

#[test]
fn pipe_mesh_merges_all_runs() {
    let registry = LayoutRegistry::standard();
    let network = PipeNetwork::from_registry(&registry).unwrap();
    let mesh = pipe_mesh(&network);
    assert_well_formed(&mesh);
    // 6 runs of 21 rings of 9 vertices each.
    assert_eq!(mesh.vertices.len(), 6 * 21 * 9);
}

#[test]
fn flow_lines_emit_three_segments_per_arrow() {
    let plan = FlowPlan::from_registry(&LayoutRegistry::standard()).unwrap();
    let lines = flow_lines(&plan);
    assert_eq!(lines.len(), plan.arrows.len() * 6);
    for v in &lines {
        for c in v.position {
            assert!(c.is_finite());
        }
    }
}

#[test]
fn floor_sits_under_the_equipment() {
    let mesh = floor_mesh();
    assert_well_formed(&mesh);
    for v in &mesh.vertices {
        assert!(v.position[1] <= -1.0 + 1e-4);
    }
}
