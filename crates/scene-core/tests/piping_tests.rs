use glam::Vec3;
use scene_core::constants::{PIPE_ARC_HEIGHT, PIPE_PATH_SEGMENTS};
use scene_core::layout::LayoutRegistry;
use scene_core::piping::{create_pipe_path, PipeNetwork};

#[test]
fn path_has_exact_endpoints() {
    let start = Vec3::new(-5.0, 0.5, -2.0);
    let end = Vec3::new(-3.0, 0.5, 0.0);
    let points = create_pipe_path(start, end, 0.8, 20);
    assert_eq!(points.len(), 21);
    assert_eq!(points[0], start);
    assert_eq!(points[20], end);
}

#[test]
fn midpoint_sits_exactly_height_above_the_baseline() {
    let points = create_pipe_path(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 1.0, 20);
    let mid = points[10];
    assert!((mid.x - 2.0).abs() < 1e-5);
    assert!((mid.y - 1.0).abs() < 1e-5);
    assert!(mid.z.abs() < 1e-5);
}

#[test]
fn elevation_is_relative_to_the_lerped_baseline() {
    // Endpoints at different heights: the bump rides on the straight line
    // between them rather than on the start height.
    let start = Vec3::new(0.0, 0.0, 0.0);
    let end = Vec3::new(4.0, 2.0, 0.0);
    let points = create_pipe_path(start, end, 0.5, 20);
    let mid = points[10];
    assert!((mid.y - (1.0 + 0.5)).abs() < 1e-5);
}

#[test]
fn interior_points_never_dip_below_the_baseline() {
    let start = Vec3::new(6.0, 1.0, -0.5);
    let end = Vec3::new(6.0, 0.5, -4.0);
    let points = create_pipe_path(start, end, 0.8, 20);
    for (i, p) in points.iter().enumerate() {
        let t = i as f32 / 20.0;
        let base_y = start.y + (end.y - start.y) * t;
        assert!(p.y >= base_y - 1e-5, "point {i} below baseline");
    }
}

#[test]
fn degenerate_segment_count_is_clamped() {
    let points = create_pipe_path(Vec3::ZERO, Vec3::X, 0.8, 0);
    assert_eq!(points.len(), 3);
    assert_eq!(points[0], Vec3::ZERO);
    assert_eq!(points[2], Vec3::X);
}

#[test]
fn network_builds_one_run_per_connection() {
    let network = PipeNetwork::from_registry(&LayoutRegistry::standard()).unwrap();
    assert_eq!(network.runs.len(), 6);
    for run in &network.runs {
        assert_eq!(run.points.len(), PIPE_PATH_SEGMENTS + 1);
        // Every run arcs: some interior point is above both endpoints.
        let top = run
            .points
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max);
        assert!(top >= run.points[0].y.max(run.points[20].y) + PIPE_ARC_HEIGHT * 0.45);
    }
}
