use glam::Vec3;
use scene_core::constants::{ARROW_HEAD_SIZE, FLOW_LABEL_LIFT};
use scene_core::flow::{flow_arrow, FlowPlan};
use scene_core::layout::LayoutRegistry;

#[test]
fn shaft_runs_from_start_to_midpoint() {
    let start = Vec3::new(0.0, 0.2, 0.0);
    let end = Vec3::new(4.0, 0.2, 0.0);
    let arrow = flow_arrow(start, end, [1.0; 4], "Uap");
    assert_eq!(arrow.shaft[0], start);
    assert_eq!(arrow.shaft[1], Vec3::new(2.0, 0.2, 0.0));
}

#[test]
fn head_tip_is_the_midpoint_and_barbs_trail_it() {
    let arrow = flow_arrow(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), [1.0; 4], "x");
    let mid = Vec3::new(2.0, 0.0, 0.0);
    assert_eq!(arrow.head[1], mid);
    for barb in [arrow.head[0], arrow.head[2]] {
        assert!((barb.x - (mid.x - ARROW_HEAD_SIZE)).abs() < 1e-5);
        assert!((barb.z.abs() - ARROW_HEAD_SIZE * 0.5).abs() < 1e-5);
    }
    // Barbs splay to opposite sides.
    assert!(arrow.head[0].z * arrow.head[2].z < 0.0);
}

#[test]
fn head_follows_the_flow_direction() {
    // Reversed flow: barbs must trail on the other side of the tip.
    let arrow = flow_arrow(Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO, [1.0; 4], "x");
    let mid = Vec3::new(2.0, 0.0, 0.0);
    for barb in [arrow.head[0], arrow.head[2]] {
        assert!(barb.x > mid.x);
    }
}

#[test]
fn degenerate_endpoints_yield_a_finite_zero_length_head() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    let arrow = flow_arrow(p, p, [1.0; 4], "x");
    for v in [arrow.shaft[0], arrow.shaft[1], arrow.head[0], arrow.head[1], arrow.head[2]] {
        assert!(v.is_finite());
        assert_eq!(v, p);
    }
}

#[test]
fn label_floats_above_the_midpoint() {
    let arrow = flow_arrow(Vec3::ZERO, Vec3::new(2.0, 0.0, 2.0), [1.0; 4], "Gas");
    assert_eq!(
        arrow.label_position,
        Vec3::new(1.0, FLOW_LABEL_LIFT, 1.0)
    );
}

#[test]
fn plan_carries_every_stream_and_both_temperature_captions() {
    let plan = FlowPlan::from_registry(&LayoutRegistry::standard()).unwrap();
    let labels: Vec<_> = plan.arrows.iter().map(|a| a.label).collect();
    assert_eq!(
        labels,
        ["Oli Bekas", "Uap Hidrokarbon", "Kondensat", "Gas", "Minyak"]
    );
    let captions: Vec<_> = plan.captions.iter().map(|c| c.text).collect();
    assert_eq!(captions, ["400-600\u{b0}C", "25-40\u{b0}C"]);
}
