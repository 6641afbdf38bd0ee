//! Directional flow annotations: arrows along the process path plus text
//! captions. Visually offset from the physical pipes but keyed by the same
//! layout registry.

use glam::Vec3;

use crate::constants::{ARROW_HEAD_SIZE, FLOW_LABEL_LIFT};
use crate::layout::{EquipmentId, LayoutError, LayoutRegistry};
use crate::piping::Anchor;

struct FlowSpec {
    start: Anchor,
    end: Anchor,
    color: [f32; 4],
    label: &'static str,
}

use EquipmentId::*;

const FLOW_SPECS: &[FlowSpec] = &[
    FlowSpec {
        start: Anchor::new(FeedTank, 0.5, 0.2, -0.5),
        end: Anchor::new(Reactor, -0.5, 0.2, -0.5),
        color: [0.40, 0.80, 1.00, 1.0], // #66ccff
        label: "Oli Bekas",
    },
    FlowSpec {
        start: Anchor::new(Reactor, 0.5, 0.2, -0.5),
        end: Anchor::new(Condenser, -0.5, 0.2, -0.5),
        color: [1.00, 0.67, 0.27, 1.0], // #ffaa44
        label: "Uap Hidrokarbon",
    },
    FlowSpec {
        start: Anchor::new(Condenser, 0.5, 0.2, -0.5),
        end: Anchor::new(SeparationTank, -0.5, 0.2, -0.5),
        color: [0.27, 0.67, 1.00, 1.0], // #44aaff
        label: "Kondensat",
    },
    FlowSpec {
        start: Anchor::new(SeparationTank, 0.0, 0.5, -0.2),
        end: Anchor::new(GasTank, 0.0, 0.5, 0.5),
        color: [0.53, 1.00, 0.67, 1.0], // #88ffaa
        label: "Gas",
    },
    FlowSpec {
        start: Anchor::new(SeparationTank, 0.5, -0.2, -0.5),
        end: Anchor::new(OilTank, -0.5, -0.2, -0.5),
        color: [0.67, 0.40, 0.13, 1.0], // #aa6622
        label: "Minyak",
    },
];

/// A directional indicator: a shaft from start to midpoint, a small arrowhead
/// oriented along the flow, and a label anchor above the midpoint.
pub struct FlowArrow {
    pub shaft: [Vec3; 2],
    pub head: [Vec3; 3],
    pub color: [f32; 4],
    pub label: &'static str,
    pub label_position: Vec3,
}

/// Build a flow arrow from world-space endpoints.
///
/// The arrowhead is derived purely from the normalized direction vector; a
/// degenerate `start == end` yields a zero-length head rather than NaNs.
pub fn flow_arrow(start: Vec3, end: Vec3, color: [f32; 4], label: &'static str) -> FlowArrow {
    let dir = (end - start).normalize_or_zero();
    let mid = start.lerp(end, 0.5);
    let h = ARROW_HEAD_SIZE;

    // Two barbs splayed sideways in the horizontal plane, trailing the tip.
    let left = Vec3::new(
        mid.x - dir.x * h - dir.z * h * 0.5,
        mid.y - dir.y * h,
        mid.z - dir.z * h + dir.x * h * 0.5,
    );
    let right = Vec3::new(
        mid.x - dir.x * h + dir.z * h * 0.5,
        mid.y - dir.y * h,
        mid.z - dir.z * h - dir.x * h * 0.5,
    );

    FlowArrow {
        shaft: [start, mid],
        head: [left, mid, right],
        color,
        label,
        label_position: mid + Vec3::new(0.0, FLOW_LABEL_LIFT, 0.0),
    }
}

/// A free-standing text caption in the scene.
pub struct Caption {
    pub text: &'static str,
    pub position: Vec3,
    pub color: [f32; 4],
}

pub struct FlowPlan {
    pub arrows: Vec<FlowArrow>,
    pub captions: Vec<Caption>,
}

impl FlowPlan {
    pub fn from_registry(registry: &LayoutRegistry) -> Result<Self, LayoutError> {
        let mut arrows = Vec::with_capacity(FLOW_SPECS.len());
        for spec in FLOW_SPECS {
            let start = spec.start.resolve(registry)?;
            let end = spec.end.resolve(registry)?;
            arrows.push(flow_arrow(start, end, spec.color, spec.label));
        }

        // Operating-temperature captions at the hot and cold ends.
        let captions = vec![
            Caption {
                text: "400-600\u{b0}C",
                position: registry.require(Reactor)? + Vec3::new(0.0, 1.8, 0.0),
                color: [1.00, 0.27, 0.13, 1.0], // #ff4422
            },
            Caption {
                text: "25-40\u{b0}C",
                position: registry.require(Condenser)? + Vec3::new(0.0, 1.5, 0.0),
                color: [0.27, 0.67, 1.00, 1.0], // #44aaff
            },
        ];

        Ok(Self { arrows, captions })
    }

    /// Ids referenced by the flow table, for startup validation.
    pub fn referenced_ids() -> impl Iterator<Item = EquipmentId> {
        FLOW_SPECS.iter().flat_map(|s| [s.start.id, s.end.id])
    }
}
