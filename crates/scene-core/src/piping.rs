//! Procedural piping between equipment units.
//!
//! A fixed connection table names equipment ids plus local anchor offsets;
//! endpoints are resolved through the [`LayoutRegistry`] at construction so
//! the layout exists in one place only. Path generation is deterministic:
//! exact endpoints, horizontal lerp in between, and a sine elevation bump
//! peaking at the midpoint.

use glam::Vec3;

use crate::constants::{PIPE_ARC_HEIGHT, PIPE_PATH_SEGMENTS};
use crate::layout::{EquipmentId, LayoutError, LayoutRegistry};

/// An endpoint expressed relative to a registered equipment position.
#[derive(Clone, Copy, Debug)]
pub struct Anchor {
    pub id: EquipmentId,
    pub offset: Vec3,
}

impl Anchor {
    pub const fn new(id: EquipmentId, x: f32, y: f32, z: f32) -> Self {
        Self {
            id,
            offset: Vec3::new(x, y, z),
        }
    }

    pub fn resolve(&self, registry: &LayoutRegistry) -> Result<Vec3, LayoutError> {
        Ok(registry.require(self.id)? + self.offset)
    }
}

struct PipeSpec {
    start: Anchor,
    end: Anchor,
    color: [f32; 4],
}

use EquipmentId::*;

// Physical piping of the plant. Colors follow the original presentation.
const PIPE_SPECS: &[PipeSpec] = &[
    PipeSpec {
        start: Anchor::new(FeedTank, 1.0, 0.5, 0.0),
        end: Anchor::new(Reactor, -1.0, 0.5, 0.0),
        color: [0.40, 0.60, 0.67, 1.0], // #6699aa
    },
    PipeSpec {
        start: Anchor::new(Reactor, 1.0, 0.5, 0.0),
        end: Anchor::new(Condenser, -1.5, 0.5, 0.0),
        color: [0.87, 0.47, 0.27, 1.0], // #dd7744
    },
    PipeSpec {
        start: Anchor::new(Condenser, 1.5, -0.3, 0.0),
        end: Anchor::new(SeparationTank, -1.0, 0.5, 0.0),
        color: [0.27, 0.53, 0.67, 1.0], // #4488aa
    },
    PipeSpec {
        start: Anchor::new(SeparationTank, 0.0, 1.0, -0.5),
        end: Anchor::new(GasTank, 0.0, 0.5, 0.0),
        color: [0.40, 0.67, 0.53, 1.0], // #66aa88
    },
    PipeSpec {
        start: Anchor::new(SeparationTank, 1.0, -0.8, 0.0),
        end: Anchor::new(OilTank, -1.0, 0.5, 0.0),
        color: [0.27, 0.33, 0.40, 1.0], // #445566
    },
    PipeSpec {
        start: Anchor::new(ControlPanel, 1.0, 0.0, 0.0),
        end: Anchor::new(Reactor, -1.0, -0.5, 0.0),
        color: [0.20, 0.20, 0.20, 1.0], // #333333
    },
];

/// Sample a smooth pipe path from `start` to `end`.
///
/// The returned polyline has `segments + 1` points. The first and last points
/// equal `start` and `end` exactly; interior points lerp between the
/// endpoints and add `sin(t * pi) * height` of elevation, so the midpoint
/// sits exactly `height` above the straight-line baseline.
pub fn create_pipe_path(start: Vec3, end: Vec3, height: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(2);
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        if i == 0 {
            points.push(start);
        } else if i == segments {
            points.push(end);
        } else {
            let t = i as f32 / segments as f32;
            let base = start.lerp(end, t);
            let elevation = (t * std::f32::consts::PI).sin() * height;
            points.push(Vec3::new(base.x, base.y + elevation, base.z));
        }
    }
    points
}

/// One generated pipe: the sampled centerline plus its color.
pub struct PipeRun {
    pub points: Vec<Vec3>,
    pub color: [f32; 4],
}

pub struct PipeNetwork {
    pub runs: Vec<PipeRun>,
}

impl PipeNetwork {
    pub fn from_registry(registry: &LayoutRegistry) -> Result<Self, LayoutError> {
        let mut runs = Vec::with_capacity(PIPE_SPECS.len());
        for spec in PIPE_SPECS {
            let start = spec.start.resolve(registry)?;
            let end = spec.end.resolve(registry)?;
            runs.push(PipeRun {
                points: create_pipe_path(start, end, PIPE_ARC_HEIGHT, PIPE_PATH_SEGMENTS),
                color: spec.color,
            });
        }
        Ok(Self { runs })
    }

    /// Ids referenced by the connection table, for startup validation.
    pub fn referenced_ids() -> impl Iterator<Item = EquipmentId> {
        PIPE_SPECS
            .iter()
            .flat_map(|s| [s.start.id, s.end.id])
    }
}
