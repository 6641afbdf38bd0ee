//! Scene composition and event routing.
//!
//! Owns the seven equipment models, the generated pipe network, the flow
//! annotations and the single selection slot. Pointer and click events are
//! resolved against picking results here so exactly one unit is touched per
//! event.

use glam::Vec3;

use crate::camera::Camera;
use crate::constants::{BREATHE_RATE, BREATHE_SPAN, EQUIPMENT_LABEL_LIFT};
use crate::equipment::EquipmentModel;
use crate::flow::FlowPlan;
use crate::info::EquipmentInfo;
use crate::interaction::{CursorHint, SelectionSlot};
use crate::layout::{EquipmentId, LayoutError, LayoutRegistry};
use crate::picking::pick_equipment;
use crate::piping::PipeNetwork;

pub struct Scene {
    pub registry: LayoutRegistry,
    pub models: Vec<EquipmentModel>,
    pub pipes: PipeNetwork,
    pub flows: FlowPlan,
    pub selection: SelectionSlot,
    cursor: CursorHint,
    breathe_y: f32,
}

impl Scene {
    /// Build the full scene from the standard layout, validating that every
    /// id the connection tables reference is registered. Fails fast at
    /// startup rather than at interaction time.
    pub fn compose() -> Result<Self, LayoutError> {
        Self::compose_with(LayoutRegistry::standard())
    }

    pub fn compose_with(registry: LayoutRegistry) -> Result<Self, LayoutError> {
        for id in PipeNetwork::referenced_ids().chain(FlowPlan::referenced_ids()) {
            registry.require(id)?;
        }

        let models = EquipmentId::ALL
            .iter()
            .map(|&id| Ok(EquipmentModel::new(id, registry.require(id)?)))
            .collect::<Result<Vec<_>, LayoutError>>()?;
        let pipes = PipeNetwork::from_registry(&registry)?;
        let flows = FlowPlan::from_registry(&registry)?;
        log::info!(
            "scene composed: {} units, {} pipes, {} flow arrows",
            models.len(),
            pipes.runs.len(),
            flows.arrows.len()
        );

        Ok(Self {
            registry,
            models,
            pipes,
            flows,
            selection: SelectionSlot::default(),
            cursor: CursorHint::Default,
            breathe_y: 0.0,
        })
    }

    /// Per-frame tick: the group breathing bob plus every unit's animation.
    /// Units are mutually independent, so order does not matter.
    pub fn update(&mut self, dt: f32, elapsed: f32) {
        self.breathe_y = (elapsed * BREATHE_RATE).sin() * BREATHE_SPAN;
        for model in &mut self.models {
            model.update(dt, elapsed);
        }
    }

    /// Resolve a pointer ray to the unit under it, if any.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<EquipmentId> {
        pick_equipment(&self.models, ray_origin, ray_dir)
    }

    /// Route a pointer-move hit: at most one unit hovered, cursor hint set
    /// while something is under the pointer and reverted when not.
    pub fn pointer_move(&mut self, hit: Option<EquipmentId>) -> CursorHint {
        for model in &mut self.models {
            if Some(model.id) == hit {
                model.pointer_enter();
            } else {
                model.pointer_leave();
            }
        }
        self.cursor = if hit.is_some() {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        };
        self.cursor
    }

    /// Route a click hit: toggles exactly the hit unit's active flag and
    /// overwrites the selection slot. A miss changes nothing.
    pub fn click(&mut self, hit: Option<EquipmentId>) -> Option<&'static EquipmentInfo> {
        let id = hit?;
        let model = self.models.iter_mut().find(|m| m.id == id)?;
        let info = model.click();
        self.selection.select(id);
        Some(info)
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Vertical offset of the whole equipment group this frame.
    pub fn breathe_y(&self) -> f32 {
        self.breathe_y
    }

    pub fn model(&self, id: EquipmentId) -> Option<&EquipmentModel> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Floating caption anchors for the labelled units.
    pub fn equipment_labels(&self) -> Vec<(&'static str, Vec3)> {
        [
            EquipmentId::FeedTank,
            EquipmentId::Reactor,
            EquipmentId::Condenser,
            EquipmentId::SeparationTank,
        ]
        .iter()
        .filter_map(|&id| {
            let pos = self.registry.position(id)?;
            Some((id.label(), pos + Vec3::new(0.0, EQUIPMENT_LABEL_LIFT, 0.0)))
        })
        .collect()
    }

    /// Screen-space anchor helper for DOM overlays.
    pub fn project_label(
        camera: &Camera,
        world: Vec3,
        width: f32,
        height: f32,
    ) -> Option<(f32, f32)> {
        camera.project(world, width, height)
    }
}
