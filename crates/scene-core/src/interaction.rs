//! Per-unit interaction state and the scene-wide selection slot.

use crate::layout::EquipmentId;

/// Ephemeral hover/active state owned by a single equipment unit.
///
/// States form the cross product {not-hovered, hovered} x {inactive, active}.
/// All transitions are total; there is no terminal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered: bool,
    pub active: bool,
}

impl InteractionState {
    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// A click toggles `active` regardless of hover state.
    pub fn click(&mut self) {
        self.active = !self.active;
    }
}

/// Requested global cursor style; reverted to `Default` on pointer leave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

impl CursorHint {
    pub fn css_value(self) -> &'static str {
        match self {
            CursorHint::Default => "auto",
            CursorHint::Pointer => "pointer",
        }
    }
}

/// The single "currently selected" slot for the whole scene.
///
/// Every click overwrites it (last write wins); nothing ever clears it short
/// of dropping the scene. Panel visibility is tracked elsewhere and is
/// independent of this value.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionSlot {
    selected: Option<EquipmentId>,
}

impl SelectionSlot {
    pub fn select(&mut self, id: EquipmentId) {
        self.selected = Some(id);
    }

    pub fn selected(&self) -> Option<EquipmentId> {
        self.selected
    }
}
