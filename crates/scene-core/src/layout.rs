//! Authoritative equipment layout.
//!
//! Every component that needs a world position for a piece of equipment (pipe
//! endpoints, flow arrows, labels, picking spheres) resolves it through
//! [`LayoutRegistry`] so the table exists in exactly one place. A connection
//! table referencing an id the registry does not carry is a programming
//! error surfaced at scene construction, never at interaction time.

use fnv::FnvHashMap;
use glam::Vec3;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EquipmentId {
    FeedTank,
    Reactor,
    Condenser,
    SeparationTank,
    GasTank,
    OilTank,
    ControlPanel,
}

impl EquipmentId {
    pub const ALL: [EquipmentId; 7] = [
        EquipmentId::FeedTank,
        EquipmentId::Reactor,
        EquipmentId::Condenser,
        EquipmentId::SeparationTank,
        EquipmentId::GasTank,
        EquipmentId::OilTank,
        EquipmentId::ControlPanel,
    ];

    /// Short English caption shown as a floating label in the scene.
    pub fn label(self) -> &'static str {
        match self {
            EquipmentId::FeedTank => "Feed Tank",
            EquipmentId::Reactor => "Reactor",
            EquipmentId::Condenser => "Condenser",
            EquipmentId::SeparationTank => "Separation Tank",
            EquipmentId::GasTank => "Gas Tank",
            EquipmentId::OilTank => "Oil Tank",
            EquipmentId::ControlPanel => "Control Panel",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("no layout position registered for {0:?}")]
    UnknownEquipment(EquipmentId),
}

/// Fixed identifier-to-position mapping, read-only after construction.
pub struct LayoutRegistry {
    positions: FnvHashMap<EquipmentId, Vec3>,
}

impl LayoutRegistry {
    /// The standard plant arrangement: feed on the left, product tanks on the
    /// right, control panel off to the near corner.
    pub fn standard() -> Self {
        let mut positions = FnvHashMap::default();
        positions.insert(EquipmentId::FeedTank, Vec3::new(-6.0, 0.0, -2.0));
        positions.insert(EquipmentId::Reactor, Vec3::new(-2.0, 0.0, 0.0));
        positions.insert(EquipmentId::Condenser, Vec3::new(2.0, 0.0, 0.0));
        positions.insert(EquipmentId::SeparationTank, Vec3::new(6.0, 0.0, 0.0));
        positions.insert(EquipmentId::GasTank, Vec3::new(6.0, 0.0, -4.0));
        positions.insert(EquipmentId::OilTank, Vec3::new(8.0, 0.0, 0.0));
        positions.insert(EquipmentId::ControlPanel, Vec3::new(-7.0, 0.0, 4.0));
        Self { positions }
    }

    /// Build a registry from explicit entries; used for non-standard
    /// arrangements.
    pub fn with_positions(entries: impl IntoIterator<Item = (EquipmentId, Vec3)>) -> Self {
        Self {
            positions: entries.into_iter().collect(),
        }
    }

    pub fn position(&self, id: EquipmentId) -> Option<Vec3> {
        self.positions.get(&id).copied()
    }

    /// Resolve a position or fail; connection tables use this so a missing
    /// entry is caught while the scene is being composed.
    pub fn require(&self, id: EquipmentId) -> Result<Vec3, LayoutError> {
        self.position(id).ok_or(LayoutError::UnknownEquipment(id))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
