//! Core scene model for the pyrolysis process viewer.
//!
//! Everything here is pure Rust with no platform dependencies, suitable for
//! host-side tests and the WASM frontend alike: the equipment layout, the
//! per-unit interaction state machine, procedural geometry for equipment
//! models and connecting pipes, flow annotations, picking/camera math, and
//! the simulated loading progress.

pub mod camera;
pub mod constants;
pub mod equipment;
pub mod flow;
pub mod geometry;
pub mod info;
pub mod interaction;
pub mod layout;
pub mod loading;
pub mod picking;
pub mod piping;
pub mod scene;

pub use camera::{Camera, OrbitController};
pub use equipment::EquipmentModel;
pub use flow::{flow_arrow, FlowArrow, FlowPlan};
pub use info::{equipment_info, EquipmentInfo};
pub use interaction::{CursorHint, InteractionState, SelectionSlot};
pub use layout::{EquipmentId, LayoutError, LayoutRegistry};
pub use loading::LoadingProgress;
pub use picking::ray_sphere;
pub use piping::{create_pipe_path, PipeNetwork};
pub use scene::Scene;
