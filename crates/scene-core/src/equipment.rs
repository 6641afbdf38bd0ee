//! One interactive equipment unit: interaction state plus per-frame visuals.
//!
//! Each unit owns its own state; nothing here touches another unit or any
//! shared data, so the frame loop can tick models in any order. All of the
//! active-state effects (emissive pulsing, fill level, radial pulsation,
//! particle marks) are cosmetic only.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::*;
use crate::info::{equipment_info, EquipmentInfo};
use crate::interaction::InteractionState;
use crate::layout::EquipmentId;

/// A short-lived decorative mark near an outlet, in unit-local coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub offset: Vec3,
    pub age: f32,
}

impl Particle {
    /// 1 at spawn, fading to 0 at end of life.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / PARTICLE_TTL_SEC).clamp(0.0, 1.0)
    }
}

pub struct EquipmentModel {
    pub id: EquipmentId,
    pub position: Vec3,
    pub state: InteractionState,

    // Damped hover enlargement, 1.0 at rest.
    scale: f32,
    // Active-effect channels; which ones move depends on the unit kind.
    emissive: f32,
    radial: f32,
    fill_level: f32,
    liquid_bob: f32,
    particles: SmallVec<[Particle; PARTICLE_MAX]>,
    spawn_accum: f32,
    spawn_index: u32,
}

impl EquipmentModel {
    pub fn new(id: EquipmentId, position: Vec3) -> Self {
        Self {
            id,
            position,
            state: InteractionState::default(),
            scale: 1.0,
            emissive: match id {
                EquipmentId::ControlPanel => SCREEN_EMISSIVE_IDLE,
                _ => 0.0,
            },
            radial: 1.0,
            fill_level: OIL_FILL_START,
            liquid_bob: 0.0,
            particles: SmallVec::new(),
            spawn_accum: 0.0,
            spawn_index: 0,
        }
    }

    pub fn info(&self) -> &'static EquipmentInfo {
        equipment_info(self.id)
    }

    pub fn pointer_enter(&mut self) {
        self.state.pointer_enter();
    }

    pub fn pointer_leave(&mut self) {
        self.state.pointer_leave();
    }

    /// Toggle the running state and hand back the info record for the
    /// selection callback.
    pub fn click(&mut self) -> &'static EquipmentInfo {
        self.state.click();
        self.info()
    }

    /// Per-frame animation. `elapsed` is scene time in seconds since start.
    pub fn update(&mut self, dt: f32, elapsed: f32) {
        // Damped approach toward the hover enlargement, never a snap.
        let target = if self.state.hovered { HOVER_SCALE } else { 1.0 };
        let alpha = 1.0 - (-dt / HOVER_APPROACH_TAU_SEC).exp();
        self.scale += (target - self.scale) * alpha;

        match self.id {
            EquipmentId::Reactor => {
                self.emissive = if self.state.active {
                    REACTOR_EMISSIVE_BASE + (elapsed * REACTOR_EMISSIVE_RATE).sin() * REACTOR_EMISSIVE_SPAN
                } else {
                    0.0
                };
            }
            EquipmentId::ControlPanel => {
                self.emissive = if self.state.active {
                    SCREEN_EMISSIVE_BASE + (elapsed * SCREEN_EMISSIVE_RATE).sin() * SCREEN_EMISSIVE_SPAN
                } else {
                    SCREEN_EMISSIVE_IDLE
                };
            }
            EquipmentId::GasTank => {
                self.radial = if self.state.active {
                    1.0 + (elapsed * GAS_PULSE_RATE).sin() * GAS_PULSE_SPAN
                } else {
                    1.0
                };
                self.tick_particles(dt, self.state.active);
            }
            EquipmentId::OilTank => {
                if self.state.active && self.fill_level < OIL_FILL_MAX {
                    self.fill_level = (self.fill_level + OIL_FILL_RATE_PER_SEC * dt).min(OIL_FILL_MAX);
                }
            }
            EquipmentId::SeparationTank => {
                self.liquid_bob = if self.state.active {
                    (elapsed * LIQUID_BOB_RATE).sin() * LIQUID_BOB_SPAN
                } else {
                    0.0
                };
            }
            EquipmentId::Condenser => {
                self.tick_particles(dt, self.state.active);
            }
            EquipmentId::FeedTank => {}
        }
    }

    fn tick_particles(&mut self, dt: f32, spawning: bool) {
        for p in self.particles.iter_mut() {
            p.age += dt;
            p.offset.y += PARTICLE_RISE_PER_SEC * dt;
        }
        self.particles.retain(|p| p.age < PARTICLE_TTL_SEC);

        if !spawning {
            self.spawn_accum = 0.0;
            return;
        }
        self.spawn_accum += dt;
        while self.spawn_accum >= PARTICLE_SPAWN_INTERVAL_SEC {
            self.spawn_accum -= PARTICLE_SPAWN_INTERVAL_SEC;
            if self.particles.len() < PARTICLE_MAX {
                self.particles.push(Particle {
                    offset: self.particle_origin(self.spawn_index),
                    age: 0.0,
                });
            }
            self.spawn_index = self.spawn_index.wrapping_add(1);
        }
    }

    // Deterministic spread near the unit's outlet, matching the decorative
    // placement of the original scene.
    fn particle_origin(&self, i: u32) -> Vec3 {
        let i = i as f32;
        match self.id {
            EquipmentId::Condenser => Vec3::new(
                1.2 + (i * 0.5).sin() * 0.2,
                -0.3 + (i * 0.3).cos() * 0.2,
                i.sin() * 0.2,
            ),
            _ => Vec3::new((i * 0.8).sin() * 0.6, (i * 0.7).cos() * 0.6, (i * 0.5).sin() * 0.6),
        }
    }

    /// Current hover enlargement factor (uniform).
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Extra x/z scale for the gas tank's pressure pulsation, 1.0 elsewhere.
    pub fn radial_scale(&self) -> f32 {
        self.radial
    }

    /// Emissive drive for the reactor shell / panel screen; exactly zero for
    /// an inactive reactor.
    pub fn emissive_intensity(&self) -> f32 {
        self.emissive
    }

    /// Oil tank fill fraction in [OIL_FILL_START, OIL_FILL_MAX].
    pub fn fill_level(&self) -> f32 {
        self.fill_level
    }

    /// Vertical bob applied to the separation tank's liquid body.
    pub fn liquid_bob(&self) -> f32 {
        self.liquid_bob
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Bounding sphere used for picking, generous enough to cover the whole
    /// assembled unit. Meshes are centered on the registered position, so the
    /// sphere is too.
    pub fn pick_sphere(&self) -> (Vec3, f32) {
        let radius = match self.id {
            EquipmentId::FeedTank => 1.5,
            EquipmentId::Reactor => 1.8,
            EquipmentId::Condenser => 1.7,
            EquipmentId::SeparationTank => 1.6,
            EquipmentId::GasTank => 1.3,
            EquipmentId::OilTank => 1.8,
            EquipmentId::ControlPanel => 1.6,
        };
        (self.position, radius)
    }
}
