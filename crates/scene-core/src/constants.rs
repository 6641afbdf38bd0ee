use glam::Vec3;

// Shared visual/interaction tuning constants used by the core model and the
// web frontend.

// Hover feedback
pub const HOVER_SCALE: f32 = 1.05; // target enlargement while hovered
pub const HOVER_APPROACH_TAU_SEC: f32 = 0.12; // time constant of the damped scale approach
pub const HOVER_BRIGHTEN: f32 = 1.25; // tint multiplier applied while hovered

// Piping
pub const PIPE_RADIUS: f32 = 0.15;
pub const PIPE_ARC_HEIGHT: f32 = 0.8; // midpoint elevation above the straight baseline
pub const PIPE_PATH_SEGMENTS: usize = 20;
pub const PIPE_TUBE_SIDES: usize = 8;

// Flow annotations
pub const ARROW_HEAD_SIZE: f32 = 0.1;
pub const FLOW_LABEL_LIFT: f32 = 0.4; // label offset above the arrow midpoint

// Equipment captions float this far above the unit position
pub const EQUIPMENT_LABEL_LIFT: f32 = 1.5;

// Active-state effects
pub const REACTOR_EMISSIVE_BASE: f32 = 0.3;
pub const REACTOR_EMISSIVE_SPAN: f32 = 0.2;
pub const REACTOR_EMISSIVE_RATE: f32 = 2.0; // radians per second
pub const SCREEN_EMISSIVE_IDLE: f32 = 0.2;
pub const SCREEN_EMISSIVE_BASE: f32 = 0.8;
pub const SCREEN_EMISSIVE_SPAN: f32 = 0.2;
pub const SCREEN_EMISSIVE_RATE: f32 = 3.0;
pub const GAS_PULSE_SPAN: f32 = 0.01; // radial x/z scale amplitude
pub const GAS_PULSE_RATE: f32 = 2.0;
pub const OIL_FILL_START: f32 = 0.3;
pub const OIL_FILL_MAX: f32 = 0.8; // cap on the fill fraction
pub const OIL_FILL_RATE_PER_SEC: f32 = 0.05;
pub const LIQUID_BOB_SPAN: f32 = 0.05;
pub const LIQUID_BOB_RATE: f32 = 0.5;

// Short-lived particle marks near reactor/condenser outlets
pub const PARTICLE_SPAWN_INTERVAL_SEC: f32 = 0.15;
pub const PARTICLE_TTL_SEC: f32 = 1.2;
pub const PARTICLE_RISE_PER_SEC: f32 = 0.25;
pub const PARTICLE_MAX: usize = 16;

// Scene breathing bob applied to the whole equipment group
pub const BREATHE_SPAN: f32 = 0.05;
pub const BREATHE_RATE: f32 = 0.3;

// Camera
pub const CAMERA_FOVY_RADIANS: f32 = 50.0 * std::f32::consts::PI / 180.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const CAMERA_START_EYE: [f32; 3] = [10.0, 6.0, 10.0];
pub const ORBIT_APPROACH_TAU_SEC: f32 = 0.15;
pub const ORBIT_MIN_DISTANCE: f32 = 4.0;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;
pub const ORBIT_MIN_PITCH: f32 = -1.4;
pub const ORBIT_MAX_PITCH: f32 = 1.4;

// Simulated loading screen
pub const LOADING_STEP_INTERVAL_SEC: f32 = 0.2;
pub const LOADING_STEP_MAX: f32 = 10.0; // random increment upper bound, percent
pub const LOADING_HOLD_SEC: f32 = 0.5; // delay at 100% before hiding

// Floor
pub const FLOOR_Y: f32 = -1.0;
pub const FLOOR_SIZE: [f32; 2] = [30.0, 20.0];

#[inline]
pub fn camera_start_eye() -> Vec3 {
    Vec3::from(CAMERA_START_EYE)
}
