// DOM ids and pointer tuning shared across the frontend modules.

pub const CANVAS_ID: &str = "app-canvas";
pub const LABEL_LAYER_ID: &str = "label-layer";

pub const INFO_PANEL_ID: &str = "info-panel";
pub const INFO_NAME_ID: &str = "info-name";
pub const INFO_DESCRIPTION_ID: &str = "info-description";
pub const INFO_FUNCTION_ID: &str = "info-function";
pub const INFO_SPECS_ID: &str = "info-specs";
pub const INFO_OVERVIEW_ID: &str = "info-overview";
pub const INFO_DETAILS_ID: &str = "info-details";
pub const INFO_CLOSE_ID: &str = "info-close";
pub const SHOW_INFO_ID: &str = "show-info-button";

pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const LOADING_BAR_ID: &str = "loading-bar";
pub const LOADING_PERCENT_ID: &str = "loading-percent";

// Orbit drag: radians of yaw/pitch per CSS pixel of pointer travel.
pub const ORBIT_ROTATE_PER_PX: f32 = 0.008;
// Wheel zoom: world units of distance per wheel delta unit.
pub const ORBIT_ZOOM_PER_DELTA: f32 = 0.01;
// Pointer travel below this is still a click, not a drag.
pub const CLICK_MAX_DRAG_PX: f32 = 5.0;
