//! DOM overlays layered above the canvas: the equipment info panel, the
//! simulated loading screen and the floating scene labels.

use scene_core::EquipmentInfo;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::*;
use crate::dom;

/// Fill the panel with a unit's record and reveal it. The process-overview
/// text shows only while no unit has been selected yet.
pub fn show_info(document: &web::Document, info: &EquipmentInfo) {
    dom::set_text(document, INFO_NAME_ID, info.name);
    dom::set_text(document, INFO_DESCRIPTION_ID, info.description);
    dom::set_text(document, INFO_FUNCTION_ID, info.function);
    dom::set_text(document, INFO_SPECS_ID, info.specs);
    if let Some(el) = document.get_element_by_id(INFO_OVERVIEW_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
    if let Some(el) = document.get_element_by_id(INFO_DETAILS_ID) {
        let _ = el.set_attribute("style", "");
    }
    show_panel(document);
}

/// Reveal the panel with whatever content it currently holds.
pub fn show_panel(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INFO_PANEL_ID) {
        let _ = el.set_attribute("style", "");
    }
}

pub fn hide_info(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INFO_PANEL_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

pub fn set_loading(document: &web::Document, percent: f32) {
    if let Some(el) = document.get_element_by_id(LOADING_BAR_ID) {
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            let _ = html
                .style()
                .set_property("width", &format!("{:.0}%", percent));
        }
    }
    dom::set_text(document, LOADING_PERCENT_ID, &format!("{:.0}%", percent));
}

pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_SCREEN_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Create one floating label span inside the label layer. Returns the element
/// so the frame loop can reposition it without further lookups.
pub fn create_label(
    document: &web::Document,
    text: &str,
    color: [f32; 4],
) -> Option<web::HtmlElement> {
    let layer = document.get_element_by_id(LABEL_LAYER_ID)?;
    let el = document.create_element("span").ok()?;
    let el: web::HtmlElement = el.dyn_into().ok()?;
    el.set_text_content(Some(text));
    let _ = el.style().set_property("position", "absolute");
    let _ = el.style().set_property("transform", "translate(-50%, -100%)");
    let _ = el.style().set_property(
        "color",
        &format!(
            "rgb({}, {}, {})",
            (color[0] * 255.0) as u8,
            (color[1] * 255.0) as u8,
            (color[2] * 255.0) as u8
        ),
    );
    layer.append_child(&el).ok()?;
    Some(el)
}

/// Move a label to canvas-relative CSS pixels, or hide it when the anchor is
/// behind the camera.
pub fn place_label(el: &web::HtmlElement, projected: Option<(f32, f32)>) {
    match projected {
        Some((x, y)) => {
            let _ = el.style().set_property("left", &format!("{x:.0}px"));
            let _ = el.style().set_property("top", &format!("{y:.0}px"));
            let _ = el.style().set_property("display", "block");
        }
        None => {
            let _ = el.style().set_property("display", "none");
        }
    }
}
