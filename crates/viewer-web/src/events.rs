//! Pointer and panel event wiring.
//!
//! Pointer moves drive hover picking (or the orbit drag while the button is
//! held), wheel zooms, and a press-release with little travel counts as a
//! click on whatever unit is under the pointer.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use glam::Vec2;
use scene_core::{OrbitController, Scene};

use crate::constants::{CLICK_MAX_DRAG_PX, ORBIT_ROTATE_PER_PX, ORBIT_ZOOM_PER_DELTA};
use crate::dom;
use crate::overlay;

#[derive(Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
    pub travel_px: f32,
}

/// Pointer position in canvas backing-store pixels.
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let sx = (ev.client_x() as f64 - rect.left()) / rect.width().max(1.0);
    let sy = (ev.client_y() as f64 - rect.top()) / rect.height().max(1.0);
    Vec2::new(
        sx as f32 * canvas.width() as f32,
        sy as f32 * canvas.height() as f32,
    )
}

fn pick_at(
    scene: &Scene,
    orbit: &OrbitController,
    canvas: &web::HtmlCanvasElement,
    pos: Vec2,
) -> Option<scene_core::EquipmentId> {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let camera = orbit.camera(width / height.max(1.0));
    let (ro, rd) = camera.screen_ray(pos.x, pos.y, width, height);
    scene.pick(ro, rd)
}

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub orbit: Rc<RefCell<OrbitController>>,
    pub pointer: Rc<RefCell<PointerState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    // pointermove
    {
        let scene_m = w.scene.clone();
        let orbit_m = w.orbit.clone();
        let pointer_m = w.pointer.clone();
        let canvas_m = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = pointer_canvas_px(&ev, &canvas_m);
            let (dx, dy, dragging) = {
                let mut ps = pointer_m.borrow_mut();
                let dx = pos.x - ps.x;
                let dy = pos.y - ps.y;
                ps.x = pos.x;
                ps.y = pos.y;
                if ps.down {
                    ps.travel_px += dx.abs() + dy.abs();
                }
                (dx, dy, ps.down)
            };

            if dragging {
                orbit_m
                    .borrow_mut()
                    .rotate(-dx * ORBIT_ROTATE_PER_PX, dy * ORBIT_ROTATE_PER_PX);
            } else {
                let hit = pick_at(&scene_m.borrow(), &orbit_m.borrow(), &canvas_m, pos);
                let cursor = scene_m.borrow_mut().pointer_move(hit);
                dom::set_canvas_cursor(&canvas_m, cursor.css_value());
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ = wnd
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerdown
    {
        let pointer_m = w.pointer.clone();
        let canvas_target = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = pointer_canvas_px(&ev, &canvas_target);
            let mut ps = pointer_m.borrow_mut();
            ps.x = pos.x;
            ps.y = pos.y;
            ps.down = true;
            ps.travel_px = 0.0;
            drop(ps);
            let _ = canvas_target.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup
    {
        let scene_m = w.scene.clone();
        let orbit_m = w.orbit.clone();
        let pointer_m = w.pointer.clone();
        let canvas_m = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = pointer_canvas_px(&ev, &canvas_m);
            let was_click = {
                let mut ps = pointer_m.borrow_mut();
                let was_down = ps.down;
                ps.down = false;
                was_down && ps.travel_px < CLICK_MAX_DRAG_PX
            };
            if was_click {
                let hit = pick_at(&scene_m.borrow(), &orbit_m.borrow(), &canvas_m, pos);
                if let Some(info) = scene_m.borrow_mut().click(hit) {
                    log::info!("selected: {}", info.name);
                    if let Some(doc) = dom::window_document() {
                        overlay::show_info(&doc, info);
                    }
                }
            }
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // wheel zoom
    {
        let orbit_m = w.orbit.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            orbit_m
                .borrow_mut()
                .zoom(ev.delta_y() as f32 * ORBIT_ZOOM_PER_DELTA);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Close button on the info panel and the reopen button next to it. Hiding
/// the panel never clears the scene's selection.
pub fn wire_panel_buttons(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener(document, crate::constants::INFO_CLOSE_ID, move || {
        overlay::hide_info(&doc);
    });
    let doc = document.clone();
    dom::add_click_listener(document, crate::constants::SHOW_INFO_ID, move || {
        overlay::show_panel(&doc);
    });
}
