#![cfg(target_arch = "wasm32")]
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use scene_core::{LoadingProgress, OrbitController, Scene};

mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use constants::CANVAS_ID;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Create the floating DOM labels: unit captions, stream names along the flow
/// arrows, and the two operating-temperature callouts.
fn build_labels(document: &web::Document, scene: &Scene) -> Vec<frame::WorldLabel> {
    let mut labels = Vec::new();
    for (text, anchor) in scene.equipment_labels() {
        if let Some(element) = overlay::create_label(document, text, [1.0, 1.0, 1.0, 1.0]) {
            labels.push(frame::WorldLabel { element, anchor });
        }
    }
    for arrow in &scene.flows.arrows {
        if let Some(element) = overlay::create_label(document, arrow.label, arrow.color) {
            labels.push(frame::WorldLabel {
                element,
                anchor: arrow.label_position,
            });
        }
    }
    for caption in &scene.flows.captions {
        if let Some(element) = overlay::create_label(document, caption.text, caption.color) {
            labels.push(frame::WorldLabel {
                element,
                anchor: caption.position,
            });
        }
    }
    labels
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("no #{CANVAS_ID} element"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("#{CANVAS_ID} is not a canvas"))?;
    wire_canvas_resize(&canvas);

    let scene = Scene::compose()?;
    let labels = build_labels(&document, &scene);
    // The panel starts on the process overview until a unit is clicked.
    overlay::show_panel(&document);

    let gpu = frame::init_gpu(&canvas, &scene).await;

    let scene = Rc::new(RefCell::new(scene));
    let orbit = Rc::new(RefCell::new(OrbitController::standard()));
    let pointer = Rc::new(RefCell::new(events::PointerState::default()));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        orbit: orbit.clone(),
        pointer,
    });
    events::wire_panel_buttons(&document);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        orbit,
        loading: LoadingProgress::new(),
        rng: StdRng::from_entropy(),
        canvas,
        labels,
        gpu,
        last_instant: Instant::now(),
        elapsed: 0.0,
        loading_hidden: false,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
