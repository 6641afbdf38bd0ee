use instant::Instant;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use glam::Vec3;
use scene_core::{LoadingProgress, OrbitController, Scene};

use crate::dom;
use crate::overlay;
use crate::render;

/// A floating DOM label pinned to a world-space anchor.
pub struct WorldLabel {
    pub element: web::HtmlElement,
    pub anchor: Vec3,
}

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub orbit: Rc<RefCell<OrbitController>>,
    pub loading: LoadingProgress,
    pub rng: StdRng,

    pub canvas: web::HtmlCanvasElement,
    pub labels: Vec<WorldLabel>,

    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    pub elapsed: f32,
    pub loading_hidden: bool,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.elapsed += dt;

        // Simulated loading runs alongside the scene and hides itself when
        // the hold delay has passed.
        if !self.loading_hidden {
            self.loading.tick(dt, &mut self.rng);
            if let Some(doc) = dom::window_document() {
                overlay::set_loading(&doc, self.loading.progress());
                if self.loading.is_done() {
                    overlay::hide_loading(&doc);
                    self.loading_hidden = true;
                    log::info!("loading complete");
                }
            }
        }

        self.orbit.borrow_mut().update(dt);
        self.scene.borrow_mut().update(dt, self.elapsed);

        let width = self.canvas.width();
        let height = self.canvas.height();
        let aspect = width as f32 / height.max(1) as f32;
        let camera = self.orbit.borrow().camera(aspect);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(width, height);
            let scene = self.scene.borrow();
            if let Err(e) = g.render(&scene, &camera) {
                log::error!("render error: {:?}", e);
            }
        }

        // Labels live in CSS pixel space; the backing store is DPR-scaled.
        let dpr = web::window()
            .map(|w| w.device_pixel_ratio() as f32)
            .unwrap_or(1.0);
        let breathe = self.scene.borrow().breathe_y();
        for label in &self.labels {
            let anchor = label.anchor + Vec3::new(0.0, breathe, 0.0);
            let projected = camera
                .project(anchor, width as f32, height as f32)
                .map(|(x, y)| (x / dpr, y / dpr));
            overlay::place_label(&label.element, projected);
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &Scene,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
