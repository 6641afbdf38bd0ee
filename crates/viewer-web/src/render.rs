//! WebGPU rendering of the composed scene.
//!
//! All vertex data is built once from `scene-core` geometry and stays static;
//! everything that moves per frame (camera, hover scale, emissive drive,
//! liquid levels, particle marks) flows through uniforms. Per-draw uniforms
//! live in one buffer addressed with dynamic offsets so a frame is a single
//! buffer write plus one render pass.

use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

use scene_core::constants::{HOVER_BRIGHTEN, PARTICLE_MAX};
use scene_core::geometry::{self, LineVertex, Mesh, MeshVertex};
use scene_core::{Camera, EquipmentId, Scene};

const DRAW_STRIDE: u64 = 256; // respects the default uniform offset alignment
const MAX_DRAWS: usize = 64;

const MESH_WGSL: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_dir: vec4<f32>,
    ambient: vec4<f32>,
    misc: vec4<f32>,
};

struct PerDraw {
    model: mat4x4<f32>,
    tint: vec4<f32>,
    emissive: vec4<f32>,
};

@group(0) @binding(0) var<uniform> globals: Globals;
@group(1) @binding(0) var<uniform> draw: PerDraw;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
) -> VsOut {
    var out: VsOut;
    let world = draw.model * vec4<f32>(position, 1.0);
    out.pos = globals.view_proj * world;
    out.normal = (draw.model * vec4<f32>(normal, 0.0)).xyz;
    out.color = color * draw.tint;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let diff = max(dot(n, normalize(globals.light_dir.xyz)), 0.0);
    let lit = in.color.rgb * (globals.ambient.rgb + vec3<f32>(diff * 0.8));
    let glow = draw.emissive.rgb * draw.emissive.w;
    return vec4<f32>(lit + glow, in.color.a);
}
"#;

const LINE_WGSL: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_dir: vec4<f32>,
    ambient: vec4<f32>,
    misc: vec4<f32>,
};

@group(0) @binding(0) var<uniform> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec4<f32>) -> VsOut {
    var out: VsOut;
    // misc.y carries the group breathing offset.
    let world = position + vec3<f32>(0.0, globals.misc.y, 0.0);
    out.pos = globals.view_proj * vec4<f32>(world, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    ambient: [f32; 4],
    misc: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PerDraw {
    model: [[f32; 4]; 4],
    tint: [f32; 4],
    emissive: [f32; 4],
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &Mesh) -> MeshBuffers {
    let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    MeshBuffers {
        vertex,
        index,
        index_count: mesh.indices.len() as u32,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PartRole {
    Body,
    Coils,
    Screen,
    Liquid,
    LevelMarker,
}

struct UnitPart {
    id: EquipmentId,
    role: PartRole,
    buffers: MeshBuffers,
}

struct ParticleSeed {
    id: EquipmentId,
    buffers: MeshBuffers,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,
    depth_view: wgpu::TextureView,

    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    globals_buf: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    per_draw_buf: wgpu::Buffer,
    per_draw_bg: wgpu::BindGroup,

    floor: MeshBuffers,
    pipes: MeshBuffers,
    parts: Vec<UnitPart>,
    seeds: Vec<ParticleSeed>,
    line_buf: wgpu::Buffer,
    line_count: u32,

    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        // Uniform buffers and bind groups
        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let per_draw_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("per_draw"),
            size: DRAW_STRIDE * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let per_draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("per_draw_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<PerDraw>() as u64),
                },
                count: None,
            }],
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });
        let per_draw_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("per_draw_bg"),
            layout: &per_draw_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &per_draw_buf,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<PerDraw>() as u64),
                }),
            }],
        });

        // Pipelines
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_WGSL.into()),
        });
        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_WGSL.into()),
        });
        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_layout"),
            bind_group_layouts: &[&globals_bgl, &per_draw_bgl],
            push_constant_ranges: &[],
        });
        let line_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line_layout"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let depth_state = wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };
        let mesh_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4],
        };
        let line_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4],
        };
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&mesh_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[mesh_vertex_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_state.clone()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&line_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[line_vertex_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(depth_state),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Static scene geometry
        let floor = upload_mesh(&device, "floor", &geometry::floor_mesh());
        let pipes = upload_mesh(&device, "pipes", &geometry::pipe_mesh(&scene.pipes));
        let mut parts = Vec::new();
        let mut seeds = Vec::new();
        for model in &scene.models {
            let set = geometry::build_equipment(model.id);
            parts.push(UnitPart {
                id: model.id,
                role: PartRole::Body,
                buffers: upload_mesh(&device, "body", &set.body),
            });
            if let Some(mesh) = &set.coils {
                parts.push(UnitPart {
                    id: model.id,
                    role: PartRole::Coils,
                    buffers: upload_mesh(&device, "coils", mesh),
                });
            }
            if let Some(mesh) = &set.screen {
                parts.push(UnitPart {
                    id: model.id,
                    role: PartRole::Screen,
                    buffers: upload_mesh(&device, "screen", mesh),
                });
            }
            if let Some(mesh) = &set.liquid {
                parts.push(UnitPart {
                    id: model.id,
                    role: PartRole::Liquid,
                    buffers: upload_mesh(&device, "liquid", mesh),
                });
            }
            if let Some(mesh) = &set.level_marker {
                parts.push(UnitPart {
                    id: model.id,
                    role: PartRole::LevelMarker,
                    buffers: upload_mesh(&device, "level_marker", mesh),
                });
            }
            if let Some(mesh) = &set.particle {
                seeds.push(ParticleSeed {
                    id: model.id,
                    buffers: upload_mesh(&device, "particle", mesh),
                });
            }
        }

        let line_vertices = geometry::flow_lines(&scene.flows);
        let line_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("flow_lines"),
            contents: bytemuck::cast_slice(&line_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!(
            "gpu ready: {} unit parts, {} particle seeds, {} line vertices",
            parts.len(),
            seeds.len(),
            line_vertices.len()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            width,
            height,
            depth_view,
            mesh_pipeline,
            line_pipeline,
            globals_buf,
            globals_bg,
            per_draw_buf,
            per_draw_bg,
            floor,
            pipes,
            parts,
            seeds,
            line_buf,
            line_count: line_vertices.len() as u32,
            clear_color: wgpu::Color {
                r: 0.05,
                g: 0.07,
                b: 0.10,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let breathe = scene.breathe_y();
        let globals = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_dir: [0.45, 0.85, 0.6, 0.0],
            ambient: [0.45, 0.45, 0.5, 1.0],
            misc: [0.0, breathe, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&globals));

        // Per-draw uniforms, packed at the dynamic-offset stride.
        let mut draws: Vec<(&MeshBuffers, PerDraw)> = Vec::with_capacity(MAX_DRAWS);
        draws.push((&self.floor, static_draw()));
        draws.push((
            &self.pipes,
            PerDraw {
                model: Mat4::from_translation(Vec3::new(0.0, breathe, 0.0)).to_cols_array_2d(),
                tint: [1.0; 4],
                emissive: [0.0; 4],
            },
        ));
        for part in &self.parts {
            if let Some(model) = scene.model(part.id) {
                draws.push((&part.buffers, part_draw(part, model, breathe)));
            }
        }
        for seed in &self.seeds {
            if let Some(model) = scene.model(seed.id) {
                for particle in model.particles().iter().take(PARTICLE_MAX) {
                    let world = model.position + particle.offset + Vec3::new(0.0, breathe, 0.0);
                    let s = particle.alpha().max(0.05);
                    draws.push((
                        &seed.buffers,
                        PerDraw {
                            model: (Mat4::from_translation(world) * Mat4::from_scale(Vec3::splat(s)))
                                .to_cols_array_2d(),
                            tint: [1.0, 1.0, 1.0, particle.alpha()],
                            emissive: [0.0; 4],
                        },
                    ));
                    if draws.len() == MAX_DRAWS {
                        break;
                    }
                }
            }
        }
        draws.truncate(MAX_DRAWS);

        let mut packed = vec![0u8; draws.len() * DRAW_STRIDE as usize];
        for (i, (_, pd)) in draws.iter().enumerate() {
            let at = i * DRAW_STRIDE as usize;
            packed[at..at + std::mem::size_of::<PerDraw>()]
                .copy_from_slice(bytemuck::bytes_of(pd));
        }
        self.queue.write_buffer(&self.per_draw_buf, 0, &packed);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for (i, (buffers, _)) in draws.iter().enumerate() {
                rpass.set_bind_group(1, &self.per_draw_bg, &[(i as u64 * DRAW_STRIDE) as u32]);
                rpass.set_vertex_buffer(0, buffers.vertex.slice(..));
                rpass.set_index_buffer(buffers.index.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..buffers.index_count, 0, 0..1);
            }

            if self.line_count > 0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_bind_group(0, &self.globals_bg, &[]);
                rpass.set_vertex_buffer(0, self.line_buf.slice(..));
                rpass.draw(0..self.line_count, 0..1);
            }
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn static_draw() -> PerDraw {
    PerDraw {
        model: Mat4::IDENTITY.to_cols_array_2d(),
        tint: [1.0; 4],
        emissive: [0.0; 4],
    }
}

fn part_draw(part: &UnitPart, model: &scene_core::EquipmentModel, breathe: f32) -> PerDraw {
    let base = model.position + Vec3::new(0.0, breathe, 0.0);
    let s = model.scale();
    let tint_v = if model.state.hovered { HOVER_BRIGHTEN } else { 1.0 };
    let tint = [tint_v, tint_v, tint_v, 1.0];

    let (matrix, emissive) = match part.role {
        PartRole::Body => {
            let scale = if part.id == EquipmentId::GasTank {
                let r = model.radial_scale();
                Vec3::new(s * r, s, s * r)
            } else {
                Vec3::splat(s)
            };
            (
                Mat4::from_translation(base) * Mat4::from_scale(scale),
                [0.0; 4],
            )
        }
        PartRole::Coils => (
            Mat4::from_translation(base) * Mat4::from_scale(Vec3::splat(s)),
            [1.0, 0.25, 0.05, model.emissive_intensity()],
        ),
        PartRole::Screen => (
            Mat4::from_translation(base) * Mat4::from_scale(Vec3::splat(s)),
            [0.35, 0.75, 1.0, model.emissive_intensity()],
        ),
        PartRole::Liquid => match part.id {
            EquipmentId::OilTank => {
                // Unit-height column scaled to the fill level, grown from the
                // tank bottom.
                let h = model.fill_level() * 2.4;
                (
                    Mat4::from_translation(base + Vec3::new(0.0, -1.45 + h * 0.5, 0.0))
                        * Mat4::from_scale(Vec3::new(s, h * s, s)),
                    [0.0; 4],
                )
            }
            _ => (
                Mat4::from_translation(base + Vec3::new(0.0, -0.4 + model.liquid_bob(), 0.0))
                    * Mat4::from_scale(Vec3::splat(s)),
                [0.0; 4],
            ),
        },
        PartRole::LevelMarker => {
            let h = model.fill_level() * 2.4;
            (
                Mat4::from_translation(base + Vec3::new(1.1, -1.45 + h, 0.0))
                    * Mat4::from_scale(Vec3::splat(s)),
                [1.0, 0.53, 0.0, 0.4],
            )
        }
    };

    PerDraw {
        model: matrix.to_cols_array_2d(),
        tint,
        emissive,
    }
}
