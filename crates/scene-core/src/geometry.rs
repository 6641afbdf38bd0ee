//! Procedural mesh construction for the equipment models, floor, pipes and
//! flow-arrow lines.
//!
//! Units are assembled from a small set of vertex-colored primitives
//! (cylinders, cuboids, spheres, tori) positioned with plain affine
//! transforms. Meshes are built once at startup; everything animated
//! (hover scale, emissive, liquid level, particles) is driven through
//! per-draw parameters, so these buffers stay static.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::PI;

use crate::constants::{FLOOR_SIZE, FLOOR_Y, PIPE_RADIUS, PIPE_TUBE_SIDES};
use crate::flow::FlowPlan;
use crate::layout::EquipmentId;
use crate::piping::PipeNetwork;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

#[inline]
fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_vertex(&mut self, transform: &Mat4, pos: Vec3, normal: Vec3, color: [f32; 4]) -> u32 {
        let world = transform.transform_point3(pos);
        let n = Mat3::from_mat4(*transform) * normal;
        let idx = self.vertices.len() as u32;
        self.vertices.push(MeshVertex {
            position: world.to_array(),
            normal: n.normalize_or_zero().to_array(),
            color,
        });
        idx
    }

    /// Cylinder along local Y, centered at the origin.
    pub fn push_cylinder(
        &mut self,
        transform: Mat4,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: usize,
        color: [f32; 4],
    ) {
        let half = height * 0.5;
        let base = self.vertices.len() as u32;
        // Side rings: bottom then top, radial normals.
        for i in 0..=segments {
            let a = i as f32 / segments as f32 * 2.0 * PI;
            let (s, c) = a.sin_cos();
            let n = Vec3::new(c, 0.0, s);
            self.push_vertex(
                &transform,
                Vec3::new(c * radius_bottom, -half, s * radius_bottom),
                n,
                color,
            );
            self.push_vertex(
                &transform,
                Vec3::new(c * radius_top, half, s * radius_top),
                n,
                color,
            );
        }
        for i in 0..segments as u32 {
            let b = base + i * 2;
            self.indices.extend_from_slice(&[b, b + 2, b + 1, b + 1, b + 2, b + 3]);
        }
        // Caps as triangle fans.
        for (y, radius, normal) in [
            (-half, radius_bottom, Vec3::NEG_Y),
            (half, radius_top, Vec3::Y),
        ] {
            let center = self.push_vertex(&transform, Vec3::new(0.0, y, 0.0), normal, color);
            let ring_start = self.vertices.len() as u32;
            for i in 0..=segments {
                let a = i as f32 / segments as f32 * 2.0 * PI;
                let (s, c) = a.sin_cos();
                self.push_vertex(&transform, Vec3::new(c * radius, y, s * radius), normal, color);
            }
            for i in 0..segments as u32 {
                if normal.y > 0.0 {
                    self.indices.extend_from_slice(&[center, ring_start + i, ring_start + i + 1]);
                } else {
                    self.indices.extend_from_slice(&[center, ring_start + i + 1, ring_start + i]);
                }
            }
        }
    }

    /// Axis-aligned box centered at the origin with the given full extents.
    pub fn push_cuboid(&mut self, transform: Mat4, size: [f32; 3], color: [f32; 4]) {
        let h = Vec3::new(size[0] * 0.5, size[1] * 0.5, size[2] * 0.5);
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X),
            (Vec3::Z, Vec3::Y, Vec3::NEG_X),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];
        for (normal, up, right) in faces {
            let center = normal * h;
            let u = right * h;
            let v = up * h;
            let base = self.vertices.len() as u32;
            for corner in [
                center - u - v,
                center + u - v,
                center + u + v,
                center - u + v,
            ] {
                self.push_vertex(&transform, corner, normal, color);
            }
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    /// Lat-long sphere centered at the origin.
    pub fn push_sphere(&mut self, transform: Mat4, radius: f32, segments: usize, color: [f32; 4]) {
        let rings = segments.max(3);
        let base = self.vertices.len() as u32;
        for r in 0..=rings {
            let phi = r as f32 / rings as f32 * PI;
            let (sp, cp) = phi.sin_cos();
            for s in 0..=segments {
                let theta = s as f32 / segments as f32 * 2.0 * PI;
                let (st, ct) = theta.sin_cos();
                let n = Vec3::new(sp * ct, cp, sp * st);
                self.push_vertex(&transform, n * radius, n, color);
            }
        }
        let stride = segments as u32 + 1;
        for r in 0..rings as u32 {
            for s in 0..segments as u32 {
                let a = base + r * stride + s;
                let b = a + stride;
                self.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
            }
        }
    }

    /// Torus lying in the local XZ plane (hole axis along Y), so it wraps a
    /// vertical cylinder.
    pub fn push_torus(
        &mut self,
        transform: Mat4,
        ring_radius: f32,
        tube_radius: f32,
        segments: usize,
        sides: usize,
        color: [f32; 4],
    ) {
        let base = self.vertices.len() as u32;
        for i in 0..=segments {
            let u = i as f32 / segments as f32 * 2.0 * PI;
            let (su, cu) = u.sin_cos();
            let ring_center = Vec3::new(cu * ring_radius, 0.0, su * ring_radius);
            let radial = Vec3::new(cu, 0.0, su);
            for j in 0..=sides {
                let v = j as f32 / sides as f32 * 2.0 * PI;
                let (sv, cv) = v.sin_cos();
                let n = radial * cv + Vec3::Y * sv;
                self.push_vertex(&transform, ring_center + n * tube_radius, n, color);
            }
        }
        let stride = sides as u32 + 1;
        for i in 0..segments as u32 {
            for j in 0..sides as u32 {
                let a = base + i * stride + j;
                let b = a + stride;
                self.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
    }

    /// Open tube swept along a polyline; used for the pipe runs.
    pub fn push_tube(&mut self, points: &[Vec3], radius: f32, sides: usize, color: [f32; 4]) {
        if points.len() < 2 {
            return;
        }
        let base = self.vertices.len() as u32;
        let identity = Mat4::IDENTITY;
        for (i, p) in points.iter().enumerate() {
            let tangent = if i == 0 {
                points[1] - points[0]
            } else if i == points.len() - 1 {
                points[i] - points[i - 1]
            } else {
                points[i + 1] - points[i - 1]
            }
            .normalize_or_zero();
            // Stable-enough frame: the paths only arc vertically.
            let side = if tangent.cross(Vec3::Y).length_squared() > 1e-6 {
                tangent.cross(Vec3::Y).normalize()
            } else {
                Vec3::X
            };
            let up = side.cross(tangent).normalize_or_zero();
            for j in 0..=sides {
                let a = j as f32 / sides as f32 * 2.0 * PI;
                let (s, c) = a.sin_cos();
                let n = side * c + up * s;
                self.push_vertex(&identity, *p + n * radius, n, color);
            }
        }
        let stride = sides as u32 + 1;
        for i in 0..(points.len() - 1) as u32 {
            for j in 0..sides as u32 {
                let a = base + i * stride + j;
                let b = a + stride;
                self.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
    }
}

/// Mesh parts of one equipment unit. `body` is always present; the optional
/// parts exist only for the units whose active effect needs a separately
/// driven draw (emissive screen/coils, moving liquid, particle seed).
pub struct EquipmentMeshSet {
    pub body: Mesh,
    pub coils: Option<Mesh>,
    pub screen: Option<Mesh>,
    pub liquid: Option<Mesh>,
    pub level_marker: Option<Mesh>,
    pub particle: Option<Mesh>,
}

impl EquipmentMeshSet {
    fn body_only(body: Mesh) -> Self {
        Self {
            body,
            coils: None,
            screen: None,
            liquid: None,
            level_marker: None,
            particle: None,
        }
    }
}

const SEG: usize = 32;
const SEG_SMALL: usize = 16;

fn at(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

fn at_rot_z90(x: f32, y: f32, z: f32) -> Mat4 {
    at(x, y, z) * Mat4::from_rotation_z(PI / 2.0)
}

fn at_rot_x90(x: f32, y: f32, z: f32) -> Mat4 {
    at(x, y, z) * Mat4::from_rotation_x(PI / 2.0)
}

/// Build the mesh parts for a unit in unit-local coordinates.
pub fn build_equipment(id: EquipmentId) -> EquipmentMeshSet {
    match id {
        EquipmentId::FeedTank => feed_tank(),
        EquipmentId::Reactor => reactor(),
        EquipmentId::Condenser => condenser(),
        EquipmentId::SeparationTank => separation_tank(),
        EquipmentId::GasTank => gas_tank(),
        EquipmentId::OilTank => oil_tank(),
        EquipmentId::ControlPanel => control_panel(),
    }
}

fn feed_tank() -> EquipmentMeshSet {
    let mut body = Mesh::new();
    // Tank shell and lid
    body.push_cylinder(Mat4::IDENTITY, 1.0, 1.0, 2.0, SEG, rgb(0x3366aa));
    body.push_cylinder(at(0.0, 1.05, 0.0), 1.05, 1.05, 0.1, SEG, rgb(0x2255aa));
    // Inlet pipe
    body.push_cylinder(at_rot_x90(0.0, 0.5, 1.0), 0.15, 0.15, 1.0, SEG_SMALL, rgb(0x999999));
    // Stirrer motor and shaft
    body.push_cuboid(at(0.0, 1.2, 0.0), [0.3, 0.2, 0.3], rgb(0x444444));
    body.push_cylinder(at(0.0, 1.1, 0.0), 0.05, 0.05, 1.8, 8, rgb(0xaaaaaa));
    // Level indicator strip
    body.push_cuboid(at(0.9, 0.0, 0.0), [0.1, 1.8, 0.1], rgb(0xdddddd));
    EquipmentMeshSet::body_only(body)
}

fn reactor() -> EquipmentMeshSet {
    let mut body = Mesh::new();
    body.push_cylinder(Mat4::IDENTITY, 1.2, 1.2, 3.0, SEG, rgb(0x995522));
    // Temperature gauge
    body.push_cylinder(at_rot_z90(1.25, 0.8, 0.0), 0.2, 0.2, 0.3, SEG_SMALL, rgb(0x888888));
    body.push_cuboid(at(1.4, 0.8, 0.0), [0.1, 0.3, 0.3], rgb(0x444444));
    // Feed and vapor nozzles
    body.push_cylinder(at_rot_z90(-1.3, 0.7, 0.0), 0.15, 0.15, 1.0, SEG_SMALL, rgb(0x777777));
    body.push_cylinder(at_rot_z90(1.3, 0.7, 0.0), 0.15, 0.15, 1.0, SEG_SMALL, rgb(0x777777));
    // Support legs
    for x in [-0.8, 0.8] {
        body.push_cuboid(at(x, -1.7, 0.0), [0.2, 0.4, 0.2], rgb(0x444444));
    }
    // External heating coils, drawn separately so they glow when running
    let mut coils = Mesh::new();
    for i in 0..5 {
        coils.push_torus(
            at(0.0, -1.0 + i as f32 * 0.5, 0.0),
            1.3,
            0.08,
            SEG,
            SEG_SMALL,
            rgb(0xaa3300),
        );
    }
    EquipmentMeshSet {
        coils: Some(coils),
        ..EquipmentMeshSet::body_only(body)
    }
}

fn condenser() -> EquipmentMeshSet {
    let mut body = Mesh::new();
    // Horizontal shell with end caps
    body.push_cylinder(at_rot_z90(0.0, 0.0, 0.0), 0.7, 0.7, 3.0, SEG, rgb(0x66aacc));
    for x in [-1.5, 1.5] {
        body.push_cylinder(at_rot_z90(x, 0.0, 0.0), 0.75, 0.75, 0.1, SEG, rgb(0x5599bb));
    }
    // Vapor in, condensate out
    body.push_cylinder(at_rot_z90(-1.6, 0.4, 0.0), 0.15, 0.15, 0.5, SEG_SMALL, rgb(0xcc5522));
    body.push_cylinder(at_rot_z90(1.6, -0.4, 0.0), 0.15, 0.15, 0.5, SEG_SMALL, rgb(0x4488aa));
    // Cooling water stubs
    body.push_cylinder(at(0.0, 0.8, 0.0), 0.15, 0.15, 0.6, SEG_SMALL, rgb(0x6699cc));
    body.push_cylinder(at(0.0, -0.8, 0.0), 0.15, 0.15, 0.6, SEG_SMALL, rgb(0x44ccff));
    for x in [-0.8, 0.8] {
        body.push_cuboid(at(x, -0.9, 0.0), [0.2, 0.3, 0.2], rgb(0x555555));
    }
    // Droplet mark drawn once per live particle near the outlet
    let mut particle = Mesh::new();
    particle.push_sphere(Mat4::IDENTITY, 0.03, 8, rgb(0x88ccff));
    EquipmentMeshSet {
        particle: Some(particle),
        ..EquipmentMeshSet::body_only(body)
    }
}

fn separation_tank() -> EquipmentMeshSet {
    let mut body = Mesh::new();
    body.push_cylinder(Mat4::IDENTITY, 1.0, 1.0, 2.5, SEG, rgb(0x8899aa));
    body.push_cylinder(at(0.0, 1.3, 0.0), 1.05, 1.05, 0.1, SEG, rgb(0x778899));
    body.push_cylinder(at(0.0, -1.3, 0.0), 1.05, 1.05, 0.1, SEG, rgb(0x778899));
    // Condensate in, gas up, oil out
    body.push_cylinder(at_rot_z90(-1.1, 0.7, 0.0), 0.15, 0.15, 0.5, SEG_SMALL, rgb(0x666666));
    body.push_cylinder(at(0.0, 1.4, -0.5), 0.15, 0.15, 0.5, SEG_SMALL, rgb(0x777777));
    body.push_cylinder(at_rot_z90(1.1, -0.8, 0.0), 0.15, 0.15, 0.5, SEG_SMALL, rgb(0x777777));
    // Sight gauge
    body.push_cuboid(at(0.95, 0.0, 0.0), [0.05, 2.0, 0.05], rgb(0xdddddd));
    for x in [-0.7, 0.7] {
        body.push_cuboid(at(x, -1.5, 0.0), [0.2, 0.4, 0.2], rgb(0x555555));
    }
    // Liquid body bobs as a whole while separating; the red level marker
    // rides along with it.
    let mut liquid = Mesh::new();
    liquid.push_cylinder(Mat4::IDENTITY, 0.95, 0.95, 1.5, SEG, rgb(0x443322));
    liquid.push_cuboid(at(0.95, 0.4, 0.05), [0.07, 0.07, 0.07], rgb(0xff0000));
    EquipmentMeshSet {
        liquid: Some(liquid),
        ..EquipmentMeshSet::body_only(body)
    }
}

fn gas_tank() -> EquipmentMeshSet {
    let mut body = Mesh::new();
    body.push_sphere(Mat4::IDENTITY, 1.0, SEG, rgb(0x44bb88));
    // Skirt and base
    body.push_cylinder(at(0.0, -1.0, 0.0), 1.1, 1.3, 0.2, SEG, rgb(0x777777));
    body.push_cuboid(at(0.0, -1.2, 0.0), [2.0, 0.2, 1.5], rgb(0x777777));
    // Inlet and outlet
    body.push_cylinder(at_rot_x90(0.0, 0.5, 1.0), 0.15, 0.15, 1.0, SEG_SMALL, rgb(0x999999));
    body.push_cylinder(at_rot_x90(0.0, 0.5, -1.0), 0.15, 0.15, 0.5, SEG_SMALL, rgb(0x999999));
    // Pressure gauge
    body.push_cylinder(at_rot_z90(0.8, 0.5, 0.0), 0.2, 0.2, 0.1, SEG_SMALL, rgb(0x888888));
    body.push_cuboid(at(0.9, 0.5, 0.0), [0.1, 0.3, 0.3], rgb(0x444444));
    // Relief valve
    body.push_cylinder(at(0.0, 1.0, 0.0), 0.15, 0.1, 0.4, SEG_SMALL, rgb(0xaa6644));
    body.push_cuboid(at(0.0, 1.25, 0.0), [0.3, 0.1, 0.3], rgb(0xaa6644));
    // Faint gas wisp mark
    let mut particle = Mesh::new();
    particle.push_sphere(Mat4::IDENTITY, 0.1, 8, rgb(0xaaffcc));
    EquipmentMeshSet {
        particle: Some(particle),
        ..EquipmentMeshSet::body_only(body)
    }
}

fn oil_tank() -> EquipmentMeshSet {
    let mut body = Mesh::new();
    body.push_cylinder(Mat4::IDENTITY, 1.2, 1.2, 3.0, SEG, rgb(0x336688));
    body.push_cylinder(at(0.0, 1.55, 0.0), 1.25, 1.25, 0.1, SEG, rgb(0x446688));
    // Access hatch with clamp ring
    body.push_cylinder(at(0.0, 1.65, 0.0), 0.4, 0.4, 0.1, SEG_SMALL, rgb(0x555555));
    body.push_torus(at(0.0, 1.7, 0.0), 0.4, 0.05, SEG, SEG_SMALL, rgb(0x333333));
    // Transfer piping and drain valve
    body.push_cylinder(at_rot_z90(-1.3, 0.5, 0.0), 0.15, 0.15, 0.5, SEG_SMALL, rgb(0x777777));
    body.push_cylinder(at_rot_x90(0.0, -1.6, 1.0), 0.15, 0.15, 0.6, SEG_SMALL, rgb(0x777777));
    body.push_cuboid(at(0.0, -1.6, 0.7), [0.3, 0.2, 0.2], rgb(0xaa2222));
    // Sight gauge strip
    body.push_cuboid(at(1.1, 0.0, 0.0), [0.05, 2.7, 0.05], rgb(0xdddddd));
    // Pedestal
    body.push_cylinder(at(0.0, -1.6, 0.0), 1.3, 1.5, 0.2, SEG, rgb(0x555555));
    body.push_cylinder(at(0.0, -1.8, 0.0), 1.5, 1.5, 0.2, SEG, rgb(0x444444));
    // Unit-height liquid column, scaled to the fill level at draw time
    let mut liquid = Mesh::new();
    liquid.push_cylinder(Mat4::IDENTITY, 1.15, 1.15, 1.0, SEG, rgb(0x332211));
    // Gauge marker tracking the surface
    let mut level_marker = Mesh::new();
    level_marker.push_cuboid(Mat4::IDENTITY, [0.1, 0.1, 0.1], rgb(0xff8800));
    EquipmentMeshSet {
        liquid: Some(liquid),
        level_marker: Some(level_marker),
        ..EquipmentMeshSet::body_only(body)
    }
}

fn control_panel() -> EquipmentMeshSet {
    let mut body = Mesh::new();
    body.push_cuboid(Mat4::IDENTITY, [2.0, 2.5, 0.8], rgb(0x556677));
    // Buttons in a 3x2 grid; the first is the green run button
    for i in 0..6 {
        let x = -0.6 + (i % 3) as f32 * 0.6;
        let y = -0.4 - (i / 3) as f32 * 0.5;
        let color = if i == 0 { rgb(0x55bb55) } else { rgb(0xdd3333) };
        body.push_cylinder(at_rot_x90(x, y, 0.41), 0.08, 0.08, 0.05, SEG_SMALL, color);
    }
    // Status lamps
    for i in 0..4 {
        body.push_sphere(at(-0.6 + i as f32 * 0.4, 0.0, 0.41), 0.06, SEG_SMALL, rgb(0x444444));
    }
    body.push_cuboid(at(0.0, -1.3, 0.0), [2.2, 0.1, 1.0], rgb(0x333333));
    // Cable conduit
    body.push_cylinder(at(0.8, -1.2, 0.0), 0.1, 0.1, 0.2, SEG_SMALL, rgb(0x222222));
    body.push_cylinder(at_rot_z90(0.8, -1.4, 0.0), 0.05, 0.05, 1.0, 8, rgb(0x333333));
    // HMI screen, emissive when the panel is running
    let mut screen = Mesh::new();
    screen.push_cuboid(at(0.0, 0.5, 0.41), [1.5, 1.0, 0.05], rgb(0x112233));
    EquipmentMeshSet {
        screen: Some(screen),
        ..EquipmentMeshSet::body_only(body)
    }
}

/// Ground plane under the plant.
pub fn floor_mesh() -> Mesh {
    let mut mesh = Mesh::new();
    let [w, d] = FLOOR_SIZE;
    mesh.push_cuboid(at(0.0, FLOOR_Y - 0.025, 0.0), [w, 0.05, d], rgb(0xffffff));
    mesh
}

/// All pipe runs merged into one static tube mesh.
pub fn pipe_mesh(network: &PipeNetwork) -> Mesh {
    let mut mesh = Mesh::new();
    for run in &network.runs {
        mesh.push_tube(&run.points, PIPE_RADIUS, PIPE_TUBE_SIDES, run.color);
    }
    mesh
}

/// Flow arrows flattened into line-list vertices (pairs form segments).
pub fn flow_lines(plan: &FlowPlan) -> Vec<LineVertex> {
    let mut out = Vec::new();
    let mut seg = |a: Vec3, b: Vec3, color: [f32; 4]| {
        out.push(LineVertex {
            position: a.to_array(),
            color,
        });
        out.push(LineVertex {
            position: b.to_array(),
            color,
        });
    };
    for arrow in &plan.arrows {
        seg(arrow.shaft[0], arrow.shaft[1], arrow.color);
        seg(arrow.head[0], arrow.head[1], arrow.color);
        seg(arrow.head[1], arrow.head[2], arrow.color);
    }
    out
}
