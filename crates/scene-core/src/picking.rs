//! Ray picking against equipment bounding spheres.

use glam::Vec3;

use crate::equipment::EquipmentModel;
use crate::layout::EquipmentId;

/// Nearest non-negative intersection distance of a ray with a sphere, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// The closest equipment unit hit by the ray, so one click can never affect
/// more than one unit.
pub fn pick_equipment(models: &[EquipmentModel], ray_origin: Vec3, ray_dir: Vec3) -> Option<EquipmentId> {
    let mut best: Option<(EquipmentId, f32)> = None;
    for model in models {
        let (center, radius) = model.pick_sphere();
        if let Some(t) = ray_sphere(ray_origin, ray_dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((model.id, t)),
            }
        }
    }
    best.map(|(id, _)| id)
}
