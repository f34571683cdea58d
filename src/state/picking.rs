// Screen-to-world picking against marker discs.
use nalgebra::{Point3, Vector2, Vector3};

use crate::state::camera::Camera;
use crate::state::tracker::{HighlightTicket, TrackerSim};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

/// Client-space rectangle of the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position to normalized device coordinates of a surface rect.
/// `None` when the surface has no area.
pub fn pointer_to_ndc(
    client_x: f64,
    client_y: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Option<Vector2<f64>> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Vector2::new(
        (client_x - left) / width * 2.0 - 1.0,
        -((client_y - top) / height) * 2.0 + 1.0,
    ))
}

/// Distance along `ray` to a horizontal disc, if the ray passes through it.
pub fn intersect_disc(ray: &Ray, center: Point3<f64>, radius: f64) -> Option<f64> {
    let denom = ray.direction.y;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let t = (center.y - ray.origin.y) / denom;
    if t < 0.0 {
        return None;
    }
    let hit = ray.origin + ray.direction * t;
    let dx = hit.x - center.x;
    let dz = hit.z - center.z;
    if dx * dx + dz * dz <= radius * radius {
        Some(t)
    } else {
        None
    }
}

/// Index of the nearest disc hit by `ray`; equal distances keep list order.
pub fn pick_nearest<I>(ray: &Ray, centers: I, radius: f64) -> Option<usize>
where
    I: IntoIterator<Item = Point3<f64>>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in centers.into_iter().enumerate() {
        if let Some(t) = intersect_disc(ray, c, radius) {
            match best {
                Some((_, bt)) if bt <= t => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}

/// Highlights the marker under a click, if any.
///
/// Clicks that end a pan drag never pick.
pub fn pick_at(
    camera: &Camera,
    sim: &mut TrackerSim,
    rect: SurfaceRect,
    client_x: f64,
    client_y: f64,
    radius: f64,
) -> Option<HighlightTicket> {
    if camera.press_was_drag() {
        return None;
    }
    let ndc = pointer_to_ndc(client_x, client_y, rect.left, rect.top, rect.width, rect.height)?;
    let ray = camera.ray_through(ndc);
    let index = pick_nearest(&ray, sim.world_centers(), radius)?;
    sim.highlight(index)
}
