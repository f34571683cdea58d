// Top-down orthographic camera over the floor plane.
//
// World axes: X to the right, Y up (camera height), Z toward the bottom of
// the screen. Floor coordinates are (x, z).
use nalgebra::{Point3, Vector2, Vector3};

use crate::config::TrackerConfig;
use crate::state::picking::Ray;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub half_width: f64,
    pub half_height: f64,
    pub near: f64,
    pub far: f64,
}

impl Projection {
    /// Extents derived from the zoom level; height follows the floor's aspect.
    pub fn orthographic(zoom: f64, extent_ratio: f64, near: f64, far: f64) -> Self {
        Self {
            half_width: zoom,
            half_height: zoom * extent_ratio,
            near,
            far,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub zoom: f64,
    pub position: Point3<f64>,
    pub projection: Projection,
    pub panning: bool,
    pub last_x: f64,
    pub last_y: f64,
    /// Pointer travel in pixels since the last press.
    drag_travel: f64,
    drag_threshold: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
    pan_sensitivity: f64,
    extent_ratio: f64,
}

impl Camera {
    pub fn from_config(cfg: &TrackerConfig) -> Self {
        let extent_ratio = cfg.floor_height / cfg.floor_width;
        let zoom = cfg.initial_zoom.clamp(cfg.min_zoom, cfg.max_zoom);
        Self {
            zoom,
            position: Point3::new(0.0, cfg.camera_height, 0.0),
            projection: Projection::orthographic(zoom, extent_ratio, cfg.near, cfg.far),
            panning: false,
            last_x: 0.0,
            last_y: 0.0,
            drag_travel: 0.0,
            drag_threshold: cfg.drag_threshold_px,
            min_zoom: cfg.min_zoom,
            max_zoom: cfg.max_zoom,
            zoom_step: cfg.zoom_step,
            pan_sensitivity: cfg.pan_sensitivity,
            extent_ratio,
        }
    }

    /// Clamps and applies a zoom level. Only the projection is rebuilt.
    /// Returns whether the zoom actually changed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        self.projection = Projection::orthographic(
            zoom,
            self.extent_ratio,
            self.projection.near,
            self.projection.far,
        );
        true
    }

    /// Shrinks the visible extent.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom - self.zoom_step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom + self.zoom_step)
    }

    pub fn begin_pan(&mut self, x: f64, y: f64) {
        self.panning = true;
        self.drag_travel = 0.0;
        self.last_x = x;
        self.last_y = y;
    }

    /// Moves the camera by the pointer delta since the last latch.
    /// Dragging right moves the camera toward -X, dragging down toward +Z.
    pub fn pan_to(&mut self, x: f64, y: f64) -> bool {
        if !self.panning {
            return false;
        }
        let (px, py) = (x - self.last_x, y - self.last_y);
        self.drag_travel += px.hypot(py);
        self.position.x -= px * self.pan_sensitivity;
        self.position.z += py * self.pan_sensitivity;
        self.last_x = x;
        self.last_y = y;
        true
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }

    /// Whether the latest press moved far enough to count as a drag.
    /// Stays set after release so the trailing `click` can be ignored.
    pub fn press_was_drag(&self) -> bool {
        self.drag_travel > self.drag_threshold
    }

    pub fn ndc_to_world(&self, ndc: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            self.position.x + ndc.x * self.projection.half_width,
            self.position.z - ndc.y * self.projection.half_height,
        )
    }

    /// Ray from the near plane straight down through an NDC point.
    pub fn ray_through(&self, ndc: Vector2<f64>) -> Ray {
        let floor = self.ndc_to_world(ndc);
        Ray {
            origin: Point3::new(floor.x, self.position.y - self.projection.near, floor.y),
            direction: Vector3::new(0.0, -1.0, 0.0),
        }
    }

    /// Canvas transform `(sx, sy, tx, ty)` mapping floor (x, z) to pixels.
    pub fn screen_transform(&self, width: f64, height: f64) -> (f64, f64, f64, f64) {
        let sx = width / (2.0 * self.projection.half_width);
        let sy = height / (2.0 * self.projection.half_height);
        (
            sx,
            sy,
            width * 0.5 - self.position.x * sx,
            height * 0.5 - self.position.z * sy,
        )
    }
}
