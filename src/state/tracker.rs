//! Marker simulation for the real-time tracker.
//!
//! Everything here is a plain state transition over an injected RNG so the
//! motion rules can be exercised without a browser. The view owns a
//! [`TrackerSim`] behind a `RefCell` and calls [`TrackerSim::advance`] once
//! per animation frame.

use nalgebra::{Point3, Vector2};
use rand::Rng;

use crate::config::TrackerConfig;

/// Height of the marker discs above the floor plane.
pub const MARKER_ELEVATION: f64 = 0.01;

pub const MARKER_COLOR: u32 = 0xff0000;
pub const HIGHLIGHT_COLOR: u32 = 0x00ff00;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorBounds {
    pub width: f64,
    pub height: f64,
}

impl FloorBounds {
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    pub fn half_height(&self) -> f64 {
        self.height * 0.5
    }

    pub fn clamp(&self, p: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            p.x.clamp(-self.half_width(), self.half_width()),
            p.y.clamp(-self.half_height(), self.half_height()),
        )
    }

    pub fn contains(&self, p: Vector2<f64>) -> bool {
        p.x.abs() <= self.half_width() && p.y.abs() <= self.half_height()
    }

    /// Uniform point in `[-W/2, W/2] x [-H/2, H/2]`.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        Vector2::new(
            (rng.gen_range(0.0..1.0) - 0.5) * self.width,
            (rng.gen_range(0.0..1.0) - 0.5) * self.height,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Floor coordinate (x, z).
    pub position: Vector2<f64>,
    pub target: Vector2<f64>,
    /// Generation of the live highlight, if any.
    pub highlight: Option<u64>,
}

impl Marker {
    pub fn spawn<R: Rng + ?Sized>(bounds: &FloorBounds, rng: &mut R) -> Self {
        let position = bounds.random_point(rng);
        let target = bounds.random_point(rng);
        Self { position, target, highlight: None }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }

    pub fn color(&self) -> u32 {
        if self.is_highlighted() { HIGHLIGHT_COLOR } else { MARKER_COLOR }
    }

    pub fn world_center(&self) -> Point3<f64> {
        Point3::new(self.position.x, MARKER_ELEVATION, self.position.y)
    }
}

/// Motion parameters shared by every marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub lerp_rate: f64,
    pub arrive_epsilon: f64,
}

/// Lerps one marker toward its target, then retargets it if it arrived.
/// Returns whether a new target was drawn.
pub fn step_marker<R: Rng + ?Sized>(
    marker: &mut Marker,
    dt: f64,
    motion: Motion,
    bounds: &FloorBounds,
    rng: &mut R,
) -> bool {
    // a factor above 1 would overshoot and could leave the floor
    let t = (dt.max(0.0) * motion.lerp_rate).min(1.0);
    marker.position = bounds.clamp(marker.position + (marker.target - marker.position) * t);
    debug_assert!(bounds.contains(marker.position));
    if (marker.target - marker.position).norm() < motion.arrive_epsilon {
        marker.target = bounds.random_point(rng);
        true
    } else {
        false
    }
}

/// Token handed out when a marker is highlighted; reverting with a stale
/// token is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTicket {
    pub index: usize,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct TrackerSim {
    pub bounds: FloorBounds,
    pub motion: Motion,
    pub markers: Vec<Marker>,
    next_generation: u64,
}

impl TrackerSim {
    pub fn new<R: Rng + ?Sized>(cfg: &TrackerConfig, rng: &mut R) -> Self {
        let bounds = FloorBounds { width: cfg.floor_width, height: cfg.floor_height };
        let markers = (0..cfg.marker_count).map(|_| Marker::spawn(&bounds, rng)).collect();
        Self {
            bounds,
            motion: Motion { lerp_rate: cfg.lerp_rate, arrive_epsilon: cfg.arrive_epsilon },
            markers,
            next_generation: 1,
        }
    }

    /// One frame of motion. Returns how many markers were retargeted.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) -> usize {
        let mut retargeted = 0;
        for m in &mut self.markers {
            if step_marker(m, dt, self.motion, &self.bounds, rng) {
                retargeted += 1;
            }
        }
        retargeted
    }

    pub fn world_centers(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.markers.iter().map(Marker::world_center)
    }

    /// Marks a marker highlighted, superseding any earlier highlight of it.
    pub fn highlight(&mut self, index: usize) -> Option<HighlightTicket> {
        let marker = self.markers.get_mut(index)?;
        let generation = self.next_generation;
        self.next_generation += 1;
        marker.highlight = Some(generation);
        Some(HighlightTicket { index, generation })
    }

    /// Clears the highlight if `ticket` is still the live one.
    pub fn revert(&mut self, ticket: HighlightTicket) -> bool {
        match self.markers.get_mut(ticket.index) {
            Some(m) if m.highlight == Some(ticket.generation) => {
                m.highlight = None;
                true
            }
            _ => false,
        }
    }
}
