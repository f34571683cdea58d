//! Tracker tunables. Defaults reproduce the dashboard mock; a JSON object in
//! local storage under [`CONFIG_STORAGE_KEY`] may override any subset.

use serde::{Deserialize, Serialize};

use crate::util::{clog, cwarn};

pub const CONFIG_STORAGE_KEY: &str = "rt_tracker_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub marker_count: usize,
    pub floor_width: f64,
    pub floor_height: f64,
    pub marker_radius: f64,
    pub grid_divisions: u32,
    pub camera_height: f64,
    pub near: f64,
    pub far: f64,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// World units moved per pixel of pointer drag.
    pub pan_sensitivity: f64,
    /// Pointer travel in pixels after which a press counts as a drag and
    /// its click no longer picks.
    pub drag_threshold_px: f64,
    /// Lerp factor per second of elapsed frame time.
    pub lerp_rate: f64,
    /// Distance below which a marker is considered arrived.
    pub arrive_epsilon: f64,
    pub highlight_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            marker_count: 20,
            floor_width: 30.0,
            floor_height: 15.0,
            marker_radius: 0.3,
            grid_divisions: 10,
            camera_height: 10.0,
            near: 0.1,
            far: 1000.0,
            initial_zoom: 20.0,
            min_zoom: 5.0,
            max_zoom: 50.0,
            zoom_step: 2.0,
            pan_sensitivity: 0.05,
            drag_threshold_px: 3.0,
            lerp_rate: 0.5,
            arrive_epsilon: 0.05,
            highlight_ms: 2000,
        }
    }
}

impl TrackerConfig {
    /// Parses overrides from JSON; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(raw).map(Self::normalized)
    }

    /// Repairs combinations that would break the view's invariants.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.floor_width > 0.0) {
            self.floor_width = defaults.floor_width;
        }
        if !(self.floor_height > 0.0) {
            self.floor_height = defaults.floor_height;
        }
        if !(self.marker_radius > 0.0) {
            self.marker_radius = defaults.marker_radius;
        }
        if self.grid_divisions == 0 {
            self.grid_divisions = 1;
        }
        if !(self.near > 0.0) || !(self.far > self.near) {
            self.near = defaults.near;
            self.far = defaults.far;
        }
        if self.max_zoom < self.min_zoom {
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        // both ends must be positive or the frustum collapses or mirrors
        if !(self.min_zoom > 0.0)
            || !(self.max_zoom >= self.min_zoom)
            || !self.max_zoom.is_finite()
        {
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }
        if !self.initial_zoom.is_finite() {
            self.initial_zoom = defaults.initial_zoom;
        }
        self.initial_zoom = self.initial_zoom.clamp(self.min_zoom, self.max_zoom);
        self.zoom_step = self.zoom_step.abs();
        self.drag_threshold_px = self.drag_threshold_px.max(0.0);
        self.lerp_rate = self.lerp_rate.max(0.0);
        self.arrive_epsilon = self.arrive_epsilon.max(0.0);
        self
    }

    /// Reads overrides from local storage, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => match Self::from_json(&raw) {
                Ok(cfg) => {
                    clog(&format!("tracker config loaded from `{}`", CONFIG_STORAGE_KEY));
                    cfg
                }
                Err(e) => {
                    cwarn(&format!("ignoring malformed `{}`: {}", CONFIG_STORAGE_KEY, e));
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = TrackerConfig::from_json(r#"{"marker_count": 5, "zoom_step": 4.0}"#).unwrap();
        assert_eq!(cfg.marker_count, 5);
        assert_eq!(cfg.zoom_step, 4.0);
        assert_eq!(cfg.floor_width, 30.0);
        assert_eq!(cfg.highlight_ms, 2000);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(TrackerConfig::from_json("{}").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(TrackerConfig::from_json("{marker_count:").is_err());
    }

    #[test]
    fn inverted_zoom_range_is_swapped_and_initial_clamped() {
        let cfg = TrackerConfig::from_json(
            r#"{"min_zoom": 40.0, "max_zoom": 10.0, "initial_zoom": 99.0}"#,
        )
        .unwrap();
        assert_eq!(cfg.min_zoom, 10.0);
        assert_eq!(cfg.max_zoom, 40.0);
        assert_eq!(cfg.initial_zoom, 40.0);
    }

    #[test]
    fn negative_max_zoom_falls_back_to_default_range() {
        let cfg = TrackerConfig::from_json(r#"{"max_zoom": -4.0, "initial_zoom": 2.0}"#).unwrap();
        assert_eq!(cfg.min_zoom, 5.0);
        assert_eq!(cfg.max_zoom, 50.0);
        assert_eq!(cfg.initial_zoom, 5.0);
    }

    #[test]
    fn both_ends_negative_fall_back() {
        let cfg = TrackerConfig::from_json(r#"{"min_zoom": -8.0, "max_zoom": -2.0}"#).unwrap();
        assert_eq!((cfg.min_zoom, cfg.max_zoom), (5.0, 50.0));
        assert_eq!(cfg.initial_zoom, 20.0);
    }

    #[test]
    fn non_positive_sizes_fall_back() {
        let cfg = TrackerConfig::from_json(r#"{"floor_width": 0.0, "floor_height": -3.0}"#).unwrap();
        assert_eq!(cfg.floor_width, 30.0);
        assert_eq!(cfg.floor_height, 15.0);
    }
}
