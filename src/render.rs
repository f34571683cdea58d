// Canvas drawing for both views.
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::model::{
    self, Room, ROOM_CORNER_RADIUS, ROOM_STROKE_WIDTH, STAGE_BACKGROUND, STAGE_HEIGHT, STAGE_WIDTH,
};
use crate::state::tracker::FloorBounds;
use crate::state::{Camera, TrackerSim};
use crate::util::css_hex;

pub const SCENE_BACKGROUND: &str = "#f0f0f0";
pub const FLOOR_FILL: &str = "#ffffff";
pub const GRID_CENTER_LINE: &str = "#888888";
pub const GRID_LINE: &str = "#cccccc";

/// Square grid of `size` world units centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOverlay {
    pub size: f64,
    pub divisions: u32,
}

impl GridOverlay {
    /// Line offsets from `-size/2` to `size/2`, flagged when on the centre.
    pub fn lines(&self) -> Vec<(f64, bool)> {
        let half = self.size * 0.5;
        let step = self.size / self.divisions as f64;
        (0..=self.divisions)
            .map(|i| (-half + i as f64 * step, 2 * i == self.divisions))
            .collect()
    }
}

pub fn draw_tracker_scene(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    camera: &Camera,
    sim: &TrackerSim,
    grid: GridOverlay,
    marker_radius: f64,
) {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str(SCENE_BACKGROUND);
    ctx.fill_rect(0.0, 0.0, width, height);

    let (sx, sy, tx, ty) = camera.screen_transform(width, height);
    ctx.set_transform(sx, 0.0, 0.0, sy, tx, ty).ok();
    let line_w = (1.0 / sx.min(sy)).max(0.001);

    let FloorBounds { width: fw, height: fh } = sim.bounds;
    ctx.set_fill_style_str(FLOOR_FILL);
    ctx.fill_rect(-fw * 0.5, -fh * 0.5, fw, fh);

    let half = grid.size * 0.5;
    ctx.set_line_width(line_w);
    // centre lines last so they sit on top
    for center_pass in [false, true] {
        ctx.set_stroke_style_str(if center_pass { GRID_CENTER_LINE } else { GRID_LINE });
        for (offset, is_center) in grid.lines() {
            if is_center != center_pass {
                continue;
            }
            ctx.begin_path();
            ctx.move_to(offset, -half);
            ctx.line_to(offset, half);
            ctx.move_to(-half, offset);
            ctx.line_to(half, offset);
            ctx.stroke();
        }
    }

    for m in &sim.markers {
        ctx.begin_path();
        ctx.set_fill_style_str(&css_hex(m.color()));
        ctx.arc(m.position.x, m.position.y, marker_radius, 0.0, PI * 2.0).ok();
        ctx.fill();
    }
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w * 0.5).min(h * 0.5);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).ok();
    ctx.arc_to(x + w, y + h, x, y + h, r).ok();
    ctx.arc_to(x, y + h, x, y, r).ok();
    ctx.arc_to(x, y, x + w, y, r).ok();
    ctx.close_path();
}

pub fn draw_floor_plan(ctx: &CanvasRenderingContext2d, rooms: &[Room]) {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str(STAGE_BACKGROUND);
    ctx.fill_rect(0.0, 0.0, STAGE_WIDTH, STAGE_HEIGHT);
    ctx.set_text_baseline("top");
    for room in rooms {
        let palette = model::room_palette(room.alert);
        let r = room.rect;
        rounded_rect_path(ctx, r.x, r.y, r.width, r.height, ROOM_CORNER_RADIUS);
        ctx.set_fill_style_str(palette.fill);
        ctx.fill();
        ctx.set_stroke_style_str(palette.stroke);
        ctx.set_line_width(ROOM_STROKE_WIDTH);
        ctx.stroke();
        for label in model::room_labels(room) {
            ctx.set_font(label.font);
            ctx.set_fill_style_str(label.color);
            ctx.fill_text(&label.text, label.x, label.y).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_ten_cells_and_one_centre_line() {
        let grid = GridOverlay { size: 30.0, divisions: 10 };
        let lines = grid.lines();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0].0, -15.0);
        assert_eq!(lines[10].0, 15.0);
        let centres: Vec<_> = lines.iter().filter(|(_, c)| *c).collect();
        assert_eq!(centres.len(), 1);
        assert!(centres[0].0.abs() < 1e-12);
    }

    #[test]
    fn odd_divisions_have_no_centre_line() {
        let grid = GridOverlay { size: 9.0, divisions: 3 };
        assert!(grid.lines().iter().all(|(_, c)| !c));
    }
}
