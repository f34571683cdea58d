use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::{Event, HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

use super::{
    camera_controls::CameraControls,
    legend_panel::{LegendEntry, LegendPanel},
    toast::{ToastAction, ToastList, ToastStack},
};
use crate::config::TrackerConfig;
use crate::error::SurfaceError;
use crate::render::{GridOverlay, draw_tracker_scene};
use crate::state::tracker::HighlightTicket;
use crate::state::{Camera, SurfaceRect, TrackerSim, pick_at};
use crate::surface::{self, AnimationLoop, ListenerGuard, PendingReverts, Timeout};
use crate::util::{clog, cwarn};

const PICK_TOAST: &str = "🟢 Worker / equipment selected!";

#[derive(Properties, PartialEq, Clone)]
pub struct TrackerViewProps {
    pub config: TrackerConfig,
}

/// Everything the mounted tracker holds on to. Dropping it detaches the view.
struct MountedTracker {
    _listeners: Vec<ListenerGuard>,
    _frames: AnimationLoop,
    reverts: Rc<RefCell<PendingReverts<Timeout>>>,
}

impl Drop for MountedTracker {
    fn drop(&mut self) {
        let mut reverts = self.reverts.borrow_mut();
        if reverts.pending() > 0 {
            clog(&format!("cancelling {} pending reverts", reverts.pending()));
        }
        reverts.clear();
    }
}

/// Picks under the pointer, announces the hit and arms its revert.
/// A revert that cannot be scheduled is applied at once.
#[allow(clippy::too_many_arguments)]
fn handle_click<T>(
    camera: &Camera,
    sim: &mut TrackerSim,
    reverts: &mut PendingReverts<T>,
    config: &TrackerConfig,
    rect: SurfaceRect,
    (client_x, client_y): (f64, f64),
    notify: impl FnOnce(ToastAction),
    schedule_revert: impl FnOnce(HighlightTicket, u32) -> Result<T, SurfaceError>,
) -> Option<HighlightTicket> {
    let ticket = pick_at(camera, sim, rect, client_x, client_y, config.marker_radius)?;
    clog(&format!("marker {} picked", ticket.index));
    notify(ToastAction::Push(PICK_TOAST.to_string()));
    match schedule_revert(ticket, config.highlight_ms) {
        Ok(pending) => {
            reverts.replace(ticket.index, pending);
        }
        Err(err) => {
            cwarn(&format!("revert timer not scheduled: {}", err));
            sim.revert(ticket);
        }
    }
    Some(ticket)
}

fn mount(
    canvas_ref: &NodeRef,
    camera: Rc<RefCell<Camera>>,
    toasts: UseReducerHandle<ToastList>,
    config: &TrackerConfig,
) -> Result<MountedTracker, SurfaceError> {
    let window = surface::window()?;
    let canvas = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or(SurfaceError::CanvasDetached)?;
    let ctx = surface::context_2d(&canvas)?;
    surface::fit_canvas_to_window(&window, &canvas);

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let mut rng = SmallRng::seed_from_u64(seed);
    let sim = Rc::new(RefCell::new(TrackerSim::new(config, &mut rng)));
    let reverts = Rc::new(RefCell::new(PendingReverts::new(config.marker_count)));
    let grid = GridOverlay {
        size: config.floor_width,
        divisions: config.grid_divisions,
    };
    let marker_radius = config.marker_radius;

    // Guards registered so far are released if a later step fails.
    let mut listeners = Vec::with_capacity(5);

    {
        let window_resize = window.clone();
        let canvas = canvas.clone();
        listeners.push(ListenerGuard::attach(&window, "resize", move |_: Event| {
            surface::fit_canvas_to_window(&window_resize, &canvas);
        })?);
    }

    {
        let camera = camera.clone();
        listeners.push(ListenerGuard::attach(&canvas, "mousedown", move |e: MouseEvent| {
            camera
                .borrow_mut()
                .begin_pan(e.client_x() as f64, e.client_y() as f64);
        })?);
    }

    // Move/up on the window so a drag released off the canvas still ends.
    {
        let camera = camera.clone();
        listeners.push(ListenerGuard::attach(&window, "mousemove", move |e: MouseEvent| {
            camera
                .borrow_mut()
                .pan_to(e.client_x() as f64, e.client_y() as f64);
        })?);
    }
    {
        let camera = camera.clone();
        listeners.push(ListenerGuard::attach(&window, "mouseup", move |_: MouseEvent| {
            camera.borrow_mut().end_pan();
        })?);
    }

    {
        let camera = camera.clone();
        let sim = sim.clone();
        let reverts = reverts.clone();
        let canvas_click = canvas.clone();
        let window_click = window.clone();
        let config = config.clone();
        listeners.push(ListenerGuard::attach(&canvas, "click", move |e: MouseEvent| {
            let bounds = canvas_click.get_bounding_client_rect();
            let rect = SurfaceRect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            };
            let sim_revert = sim.clone();
            handle_click(
                &camera.borrow(),
                &mut sim.borrow_mut(),
                &mut reverts.borrow_mut(),
                &config,
                rect,
                (e.client_x() as f64, e.client_y() as f64),
                |action| toasts.dispatch(action),
                |ticket, millis| {
                    Timeout::schedule(&window_click, millis, move || {
                        sim_revert.borrow_mut().revert(ticket);
                    })
                },
            );
        })?);
    }

    let frames = {
        let canvas = canvas.clone();
        let camera = camera.clone();
        let sim = sim.clone();
        AnimationLoop::start(&window, move |dt| {
            if !canvas.is_connected() {
                return;
            }
            sim.borrow_mut().advance(dt, &mut rng);
            draw_tracker_scene(
                &ctx,
                canvas.width() as f64,
                canvas.height() as f64,
                &camera.borrow(),
                &sim.borrow(),
                grid,
                marker_radius,
            );
        })?
    };

    clog(&format!(
        "tracker mounted: {} markers on {}x{} floor",
        config.marker_count, config.floor_width, config.floor_height
    ));
    Ok(MountedTracker {
        _listeners: listeners,
        _frames: frames,
        reverts,
    })
}

#[function_component(TrackerView)]
pub fn tracker_view(props: &TrackerViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = {
        let config = props.config.clone();
        use_mut_ref(move || Camera::from_config(&config))
    };
    let zoom = use_state(|| camera.borrow().zoom);
    let toasts = use_reducer(ToastList::default);

    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let toasts = toasts.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let mounted = match mount(&canvas_ref, camera, toasts, &config) {
                Ok(m) => Some(m),
                Err(e) => {
                    cwarn(&format!("tracker mount failed: {}", e));
                    None
                }
            };
            move || {
                if mounted.is_some() {
                    drop(mounted);
                    clog("tracker unmounted");
                }
            }
        });
    }

    let zoom_cb = |zoom_in: bool| {
        let camera = camera.clone();
        let zoom = zoom.clone();
        Callback::from(move |()| {
            let mut cam = camera.borrow_mut();
            let changed = if zoom_in { cam.zoom_in() } else { cam.zoom_out() };
            if changed {
                clog(&format!("zoom extent {}", cam.zoom));
                zoom.set(cam.zoom);
            }
        })
    };
    let dismiss = {
        let toasts = toasts.clone();
        Callback::from(move |id: u32| toasts.dispatch(ToastAction::Dismiss(id)))
    };
    let legend = vec![
        LegendEntry { color: "#ff0000", label: "Tracked", border: None },
        LegendEntry { color: "#00ff00", label: "Selected", border: None },
    ];

    html! {<div style="position:relative;">
        <canvas ref={canvas_ref} id="tracker-canvas" style="display:block; cursor:grab;"></canvas>
        <CameraControls zoom={*zoom} on_zoom_in={zoom_cb(true)} on_zoom_out={zoom_cb(false)} />
        <LegendPanel title="Markers" entries={legend} placement="position:absolute; right:12px; bottom:12px;" />
        <ToastStack toasts={toasts.items.clone()} duration_ms={props.config.highlight_ms} on_dismiss={dismiss} />
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tracker::{HIGHLIGHT_COLOR, MARKER_COLOR};
    use nalgebra::Vector2;

    const RECT: SurfaceRect = SurfaceRect { left: 0.0, top: 40.0, width: 1000.0, height: 500.0 };

    fn scene(config: &TrackerConfig) -> (Camera, TrackerSim) {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut sim = TrackerSim::new(config, &mut rng);
        for (i, m) in sim.markers.iter_mut().enumerate() {
            m.position = Vector2::new(-14.0 + i as f64 * 0.7, 7.0);
        }
        sim.markers[3].position = Vector2::new(0.0, 0.0);
        (Camera::from_config(config), sim)
    }

    fn centre() -> (f64, f64) {
        (RECT.left + RECT.width * 0.5, RECT.top + RECT.height * 0.5)
    }

    #[test]
    fn click_highlights_once_toasts_once_and_arms_revert() {
        let config = TrackerConfig::default();
        let (camera, mut sim) = scene(&config);
        let mut reverts = PendingReverts::new(config.marker_count);
        let mut toasts = Rc::new(ToastList::default());
        let mut armed = Vec::new();

        let ticket = handle_click(
            &camera,
            &mut sim,
            &mut reverts,
            &config,
            RECT,
            centre(),
            |action| toasts = toasts.clone().reduce(action),
            |ticket, millis| {
                armed.push((ticket, millis));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(ticket.index, 3);
        assert_eq!(sim.markers[3].color(), HIGHLIGHT_COLOR);
        assert_eq!(toasts.items.len(), 1);
        assert_eq!(toasts.items[0].text, PICK_TOAST);
        assert_eq!(armed, vec![(ticket, 2000)]);
        assert_eq!(reverts.pending(), 1);

        // the timer elapsing runs the armed revert
        let (armed_ticket, millis) = armed[0];
        assert_eq!(millis, config.highlight_ms);
        assert!(sim.revert(armed_ticket));
        assert_eq!(sim.markers[3].color(), MARKER_COLOR);
    }

    #[test]
    fn miss_neither_toasts_nor_arms() {
        let config = TrackerConfig::default();
        let (camera, mut sim) = scene(&config);
        let mut reverts: PendingReverts<()> = PendingReverts::new(config.marker_count);
        let mut notified = 0;
        let hit = handle_click(
            &camera,
            &mut sim,
            &mut reverts,
            &config,
            RECT,
            (RECT.left + 10.0, RECT.top + 250.0),
            |_| notified += 1,
            |_, _| Ok(()),
        );
        assert!(hit.is_none());
        assert_eq!(notified, 0);
        assert_eq!(reverts.pending(), 0);
    }

    #[test]
    fn reclick_replaces_pending_revert_and_old_one_is_stale() {
        let config = TrackerConfig::default();
        let (camera, mut sim) = scene(&config);
        let mut reverts = PendingReverts::new(config.marker_count);
        let mut tickets = Vec::new();
        for _ in 0..2 {
            let t = handle_click(
                &camera,
                &mut sim,
                &mut reverts,
                &config,
                RECT,
                centre(),
                |_| {},
                |_, _| Ok(()),
            );
            tickets.extend(t);
        }
        assert_eq!(tickets.len(), 2);
        assert_eq!(reverts.pending(), 1);
        assert!(!sim.revert(tickets[0]));
        assert!(sim.markers[3].is_highlighted());
        assert!(sim.revert(tickets[1]));
    }

    #[test]
    fn unschedulable_revert_is_applied_immediately() {
        let config = TrackerConfig::default();
        let (camera, mut sim) = scene(&config);
        let mut reverts: PendingReverts<()> = PendingReverts::new(config.marker_count);
        let ticket = handle_click(
            &camera,
            &mut sim,
            &mut reverts,
            &config,
            RECT,
            centre(),
            |_| {},
            |_, _| Err(SurfaceError::NoWindow),
        );
        assert!(ticket.is_some());
        assert!(!sim.markers[3].is_highlighted());
        assert_eq!(reverts.pending(), 0);
    }
}
