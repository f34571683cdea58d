//! Browser resources tied to a view's lifetime.
//!
//! Every handle here releases its browser-side registration on drop, so a
//! view that keeps them in its effect state is fully detached by its
//! cleanup, including when mount bails out half way.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, Window};

use crate::error::SurfaceError;

pub fn window() -> Result<Window, SurfaceError> {
    web_sys::window().ok_or(SurfaceError::NoWindow)
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
    canvas
        .get_context("2d")?
        .ok_or(SurfaceError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SurfaceError::NoContext)
}

/// Height of the `#top-bar` element, 0 when absent.
pub fn top_bar_height(window: &Window) -> f64 {
    window
        .document()
        .and_then(|doc| doc.get_element_by_id("top-bar"))
        .map(|el| el.client_height() as f64)
        .unwrap_or(0.0)
}

/// Sizes the canvas backing store to the window minus the top bar.
pub fn fit_canvas_to_window(window: &Window, canvas: &HtmlCanvasElement) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0)
        - top_bar_height(window);
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

/// Something event listeners can be added to and removed from.
pub trait ListenerHost: Clone {
    type Callback;

    fn add_listener(&self, event: &'static str, callback: &Self::Callback) -> Result<(), SurfaceError>;
    fn remove_listener(&self, event: &'static str, callback: &Self::Callback);
}

impl ListenerHost for EventTarget {
    type Callback = Closure<dyn FnMut(Event)>;

    fn add_listener(&self, event: &'static str, callback: &Self::Callback) -> Result<(), SurfaceError> {
        self.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(())
    }

    fn remove_listener(&self, event: &'static str, callback: &Self::Callback) {
        let _ = self.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }
}

/// A registered listener; removed from its host when dropped.
pub struct Listener<H: ListenerHost> {
    host: H,
    event: &'static str,
    callback: H::Callback,
}

impl<H: ListenerHost> Listener<H> {
    pub fn register(host: &H, event: &'static str, callback: H::Callback) -> Result<Self, SurfaceError> {
        host.add_listener(event, &callback)?;
        Ok(Self {
            host: host.clone(),
            event,
            callback,
        })
    }
}

impl<H: ListenerHost> Drop for Listener<H> {
    fn drop(&mut self) {
        self.host.remove_listener(self.event, &self.callback);
    }
}

pub type ListenerGuard = Listener<EventTarget>;

impl Listener<EventTarget> {
    /// Registers a typed handler; events that fail the cast are skipped.
    pub fn attach<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Result<Self, SurfaceError>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |e: Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        }) as Box<dyn FnMut(Event)>);
        Self::register(target, event, callback)
    }
}

type FrameCell = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A self-rescheduling `requestAnimationFrame` loop. The callback gets the
/// seconds elapsed since the previous frame (0 on the first frame).
pub struct AnimationLoop {
    window: Window,
    raf_id: Rc<Cell<Option<i32>>>,
    frame: FrameCell,
}

impl AnimationLoop {
    pub fn start<F>(window: &Window, mut on_frame: F) -> Result<Self, SurfaceError>
    where
        F: FnMut(f64) + 'static,
    {
        let raf_id = Rc::new(Cell::new(None));
        let frame: FrameCell = Rc::new(RefCell::new(None));
        {
            let raf_id = raf_id.clone();
            let frame_next = frame.clone();
            let window_loop = window.clone();
            let mut last_ts: Option<f64> = None;
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                let dt = last_ts.map(|prev| ((ts - prev) / 1000.0).max(0.0)).unwrap_or(0.0);
                last_ts = Some(ts);
                on_frame(dt);
                // schedule next frame
                if let Some(cb) = frame_next.borrow().as_ref() {
                    if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        raf_id.set(Some(id));
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }
        let id = match frame.borrow().as_ref() {
            Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(SurfaceError::Js("animation callback missing".into())),
        };
        raf_id.set(Some(id));
        Ok(Self {
            window: window.clone(),
            raf_id,
            frame,
        })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // the closure holds a clone of its own cell; break the cycle
        self.frame.borrow_mut().take();
    }
}

/// A pending `setTimeout`; cleared when dropped.
pub struct Timeout {
    window: Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule<F>(window: &Window, millis: u32, f: F) -> Result<Self, SurfaceError>
    where
        F: FnOnce() + 'static,
    {
        let callback: Closure<dyn FnMut()> = Closure::once(f);
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis.min(i32::MAX as u32) as i32,
        )?;
        Ok(Self {
            window: window.clone(),
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

/// One pending revert per marker. Storing a new one drops, and so cancels,
/// the one it replaces.
pub struct PendingReverts<T> {
    slots: Vec<Option<T>>,
}

impl<T> PendingReverts<T> {
    pub fn new(markers: usize) -> Self {
        Self {
            slots: (0..markers).map(|_| None).collect(),
        }
    }

    /// Returns false when `index` has no slot; `pending` is dropped then.
    pub fn replace(&mut self, index: usize, pending: T) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(pending);
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Cancels every pending revert.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Handler = Rc<dyn Fn()>;

    #[derive(Clone, Default)]
    struct FakeTarget {
        registered: Rc<RefCell<Vec<(&'static str, Handler)>>>,
        refuse: Option<&'static str>,
    }

    impl FakeTarget {
        fn dispatch(&self, event: &str) {
            let handlers: Vec<Handler> = self
                .registered
                .borrow()
                .iter()
                .filter(|(e, _)| *e == event)
                .map(|(_, h)| h.clone())
                .collect();
            for h in handlers {
                h();
            }
        }

        fn count(&self) -> usize {
            self.registered.borrow().len()
        }
    }

    impl ListenerHost for FakeTarget {
        type Callback = Handler;

        fn add_listener(&self, event: &'static str, callback: &Handler) -> Result<(), SurfaceError> {
            if self.refuse == Some(event) {
                return Err(SurfaceError::Js(format!("cannot listen for {}", event)));
            }
            self.registered.borrow_mut().push((event, callback.clone()));
            Ok(())
        }

        fn remove_listener(&self, event: &'static str, callback: &Handler) {
            self.registered
                .borrow_mut()
                .retain(|(e, h)| !(*e == event && Rc::ptr_eq(h, callback)));
        }
    }

    const TRACKER_EVENTS: [&str; 5] = ["resize", "mousedown", "mousemove", "mouseup", "click"];

    fn wire(target: &FakeTarget, hits: &Rc<Cell<u32>>) -> Result<Vec<Listener<FakeTarget>>, SurfaceError> {
        let mut listeners = Vec::new();
        for event in TRACKER_EVENTS {
            let hits = hits.clone();
            let handler: Handler = Rc::new(move || hits.set(hits.get() + 1));
            listeners.push(Listener::register(target, event, handler)?);
        }
        Ok(listeners)
    }

    #[test]
    fn no_handler_fires_after_listeners_drop() {
        let target = FakeTarget::default();
        let hits = Rc::new(Cell::new(0));
        let listeners = wire(&target, &hits).unwrap();
        assert_eq!(target.count(), 5);
        target.dispatch("click");
        target.dispatch("mousemove");
        assert_eq!(hits.get(), 2);

        drop(listeners);
        assert_eq!(target.count(), 0);
        for event in TRACKER_EVENTS {
            target.dispatch(event);
        }
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn failed_wiring_releases_earlier_listeners() {
        let target = FakeTarget {
            refuse: Some("mouseup"),
            ..FakeTarget::default()
        };
        let hits = Rc::new(Cell::new(0));
        assert!(matches!(wire(&target, &hits), Err(SurfaceError::Js(_))));
        assert_eq!(target.count(), 0);
        target.dispatch("mousedown");
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn removal_only_touches_its_own_registration() {
        let target = FakeTarget::default();
        let hits = Rc::new(Cell::new(0));
        let first = wire(&target, &hits).unwrap();
        let second = wire(&target, &hits).unwrap();
        drop(first);
        target.dispatch("click");
        assert_eq!(hits.get(), 1);
        drop(second);
    }

    struct Cancels(Rc<Cell<u32>>);

    impl Drop for Cancels {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn replacing_a_revert_cancels_the_old_one() {
        let cancelled = Rc::new(Cell::new(0));
        let mut reverts = PendingReverts::new(3);
        assert!(reverts.replace(1, Cancels(cancelled.clone())));
        assert!(reverts.replace(1, Cancels(cancelled.clone())));
        assert_eq!(cancelled.get(), 1);
        assert!(reverts.replace(2, Cancels(cancelled.clone())));
        assert_eq!(reverts.pending(), 2);

        assert!(!reverts.replace(3, Cancels(cancelled.clone())));
        assert_eq!(cancelled.get(), 2);

        reverts.clear();
        assert_eq!(reverts.pending(), 0);
        assert_eq!(cancelled.get(), 4);
    }
}
