use std::rc::Rc;
use yew::prelude::*;

use crate::surface::{self, Timeout};

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: u32,
    pub text: String,
}

/// Live notifications, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastList {
    pub items: Vec<ToastMessage>,
    next_id: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToastAction {
    Push(String),
    Dismiss(u32),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(text) => {
                next.items.push(ToastMessage { id: next.next_id, text });
                next.next_id = next.next_id.wrapping_add(1);
            }
            ToastAction::Dismiss(id) => next.items.retain(|t| t.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq, Clone)]
struct ToastItemProps {
    message: ToastMessage,
    duration_ms: u32,
    on_close: Callback<u32>,
}

/// Auto-close budget left after running from `started_at` until `now`.
fn remaining_after(remaining_ms: f64, started_at: f64, now: f64) -> f64 {
    (remaining_ms - (now - started_at).max(0.0)).max(0.0)
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let hovered = use_state(|| false);
    // (ms left, timestamp the countdown last resumed)
    let budget = use_mut_ref(|| (props.duration_ms as f64, 0.0));
    {
        let id = props.message.id;
        let on_close = props.on_close.clone();
        let budget = budget.clone();
        use_effect_with((id, *hovered), move |&(_, paused)| {
            let now = js_sys::Date::now();
            let mut b = budget.borrow_mut();
            let timeout = if paused {
                b.0 = remaining_after(b.0, b.1, now);
                None
            } else {
                b.1 = now;
                let millis = b.0.ceil() as u32;
                surface::window()
                    .and_then(|win| Timeout::schedule(&win, millis, move || on_close.emit(id)))
                    .ok()
            };
            move || drop(timeout)
        });
    }
    let close = {
        let cb = props.on_close.clone();
        let id = props.message.id;
        Callback::from(move |_| cb.emit(id))
    };
    let enter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };
    let play_state = if *hovered { "paused" } else { "running" };
    html! {<div onclick={close} onmouseenter={enter} onmouseleave={leave} style="position:relative; overflow:hidden; min-width:260px; background:#ffffff; color:#333; border-left:4px solid #07bc0c; border-radius:6px; box-shadow:0 2px 8px rgba(0,0,0,0.2); padding:12px 16px; cursor:pointer; font-size:14px;">
        { props.message.text.clone() }
        <div style={format!("position:absolute; left:0; bottom:0; height:4px; background:#07bc0c; animation:toast-progress {}ms linear forwards; animation-play-state:{};", props.duration_ms, play_state)}></div>
    </div>}
}

#[derive(Properties, PartialEq, Clone)]
pub struct ToastStackProps {
    pub toasts: Vec<ToastMessage>,
    #[prop_or(2000)]
    pub duration_ms: u32,
    pub on_dismiss: Callback<u32>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {<div style="position:fixed; top:12px; left:50%; transform:translateX(-50%); display:flex; flex-direction:column; gap:8px; z-index:20;">
        <style>{"@keyframes toast-progress { from { width:100%; } to { width:0%; } }"}</style>
        { for props.toasts.iter().map(|t| html! {
            <ToastItem key={t.id} message={t.clone()} duration_ms={props.duration_ms} on_close={props.on_dismiss.clone()} />
        }) }
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(list: Rc<ToastList>, action: ToastAction) -> Rc<ToastList> {
        list.reduce(action)
    }

    #[test]
    fn push_assigns_increasing_ids() {
        let l = Rc::new(ToastList::default());
        let l = apply(l, ToastAction::Push("a".into()));
        let l = apply(l, ToastAction::Push("b".into()));
        let ids: Vec<_> = l.items.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let l = Rc::new(ToastList::default());
        let l = apply(l, ToastAction::Push("a".into()));
        let l = apply(l, ToastAction::Push("b".into()));
        let l = apply(l, ToastAction::Dismiss(0));
        assert_eq!(l.items.len(), 1);
        assert_eq!(l.items[0].text, "b");
        let l = apply(l, ToastAction::Dismiss(42));
        assert_eq!(l.items.len(), 1);
    }

    #[test]
    fn hover_pause_keeps_the_unspent_budget() {
        // shown at t=1000, hovered at t=1600
        assert_eq!(remaining_after(2000.0, 1000.0, 1600.0), 1400.0);
        // resumed at t=5000, hovered again at t=5400
        assert_eq!(remaining_after(1400.0, 5000.0, 5400.0), 1000.0);
    }

    #[test]
    fn budget_never_goes_negative_or_grows() {
        assert_eq!(remaining_after(300.0, 0.0, 900.0), 0.0);
        assert_eq!(remaining_after(300.0, 900.0, 100.0), 300.0);
    }

    #[test]
    fn ids_are_not_reused_after_dismiss() {
        let l = Rc::new(ToastList::default());
        let l = apply(l, ToastAction::Push("a".into()));
        let l = apply(l, ToastAction::Dismiss(0));
        let l = apply(l, ToastAction::Push("b".into()));
        assert_eq!(l.items[0].id, 1);
    }
}
