use super::{floor_plan_view::FloorPlanView, tracker_view::TrackerView};
use crate::config::TrackerConfig;
use yew::prelude::*;

#[derive(PartialEq, Clone, Copy)]
enum View {
    Tracker,
    FloorPlan,
}

impl View {
    fn label(self) -> &'static str {
        match self {
            View::Tracker => "Tracker",
            View::FloorPlan => "Floor plan",
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Tracker);
    // Read once; the tracker keeps its own copy for the life of the page.
    let config = use_state(TrackerConfig::load);

    let tab = |target: View| {
        let view = view.clone();
        let active = *view == target;
        let onclick = Callback::from(move |_| view.set(target));
        let style = if active {
            "padding:4px 12px; font-weight:600; border:1px solid #888; background:#fff;"
        } else {
            "padding:4px 12px; border:1px solid #ccc; background:#f5f5f5;"
        };
        html! { <button onclick={onclick} style={style}>{ target.label() }</button> }
    };

    let content = match *view {
        View::Tracker => html! { <TrackerView config={(*config).clone()} /> },
        View::FloorPlan => html! { <FloorPlanView /> },
    };

    html! {<div>
        <div id="top-bar" style="display:flex; align-items:center; gap:12px; padding:0 16px;">
            <h1 style="font-size:22px; margin:10px 0;">{"Real-Time Tracker Demo"}</h1>
            { tab(View::Tracker) }
            { tab(View::FloorPlan) }
        </div>
        { content }
    </div>}
}
