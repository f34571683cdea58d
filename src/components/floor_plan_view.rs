use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::legend_panel::{LegendEntry, LegendPanel};
use crate::error::SurfaceError;
use crate::model::{self, MOCK_ROOMS, STAGE_HEIGHT, STAGE_WIDTH};
use crate::render::draw_floor_plan;
use crate::surface;
use crate::util::cwarn;

fn paint(canvas_ref: &NodeRef) -> Result<(), SurfaceError> {
    let canvas = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or(SurfaceError::CanvasDetached)?;
    let ctx = surface::context_2d(&canvas)?;
    draw_floor_plan(&ctx, &MOCK_ROOMS);
    Ok(())
}

#[function_component(FloorPlanView)]
pub fn floor_plan_view() -> Html {
    let canvas_ref = use_node_ref();
    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| {
            if let Err(e) = paint(&canvas_ref) {
                cwarn(&format!("floor plan not drawn: {}", e));
            }
            || ()
        });
    }
    let entries = [false, true]
        .into_iter()
        .map(|alert| {
            let p = model::room_palette(alert);
            LegendEntry {
                color: p.fill,
                label: if alert { "Alert" } else { "Normal" },
                border: Some(p.stroke),
            }
        })
        .collect::<Vec<_>>();
    html! {<div style="display:flex; gap:16px; align-items:flex-start; padding:16px;">
        <div style="border:1px solid #ccc; display:inline-block;">
            <canvas ref={canvas_ref} width={(STAGE_WIDTH as u32).to_string()} height={(STAGE_HEIGHT as u32).to_string()} style="display:block;"></canvas>
        </div>
        <LegendPanel title="Rooms" entries={entries} />
    </div>}
}
