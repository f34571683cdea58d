use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub zoom: f64,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:20px; left:20px; z-index:10; display:flex; gap:6px; align-items:center;">
        <button onclick={zi} style="padding:10px; font-size:16px;"> {"+"} </button>
        <button onclick={zo} style="padding:10px; font-size:16px;"> {"−"} </button>
        <span style="font-size:12px; color:#555;">{ format!("extent {:.0}", props.zoom) }</span>
    </div>}
}
