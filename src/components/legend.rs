use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub color: &'static str,
    pub label: &'static str,
    #[prop_or_default]
    pub border: Option<&'static str>,
}

#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    let border = props.border.unwrap_or("#999999");
    html! { <div style="display:flex; align-items:center; gap:8px; margin:3px 0;"> <span style={format!("display:inline-block; width:12px; height:12px; background:{}; border:1px solid {}; border-radius:2px;", props.color, border)}></span> <span>{ props.label }</span> </div> }
}
