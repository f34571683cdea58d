use super::legend::LegendRow;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: &'static str,
    pub border: Option<&'static str>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
    /// Inline positioning, e.g. `position:absolute; right:12px; bottom:12px;`.
    #[prop_or("")]
    pub placement: &'static str,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    html! {<div style={format!("{} background:rgba(255,255,255,0.92); border:1px solid #ccc; border-radius:8px; padding:8px; min-width:140px; font-size:13px; color:#333;", props.placement)}>
        <div style="font-weight:600; margin-bottom:4px;">{ props.title }</div>
        { for props.entries.iter().map(|e| html!{ <LegendRow color={e.color} label={e.label} border={e.border} /> }) }
    </div>}
}
