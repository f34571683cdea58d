mod components;
mod config;
mod error;
mod model;
mod render;
mod state;
mod surface;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
