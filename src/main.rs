mod components;
mod config;
mod dispatch;
mod error;
mod geo;
mod map;
mod media;
mod model;
mod overlay;
mod state;
mod util;

fn main() {
    yew::Renderer::<components::App>::new().render();
}
