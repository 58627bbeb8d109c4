pub mod app;
pub mod camera_controls;
pub mod controls_panel;
pub mod country_label;
pub mod map_canvas;
pub mod media_overlay;

pub use app::App;
