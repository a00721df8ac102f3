pub mod app;
pub mod controls_panel;
pub mod count_bubble;
pub mod game_over_overlay;
pub mod header;
pub mod progress_bar;
pub mod stats_panel;
pub mod toast;

pub use app::{App, AppProps};
