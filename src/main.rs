use tracing::{Level, error, warn};

mod components;
mod config;
mod engine;
mod error;
mod logging;
mod model;
mod session;
mod state;
mod timers;
mod util;

use components::{App, AppProps};
use config::GameConfig;
use error::BootError;

const MOUNT_ID: &str = "app";
const FALLBACK_TEXT: &str = "An error occurred while starting the app.";

fn mount(config: GameConfig) -> Result<(), BootError> {
    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    let document = window.document().ok_or(BootError::NoDocument)?;
    let root = document
        .get_element_by_id(MOUNT_ID)
        .ok_or_else(|| BootError::MissingMount { id: MOUNT_ID.to_string() })?;
    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
    Ok(())
}

fn show_fallback() {
    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        body.set_text_content(Some(FALLBACK_TEXT));
    }
}

fn main() {
    console_error_panic_hook::set_once();

    // config decides the log level, so its error is reported once logging is up
    let document = web_sys::window().and_then(|w| w.document());
    let (config, config_err) = match document.as_ref().map(GameConfig::load) {
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (GameConfig::default(), Some(err)),
        None => (GameConfig::default(), None),
    };
    logging::init(config.max_level().unwrap_or(Level::INFO));
    if let Some(err) = config_err {
        warn!(%err, "ignoring page config, using defaults");
    }

    if let Err(err) = mount(config) {
        error!(%err, "render failed");
        show_fallback();
    }
}
