use glide::config;
use glide::gui::app::AppModel;
use glide::gui::pie::State;
use glide::sys::runtime;
use knob::cursor::HyprCursorProvider;
use relm4::prelude::*;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup()?;
    let state = State::load(&config, Arc::new(HyprCursorProvider))?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx)?;

    let app = RelmApp::new("org.glide.daemon");

    app.run::<AppModel>((state, rx));
    Ok(())
}
