mod app;
mod message;
mod state;
mod screens;
mod widgets;

use std::cell::Cell;
use std::time::Duration;

use crate::config::AppConfig;

pub use app::RupeeLensApp;
pub use message::Message;
pub use state::AppState;

const WINDOW_SIZE: (f32, f32) = (900.0, 750.0);

/// Open the desktop window and run until it is closed
pub fn run(state: AppState, config: &AppConfig) -> anyhow::Result<()> {
    let booted = Cell::new(Some(state));
    let preview_size = (config.capture.display_width, config.capture.display_height);
    let tick = Duration::from_millis(config.capture.tick_ms);

    iced::application(
        move || {
            // iced calls boot exactly once, from `run`, before the event loop
            let state = booted.take().expect("application booted twice");
            RupeeLensApp::new(state, preview_size, tick)
        },
        RupeeLensApp::update,
        RupeeLensApp::view,
    )
    .title(RupeeLensApp::title)
    .subscription(RupeeLensApp::subscription)
    .theme(RupeeLensApp::theme)
    .window_size(WINDOW_SIZE)
    .resizable(false)
    .run()
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
