mod app;
mod audio;
mod config;
mod game_ui;
mod menu_ui;
mod name_entry;
mod skins;
mod theme;

use common::log;
use common::logger::init_logger;
use eframe::egui;

use app::ArcadeApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger(None);

    let config = match config::get_config_manager().get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Config unusable ({}), falling back to defaults", e);
            config::Config::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_fullscreen(config.fullscreen)
            .with_title("Snake Arcade"),
        ..Default::default()
    };

    eframe::run_native(
        "Snake Arcade",
        options,
        Box::new(move |_cc| Ok(Box::new(ArcadeApp::new(config)))),
    )?;

    Ok(())
}
