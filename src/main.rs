use aceros_fis::app::AcerosApp;
use aceros_fis::config::Config;
use aceros_fis::data::loader::load_or_sample;
use clap::Parser;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::parse();
    let dataset = load_or_sample(&config.data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Aceros FIS – Selector de Aceros al Carbono",
        options,
        Box::new(|_cc| Ok(Box::new(AcerosApp::new(dataset)))),
    )
}
