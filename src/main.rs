use clap::Parser;
use eframe::egui;

use landmark_marker::app::MarkerApp;
use landmark_marker::cli::CliArgs;
use landmark_marker::config::{clamp_threshold, Settings};

fn main() -> eframe::Result {
    let args = CliArgs::parse();

    let (mut settings, config_warning) = Settings::load_or_default(args.config.as_deref());
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_filter()),
    )
    .init();
    if let Some(warning) = config_warning {
        log::warn!("{}", warning);
    }
    if let Some(threshold) = args.threshold {
        settings.threshold = clamp_threshold(threshold);
    }

    let title = match &args.image {
        Some(path) => format!(
            "Landmark Marker — {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        None => "Landmark Marker".to_string(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            let app = MarkerApp::new(&settings)
                .with_startup_files(args.image.as_deref(), args.points.as_deref());
            Ok(Box::new(app))
        }),
    )
}
