use std::process;

use clap::{ArgAction, Parser};

use facecam_core::config::LiveConfig;
use facecam_core::detection::infrastructure::haar_cascade_detector::HaarCascadeDetector;
use facecam_core::display::domain::key_command::key_bindings_help;
use facecam_core::display::infrastructure::cvt_color_converter::CvtColorConverter;
use facecam_core::display::infrastructure::highgui_window::HighGuiWindow;
use facecam_core::pipeline::live_detection_use_case::{LiveDetectionUseCase, LoopExit};
use facecam_core::pipeline::session_logger::SummarySessionLogger;
use facecam_core::video::infrastructure::opencv_camera::OpenCvCameraOpener;

/// Real-time face detection from a webcam.
#[derive(Parser)]
#[command(
    name = "facecam",
    disable_help_flag = true,
    after_help = after_help()
)]
struct Cli {
    /// Print this help message.
    #[arg(
        short = 'h',
        long = "help",
        visible_alias = "usage",
        short_alias = '?',
        action = ArgAction::Help
    )]
    help: Option<bool>,
}

fn after_help() -> String {
    format!(
        "After start, these keys control the preview window:\n{}\n\n\
         Environment:\n  FACECAM_CASCADE         cascade XML path\n  \
         FACECAM_CAMERA_INDICES  number of camera indices to probe",
        key_bindings_help()
    )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _cli = Cli::parse();
    let config = LiveConfig::from_env()?;

    let detector = HaarCascadeDetector::new(&config.cascade_path, config.detection)?;
    let window = HighGuiWindow::new(config.window_title.as_str());

    let mut use_case = LiveDetectionUseCase::new(
        Box::new(detector),
        Box::new(CvtColorConverter),
        Box::new(window),
        Box::new(SummarySessionLogger::default()),
    )
    .with_key_poll_ms(config.key_poll_ms);

    match use_case.execute(&mut OpenCvCameraOpener, config.camera_indices)? {
        LoopExit::UserQuit => log::info!("Stopped by user"),
        LoopExit::EndOfStream => log::info!("Camera stream ended"),
    }
    Ok(())
}
