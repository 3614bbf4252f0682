use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rupee_lens::capture;
use rupee_lens::speech::{CommandSpeech, MutedSpeech, SpeechEngine};
use rupee_lens::{AppConfig, Detector, SpeechNotifier};

#[derive(Parser)]
#[command(name = "rupee-lens")]
#[command(about = "Detect Indian currency notes in images or webcam frames and read them aloud")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Folder holding the model weights (overrides the config)
    #[arg(long, value_name = "DIR", global = true)]
    model_dir: Option<PathBuf>,

    /// JSON file with user accounts (overrides the config)
    #[arg(long, value_name = "FILE", global = true)]
    users_file: Option<PathBuf>,

    /// Camera index for webcam mode (overrides the config)
    #[arg(long, global = true)]
    camera: Option<u32>,

    /// Do not speak detections
    #[arg(long, global = true)]
    mute: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Open the desktop application (default)
    Gui,
    /// Detect currency in one image and print the results
    Detect {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Save the annotated image here
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn load_config(args: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = &args.model_dir {
        config.model.folder = dir.clone();
    }
    if let Some(users_file) = &args.users_file {
        config.users_file = users_file.clone();
    }
    if let Some(camera) = args.camera {
        config.capture.camera_index = camera;
    }
    if args.mute {
        config.speech.muted = true;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = load_config(&args)?;

    let engine: Box<dyn SpeechEngine> = if config.speech.muted {
        Box::new(MutedSpeech)
    } else {
        Box::new(CommandSpeech::new(config.speech.rate))
    };
    let (speech, speech_worker) = SpeechNotifier::spawn(engine, config.speech.queue_capacity)?;

    // A missing model is fatal before any window opens
    let detector = Detector::from_config(&config, speech.clone())?;

    match args.command {
        Some(Command::Detect { image_path, output }) => {
            let frame = capture::load_image(&image_path)?;
            log::debug!("Image loaded: {}x{}", frame.width(), frame.height());

            let (annotated, summary) = detector.detect(frame)?;

            println!("\n=== Currency Detection Results ===");
            if summary.is_empty() {
                println!("No currency detected.");
            } else {
                print!("{}", summary);
            }

            if let Some(output) = output {
                annotated
                    .save(&output)
                    .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;
                println!("Annotated image saved to {:?}", output);
            }

            // Let queued announcements finish before exiting
            drop(detector);
            drop(speech);
            speech_worker.join();
            Ok(())
        }
        Some(Command::Gui) | None => run_gui(config, detector, speech),
    }
}

#[cfg(feature = "gui")]
fn run_gui(config: AppConfig, detector: Detector, speech: SpeechNotifier) -> anyhow::Result<()> {
    use rupee_lens::capture::WebcamSession;
    use rupee_lens::core::{CredentialStore, Session};
    use rupee_lens::gui::{self, AppState};

    let store = CredentialStore::open(&config.users_file)?;
    let webcam = WebcamSession::new(camera_opener(&config));
    let display_size = (config.capture.display_width, config.capture.display_height);
    let session = Session::new(detector, webcam, display_size);

    gui::run(AppState::new(session, store, speech), &config)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: AppConfig, _detector: Detector, _speech: SpeechNotifier) -> anyhow::Result<()> {
    anyhow::bail!("Built without the gui feature; use the detect command")
}

#[cfg(all(feature = "gui", feature = "webcam"))]
fn camera_opener(config: &AppConfig) -> Box<dyn capture::CaptureOpener> {
    Box::new(capture::NokhwaOpener {
        index: config.capture.camera_index,
    })
}

#[cfg(all(feature = "gui", not(feature = "webcam")))]
fn camera_opener(_config: &AppConfig) -> Box<dyn capture::CaptureOpener> {
    Box::new(capture::NoCamera)
}
