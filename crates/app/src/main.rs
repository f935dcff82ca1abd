use std::fmt;
use std::sync::{Arc, Mutex};

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ChannelSink, Clock, GeminiConfig, GeminiContentService, GeminiNarrator, NarrationTimings,
    Narrator, ProgressService, SilentNarrator, SpeechReceiver, StudyService,
};
use storage::Storage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    UnknownArg(String),
    InvalidFlag { name: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidFlag { name, raw } => write!(f, "invalid {name} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    accessibility: bool,
    narration: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--accessibility] [--no-narration]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_AI_API_KEY (or GEMINI_API_KEY)  enables generation and speech");
    eprintln!("  STUDY_AI_BASE_URL, STUDY_AI_MODEL, STUDY_TTS_MODEL, STUDY_TTS_VOICE");
    eprintln!("  STUDY_ACCESSIBILITY=1                 start with narration on");
    eprintln!("  STUDY_NARRATION_QUESTION_FALLBACK_MS, STUDY_NARRATION_CONTENT_FALLBACK_MS");
    eprintln!("  RUST_LOG                              log filter, e.g. services=debug");
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut accessibility = match std::env::var("STUDY_ACCESSIBILITY") {
            Ok(raw) => parse_flag("STUDY_ACCESSIBILITY", &raw)?,
            Err(_) => false,
        };
        let mut narration = true;

        for arg in args {
            match arg.as_str() {
                "--accessibility" => accessibility = true,
                "--no-narration" => narration = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            accessibility,
            narration,
        })
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ArgsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ArgsError::InvalidFlag {
            name,
            raw: raw.to_string(),
        }),
    }
}

struct DesktopApp {
    study: Arc<StudyService>,
    progress: Arc<ProgressService>,
    narrator: Arc<dyn Narrator>,
    narration_timings: NarrationTimings,
    accessibility_on_launch: bool,
    speech_clips: Mutex<Option<SpeechReceiver>>,
}

impl UiApp for DesktopApp {
    fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn narrator(&self) -> Arc<dyn Narrator> {
        Arc::clone(&self.narrator)
    }

    fn narration_timings(&self) -> NarrationTimings {
        self.narration_timings
    }

    fn accessibility_on_launch(&self) -> bool {
        self.accessibility_on_launch
    }

    fn take_speech_clips(&self) -> Option<SpeechReceiver> {
        self.speech_clips
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let gemini = GeminiConfig::from_env();
    if gemini.is_none() {
        warn!("no API key set; study generation and speech are disabled");
    }

    let narration_timings = NarrationTimings::from_env();
    let storage = Storage::in_memory();
    let clock = Clock::system();
    let study = Arc::new(
        StudyService::new(
            clock,
            Arc::new(GeminiContentService::new(gemini.clone())),
            Arc::clone(&storage.content),
        )
        .with_timings(narration_timings),
    );
    let progress = Arc::new(ProgressService::new(clock, Arc::clone(&storage.progress)));

    let (narrator, speech_clips): (Arc<dyn Narrator>, _) = if args.narration {
        let (sink, clips) = ChannelSink::new();
        (Arc::new(GeminiNarrator::new(gemini, Arc::new(sink))), Some(clips))
    } else {
        (Arc::new(SilentNarrator), None)
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        study,
        progress,
        narrator,
        narration_timings,
        accessibility_on_launch: args.accessibility,
        speech_clips: Mutex::new(speech_clips),
    });
    let context = build_app_context(&app);

    info!(
        accessibility = args.accessibility,
        narration = args.narration,
        "launching study app"
    );

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
