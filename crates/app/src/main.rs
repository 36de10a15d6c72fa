use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, QuizLoopService};
use storage::repository::Storage;
use ui::{App, UiApp, build_app_context};
use wic_core::model::{AdvancePolicy, SessionConfig};

mod logging;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAdvance { raw: String },
    InvalidSeed { raw: String },
    EmptyPath { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAdvance { raw } => {
                write!(f, "invalid --advance value: {raw} (expected loop, stop or reshuffle)")
            }
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::EmptyPath { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
    bank_label: String,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn bank_label(&self) -> String {
        self.bank_label.clone()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    questions: Option<PathBuf>,
    advance: AdvancePolicy,
    seed: Option<u64>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--questions <bank.json|bank.csv>] [--advance <policy>] [--seed <u64>]");
    eprintln!("  cargo run -p app -- check [--questions <bank.json|bank.csv>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions  built-in sample questions");
    eprintln!("  --advance    loop (also: stop, reshuffle)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WIC_QUESTIONS, WIC_ADVANCE, WIC_SHUFFLE_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

fn parse_advance(raw: String) -> Result<AdvancePolicy, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidAdvance { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed { raw })
}

fn parse_path(raw: String, flag: &'static str) -> Result<PathBuf, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::EmptyPath { flag });
    }
    Ok(PathBuf::from(raw))
}

impl Args {
    /// Environment first, then flags; a flag overrides its variable.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut questions = env("WIC_QUESTIONS")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut advance = env("WIC_ADVANCE")
            .map(parse_advance)
            .transpose()?
            .unwrap_or_default();
        let mut seed = env("WIC_SHUFFLE_SEED").map(parse_seed).transpose()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    questions = Some(parse_path(value, "--questions")?);
                }
                "--advance" => {
                    advance = parse_advance(require_value(args, "--advance")?)?;
                }
                "--seed" => {
                    seed = Some(parse_seed(require_value(args, "--seed")?)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            questions,
            advance,
            seed,
        })
    }

    fn session_config(&self) -> SessionConfig {
        let config = SessionConfig::default().with_advance(self.advance);
        match self.seed {
            Some(seed) => config.with_shuffle_seed(seed),
            None => config,
        }
    }

    fn bank_label(&self) -> String {
        self.questions
            .as_ref()
            .map_or_else(|| "built-in samples".to_string(), |path| path.display().to_string())
    }

    fn storage(&self) -> Result<Storage, storage::StorageError> {
        match &self.questions {
            Some(path) => Ok(Storage::from_path(path.clone())),
            None => Storage::samples(),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    logging::init_tracing();

    let storage = parsed.storage()?;
    let quiz_loop = Arc::new(
        QuizLoopService::new(Clock::default_clock(), storage.questions)
            .with_config(parsed.session_config()),
    );

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                quiz_loop,
                bank_label: parsed.bank_label(),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("SAT Words in Context Quiz")
                    .with_always_on_top(false),
            );

            tracing::info!(bank = %parsed.bank_label(), advance = %parsed.advance, "launching quiz window");
            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Check => {
            // Starting a session runs every validation the UI would hit.
            let session = quiz_loop.start_session().await?;
            eprintln!(
                "ok: {} questions in {}",
                session.len(),
                parsed.bank_label()
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
