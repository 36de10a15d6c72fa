use std::fmt;
use std::path::PathBuf;

use storage::repository::QuestionRepository;
use storage::{Storage, render_question_bank};

#[derive(Debug, Clone, Default)]
struct Args {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPath { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPath { flag, raw } => write!(f, "invalid {flag} value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidPath { flag, raw: value });
    }
    Ok(PathBuf::from(value))
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut parsed = Self {
            input: std::env::var("WIC_QUESTIONS").ok().map(PathBuf::from),
            output: None,
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--in" => parsed.input = Some(require_path(&mut args, "--in")?),
                "--out" => parsed.output = Some(require_path(&mut args, "--out")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin bank-export -- [options]");
    eprintln!();
    eprintln!("Validates a question bank (JSON or CSV) and writes it as JSON with every id filled in.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --in <path>     Question bank to read; *.csv is read as CSV, anything else as JSON");
    eprintln!("                  (default: built-in samples)");
    eprintln!("  --out <path>    Where to write the bank (default: stdout)");
    eprintln!("  -h, --help      Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WIC_QUESTIONS (same as --in)");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = match &args.input {
        Some(path) => Storage::from_path(path),
        None => Storage::samples()?,
    };
    let questions = storage.questions.list_questions().await?;
    let rendered = render_question_bank(&questions)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered).await?;
            eprintln!("Wrote {} questions to {}", questions.len(), path.display());
        }
        None => {
            println!("{rendered}");
            eprintln!("Total questions: {}", questions.len());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
