use std::fmt;
use std::path::PathBuf;

use verbs_core::model::QuizSettings;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidQuestions { raw: String },
    InvalidSeed { raw: String },
    InvalidDictionary { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidQuestions { raw } => {
                write!(f, "invalid --questions value (expected a number > 0): {raw}")
            }
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDictionary { raw } => write!(f, "invalid --dictionary value: {raw:?}"),
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

fn parse_questions(raw: String) -> Result<QuizSettings, ArgsError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(|limit| QuizSettings::new(limit).ok())
        .ok_or(ArgsError::InvalidQuestions { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  verbs [--dictionary <path>] [--questions <n>] [--seed <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --dictionary  bundled verb list");
    eprintln!("  --questions   10");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VERBS_DICTIONARY, VERBS_QUESTIONS, VERBS_SEED, RUST_LOG");
}

/// Resolved configuration: flags override environment, environment overrides defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub dictionary: Option<PathBuf>,
    pub settings: QuizSettings,
    pub seed: Option<u64>,
    pub help: bool,
}

impl Args {
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut dictionary = env("VERBS_DICTIONARY")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut settings = env("VERBS_QUESTIONS")
            .map(parse_questions)
            .transpose()?
            .unwrap_or_default();
        let mut seed = env("VERBS_SEED").map(parse_seed).transpose()?;
        let mut help = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dictionary" => {
                    let value = require_value(&mut args, "--dictionary")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDictionary { raw: value });
                    }
                    dictionary = Some(PathBuf::from(value));
                }
                "--questions" => {
                    settings = parse_questions(require_value(&mut args, "--questions")?)?;
                }
                "--seed" => {
                    seed = Some(parse_seed(require_value(&mut args, "--seed")?)?);
                }
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            dictionary,
            settings,
            seed,
            help,
        })
    }
}
