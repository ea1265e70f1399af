mod args;
mod terminal;

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use services::{
    Clock, MissingField, QuizController, QuizLoopService, SessionError, SessionEvent, SessionState,
};
use storage::{BundledRepository, JsonFileRepository, VerbRepository};
use tracing_subscriber::EnvFilter;

use crate::args::{Args, print_usage};
use crate::terminal::{Input, TerminalDisplay, read_line};

type Controller<W> = QuizController<TerminalDisplay<W>>;
type AppResult<T> = Result<T, Box<dyn Error>>;

enum Flow {
    Continue,
    Quit,
}

fn init_logging() {
    // stderr keeps log lines out of the quiz on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Handle a command typed at any prompt. Returns `None` for plain text.
fn handle_command<W: Write>(controller: &mut Controller<W>, line: &str) -> AppResult<Option<Flow>> {
    match Input::parse(line) {
        Ok(Input::Text(_)) => Ok(None),
        Ok(Input::Quit) => Ok(Some(Flow::Quit)),
        Ok(Input::Review(index)) => {
            match controller.dispatch(SessionEvent::Review(index)) {
                Ok(_) => {}
                Err(SessionError::History(err)) => {
                    controller.display_mut().notice(&err.to_string());
                }
                Err(err) => return Err(err.into()),
            }
            Ok(Some(Flow::Continue))
        }
        Err(message) => {
            controller.display_mut().notice(&message);
            Ok(Some(Flow::Continue))
        }
    }
}

/// Prompt and read one line; `Err(flow)` when it was a command or end of input.
fn read_entry<W: Write>(
    controller: &mut Controller<W>,
    input: &mut impl BufRead,
    label: &str,
) -> AppResult<Result<String, Flow>> {
    controller.display_mut().prompt(label);
    let Some(line) = read_line(input)? else {
        return Ok(Err(Flow::Quit));
    };
    if let Some(flow) = handle_command(controller, &line)? {
        return Ok(Err(flow));
    }
    Ok(Ok(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Answers typed so far for the current question.
#[derive(Debug, Default)]
struct Draft {
    preterit: Option<String>,
    participle: Option<String>,
}

fn answer_question<W: Write>(
    controller: &mut Controller<W>,
    input: &mut impl BufRead,
    draft: &mut Draft,
) -> AppResult<Flow> {
    if draft.preterit.is_none() {
        match read_entry(controller, input, "preterit:   ")? {
            Ok(text) => draft.preterit = Some(text),
            Err(flow) => return Ok(flow),
        }
    }
    if draft.participle.is_none() {
        match read_entry(controller, input, "participle: ")? {
            Ok(text) => draft.participle = Some(text),
            Err(flow) => return Ok(flow),
        }
    }

    let preterit = draft.preterit.take().unwrap_or_default();
    let participle = draft.participle.take().unwrap_or_default();
    let rejected =
        controller.dispatch(SessionEvent::submit(preterit.as_str(), participle.as_str()))?;

    // keep the filled field and ask only for the other
    match rejected {
        Some(MissingField::Preterit) => draft.participle = Some(participle),
        Some(MissingField::Participle) => draft.preterit = Some(preterit),
        Some(MissingField::Both) | None => {}
    }
    Ok(Flow::Continue)
}

fn wait_for_enter<W: Write>(
    controller: &mut Controller<W>,
    input: &mut impl BufRead,
    label: &str,
    on_enter: SessionEvent,
) -> AppResult<Flow> {
    match read_entry(controller, input, label)? {
        Ok(text) if text.trim().is_empty() => {
            controller.dispatch(on_enter)?;
            Ok(Flow::Continue)
        }
        Ok(_) => {
            controller
                .display_mut()
                .notice("Press Enter to continue, :review <n> or :quit.");
            Ok(Flow::Continue)
        }
        Err(flow) => Ok(flow),
    }
}

fn play<W: Write>(controller: &mut Controller<W>, input: &mut impl BufRead) -> AppResult<()> {
    controller.dispatch(SessionEvent::Start)?;

    let mut draft = Draft::default();
    loop {
        let flow = match controller.session().state() {
            SessionState::Answering => answer_question(controller, input, &mut draft)?,
            SessionState::AnswerShown => {
                wait_for_enter(controller, input, "[Enter] next > ", SessionEvent::Advance)?
            }
            SessionState::Finished | SessionState::AwaitingStart => {
                wait_for_enter(controller, input, "> ", SessionEvent::Start)?
            }
        };
        if let Flow::Quit = flow {
            return Ok(());
        }
    }
}

async fn run() -> AppResult<()> {
    let args = match Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()) {
        Ok(args) => args,
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };
    if args.help {
        print_usage();
        return Ok(());
    }

    init_logging();

    let verbs: Arc<dyn VerbRepository> = match &args.dictionary {
        Some(path) => Arc::new(JsonFileRepository::new(path)),
        None => Arc::new(BundledRepository),
    };
    let quiz = QuizLoopService::new(Clock::default(), verbs)
        .with_settings(args.settings)
        .with_seed(args.seed);

    let session = quiz.load_session().await?;

    let mut display = TerminalDisplay::new(io::stdout());
    display.notice(&format!(
        "Give the preterit and past participle of each verb ({} questions).",
        session.question_limit()
    ));
    display.notice("Commands: :review <n>, :quit");

    let mut controller = QuizController::new(session, display);
    let stdin = io::stdin();
    play(&mut controller, &mut stdin.lock())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
