//! Terminal display sink and line-based input.

use std::io::{self, BufRead, Write};

use services::{AnswerView, DisplaySink, FinishedView, MissingField, QuestionView, ReviewView};
use verbs_core::model::AttemptOutcome;

/// One line of user input, after command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    /// Zero-based attempt index.
    Review(usize),
    Quit,
}

impl Input {
    /// `:review <n>` takes a 1-based question number.
    pub fn parse(line: &str) -> Result<Self, String> {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Ok(Input::Text(line.trim_end_matches(['\r', '\n']).to_string()));
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("quit" | "q"), None, None) => Ok(Input::Quit),
            (Some("review" | "r"), Some(number), None) => match number.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Input::Review(n - 1)),
                _ => Err(format!("not a question number: {number}")),
            },
            _ => Err(format!("unknown command: {trimmed}")),
        }
    }
}

/// Read one line, `None` on end of input.
pub fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn marker(outcome: Option<AttemptOutcome>) -> char {
    match outcome {
        Some(AttemptOutcome::Correct) => '✓',
        Some(AttemptOutcome::HalfCorrect) => '½',
        Some(AttemptOutcome::Incorrect) => '✗',
        None => '·',
    }
}

fn progress_line(progress: &[Option<AttemptOutcome>]) -> String {
    progress.iter().copied().map(marker).collect()
}

fn field_mark(correct: bool) -> &'static str {
    if correct { "correct" } else { "wrong" }
}

/// Renders quiz transitions as plain text.
pub struct TerminalDisplay<W> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn prompt(&mut self, label: &str) {
        self.emit(format_args!("{label}"));
        if let Err(err) = self.out.flush() {
            tracing::warn!(%err, "failed to flush terminal");
        }
    }

    pub fn notice(&mut self, text: &str) {
        self.emit(format_args!("{text}\n"));
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args) {
            tracing::warn!(%err, "failed to write to terminal");
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn show_question(&mut self, view: &QuestionView) {
        let progress = progress_line(&view.progress);
        self.emit(format_args!(
            "\n[{progress}] score {}\nQuestion {}/{}: {}\n",
            view.score, view.question_number, view.question_limit, view.base
        ));
    }

    fn show_answer(&mut self, view: &AnswerView) {
        self.emit(format_args!(
            "  preterit   {:<8} {}\n  participle {:<8} {}\n[{}] Score: {}/{}\n",
            field_mark(view.preterit_correct),
            view.preterit_forms,
            field_mark(view.participle_correct),
            view.participle_forms,
            progress_line(&view.progress),
            view.score,
            view.max_score
        ));
    }

    fn show_finished(&mut self, view: &FinishedView) {
        let progress = progress_line(&view.progress);
        self.emit(format_args!(
            "\n[{progress}]\n{}\nPress Enter to play again, or :quit.\n",
            view.summary.message()
        ));
    }

    fn show_review(&mut self, view: &ReviewView) {
        self.emit(format_args!("#{}: {}\n", view.index + 1, view.message()));
    }

    fn submission_incomplete(&mut self, missing: MissingField) {
        let field = match missing {
            MissingField::Preterit => "the preterit",
            MissingField::Participle => "the participle",
            MissingField::Both => "both forms",
        };
        self.emit(format_args!("Please fill in {field}.\n"));
    }
}
