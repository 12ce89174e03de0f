//! Interactive yes/no configuration of unresolved patterns
//!
//! The configurator only turns answers into a `DecisionSet`; it never touches
//! the filesystem. Prompting goes through the `Prompter` trait so the binary
//! can read the terminal while tests feed scripted input.

use std::io::{self, BufRead, Write};

use crate::decisions::DecisionSet;
use crate::patterns::{PatternCandidate, PatternKind};

/// Asks yes/no questions.
pub trait Prompter {
    /// Ask `question`; `default` is the answer when none is given.
    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool>;

    /// Show a line of context between questions.
    fn note(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Answers every question with its default. Used when no input is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPrompter;

impl Prompter for DefaultPrompter {
    fn confirm(&mut self, _question: &str, default: bool) -> io::Result<bool> {
        Ok(default)
    }
}

/// Reads answers line by line from `input`, writing questions to `output`.
///
/// End of input, an empty line, or an unrecognised answer all yield the
/// default, so a closed stdin never blocks the run.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
    exhausted: bool,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            exhausted: false,
        }
    }

    /// Give back the output sink (used by tests to inspect the transcript).
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> io::Result<Option<String>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                self.exhausted = true;
                Ok(None)
            }
            Ok(_) => Ok(Some(line)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        write!(self.output, "{} {} ", question, hint)?;
        self.output.flush()?;

        let answer = self.read_answer()?;
        if answer.is_none() {
            // Keep the transcript on separate lines when input ran out
            writeln!(self.output)?;
        }
        Ok(answer.as_deref().and_then(parse_answer).unwrap_or(default))
    }

    fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }
}

/// Interpret a yes/no answer. `None` for anything else, including blank input.
pub fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Outcome of a configuration round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Known decisions plus every newly answered one
    pub decisions: DecisionSet,
    /// Number of patterns the user was asked about
    pub asked: usize,
    /// Whether the user wants the decisions saved
    pub persist: bool,
}

/// The question shown for `candidate`.
pub fn question_for(candidate: &PatternCandidate) -> String {
    match candidate.count_hint {
        Some(count) => format!(
            "Ignore '{}' ({}, ~{} items)?",
            candidate.key, candidate.reason, count
        ),
        None => format!("Ignore '{}' ({})?", candidate.key, candidate.reason),
    }
}

/// Ask about each unresolved candidate, then whether to save.
///
/// Candidates are asked directories first, in the order given. "Ignore"
/// defaults to no; saving defaults to yes. With nothing to ask, no questions
/// are shown and nothing is marked for saving.
pub fn configure(
    unresolved: &[PatternCandidate],
    known: DecisionSet,
    prompter: &mut dyn Prompter,
) -> io::Result<Configuration> {
    let mut decisions = known;
    if unresolved.is_empty() {
        return Ok(Configuration {
            decisions,
            asked: 0,
            persist: false,
        });
    }

    let mut ordered: Vec<&PatternCandidate> = unresolved.iter().collect();
    ordered.sort_by_key(|c| c.kind());

    let mut section = None;
    for candidate in &ordered {
        if section != Some(candidate.kind()) {
            section = Some(candidate.kind());
            prompter.note(match candidate.kind() {
                PatternKind::Directory => "Directories to potentially ignore:",
                PatternKind::File => "File patterns to potentially ignore:",
            })?;
        }
        let ignore = prompter.confirm(&question_for(candidate), false)?;
        decisions.insert(candidate.key.clone(), !ignore);
    }

    let persist = prompter.confirm("Save these preferences for future runs?", true)?;

    Ok(Configuration {
        decisions,
        asked: ordered.len(),
        persist,
    })
}
