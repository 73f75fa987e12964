//! Duplicate-title resolution
//!
//! When an existing chunk carries the title of the tiddler being inserted,
//! the rebuild asks a [`ConflictResolver`] whether to keep or drop it. In
//! replace mode every duplicate is dropped without asking; otherwise the
//! decision comes from a [`DuplicatePrompt`] provider.

use crate::chunk::TiddlerChunk;
use crate::error::{Result, TiddlerError};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Outcome for one duplicate chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Write the existing chunk to the output
    Keep,
    /// Omit the existing chunk from the output
    Drop,
}

/// Source of keep/drop decisions for duplicate titles
pub trait DuplicatePrompt {
    /// Decide what to do with an existing tiddler titled `title`
    fn decide(&mut self, title: &str) -> Result<Resolution>;
}

/// Interpret a free-form answer; only `y`/`yes` drop the existing chunk
pub fn parse_answer(answer: &str) -> Resolution {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Resolution::Drop
    } else {
        Resolution::Keep
    }
}

/// Interactive prompt over a line reader and a writer (stdin/stdout in the CLI)
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    /// Create a prompt reading answers from `input` and asking on `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsolePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the process terminal
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> DuplicatePrompt for ConsolePrompt<R, W> {
    fn decide(&mut self, title: &str) -> Result<Resolution> {
        write!(
            self.output,
            "Another tiddler with the name \"{title}\" was found.  Delete it? (y/n) "
        )
        .map_err(TiddlerError::Prompt)?;
        self.output.flush().map_err(TiddlerError::Prompt)?;

        let mut answer = String::new();
        let n = self
            .input
            .read_line(&mut answer)
            .map_err(TiddlerError::Prompt)?;
        if n == 0 {
            log::debug!("prompt input closed, keeping \"{title}\"");
            return Ok(Resolution::Keep);
        }
        Ok(parse_answer(&answer))
    }
}

/// Replays a fixed list of answers; anything past the end keeps
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Resolution>,
}

impl ScriptedPrompt {
    /// Create a prompt answering with `answers` in order
    pub fn new(answers: impl IntoIterator<Item = Resolution>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }
}

impl DuplicatePrompt for ScriptedPrompt {
    fn decide(&mut self, title: &str) -> Result<Resolution> {
        log::debug!("scripted answer for \"{title}\"");
        Ok(self.answers.pop_front().unwrap_or(Resolution::Keep))
    }
}

/// Non-interactive provider that always keeps existing tiddlers
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepExisting;

impl DuplicatePrompt for KeepExisting {
    fn decide(&mut self, _title: &str) -> Result<Resolution> {
        Ok(Resolution::Keep)
    }
}

/// Decides the fate of existing chunks whose title collides with the new one
pub struct ConflictResolver {
    replace: bool,
    prompt: Box<dyn DuplicatePrompt>,
    dropped: usize,
    kept: usize,
}

impl ConflictResolver {
    /// Create a resolver; with `replace` set the prompt is never consulted
    pub fn new(replace: bool, prompt: Box<dyn DuplicatePrompt>) -> Self {
        Self {
            replace,
            prompt,
            dropped: 0,
            kept: 0,
        }
    }

    /// Resolver that drops every duplicate silently
    pub fn replacing() -> Self {
        Self::new(true, Box::new(KeepExisting))
    }

    /// Resolver that asks `prompt` for each duplicate
    pub fn asking(prompt: impl DuplicatePrompt + 'static) -> Self {
        Self::new(false, Box::new(prompt))
    }

    /// Resolve one duplicate chunk
    pub fn resolve(&mut self, chunk: &TiddlerChunk) -> Result<Resolution> {
        let resolution = if self.replace {
            Resolution::Drop
        } else {
            self.prompt.decide(chunk.title().unwrap_or_default())?
        };

        match resolution {
            Resolution::Drop => {
                log::info!("dropping existing {chunk}");
                self.dropped += 1;
            }
            Resolution::Keep => {
                log::info!("keeping existing {chunk}");
                self.kept += 1;
            }
        }
        Ok(resolution)
    }

    /// Number of duplicates dropped so far
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of duplicates kept so far
    pub fn kept(&self) -> usize {
        self.kept
    }
}

impl std::fmt::Debug for ConflictResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictResolver")
            .field("replace", &self.replace)
            .field("dropped", &self.dropped)
            .field("kept", &self.kept)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate(title: &str) -> TiddlerChunk {
        TiddlerChunk::from_source(format!("<div title=\"{title}\">\n</div>\n"))
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y\n"), Resolution::Drop);
        assert_eq!(parse_answer("  YES "), Resolution::Drop);
        assert_eq!(parse_answer("n"), Resolution::Keep);
        assert_eq!(parse_answer(""), Resolution::Keep);
        assert_eq!(parse_answer("sure"), Resolution::Keep);
    }

    #[test]
    fn test_replace_mode_never_prompts() {
        let mut resolver = ConflictResolver::new(true, Box::new(ScriptedPrompt::default()));
        assert_eq!(resolver.resolve(&duplicate("X")).unwrap(), Resolution::Drop);
        assert_eq!(resolver.resolve(&duplicate("X")).unwrap(), Resolution::Drop);
        assert_eq!(resolver.dropped(), 2);
        assert_eq!(resolver.kept(), 0);
    }

    #[test]
    fn test_scripted_answers_in_order() {
        let mut resolver =
            ConflictResolver::asking(ScriptedPrompt::new([Resolution::Keep, Resolution::Drop]));
        assert_eq!(resolver.resolve(&duplicate("X")).unwrap(), Resolution::Keep);
        assert_eq!(resolver.resolve(&duplicate("X")).unwrap(), Resolution::Drop);
        // Script exhausted
        assert_eq!(resolver.resolve(&duplicate("X")).unwrap(), Resolution::Keep);
        assert_eq!(resolver.dropped(), 1);
        assert_eq!(resolver.kept(), 2);
    }

    #[test]
    fn test_console_prompt_reads_answer() {
        let mut shown = Vec::new();
        let mut prompt = ConsolePrompt::new("y\n".as_bytes(), &mut shown);
        assert_eq!(prompt.decide("Pics").unwrap(), Resolution::Drop);
        let shown = String::from_utf8(shown).unwrap();
        assert_eq!(
            shown,
            "Another tiddler with the name \"Pics\" was found.  Delete it? (y/n) "
        );
    }

    #[test]
    fn test_console_prompt_unrecognized_keeps() {
        let mut prompt = ConsolePrompt::new("maybe\n".as_bytes(), Vec::new());
        assert_eq!(prompt.decide("Pics").unwrap(), Resolution::Keep);
    }

    #[test]
    fn test_console_prompt_closed_input_keeps() {
        let mut prompt = ConsolePrompt::new("".as_bytes(), Vec::new());
        assert_eq!(prompt.decide("Pics").unwrap(), Resolution::Keep);
    }

    #[test]
    fn test_console_prompt_answers_each_question() {
        let mut prompt = ConsolePrompt::new("n\ny\n".as_bytes(), Vec::new());
        assert_eq!(prompt.decide("A").unwrap(), Resolution::Keep);
        assert_eq!(prompt.decide("A").unwrap(), Resolution::Drop);
    }
}
