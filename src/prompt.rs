//! Prompt layer.
//!
//! The wizard only talks to the [`Prompter`] trait. [`TerminalPrompter`]
//! renders real prompts with dialoguer; [`AnswersPrompter`] replays an
//! answers file for headless runs.
//!
//! Any user abort (Esc, `q`, Ctrl+C while a prompt has the terminal) surfaces
//! as [`WizardError::Cancelled`] and nothing else does.

use crate::answers::{Answers, validate_project_name};
use crate::catalog::Category;
use crate::error::{Result, WizardError};
use crate::types::{Framework, Language, labels};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use std::io::{ErrorKind, Write};
use strum::IntoEnumIterator;

/// Source of the user's answers
pub trait Prompter {
    fn project_name(&mut self, default: &str) -> Result<String>;

    fn framework(&mut self) -> Result<Framework>;

    fn language(&mut self) -> Result<Language>;

    /// Labels picked in one feature category (possibly none)
    fn choose(&mut self, category: &Category) -> Result<Vec<String>>;

    /// Labels picked from the extra actions
    fn extras(&mut self, extras: &Category) -> Result<Vec<String>>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn project_name(&mut self, default: &str) -> Result<String> {
        (**self).project_name(default)
    }

    fn framework(&mut self) -> Result<Framework> {
        (**self).framework()
    }

    fn language(&mut self) -> Result<Language> {
        (**self).language()
    }

    fn choose(&mut self, category: &Category) -> Result<Vec<String>> {
        (**self).choose(category)
    }

    fn extras(&mut self, extras: &Category) -> Result<Vec<String>> {
        (**self).extras(extras)
    }
}

/// Interactive prompts on the controlling terminal
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn select_variant<T: IntoEnumIterator + std::fmt::Display>(&self, prompt: &str) -> Result<T> {
        let items = labels::<T>();
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items.as_slice())
            .default(0)
            .interact_opt()
            .map_err(map_dialoguer_error)?
            .ok_or(WizardError::Cancelled)?;

        T::iter()
            .nth(index)
            .ok_or_else(|| WizardError::prompt(format!("selection {} out of range", index)))
    }

    fn multi_select(&self, prompt: &str, category: &Category) -> Result<Vec<String>> {
        let items = category.labels();
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items.as_slice())
            .interact_opt()
            .map_err(map_dialoguer_error)?
            .ok_or(WizardError::Cancelled)?;

        Ok(picked
            .into_iter()
            .filter_map(|i| items.get(i).map(|label| label.to_string()))
            .collect())
    }
}

impl Prompter for TerminalPrompter {
    fn project_name(&mut self, default: &str) -> Result<String> {
        let name = Input::<String>::with_theme(&self.theme)
            .with_prompt("Project name")
            .default(default.to_string())
            .validate_with(|input: &String| validate_project_name(input))
            .interact_text()
            .map_err(map_dialoguer_error)?;
        Ok(name.trim().to_string())
    }

    fn framework(&mut self) -> Result<Framework> {
        self.select_variant("Choose a framework")
    }

    fn language(&mut self) -> Result<Language> {
        self.select_variant("Choose a language")
    }

    fn choose(&mut self, category: &Category) -> Result<Vec<String>> {
        self.multi_select(&format!("Choose {} options", category.name), category)
    }

    fn extras(&mut self, extras: &Category) -> Result<Vec<String>> {
        self.multi_select("Extra actions", extras)
    }
}

/// Ctrl+C inside a raw-mode prompt arrives as an interrupted read
fn map_dialoguer_error(err: dialoguer::Error) -> WizardError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == ErrorKind::Interrupted => {
            // dialoguer leaves the cursor hidden when the read is interrupted
            restore_cursor();
            WizardError::Cancelled
        }
        dialoguer::Error::IO(e) => WizardError::Io(e),
    }
}

/// Show the terminal cursor again after an aborted prompt
pub fn restore_cursor() {
    if let Err(e) = show_cursor(&mut std::io::stderr()) {
        tracing::debug!("Failed to restore cursor: {}", e);
    }
}

fn show_cursor<W: Write>(out: &mut W) -> std::io::Result<()> {
    crossterm::execute!(out, crossterm::cursor::Show)
}

/// Replays a loaded answers file
#[derive(Debug, Clone)]
pub struct AnswersPrompter {
    answers: Answers,
}

impl AnswersPrompter {
    pub fn new(answers: Answers) -> Self {
        Self { answers }
    }
}

impl Prompter for AnswersPrompter {
    fn project_name(&mut self, _default: &str) -> Result<String> {
        let name = self.answers.project_name.trim();
        validate_project_name(name).map_err(WizardError::validation)?;
        Ok(name.to_string())
    }

    fn framework(&mut self) -> Result<Framework> {
        Ok(self.answers.framework)
    }

    fn language(&mut self) -> Result<Language> {
        Ok(self.answers.language)
    }

    fn choose(&mut self, category: &Category) -> Result<Vec<String>> {
        Ok(self
            .answers
            .selections
            .get(&category.name)
            .cloned()
            .unwrap_or_default())
    }

    fn extras(&mut self, _extras: &Category) -> Result<Vec<String>> {
        Ok(self.answers.extras.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_interrupted_read_is_cancellation() {
        let err = dialoguer::Error::IO(std::io::Error::new(ErrorKind::Interrupted, "read interrupted"));
        assert!(map_dialoguer_error(err).is_cancelled());
    }

    #[test]
    fn test_show_cursor_emits_escape() {
        let mut out = Vec::new();
        show_cursor(&mut out).unwrap();
        assert_eq!(out, b"\x1b[?25h");
    }

    #[test]
    fn test_other_io_errors_are_not_cancellation() {
        let err = dialoguer::Error::IO(std::io::Error::new(ErrorKind::NotConnected, "not a terminal"));
        assert!(matches!(map_dialoguer_error(err), WizardError::Io(_)));
    }

    #[test]
    fn test_answers_prompter_replays_selection() {
        let mut answers = Answers::default();
        answers.framework = Framework::Svelte;
        answers
            .selections
            .insert("State".into(), vec!["Zustand".into()]);
        let catalog = Catalog::full();
        let mut prompter = AnswersPrompter::new(answers);

        assert_eq!(prompter.framework().unwrap(), Framework::Svelte);
        assert_eq!(
            prompter.choose(catalog.category("State").unwrap()).unwrap(),
            vec!["Zustand"]
        );
        assert!(prompter.choose(catalog.category("Routing").unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_answers_prompter_rejects_bad_name() {
        let answers = Answers {
            project_name: "two words".into(),
            ..Answers::default()
        };
        let err = AnswersPrompter::new(answers).project_name("x").unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));
    }
}
