//! Wizard Orchestrator
//!
//! Sequences the prompts and drives the resolver, the execution engine and the
//! scaffold layout:
//!
//! 1. project name, framework, language
//! 2. bootstrap (`<pm> create vite ...`), fatal on failure
//! 3. one multi-select per catalog category
//! 4. resolved installs through the execution engine
//! 5. scaffold layout, fatal on I/O failure
//! 6. extra actions (git init, dev server) through the execution engine
//!
//! A cancelled prompt stops the run on the spot. Nothing is cleaned up; what
//! already ran stays on disk.

use crate::answers::{Answers, DEFAULT_PROJECT_NAME};
use crate::catalog::Catalog;
use crate::error::{Result, WizardError};
use crate::executor::{CommandRunner, ExecutionEngine, ExecutionResult};
use crate::logic::resolver::{resolve, resolve_all};
use crate::prompt::Prompter;
use crate::types::{PackageManager, vite_template};
use crossterm::style::Stylize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Runtime settings that do not come from prompts
#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub package_manager: PackageManager,
    /// Directory the project directory is created in
    pub base_dir: PathBuf,
    pub dry_run: bool,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::default(),
            base_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

/// Everything a finished (or cancelled) run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: Outcome,
    /// Set once the project name is known
    pub project_root: Option<PathBuf>,
    /// One entry per executed directive, in execution order
    pub results: Vec<ExecutionResult>,
    /// Answers given up to the point the run ended
    pub answers: Answers,
}

impl RunSummary {
    pub fn failures(&self) -> impl Iterator<Item = &ExecutionResult> {
        self.results.iter().filter(|r| r.is_failed())
    }
}

/// Drives one wizard run
pub struct Wizard<'a, P: Prompter, R: CommandRunner> {
    catalog: &'a Catalog,
    prompter: P,
    runner: R,
    options: WizardOptions,
}

impl<'a, P: Prompter, R: CommandRunner> Wizard<'a, P, R> {
    pub fn new(catalog: &'a Catalog, prompter: P, runner: R, options: WizardOptions) -> Self {
        Self {
            catalog,
            prompter,
            runner,
            options,
        }
    }

    /// Run the wizard to completion or cancellation.
    ///
    /// Cancellation is reported as `Outcome::Cancelled`, not as an error. Any
    /// other error (bootstrap or scaffold failure, broken terminal) is
    /// returned to the caller.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary {
            outcome: Outcome::Completed,
            project_root: None,
            results: Vec::new(),
            answers: Answers::default(),
        };

        match self.run_steps(&mut summary) {
            Ok(()) => {
                info!("Wizard completed with {} result(s)", summary.results.len());
                Ok(summary)
            }
            Err(WizardError::Cancelled) => {
                info!("Wizard cancelled by user");
                summary.outcome = Outcome::Cancelled;
                Ok(summary)
            }
            Err(e) => Err(e),
        }
    }

    fn run_steps(&mut self, summary: &mut RunSummary) -> Result<()> {
        println!("{}", "\n🚀 Welcome to Vite Stack Wizard!\n".cyan());

        let project_name = self.prompter.project_name(DEFAULT_PROJECT_NAME)?;
        summary.answers.project_name = project_name.clone();
        let framework = self.prompter.framework()?;
        summary.answers.framework = framework;
        let language = self.prompter.language()?;
        summary.answers.language = language;

        let project_root = self.options.base_dir.join(&project_name);
        summary.project_root = Some(project_root.clone());

        let package_manager = self.options.package_manager;
        let mut engine = ExecutionEngine::new(&mut self.runner, package_manager, &project_root)
            .with_dry_run(self.options.dry_run);

        // Bootstrap
        println!(
            "{}",
            format!("\n📦 Creating Vite app: {}\n", project_name).green()
        );
        let template = vite_template(framework, language);
        let create = package_manager.create_command(&project_name, &template);
        engine
            .run_in(&create, &self.options.base_dir)
            .map_err(|e| WizardError::bootstrap(e.to_string()))?;
        println!(
            "{}",
            format!("\n📂 Switched to project folder: {}\n", project_name).cyan()
        );

        // Category prompts, all answered before anything is installed
        for category in &self.catalog.categories {
            let picked = self.prompter.choose(category)?;
            debug!("{}: {:?}", category.name, picked);
            summary.answers.selections.insert(category.name.clone(), picked);
        }

        let directives = resolve_all(self.catalog, &summary.answers.selections);
        if !directives.is_empty() {
            println!("{}", "\n📦 Installing packages...\n".green());
            summary.results.extend(engine.execute_all(&directives)?);
        }

        let layout = self.catalog.scaffold_directives();
        summary.results.extend(engine.execute_all(&layout)?);

        let extras = self.prompter.extras(&self.catalog.extras)?;
        summary.answers.extras = extras.clone();
        for directive in resolve(&self.catalog.extras, extras.as_slice()) {
            println!("{}", format!("\n▶ {}\n", directive.describe()).green());
            summary.results.push(engine.execute(&directive)?);
        }

        let failed = summary.failures().count();
        if failed > 0 {
            warn!("{} step(s) failed", failed);
        }
        Ok(())
    }
}

/// Notice printed when the user aborts a prompt
pub fn print_cancelled() {
    println!(
        "{}",
        "\n⛔ Prompt canceled. You can run the CLI again anytime!".yellow()
    );
}

/// Notice printed when an interrupt signal stops the wizard
pub fn print_interrupted() {
    crate::prompt::restore_cursor();
    println!(
        "{}",
        "\n⛔ CLI interrupted. You can run it again anytime!".yellow()
    );
}

/// Completion notice with a per-step failure recap
pub fn print_completed(summary: &RunSummary) {
    let failures: Vec<&ExecutionResult> = summary.failures().collect();
    if !failures.is_empty() {
        println!(
            "{}",
            format!("\n⚠ {} step(s) failed:", failures.len()).yellow()
        );
        for result in failures {
            println!("  - {}", result.directive.describe());
        }
    }
    println!("{}", "\n✨ Project setup complete!".magenta());
}

/// Print the notice that matches `summary.outcome`
pub fn print_outcome(summary: &RunSummary) {
    match summary.outcome {
        Outcome::Completed => print_completed(summary),
        Outcome::Cancelled => print_cancelled(),
    }
}
