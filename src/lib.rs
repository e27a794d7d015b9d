//! Vite Stack Wizard Library
//!
//! This library provides the selection-to-action pipeline behind the
//! `stackwiz` scaffolding wizard: option catalogs, the selection resolver,
//! the sequential execution engine and the scaffold writer.

pub mod answers;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod executor;
pub mod logic;
pub mod process_guard;
pub mod prompt;
pub mod scaffold;
pub mod types;
pub mod wizard;

// Re-export main types for convenience
pub use answers::{Answers, DEFAULT_PROJECT_NAME, validate_project_name};
pub use catalog::{Catalog, Category, Choice, Directive};
pub use error::{Result, WizardError};
pub use executor::{
    CommandError, CommandRunner, DryRunRunner, ExecutionEngine, ExecutionResult, ExecutionStatus,
    ShellRunner,
};
pub use logic::resolver::{Selections, resolve, resolve_all};
pub use process_guard::{ChildGuard, ChildRegistry};
pub use prompt::{AnswersPrompter, Prompter, TerminalPrompter};
pub use scaffold::{PathKind, ScaffoldWriter};
pub use types::{CatalogKind, Framework, Language, PackageManager};
pub use wizard::{Outcome, RunSummary, Wizard, WizardOptions};
