//! executor.rs - Runs resolved directives against the host system.
//!
//! Every command directive becomes one shell command line that is run to
//! completion before the next one starts. Package managers keep lockfiles and
//! caches that do not tolerate concurrent writers, so there is no parallelism
//! here.
//!
//! A failing command is recorded and the run moves on: one broken package must
//! not keep the rest of the stack from installing. Scaffold directives are the
//! exception. They go through the [`ScaffoldWriter`], and an I/O error there
//! ends the run.

use crate::catalog::Directive;
use crate::error::Result;
use crate::process_guard::{self, ChildGuard};
use crate::scaffold::ScaffoldWriter;
use crate::types::PackageManager;
use crossterm::style::Stylize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single external command did not succeed
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}")]
    Exit { command: String, code: i32 },

    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },
}

/// Runs one shell command line to completion
///
/// Implementations must not return before the command has finished.
pub trait CommandRunner {
    fn run(&mut self, command_line: &str, cwd: &Path) -> std::result::Result<(), CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command_line: &str, cwd: &Path) -> std::result::Result<(), CommandError> {
        (**self).run(command_line, cwd)
    }
}

/// Runs commands through the platform shell with inherited stdio, so the
/// package manager's progress output and prompts reach the user live.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

/// `cmd.exe /C <line>` on Windows, `/bin/sh -c <line>` elsewhere
pub fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd.exe");
        cmd.args(["/C", command_line]);
        cmd
    } else {
        let mut cmd = Command::new("/bin/sh");
        cmd.args(["-c", command_line]);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, command_line: &str, cwd: &Path) -> std::result::Result<(), CommandError> {
        info!("Running `{}` in {}", command_line, cwd.display());

        let mut child = shell_command(command_line)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        let _guard = ChildGuard::register(child.id());

        let status = child.wait().map_err(|source| CommandError::Spawn {
            command: command_line.to_string(),
            source,
        })?;

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(CommandError::Exit {
                command: command_line.to_string(),
                code,
            }),
            None => Err(CommandError::Terminated {
                command: command_line.to_string(),
            }),
        }
    }
}

/// Prints commands instead of running them
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, command_line: &str, cwd: &Path) -> std::result::Result<(), CommandError> {
        println!("  would run `{}` in {}", command_line, cwd.display());
        Ok(())
    }
}

/// Outcome of one directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Succeeded,
    Failed(String),
    Skipped,
}

/// A directive together with what happened when it ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub directive: Directive,
    pub status: ExecutionStatus,
}

impl ExecutionResult {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ExecutionStatus::Failed(_))
    }
}

/// Executes directives one after another inside a project directory
pub struct ExecutionEngine<R: CommandRunner> {
    runner: R,
    package_manager: PackageManager,
    writer: ScaffoldWriter,
    stop: Arc<AtomicBool>,
}

impl<R: CommandRunner> ExecutionEngine<R> {
    pub fn new(runner: R, package_manager: PackageManager, project_root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            package_manager,
            writer: ScaffoldWriter::new(project_root),
            stop: process_guard::shutdown_flag(),
        }
    }

    /// Replace the flag that stops new directives from starting
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// Report scaffold entries instead of creating them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.writer = self.writer.with_dry_run(dry_run);
        self
    }

    /// Shell command line for a command directive; `None` for blank and
    /// scaffold directives
    pub fn command_line(&self, directive: &Directive) -> Option<String> {
        if directive.is_blank() {
            return None;
        }
        match directive {
            Directive::Install(packages) => Some(self.package_manager.install_command(packages)),
            Directive::PackageScript(script) => {
                Some(self.package_manager.run_script_command(script))
            }
            Directive::Shell(line) => Some(line.trim().to_string()),
            Directive::Empty | Directive::Scaffold(_) => None,
        }
    }

    /// Execute a single directive.
    ///
    /// Command failures are folded into the returned status; only a scaffold
    /// failure is returned as an error.
    pub fn execute(&mut self, directive: &Directive) -> Result<ExecutionResult> {
        let status = if directive.is_blank() {
            debug!("Skipping blank directive {:?}", directive);
            ExecutionStatus::Skipped
        } else if self.stop.load(Ordering::SeqCst) {
            info!("Shutting down, not starting {}", directive.describe());
            ExecutionStatus::Skipped
        } else if let Directive::Scaffold(paths) = directive {
            self.writer.ensure_paths(paths.as_slice())?;
            ExecutionStatus::Succeeded
        } else {
            match self.command_line(directive) {
                Some(line) => {
                    let root = self.writer.root().to_path_buf();
                    match self.runner.run(&line, &root) {
                        Ok(()) => ExecutionStatus::Succeeded,
                        Err(e) => {
                            warn!("Directive failed: {}", e);
                            ExecutionStatus::Failed(e.to_string())
                        }
                    }
                }
                None => ExecutionStatus::Skipped,
            }
        };

        let result = ExecutionResult {
            directive: directive.clone(),
            status,
        };
        report(&result);
        Ok(result)
    }

    /// Execute `directives` in order, one result per directive.
    pub fn execute_all(&mut self, directives: &[Directive]) -> Result<Vec<ExecutionResult>> {
        let mut results = Vec::with_capacity(directives.len());
        for directive in directives {
            results.push(self.execute(directive)?);
        }

        let failed = results.iter().filter(|r| r.is_failed()).count();
        info!(
            "Executed {} directive(s), {} failed",
            results.len(),
            failed
        );
        Ok(results)
    }

    /// Run an arbitrary command line in `cwd` (used for project bootstrap,
    /// which happens before the project directory exists)
    pub fn run_in(&mut self, command_line: &str, cwd: &Path) -> std::result::Result<(), CommandError> {
        if self.stop.load(Ordering::SeqCst) {
            return Err(CommandError::Terminated {
                command: command_line.to_string(),
            });
        }
        self.runner.run(command_line, cwd)
    }
}

fn report(result: &ExecutionResult) {
    let what = result.directive.describe();
    match &result.status {
        ExecutionStatus::Succeeded => match result.directive {
            Directive::Scaffold(_) => println!("{} scaffolded {}", "✔".green(), what),
            _ => println!("{} {}", "✔".green(), what),
        },
        ExecutionStatus::Failed(cause) => {
            println!("{} {}: {}", "✖".red(), what, cause.as_str().red())
        }
        ExecutionStatus::Skipped => debug!("skipped {}", what),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Records command lines and fails those containing "boom"
    #[derive(Default)]
    struct RecordingRunner {
        lines: Vec<String>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&mut self, command_line: &str, _cwd: &Path) -> std::result::Result<(), CommandError> {
            self.lines.push(command_line.to_string());
            if command_line.contains("boom") {
                return Err(CommandError::Exit {
                    command: command_line.to_string(),
                    code: 1,
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_command_lines_use_package_manager() {
        let engine = ExecutionEngine::new(RecordingRunner::default(), PackageManager::Pnpm, ".");
        assert_eq!(
            engine.command_line(&Directive::install("zustand")),
            Some("pnpm add zustand".to_string())
        );
        assert_eq!(
            engine.command_line(&Directive::PackageScript("dev".into())),
            Some("pnpm run dev".to_string())
        );
        assert_eq!(
            engine.command_line(&Directive::Shell(" git init ".into())),
            Some("git init".to_string())
        );
        assert_eq!(engine.command_line(&Directive::Empty), None);
        assert_eq!(engine.command_line(&Directive::scaffold("src")), None);
    }

    #[test]
    fn test_failure_is_isolated() {
        let mut runner = RecordingRunner::default();
        let mut engine = ExecutionEngine::new(&mut runner, PackageManager::Npm, ".");

        let results = engine
            .execute_all(&[
                Directive::install("a"),
                Directive::install("boom"),
                Directive::install("c"),
            ])
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].status, ExecutionStatus::Succeeded);
        assert!(results[1].is_failed());
        assert_eq!(results[2].status, ExecutionStatus::Succeeded);
        assert_eq!(
            runner.lines,
            vec!["npm install a", "npm install boom", "npm install c"]
        );
    }

    #[test]
    fn test_blank_directives_are_skipped_not_run() {
        let mut runner = RecordingRunner::default();
        let mut engine = ExecutionEngine::new(&mut runner, PackageManager::Npm, ".");

        let results = engine
            .execute_all(&[Directive::Empty, Directive::install("  ")])
            .unwrap();

        assert!(results.iter().all(|r| r.status == ExecutionStatus::Skipped));
        assert!(runner.lines.is_empty());
    }

    #[test]
    fn test_scaffold_directive_writes_under_root() {
        let tmp = TempDir::new().unwrap();
        let mut engine =
            ExecutionEngine::new(RecordingRunner::default(), PackageManager::Npm, tmp.path());

        let result = engine
            .execute(&Directive::scaffold("src/hooks src/App.tsx"))
            .unwrap();

        assert_eq!(result.status, ExecutionStatus::Succeeded);
        assert!(tmp.path().join("src/hooks").is_dir());
        assert!(tmp.path().join("src/App.tsx").is_file());
    }

    #[test]
    fn test_scaffold_failure_stops_the_run() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("src"), "").unwrap();
        let mut runner = RecordingRunner::default();
        let mut engine = ExecutionEngine::new(&mut runner, PackageManager::Npm, tmp.path());

        let err = engine
            .execute_all(&[Directive::scaffold("src/App.tsx"), Directive::install("after")])
            .unwrap_err();

        assert!(matches!(err, crate::error::WizardError::Scaffold { .. }));
        assert!(runner.lines.is_empty());
    }

    #[test]
    fn test_nothing_starts_once_stop_flag_is_raised() {
        let tmp = TempDir::new().unwrap();
        let stop = Arc::new(AtomicBool::new(false));
        let mut runner = RecordingRunner::default();
        let mut engine = ExecutionEngine::new(&mut runner, PackageManager::Npm, tmp.path())
            .with_stop_flag(stop.clone());

        let first = engine.execute(&Directive::install("react-router-dom")).unwrap();
        assert_eq!(first.status, ExecutionStatus::Succeeded);

        stop.store(true, Ordering::SeqCst);
        let results = engine
            .execute_all(&[Directive::install("axios"), Directive::scaffold("src/pages")])
            .unwrap();
        assert!(results.iter().all(|r| r.status == ExecutionStatus::Skipped));
        assert!(engine.run_in("npm create vite@latest app", tmp.path()).is_err());

        assert_eq!(runner.lines, vec!["npm install react-router-dom"]);
        assert!(!tmp.path().join("src").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_reports_exit_code() {
        let tmp = TempDir::new().unwrap();
        let mut runner = ShellRunner;

        assert!(runner.run("true", tmp.path()).is_ok());
        match runner.run("exit 3", tmp.path()) {
            Err(CommandError::Exit { code, .. }) => assert_eq!(code, 3),
            other => panic!("expected exit error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_uses_cwd() {
        let tmp = TempDir::new().unwrap();
        ShellRunner.run("touch marker.txt", tmp.path()).unwrap();
        assert!(tmp.path().join("marker.txt").exists());
    }

    #[test]
    fn test_shell_runner_missing_cwd_is_spawn_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let err = ShellRunner.run("echo hi", &missing).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
