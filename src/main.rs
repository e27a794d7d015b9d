//! Vite Stack Wizard - Main entry point
//!
//! Prompts for a project setup, bootstraps a Vite app, installs the chosen
//! stack and writes the scaffold layout.

use anyhow::Context;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use stackwiz::cli::Cli;
use stackwiz::executor::{CommandRunner, DryRunRunner, ShellRunner};
use stackwiz::prompt::{AnswersPrompter, Prompter, TerminalPrompter};
use stackwiz::wizard::{self, Outcome, Wizard};
use stackwiz::{Answers, Catalog, process_guard};

/// Initialize the logger with appropriate settings
///
/// Logs go to stderr at `warn` by default so they do not clutter the prompts;
/// `RUST_LOG` overrides the level.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() {
    init_logger();
    info!("stackwiz starting up");

    // An interrupt outside a prompt takes the same clean exit as a cancel
    if let Err(e) = process_guard::init_signal_handlers(wizard::print_interrupted) {
        warn!("Failed to initialize signal handlers: {}", e);
    }
    debug!("Signal handlers initialized");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed: {:?}", cli);

    if let Err(e) = run(&cli) {
        error!("Wizard failed: {:#}", e);
        eprintln!("\n✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let catalog = Catalog::for_kind(cli.catalog);
    catalog
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid {} catalog: {}", cli.catalog, e))?;

    let mut prompter: Box<dyn Prompter> = match &cli.answers {
        Some(path) => {
            info!("Running headless with answers file: {:?}", path);
            let answers = Answers::load_from_file(path)?;
            answers.validate()?;
            for unknown in answers.unknown_labels(&catalog) {
                warn!("Ignoring unknown selection '{}'", unknown);
            }
            Box::new(AnswersPrompter::new(answers))
        }
        None => Box::new(TerminalPrompter::new()),
    };

    let mut runner: Box<dyn CommandRunner> = if cli.dry_run {
        Box::new(DryRunRunner)
    } else {
        Box::new(ShellRunner)
    };

    let summary = Wizard::new(
        &catalog,
        prompter.as_mut(),
        runner.as_mut(),
        cli.wizard_options(),
    )
    .run()?;

    wizard::print_outcome(&summary);

    if summary.outcome == Outcome::Completed {
        if let Some(path) = &cli.save_answers {
            summary
                .answers
                .save_to_file(path)
                .with_context(|| format!("Failed to save answers to {}", path.display()))?;
            println!("✓ Answers saved to {}", path.display());
        }
    }

    Ok(())
}
