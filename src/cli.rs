use clap::Parser;
use std::path::PathBuf;

use crate::types::{CatalogKind, PackageManager};
use crate::wizard::WizardOptions;

/// Vite Stack Wizard - scaffold a Vite project and install a frontend stack
#[derive(Parser, Debug)]
#[command(name = "stackwiz")]
#[command(about = "Interactive wizard that scaffolds a Vite project and installs your stack")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: print the commands and paths instead of running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Package manager used to bootstrap the project and install packages
    #[arg(long, value_name = "NAME", default_value_t = PackageManager::Npm)]
    pub package_manager: PackageManager,

    /// Option catalog to prompt from (full or compact)
    #[arg(long, value_name = "KIND", default_value_t = CatalogKind::Full)]
    pub catalog: CatalogKind,

    /// Run headless from a JSON answers file instead of prompting
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Save the answers of this run to a JSON file when it completes
    #[arg(long, value_name = "FILE", conflicts_with = "answers")]
    pub save_answers: Option<PathBuf>,

    /// Directory to create the project in
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn wizard_options(&self) -> WizardOptions {
        WizardOptions {
            package_manager: self.package_manager,
            base_dir: self.dir.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_is_interactive_default() {
        let cli = Cli::try_parse_from(["stackwiz"]).unwrap();
        assert!(!cli.dry_run);
        assert_eq!(cli.package_manager, PackageManager::Npm);
        assert_eq!(cli.catalog, CatalogKind::Full);
        assert!(cli.answers.is_none());
        assert_eq!(cli.dir, PathBuf::from("."));
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "stackwiz",
            "--dry-run",
            "--package-manager",
            "pnpm",
            "--catalog",
            "compact",
            "--answers",
            "answers.json",
            "--dir",
            "/tmp/projects",
        ])
        .unwrap();

        assert!(cli.dry_run);
        assert_eq!(cli.package_manager, PackageManager::Pnpm);
        assert_eq!(cli.catalog, CatalogKind::Compact);
        assert_eq!(cli.answers, Some(PathBuf::from("answers.json")));

        let options = cli.wizard_options();
        assert!(options.dry_run);
        assert_eq!(options.base_dir, PathBuf::from("/tmp/projects"));
    }

    #[test]
    fn test_unknown_package_manager_rejected() {
        assert!(Cli::try_parse_from(["stackwiz", "--package-manager", "maven"]).is_err());
    }

    #[test]
    fn test_answers_conflicts_with_save_answers() {
        let result = Cli::try_parse_from([
            "stackwiz",
            "--answers",
            "a.json",
            "--save-answers",
            "b.json",
        ]);
        assert!(result.is_err());
    }
}
