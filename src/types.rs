//! Type-safe choices for the wizard
//!
//! The framework, language and package manager prompts map onto these enums
//! so the bootstrap and install command lines are built from exhaustive
//! matches instead of loose strings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Frontend framework passed to the Vite template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Framework {
    #[default]
    React,
    Vue,
    Svelte,
    Vanilla,
}

/// Source language of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
}

/// Package manager used for bootstrap, installs and package scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Which compiled-in option catalog drives the category prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CatalogKind {
    /// Nine feature categories
    #[default]
    Full,
    /// A single "Packages" category
    Compact,
}

/// Vite template name for a framework/language pair (`react`, `react-ts`, ...)
pub fn vite_template(framework: Framework, language: Language) -> String {
    match language {
        Language::JavaScript => framework.to_string(),
        Language::TypeScript => format!("{}-ts", framework),
    }
}

impl PackageManager {
    /// Command line that creates a new Vite project in `project_name`
    pub fn create_command(&self, project_name: &str, template: &str) -> String {
        match self {
            // npm needs `--` to forward flags to create-vite
            PackageManager::Npm => {
                format!("npm create vite@latest {} -- --template {}", project_name, template)
            }
            PackageManager::Pnpm => {
                format!("pnpm create vite {} --template {}", project_name, template)
            }
            PackageManager::Yarn => {
                format!("yarn create vite {} --template {}", project_name, template)
            }
            PackageManager::Bun => {
                format!("bun create vite {} --template {}", project_name, template)
            }
        }
    }

    /// Command line that adds `packages` (space separated) to the project
    pub fn install_command(&self, packages: &str) -> String {
        let subcommand = match self {
            PackageManager::Npm => "install",
            PackageManager::Pnpm | PackageManager::Yarn | PackageManager::Bun => "add",
        };
        format!("{} {} {}", self, subcommand, packages.trim())
    }

    /// Command line that runs a `package.json` script
    pub fn run_script_command(&self, script: &str) -> String {
        format!("{} run {}", self, script.trim())
    }
}

/// Display labels for every variant, in declaration order
pub fn labels<T: IntoEnumIterator + std::fmt::Display>() -> Vec<String> {
    T::iter().map(|v| v.to_string()).collect()
}
