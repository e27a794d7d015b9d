//! Answers file handling for saving and loading wizard runs.
//!
//! An answers file records everything a user picked in one run. It can be
//! written at the end of an interactive run (`--save-answers`) and fed back
//! with `--answers` to repeat the same setup without prompts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::logic::resolver::Selections;
use crate::types::{Framework, Language};

/// Project name offered when the user just presses Enter
pub const DEFAULT_PROJECT_NAME: &str = "my-vite-app";

/// Longest package name npm accepts
const MAX_PROJECT_NAME_LEN: usize = 214;

/// Everything the wizard asks for in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Answers {
    pub project_name: String,
    pub framework: Framework,
    pub language: Language,
    /// Picked labels per category name
    pub selections: Selections,
    /// Picked extra actions
    pub extras: Vec<String>,
}

impl Default for Answers {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            framework: Framework::default(),
            language: Language::default(),
            selections: Selections::new(),
            extras: Vec::new(),
        }
    }
}

impl Answers {
    /// Save answers to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize answers to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write answers to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load answers from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read answers from {:?}", path.as_ref()))?;

        let answers: Self =
            serde_json::from_str(&content).context("Failed to parse answers JSON")?;

        Ok(answers)
    }

    /// Validate the answers.
    ///
    /// Only the project name can make a run fail. Unknown categories and labels
    /// are reported by [`Answers::unknown_labels`] and dropped by the resolver.
    pub fn validate(&self) -> Result<()> {
        validate_project_name(&self.project_name).map_err(|e| anyhow::anyhow!(e))
    }

    /// `category/label` pairs (and extras) that `catalog` does not define
    pub fn unknown_labels(&self, catalog: &Catalog) -> Vec<String> {
        let mut unknown = Vec::new();

        for (category_name, labels) in &self.selections {
            match catalog.category(category_name) {
                Some(category) => {
                    for label in labels {
                        if category.directive(label).is_none() {
                            unknown.push(format!("{}/{}", category_name, label));
                        }
                    }
                }
                None => unknown.push(category_name.clone()),
            }
        }

        for extra in &self.extras {
            if catalog.extras.directive(extra).is_none() {
                unknown.push(format!("{}/{}", catalog.extras.name, extra));
            }
        }

        unknown
    }
}

/// Check a project name before it is handed to the bootstrap command line.
///
/// The name becomes both a directory and a shell argument, so it is limited to
/// ASCII letters, digits, `-`, `_` and `.`, and may not start with `.` or `-`.
pub fn validate_project_name(name: &str) -> std::result::Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Project name must be specified".to_string());
    }
    if name.len() > MAX_PROJECT_NAME_LEN {
        return Err(format!(
            "Project name must be at most {} characters long",
            MAX_PROJECT_NAME_LEN
        ));
    }
    if name.starts_with('.') || name.starts_with('-') {
        return Err("Project name cannot start with '.' or '-'".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(
            "Project name can only contain letters, numbers, '-', '_' and '.'".to_string(),
        );
    }
    Ok(())
}
