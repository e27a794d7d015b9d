//! Option catalogs.
//!
//! A catalog is the table of categories, their choices, and the directive each
//! choice maps to. Catalogs are built once at start-up and handed to the
//! resolver and the wizard by reference; nothing here is mutable global state.
//!
//! # Catalogs
//!
//! | Kind      | Categories |
//! |-----------|------------|
//! | `Full`    | Styling, State, Routing, Utilities, Testing, Linting, Components, Env, DevTools |
//! | `Compact` | Packages |
//!
//! Both share the same scaffold layout and extra actions.
//!
//! Package names are opaque configuration data; the wizard never inspects them.

use crate::types::CatalogKind;
use std::path::{Component, Path};

/// An action derived from a user choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Nothing to do (choice kept for display only)
    Empty,
    /// Packages handed to the package manager's install/add subcommand
    Install(String),
    /// A `package.json` script run through the package manager
    PackageScript(String),
    /// A verbatim shell command line
    Shell(String),
    /// Relative paths to create under the project root
    Scaffold(Vec<String>),
}

impl Directive {
    /// Install directive from a space separated package list
    pub fn install(packages: &str) -> Self {
        Directive::Install(packages.to_string())
    }

    /// Scaffold directive from a space separated path list
    pub fn scaffold(paths: &str) -> Self {
        Directive::Scaffold(paths.split_whitespace().map(str::to_string).collect())
    }

    /// Blank directives are skipped, never executed.
    pub fn is_blank(&self) -> bool {
        match self {
            Directive::Empty => true,
            Directive::Install(text) | Directive::PackageScript(text) | Directive::Shell(text) => {
                text.trim().is_empty()
            }
            Directive::Scaffold(paths) => paths.iter().all(|p| p.trim().is_empty()),
        }
    }

    /// Short human readable description used in status lines
    pub fn describe(&self) -> String {
        match self {
            Directive::Empty => "(nothing)".to_string(),
            Directive::Install(packages) => packages.trim().to_string(),
            Directive::PackageScript(script) => format!("script `{}`", script.trim()),
            Directive::Shell(line) => line.trim().to_string(),
            Directive::Scaffold(paths) => paths.join(" "),
        }
    }
}

/// A labelled choice inside a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub directive: Directive,
}

/// A named group of related choices, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub choices: Vec<Choice>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            choices: Vec::new(),
        }
    }

    /// Append a choice. Labels are unique within a category; a repeated label
    /// replaces the earlier directive in place.
    pub fn choice(mut self, label: impl Into<String>, directive: Directive) -> Self {
        let label = label.into();
        if let Some(existing) = self.choices.iter_mut().find(|c| c.label == label) {
            existing.directive = directive;
        } else {
            self.choices.push(Choice { label, directive });
        }
        self
    }

    /// Shorthand for an install choice
    pub fn install(self, label: &str, packages: &str) -> Self {
        self.choice(label, Directive::install(packages))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn directive(&self, label: &str) -> Option<&Directive> {
        self.choices
            .iter()
            .find(|c| c.label == label)
            .map(|c| &c.directive)
    }
}

/// Immutable option catalog for one wizard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Prompted feature categories, in prompt order
    pub categories: Vec<Category>,
    /// Project layout created unconditionally after installs
    pub scaffold: Category,
    /// Extra actions offered at the end of the run
    pub extras: Category,
}

impl Catalog {
    pub fn for_kind(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Full => Self::full(),
            CatalogKind::Compact => Self::compact(),
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Scaffold directives in catalog order, blank entries removed
    pub fn scaffold_directives(&self) -> Vec<Directive> {
        self.scaffold
            .choices
            .iter()
            .filter(|c| !c.directive.is_blank())
            .map(|c| c.directive.clone())
            .collect()
    }

    /// Multi-category catalog
    pub fn full() -> Self {
        let categories = vec![
            Category::new("Styling")
                .install("TailwindCSS", "tailwindcss postcss autoprefixer")
                .install("Bootstrap", "bootstrap")
                .install("Styled Components", "styled-components")
                .install("Emotion", "@emotion/react @emotion/styled")
                .install("Sass", "sass")
                .install("Less", "less")
                .install("Material UI", "@mui/material @emotion/react @emotion/styled")
                .install("Chakra UI", "@chakra-ui/react @emotion/react @emotion/styled"),
            Category::new("State")
                .install("Redux", "@reduxjs/toolkit react-redux")
                .install("Zustand", "zustand")
                .install("Jotai", "jotai")
                .install("Recoil", "recoil")
                .install("MobX", "mobx mobx-react-lite"),
            Category::new("Routing")
                .install("React Router", "react-router-dom")
                .install("Vue Router", "vue-router")
                .install("Svelte Navigator", "svelte-navigator"),
            Category::new("Utilities")
                .install("Lodash", "lodash")
                .install("Dayjs", "dayjs")
                .install("Axios", "axios")
                .install("React Query", "@tanstack/react-query"),
            Category::new("Testing")
                .install("Jest", "jest @types/jest ts-jest")
                .install("Vitest", "vitest")
                .install("Cypress", "cypress")
                .install(
                    "React Testing Library",
                    "@testing-library/react @testing-library/jest-dom",
                ),
            Category::new("Linting")
                .install("ESLint", "eslint")
                .install("Prettier", "prettier eslint-config-prettier eslint-plugin-prettier")
                .install("StandardJS", "standard"),
            Category::new("Components")
                .install("Material UI", "@mui/material @emotion/react @emotion/styled")
                .install("Mantine", "@mantine/core @mantine/hooks")
                // Shadcn is set up with its own CLI, not a package install
                .choice("Shadcn UI", Directive::Empty)
                .install("Ant Design", "antd")
                .install("Radix UI", "@radix-ui/react-accordion @radix-ui/react-dialog"),
            Category::new("Env")
                .install("Dotenv", "dotenv")
                .choice("EnvSetup", Directive::Empty)
                .choice("Theme / Dark Mode", Directive::Empty),
            Category::new("DevTools")
                .install("React Icons", "react-icons")
                .install("Form Handling", "react-hook-form formik")
                .install("State DevTools", "redux-devtools-extension"),
        ];

        Self {
            categories,
            scaffold: default_scaffold(),
            extras: default_extras(),
        }
    }

    /// Single-category catalog
    pub fn compact() -> Self {
        let categories = vec![
            Category::new("Packages")
                .install("TailwindCSS", "tailwindcss @tailwindcss/vite")
                .install("Bootstrap", "bootstrap")
                .install("Redux", "@reduxjs/toolkit react-redux")
                .install("Zustand", "zustand")
                .install("React Router", "react-router-dom")
                .install("Axios", "axios")
                .install("ESLint", "eslint")
                .install("Prettier", "prettier"),
        ];

        Self {
            categories,
            scaffold: default_scaffold(),
            extras: default_extras(),
        }
    }

    /// Checks the invariants a hand-written catalog can break: category names
    /// and labels are unique and scaffold paths stay relative.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = Vec::new();
        for category in self
            .categories
            .iter()
            .chain([&self.scaffold, &self.extras])
        {
            if seen.contains(&category.name.as_str()) {
                return Err(format!("duplicate category '{}'", category.name));
            }
            seen.push(category.name.as_str());

            let labels = category.labels();
            for (i, label) in labels.iter().enumerate() {
                if labels[..i].contains(label) {
                    return Err(format!("duplicate label '{}' in '{}'", label, category.name));
                }
            }
        }

        for choice in &self.scaffold.choices {
            if let Directive::Scaffold(paths) = &choice.directive {
                if let Some(bad) = paths.iter().find(|p| !is_relative_inside(p)) {
                    return Err(format!("scaffold path '{}' escapes the project root", bad));
                }
            }
        }
        Ok(())
    }
}

fn default_scaffold() -> Category {
    Category::new("Scaffold")
        .choice("Components Folder", Directive::scaffold("src/components"))
        .choice("Pages Folder", Directive::scaffold("src/pages"))
        .choice("Hooks Folder", Directive::scaffold("src/hooks"))
        .choice("Utils Folder", Directive::scaffold("src/utils"))
        .choice(
            "Boilerplate Files",
            Directive::scaffold("src/App.tsx src/main.tsx src/index.html"),
        )
        .choice("README / LICENSE", Directive::scaffold("README.md LICENSE"))
        .choice("GitHub Actions", Directive::scaffold(".github/workflows/node.yml"))
}

fn default_extras() -> Category {
    Category::new("Extras")
        .choice("Git Initialization", Directive::Shell("git init".to_string()))
        .choice("Start Dev Server", Directive::PackageScript("dev".to_string()))
}

/// True if `path` is relative and never climbs above its starting directory.
pub(crate) fn is_relative_inside(path: &str) -> bool {
    let mut depth: usize = 0;
    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}
