//! Selection Resolver
//!
//! Translates the labels a user picked in each category into the directives
//! to execute.
//!
//! # Design
//!
//! - **Catalog order**: Output follows the order choices are declared in the
//!   catalog, never the order labels were picked
//! - **Lenient input**: Duplicate labels collapse, unknown labels are dropped
//! - **Blank filtering**: Empty directives never reach the execution engine
//! - **Pure logic**: No I/O, no side effects

use crate::catalog::{Catalog, Category, Directive};
use std::collections::{BTreeMap, HashSet};

/// Labels picked per category name for one run.
pub type Selections = BTreeMap<String, Vec<String>>;

/// Resolve the labels selected within one category into ordered directives.
///
/// # What This Explicitly Refuses To Do
///
/// - Fail on labels the category does not define: they are ignored
/// - Deduplicate directives across different labels: two labels mapping to
///   the same packages produce two directives
pub fn resolve<S: AsRef<str>>(category: &Category, selected: &[S]) -> Vec<Directive> {
    let picked: HashSet<&str> = selected.iter().map(|s| s.as_ref()).collect();

    category
        .choices
        .iter()
        .filter(|choice| picked.contains(choice.label.as_str()))
        .filter(|choice| !choice.directive.is_blank())
        .map(|choice| choice.directive.clone())
        .collect()
}

/// Resolve every prompted category of `catalog`, in catalog order.
///
/// Selections for categories the catalog does not have are ignored.
pub fn resolve_all(catalog: &Catalog, selections: &Selections) -> Vec<Directive> {
    catalog
        .categories
        .iter()
        .flat_map(|category| match selections.get(&category.name) {
            Some(labels) => resolve(category, labels.as_slice()),
            None => Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testing_category() -> Category {
        Category::new("Testing")
            .install("Jest", "<cmd1>")
            .install("Vitest", "<cmd2>")
            .choice("Cypress", Directive::install(""))
    }

    #[test]
    fn test_resolve_drops_blank_directive() {
        let directives = resolve(&testing_category(), &["Jest", "Cypress"]);
        assert_eq!(directives, vec![Directive::install("<cmd1>")]);
    }

    #[test]
    fn test_resolve_empty_selection() {
        let none: [&str; 0] = [];
        assert!(resolve(&testing_category(), &none).is_empty());
    }

    #[test]
    fn test_resolve_follows_catalog_order() {
        let directives = resolve(&testing_category(), &["Vitest", "Jest"]);
        assert_eq!(
            directives,
            vec![Directive::install("<cmd1>"), Directive::install("<cmd2>")]
        );
    }

    #[test]
    fn test_resolve_collapses_duplicates() {
        let directives = resolve(&testing_category(), &["Jest", "Jest", "Jest"]);
        assert_eq!(directives.len(), 1);
    }

    #[test]
    fn test_resolve_ignores_unknown_labels() {
        let directives = resolve(&testing_category(), &["Mocha", "Vitest", ""]);
        assert_eq!(directives, vec![Directive::install("<cmd2>")]);
    }

    #[test]
    fn test_resolve_all_uses_catalog_category_order() {
        let catalog = Catalog::full();
        let mut selections = Selections::new();
        selections.insert("Testing".into(), vec!["Vitest".into()]);
        selections.insert("Styling".into(), vec!["Sass".into()]);
        selections.insert("NotACategory".into(), vec!["Sass".into()]);

        let directives = resolve_all(&catalog, &selections);
        assert_eq!(
            directives,
            vec![Directive::install("sass"), Directive::install("vitest")]
        );
    }

    #[test]
    fn test_resolve_all_skips_display_only_choices() {
        let catalog = Catalog::full();
        let mut selections = Selections::new();
        selections.insert(
            "Env".into(),
            vec!["EnvSetup".into(), "Theme / Dark Mode".into(), "Dotenv".into()],
        );
        selections.insert("Components".into(), vec!["Shadcn UI".into()]);

        let directives = resolve_all(&catalog, &selections);
        assert_eq!(directives, vec![Directive::install("dotenv")]);
    }

    #[test]
    fn test_resolve_all_nothing_selected() {
        assert!(resolve_all(&Catalog::full(), &Selections::new()).is_empty());
    }
}
