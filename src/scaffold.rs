//! Scaffold Writer
//!
//! Creates placeholder files and directories under the project root.
//!
//! A path is treated as a file when its last component contains a dot
//! (`App.tsx`, `node.yml`, `.gitignore`) or is a well-known extensionless file
//! name such as `LICENSE`; anything else is a directory. Dot-directories that
//! projects commonly carry (`.github`, `.vscode`, `.husky`) are named
//! exceptions. Existing files are never touched,
//! so running the writer twice leaves the tree unchanged.
//!
//! There is no rollback: the first I/O error is returned and whatever was
//! created before it stays on disk.

use crate::catalog::is_relative_inside;
use crate::error::{Result, WizardError};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extensionless names that are files, not directories
const KNOWN_FILES: &[&str] = &[
    "LICENSE",
    "Dockerfile",
    "Makefile",
    "Procfile",
    "CODEOWNERS",
];

/// Dot-prefixed names that are directories, not files
const KNOWN_DIRS: &[&str] = &[".github", ".vscode", ".husky"];

/// What a scaffold entry will become on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

impl PathKind {
    pub fn infer(path: &Path) -> Self {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return PathKind::Directory;
        };

        if KNOWN_DIRS.contains(&name) {
            PathKind::Directory
        } else if KNOWN_FILES.contains(&name) || is_dotted_name(name) {
            PathKind::File
        } else {
            PathKind::Directory
        }
    }
}

/// `App.tsx`, `.env`, `.eslintrc.cjs`; not `.` or `..`
fn is_dotted_name(name: &str) -> bool {
    name.contains('.') && name.chars().any(|c| c != '.')
}

/// Writes scaffold entries relative to a project root
#[derive(Debug, Clone)]
pub struct ScaffoldWriter {
    root: PathBuf,
    dry_run: bool,
}

impl ScaffoldWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Report entries instead of creating them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure every path exists under the root.
    ///
    /// All entries are validated before anything is created, so a bad path
    /// never leaves a half-written tree behind. I/O errors during creation are
    /// fatal and stop at the failing entry.
    pub fn ensure_paths<S: AsRef<str>>(&self, paths: &[S]) -> Result<()> {
        let entries: Vec<&str> = paths
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .collect();

        if let Some(bad) = entries.iter().find(|p| !is_relative_inside(p)) {
            return Err(WizardError::validation(format!(
                "scaffold path '{}' must be relative to the project root",
                bad
            )));
        }

        for entry in entries {
            let full_path = self.root.join(entry);
            let kind = PathKind::infer(&full_path);

            if self.dry_run {
                println!("  would create {:?} {}", kind, full_path.display());
                continue;
            }

            match kind {
                PathKind::Directory => ensure_dir(&full_path)?,
                PathKind::File => {
                    if let Some(parent) = full_path.parent() {
                        ensure_dir(parent)?;
                    }
                    ensure_file(&full_path)?;
                }
            }
        }
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    debug!("Creating directory {}", dir.display());
    fs::create_dir_all(dir).map_err(|e| WizardError::scaffold(dir, e))
}

fn ensure_file(file: &Path) -> Result<()> {
    // create_new never truncates an existing file
    match OpenOptions::new().write(true).create_new(true).open(file) {
        Ok(_) => {
            info!("Created {}", file.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("{} already exists, leaving it alone", file.display());
            Ok(())
        }
        Err(e) => Err(WizardError::scaffold(file, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_kind_inference() {
        assert_eq!(PathKind::infer(Path::new("src/App.tsx")), PathKind::File);
        assert_eq!(PathKind::infer(Path::new(".github/workflows/node.yml")), PathKind::File);
        assert_eq!(PathKind::infer(Path::new("LICENSE")), PathKind::File);
        assert_eq!(PathKind::infer(Path::new("src/components")), PathKind::Directory);
        assert_eq!(PathKind::infer(Path::new(".github")), PathKind::Directory);
        assert_eq!(PathKind::infer(Path::new(".vscode")), PathKind::Directory);
    }

    #[test]
    fn test_dotfiles_are_files() {
        assert_eq!(PathKind::infer(Path::new(".gitignore")), PathKind::File);
        assert_eq!(PathKind::infer(Path::new(".env")), PathKind::File);
        assert_eq!(PathKind::infer(Path::new("config/.eslintrc")), PathKind::File);
        assert_eq!(PathKind::infer(Path::new("vite.config.ts")), PathKind::File);
        assert_eq!(PathKind::infer(Path::new("..")), PathKind::Directory);
    }

    #[test]
    fn test_creates_dotfiles_as_empty_files() {
        let tmp = TempDir::new().unwrap();
        let writer = ScaffoldWriter::new(tmp.path());

        writer
            .ensure_paths(&[".gitignore", ".env", "config/.eslintrc", ".github/workflows"])
            .unwrap();

        for file in [".gitignore", ".env", "config/.eslintrc"] {
            let path = tmp.path().join(file);
            assert!(path.is_file(), "{} should be a file", file);
            assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        }
        assert!(tmp.path().join(".github/workflows").is_dir());
    }

    #[test]
    fn test_creates_dirs_and_empty_files() {
        let tmp = TempDir::new().unwrap();
        let writer = ScaffoldWriter::new(tmp.path());

        writer.ensure_paths(&["src/components", "src/App.tsx"]).unwrap();

        assert!(tmp.path().join("src/components").is_dir());
        let app = tmp.path().join("src/App.tsx");
        assert!(app.is_file());
        assert_eq!(fs::metadata(&app).unwrap().len(), 0);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/main.tsx"), "render()").unwrap();

        ScaffoldWriter::new(tmp.path())
            .ensure_paths(&["src/main.tsx"])
            .unwrap();

        let content = fs::read_to_string(tmp.path().join("src/main.tsx")).unwrap();
        assert_eq!(content, "render()");
    }

    #[test]
    fn test_rejects_escaping_path_before_creating_anything() {
        let tmp = TempDir::new().unwrap();
        let writer = ScaffoldWriter::new(tmp.path().join("project"));

        let err = writer.ensure_paths(&["src/hooks", "../evil.txt"]).unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));
        assert!(!tmp.path().join("project").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        ScaffoldWriter::new(tmp.path())
            .with_dry_run(true)
            .ensure_paths(&["src/pages", "README.md"])
            .unwrap();

        assert!(!tmp.path().join("src").exists());
        assert!(!tmp.path().join("README.md").exists());
    }

    #[test]
    fn test_file_where_directory_expected_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("src"), "not a dir").unwrap();

        let err = ScaffoldWriter::new(tmp.path())
            .ensure_paths(&["src/App.tsx"])
            .unwrap_err();
        assert!(matches!(err, WizardError::Scaffold { .. }));
    }

    #[test]
    fn test_blank_entries_are_ignored() {
        let tmp = TempDir::new().unwrap();
        ScaffoldWriter::new(tmp.path())
            .ensure_paths(&["", "   "])
            .unwrap();
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
