//! # Configuration Schema and Parsing
//!
//! This module defines the `config.yaml` file that lists the libraries managed
//! by go-bump, and the [`RunConfig`] value that carries everything a single
//! upgrade run needs. A `RunConfig` is built once by the CLI and handed to the
//! orchestrator; nothing in the library reads process-wide state.
//!
//! ## Format
//!
//! ```yaml
//! default_branch: master
//! libraries:
//!   - git.example.com/org/alpha
//!   - name: git.example.com/org/beta
//!     branch: main
//! ```
//!
//! A library entry is either a bare identifier or a mapping with a `name` and
//! an optional `branch` overriding `default_branch` for that library.
//! `default_branch` itself defaults to `master`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::{self, DEFAULT_TARGET_BRANCH};
use crate::error::{Error, Result};
use crate::library::{Library, LibraryId};

/// Raw shape of `config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Target branch for libraries that do not set their own.
    #[serde(default)]
    pub default_branch: Option<String>,
    /// Managed library identifiers, in processing order.
    pub libraries: Vec<LibraryEntry>,
}

/// A single entry of the `libraries` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LibraryEntry {
    /// `- git.example.com/org/alpha`
    Name(String),
    /// `- name: git.example.com/org/alpha` with optional `branch`
    Detailed(LibraryDetail),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryDetail {
    pub name: String,
    #[serde(default)]
    pub branch: Option<String>,
}

impl LibraryEntry {
    fn name(&self) -> &str {
        match self {
            LibraryEntry::Name(name) => name,
            LibraryEntry::Detailed(detail) => &detail.name,
        }
    }

    fn branch(&self) -> Option<&str> {
        match self {
            LibraryEntry::Name(_) => None,
            LibraryEntry::Detailed(detail) => detail.branch.as_deref(),
        }
    }
}

/// A validated library entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub id: LibraryId,
    /// Per-library target branch override.
    pub branch: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_branch: String,
    pub libraries: Vec<LibraryConfig>,
}

impl Config {
    /// Target branch for a library, honouring its override.
    pub fn target_branch(&self, library: &LibraryConfig) -> String {
        library
            .branch
            .clone()
            .unwrap_or_else(|| self.default_branch.clone())
    }
}

/// Parse configuration from a YAML string.
pub fn parse(yaml_content: &str) -> Result<Config> {
    let file: ConfigFile = serde_yaml::from_str(yaml_content).map_err(|e| {
        let message = e.to_string();
        let hint = if message.contains("unknown field") {
            Some("Only 'default_branch' and 'libraries' are recognized at the top level".to_string())
        } else if message.contains("missing field `libraries`") {
            Some("List managed repositories under 'libraries:'".to_string())
        } else if message.contains("did not match any variant") {
            Some(
                "Each library is either 'host/org/repo' or a mapping with 'name' and 'branch'"
                    .to_string(),
            )
        } else {
            None
        };
        Error::ConfigParse { message, hint }
    })?;

    validate(file)
}

/// Parse configuration from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

fn validate(file: ConfigFile) -> Result<Config> {
    let default_branch = match file.default_branch {
        Some(branch) if branch.trim().is_empty() => {
            return Err(Error::ConfigParse {
                message: "default_branch must not be empty".to_string(),
                hint: None,
            })
        }
        Some(branch) => branch,
        None => DEFAULT_TARGET_BRANCH.to_string(),
    };

    let mut seen = HashSet::new();
    let mut libraries = Vec::with_capacity(file.libraries.len());
    for entry in &file.libraries {
        let id = LibraryId::parse(entry.name())?;
        if !seen.insert(id.clone()) {
            return Err(Error::ConfigParse {
                message: format!("library '{}' is listed more than once", id),
                hint: None,
            });
        }
        if let Some(branch) = entry.branch() {
            if branch.trim().is_empty() {
                return Err(Error::ConfigParse {
                    message: format!("branch for library '{}' must not be empty", id),
                    hint: None,
                });
            }
        }
        libraries.push(LibraryConfig {
            id,
            branch: entry.branch().map(str::to_string),
        });
    }

    Ok(Config {
        default_branch,
        libraries,
    })
}

/// Everything one upgrade run needs, constructed once and passed explicitly.
#[derive(Debug, Clone)]
pub struct RunConfig {
    libraries_dir: PathBuf,
    config: Config,
}

impl RunConfig {
    pub fn new(workdir: impl Into<PathBuf>, config: Config) -> Self {
        let workdir: PathBuf = workdir.into();
        Self {
            libraries_dir: defaults::libraries_dir(&workdir),
            config,
        }
    }

    /// Shared root under which every library workspace lives.
    pub fn libraries_dir(&self) -> &Path {
        &self.libraries_dir
    }

    /// Whether `name` is one of the configured library identifiers.
    pub fn is_managed(&self, name: &str) -> bool {
        self.config
            .libraries
            .iter()
            .any(|library| library.id.to_string() == name)
    }

    /// Resolve every configured library, in configured order.
    pub fn libraries(&self) -> Vec<Library> {
        self.config
            .libraries
            .iter()
            .map(|entry| {
                Library::new(
                    &self.libraries_dir,
                    entry.id.clone(),
                    self.config.target_branch(entry),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_plain_identifiers() {
        let yaml = r#"
libraries:
  - git.example.com/org/alpha
  - git.example.com/org/beta
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.default_branch, "master");
        assert_eq!(config.libraries.len(), 2);
        assert_eq!(config.libraries[0].id.to_string(), "git.example.com/org/alpha");
        assert_eq!(config.libraries[1].branch, None);
    }

    #[test]
    fn test_parse_detailed_entries_and_default_branch() {
        let yaml = r#"
default_branch: develop
libraries:
  - git.example.com/org/alpha
  - name: git.example.com/org/beta
    branch: main
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.default_branch, "develop");
        assert_eq!(config.target_branch(&config.libraries[0]), "develop");
        assert_eq!(config.target_branch(&config.libraries[1]), "main");
    }

    #[test]
    fn test_parse_rejects_unknown_top_level_field() {
        let yaml = r#"
libs:
  - git.example.com/org/alpha
"#;
        let err = parse(yaml).unwrap_err();
        let display = err.to_string();
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_parse_rejects_invalid_identifier() {
        let yaml = r#"
libraries:
  - git.example.com/alpha
"#;
        let err = parse(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidLibrary { .. }));
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let yaml = r#"
libraries:
  - git.example.com/org/alpha
  - name: git.example.com/org/alpha
    branch: main
"#;
        let err = parse(yaml).unwrap_err();
        assert!(err.to_string().contains("listed more than once"));
    }

    #[test]
    fn test_parse_rejects_empty_branch() {
        let yaml = r#"
default_branch: ""
libraries: []
"#;
        assert!(parse(yaml).is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "libraries:\n  - git.example.com/org/alpha\n").unwrap();

        let config = from_file(&path).unwrap();
        assert_eq!(config.libraries.len(), 1);
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = from_file(temp_dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_run_config_resolves_libraries() {
        let config = parse(
            r#"
libraries:
  - git.example.com/org/alpha
  - name: git.example.com/org/beta
    branch: main
"#,
        )
        .unwrap();
        let run = RunConfig::new("/work", config);

        assert_eq!(run.libraries_dir(), Path::new("/work/libraries"));
        assert!(run.is_managed("git.example.com/org/beta"));
        assert!(!run.is_managed("git.example.com/org/gamma"));

        let libraries = run.libraries();
        assert_eq!(libraries.len(), 2);
        assert_eq!(libraries[0].target_branch(), "master");
        assert_eq!(libraries[1].target_branch(), "main");
        assert_eq!(
            libraries[1].workspace(),
            Path::new("/work/libraries/git.example.com/org/beta")
        );
    }
}
