//! # Managed Libraries
//!
//! A library is one repository managed by go-bump, named by an identifier of
//! the form `host/organization/repository` which doubles as its Go module
//! path. Everything else about a library is derived from that identifier:
//!
//! - the clone URL, `https://<identifier>`;
//! - the workspace path, `<libraries dir>/<host>/<organization>/<repository>`;
//! - the hosting platform project, `<organization>/<repository>` on `<host>`.
//!
//! Since each segment becomes exactly one path component, two distinct
//! identifiers never share a workspace.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// The canonical `host/organization/repository` identifier of a library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryId {
    host: String,
    organization: String,
    repository: String,
}

impl LibraryId {
    /// Parse an identifier, requiring exactly three non-empty segments.
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidLibrary {
            name: name.to_string(),
            message: message.to_string(),
        };

        let parts: Vec<&str> = name.split('/').collect();
        if parts.len() != 3 {
            return Err(invalid("expected exactly three segments: host/organization/repository"));
        }

        for part in &parts {
            if part.is_empty() {
                return Err(invalid("segments must not be empty"));
            }
            if *part == "." || *part == ".." {
                return Err(invalid("segments must not be '.' or '..'"));
            }
            if part.contains('\\') || part.chars().any(char::is_whitespace) {
                return Err(invalid("segments must not contain whitespace or backslashes"));
            }
        }

        Ok(Self {
            host: parts[0].to_string(),
            organization: parts[1].to_string(),
            repository: parts[2].to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The project path on the hosting platform (`organization/repository`).
    pub fn project_path(&self) -> String {
        format!("{}/{}", self.organization, self.repository)
    }

    /// The URL the repository is cloned from.
    pub fn clone_url(&self) -> String {
        format!("https://{}", self)
    }

    /// Workspace location of this library under `libraries_dir`.
    pub fn workspace_path(&self, libraries_dir: &Path) -> PathBuf {
        libraries_dir
            .join(&self.host)
            .join(&self.organization)
            .join(&self.repository)
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.organization, self.repository)
    }
}

impl FromStr for LibraryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One managed repository, resolved for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    id: LibraryId,
    name: String,
    clone_url: String,
    workspace: PathBuf,
    target_branch: String,
}

impl Library {
    pub fn new(libraries_dir: &Path, id: LibraryId, target_branch: impl Into<String>) -> Self {
        Self {
            name: id.to_string(),
            clone_url: id.clone_url(),
            workspace: id.workspace_path(libraries_dir),
            target_branch: target_branch.into(),
            id,
        }
    }

    pub fn id(&self) -> &LibraryId {
        &self.id
    }

    /// The identifier as a string, also the library's Go module path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clone_url(&self) -> &str {
        &self.clone_url
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Branch the update branch starts from and the merge request targets.
    pub fn target_branch(&self) -> &str {
        &self.target_branch
    }
}
