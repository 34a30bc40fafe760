//! Raw-content URLs and the archive references derived from them.

use std::fmt;

use crate::error::ModuleError;

/// The git reference a raw-content URL was published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GithubPathVersion {
    Commit(String),
    Tag(String),
    Branch(String),
}

impl fmt::Display for GithubPathVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GithubPathVersion::Commit(sha) => write!(f, "commit {}", sha),
            GithubPathVersion::Tag(tag) => write!(f, "tag {}", tag),
            GithubPathVersion::Branch(branch) => write!(f, "branch {}", branch),
        }
    }
}

/// A raw-content URL split into its parts, before the reference is classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGithubUrl {
    pub owner: String,
    pub repo: String,
    /// Reference segment exactly as it appears in the URL (still percent-encoded).
    pub reference: String,
    /// Directory of the referenced file inside the repository; empty at the root.
    pub path: String,
}

impl RawGithubUrl {
    /// Parse `<raw_base>/<owner>/<repo>/<ref>/<path>/<file>`.
    pub fn parse(url: &str, raw_base: &str) -> Result<Self, ModuleError> {
        let malformed = || {
            ModuleError::Parse(format!(
                "URL '{}' is not a raw GitHub URL ({}/<owner>/<repo>/<ref>/<path>)",
                url, raw_base
            ))
        };

        let rest = url
            .strip_prefix(raw_base.trim_end_matches('/'))
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(malformed)?;
        let rest = rest.split(['?', '#']).next().unwrap_or_default();

        let mut parts = rest.splitn(4, '/');
        let owner = parts.next().unwrap_or_default();
        let repo = parts.next().unwrap_or_default();
        let reference = parts.next().unwrap_or_default();
        let file_path = parts.next().unwrap_or_default();

        if owner.is_empty()
            || repo.is_empty()
            || reference.is_empty()
            || file_path.is_empty()
            || file_path.ends_with('/')
        {
            return Err(malformed());
        }

        let path = match file_path.rsplit_once('/') {
            Some((dir, _file)) => dir.trim_end_matches('/').to_string(),
            None => String::new(),
        };

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            reference: reference.to_string(),
            path,
        })
    }
}

/// A raw-content URL with its reference classified; enough to build an archive URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedGithubPath {
    pub owner: String,
    pub repo: String,
    pub version: GithubPathVersion,
    pub path: String,
}

impl VersionedGithubPath {
    /// Source archive URL on the GitHub web host.
    pub fn archive_url(&self, web_base: &str) -> String {
        let base = format!(
            "{}/{}/{}/archive/",
            web_base.trim_end_matches('/'),
            self.owner,
            self.repo
        );
        match &self.version {
            GithubPathVersion::Commit(sha) => format!("{}{}.tar.gz", base, sha),
            GithubPathVersion::Tag(tag) => format!("{}refs/tags/{}.tar.gz", base, tag),
            GithubPathVersion::Branch(branch) => {
                format!("{}refs/heads/{}.tar.gz", base, branch)
            }
        }
    }
}

/// A full commit SHA: exactly 40 hexadecimal characters.
pub fn is_commit_sha(reference: &str) -> bool {
    reference.len() == 40 && reference.chars().all(|c| c.is_ascii_hexdigit())
}
