use log::debug;
use percent_encoding::percent_decode_str;

use super::raw::{GithubPathVersion, RawGithubUrl, VersionedGithubPath, is_commit_sha};
use super::{GithubEndpoints, ListBranches};
use crate::error::ModuleError;

/// Turns raw-content URLs into archive references.
pub struct GithubResolver<G: ListBranches> {
    github: G,
    endpoints: GithubEndpoints,
}

impl<G: ListBranches> GithubResolver<G> {
    pub fn new(github: G, endpoints: GithubEndpoints) -> Self {
        Self { github, endpoints }
    }

    /// Parse a raw-content URL and classify its reference.
    ///
    /// A 40-character hex reference is a commit without any network access.
    /// Otherwise the repository's branches are listed once; a listing failure
    /// is returned as is and never treated as "not a branch".
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, metadata_url: &str) -> Result<VersionedGithubPath, ModuleError> {
        let raw = RawGithubUrl::parse(metadata_url, &self.endpoints.raw_url)?;

        let version = if is_commit_sha(&raw.reference) {
            GithubPathVersion::Commit(raw.reference.clone())
        } else {
            let branches = self.github.list_branches(&raw.owner, &raw.repo).await?;
            if branches.iter().any(|b| *b == raw.reference) {
                GithubPathVersion::Branch(raw.reference.clone())
            } else {
                let tag = percent_decode_str(&raw.reference)
                    .decode_utf8()
                    .map_err(|e| {
                        ModuleError::Parse(format!(
                            "Reference '{}' is not valid percent-encoded UTF-8: {}",
                            raw.reference, e
                        ))
                    })?;
                GithubPathVersion::Tag(tag.into_owned())
            }
        };
        debug!("{}/{} resolved to {}", raw.owner, raw.repo, version);

        Ok(VersionedGithubPath {
            owner: raw.owner,
            repo: raw.repo,
            version,
            path: raw.path,
        })
    }

    pub fn archive_url(&self, path: &VersionedGithubPath) -> String {
        path.archive_url(&self.endpoints.web_url)
    }
}
