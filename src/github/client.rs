use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::ModuleError;
use crate::http::HttpClient;

/// GitHub returns at most this many branches per page.
const PER_PAGE: usize = 100;

/// Upper bound on pages fetched for one repository.
const MAX_PAGES: usize = 10;

/// Source of a repository's branch names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListBranches: Send + Sync {
    async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<String>, ModuleError>;
}

/// GitHub REST API client.
pub struct GitHub {
    http: HttpClient,
    api_url: String,
}

impl GitHub {
    pub fn new(http: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[derive(Deserialize, Debug)]
struct Branch {
    name: String,
}

#[async_trait]
impl ListBranches for GitHub {
    #[tracing::instrument(skip(self))]
    async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<String>, ModuleError> {
        let url = format!(
            "{}/repos/{}/{}/branches",
            self.api_url.trim_end_matches('/'),
            owner,
            repo
        );
        let per_page = PER_PAGE.to_string();
        let mut names = Vec::new();

        for page in 1..=MAX_PAGES {
            debug!("Fetching branches page {} from {}...", page, url);
            let page_str = page.to_string();
            let branches: Vec<Branch> = self
                .http
                .get_json_with_query(&url, &[("per_page", &per_page), ("page", &page_str)])
                .await?;

            let len = branches.len();
            names.extend(branches.into_iter().map(|b| b.name));

            if len < PER_PAGE {
                return Ok(names);
            }
        }

        warn!(
            "Stopped listing branches of {}/{} after {} pages ({} branches); later branches are treated as tags",
            owner,
            repo,
            MAX_PAGES,
            names.len()
        );
        Ok(names)
    }
}
