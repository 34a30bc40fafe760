//! GitHub access: raw-content URL parsing, reference classification and
//! branch listing.

mod client;
mod raw;
mod resolver;

pub use client::{GitHub, ListBranches};
pub use raw::{GithubPathVersion, RawGithubUrl, VersionedGithubPath, is_commit_sha};
pub use resolver::GithubResolver;

#[cfg(test)]
pub use client::MockListBranches;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_WEB_URL: &str = "https://github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

/// Base URLs of the three GitHub hosts involved in an install.
#[derive(Debug, Clone, PartialEq)]
pub struct GithubEndpoints {
    /// REST API, used for branch listing.
    pub api_url: String,
    /// Web host serving source archives.
    pub web_url: String,
    /// Raw-content host that metadata URLs point at.
    pub raw_url: String,
}

impl Default for GithubEndpoints {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            raw_url: DEFAULT_RAW_URL.to_string(),
        }
    }
}
