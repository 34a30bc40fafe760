use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use std::path::PathBuf;

use super::paths::config_root;
use crate::{
    application::ModuleManager,
    github::{GitHub, GithubEndpoints, GithubResolver, ListBranches},
    http::HttpClient,
    module::Paths,
    runtime::Runtime,
};

/// User agent sent with every request.
const USER_AGENT: &str = "bespoke-cli";

/// Overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub config_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub github_url: Option<String>,
    pub raw_url: Option<String>,
}

pub struct Config<R: Runtime, G: ListBranches> {
    pub runtime: R,
    pub github: G,
    pub http: HttpClient,
    pub endpoints: GithubEndpoints,
    pub paths: Paths,
}

impl<R: Runtime> Config<R, GitHub> {
    pub fn new(runtime: R, options: ConfigOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication");
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let defaults = GithubEndpoints::default();
        let endpoints = GithubEndpoints {
            api_url: options.api_url.unwrap_or(defaults.api_url),
            web_url: options.github_url.unwrap_or(defaults.web_url),
            raw_url: options.raw_url.unwrap_or(defaults.raw_url),
        };

        let http = HttpClient::new(client);
        let github = GitHub::new(http.clone(), endpoints.api_url.clone());
        let paths = Paths::new(config_root(&runtime, options.config_dir)?);

        Ok(Self {
            runtime,
            github,
            http,
            endpoints,
            paths,
        })
    }
}

impl<R: Runtime, G: ListBranches> Config<R, G> {
    pub fn into_manager(self) -> ModuleManager<R, G> {
        ModuleManager::new(
            self.runtime,
            GithubResolver::new(self.github, self.endpoints),
            self.http,
            self.paths,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockito::{Matcher, Server};
    use std::path::Path;

    fn runtime_with_token(token: Option<&str>) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        let token = token.map(|t| t.to_string());
        runtime
            .expect_env_var()
            .with(mockall::predicate::eq("GITHUB_TOKEN"))
            .returning(move |_| token.clone().ok_or(std::env::VarError::NotPresent));
        runtime
            .expect_config_dir()
            .returning(|| Some(PathBuf::from("/home/user/.config")));
        runtime
    }

    /// Sends one request through the configured client and checks the
    /// Authorization header against `token`.
    async fn verify_authorization_header(token: Option<&str>) {
        let mut server = Server::new_async().await;
        let expected_header = match token {
            Some(t) => Matcher::Exact(format!("Bearer {}", t)),
            None => Matcher::Missing,
        };
        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", expected_header)
            .match_header("User-Agent", USER_AGENT)
            .create_async()
            .await;

        let config = Config::new(runtime_with_token(token), ConfigOptions::default()).unwrap();
        let _ = config.http.inner().get(server.url()).send().await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_config_new_with_github_token() {
        verify_authorization_header(Some("ghp_test_token")).await;
    }

    #[tokio::test]
    async fn test_config_new_without_github_token() {
        verify_authorization_header(None).await;
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new(runtime_with_token(None), ConfigOptions::default()).unwrap();

        assert_eq!(config.endpoints, GithubEndpoints::default());
        assert_eq!(config.github.api_url(), "https://api.github.com");
        assert_eq!(
            config.paths.vault_path(),
            Path::new("/home/user/.config/bespoke/modules/vault.json")
        );
    }

    #[test]
    fn test_config_overrides() {
        let options = ConfigOptions {
            config_dir: Some(PathBuf::from("/tmp/bespoke-test")),
            api_url: Some("http://127.0.0.1:1/api".to_string()),
            github_url: Some("http://127.0.0.1:1/web".to_string()),
            raw_url: Some("http://127.0.0.1:1/raw".to_string()),
        };

        let config = Config::new(runtime_with_token(None), options).unwrap();

        assert_eq!(config.github.api_url(), "http://127.0.0.1:1/api");
        assert_eq!(config.endpoints.web_url, "http://127.0.0.1:1/web");
        assert_eq!(config.endpoints.raw_url, "http://127.0.0.1:1/raw");
        assert_eq!(config.paths.store_root(), Path::new("/tmp/bespoke-test/store"));
    }
}
