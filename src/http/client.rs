//! HTTP client used for metadata, GitHub API and archive requests.
//!
//! Every request is attempted exactly once and the response status is always
//! checked before the body is used.

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::io::Write;

use super::status::{check_status, transport_error};
use crate::error::ModuleError;

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// GET a URL and return its body as text.
    #[tracing::instrument(skip(self))]
    pub async fn get_text(&self, url: &str) -> Result<String, ModuleError> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(e, url))?;
        let response = check_status(response, url)?;

        response.text().await.map_err(|e| transport_error(e, url))
    }

    /// GET a URL with query parameters and deserialize the JSON response.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ModuleError> {
        debug!("GET JSON from {} with query {:?}...", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(e, url))?;
        let response = check_status(response, url)?;

        response
            .json::<T>()
            .await
            .map_err(|e| ModuleError::Network(format!("Unexpected response from {}: {}", url, e)))
    }

    /// Stream a URL's body into the writer produced by `create_writer`.
    ///
    /// The writer is only created once the response status is known to be a
    /// success. Returns the number of bytes written.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<u64, ModuleError>
    where
        W: Write,
        F: FnOnce() -> Result<W, ModuleError>,
    {
        debug!("Downloading {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(e, url))?;
        let mut response = check_status(response, url)?;

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response.chunk().await.map_err(|e| transport_error(e, url))? {
            writer.write_all(&chunk).map_err(|e| {
                ModuleError::Filesystem(format!("Failed to write download of {}: {}", url, e))
            })?;
            downloaded_bytes += chunk.len() as u64;
        }
        writer.flush().map_err(|e| {
            ModuleError::Filesystem(format!("Failed to write download of {}: {}", url, e))
        })?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}
