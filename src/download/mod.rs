use crate::error::ModuleError;
use crate::http::HttpClient;
use crate::runtime::Runtime;
use log::info;
use std::path::Path;

/// Downloads a URL into `dest` through the runtime.
///
/// `dest` is only created once the server answered with a success status.
#[tracing::instrument(skip(runtime, dest, http_client))]
pub async fn download_file<R: Runtime>(
    runtime: &R,
    url: &str,
    dest: &Path,
    http_client: &HttpClient,
) -> Result<u64, ModuleError> {
    info!("Downloading {}...", url);

    let bytes = http_client
        .download_file(url, || {
            runtime.create_file(dest).map_err(ModuleError::filesystem)
        })
        .await?;

    info!("Download complete.");
    Ok(bytes)
}
