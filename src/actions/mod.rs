mod clipboard;

pub use clipboard::{Clipboard, SystemClipboard};

#[cfg(test)]
pub use clipboard::tests::MemoryClipboard;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::GeneratorClient;
use crate::error::ClientError;
use crate::models::{DownloadRequest, ErrorBody, GenerationResult, COPIED_LABEL, COPY_LABEL};
use crate::submission::{lock_ui, SharedUi};
use crate::utils::download_filename;

/// How long the "Copied!" acknowledgment stays up
pub const COPY_ACK_DELAY: Duration = Duration::from_secs(2);

const DOWNLOAD_FAILURE: &str = "An error occurred while downloading.";

/// Copy the held configuration to the clipboard.
///
/// Returns `Ok(false)` when there is nothing to copy, including an empty
/// configuration.
pub async fn copy(
    clipboard: &dyn Clipboard,
    result: Option<&GenerationResult>,
    ui: &SharedUi,
    ack_delay: Duration,
) -> Result<bool, ClientError> {
    let Some(result) = result.filter(|r| !r.config.is_empty()) else {
        return Ok(false);
    };

    if let Err(e) = clipboard.write_text(&result.config).await {
        tracing::warn!("Clipboard write failed: {}", e);
        lock_ui(ui).alert = Some(e.to_string());
        return Err(e);
    }

    let seq = {
        let mut state = lock_ui(ui);
        state.copy_label = COPIED_LABEL.to_string();
        state.copy_seq += 1;
        state.copy_seq
    };
    let ui = ui.clone();
    tokio::spawn(async move {
        tokio::time::sleep(ack_delay).await;
        let mut state = lock_ui(&ui);
        if state.copy_seq == seq {
            state.copy_label = COPY_LABEL.to_string();
        }
    });
    Ok(true)
}

/// Ask the server for the downloadable file and save it into `dir`.
///
/// Returns `Ok(None)` without a result, hostname or vendor to download.
pub async fn download(
    client: &GeneratorClient,
    result: Option<&GenerationResult>,
    dir: &Path,
    ui: &SharedUi,
) -> Result<Option<PathBuf>, ClientError> {
    let Some(request) = result.and_then(GenerationResult::download_request) else {
        return Ok(None);
    };

    match fetch_and_save(client, &request, dir).await {
        Ok(path) => {
            tracing::info!("Configuration saved to {}", path.display());
            Ok(Some(path))
        }
        Err(e) => {
            tracing::warn!("Download failed: {}", e);
            lock_ui(ui).show_error(&e);
            Err(e)
        }
    }
}

async fn fetch_and_save(
    client: &GeneratorClient,
    request: &DownloadRequest,
    dir: &Path,
) -> Result<PathBuf, ClientError> {
    let resp = client.post_download(request).await.map_err(|e| {
        ClientError::Download(format!("An error occurred while downloading: {}", e))
    })?;
    let status = resp.status();
    let body = resp.bytes().await.map_err(|e| {
        ClientError::Download(format!("An error occurred while downloading: {}", e))
    })?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DOWNLOAD_FAILURE.to_string());
        return Err(ClientError::Download(message));
    }

    let path = dir.join(download_filename(&request.hostname, &request.vendor));
    let save_error =
        |e: std::io::Error| ClientError::Download(format!("Could not save {}: {}", path.display(), e));
    tokio::fs::create_dir_all(dir).await.map_err(save_error)?;
    tokio::fs::write(&path, &body).await.map_err(save_error)?;
    Ok(path)
}
