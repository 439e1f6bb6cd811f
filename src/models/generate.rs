use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GenerateRequest is the body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub api_key: String,
    pub vendor: String,
    pub hostname: String,
    pub requirements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_vlan: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
}

impl GenerateRequest {
    pub fn has_requirements(&self) -> bool {
        !self.requirements.is_empty()
    }
}

/// GenerateResponse is the JSON body returned by `POST /api/generate`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// DownloadRequest is the body of `POST /api/download`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub config: String,
    pub hostname: String,
    pub vendor: String,
}

/// Error body shared by both endpoints: `{"success": false, "error": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// GenerationResult is the outcome of one successful round trip.
///
/// It is never mutated; a new submission produces a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub config: String,
    /// Hostname echoed by the server, if any
    pub hostname: Option<String>,
    /// Vendor identifier that was submitted
    pub vendor: String,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Build the download request, if the result carries everything it needs
    pub fn download_request(&self) -> Option<DownloadRequest> {
        let hostname = self.hostname.as_deref().filter(|h| !h.is_empty())?;
        if self.config.is_empty() || self.vendor.is_empty() {
            return None;
        }
        Some(DownloadRequest {
            config: self.config.clone(),
            hostname: hostname.to_string(),
            vendor: self.vendor.clone(),
        })
    }
}
