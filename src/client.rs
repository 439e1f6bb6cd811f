use anyhow::Result;
use reqwest::{Client, Response};

use crate::models::{DownloadRequest, GenerateRequest};

/// HTTP client for the generator server
#[derive(Clone)]
pub struct GeneratorClient {
    base_url: String,
    client: Client,
}

impl GeneratorClient {
    /// No client-level timeout: the submission controller owns the deadline
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn post_generate(&self, request: &GenerateRequest) -> reqwest::Result<Response> {
        self.client
            .post(self.api_url("/generate"))
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
    }

    pub async fn post_download(&self, request: &DownloadRequest) -> reqwest::Result<Response> {
        self.client
            .post(self.api_url("/download"))
            .json(request)
            .send()
            .await
    }
}
