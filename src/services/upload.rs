use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const TIMEOUT_SECS: u64 = 60;

/// A stored video ready for playback. `duration` (seconds) seeds the seek
/// clamp bound on the playback state.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedVideo {
    pub secure_url: String,
    #[serde(default)]
    pub duration: f64,
}

/// Client for the video storage collaborator: a file goes in, a publicly
/// retrievable URL comes out. Unrelated to interpretation; failures are
/// opaque to the kernel.
pub struct UploadService {
    client: Client,
    endpoint: String,
}

impl UploadService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    pub async fn upload_video(&self, file: Vec<u8>) -> Result<UploadedVideo> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "video/mp4")
            .body(file)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("Upload failed: {}", response.status()));
        }

        Ok(response.json().await?)
    }
}
