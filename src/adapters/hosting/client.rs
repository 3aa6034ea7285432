//! Image hosting HTTP client
//!
//! Uploads an image file as a base64 form post and reads back where the image
//! was published.

use crate::config::HostingConfig;
use crate::domain::{Result, ShotportError, TransferError};
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Where an uploaded image was published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedImage {
    /// Identifier assigned by the service
    pub id: String,

    /// Direct link to the image file
    pub link: String,

    /// Link to the service's page showing the image
    pub page_link: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
    #[serde(default)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Client for the image hosting upload API
pub struct HostingClient {
    upload_url: String,
    page_base_url: String,
    client_id: String,
    client: Client,
}

impl HostingClient {
    /// Create a new hosting client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &HostingConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ShotportError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            upload_url: config.upload_url.clone(),
            page_base_url: config.page_base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.expose_secret().as_ref().to_string(),
            client,
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Uploads the image file at `payload`
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Http` if the request fails,
    /// `Rejected` for an error status and `InvalidResponse` for a body that
    /// cannot be understood.
    pub async fn upload(
        &self,
        payload: &Path,
        title: &str,
        name: &str,
    ) -> std::result::Result<HostedImage, TransferError> {
        let bytes = tokio::fs::read(payload).await?;
        let image = general_purpose::STANDARD.encode(&bytes);

        tracing::debug!(
            url = %self.upload_url,
            bytes = bytes.len(),
            name = %name,
            "Uploading image"
        );

        let response = self
            .client
            .post(&self.upload_url)
            .header("Authorization", format!("Client-ID {}", self.client_id))
            .form(&[
                ("image", image.as_str()),
                ("type", "base64"),
                ("title", title),
                ("name", name),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransferError::Rejected {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                }),
            });
        }

        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| TransferError::InvalidResponse(e.to_string()))?;

        if !parsed.success {
            return Err(TransferError::InvalidResponse(
                error_message(&body).unwrap_or_else(|| "Upload was not successful".to_string()),
            ));
        }

        let id = parsed
            .data
            .id
            .ok_or_else(|| TransferError::InvalidResponse("Response has no image id".to_string()))?;
        let link = parsed.data.link.ok_or_else(|| {
            TransferError::InvalidResponse("Response has no image link".to_string())
        })?;

        Ok(HostedImage {
            page_link: format!("{}/{}", self.page_base_url, id),
            id,
            link,
        })
    }
}

/// Extracts `data.error` from an error body
fn error_message(body: &str) -> Option<String> {
    let parsed: UploadResponse = serde_json::from_str(body).ok()?;
    match parsed.data.error? {
        serde_json::Value::String(message) => Some(message),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_variants() {
        assert_eq!(
            error_message(r#"{"data":{"error":"Invalid client"},"success":false}"#),
            Some("Invalid client".to_string())
        );
        assert_eq!(
            error_message(r#"{"data":{"error":{"message":"Too large"}},"success":false}"#),
            Some("Too large".to_string())
        );
        assert_eq!(error_message("<html>"), None);
    }
}
