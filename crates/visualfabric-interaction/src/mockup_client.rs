//! HttpMockupService - `POST /generate_mockup/` adapter.
//!
//! Sends the fabric as a multipart upload and reads the mockup back as raw
//! image bytes.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use visualfabric_core::config::ServiceConfig;
use visualfabric_core::mockup::{MockupImage, MockupRequest, MockupService};
use visualfabric_core::{FabricError, Result};

use crate::http::{GENERATE_MOCKUP_ROUTE, with_proxy_header};

/// Mockup service that uploads to the remote generator.
#[derive(Clone)]
pub struct HttpMockupService {
    client: Client,
    config: ServiceConfig,
}

impl HttpMockupService {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Shares an existing connection pool.
    pub fn with_client(client: Client, config: ServiceConfig) -> Self {
        Self { client, config }
    }

    fn build_form(request: &MockupRequest) -> Result<Form> {
        let part = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|e| {
                FabricError::generation(format!(
                    "Invalid fabric MIME type '{}': {}",
                    request.mime_type, e
                ))
            })?;

        Ok(Form::new()
            .text("prompt_id", request.prompt_id.clone())
            .part("file", part))
    }
}

#[async_trait]
impl MockupService for HttpMockupService {
    async fn generate(&self, request: MockupRequest) -> Result<MockupImage> {
        let url = self.config.endpoint(GENERATE_MOCKUP_ROUTE);
        tracing::debug!(
            "[Mockup] POST {} (prompt_id: {}, file: {}, {} bytes)",
            url,
            request.prompt_id,
            request.file_name,
            request.bytes.len()
        );

        let form = Self::build_form(&request)?;
        let http_request = with_proxy_header(
            self.client
                .post(&url)
                .multipart(form)
                .timeout(self.config.generation_timeout()),
            &self.config,
        );

        let response = http_request
            .send()
            .await
            .map_err(|e| FabricError::generation(format!("Mockup request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FabricError::Generation {
                status: Some(status.as_u16()),
                message: format!("Mockup service returned {}: {}", status, body),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| FabricError::generation(format!("Failed to read mockup body: {}", e)))?;

        let image = MockupImage::from_response(content_type.as_deref(), body.to_vec())?;
        tracing::debug!("[Mockup] Received {} ({} bytes)", image.mime_type, image.len());
        Ok(image)
    }
}
