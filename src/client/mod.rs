//! Media upload client.
//!
//! One call builds a multipart body, sends a single POST through the
//! injected [`HttpTransport`] and decodes the JSON answer. Nothing is retried
//! and nothing is kept between calls.

use crate::config::MediaUploadConfig;
use crate::errors::{MediaUploadError, MediaUploadResult, TransportError};
use crate::multipart::MultipartForm;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::{MediaCategory, MediaUploadResponse};
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Query parameter carrying the media category.
pub const MEDIA_CATEGORY_PARAM: &str = "media_category";

/// Uploads media through a caller-supplied transport.
#[derive(Clone)]
pub struct MediaUploader {
    config: MediaUploadConfig,
    transport: Arc<dyn HttpTransport>,
}

impl MediaUploader {
    /// Creates an uploader with the default configuration.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: MediaUploadConfig::default(),
            transport,
        }
    }

    /// Creates an uploader with a custom configuration.
    pub fn with_config(
        transport: Arc<dyn HttpTransport>,
        config: MediaUploadConfig,
    ) -> MediaUploadResult<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Gets the configuration.
    pub fn config(&self) -> &MediaUploadConfig {
        &self.config
    }

    /// Uploads `payload` and returns the media identifier.
    ///
    /// An identifier missing from an otherwise valid response yields an empty
    /// string; use [`upload_with_response`](Self::upload_with_response) to
    /// inspect the full answer.
    ///
    /// # Errors
    ///
    /// Fails with the stage that broke: encoding, request construction,
    /// transport (including cancellation), API status, or decoding.
    pub async fn upload(
        &self,
        cancel: &CancellationToken,
        payload: impl Into<Bytes>,
        category: MediaCategory,
    ) -> MediaUploadResult<String> {
        let response = self
            .upload_with_response(cancel, payload.into(), category)
            .await?;
        Ok(response.media_id_string)
    }

    /// Uploads `payload` and returns the parsed response.
    #[instrument(skip(self, cancel, payload, category), fields(category = %category, payload_len = payload.len()))]
    pub async fn upload_with_response(
        &self,
        cancel: &CancellationToken,
        payload: Bytes,
        category: MediaCategory,
    ) -> MediaUploadResult<MediaUploadResponse> {
        execute(&self.config, cancel, self.transport.as_ref(), payload, category).await
    }

    /// Builds the upload request without sending it.
    pub fn build_request(
        &self,
        payload: Bytes,
        category: MediaCategory,
    ) -> MediaUploadResult<HttpRequest> {
        build_request(&self.config, payload, category)
    }
}

impl std::fmt::Debug for MediaUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaUploader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Uploads media to the default endpoint and returns its identifier.
///
/// `transport` is responsible for authentication.
pub async fn media_upload(
    cancel: &CancellationToken,
    transport: &dyn HttpTransport,
    media: impl Into<Bytes>,
    category: MediaCategory,
) -> MediaUploadResult<String> {
    let config = MediaUploadConfig::default();
    let response = execute(&config, cancel, transport, media.into(), category).await?;
    Ok(response.media_id_string)
}

async fn execute(
    config: &MediaUploadConfig,
    cancel: &CancellationToken,
    transport: &dyn HttpTransport,
    payload: Bytes,
    category: MediaCategory,
) -> MediaUploadResult<MediaUploadResponse> {
    if cancel.is_cancelled() {
        debug!("Upload cancelled before sending");
        return Err(TransportError::Cancelled.into());
    }

    let request = build_request(config, payload, category)?;

    debug!(
        url = %request.url,
        content_length = request.body.as_ref().map_or(0, |b| b.len()),
        "Sending media upload request"
    );

    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Upload cancelled while waiting for response");
            return Err(TransportError::Cancelled.into());
        }
        result = transport.send(request) => result?,
    };

    parse_response(response)
}

fn build_request(
    config: &MediaUploadConfig,
    payload: Bytes,
    category: MediaCategory,
) -> MediaUploadResult<HttpRequest> {
    let encoded = MultipartForm::new()
        .file_part(&config.field_name, &config.file_name, payload)
        .encode()?;

    if config.upload_url.cannot_be_a_base() {
        return Err(MediaUploadError::request_construction(format!(
            "upload URL {} cannot carry a query",
            config.upload_url
        )));
    }
    let mut url = config.upload_url.clone();
    url.query_pairs_mut()
        .append_pair(MEDIA_CATEGORY_PARAM, category.as_str());

    let content_type = HeaderValue::from_str(&encoded.content_type()).map_err(|e| {
        MediaUploadError::request_construction(format!("invalid content type: {}", e))
    })?;
    let content_length = HeaderValue::from(encoded.content_length());

    Ok(HttpRequest::post(url)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .body(encoded.body)
        .timeout(config.timeout))
}

fn parse_response(response: HttpResponse) -> MediaUploadResult<MediaUploadResponse> {
    if response.is_error() {
        let body = String::from_utf8_lossy(&response.body).into_owned();
        warn!(
            status = %response.status,
            body = %body,
            "Media upload request returned an error"
        );
        return Err(MediaUploadError::Api {
            status: response.status,
            status_text: response.status_text().to_string(),
            body,
        });
    }

    let parsed: MediaUploadResponse =
        serde_json::from_slice(&response.body).map_err(MediaUploadError::Decode)?;

    debug!(media_id = %parsed.media_id_string, "Media uploaded");

    Ok(parsed)
}
