//! Twitter Media Upload Integration
//!
//! Uploads a binary blob to the Twitter v1.1 `media/upload.json` endpoint and
//! returns the media identifier to reference in later API calls.
//!
//! The client encodes the payload as `multipart/form-data`, appends the
//! `media_category` query parameter and hands the request to an
//! [`HttpTransport`]. Authentication is the transport's job; the bundled
//! [`ReqwestTransport`] accepts an [`AuthProvider`].
//!
//! # Example
//!
//! ```no_run
//! use integrations_twitter_media::prelude::*;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::with_defaults()?
//!     .with_auth(BearerTokenProvider::from_env()?);
//!
//! let uploader = MediaUploader::new(Arc::new(transport));
//! let image = std::fs::read("cat.png")?;
//!
//! let media_id = uploader
//!     .upload(&CancellationToken::new(), image, MediaCategory::TweetImage)
//!     .await?;
//! println!("uploaded as {}", media_id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod multipart;
pub mod transport;
pub mod types;

// Internal modules (not part of public API)
#[cfg(test)]
mod mocks;

pub use auth::{AuthProvider, BearerTokenProvider};
pub use client::{media_upload, MediaUploader};
pub use config::{MediaUploadConfig, MediaUploadConfigBuilder};
pub use errors::{MediaUploadError, MediaUploadResult, TransportError};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{MediaCategory, MediaUploadResponse};

/// Prelude module with commonly used types and traits.
pub mod prelude {
    pub use crate::auth::{AuthProvider, BearerTokenProvider};
    pub use crate::client::{media_upload, MediaUploader};
    pub use crate::config::{MediaUploadConfig, MediaUploadConfigBuilder};
    pub use crate::errors::{MediaUploadError, MediaUploadResult, TransportError};
    pub use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
    pub use crate::types::{MediaCategory, MediaUploadResponse};
}
