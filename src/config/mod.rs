//! Configuration for the media upload client.

use crate::errors::{ConfigurationError, MediaUploadResult};
use std::time::Duration;
use url::Url;

/// Default upload endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";

/// Default multipart field name for the media part.
pub const DEFAULT_FIELD_NAME: &str = "media";

/// Default file name announced for the media part.
pub const DEFAULT_FILE_NAME: &str = "image.png";

/// Environment variable overriding the upload endpoint.
pub const ENV_UPLOAD_URL: &str = "TWITTER_MEDIA_UPLOAD_URL";

/// Environment variable setting the request timeout in seconds.
pub const ENV_UPLOAD_TIMEOUT_SECS: &str = "TWITTER_MEDIA_UPLOAD_TIMEOUT_SECS";

/// Configuration for [`MediaUploader`](crate::MediaUploader).
#[derive(Debug, Clone)]
pub struct MediaUploadConfig {
    /// Upload endpoint; `media_category` is appended to its query.
    pub upload_url: Url,

    /// Multipart field name of the media part.
    pub field_name: String,

    /// File name of the media part.
    pub file_name: String,

    /// Timeout forwarded to the transport. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl MediaUploadConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> MediaUploadConfigBuilder {
        MediaUploadConfigBuilder::new()
    }

    /// Builds a configuration from environment variables, falling back to defaults.
    pub fn from_env() -> MediaUploadResult<Self> {
        let mut builder = MediaUploadConfigBuilder::new();

        if let Ok(url) = std::env::var(ENV_UPLOAD_URL) {
            builder = builder.upload_url(url);
        }

        if let Ok(secs) = std::env::var(ENV_UPLOAD_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                ConfigurationError::InvalidConfiguration(format!(
                    "{} must be a number of seconds: {}",
                    ENV_UPLOAD_TIMEOUT_SECS, e
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> MediaUploadResult<()> {
        if !matches!(self.upload_url.scheme(), "http" | "https") {
            return Err(ConfigurationError::InvalidUrl(format!(
                "upload URL must use http or https, got {}",
                self.upload_url.scheme()
            ))
            .into());
        }

        if self.field_name.is_empty() {
            return Err(ConfigurationError::InvalidConfiguration(
                "field name must not be empty".to_string(),
            )
            .into());
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigurationError::InvalidConfiguration(
                "timeout must be greater than zero".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for MediaUploadConfig {
    fn default() -> Self {
        Self {
            upload_url: default_upload_url(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            timeout: None,
        }
    }
}

fn default_upload_url() -> Url {
    Url::parse(DEFAULT_UPLOAD_URL).expect("Invalid default upload URL")
}

/// Builder for MediaUploadConfig.
#[derive(Debug, Clone)]
pub struct MediaUploadConfigBuilder {
    upload_url: Option<String>,
    field_name: String,
    file_name: String,
    timeout: Option<Duration>,
}

impl MediaUploadConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            upload_url: None,
            field_name: DEFAULT_FIELD_NAME.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            timeout: None,
        }
    }

    /// Sets the upload endpoint.
    pub fn upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = Some(url.into());
        self
    }

    /// Sets the multipart field name.
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Sets the announced file name.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> MediaUploadResult<MediaUploadConfig> {
        let upload_url = match self.upload_url {
            Some(url) => Url::parse(&url)
                .map_err(|e| ConfigurationError::InvalidUrl(format!("{}: {}", url, e)))?,
            None => default_upload_url(),
        };

        let config = MediaUploadConfig {
            upload_url,
            field_name: self.field_name,
            file_name: self.file_name,
            timeout: self.timeout,
        };

        config.validate()?;

        Ok(config)
    }
}

impl Default for MediaUploadConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
