//! Request and response types for the media upload endpoint.

use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the uploaded media will be used by the platform.
///
/// Sent verbatim as the `media_category` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    /// Image attached to a tweet.
    TweetImage,
    /// Animated GIF attached to a tweet.
    TweetGif,
    /// Video attached to a tweet.
    TweetVideo,
    /// Video for Amplify.
    AmplifyVideo,
}

impl MediaCategory {
    /// All known categories.
    pub const ALL: [MediaCategory; 4] = [
        MediaCategory::TweetImage,
        MediaCategory::TweetGif,
        MediaCategory::TweetVideo,
        MediaCategory::AmplifyVideo,
    ];

    /// Wire representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::TweetImage => "tweet_image",
            MediaCategory::TweetGif => "tweet_gif",
            MediaCategory::TweetVideo => "tweet_video",
            MediaCategory::AmplifyVideo => "amplify_video",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaCategory {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ConfigurationError::InvalidMediaCategory(s.to_string()))
    }
}

/// Response body of a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUploadResponse {
    /// Media identifier as a string. Empty when the platform omitted it.
    #[serde(default)]
    pub media_id_string: String,

    /// Secondary media key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,

    /// Numeric media identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_id: Option<u64>,

    /// Size of the stored media in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Seconds until the uploaded media expires if not attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_after_secs: Option<u64>,
}

impl MediaUploadResponse {
    /// Returns the media identifier, or `None` if the response did not carry one.
    pub fn media_id(&self) -> Option<&str> {
        if self.media_id_string.is_empty() {
            None
        } else {
            Some(&self.media_id_string)
        }
    }
}
