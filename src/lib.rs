pub mod blog;
pub mod config;
pub mod error;
pub mod output;
pub mod summarize;
pub mod youtube;

use serde::Serialize;

pub use error::{Error, GenerationFailure, Result, TranscriptFailure};

const THUMBNAIL_HOST: &str = "img.youtube.com";

/// A single captioned segment
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Identifier of a YouTube video, as found after `v=` in a watch URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Thumbnail image for this video. Not validated; a bad ID gives a broken image.
    pub fn thumbnail_url(&self) -> String {
        format!("http://{THUMBNAIL_HOST}/vi/{}/0.jpg", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video ID from a watch URL: everything after the first `v=` up to the next `&`
pub fn extract_video_id(url: &str) -> Result<VideoId> {
    let url = url.trim();
    let (_, rest) = url.split_once("v=").ok_or_else(|| Error::MalformedUrl {
        url: url.to_string(),
    })?;
    let id = rest.split('&').next().unwrap_or_default();
    Ok(VideoId(id.to_string()))
}
