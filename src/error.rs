use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not extract a video ID from {url:?} (expected a `v=` parameter)")]
    MalformedUrl { url: String },

    #[error("failed to fetch transcript for {video_id}")]
    TranscriptUnavailable {
        video_id: String,
        #[source]
        cause: TranscriptFailure,
    },

    #[error("no transcript available to summarize")]
    NoInput,

    #[error("content generation failed")]
    Generation(#[from] GenerationFailure),
}

/// Why a caption track could not be retrieved
#[derive(Error, Debug)]
pub enum TranscriptFailure {
    #[error("no captions available")]
    NoCaptions,

    #[error("could not find InnerTube API key on watch page (video may be private or removed)")]
    MissingApiKey,

    #[error("request failed")]
    Request(#[from] reqwest::Error),

    #[error("malformed caption data: {0}")]
    Parse(String),
}

/// Why the generative API did not return text
#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error("request failed")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_transcript_cause_not_repeated_in_message() {
        let err = Error::TranscriptUnavailable {
            video_id: "abc".to_string(),
            cause: TranscriptFailure::NoCaptions,
        };
        assert_eq!(err.to_string(), "failed to fetch transcript for abc");
        assert_eq!(err.source().unwrap().to_string(), "no captions available");
    }

    #[test]
    fn test_generation_cause_not_repeated_in_message() {
        let err = Error::from(GenerationFailure::Api {
            status: 403,
            body: "quota".to_string(),
        });
        assert_eq!(err.to_string(), "content generation failed");
        assert_eq!(err.source().unwrap().to_string(), "API returned 403: quota");
    }

    #[test]
    fn test_chain_mentions_each_cause_once() {
        let err = Error::from(GenerationFailure::EmptyResponse);
        let report = format!("{:?}", eyre::Report::new(err));
        assert_eq!(report.matches("response contained no text").count(), 1);
    }
}
