use std::sync::{Arc, Mutex};

use ytblog::youtube::CaptionSource;
use ytblog::{Segment, TranscriptFailure, VideoId};

#[derive(Clone, Default)]
pub struct MockCaptionSource {
    pub texts: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub not_found: bool,
}

impl MockCaptionSource {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn not_found() -> Self {
        Self {
            not_found: true,
            ..Default::default()
        }
    }
}

impl CaptionSource for MockCaptionSource {
    async fn fetch_segments(&self, video_id: &VideoId) -> Result<Vec<Segment>, TranscriptFailure> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if self.not_found {
            return Err(TranscriptFailure::NoCaptions);
        }
        Ok(self
            .texts
            .iter()
            .enumerate()
            .map(|(i, text)| Segment {
                text: text.clone(),
                start: i as f64,
                duration: 1.0,
            })
            .collect())
    }
}
