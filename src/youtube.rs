use std::future::Future;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::{Error, Result, Segment, TranscriptFailure, VideoId};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#).expect("valid API key pattern"));

static API_KEY_FALLBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#).expect("valid API key pattern"));

/// Anything that can produce the ordered caption segments of a video
pub trait CaptionSource {
    fn fetch_segments(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = std::result::Result<Vec<Segment>, TranscriptFailure>>;
}

/// Fetch a video's captions and flatten them into one space-joined string.
///
/// Every failure, including a track with no text in it, is reported as
/// [`Error::TranscriptUnavailable`]; nothing is retried.
pub async fn fetch_transcript<S: CaptionSource>(source: &S, video_id: &VideoId) -> Result<String> {
    let unavailable = |cause| Error::TranscriptUnavailable {
        video_id: video_id.to_string(),
        cause,
    };

    let segments = source.fetch_segments(video_id).await.map_err(unavailable)?;
    if segments.is_empty() {
        return Err(unavailable(TranscriptFailure::NoCaptions));
    }

    debug!("Fetched {} caption segments for {video_id}", segments.len());
    Ok(join_segments(&segments))
}

fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Deserialize)]
struct InnerTubePlayerResponse {
    captions: Option<CaptionsData>,
}

#[derive(Debug, Deserialize)]
struct CaptionsData {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
}

/// Caption source backed by YouTube's InnerTube player API
pub struct InnerTube {
    client: reqwest::Client,
    lang: String,
}

impl InnerTube {
    pub fn new(client: reqwest::Client, lang: impl Into<String>) -> Self {
        Self {
            client,
            lang: lang.into(),
        }
    }
}

impl CaptionSource for InnerTube {
    async fn fetch_segments(&self, video_id: &VideoId) -> std::result::Result<Vec<Segment>, TranscriptFailure> {
        // Step 1: the watch page carries the InnerTube API key
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        debug!("Fetching watch page: {watch_url}");

        let page_html = self
            .client
            .get(&watch_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let api_key = extract_api_key(&page_html).ok_or(TranscriptFailure::MissingApiKey)?;

        // Step 2: the player endpoint lists the caption tracks
        let player_url = format!("https://www.youtube.com/youtubei/v1/player?key={api_key}&prettyPrint=false");

        let body = serde_json::json!({
            "context": {
                "client": {
                    "hl": self.lang,
                    "gl": "US",
                    "clientName": "WEB",
                    "clientVersion": "2.20241126.01.00"
                }
            },
            "videoId": video_id.as_str()
        });

        let resp: InnerTubePlayerResponse = self
            .client
            .post(&player_url)
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let tracks = resp
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .and_then(|r| r.caption_tracks)
            .unwrap_or_default();

        let track = select_track(&tracks, &self.lang).ok_or(TranscriptFailure::NoCaptions)?;
        debug!("Using caption track: lang={}", track.language_code);

        // Step 3: the track itself is timedtext XML
        let caption_xml = self
            .client
            .get(&track.base_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_caption_xml(&caption_xml)
    }
}

/// Preferred language if present, otherwise whatever track comes first
fn select_track<'a>(tracks: &'a [CaptionTrack], lang: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == lang)
        .or_else(|| tracks.first())
}

fn extract_api_key(html: &str) -> Option<String> {
    API_KEY_RE
        .captures(html)
        .or_else(|| API_KEY_FALLBACK_RE.captures(html))
        .map(|caps| caps[1].to_string())
}

fn parse_caption_xml(xml: &str) -> std::result::Result<Vec<Segment>, TranscriptFailure> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut segments = Vec::new();
    let mut current: Option<(f64, f64)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => {
                let mut start = None;
                let mut dur = None;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value);
                    match attr.key.as_ref() {
                        b"start" => start = value.parse::<f64>().ok(),
                        b"dur" => dur = value.parse::<f64>().ok(),
                        _ => {}
                    }
                }
                // Some tracks omit `dur` on the final cue
                current = start.map(|s| (s, dur.unwrap_or(0.0)));
            }
            Ok(Event::Text(ref e)) => {
                if let Some((start, duration)) = current.take() {
                    let raw_text = e.unescape().unwrap_or_default();
                    let text = html_escape::decode_html_entities(&raw_text).replace('\n', " ");
                    if !text.trim().is_empty() {
                        segments.push(Segment { text, start, duration });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TranscriptFailure::Parse(e.to_string())),
            _ => {}
        }
    }

    Ok(segments)
}
