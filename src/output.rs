use serde::Serialize;

use crate::VideoId;

/// Which action produced the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Transcript,
    Summary,
    Blog,
}

impl Kind {
    fn heading(&self) -> &str {
        match self {
            Kind::Transcript => "Transcript",
            Kind::Summary => "Detailed Notes",
            Kind::Blog => "Blog Post",
        }
    }
}

/// Result of one action, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct Rendered<'a> {
    pub video_id: &'a VideoId,
    pub thumbnail_url: String,
    pub kind: Kind,
    pub content: &'a str,
}

impl<'a> Rendered<'a> {
    pub fn new(video_id: &'a VideoId, kind: Kind, content: &'a str) -> Self {
        Self {
            video_id,
            thumbnail_url: video_id.thumbnail_url(),
            kind,
            content,
        }
    }
}

/// Render as Markdown: thumbnail, then a heading and the content
pub fn render_markdown(rendered: &Rendered) -> String {
    format!(
        "![Video Thumbnail]({})\n\n## {}:\n{}",
        rendered.thumbnail_url,
        rendered.kind.heading(),
        rendered.content.trim_end()
    )
}

/// Render as a JSON object
pub fn render_json(rendered: &Rendered) -> String {
    serde_json::to_string_pretty(rendered).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_video_id;

    #[test]
    fn test_render_markdown_summary() {
        let id = extract_video_id("https://x/watch?v=ABC123").unwrap();
        let output = render_markdown(&Rendered::new(&id, Kind::Summary, "Short summary.\n"));
        assert_eq!(
            output,
            "![Video Thumbnail](http://img.youtube.com/vi/ABC123/0.jpg)\n\n## Detailed Notes:\nShort summary."
        );
    }

    #[test]
    fn test_render_markdown_blog_heading() {
        let id = extract_video_id("https://x/watch?v=ABC123").unwrap();
        let output = render_markdown(&Rendered::new(&id, Kind::Blog, "## Introduction\n..."));
        assert!(output.contains("## Blog Post:\n## Introduction"));
    }

    #[test]
    fn test_render_json() {
        let id = extract_video_id("https://x/watch?v=ABC123").unwrap();
        let output = render_json(&Rendered::new(&id, Kind::Transcript, "foo bar baz"));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["video_id"], "ABC123");
        assert_eq!(parsed["thumbnail_url"], "http://img.youtube.com/vi/ABC123/0.jpg");
        assert_eq!(parsed["kind"], "transcript");
        assert_eq!(parsed["content"], "foo bar baz");
    }
}
