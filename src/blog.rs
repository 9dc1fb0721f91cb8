use crate::Result;
use crate::summarize::{Generator, summarize};

/// Wrap a summary in the fixed four-section blog template
pub fn compose(summary: &str) -> String {
    format!(
        "## Introduction
Start with an engaging introduction that hooks the reader, providing a brief overview of the video's topic and why it's worth reading about.

## Key Takeaways
- Highlight the most impactful points or insights from the video.
- Offer quick, bullet-point summaries for readers who want the essence of the video's content.

## Main Content
{summary}

## Conclusion
Wrap up the blog post by summarizing the key points discussed, reflecting on their importance, and possibly suggesting further reading or action based on the video's content.
"
    )
}

/// Summarize the transcript and lay the result out as a blog post.
/// Errors come straight from [`summarize`].
pub async fn convert_to_blog<G: Generator>(
    generator: &G,
    transcript: &str,
    prompt: &str,
    max_input_chars: usize,
) -> Result<String> {
    let summary = summarize(generator, transcript, prompt, max_input_chars).await?;
    Ok(compose(&summary))
}

/// Template headings, in order. The summary lands under `Main Content`.
pub const SECTIONS: [&str; 4] = ["Introduction", "Key Takeaways", "Main Content", "Conclusion"];

const SUMMARY_SECTION: usize = 2;

/// Body of one of the template's sections, exactly as composed.
///
/// Only the template's own headings delimit sections, so a summary carrying
/// `## ` lines of its own comes back whole.
pub fn section<'a>(post: &'a str, heading: &str) -> Option<&'a str> {
    let index = SECTIONS.iter().position(|h| *h == heading)?;

    // Headings up to Main Content precede the summary; later ones follow it
    let locate = |i: usize, marker: &str| {
        if i <= SUMMARY_SECTION {
            post.find(marker)
        } else {
            post.rfind(marker)
        }
    };

    let marker = format!("## {heading}\n");
    let start = locate(index, &marker)? + marker.len();

    let end = match SECTIONS.get(index + 1) {
        Some(next) => {
            let next_marker = format!("\n\n## {next}\n");
            let end = locate(index + 1, &next_marker)?;
            if end < start {
                return None;
            }
            end
        }
        None => post.len() - usize::from(post.ends_with('\n')),
    };
    Some(&post[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_has_all_sections() {
        let post = compose("Short summary.");
        for heading in ["Introduction", "Key Takeaways", "Main Content", "Conclusion"] {
            assert!(post.contains(&format!("## {heading}\n")), "missing {heading}");
        }
    }

    #[test]
    fn test_main_content_is_summary_verbatim() {
        let summary = "- point one\n- point two";
        let post = compose(summary);
        assert_eq!(section(&post, "Main Content"), Some(summary));
    }

    #[test]
    fn test_section_order() {
        let post = compose("x");
        let pos = |h: &str| post.find(&format!("## {h}")).unwrap();
        assert!(pos("Introduction") < pos("Key Takeaways"));
        assert!(pos("Key Takeaways") < pos("Main Content"));
        assert!(pos("Main Content") < pos("Conclusion"));
    }

    #[test]
    fn test_main_content_keeps_embedded_headings() {
        let summary = "Overview line\n\n## Key Points\n- a\n- b\n\n## Conclusion\nModel's own wrap-up";
        let post = compose(summary);
        assert_eq!(section(&post, "Main Content"), Some(summary));
        assert!(section(&post, "Conclusion").unwrap().starts_with("Wrap up the blog post"));
        assert!(section(&post, "Key Takeaways").unwrap().starts_with("- Highlight"));
    }

    #[test]
    fn test_main_content_keeps_trailing_newline() {
        let post = compose("Short summary.\n");
        assert_eq!(section(&post, "Main Content"), Some("Short summary.\n"));
    }

    #[test]
    fn test_compose_is_exact() {
        let post = compose("S");
        let main = post.find("## Main Content\nS\n\n## Conclusion\n");
        assert!(main.is_some());
    }

    #[test]
    fn test_unknown_heading() {
        assert_eq!(section(&compose("x"), "Details"), None);
    }

    #[test]
    fn test_section_missing() {
        assert_eq!(section("## Other\ntext\n", "Main Content"), None);
    }
}
