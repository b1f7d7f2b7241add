use regex::Regex;

use crate::{
    node::{Node, Outcome},
    store::{InputType, SharedStore},
};

/// Decides whether the raw input is a YouTube link or a plain text prompt.
///
/// Accepts `watch?v=`, `embed/`, `v/` and bare-id link shapes, with or
/// without scheme and `www.`, tolerating trailing query parameters. The match
/// is anchored at the start of the input only.
pub struct InputDetector {
    video_url: Regex,
}

impl InputDetector {
    pub fn new() -> Self {
        let video_url = Regex::new(
            r"^(?:https?://)?(?:www\.)?(?:youtube\.com|youtu\.be)/(?:watch\?v=|embed/|v/|)([\w-]{11})(?:[?&].*)?",
        )
        .expect("video url pattern compiles");
        Self { video_url }
    }
}

impl Default for InputDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for InputDetector {
    fn name(&self) -> &'static str {
        "InputDetector"
    }

    async fn execute(&self, store: &mut SharedStore) -> Outcome {
        if store.input.is_empty() {
            store.set_error("No input provided.");
            store.input_type = Some(InputType::Error);
            return Outcome::Error;
        }

        match self
            .video_url
            .captures(&store.input)
            .and_then(|caps| caps.get(1))
        {
            Some(video_id) => {
                store.input_type = Some(InputType::YoutubeUrl);
                store.processed_input = Some(video_id.as_str().to_string());
                Outcome::Detected(InputType::YoutubeUrl)
            }
            None => {
                store.input_type = Some(InputType::TextPrompt);
                store.processed_input = Some(store.input.clone());
                Outcome::Detected(InputType::TextPrompt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn detect(input: &str) -> (Outcome, SharedStore) {
        let detector = InputDetector::new();
        let mut store = SharedStore::new(input);
        let outcome = detector.run(&mut store).await;
        (outcome, store)
    }

    #[tokio::test]
    async fn recognizes_short_links() {
        let (outcome, store) = detect("https://youtu.be/dQw4w9WgXcQ").await;
        assert_eq!(outcome, Outcome::Detected(InputType::YoutubeUrl));
        assert_eq!(store.input_type, Some(InputType::YoutubeUrl));
        assert_eq!(store.processed_input.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[tokio::test]
    async fn recognizes_every_accepted_link_shape() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
            "youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ?si=abc123",
            "youtube.com/dQw4w9WgXcQ",
        ];
        for url in urls {
            let (outcome, store) = detect(url).await;
            assert_eq!(outcome, Outcome::Detected(InputType::YoutubeUrl), "{url}");
            assert_eq!(store.processed_input.as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[tokio::test]
    async fn extracted_ids_are_eleven_characters() {
        let (_, store) = detect("https://youtu.be/dQw4w9WgXcQ").await;
        assert_eq!(store.processed_input.as_deref().map(str::len), Some(11));
    }

    #[tokio::test]
    async fn plain_text_passes_through_unchanged() {
        let input = "Summarize the theory of relativity";
        let (outcome, store) = detect(input).await;
        assert_eq!(outcome, Outcome::Detected(InputType::TextPrompt));
        assert_eq!(store.input_type, Some(InputType::TextPrompt));
        assert_eq!(store.processed_input.as_deref(), Some(input));
    }

    #[tokio::test]
    async fn text_mentioning_youtube_mid_sentence_is_not_a_link() {
        let (outcome, _) = detect("what is youtube.com/watch?v=dQw4w9WgXcQ about").await;
        assert_eq!(outcome, Outcome::Detected(InputType::TextPrompt));
    }

    #[tokio::test]
    async fn short_ids_are_not_links() {
        let (outcome, _) = detect("https://youtu.be/short").await;
        assert_eq!(outcome, Outcome::Detected(InputType::TextPrompt));
    }

    #[tokio::test]
    async fn empty_input_is_an_error() {
        let (outcome, store) = detect("").await;
        assert_eq!(outcome, Outcome::Error);
        assert_eq!(store.input_type, Some(InputType::Error));
        assert_eq!(store.error.as_deref(), Some("No input provided."));
        assert_eq!(store.processed_input, None);
    }
}
