use std::sync::Arc;

use crate::{
    error::KonspektError,
    node::{Node, Outcome},
    store::SharedStore,
    transcript::TranscriptSource,
};

/// Fetches the caption transcript for the detected video id and flattens it
/// into a single space-joined string.
pub struct TranscriptFetcher {
    source: Arc<dyn TranscriptSource>,
}

impl TranscriptFetcher {
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }
}

impl Node for TranscriptFetcher {
    fn name(&self) -> &'static str {
        "TranscriptFetcher"
    }

    async fn execute(&self, store: &mut SharedStore) -> Outcome {
        let Some(video_id) = store.processed_input.clone().filter(|id| !id.is_empty()) else {
            store.set_error("No YouTube video ID provided.");
            return Outcome::Error;
        };

        match self.source.fetch(&video_id).await {
            Ok(segments) => {
                let full_transcript = segments
                    .iter()
                    .map(|segment| segment.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                store.transcript = Some(full_transcript);
                Outcome::Success
            }
            Err(KonspektError::NoTranscript { video_id }) => {
                store.set_error(format!("No transcript found for video ID: {}.", video_id));
                Outcome::NoTranscriptFound
            }
            Err(KonspektError::TranscriptsDisabled { video_id }) => {
                store.set_error(format!(
                    "Transcripts are disabled for video ID: {}.",
                    video_id
                ));
                Outcome::TranscriptsDisabled
            }
            Err(err) => {
                store.set_error(format!("Failed to fetch transcript: {}", err));
                Outcome::FetchFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{store::InputType, testing::ScriptedTranscripts, transcript::Segment};

    fn store_for(video_id: &str) -> SharedStore {
        let mut store = SharedStore::new(format!("https://youtu.be/{video_id}"));
        store.input_type = Some(InputType::YoutubeUrl);
        store.processed_input = Some(video_id.to_string());
        store
    }

    #[tokio::test]
    async fn segments_are_joined_with_single_spaces() {
        let source = Arc::new(ScriptedTranscripts::with_segments(vec![
            Segment { start: 0.0, end: 1.5, text: "never gonna".into() },
            Segment { start: 1.5, end: 2.4, text: "give you up".into() },
        ]));
        let node = TranscriptFetcher::new(source);
        let mut store = store_for("dQw4w9WgXcQ");

        let outcome = node.run(&mut store).await;
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(store.transcript.as_deref(), Some("never gonna give you up"));
        assert_eq!(store.error, None);
    }

    #[tokio::test]
    async fn failure_modes_map_to_distinct_outcomes() {
        let cases = [
            (
                KonspektError::NoTranscript { video_id: "dQw4w9WgXcQ".into() },
                Outcome::NoTranscriptFound,
                "No transcript found for video ID: dQw4w9WgXcQ.",
            ),
            (
                KonspektError::TranscriptsDisabled { video_id: "dQw4w9WgXcQ".into() },
                Outcome::TranscriptsDisabled,
                "Transcripts are disabled for video ID: dQw4w9WgXcQ.",
            ),
            (
                KonspektError::TranscriptFetchFailed {
                    video_id: "dQw4w9WgXcQ".into(),
                    reason: "timed out".into(),
                },
                Outcome::FetchFailed,
                "Failed to fetch transcript: Failed to fetch transcript for dQw4w9WgXcQ: timed out",
            ),
        ];

        for (error, expected_outcome, expected_message) in cases {
            let node = TranscriptFetcher::new(Arc::new(ScriptedTranscripts::failing(error)));
            let mut store = store_for("dQw4w9WgXcQ");
            let outcome = node.run(&mut store).await;
            assert_eq!(outcome, expected_outcome);
            assert_eq!(store.error.as_deref(), Some(expected_message));
            assert!(store.error_message().contains("dQw4w9WgXcQ"));
        }
    }

    #[tokio::test]
    async fn missing_video_id_fails_before_any_fetch() {
        let source = Arc::new(ScriptedTranscripts::with_segments(Vec::new()));
        let node = TranscriptFetcher::new(source.clone());
        let mut store = SharedStore::new("");

        let outcome = node.run(&mut store).await;
        assert_eq!(outcome, Outcome::Error);
        assert_eq!(store.error.as_deref(), Some("No YouTube video ID provided."));
        assert_eq!(source.calls(), 0);
    }
}
