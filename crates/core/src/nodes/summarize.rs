use std::sync::Arc;

use crate::{
    generate::{GenerationRequest, TextGenerator},
    node::{Node, Outcome},
    store::SharedStore,
};

static SUMMARIZER_ROLE: &str = "You are a helpful assistant that summarizes text.";

/// Summarizes the fetched transcript, falling back to the processed input
/// when no transcript is available.
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

impl Node for Summarizer {
    fn name(&self) -> &'static str {
        "Summarizer"
    }

    async fn execute(&self, store: &mut SharedStore) -> Outcome {
        let Some(text) = store.text_for_summary().map(str::to_string) else {
            store.set_error("No text available for summarization.");
            return Outcome::Error;
        };

        let prompt = format!(
            "Please summarize the following text concisely and accurately. \
             Focus on the main points and key information. Text:\n\n{}",
            text
        );

        match self
            .generator
            .generate(GenerationRequest {
                system: SUMMARIZER_ROLE,
                prompt,
                max_tokens: 500,
                temperature: 0.7,
            })
            .await
        {
            Ok(summary) => {
                store.summary = Some(summary);
                Outcome::Success
            }
            Err(err) => {
                store.set_error(format!("Summarization failed: {}", err));
                Outcome::SummarizationFailed
            }
        }
    }
}
