use std::sync::Arc;

use crate::{
    generate::{GenerationRequest, TextGenerator},
    node::{Node, Outcome},
    store::SharedStore,
};

static ANALYST_ROLE: &str = "You are an expert analyst. Provide concise and valuable insights.";

/// Extracts key takeaways from whatever upstream stage succeeded: a prior
/// summary, else the transcript, else the processed input.
pub struct InsightExtractor {
    generator: Arc<dyn TextGenerator>,
}

impl InsightExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

impl Node for InsightExtractor {
    fn name(&self) -> &'static str {
        "InsightExtractor"
    }

    async fn execute(&self, store: &mut SharedStore) -> Outcome {
        let Some(text) = store.text_for_insights().map(str::to_string) else {
            store.set_error("No text available for insights generation.");
            return Outcome::Error;
        };

        let prompt = format!(
            "Extract the most important insights, key takeaways, and actionable points \
             from the following text. Present them as a bulleted list. Text:\n\n{}",
            text
        );

        match self
            .generator
            .generate(GenerationRequest {
                system: ANALYST_ROLE,
                prompt,
                max_tokens: 500,
                temperature: 0.5,
            })
            .await
        {
            Ok(insights) => {
                store.insights = Some(insights);
                Outcome::Success
            }
            Err(err) => {
                store.set_error(format!("Insights generation failed: {}", err));
                Outcome::InsightsFailed
            }
        }
    }
}
