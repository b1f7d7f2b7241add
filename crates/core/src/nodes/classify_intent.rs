use std::sync::Arc;

use crate::{
    generate::{GenerationRequest, TextGenerator},
    node::{Node, Outcome},
    store::{Intent, SharedStore},
};

static CLASSIFIER_ROLE: &str = "You are an AI assistant that classifies user intent.";

/// Classifies a text prompt into the closed intent set.
///
/// The model response is trimmed and lowercased before validation; anything
/// outside the set is coerced to [`Intent::Unknown`]. The outcome carries the
/// classified intent itself, which is what the flow branches on.
pub struct IntentClassifier {
    generator: Arc<dyn TextGenerator>,
}

impl IntentClassifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

impl Node for IntentClassifier {
    fn name(&self) -> &'static str {
        "IntentClassifier"
    }

    async fn execute(&self, store: &mut SharedStore) -> Outcome {
        let Some(user_prompt) = store.processed_input.clone().filter(|p| !p.is_empty()) else {
            store.set_error("No input text to classify.");
            store.user_intent = Some(Intent::Error);
            return Outcome::Error;
        };

        let categories = Intent::VALID
            .iter()
            .map(|intent| intent.label())
            .collect::<Vec<_>>()
            .join(", ");
        let prompt = format!(
            "Classify the following user prompt into one of these categories: {}. \
             Respond ONLY with the category name. If it doesn't fit, reply 'unknown'.\n\n\
             User Prompt: {}",
            categories, user_prompt
        );

        match self
            .generator
            .generate(GenerationRequest {
                system: CLASSIFIER_ROLE,
                prompt,
                max_tokens: 10,
                temperature: 0.0,
            })
            .await
        {
            Ok(response) => {
                let normalized = response.trim().to_lowercase();
                let intent = Intent::from_label(&normalized).unwrap_or(Intent::Unknown);
                store.user_intent = Some(intent);
                Outcome::Classified(intent)
            }
            Err(err) => {
                store.set_error(format!("Intent classification failed: {}", err));
                store.user_intent = Some(Intent::Error);
                Outcome::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::ScriptedGenerator;

    fn store_for(prompt: &str) -> SharedStore {
        let mut store = SharedStore::new(prompt);
        store.processed_input = Some(prompt.to_string());
        store
    }

    #[tokio::test]
    async fn classified_intent_is_the_outcome() {
        let generator = Arc::new(ScriptedGenerator::replying(["math_query"]));
        let node = IntentClassifier::new(generator);
        let mut store = store_for("Solve the integral of x^2");

        let outcome = node.run(&mut store).await;
        assert_eq!(outcome, Outcome::Classified(Intent::MathQuery));
        assert_eq!(store.user_intent, Some(Intent::MathQuery));
    }

    #[tokio::test]
    async fn responses_are_trimmed_and_case_folded() {
        let generator = Arc::new(ScriptedGenerator::replying(["  Summarize \n"]));
        let node = IntentClassifier::new(generator);
        let mut store = store_for("Summarize the theory of relativity");

        let outcome = node.run(&mut store).await;
        assert_eq!(outcome, Outcome::Classified(Intent::Summarize));
    }

    #[tokio::test]
    async fn out_of_set_responses_coerce_to_unknown() {
        let generator = Arc::new(ScriptedGenerator::replying(["banana"]));
        let node = IntentClassifier::new(generator);
        let mut store = store_for("gibberish");

        let outcome = node.run(&mut store).await;
        assert_eq!(outcome, Outcome::Classified(Intent::Unknown));
        assert_eq!(store.user_intent, Some(Intent::Unknown));
        assert!(!outcome.is_success());
        assert_eq!(store.error, None);
    }

    #[tokio::test]
    async fn classification_uses_tight_generation_bounds() {
        let generator = Arc::new(ScriptedGenerator::replying(["insights"]));
        let node = IntentClassifier::new(generator.clone());
        let mut store = store_for("what are the takeaways here");

        node.run(&mut store).await;
        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 10);
        assert_eq!(requests[0].temperature, 0.0);
        assert!(requests[0].prompt.contains("math_query"));
    }

    #[tokio::test]
    async fn missing_prompt_fails_before_any_call() {
        let generator = Arc::new(ScriptedGenerator::replying(["summarize"]));
        let node = IntentClassifier::new(generator.clone());
        let mut store = SharedStore::new("");

        let outcome = node.run(&mut store).await;
        assert_eq!(outcome, Outcome::Error);
        assert_eq!(store.user_intent, Some(Intent::Error));
        assert_eq!(store.error.as_deref(), Some("No input text to classify."));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn generator_failure_sets_error_intent() {
        let generator = Arc::new(ScriptedGenerator::failing("quota exceeded"));
        let node = IntentClassifier::new(generator);
        let mut store = store_for("anything");

        let outcome = node.run(&mut store).await;
        assert_eq!(outcome, Outcome::Error);
        assert_eq!(store.user_intent, Some(Intent::Error));
        assert!(store.error_message().starts_with("Intent classification failed:"));
    }
}
