use std::sync::Arc;

use crate::{
    generate::TextGenerator,
    node::{Node, Outcome},
    nodes::{
        CodeGenerator, InputDetector, InsightExtractor, IntentClassifier, MathSolver, Summarizer,
        TranscriptFetcher,
    },
    store::{InputType, Intent, SharedStore},
    transcript::TranscriptSource,
};

/// Orchestrates the nodes over one shared store.
///
/// Owns one long-lived instance of each node; the transition graph is fixed.
/// Every branch writes a human-readable `final_result` before returning, and
/// any non-success outcome short-circuits the stages behind it.
pub struct Flow {
    input_detector: InputDetector,
    transcript_fetcher: TranscriptFetcher,
    summarizer: Summarizer,
    intent_classifier: IntentClassifier,
    code_generator: CodeGenerator,
    insight_extractor: InsightExtractor,
    math_solver: MathSolver,
}

impl Flow {
    pub fn new(generator: Arc<dyn TextGenerator>, transcripts: Arc<dyn TranscriptSource>) -> Self {
        Self {
            input_detector: InputDetector::new(),
            transcript_fetcher: TranscriptFetcher::new(transcripts),
            summarizer: Summarizer::new(generator.clone()),
            intent_classifier: IntentClassifier::new(generator.clone()),
            code_generator: CodeGenerator::new(generator.clone()),
            insight_extractor: InsightExtractor::new(generator.clone()),
            math_solver: MathSolver::new(generator),
        }
    }

    pub async fn run(&self, store: &mut SharedStore) {
        match self.input_detector.run(store).await {
            Outcome::Detected(InputType::YoutubeUrl) => self.handle_video(store).await,
            Outcome::Detected(InputType::TextPrompt) => self.handle_text(store).await,
            _ => {
                store.final_result = Some("Error: Could not process input.".to_string());
            }
        }
    }

    async fn handle_video(&self, store: &mut SharedStore) {
        if !self.transcript_fetcher.run(store).await.is_success() {
            store.final_result = Some(format!(
                "Failed to fetch YouTube transcript: {}",
                store.error_message()
            ));
            return;
        }

        if !self.summarizer.run(store).await.is_success() {
            store.final_result = Some(format!(
                "YouTube transcript fetched, but summarization failed: {}",
                store.error_message()
            ));
            return;
        }

        if self.insight_extractor.run(store).await.is_success() {
            store.final_result = Some(
                "YouTube transcript fetched, summarized, and insights generated successfully."
                    .to_string(),
            );
        } else {
            store.final_result = Some(format!(
                "YouTube transcript fetched and summarized, but insights generation failed: {}",
                store.error_message()
            ));
        }
    }

    async fn handle_text(&self, store: &mut SharedStore) {
        let classified = self.intent_classifier.run(store).await;
        let Outcome::Classified(intent) = classified else {
            store.final_result = Some(format!(
                "Intent classification failed: {}",
                store.error_message()
            ));
            return;
        };

        match intent {
            Intent::Summarize => self.summarize_text(store).await,
            Intent::CodeGeneration => {
                if self.code_generator.run(store).await.is_success() {
                    store.final_result = Some("Code generated successfully.".to_string());
                } else {
                    store.final_result = Some(format!(
                        "Code generation failed: {}",
                        store.error_message()
                    ));
                }
            }
            Intent::Insights | Intent::GeneralQuery => {
                if self.insight_extractor.run(store).await.is_success() {
                    store.final_result = Some("Insights generated successfully.".to_string());
                } else {
                    store.final_result = Some(format!(
                        "Insights generation failed: {}",
                        store.error_message()
                    ));
                }
            }
            Intent::MathQuery => {
                if self.math_solver.run(store).await.is_success() {
                    store.final_result = Some("Math query solved successfully.".to_string());
                } else {
                    store.final_result =
                        Some(format!("Math query failed: {}", store.error_message()));
                }
            }
            Intent::Unknown | Intent::Error => {
                store.final_result =
                    Some("Unknown intent. Please rephrase your request.".to_string());
            }
        }
    }

    /// Summarize branch of the text path: insights run afterwards as a bonus
    /// stage whose failure is reported but does not void the summary.
    async fn summarize_text(&self, store: &mut SharedStore) {
        if !self.summarizer.run(store).await.is_success() {
            store.final_result = Some(format!(
                "Text prompt summarization failed: {}",
                store.error_message()
            ));
            return;
        }

        let mut result = "Text prompt summarized successfully.".to_string();
        if self.insight_extractor.run(store).await.is_success() {
            result.push_str(" Insights also generated.");
        } else {
            result.push_str(&format!(
                " But insights generation failed: {}",
                store.error_message()
            ));
        }
        store.final_result = Some(result);
    }
}
