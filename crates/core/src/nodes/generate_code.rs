use std::sync::Arc;

use crate::{
    generate::{GenerationRequest, TextGenerator},
    node::{Node, Outcome},
    store::SharedStore,
};

static PROGRAMMER_ROLE: &str = "You are an expert programmer. Generate clean, functional code.";

/// Generates code for the user's request in the processed input.
pub struct CodeGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl CodeGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

impl Node for CodeGenerator {
    fn name(&self) -> &'static str {
        "CodeGenerator"
    }

    async fn execute(&self, store: &mut SharedStore) -> Outcome {
        let Some(request) = store.processed_input.clone().filter(|r| !r.is_empty()) else {
            store.set_error("No code generation prompt provided.");
            return Outcome::Error;
        };

        let prompt = format!(
            "Generate code based on the following request. \
             Provide only the code block, without any additional explanations or conversational text. \
             If the request is ambiguous, make reasonable assumptions. Request:\n\n{}",
            request
        );

        match self
            .generator
            .generate(GenerationRequest {
                system: PROGRAMMER_ROLE,
                prompt,
                max_tokens: 1000,
                temperature: 0.7,
            })
            .await
        {
            Ok(code) => {
                store.generated_code = Some(code);
                Outcome::Success
            }
            Err(err) => {
                store.set_error(format!("Code generation failed: {}", err));
                Outcome::CodeGenFailed
            }
        }
    }
}
