use serde::Serialize;

/// What the input detector decided the raw input is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    YoutubeUrl,
    TextPrompt,
    Error,
}

impl InputType {
    pub fn label(&self) -> &'static str {
        match self {
            InputType::YoutubeUrl => "youtube_url",
            InputType::TextPrompt => "text_prompt",
            InputType::Error => "error",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classified intent of a text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Summarize,
    CodeGeneration,
    Insights,
    MathQuery,
    GeneralQuery,
    Unknown,
    Error,
}

impl Intent {
    /// Intents the classifier is allowed to return from the model. Anything
    /// outside this set is coerced to `Unknown`.
    pub const VALID: [Intent; 5] = [
        Intent::Summarize,
        Intent::CodeGeneration,
        Intent::Insights,
        Intent::MathQuery,
        Intent::GeneralQuery,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Intent::Summarize => "summarize",
            Intent::CodeGeneration => "code_generation",
            Intent::Insights => "insights",
            Intent::MathQuery => "math_query",
            Intent::GeneralQuery => "general_query",
            Intent::Unknown => "unknown",
            Intent::Error => "error",
        }
    }

    /// Parse a normalized (trimmed, lowercased) model response into a member
    /// of the closed intent set.
    pub fn from_label(label: &str) -> Option<Intent> {
        Self::VALID.into_iter().find(|i| i.label() == label)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable record shared by every node in a single request.
///
/// Created once per request, populated incrementally, discarded afterwards.
/// Later nodes may overwrite fields written by earlier ones; nothing is ever
/// cleared.
#[derive(Debug, Default, Serialize)]
pub struct SharedStore {
    pub input: String,
    pub input_type: Option<InputType>,
    pub processed_input: Option<String>,
    pub user_intent: Option<Intent>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub insights: Option<String>,
    pub generated_code: Option<String>,
    pub math_solution: Option<String>,
    pub math_solver_reasoning: Option<String>,
    pub final_result: Option<String>,
    pub error: Option<String>,
}

impl SharedStore {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Source text for summarization: the transcript when one was fetched,
    /// otherwise the processed input.
    pub fn text_for_summary(&self) -> Option<&str> {
        non_empty(self.transcript.as_deref()).or_else(|| non_empty(self.processed_input.as_deref()))
    }

    /// Source text for insight extraction: prefer a prior summary, then the
    /// transcript, then the processed input.
    pub fn text_for_insights(&self) -> Option<&str> {
        non_empty(self.summary.as_deref())
            .or_else(|| non_empty(self.transcript.as_deref()))
            .or_else(|| non_empty(self.processed_input.as_deref()))
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// The error message of the most recent failing node, or an empty string.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
