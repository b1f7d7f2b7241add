use crate::store::{InputType, Intent, SharedStore};

/// What a node reports back to the flow after running.
///
/// Any variant other than `Success` (and the successful `Detected` /
/// `Classified` payloads) is a failure for sequencing purposes; the specific
/// variant is kept so the flow and the user can tell failure modes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
    NoTranscriptFound,
    TranscriptsDisabled,
    FetchFailed,
    SummarizationFailed,
    InsightsFailed,
    CodeGenFailed,
    MathSolverFailed,
    Detected(InputType),
    Classified(Intent),
}

impl Outcome {
    /// Stable diagnostic label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Error => "error",
            Outcome::NoTranscriptFound => "no_transcript_found",
            Outcome::TranscriptsDisabled => "transcripts_disabled",
            Outcome::FetchFailed => "fetch_failed",
            Outcome::SummarizationFailed => "summarization_failed",
            Outcome::InsightsFailed => "insights_failed",
            Outcome::CodeGenFailed => "code_gen_failed",
            Outcome::MathSolverFailed => "math_solver_failed",
            Outcome::Detected(input_type) => input_type.label(),
            Outcome::Classified(intent) => intent.label(),
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Success => true,
            Outcome::Detected(input_type) => *input_type != InputType::Error,
            Outcome::Classified(intent) => !matches!(intent, Intent::Unknown | Intent::Error),
            _ => false,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A unit of work in the flow.
///
/// Nodes hold only long-lived configuration (collaborator handles, compiled
/// patterns); all per-request state lives in the [`SharedStore`]. `execute`
/// must not panic and must not propagate errors: every failure path writes a
/// message into `store.error` and returns a non-success [`Outcome`]. Running
/// a node twice against the same store overwrites its outputs rather than
/// appending.
pub trait Node: Send + Sync {
    fn name(&self) -> &'static str;

    async fn preprocess(&self, _store: &mut SharedStore) {}

    async fn execute(&self, store: &mut SharedStore) -> Outcome;

    async fn postprocess(&self, _store: &mut SharedStore) {}

    /// Drives the three lifecycle phases in order.
    async fn run(&self, store: &mut SharedStore) -> Outcome {
        self.preprocess(store).await;
        let outcome = self.execute(store).await;
        self.postprocess(store).await;
        outcome
    }
}
