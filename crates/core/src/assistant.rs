use std::sync::Arc;

use crate::{
    flow::Flow,
    generate::{ChatClient, TextGenerator},
    provider::Provider,
    store::SharedStore,
    transcript::{InnertubeClient, TranscriptSource},
};

/// Entry point: one instance serves many requests, each with a fresh store.
pub struct Assistant {
    flow: Flow,
}

impl Assistant {
    /// Wires the real collaborators for the chosen provider.
    pub fn new(provider: Provider) -> Self {
        Self::with_collaborators(
            Arc::new(ChatClient::new(provider)),
            Arc::new(InnertubeClient::new()),
        )
    }

    pub fn with_collaborators(
        generator: Arc<dyn TextGenerator>,
        transcripts: Arc<dyn TranscriptSource>,
    ) -> Self {
        Self {
            flow: Flow::new(generator, transcripts),
        }
    }

    /// Runs one request through the flow and returns the populated store.
    pub async fn run(&self, input: &str) -> SharedStore {
        let mut store = SharedStore::new(input);
        self.flow.run(&mut store).await;
        store
    }
}
