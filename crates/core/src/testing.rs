//! Scripted collaborator fakes shared by node and flow tests.

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    error::{KonspektError, Result},
    generate::{GenerationRequest, TextGenerator},
    transcript::{Segment, TranscriptSource},
};

/// Text generator that replays a scripted queue of responses.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn replying(responses: impl IntoIterator<Item = &'static str>) -> Self {
        let generator = Self::default();
        for response in responses {
            generator.push_ok(response);
        }
        generator
    }

    pub fn failing(reason: &str) -> Self {
        let generator = Self::default();
        generator.push_err(reason);
        generator
    }

    pub fn push_ok(&self, response: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
    }

    pub fn push_err(&self, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(KonspektError::InvalidResponse {
                reason: reason.to_string(),
            }));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(KonspektError::InvalidResponse {
                    reason: "no scripted response left".to_string(),
                })
            })
    }
}

/// Transcript source that returns fixed segments or a single scripted error.
#[derive(Default)]
pub struct ScriptedTranscripts {
    segments: Vec<Segment>,
    error: Mutex<Option<KonspektError>>,
    calls: AtomicUsize,
}

impl ScriptedTranscripts {
    pub fn with_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    pub fn failing(error: KonspektError) -> Self {
        Self {
            error: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptSource for ScriptedTranscripts {
    async fn fetch(&self, _video_id: &str) -> Result<Vec<Segment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.segments.clone())
    }
}
