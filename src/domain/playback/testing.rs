use super::engine::{SpeechEngine, Utterance, Voice};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Speak(Utterance),
    Pause,
    Resume,
    Cancel,
}

/// Engine double that records every call. Clones share the same log.
#[derive(Clone, Default)]
pub struct FakeEngine {
    calls: Arc<Mutex<Vec<EngineCall>>>,
    voices: Arc<Mutex<Vec<Voice>>>,
}

impl FakeEngine {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            calls: Arc::default(),
            voices: Arc::new(Mutex::new(voices)),
        }
    }

    pub fn with_default_voices() -> Self {
        Self::new(vec![
            Voice::new("urn:voice:fr", "Amelie", "fr-FR"),
            Voice::new("urn:voice:en", "Samantha", "en-US"),
            Voice::new("urn:voice:es", "Monica", "es-ES"),
        ])
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                EngineCall::Speak(utterance) => Some(utterance.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn cancel_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| **call == EngineCall::Cancel)
            .count()
    }
}

impl SpeechEngine for FakeEngine {
    fn speak(&mut self, utterance: Utterance) {
        self.calls.lock().push(EngineCall::Speak(utterance));
    }

    fn pause(&mut self) {
        self.calls.lock().push(EngineCall::Pause);
    }

    fn resume(&mut self) {
        self.calls.lock().push(EngineCall::Resume);
    }

    fn cancel(&mut self) {
        self.calls.lock().push(EngineCall::Cancel);
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.lock().clone()
    }
}
