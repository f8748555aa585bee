use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A voice offered by the speech engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Stable identifier (the engine's voice URI)
    pub id: String,
    pub name: String,
    /// BCP 47 tag such as `en-US`
    pub lang: String,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// One speech request covering the full text to be spoken
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Tag the engine must echo back on every signal about this utterance
    pub generation: u64,
    pub text: String,
    pub rate: f64,
    pub voice: Option<Voice>,
}

/// Callbacks from the engine, delivered as messages
#[derive(Debug, Clone, PartialEq)]
pub enum EngineSignal {
    Started { generation: u64 },
    Ended { generation: u64 },
    Errored { generation: u64, reason: String },
    VoicesChanged(Vec<Voice>),
}

impl EngineSignal {
    pub fn generation(&self) -> Option<u64> {
        match self {
            EngineSignal::Started { generation }
            | EngineSignal::Ended { generation }
            | EngineSignal::Errored { generation, .. } => Some(*generation),
            EngineSignal::VoicesChanged(_) => None,
        }
    }
}

pub type EngineSignalSender = mpsc::UnboundedSender<EngineSignal>;
pub type EngineSignalReceiver = mpsc::UnboundedReceiver<EngineSignal>;

/// Channel an engine implementation uses to report its callbacks
pub fn signal_channel() -> (EngineSignalSender, EngineSignalReceiver) {
    mpsc::unbounded_channel()
}

/// Port to an external text-to-speech engine.
///
/// Every method is fire-and-forget. Progress is only observable through the
/// `EngineSignal`s the implementation sends, each tagged with the
/// `Utterance::generation` it refers to.
pub trait SpeechEngine: Send {
    /// Queue an utterance for speaking
    fn speak(&mut self, utterance: Utterance);

    fn pause(&mut self);

    fn resume(&mut self);

    /// Drop whatever is queued or speaking
    fn cancel(&mut self);

    /// Voices currently known to the engine; may be empty until the engine
    /// sends `EngineSignal::VoicesChanged`
    fn voices(&self) -> Vec<Voice>;
}
