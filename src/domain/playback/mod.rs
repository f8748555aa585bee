pub mod document;
pub mod engine;
pub mod error;
pub mod language;
pub mod model;
pub mod plan;
pub mod session;
pub mod state;
pub mod synchronizer;
pub mod voice;

#[cfg(test)]
pub(crate) mod testing;

pub use document::Document;
pub use engine::{
    signal_channel, EngineSignal, EngineSignalReceiver, EngineSignalSender, SpeechEngine,
    Utterance, Voice,
};
pub use error::PlaybackError;
pub use language::{detect_language, LanguageCode};
pub use model::{format_time, SpeechModel, DEFAULT_RATE, DEFAULT_WORDS_PER_MINUTE};
pub use plan::{plan_playback, PlaybackPlan, PlaybackPlanRequest};
pub use session::{PlaybackCommand, PlaybackSession};
pub use state::{PlaybackSnapshot, PlaybackStatus};
pub use synchronizer::PlaybackSynchronizer;
pub use voice::select_default_voice;
