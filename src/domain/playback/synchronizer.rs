use super::document::Document;
use super::engine::{EngineSignal, SpeechEngine, Utterance, Voice};
use super::error::PlaybackError;
use super::language::detect_language;
use super::model::{format_time, SpeechModel};
use super::state::{PlaybackSnapshot, PlaybackStatus};
use super::voice::select_default_voice;
use std::time::Duration;

/// Keeps an estimated "current word" in step with an external speech engine.
///
/// The engine only reports start, end and error for a whole utterance, so
/// the word index between those signals is advanced by a timer at the pace
/// of the words-per-minute model. The engine's end signal is authoritative
/// and always lands the index on the final word.
///
/// Each utterance carries a generation number. Cancelling or superseding an
/// utterance forgets its generation, so a late callback from it is ignored.
/// Invariant: `current_word_index` is a valid index into the document, or 0
/// when the document is empty.
pub struct PlaybackSynchronizer<E: SpeechEngine> {
    engine: E,
    document: Document,
    model: SpeechModel,
    status: PlaybackStatus,
    current_word_index: usize,
    generation: u64,
    active_generation: Option<u64>,
    timer_running: bool,
    timer_epoch: u64,
    voices: Vec<Voice>,
    voice: Option<Voice>,
    voice_pinned: bool,
    last_error: Option<String>,
}

impl<E: SpeechEngine> PlaybackSynchronizer<E> {
    pub fn new(engine: E, base_words_per_minute: f64) -> Result<Self, PlaybackError> {
        let model = SpeechModel::new(base_words_per_minute, super::model::DEFAULT_RATE)?;
        let voices = engine.voices();
        let voice = select_default_voice(&voices, None);

        Ok(Self {
            engine,
            document: Document::default(),
            model,
            status: PlaybackStatus::Idle,
            current_word_index: 0,
            generation: 0,
            active_generation: None,
            timer_running: false,
            timer_epoch: 0,
            voices,
            voice,
            voice_pinned: false,
            last_error: None,
        })
    }

    /// Replace the document. Any utterance in flight is cancelled.
    pub fn load(&mut self, content: &str, title: &str) {
        self.halt();
        self.document = Document::new(title, content);
        self.current_word_index = 0;
        self.status = PlaybackStatus::Idle;
        self.last_error = None;

        if !self.voice_pinned {
            self.voice = select_default_voice(&self.voices, detect_language(content));
        }

        tracing::debug!(
            title = %self.document.title(),
            word_count = self.document.word_count(),
            estimated_duration_secs = self.estimated_duration(),
            "Document loaded"
        );
    }

    pub fn play(&mut self) -> Result<(), PlaybackError> {
        match self.status {
            PlaybackStatus::Paused => {
                self.engine.resume();
                self.status = PlaybackStatus::Playing;
                self.start_timer();
                Ok(())
            }
            PlaybackStatus::Loading | PlaybackStatus::Playing => {
                Err(self.rejected("play"))
            }
            PlaybackStatus::Idle | PlaybackStatus::Ended | PlaybackStatus::Errored => {
                if self.document.is_empty() {
                    return Err(PlaybackError::EmptyDocument);
                }

                // A fresh utterance always supersedes whatever the engine holds
                self.active_generation = None;
                self.engine.cancel();
                self.stop_timer();

                self.generation += 1;
                self.active_generation = Some(self.generation);
                self.last_error = None;
                self.status = PlaybackStatus::Loading;

                self.engine.speak(Utterance {
                    generation: self.generation,
                    text: self.document.content().to_string(),
                    rate: self.model.rate(),
                    voice: self.voice.clone(),
                });

                tracing::debug!(generation = self.generation, "Utterance queued");
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.status != PlaybackStatus::Playing {
            return Err(self.rejected("pause"));
        }
        self.engine.pause();
        self.stop_timer();
        self.status = PlaybackStatus::Paused;
        Ok(())
    }

    /// Cancel playback and rewind to the first word
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        if !self.status.is_engaged() {
            return Err(self.rejected("stop"));
        }
        self.halt();
        self.current_word_index = 0;
        self.status = PlaybackStatus::Idle;
        Ok(())
    }

    /// Move the highlight to `target`, clamped into the document.
    ///
    /// The engine cannot resume an utterance from an arbitrary word, so
    /// seeking while engaged cancels playback and leaves the synchronizer
    /// idle at the new position.
    pub fn seek(&mut self, target: i64) -> usize {
        self.current_word_index = self.document.clamp_index(target);
        if self.status.is_engaged() {
            self.halt();
            self.status = PlaybackStatus::Idle;
        }
        self.current_word_index
    }

    pub fn skip_forward(&mut self) -> usize {
        let target = self
            .current_word_index
            .saturating_add(self.model.skip_words());
        self.seek(i64::try_from(target).unwrap_or(i64::MAX))
    }

    pub fn skip_backward(&mut self) -> usize {
        let target = self
            .current_word_index
            .saturating_sub(self.model.skip_words());
        self.seek(i64::try_from(target).unwrap_or(i64::MAX))
    }

    /// Change the speed multiplier. An engaged utterance is stopped because
    /// its rate cannot be changed in flight.
    pub fn set_rate(&mut self, rate: f64) -> Result<(), PlaybackError> {
        self.model = self.model.with_rate(rate)?;
        if self.status.is_engaged() {
            self.stop()?;
        }
        Ok(())
    }

    /// Select a voice by id. A speaking utterance is stopped so the next
    /// `play` uses the new voice.
    pub fn set_voice(&mut self, voice_id: &str) -> Result<(), PlaybackError> {
        let voice = self
            .voices
            .iter()
            .find(|v| v.id == voice_id)
            .cloned()
            .ok_or_else(|| PlaybackError::UnknownVoice(voice_id.to_string()))?;

        self.voice = Some(voice);
        self.voice_pinned = true;

        if matches!(
            self.status,
            PlaybackStatus::Loading | PlaybackStatus::Playing
        ) {
            self.stop()?;
        }
        Ok(())
    }

    /// Apply an engine callback. Returns false when the signal was stale or
    /// irrelevant and changed nothing.
    pub fn handle_signal(&mut self, signal: EngineSignal) -> bool {
        if let Some(generation) = signal.generation() {
            if self.active_generation != Some(generation) {
                tracing::debug!(
                    generation,
                    active_generation = ?self.active_generation,
                    "Ignoring stale engine signal"
                );
                return false;
            }
        }

        match signal {
            EngineSignal::Started { .. } => {
                if self.status != PlaybackStatus::Loading {
                    return false;
                }
                self.status = PlaybackStatus::Playing;
                self.current_word_index = 0;
                self.start_timer();
                true
            }
            EngineSignal::Ended { .. } => {
                self.active_generation = None;
                self.stop_timer();
                self.status = PlaybackStatus::Ended;
                self.current_word_index = self.document.last_index();
                true
            }
            EngineSignal::Errored { reason, .. } => {
                tracing::warn!(reason = %reason, "Speech engine reported an error");
                self.active_generation = None;
                self.stop_timer();
                self.status = PlaybackStatus::Errored;
                self.current_word_index = 0;
                self.last_error = Some(reason);
                true
            }
            EngineSignal::VoicesChanged(voices) => {
                self.voices = voices;
                let still_listed = self
                    .voice
                    .as_ref()
                    .map(|current| self.voices.iter().any(|v| v.id == current.id))
                    .unwrap_or(false);
                if !still_listed {
                    self.voice_pinned = false;
                    self.voice = select_default_voice(
                        &self.voices,
                        detect_language(self.document.content()),
                    );
                }
                true
            }
        }
    }

    /// One firing of the index-advance timer. Returns true when the index
    /// moved. Reaching the final word stops the timer; the engine's end
    /// signal is left to finish the utterance.
    pub fn tick(&mut self) -> bool {
        if !self.timer_running || self.status != PlaybackStatus::Playing {
            return false;
        }
        let next = self.current_word_index + 1;
        if next >= self.document.word_count() {
            self.stop_timer();
            return false;
        }
        self.current_word_index = next;
        true
    }

    /// Cancel the engine and clear the timer; used on component teardown
    pub fn teardown(&mut self) {
        self.halt();
        if self.status.is_engaged() {
            self.status = PlaybackStatus::Idle;
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current_word_index(&self) -> usize {
        self.current_word_index
    }

    pub fn current_word(&self) -> Option<&str> {
        self.document.word(self.current_word_index)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn rate(&self) -> f64 {
        self.model.rate()
    }

    pub fn model(&self) -> SpeechModel {
        self.model
    }

    pub fn estimated_duration(&self) -> f64 {
        self.model.estimated_duration(self.document.word_count())
    }

    pub fn elapsed_seconds(&self) -> f64 {
        if self.document.is_empty() {
            return 0.0;
        }
        self.model.elapsed_seconds(self.current_word_index)
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// Bumped every time the timer (re)starts, so a driver can tell a
    /// restarted timer from one that kept running
    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    pub fn timer_interval(&self) -> Duration {
        self.model.word_interval()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let estimated_duration_secs = self.estimated_duration();
        let elapsed_secs = self.elapsed_seconds();
        PlaybackSnapshot {
            status: self.status,
            title: self.document.title().to_string(),
            current_word_index: self.current_word_index,
            current_word: self.current_word().map(str::to_string),
            word_count: self.document.word_count(),
            rate: self.model.rate(),
            estimated_duration_secs,
            elapsed_secs,
            elapsed: format_time(elapsed_secs),
            duration: format_time(estimated_duration_secs),
            voice_id: self.voice.as_ref().map(|v| v.id.clone()),
            last_error: self.last_error.clone(),
        }
    }

    /// Cancel the active utterance (if any) and stop the timer
    fn halt(&mut self) {
        if self.active_generation.take().is_some() {
            self.engine.cancel();
        }
        self.stop_timer();
    }

    fn start_timer(&mut self) {
        self.timer_running = true;
        self.timer_epoch += 1;
    }

    fn stop_timer(&mut self) {
        self.timer_running = false;
    }

    fn rejected(&self, action: &'static str) -> PlaybackError {
        PlaybackError::InvalidTransition {
            action,
            status: self.status,
        }
    }
}

impl<E: SpeechEngine> Drop for PlaybackSynchronizer<E> {
    fn drop(&mut self) {
        if self.active_generation.is_some() || self.timer_running {
            self.teardown();
        }
    }
}
