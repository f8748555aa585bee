use super::error::PlaybackError;
use std::time::Duration;

pub const DEFAULT_WORDS_PER_MINUTE: f64 = 150.0;
pub const DEFAULT_RATE: f64 = 1.0;

/// Shortest period the index-advance timer may run at
pub const MIN_WORD_INTERVAL: Duration = Duration::from_millis(1);

/// Words-per-minute model used to turn a word index into playback time.
///
/// The engine never reports its position inside an utterance, so every
/// timing figure here is an estimate derived from `base_words_per_minute * rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechModel {
    base_words_per_minute: f64,
    rate: f64,
}

impl SpeechModel {
    pub fn new(base_words_per_minute: f64, rate: f64) -> Result<Self, PlaybackError> {
        if !is_positive(base_words_per_minute) {
            return Err(PlaybackError::InvalidWordsPerMinute(base_words_per_minute));
        }
        if !is_positive(rate) {
            return Err(PlaybackError::InvalidRate(rate));
        }
        let model = Self {
            base_words_per_minute,
            rate,
        };
        match model.interval() {
            Some(interval) if interval >= MIN_WORD_INTERVAL => Ok(model),
            _ => Err(PlaybackError::RateOutOfRange(rate)),
        }
    }

    pub fn with_rate(self, rate: f64) -> Result<Self, PlaybackError> {
        Self::new(self.base_words_per_minute, rate)
    }

    pub fn base_words_per_minute(&self) -> f64 {
        self.base_words_per_minute
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn words_per_second(&self) -> f64 {
        self.base_words_per_minute * self.rate / 60.0
    }

    /// Estimated seconds needed to speak `word_count` words
    pub fn estimated_duration(&self, word_count: usize) -> f64 {
        word_count as f64 / (self.base_words_per_minute * self.rate) * 60.0
    }

    /// Period of the index-advance timer
    pub fn word_interval(&self) -> Duration {
        self.interval()
            .unwrap_or(MIN_WORD_INTERVAL)
            .max(MIN_WORD_INTERVAL)
    }

    fn interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(1.0 / self.words_per_second()).ok()
    }

    /// Roughly ten seconds worth of words
    pub fn skip_words(&self) -> usize {
        (self.base_words_per_minute * self.rate / 6.0).floor() as usize
    }

    pub fn elapsed_seconds(&self, word_index: usize) -> f64 {
        word_index as f64 / self.words_per_second()
    }
}

impl Default for SpeechModel {
    fn default() -> Self {
        Self {
            base_words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            rate: DEFAULT_RATE,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Render seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
