/// Text prepared for playback: the raw content plus its word tokens.
///
/// Tokens come from splitting on any whitespace run; empty tokens never
/// appear, so an all-whitespace content yields an empty document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    title: String,
    content: String,
    words: Vec<String>,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let words = tokenize(&content);
        Self {
            title: title.into(),
            content,
            words,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Index of the final word, or 0 for an empty document
    pub fn last_index(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Clamp an arbitrary (possibly negative) position into `[0, last_index]`
    pub fn clamp_index(&self, target: i64) -> usize {
        if target <= 0 {
            return 0;
        }
        usize::try_from(target)
            .unwrap_or(usize::MAX)
            .min(self.last_index())
    }
}

pub fn tokenize(content: &str) -> Vec<String> {
    content.split_whitespace().map(str::to_string).collect()
}
