use super::engine::Voice;
use super::language::LanguageCode;

/// Pick the voice to use when the caller has not chosen one.
///
/// Preference order: a voice for `preferred`, then any English voice, then
/// whatever the engine lists first.
pub fn select_default_voice(voices: &[Voice], preferred: Option<LanguageCode>) -> Option<Voice> {
    preferred
        .and_then(|language| voices.iter().find(|v| language.matches_tag(&v.lang)))
        .or_else(|| {
            voices
                .iter()
                .find(|v| LanguageCode::English.matches_tag(&v.lang))
        })
        .or_else(|| voices.first())
        .cloned()
}
