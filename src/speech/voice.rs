//! Voice selection and speech options

use crate::{ChatError, Result};
use serde::Deserialize;

/// A voice offered by the synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    /// Engine-specific voice name (e.g. "Google US English")
    pub name: String,

    /// BCP 47 language tag (e.g. "en-US")
    pub lang: String,
}

impl VoiceInfo {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Parameters attached to each utterance
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakOptions {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,

    /// Chosen voice; `None` lets the engine use its default
    pub voice: Option<VoiceInfo>,
}

/// Settings for recognition sessions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecognitionOptions {
    pub locale: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// Configuration for speech synthesis and recognition
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speaking rate (1.0 = normal)
    pub rate: f32,

    /// Pitch (1.0 = normal)
    pub pitch: f32,

    /// Volume (0.0 to 1.0)
    pub volume: f32,

    /// Preferred voice language
    pub locale: String,

    /// Substrings of voice names that tend to sound natural
    pub voice_hints: Vec<String>,

    /// Recognition session settings
    pub recognition: RecognitionOptions,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 1.5,
            pitch: 1.0,
            volume: 1.0,
            locale: "en-US".to_string(),
            voice_hints: vec!["Google".to_string(), "Microsoft".to_string()],
            recognition: RecognitionOptions::default(),
        }
    }
}

impl SpeechConfig {
    /// Set the speaking rate
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the pitch
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Set the volume
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Set the locale used for both voice selection and recognition
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        self.recognition.locale = locale.clone();
        self.locale = locale;
        self
    }

    /// Replace the preferred voice-name hints
    pub fn with_voice_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.voice_hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Validate ranges accepted by speech engines
    pub fn validate(&self) -> Result<()> {
        if !(0.1..=10.0).contains(&self.rate) {
            return Err(ChatError::ConfigError(format!(
                "Speech rate {} outside 0.1..=10",
                self.rate
            )));
        }
        if !(0.0..=2.0).contains(&self.pitch) {
            return Err(ChatError::ConfigError(format!(
                "Speech pitch {} outside 0..=2",
                self.pitch
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ChatError::ConfigError(format!(
                "Speech volume {} outside 0..=1",
                self.volume
            )));
        }
        if self.locale.trim().is_empty() || self.recognition.locale.trim().is_empty() {
            return Err(ChatError::ConfigError("Locale must not be empty".into()));
        }
        Ok(())
    }

    /// Build utterance options, picking a voice from `voices`
    pub fn speak_options(&self, voices: &[VoiceInfo]) -> SpeakOptions {
        SpeakOptions {
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume,
            voice: select_voice(voices, &self.locale, &self.voice_hints).cloned(),
        }
    }
}

/// Pick a voice: locale match with a hinted name, else the first voice
pub fn select_voice<'a>(
    voices: &'a [VoiceInfo],
    locale: &str,
    hints: &[String],
) -> Option<&'a VoiceInfo> {
    voices
        .iter()
        .find(|v| v.lang == locale && hints.iter().any(|h| v.name.contains(h.as_str())))
        .or_else(|| voices.first())
}
