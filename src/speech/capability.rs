//! Host speech capabilities
//!
//! Speech synthesis and recognition are provided by the environment and
//! consumed through two narrow traits. Both report progress asynchronously by
//! posting session-tagged events back to the controller's event channel.

use super::voice::{RecognitionOptions, SpeakOptions, VoiceInfo};
use crate::Result;
use std::fmt;
use uuid::Uuid;

/// Which host capability an operation needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    TextToSpeech,
    SpeechToText,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::TextToSpeech => write!(f, "text-to-speech"),
            Capability::SpeechToText => write!(f, "speech-to-text"),
        }
    }
}

/// Identity tag of one synthesis or recognition session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A playback request handed to the synthesizer
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Session the synthesizer must tag its events with
    pub session: SessionId,

    /// Text to speak
    pub text: String,

    /// Prosody and voice
    pub options: SpeakOptions,
}

/// Progress of a synthesis session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisEventKind {
    /// Audio output began
    Started,
    /// Utterance finished playing
    Ended,
    /// Playback failed or was interrupted
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisEvent {
    pub session: SessionId,
    pub kind: SynthesisEventKind,
}

/// Progress of a recognition session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEventKind {
    /// Final transcript of the utterance
    Result(String),
    /// Engine error code (e.g. "no-speech", "not-allowed")
    Error(String),
    /// Session closed
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionEvent {
    pub session: SessionId,
    pub kind: RecognitionEventKind,
}

/// Event posted by a capability to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Synthesis(SynthesisEvent),
    Recognition(RecognitionEvent),
}

impl SpeechEvent {
    pub fn synthesis(session: SessionId, kind: SynthesisEventKind) -> Self {
        SpeechEvent::Synthesis(SynthesisEvent { session, kind })
    }

    pub fn recognition(session: SessionId, kind: RecognitionEventKind) -> Self {
        SpeechEvent::Recognition(RecognitionEvent { session, kind })
    }

    /// Session the event belongs to
    pub fn session(&self) -> SessionId {
        match self {
            SpeechEvent::Synthesis(e) => e.session,
            SpeechEvent::Recognition(e) => e.session,
        }
    }
}

/// Text-to-speech capability
///
/// Implementations emit `Started`, then `Ended` or `Error`, for every accepted
/// utterance, tagged with `Utterance::session`.
pub trait SpeechSynthesizer: Send {
    /// Voices the engine can use; may be empty while still loading
    fn voices(&self) -> Vec<VoiceInfo>;

    /// Queue an utterance for playback
    fn request_speak(&mut self, utterance: Utterance) -> Result<()>;

    /// Cancel every pending and playing utterance
    fn cancel_all(&mut self);
}

/// Speech-to-text capability
///
/// One non-continuous session per `start`; emits at most one `Result`, then `End`.
pub trait SpeechRecognizer: Send {
    fn start(&mut self, session: SessionId, options: &RecognitionOptions) -> Result<()>;

    fn stop(&mut self);
}
