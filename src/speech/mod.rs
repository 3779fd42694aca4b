//! Speech sessions over host-provided capabilities
//!
//! This module provides:
//! - Capability traits for speech synthesis and recognition
//! - Voice selection and speech options
//! - The session controller enforcing one utterance and one recognition at a time

pub mod capability;
pub mod console;
pub mod controller;
pub mod shared;
pub mod voice;

// Re-export commonly used types
pub use capability::{
    Capability, RecognitionEvent, RecognitionEventKind, SessionId, SpeechEvent,
    SpeechRecognizer, SpeechSynthesizer, SynthesisEvent, SynthesisEventKind, Utterance,
};
pub use console::ConsoleSynthesizer;
pub use controller::{
    RecognitionState, SessionOutcome, SpeechCapabilities, SpeechSessionController,
    SynthesisState,
};
pub use shared::SharedSpeechController;
pub use voice::{select_voice, RecognitionOptions, SpeakOptions, SpeechConfig, VoiceInfo};
