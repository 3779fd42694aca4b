//! Speech session controller
//!
//! Serializes access to the host's speech capabilities: at most one synthesis
//! session and at most one recognition session are alive at any time, and the
//! visual handles bound to them always reflect the capability's real state.
//!
//! Every session carries a [`SessionId`]. Capabilities report progress with
//! events tagged by that id; events whose id is not the current session's are
//! dropped, so a late `Ended` from a preempted utterance cannot reset the
//! handle of the utterance that replaced it.

use super::capability::{
    Capability, RecognitionEvent, RecognitionEventKind, SessionId, SpeechEvent,
    SpeechRecognizer, SpeechSynthesizer, SynthesisEvent, SynthesisEventKind, Utterance,
};
use super::voice::SpeechConfig;
use crate::ui::{VisualHandle, VisualState};
use crate::utils::{EventSender, SpeechChannels};
use crate::{ChatError, Result};
use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};

/// Synthesis session lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SynthesisState {
    /// No utterance requested
    #[default]
    Idle,
    /// Playback requested, engine has not reported start yet
    Starting,
    /// Engine reported audio output
    Speaking,
}

impl SynthesisState {
    /// Check if an utterance is pending or playing
    pub fn is_active(&self) -> bool {
        !matches!(self, SynthesisState::Idle)
    }
}

/// Recognition session lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecognitionState {
    #[default]
    Idle,
    Listening,
}

/// Result of a start/stop style operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A new session was started
    Started(SessionId),
    /// The active session was stopped
    Stopped,
}

/// Injected capabilities
///
/// Missing capabilities are `None`; the controller treats their absence as a
/// fixed property of the environment.
pub struct SpeechCapabilities<H> {
    pub synthesizer: Option<Box<dyn SpeechSynthesizer>>,
    pub recognizer: Option<Box<dyn SpeechRecognizer>>,
    /// Microphone affordance updated by recognition sessions
    pub mic_indicator: Option<H>,
}

impl<H> Default for SpeechCapabilities<H> {
    fn default() -> Self {
        Self {
            synthesizer: None,
            recognizer: None,
            mic_indicator: None,
        }
    }
}

impl<H> SpeechCapabilities<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_synthesizer(mut self, synthesizer: impl SpeechSynthesizer + 'static) -> Self {
        self.synthesizer = Some(Box::new(synthesizer));
        self
    }

    pub fn with_recognizer(mut self, recognizer: impl SpeechRecognizer + 'static) -> Self {
        self.recognizer = Some(Box::new(recognizer));
        self
    }

    pub fn with_mic_indicator(mut self, indicator: H) -> Self {
        self.mic_indicator = Some(indicator);
        self
    }
}

struct SynthesisSession<H> {
    id: SessionId,
    handle: H,
    state: SynthesisState,
}

/// Owner of the active speech sessions
pub struct SpeechSessionController<H: VisualHandle> {
    synthesizer: Option<Box<dyn SpeechSynthesizer>>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    mic_indicator: Option<H>,
    config: SpeechConfig,

    /// Current synthesis session, if any
    synthesis: Option<SynthesisSession<H>>,

    /// Current recognition session, if any
    recognition: Option<SessionId>,

    channels: SpeechChannels,
}

impl<H: VisualHandle> SpeechSessionController<H> {
    /// Create a controller
    ///
    /// Capability absence is reported here, once: a missing recognizer
    /// disables the microphone indicator.
    pub fn new(
        capabilities: SpeechCapabilities<H>,
        config: SpeechConfig,
        channels: SpeechChannels,
    ) -> Self {
        let SpeechCapabilities {
            synthesizer,
            recognizer,
            mic_indicator,
        } = capabilities;

        if synthesizer.is_none() {
            warn!("Text-to-speech unavailable; replies will not be spoken");
        }

        if recognizer.is_none() {
            warn!("Speech recognition unavailable; microphone disabled");
            if let Some(mic) = &mic_indicator {
                mic.apply(VisualState::Disabled);
            }
        }

        info!(
            "Speech controller ready (synthesis: {}, recognition: {})",
            synthesizer.is_some(),
            recognizer.is_some()
        );

        Self {
            synthesizer,
            recognizer,
            mic_indicator,
            config,
            synthesis: None,
            recognition: None,
            channels,
        }
    }

    /// Get a sender for capability events
    pub fn event_sender(&self) -> EventSender {
        self.channels.sender()
    }

    /// Get the raw event receiver
    pub fn event_receiver(&self) -> Receiver<SpeechEvent> {
        self.channels.event_rx.clone()
    }

    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    pub fn is_available(&self, capability: Capability) -> bool {
        match capability {
            Capability::TextToSpeech => self.synthesizer.is_some(),
            Capability::SpeechToText => self.recognizer.is_some(),
        }
    }

    pub fn synthesis_state(&self) -> SynthesisState {
        self.synthesis
            .as_ref()
            .map(|s| s.state)
            .unwrap_or_default()
    }

    pub fn recognition_state(&self) -> RecognitionState {
        if self.recognition.is_some() {
            RecognitionState::Listening
        } else {
            RecognitionState::Idle
        }
    }

    /// Id of the current synthesis session
    pub fn active_synthesis(&self) -> Option<SessionId> {
        self.synthesis.as_ref().map(|s| s.id)
    }

    /// Id of the current recognition session
    pub fn active_recognition(&self) -> Option<SessionId> {
        self.recognition
    }

    /// Check if `handle` is bound to a pending or playing utterance
    pub fn is_speaking(&self, handle: &H) -> bool {
        self.synthesis
            .as_ref()
            .is_some_and(|s| s.state.is_active() && s.handle.same_affordance(handle))
    }

    pub fn is_listening(&self) -> bool {
        self.recognition.is_some()
    }

    // === Synthesis ===

    /// Speak `text`, showing progress on `handle`
    ///
    /// Any current utterance is cancelled and its handle reset before the new
    /// one is requested. There is no queueing.
    pub fn speak(&mut self, text: &str, handle: H) -> Result<SessionId> {
        if self.synthesizer.is_none() {
            return Err(ChatError::CapabilityUnavailable(Capability::TextToSpeech));
        }

        self.stop_all();

        let Some(synthesizer) = self.synthesizer.as_mut() else {
            return Err(ChatError::CapabilityUnavailable(Capability::TextToSpeech));
        };

        let id = SessionId::new();
        let utterance = Utterance {
            session: id,
            text: text.to_string(),
            options: self.config.speak_options(&synthesizer.voices()),
        };

        if let Some(voice) = &utterance.options.voice {
            debug!("Session {} using voice {} ({})", id, voice.name, voice.lang);
        }

        handle.apply(VisualState::Speaking);

        match synthesizer.request_speak(utterance) {
            Ok(()) => {
                debug!("Synthesis session {} requested", id);
                self.synthesis = Some(SynthesisSession {
                    id,
                    handle,
                    state: SynthesisState::Starting,
                });
                Ok(id)
            }
            Err(e) => {
                warn!("Speech synthesis request failed: {}", e);
                handle.apply(VisualState::Idle);
                Err(into_session_error(e))
            }
        }
    }

    /// Cancel the current utterance, whatever phase it is in
    pub fn stop_all(&mut self) {
        if let Some(synthesizer) = self.synthesizer.as_mut() {
            synthesizer.cancel_all();
        }

        if let Some(session) = self.synthesis.take() {
            debug!("Synthesis session {} cancelled", session.id);
            session.handle.apply(VisualState::Idle);
        }
    }

    /// Click-to-toggle for a handle bound to `text`
    ///
    /// Stops the handle's own utterance if it is active, otherwise speaks.
    pub fn toggle(&mut self, handle: H, text: &str) -> Result<SessionOutcome> {
        if self.is_speaking(&handle) {
            self.stop_all();
            Ok(SessionOutcome::Stopped)
        } else {
            self.speak(text, handle).map(SessionOutcome::Started)
        }
    }

    // === Recognition ===

    /// Start listening, or stop if already listening
    pub fn listen(&mut self) -> Result<SessionOutcome> {
        let Some(recognizer) = self.recognizer.as_mut() else {
            return Err(ChatError::CapabilityUnavailable(Capability::SpeechToText));
        };

        if let Some(id) = self.recognition.take() {
            recognizer.stop();
            debug!("Recognition session {} stopped", id);
            if let Some(mic) = &self.mic_indicator {
                mic.apply(VisualState::Idle);
            }
            return Ok(SessionOutcome::Stopped);
        }

        let id = SessionId::new();
        match recognizer.start(id, &self.config.recognition) {
            Ok(()) => {
                debug!("Recognition session {} listening", id);
                self.recognition = Some(id);
                if let Some(mic) = &self.mic_indicator {
                    mic.apply(VisualState::Listening);
                }
                Ok(SessionOutcome::Started(id))
            }
            Err(e) => {
                warn!("Speech recognition failed to start: {}", e);
                if let Some(mic) = &self.mic_indicator {
                    mic.apply(VisualState::Idle);
                }
                Err(into_session_error(e))
            }
        }
    }

    // === Events ===

    /// Apply one capability event
    ///
    /// Returns the transcript to submit when the event completes a recognition.
    pub fn handle_event(&mut self, event: SpeechEvent) -> Option<String> {
        match event {
            SpeechEvent::Synthesis(event) => {
                self.on_synthesis_event(event);
                None
            }
            SpeechEvent::Recognition(event) => self.on_recognition_event(event),
        }
    }

    /// Drain queued capability events, returning recognized transcripts
    pub fn poll_events(&mut self) -> Vec<String> {
        let mut transcripts = Vec::new();

        while let Ok(event) = self.channels.event_rx.try_recv() {
            if let Some(transcript) = self.handle_event(event) {
                transcripts.push(transcript);
            }
        }

        transcripts
    }

    fn on_synthesis_event(&mut self, event: SynthesisEvent) {
        if self.active_synthesis() != Some(event.session) {
            debug!(
                "Ignoring {:?} from stale synthesis session {}",
                event.kind, event.session
            );
            return;
        }

        match event.kind {
            SynthesisEventKind::Started => {
                if let Some(session) = self.synthesis.as_mut() {
                    session.state = SynthesisState::Speaking;
                    session.handle.apply(VisualState::Speaking);
                }
            }
            SynthesisEventKind::Ended => {
                if let Some(session) = self.synthesis.take() {
                    debug!("Synthesis session {} ended", session.id);
                    session.handle.apply(VisualState::Idle);
                }
            }
            SynthesisEventKind::Error(reason) => {
                if let Some(session) = self.synthesis.take() {
                    warn!("Synthesis session {} failed: {}", session.id, reason);
                    session.handle.apply(VisualState::Idle);
                }
            }
        }
    }

    fn on_recognition_event(&mut self, event: RecognitionEvent) -> Option<String> {
        if self.recognition != Some(event.session) {
            debug!(
                "Ignoring {:?} from stale recognition session {}",
                event.kind, event.session
            );
            return None;
        }

        self.recognition = None;
        if let Some(mic) = &self.mic_indicator {
            mic.apply(VisualState::Idle);
        }

        match event.kind {
            RecognitionEventKind::Result(transcript) => {
                info!("Recognized: \"{}\"", transcript);
                Some(transcript)
            }
            RecognitionEventKind::Error(code) => {
                warn!("Speech recognition error: {}", code);
                None
            }
            RecognitionEventKind::End => {
                debug!("Recognition session {} ended without result", event.session);
                None
            }
        }
    }
}

fn into_session_error(e: ChatError) -> ChatError {
    match e {
        ChatError::SessionError(_) => e,
        other => ChatError::SessionError(other.to_string()),
    }
}
