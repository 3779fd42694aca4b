//! Widget state and message submission
//!
//! This module provides the central state behind the chat panel: typed or
//! recognized text goes in, the canned reply comes out, and both are kept in
//! the conversation log the panel renders.

use crate::integration::ChatConfig;
use crate::messages::{Message, MessageMetadata, MessageStorage};
use crate::responder::ResponseSelector;
use crate::speech::{SessionOutcome, SpeechCapabilities, SpeechSessionController};
use crate::ui::VisualHandle;
use crate::utils::SpeechChannels;
use crate::{ChatError, Result};
use tracing::{debug, info, warn};

/// Panel visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

/// The chat widget: reply selection, speech sessions and the message log
pub struct ChatWidget<H: VisualHandle> {
    selector: ResponseSelector,
    speech: SpeechSessionController<H>,
    messages: MessageStorage,
    panel: PanelState,
}

impl<H: VisualHandle> ChatWidget<H> {
    /// Create a widget from configuration
    ///
    /// `channels` must be the channels whose sender the capabilities post to,
    /// normally built with [`ChatConfig::channels`] so the queue honours
    /// `event_queue_size`.
    pub fn new(
        config: &ChatConfig,
        capabilities: SpeechCapabilities<H>,
        channels: SpeechChannels,
    ) -> Result<Self> {
        config.validate()?;

        let selector = ResponseSelector::new(config.rule_table()?);
        let speech = SpeechSessionController::new(capabilities, config.speech.clone(), channels);

        let mut widget = Self::from_parts(selector, speech);
        if config.start_open {
            widget.open();
        }

        info!(
            "Chat widget initialized with {} rules",
            widget.selector.rules().len()
        );
        Ok(widget)
    }

    /// Assemble a widget from prebuilt components
    pub fn from_parts(selector: ResponseSelector, speech: SpeechSessionController<H>) -> Self {
        Self {
            selector,
            speech,
            messages: MessageStorage::new(),
            panel: PanelState::Closed,
        }
    }

    // === Panel ===

    pub fn open(&mut self) {
        self.panel = PanelState::Open;
    }

    /// Close the panel, silencing any reply being spoken
    pub fn close(&mut self) {
        self.panel = PanelState::Closed;
        self.speech.stop_all();
    }

    pub fn toggle_panel(&mut self) {
        match self.panel {
            PanelState::Open => self.close(),
            PanelState::Closed => self.open(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel == PanelState::Open
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel
    }

    // === Messages ===

    /// Submit a message
    ///
    /// Blank input is ignored. When `speak_with` is given, the reply is spoken
    /// with progress shown on that handle; speech failures are logged and never
    /// affect the returned reply.
    pub fn submit(&mut self, text: &str, speak_with: Option<H>) -> Option<Message> {
        self.submit_with(text, MessageMetadata::default(), speak_with)
    }

    fn submit_with(
        &mut self,
        text: &str,
        metadata: MessageMetadata,
        speak_with: Option<H>,
    ) -> Option<Message> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring empty message");
            return None;
        }

        self.messages
            .add(Message::user(text).with_metadata(metadata));

        let reply = Message::assistant(self.selector.select(text));
        self.messages.add(reply.clone());

        if let Some(handle) = speak_with {
            if let Err(e) = self.speech.speak(&reply.text, handle) {
                log_speech_error(&e);
            }
        }

        Some(reply)
    }

    /// Drain speech events; recognized transcripts are submitted
    ///
    /// Returns the replies produced for transcripts.
    pub fn poll(&mut self) -> Vec<Message> {
        let metadata = MessageMetadata { from_speech: true };

        self.speech
            .poll_events()
            .into_iter()
            .filter_map(|transcript| self.submit_with(&transcript, metadata.clone(), None))
            .collect()
    }

    // === Speech affordances ===

    /// Click on a message's audio button
    pub fn toggle_audio(&mut self, handle: H, text: &str) -> Result<SessionOutcome> {
        self.speech.toggle(handle, text).inspect_err(log_speech_error)
    }

    /// Click on the microphone button
    pub fn toggle_mic(&mut self) -> Result<SessionOutcome> {
        self.speech.listen().inspect_err(log_speech_error)
    }

    /// Stop any reply being spoken
    pub fn stop_speech(&mut self) {
        self.speech.stop_all();
    }

    // === Accessors ===

    pub fn messages(&self) -> &MessageStorage {
        &self.messages
    }

    pub fn selector(&self) -> &ResponseSelector {
        &self.selector
    }

    pub fn speech(&self) -> &SpeechSessionController<H> {
        &self.speech
    }

    pub fn speech_mut(&mut self) -> &mut SpeechSessionController<H> {
        &mut self.speech
    }
}

fn log_speech_error(e: &ChatError) {
    match e {
        ChatError::CapabilityUnavailable(capability) => {
            debug!("Speech request ignored: {} unavailable", capability)
        }
        other => warn!("Speech request failed: {}", other),
    }
}
