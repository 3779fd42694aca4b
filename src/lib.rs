pub mod integration;
pub mod messages;
pub mod responder;
pub mod speech;
pub mod ui;
pub mod utils;

pub use integration::ChatConfig;
pub use responder::{ResponseSelector, RuleEntry, RuleTable};
pub use speech::{Capability, SessionId, SpeechSessionController};
pub use ui::{ChatWidget, VisualHandle, VisualState};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(Capability),

    #[error("Speech session error: {0}")]
    SessionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for ChatError {
    fn from(e: std::io::Error) -> Self {
        ChatError::IOError(e.to_string())
    }
}

impl ChatError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Absence is an environment fact; retrying cannot help
            ChatError::CapabilityUnavailable(_) => false,
            // Mid-session failures reset state, the user may retry immediately
            ChatError::SessionError(_) => true,
            ChatError::ConfigError(_) => false,
            ChatError::IOError(_) => false,
            ChatError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ChatError::CapabilityUnavailable(Capability::TextToSpeech) => {
                "Text-to-speech is not supported in your browser.".to_string()
            }
            ChatError::CapabilityUnavailable(Capability::SpeechToText) => {
                "Speech recognition is not supported in your browser.".to_string()
            }
            ChatError::SessionError(_) => "Speech failed. Please try again.".to_string(),
            ChatError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            ChatError::IOError(_) => "File system error occurred.".to_string(),
            ChatError::ChannelError(_) => {
                "Internal communication error. Please reload the page.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
