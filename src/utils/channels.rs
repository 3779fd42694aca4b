use crate::speech::SpeechEvent;
use crate::{ChatError, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Event channel between speech capabilities and the session controller
///
/// Capabilities get clones of the sender; the controller drains the receiver
/// on the host loop.
pub struct SpeechChannels {
    pub event_tx: Sender<SpeechEvent>,
    pub event_rx: Receiver<SpeechEvent>,
}

impl SpeechChannels {
    pub fn new(buffer_size: usize) -> Self {
        let (event_tx, event_rx) = bounded(buffer_size.max(1));

        Self { event_tx, event_rx }
    }

    /// Get a sender for a capability
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.event_tx.clone(),
        }
    }
}

impl Default for SpeechChannels {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Non-blocking event sender handed to capabilities
///
/// The controller runs on the same loop that capabilities call back on, so a
/// blocking send into a full queue would never drain.
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<SpeechEvent>,
}

impl EventSender {
    pub fn post(&self, event: SpeechEvent) -> Result<()> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => ChatError::ChannelError("Speech event queue is full".into()),
            TrySendError::Disconnected(_) => {
                ChatError::ChannelError("Speech controller has shut down".into())
            }
        })
    }
}
