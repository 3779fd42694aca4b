pub mod channels;

pub use channels::{EventSender, SpeechChannels};
