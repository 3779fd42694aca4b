//! Console stand-in for a speech synthesizer
//!
//! Prints each utterance instead of playing it and reports the session as
//! started and ended right away. Used by the terminal host.

use super::capability::{SpeechEvent, SpeechSynthesizer, SynthesisEventKind, Utterance};
use super::voice::VoiceInfo;
use crate::utils::EventSender;
use crate::Result;
use std::io::{self, Write};
use tracing::{debug, warn};

pub struct ConsoleSynthesizer<W: Write + Send> {
    out: W,
    events: EventSender,
}

impl ConsoleSynthesizer<io::Stdout> {
    pub fn stdout(events: EventSender) -> Self {
        Self::new(io::stdout(), events)
    }
}

impl<W: Write + Send> ConsoleSynthesizer<W> {
    pub fn new(out: W, events: EventSender) -> Self {
        Self { out, events }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> SpeechSynthesizer for ConsoleSynthesizer<W> {
    fn voices(&self) -> Vec<VoiceInfo> {
        vec![VoiceInfo::new("Console", "en-US")]
    }

    fn request_speak(&mut self, utterance: Utterance) -> Result<()> {
        let session = utterance.session;
        self.events
            .post(SpeechEvent::synthesis(session, SynthesisEventKind::Started))?;

        let written = writeln!(
            self.out,
            "[speaking x{:.1}] {}",
            utterance.options.rate, utterance.text
        )
        .and_then(|_| self.out.flush());

        let kind = match written {
            Ok(()) => SynthesisEventKind::Ended,
            Err(e) => {
                warn!("Console output failed: {}", e);
                SynthesisEventKind::Error(e.to_string())
            }
        };
        self.events.post(SpeechEvent::synthesis(session, kind))
    }

    fn cancel_all(&mut self) {
        debug!("Console synthesizer cancel requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{SessionId, SpeakOptions};
    use crate::utils::SpeechChannels;

    #[test]
    fn test_prints_and_reports_lifecycle() {
        let channels = SpeechChannels::new(4);
        let mut synth = ConsoleSynthesizer::new(Vec::new(), channels.sender());
        let session = SessionId::new();

        synth
            .request_speak(Utterance {
                session,
                text: "Hello there".into(),
                options: SpeakOptions {
                    rate: 1.5,
                    pitch: 1.0,
                    volume: 1.0,
                    voice: None,
                },
            })
            .unwrap();

        let printed = String::from_utf8(synth.into_inner()).unwrap();
        assert_eq!(printed, "[speaking x1.5] Hello there\n");

        let kinds: Vec<_> = channels
            .event_rx
            .try_iter()
            .map(|e| match e {
                SpeechEvent::Synthesis(e) => e.kind,
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(kinds, vec![SynthesisEventKind::Started, SynthesisEventKind::Ended]);
    }
}
