//! Shared fakes for integration tests
//!
//! The fakes only record what the controller asks of them; tests play the
//! engine's part by posting events through the controller's event sender.

#![allow(dead_code)]

use folio_chat::speech::{
    RecognitionOptions, SessionId, SpeechCapabilities, SpeechRecognizer, SpeechSynthesizer,
    Utterance, VoiceInfo,
};
use folio_chat::{ChatConfig, ChatError, ChatWidget, VisualHandle, VisualState};
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered log of every state pushed onto any handle
pub type HandleLog = Arc<Mutex<Vec<(String, VisualState)>>>;

/// Handle that records the states it is shown
pub struct RecordingHandle {
    pub name: String,
    log: HandleLog,
}

impl RecordingHandle {
    pub fn new(name: impl Into<String>, log: &HandleLog) -> Self {
        Self {
            name: name.into(),
            log: Arc::clone(log),
        }
    }
}

impl VisualHandle for RecordingHandle {
    fn same_affordance(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn apply(&self, state: VisualState) {
        self.log.lock().push((self.name.clone(), state));
    }
}

/// States shown on the named handle, in order
pub fn states_of(log: &HandleLog, name: &str) -> Vec<VisualState> {
    log.lock()
        .iter()
        .filter(|(n, _)| n == name)
        .map(|(_, s)| *s)
        .collect()
}

/// Last state shown on the named handle
pub fn last_state(log: &HandleLog, name: &str) -> Option<VisualState> {
    states_of(log, name).last().copied()
}

#[derive(Default)]
pub struct SynthesizerCalls {
    pub utterances: Vec<Utterance>,
    pub cancels: usize,
}

pub struct FakeSynthesizer {
    pub calls: Arc<Mutex<SynthesizerCalls>>,
    pub voices: Vec<VoiceInfo>,
}

impl SpeechSynthesizer for FakeSynthesizer {
    fn voices(&self) -> Vec<VoiceInfo> {
        self.voices.clone()
    }

    fn request_speak(&mut self, utterance: Utterance) -> Result<(), ChatError> {
        self.calls.lock().utterances.push(utterance);
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.calls.lock().cancels += 1;
    }
}

#[derive(Default)]
pub struct RecognizerCalls {
    pub sessions: Vec<(SessionId, RecognitionOptions)>,
    pub stops: usize,
}

pub struct FakeRecognizer {
    pub calls: Arc<Mutex<RecognizerCalls>>,
}

impl SpeechRecognizer for FakeRecognizer {
    fn start(&mut self, session: SessionId, options: &RecognitionOptions) -> Result<(), ChatError> {
        self.calls.lock().sessions.push((session, options.clone()));
        Ok(())
    }

    fn stop(&mut self) {
        self.calls.lock().stops += 1;
    }
}

/// A widget wired to fakes, plus the handles to inspect them
pub struct Harness {
    pub widget: ChatWidget<RecordingHandle>,
    pub log: HandleLog,
    pub synth: Arc<Mutex<SynthesizerCalls>>,
    pub rec: Arc<Mutex<RecognizerCalls>>,
}

/// Handle named `name` reporting into `log`
pub fn handle(log: &HandleLog, name: &str) -> RecordingHandle {
    RecordingHandle::new(name, log)
}

impl Harness {
    /// Session id of the most recent utterance request
    pub fn last_utterance_session(&self) -> SessionId {
        self.synth
            .lock()
            .utterances
            .last()
            .map(|u| u.session)
            .expect("no utterance requested")
    }

    /// Session id of the most recent recognition start
    pub fn last_recognition_session(&self) -> SessionId {
        self.rec
            .lock()
            .sessions
            .last()
            .map(|(id, _)| *id)
            .expect("no recognition started")
    }
}

pub const MIC: &str = "mic";

pub fn harness(with_synth: bool, with_rec: bool) -> Harness {
    let log: HandleLog = Arc::default();
    let synth = Arc::new(Mutex::new(SynthesizerCalls::default()));
    let rec = Arc::new(Mutex::new(RecognizerCalls::default()));

    let mut capabilities =
        SpeechCapabilities::new().with_mic_indicator(RecordingHandle::new(MIC, &log));
    if with_synth {
        capabilities = capabilities.with_synthesizer(FakeSynthesizer {
            calls: Arc::clone(&synth),
            voices: vec![
                VoiceInfo::new("Samantha", "en-US"),
                VoiceInfo::new("Microsoft Aria", "en-US"),
            ],
        });
    }
    if with_rec {
        capabilities = capabilities.with_recognizer(FakeRecognizer {
            calls: Arc::clone(&rec),
        });
    }

    let config = ChatConfig::default();
    let widget = ChatWidget::new(&config, capabilities, config.channels())
        .expect("default config is valid");

    Harness {
        widget,
        log,
        synth,
        rec,
    }
}
