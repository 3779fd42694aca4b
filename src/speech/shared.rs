//! Thread-safe wrapper around the session controller
//!
//! The controller assumes a single writer. Hosts that deliver capability
//! events from a worker thread share it through `SharedSpeechController`,
//! which serializes every operation behind one mutex.

use super::capability::{Capability, SessionId};
use super::controller::{RecognitionState, SessionOutcome, SpeechSessionController, SynthesisState};
use crate::ui::VisualHandle;
use crate::Result;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

pub struct SharedSpeechController<H: VisualHandle> {
    inner: Arc<Mutex<SpeechSessionController<H>>>,
}

impl<H: VisualHandle> Clone for SharedSpeechController<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: VisualHandle> SharedSpeechController<H> {
    pub fn new(controller: SpeechSessionController<H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Lock the controller for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, SpeechSessionController<H>> {
        self.inner.lock()
    }

    pub fn speak(&self, text: &str, handle: H) -> Result<SessionId> {
        self.inner.lock().speak(text, handle)
    }

    pub fn stop_all(&self) {
        self.inner.lock().stop_all();
    }

    pub fn toggle(&self, handle: H, text: &str) -> Result<SessionOutcome> {
        self.inner.lock().toggle(handle, text)
    }

    pub fn listen(&self) -> Result<SessionOutcome> {
        self.inner.lock().listen()
    }

    pub fn poll_events(&self) -> Vec<String> {
        self.inner.lock().poll_events()
    }

    pub fn is_available(&self, capability: Capability) -> bool {
        self.inner.lock().is_available(capability)
    }

    pub fn synthesis_state(&self) -> SynthesisState {
        self.inner.lock().synthesis_state()
    }

    pub fn recognition_state(&self) -> RecognitionState {
        self.inner.lock().recognition_state()
    }
}
