//! End-to-end tests for message submission
//!
//! Typed and recognized input flow through reply selection into the
//! conversation log, optionally followed by speech.

mod common;

use common::{handle, harness, last_state, MIC};
use folio_chat::messages::Sender;
use folio_chat::responder::rules::{FALLBACK_REPLY, HIRING_REPLY};
use folio_chat::speech::{RecognitionEventKind, SpeechEvent, SynthesisState};
use folio_chat::{ResponseSelector, VisualState};

#[test]
fn test_unconfigured_keyword_gets_fallback() {
    let mut h = harness(false, false);
    let reply = h.widget.submit("What is shani's email?", None).unwrap();
    assert_eq!(reply.text, FALLBACK_REPLY);
}

#[test]
fn test_hiring_inquiry_gets_hiring_reply() {
    let mut h = harness(false, false);
    let reply = h.widget.submit("Can I hire you for a job", None).unwrap();
    assert_eq!(reply.text, HIRING_REPLY);
}

#[test]
fn test_case_does_not_change_reply() {
    let selector = ResponseSelector::default();
    assert_eq!(selector.select("HELLO"), selector.select("hello"));
    assert_eq!(selector.select(""), FALLBACK_REPLY);
    assert_eq!(selector.select("xyzzy-unmatched"), FALLBACK_REPLY);
}

#[test]
fn test_portfolio_replies() {
    let mut h = harness(false, false);
    let cases = [
        ("Show me your projects", "Crop Counsel"),
        ("What skills do you have?", "Python, Machine Learning"),
        ("How can I contact Shani", "sunnydevra27052000@gmail.com"),
        ("thanks!", "You're welcome!"),
        ("education background", "Teerthanker Mahavir University"),
        ("any experience?", "AI & Python Developer"),
        ("send me your resume", "Download CV"),
        ("location please", "Uttar Pradesh"),
    ];

    for (input, expected) in cases {
        let reply = h.widget.submit(input, None).unwrap();
        assert!(
            reply.text.contains(expected),
            "{:?} got {:?}",
            input,
            reply.text
        );
    }
}

#[test]
fn test_blank_submission_is_silent() {
    let mut h = harness(true, true);
    assert!(h.widget.submit("    ", Some(handle(&h.log, "reply"))).is_none());
    assert!(h.widget.messages().is_empty());
    assert!(h.synth.lock().utterances.is_empty());
}

#[test]
fn test_opt_in_speech_on_reply() {
    let mut h = harness(true, false);
    let reply = h
        .widget
        .submit("hello", Some(handle(&h.log, "reply")))
        .unwrap();

    let calls = h.synth.lock();
    assert_eq!(calls.utterances.len(), 1);
    assert_eq!(calls.utterances[0].text, reply.text);
    assert_eq!(last_state(&h.log, "reply"), Some(VisualState::Speaking));
}

#[test]
fn test_reply_survives_missing_synthesizer() {
    let mut h = harness(false, false);
    let reply = h.widget.submit("hello", Some(handle(&h.log, "reply")));
    assert!(reply.is_some());
    assert_eq!(h.widget.messages().len(), 2);
}

#[test]
fn test_transcript_submitted_exactly_once() {
    let mut h = harness(false, true);
    let sender = h.widget.speech().event_sender();

    h.widget.toggle_mic().unwrap();
    let id = h.last_recognition_session();

    sender
        .post(SpeechEvent::recognition(
            id,
            RecognitionEventKind::Result("tell me about your skills".into()),
        ))
        .unwrap();
    sender
        .post(SpeechEvent::recognition(id, RecognitionEventKind::End))
        .unwrap();

    let replies = h.widget.poll();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("Python"));

    let log = h.widget.messages().get_all();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].sender, Sender::User);
    assert_eq!(log[0].text, "tell me about your skills");
    assert!(log[0].metadata.from_speech);
    assert_eq!(last_state(&h.log, MIC), Some(VisualState::Idle));

    // Nothing left to deliver
    assert!(h.widget.poll().is_empty());
    assert_eq!(h.widget.messages().len(), 2);
}

#[test]
fn test_blank_transcript_is_not_submitted() {
    let mut h = harness(false, true);
    let sender = h.widget.speech().event_sender();

    h.widget.toggle_mic().unwrap();
    let id = h.last_recognition_session();
    sender
        .post(SpeechEvent::recognition(
            id,
            RecognitionEventKind::Result("  ".into()),
        ))
        .unwrap();

    assert!(h.widget.poll().is_empty());
    assert!(h.widget.messages().is_empty());
}

#[test]
fn test_closing_panel_stops_speech() {
    let mut h = harness(true, false);
    h.widget.open();
    h.widget.submit("hello", Some(handle(&h.log, "reply"))).unwrap();
    assert!(h.widget.speech().synthesis_state().is_active());

    h.widget.close();
    assert!(!h.widget.is_open());
    assert_eq!(h.widget.speech().synthesis_state(), SynthesisState::Idle);
    assert_eq!(last_state(&h.log, "reply"), Some(VisualState::Idle));
}
