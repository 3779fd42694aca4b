use anyhow::{Context, Result};
use folio_chat::messages::Message;
use folio_chat::speech::{ConsoleSynthesizer, SessionOutcome, SpeechCapabilities};
use folio_chat::{ChatConfig, ChatWidget, VisualHandle, VisualState};
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal stand-in for a page button
struct TerminalHandle {
    label: String,
}

impl TerminalHandle {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl VisualHandle for TerminalHandle {
    fn same_affordance(&self, other: &Self) -> bool {
        self.label == other.label
    }

    fn apply(&self, state: VisualState) {
        println!("  [{}: {}]", self.label, state);
    }
}

fn print_reply(reply: &Message) {
    println!("bot> {}", reply.text);
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_chat=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting folio-chat console host");

    let config = match std::env::var_os("FOLIO_CHAT_CONFIG") {
        Some(path) => ChatConfig::load(&path)
            .with_context(|| format!("loading {}", path.to_string_lossy()))?,
        None => ChatConfig::default(),
    };

    let channels = config.channels();
    let capabilities = SpeechCapabilities::new()
        .with_synthesizer(ConsoleSynthesizer::stdout(channels.sender()))
        .with_mic_indicator(TerminalHandle::new("mic"));

    let mut widget = ChatWidget::new(&config, capabilities, channels)?;
    widget.open();

    println!("Ask about projects, skills, contact, education...");
    println!("Commands: /say /mic /open /close /quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.trim() {
            "/quit" => break,
            "/open" => widget.open(),
            "/close" => widget.close(),
            "/mic" => {
                if let Err(e) = widget.toggle_mic() {
                    println!("  {}", e.user_message());
                }
            }
            "/say" => {
                let last_reply = widget
                    .messages()
                    .get_all()
                    .into_iter()
                    .rev()
                    .find(|m| !m.is_user());
                match last_reply {
                    Some(reply) => {
                        let handle = TerminalHandle::new(format!("reply {}", reply.id));
                        match widget.toggle_audio(handle, &reply.text) {
                            Ok(SessionOutcome::Started(id)) => info!("Speaking session {}", id),
                            Ok(SessionOutcome::Stopped) => info!("Speech stopped"),
                            Err(e) => println!("  {}", e.user_message()),
                        }
                    }
                    None => println!("  Nothing to read aloud yet."),
                }
            }
            text if !widget.is_open() && !text.is_empty() => {
                println!("  (panel closed, type /open)");
            }
            text => {
                if let Some(reply) = widget.submit(text, None) {
                    print_reply(&reply);
                }
            }
        }

        for reply in widget.poll() {
            print_reply(&reply);
        }
    }

    widget.stop_speech();
    info!("Console host stopped");
    Ok(())
}
