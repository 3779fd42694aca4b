//! Keyword rule table
//!
//! An ordered list of keyword-set/reply pairs. Order is part of the content:
//! the first entry with a matching keyword wins, and the single catch-all
//! entry (no keywords) closes the table.

use crate::{ChatError, Result};
use serde::Deserialize;

/// A single keyword rule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleEntry {
    /// Case-insensitive substrings, any of which selects this entry
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Canned reply returned verbatim
    pub reply: String,
}

impl RuleEntry {
    /// Create a keyword rule
    pub fn new<I, S>(keywords: I, reply: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            reply: reply.into(),
        }
    }

    /// Create the catch-all rule
    pub fn fallback(reply: impl Into<String>) -> Self {
        Self {
            keywords: Vec::new(),
            reply: reply.into(),
        }
    }

    /// Whether this entry matches every input
    pub fn is_fallback(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Check the entry against already lower-cased input
    pub fn matches(&self, normalized: &str) -> bool {
        self.is_fallback() || self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    rules: Vec<RuleEntry>,
}

/// Ordered, immutable rule table ending in a catch-all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    entries: Vec<RuleEntry>,
}

impl RuleTable {
    /// Build a table, lower-casing keywords and checking the table shape
    pub fn new(entries: Vec<RuleEntry>) -> Result<Self> {
        let last = entries.len().checked_sub(1).ok_or_else(|| {
            ChatError::ConfigError("Rule table must contain at least one entry".into())
        })?;

        let mut normalized = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.is_fallback() && index != last {
                return Err(ChatError::ConfigError(format!(
                    "Catch-all rule at position {} shadows the rules after it",
                    index
                )));
            }

            let mut keywords = Vec::with_capacity(entry.keywords.len());
            for keyword in entry.keywords {
                if keyword.trim().is_empty() {
                    return Err(ChatError::ConfigError(format!(
                        "Rule {} has an empty keyword",
                        index
                    )));
                }
                keywords.push(keyword.to_lowercase());
            }

            normalized.push(RuleEntry {
                keywords,
                reply: entry.reply,
            });
        }

        if !normalized[last].is_fallback() {
            return Err(ChatError::ConfigError(
                "Rule table must end with a catch-all rule".into(),
            ));
        }

        Ok(Self { entries: normalized })
    }

    /// Parse a table from TOML (`[[rules]]` array of tables)
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: RuleFile = toml::from_str(source)
            .map_err(|e| ChatError::ConfigError(format!("Invalid rule table: {}", e)))?;
        Self::new(file.rules)
    }

    /// The built-in portfolio table
    pub fn portfolio() -> Self {
        Self {
            entries: default_entries(),
        }
    }

    /// Entries in evaluation order
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    /// The catch-all reply
    pub fn fallback_reply(&self) -> &str {
        // Construction guarantees a trailing catch-all
        self.entries
            .last()
            .map(|e| e.reply.as_str())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::portfolio()
    }
}

pub const HIRING_REPLY: &str = "Shani is available for freelance projects and full-time opportunities. You can contact him through the Contact section.";
pub const GREETING_REPLY: &str = "Hello! How can I help you today?";
pub const FALLBACK_REPLY: &str = "I'm an AI assistant created to help you learn more about Shani Devra. You can ask me about his projects, skills, education, or contact information.";

// "hire" contains "hi", so hiring has to be checked before greetings.
fn default_entries() -> Vec<RuleEntry> {
    vec![
        RuleEntry::new(["hire", "job"], HIRING_REPLY),
        RuleEntry::new(["hello", "hi", "hey"], GREETING_REPLY),
        RuleEntry::new(
            ["project"],
            "Shani has worked on several projects including Crop Counsel, AI Chatbot, and Heart Disease Prediction. Check out the Projects section for more details!",
        ),
        RuleEntry::new(
            ["skill"],
            "Shani specializes in Python, Machine Learning, Flask, and AI integration. See the Skills section for the complete list.",
        ),
        RuleEntry::new(
            ["contact"],
            "You can contact Shani via email at sunnydevra27052000@gmail.com or phone +91 7060085834.",
        ),
        RuleEntry::new(
            ["name"],
            "My name is AI Assistant, and I'm here to help you learn more about Shani Devra's work.",
        ),
        RuleEntry::new(
            ["thank"],
            "You're welcome! Feel free to ask if you have more questions.",
        ),
        RuleEntry::new(
            ["help"],
            "I can tell you about Shani's projects, skills, education, and contact information. What would you like to know?",
        ),
        RuleEntry::new(
            ["education"],
            "Shani completed his MCA from Teerthanker Mahavir University with specialization in Artificial Intelligence & Machine Learning.",
        ),
        RuleEntry::new(
            ["experience"],
            "Shani is an AI & Python Developer with experience in building real-time conversational AI systems and scalable automation solutions.",
        ),
        RuleEntry::new(
            ["cv", "resume"],
            "You can download Shani's CV by clicking the 'Download CV' button in the About section.",
        ),
        RuleEntry::new(
            ["location", "where"],
            "Shani is based in Gohawar Jait, Bijnor, Uttar Pradesh, India.",
        ),
        RuleEntry::fallback(FALLBACK_REPLY),
    ]
}
