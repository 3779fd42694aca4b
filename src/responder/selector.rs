use super::rules::RuleTable;
use tracing::debug;

/// Picks a canned reply for a message
///
/// Pure first-match lookup: the input is lower-cased and the table is scanned
/// in order until an entry's keyword occurs in it. The trailing catch-all
/// guarantees an answer for every input, including the empty string.
#[derive(Debug, Clone, Default)]
pub struct ResponseSelector {
    rules: RuleTable,
}

impl ResponseSelector {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn select(&self, input: &str) -> &str {
        let normalized = input.to_lowercase();

        for (index, entry) in self.rules.entries().iter().enumerate() {
            if entry.matches(&normalized) {
                debug!("Rule {} matched", index);
                return &entry.reply;
            }
        }

        self.rules.fallback_reply()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}
