use super::types::Message;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory conversation log for the open page
#[derive(Debug, Clone)]
pub struct MessageStorage {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStorage {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add(&self, message: Message) {
        self.messages.write().push(message);
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Message> {
        self.messages.read().iter().find(|m| m.id == id).cloned()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let storage = MessageStorage::new();
        assert!(storage.is_empty());

        let question = Message::user("hello");
        let answer = Message::assistant("Hello! How can I help you today?");
        let answer_id = answer.id;

        storage.add(question);
        storage.add(answer);

        assert_eq!(storage.len(), 2);
        assert!(storage.get_all()[0].is_user());
        assert_eq!(storage.get(answer_id).unwrap().text, "Hello! How can I help you today?");
        assert_eq!(storage.last().unwrap().id, answer_id);
        assert!(storage.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_clones_share_log() {
        let storage = MessageStorage::new();
        let view = storage.clone();
        storage.add(Message::user("hi"));
        assert_eq!(view.len(), 1);

        view.clear();
        assert!(storage.is_empty());
    }
}
