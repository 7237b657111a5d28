use lingo_core::ChatMessage;
use lingo_engine::{MessageStore, StoredMessage};
use lingo_logging::{lingo_error, lingo_info, lingo_warn};

fn to_stored(message: &ChatMessage) -> StoredMessage {
    StoredMessage {
        text: message.text().to_string(),
        detected_language: message.detected_language().map(str::to_string),
        summary: message.summary().to_string(),
        translation: message.translation().to_string(),
        eligible_for_summary: message.eligible_for_summary(),
    }
}

fn from_stored(stored: StoredMessage) -> ChatMessage {
    ChatMessage::restore(
        stored.text,
        stored.detected_language,
        stored.summary,
        stored.translation,
        stored.eligible_for_summary,
    )
}

/// Loads the chat history; unreadable history starts an empty chat.
pub(crate) fn load_messages(store: &dyn MessageStore) -> Vec<ChatMessage> {
    match store.load() {
        Ok(stored) => {
            if !stored.is_empty() {
                lingo_info!("Restored {} stored messages", stored.len());
            }
            stored.into_iter().map(from_stored).collect()
        }
        Err(err) => {
            lingo_warn!("Failed to load stored messages: {}", err);
            Vec::new()
        }
    }
}

pub(crate) fn save_messages(store: &dyn MessageStore, messages: &[ChatMessage]) {
    let stored: Vec<StoredMessage> = messages.iter().map(to_stored).collect();
    if let Err(err) = store.save(&stored) {
        lingo_error!("Failed to persist {} messages: {}", stored.len(), err);
    }
}

pub(crate) fn clear_messages(store: &dyn MessageStore) {
    if let Err(err) = store.clear() {
        lingo_error!("Failed to clear stored messages: {}", err);
    }
}
