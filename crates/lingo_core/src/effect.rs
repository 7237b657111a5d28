use crate::{ActionId, ChatMessage, TargetLanguage};

/// Side effects requested by [`crate::update`]; executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    DetectLanguage {
        text: String,
    },
    Summarize {
        action: ActionId,
        index: usize,
        text: String,
    },
    Translate {
        action: ActionId,
        index: usize,
        text: String,
        source: String,
        target: TargetLanguage,
    },
    /// Rewrite the persisted message list with this snapshot.
    PersistMessages(Vec<ChatMessage>),
    /// Remove the persisted entry entirely.
    ClearStorage,
}
