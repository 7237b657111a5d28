use crate::{ActionError, ActionId, ChatMessage, TargetLanguage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input box.
    InputChanged(String),
    /// User pressed send with the current draft.
    SendClicked,
    /// Detection finished for a submitted draft; `None` means unknown.
    LanguageDetected {
        text: String,
        language: Option<String>,
    },
    /// User picked a new translation target.
    TargetLanguageChanged(TargetLanguage),
    SummarizeClicked {
        index: usize,
    },
    TranslateClicked {
        index: usize,
    },
    /// Summarizer model download progress, observational only.
    DownloadProgress {
        action: ActionId,
        loaded: u64,
        total: u64,
    },
    SummaryFinished {
        action: ActionId,
        index: usize,
        result: Result<String, ActionError>,
    },
    TranslationFinished {
        action: ActionId,
        index: usize,
        result: Result<String, ActionError>,
    },
    ClearAllClicked,
    /// Restore the message list loaded from storage at startup.
    RestoreMessages(Vec<ChatMessage>),
    ErrorDismissed,
}
