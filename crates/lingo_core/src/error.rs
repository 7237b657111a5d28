use thiserror::Error;

/// User-visible failure of a chat action. The `Display` text is what the
/// interface shows in its error line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Please enter text before sending.")]
    EmptyInput,
    #[error("Summarizer failed to initialize.")]
    SummarizerUnavailable,
    #[error("Summarization failed.")]
    SummarizationFailed,
    #[error("Text or language detection failed.")]
    MissingLanguage,
    #[error("Error initializing translator.")]
    TranslatorUnavailable,
    #[error("Translation failed.")]
    TranslationFailed,
}
