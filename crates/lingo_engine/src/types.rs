use crate::{DownloadProgress, OrchestratorError};

/// Results reported by the engine worker back to the UI loop.
///
/// `action` echoes the id the caller attached to the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    LanguageDetected {
        text: String,
        language: Option<String>,
    },
    DownloadProgress {
        action: u64,
        index: usize,
        progress: DownloadProgress,
    },
    SummaryFinished {
        action: u64,
        index: usize,
        result: Result<String, OrchestratorError>,
    },
    TranslationFinished {
        action: u64,
        index: usize,
        result: Result<String, OrchestratorError>,
    },
}
