use crate::TargetLanguage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadView {
    pub loaded: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub draft: String,
    pub can_send: bool,
    pub target_language: TargetLanguage,
    pub messages: Vec<MessageRowView>,
    pub error: Option<String>,
    /// A capability call is outstanding; every trigger is disabled.
    pub busy: bool,
    pub download: Option<DownloadView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRowView {
    pub index: usize,
    pub text: String,
    pub language: String,
    pub show_summarize: bool,
    pub summarize_label: &'static str,
    pub summarize_enabled: bool,
    pub translate_label: &'static str,
    pub translate_enabled: bool,
    pub summary: Option<String>,
    pub translation: Option<String>,
}
