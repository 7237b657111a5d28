use crate::view_model::{AppViewModel, DownloadView, MessageRowView};
use crate::{ActionError, ActionId, ActionKind, ChatMessage, InFlight, TargetLanguage};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    draft: String,
    messages: Vec<ChatMessage>,
    target_language: TargetLanguage,
    error: Option<ActionError>,
    loading: Option<InFlight>,
    detecting: bool,
    download: Option<DownloadView>,
    next_action: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_language(target_language: TargetLanguage) -> Self {
        Self {
            target_language,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn loading(&self) -> Option<InFlight> {
        self.loading
    }

    pub fn error(&self) -> Option<&ActionError> {
        self.error.as_ref()
    }

    pub fn is_detecting(&self) -> bool {
        self.detecting
    }

    /// True while any capability call (detection included) is outstanding.
    pub fn is_busy(&self) -> bool {
        self.loading.is_some() || self.detecting
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.is_busy();
        let messages = self
            .messages
            .iter()
            .enumerate()
            .map(|(index, msg)| {
                let active = self.loading.filter(|slot| slot.index == index).map(|slot| slot.kind);
                MessageRowView {
                    index,
                    text: msg.text().to_string(),
                    language: msg.detected_language().unwrap_or("unknown").to_string(),
                    show_summarize: msg.eligible_for_summary(),
                    summarize_label: if active == Some(ActionKind::Summarizing) {
                        "Summarizing..."
                    } else {
                        "Summarize"
                    },
                    summarize_enabled: !busy,
                    translate_label: if active == Some(ActionKind::Translating) {
                        "Translating..."
                    } else {
                        "Translate"
                    },
                    translate_enabled: !busy,
                    summary: non_empty(msg.summary()),
                    translation: non_empty(msg.translation()),
                }
            })
            .collect();

        AppViewModel {
            draft: self.draft.clone(),
            can_send: !self.draft.trim().is_empty() && !busy,
            target_language: self.target_language,
            messages,
            error: self.error.as_ref().map(ToString::to_string),
            busy,
            download: self.download,
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn draft(&self) -> &str {
        &self.draft
    }

    pub(crate) fn set_draft(&mut self, draft: String) {
        if self.draft != draft {
            self.draft = draft;
            self.mark_dirty();
        }
    }

    /// Takes the draft for sending and marks detection as pending.
    pub(crate) fn begin_send(&mut self) -> String {
        self.error = None;
        self.detecting = true;
        self.mark_dirty();
        std::mem::take(&mut self.draft)
    }

    pub(crate) fn append_message(&mut self, message: ChatMessage) {
        self.detecting = false;
        self.messages.push(message);
        self.mark_dirty();
    }

    pub(crate) fn replace_messages(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.loading = None;
        self.download = None;
        self.mark_dirty();
    }

    pub(crate) fn set_target_language(&mut self, target: TargetLanguage) {
        if self.target_language != target {
            self.target_language = target;
            self.mark_dirty();
        }
    }

    pub(crate) fn target_language(&self) -> TargetLanguage {
        self.target_language
    }

    pub(crate) fn set_error(&mut self, error: ActionError) {
        self.error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn start_action(&mut self, index: usize, kind: ActionKind) -> ActionId {
        self.next_action += 1;
        let id = ActionId(self.next_action);
        self.loading = Some(InFlight { id, index, kind });
        self.error = None;
        self.download = None;
        self.mark_dirty();
        id
    }

    /// Frees the loading slot if it is held by exactly this action.
    pub(crate) fn finish_action(&mut self, id: ActionId, index: usize, kind: ActionKind) -> bool {
        if self.loading == Some(InFlight { id, index, kind }) {
            self.loading = None;
            self.download = None;
            self.mark_dirty();
            true
        } else {
            false
        }
    }

    pub(crate) fn set_download(&mut self, loaded: u64, total: u64) {
        self.download = Some(DownloadView { loaded, total });
        self.mark_dirty();
    }

    pub(crate) fn message_mut(&mut self, index: usize) -> Option<&mut ChatMessage> {
        self.messages.get_mut(index)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
