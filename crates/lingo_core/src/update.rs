use crate::{ActionError, ActionKind, AppState, ChatMessage, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_draft(text);
            Vec::new()
        }
        Msg::SendClicked => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            if state.draft().trim().is_empty() {
                state.set_error(ActionError::EmptyInput);
                return (state, Vec::new());
            }
            let text = state.begin_send();
            vec![Effect::DetectLanguage { text }]
        }
        Msg::LanguageDetected { text, language } => {
            state.append_message(ChatMessage::new(text, language));
            vec![persist(&state)]
        }
        Msg::TargetLanguageChanged(target) => {
            state.set_target_language(target);
            Vec::new()
        }
        Msg::SummarizeClicked { index } => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            let text = match state.messages().get(index) {
                Some(message) if message.eligible_for_summary() => message.text().to_string(),
                _ => return (state, Vec::new()),
            };
            let action = state.start_action(index, ActionKind::Summarizing);
            vec![Effect::Summarize {
                action,
                index,
                text,
            }]
        }
        Msg::TranslateClicked { index } => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            let Some((text, detected)) = state.messages().get(index).map(|message| {
                (
                    message.text().to_string(),
                    message.detected_language().map(str::to_string),
                )
            }) else {
                return (state, Vec::new());
            };
            let source = match detected {
                Some(source) if !text.is_empty() => source,
                _ => {
                    state.set_error(ActionError::MissingLanguage);
                    return (state, Vec::new());
                }
            };
            let target = state.target_language();
            let action = state.start_action(index, ActionKind::Translating);
            vec![Effect::Translate {
                action,
                index,
                text,
                source,
                target,
            }]
        }
        Msg::DownloadProgress {
            action,
            loaded,
            total,
        } => {
            let summarizing = matches!(
                state.loading(),
                Some(slot) if slot.id == action && slot.kind == ActionKind::Summarizing
            );
            if summarizing {
                state.set_download(loaded, total);
            }
            Vec::new()
        }
        Msg::SummaryFinished {
            action,
            index,
            result,
        } => {
            if !state.finish_action(action, index, ActionKind::Summarizing) {
                return (state, Vec::new());
            }
            match result {
                Ok(summary) => match state.message_mut(index) {
                    Some(message) => {
                        message.set_summary(summary);
                        vec![persist(&state)]
                    }
                    None => Vec::new(),
                },
                Err(err) => {
                    state.set_error(err);
                    Vec::new()
                }
            }
        }
        Msg::TranslationFinished {
            action,
            index,
            result,
        } => {
            if !state.finish_action(action, index, ActionKind::Translating) {
                return (state, Vec::new());
            }
            match result {
                Ok(translation) => match state.message_mut(index) {
                    Some(message) => {
                        message.set_translation(translation);
                        vec![persist(&state)]
                    }
                    None => Vec::new(),
                },
                Err(err) => {
                    state.set_error(err);
                    Vec::new()
                }
            }
        }
        Msg::ClearAllClicked => {
            state.replace_messages(Vec::new());
            vec![Effect::ClearStorage]
        }
        Msg::RestoreMessages(messages) => {
            state.replace_messages(messages);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.clear_error();
            Vec::new()
        }
    };

    (state, effects)
}

fn persist(state: &AppState) -> Effect {
    Effect::PersistMessages(state.messages().to_vec())
}
