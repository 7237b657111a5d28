use std::sync::{mpsc, Arc};
use std::thread;

use lingo_core::{ActionError, ActionId, Effect, Msg};
use lingo_engine::{EngineEvent, EngineHandle, MessageStore, OrchestratorError};
use lingo_logging::{lingo_debug, lingo_info, lingo_warn};

use super::persistence;
use super::AppEvent;

/// Executes core effects: capability work goes to the engine, storage
/// writes happen inline.
pub struct EffectRunner {
    engine: EngineHandle,
    store: Arc<dyn MessageStore>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: Arc<dyn MessageStore>) -> Self {
        Self { engine, store }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DetectLanguage { text } => {
                    lingo_info!("DetectLanguage text_len={}", text.len());
                    self.engine.detect(text);
                }
                Effect::Summarize {
                    action,
                    index,
                    text,
                } => {
                    lingo_info!(
                        "Summarize action={} index={} text_len={}",
                        action.0,
                        index,
                        text.len()
                    );
                    self.engine.summarize(action.0, index, text);
                }
                Effect::Translate {
                    action,
                    index,
                    text,
                    source,
                    target,
                } => {
                    lingo_info!(
                        "Translate action={} index={} {}->{}",
                        action.0,
                        index,
                        source,
                        target.code()
                    );
                    self.engine
                        .translate(action.0, index, text, source, target.code());
                }
                Effect::PersistMessages(messages) => {
                    lingo_debug!("Persisting {} messages", messages.len());
                    persistence::save_messages(self.store.as_ref(), &messages);
                }
                Effect::ClearStorage => {
                    lingo_info!("Clearing stored messages");
                    persistence::clear_messages(self.store.as_ref());
                }
            }
        }
    }
}

/// Forwards engine events into the main loop until either side hangs up.
pub fn spawn_event_forwarder(events: mpsc::Receiver<EngineEvent>, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if tx.send(AppEvent::Msgs(vec![map_event(event)])).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LanguageDetected { text, language } => Msg::LanguageDetected { text, language },
        EngineEvent::DownloadProgress {
            action, progress, ..
        } => Msg::DownloadProgress {
            action: ActionId(action),
            loaded: progress.loaded,
            total: progress.total,
        },
        EngineEvent::SummaryFinished {
            action,
            index,
            result,
        } => Msg::SummaryFinished {
            action: ActionId(action),
            index,
            result: result.map_err(|err| map_error(index, &err)),
        },
        EngineEvent::TranslationFinished {
            action,
            index,
            result,
        } => Msg::TranslationFinished {
            action: ActionId(action),
            index,
            result: result.map_err(|err| map_error(index, &err)),
        },
    }
}

fn map_error(index: usize, err: &OrchestratorError) -> ActionError {
    match err {
        OrchestratorError::SummarizationFailed(cause) | OrchestratorError::TranslationFailed(cause) => {
            lingo_warn!("Action on message {} failed: {} ({})", index, err, cause);
        }
        _ => lingo_warn!("Action on message {} failed: {}", index, err),
    }
    match err {
        OrchestratorError::SummarizerUnavailable => ActionError::SummarizerUnavailable,
        OrchestratorError::SummarizationFailed(_) => ActionError::SummarizationFailed,
        OrchestratorError::MissingLanguage => ActionError::MissingLanguage,
        OrchestratorError::TranslatorUnavailable => ActionError::TranslatorUnavailable,
        OrchestratorError::TranslationFailed(_) => ActionError::TranslationFailed,
    }
}
