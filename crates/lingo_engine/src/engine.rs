use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use lingo_logging::{lingo_debug, lingo_warn};

use crate::{DownloadObserver, DownloadProgress, EngineEvent, Orchestrator};

enum EngineCommand {
    Detect {
        text: String,
    },
    Summarize {
        action: u64,
        index: usize,
        text: String,
    },
    Translate {
        action: u64,
        index: usize,
        text: String,
        source: String,
        target: String,
    },
}

/// Sends capability work to a background tokio runtime.
///
/// Events come back on the receiver returned by [`EngineHandle::spawn`].
/// Dropping every handle shuts the worker down; in-flight streams are
/// abandoned.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(orchestrator: Orchestrator) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let orchestrator = Arc::new(orchestrator);

        thread::Builder::new()
            .name("lingo-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let orchestrator = orchestrator.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(&orchestrator, command, event_tx).await;
                    });
                }
                lingo_debug!("Engine command channel closed");
            })?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn detect(&self, text: impl Into<String>) {
        self.send(EngineCommand::Detect { text: text.into() });
    }

    pub fn summarize(&self, action: u64, index: usize, text: impl Into<String>) {
        self.send(EngineCommand::Summarize {
            action,
            index,
            text: text.into(),
        });
    }

    pub fn translate(
        &self,
        action: u64,
        index: usize,
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) {
        self.send(EngineCommand::Translate {
            action,
            index,
            text: text.into(),
            source: source.into(),
            target: target.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            lingo_warn!("Engine worker is gone; command dropped");
        }
    }
}

struct ChannelObserver {
    action: u64,
    index: usize,
    tx: mpsc::Sender<EngineEvent>,
}

impl DownloadObserver for ChannelObserver {
    fn on_progress(&self, progress: DownloadProgress) {
        let _ = self.tx.send(EngineEvent::DownloadProgress {
            action: self.action,
            index: self.index,
            progress,
        });
    }
}

async fn handle_command(
    orchestrator: &Orchestrator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Detect { text } => {
            let language = orchestrator.detect(&text).await;
            EngineEvent::LanguageDetected { text, language }
        }
        EngineCommand::Summarize {
            action,
            index,
            text,
        } => {
            let observer = ChannelObserver {
                action,
                index,
                tx: event_tx.clone(),
            };
            let result = orchestrator.run_summarize(&text, &observer).await;
            EngineEvent::SummaryFinished {
                action,
                index,
                result,
            }
        }
        EngineCommand::Translate {
            action,
            index,
            text,
            source,
            target,
        } => {
            let result = orchestrator
                .run_translate(&text, Some(&source), &target)
                .await;
            EngineEvent::TranslationFinished {
                action,
                index,
                result,
            }
        }
    };
    let _ = event_tx.send(event);
}
