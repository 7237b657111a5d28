use std::io::{self, Write};
use std::sync::{mpsc, Arc};

use anyhow::Context;
use lingo_core::{update, AppState, Msg};
use lingo_engine::{EngineHandle, HttpHost, JsonFileStore, MessageStore, Orchestrator};
use lingo_logging::{lingo_info, lingo_warn};

use super::config::AppConfig;
use super::effects::{spawn_event_forwarder, EffectRunner};
use super::{input, logging, persistence, render, AppEvent};

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    logging::initialize(
        config.log_destination,
        &config.log_file,
        lingo_logging::default_level(),
    );
    lingo_info!("Starting lingo against host {}", config.host_url);

    let store: Arc<dyn MessageStore> = Arc::new(
        JsonFileStore::new(config.storage_dir.clone(), &config.storage_key)
            .context("opening message store")?,
    );
    let host = HttpHost::new(config.host_settings()).context("configuring AI host")?;
    let orchestrator =
        Orchestrator::new(host.capabilities()).with_summary_context(config.summary_context.clone());
    let (engine, engine_events) = EngineHandle::spawn(orchestrator).context("starting engine")?;

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_event_forwarder(engine_events, tx.clone());
    input::spawn_stdin_reader(tx);

    let runner = EffectRunner::new(engine, store.clone());
    let target = config.target_language().unwrap_or_else(|| {
        lingo_warn!(
            "Unsupported default target language {:?}; using English",
            config.default_target_language
        );
        Default::default()
    });
    let mut shell = Shell {
        state: AppState::with_target_language(target),
        runner,
        out: io::stdout(),
    };

    shell.print(input::HELP)?;
    shell.dispatch(vec![Msg::RestoreMessages(persistence::load_messages(
        store.as_ref(),
    ))])?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Msgs(msgs) => shell.dispatch(msgs)?,
            AppEvent::Help => shell.print(input::HELP)?,
            AppEvent::Invalid(reason) => shell.print(&reason)?,
            AppEvent::Quit => break,
        }
    }

    lingo_info!("Shutting down");
    Ok(())
}

struct Shell<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> Shell<W> {
    fn dispatch(&mut self, msgs: Vec<Msg>) -> io::Result<()> {
        for msg in msgs {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            self.runner.run(effects);
        }
        if self.state.consume_dirty() {
            let view = self.state.view();
            self.print(&render::render(&view))?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.trim_end())?;
        self.out.flush()
    }
}
