//! Terminal shell around the core state machine: config, logging, input,
//! rendering, effect execution and persistence.
mod app;
mod config;
mod effects;
mod input;
mod logging;
mod persistence;
mod render;

pub use app::run_app;

use lingo_core::Msg;

/// Everything the main loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppEvent {
    /// Messages applied back to back before a single render.
    Msgs(Vec<Msg>),
    Help,
    /// Input line that could not be understood.
    Invalid(String),
    Quit,
}
