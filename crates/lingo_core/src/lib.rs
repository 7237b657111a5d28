//! Lingo core: pure chat state machine and view-model helpers.
mod effect;
mod error;
mod message;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::ActionError;
pub use message::{
    is_eligible_for_summary, ActionId, ActionKind, ChatMessage, InFlight, TargetLanguage,
    SUMMARY_LANGUAGE, SUMMARY_MIN_CHARS,
};
pub use msg::Msg;
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, DownloadView, MessageRowView};
