//! Lingo engine: capability orchestration, host bridge and storage.
mod capability;
mod engine;
mod host;
mod orchestrator;
mod persist;
mod store;
mod stream;
mod types;

pub use capability::{
    Availability, Capabilities, CapabilityError, ChunkStream, DetectorFactory, DownloadObserver,
    DownloadProgress, LanguageCandidate, LanguageDetector, LanguagePair, NoopObserver, Summarizer,
    SummarizerFactory, SummarizerOptions, Translator, TranslatorFactory,
};
pub use engine::EngineHandle;
pub use host::{HostSettings, HttpHost};
pub use orchestrator::{Orchestrator, OrchestratorError, SUMMARY_CONTEXT};
pub use persist::{ensure_storage_dir, AtomicFileWriter, PersistError};
pub use store::{JsonFileStore, MemoryStore, MessageStore, StoreError, StoredMessage};
pub use stream::{collect_chunks, normalize_whitespace};
pub use types::EngineEvent;
