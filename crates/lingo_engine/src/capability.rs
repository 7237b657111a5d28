//! Contracts for the host-provided AI capabilities.
//!
//! Each capability is a factory that may be missing entirely (see
//! [`Capabilities`]) and that hands out session handles. Output of the
//! summarizer and translator arrives as a finite, non-restartable
//! [`ChunkStream`].

use std::sync::Arc;

use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Incremental text output of a capability, in emission order.
pub type ChunkStream = BoxStream<'static, Result<String, CapabilityError>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("capability not provided by host")]
    Unavailable,
    #[error("capability reported as unusable")]
    Unusable,
    #[error("host never signalled readiness")]
    NotReady,
    #[error("host returned status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed host response: {0}")]
    Protocol(String),
    #[error("stream failed: {0}")]
    Stream(String),
}

/// Summarizer availability tri-state as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    /// Unusable on this host.
    No,
    /// Usable once the on-device model has been downloaded.
    #[serde(alias = "needs-download")]
    AfterDownload,
    Readily,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageCandidate {
    #[serde(rename = "detectedLanguage")]
    pub detected_language: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizerOptions {
    pub format: String,
    pub length: String,
    pub max_length: u32,
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self {
            format: "plain-text".to_string(),
            length: "short".to_string(),
            max_length: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePair {
    pub source_language: String,
    pub target_language: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_language: source.into(),
            target_language: target.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub loaded: u64,
    pub total: u64,
}

/// Receives model download progress. Purely observational: readiness is
/// signalled by [`Summarizer::ready`] returning, not by progress reaching 100%.
pub trait DownloadObserver: Send + Sync {
    fn on_progress(&self, progress: DownloadProgress);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DownloadObserver for NoopObserver {
    fn on_progress(&self, _progress: DownloadProgress) {}
}

#[async_trait::async_trait]
pub trait DetectorFactory: Send + Sync {
    async fn create(&self) -> Result<Box<dyn LanguageDetector>, CapabilityError>;
}

#[async_trait::async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Candidates ordered most likely first.
    async fn detect(&self, text: &str) -> Result<Vec<LanguageCandidate>, CapabilityError>;
}

#[async_trait::async_trait]
pub trait SummarizerFactory: Send + Sync {
    async fn availability(&self) -> Result<Availability, CapabilityError>;

    async fn create(
        &self,
        options: &SummarizerOptions,
    ) -> Result<Box<dyn Summarizer>, CapabilityError>;
}

#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Resolves once the session can summarize, reporting download progress
    /// to `observer` along the way.
    async fn ready(&self, observer: &dyn DownloadObserver) -> Result<(), CapabilityError>;

    async fn summarize(&self, text: &str, context: &str) -> Result<ChunkStream, CapabilityError>;
}

#[async_trait::async_trait]
pub trait TranslatorFactory: Send + Sync {
    async fn create(&self, pair: &LanguagePair) -> Result<Box<dyn Translator>, CapabilityError>;
}

#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<ChunkStream, CapabilityError>;
}

/// The capabilities a host exposes. `None` means the host lacks the feature.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub detector: Option<Arc<dyn DetectorFactory>>,
    pub summarizer: Option<Arc<dyn SummarizerFactory>>,
    pub translator: Option<Arc<dyn TranslatorFactory>>,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }
}
