use lingo_logging::{lingo_debug, lingo_info, lingo_warn};
use thiserror::Error;

use crate::stream::{collect_chunks, normalize_whitespace};
use crate::{
    Availability, Capabilities, CapabilityError, DownloadObserver, LanguagePair, Summarizer,
    SummarizerOptions, Translator,
};

/// Audience hint passed with every summarize call.
pub const SUMMARY_CONTEXT: &str = "This article is intended for a tech-savvy audience.";

/// Failure of a summarize/translate action. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error("Summarizer failed to initialize.")]
    SummarizerUnavailable,
    #[error("Summarization failed.")]
    SummarizationFailed(#[source] CapabilityError),
    #[error("Text or language detection failed.")]
    MissingLanguage,
    #[error("Error initializing translator.")]
    TranslatorUnavailable,
    #[error("Translation failed.")]
    TranslationFailed(#[source] CapabilityError),
}

/// Coordinates the detector, summarizer and translator capabilities.
///
/// Handles are created lazily per action and dropped afterwards. Every
/// capability failure is logged and degraded here; callers only ever see
/// `None` or an [`OrchestratorError`].
#[derive(Clone)]
pub struct Orchestrator {
    capabilities: Capabilities,
    summarizer_options: SummarizerOptions,
    summary_context: String,
}

impl Orchestrator {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            summarizer_options: SummarizerOptions::default(),
            summary_context: SUMMARY_CONTEXT.to_string(),
        }
    }

    pub fn with_summary_context(mut self, context: impl Into<String>) -> Self {
        self.summary_context = context.into();
        self
    }

    /// Best-guess language of `text`, or `None` when unknown.
    pub async fn detect(&self, text: &str) -> Option<String> {
        let Some(factory) = self.capabilities.detector.as_ref() else {
            lingo_warn!("Language detector is not available on this host");
            return None;
        };

        let detector = match factory.create().await {
            Ok(detector) => detector,
            Err(err) => {
                lingo_warn!("Language detector creation failed: {}", err);
                return None;
            }
        };

        match detector.detect(text).await {
            Ok(candidates) => {
                let best = candidates.into_iter().next().map(|c| c.detected_language);
                match &best {
                    Some(language) => lingo_info!("Detected language {}", language),
                    None => lingo_warn!("Language detector returned no candidates"),
                }
                best
            }
            Err(err) => {
                lingo_warn!("Language detection failed: {}", err);
                None
            }
        }
    }

    /// Acquires a ready summarizer, waiting out a model download if needed.
    pub async fn prepare_summarizer(
        &self,
        observer: &dyn DownloadObserver,
    ) -> Option<Box<dyn Summarizer>> {
        let Some(factory) = self.capabilities.summarizer.as_ref() else {
            lingo_warn!("Summarizer is not available on this host");
            return None;
        };

        let availability = match factory.availability().await {
            Ok(availability) => availability,
            Err(err) => {
                lingo_warn!("Summarizer availability check failed: {}", err);
                return None;
            }
        };
        if availability == Availability::No {
            lingo_warn!("Summarizer reported as unusable");
            return None;
        }

        let summarizer = match factory.create(&self.summarizer_options).await {
            Ok(summarizer) => summarizer,
            Err(err) => {
                lingo_warn!("Summarizer creation failed: {}", err);
                return None;
            }
        };

        if availability == Availability::AfterDownload {
            lingo_info!("Summarizer model needs a download; waiting for readiness");
            if let Err(err) = summarizer.ready(observer).await {
                lingo_warn!("Summarizer never became ready: {}", err);
                return None;
            }
        }
        Some(summarizer)
    }

    pub async fn summarize(
        &self,
        handle: &dyn Summarizer,
        text: &str,
    ) -> Result<String, OrchestratorError> {
        let stream = handle
            .summarize(text, &self.summary_context)
            .await
            .map_err(OrchestratorError::SummarizationFailed)?;
        let raw = collect_chunks(stream)
            .await
            .map_err(OrchestratorError::SummarizationFailed)?;
        lingo_debug!("Summary stream finished, {} bytes", raw.len());
        Ok(normalize_whitespace(&raw))
    }

    pub async fn prepare_translator(&self, source: &str, target: &str) -> Option<Box<dyn Translator>> {
        if source.trim().is_empty() || target.trim().is_empty() {
            lingo_warn!("Translator needs both a source and a target language");
            return None;
        }
        let Some(factory) = self.capabilities.translator.as_ref() else {
            lingo_warn!("Translator is not available on this host");
            return None;
        };

        match factory.create(&LanguagePair::new(source, target)).await {
            Ok(translator) => Some(translator),
            Err(err) => {
                lingo_warn!("Translator creation {}->{} failed: {}", source, target, err);
                None
            }
        }
    }

    pub async fn translate(
        &self,
        handle: &dyn Translator,
        text: &str,
    ) -> Result<String, OrchestratorError> {
        let stream = handle
            .translate(text)
            .await
            .map_err(OrchestratorError::TranslationFailed)?;
        let raw = collect_chunks(stream)
            .await
            .map_err(OrchestratorError::TranslationFailed)?;
        lingo_debug!("Translation stream finished, {} bytes", raw.len());
        Ok(normalize_whitespace(&raw))
    }

    /// Full summarize action: acquire a handle, then summarize.
    pub async fn run_summarize(
        &self,
        text: &str,
        observer: &dyn DownloadObserver,
    ) -> Result<String, OrchestratorError> {
        let handle = self
            .prepare_summarizer(observer)
            .await
            .ok_or(OrchestratorError::SummarizerUnavailable)?;
        self.summarize(handle.as_ref(), text).await
    }

    /// Full translate action. Preconditions are checked before any host call.
    pub async fn run_translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<String, OrchestratorError> {
        let source = match source {
            Some(source) if !text.is_empty() && !source.is_empty() => source,
            _ => return Err(OrchestratorError::MissingLanguage),
        };
        let handle = self
            .prepare_translator(source, target)
            .await
            .ok_or(OrchestratorError::TranslatorUnavailable)?;
        self.translate(handle.as_ref(), text).await
    }
}
