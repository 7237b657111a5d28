#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures_util::{stream, StreamExt};
use lingo_engine::{
    Availability, Capabilities, CapabilityError, ChunkStream, DetectorFactory, DownloadObserver,
    DownloadProgress, LanguageCandidate, LanguageDetector, LanguagePair, Summarizer,
    SummarizerFactory, SummarizerOptions, Translator, TranslatorFactory,
};

/// Scripted host: every capability answers from the fields below and records
/// how it was called. Clones share the call logs.
#[derive(Clone)]
pub struct FakeHost {
    pub candidates: Result<Vec<LanguageCandidate>, CapabilityError>,
    pub availability: Result<Availability, CapabilityError>,
    pub create_summarizer: Result<(), CapabilityError>,
    pub download_events: Vec<DownloadProgress>,
    pub ready: Result<(), CapabilityError>,
    pub summary_chunks: Vec<Result<String, CapabilityError>>,
    pub create_translator: Result<(), CapabilityError>,
    pub translation_chunks: Vec<Result<String, CapabilityError>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub pairs: Arc<Mutex<Vec<LanguagePair>>>,
    pub contexts: Arc<Mutex<Vec<String>>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            candidates: Ok(vec![candidate("en", 0.9)]),
            availability: Ok(Availability::Readily),
            create_summarizer: Ok(()),
            download_events: Vec::new(),
            ready: Ok(()),
            summary_chunks: vec![Ok("A short".to_string()), Ok(" summary.".to_string())],
            create_translator: Ok(()),
            translation_chunks: vec![Ok("Hola".to_string()), Ok(" mundo".to_string())],
            calls: Arc::default(),
            pairs: Arc::default(),
            contexts: Arc::default(),
        }
    }
}

pub fn candidate(language: &str, confidence: f64) -> LanguageCandidate {
    LanguageCandidate {
        detected_language: language.to_string(),
        confidence,
    }
}

impl FakeHost {
    pub fn capabilities(&self) -> Capabilities {
        let detector: Arc<dyn DetectorFactory> = Arc::new(self.clone());
        let summarizer: Arc<dyn SummarizerFactory> = Arc::new(self.clone());
        let translator: Arc<dyn TranslatorFactory> = Arc::new(self.clone());
        Capabilities {
            detector: Some(detector),
            summarizer: Some(summarizer),
            translator: Some(translator),
        }
    }

    pub fn pairs(&self) -> Vec<LanguagePair> {
        self.pairs.lock().unwrap().clone()
    }

    pub fn contexts(&self) -> Vec<String> {
        self.contexts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

fn scripted(chunks: &[Result<String, CapabilityError>]) -> ChunkStream {
    stream::iter(chunks.to_vec()).boxed()
}

struct FakeDetector(FakeHost);

#[async_trait::async_trait]
impl LanguageDetector for FakeDetector {
    async fn detect(&self, _text: &str) -> Result<Vec<LanguageCandidate>, CapabilityError> {
        self.0.record("detect");
        self.0.candidates.clone()
    }
}

#[async_trait::async_trait]
impl DetectorFactory for FakeHost {
    async fn create(&self) -> Result<Box<dyn LanguageDetector>, CapabilityError> {
        self.record("detector.create");
        Ok(Box::new(FakeDetector(self.clone())))
    }
}

struct FakeSummarizer(FakeHost);

#[async_trait::async_trait]
impl Summarizer for FakeSummarizer {
    async fn ready(&self, observer: &dyn DownloadObserver) -> Result<(), CapabilityError> {
        self.0.record("summarizer.ready");
        for progress in &self.0.download_events {
            observer.on_progress(*progress);
        }
        self.0.ready.clone()
    }

    async fn summarize(&self, _text: &str, context: &str) -> Result<ChunkStream, CapabilityError> {
        self.0.record("summarize");
        self.0.contexts.lock().unwrap().push(context.to_string());
        Ok(scripted(&self.0.summary_chunks))
    }
}

#[async_trait::async_trait]
impl SummarizerFactory for FakeHost {
    async fn availability(&self) -> Result<Availability, CapabilityError> {
        self.record("summarizer.availability");
        self.availability.clone()
    }

    async fn create(
        &self,
        _options: &SummarizerOptions,
    ) -> Result<Box<dyn Summarizer>, CapabilityError> {
        self.record("summarizer.create");
        self.create_summarizer.clone()?;
        Ok(Box::new(FakeSummarizer(self.clone())))
    }
}

struct FakeTranslator(FakeHost);

#[async_trait::async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, _text: &str) -> Result<ChunkStream, CapabilityError> {
        self.0.record("translate");
        Ok(scripted(&self.0.translation_chunks))
    }
}

#[async_trait::async_trait]
impl TranslatorFactory for FakeHost {
    async fn create(&self, pair: &LanguagePair) -> Result<Box<dyn Translator>, CapabilityError> {
        self.record("translator.create");
        self.pairs.lock().unwrap().push(pair.clone());
        self.create_translator.clone()?;
        Ok(Box::new(FakeTranslator(self.clone())))
    }
}

/// Observer that remembers every progress event.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<DownloadProgress>>,
}

impl DownloadObserver for RecordingObserver {
    fn on_progress(&self, progress: DownloadProgress) {
        self.events.lock().unwrap().push(progress);
    }
}
