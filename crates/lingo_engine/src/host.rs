//! HTTP bridge to a host AI service.
//!
//! Request bodies are JSON; streamed responses are newline-delimited JSON.
//! A 404 or 501 from an endpoint means the host does not provide that
//! capability.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{future, Stream, StreamExt, TryStreamExt};
use lingo_logging::{lingo_debug, lingo_trace};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;

use crate::{
    Availability, Capabilities, CapabilityError, ChunkStream, DetectorFactory, DownloadObserver,
    DownloadProgress, LanguageCandidate, LanguageDetector, LanguagePair, Summarizer,
    SummarizerFactory, SummarizerOptions, Translator, TranslatorFactory,
};

#[derive(Debug, Clone)]
pub struct HostSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request limit. `None` lets streams run as long as the host keeps
    /// producing.
    pub request_timeout: Option<Duration>,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11435".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpHost {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    text: &'a str,
    context: &'a str,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CapabilitiesResponse {
    available: Availability,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    session_id: String,
}

#[derive(Deserialize)]
struct ChunkFrame {
    #[serde(default)]
    chunk: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ReadyFrame {
    #[serde(rename = "downloadprogress")]
    DownloadProgress { loaded: u64, total: u64 },
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "error")]
    Error { message: String },
}

impl HttpHost {
    pub fn new(settings: HostSettings) -> Result<Self, CapabilityError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|err| CapabilityError::Transport(format!("invalid host url: {err}")))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(map_reqwest_error)?;
        Ok(Self { client, base_url })
    }

    /// Exposes every capability through this host.
    pub fn capabilities(self) -> Capabilities {
        let host = Arc::new(self);
        let detector: Arc<dyn DetectorFactory> = host.clone();
        let summarizer: Arc<dyn SummarizerFactory> = host.clone();
        let translator: Arc<dyn TranslatorFactory> = host;
        Capabilities {
            detector: Some(detector),
            summarizer: Some(summarizer),
            translator: Some(translator),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, CapabilityError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NOT_IMPLEMENTED {
            return Err(CapabilityError::Unavailable);
        }
        if !status.is_success() {
            return Err(CapabilityError::Status(status.as_u16()));
        }
        Ok(response)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, CapabilityError> {
        let response = self.send(self.client.get(self.url(path))).await?;
        decode_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, CapabilityError> {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        decode_json(response).await
    }

    async fn post_stream<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ChunkStream, CapabilityError> {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        Ok(chunk_stream(response))
    }
}

async fn decode_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, CapabilityError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|err| CapabilityError::Protocol(err.to_string()))
}

/// Non-empty NDJSON lines of a streamed response body.
fn ndjson_lines(
    response: reqwest::Response,
) -> impl Stream<Item = Result<String, CapabilityError>> + Send + 'static {
    let body = response.bytes_stream().map_err(std::io::Error::other);
    FramedRead::new(StreamReader::new(body), LinesCodec::new())
        .map_err(|err| CapabilityError::Stream(err.to_string()))
        .try_filter(|line| future::ready(!line.trim().is_empty()))
}

fn chunk_stream(response: reqwest::Response) -> ChunkStream {
    ndjson_lines(response)
        .and_then(|line| future::ready(parse_chunk(&line)))
        .boxed()
}

fn parse_chunk(line: &str) -> Result<String, CapabilityError> {
    let frame: ChunkFrame =
        serde_json::from_str(line).map_err(|err| CapabilityError::Protocol(err.to_string()))?;
    match (frame.chunk, frame.error) {
        (_, Some(message)) => Err(CapabilityError::Stream(message)),
        (Some(chunk), None) => Ok(chunk),
        (None, None) => Err(CapabilityError::Protocol(format!("frame without chunk: {line}"))),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CapabilityError {
    CapabilityError::Transport(err.to_string())
}

struct HttpDetector {
    host: HttpHost,
}

#[async_trait::async_trait]
impl LanguageDetector for HttpDetector {
    async fn detect(&self, text: &str) -> Result<Vec<LanguageCandidate>, CapabilityError> {
        self.host
            .post_json("language-detector/detect", &DetectRequest { text })
            .await
    }
}

#[async_trait::async_trait]
impl DetectorFactory for HttpHost {
    async fn create(&self) -> Result<Box<dyn LanguageDetector>, CapabilityError> {
        Ok(Box::new(HttpDetector { host: self.clone() }))
    }
}

struct HttpSummarizer {
    host: HttpHost,
    session_id: String,
}

#[async_trait::async_trait]
impl Summarizer for HttpSummarizer {
    async fn ready(&self, observer: &dyn DownloadObserver) -> Result<(), CapabilityError> {
        let path = format!("summarizer/sessions/{}/ready", self.session_id);
        let response = self.host.send(self.host.client.get(self.host.url(&path))).await?;
        let mut lines = Box::pin(ndjson_lines(response));
        while let Some(line) = lines.next().await {
            let frame: ReadyFrame = serde_json::from_str(&line?)
                .map_err(|err| CapabilityError::Protocol(err.to_string()))?;
            match frame {
                ReadyFrame::DownloadProgress { loaded, total } => {
                    lingo_trace!("Summarizer download {}/{} bytes", loaded, total);
                    observer.on_progress(DownloadProgress { loaded, total });
                }
                ReadyFrame::Ready => return Ok(()),
                ReadyFrame::Error { message } => return Err(CapabilityError::Stream(message)),
            }
        }
        Err(CapabilityError::NotReady)
    }

    async fn summarize(&self, text: &str, context: &str) -> Result<ChunkStream, CapabilityError> {
        let path = format!("summarizer/sessions/{}/summarize", self.session_id);
        self.host
            .post_stream(&path, &SummarizeRequest { text, context })
            .await
    }
}

#[async_trait::async_trait]
impl SummarizerFactory for HttpHost {
    async fn availability(&self) -> Result<Availability, CapabilityError> {
        let response: CapabilitiesResponse = self.get_json("summarizer/capabilities").await?;
        Ok(response.available)
    }

    async fn create(
        &self,
        options: &SummarizerOptions,
    ) -> Result<Box<dyn Summarizer>, CapabilityError> {
        let session: SessionResponse = self.post_json("summarizer/sessions", options).await?;
        lingo_debug!("Summarizer session {} created", session.session_id);
        Ok(Box::new(HttpSummarizer {
            host: self.clone(),
            session_id: session.session_id,
        }))
    }
}

struct HttpTranslator {
    host: HttpHost,
    session_id: String,
}

#[async_trait::async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<ChunkStream, CapabilityError> {
        let path = format!("translator/sessions/{}/translate", self.session_id);
        self.host.post_stream(&path, &TranslateRequest { text }).await
    }
}

#[async_trait::async_trait]
impl TranslatorFactory for HttpHost {
    async fn create(&self, pair: &LanguagePair) -> Result<Box<dyn Translator>, CapabilityError> {
        let session: SessionResponse = self.post_json("translator/sessions", pair).await?;
        lingo_debug!(
            "Translator session {} created for {}->{}",
            session.session_id,
            pair.source_language,
            pair.target_language
        );
        Ok(Box::new(HttpTranslator {
            host: self.clone(),
            session_id: session.session_id,
        }))
    }
}
