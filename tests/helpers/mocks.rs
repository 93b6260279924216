use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use saaramsham::application::ports::{
    AudioFetchError, AudioFetcher, LanguageDetectionError, LanguageDetector, RawTranscription,
    RepositoryError, SignedUrlError, SignedUrlProvider, Summarizer, SummarizerError,
    SummaryRepository, TranscriptRepository, TranscriptionEngine, TranscriptionError,
    TranscriptionOptions,
};
use saaramsham::application::services::{
    AudioRetriever, Capability, LanguageIdentifier, ModelContext, PersistenceGateway,
    ProcessingPipeline,
};
use saaramsham::domain::{AudioArtifact, Summary, SummaryLength, Transcript};
use saaramsham::presentation::{AppState, ServiceInfo, create_router};
use tempfile::TempDir;
use uuid::Uuid;

pub struct MockAudioFetcher {
    dir: PathBuf,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl MockAudioFetcher {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl AudioFetcher for MockAudioFetcher {
    async fn fetch(&self, url: &str, extension: &str) -> Result<AudioArtifact, AudioFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), extension.to_string()));

        let path = self.dir.join(format!("{}{}", Uuid::new_v4(), extension));
        tokio::fs::write(&path, b"fake audio").await?;
        Ok(AudioArtifact::new(path))
    }
}

#[derive(Default)]
pub struct MockSigner {
    pub keys: Mutex<Vec<(String, Duration)>>,
}

#[async_trait::async_trait]
impl SignedUrlProvider for MockSigner {
    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String, SignedUrlError> {
        self.keys.lock().unwrap().push((key.to_string(), expires_in));
        Ok(format!("http://storage.test/signed/{}?token=abc", key))
    }
}

pub struct MockTranscriptionEngine {
    segments: Vec<String>,
    pub calls: AtomicUsize,
}

impl MockTranscriptionEngine {
    pub fn new(segments: Vec<String>) -> Self {
        Self {
            segments,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        _options: &TranscriptionOptions,
    ) -> Result<RawTranscription, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(audio_path.exists(), "scratch file must exist while transcribing");
        Ok(RawTranscription {
            segments: self.segments.clone(),
            detected_language: Some("en".to_string()),
            language_probability: Some(0.93),
        })
    }

    fn model_name(&self) -> &str {
        "mock-whisper"
    }
}

pub struct FailingTranscriptionEngine;

#[async_trait::async_trait]
impl TranscriptionEngine for FailingTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        _options: &TranscriptionOptions,
    ) -> Result<RawTranscription, TranscriptionError> {
        Err(TranscriptionError::DecodingFailed("corrupt container".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing-whisper"
    }
}

pub struct PanickingTranscriptionEngine;

#[async_trait::async_trait]
impl TranscriptionEngine for PanickingTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        _options: &TranscriptionOptions,
    ) -> Result<RawTranscription, TranscriptionError> {
        panic!("decoder state corrupted")
    }

    fn model_name(&self) -> &str {
        "panicking-whisper"
    }
}

pub struct MockSummarizer {
    summary: Option<String>,
    pub lengths: Mutex<Vec<SummaryLength>>,
}

impl MockSummarizer {
    pub fn returning(summary: &str) -> Self {
        Self {
            summary: Some(summary.to_string()),
            lengths: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            summary: None,
            lengths: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, _text: &str, length: SummaryLength) -> Result<String, SummarizerError> {
        self.lengths.lock().unwrap().push(length);
        self.summary
            .clone()
            .ok_or_else(|| SummarizerError::ApiRequestFailed("model crashed".to_string()))
    }

    fn method(&self) -> &str {
        "IndicBARTSS"
    }
}

pub struct MockDetector(pub Option<&'static str>);

impl LanguageDetector for MockDetector {
    fn detect(&self, _text: &str) -> Result<String, LanguageDetectionError> {
        self.0
            .map(str::to_string)
            .ok_or(LanguageDetectionError::NoFeatures)
    }
}

#[derive(Default)]
pub struct InMemoryTranscriptRepository {
    pub fail: bool,
    pub rows: Mutex<Vec<Transcript>>,
}

#[async_trait::async_trait]
impl TranscriptRepository for InMemoryTranscriptRepository {
    async fn create(&self, transcript: &Transcript) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::ConnectionFailed("database down".to_string()));
        }
        self.rows.lock().unwrap().push(transcript.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySummaryRepository {
    pub fail: bool,
    pub rows: Mutex<Vec<Summary>>,
}

#[async_trait::async_trait]
impl SummaryRepository for InMemorySummaryRepository {
    async fn create(&self, summary: &Summary) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Rejected {
                status: 500,
                body: "summaries table missing".to_string(),
            });
        }
        self.rows.lock().unwrap().push(summary.clone());
        Ok(())
    }
}

/// A pipeline wired entirely to in-memory doubles.
pub struct TestPipeline {
    pub pipeline: Arc<ProcessingPipeline>,
    pub fetcher: Arc<MockAudioFetcher>,
    pub signer: Arc<MockSigner>,
    pub transcripts: Arc<InMemoryTranscriptRepository>,
    pub summaries: Arc<InMemorySummaryRepository>,
    pub summarizer: Arc<MockSummarizer>,
    pub scratch: TempDir,
}

impl TestPipeline {
    pub fn builder() -> TestPipelineBuilder {
        TestPipelineBuilder::default()
    }

    pub fn scratch_is_empty(&self) -> bool {
        std::fs::read_dir(self.scratch.path())
            .expect("scratch dir readable")
            .next()
            .is_none()
    }

    pub fn router(&self) -> axum::Router {
        create_router(AppState {
            pipeline: Arc::clone(&self.pipeline),
            info: ServiceInfo {
                whisper_model: "small".to_string(),
                summarizer_model: "ai4bharat/IndicBARTSS".to_string(),
                database_configured: true,
            },
        })
    }
}

pub struct TestPipelineBuilder {
    segments: Vec<String>,
    detected: Option<&'static str>,
    summarizer: Option<MockSummarizer>,
    engine: Option<Arc<dyn TranscriptionEngine>>,
    engine_loaded: bool,
    summarizer_loaded: bool,
    transcript_insert_fails: bool,
    summary_insert_fails: bool,
}

impl Default for TestPipelineBuilder {
    fn default() -> Self {
        Self {
            segments: vec!["The meeting covered".to_string(), "the quarterly budget.".to_string()],
            detected: Some("en"),
            summarizer: None,
            engine: None,
            engine_loaded: true,
            summarizer_loaded: true,
            transcript_insert_fails: false,
            summary_insert_fails: false,
        }
    }
}

impl TestPipelineBuilder {
    pub fn segments(mut self, segments: &[&str]) -> Self {
        self.segments = segments.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn detected(mut self, detected: Option<&'static str>) -> Self {
        self.detected = detected;
        self
    }

    pub fn summarizer(mut self, summarizer: MockSummarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn engine(mut self, engine: Arc<dyn TranscriptionEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn without_whisper(mut self) -> Self {
        self.engine_loaded = false;
        self
    }

    pub fn without_summarizer(mut self) -> Self {
        self.summarizer_loaded = false;
        self
    }

    pub fn failing_transcript_insert(mut self) -> Self {
        self.transcript_insert_fails = true;
        self
    }

    pub fn failing_summary_insert(mut self) -> Self {
        self.summary_insert_fails = true;
        self
    }

    pub fn build(self) -> TestPipeline {
        let scratch = tempfile::tempdir().expect("Failed to create scratch dir");
        let fetcher = Arc::new(MockAudioFetcher::new(scratch.path()));
        let signer = Arc::new(MockSigner::default());
        let summarizer = Arc::new(
            self.summarizer
                .unwrap_or_else(|| MockSummarizer::returning("Budget review meeting.")),
        );
        let transcripts = Arc::new(InMemoryTranscriptRepository {
            fail: self.transcript_insert_fails,
            ..Default::default()
        });
        let summaries = Arc::new(InMemorySummaryRepository {
            fail: self.summary_insert_fails,
            ..Default::default()
        });

        let engine: Arc<dyn TranscriptionEngine> = match self.engine {
            Some(engine) => engine,
            None => Arc::new(MockTranscriptionEngine::new(self.segments)),
        };
        let transcription = if self.engine_loaded {
            Capability::Loaded(engine)
        } else {
            Capability::Unavailable {
                reason: "model download failed".to_string(),
            }
        };
        let summarizer_capability: Capability<dyn Summarizer> = if self.summarizer_loaded {
            Capability::Loaded(summarizer.clone())
        } else {
            Capability::Unavailable {
                reason: "model download failed".to_string(),
            }
        };

        let retriever = AudioRetriever::new(
            fetcher.clone(),
            signer.clone(),
            Duration::from_secs(60),
        );
        let identifier = LanguageIdentifier::new(Arc::new(MockDetector(self.detected)));
        let persistence = PersistenceGateway::new(transcripts.clone(), summaries.clone());

        let pipeline = ProcessingPipeline::new(
            ModelContext::new(transcription, summarizer_capability),
            retriever,
            identifier,
            persistence,
        );

        TestPipeline {
            pipeline: Arc::new(pipeline),
            fetcher,
            signer,
            transcripts,
            summaries,
            summarizer,
            scratch,
        }
    }
}
