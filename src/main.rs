use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use saaramsham::application::services::{
    AudioRetriever, Capability, LanguageIdentifier, ModelContext, PersistenceGateway,
    ProcessingPipeline,
};
use saaramsham::infrastructure::audio::TranscriptionEngineFactory;
use saaramsham::infrastructure::download::HttpAudioFetcher;
use saaramsham::infrastructure::language::WhatlangDetector;
use saaramsham::infrastructure::observability::{TracingConfig, init_tracing};
use saaramsham::infrastructure::persistence::RepositoryFactory;
use saaramsham::infrastructure::storage::StorageSignerFactory;
use saaramsham::infrastructure::summarization::SummarizerFactory;
use saaramsham::presentation::{AppState, Environment, ServiceInfo, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::current().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load configuration")?;

    init_tracing(
        TracingConfig::from_settings(environment.as_str(), &settings.logging),
        settings.server.port,
    );

    let transcription = Capability::from_result(TranscriptionEngineFactory::create(&settings.models));
    if let Capability::Unavailable { reason } = &transcription {
        tracing::error!(reason = %reason, "Whisper model failed to load; /process will return 503");
    }
    let summarizer = Capability::from_result(SummarizerFactory::create(&settings.models));
    if let Capability::Unavailable { reason } = &summarizer {
        tracing::error!(reason = %reason, "Summarizer failed to load; /process will return 503");
    }
    let models = ModelContext::new(transcription, summarizer);

    let signer = StorageSignerFactory::create(&settings.storage, &settings.database)
        .context("failed to configure storage signer")?;
    let fetcher = Arc::new(
        HttpAudioFetcher::new(settings.fetch.timeout(), settings.fetch.scratch_dir.clone())
            .context("failed to configure audio fetcher")?,
    );
    let retriever = AudioRetriever::new(fetcher, signer, settings.storage.signed_url_ttl());

    let repositories = RepositoryFactory::create(&settings.database)
        .await
        .context("failed to configure persistence")?;
    let persistence = PersistenceGateway::new(repositories.transcripts, repositories.summaries);

    let identifier = LanguageIdentifier::new(Arc::new(WhatlangDetector::new()));

    let pipeline = ProcessingPipeline::new(models, retriever, identifier, persistence);

    let state = AppState {
        pipeline: Arc::new(pipeline),
        info: ServiceInfo {
            whisper_model: settings.models.whisper_model.clone(),
            summarizer_model: settings.models.summarizer_model.clone(),
            database_configured: settings.database.endpoint_configured(),
        },
    };

    let router = create_router(state);

    let ip: IpAddr = settings
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host: {}", settings.server.host))?;
    let addr = SocketAddr::new(ip, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
