//! Assay HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use assay::config::Config;
use assay::gateway::{HandlerState, create_router_with_state};
use assay::pipeline::AnswerPipeline;
use assay::rag::{Generator, HttpGenerator, HttpRetriever, Retriever};
use assay::store::MemoryStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        threshold = config.confidence_threshold,
        top_k = config.top_k,
        mock_rag = config.mock_rag,
        "Assay starting"
    );

    let store = Arc::new(MemoryStore::new());

    let (retriever, generator) = build_collaborators(&config)?;
    let pipeline = Arc::new(AnswerPipeline::new(
        &config,
        store.clone(),
        retriever,
        generator,
    ));

    let state = HandlerState::new(
        pipeline,
        store,
        config.max_question_len,
        config.max_title_len,
    );
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Assay shutdown complete");
    Ok(())
}

fn build_collaborators(
    config: &Config,
) -> anyhow::Result<(Arc<dyn Retriever>, Arc<dyn Generator>)> {
    if config.mock_rag {
        return mock_collaborators();
    }

    let retriever_url = config
        .retriever_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("ASSAY_RETRIEVER_URL is required"))?;
    let generator_url = config
        .generator_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("ASSAY_GENERATOR_URL is required"))?;

    Ok((
        Arc::new(HttpRetriever::new(retriever_url)),
        Arc::new(HttpGenerator::new(generator_url)),
    ))
}

#[cfg(feature = "mock")]
fn mock_collaborators() -> anyhow::Result<(Arc<dyn Retriever>, Arc<dyn Generator>)> {
    use assay::rag::{MockGenerator, MockRetriever};

    tracing::warn!("ASSAY_MOCK_RAG set, serving canned retrieval and generation");
    Ok((
        Arc::new(MockRetriever::with_passages(vec![
            (
                "Retrieval-Augmented Generation combines a retriever with a generator.",
                0.4,
            ),
            ("RAG grounds generated answers in retrieved passages.", 0.7),
        ])),
        Arc::new(MockGenerator::with_answer(
            "Retrieval-Augmented Generation answers questions by retrieving \
             relevant passages and conditioning generation on them.",
        )),
    ))
}

#[cfg(not(feature = "mock"))]
fn mock_collaborators() -> anyhow::Result<(Arc<dyn Retriever>, Arc<dyn Generator>)> {
    anyhow::bail!("ASSAY_MOCK_RAG requires a build with the `mock` feature")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
