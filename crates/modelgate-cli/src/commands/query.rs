//! `modelgate query`

use anyhow::Context;
use modelgate_core::config::Config;
use modelgate_core::llm::{EventSink, ModelProvider, ProviderFactory, WriterSink};

pub async fn run(
    config: &Config,
    provider: Option<&str>,
    question: &str,
    print_usage: bool,
) -> anyhow::Result<()> {
    let (name, settings) = config.provider(provider)?;
    let provider = ProviderFactory::create(settings)
        .with_context(|| format!("Failed to create provider '{}'", name))?;

    tracing::info!(provider = name, kind = %settings.kind, "querying");
    let mut sink = WriterSink::new(tokio::io::stdout());
    let result = provider
        .query_text(question, &mut sink, &[], "", &[])
        .await
        .with_context(|| format!("Query to provider '{}' failed", name))?;
    sink.flush().await?;

    tracing::info!(
        prompt_tokens = result.prompt_token_count(),
        response_tokens = result.response_token_count(),
        total_tokens = result.total_token_count(),
        "query finished"
    );
    if print_usage {
        eprintln!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}
