//! `modelgate embed`

use anyhow::Context;
use modelgate_core::config::Config;
use modelgate_core::embedding::create_embedding_provider;
use serde_json::json;

const PREVIEW_LEN: usize = 8;

pub async fn run(config: &Config, text: &str) -> anyhow::Result<()> {
    let settings = config
        .embedding
        .as_ref()
        .context("No embedding provider configured")?;
    let provider = create_embedding_provider(settings)?;

    let (vector, result) = provider
        .query_vector(text)
        .await
        .context("Embedding request failed")?;

    let preview: Vec<f32> = vector.iter().take(PREVIEW_LEN).copied().collect();
    let summary = json!({
        "dimensions": vector.len(),
        "preview": preview,
        "usage": result,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
