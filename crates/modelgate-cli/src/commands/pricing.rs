//! `modelgate pricing`

use anyhow::Context;
use modelgate_core::config::Config;
use modelgate_core::embedding::create_embedding_provider;
use modelgate_core::llm::{ModelProvider, ProviderFactory};

pub fn run(config: &Config, provider: Option<&str>, embedding: bool) -> anyhow::Result<()> {
    let pricing = if embedding {
        let settings = config
            .embedding
            .as_ref()
            .context("No embedding provider configured")?;
        create_embedding_provider(settings)?.pricing()
    } else {
        let (_, settings) = config.provider(provider)?;
        ProviderFactory::create(settings)?.pricing()
    };
    print!("{}", pricing);
    if !pricing.ends_with('\n') {
        println!();
    }
    Ok(())
}
