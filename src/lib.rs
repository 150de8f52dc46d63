//! modelgate
//!
//! Provider adapters that relay model completions as server-sent events,
//! with dry-run admission and token accounting, plus tool aggregation for
//! multi-server agent sessions.
//!
//! ```no_run
//! use modelgate::{ModelProvider, ProviderFactory, ProviderKind, ProviderSettings, WriterSink};
//!
//! # async fn demo() -> modelgate::GateResult<()> {
//! let settings = ProviderSettings::new(ProviderKind::Ollama)
//!     .with_sub_type("llama3")
//!     .with_endpoint("http://localhost:11434/v1");
//! let provider = ProviderFactory::create(&settings)?;
//!
//! let mut sink = WriterSink::new(tokio::io::stdout());
//! let result = provider.query_text("Hello", &mut sink, &[], "", &[]).await?;
//! println!("{} tokens", result.total_token_count());
//! # Ok(())
//! # }
//! ```

pub use modelgate_core::*;
pub use modelgate_tools as tools;
