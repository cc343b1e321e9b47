//! Model-driven pair synthesis from long-form text.
//!
//! Text is cut into fixed-size word windows and each window is sent to a
//! text-generation model with a request for a fixed number of pairs. Chunks are
//! processed one after another; nothing is sent until the previous response has
//! been parsed.

pub mod chunker;
pub mod client;
pub mod prompt;
pub mod source;

pub use chunker::chunk_words;
pub use client::{HttpGenerator, TextGenerator};
pub use prompt::{build_prompt, parse_pairs};
pub use source::load_text;

use crate::config::SynthConfig;
use crate::error::{Error, Result};
use crate::results::QaPair;

/// Generate pairs for every chunk of `text`, in chunk order.
///
/// Each chunk contributes at most `pairs_per_chunk` pairs. Output that cannot
/// be parsed aborts the run unless `skip_malformed` is set, in which case the
/// chunk is logged and skipped.
pub async fn synthesize<G: TextGenerator>(
    text: &str,
    generator: &mut G,
    config: &SynthConfig,
) -> Result<Vec<QaPair>> {
    let mut chunks = chunk_words(text, config.chunk_words);
    if let Some(max_chunks) = config.max_chunks {
        chunks.truncate(max_chunks);
    }
    ::log::info!(
        "Synthesizing {} pairs for each of {} chunks",
        config.pairs_per_chunk,
        chunks.len()
    );

    let mut dataset = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let output = generator
            .generate(&build_prompt(chunk, config.pairs_per_chunk))
            .await?;

        match parse_pairs(&output) {
            Ok(mut pairs) => {
                pairs.truncate(config.pairs_per_chunk);
                ::log::info!("Chunk {}/{}: {} pairs", i + 1, chunks.len(), pairs.len());
                dataset.extend(pairs);
            }
            Err(Error::ModelOutput(msg)) if config.skip_malformed => {
                ::log::warn!("Skipping chunk {}: {}", i + 1, msg);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(dataset)
}
