use futures_util::TryStreamExt;

use crate::{CapabilityError, ChunkStream};

/// Drains `stream`, concatenating chunks in arrival order. The first error
/// aborts and discards everything collected so far.
pub async fn collect_chunks(stream: ChunkStream) -> Result<String, CapabilityError> {
    stream
        .try_fold(String::new(), |mut acc, chunk| async move {
            acc.push_str(&chunk);
            Ok(acc)
        })
        .await
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
