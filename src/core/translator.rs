//! Chunked translation over a ready model handle

use tracing::debug;

use crate::core::engine::ModelHandle;
use crate::core::errors::{Result, TranslatorError};
use crate::core::models::MAX_SEGMENT_CHARS;

/// Splits long input into bounded segments and rejoins the outputs in order
#[derive(Debug, Clone)]
pub struct ChunkedTranslator {
    max_segment_chars: usize,
}

impl Default for ChunkedTranslator {
    fn default() -> Self {
        Self {
            max_segment_chars: MAX_SEGMENT_CHARS,
        }
    }
}

impl ChunkedTranslator {
    /// Create a translator with a custom segment bound; a bound of 0 is
    /// clamped to 1
    pub fn with_segment_chars(max_segment_chars: usize) -> Self {
        Self {
            max_segment_chars: max_segment_chars.max(1),
        }
    }

    /// Translate `text` with the given handle
    ///
    /// Short input is translated in a single engine invocation. Longer input
    /// is partitioned into segments translated strictly in order, and the
    /// outputs joined with single spaces. A failure on any segment fails the
    /// whole request; no partial translation is ever returned.
    ///
    /// Assumes non-empty text; emptiness is rejected at the request boundary.
    pub async fn translate(&self, text: &str, handle: &dyn ModelHandle) -> Result<String> {
        let char_count = text.chars().count();

        if char_count <= self.max_segment_chars {
            return handle.translate(text).await.map_err(as_inference);
        }

        let segment_count = char_count.div_ceil(self.max_segment_chars);
        debug!(
            "Translating {} chars in {} segments with {}",
            char_count,
            segment_count,
            handle.model_id()
        );

        let mut outputs = Vec::with_capacity(segment_count);

        // Segments are cut at fixed character offsets; a cut can land mid-word
        // and the space join below can alter punctuation at the seam.
        for segment in segments(text, self.max_segment_chars) {
            let translated = handle.translate(segment).await.map_err(as_inference)?;
            outputs.push(translated);
        }

        Ok(outputs.join(" "))
    }
}

/// Collapse any handle error into an inference failure
fn as_inference(err: TranslatorError) -> TranslatorError {
    match err {
        e @ TranslatorError::Inference { .. } => e,
        other => TranslatorError::Inference {
            message: other.to_string(),
        },
    }
}

/// Lazy ordered segments of at most `max_chars` characters each
fn segments(text: &str, max_chars: usize) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let cut = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(i, _)| i);
        let (head, tail) = rest.split_at(cut);
        rest = tail;
        Some(head)
    })
}
