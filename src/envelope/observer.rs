//! Diagnostics hook for envelope normalization.
//!
//! Every decision the normalizer takes is reported as a [`NormalizeEvent`].
//! Observers only watch; they cannot change the result.

use super::ResponseFormat;
use crate::constants::PAYLOAD_PREVIEW_LENGTH;

/// One normalization decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeEvent {
    /// The raw payload's shape, before any repair.
    FormatDetected(ResponseFormat),
    /// The payload was not a sequence; the result is empty.
    NotASequence { json_type: &'static str },
    /// The envelope `text` decoded to a block array.
    EnvelopeDecoded { blocks: usize, extracted: bool },
    /// The envelope `text` decoded, but not to an array.
    EnvelopeNotArray {
        json_type: &'static str,
        extracted: bool,
    },
    /// The full `text` was not valid JSON.
    DirectParseFailed { reason: String },
    /// Bracket matching found a leading array of `length` bytes.
    PrefixExtracted { length: usize },
    /// Bracket matching found no complete leading array.
    ExtractionFailed { text_length: usize, preview: String },
    /// The extracted prefix was not valid JSON either.
    ExtractedParseFailed { reason: String },
    /// The sequence is returned unchanged.
    PassedThrough { items: usize },
}

/// Receives normalization events.
pub trait NormalizeObserver {
    fn observe(&mut self, event: NormalizeEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl NormalizeObserver for LogObserver {
    fn observe(&mut self, event: NormalizeEvent) {
        match event {
            NormalizeEvent::FormatDetected(format) => {
                log::info!("Detected response format: {}", format)
            }
            NormalizeEvent::NotASequence { json_type } => {
                log::warn!("Expected a block array, got {}", json_type)
            }
            NormalizeEvent::EnvelopeDecoded { blocks, extracted } => {
                if extracted {
                    log::info!("Parsed {} blocks from extracted JSON prefix", blocks)
                } else {
                    log::info!("Unwrapped text envelope: {} blocks", blocks)
                }
            }
            NormalizeEvent::EnvelopeNotArray {
                json_type,
                extracted,
            } => log::warn!(
                "Envelope text parsed to {} instead of an array (extracted: {})",
                json_type,
                extracted
            ),
            NormalizeEvent::DirectParseFailed { reason } => {
                log::debug!("Envelope text is not plain JSON ({}), trying extraction", reason)
            }
            NormalizeEvent::PrefixExtracted { length } => {
                log::info!("Extracted {} bytes of leading JSON array", length)
            }
            NormalizeEvent::ExtractionFailed {
                text_length,
                preview,
            } => log::error!(
                "No JSON array found in envelope text ({} bytes): {}",
                text_length,
                preview
            ),
            NormalizeEvent::ExtractedParseFailed { reason } => {
                log::error!("Extracted JSON array failed to parse: {}", reason)
            }
            NormalizeEvent::PassedThrough { items } => {
                log::debug!("Passing {} item(s) through unchanged", items)
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl NormalizeObserver for NoopObserver {
    fn observe(&mut self, _event: NormalizeEvent) {}
}

/// Collects events in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<NormalizeEvent>,
}

impl NormalizeObserver for RecordingObserver {
    fn observe(&mut self, event: NormalizeEvent) {
        self.events.push(event);
    }
}

/// First characters of `text` for log messages.
pub(crate) fn preview(text: &str) -> String {
    match text.char_indices().nth(PAYLOAD_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
