//! Batch processing types for parallel conversion.

use crate::types::{ConversionResult, ConvertConfig};
use napi_derive::napi;

/// Input for batch processing - a single document to convert.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document identifier, echoed back in the result.
    pub id: String,
    /// Markdown source.
    pub source: String,
    /// Per-document options replacing the batch-wide config.
    pub config: Option<ConvertConfig>,
}

/// Result for a single document in a batch.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Document identifier matching the input.
    pub id: String,
    /// Conversion result (present on success).
    pub result: Option<ConversionResult>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Total number of documents submitted.
    pub total: u32,
    /// Number of successful conversions.
    pub succeeded: u32,
    /// Number of failed conversions.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to number of CPU cores.
    pub max_threads: Option<u32>,
    /// Whether to continue processing after an error. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Options used for every document without its own config.
    pub config: Option<ConvertConfig>,
}

/// Result of batch processing containing all results and statistics.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchProcessingResult {
    /// Individual results, in input order.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}
