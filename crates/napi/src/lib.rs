#![deny(missing_docs)]
//! Node.js bindings that surface mdtag's Rust implementation.

use mdtag_core::{ConvertError, ConvertOptions, Pipeline};
use napi::bindgen_prelude::*;
use napi_derive::napi;

/// Batch processing types.
pub mod batch;
/// NAPI-exposed data structures.
pub mod types;
pub use batch::*;
pub use types::*;

fn build_pipeline(config: Option<ConvertConfig>) -> Result<Pipeline> {
    let options = config.map(ConvertOptions::from).unwrap_or_default();
    Pipeline::try_new(options).map_err(convert_error)
}

/// Converts markdown into an HTML fragment.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { convert } = require('mdtag-napi');
///
/// convert('**bold** _em_');
/// // '<p><strong>bold</strong> <em>em</em></p>'
/// convert('# Title', { headingIds: true });
/// // '<h1 id="title">Title</h1>'
/// ```
#[napi]
pub fn convert(source: String, config: Option<ConvertConfig>) -> Result<String> {
    Ok(build_pipeline(config)?.convert(&source))
}

/// Converts markdown and returns the warnings collected along the way.
#[napi(js_name = "convertWithDiagnostics")]
pub fn convert_with_diagnostics(
    source: String,
    config: Option<ConvertConfig>,
) -> Result<ConversionResult> {
    Ok(build_pipeline(config)?
        .convert_with_diagnostics(&source)
        .into())
}

/// Converts many documents in parallel.
///
/// Documents carrying their own `config` are converted with it; an invalid
/// per-document config fails only that document. An invalid batch-wide config
/// fails the whole call.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { convertBatch } = require('mdtag-napi');
///
/// const inputs = [
///   { id: 'a', source: '# Hello\nWorld' },
///   { id: 'b', source: '> quoted' },
/// ];
///
/// const result = convertBatch(inputs, { maxThreads: 4 });
/// console.log(`Converted ${result.stats.succeeded}/${result.stats.total} in ${result.stats.processingTimeMs}ms`);
/// ```
#[napi(js_name = "convertBatch")]
pub fn convert_batch(
    inputs: Vec<BatchInput>,
    options: Option<BatchOptions>,
) -> Result<BatchProcessingResult> {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    let start = Instant::now();
    let opts = options.unwrap_or_default();
    let continue_on_error = opts.continue_on_error.unwrap_or(true);
    let shared = build_pipeline(opts.config)?;

    // Configure thread pool if max_threads is specified
    let pool = if let Some(max_threads) = opts.max_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads as usize)
            .build()
            .ok()
    } else {
        None
    };

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let converted = match input.config {
            Some(config) => Pipeline::try_new(config.into())
                .map(|pipeline| pipeline.convert_with_diagnostics(&input.source)),
            None => Ok(shared.convert_with_diagnostics(&input.source)),
        };
        match converted {
            Ok(conversion) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    result: Some(conversion.into()),
                    error: None,
                }
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if continue_on_error {
        if let Some(pool) = pool {
            pool.install(|| inputs.into_par_iter().map(process_input).collect())
        } else {
            inputs.into_par_iter().map(process_input).collect()
        }
    } else {
        // Stop at the first failing document
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let stop = result.error.is_some();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    };

    let elapsed = start.elapsed();

    Ok(BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        },
    })
}

/// Maps option errors to `InvalidArg`.
fn convert_error(err: ConvertError) -> Error {
    Error::new(Status::InvalidArg, err.to_string())
}
