use std::io::Read;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    engine::{
        backend::{EngineError, RenderEngine},
        encode::RasterFormat,
    },
    foundation::error::{WaveformError, WaveformResult},
    protocol::codec::{RenderRequest, RenderResult, decode_requests, encode_responses},
    render::policy::RenderPolicy,
};

/// Batch-level controls that do not affect pixels.
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Container for rendered images.
    pub format: RasterFormat,
    /// Render requests of one batch concurrently when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters for one processed batch.
pub struct BatchStats {
    /// Requests found in the input document.
    pub requests: usize,
    /// Responses written (successes plus failures).
    pub responses: usize,
    /// Responses carrying an error.
    pub failed: usize,
    /// Requests dropped for naming an unsupported function.
    pub dropped: usize,
}

/// Why a single request produced an error response.
#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    /// `params` was empty.
    #[error("missing audio payload in params[0]")]
    MissingPayload,

    /// `params[0]` is not standard padded base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The engine rejected the audio.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Read a whole request document from `input` and return the encoded response document.
pub fn run_batch<R: Read>(
    input: R,
    engine: &dyn RenderEngine,
    policy: &RenderPolicy,
    opts: &BatchOpts,
) -> WaveformResult<Vec<u8>> {
    run_batch_with_stats(input, engine, policy, opts).map(|(doc, _)| doc)
}

/// Like [`run_batch`], also returning counters.
#[tracing::instrument(skip_all, fields(format = %opts.format, parallel = opts.parallel))]
pub fn run_batch_with_stats<R: Read>(
    mut input: R,
    engine: &dyn RenderEngine,
    policy: &RenderPolicy,
    opts: &BatchOpts,
) -> WaveformResult<(Vec<u8>, BatchStats)> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;
    tracing::debug!(bytes = buf.len(), "read request document");

    let requests = decode_requests(&buf)?;
    let results = process_requests(&requests, engine, policy, opts)?;

    let failed = results.iter().filter(|r| !r.is_success()).count();
    let stats = BatchStats {
        requests: requests.len(),
        responses: results.len(),
        failed,
        dropped: requests.len() - results.len(),
    };
    tracing::info!(
        requests = stats.requests,
        responses = stats.responses,
        failed = stats.failed,
        dropped = stats.dropped,
        "batch processed"
    );

    Ok((encode_responses(&results)?, stats))
}

/// Process decoded requests, returning responses in request order.
///
/// Requests with an unsupported function contribute no response. A failing request yields an
/// error response and never stops the others.
pub fn process_requests(
    requests: &[RenderRequest],
    engine: &dyn RenderEngine,
    policy: &RenderPolicy,
    opts: &BatchOpts,
) -> WaveformResult<Vec<RenderResult>> {
    let slots: Vec<Option<RenderResult>> = if opts.parallel && requests.len() > 1 {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            requests
                .par_iter()
                .map(|request| process_request(request, engine, policy, opts.format))
                .collect::<WaveformResult<Vec<_>>>()
        })?
    } else {
        requests
            .iter()
            .map(|request| process_request(request, engine, policy, opts.format))
            .collect::<WaveformResult<Vec<_>>>()?
    };

    Ok(slots.into_iter().flatten().collect())
}

/// Process one request.
///
/// `Ok(None)` means the request was dropped. `Err` is reserved for failures that are not the
/// request's fault (an image that rendered but cannot be encoded).
pub fn process_request(
    request: &RenderRequest,
    engine: &dyn RenderEngine,
    policy: &RenderPolicy,
    format: RasterFormat,
) -> WaveformResult<Option<RenderResult>> {
    if !request.is_waveform() {
        tracing::warn!(
            id = %request.id,
            function = %request.function,
            "dropping request with unsupported function"
        );
        return Ok(None);
    }

    let image = match render_request(request, engine, policy) {
        Ok(image) => image,
        Err(err) => {
            tracing::warn!(id = %request.id, error = %err, "request failed");
            return Ok(Some(RenderResult::failure(
                request.id.clone(),
                err.to_string(),
            )));
        }
    };

    let encoded = engine.encode_image(&image, format)?;
    tracing::debug!(
        id = %request.id,
        width = image.width(),
        height = image.height(),
        bytes = encoded.len(),
        "rendered waveform"
    );
    Ok(Some(RenderResult::success(
        request.id.clone(),
        STANDARD.encode(encoded),
    )))
}

fn render_request(
    request: &RenderRequest,
    engine: &dyn RenderEngine,
    policy: &RenderPolicy,
) -> Result<RgbaImage, RequestError> {
    let audio = decode_payload(request.payload().ok_or(RequestError::MissingPayload)?)?;
    Ok(engine.render(&audio, policy)?)
}

/// Standard padded base64; line breaks are ignored.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    if payload.contains(['\r', '\n']) {
        let compact: String = payload.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        STANDARD.decode(compact)
    } else {
        STANDARD.decode(payload)
    }
}

fn build_thread_pool(threads: Option<usize>) -> WaveformResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WaveformError::config("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WaveformError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/orchestrator.rs"]
mod tests;
