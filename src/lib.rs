//! Batch waveform renderer.
//!
//! A caller pipes one JSON document listing render requests into the process; each request
//! carries base64 audio, and the process answers with one JSON document holding a base64
//! image (or an error) per request.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: hex colors + strategy name -> [`ColorPolicy`], then numeric options ->
//!    [`RenderPolicy`]. Built once, shared read-only.
//! 2. **Decode**: input bytes -> [`RenderRequest`]s ([`decode_requests`]).
//! 3. **Render**: per request, base64 payload -> audio bytes -> image via a [`RenderEngine`].
//! 4. **Encode**: [`RenderResult`]s -> output bytes ([`encode_responses`]).
//!
//! [`run_batch`] drives all of it. A failing request only affects its own response; errors
//! returned as [`WaveformError`] abort the batch.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod color;
mod engine;
mod foundation;
mod protocol;
mod render;

pub use batch::orchestrator::{
    BatchOpts, BatchStats, RequestError, decode_payload, process_request, process_requests,
    run_batch, run_batch_with_stats,
};
pub use color::hex::{Rgb8, hex_to_rgb};
pub use color::policy::{CHECKER_PERIOD, ColorFill, ColorPolicy, ColorStrategy};
pub use engine::backend::{EngineError, RenderEngine, WaveformEngine};
pub use engine::decode::{PcmAudio, decode_wav};
pub use engine::encode::{RasterFormat, encode_image};
pub use engine::raster::{BASE_HEIGHT, MAX_IMAGE_PIXELS, clipping_gain, draw_waveform};
pub use engine::reduce::{rms_bars, samples_per_bar};
pub use foundation::error::{WaveformError, WaveformResult};
pub use protocol::codec::{
    RenderRequest, RenderResult, RequestBatch, ResponseBatch, SUCCESS_MARKER, WAVEFORM_FUNCTION,
    decode_requests, decode_responses, encode_requests, encode_responses,
};
pub use render::policy::RenderPolicy;
