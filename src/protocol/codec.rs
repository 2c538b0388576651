use serde::{Deserialize, Serialize};

use crate::foundation::error::{WaveformError, WaveformResult};

/// Operation name that asks for a waveform image.
pub const WAVEFORM_FUNCTION: &str = "waveform";

/// Value of [`RenderResult::error`] on success, kept for wire compatibility.
pub const SUCCESS_MARKER: &str = "false";

/// One entry of the input document's `requests` array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Caller-supplied correlation token, echoed in the response.
    #[serde(default)]
    pub id: String,
    /// Requested operation; only [`WAVEFORM_FUNCTION`] is served.
    #[serde(default)]
    pub function: String,
    /// Positional arguments; `params[0]` is the base64 audio payload.
    #[serde(default)]
    pub params: Vec<String>,
}

impl RenderRequest {
    /// A `waveform` request for an already base64-encoded payload.
    pub fn waveform(id: impl Into<String>, payload_b64: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            function: WAVEFORM_FUNCTION.to_owned(),
            params: vec![payload_b64.into()],
        }
    }

    /// Whether the request asks for a waveform image.
    pub fn is_waveform(&self) -> bool {
        self.function == WAVEFORM_FUNCTION
    }

    /// The base64 audio payload, if any.
    pub fn payload(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

/// One entry of the output document's `responses` array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    /// Copied from the originating request.
    #[serde(default)]
    pub id: String,
    /// Base64 image on success, empty on failure.
    #[serde(default)]
    pub result: String,
    /// [`SUCCESS_MARKER`] on success, a description of the failure otherwise.
    #[serde(default)]
    pub error: String,
}

impl RenderResult {
    /// A successful response carrying a base64 image.
    pub fn success(id: impl Into<String>, image_b64: String) -> Self {
        Self {
            id: id.into(),
            result: image_b64,
            error: SUCCESS_MARKER.to_owned(),
        }
    }

    /// A failed response with an empty result.
    pub fn failure(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            result: String::new(),
            error: error.into(),
        }
    }

    /// Whether this response reports success.
    pub fn is_success(&self) -> bool {
        self.error == SUCCESS_MARKER
    }
}

/// Input envelope: `{"requests": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBatch {
    /// Requests in caller order.
    #[serde(default)]
    pub requests: Vec<RenderRequest>,
}

/// Output envelope: `{"responses": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBatch {
    /// Responses in request order.
    #[serde(default)]
    pub responses: Vec<RenderResult>,
}

/// Parse a whole input document.
///
/// No semantic checks happen here; unknown operations and missing payloads are the
/// orchestrator's business.
pub fn decode_requests(bytes: &[u8]) -> WaveformResult<Vec<RenderRequest>> {
    let batch: RequestBatch = serde_json::from_slice(bytes)
        .map_err(|e| WaveformError::decode(format!("parse request document: {e}")))?;
    Ok(batch.requests)
}

/// Serialize responses into one output document, preserving order.
pub fn encode_responses(results: &[RenderResult]) -> WaveformResult<Vec<u8>> {
    #[derive(Serialize)]
    struct Envelope<'a> {
        responses: &'a [RenderResult],
    }

    serde_json::to_vec(&Envelope { responses: results })
        .map_err(|e| WaveformError::encode(format!("serialize response document: {e}")))
}

/// Serialize requests into an input document (client side).
pub fn encode_requests(requests: &[RenderRequest]) -> WaveformResult<Vec<u8>> {
    #[derive(Serialize)]
    struct Envelope<'a> {
        requests: &'a [RenderRequest],
    }

    serde_json::to_vec(&Envelope { requests })
        .map_err(|e| WaveformError::encode(format!("serialize request document: {e}")))
}

/// Parse an output document (client side).
pub fn decode_responses(bytes: &[u8]) -> WaveformResult<Vec<RenderResult>> {
    let batch: ResponseBatch = serde_json::from_slice(bytes)
        .map_err(|e| WaveformError::decode(format!("parse response document: {e}")))?;
    Ok(batch.responses)
}

#[cfg(test)]
#[path = "../../tests/unit/protocol/codec.rs"]
mod tests;
