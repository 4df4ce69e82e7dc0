//! Speech request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request payload for queueing speech output.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Speak {
    /// Text to speak. Markdown markers are stripped before playback.
    pub text: String,
}

/// Request payload for transcribing recorded audio.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transcribe {
    /// Base64 audio, optionally as a `data:` URI.
    #[serde(default)]
    pub audio: String,
}
