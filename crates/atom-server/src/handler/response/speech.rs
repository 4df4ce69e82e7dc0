//! Speech response types.

use atom_core::{SynthesisMode, SynthesisStatus};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::service::SynthesisReport;

/// Text-to-speech status response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpeechOutputStatus {
    pub status: SynthesisStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SynthesisMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<SynthesisReport> for SpeechOutputStatus {
    fn from(report: SynthesisReport) -> Self {
        match report.status {
            SynthesisStatus::Offline => Self {
                status: report.status,
                mode: None,
                detail: Some("TTS engine not initialized in runtime".to_owned()),
            },
            _ => Self {
                status: report.status,
                mode: Some(report.mode),
                detail: None,
            },
        }
    }
}

/// Confirmation that text was queued for playback.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpeechQueued {
    /// Always `queued`.
    pub status: String,
    /// The cleaned text that was queued.
    pub text: String,
}

impl SpeechQueued {
    pub fn new(text: String) -> Self {
        Self {
            status: "queued".to_owned(),
            text,
        }
    }
}

/// Speech-to-text availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ListeningStatus {
    Listening,
    Offline,
}

/// Speech-to-text status response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpeechInputStatus {
    pub status: ListeningStatus,
}

impl From<bool> for SpeechInputStatus {
    fn from(listening: bool) -> Self {
        let status = if listening {
            ListeningStatus::Listening
        } else {
            ListeningStatus::Offline
        };
        Self { status }
    }
}

/// Diagnostics attached to a transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionDebug {
    /// Short request id, also used in the logs.
    pub request_id: String,
    /// Wall time of decoding and transcription, rounded to 10 ms.
    pub duration_sec: f64,
    /// Size of the decoded audio.
    pub bytes_received: usize,
}

/// Transcription response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transcription {
    pub text: String,
    pub debug: TranscriptionDebug,
}

/// Microphone recognition response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recognized {
    pub text: String,
}

/// Recognizer shutdown confirmation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpeechShutdown {
    pub status: String,
}

impl Default for SpeechShutdown {
    fn default() -> Self {
        Self {
            status: "STT engine shut down".to_owned(),
        }
    }
}
