//! Speech recognition and synthesis front ends.
//!
//! Both engines are optional collaborators. Recognition calls block, so
//! [`SpeechInput`] routes them through the [`BlockingPool`]. Synthesis only
//! cleans and enqueues text, which never blocks.

use std::fmt;
use std::sync::Arc;

use atom_core::speech::{SpeechRecognizer, SpeechSynthesizer};
use atom_core::{Error, Result, SynthesisMode, SynthesisStatus};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::service::BlockingPool;

/// Tracing target for speech operations.
const TRACING_TARGET: &str = "atom_server::service::speech";

/// Decodes a base64 payload, accepting an optional `data:...;base64,` prefix.
pub fn decode_audio(payload: &str) -> Result<Vec<u8>> {
    let encoded = match payload.split_once(',') {
        Some((_, data)) => data,
        None => payload,
    };

    STANDARD.decode(encoded.trim()).map_err(|e| {
        Error::invalid_input()
            .with_message(format!("Invalid base64 audio: {}", e))
            .with_source(e)
    })
}

/// Speech-to-text front end.
#[derive(Clone)]
pub struct SpeechInput {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    pool: BlockingPool,
}

impl SpeechInput {
    pub fn new(recognizer: Option<Arc<dyn SpeechRecognizer>>, pool: BlockingPool) -> Self {
        Self { recognizer, pool }
    }

    /// `true` when an engine exists and is not reporting itself stopped.
    pub fn is_listening(&self) -> bool {
        self.recognizer
            .as_ref()
            .is_some_and(|recognizer| recognizer.running() != Some(false))
    }

    fn engine(&self) -> Result<Arc<dyn SpeechRecognizer>> {
        self.recognizer.clone().ok_or_else(|| {
            Error::service_unavailable().with_message("STT engine not initialized")
        })
    }

    /// Transcribes raw audio on the blocking pool.
    pub async fn transcribe(&self, audio: Vec<u8>) -> Result<String> {
        let engine = self.engine()?;
        let bytes = audio.len();
        let text = self.pool.run(move || engine.transcribe(&audio)).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            bytes,
            chars = text.len(),
            "audio transcribed"
        );
        Ok(text)
    }

    /// Records from the microphone until silence, on the blocking pool.
    pub async fn listen(&self) -> Result<String> {
        let engine = self.engine()?;
        self.pool.run(move || engine.listen()).await
    }

    /// Stops the recognizer, on the blocking pool.
    pub async fn shutdown(&self) -> Result<()> {
        let engine = self.engine()?;
        self.pool.run(move || engine.shutdown()).await?;
        tracing::info!(target: TRACING_TARGET, "speech recognizer shut down");
        Ok(())
    }
}

impl fmt::Debug for SpeechInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechInput")
            .field("recognizer", &self.recognizer.is_some())
            .field("pool", &self.pool)
            .finish()
    }
}

/// Synthesis status paired with the backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisReport {
    pub status: SynthesisStatus,
    pub mode: SynthesisMode,
}

impl SynthesisReport {
    /// Feature flag off.
    pub const fn disabled() -> Self {
        Self {
            status: SynthesisStatus::Disabled,
            mode: SynthesisMode::Off,
        }
    }

    /// Enabled, but no engine.
    pub const fn offline() -> Self {
        Self {
            status: SynthesisStatus::Offline,
            mode: SynthesisMode::Off,
        }
    }
}

/// Text-to-speech front end.
#[derive(Clone)]
pub struct SpeechOutput {
    enabled: bool,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
}

impl SpeechOutput {
    pub fn new(enabled: bool, synthesizer: Option<Arc<dyn SpeechSynthesizer>>) -> Self {
        Self {
            enabled,
            synthesizer,
        }
    }

    /// Current status. The feature flag is checked before the engine.
    pub fn report(&self) -> SynthesisReport {
        if !self.enabled {
            return SynthesisReport::disabled();
        }

        let Some(synthesizer) = &self.synthesizer else {
            return SynthesisReport::offline();
        };

        let status = if synthesizer.is_running() {
            SynthesisStatus::Online
        } else {
            SynthesisStatus::Idle
        };

        SynthesisReport {
            status,
            mode: synthesizer.variant().into(),
        }
    }

    /// Cleans `text` and queues it for playback, returning what was queued.
    pub fn speak(&self, text: &str) -> Result<String> {
        let synthesizer = self.synthesizer.as_ref().ok_or_else(|| {
            Error::service_unavailable().with_message("TTS engine not initialized")
        })?;

        let cleaned = synthesizer.clean_text(text);
        synthesizer.enqueue(cleaned.clone())?;

        tracing::debug!(
            target: TRACING_TARGET,
            chars = cleaned.len(),
            "text queued for synthesis"
        );
        Ok(cleaned)
    }
}

impl fmt::Debug for SpeechOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechOutput")
            .field("enabled", &self.enabled)
            .field("synthesizer", &self.synthesizer.is_some())
            .finish()
    }
}
