//! Speech synthesis and recognition handlers.
//!
//! Synthesis only cleans and queues text, so `/tts/speak` returns as soon as
//! the text is queued. Recognition blocks until the engine is done and runs
//! on the blocking worker pool.

use std::time::Instant;

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use atom_core::ErrorKind as CoreErrorKind;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use crate::extract::Json;
use crate::handler::request::{Speak, Transcribe};
use crate::handler::response::{
    ErrorResponse, Recognized, SpeechInputStatus, SpeechOutputStatus, SpeechQueued,
    SpeechShutdown, Transcription, TranscriptionDebug,
};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{ServiceState, SpeechInput, SpeechOutput, decode_audio};

/// Tracing target for speech operations.
const TRACING_TARGET: &str = "atom_server::handler::speech";

/// Keeps `503` for a missing engine and turns any other failure into a `500`.
fn engine_failure(
    error: atom_core::Error,
    message: impl FnOnce(&atom_core::Error) -> String,
) -> Error<'static> {
    match error.kind {
        CoreErrorKind::ServiceUnavailable => error.into(),
        _ => {
            let message = message(&error);
            tracing::error!(target: TRACING_TARGET, error = %error, "Speech engine failed");
            ErrorKind::InternalServerError.with_message(message)
        }
    }
}

/// Reports the speech synthesis status.
#[tracing::instrument(skip_all)]
async fn tts_health(
    State(speech_output): State<SpeechOutput>,
) -> Result<(StatusCode, Json<SpeechOutputStatus>)> {
    let report = speech_output.report();
    Ok((StatusCode::OK, Json(report.into())))
}

fn tts_health_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get speech synthesis status")
        .description("Returns whether speech synthesis is disabled, offline, idle or speaking.")
        .response::<200, Json<SpeechOutputStatus>>()
}

/// Queues text for playback.
#[tracing::instrument(skip_all)]
async fn speak(
    State(speech_output): State<SpeechOutput>,
    Json(request): Json<Speak>,
) -> Result<(StatusCode, Json<SpeechQueued>)> {
    let text = speech_output
        .speak(&request.text)
        .map_err(|error| engine_failure(error, |e| format!("TTS failed: {}", e)))?;

    tracing::debug!(target: TRACING_TARGET, chars = text.len(), "Speech queued");

    Ok((StatusCode::OK, Json(SpeechQueued::new(text))))
}

fn speak_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Speak text")
        .description(
            "Strips markdown from the text and queues it for playback. Returns without \
             waiting for the audio to finish.",
        )
        .response::<200, Json<SpeechQueued>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Reports the speech recognition status.
#[tracing::instrument(skip_all)]
async fn stt_health(
    State(speech_input): State<SpeechInput>,
) -> Result<(StatusCode, Json<SpeechInputStatus>)> {
    let status = SpeechInputStatus::from(speech_input.is_listening());
    Ok((StatusCode::OK, Json(status)))
}

fn stt_health_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get speech recognition status")
        .response::<200, Json<SpeechInputStatus>>()
}

/// Transcribes recorded audio.
#[tracing::instrument(skip_all, fields(request_id))]
async fn transcribe(
    State(speech_input): State<SpeechInput>,
    Json(request): Json<Transcribe>,
) -> Result<(StatusCode, Json<Transcription>)> {
    let mut request_id = Uuid::new_v4().simple().to_string();
    request_id.truncate(8);
    tracing::Span::current().record("request_id", request_id.as_str());

    if request.audio.trim().is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("audio field is empty")
            .with_resource("audio"));
    }

    let started = Instant::now();
    let audio = decode_audio(&request.audio)?;
    let bytes_received = audio.len();

    tracing::debug!(target: TRACING_TARGET, bytes_received, "Audio received");

    let text = speech_input.transcribe(audio).await.map_err(|error| {
        engine_failure(error, |e| format!("STT failed [{}]: {}", request_id, e))
    })?;

    let duration_sec = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;

    tracing::info!(
        target: TRACING_TARGET,
        bytes_received,
        duration_sec,
        chars = text.len(),
        "Audio transcribed"
    );

    let response = Transcription {
        text,
        debug: TranscriptionDebug {
            request_id,
            duration_sec,
            bytes_received,
        },
    };

    Ok((StatusCode::OK, Json(response)))
}

fn transcribe_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Transcribe audio")
        .description(
            "Transcribes base64 encoded audio, optionally given as a data URI. The response \
             carries a short request id for correlating with the server logs.",
        )
        .response::<200, Json<Transcription>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Records from the microphone until silence and transcribes it.
#[tracing::instrument(skip_all)]
async fn listen(
    State(speech_input): State<SpeechInput>,
) -> Result<(StatusCode, Json<Recognized>)> {
    let text = speech_input
        .listen()
        .await
        .map_err(|error| engine_failure(error, |e| format!("STT failed: {}", e)))?;

    tracing::debug!(target: TRACING_TARGET, chars = text.len(), "Microphone input recognized");

    Ok((StatusCode::OK, Json(Recognized { text })))
}

fn listen_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Listen on the microphone")
        .description("Blocks until the speaker stops talking, then returns the transcript.")
        .response::<200, Json<Recognized>>()
        .response::<500, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Stops the speech recognizer.
#[tracing::instrument(skip_all)]
async fn shutdown(
    State(speech_input): State<SpeechInput>,
) -> Result<(StatusCode, Json<SpeechShutdown>)> {
    speech_input
        .shutdown()
        .await
        .map_err(|error| engine_failure(error, |e| format!("STT shutdown failed: {}", e)))?;

    Ok((StatusCode::OK, Json(SpeechShutdown::default())))
}

fn shutdown_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Shut down speech recognition")
        .response::<200, Json<SpeechShutdown>>()
        .response::<500, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Returns routes for speech synthesis and recognition.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    let synthesis = ApiRouter::new()
        .api_route("/tts/health", get_with(tts_health, tts_health_docs))
        .api_route("/tts/speak", post_with(speak, speak_docs))
        .with_path_items(|item| item.tag("Speech Synthesis"));

    let recognition = ApiRouter::new()
        .api_route("/stt", post_with(transcribe, transcribe_docs))
        .api_route("/stt/health", get_with(stt_health, stt_health_docs))
        .api_route("/stt/listen", post_with(listen, listen_docs))
        .api_route("/stt/shutdown", post_with(shutdown, shutdown_docs))
        .with_path_items(|item| item.tag("Speech Recognition"));

    synthesis.merge(recognition)
}
