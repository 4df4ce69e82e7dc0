//! Status vocabulary reported by the readiness endpoints.
//!
//! Every probe resolves to a [`ProbeStatus`]; the per-subsystem enums are the
//! wire vocabulary each subsystem is reported with.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Binary outcome of a single readiness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, IntoStaticStr)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProbeStatus {
    /// The collaborator is ready.
    Up,
    /// The collaborator is missing, failing, or did not answer in time.
    Down,
}

impl ProbeStatus {
    /// Returns `true` if the probe reported the collaborator as ready.
    #[inline]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

impl From<bool> for ProbeStatus {
    #[inline]
    fn from(up: bool) -> Self {
        if up { Self::Up } else { Self::Down }
    }
}

/// Status of an in-process engine (core engine, judge model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum RunStatus {
    Running,
    Offline,
}

impl From<ProbeStatus> for RunStatus {
    fn from(status: ProbeStatus) -> Self {
        match status {
            ProbeStatus::Up => Self::Running,
            ProbeStatus::Down => Self::Offline,
        }
    }
}

/// Status of a networked or listening service (embedding server, speech recognition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum LinkStatus {
    Online,
    Offline,
}

impl From<ProbeStatus> for LinkStatus {
    fn from(status: ProbeStatus) -> Self {
        match status {
            ProbeStatus::Up => Self::Online,
            ProbeStatus::Down => Self::Offline,
        }
    }
}

/// Status of the vector store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum StoreStatus {
    Connected,
    Offline,
}

impl From<ProbeStatus> for StoreStatus {
    fn from(status: ProbeStatus) -> Self {
        match status {
            ProbeStatus::Up => Self::Connected,
            ProbeStatus::Down => Self::Offline,
        }
    }
}

/// Status of the speech synthesis engine.
///
/// `Disabled` is decided by the feature flag alone and wins over everything
/// else. `Offline` means enabled but no engine was constructed. `Idle` and
/// `Online` distinguish an existing engine from one that is speaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum SynthesisStatus {
    Disabled,
    Offline,
    Idle,
    Online,
}

/// Speech synthesis backend as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum SynthesisMode {
    Off,
    #[serde(rename = "Edge-TTS")]
    #[strum(serialize = "Edge-TTS")]
    EdgeTts,
    Piper,
}
