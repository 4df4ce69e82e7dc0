//! Readiness probes and the registry that runs them.
//!
//! A [`Probe`] checks one collaborator and reports a [`ProbeOutcome`]. Every
//! probe runs through [`run_isolated`], which bounds it with a timeout and
//! contains panics, so callers only ever see [`ProbeStatus::Up`] or
//! [`ProbeStatus::Down`].

mod checks;
mod registry;
mod system;

use std::sync::Arc;
use std::time::Duration;

use atom_core::ProbeStatus;

pub use self::checks::{
    EmbeddingProbe, EngineProbe, JudgeProbe, MemoryProbe, RecognizerProbe, RoboticsProbe,
};
pub use self::registry::{ProbeRegistry, UnknownProbe};
pub use self::system::{HealthReport, SystemHealth};

/// Tracing target for probe execution.
pub(crate) const TRACING_TARGET: &str = "atom_server::service::probe";

/// Why a probe reported its subsystem as down.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    /// The subsystem is switched off by configuration.
    #[error("disabled by configuration")]
    Disabled,
    /// No collaborator was constructed at startup.
    #[error("collaborator not initialized")]
    Missing,
    /// The collaborator exists but has not finished starting.
    #[error("collaborator not ready")]
    NotReady,
    /// The collaborator could not be reached or answered with an error.
    #[error("unreachable: {0}")]
    Unreachable(String),
    /// The check did not finish within the probe timeout.
    #[error("timed out")]
    TimedOut,
    /// The check panicked.
    #[error("panicked")]
    Panicked,
}

impl From<atom_core::Error> for ProbeFailure {
    fn from(error: atom_core::Error) -> Self {
        Self::Unreachable(error.to_string())
    }
}

/// Result of a single readiness check.
pub type ProbeOutcome = Result<(), ProbeFailure>;

/// A named, side-effect-free readiness check against one collaborator.
#[async_trait::async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Checks the collaborator once. Results are never memoized.
    async fn check(&self) -> ProbeOutcome;
}

/// Runs `probe` on its own task, bounded by `timeout`.
///
/// A timeout aborts the task. A panic inside the probe is caught by the
/// runtime and reported as [`ProbeFailure::Panicked`].
pub async fn run_isolated(probe: Arc<dyn Probe>, timeout: Duration) -> ProbeOutcome {
    let mut handle = tokio::spawn(async move { probe.check().await });

    match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_error)) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %join_error,
                "probe task failed"
            );
            Err(ProbeFailure::Panicked)
        }
        Err(_) => {
            handle.abort();
            Err(ProbeFailure::TimedOut)
        }
    }
}

/// Collapses an outcome into the binary status vocabulary.
pub(crate) fn outcome_status(name: &str, outcome: &ProbeOutcome) -> ProbeStatus {
    match outcome {
        Ok(()) => ProbeStatus::Up,
        Err(failure) => {
            tracing::debug!(
                target: TRACING_TARGET,
                probe = name,
                reason = %failure,
                "probe reported down"
            );
            ProbeStatus::Down
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ProbeOutcome);

    #[async_trait::async_trait]
    impl Probe for Fixed {
        async fn check(&self) -> ProbeOutcome {
            self.0.clone()
        }
    }

    struct Panicking;

    #[async_trait::async_trait]
    impl Probe for Panicking {
        async fn check(&self) -> ProbeOutcome {
            panic!("collaborator exploded");
        }
    }

    struct Hanging;

    #[async_trait::async_trait]
    impl Probe for Hanging {
        async fn check(&self) -> ProbeOutcome {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn passes_through_outcome() {
        let up = run_isolated(Arc::new(Fixed(Ok(()))), Duration::from_secs(1)).await;
        assert_eq!(up, Ok(()));

        let down = run_isolated(
            Arc::new(Fixed(Err(ProbeFailure::Missing))),
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(down, Err(ProbeFailure::Missing));
    }

    #[tokio::test]
    async fn contains_panics() {
        let outcome = run_isolated(Arc::new(Panicking), Duration::from_secs(1)).await;
        assert_eq!(outcome, Err(ProbeFailure::Panicked));
    }

    #[tokio::test(start_paused = true)]
    async fn bounds_hanging_probes() {
        let outcome = run_isolated(Arc::new(Hanging), Duration::from_secs(2)).await;
        assert_eq!(outcome, Err(ProbeFailure::TimedOut));
    }
}
