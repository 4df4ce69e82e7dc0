use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use atom_core::ProbeStatus;

use super::{Probe, TRACING_TARGET, outcome_status, run_isolated};

/// Returned by [`ProbeRegistry::run`] for a name that was never registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown probe: {0}")]
pub struct UnknownProbe(pub String);

/// Named probes, looked up and run one at a time.
///
/// Cloning is cheap: clones share the probe table until one of them
/// registers a new probe.
#[derive(Clone)]
pub struct ProbeRegistry {
    probes: Arc<HashMap<String, Arc<dyn Probe>>>,
    timeout: Duration,
}

impl ProbeRegistry {
    /// Creates an empty registry whose probes are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            probes: Arc::default(),
            timeout,
        }
    }

    /// Registers `probe` under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: impl Into<String>, probe: impl Probe) {
        let name = name.into();
        let replaced = Arc::make_mut(&mut self.probes)
            .insert(name.clone(), Arc::new(probe))
            .is_some();

        tracing::debug!(target: TRACING_TARGET, probe = %name, replaced, "probe registered");
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, probe: impl Probe) -> Self {
        self.register(name, probe);
        self
    }

    /// Registered probe names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.probes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs the probe registered under `name`.
    ///
    /// Fails only when the name is unknown. Any failure inside the probe,
    /// including a timeout or panic, becomes [`ProbeStatus::Down`].
    pub async fn run(&self, name: &str) -> Result<ProbeStatus, UnknownProbe> {
        let probe = self
            .probes
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownProbe(name.to_owned()))?;

        let outcome = run_isolated(probe, self.timeout).await;
        Ok(outcome_status(name, &outcome))
    }
}

impl fmt::Debug for ProbeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeRegistry")
            .field("probes", &self.names())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::service::probe::{ProbeFailure, ProbeOutcome};

    #[derive(Default)]
    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Probe for Counting {
        async fn check(&self) -> ProbeOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Down;

    #[async_trait::async_trait]
    impl Probe for Down {
        async fn check(&self) -> ProbeOutcome {
            Err(ProbeFailure::NotReady)
        }
    }

    struct Panicking;

    #[async_trait::async_trait]
    impl Probe for Panicking {
        async fn check(&self) -> ProbeOutcome {
            panic!("probe bug");
        }
    }

    #[tokio::test]
    async fn unknown_name_is_reported() {
        let registry = ProbeRegistry::new(Duration::from_secs(2));
        let result = registry.run("NOT_A_MODULE").await;
        assert_eq!(result, Err(UnknownProbe("NOT_A_MODULE".to_owned())));
    }

    #[tokio::test]
    async fn runs_probe_on_every_call() -> Result<(), UnknownProbe> {
        let probe = Counting::default();
        let calls = probe.calls.clone();
        let registry = ProbeRegistry::new(Duration::from_secs(2)).with("ATOM_CORE", probe);

        assert_eq!(registry.run("ATOM_CORE").await?, ProbeStatus::Up);
        assert_eq!(registry.run("ATOM_CORE").await?, ProbeStatus::Up);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn reregistration_overwrites() -> Result<(), UnknownProbe> {
        let mut registry = ProbeRegistry::new(Duration::from_secs(2)).with("MEMORY_ENGINE", Down);
        assert_eq!(registry.run("MEMORY_ENGINE").await?, ProbeStatus::Down);

        registry.register("MEMORY_ENGINE", Counting::default());
        assert_eq!(registry.run("MEMORY_ENGINE").await?, ProbeStatus::Up);
        assert_eq!(registry.names(), vec!["MEMORY_ENGINE"]);
        Ok(())
    }

    #[tokio::test]
    async fn panicking_probe_is_down() -> Result<(), UnknownProbe> {
        let registry =
            ProbeRegistry::new(Duration::from_secs(2)).with("ROBOTICS_INTERFACE", Panicking);
        assert_eq!(registry.run("ROBOTICS_INTERFACE").await?, ProbeStatus::Down);
        Ok(())
    }

    #[tokio::test]
    async fn clones_keep_their_own_table() -> Result<(), UnknownProbe> {
        let original = ProbeRegistry::new(Duration::from_secs(2));
        let extended = original.clone().with("ATOM_CORE", Down);

        assert!(original.run("ATOM_CORE").await.is_err());
        assert_eq!(extended.run("ATOM_CORE").await?, ProbeStatus::Down);
        Ok(())
    }
}
