use std::time::Duration;

use atom_core::ProbeStatus;

use crate::service::probe::{ProbeRegistry, UnknownProbe};

/// Tracing target for boot-status checks.
const TRACING_TARGET: &str = "atom_server::service::boot";

/// Module names the boot screen asks about.
pub mod modules {
    pub const ATOM_CORE: &str = "ATOM_CORE";
    pub const MEMORY_ENGINE: &str = "MEMORY_ENGINE";
    pub const EMBEDDINGS_SERVER: &str = "EMBEDDINGS_SERVER";
    pub const ROBOTICS_INTERFACE: &str = "ROBOTICS_INTERFACE";
}

/// Per-module readiness checks for the boot screen.
///
/// Each check waits for the pacing delay first. The delay only paces the
/// client's animation and has no bearing on the result.
#[derive(Debug, Clone)]
pub struct BootSequence {
    registry: ProbeRegistry,
    pacing: Duration,
}

impl BootSequence {
    pub fn new(registry: ProbeRegistry, pacing: Duration) -> Self {
        Self { registry, pacing }
    }

    /// The registry behind this sequence.
    #[inline]
    pub fn registry(&self) -> &ProbeRegistry {
        &self.registry
    }

    /// Waits out the pacing delay, then runs the probe named `module`.
    pub async fn check(&self, module: &str) -> Result<ProbeStatus, UnknownProbe> {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }

        let result = self.registry.run(module).await;
        match &result {
            Ok(status) => tracing::info!(
                target: TRACING_TARGET,
                module,
                status = status.as_ref(),
                "boot module checked"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET,
                module,
                error = %error,
                "boot module unknown"
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::probe::RoboticsProbe;

    #[tokio::test(start_paused = true)]
    async fn pacing_precedes_the_lookup() {
        let boot = BootSequence::new(
            ProbeRegistry::new(Duration::from_secs(2)),
            Duration::from_millis(350),
        );

        let started = tokio::time::Instant::now();
        let result = boot.check("UNKNOWN").await;

        assert!(result.is_err());
        assert!(started.elapsed() >= Duration::from_millis(350));
    }

    #[tokio::test]
    async fn disabled_robotics_is_down() -> Result<(), UnknownProbe> {
        let registry = ProbeRegistry::new(Duration::from_secs(2))
            .with(modules::ROBOTICS_INTERFACE, RoboticsProbe::new(false, None));
        let boot = BootSequence::new(registry, Duration::ZERO);

        assert_eq!(boot.check(modules::ROBOTICS_INTERFACE).await?, ProbeStatus::Down);
        assert_eq!(boot.registry().names(), vec![modules::ROBOTICS_INTERFACE]);
        Ok(())
    }
}
