//! Readiness of the generation engine.
//!
//! The generation pipeline itself lives outside this workspace. The server
//! only needs to know whether it finished initializing and whether its judge
//! model is loaded, which is what [`CoreEngine`] exposes.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracing target for engine readiness changes.
pub const TRACING_TARGET: &str = "atom_core::engine";

/// Readiness capabilities of the generation engine.
pub trait CoreEngine: Send + Sync {
    /// Returns `true` once engine initialization has completed.
    fn is_ready(&self) -> bool;

    /// Returns `true` once the judge/summary model is loaded.
    fn judge_ready(&self) -> bool;
}

#[derive(Debug, Default)]
struct ReadinessFlags {
    engine: AtomicBool,
    judge: AtomicBool,
}

/// Shared readiness markers set by the engine after initialization.
///
/// Clones share the same flags, so the engine keeps one handle and the server
/// another.
#[derive(Clone, Default)]
pub struct EngineReadiness {
    flags: Arc<ReadinessFlags>,
}

impl EngineReadiness {
    /// Creates markers with nothing ready yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the engine as initialized.
    pub fn mark_ready(&self) {
        self.flags.engine.store(true, Ordering::Release);
        tracing::info!(target: TRACING_TARGET, "core engine marked ready");
    }

    /// Marks the judge model as loaded.
    pub fn mark_judge_ready(&self) {
        self.flags.judge.store(true, Ordering::Release);
        tracing::info!(target: TRACING_TARGET, "judge model marked ready");
    }
}

impl CoreEngine for EngineReadiness {
    fn is_ready(&self) -> bool {
        self.flags.engine.load(Ordering::Acquire)
    }

    fn judge_ready(&self) -> bool {
        self.flags.judge.load(Ordering::Acquire)
    }
}

impl fmt::Debug for EngineReadiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineReadiness")
            .field("engine", &self.is_ready())
            .field("judge", &self.judge_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_is_shared_between_clones() {
        let readiness = EngineReadiness::new();
        let handle = readiness.clone();
        assert!(!readiness.is_ready());

        handle.mark_ready();
        assert!(readiness.is_ready());
        assert!(!readiness.judge_ready());

        handle.mark_judge_ready();
        assert!(readiness.judge_ready());
    }
}
