//! Robotics interface.

/// A constructed robotics client.
///
/// Readiness of the robotics interface is decided by whether a client exists
/// at all, so the trait only carries what is needed for logging.
pub trait RoboticsClient: Send + Sync {
    /// Human-readable device name.
    fn device(&self) -> &str;
}
