//! Scoped release of ephemeral engine resources.

use crate::engine::ContainerEngine;

/// Owns an ephemeral container for the duration of a run.
///
/// Dropping the guard issues exactly one force-removal. A failed removal
/// is logged at debug level and never replaces the run's own outcome.
#[derive(Debug)]
pub struct ContainerGuard<'a, E: ContainerEngine + ?Sized> {
    engine: &'a E,
    name: String,
}

impl<'a, E: ContainerEngine + ?Sized> ContainerGuard<'a, E> {
    /// Registers removal of `name`; create it before the container starts.
    #[must_use]
    pub fn new(engine: &'a E, name: impl Into<String>) -> Self {
        Self {
            engine,
            name: name.into(),
        }
    }

    /// Name of the guarded container.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<E: ContainerEngine + ?Sized> Drop for ContainerGuard<'_, E> {
    fn drop(&mut self) {
        tracing::debug!(name = %self.name, "deleting temp container");
        if let Err(e) = self.engine.remove(&self.name) {
            tracing::debug!(name = %self.name, error = %e, "failed to delete temp container");
        }
    }
}
