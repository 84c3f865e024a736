use thiserror::Error;

/// Failure to attach a visibility observer to the gate's container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserverError {
    #[error("no browser window is available")]
    NoWindow,
    #[error("IntersectionObserver could not be created: {0}")]
    Create(String),
}
